// SPDX-FileCopyrightText: 2026 Orrery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-planet enrichment table used when converting change-log rows.
//!
//! Built from two listings: recently created catalogue rows, then recently
//! deleted rows. For an id present in both, the deleted row replaces the
//! catalogue entry whole; its data is newer.

use std::collections::HashMap;

use orrery_core::types::{DeletedPlanetRow, PlanetRecord};

use crate::types::SnapshotAttributes;

/// What is known about one planet outside the change log.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanetLookupEntry {
    pub name: Option<String>,
    pub method: Option<String>,
    pub attributes: SnapshotAttributes,
}

impl From<&PlanetRecord> for PlanetLookupEntry {
    fn from(row: &PlanetRecord) -> Self {
        Self {
            name: Some(row.name.clone()).filter(|n| !n.is_empty()),
            method: row.disc_method.clone(),
            attributes: SnapshotAttributes::collect(|attr| row.attribute(attr)),
        }
    }
}

impl From<&DeletedPlanetRow> for PlanetLookupEntry {
    fn from(row: &DeletedPlanetRow) -> Self {
        Self {
            name: Some(row.name.clone()).filter(|n| !n.is_empty()),
            method: row.disc_method.clone(),
            attributes: SnapshotAttributes::collect(|attr| row.attribute(attr)),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PlanetLookup {
    entries: HashMap<i64, PlanetLookupEntry>,
}

impl PlanetLookup {
    /// Catalogue rows first, then deleted rows on top.
    pub fn build(planets: &[PlanetRecord], deleted: &[DeletedPlanetRow]) -> Self {
        let mut lookup = Self::default();
        for row in planets {
            lookup.entries.insert(row.id, row.into());
        }
        for row in deleted {
            lookup.entries.insert(row.id, row.into());
        }
        lookup
    }

    pub fn get(&self, id: i64) -> Option<&PlanetLookupEntry> {
        self.entries.get(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
