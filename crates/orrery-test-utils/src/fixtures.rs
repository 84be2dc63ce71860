// SPDX-FileCopyrightText: 2026 Orrery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Row builders for catalogue fixtures.

use orrery_core::types::{ChangeAction, ChangeLogEntry, DeletedPlanetRow, FieldChange, PlanetRecord};
use orrery_core::FieldValue;

/// A live planet created (and last updated) at `created_at`.
pub fn planet(id: i64, name: &str, created_at: &str) -> PlanetRecord {
    PlanetRecord {
        id,
        name: name.to_string(),
        disc_method: Some("Transit".to_string()),
        disc_year: Some(2020),
        orbperd: Some(10.5),
        rade: Some(1.2),
        masse: None,
        st_teff: Some(5700.0),
        st_rad: None,
        st_mass: None,
        created_at: Some(created_at.to_string()),
        updated_at: Some(created_at.to_string()),
        is_deleted: false,
        deleted_at: None,
        changes: Vec::new(),
    }
}

/// A live planet with a later update timestamp.
pub fn updated_planet(id: i64, name: &str, created_at: &str, updated_at: &str) -> PlanetRecord {
    PlanetRecord {
        updated_at: Some(updated_at.to_string()),
        ..planet(id, name, created_at)
    }
}

pub fn deleted_row(id: i64, name: &str, deleted_at: &str) -> DeletedPlanetRow {
    DeletedPlanetRow {
        id,
        name: name.to_string(),
        disc_method: Some("Radial Velocity".to_string()),
        disc_year: Some(2011),
        deleted_at: Some(deleted_at.to_string()),
        ..Default::default()
    }
}

pub fn change_log(
    id: i64,
    planet_id: i64,
    action: ChangeAction,
    created_at: &str,
    changes: Vec<FieldChange>,
) -> ChangeLogEntry {
    ChangeLogEntry {
        id,
        planet_id,
        action,
        planet_name: None,
        changes,
        created_at: created_at.to_string(),
    }
}

pub fn change(
    field: &str,
    before: impl Into<FieldValue>,
    after: impl Into<FieldValue>,
) -> FieldChange {
    FieldChange::new(field, before, after)
}
