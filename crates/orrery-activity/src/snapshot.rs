// SPDX-FileCopyrightText: 2026 Orrery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Last-seen field values per planet, kept across reconciliations.
//!
//! The store is owned by whoever builds the reconciler and may be shared
//! between reconcilers through an `Arc`. It is in-memory and best-effort:
//! losing it only means the next derived feed carries no `updated` diffs.

use std::collections::HashMap;

use tokio::sync::Mutex;
use tracing::debug;

use orrery_core::types::{DeletedPlanetRow, PlanetRecord};
use orrery_core::{FieldValue, TrackedField};

/// Tracked field values of one planet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanetSnapshot {
    values: HashMap<TrackedField, FieldValue>,
}

impl PlanetSnapshot {
    pub fn from_record(row: &PlanetRecord) -> Self {
        Self::collect(|field| row.field(field))
    }

    pub fn from_deleted(row: &DeletedPlanetRow) -> Self {
        Self::collect(|field| row.field(field))
    }

    fn collect(value_of: impl Fn(TrackedField) -> FieldValue) -> Self {
        Self {
            values: TrackedField::ALL
                .iter()
                .map(|&field| (field, value_of(field)))
                .collect(),
        }
    }

    /// Value of `field`; null when never recorded.
    pub fn get(&self, field: TrackedField) -> FieldValue {
        self.values.get(&field).cloned().unwrap_or_default()
    }

    /// This snapshot with the non-null values of a deleted row laid on top.
    /// The deletion flag is always set.
    pub fn overlay_deleted(&self, row: &DeletedPlanetRow) -> Self {
        let mut merged = self.clone();
        for field in TrackedField::ALL {
            let value = row.field(field);
            if !value.is_null() {
                merged.values.insert(field, value);
            }
        }
        merged
            .values
            .insert(TrackedField::IsDeleted, FieldValue::Bool(true));
        merged
    }
}

/// Snapshot of every planet seen so far, keyed by id.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    inner: Mutex<HashMap<i64, PlanetSnapshot>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of the whole store.
    pub async fn capture(&self) -> HashMap<i64, PlanetSnapshot> {
        self.inner.lock().await.clone()
    }

    pub async fn get(&self, id: i64) -> Option<PlanetSnapshot> {
        self.inner.lock().await.get(&id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }

    pub async fn clear(&self) {
        self.inner.lock().await.clear();
    }

    /// Records the latest listings.
    ///
    /// Catalogue rows replace their snapshot. Deleted rows are laid over
    /// whatever was known before (including a catalogue row from this same
    /// refresh) and marked deleted. Ids not in either listing are kept.
    pub async fn refresh(&self, planets: &[PlanetRecord], deleted: &[DeletedPlanetRow]) {
        let mut store = self.inner.lock().await;
        for row in planets {
            store.insert(row.id, PlanetSnapshot::from_record(row));
        }
        for row in deleted {
            let merged = match store.get(&row.id) {
                Some(prior) => prior.overlay_deleted(row),
                None => PlanetSnapshot::from_deleted(row),
            };
            store.insert(row.id, merged);
        }
        debug!(
            planets = planets.len(),
            deleted = deleted.len(),
            total = store.len(),
            "snapshot store refreshed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_test_utils::fixtures::{deleted_row, planet};

    #[tokio::test]
    async fn refresh_overwrites_catalogue_rows() {
        let store = SnapshotStore::new();
        store
            .refresh(&[planet(1, "Before", "2024-01-01T00:00:00Z")], &[])
            .await;
        store
            .refresh(&[planet(1, "After", "2024-01-01T00:00:00Z")], &[])
            .await;

        let snap = store.get(1).await.unwrap();
        assert_eq!(snap.get(TrackedField::Name), FieldValue::from("After"));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn deleted_rows_overlay_prior_snapshot() {
        let store = SnapshotStore::new();
        let mut live = planet(4, "Gliese 12 b", "2024-01-01T00:00:00Z");
        live.masse = Some(3.9);
        store.refresh(&[live], &[]).await;
        store
            .refresh(&[], &[deleted_row(4, "Gliese 12 b", "2024-04-01T00:00:00Z")])
            .await;

        let snap = store.get(4).await.unwrap();
        assert_eq!(snap.get(TrackedField::Masse), FieldValue::Float(3.9));
        assert_eq!(snap.get(TrackedField::IsDeleted), FieldValue::Bool(true));
        assert_eq!(
            snap.get(TrackedField::DiscMethod),
            FieldValue::from("Radial Velocity")
        );
        assert_eq!(
            snap.get(TrackedField::CreatedAt),
            FieldValue::from("2024-01-01T00:00:00Z")
        );
    }

    #[tokio::test]
    async fn deleted_row_without_prior_starts_fresh() {
        let store = SnapshotStore::new();
        store
            .refresh(&[], &[deleted_row(9, "Gone", "2024-04-01T00:00:00Z")])
            .await;
        let snap = store.get(9).await.unwrap();
        assert_eq!(snap.get(TrackedField::IsDeleted), FieldValue::Bool(true));
        assert!(snap.get(TrackedField::CreatedAt).is_null());
    }

    #[tokio::test]
    async fn unseen_ids_are_kept() {
        let store = SnapshotStore::new();
        store
            .refresh(&[planet(1, "a", "2024-01-01T00:00:00Z")], &[])
            .await;
        store
            .refresh(&[planet(2, "b", "2024-01-02T00:00:00Z")], &[])
            .await;
        assert_eq!(store.len().await, 2);
        store.clear().await;
        assert!(store.is_empty().await);
    }
}
