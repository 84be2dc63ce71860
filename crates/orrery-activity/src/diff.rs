// SPDX-FileCopyrightText: 2026 Orrery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Field-level change derivation between snapshots.

use orrery_core::types::FieldChange;
use orrery_core::{FieldValue, TrackedField};

use crate::snapshot::PlanetSnapshot;

/// A new planet: every non-empty field, from null.
pub fn created_changes(current: &PlanetSnapshot) -> Vec<FieldChange> {
    TrackedField::ALL
        .iter()
        .filter_map(|&field| {
            let after = current.get(field);
            (!after.is_empty()).then(|| FieldChange::new(field.as_str(), FieldValue::Null, after))
        })
        .collect()
}

/// A removed planet: every field with a known value, to null.
///
/// The current row wins; the prior snapshot fills what the deleted listing
/// does not carry.
pub fn deleted_changes(current: &PlanetSnapshot, prior: Option<&PlanetSnapshot>) -> Vec<FieldChange> {
    TrackedField::ALL
        .iter()
        .filter_map(|&field| {
            let mut before = current.get(field);
            if before.is_empty() {
                if let Some(prior) = prior {
                    before = prior.get(field);
                }
            }
            (!before.is_empty()).then(|| FieldChange::new(field.as_str(), before, FieldValue::Null))
        })
        .collect()
}

/// An edited planet: every field whose value moved since `prior`.
///
/// Without a prior snapshot there is nothing to compare against.
pub fn updated_changes(current: &PlanetSnapshot, prior: Option<&PlanetSnapshot>) -> Vec<FieldChange> {
    let Some(prior) = prior else {
        return Vec::new();
    };
    TrackedField::ALL
        .iter()
        .filter_map(|&field| {
            let before = prior.get(field);
            let after = current.get(field);
            (!before.same_as(&after)).then(|| FieldChange::new(field.as_str(), before, after))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_test_utils::fixtures::{deleted_row, planet};

    fn fields(changes: &[FieldChange]) -> Vec<&str> {
        changes.iter().map(|c| c.field.as_str()).collect()
    }

    #[test]
    fn created_emits_only_non_empty_fields() {
        let mut row = planet(1, "Kepler-1b", "2024-01-01T00:00:00Z");
        row.disc_method = Some(String::new());
        let changes = created_changes(&PlanetSnapshot::from_record(&row));

        let name = changes.iter().find(|c| c.field == "name").unwrap();
        assert!(name.before.is_null());
        assert_eq!(name.after, FieldValue::from("Kepler-1b"));

        let emitted = fields(&changes);
        assert!(!emitted.contains(&"disc_method"));
        assert!(!emitted.contains(&"masse"));
        assert!(!emitted.contains(&"deleted_at"));
        assert!(emitted.contains(&"rade"));
    }

    #[test]
    fn deleted_falls_back_to_prior_values() {
        let mut live = planet(2, "HD 1 b", "2024-01-01T00:00:00Z");
        live.masse = Some(12.0);
        let prior = PlanetSnapshot::from_record(&live);
        let current = PlanetSnapshot::from_deleted(&deleted_row(2, "HD 1 b", "2024-02-01T00:00:00Z"));

        let changes = deleted_changes(&current, Some(&prior));
        let masse = changes.iter().find(|c| c.field == "masse").unwrap();
        assert_eq!(masse.before, FieldValue::Float(12.0));
        assert!(masse.after.is_null());
        let method = changes.iter().find(|c| c.field == "disc_method").unwrap();
        assert_eq!(method.before, FieldValue::from("Radial Velocity"));
        assert!(changes.iter().all(|c| c.after.is_null()));
    }

    #[test]
    fn updated_without_prior_is_empty() {
        let current = PlanetSnapshot::from_record(&planet(3, "x", "2024-01-01T00:00:00Z"));
        assert!(updated_changes(&current, None).is_empty());
    }

    #[test]
    fn updated_reports_moved_fields() {
        let before = planet(3, "x", "2024-01-01T00:00:00Z");
        let mut after = before.clone();
        after.rade = Some(1.9);
        after.updated_at = Some("2024-01-05T00:00:00Z".into());

        let changes = updated_changes(
            &PlanetSnapshot::from_record(&after),
            Some(&PlanetSnapshot::from_record(&before)),
        );
        assert_eq!(fields(&changes), vec!["rade", "updated_at"]);
        assert_eq!(changes[0].before, FieldValue::Float(1.2));
        assert_eq!(changes[0].after, FieldValue::Float(1.9));
    }

    #[test]
    fn nan_to_nan_is_not_a_change() {
        let mut before = planet(5, "y", "2024-01-01T00:00:00Z");
        before.st_mass = Some(f64::NAN);
        let after = before.clone();
        let changes = updated_changes(
            &PlanetSnapshot::from_record(&after),
            Some(&PlanetSnapshot::from_record(&before)),
        );
        assert!(changes.is_empty());
    }

    #[test]
    fn null_to_number_is_a_change() {
        let before = planet(6, "z", "2024-01-01T00:00:00Z");
        let mut after = before.clone();
        after.masse = Some(5.0);
        let changes = updated_changes(
            &PlanetSnapshot::from_record(&after),
            Some(&PlanetSnapshot::from_record(&before)),
        );
        assert_eq!(changes.len(), 1);
        assert!(changes[0].before.is_null());
        assert_eq!(changes[0].after, FieldValue::Float(5.0));
    }
}
