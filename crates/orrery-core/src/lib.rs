// SPDX-FileCopyrightText: 2026 Orrery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Orrery, a client for the exoplanet catalogue API.
//!
//! This crate provides the catalogue wire types, the dynamic field values
//! used by change tracking, the error type, and the [`CatalogueSource`]
//! trait the activity reconciler reads through.

pub mod error;
pub mod fields;
pub mod query;
pub mod summary;
pub mod traits;
pub mod types;
pub mod value;

// Re-export key items at crate root for ergonomic imports.
pub use error::OrreryError;
pub use fields::{SnapshotAttribute, TrackedField};
pub use query::{DiscoveryQuery, PlanetQuery, SortBy, SortOrder, TimelineQuery};
pub use traits::CatalogueSource;
pub use types::{
    ChangeAction, ChangeLogEntry, DeletedPlanetRow, FieldChange, PlanetListResponse, PlanetRecord,
};
pub use value::FieldValue;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orrery_error_has_all_variants() {
        let _config = OrreryError::Config("test".into());
        let _http = OrreryError::Http {
            message: "test".into(),
            source: None,
        };
        let api = OrreryError::Api {
            status: 503,
            url: "http://localhost/planets/".into(),
            body: "down".into(),
        };
        let _decode = OrreryError::Decode {
            message: "test".into(),
            source: None,
        };
        let _cred = OrreryError::MissingCredential { operation: "wipe" };
        let _arg = OrreryError::InvalidArgument("test".into());
        let _internal = OrreryError::Internal("test".into());

        assert_eq!(api.status(), Some(503));
        assert_eq!(api.body(), Some("down"));
        assert!(!api.is_auth_failure());
    }

    #[test]
    fn api_error_message_carries_status_and_url() {
        let err = OrreryError::Api {
            status: 403,
            url: "http://localhost/planets/admin/deleted".into(),
            body: "{\"detail\":\"forbidden\"}".into(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("HTTP 403 @ http://localhost/planets/admin/deleted"));
        assert!(err.is_auth_failure());
    }

    #[test]
    fn change_action_display_round_trips() {
        use std::str::FromStr;

        for action in [ChangeAction::Create, ChangeAction::Update, ChangeAction::Delete] {
            let s = action.to_string();
            assert_eq!(ChangeAction::from_str(&s).unwrap(), action);
        }
    }

    #[test]
    fn catalogue_source_is_object_safe() {
        fn _assert_dyn(_: &dyn CatalogueSource) {}
    }
}
