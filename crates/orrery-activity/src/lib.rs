// SPDX-FileCopyrightText: 2026 Orrery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Recent-activity reconciliation for the exoplanet catalogue.
//!
//! [`ActivityReconciler`] merges change-log rows, recently created planets,
//! and recently deleted planets into one deduplicated, newest-first feed of
//! [`ActivityEntry`] values. When the change log is unavailable or empty the
//! feed is derived from listing timestamps, with field changes computed
//! against a [`SnapshotStore`] that persists between calls.

pub mod diff;
pub mod lookup;
pub mod ordering;
pub mod reconciler;
pub mod snapshot;
pub mod types;

pub use lookup::{PlanetLookup, PlanetLookupEntry};
pub use reconciler::{ActivityLimits, ActivityReconciler, FallbackReason, PrimaryOutcome};
pub use snapshot::{PlanetSnapshot, SnapshotStore};
pub use types::{ActivityEntry, ActivityFeed, ActivitySource, ActivityType, SnapshotAttributes};
