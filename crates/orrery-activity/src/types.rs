// SPDX-FileCopyrightText: 2026 Orrery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Activity feed types.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use orrery_core::types::{ChangeAction, FieldChange};
use orrery_core::{FieldValue, SnapshotAttribute};

/// What happened to a planet.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ActivityType {
    Created,
    Updated,
    Deleted,
}

impl From<ChangeAction> for ActivityType {
    /// Unknown actions are reported as creations.
    fn from(action: ChangeAction) -> Self {
        match action {
            ChangeAction::Update => Self::Updated,
            ChangeAction::Delete => Self::Deleted,
            ChangeAction::Create | ChangeAction::Other => Self::Created,
        }
    }
}

/// Planet attributes as they stood at the time of an activity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotAttributes {
    pub disc_year: FieldValue,
    pub orbperd: FieldValue,
    pub rade: FieldValue,
    pub masse: FieldValue,
    pub st_teff: FieldValue,
    pub st_rad: FieldValue,
    pub st_mass: FieldValue,
}

impl SnapshotAttributes {
    /// Collects every attribute from `value_of`.
    pub fn collect(mut value_of: impl FnMut(SnapshotAttribute) -> FieldValue) -> Self {
        let mut attrs = Self::default();
        for attr in SnapshotAttribute::ALL {
            attrs.set(attr, value_of(attr));
        }
        attrs
    }

    pub fn get(&self, attr: SnapshotAttribute) -> &FieldValue {
        match attr {
            SnapshotAttribute::DiscYear => &self.disc_year,
            SnapshotAttribute::Orbperd => &self.orbperd,
            SnapshotAttribute::Rade => &self.rade,
            SnapshotAttribute::Masse => &self.masse,
            SnapshotAttribute::StTeff => &self.st_teff,
            SnapshotAttribute::StRad => &self.st_rad,
            SnapshotAttribute::StMass => &self.st_mass,
        }
    }

    pub fn set(&mut self, attr: SnapshotAttribute, value: FieldValue) {
        let slot = match attr {
            SnapshotAttribute::DiscYear => &mut self.disc_year,
            SnapshotAttribute::Orbperd => &mut self.orbperd,
            SnapshotAttribute::Rade => &mut self.rade,
            SnapshotAttribute::Masse => &mut self.masse,
            SnapshotAttribute::StTeff => &mut self.st_teff,
            SnapshotAttribute::StRad => &mut self.st_rad,
            SnapshotAttribute::StMass => &mut self.st_mass,
        };
        *slot = value;
    }
}

/// One row of the recent-activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// Planet id.
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    /// Event timestamp as reported by the API.
    pub at: String,
    pub method: Option<String>,
    pub attributes: SnapshotAttributes,
    #[serde(default)]
    pub changes: Vec<FieldChange>,
}

/// Which path produced a feed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ActivitySource {
    /// Converted from change-log rows.
    ChangeLog,
    /// Derived from list timestamps and snapshot diffs.
    Derived,
}

/// Result of one reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityFeed {
    pub entries: Vec<ActivityEntry>,
    pub source: ActivitySource,
}

impl ActivityFeed {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
