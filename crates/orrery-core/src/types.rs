// SPDX-FileCopyrightText: 2026 Orrery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the exoplanet catalogue API.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::fields::{SnapshotAttribute, TrackedField};
use crate::value::FieldValue;

// --- System ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootOut {
    pub message: String,
}

/// Liveness probe answer. `status` is `ok` or `fail`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthOut {
    pub status: String,
    #[serde(default)]
    pub uptime: Option<f64>,
}

/// Readiness probe answer. `status` is `ready` or `not_ready`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessOut {
    pub status: String,
    #[serde(default)]
    pub db: Option<String>,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

// --- Planets ---

/// A single field-level change reported by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChange {
    pub field: String,
    #[serde(default)]
    pub before: FieldValue,
    #[serde(default)]
    pub after: FieldValue,
}

impl FieldChange {
    pub fn new(
        field: impl Into<String>,
        before: impl Into<FieldValue>,
        after: impl Into<FieldValue>,
    ) -> Self {
        Self {
            field: field.into(),
            before: before.into(),
            after: after.into(),
        }
    }
}

/// A catalogue row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanetRecord {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub disc_method: Option<String>,
    #[serde(default)]
    pub disc_year: Option<i32>,
    /// Orbital period in days.
    #[serde(default)]
    pub orbperd: Option<f64>,
    /// Radius in Earth radii.
    #[serde(default)]
    pub rade: Option<f64>,
    /// Mass in Earth masses.
    #[serde(default)]
    pub masse: Option<f64>,
    /// Stellar effective temperature in K.
    #[serde(default)]
    pub st_teff: Option<f64>,
    /// Stellar radius in solar radii.
    #[serde(default)]
    pub st_rad: Option<f64>,
    /// Stellar mass in solar masses.
    #[serde(default)]
    pub st_mass: Option<f64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default)]
    pub deleted_at: Option<String>,
    /// Present on create/patch responses.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub changes: Vec<FieldChange>,
}

impl PlanetRecord {
    pub fn field(&self, field: TrackedField) -> FieldValue {
        match field {
            TrackedField::Name => self.name.clone().into(),
            TrackedField::DiscMethod => self.disc_method.clone().into(),
            TrackedField::DiscYear => self.disc_year.into(),
            TrackedField::Orbperd => self.orbperd.into(),
            TrackedField::Rade => self.rade.into(),
            TrackedField::Masse => self.masse.into(),
            TrackedField::StTeff => self.st_teff.into(),
            TrackedField::StRad => self.st_rad.into(),
            TrackedField::StMass => self.st_mass.into(),
            TrackedField::CreatedAt => self.created_at.clone().into(),
            TrackedField::UpdatedAt => self.updated_at.clone().into(),
            TrackedField::DeletedAt => self.deleted_at.clone().into(),
            TrackedField::IsDeleted => self.is_deleted.into(),
        }
    }

    pub fn attribute(&self, attr: SnapshotAttribute) -> FieldValue {
        self.field(attr.tracked())
    }
}

/// A row from the admin soft-deleted listing.
///
/// The listing only guarantees identity fields; numeric attributes are kept
/// when the API includes them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeletedPlanetRow {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub disc_method: Option<String>,
    #[serde(default)]
    pub disc_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orbperd: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rade: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub masse: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub st_teff: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub st_rad: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub st_mass: Option<f64>,
    #[serde(default)]
    pub deleted_at: Option<String>,
}

impl DeletedPlanetRow {
    /// Value of a tracked field. Fields the listing never carries are null,
    /// except the deletion flag, which is always set.
    pub fn field(&self, field: TrackedField) -> FieldValue {
        match field {
            TrackedField::Name => self.name.clone().into(),
            TrackedField::DiscMethod => self.disc_method.clone().into(),
            TrackedField::DiscYear => self.disc_year.into(),
            TrackedField::Orbperd => self.orbperd.into(),
            TrackedField::Rade => self.rade.into(),
            TrackedField::Masse => self.masse.into(),
            TrackedField::StTeff => self.st_teff.into(),
            TrackedField::StRad => self.st_rad.into(),
            TrackedField::StMass => self.st_mass.into(),
            TrackedField::DeletedAt => self.deleted_at.clone().into(),
            TrackedField::IsDeleted => FieldValue::Bool(true),
            TrackedField::CreatedAt | TrackedField::UpdatedAt => FieldValue::Null,
        }
    }

    pub fn attribute(&self, attr: SnapshotAttribute) -> FieldValue {
        self.field(attr.tracked())
    }
}

/// Paginated answer of `GET /planets/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanetListResponse {
    #[serde(default)]
    pub items: Vec<PlanetRecord>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

/// `POST /planets/` payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanetCreate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disc_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disc_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orbperd: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rade: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub masse: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub st_teff: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub st_rad: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub st_mass: Option<f64>,
}

/// `PATCH /planets/{id}` payload. Only set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanetUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disc_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disc_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orbperd: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rade: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub masse: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub st_teff: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub st_rad: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub st_mass: Option<f64>,
}

impl PlanetUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Answer of `POST /planets/{id}/restore`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestoreOut {
    pub ok: bool,
    pub message: String,
}

// --- Change log ---

/// Mutation kind recorded in the change log.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChangeAction {
    Create,
    Update,
    Delete,
    /// Any tag this client does not know about.
    #[serde(other)]
    Other,
}

/// One append-only change-log row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeLogEntry {
    #[serde(default)]
    pub id: i64,
    pub planet_id: i64,
    pub action: ChangeAction,
    #[serde(default)]
    pub planet_name: Option<String>,
    #[serde(default)]
    pub changes: Vec<FieldChange>,
    pub created_at: String,
}

impl ChangeLogEntry {
    pub fn change_for(&self, field: &str) -> Option<&FieldChange> {
        self.changes.iter().find(|c| c.field == field)
    }
}

// --- Aggregates ---

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanetCount {
    pub count: u64,
}

/// Planets per discovery method. A null method is an unknown method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCount {
    #[serde(default)]
    pub disc_method: Option<String>,
    pub count: u64,
}

/// min/max/avg (and median where the endpoint computes it).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatBlock {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub avg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub median: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanetStats {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub orbperd: Option<StatBlock>,
    #[serde(default)]
    pub rade: Option<StatBlock>,
    #[serde(default)]
    pub masse: Option<StatBlock>,
    #[serde(default)]
    pub st_teff: Option<StatBlock>,
    #[serde(default)]
    pub st_rad: Option<StatBlock>,
    #[serde(default)]
    pub st_mass: Option<StatBlock>,
}

impl PlanetStats {
    /// Stat blocks in display order, labelled with their wire names.
    pub fn blocks(&self) -> [(&'static str, Option<StatBlock>); 6] {
        [
            ("orbperd", self.orbperd),
            ("rade", self.rade),
            ("masse", self.masse),
            ("st_teff", self.st_teff),
            ("st_rad", self.st_rad),
            ("st_mass", self.st_mass),
        ]
    }
}

/// Statistics scoped to one discovery method.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanetMethodStats {
    pub disc_method: String,
    #[serde(flatten)]
    pub stats: PlanetStats,
}

/// Discoveries in one year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelinePoint {
    pub disc_year: i32,
    pub count: u64,
}

// --- Visualization ---

/// Chart kinds served by `/vis/discovery`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DiscoveryChart {
    Hist,
    Year,
    Method,
}

/// Dataset behind a discovery chart, tagged by `chart`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "chart", rename_all = "lowercase")]
pub enum DiscoveryDataset {
    Hist {
        bins: u32,
        counts: Vec<u64>,
        bin_edges: Vec<f64>,
        #[serde(default)]
        mean: Option<f64>,
        #[serde(default)]
        std: Option<f64>,
        #[serde(default)]
        lower: Option<f64>,
        #[serde(default)]
        upper: Option<f64>,
    },
    Year {
        series: Vec<TimelinePoint>,
    },
    Method {
        series: Vec<MethodCount>,
    },
}

impl DiscoveryDataset {
    pub fn chart(&self) -> DiscoveryChart {
        match self {
            Self::Hist { .. } => DiscoveryChart::Hist,
            Self::Year { .. } => DiscoveryChart::Year,
            Self::Method { .. } => DiscoveryChart::Method,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn planet_record_tolerates_missing_optionals() {
        let planet: PlanetRecord =
            serde_json::from_value(json!({"id": 1, "name": "K2-18 b"})).unwrap();
        assert_eq!(planet.id, 1);
        assert!(planet.disc_method.is_none());
        assert!(!planet.is_deleted);
        assert!(planet.changes.is_empty());
    }

    #[test]
    fn unknown_change_action_maps_to_other() {
        let entry: ChangeLogEntry = serde_json::from_value(json!({
            "id": 9,
            "planet_id": 3,
            "action": "restore",
            "changes": [],
            "created_at": "2024-01-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(entry.action, ChangeAction::Other);
    }

    #[test]
    fn change_entry_missing_before_is_null() {
        let change: FieldChange =
            serde_json::from_value(json!({"field": "name", "after": "Kepler-1b"})).unwrap();
        assert!(change.before.is_null());
        assert_eq!(change.after.as_str(), Some("Kepler-1b"));
    }

    #[test]
    fn deleted_row_marks_deletion_flag() {
        let row = DeletedPlanetRow {
            id: 7,
            name: "Gone".into(),
            ..Default::default()
        };
        assert_eq!(row.field(TrackedField::IsDeleted), FieldValue::Bool(true));
        assert!(row.field(TrackedField::CreatedAt).is_null());
    }

    #[test]
    fn discovery_dataset_is_tagged_by_chart() {
        let ds: DiscoveryDataset = serde_json::from_value(json!({
            "chart": "year",
            "series": [{"disc_year": 1995, "count": 1}]
        }))
        .unwrap();
        assert_eq!(ds.chart(), DiscoveryChart::Year);

        let ds: DiscoveryDataset = serde_json::from_value(json!({
            "chart": "hist",
            "bins": 2,
            "counts": [3, 4],
            "bin_edges": [0.0, 1.0, 2.0],
            "mean": null,
            "std": null,
            "lower": null,
            "upper": null
        }))
        .unwrap();
        assert_eq!(ds.chart(), DiscoveryChart::Hist);
    }

    #[test]
    fn patch_payload_only_sends_set_fields() {
        let update = PlanetUpdate {
            disc_method: Some("Transit".into()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"disc_method": "Transit"})
        );
        assert!(PlanetUpdate::default().is_empty());
    }

    #[test]
    fn method_stats_flatten_blocks() {
        let stats: PlanetMethodStats = serde_json::from_value(json!({
            "disc_method": "Transit",
            "count": 10,
            "rade": {"min": 0.5, "max": 20.0, "avg": 3.1, "median": 2.2}
        }))
        .unwrap();
        assert_eq!(stats.stats.count, Some(10));
        assert_eq!(stats.stats.rade.and_then(|b| b.median), Some(2.2));
    }
}
