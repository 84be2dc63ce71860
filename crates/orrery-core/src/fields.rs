// SPDX-FileCopyrightText: 2026 Orrery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Planet field metadata: the tracked field set and human-readable labels.

use strum::{Display, EnumString, IntoStaticStr};

/// Fields whose values are remembered between refreshes and diffed.
///
/// The set is closed; [`TrackedField::ALL`] lists it in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum TrackedField {
    Name,
    DiscMethod,
    DiscYear,
    Orbperd,
    Rade,
    Masse,
    StTeff,
    StRad,
    StMass,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
    IsDeleted,
}

impl TrackedField {
    pub const ALL: [TrackedField; 13] = [
        Self::Name,
        Self::DiscMethod,
        Self::DiscYear,
        Self::Orbperd,
        Self::Rade,
        Self::Masse,
        Self::StTeff,
        Self::StRad,
        Self::StMass,
        Self::CreatedAt,
        Self::UpdatedAt,
        Self::DeletedAt,
        Self::IsDeleted,
    ];

    /// Wire name of the field, as used by the API.
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    pub fn label(self) -> String {
        field_label(self.as_str())
    }
}

/// Attributes carried on every activity entry as a point-in-time snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum SnapshotAttribute {
    DiscYear,
    Orbperd,
    Rade,
    Masse,
    StTeff,
    StRad,
    StMass,
}

impl SnapshotAttribute {
    pub const ALL: [SnapshotAttribute; 7] = [
        Self::DiscYear,
        Self::Orbperd,
        Self::Rade,
        Self::Masse,
        Self::StTeff,
        Self::StRad,
        Self::StMass,
    ];

    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// The tracked field holding this attribute.
    pub fn tracked(self) -> TrackedField {
        match self {
            Self::DiscYear => TrackedField::DiscYear,
            Self::Orbperd => TrackedField::Orbperd,
            Self::Rade => TrackedField::Rade,
            Self::Masse => TrackedField::Masse,
            Self::StTeff => TrackedField::StTeff,
            Self::StRad => TrackedField::StRad,
            Self::StMass => TrackedField::StMass,
        }
    }
}

/// Label for a planet field key. Unknown keys are prettified.
pub fn field_label(key: &str) -> String {
    let known = match key {
        "name" => "Name",
        "disc_method" => "Discovery Method",
        "disc_year" => "Discovery Year",
        "orbperd" => "Orbital Period (P_orb)",
        "rade" => "Radius (R_earth)",
        "masse" => "Mass (M_earth)",
        "st_teff" => "Star Effective Temperature (T_eff)",
        "st_rad" => "Star Radius (R_star)",
        "st_mass" => "Star Mass (M_star)",
        "is_deleted" => "Deleted",
        _ => return prettify_field(key),
    };
    known.to_string()
}

/// `created_at` -> `Created At`.
pub fn prettify_field(key: &str) -> String {
    key.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
