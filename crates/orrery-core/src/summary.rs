// SPDX-FileCopyrightText: 2026 Orrery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client-side browsing helpers over aggregate responses.

use strum::{Display, EnumString};

use crate::types::{MethodCount, TimelinePoint};

/// Label shown for planets without a discovery method.
pub const UNKNOWN_METHOD: &str = "Unknown";

/// Ordering of the method-count table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum MethodSort {
    /// Largest count first.
    #[default]
    Count,
    /// Alphabetical, case-insensitive.
    Name,
}

pub fn method_label(count: &MethodCount) -> &str {
    count.disc_method.as_deref().unwrap_or(UNKNOWN_METHOD)
}

/// Filter method counts by a case-insensitive substring and sort them.
///
/// A blank filter keeps every row.
pub fn browse_method_counts(
    counts: &[MethodCount],
    filter: &str,
    sort: MethodSort,
) -> Vec<MethodCount> {
    let term = filter.trim().to_lowercase();
    let mut rows: Vec<MethodCount> = counts
        .iter()
        .filter(|m| term.is_empty() || method_label(m).to_lowercase().contains(&term))
        .cloned()
        .collect();

    rows.sort_by(|a, b| match sort {
        MethodSort::Name => method_label(a)
            .to_lowercase()
            .cmp(&method_label(b).to_lowercase()),
        MethodSort::Count => b.count.cmp(&a.count),
    });
    rows
}

/// Earliest discovery year in a timeline.
pub fn first_observation_year(points: &[TimelinePoint]) -> Option<i32> {
    points.iter().map(|p| p.disc_year).min()
}
