// SPDX-FileCopyrightText: 2026 Orrery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query parameter models for the list, timeline, and visualization endpoints.
//!
//! Each query renders to `(name, value)` pairs with unset parameters omitted.
//! Parameter names match the API exactly.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::types::DiscoveryChart;

/// Sortable columns of `GET /planets/`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SortBy {
    Id,
    Name,
    DiscYear,
    DiscMethod,
    Orbperd,
    Rade,
    Masse,
    StTeff,
    StRad,
    StMass,
    CreatedAt,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// An inclusive numeric range filter. Either bound may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Range<T> {
    pub min: Option<T>,
    pub max: Option<T>,
}

impl<T> Range<T> {
    pub fn new(min: Option<T>, max: Option<T>) -> Self {
        Self { min, max }
    }
}

/// Filters, sort, and pagination for `GET /planets/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanetQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    pub name: Option<String>,
    pub disc_method: Option<String>,
    pub year: Range<i32>,
    pub orbperd: Range<f64>,
    pub rade: Range<f64>,
    pub masse: Range<f64>,
    pub st_teff: Range<f64>,
    pub st_rad: Range<f64>,
    pub st_mass: Range<f64>,
    pub include_deleted: Option<bool>,
    pub sort_by: Option<SortBy>,
    pub sort_order: Option<SortOrder>,
}

impl PlanetQuery {
    /// Newest-first page, the shape the activity feed reads.
    pub fn recently_created(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            offset: Some(0),
            sort_by: Some(SortBy::CreatedAt),
            sort_order: Some(SortOrder::Desc),
            ..Default::default()
        }
    }

    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = QueryPairs::default();
        pairs.push("limit", self.limit);
        pairs.push("offset", self.offset);
        pairs.push_str("name", self.name.as_deref());
        pairs.push_str("disc_method", self.disc_method.as_deref());
        pairs.range("min_year", "max_year", &self.year);
        pairs.range("min_orbperd", "max_orbperd", &self.orbperd);
        pairs.range("min_rade", "max_rade", &self.rade);
        pairs.range("min_masse", "max_masse", &self.masse);
        pairs.range("min_st_teff", "max_st_teff", &self.st_teff);
        pairs.range("min_st_rad", "max_st_rad", &self.st_rad);
        pairs.range("min_st_mass", "max_st_mass", &self.st_mass);
        pairs.push("include_deleted", self.include_deleted);
        pairs.push("sort_by", self.sort_by);
        pairs.push("sort_order", self.sort_order);
        pairs.0
    }
}

/// Parameters for `GET /planets/timeline`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineQuery {
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub include_deleted: Option<bool>,
}

impl TimelineQuery {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = QueryPairs::default();
        pairs.push("start_year", self.start_year);
        pairs.push("end_year", self.end_year);
        pairs.push("include_deleted", self.include_deleted);
        pairs.0
    }
}

/// Parameters for `/vis/discovery` and `/vis/discovery.png`.
///
/// `bins` and `sigma` only apply to histograms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryQuery {
    pub chart: DiscoveryChart,
    pub bins: Option<u32>,
    pub sigma: Option<f64>,
}

impl DiscoveryQuery {
    pub fn new(chart: DiscoveryChart) -> Self {
        Self {
            chart,
            bins: None,
            sigma: None,
        }
    }

    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = QueryPairs::default();
        pairs.push("chart", Some(self.chart));
        if self.chart == DiscoveryChart::Hist {
            pairs.push("bins", self.bins);
            pairs.push("sigma", self.sigma);
        }
        pairs.0
    }
}

#[derive(Default)]
struct QueryPairs(Vec<(&'static str, String)>);

impl QueryPairs {
    fn push<T: ToString>(&mut self, name: &'static str, value: Option<T>) {
        if let Some(v) = value {
            self.push_str(name, Some(&v.to_string()));
        }
    }

    fn push_str(&mut self, name: &'static str, value: Option<&str>) {
        match value {
            Some(v) if !v.is_empty() => self.0.push((name, v.to_string())),
            _ => {}
        }
    }

    fn range<T: ToString + Copy>(&mut self, min: &'static str, max: &'static str, r: &Range<T>) {
        self.push(min, r.min);
        self.push(max, r.max);
    }
}
