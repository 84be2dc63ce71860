// SPDX-FileCopyrightText: 2026 Orrery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Timestamp ordering, deduplication, and truncation of activity entries.

use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::types::{ActivityEntry, ActivityType};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses an RFC 3339 timestamp, or a naive ISO 8601 date-time taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Newest first. Unparseable timestamps sort after every parseable one.
pub fn newest_first(a: &str, b: &str) -> Ordering {
    match (parse_timestamp(a), parse_timestamp(b)) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// The instant a timestamp names, or its raw text when it does not parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Moment {
    At(DateTime<Utc>),
    Raw(String),
}

impl Moment {
    fn of(raw: &str) -> Self {
        parse_timestamp(raw).map_or_else(|| Moment::Raw(raw.to_string()), Moment::At)
    }
}

/// True when both timestamps name the same instant (`Z` and `+00:00` agree).
pub fn same_instant(a: &str, b: &str) -> bool {
    Moment::of(a) == Moment::of(b)
}

/// Drops repeated `(id, instant, type)` triples (first one wins), sorts newest
/// first, and keeps at most `limit` entries.
pub fn finalize(entries: Vec<ActivityEntry>, limit: usize) -> Vec<ActivityEntry> {
    let mut seen: HashSet<(i64, Moment, ActivityType)> = HashSet::new();
    let mut kept: Vec<ActivityEntry> = entries
        .into_iter()
        .filter(|e| seen.insert((e.id, Moment::of(&e.at), e.activity_type)))
        .collect();
    kept.sort_by(|a, b| newest_first(&a.at, &b.at));
    kept.truncate(limit);
    kept
}
