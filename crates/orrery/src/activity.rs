// SPDX-FileCopyrightText: 2026 Orrery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `orrery activity` command implementation.
//!
//! One-shot mode prints the feed once. Watch mode re-runs the reconciler on
//! an interval, sharing one snapshot store so derived feeds carry diffs,
//! until Ctrl-C.

use std::time::Duration;

use colored::Colorize;
use orrery_activity::ordering::parse_timestamp;
use orrery_activity::{ActivityEntry, ActivityFeed, ActivityReconciler, ActivitySource, ActivityType};
use orrery_core::fields::field_label;
use orrery_core::OrreryError;
use tracing::{info, warn};

use crate::output::Output;

pub async fn run_activity(
    reconciler: &ActivityReconciler,
    limit: usize,
    out: Output,
) -> Result<(), OrreryError> {
    let feed = reconciler.recent_activity(limit).await?;
    render_feed(&feed, out)
}

pub async fn watch_activity(
    reconciler: &ActivityReconciler,
    limit: usize,
    interval: Duration,
    out: Output,
) -> Result<(), OrreryError> {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    info!(interval_secs = interval.as_secs(), limit, "watching recent activity");
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match reconciler.recent_activity(limit).await {
                    Ok(feed) => render_feed(&feed, out)?,
                    Err(err) => warn!(error = %err, "activity refresh failed"),
                }
            }
            _ = &mut shutdown => {
                info!("activity watch stopped");
                return Ok(());
            }
        }
    }
}

fn render_feed(feed: &ActivityFeed, out: Output) -> Result<(), OrreryError> {
    if out.json {
        return out.print_json(feed);
    }

    let source = match feed.source {
        ActivitySource::ChangeLog => "change log",
        ActivitySource::Derived => "derived",
    };
    out.heading(&format!("Recent activity ({source})"));
    if feed.is_empty() {
        println!("    {}", out.dim("No recent activity."));
    }
    for entry in &feed.entries {
        for line in entry_lines(entry, out.color) {
            println!("{line}");
        }
    }
    println!();
    Ok(())
}

/// `2024-05-02 08:00` in UTC, or the raw value when it does not parse.
pub fn display_time(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn type_label(activity_type: ActivityType, color: bool) -> String {
    let label = format!("{:<7}", activity_type.to_string());
    if !color {
        return label;
    }
    match activity_type {
        ActivityType::Created => label.green().to_string(),
        ActivityType::Updated => label.yellow().to_string(),
        ActivityType::Deleted => label.red().to_string(),
    }
}

pub fn entry_lines(entry: &ActivityEntry, color: bool) -> Vec<String> {
    let mut lines = Vec::with_capacity(entry.changes.len() + 1);
    let method = entry
        .method
        .as_deref()
        .map(|m| format!("  {m}"))
        .unwrap_or_default();
    lines.push(format!(
        "    {}  {}  {} (#{}){}",
        display_time(&entry.at),
        type_label(entry.activity_type, color),
        entry.name,
        entry.id,
        method
    ));
    for change in &entry.changes {
        lines.push(format!(
            "        {}: {} → {}",
            field_label(&change.field),
            change.before,
            change.after
        ));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_activity::SnapshotAttributes;
    use orrery_core::types::FieldChange;
    use orrery_core::FieldValue;

    #[test]
    fn times_render_in_utc() {
        assert_eq!(display_time("2024-05-02T10:30:00+02:00"), "2024-05-02 08:30");
        assert_eq!(display_time("soon"), "soon");
    }

    #[test]
    fn entry_lines_list_changes() {
        let entry = ActivityEntry {
            id: 42,
            name: "K2-18 b".into(),
            activity_type: ActivityType::Updated,
            at: "2024-05-02T08:00:00Z".into(),
            method: Some("Transit".into()),
            attributes: SnapshotAttributes::default(),
            changes: vec![FieldChange::new("disc_method", "Radial Velocity", "Transit")],
        };
        let lines = entry_lines(&entry, false);
        assert_eq!(
            lines[0],
            "    2024-05-02 08:00  updated  K2-18 b (#42)  Transit"
        );
        assert_eq!(
            lines[1],
            "        Discovery Method: Radial Velocity → Transit"
        );
    }

    #[test]
    fn null_sides_render_as_dash() {
        let entry = ActivityEntry {
            id: 1,
            name: "x".into(),
            activity_type: ActivityType::Created,
            at: "2024-05-02T08:00:00Z".into(),
            method: None,
            attributes: SnapshotAttributes::default(),
            changes: vec![FieldChange::new("rade", FieldValue::Null, 1.5)],
        };
        let lines = entry_lines(&entry, false);
        assert_eq!(lines[1], "        Radius (R_earth): — → 1.5");
    }
}
