// SPDX-FileCopyrightText: 2026 Orrery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The recent-activity reconciler.
//!
//! Activity is read from the change log when it has anything to say.
//! Otherwise it is derived from the created/updated/deleted timestamps of the
//! two planet listings, with field changes computed against the snapshot
//! store.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use orrery_config::model::{ActivityConfig, OrreryConfig};
use orrery_core::types::{ChangeLogEntry, DeletedPlanetRow, FieldChange, PlanetRecord};
use orrery_core::{CatalogueSource, FieldValue, OrreryError, PlanetQuery, SnapshotAttribute};

use crate::diff::{created_changes, deleted_changes, updated_changes};
use crate::lookup::PlanetLookup;
use crate::ordering::{finalize, same_instant};
use crate::snapshot::{PlanetSnapshot, SnapshotStore};
use crate::types::{ActivityEntry, ActivityFeed, ActivitySource, ActivityType, SnapshotAttributes};

/// Size bounds for one reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityLimits {
    /// Largest number of entries a caller may ask for.
    pub max_limit: usize,
    /// Rows fetched per requested entry.
    pub overfetch_factor: usize,
    /// Upper bound on rows fetched from each listing.
    pub max_fetch: usize,
}

impl Default for ActivityLimits {
    fn default() -> Self {
        Self {
            max_limit: 200,
            overfetch_factor: 4,
            max_fetch: 200,
        }
    }
}

impl From<&ActivityConfig> for ActivityLimits {
    fn from(config: &ActivityConfig) -> Self {
        Self {
            max_limit: config.max_limit,
            overfetch_factor: config.overfetch_factor,
            max_fetch: config.max_fetch,
        }
    }
}

impl ActivityLimits {
    pub fn clamp(&self, limit: usize) -> usize {
        limit.min(self.max_limit)
    }

    /// Rows requested from each listing for `limit` entries.
    pub fn fetch_size(&self, limit: usize) -> usize {
        limit
            .saturating_mul(self.overfetch_factor)
            .max(limit)
            .min(self.max_fetch)
    }
}

/// Why the change-log path did not produce the feed.
#[derive(Debug)]
pub enum FallbackReason {
    /// The change log converted to zero entries.
    Empty,
    /// One of the three fetches failed.
    Failed(OrreryError),
}

/// Result of the change-log path.
#[derive(Debug)]
pub enum PrimaryOutcome {
    Entries(Vec<ActivityEntry>),
    Fallback(FallbackReason),
}

/// Builds the recent-activity feed from a [`CatalogueSource`].
pub struct ActivityReconciler {
    source: Arc<dyn CatalogueSource>,
    snapshots: Arc<SnapshotStore>,
    admin_key: Option<String>,
    limits: ActivityLimits,
}

impl ActivityReconciler {
    /// A reconciler with its own empty snapshot store, default limits, and
    /// no admin key.
    pub fn new(source: Arc<dyn CatalogueSource>) -> Self {
        Self {
            source,
            snapshots: Arc::new(SnapshotStore::new()),
            admin_key: None,
            limits: ActivityLimits::default(),
        }
    }

    pub fn from_config(source: Arc<dyn CatalogueSource>, config: &OrreryConfig) -> Self {
        Self::new(source)
            .with_admin_key(config.api.admin_key().map(str::to_string))
            .with_limits(ActivityLimits::from(&config.activity))
    }

    pub fn with_admin_key(mut self, key: Option<String>) -> Self {
        self.admin_key = key.filter(|k| !k.trim().is_empty());
        self
    }

    /// Shares `store` with this reconciler.
    pub fn with_snapshot_store(mut self, store: Arc<SnapshotStore>) -> Self {
        self.snapshots = store;
        self
    }

    pub fn with_limits(mut self, limits: ActivityLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn snapshot_store(&self) -> &Arc<SnapshotStore> {
        &self.snapshots
    }

    pub fn limits(&self) -> ActivityLimits {
        self.limits
    }

    /// The `limit` most recent activities, newest first.
    ///
    /// Failures of the change-log path are logged and answered from the
    /// derived path; failures of the derived path are returned.
    pub async fn recent_activity(&self, limit: usize) -> Result<ActivityFeed, OrreryError> {
        if limit == 0 {
            return Err(OrreryError::InvalidArgument(
                "activity limit must be at least 1".into(),
            ));
        }
        let limit = self.limits.clamp(limit);
        let fetch = self.limits.fetch_size(limit);
        let prior = self.snapshots.capture().await;

        match self.primary(limit, fetch).await {
            PrimaryOutcome::Entries(entries) => {
                debug!(count = entries.len(), "activity read from change log");
                return Ok(ActivityFeed {
                    entries,
                    source: ActivitySource::ChangeLog,
                });
            }
            PrimaryOutcome::Fallback(FallbackReason::Empty) => {
                debug!("change log produced no activity, deriving from listings");
            }
            PrimaryOutcome::Fallback(FallbackReason::Failed(err)) => {
                warn!(error = %err, "failed to load change logs; falling back to derived activity");
            }
        }

        let entries = self.derive(limit, fetch, &prior).await?;
        debug!(count = entries.len(), "activity derived from listings");
        Ok(ActivityFeed {
            entries,
            source: ActivitySource::Derived,
        })
    }

    async fn primary(&self, limit: usize, fetch: usize) -> PrimaryOutcome {
        let fetched = tokio::try_join!(
            self.source
                .list_change_log(fetch, 0, self.admin_key.as_deref()),
            self.recent_planets(fetch),
            self.recent_deleted(fetch),
        );
        let (logs, planets, deleted) = match fetched {
            Ok(rows) => rows,
            Err(err) => return PrimaryOutcome::Fallback(FallbackReason::Failed(err)),
        };

        let lookup = PlanetLookup::build(&planets, &deleted);
        let entries: Vec<ActivityEntry> = logs
            .iter()
            .map(|log| convert_change_log(log, &lookup))
            .collect();
        let entries = finalize(entries, limit);
        if entries.is_empty() {
            PrimaryOutcome::Fallback(FallbackReason::Empty)
        } else {
            PrimaryOutcome::Entries(entries)
        }
    }

    async fn derive(
        &self,
        limit: usize,
        fetch: usize,
        prior: &HashMap<i64, PlanetSnapshot>,
    ) -> Result<Vec<ActivityEntry>, OrreryError> {
        let (planets, deleted) =
            tokio::try_join!(self.recent_planets(fetch), self.recent_deleted(fetch))?;

        let mut entries = Vec::with_capacity(planets.len() * 2 + deleted.len());
        for row in &planets {
            entries.extend(derive_from_planet(row, prior.get(&row.id)));
        }
        for row in &deleted {
            entries.extend(derive_from_deleted(row, prior.get(&row.id)));
        }

        self.snapshots.refresh(&planets, &deleted).await;
        Ok(finalize(entries, limit))
    }

    async fn recent_planets(&self, fetch: usize) -> Result<Vec<PlanetRecord>, OrreryError> {
        let page = self
            .source
            .list_planets(&PlanetQuery::recently_created(fetch))
            .await?;
        Ok(page.items)
    }

    /// Empty without a call when no admin key is configured.
    async fn recent_deleted(&self, fetch: usize) -> Result<Vec<DeletedPlanetRow>, OrreryError> {
        match self.admin_key.as_deref() {
            Some(key) => self.source.list_deleted_planets(fetch, 0, key).await,
            None => Ok(Vec::new()),
        }
    }
}

/// Preferred side of a change, else the other side. Null when neither is set.
fn change_side(change: Option<&FieldChange>, prefer_before: bool) -> FieldValue {
    let Some(change) = change else {
        return FieldValue::Null;
    };
    let (first, second) = if prefer_before {
        (&change.before, &change.after)
    } else {
        (&change.after, &change.before)
    };
    first.clone().or_else(|| second.clone())
}

fn text(value: FieldValue) -> Option<String> {
    match value {
        FieldValue::Null => None,
        FieldValue::Text(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// One change-log row as an activity entry, enriched from `lookup`.
pub fn convert_change_log(log: &ChangeLogEntry, lookup: &PlanetLookup) -> ActivityEntry {
    let activity_type = ActivityType::from(log.action);
    let info = lookup.get(log.planet_id);

    let name = text(change_side(log.change_for("name"), false))
        .or_else(|| info.and_then(|i| i.name.clone()))
        .or_else(|| log.planet_name.clone())
        .unwrap_or_else(|| format!("Planet #{}", log.planet_id));

    let method = text(change_side(log.change_for("disc_method"), false))
        .or_else(|| info.and_then(|i| i.method.clone()));

    let prefer_before = activity_type == ActivityType::Deleted;
    let attributes = SnapshotAttributes::collect(|attr: SnapshotAttribute| {
        let known = || {
            info.map(|i| i.attributes.get(attr).clone())
                .unwrap_or_default()
        };
        match log.change_for(attr.as_str()) {
            Some(change) => change_side(Some(change), prefer_before).or_else(known),
            None => known(),
        }
    });

    ActivityEntry {
        id: log.planet_id,
        name,
        activity_type,
        at: log.created_at.clone(),
        method,
        attributes,
        changes: log.changes.clone(),
    }
}

fn display_name(id: i64, name: &str) -> String {
    if name.is_empty() {
        format!("Planet #{id}")
    } else {
        name.to_string()
    }
}

/// Only an absent or zero-length timestamp counts as missing. Whitespace is
/// kept and sorts with the other unparseable values.
fn non_empty(ts: Option<&str>) -> Option<&str> {
    ts.filter(|t| !t.is_empty())
}

/// `created` and `updated` candidates for a catalogue row.
fn derive_from_planet(row: &PlanetRecord, prior: Option<&PlanetSnapshot>) -> Vec<ActivityEntry> {
    let current = PlanetSnapshot::from_record(row);
    let attributes = SnapshotAttributes::collect(|attr| row.attribute(attr));
    let entry = |activity_type, at: &str, changes| ActivityEntry {
        id: row.id,
        name: display_name(row.id, &row.name),
        activity_type,
        at: at.to_string(),
        method: row.disc_method.clone(),
        attributes: attributes.clone(),
        changes,
    };

    let mut out = Vec::new();
    let created_at = non_empty(row.created_at.as_deref());
    if let Some(at) = created_at {
        out.push(entry(ActivityType::Created, at, created_changes(&current)));
    }
    if let Some(at) = non_empty(row.updated_at.as_deref()) {
        if !created_at.is_some_and(|created| same_instant(created, at)) {
            out.push(entry(
                ActivityType::Updated,
                at,
                updated_changes(&current, prior),
            ));
        }
    }
    out
}

/// The `deleted` candidate for a soft-deleted row.
fn derive_from_deleted(
    row: &DeletedPlanetRow,
    prior: Option<&PlanetSnapshot>,
) -> Option<ActivityEntry> {
    let at = non_empty(row.deleted_at.as_deref())?;
    let current = PlanetSnapshot::from_deleted(row);
    let merged = match prior {
        Some(p) => p.overlay_deleted(row),
        None => current.clone(),
    };
    Some(ActivityEntry {
        id: row.id,
        name: display_name(row.id, &row.name),
        activity_type: ActivityType::Deleted,
        at: at.to_string(),
        method: row.disc_method.clone(),
        attributes: SnapshotAttributes::collect(|attr| merged.get(attr.tracked())),
        changes: deleted_changes(&current, prior),
    })
}
