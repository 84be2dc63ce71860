// SPDX-FileCopyrightText: 2026 Orrery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock catalogue source for deterministic reconciler tests.
//!
//! `MockCatalogue` implements `CatalogueSource` over in-memory rows, counts
//! every call, and can be told to fail any of the three endpoints.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use orrery_core::query::{SortBy, SortOrder};
use orrery_core::types::{ChangeLogEntry, DeletedPlanetRow, PlanetListResponse, PlanetRecord};
use orrery_core::{CatalogueSource, OrreryError, PlanetQuery};

/// Number of calls made to each endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub change_log: usize,
    pub planets: usize,
    pub deleted: usize,
}

#[derive(Debug, Default)]
struct State {
    change_log: Vec<ChangeLogEntry>,
    planets: Vec<PlanetRecord>,
    deleted: Vec<DeletedPlanetRow>,
    change_log_failure: Option<u16>,
    planets_failure: Option<u16>,
    deleted_failure: Option<u16>,
    calls: CallCounts,
    change_log_credentials: Vec<Option<String>>,
    deleted_credentials: Vec<String>,
}

/// An in-memory catalogue.
///
/// Clones share state, so a test can keep a handle while the reconciler
/// owns another.
#[derive(Debug, Clone, Default)]
pub struct MockCatalogue {
    state: Arc<Mutex<State>>,
}

impl MockCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_change_log(&self, rows: Vec<ChangeLogEntry>) {
        self.state.lock().await.change_log = rows;
    }

    pub async fn set_planets(&self, rows: Vec<PlanetRecord>) {
        self.state.lock().await.planets = rows;
    }

    pub async fn set_deleted(&self, rows: Vec<DeletedPlanetRow>) {
        self.state.lock().await.deleted = rows;
    }

    /// Make the change-log endpoint answer with `status` (`None` restores it).
    pub async fn fail_change_log(&self, status: Option<u16>) {
        self.state.lock().await.change_log_failure = status;
    }

    pub async fn fail_planets(&self, status: Option<u16>) {
        self.state.lock().await.planets_failure = status;
    }

    pub async fn fail_deleted(&self, status: Option<u16>) {
        self.state.lock().await.deleted_failure = status;
    }

    pub async fn calls(&self) -> CallCounts {
        self.state.lock().await.calls
    }

    /// Credentials passed to the change-log endpoint, in call order.
    pub async fn change_log_credentials(&self) -> Vec<Option<String>> {
        self.state.lock().await.change_log_credentials.clone()
    }

    pub async fn deleted_credentials(&self) -> Vec<String> {
        self.state.lock().await.deleted_credentials.clone()
    }
}

fn scripted_failure(status: u16, endpoint: &str) -> OrreryError {
    OrreryError::Api {
        status,
        url: format!("mock://{endpoint}"),
        body: format!("{{\"detail\":\"scripted failure {status}\"}}"),
    }
}

fn page<T: Clone>(rows: &[T], limit: usize, offset: usize) -> Vec<T> {
    rows.iter().skip(offset).take(limit).cloned().collect()
}

#[async_trait]
impl CatalogueSource for MockCatalogue {
    async fn list_change_log(
        &self,
        limit: usize,
        offset: usize,
        credential: Option<&str>,
    ) -> Result<Vec<ChangeLogEntry>, OrreryError> {
        let mut state = self.state.lock().await;
        state.calls.change_log += 1;
        state
            .change_log_credentials
            .push(credential.map(str::to_string));
        if let Some(status) = state.change_log_failure {
            return Err(scripted_failure(status, "planets/change-logs"));
        }
        Ok(page(&state.change_log, limit, offset))
    }

    async fn list_planets(&self, query: &PlanetQuery) -> Result<PlanetListResponse, OrreryError> {
        let mut state = self.state.lock().await;
        state.calls.planets += 1;
        if let Some(status) = state.planets_failure {
            return Err(scripted_failure(status, "planets/"));
        }

        let mut rows = state.planets.clone();
        if query.sort_by == Some(SortBy::CreatedAt) {
            rows.sort_by(|a, b| a.created_at.cmp(&b.created_at));
            if query.sort_order == Some(SortOrder::Desc) {
                rows.reverse();
            }
        }
        let limit = query.limit.unwrap_or(rows.len());
        let offset = query.offset.unwrap_or(0);
        Ok(PlanetListResponse {
            items: page(&rows, limit, offset),
            total: rows.len() as u64,
            limit: limit as u64,
            offset: offset as u64,
        })
    }

    async fn list_deleted_planets(
        &self,
        limit: usize,
        offset: usize,
        credential: &str,
    ) -> Result<Vec<DeletedPlanetRow>, OrreryError> {
        let mut state = self.state.lock().await;
        state.calls.deleted += 1;
        state.deleted_credentials.push(credential.to_string());
        if let Some(status) = state.deleted_failure {
            return Err(scripted_failure(status, "planets/admin/deleted"));
        }
        Ok(page(&state.deleted, limit, offset))
    }
}
