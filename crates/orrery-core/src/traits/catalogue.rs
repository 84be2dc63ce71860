// SPDX-FileCopyrightText: 2026 Orrery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-side source of catalogue data for the activity reconciler.

use async_trait::async_trait;

use crate::error::OrreryError;
use crate::query::PlanetQuery;
use crate::types::{ChangeLogEntry, DeletedPlanetRow, PlanetListResponse};

/// The three list endpoints the activity feed is built from.
///
/// Implemented by the HTTP client and by test doubles. Credentials are passed
/// per call so one source can serve both anonymous and admin readers.
#[async_trait]
pub trait CatalogueSource: Send + Sync {
    /// Change-log rows, newest first. A missing credential is a legal call.
    async fn list_change_log(
        &self,
        limit: usize,
        offset: usize,
        credential: Option<&str>,
    ) -> Result<Vec<ChangeLogEntry>, OrreryError>;

    /// A page of catalogue rows.
    async fn list_planets(&self, query: &PlanetQuery) -> Result<PlanetListResponse, OrreryError>;

    /// Soft-deleted rows. Requires an admin credential.
    async fn list_deleted_planets(
        &self,
        limit: usize,
        offset: usize,
        credential: &str,
    ) -> Result<Vec<DeletedPlanetRow>, OrreryError>;
}
