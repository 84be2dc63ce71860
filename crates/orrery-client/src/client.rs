// SPDX-FileCopyrightText: 2026 Orrery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the exoplanet catalogue API.
//!
//! Provides [`CatalogueClient`] which handles URL construction, the admin
//! `x-api-key` header, JSON decoding, and a single retry of read requests on
//! transient errors.

use std::time::Duration;

use orrery_config::model::ApiConfig;
use orrery_core::query::{DiscoveryQuery, PlanetQuery, TimelineQuery};
use orrery_core::types::{
    ChangeLogEntry, DeletedPlanetRow, DiscoveryDataset, HealthOut, MethodCount, PlanetCount,
    PlanetCreate, PlanetListResponse, PlanetMethodStats, PlanetRecord, PlanetStats, PlanetUpdate,
    ReadinessOut, RestoreOut, RootOut, TimelinePoint,
};
use orrery_core::OrreryError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Header carrying the admin API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// HTTP client for catalogue API communication.
#[derive(Debug, Clone)]
pub struct CatalogueClient {
    client: reqwest::Client,
    base_url: Url,
    admin_key: Option<String>,
    max_retries: u32,
    retry_delay: Duration,
}

impl CatalogueClient {
    /// Creates a client for the API rooted at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, OrreryError> {
        let base_url = Url::parse(base_url.trim())
            .map_err(|e| OrreryError::Config(format!("invalid API base URL `{base_url}`: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(OrreryError::Config(format!(
                "API base URL `{base_url}` cannot carry a path"
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| OrreryError::Http {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url,
            admin_key: None,
            max_retries: 1,
            retry_delay: Duration::from_millis(500),
        })
    }

    /// Creates a client from the `[api]` config section.
    pub fn from_config(config: &ApiConfig) -> Result<Self, OrreryError> {
        Ok(Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))?
            .with_admin_key(config.admin_key().map(str::to_string)))
    }

    /// Sets the admin key used by admin-only operations.
    pub fn with_admin_key(mut self, key: Option<String>) -> Self {
        self.admin_key = key.filter(|k| !k.trim().is_empty());
        self
    }

    /// Overrides retry behavior for transient read failures.
    pub fn with_retries(mut self, max_retries: u32, delay: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_delay = delay;
        self
    }

    pub fn admin_key(&self) -> Option<&str> {
        self.admin_key.as_deref()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // --- System ---

    pub async fn root(&self) -> Result<RootOut, OrreryError> {
        self.get_json(&["system", "root"], &[], None).await
    }

    pub async fn health(&self) -> Result<HealthOut, OrreryError> {
        self.get_json(&["system", "health"], &[], None).await
    }

    pub async fn readiness(&self) -> Result<ReadinessOut, OrreryError> {
        self.get_json(&["system", "readiness"], &[], None).await
    }

    // --- Planets ---

    /// `POST /planets/`. The answer includes the recorded field changes.
    pub async fn create_planet(&self, payload: &PlanetCreate) -> Result<PlanetRecord, OrreryError> {
        if payload.name.trim().is_empty() {
            return Err(OrreryError::InvalidArgument("planet name is required".into()));
        }
        let url = self.url(&["planets", ""], &[])?;
        let request = self.request(Method::POST, &url, None).json(payload);
        self.execute_json(request, &url).await
    }

    pub async fn list_planets(&self, query: &PlanetQuery) -> Result<PlanetListResponse, OrreryError> {
        self.get_json(&["planets", ""], &query.to_pairs(), None).await
    }

    /// `GET /planets/{id}`. Soft-deleted planets answer 404.
    pub async fn planet_by_id(&self, id: i64) -> Result<PlanetRecord, OrreryError> {
        let id = planet_id(id)?;
        self.get_json(&["planets", &id], &[], None).await
    }

    /// Case-insensitive lookup by name.
    pub async fn planet_by_name(&self, name: &str) -> Result<PlanetRecord, OrreryError> {
        if name.trim().is_empty() {
            return Err(OrreryError::InvalidArgument("planet name is required".into()));
        }
        self.get_json(&["planets", "by-name", name], &[], None).await
    }

    /// `PATCH /planets/{id}`. Sends the admin key when one is configured.
    pub async fn patch_planet(
        &self,
        id: i64,
        payload: &PlanetUpdate,
    ) -> Result<PlanetRecord, OrreryError> {
        let id = planet_id(id)?;
        if payload.is_empty() {
            return Err(OrreryError::InvalidArgument("nothing to update".into()));
        }
        let url = self.url(&["planets", &id], &[])?;
        let request = self
            .request(Method::PATCH, &url, self.admin_key())
            .json(payload);
        self.execute_json(request, &url).await
    }

    pub async fn soft_delete_planet(&self, id: i64) -> Result<(), OrreryError> {
        let key = self.require_key("soft delete")?;
        let id = planet_id(id)?;
        self.send_empty(Method::DELETE, &["planets", &id], &[], key).await
    }

    pub async fn restore_planet(&self, id: i64) -> Result<RestoreOut, OrreryError> {
        let key = self.require_key("restore")?;
        let id = planet_id(id)?;
        let url = self.url(&["planets", &id, "restore"], &[])?;
        let request = self.request(Method::POST, &url, Some(key));
        self.execute_json(request, &url).await
    }

    pub async fn planet_count(&self) -> Result<PlanetCount, OrreryError> {
        self.get_json(&["planets", "count"], &[], None).await
    }

    pub async fn method_counts(&self) -> Result<Vec<MethodCount>, OrreryError> {
        self.get_json(&["planets", "method-counts"], &[], None).await
    }

    pub async fn planet_stats(&self) -> Result<PlanetStats, OrreryError> {
        self.get_json(&["planets", "stats"], &[], None).await
    }

    pub async fn timeline(&self, query: &TimelineQuery) -> Result<Vec<TimelinePoint>, OrreryError> {
        self.get_json(&["planets", "timeline"], &query.to_pairs(), None)
            .await
    }

    /// Statistics (including medians) for one discovery method.
    pub async fn method_stats(&self, method: &str) -> Result<PlanetMethodStats, OrreryError> {
        self.get_json(&["planets", "method", method, "stats"], &[], None)
            .await
    }

    /// Distinct discovery methods, optionally narrowed by a search term.
    pub async fn discovery_methods(
        &self,
        include_deleted: Option<bool>,
        search: Option<&str>,
    ) -> Result<Vec<String>, OrreryError> {
        let mut pairs = Vec::new();
        if let Some(flag) = include_deleted {
            pairs.push(("include_deleted", flag.to_string()));
        }
        if let Some(term) = search.filter(|s| !s.is_empty()) {
            pairs.push(("search", term.to_string()));
        }
        self.get_json(&["planets", "methods"], &pairs, None).await
    }

    // --- Admin ---

    /// Soft-deleted planets, using the configured admin key.
    pub async fn list_deleted_planets(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<DeletedPlanetRow>, OrreryError> {
        let key = self.require_key("list deleted planets")?;
        self.list_deleted_with(limit, offset, key).await
    }

    async fn list_deleted_with(
        &self,
        limit: usize,
        offset: usize,
        key: &str,
    ) -> Result<Vec<DeletedPlanetRow>, OrreryError> {
        let pairs = [("limit", limit.to_string()), ("offset", offset.to_string())];
        self.get_json(&["planets", "admin", "deleted"], &pairs, Some(key))
            .await
    }

    /// Permanently removes one planet.
    pub async fn hard_delete_planet(&self, id: i64) -> Result<(), OrreryError> {
        let key = self.require_key("hard delete")?;
        let id = planet_id(id)?;
        let confirm = [("confirm", "true".to_string())];
        self.send_empty(
            Method::DELETE,
            &["planets", "admin", "hard-delete", &id],
            &confirm,
            key,
        )
        .await
    }

    /// Truncates the catalogue.
    pub async fn wipe_planets(&self) -> Result<(), OrreryError> {
        let key = self.require_key("wipe")?;
        let confirm = [("confirm", "true".to_string())];
        self.send_empty(
            Method::DELETE,
            &["planets", "admin", "delete-all"],
            &confirm,
            key,
        )
        .await
    }

    /// Change-log rows, newest first. Authenticated when an admin key is set.
    pub async fn change_logs(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<ChangeLogEntry>, OrreryError> {
        self.list_change_log_with(limit, offset, self.admin_key())
            .await
    }

    async fn list_change_log_with(
        &self,
        limit: usize,
        offset: usize,
        key: Option<&str>,
    ) -> Result<Vec<ChangeLogEntry>, OrreryError> {
        let mut pairs = vec![("limit", limit.to_string())];
        if offset > 0 {
            pairs.push(("offset", offset.to_string()));
        }
        self.get_json(&["planets", "change-logs"], &pairs, key).await
    }

    // --- Visualization ---

    pub async fn discovery_dataset(
        &self,
        query: &DiscoveryQuery,
    ) -> Result<DiscoveryDataset, OrreryError> {
        self.get_json(&["vis", "discovery"], &query.to_pairs(), None)
            .await
    }

    /// URL of the server-rendered chart image.
    pub fn discovery_chart_url(&self, query: &DiscoveryQuery) -> Result<Url, OrreryError> {
        self.url(&["vis", "discovery.png"], &query.to_pairs())
    }

    // --- Plumbing ---

    fn require_key(&self, operation: &'static str) -> Result<&str, OrreryError> {
        self.admin_key()
            .ok_or(OrreryError::MissingCredential { operation })
    }

    /// Base URL plus path-encoded `segments` plus non-empty query pairs.
    fn url(&self, segments: &[&str], query: &[(&str, String)]) -> Result<Url, OrreryError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| OrreryError::Config(format!("invalid API base URL `{}`", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        let pairs: Vec<_> = query.iter().filter(|(_, v)| !v.is_empty()).collect();
        if !pairs.is_empty() {
            let mut qp = url.query_pairs_mut();
            for (k, v) in pairs {
                qp.append_pair(k, v);
            }
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: &Url, key: Option<&str>) -> RequestBuilder {
        let request = self.client.request(method, url.clone());
        match key {
            Some(k) => request.header(API_KEY_HEADER, k),
            None => request,
        }
    }

    /// GET with one retry on transient errors.
    async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
        key: Option<&str>,
    ) -> Result<T, OrreryError> {
        let url = self.url(segments, query)?;
        let mut attempt = 0;
        loop {
            let request = self.request(Method::GET, &url, key);
            match self.execute_json(request, &url).await {
                Err(err) if is_transient(&err) && attempt < self.max_retries => {
                    attempt += 1;
                    warn!(url = %url, attempt, error = %err, "transient error, will retry");
                    tokio::time::sleep(self.retry_delay).await;
                }
                other => return other,
            }
        }
    }

    async fn execute_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &Url,
    ) -> Result<T, OrreryError> {
        let body = self.execute(request, url).await?;
        serde_json::from_str(&body).map_err(|e| OrreryError::Decode {
            message: format!("failed to parse response from {url}: {e}"),
            source: Some(Box::new(e)),
        })
    }

    async fn send_empty(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&str, String)],
        key: &str,
    ) -> Result<(), OrreryError> {
        let url = self.url(segments, query)?;
        let request = self.request(method, &url, Some(key));
        self.execute(request, &url).await.map(|_| ())
    }

    /// Sends the request and returns the body of a 2xx answer.
    async fn execute(&self, request: RequestBuilder, url: &Url) -> Result<String, OrreryError> {
        let response = request.send().await.map_err(|e| OrreryError::Http {
            message: format!("request to {url} failed: {e}"),
            source: Some(Box::new(e)),
        })?;

        let status = response.status();
        debug!(status = %status, url = %url, "catalogue response received");

        if status == StatusCode::NO_CONTENT {
            return Ok(String::from("null"));
        }

        let body = response.text().await.map_err(|e| OrreryError::Http {
            message: format!("failed to read response body from {url}: {e}"),
            source: Some(Box::new(e)),
        })?;

        if status.is_success() {
            Ok(body)
        } else {
            Err(OrreryError::Api {
                status: status.as_u16(),
                url: url.to_string(),
                body,
            })
        }
    }
}

#[async_trait::async_trait]
impl orrery_core::CatalogueSource for CatalogueClient {
    async fn list_change_log(
        &self,
        limit: usize,
        offset: usize,
        credential: Option<&str>,
    ) -> Result<Vec<ChangeLogEntry>, OrreryError> {
        self.list_change_log_with(limit, offset, credential).await
    }

    async fn list_planets(&self, query: &PlanetQuery) -> Result<PlanetListResponse, OrreryError> {
        CatalogueClient::list_planets(self, query).await
    }

    async fn list_deleted_planets(
        &self,
        limit: usize,
        offset: usize,
        credential: &str,
    ) -> Result<Vec<DeletedPlanetRow>, OrreryError> {
        self.list_deleted_with(limit, offset, credential).await
    }
}

/// Planet ids are positive integers.
fn planet_id(id: i64) -> Result<String, OrreryError> {
    if id <= 0 {
        return Err(OrreryError::InvalidArgument(format!(
            "planet id must be a positive integer, got {id}"
        )));
    }
    Ok(id.to_string())
}

/// Status codes worth one more try, plus connection-level failures.
fn is_transient(err: &OrreryError) -> bool {
    match err {
        OrreryError::Api { status, .. } => matches!(*status, 429 | 500 | 502 | 503 | 504),
        OrreryError::Http { .. } => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> CatalogueClient {
        CatalogueClient::new(base, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn url_joins_segments_and_query() {
        let c = client("http://localhost:8000");
        let url = c
            .url(&["planets", ""], &[("limit", "5".into()), ("name", String::new())])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/planets/?limit=5");
    }

    #[test]
    fn url_keeps_base_path_prefix() {
        let c = client("http://localhost:8000/api/");
        let url = c.url(&["planets", "count"], &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/planets/count");
    }

    #[test]
    fn url_encodes_path_segments() {
        let c = client("http://localhost:8000");
        let url = c.url(&["planets", "by-name", "TOI 700/d"], &[]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/planets/by-name/TOI%20700%2Fd"
        );
    }

    #[test]
    fn chart_url_carries_histogram_params() {
        let c = client("http://localhost:8000");
        let mut query = DiscoveryQuery::new(orrery_core::types::DiscoveryChart::Hist);
        query.bins = Some(30);
        let url = c.discovery_chart_url(&query).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/vis/discovery.png?chart=hist&bins=30"
        );
    }

    #[test]
    fn invalid_base_url_is_config_error() {
        let err = CatalogueClient::new("not a url", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, OrreryError::Config(_)));
    }

    #[test]
    fn blank_admin_key_is_dropped() {
        let c = client("http://localhost:8000").with_admin_key(Some("  ".into()));
        assert!(c.admin_key().is_none());
    }

    #[test]
    fn planet_ids_must_be_positive() {
        assert!(planet_id(0).is_err());
        assert!(planet_id(-3).is_err());
        assert_eq!(planet_id(42).unwrap(), "42");
    }

    #[test]
    fn transient_classification() {
        let api = |status| OrreryError::Api {
            status,
            url: String::new(),
            body: String::new(),
        };
        assert!(is_transient(&api(503)));
        assert!(is_transient(&api(429)));
        assert!(!is_transient(&api(404)));
        assert!(!is_transient(&OrreryError::MissingCredential { operation: "wipe" }));
    }
}
