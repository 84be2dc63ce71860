// SPDX-FileCopyrightText: 2026 Orrery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for Orrery.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Orrery configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OrreryConfig {
    /// Catalogue API connection settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Recent-activity feed settings.
    #[serde(default)]
    pub activity: ActivityConfig,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// Catalogue API connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// Base URL of the catalogue API, without a trailing path.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Admin API key sent as `x-api-key`. `None` disables admin calls.
    #[serde(default)]
    pub admin_key: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            admin_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    /// The admin key, trimmed, if one is configured and non-blank.
    pub fn admin_key(&self) -> Option<&str> {
        self.admin_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

fn default_base_url() -> String {
    "https://exoplanet-api-lg16.onrender.com".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Recent-activity feed configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ActivityConfig {
    /// Number of entries shown when no limit is given.
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// Largest limit a caller may request ("all").
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,

    /// Rows requested upstream per displayed entry.
    #[serde(default = "default_overfetch_factor")]
    pub overfetch_factor: usize,

    /// Upper bound the API enforces on page sizes.
    #[serde(default = "default_max_fetch")]
    pub max_fetch: usize,

    /// Refresh interval for `orrery activity --watch`.
    #[serde(default = "default_watch_interval_secs")]
    pub watch_interval_secs: u64,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            overfetch_factor: default_overfetch_factor(),
            max_fetch: default_max_fetch(),
            watch_interval_secs: default_watch_interval_secs(),
        }
    }
}

fn default_limit() -> usize {
    6
}

fn default_max_limit() -> usize {
    200
}

fn default_overfetch_factor() -> usize {
    4
}

fn default_max_fetch() -> usize {
    200
}

fn default_watch_interval_secs() -> u64 {
    60
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
