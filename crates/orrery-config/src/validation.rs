// SPDX-FileCopyrightText: 2026 Orrery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as URL schemes, positive limits, and known log levels.

use crate::diagnostic::ConfigError;
use crate::model::OrreryConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &OrreryConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let base_url = config.api.base_url.trim();
    if base_url.is_empty() {
        errors.push(ConfigError::validation("api.base_url", "must not be empty"));
    } else if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        errors.push(ConfigError::validation(
            "api.base_url",
            format!("`{base_url}` must start with http:// or https://"),
        ));
    }

    if config.api.timeout_secs == 0 {
        errors.push(ConfigError::validation("api.timeout_secs", "must be at least 1"));
    }

    let activity = &config.activity;
    for (key, value) in [
        ("activity.default_limit", activity.default_limit),
        ("activity.max_limit", activity.max_limit),
        ("activity.overfetch_factor", activity.overfetch_factor),
        ("activity.max_fetch", activity.max_fetch),
    ] {
        if value == 0 {
            errors.push(ConfigError::validation(key, "must be at least 1"));
        }
    }

    if activity.default_limit > activity.max_limit {
        errors.push(ConfigError::validation(
            "activity.default_limit",
            format!(
                "{} exceeds activity.max_limit ({})",
                activity.default_limit, activity.max_limit
            ),
        ));
    }

    if activity.watch_interval_secs == 0 {
        errors.push(ConfigError::validation(
            "activity.watch_interval_secs",
            "must be at least 1",
        ));
    }

    let level = config.log.level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::validation(
            "log.level",
            format!(
                "`{}` is not one of {}",
                config.log.level,
                LOG_LEVELS.join(", ")
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
