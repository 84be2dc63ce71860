// SPDX-FileCopyrightText: 2026 Orrery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration loading with Figment.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::OrreryConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/orrery/orrery.toml";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "orrery.toml";

/// Compiled defaults, the base every load starts from.
fn defaults() -> Figment {
    Figment::from(Serialized::defaults(OrreryConfig::default()))
}

/// Load configuration from the standard locations.
///
/// Later layers win: compiled defaults, then `/etc/orrery/orrery.toml`, then
/// the user config dir, then `./orrery.toml`, then `ORRERY_*` variables.
pub fn load_config() -> Result<OrreryConfig, figment::Error> {
    build_figment().extract()
}

/// Defaults plus one inline TOML document. No files, no environment.
pub fn load_config_from_str(toml_content: &str) -> Result<OrreryConfig, figment::Error> {
    defaults().merge(Toml::string(toml_content)).extract()
}

/// Defaults, one explicit file, then `ORRERY_*` variables.
pub fn load_config_from_path(path: &Path) -> Result<OrreryConfig, figment::Error> {
    defaults()
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

fn build_figment() -> Figment {
    let user = user_config_path().unwrap_or_default();
    [Path::new(SYSTEM_CONFIG_PATH), user.as_path(), Path::new(LOCAL_CONFIG_FILE)]
        .into_iter()
        .fold(defaults(), |figment, file| figment.merge(Toml::file(file)))
        .merge(env_provider())
}

/// `~/.config/orrery/orrery.toml`, when the platform has a config dir.
pub fn user_config_path() -> Option<std::path::PathBuf> {
    dirs::config_dir().map(|d| d.join("orrery").join(LOCAL_CONFIG_FILE))
}

/// `ORRERY_*` variables. Only the section prefix becomes a dot, so
/// `ORRERY_API_ADMIN_KEY` lands on `api.admin_key` (splitting on every `_`
/// would give `api.admin.key`).
fn env_provider() -> Env {
    Env::prefixed("ORRERY_").map(|key| map_env_key(key.as_str()).into())
}

/// Map a lowercased, prefix-stripped env key to its dotted config path.
pub(crate) fn map_env_key(key: &str) -> String {
    for section in ["api", "activity", "log"] {
        if let Some(rest) = key.strip_prefix(section).and_then(|r| r.strip_prefix('_')) {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}
