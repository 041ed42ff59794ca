// SPDX-FileCopyrightText: 2026 Reelbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Lookup order: `./reelbot.toml` > `~/.config/reelbot/reelbot.toml` >
//! `/etc/reelbot/reelbot.toml`, with `REELBOT_*` environment overrides on top.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::ReelbotConfig;

/// Name of the config file searched for in each directory.
pub const CONFIG_FILE_NAME: &str = "reelbot.toml";

/// Candidate config file locations, lowest precedence first.
pub fn config_search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("/etc/reelbot").join(CONFIG_FILE_NAME)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("reelbot").join(CONFIG_FILE_NAME));
    }
    paths.push(PathBuf::from(CONFIG_FILE_NAME));
    paths
}

/// Build the layered Figment without extracting it.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. TOML files from [`config_search_paths`]
/// 3. Legacy variables `TELEBOT_TOKEN`, `RAPID_KEY`, `RAPID_HOST`
/// 4. `REELBOT_*` environment variables
pub fn build_figment() -> Figment {
    let mut figment = Figment::new().merge(Serialized::defaults(ReelbotConfig::default()));
    for path in config_search_paths() {
        figment = figment.merge(Toml::file(path));
    }
    figment.merge(legacy_env_provider()).merge(env_provider())
}

/// Load configuration from the standard hierarchy with env var overrides.
pub fn load_config() -> Result<ReelbotConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no environment).
pub fn load_config_from_str(toml_content: &str) -> Result<ReelbotConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ReelbotConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from one explicit file with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ReelbotConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ReelbotConfig::default()))
        .merge(Toml::file(path))
        .merge(legacy_env_provider())
        .merge(env_provider())
        .extract()
}

/// Config sections addressable through `REELBOT_<SECTION>_<KEY>`.
const ENV_SECTIONS: &[&str] = &["bot", "telegram", "catalog", "storage"];

/// `REELBOT_<SECTION>_<KEY>` variables.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `REELBOT_TELEGRAM_BOT_TOKEN` must become `telegram.bot_token`.
fn env_provider() -> Env {
    Env::prefixed("REELBOT_").map(|key| env_key_to_path(key.as_str()).into())
}

/// Map a prefix-stripped variable name onto a dotted config path.
pub fn env_key_to_path(key: &str) -> String {
    let key = key.to_ascii_lowercase();
    for section in ENV_SECTIONS {
        if let Some(rest) = key.strip_prefix(section).and_then(|r| r.strip_prefix('_')) {
            return format!("{section}.{rest}");
        }
    }
    key
}

/// Variable names of the first deployment, kept working so an existing
/// `.env` file needs no edits.
fn legacy_env_provider() -> Env {
    Env::raw()
        .only(&["TELEBOT_TOKEN", "RAPID_KEY", "RAPID_HOST"])
        .map(|key| {
            let key = key.as_str().to_ascii_lowercase();
            let mapped = match key.as_str() {
                "telebot_token" => "telegram.bot_token".to_string(),
                "rapid_key" => "catalog.api_key".to_string(),
                "rapid_host" => "catalog.api_host".to_string(),
                _ => key,
            };
            mapped.into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_map_to_sections() {
        assert_eq!(env_key_to_path("TELEGRAM_BOT_TOKEN"), "telegram.bot_token");
        assert_eq!(env_key_to_path("bot_log_level"), "bot.log_level");
        assert_eq!(env_key_to_path("catalog_cooldown_ms"), "catalog.cooldown_ms");
        assert_eq!(env_key_to_path("storage_database_path"), "storage.database_path");
        assert_eq!(env_key_to_path("unknown"), "unknown");
    }

    #[test]
    fn search_paths_end_with_local_file() {
        let paths = config_search_paths();
        assert_eq!(paths.last(), Some(&PathBuf::from(CONFIG_FILE_NAME)));
        assert_eq!(paths[0], PathBuf::from("/etc/reelbot/reelbot.toml"));
    }
}
