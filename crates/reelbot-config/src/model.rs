// SPDX-FileCopyrightText: 2026 Reelbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key is
//! reported at startup instead of silently ignored.

use serde::{Deserialize, Serialize};

/// Top-level Reelbot configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ReelbotConfig {
    /// Bot identity and logging.
    #[serde(default)]
    pub bot: BotConfig,

    /// Telegram transport settings.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Remote movie catalog settings.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// History database settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Bot identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BotConfig {
    /// Name shown in the welcome and help texts. `None` asks Telegram for
    /// the bot's registered name at startup.
    #[serde(default)]
    pub name: Option<String>,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: None,
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Telegram transport configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramConfig {
    /// Telegram Bot API token.
    #[serde(default)]
    pub bot_token: Option<String>,
}

/// Remote catalog (RapidAPI OTT details) configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    /// Base URL; endpoint names are appended as path segments.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Value for the `X-RapidAPI-Key` header.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Value for the `X-RapidAPI-Host` header.
    #[serde(default)]
    pub api_host: Option<String>,

    /// Minimum gap between the end of one lookup and the start of the next.
    #[serde(default = "default_cooldown_ms")]
    pub cooldown_ms: u64,

    /// Per-request HTTP timeout.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            api_host: None,
            cooldown_ms: default_cooldown_ms(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "https://ott-details.p.rapidapi.com".to_string()
}

fn default_cooldown_ms() -> u64 {
    1000
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// History database configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("reelbot").join("history.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("history.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}
