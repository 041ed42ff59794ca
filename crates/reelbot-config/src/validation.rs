// SPDX-FileCopyrightText: 2026 Reelbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::ReelbotConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate semantic constraints serde cannot express.
///
/// Collects every failure instead of stopping at the first.
pub fn validate_config(config: &ReelbotConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.bot.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "bot.log_level `{}` must be one of: {}",
                config.bot.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if let Some(name) = &config.bot.name
        && name.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "bot.name must not be blank when set".to_string(),
        });
    }

    let base_url = config.catalog.base_url.trim();
    if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
        errors.push(ConfigError::Validation {
            message: format!("catalog.base_url `{base_url}` must be an http(s) URL"),
        });
    }

    if config.catalog.request_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "catalog.request_timeout_secs must be greater than 0".to_string(),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(validate_config(&ReelbotConfig::default()).is_ok());
    }

    #[test]
    fn collects_all_errors() {
        let mut config = ReelbotConfig::default();
        config.bot.log_level = "loud".into();
        config.catalog.base_url = "ftp://catalog".into();
        config.catalog.request_timeout_secs = 0;
        config.storage.database_path = "  ".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn blank_bot_name_is_rejected() {
        let mut config = ReelbotConfig::default();
        config.bot.name = Some(" ".into());
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].to_string().contains("bot.name"));
    }
}
