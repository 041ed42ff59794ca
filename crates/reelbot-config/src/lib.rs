// SPDX-FileCopyrightText: 2026 Reelbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for Reelbot.
//!
//! TOML files in the usual hierarchy plus environment overrides, merged with
//! Figment, checked with `deny_unknown_fields` and post-load validation, and
//! reported as miette diagnostics.
//!
//! ```no_run
//! use reelbot_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("catalog: {}", config.catalog.base_url);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::ReelbotConfig;

/// Load configuration from the standard hierarchy and validate it.
pub fn load_and_validate() -> Result<ReelbotConfig, Vec<ConfigError>> {
    finish(loader::load_config())
}

/// Load configuration from one explicit file (plus environment) and validate it.
pub fn load_and_validate_path(path: &Path) -> Result<ReelbotConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_path(path))
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<ReelbotConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_str(toml_content))
}

fn finish(
    loaded: Result<ReelbotConfig, figment::Error>,
) -> Result<ReelbotConfig, Vec<ConfigError>> {
    let config = loaded.map_err(diagnostic::figment_to_config_errors)?;
    validation::validate_config(&config)?;
    Ok(config)
}
