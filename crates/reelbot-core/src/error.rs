// SPDX-FileCopyrightText: 2026 Reelbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types shared by every Reelbot crate.

use thiserror::Error;

/// The primary error type used across adapter traits and core operations.
#[derive(Debug, Error)]
pub enum ReelbotError {
    /// Configuration errors (missing credentials, invalid values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, migrations).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Chat transport errors (delivery failure, malformed identifiers).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Catalog lookup failed: network error, non-success status, or an
    /// undecodable body.
    #[error("lookup `{endpoint}` failed: {message}")]
    Lookup {
        endpoint: String,
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ReelbotError {
    /// Shorthand for a lookup failure without an underlying source error.
    pub fn lookup(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Lookup {
            endpoint: endpoint.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Returns `true` for catalog lookup failures.
    pub fn is_lookup(&self) -> bool {
        matches!(self, Self::Lookup { .. })
    }
}
