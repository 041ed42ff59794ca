// SPDX-FileCopyrightText: 2026 Reelbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Reelbot.
//!
//! Foundational trait definitions, error types, and common types shared by
//! the transport, catalog, storage, and conversation crates.

pub mod error;
pub mod traits;
pub mod types;

pub use error::ReelbotError;
pub use types::{ActorId, AdapterType, ChatId, HealthStatus, MessageId};

pub use traits::{CatalogLookup, ChatTransport, HistoryStore, PluginAdapter, StorageAdapter};
