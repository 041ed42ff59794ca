// SPDX-FileCopyrightText: 2026 Reelbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage traits for the interaction history.

use async_trait::async_trait;

use crate::error::ReelbotError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{ActorId, HistoryRecord};

/// Lifecycle of a storage backend.
#[async_trait]
pub trait StorageAdapter: PluginAdapter {
    /// Initializes the storage backend (migrations, connection, etc.).
    async fn initialize(&self) -> Result<(), ReelbotError>;

    /// Closes the storage backend, flushing pending writes.
    async fn close(&self) -> Result<(), ReelbotError>;
}

/// Append-only log of request/response exchanges.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Durably appends one record.
    async fn append(&self, record: &HistoryRecord) -> Result<(), ReelbotError>;

    /// Returns up to `limit` records for `actor_id`, newest first.
    async fn recent_for(
        &self,
        actor_id: ActorId,
        limit: u32,
    ) -> Result<Vec<HistoryRecord>, ReelbotError>;
}
