// SPDX-FileCopyrightText: 2026 Reelbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `reelbot history` command implementation.

use std::sync::Arc;

use reelbot_bot::HistoryLogger;
use reelbot_bot::history::render_entry;
use reelbot_config::ReelbotConfig;
use reelbot_core::error::ReelbotError;
use reelbot_core::{ActorId, PluginAdapter, StorageAdapter};
use reelbot_storage::SqliteStorage;

/// Prints up to `count` of the actor's most recent exchanges, newest first,
/// in the same layout the bot uses in chat.
pub async fn run_history(
    config: ReelbotConfig,
    actor: i64,
    count: i64,
) -> Result<(), ReelbotError> {
    let storage = Arc::new(SqliteStorage::new(config.storage.clone()));
    storage.initialize().await?;

    let logger = HistoryLogger::new(storage.clone());
    let records = logger.recent(ActorId(actor), count).await?;

    if records.is_empty() {
        println!("no history for actor {actor}");
    }
    for record in &records {
        println!("{}", render_entry(record));
    }

    storage.shutdown().await
}
