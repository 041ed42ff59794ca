// SPDX-FileCopyrightText: 2026 Reelbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interaction history: writing exchanges and rendering them back.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use reelbot_core::types::HistoryRecord;
use reelbot_core::{ActorId, HistoryStore, ReelbotError};
use tracing::debug;

/// Most records a single history request may return.
pub const MAX_HISTORY_ENTRIES: u32 = 10;

/// Writes and reads exchanges through a [`HistoryStore`].
#[derive(Clone)]
pub struct HistoryLogger {
    store: Arc<dyn HistoryStore>,
}

impl HistoryLogger {
    pub fn new(store: Arc<dyn HistoryStore>) -> Self {
        Self { store }
    }

    /// Appends one exchange stamped with the current UTC time.
    pub async fn write(
        &self,
        actor_id: ActorId,
        request: &str,
        response: &str,
    ) -> Result<(), ReelbotError> {
        let record = HistoryRecord {
            actor_id,
            request_text: request.to_string(),
            response_text: response.to_string(),
            created_at: Utc::now(),
        };
        self.store.append(&record).await?;
        debug!(actor_id = %actor_id, "exchange logged");
        Ok(())
    }

    /// Up to `requested` most recent records, newest first. Negative counts
    /// read nothing and anything above [`MAX_HISTORY_ENTRIES`] is capped.
    pub async fn recent(
        &self,
        actor_id: ActorId,
        requested: i64,
    ) -> Result<Vec<HistoryRecord>, ReelbotError> {
        let limit = requested.clamp(0, i64::from(MAX_HISTORY_ENTRIES)) as u32;
        self.store.recent_for(actor_id, limit).await
    }
}

/// Renders one record with the history display template.
pub fn render_entry(record: &HistoryRecord) -> String {
    format!(
        "\nYour request:\n{}\n\nMy response:\n{}\n\nResponse send date and time:\n{}\n",
        record.request_text,
        record.response_text,
        format_timestamp(&record.created_at),
    )
}

pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
