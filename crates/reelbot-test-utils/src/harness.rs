// SPDX-FileCopyrightText: 2026 Reelbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end conversation testing.
//!
//! `TestHarness` assembles a conversation router over a mock transport, a
//! scripted catalog and a temp SQLite history store. `send()` drives one
//! message through the full routing pipeline.

use std::sync::Arc;

use chrono::Utc;
use reelbot_bot::{BotLoop, ConversationRouter, HistoryLogger};
use reelbot_config::model::StorageConfig;
use reelbot_core::types::{HistoryRecord, InboundMessage};
use reelbot_core::{ActorId, ChatId, HistoryStore, MessageId, ReelbotError, StorageAdapter};
use reelbot_storage::SqliteStorage;

use crate::mock_transport::MockTransport;
use crate::scripted_catalog::ScriptedCatalog;

/// Builds an inbound text message from `actor_id` in their private chat.
pub fn inbound(actor_id: ActorId, text: &str) -> InboundMessage {
    InboundMessage {
        message_id: MessageId(1),
        chat_id: ChatId(actor_id.0),
        actor_id,
        actor_name: Some("Ada".to_string()),
        text: text.to_string(),
        received_at: Utc::now(),
    }
}

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    catalog: ScriptedCatalog,
    bot_name: String,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            catalog: ScriptedCatalog::new(),
            bot_name: "TestBot".to_string(),
        }
    }

    /// Use a pre-scripted catalog.
    pub fn with_catalog(mut self, catalog: ScriptedCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_bot_name(mut self, name: &str) -> Self {
        self.bot_name = name.to_string();
        self
    }

    /// Build the test harness, creating all required subsystems.
    pub async fn build(self) -> Result<TestHarness, ReelbotError> {
        let temp_dir =
            tempfile::TempDir::new().map_err(|e| ReelbotError::Storage { source: e.into() })?;
        let db_path = temp_dir.path().join("test.db");

        let storage = Arc::new(SqliteStorage::new(StorageConfig {
            database_path: db_path.to_string_lossy().to_string(),
            wal_mode: true,
        }));
        storage.initialize().await?;

        let transport = Arc::new(MockTransport::new());
        let catalog = Arc::new(self.catalog);
        let history = HistoryLogger::new(storage.clone());
        let router = ConversationRouter::new(
            transport.clone(),
            catalog.clone(),
            history,
            self.bot_name,
        );

        Ok(TestHarness {
            transport,
            catalog,
            storage,
            router: Some(router),
            _temp_dir: temp_dir,
        })
    }
}

/// A complete conversation stack for integration tests.
pub struct TestHarness {
    pub transport: Arc<MockTransport>,
    pub catalog: Arc<ScriptedCatalog>,
    pub storage: Arc<SqliteStorage>,
    router: Option<ConversationRouter>,
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    pub fn router(&self) -> Option<&ConversationRouter> {
        self.router.as_ref()
    }

    /// Routes one message from `actor_id` to completion.
    pub async fn send(&mut self, actor_id: ActorId, text: &str) -> Result<(), ReelbotError> {
        let router = self
            .router
            .as_mut()
            .ok_or_else(|| ReelbotError::Internal("router moved into bot loop".into()))?;
        router.handle(inbound(actor_id, text)).await
    }

    /// Routes each message in order, stopping at the first error.
    pub async fn converse(&mut self, actor_id: ActorId, texts: &[&str]) -> Result<(), ReelbotError> {
        for text in texts {
            self.send(actor_id, text).await?;
        }
        Ok(())
    }

    /// Up to `limit` stored exchanges for `actor_id`, newest first.
    pub async fn history(
        &self,
        actor_id: ActorId,
        limit: u32,
    ) -> Result<Vec<HistoryRecord>, ReelbotError> {
        self.storage.recent_for(actor_id, limit).await
    }

    pub async fn history_count(&self, actor_id: ActorId) -> Result<u64, ReelbotError> {
        self.storage.count_for(actor_id).await
    }

    /// Moves the router into a [`BotLoop`] reading from the mock transport.
    /// `send()` fails afterwards.
    pub fn into_bot_loop(&mut self) -> Result<BotLoop, ReelbotError> {
        let router = self
            .router
            .take()
            .ok_or_else(|| ReelbotError::Internal("router already taken".into()))?;
        Ok(BotLoop::new(
            self.transport.clone(),
            self.storage.clone(),
            router,
        ))
    }
}
