// SPDX-FileCopyrightText: 2026 Reelbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the storage traits.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use reelbot_config::model::StorageConfig;
use reelbot_core::types::HistoryRecord;
use reelbot_core::{
    ActorId, AdapterType, HealthStatus, HistoryStore, PluginAdapter, ReelbotError,
    StorageAdapter,
};

use crate::database::{Database, map_tr_err};
use crate::queries;

/// SQLite-backed history store.
///
/// The database is opened on the first call to
/// [`StorageAdapter::initialize`]; every other operation fails until then.
pub struct SqliteStorage {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    /// The connection is not opened until [`StorageAdapter::initialize`].
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    fn db(&self) -> Result<&Database, ReelbotError> {
        self.db.get().ok_or_else(|| ReelbotError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }

    /// Number of exchanges stored for `actor_id`.
    pub async fn count_for(&self, actor_id: ActorId) -> Result<u64, ReelbotError> {
        queries::requests::count_requests(self.db()?, actor_id).await
    }
}

#[async_trait]
impl PluginAdapter for SqliteStorage {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, ReelbotError> {
        self.db()?
            .connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), ReelbotError> {
        if self.db.get().is_some() {
            self.close().await?;
        }
        Ok(())
    }
}

#[async_trait]
impl StorageAdapter for SqliteStorage {
    async fn initialize(&self) -> Result<(), ReelbotError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| ReelbotError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite storage initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), ReelbotError> {
        self.db()?.checkpoint().await?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}

#[async_trait]
impl HistoryStore for SqliteStorage {
    async fn append(&self, record: &HistoryRecord) -> Result<(), ReelbotError> {
        let id = queries::requests::insert_request(self.db()?, record).await?;
        debug!(id, actor_id = %record.actor_id, "history record appended");
        Ok(())
    }

    async fn recent_for(
        &self,
        actor_id: ActorId,
        limit: u32,
    ) -> Result<Vec<HistoryRecord>, ReelbotError> {
        queries::requests::recent_requests(self.db()?, actor_id, limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::tempdir;

    fn make_config(path: &std::path::Path) -> StorageConfig {
        StorageConfig {
            database_path: path.to_string_lossy().into_owned(),
            wal_mode: true,
        }
    }

    fn record(actor: i64, request: &str) -> HistoryRecord {
        HistoryRecord {
            actor_id: ActorId(actor),
            request_text: request.to_string(),
            response_text: format!("answer to {request}"),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn identity() {
        let storage = SqliteStorage::new(make_config(std::path::Path::new("unused.db")));
        assert_eq!(storage.name(), "sqlite");
        assert_eq!(storage.adapter_type(), AdapterType::Storage);
    }

    #[tokio::test]
    async fn operations_fail_before_initialize() {
        let dir = tempdir().unwrap();
        let storage = SqliteStorage::new(make_config(&dir.path().join("x.db")));

        assert!(storage.health_check().await.is_err());
        assert!(storage.append(&record(1, "a")).await.is_err());
        assert!(storage.recent_for(ActorId(1), 5).await.is_err());
        // Nothing to flush yet.
        storage.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn initialize_twice_returns_error() {
        let dir = tempdir().unwrap();
        let storage = SqliteStorage::new(make_config(&dir.path().join("twice.db")));
        storage.initialize().await.unwrap();
        assert!(storage.initialize().await.is_err());
    }

    #[tokio::test]
    async fn append_then_recent_through_trait() {
        let dir = tempdir().unwrap();
        let storage = SqliteStorage::new(make_config(&dir.path().join("history.db")));
        storage.initialize().await.unwrap();
        assert_eq!(storage.health_check().await.unwrap(), HealthStatus::Healthy);

        let store: &dyn HistoryStore = &storage;
        store.append(&record(7, "one")).await.unwrap();
        store.append(&record(7, "two")).await.unwrap();
        store.append(&record(8, "other")).await.unwrap();

        let recent = store.recent_for(ActorId(7), 10).await.unwrap();
        let requests: Vec<_> = recent.iter().map(|r| r.request_text.as_str()).collect();
        assert_eq!(requests, vec!["two", "one"]);
        assert_eq!(storage.count_for(ActorId(8)).await.unwrap(), 1);

        storage.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn records_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("durable.db");

        let storage = SqliteStorage::new(make_config(&path));
        storage.initialize().await.unwrap();
        storage.append(&record(1, "persisted")).await.unwrap();
        storage.close().await.unwrap();
        drop(storage);

        let reopened = SqliteStorage::new(make_config(&path));
        reopened.initialize().await.unwrap();
        let recent = reopened.recent_for(ActorId(1), 1).await.unwrap();
        assert_eq!(recent[0].request_text, "persisted");
    }
}
