// SPDX-FileCopyrightText: 2026 Reelbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `reelbot serve` command implementation.
//!
//! Wires the Telegram transport, the rate-limited catalog client and the
//! SQLite history store into a conversation router, then runs the bot loop
//! until a shutdown signal arrives.

use std::sync::Arc;

use reelbot_bot::shutdown::install_signal_handler;
use reelbot_bot::{BotLoop, ConversationRouter, HistoryLogger};
use reelbot_catalog::{HttpCatalog, RateLimitedLookup};
use reelbot_config::ReelbotConfig;
use reelbot_core::error::ReelbotError;
use reelbot_core::{ChatTransport, HealthStatus, PluginAdapter, StorageAdapter};
use reelbot_storage::SqliteStorage;
use reelbot_telegram::TelegramChannel;
use tracing::{error, info, warn};

/// Runs the `reelbot serve` command.
pub async fn run_serve(config: ReelbotConfig) -> Result<(), ReelbotError> {
    init_tracing(&config.bot.log_level);

    info!("starting reelbot serve");

    let storage = {
        let storage = SqliteStorage::new(config.storage.clone());
        storage.initialize().await?;
        Arc::new(storage)
    };

    let catalog = {
        let http = HttpCatalog::new(&config.catalog).map_err(|e| {
            error!(error = %e, "failed to initialize catalog client");
            eprintln!(
                "error: catalog credentials required. Set catalog.api_key and catalog.api_host, \
                 or the RAPID_KEY and RAPID_HOST environment variables"
            );
            e
        })?;
        let throttled = RateLimitedLookup::from_config(Arc::new(http), &config.catalog);
        info!(
            cooldown_ms = throttled.cooldown().as_millis() as u64,
            "catalog client initialized"
        );
        Arc::new(throttled)
    };

    let mut telegram = TelegramChannel::new(&config.telegram).map_err(|e| {
        error!(error = %e, "failed to initialize Telegram transport");
        eprintln!(
            "error: Telegram bot token required. Set telegram.bot_token or the TELEBOT_TOKEN \
             environment variable"
        );
        e
    })?;
    telegram.connect().await?;

    let bot_name = match &config.bot.name {
        Some(name) => name.clone(),
        None => match telegram.fetch_bot_name().await {
            Ok(name) => name,
            Err(e) => {
                warn!(error = %e, "could not fetch bot name, using default");
                "Reelbot".to_string()
            }
        },
    };
    info!(bot_name = %bot_name, "telegram transport connected");

    check_adapters(&[storage.as_ref(), catalog.as_ref(), &telegram]).await?;

    let transport: Arc<dyn ChatTransport> = Arc::new(telegram);
    let history = HistoryLogger::new(storage.clone());
    let router = ConversationRouter::new(transport.clone(), catalog, history, bot_name);

    let cancel = install_signal_handler();
    let mut bot = BotLoop::new(transport.clone(), storage, router);
    bot.run(cancel).await?;

    if let Err(e) = transport.shutdown().await {
        warn!(error = %e, "transport shutdown failed");
    }

    info!("reelbot stopped");
    Ok(())
}

/// Runs each adapter's health check once. Degraded adapters are logged,
/// unhealthy ones abort startup.
async fn check_adapters(adapters: &[&dyn PluginAdapter]) -> Result<(), ReelbotError> {
    for adapter in adapters {
        match adapter.health_check().await? {
            HealthStatus::Healthy => {
                info!(adapter = adapter.name(), kind = %adapter.adapter_type(), "adapter healthy");
            }
            HealthStatus::Degraded(reason) => {
                warn!(adapter = adapter.name(), reason = %reason, "adapter degraded");
            }
            HealthStatus::Unhealthy(reason) => {
                error!(adapter = adapter.name(), reason = %reason, "adapter unhealthy");
                return Err(ReelbotError::Internal(format!(
                    "adapter {} is unhealthy: {reason}",
                    adapter.name()
                )));
            }
        }
    }
    Ok(())
}

/// Initializes the tracing subscriber with the given log level.
///
/// `RUST_LOG` takes precedence when set.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("reelbot={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use reelbot_config::model::StorageConfig;
    use reelbot_core::AdapterType;

    struct Fixed(HealthStatus);

    #[async_trait]
    impl PluginAdapter for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn version(&self) -> semver::Version {
            semver::Version::new(0, 1, 0)
        }

        fn adapter_type(&self) -> AdapterType {
            AdapterType::Catalog
        }

        async fn health_check(&self) -> Result<HealthStatus, ReelbotError> {
            Ok(self.0.clone())
        }

        async fn shutdown(&self) -> Result<(), ReelbotError> {
            Ok(())
        }
    }

    fn storage_in(dir: &tempfile::TempDir) -> SqliteStorage {
        SqliteStorage::new(StorageConfig {
            database_path: dir.path().join("history.db").to_string_lossy().into_owned(),
            wal_mode: true,
        })
    }

    #[tokio::test]
    async fn initialized_storage_passes_startup_check() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(&dir);
        storage.initialize().await.unwrap();

        let degraded = Fixed(HealthStatus::Degraded("slow".into()));
        check_adapters(&[&storage, &degraded]).await.unwrap();
        storage.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn unopened_storage_fails_startup_check() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(&dir);
        assert!(check_adapters(&[&storage]).await.is_err());
    }

    #[tokio::test]
    async fn unhealthy_adapter_aborts_startup() {
        let down = Fixed(HealthStatus::Unhealthy("no route".into()));
        let err = check_adapters(&[&down]).await.unwrap_err();
        assert!(err.to_string().contains("no route"));
    }
}
