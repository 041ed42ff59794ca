// SPDX-FileCopyrightText: 2026 Reelbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation core for Reelbot.
//!
//! The [`BotLoop`] drains the chat transport one message at a time and hands
//! each to the [`ConversationRouter`], which owns the per-actor sessions and
//! drives title disambiguation, advanced search and history replies.

pub mod command;
pub mod disambiguation;
pub mod history;
pub mod messages;
pub mod params;
pub mod router;
pub mod session;
pub mod shutdown;

use std::sync::Arc;

use reelbot_core::error::ReelbotError;
use reelbot_core::{ChatTransport, StorageAdapter};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

pub use history::HistoryLogger;
pub use params::{AdvancedSearchQuery, ParamError};
pub use router::ConversationRouter;
pub use session::Continuation;

/// Receives messages and routes them until cancelled or the transport closes.
///
/// Messages are handled strictly in arrival order, each to completion, so
/// no actor ever has two messages in flight.
pub struct BotLoop {
    transport: Arc<dyn ChatTransport>,
    storage: Arc<dyn StorageAdapter>,
    router: ConversationRouter,
}

impl BotLoop {
    pub fn new(
        transport: Arc<dyn ChatTransport>,
        storage: Arc<dyn StorageAdapter>,
        router: ConversationRouter,
    ) -> Self {
        Self {
            transport,
            storage,
            router,
        }
    }

    pub fn router(&self) -> &ConversationRouter {
        &self.router
    }

    /// Runs until `cancel` fires or the transport stops delivering, then
    /// flushes storage.
    pub async fn run(&mut self, cancel: CancellationToken) -> Result<(), ReelbotError> {
        info!("bot loop running");

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!("shutdown signal received, stopping bot loop");
                    break;
                }
                msg = self.transport.receive() => {
                    match msg {
                        Ok(inbound) => {
                            let actor_id = inbound.actor_id;
                            if let Err(e) = self.router.handle(inbound).await {
                                error!(actor_id = %actor_id, error = %e, "failed to handle message");
                            }
                        }
                        Err(e) => {
                            error!(error = %e, "transport receive failed, stopping bot loop");
                            break;
                        }
                    }
                }
            }
        }

        self.storage.close().await?;
        info!("bot loop stopped");
        Ok(())
    }
}
