// SPDX-FileCopyrightText: 2026 Reelbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram transport for Reelbot.
//!
//! Implements [`ChatTransport`] for the Telegram Bot API via teloxide:
//! long polling feeds an mpsc queue that the bot loop drains, and outbound
//! delivery covers HTML text, replies, reply keyboards and photos.

pub mod handler;

use async_trait::async_trait;
use reelbot_config::model::TelegramConfig;
use reelbot_core::error::ReelbotError;
use reelbot_core::traits::{ChatTransport, PluginAdapter};
use reelbot_core::types::{
    AdapterType, ChatId, HealthStatus, InboundMessage, MessageId, OutboundMessage, TextFormat,
};
use teloxide::prelude::*;
use teloxide::types::{InputFile, ParseMode, ReplyParameters};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Telegram transport implementing [`ChatTransport`].
pub struct TelegramChannel {
    bot: Bot,
    inbound_rx: tokio::sync::Mutex<mpsc::Receiver<InboundMessage>>,
    inbound_tx: mpsc::Sender<InboundMessage>,
    polling_handle: Option<tokio::task::JoinHandle<()>>,
}

impl TelegramChannel {
    /// Creates a new Telegram transport.
    ///
    /// Requires `config.bot_token` to be set.
    pub fn new(config: &TelegramConfig) -> Result<Self, ReelbotError> {
        let token = config.bot_token.as_deref().ok_or_else(|| {
            ReelbotError::Config("telegram.bot_token is required for Telegram transport".into())
        })?;

        if token.trim().is_empty() {
            return Err(ReelbotError::Config(
                "telegram.bot_token cannot be empty".into(),
            ));
        }

        let (inbound_tx, inbound_rx) = mpsc::channel(100);

        Ok(Self {
            bot: Bot::new(token),
            inbound_rx: tokio::sync::Mutex::new(inbound_rx),
            inbound_tx,
            polling_handle: None,
        })
    }

    /// The display name registered for the bot with BotFather.
    pub async fn fetch_bot_name(&self) -> Result<String, ReelbotError> {
        let name = self
            .bot
            .get_my_name()
            .await
            .map_err(|e| channel_err("failed to fetch bot name", e))?;
        Ok(name.name)
    }
}

fn channel_err<E>(context: &str, e: E) -> ReelbotError
where
    E: std::error::Error + Send + Sync + 'static,
{
    ReelbotError::Channel {
        message: format!("{context}: {e}"),
        source: Some(Box::new(e)),
    }
}

#[async_trait]
impl PluginAdapter for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Channel
    }

    async fn health_check(&self) -> Result<HealthStatus, ReelbotError> {
        match self.bot.get_me().await {
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(format!(
                "Telegram bot unreachable: {e}"
            ))),
        }
    }

    async fn shutdown(&self) -> Result<(), ReelbotError> {
        debug!("Telegram transport shutting down");
        if let Some(handle) = &self.polling_handle {
            handle.abort();
        }
        Ok(())
    }
}

#[async_trait]
impl ChatTransport for TelegramChannel {
    async fn connect(&mut self) -> Result<(), ReelbotError> {
        if self.polling_handle.is_some() {
            return Ok(());
        }

        let bot = self.bot.clone();
        let tx = self.inbound_tx.clone();

        info!("starting Telegram long polling");

        let handle = tokio::spawn(async move {
            let handler = Update::filter_message().endpoint(move |msg: Message| {
                let tx = tx.clone();
                async move {
                    match handler::to_inbound_message(&msg) {
                        Some(inbound) => {
                            if tx.send(inbound).await.is_err() {
                                warn!("inbound queue closed, dropping message");
                            }
                        }
                        None => {
                            debug!(msg_id = msg.id.0, "ignoring unsupported message");
                        }
                    }
                    respond(())
                }
            });

            Dispatcher::builder(bot, handler)
                .default_handler(|_| async {})
                .build()
                .dispatch()
                .await;
        });

        self.polling_handle = Some(handle);
        Ok(())
    }

    async fn receive(&self) -> Result<InboundMessage, ReelbotError> {
        let mut rx = self.inbound_rx.lock().await;
        rx.recv().await.ok_or_else(|| ReelbotError::Channel {
            message: "Telegram inbound queue closed".into(),
            source: None,
        })
    }

    async fn send(&self, msg: OutboundMessage) -> Result<MessageId, ReelbotError> {
        let mut request = self
            .bot
            .send_message(teloxide::types::ChatId(msg.chat_id.0), msg.text);

        if msg.format == TextFormat::Html {
            request = request.parse_mode(ParseMode::Html);
        }
        if let Some(reply_to) = msg.reply_to {
            request =
                request.reply_parameters(ReplyParameters::new(teloxide::types::MessageId(reply_to.0)));
        }
        if let Some(labels) = msg.keyboard {
            request = request.reply_markup(handler::menu_keyboard(&labels));
        }

        let sent = request
            .await
            .map_err(|e| channel_err("failed to send message", e))?;
        Ok(MessageId(sent.id.0))
    }

    async fn send_photo(
        &self,
        chat_id: ChatId,
        image: Vec<u8>,
        caption: &str,
    ) -> Result<MessageId, ReelbotError> {
        let sent = self
            .bot
            .send_photo(teloxide::types::ChatId(chat_id.0), InputFile::memory(image))
            .caption(caption)
            .await
            .map_err(|e| channel_err("failed to send photo", e))?;
        Ok(MessageId(sent.id.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(token: Option<&str>) -> TelegramConfig {
        TelegramConfig {
            bot_token: token.map(str::to_string),
        }
    }

    #[test]
    fn new_requires_bot_token() {
        assert!(matches!(
            TelegramChannel::new(&config(None)),
            Err(ReelbotError::Config(_))
        ));
    }

    #[test]
    fn new_rejects_blank_token() {
        assert!(TelegramChannel::new(&config(Some("   "))).is_err());
    }

    #[test]
    fn new_accepts_valid_token() {
        let channel =
            TelegramChannel::new(&config(Some("123456:ABC-DEF1234ghIkl-zyx57W2v1u123ew11")));
        assert!(channel.is_ok());
    }

    #[test]
    fn plugin_adapter_metadata() {
        let channel = TelegramChannel::new(&config(Some("test:token"))).unwrap();
        assert_eq!(channel.name(), "telegram");
        assert_eq!(channel.version(), semver::Version::new(0, 1, 0));
        assert_eq!(channel.adapter_type(), AdapterType::Channel);
    }

    #[tokio::test]
    async fn receive_yields_queued_messages() {
        let channel = TelegramChannel::new(&config(Some("test:token"))).unwrap();
        let inbound = InboundMessage {
            message_id: MessageId(1),
            chat_id: ChatId(10),
            actor_id: reelbot_core::ActorId(10),
            actor_name: None,
            text: "/start".into(),
            received_at: chrono::Utc::now(),
        };
        channel.inbound_tx.send(inbound.clone()).await.unwrap();
        assert_eq!(channel.receive().await.unwrap(), inbound);
    }
}
