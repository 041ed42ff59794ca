// SPDX-FileCopyrightText: 2026 Reelbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat transport trait for messaging platform integrations.

use async_trait::async_trait;

use crate::error::ReelbotError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{ChatId, InboundMessage, MessageId, OutboundMessage};

/// Adapter for a bidirectional chat platform.
///
/// The transport only moves messages; which handler consumes the next
/// message from an actor is decided by the conversation core.
#[async_trait]
pub trait ChatTransport: PluginAdapter {
    /// Starts receiving messages from the platform.
    async fn connect(&mut self) -> Result<(), ReelbotError>;

    /// Receives the next inbound text message.
    async fn receive(&self) -> Result<InboundMessage, ReelbotError>;

    /// Sends a text message.
    async fn send(&self, msg: OutboundMessage) -> Result<MessageId, ReelbotError>;

    /// Sends an image with a caption.
    async fn send_photo(
        &self,
        chat_id: ChatId,
        image: Vec<u8>,
        caption: &str,
    ) -> Result<MessageId, ReelbotError>;

    /// Presents a fixed choice menu under a prompt.
    async fn show_menu(
        &self,
        chat_id: ChatId,
        prompt: &str,
        labels: &[&str],
    ) -> Result<MessageId, ReelbotError> {
        self.send(OutboundMessage::text(chat_id, prompt).with_keyboard(labels.iter().copied()))
            .await
    }
}
