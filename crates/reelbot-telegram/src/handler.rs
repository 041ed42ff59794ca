// SPDX-FileCopyrightText: 2026 Reelbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversion between Telegram updates and transport-agnostic messages.

use reelbot_core::types::InboundMessage;
use reelbot_core::{ActorId, ChatId, MessageId};
use teloxide::types::{KeyboardButton, KeyboardMarkup, Message};

/// Converts a Telegram message into an [`InboundMessage`].
///
/// Returns `None` for anything the bot does not handle: non-text messages
/// (stickers, photos, locations) and messages without a sender, such as
/// channel posts.
pub fn to_inbound_message(msg: &Message) -> Option<InboundMessage> {
    let text = msg.text()?;
    let user = msg.from.as_ref()?;

    Some(InboundMessage {
        message_id: MessageId(msg.id.0),
        chat_id: ChatId(msg.chat.id.0),
        actor_id: ActorId(user.id.0 as i64),
        actor_name: Some(user.first_name.clone()).filter(|name| !name.is_empty()),
        text: text.to_string(),
        received_at: msg.date,
    })
}

/// Reply keyboard with one button per row, in the given order.
pub fn menu_keyboard<S: AsRef<str>>(labels: &[S]) -> KeyboardMarkup {
    let rows: Vec<Vec<KeyboardButton>> = labels
        .iter()
        .map(|label| vec![KeyboardButton::new(label.as_ref())])
        .collect();
    KeyboardMarkup::new(rows)
}
