// SPDX-FileCopyrightText: 2026 Reelbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock chat transport for deterministic testing.
//!
//! `MockTransport` implements `ChatTransport` with injectable inbound
//! messages and captured deliveries for assertion in tests.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};

use reelbot_core::ReelbotError;
use reelbot_core::traits::{ChatTransport, PluginAdapter};
use reelbot_core::types::{
    AdapterType, ChatId, HealthStatus, InboundMessage, MessageId, OutboundMessage, TextFormat,
};

/// Something the code under test delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Text(OutboundMessage),
    Photo {
        chat_id: ChatId,
        image: Vec<u8>,
        caption: String,
    },
}

impl Delivery {
    /// The message text, or the caption for photos.
    pub fn text(&self) -> &str {
        match self {
            Delivery::Text(msg) => &msg.text,
            Delivery::Photo { caption, .. } => caption,
        }
    }

    /// `true` for a text message carrying a menu keyboard.
    pub fn is_menu(&self) -> bool {
        matches!(self, Delivery::Text(msg) if msg.keyboard.is_some())
    }
}

/// A mock chat transport for testing.
///
/// - **inbound**: messages injected via `inject_message()` are returned by `receive()`
/// - **delivered**: everything passed to `send()` / `send_photo()`, in order
pub struct MockTransport {
    inbound: Arc<Mutex<VecDeque<InboundMessage>>>,
    delivered: Arc<Mutex<Vec<Delivery>>>,
    notify: Arc<Notify>,
    closed: AtomicBool,
    fail_photos: AtomicBool,
    reject_html: AtomicBool,
    next_id: AtomicI32,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            inbound: Arc::new(Mutex::new(VecDeque::new())),
            delivered: Arc::new(Mutex::new(Vec::new())),
            notify: Arc::new(Notify::new()),
            closed: AtomicBool::new(false),
            fail_photos: AtomicBool::new(false),
            reject_html: AtomicBool::new(false),
            next_id: AtomicI32::new(1),
        }
    }

    /// Inject an inbound message; the next `receive()` returns it.
    pub async fn inject_message(&self, msg: InboundMessage) {
        self.inbound.lock().await.push_back(msg);
        self.notify.notify_one();
    }

    /// Once the queue drains, `receive()` reports the transport as closed.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        self.notify.notify_one();
    }

    /// Make every `send_photo()` fail.
    pub fn fail_photos(&self, fail: bool) {
        self.fail_photos.store(fail, Ordering::SeqCst);
    }

    /// Make every HTML-formatted `send()` fail, as Telegram does for
    /// unbalanced markup.
    pub fn reject_html(&self, reject: bool) {
        self.reject_html.store(reject, Ordering::SeqCst);
    }

    pub async fn deliveries(&self) -> Vec<Delivery> {
        self.delivered.lock().await.clone()
    }

    /// Text of every delivery, menus included.
    pub async fn texts(&self) -> Vec<String> {
        self.delivered
            .lock()
            .await
            .iter()
            .map(|d| d.text().to_string())
            .collect()
    }

    /// Text of every delivery except menu prompts.
    pub async fn replies(&self) -> Vec<String> {
        self.delivered
            .lock()
            .await
            .iter()
            .filter(|d| !d.is_menu())
            .map(|d| d.text().to_string())
            .collect()
    }

    pub async fn menu_count(&self) -> usize {
        self.delivered.lock().await.iter().filter(|d| d.is_menu()).count()
    }

    pub async fn photos(&self) -> Vec<Delivery> {
        self.delivered
            .lock()
            .await
            .iter()
            .filter(|d| matches!(d, Delivery::Photo { .. }))
            .cloned()
            .collect()
    }

    pub async fn clear(&self) {
        self.delivered.lock().await.clear();
    }

    fn next_message_id(&self) -> MessageId {
        MessageId(self.next_id.fetch_add(1, Ordering::SeqCst))
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockTransport {
    fn name(&self) -> &str {
        "mock-transport"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Channel
    }

    async fn health_check(&self) -> Result<HealthStatus, ReelbotError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), ReelbotError> {
        Ok(())
    }
}

#[async_trait]
impl ChatTransport for MockTransport {
    async fn connect(&mut self) -> Result<(), ReelbotError> {
        Ok(())
    }

    async fn receive(&self) -> Result<InboundMessage, ReelbotError> {
        loop {
            {
                let mut queue = self.inbound.lock().await;
                if let Some(msg) = queue.pop_front() {
                    return Ok(msg);
                }
                if self.closed.load(Ordering::SeqCst) {
                    return Err(ReelbotError::Channel {
                        message: "mock transport closed".into(),
                        source: None,
                    });
                }
            }
            self.notify.notified().await;
        }
    }

    async fn send(&self, msg: OutboundMessage) -> Result<MessageId, ReelbotError> {
        if msg.format == TextFormat::Html && self.reject_html.load(Ordering::SeqCst) {
            return Err(ReelbotError::Channel {
                message: "can't parse entities".into(),
                source: None,
            });
        }
        self.delivered.lock().await.push(Delivery::Text(msg));
        Ok(self.next_message_id())
    }

    async fn send_photo(
        &self,
        chat_id: ChatId,
        image: Vec<u8>,
        caption: &str,
    ) -> Result<MessageId, ReelbotError> {
        if self.fail_photos.load(Ordering::SeqCst) {
            return Err(ReelbotError::Channel {
                message: "photo rejected".into(),
                source: None,
            });
        }
        self.delivered.lock().await.push(Delivery::Photo {
            chat_id,
            image,
            caption: caption.to_string(),
        });
        Ok(self.next_message_id())
    }
}
