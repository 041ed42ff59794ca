// SPDX-FileCopyrightText: 2026 Reelbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-actor conversation state.
//!
//! A session remembers the last top-level request and at most one pending
//! continuation: which handler consumes the actor's next message. Sessions
//! are created on first contact and live for the process lifetime.

use std::collections::HashMap;
use std::fmt;

use reelbot_core::ActorId;

/// The handler waiting for the actor's next message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Continuation {
    /// No pending step; the next message is matched against commands.
    #[default]
    Idle,
    AwaitingTitle,
    AwaitingParams,
    AwaitingArrivalsCount,
    AwaitingHistoryCount,
}

impl fmt::Display for Continuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Continuation::Idle => write!(f, "idle"),
            Continuation::AwaitingTitle => write!(f, "awaiting_title"),
            Continuation::AwaitingParams => write!(f, "awaiting_params"),
            Continuation::AwaitingArrivalsCount => write!(f, "awaiting_arrivals_count"),
            Continuation::AwaitingHistoryCount => write!(f, "awaiting_history_count"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConversationSession {
    last_request: String,
    pending: Continuation,
}

impl ConversationSession {
    /// The most recent top-level message, used as the request half of
    /// logged exchanges.
    pub fn last_request(&self) -> &str {
        &self.last_request
    }

    pub fn set_last_request(&mut self, text: &str) {
        self.last_request = text.to_string();
    }

    pub fn pending(&self) -> Continuation {
        self.pending
    }

    /// Registers the handler for the next message, replacing any previous one.
    pub fn expect(&mut self, next: Continuation) {
        self.pending = next;
    }

    /// Consumes the pending continuation, leaving the session idle.
    pub fn take_pending(&mut self) -> Continuation {
        std::mem::take(&mut self.pending)
    }
}

/// All sessions, keyed by actor.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<ActorId, ConversationSession>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The actor's session, created on first use.
    pub fn get_mut(&mut self, actor_id: ActorId) -> &mut ConversationSession {
        self.sessions.entry(actor_id).or_default()
    }

    pub fn get(&self, actor_id: ActorId) -> Option<&ConversationSession> {
        self.sessions.get(&actor_id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn continuation_display() {
        assert_eq!(Continuation::Idle.to_string(), "idle");
        assert_eq!(Continuation::AwaitingParams.to_string(), "awaiting_params");
    }

    #[test]
    fn take_pending_consumes_registration() {
        let mut session = ConversationSession::default();
        session.expect(Continuation::AwaitingTitle);
        assert_eq!(session.take_pending(), Continuation::AwaitingTitle);
        assert_eq!(session.pending(), Continuation::Idle);
        assert_eq!(session.take_pending(), Continuation::Idle);
    }

    #[test]
    fn new_registration_overwrites_previous() {
        let mut session = ConversationSession::default();
        session.expect(Continuation::AwaitingTitle);
        session.expect(Continuation::AwaitingHistoryCount);
        assert_eq!(session.take_pending(), Continuation::AwaitingHistoryCount);
    }

    #[test]
    fn sessions_are_isolated_per_actor() {
        let mut registry = SessionRegistry::new();
        registry.get_mut(ActorId(1)).expect(Continuation::AwaitingParams);
        registry.get_mut(ActorId(2)).set_last_request("📜 History");

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(ActorId(1)).unwrap().pending(), Continuation::AwaitingParams);
        assert_eq!(registry.get(ActorId(2)).unwrap().pending(), Continuation::Idle);
        assert_eq!(registry.get(ActorId(1)).unwrap().last_request(), "");
    }
}
