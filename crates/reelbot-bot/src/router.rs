// SPDX-FileCopyrightText: 2026 Reelbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The conversation state machine.
//!
//! Every inbound message goes through two layers. If the actor has a
//! pending continuation, the registered handler consumes the message
//! whatever it says. Otherwise the text is matched against the command
//! labels and the command's immediate action runs, possibly registering a
//! continuation for the next message.

use std::sync::Arc;

use reelbot_core::types::{Candidate, Endpoint, InboundMessage, OutboundMessage};
use reelbot_core::{ActorId, CatalogLookup, ChatId, ChatTransport, ReelbotError};
use tracing::{debug, info, warn};

use crate::command::{Command, menu_labels};
use crate::disambiguation::{
    Resolution, decode_candidates, deliver_detail, fetch_detail, render_detail, resolve_title,
};
use crate::history::{HistoryLogger, render_entry};
use crate::messages;
use crate::params::{AdvancedSearchQuery, parse_whole_number};
use crate::session::{Continuation, SessionRegistry};

pub struct ConversationRouter {
    transport: Arc<dyn ChatTransport>,
    catalog: Arc<dyn CatalogLookup>,
    history: HistoryLogger,
    bot_name: String,
    sessions: SessionRegistry,
}

impl ConversationRouter {
    pub fn new(
        transport: Arc<dyn ChatTransport>,
        catalog: Arc<dyn CatalogLookup>,
        history: HistoryLogger,
        bot_name: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            catalog,
            history,
            bot_name: bot_name.into(),
            sessions: SessionRegistry::new(),
        }
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    /// Handles one inbound message to completion.
    pub async fn handle(&mut self, msg: InboundMessage) -> Result<(), ReelbotError> {
        let pending = self.sessions.get_mut(msg.actor_id).take_pending();
        debug!(
            actor_id = %msg.actor_id,
            continuation = %pending,
            "routing message"
        );

        match pending {
            Continuation::Idle => self.handle_command(&msg).await,
            Continuation::AwaitingTitle => self.title_search(&msg).await,
            Continuation::AwaitingParams => self.advanced_search(&msg).await,
            Continuation::AwaitingArrivalsCount => self.last_arrivals(&msg).await,
            Continuation::AwaitingHistoryCount => self.show_history(&msg).await,
        }
    }

    async fn handle_command(&mut self, msg: &InboundMessage) -> Result<(), ReelbotError> {
        let command = Command::parse(&msg.text);
        if !command.is_some_and(Command::is_slash) {
            self.sessions
                .get_mut(msg.actor_id)
                .set_last_request(&msg.text);
        }

        let Some(command) = command else {
            return self.unknown_command(msg).await;
        };
        info!(actor_id = %msg.actor_id, command = %command, "command received");

        match command {
            Command::Start => {
                self.send(
                    OutboundMessage::text(msg.chat_id, messages::welcome(&self.bot_name)).html(),
                )
                .await?;
                self.show_menu(msg.chat_id).await
            }
            Command::HelloWorld => {
                self.send(
                    OutboundMessage::text(msg.chat_id, messages::HELLO_WORLD_REPLY)
                        .reply_to(msg.message_id),
                )
                .await
            }
            Command::FilmSearch => {
                self.say(msg.chat_id, messages::TITLE_PROMPT).await?;
                self.expect(msg.actor_id, Continuation::AwaitingTitle);
                Ok(())
            }
            Command::AdvancedSearch => {
                self.send(
                    OutboundMessage::text(msg.chat_id, messages::ADVANCED_SEARCH_GUIDE).html(),
                )
                .await?;
                self.expect(msg.actor_id, Continuation::AwaitingParams);
                Ok(())
            }
            Command::LastArrivals => {
                self.say(msg.chat_id, messages::ARRIVALS_PROMPT).await?;
                self.expect(msg.actor_id, Continuation::AwaitingArrivalsCount);
                Ok(())
            }
            Command::History => {
                self.say(msg.chat_id, messages::HISTORY_PROMPT).await?;
                self.expect(msg.actor_id, Continuation::AwaitingHistoryCount);
                Ok(())
            }
            Command::Hello => {
                let response = messages::hello(msg.actor_name.as_deref());
                self.send(
                    OutboundMessage::text(msg.chat_id, response.clone()).reply_to(msg.message_id),
                )
                .await?;
                self.log(msg.actor_id, &response).await
            }
            Command::Help => {
                let response = messages::help(&self.bot_name);
                self.send(OutboundMessage::text(msg.chat_id, response.clone()).html())
                    .await?;
                self.log(msg.actor_id, &response).await?;
                self.show_menu(msg.chat_id).await
            }
        }
    }

    async fn unknown_command(&self, msg: &InboundMessage) -> Result<(), ReelbotError> {
        debug!(actor_id = %msg.actor_id, "unknown command");
        self.send(
            OutboundMessage::text(msg.chat_id, messages::UNKNOWN_COMMAND).reply_to(msg.message_id),
        )
        .await?;
        self.history
            .write(msg.actor_id, &msg.text, messages::UNKNOWN_COMMAND)
            .await?;
        self.show_menu(msg.chat_id).await
    }

    async fn title_search(&self, msg: &InboundMessage) -> Result<(), ReelbotError> {
        let outcome = match resolve_title(self.catalog.as_ref(), &msg.text).await {
            Resolution::ExactMatches(candidates) => {
                return self.send_details(msg, &candidates).await;
            }
            Resolution::NotFound => messages::NOT_FOUND,
            Resolution::TooAmbiguous => messages::TOO_AMBIGUOUS,
        };

        for part in outcome {
            self.say(msg.chat_id, part).await?;
        }
        self.log(msg.actor_id, &messages::joined(outcome)).await?;
        self.show_menu(msg.chat_id).await
    }

    async fn advanced_search(&self, msg: &InboundMessage) -> Result<(), ReelbotError> {
        let query = match AdvancedSearchQuery::parse(&msg.text) {
            Ok(query) => query,
            Err(e) => {
                warn!(actor_id = %msg.actor_id, error = %e, "rejected search parameters");
                let response =
                    format!("{}\n{}", messages::INVALID_PARAMS, messages::INVALID_PARAMS_HINT);
                return self.reply_and_menu(msg, &response).await;
            }
        };

        let candidates: Vec<Candidate> =
            match self.catalog.lookup(Endpoint::AdvancedSearch, &query.params).await {
                Ok(body) => decode_candidates(body),
                Err(e) => {
                    warn!(error = %e, "advanced search failed");
                    Vec::new()
                }
            };

        if candidates.is_empty() {
            return self.reply_and_menu(msg, messages::NO_MATCHES).await;
        }

        let take = candidates.len().min(query.result_limit);
        debug!(found = candidates.len(), delivering = take, "advanced search results");
        self.send_details(msg, &candidates[..take]).await
    }

    async fn last_arrivals(&self, msg: &InboundMessage) -> Result<(), ReelbotError> {
        self.say(msg.chat_id, messages::ARRIVALS_UNAVAILABLE).await?;
        self.log(msg.actor_id, messages::ARRIVALS_UNAVAILABLE).await?;
        self.show_menu(msg.chat_id).await
    }

    async fn show_history(&self, msg: &InboundMessage) -> Result<(), ReelbotError> {
        let Some(requested) = parse_whole_number(&msg.text) else {
            return self.reply_and_menu(msg, messages::INVALID_HISTORY_COUNT).await;
        };

        let records = self.history.recent(msg.actor_id, requested).await?;
        let entries: Vec<String> = records.iter().map(render_entry).collect();

        for entry in &entries {
            let html = OutboundMessage::text(msg.chat_id, entry.clone()).html();
            if let Err(e) = self.transport.send(html).await {
                warn!(error = %e, "history entry rejected as HTML, resending as plain text");
                self.say(msg.chat_id, entry).await?;
            }
        }

        self.log(msg.actor_id, &entries.join("\n\n")).await
    }

    /// Resolves, logs and delivers each candidate in order.
    async fn send_details(
        &self,
        msg: &InboundMessage,
        candidates: &[Candidate],
    ) -> Result<(), ReelbotError> {
        let request = format!("{}\n{}", self.last_request(msg.actor_id), msg.text);

        for candidate in candidates {
            let detail = fetch_detail(self.catalog.as_ref(), candidate).await;
            let caption = render_detail(&detail);
            self.history.write(msg.actor_id, &request, &caption).await?;
            deliver_detail(
                self.transport.as_ref(),
                self.catalog.as_ref(),
                msg.chat_id,
                &detail,
                &caption,
            )
            .await?;
        }
        Ok(())
    }

    async fn reply_and_menu(
        &self,
        msg: &InboundMessage,
        response: &str,
    ) -> Result<(), ReelbotError> {
        self.say(msg.chat_id, response).await?;
        self.log(msg.actor_id, response).await?;
        self.show_menu(msg.chat_id).await
    }

    fn expect(&mut self, actor_id: ActorId, next: Continuation) {
        self.sessions.get_mut(actor_id).expect(next);
    }

    fn last_request(&self, actor_id: ActorId) -> String {
        self.sessions
            .get(actor_id)
            .map(|s| s.last_request().to_string())
            .unwrap_or_default()
    }

    /// Logs `response` against the actor's last top-level request.
    async fn log(&self, actor_id: ActorId, response: &str) -> Result<(), ReelbotError> {
        let request = self.last_request(actor_id);
        self.history.write(actor_id, &request, response).await
    }

    async fn say(&self, chat_id: ChatId, text: &str) -> Result<(), ReelbotError> {
        self.send(OutboundMessage::text(chat_id, text)).await
    }

    async fn send(&self, msg: OutboundMessage) -> Result<(), ReelbotError> {
        self.transport.send(msg).await?;
        Ok(())
    }

    async fn show_menu(&self, chat_id: ChatId) -> Result<(), ReelbotError> {
        self.transport
            .show_menu(chat_id, messages::MENU_PROMPT, &menu_labels())
            .await?;
        Ok(())
    }
}
