// SPDX-FileCopyrightText: 2026 Reelbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the conversation core.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};

/// Identifier of the chat a message arrived in and replies are sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatId(pub i64);

/// Identifier of a chat participant; the unit of session isolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(pub i64);

/// Identifier of a delivered or received message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub i32);

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of adapter behind a trait object.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Channel,
    Catalog,
    Storage,
}

// --- Transport types ---

/// A text message received from the chat transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub message_id: MessageId,
    pub chat_id: ChatId,
    pub actor_id: ActorId,
    /// Display (first) name of the sender, when the platform provides one.
    pub actor_name: Option<String>,
    pub text: String,
    pub received_at: DateTime<Utc>,
}

/// How the transport should interpret outbound text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextFormat {
    #[default]
    Plain,
    Html,
}

/// A text message to deliver through the chat transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub chat_id: ChatId,
    pub text: String,
    pub format: TextFormat,
    /// Deliver as a reply quoting this message.
    pub reply_to: Option<MessageId>,
    /// One-button-per-row choice keyboard to attach.
    pub keyboard: Option<Vec<String>>,
}

impl OutboundMessage {
    /// A plain text message with no reply reference or keyboard.
    pub fn text(chat_id: ChatId, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            format: TextFormat::Plain,
            reply_to: None,
            keyboard: None,
        }
    }

    pub fn html(mut self) -> Self {
        self.format = TextFormat::Html;
        self
    }

    pub fn reply_to(mut self, message_id: MessageId) -> Self {
        self.reply_to = Some(message_id);
        self
    }

    pub fn with_keyboard<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keyboard = Some(labels.into_iter().map(Into::into).collect());
        self
    }
}

// --- Catalog types ---

/// Remote catalog endpoints used by the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum Endpoint {
    /// Fuzzy title search.
    #[strum(serialize = "search")]
    Search,
    /// Multi-parameter search.
    #[strum(serialize = "advancedsearch")]
    AdvancedSearch,
    /// Detail record for one title by external id.
    #[strum(serialize = "gettitleDetails")]
    TitleDetails,
}

/// Query parameters for a lookup call, ordered by key.
pub type QueryParams = BTreeMap<String, String>;

/// A minimal title reference returned by a search, prior to detail resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub title: String,
    #[serde(rename = "imdbid")]
    pub external_id: String,
}

/// Resolved information for one catalog title.
///
/// Only `title` and `external_id` are guaranteed; the service omits or
/// nulls the rest freely, and scalar fields arrive as strings or numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FilmDetail {
    #[serde(default, deserialize_with = "scalar_string")]
    pub title: String,
    #[serde(rename = "imdbid", default, deserialize_with = "scalar_string")]
    pub external_id: String,
    #[serde(rename = "imdbrating", default, deserialize_with = "optional_scalar")]
    pub rating: Option<String>,
    #[serde(default, deserialize_with = "optional_scalar")]
    pub runtime: Option<String>,
    #[serde(default, deserialize_with = "optional_scalar")]
    pub released: Option<String>,
    #[serde(rename = "genre", default, deserialize_with = "string_list")]
    pub genres: Vec<String>,
    #[serde(default, deserialize_with = "optional_scalar")]
    pub synopsis: Option<String>,
    #[serde(rename = "imageurl", default, deserialize_with = "string_list")]
    pub image_urls: Vec<String>,
}

impl FilmDetail {
    /// A detail record carrying only what the search candidate already knew.
    pub fn from_candidate(candidate: &Candidate) -> Self {
        Self {
            title: candidate.title.clone(),
            external_id: candidate.external_id.clone(),
            ..Self::default()
        }
    }
}

fn value_to_string(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn optional_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value_to_string(value))
}

fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_scalar(deserializer)?.unwrap_or_default())
}

fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Array(items) => items.into_iter().filter_map(value_to_string).collect(),
        other => value_to_string(other).into_iter().collect(),
    })
}

// --- History types ---

/// One persisted request/response exchange. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRecord {
    pub actor_id: ActorId,
    pub request_text: String,
    pub response_text: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_paths_match_catalog_routes() {
        assert_eq!(Endpoint::Search.to_string(), "search");
        assert_eq!(Endpoint::AdvancedSearch.to_string(), "advancedsearch");
        assert_eq!(Endpoint::TitleDetails.to_string(), "gettitleDetails");
    }

    #[test]
    fn candidate_reads_imdbid() {
        let c: Candidate =
            serde_json::from_value(serde_json::json!({"title": "Alien", "imdbid": "tt0078748"}))
                .unwrap();
        assert_eq!(c.external_id, "tt0078748");
    }

    #[test]
    fn film_detail_accepts_numbers_nulls_and_missing_fields() {
        let detail: FilmDetail = serde_json::from_value(serde_json::json!({
            "title": "Alien",
            "imdbid": "tt0078748",
            "imdbrating": 8.5,
            "runtime": null,
            "genre": ["Horror", "Sci-Fi"],
            "imageurl": ["https://img.example/alien.jpg"]
        }))
        .unwrap();

        assert_eq!(detail.rating.as_deref(), Some("8.5"));
        assert_eq!(detail.runtime, None);
        assert_eq!(detail.released, None);
        assert_eq!(detail.genres, vec!["Horror", "Sci-Fi"]);
        assert_eq!(detail.image_urls.len(), 1);
        assert!(detail.synopsis.is_none());
    }

    #[test]
    fn film_detail_null_genre_is_empty() {
        let detail: FilmDetail =
            serde_json::from_value(serde_json::json!({"title": "X", "imdbid": "1", "genre": null}))
                .unwrap();
        assert!(detail.genres.is_empty());
    }

    #[test]
    fn outbound_builder_sets_fields() {
        let msg = OutboundMessage::text(ChatId(7), "hi")
            .html()
            .reply_to(MessageId(3))
            .with_keyboard(["a", "b"]);
        assert_eq!(msg.format, TextFormat::Html);
        assert_eq!(msg.reply_to, Some(MessageId(3)));
        assert_eq!(msg.keyboard, Some(vec!["a".to_string(), "b".to_string()]));
    }
}
