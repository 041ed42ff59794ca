// SPDX-FileCopyrightText: 2026 Reelbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Title disambiguation and per-film detail delivery.
//!
//! A title search can return any number of loosely matching candidates.
//! One candidate is taken as the answer; several are narrowed to those whose
//! title equals the query exactly (case-sensitive). If none survive, the
//! query was too vague.

use reelbot_core::types::{Candidate, Endpoint, FilmDetail, OutboundMessage, QueryParams};
use reelbot_core::{CatalogLookup, ChatId, ChatTransport, ReelbotError};
use tracing::{debug, warn};

/// Outcome of resolving a title query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    NotFound,
    /// Never empty.
    ExactMatches(Vec<Candidate>),
    TooAmbiguous,
}

/// Narrows a candidate list for `title`.
pub fn resolve_candidates(candidates: Vec<Candidate>, title: &str) -> Resolution {
    match candidates.len() {
        0 => Resolution::NotFound,
        1 => Resolution::ExactMatches(candidates),
        _ => {
            let exact: Vec<Candidate> =
                candidates.into_iter().filter(|c| c.title == title).collect();
            if exact.is_empty() {
                Resolution::TooAmbiguous
            } else {
                Resolution::ExactMatches(exact)
            }
        }
    }
}

/// Runs a `search` lookup for `title` and resolves the result.
///
/// A failed lookup or a body that is not a candidate list counts as
/// [`Resolution::NotFound`].
pub async fn resolve_title(catalog: &dyn CatalogLookup, title: &str) -> Resolution {
    let params = QueryParams::from([("title".to_string(), title.to_string())]);
    let candidates = match catalog.lookup(Endpoint::Search, &params).await {
        Ok(body) => decode_candidates(body),
        Err(e) => {
            warn!(error = %e, "title search failed");
            Vec::new()
        }
    };
    debug!(title, found = candidates.len(), "title search finished");
    resolve_candidates(candidates, title)
}

/// Decodes a search result list. Entries without a title or id are skipped;
/// anything other than a list yields no candidates.
pub fn decode_candidates(body: serde_json::Value) -> Vec<Candidate> {
    let serde_json::Value::Array(items) = body else {
        warn!("search result is not a list");
        return Vec::new();
    };
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<Candidate>(item) {
            Ok(candidate) => Some(candidate),
            Err(e) => {
                debug!(error = %e, "skipping undecodable search entry");
                None
            }
        })
        .collect()
}

/// Fetches the detail record for one candidate.
///
/// Each call is one `gettitleDetails` lookup. On failure the candidate's own
/// title and id are returned with every other field empty.
pub async fn fetch_detail(catalog: &dyn CatalogLookup, candidate: &Candidate) -> FilmDetail {
    let params = QueryParams::from([("imdbid".to_string(), candidate.external_id.clone())]);
    let body = match catalog.lookup(Endpoint::TitleDetails, &params).await {
        Ok(body) => body,
        Err(e) => {
            warn!(imdbid = %candidate.external_id, error = %e, "detail lookup failed");
            return FilmDetail::from_candidate(candidate);
        }
    };
    serde_json::from_value(body).unwrap_or_else(|e| {
        warn!(imdbid = %candidate.external_id, error = %e, "undecodable detail record");
        FilmDetail::from_candidate(candidate)
    })
}

/// Renders the fixed-order caption. Missing fields render empty.
pub fn render_detail(detail: &FilmDetail) -> String {
    format!(
        "Title: {}\nIMDb ID: {}\nIMDb rating: {}\nRuntime: {}\nReleased: {}\nGenre: {}\nSynopsis: {}",
        detail.title,
        detail.external_id,
        detail.rating.as_deref().unwrap_or_default(),
        detail.runtime.as_deref().unwrap_or_default(),
        detail.released.as_deref().unwrap_or_default(),
        detail.genres.join(", "),
        detail.synopsis.as_deref().unwrap_or_default(),
    )
}

/// Sends a rendered detail: as a captioned poster when the record has an
/// image URL, as plain text otherwise. Any failure fetching or sending the
/// poster falls back to text.
pub async fn deliver_detail(
    transport: &dyn ChatTransport,
    catalog: &dyn CatalogLookup,
    chat_id: ChatId,
    detail: &FilmDetail,
    caption: &str,
) -> Result<(), ReelbotError> {
    if let Some(url) = detail.image_urls.first() {
        match catalog.fetch_image(url).await {
            Ok(bytes) => match transport.send_photo(chat_id, bytes, caption).await {
                Ok(_) => return Ok(()),
                Err(e) => warn!(error = %e, "photo delivery failed, sending text"),
            },
            Err(e) => warn!(url = %url, error = %e, "poster download failed, sending text"),
        }
    }
    transport
        .send(OutboundMessage::text(chat_id, caption))
        .await?;
    Ok(())
}
