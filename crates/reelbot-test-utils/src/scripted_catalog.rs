// SPDX-FileCopyrightText: 2026 Reelbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog lookup answering from canned JSON.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use reelbot_core::ReelbotError;
use reelbot_core::traits::{CatalogLookup, PluginAdapter};
use reelbot_core::types::{AdapterType, Endpoint, HealthStatus, QueryParams};

/// A scripted catalog for testing.
///
/// Searches are keyed by title, detail lookups by imdb id; the advanced
/// search has a single scripted answer. Anything unscripted fails like an
/// unreachable service. Every lookup is recorded in call order.
#[derive(Default)]
pub struct ScriptedCatalog {
    searches: Mutex<HashMap<String, serde_json::Value>>,
    details: Mutex<HashMap<String, serde_json::Value>>,
    advanced: Mutex<Option<serde_json::Value>>,
    images: Mutex<HashMap<String, Vec<u8>>>,
    calls: Mutex<Vec<(Endpoint, QueryParams)>>,
}

impl ScriptedCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the `search` result for `title`.
    pub fn on_search(self, title: &str, body: serde_json::Value) -> Self {
        lock(&self.searches).insert(title.to_string(), body);
        self
    }

    /// Scripts the `gettitleDetails` result for `imdbid`.
    pub fn on_details(self, imdbid: &str, body: serde_json::Value) -> Self {
        lock(&self.details).insert(imdbid.to_string(), body);
        self
    }

    /// Scripts the `advancedsearch` result for any parameters.
    pub fn on_advanced_search(self, body: serde_json::Value) -> Self {
        *lock(&self.advanced) = Some(body);
        self
    }

    /// Scripts the bytes served for an image URL.
    pub fn with_image(self, url: &str, bytes: Vec<u8>) -> Self {
        lock(&self.images).insert(url.to_string(), bytes);
        self
    }

    /// Every lookup so far, in call order.
    pub fn calls(&self) -> Vec<(Endpoint, QueryParams)> {
        lock(&self.calls).clone()
    }

    pub fn calls_to(&self, endpoint: Endpoint) -> Vec<QueryParams> {
        lock(&self.calls)
            .iter()
            .filter(|(e, _)| *e == endpoint)
            .map(|(_, p)| p.clone())
            .collect()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl PluginAdapter for ScriptedCatalog {
    fn name(&self) -> &str {
        "scripted-catalog"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Catalog
    }

    async fn health_check(&self) -> Result<HealthStatus, ReelbotError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), ReelbotError> {
        Ok(())
    }
}

#[async_trait]
impl CatalogLookup for ScriptedCatalog {
    async fn lookup(
        &self,
        endpoint: Endpoint,
        params: &QueryParams,
    ) -> Result<serde_json::Value, ReelbotError> {
        lock(&self.calls).push((endpoint, params.clone()));

        let scripted = match endpoint {
            Endpoint::Search => params
                .get("title")
                .and_then(|title| lock(&self.searches).get(title).cloned()),
            Endpoint::TitleDetails => params
                .get("imdbid")
                .and_then(|id| lock(&self.details).get(id).cloned()),
            Endpoint::AdvancedSearch => lock(&self.advanced).clone(),
        };

        scripted.ok_or_else(|| ReelbotError::lookup(endpoint.to_string(), "no scripted response"))
    }

    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, ReelbotError> {
        lock(&self.images)
            .get(url)
            .cloned()
            .ok_or_else(|| ReelbotError::lookup("image", format!("no scripted image for {url}")))
    }
}
