// SPDX-FileCopyrightText: 2026 Reelbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the RapidAPI "OTT details" catalog.
//!
//! Each lookup is a single GET to `{base_url}/{endpoint}` with the query
//! parameters URL-encoded. No retries: a failed call is reported once and
//! the caller decides what the user sees.

use std::time::Duration;

use async_trait::async_trait;
use reelbot_config::model::CatalogConfig;
use reelbot_core::types::{AdapterType, Endpoint, HealthStatus, QueryParams};
use reelbot_core::{CatalogLookup, PluginAdapter, ReelbotError};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Url;
use tracing::debug;

/// Catalog client speaking the RapidAPI header convention.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: reqwest::Client,
    /// Header-less client for poster downloads, so credentials only go to
    /// the catalog host.
    media_client: reqwest::Client,
    base_url: String,
}

impl HttpCatalog {
    /// Builds a client from the `[catalog]` config section.
    ///
    /// Requires `api_key` and `api_host`.
    pub fn new(config: &CatalogConfig) -> Result<Self, ReelbotError> {
        let api_key = required(config.api_key.as_deref(), "catalog.api_key")?;
        let api_host = required(config.api_host.as_deref(), "catalog.api_host")?;

        let mut headers = HeaderMap::new();
        headers.insert("x-rapidapi-key", header_value(api_key, "catalog.api_key")?);
        headers.insert("x-rapidapi-host", header_value(api_host, "catalog.api_host")?);

        let timeout = Duration::from_secs(config.request_timeout_secs);
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| ReelbotError::Config(format!("failed to build HTTP client: {e}")))?;
        let media_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ReelbotError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            media_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint_url(&self, endpoint: Endpoint, params: &QueryParams) -> Result<Url, ReelbotError> {
        let raw = format!("{}/{}", self.base_url, endpoint);
        Url::parse_with_params(&raw, params.iter())
            .map_err(|e| lookup_failure(endpoint, &format!("invalid URL `{raw}`"), e))
    }
}

fn required<'a>(value: Option<&'a str>, key: &str) -> Result<&'a str, ReelbotError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ReelbotError::Config(format!(
            "{key} is required for the catalog client"
        ))),
    }
}

fn header_value(value: &str, key: &str) -> Result<HeaderValue, ReelbotError> {
    HeaderValue::from_str(value)
        .map_err(|e| ReelbotError::Config(format!("invalid {key} header value: {e}")))
}

fn lookup_failure<E>(endpoint: impl ToString, context: &str, e: E) -> ReelbotError
where
    E: std::error::Error + Send + Sync + 'static,
{
    ReelbotError::Lookup {
        endpoint: endpoint.to_string(),
        message: format!("{context}: {e}"),
        source: Some(Box::new(e)),
    }
}

/// Unwraps the `results` envelope the service puts around list responses.
pub fn unwrap_results(body: serde_json::Value) -> serde_json::Value {
    match body {
        serde_json::Value::Object(mut map) if map.contains_key("results") => {
            map.remove("results").unwrap_or(serde_json::Value::Null)
        }
        other => other,
    }
}

#[async_trait]
impl PluginAdapter for HttpCatalog {
    fn name(&self) -> &str {
        "rapidapi-ott"
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
impl CatalogLookup for HttpCatalog {
    async fn lookup(
        &self,
        endpoint: Endpoint,
        params: &QueryParams,
    ) -> Result<serde_json::Value, ReelbotError> {
        let url = self.endpoint_url(endpoint, params)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| lookup_failure(endpoint, "HTTP request failed", e))?;

        let status = response.status();
        debug!(endpoint = %endpoint, status = %status, "catalog response received");

        let body = response
            .text()
            .await
            .map_err(|e| lookup_failure(endpoint, "failed to read response body", e))?;

        if !status.is_success() {
            return Err(ReelbotError::lookup(
                endpoint.to_string(),
                format!("catalog returned {status}: {body}"),
            ));
        }

        let value: serde_json::Value = serde_json::from_str(&body)
            .map_err(|e| lookup_failure(endpoint, "failed to parse response", e))?;

        Ok(unwrap_results(value))
    }

    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, ReelbotError> {
        let response = self
            .media_client
            .get(url)
            .send()
            .await
            .map_err(|e| lookup_failure("image", "image request failed", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReelbotError::lookup(
                "image",
                format!("image host returned {status}"),
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| lookup_failure("image", "failed to read image body", e))?;
        debug!(url, size = bytes.len(), "downloaded poster image");
        Ok(bytes.to_vec())
    }
}
