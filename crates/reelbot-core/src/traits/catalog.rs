// SPDX-FileCopyrightText: 2026 Reelbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog lookup trait for the external movie database.

use async_trait::async_trait;

use crate::error::ReelbotError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{Endpoint, QueryParams};

/// Adapter for the remote movie catalog.
///
/// `lookup` returns the decoded JSON result: a list for searches, an object
/// for detail queries. Any transport or decoding problem is a
/// [`ReelbotError::Lookup`].
#[async_trait]
pub trait CatalogLookup: PluginAdapter {
    /// Issues one query against `endpoint`.
    async fn lookup(
        &self,
        endpoint: Endpoint,
        params: &QueryParams,
    ) -> Result<serde_json::Value, ReelbotError>;

    /// Downloads the raw bytes behind an image URL.
    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, ReelbotError>;
}
