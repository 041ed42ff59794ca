// SPDX-FileCopyrightText: 2026 Reelbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base adapter trait shared by every external collaborator.

use async_trait::async_trait;

use crate::error::ReelbotError;
use crate::types::{AdapterType, HealthStatus};

/// Identity and lifecycle common to the transport, the catalog client and
/// the history store.
#[async_trait]
pub trait PluginAdapter: Send + Sync + 'static {
    /// Short name used in logs, e.g. `"telegram"` or `"sqlite"`.
    fn name(&self) -> &str;

    fn version(&self) -> semver::Version;

    fn adapter_type(&self) -> AdapterType;

    /// Probes the backing service.
    async fn health_check(&self) -> Result<HealthStatus, ReelbotError>;

    /// Releases connections and background tasks. Safe to call on an
    /// adapter that was never started.
    async fn shutdown(&self) -> Result<(), ReelbotError>;
}
