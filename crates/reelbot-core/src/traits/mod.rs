// SPDX-FileCopyrightText: 2026 Reelbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions.
//!
//! All adapters extend [`PluginAdapter`] and use `#[async_trait]` for
//! dynamic dispatch compatibility.

pub mod adapter;
pub mod catalog;
pub mod channel;
pub mod storage;

pub use adapter::PluginAdapter;
pub use catalog::CatalogLookup;
pub use channel::ChatTransport;
pub use storage::{HistoryStore, StorageAdapter};
