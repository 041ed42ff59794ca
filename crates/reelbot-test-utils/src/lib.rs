// SPDX-FileCopyrightText: 2026 Reelbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Reelbot integration tests.
//!
//! Mock adapters and a harness for fast, deterministic tests without
//! Telegram or the catalog service.
//!
//! # Components
//!
//! - [`MockTransport`] - chat transport with message injection and delivery capture
//! - [`ScriptedCatalog`] - catalog answering from canned JSON, recording every call
//! - [`TestHarness`] - router wired to both mocks and a temp SQLite history

pub mod harness;
pub mod mock_transport;
pub mod scripted_catalog;

pub use harness::{TestHarness, inbound};
pub use mock_transport::{Delivery, MockTransport};
pub use scripted_catalog::ScriptedCatalog;
