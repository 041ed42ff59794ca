// SPDX-FileCopyrightText: 2026 Reelbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Movie catalog adapter for Reelbot.
//!
//! [`HttpCatalog`] talks to the remote service; [`RateLimitedLookup`] wraps
//! any [`reelbot_core::CatalogLookup`] with the global cooldown.

pub mod client;
pub mod throttle;

pub use client::{HttpCatalog, unwrap_results};
pub use throttle::RateLimitedLookup;
