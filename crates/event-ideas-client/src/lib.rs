// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Client for the event ideas API.
//!
//! # Overview
//!
//! - [`ApiClient`] — One typed method per endpoint
//! - [`CachedClient`] — List reads cached for ten seconds, cleared on write
//! - [`TtlCache`] — The read-through cache behind it
//! - [`ClientError`] — Transport failures and API `detail` messages
//! - [`view`] — Text rendering used by the `event-ideas-cli` binary
//!
//! # Usage
//!
//! ```rust,ignore
//! use event_ideas_client::{ApiClient, CachedClient};
//!
//! let client = CachedClient::new(ApiClient::new("http://127.0.0.1:8000"));
//! let report = client.propose_idea("Boliche", "Ana", &[]).await?;
//! let events = client.list_events().await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod api;
pub mod cache;
pub mod cached;
pub mod error;
pub mod view;

pub use api::ApiClient;
pub use cache::{DEFAULT_TTL, TtlCache};
pub use cached::CachedClient;
pub use error::ClientError;
