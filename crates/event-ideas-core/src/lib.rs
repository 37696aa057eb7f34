// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Consistency core for event ideas.
//!
//! People propose ideas for team events, every idea is published under the
//! proposer's name, and participants vote by registering against an event.
//! This crate owns the rules that keep those three record kinds coherent:
//!
//! - an event name appears at most once;
//! - every event has at most one publication record;
//! - a participant name votes at most once per event;
//! - proposing an idea creates the event, its publication and the
//!   proposer's vote together or not at all.
//!
//! # Overview
//!
//! - [`IdeaService`] — Every operation, generic over the store
//! - [`Store`] — Bound for storage backends
//! - [`PgStore`] — PostgreSQL backend (feature `postgres`)
//! - [`MemoryStore`] — In-process backend with the same constraints
//! - [`CoreError`] — Four-way error taxonomy
//! - [`model`] — Records and vote reports
//! - [`dto`] — Request and response bodies shared with clients
//! - [`prelude`] — Convenient re-exports
//!
//! # Usage
//!
//! ```rust,ignore
//! use event_ideas_core::prelude::*;
//!
//! let store = PgStore::new(pool);
//! store.migrate().await?;
//! let service = IdeaService::new(store);
//!
//! let proposal = service.propose_and_vote("Boliche", "Ana").await?;
//! service.register_participant(proposal.event.id, "Bruno").await?;
//! ```
//!
//! # Feature Flags
//!
//! | Feature | Enables |
//! |---------|---------|
//! | `postgres` | [`PgStore`] and the embedded migrations (default) |
//! | `api` | `utoipa` schemas for the wire types |
//!
//! Clients depend on this crate with `default-features = false` to share the
//! wire types without pulling in a database driver.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dto;
pub mod error;
pub mod memory;
pub mod model;
#[cfg(feature = "postgres")]
pub mod postgres;
pub mod prelude;
pub mod repository;
pub mod service;
pub mod transaction;
pub mod validate;

pub use error::{CoreError, StoreError};
pub use memory::MemoryStore;
#[cfg(feature = "postgres")]
pub use postgres::PgStore;
pub use repository::Store;
pub use service::IdeaService;
