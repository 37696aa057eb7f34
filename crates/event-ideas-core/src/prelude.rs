// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Convenient re-exports for common usage.
//!
//! # Usage
//!
//! ```rust,ignore
//! use event_ideas_core::prelude::*;
//! ```

#[cfg(feature = "postgres")]
pub use crate::postgres::PgStore;
pub use crate::{
    error::{CoreError, StoreError},
    memory::MemoryStore,
    model::{
        Event, Participant, Proposal, ProposalReport, RegisteredEvent, VoteReport, VoteResult,
        VoteStatus
    },
    repository::{EventQueries, ParticipantQueries, Queries, RegisteredEventQueries, Store},
    service::IdeaService,
    transaction::{Transaction, TransactionError, TransactionOps, Transactional}
};
