// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Scoped transactions over a storage backend.
//!
//! Every service operation runs inside exactly one transaction: it is
//! begun from a [`Transactional`] store, handed to a closure as `&mut Tx`,
//! committed when the closure returns `Ok` and rolled back otherwise. A
//! transaction dropped without commit is rolled back by its backend.
//!
//! # Overview
//!
//! - [`Transaction`] — Entry point binding a store to one unit of work
//! - [`Transactional`] — Stores that can begin a transaction
//! - [`TransactionOps`] — Commit/rollback on an open transaction
//! - [`TransactionError`] — Lifecycle failure wrapper
//!
//! # Example
//!
//! ```rust,ignore
//! use event_ideas_core::prelude::*;
//!
//! let event = Transaction::new(&store)
//!     .run(move |tx| Box::pin(async move {
//!         let event = tx.insert_event(&name).await?;
//!         tx.insert_participant(event.id, &proposer).await?;
//!         Ok::<_, CoreError>(event)
//!     }))
//!     .await?;
//! ```

use std::{future::Future, pin::Pin};

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

use crate::{error::StoreError, repository::Queries};

/// Future returned by a transaction body borrowing the transaction for `'t`.
pub type TxFuture<'t, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 't>>;

/// Lifecycle failure of a transaction, separate from failures of the
/// statements run inside it.
#[derive(Debug, Error)]
pub enum TransactionError<E> {
    /// Could not open the transaction.
    #[error("failed to begin transaction: {0}")]
    Begin(#[source] E),

    /// Could not commit after a successful body.
    #[error("failed to commit transaction: {0}")]
    Commit(#[source] E),

    /// Could not roll back after a failed body.
    #[error("failed to roll back transaction: {0}")]
    Rollback(#[source] E)
}

impl<E> TransactionError<E> {
    /// Check if this is a begin error.
    pub const fn is_begin(&self) -> bool {
        matches!(self, Self::Begin(_))
    }

    /// Check if this is a commit error.
    pub const fn is_commit(&self) -> bool {
        matches!(self, Self::Commit(_))
    }

    /// Check if this is a rollback error.
    pub const fn is_rollback(&self) -> bool {
        matches!(self, Self::Rollback(_))
    }

    /// Get the inner error.
    pub fn into_inner(self) -> E {
        match self {
            Self::Begin(e) | Self::Commit(e) | Self::Rollback(e) => e
        }
    }
}

/// A store that can open transactions.
///
/// Implemented by [`PgStore`](crate::postgres::PgStore) and
/// [`MemoryStore`](crate::memory::MemoryStore).
#[async_trait]
pub trait Transactional: Send + Sync {
    /// Open transaction type, carrying every query the service needs.
    type Tx: TransactionOps + Queries;

    /// Begin a new transaction.
    async fn begin(&self) -> Result<Self::Tx, StoreError>;
}

/// Commit and rollback on an open transaction.
#[async_trait]
pub trait TransactionOps: Sized + Send {
    /// Make every write of this transaction visible.
    async fn commit(self) -> Result<(), StoreError>;

    /// Discard every write of this transaction.
    async fn rollback(self) -> Result<(), StoreError>;
}

/// One unit of work bound to a store.
///
/// Use [`Transaction::new`], then [`Transaction::run`].
pub struct Transaction<'s, S> {
    store: &'s S
}

impl<'s, S> Transaction<'s, S> {
    /// Bind a unit of work to `store`.
    pub const fn new(store: &'s S) -> Self {
        Self {
            store
        }
    }

    /// Get reference to the underlying store.
    pub const fn store(&self) -> &'s S {
        self.store
    }
}

impl<S: Transactional> Transaction<'_, S> {
    /// Execute `body` within one transaction.
    ///
    /// Commits on `Ok`. On `Err` the transaction is rolled back and the
    /// body's error is returned; a failing rollback is logged, not
    /// reported, since the body's error is the one the caller acts on.
    ///
    /// # Errors
    ///
    /// The body's error, or [`TransactionError`] converted into `E` when
    /// begin or commit fails.
    pub async fn run<T, E, F>(self, body: F) -> Result<T, E>
    where
        F: for<'t> FnOnce(&'t mut S::Tx) -> TxFuture<'t, T, E> + Send,
        T: Send,
        E: From<TransactionError<StoreError>> + Send
    {
        let mut tx = self.store.begin().await.map_err(TransactionError::Begin)?;

        match body(&mut tx).await {
            Ok(value) => {
                tx.commit().await.map_err(TransactionError::Commit)?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback) = tx.rollback().await {
                    warn!(error = %TransactionError::Rollback(rollback), "rollback failed");
                }
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn display_names_the_phase() {
        let begin = TransactionError::Begin(StoreError::Backend("refused".into()));
        assert_eq!(
            begin.to_string(),
            "failed to begin transaction: storage backend error: refused"
        );

        let commit = TransactionError::Commit(StoreError::Backend("io".into()));
        assert!(commit.to_string().starts_with("failed to commit"));

        let rollback = TransactionError::Rollback(StoreError::Backend("io".into()));
        assert!(rollback.to_string().starts_with("failed to roll back"));
    }

    #[test]
    fn phase_predicates() {
        let begin: TransactionError<&str> = TransactionError::Begin("e");
        let commit: TransactionError<&str> = TransactionError::Commit("e");
        let rollback: TransactionError<&str> = TransactionError::Rollback("e");

        assert!(begin.is_begin() && !begin.is_commit() && !begin.is_rollback());
        assert!(commit.is_commit() && !commit.is_begin());
        assert!(rollback.is_rollback() && !rollback.is_commit());
    }

    #[test]
    fn into_inner_returns_cause() {
        assert_eq!(TransactionError::Begin("b").into_inner(), "b");
        assert_eq!(TransactionError::Commit("c").into_inner(), "c");
        assert_eq!(TransactionError::Rollback("r").into_inner(), "r");
    }

    #[test]
    fn source_is_the_store_error() {
        let err = TransactionError::Commit(StoreError::Backend("disk".into()));
        let source = err.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("storage backend error: disk"));
    }

    #[test]
    fn builder_keeps_store() {
        let store = 42_u8;
        assert_eq!(*Transaction::new(&store).store(), 42);
    }
}
