// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Error types for the service and its storage backends.
//!
//! Storage reports constraint failures as [`StoreError`]; the service turns
//! them into the four-way [`CoreError`] taxonomy the HTTP surface maps to
//! status codes.
//!
//! | [`CoreError`] | Cause | HTTP |
//! |---------------|-------|------|
//! | `InvalidInput` | blank/oversized name, non-positive id | 400 |
//! | `NotFound` | referenced id absent | 404 |
//! | `Conflict` | unique index violated | 409 |
//! | `Internal` | driver or transaction failure | 500 |

use thiserror::Error;
use tracing::error;

use crate::transaction::TransactionError;

/// Failure of a service operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Rejected before reaching storage.
    #[error("{0}")]
    InvalidInput(String),

    /// Referenced row does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Uniqueness violation; the message names the duplicate.
    #[error("{0}")]
    Conflict(String),

    /// Unexpected storage failure. The message is safe to show to clients.
    #[error("{0}")]
    Internal(String)
}

impl CoreError {
    /// Check if this is an input validation error.
    pub const fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// Check if this is a missing-row error.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this is a uniqueness conflict.
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }

    /// Check if this is an internal failure.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal(_))
    }

    /// The human-readable message.
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidInput(m) | Self::NotFound(m) | Self::Conflict(m) | Self::Internal(m) => m
        }
    }
}

/// Failure reported by a storage backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A unique index rejected the write.
    #[error("unique constraint violated: {}", .constraint.as_deref().unwrap_or("unknown"))]
    UniqueViolation {
        /// Constraint name when the backend reports one.
        constraint: Option<String>
    },

    /// A foreign key rejected the write.
    #[error("foreign key violated: {}", .constraint.as_deref().unwrap_or("unknown"))]
    ForeignKeyViolation {
        /// Constraint name when the backend reports one.
        constraint: Option<String>
    },

    /// Any other driver, connection or migration failure.
    #[error("storage backend error: {0}")]
    Backend(String)
}

impl StoreError {
    /// Unique violation on the named constraint.
    pub fn unique(constraint: &str) -> Self {
        Self::UniqueViolation {
            constraint: Some(constraint.to_owned())
        }
    }

    /// Foreign key violation on the named constraint.
    pub fn foreign_key(constraint: &str) -> Self {
        Self::ForeignKeyViolation {
            constraint: Some(constraint.to_owned())
        }
    }

    /// Check if this is a unique violation.
    pub const fn is_unique_violation(&self) -> bool {
        matches!(self, Self::UniqueViolation { .. })
    }

    /// Translate, reporting a unique violation as [`CoreError::Conflict`]
    /// with `message`.
    pub fn or_conflict(self, message: impl Into<String>) -> CoreError {
        match self {
            Self::UniqueViolation { .. } => CoreError::Conflict(message.into()),
            other => other.into()
        }
    }

    /// Translate, reporting a foreign key violation as
    /// [`CoreError::NotFound`] with `message`.
    pub fn or_missing(self, message: impl Into<String>) -> CoreError {
        match self {
            Self::ForeignKeyViolation { .. } => CoreError::NotFound(message.into()),
            other => other.into()
        }
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation { .. } => Self::Conflict("duplicate value".into()),
            StoreError::ForeignKeyViolation { .. } => {
                Self::NotFound("referenced event not found".into())
            }
            StoreError::Backend(detail) => {
                error!(%detail, "storage failure");
                Self::Internal("internal storage error".into())
            }
        }
    }
}

impl From<TransactionError<StoreError>> for CoreError {
    fn from(err: TransactionError<StoreError>) -> Self {
        error!(error = %err, "transaction failure");
        Self::Internal("internal storage error".into())
    }
}

#[cfg(feature = "postgres")]
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            let constraint = db.constraint().map(str::to_owned);
            if db.is_unique_violation() {
                return Self::UniqueViolation {
                    constraint
                };
            }
            if db.is_foreign_key_violation() {
                return Self::ForeignKeyViolation {
                    constraint
                };
            }
        }
        Self::Backend(err.to_string())
    }
}

#[cfg(feature = "postgres")]
impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        Self::Backend(format!("migration failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_error_predicates() {
        assert!(CoreError::InvalidInput("x".into()).is_invalid_input());
        assert!(CoreError::NotFound("x".into()).is_not_found());
        assert!(CoreError::Conflict("x".into()).is_conflict());
        assert!(CoreError::Internal("x".into()).is_internal());
        assert!(!CoreError::Conflict("x".into()).is_not_found());
    }

    #[test]
    fn core_error_displays_message_only() {
        let err = CoreError::Conflict("an idea named 'Boliche' already exists".into());
        assert_eq!(err.to_string(), "an idea named 'Boliche' already exists");
        assert_eq!(err.message(), "an idea named 'Boliche' already exists");
    }

    #[test]
    fn store_error_display_names_constraint() {
        assert_eq!(
            StoreError::unique("uq_event_name").to_string(),
            "unique constraint violated: uq_event_name"
        );
        let anonymous = StoreError::ForeignKeyViolation {
            constraint: None
        };
        assert_eq!(anonymous.to_string(), "foreign key violated: unknown");
    }

    #[test]
    fn or_conflict_only_rewrites_unique_violations() {
        let conflict = StoreError::unique("uq_event_name").or_conflict("dup");
        assert_eq!(conflict, CoreError::Conflict("dup".into()));

        let backend = StoreError::Backend("socket closed".into()).or_conflict("dup");
        assert!(backend.is_internal());
    }

    #[test]
    fn or_missing_only_rewrites_foreign_key_violations() {
        let missing = StoreError::foreign_key("fk").or_missing("event 3 not found");
        assert_eq!(missing, CoreError::NotFound("event 3 not found".into()));

        let unique = StoreError::unique("uq").or_missing("event 3 not found");
        assert!(unique.is_conflict());
    }

    #[test]
    fn backend_detail_is_not_leaked() {
        let err: CoreError = StoreError::Backend("password authentication failed".into()).into();
        assert_eq!(err, CoreError::Internal("internal storage error".into()));
    }

    #[test]
    fn transaction_errors_are_internal() {
        let err: CoreError = TransactionError::Commit(StoreError::Backend("gone".into())).into();
        assert!(err.is_internal());
    }
}
