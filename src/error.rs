// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! HTTP error mapping and startup failures.
//!
//! Every error response carries `{"detail": "<message>"}`.
//!
//! | Source | Status |
//! |--------|--------|
//! | [`CoreError::InvalidInput`] | `400 Bad Request` |
//! | [`CoreError::NotFound`] | `404 Not Found` |
//! | [`CoreError::Conflict`] | `409 Conflict` |
//! | [`CoreError::Internal`] | `500 Internal Server Error` |
//! | Malformed path, query or body | status chosen by the extractor |

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response}
};
use event_ideas_core::{CoreError, StoreError, dto::Detail};
use thiserror::Error;
use tracing::error;

use crate::config::ConfigError;

/// Error returned by every handler.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Failure reported by the service.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Request could not be decoded.
    #[error("{detail}")]
    Rejected {
        /// Status chosen by the extractor.
        status: StatusCode,
        /// Extractor message.
        detail: String
    }
}

impl ApiError {
    /// HTTP status for this error.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Core(CoreError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            Self::Core(CoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Core(CoreError::Conflict(_)) => StatusCode::CONFLICT,
            Self::Core(CoreError::Internal(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Rejected {
                status, ..
            } => *status
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(%status, detail = %self, "request failed");
        }
        (status, Json(Detail::new(self.to_string()))).into_response()
    }
}

macro_rules! rejection {
    ($($rejection:ty),+) => {$(
        impl From<$rejection> for ApiError {
            fn from(rejection: $rejection) -> Self {
                Self::Rejected {
                    status: rejection.status(),
                    detail: rejection.body_text()
                }
            }
        }
    )+};
}

rejection!(JsonRejection, PathRejection, QueryRejection);

/// Failure before the server starts accepting requests.
#[derive(Debug, Error)]
pub enum StartupError {
    /// Bad environment.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Storage setup (connection or migrations) failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// `STORAGE=postgres` in a build without the `postgres` feature.
    #[error("postgres storage requested but the `postgres` feature is disabled")]
    PostgresDisabled,

    /// Binding or serving failed.
    #[error("server i/o error: {0}")]
    Io(#[from] std::io::Error)
}
