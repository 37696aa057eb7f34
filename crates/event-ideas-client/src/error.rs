// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Client-side failures.

use event_ideas_core::dto::Detail;
use thiserror::Error;

/// Failure talking to the API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure or undecodable success body.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("{detail} ({status})")]
    Api {
        /// HTTP status code.
        status: u16,
        /// `detail` from the body, or the raw body when it has none.
        detail: String
    }
}

impl ClientError {
    /// Build from a non-2xx status and its body.
    pub fn from_body(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<Detail>(body)
            .map(|d| d.detail)
            .unwrap_or_else(|_| body.trim().to_owned());
        Self::Api {
            status,
            detail
        }
    }

    /// The API status code, if the server answered.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api {
                status, ..
            } => Some(*status),
            Self::Http(_) => None
        }
    }

    /// Check if this is a `409 Conflict` (duplicate idea or vote).
    pub const fn is_conflict(&self) -> bool {
        matches!(self.status(), Some(409))
    }

    /// Check if this is a `404 Not Found`.
    pub const fn is_not_found(&self) -> bool {
        matches!(self.status(), Some(404))
    }

    /// Check if this is a `400`/`422` input rejection.
    pub const fn is_invalid_input(&self) -> bool {
        matches!(self.status(), Some(400 | 422))
    }
}
