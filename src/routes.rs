// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! HTTP handlers and the router that mounts them.
//!
//! Handlers are generic over the store so the same router serves
//! PostgreSQL in production and the in-memory store in tests.
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | GET, POST | `/events/` | [`events::list_events`], [`events::create_event`] |
//! | GET, PUT, DELETE | `/events/{event_id}` | [`events::get_event`], [`events::update_event`], [`events::delete_event`] |
//! | GET, POST | `/events/{event_id}/participants` | [`participants::list_participants`], [`participants::register_participant`] |
//! | GET, PUT, DELETE | `/events/participants/{registration_id}` | [`participants::get_participant`], ... |
//! | GET | `/events/participants/unique` | [`participants::list_unique_participants`] |
//! | GET, POST | `/events/registered/` | [`registered::list_registered_events`], [`registered::register_event_creation`] |
//! | GET, DELETE | `/events/registered/{id}` | [`registered::get_registered_event`], [`registered::delete_registered_event`] |
//! | POST | `/events/ideas` | [`ideas::propose_idea`] |
//! | POST | `/events/votes` | [`ideas::cast_votes`] |
//! | GET | `/health` | [`health`] |

pub mod events;
pub mod ideas;
pub mod participants;
pub mod registered;

use std::sync::Arc;

use axum::{
    Json, Router,
    routing::{get, post}
};
use event_ideas_core::{IdeaService, Store};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Shared handler state.
pub type AppState<S> = Arc<IdeaService<S>>;

/// Liveness probe body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Health {
    /// Always `"ok"`.
    pub status: String
}

/// Report that the process is serving requests.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, description = "Service is up", body = Health))
)]
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok".into()
    })
}

/// Router with every endpoint, expecting [`AppState`].
///
/// Collection paths answer with and without the trailing slash.
///
/// # Usage
///
/// ```rust,ignore
/// let service = Arc::new(IdeaService::new(MemoryStore::new()));
/// let app = Router::new()
///     .merge(router::<MemoryStore>())
///     .with_state(service);
/// ```
pub fn router<S>() -> Router<AppState<S>>
where
    S: Store
{
    Router::new()
        .route("/health", get(health))
        .route(
            "/events/",
            get(events::list_events::<S>).post(events::create_event::<S>)
        )
        .route(
            "/events",
            get(events::list_events::<S>).post(events::create_event::<S>)
        )
        .route("/events/ideas", post(ideas::propose_idea::<S>))
        .route("/events/votes", post(ideas::cast_votes::<S>))
        .route(
            "/events/participants/unique",
            get(participants::list_unique_participants::<S>)
        )
        .route(
            "/events/participants/{registration_id}",
            get(participants::get_participant::<S>)
                .put(participants::update_participant::<S>)
                .delete(participants::delete_participant::<S>)
        )
        .route(
            "/events/registered/",
            get(registered::list_registered_events::<S>)
                .post(registered::register_event_creation::<S>)
        )
        .route(
            "/events/registered",
            get(registered::list_registered_events::<S>)
                .post(registered::register_event_creation::<S>)
        )
        .route(
            "/events/registered/{id}",
            get(registered::get_registered_event::<S>)
                .delete(registered::delete_registered_event::<S>)
        )
        .route(
            "/events/{event_id}",
            get(events::get_event::<S>)
                .put(events::update_event::<S>)
                .delete(events::delete_event::<S>)
        )
        .route(
            "/events/{event_id}/participants",
            get(participants::list_participants::<S>)
                .post(participants::register_participant::<S>)
        )
}
