// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! # event-ideas
//!
//! REST API for proposing ideas for team events and voting on them.
//!
//! The HTTP layer is thin: handlers decode the request, call
//! [`IdeaService`], and map [`CoreError`](event_ideas_core::CoreError) to a
//! status code with a `{"detail": ...}` body. All consistency rules live in
//! `event-ideas-core`.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use event_ideas::{app, config::Config, run};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), event_ideas::error::StartupError> {
//!     run(Config::load()?).await
//! }
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Environment configuration |
//! | [`error`] | `ApiError` → HTTP response, startup failures |
//! | [`extract`] | Extractors rejecting with `ApiError` |
//! | [`routes`] | Handlers and router |
//! | [`openapi`] | OpenAPI document |

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod extract;
pub mod openapi;
pub mod routes;
#[cfg(feature = "postgres")]
pub mod storage;

use std::{future::Future, sync::Arc};

use axum::Router;
use event_ideas_core::{IdeaService, MemoryStore, Store};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    config::{Config, StorageKind},
    error::StartupError,
    openapi::ApiDoc
};

/// Complete application: API routes, Swagger UI and HTTP layers.
pub fn app<S>(service: IdeaService<S>) -> Router
where
    S: Store
{
    Router::new()
        .merge(routes::router::<S>())
        .with_state(Arc::new(service))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Serve `service` on `listener` until `shutdown` resolves.
///
/// # Errors
///
/// I/O failure of the listener.
pub async fn serve<S, F>(
    listener: TcpListener,
    service: IdeaService<S>,
    shutdown: F
) -> Result<(), StartupError>
where
    S: Store,
    F: Future<Output = ()> + Send + 'static
{
    let addr = listener.local_addr()?;
    info!(%addr, "listening");
    info!("swagger ui at http://{addr}/swagger-ui");
    axum::serve(listener, app(service))
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("server stopped");
    Ok(())
}

/// Build the configured store and serve until Ctrl+C or SIGTERM.
///
/// # Errors
///
/// [`StartupError`] when the store cannot be prepared or the address
/// cannot be bound.
pub async fn run(config: Config) -> Result<(), StartupError> {
    let listener = TcpListener::bind(config.bind_addr).await?;
    match config.storage {
        StorageKind::Memory => {
            info!("using in-memory storage; data is lost on exit");
            serve(listener, IdeaService::new(MemoryStore::new()), shutdown_signal()).await
        }
        StorageKind::Postgres => run_postgres(listener, &config).await
    }
}

#[cfg(feature = "postgres")]
async fn run_postgres(listener: TcpListener, config: &Config) -> Result<(), StartupError> {
    let database = config
        .database
        .as_ref()
        .ok_or(config::ConfigError::Missing("DATABASE_URL or DB_HOST"))?;
    let store = storage::connect(database).await?;
    serve(listener, IdeaService::new(store), shutdown_signal()).await
}

#[cfg(not(feature = "postgres"))]
async fn run_postgres(_listener: TcpListener, _config: &Config) -> Result<(), StartupError> {
    Err(StartupError::PostgresDisabled)
}

/// Resolves on Ctrl+C, or SIGTERM on Unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "failed to listen for ctrl+c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {}
    }
    info!("shutdown signal received");
}
