// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! PostgreSQL bootstrap: connect with retries, then migrate.

use event_ideas_core::{PgStore, StoreError};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use tracing::{info, warn};

use crate::config::{DatabaseConfig, DatabaseTarget};

fn connect_options(target: &DatabaseTarget) -> Result<PgConnectOptions, StoreError> {
    match target {
        DatabaseTarget::Url(url) => url.parse().map_err(|err: sqlx::Error| {
            StoreError::Backend(format!("invalid DATABASE_URL: {err}"))
        }),
        DatabaseTarget::Parts {
            host,
            port,
            user,
            password,
            name
        } => {
            let options = PgConnectOptions::new()
                .host(host)
                .port(*port)
                .username(user)
                .database(name);
            Ok(match password {
                Some(password) => options.password(password),
                None => options
            })
        }
    }
}

/// Open a pool, retrying while the server is not yet accepting
/// connections, and apply migrations.
///
/// # Errors
///
/// [`StoreError::Backend`] once every attempt failed, or when a migration
/// fails.
pub async fn connect(config: &DatabaseConfig) -> Result<PgStore, StoreError> {
    let options = connect_options(&config.target)?;
    let mut attempt = 1;
    let pool = loop {
        let result = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options.clone())
            .await;
        match result {
            Ok(pool) => break pool,
            Err(err) if attempt < config.connect_retries => {
                warn!(
                    attempt,
                    retries = config.connect_retries,
                    error = %err,
                    "database unavailable, retrying"
                );
                tokio::time::sleep(config.retry_delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err.into())
        }
    };
    info!(attempt, max_connections = config.max_connections, "connected to database");

    let store = PgStore::new(pool);
    store.migrate().await?;
    info!("migrations applied");
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_target_parses() {
        let options =
            connect_options(&DatabaseTarget::Url("postgres://u:p@db:6543/ideas".into())).unwrap();
        assert_eq!(options.get_host(), "db");
        assert_eq!(options.get_port(), 6543);
        assert_eq!(options.get_database(), Some("ideas"));
    }

    #[test]
    fn parts_target_builds_options() {
        let options = connect_options(&DatabaseTarget::Parts {
            host:     "db".into(),
            port:     5432,
            user:     "ideas".into(),
            password: None,
            name:     "ideas".into()
        })
        .unwrap();
        assert_eq!(options.get_username(), "ideas");
        assert_eq!(options.get_database(), Some("ideas"));
    }

    #[test]
    fn malformed_url_is_backend_error() {
        let err = connect_options(&DatabaseTarget::Url("not a url".into())).unwrap_err();
        assert!(matches!(err, StoreError::Backend(ref m) if m.contains("DATABASE_URL")));
    }
}
