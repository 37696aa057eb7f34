// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Runtime configuration from the environment.
//!
//! An optional `.env` file is loaded first with `dotenvy`; real environment
//! variables take precedence over it.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `BIND_ADDR` | `0.0.0.0:8000` | Listen address |
//! | `STORAGE` | `postgres` | `postgres` or `memory` |
//! | `DATABASE_URL` | | Full connection URL, wins over `DB_*` |
//! | `DB_HOST` / `DB_PORT` | `5432` | Server |
//! | `DB_USER` / `DB_PASSWORD` | | Credentials |
//! | `DB_NAME` | | Database |
//! | `DB_MAX_CONNECTIONS` | `5` | Pool size |
//! | `DB_CONNECT_RETRIES` | `5` | Connection attempts at startup |
//! | `DB_RETRY_DELAY_MS` | `1000` | Pause between attempts |

use std::{fmt, net::SocketAddr, str::FromStr, time::Duration};

use thiserror::Error;

/// Invalid or missing configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset.
    #[error("missing configuration: {0}")]
    Missing(&'static str),

    /// A variable is set to something unusable.
    #[error("invalid {key}={value:?}: {reason}")]
    Invalid {
        /// Variable name.
        key:    &'static str,
        /// Raw value.
        value:  String,
        /// Why it was rejected.
        reason: String
    }
}

/// Backend the service is built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageKind {
    /// PostgreSQL through `sqlx`.
    #[default]
    Postgres,

    /// Process-local tables, lost on exit.
    Memory
}

impl FromStr for StorageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "memory" | "mem" => Ok(Self::Memory),
            other => Err(format!("expected 'postgres' or 'memory', got '{other}'"))
        }
    }
}

/// Where to find the database.
#[derive(Clone, PartialEq, Eq)]
pub enum DatabaseTarget {
    /// `DATABASE_URL`.
    Url(String),

    /// Assembled from `DB_*` variables.
    Parts {
        /// Server host.
        host:     String,
        /// Server port.
        port:     u16,
        /// Role name.
        user:     String,
        /// Role password, if any.
        password: Option<String>,
        /// Database name.
        name:     String
    }
}

impl fmt::Debug for DatabaseTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(_) => f.write_str("Url(<redacted>)"),
            Self::Parts {
                host,
                port,
                user,
                password,
                name
            } => f
                .debug_struct("Parts")
                .field("host", host)
                .field("port", port)
                .field("user", user)
                .field("password", &password.as_ref().map(|_| "<redacted>"))
                .field("name", name)
                .finish()
        }
    }
}

/// Connection pool settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Server location and credentials.
    pub target:          DatabaseTarget,
    /// Upper bound on pooled connections.
    pub max_connections: u32,
    /// Connection attempts before giving up.
    pub connect_retries: u32,
    /// Pause between attempts.
    pub retry_delay:     Duration
}

/// Everything the binary needs to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Listen address.
    pub bind_addr: SocketAddr,
    /// Selected backend.
    pub storage:   StorageKind,
    /// Present when `storage` is [`StorageKind::Postgres`].
    pub database:  Option<DatabaseConfig>
}

impl Config {
    /// Read `.env` (if present) and the process environment.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] for missing or malformed variables.
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env is normal.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    ///
    /// Empty values count as unset.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] for missing or malformed variables.
    ///
    /// # Example
    ///
    /// ```rust
    /// use event_ideas::config::{Config, StorageKind};
    ///
    /// let config = Config::from_lookup(|key| match key {
    ///     "STORAGE" => Some("memory".into()),
    ///     _ => None
    /// })
    /// .unwrap();
    /// assert_eq!(config.storage, StorageKind::Memory);
    /// assert!(config.database.is_none());
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = parse(&get, "BIND_ADDR")?.unwrap_or_else(default_bind_addr);
        let storage = parse(&get, "STORAGE")?.unwrap_or_default();
        let database = match storage {
            StorageKind::Memory => None,
            StorageKind::Postgres => Some(DatabaseConfig {
                target:          database_target(&get)?,
                max_connections: parse(&get, "DB_MAX_CONNECTIONS")?.unwrap_or(5),
                connect_retries: parse(&get, "DB_CONNECT_RETRIES")?.unwrap_or(5).max(1),
                retry_delay:     Duration::from_millis(
                    parse(&get, "DB_RETRY_DELAY_MS")?.unwrap_or(1000)
                )
            })
        };

        Ok(Self {
            bind_addr,
            storage,
            database
        })
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8000))
}

fn parse<T, G>(get: &G, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
    G: Fn(&str) -> Option<String>
{
    get(key)
        .map(|value| {
            value.trim().parse().map_err(|err: T::Err| ConfigError::Invalid {
                key,
                reason: err.to_string(),
                value
            })
        })
        .transpose()
}

fn database_target<G>(get: &G) -> Result<DatabaseTarget, ConfigError>
where
    G: Fn(&str) -> Option<String>
{
    if let Some(url) = get("DATABASE_URL") {
        return Ok(DatabaseTarget::Url(url));
    }
    Ok(DatabaseTarget::Parts {
        host:     get("DB_HOST").ok_or(ConfigError::Missing("DATABASE_URL or DB_HOST"))?,
        port:     parse(get, "DB_PORT")?.unwrap_or(5432),
        user:     get("DB_USER").ok_or(ConfigError::Missing("DB_USER"))?,
        password: get("DB_PASSWORD"),
        name:     get("DB_NAME").ok_or(ConfigError::Missing("DB_NAME"))?
    })
}
