// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! PostgreSQL store over `sqlx::PgPool`.
//!
//! Statements are plain parameterized SQL decoded into `FromRow` row types,
//! which map one-to-one onto the domain types. Constraint names in the
//! embedded migration match [`constraint`](crate::repository::constraint),
//! so driver errors translate into the same [`StoreError`] variants the
//! in-memory store produces.
//!
//! | Method | SQL |
//! |--------|-----|
//! | `insert_*` | `INSERT ... RETURNING *` |
//! | `find_*` | `SELECT ... WHERE id = $1` |
//! | `rename_*` | `UPDATE ... SET ... WHERE id = $n RETURNING *` |
//! | `delete_*` | `DELETE ... WHERE id = $1` |

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres};

use crate::{
    error::StoreError,
    model::{Event, Participant, RegisteredEvent},
    repository::{EventQueries, ParticipantQueries, RegisteredEventQueries},
    transaction::{TransactionOps, Transactional}
};

#[derive(Debug, sqlx::FromRow)]
struct EventRow {
    id:         i64,
    name:       String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Self {
            id:         row.id,
            name:       row.name,
            created_at: row.created_at,
            updated_at: row.updated_at
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct RegisteredEventRow {
    id:         i64,
    event_id:   i64,
    event_name: String,
    created_by: String,
    created_at: DateTime<Utc>
}

impl From<RegisteredEventRow> for RegisteredEvent {
    fn from(row: RegisteredEventRow) -> Self {
        Self {
            id:         row.id,
            event_id:   row.event_id,
            name:       row.event_name,
            created_by: row.created_by,
            created_at: row.created_at
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ParticipantRow {
    id:               i64,
    event_id:         i64,
    participant_name: String,
    registered_at:    DateTime<Utc>
}

impl From<ParticipantRow> for Participant {
    fn from(row: ParticipantRow) -> Self {
        Self {
            id:               row.id,
            event_id:         row.event_id,
            participant_name: row.participant_name,
            registered_at:    row.registered_at
        }
    }
}

/// Store backed by a PostgreSQL connection pool.
///
/// Cloning shares the pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool
}

impl PgStore {
    /// Wrap an existing pool.
    pub const fn new(pool: PgPool) -> Self {
        Self {
            pool
        }
    }

    /// Get reference to the underlying pool.
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply the embedded migrations.
    ///
    /// # Errors
    ///
    /// [`StoreError::Backend`] when a migration fails.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

/// Open transaction on a [`PgStore`].
#[derive(Debug)]
pub struct PgTx {
    tx: sqlx::Transaction<'static, Postgres>
}

#[async_trait]
impl Transactional for PgStore {
    type Tx = PgTx;

    async fn begin(&self) -> Result<PgTx, StoreError> {
        let tx = self.pool.begin().await?;
        Ok(PgTx {
            tx
        })
    }
}

#[async_trait]
impl TransactionOps for PgTx {
    async fn commit(self) -> Result<(), StoreError> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self) -> Result<(), StoreError> {
        self.tx.rollback().await?;
        Ok(())
    }
}

#[async_trait]
impl EventQueries for PgTx {
    async fn insert_event(&mut self, name: &str) -> Result<Event, StoreError> {
        let row: EventRow = sqlx::query_as(
            "INSERT INTO events (name) VALUES ($1) \
             RETURNING id, name, created_at, updated_at"
        )
        .bind(name)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(row.into())
    }

    async fn find_event(&mut self, id: i64) -> Result<Option<Event>, StoreError> {
        let row: Option<EventRow> =
            sqlx::query_as("SELECT id, name, created_at, updated_at FROM events WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut *self.tx)
                .await?;
        Ok(row.map(Event::from))
    }

    async fn list_events(&mut self) -> Result<Vec<Event>, StoreError> {
        let rows: Vec<EventRow> =
            sqlx::query_as("SELECT id, name, created_at, updated_at FROM events ORDER BY id")
                .fetch_all(&mut *self.tx)
                .await?;
        Ok(rows.into_iter().map(Event::from).collect())
    }

    async fn rename_event(&mut self, id: i64, name: &str) -> Result<Option<Event>, StoreError> {
        let row: Option<EventRow> = sqlx::query_as(
            "UPDATE events SET name = $1, updated_at = now() WHERE id = $2 \
             RETURNING id, name, created_at, updated_at"
        )
        .bind(name)
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;
        Ok(row.map(Event::from))
    }

    async fn delete_event(&mut self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl RegisteredEventQueries for PgTx {
    async fn insert_registered_event(
        &mut self,
        event_id: i64,
        name: &str,
        created_by: &str
    ) -> Result<RegisteredEvent, StoreError> {
        let row: RegisteredEventRow = sqlx::query_as(
            "INSERT INTO registered_events (event_id, event_name, created_by) \
             VALUES ($1, $2, $3) \
             RETURNING id, event_id, event_name, created_by, created_at"
        )
        .bind(event_id)
        .bind(name)
        .bind(created_by)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(row.into())
    }

    async fn find_registered_event(
        &mut self,
        id: i64
    ) -> Result<Option<RegisteredEvent>, StoreError> {
        let row: Option<RegisteredEventRow> = sqlx::query_as(
            "SELECT id, event_id, event_name, created_by, created_at \
             FROM registered_events WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;
        Ok(row.map(RegisteredEvent::from))
    }

    async fn find_registered_event_for(
        &mut self,
        event_id: i64
    ) -> Result<Option<RegisteredEvent>, StoreError> {
        let row: Option<RegisteredEventRow> = sqlx::query_as(
            "SELECT id, event_id, event_name, created_by, created_at \
             FROM registered_events WHERE event_id = $1"
        )
        .bind(event_id)
        .fetch_optional(&mut *self.tx)
        .await?;
        Ok(row.map(RegisteredEvent::from))
    }

    async fn list_registered_events(&mut self) -> Result<Vec<RegisteredEvent>, StoreError> {
        let rows: Vec<RegisteredEventRow> = sqlx::query_as(
            "SELECT id, event_id, event_name, created_by, created_at \
             FROM registered_events ORDER BY event_name COLLATE \"C\", id"
        )
        .fetch_all(&mut *self.tx)
        .await?;
        Ok(rows.into_iter().map(RegisteredEvent::from).collect())
    }

    async fn delete_registered_event(&mut self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM registered_events WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ParticipantQueries for PgTx {
    async fn insert_participant(
        &mut self,
        event_id: i64,
        name: &str
    ) -> Result<Participant, StoreError> {
        let row: ParticipantRow = sqlx::query_as(
            "INSERT INTO event_participants (event_id, participant_name) VALUES ($1, $2) \
             RETURNING id, event_id, participant_name, registered_at"
        )
        .bind(event_id)
        .bind(name)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(row.into())
    }

    async fn find_participant(&mut self, id: i64) -> Result<Option<Participant>, StoreError> {
        let row: Option<ParticipantRow> = sqlx::query_as(
            "SELECT id, event_id, participant_name, registered_at \
             FROM event_participants WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;
        Ok(row.map(Participant::from))
    }

    async fn list_participants(&mut self, event_id: i64) -> Result<Vec<Participant>, StoreError> {
        let rows: Vec<ParticipantRow> = sqlx::query_as(
            "SELECT id, event_id, participant_name, registered_at \
             FROM event_participants WHERE event_id = $1 ORDER BY id"
        )
        .bind(event_id)
        .fetch_all(&mut *self.tx)
        .await?;
        Ok(rows.into_iter().map(Participant::from).collect())
    }

    async fn rename_participant(
        &mut self,
        id: i64,
        name: &str
    ) -> Result<Option<Participant>, StoreError> {
        let row: Option<ParticipantRow> = sqlx::query_as(
            "UPDATE event_participants SET participant_name = $1 WHERE id = $2 \
             RETURNING id, event_id, participant_name, registered_at"
        )
        .bind(name)
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;
        Ok(row.map(Participant::from))
    }

    async fn delete_participant(&mut self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM event_participants WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn unique_participant_names(&mut self) -> Result<Vec<String>, StoreError> {
        let names: Vec<String> = sqlx::query_scalar(
            "SELECT participant_name FROM event_participants \
             WHERE participant_name <> '' \
             GROUP BY participant_name \
             ORDER BY participant_name COLLATE \"C\""
        )
        .fetch_all(&mut *self.tx)
        .await?;
        Ok(names)
    }
}
