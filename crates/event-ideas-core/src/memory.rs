// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! In-process store with the same constraints as the Postgres schema.
//!
//! A transaction takes the table lock for its whole lifetime and works on a
//! copy; commit swaps the copy in, rollback or drop discards it. Transactions
//! are therefore fully serialized, which is what the unique indexes need.

use std::{
    collections::{BTreeMap, BTreeSet},
    sync::Arc
};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::{
    error::StoreError,
    model::{Event, Participant, RegisteredEvent},
    repository::{EventQueries, ParticipantQueries, RegisteredEventQueries, constraint},
    transaction::{TransactionOps, Transactional}
};

#[derive(Debug, Clone, Default)]
struct Tables {
    events:          BTreeMap<i64, Event>,
    registered:      BTreeMap<i64, RegisteredEvent>,
    participants:    BTreeMap<i64, Participant>,
    event_seq:       i64,
    registered_seq:  i64,
    participant_seq: i64
}

impl Tables {
    fn next(seq: &mut i64) -> i64 {
        *seq += 1;
        *seq
    }

    fn require_event(&self, event_id: i64, fk: &str) -> Result<(), StoreError> {
        if self.events.contains_key(&event_id) {
            Ok(())
        } else {
            Err(StoreError::foreign_key(fk))
        }
    }
}

/// Store keeping all rows in memory.
///
/// Cloning shares the tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Open transaction on a [`MemoryStore`].
#[derive(Debug)]
pub struct MemoryTx {
    guard: OwnedMutexGuard<Tables>,
    work:  Tables
}

#[async_trait]
impl Transactional for MemoryStore {
    type Tx = MemoryTx;

    async fn begin(&self) -> Result<MemoryTx, StoreError> {
        let guard = Arc::clone(&self.tables).lock_owned().await;
        let work = guard.clone();
        Ok(MemoryTx {
            guard,
            work
        })
    }
}

#[async_trait]
impl TransactionOps for MemoryTx {
    async fn commit(self) -> Result<(), StoreError> {
        let Self {
            mut guard,
            work
        } = self;
        *guard = work;
        Ok(())
    }

    async fn rollback(self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[async_trait]
impl EventQueries for MemoryTx {
    async fn insert_event(&mut self, name: &str) -> Result<Event, StoreError> {
        let t = &mut self.work;
        if t.events.values().any(|e| e.name == name) {
            return Err(StoreError::unique(constraint::EVENT_NAME));
        }
        let now = Utc::now();
        let event = Event {
            id:         Tables::next(&mut t.event_seq),
            name:       name.to_owned(),
            created_at: now,
            updated_at: now
        };
        t.events.insert(event.id, event.clone());
        Ok(event)
    }

    async fn find_event(&mut self, id: i64) -> Result<Option<Event>, StoreError> {
        Ok(self.work.events.get(&id).cloned())
    }

    async fn list_events(&mut self) -> Result<Vec<Event>, StoreError> {
        Ok(self.work.events.values().cloned().collect())
    }

    async fn rename_event(&mut self, id: i64, name: &str) -> Result<Option<Event>, StoreError> {
        let t = &mut self.work;
        if t.events.values().any(|e| e.id != id && e.name == name) {
            return Err(StoreError::unique(constraint::EVENT_NAME));
        }
        Ok(t.events.get_mut(&id).map(|event| {
            event.name = name.to_owned();
            event.updated_at = Utc::now();
            event.clone()
        }))
    }

    async fn delete_event(&mut self, id: i64) -> Result<bool, StoreError> {
        let t = &mut self.work;
        if t.events.remove(&id).is_none() {
            return Ok(false);
        }
        // ON DELETE CASCADE
        t.registered.retain(|_, r| r.event_id != id);
        t.participants.retain(|_, p| p.event_id != id);
        Ok(true)
    }
}

#[async_trait]
impl RegisteredEventQueries for MemoryTx {
    async fn insert_registered_event(
        &mut self,
        event_id: i64,
        name: &str,
        created_by: &str
    ) -> Result<RegisteredEvent, StoreError> {
        let t = &mut self.work;
        t.require_event(event_id, constraint::REGISTERED_EVENT_FK)?;
        if t.registered.values().any(|r| r.event_id == event_id) {
            return Err(StoreError::unique(constraint::REGISTERED_EVENT));
        }
        let registered = RegisteredEvent {
            id: Tables::next(&mut t.registered_seq),
            event_id,
            name: name.to_owned(),
            created_by: created_by.to_owned(),
            created_at: Utc::now()
        };
        t.registered.insert(registered.id, registered.clone());
        Ok(registered)
    }

    async fn find_registered_event(
        &mut self,
        id: i64
    ) -> Result<Option<RegisteredEvent>, StoreError> {
        Ok(self.work.registered.get(&id).cloned())
    }

    async fn find_registered_event_for(
        &mut self,
        event_id: i64
    ) -> Result<Option<RegisteredEvent>, StoreError> {
        Ok(self
            .work
            .registered
            .values()
            .find(|r| r.event_id == event_id)
            .cloned())
    }

    async fn list_registered_events(&mut self) -> Result<Vec<RegisteredEvent>, StoreError> {
        let mut rows: Vec<RegisteredEvent> = self.work.registered.values().cloned().collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(rows)
    }

    async fn delete_registered_event(&mut self, id: i64) -> Result<bool, StoreError> {
        Ok(self.work.registered.remove(&id).is_some())
    }
}

#[async_trait]
impl ParticipantQueries for MemoryTx {
    async fn insert_participant(
        &mut self,
        event_id: i64,
        name: &str
    ) -> Result<Participant, StoreError> {
        let t = &mut self.work;
        t.require_event(event_id, constraint::PARTICIPANT_EVENT_FK)?;
        if t
            .participants
            .values()
            .any(|p| p.event_id == event_id && p.participant_name == name)
        {
            return Err(StoreError::unique(constraint::EVENT_PARTICIPANT));
        }
        let participant = Participant {
            id: Tables::next(&mut t.participant_seq),
            event_id,
            participant_name: name.to_owned(),
            registered_at: Utc::now()
        };
        t.participants.insert(participant.id, participant.clone());
        Ok(participant)
    }

    async fn find_participant(&mut self, id: i64) -> Result<Option<Participant>, StoreError> {
        Ok(self.work.participants.get(&id).cloned())
    }

    async fn list_participants(&mut self, event_id: i64) -> Result<Vec<Participant>, StoreError> {
        Ok(self
            .work
            .participants
            .values()
            .filter(|p| p.event_id == event_id)
            .cloned()
            .collect())
    }

    async fn rename_participant(
        &mut self,
        id: i64,
        name: &str
    ) -> Result<Option<Participant>, StoreError> {
        let t = &mut self.work;
        let Some(event_id) = t.participants.get(&id).map(|p| p.event_id) else {
            return Ok(None);
        };
        if t
            .participants
            .values()
            .any(|p| p.id != id && p.event_id == event_id && p.participant_name == name)
        {
            return Err(StoreError::unique(constraint::EVENT_PARTICIPANT));
        }
        Ok(t.participants.get_mut(&id).map(|p| {
            p.participant_name = name.to_owned();
            p.clone()
        }))
    }

    async fn delete_participant(&mut self, id: i64) -> Result<bool, StoreError> {
        Ok(self.work.participants.remove(&id).is_some())
    }

    async fn unique_participant_names(&mut self) -> Result<Vec<String>, StoreError> {
        let names: BTreeSet<&str> = self
            .work
            .participants
            .values()
            .map(|p| p.participant_name.as_str())
            .filter(|name| !name.is_empty())
            .collect();
        Ok(names.into_iter().map(str::to_owned).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn uncommitted_writes_are_discarded() {
        let store = MemoryStore::new();

        let mut tx = store.begin().await.unwrap();
        tx.insert_event("Boliche").await.unwrap();
        drop(tx);

        let mut tx = store.begin().await.unwrap();
        assert!(tx.list_events().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn committed_writes_are_visible() {
        let store = MemoryStore::new();

        let mut tx = store.begin().await.unwrap();
        let event = tx.insert_event("Boliche").await.unwrap();
        tx.commit().await.unwrap();

        let mut tx = store.begin().await.unwrap();
        assert_eq!(tx.find_event(event.id).await.unwrap(), Some(event));
    }

    #[tokio::test]
    async fn rollback_discards_writes() {
        let store = MemoryStore::new();

        let mut tx = store.begin().await.unwrap();
        tx.insert_event("Karaoke").await.unwrap();
        tx.rollback().await.unwrap();

        let mut tx = store.begin().await.unwrap();
        assert!(tx.list_events().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn event_name_is_unique() {
        let store = MemoryStore::new();
        let mut tx = store.begin().await.unwrap();
        tx.insert_event("Boliche").await.unwrap();

        let err = tx.insert_event("Boliche").await.unwrap_err();
        assert_eq!(err, StoreError::unique(constraint::EVENT_NAME));
        // case-sensitive
        assert!(tx.insert_event("boliche").await.is_ok());
    }

    #[tokio::test]
    async fn rename_to_taken_name_violates_index() {
        let store = MemoryStore::new();
        let mut tx = store.begin().await.unwrap();
        tx.insert_event("Boliche").await.unwrap();
        let karaoke = tx.insert_event("Karaoke").await.unwrap();

        let err = tx.rename_event(karaoke.id, "Boliche").await.unwrap_err();
        assert!(err.is_unique_violation());
        // renaming to its own name is fine
        assert!(tx.rename_event(karaoke.id, "Karaoke").await.unwrap().is_some());
        assert!(tx.rename_event(99, "Cinema").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn votes_require_existing_event() {
        let store = MemoryStore::new();
        let mut tx = store.begin().await.unwrap();

        let err = tx.insert_participant(5, "Ana").await.unwrap_err();
        assert_eq!(err, StoreError::foreign_key(constraint::PARTICIPANT_EVENT_FK));

        let err = tx.insert_registered_event(5, "X", "Ana").await.unwrap_err();
        assert_eq!(err, StoreError::foreign_key(constraint::REGISTERED_EVENT_FK));
    }

    #[tokio::test]
    async fn one_publication_per_event() {
        let store = MemoryStore::new();
        let mut tx = store.begin().await.unwrap();
        let event = tx.insert_event("Boliche").await.unwrap();

        tx.insert_registered_event(event.id, "Boliche", "Bea").await.unwrap();
        let err = tx
            .insert_registered_event(event.id, "Boliche", "Ana")
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::unique(constraint::REGISTERED_EVENT));
    }

    #[tokio::test]
    async fn deleting_event_cascades() {
        let store = MemoryStore::new();
        let mut tx = store.begin().await.unwrap();
        let event = tx.insert_event("Boliche").await.unwrap();
        let other = tx.insert_event("Karaoke").await.unwrap();
        let registered = tx.insert_registered_event(event.id, "Boliche", "Bea").await.unwrap();
        let vote = tx.insert_participant(event.id, "Bea").await.unwrap();
        let kept = tx.insert_participant(other.id, "Bea").await.unwrap();

        assert!(tx.delete_event(event.id).await.unwrap());
        assert!(!tx.delete_event(event.id).await.unwrap());

        assert!(tx.find_registered_event(registered.id).await.unwrap().is_none());
        assert!(tx.find_participant(vote.id).await.unwrap().is_none());
        assert_eq!(tx.find_participant(kept.id).await.unwrap(), Some(kept));
    }

    #[tokio::test]
    async fn unique_names_are_distinct_and_byte_ordered() {
        let store = MemoryStore::new();
        let mut tx = store.begin().await.unwrap();
        let a = tx.insert_event("A").await.unwrap();
        let b = tx.insert_event("B").await.unwrap();
        for (event, name) in [(a.id, "ana"), (a.id, "Ana"), (b.id, "Ana"), (b.id, "BEA")] {
            tx.insert_participant(event, name).await.unwrap();
        }

        let names = tx.unique_participant_names().await.unwrap();
        assert_eq!(names, vec!["Ana", "BEA", "ana"]);
    }

    #[tokio::test]
    async fn ids_increase_per_table() {
        let store = MemoryStore::new();
        let mut tx = store.begin().await.unwrap();
        let first = tx.insert_event("A").await.unwrap();
        let second = tx.insert_event("B").await.unwrap();
        let vote = tx.insert_participant(first.id, "Ana").await.unwrap();

        assert_eq!((first.id, second.id), (1, 2));
        assert_eq!(vote.id, 1);
    }
}
