// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Operations over events, their publications and votes.
//!
//! [`IdeaService`] is the only place the consistency rules live:
//!
//! - names are trimmed and validated before any storage access;
//! - every operation runs inside one [`Transaction`], so an existence
//!   check and the write that follows it see the same state;
//! - uniqueness is left to the store's indexes, and a violation becomes
//!   [`CoreError::Conflict`] with a message naming the duplicate;
//! - [`IdeaService::propose_and_vote`] writes the event, its publication and
//!   the proposer's vote in a single transaction, so no event is ever left
//!   unpublished.
//!
//! # Example
//!
//! ```rust
//! use event_ideas_core::{CoreError, IdeaService, MemoryStore};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), CoreError> {
//! let service = IdeaService::new(MemoryStore::new());
//!
//! let proposal = service.propose_and_vote("Karaoke", "Bea").await?;
//! assert_eq!(proposal.registered.created_by, "Bea");
//!
//! let again = service.register_participant(proposal.event.id, " Bea ").await;
//! assert!(again.is_err_and(|e| e.is_conflict()));
//! # Ok(())
//! # }
//! ```

use std::collections::HashSet;

use tracing::{debug, error, info, warn};

use crate::{
    error::{CoreError, StoreError},
    model::{
        Event, Participant, Proposal, ProposalReport, RegisteredEvent, VoteReport, VoteResult,
        VoteStatus
    },
    repository::{EventQueries, ParticipantQueries, RegisteredEventQueries, Store},
    transaction::Transaction,
    validate::{validate_id, validate_name}
};

fn missing_event(id: i64) -> String {
    format!("event {id} not found")
}

fn event_not_found(id: i64) -> CoreError {
    CoreError::NotFound(missing_event(id))
}

fn participant_not_found(id: i64) -> CoreError {
    CoreError::NotFound(format!("registration {id} not found"))
}

fn registered_event_not_found(id: i64) -> CoreError {
    CoreError::NotFound(format!("registered event {id} not found"))
}

fn duplicate_event(name: &str) -> String {
    format!("an idea named '{name}' already exists, vote for it instead")
}

fn duplicate_vote(name: &str, event_id: i64) -> String {
    format!("participant '{name}' has already voted for event {event_id}")
}

fn duplicate_publication(name: &str) -> String {
    format!("event '{name}' has already been registered")
}

fn log_conflict<T>(result: Result<T, CoreError>) -> Result<T, CoreError> {
    if let Err(CoreError::Conflict(detail)) = &result {
        warn!(%detail, "uniqueness conflict");
    }
    result
}

/// Service owning the consistency rules, built on an injected store.
///
/// Cheap to share behind an `Arc`; holds no state besides the store.
#[derive(Debug, Clone)]
pub struct IdeaService<S> {
    store: S
}

impl<S> IdeaService<S> {
    /// Build the service on `store`.
    pub const fn new(store: S) -> Self {
        Self {
            store
        }
    }

    /// Get reference to the underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }
}

impl<S: Store> IdeaService<S> {

    /// Create an event named `name` (trimmed).
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a blank name, `Conflict` if the name is taken.
    pub async fn create_event(&self, name: &str) -> Result<Event, CoreError> {
        let name = validate_name("event_name", name)?;
        let event = log_conflict(
            Transaction::new(&self.store)
                .run(move |tx| {
                    Box::pin(async move {
                        tx.insert_event(&name)
                            .await
                            .map_err(|e| e.or_conflict(duplicate_event(&name)))
                    })
                })
                .await
        )?;
        info!(event_id = event.id, name = %event.name, "event created");
        Ok(event)
    }

    /// Look up an event.
    ///
    /// # Errors
    ///
    /// `NotFound` if absent.
    pub async fn get_event(&self, id: i64) -> Result<Event, CoreError> {
        let id = validate_id("event_id", id)?;
        debug!(event_id = id, "get event");
        Transaction::new(&self.store)
            .run(move |tx| {
                Box::pin(async move { tx.find_event(id).await?.ok_or_else(|| event_not_found(id)) })
            })
            .await
    }

    /// All events ordered by id. Empty when none exist.
    ///
    /// # Errors
    ///
    /// `Internal` on storage failure.
    pub async fn list_events(&self) -> Result<Vec<Event>, CoreError> {
        Transaction::new(&self.store)
            .run(|tx| Box::pin(async move { Ok::<_, CoreError>(tx.list_events().await?) }))
            .await
    }

    /// Rename an event.
    ///
    /// The publication keeps the name it was created with.
    ///
    /// # Errors
    ///
    /// `InvalidInput`, `NotFound`, or `Conflict` if another event has the
    /// new name.
    pub async fn update_event(&self, id: i64, new_name: &str) -> Result<Event, CoreError> {
        let id = validate_id("event_id", id)?;
        let name = validate_name("event_name", new_name)?;
        let event = log_conflict(
            Transaction::new(&self.store)
                .run(move |tx| {
                    Box::pin(async move {
                        if tx.find_event(id).await?.is_none() {
                            return Err(event_not_found(id));
                        }
                        tx.rename_event(id, &name)
                            .await
                            .map_err(|e| e.or_conflict(duplicate_event(&name)))?
                            .ok_or_else(|| event_not_found(id))
                    })
                })
                .await
        )?;
        info!(event_id = id, name = %event.name, "event renamed");
        Ok(event)
    }

    /// Delete an event, cascading to its publication and votes.
    ///
    /// # Errors
    ///
    /// `NotFound` if absent.
    pub async fn delete_event(&self, id: i64) -> Result<(), CoreError> {
        let id = validate_id("event_id", id)?;
        Transaction::new(&self.store)
            .run(move |tx| {
                Box::pin(async move {
                    if tx.find_event(id).await?.is_none() {
                        return Err(event_not_found(id));
                    }
                    if !tx.delete_event(id).await? {
                        return Err(event_not_found(id));
                    }
                    Ok(())
                })
            })
            .await?;
        info!(event_id = id, "event deleted");
        Ok(())
    }

    /// Publish an existing event on behalf of `created_by`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for blank names, `NotFound` if the event is absent,
    /// `Conflict` if it is already published.
    pub async fn register_event_creation(
        &self,
        event_id: i64,
        event_name: &str,
        created_by: &str
    ) -> Result<RegisteredEvent, CoreError> {
        let event_id = validate_id("event_id", event_id)?;
        let name = validate_name("event_name", event_name)?;
        let created_by = validate_name("created_by", created_by)?;
        let registered = log_conflict(
            Transaction::new(&self.store)
                .run(move |tx| {
                    Box::pin(async move {
                        if tx.find_event(event_id).await?.is_none() {
                            return Err(event_not_found(event_id));
                        }
                        if let Some(existing) = tx.find_registered_event_for(event_id).await? {
                            return Err(CoreError::Conflict(format!(
                                "{} (by {})",
                                duplicate_publication(&existing.name),
                                existing.created_by
                            )));
                        }
                        tx.insert_registered_event(event_id, &name, &created_by)
                            .await
                            .map_err(|e| publication_error(e, &name, event_id))
                    })
                })
                .await
        )?;
        info!(
            event_id,
            registered_event_id = registered.id,
            created_by = %registered.created_by,
            "event registered"
        );
        Ok(registered)
    }

    /// Look up a publication.
    ///
    /// # Errors
    ///
    /// `NotFound` if absent.
    pub async fn get_registered_event(&self, id: i64) -> Result<RegisteredEvent, CoreError> {
        let id = validate_id("registered_event_id", id)?;
        Transaction::new(&self.store)
            .run(move |tx| {
                Box::pin(async move {
                    tx.find_registered_event(id)
                        .await?
                        .ok_or_else(|| registered_event_not_found(id))
                })
            })
            .await
    }

    /// All publications ordered by name.
    ///
    /// # Errors
    ///
    /// `Internal` on storage failure.
    pub async fn list_registered_events(&self) -> Result<Vec<RegisteredEvent>, CoreError> {
        Transaction::new(&self.store)
            .run(|tx| {
                Box::pin(async move { Ok::<_, CoreError>(tx.list_registered_events().await?) })
            })
            .await
    }

    /// Delete a publication, keeping the event and its votes.
    ///
    /// # Errors
    ///
    /// `NotFound` if absent.
    pub async fn delete_registered_event(&self, id: i64) -> Result<(), CoreError> {
        let id = validate_id("registered_event_id", id)?;
        Transaction::new(&self.store)
            .run(move |tx| {
                Box::pin(async move {
                    if tx.delete_registered_event(id).await? {
                        Ok(())
                    } else {
                        Err(registered_event_not_found(id))
                    }
                })
            })
            .await?;
        info!(registered_event_id = id, "registered event deleted");
        Ok(())
    }

    /// Record a vote of `participant_name` (trimmed) for `event_id`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a blank name, `NotFound` if the event is absent,
    /// `Conflict` if this name already voted for this event.
    pub async fn register_participant(
        &self,
        event_id: i64,
        participant_name: &str
    ) -> Result<Participant, CoreError> {
        let event_id = validate_id("event_id", event_id)?;
        let name = validate_name("participant_name", participant_name)?;
        let participant = log_conflict(self.vote(event_id, name).await)?;
        info!(
            event_id,
            registration_id = participant.id,
            participant = %participant.participant_name,
            "vote registered"
        );
        Ok(participant)
    }

    /// Votes for one event.
    ///
    /// # Errors
    ///
    /// `NotFound` if the event is absent.
    pub async fn list_participants(&self, event_id: i64) -> Result<Vec<Participant>, CoreError> {
        let event_id = validate_id("event_id", event_id)?;
        Transaction::new(&self.store)
            .run(move |tx| {
                Box::pin(async move {
                    if tx.find_event(event_id).await?.is_none() {
                        return Err(event_not_found(event_id));
                    }
                    Ok(tx.list_participants(event_id).await?)
                })
            })
            .await
    }

    /// Look up a vote.
    ///
    /// # Errors
    ///
    /// `NotFound` if absent.
    pub async fn get_participant(&self, registration_id: i64) -> Result<Participant, CoreError> {
        let id = validate_id("registration_id", registration_id)?;
        Transaction::new(&self.store)
            .run(move |tx| {
                Box::pin(async move {
                    tx.find_participant(id)
                        .await?
                        .ok_or_else(|| participant_not_found(id))
                })
            })
            .await
    }

    /// Rename a vote.
    ///
    /// # Errors
    ///
    /// `InvalidInput`, `NotFound`, or `Conflict` if the new name already
    /// voted for the same event.
    pub async fn update_participant(
        &self,
        registration_id: i64,
        new_name: &str
    ) -> Result<Participant, CoreError> {
        let id = validate_id("registration_id", registration_id)?;
        let name = validate_name("participant_name", new_name)?;
        let participant = log_conflict(
            Transaction::new(&self.store)
                .run(move |tx| {
                    Box::pin(async move {
                        let Some(current) = tx.find_participant(id).await? else {
                            return Err(participant_not_found(id));
                        };
                        tx.rename_participant(id, &name)
                            .await
                            .map_err(|e| e.or_conflict(duplicate_vote(&name, current.event_id)))?
                            .ok_or_else(|| participant_not_found(id))
                    })
                })
                .await
        )?;
        info!(registration_id = id, participant = %participant.participant_name, "vote renamed");
        Ok(participant)
    }

    /// Delete a vote.
    ///
    /// # Errors
    ///
    /// `NotFound` if absent.
    pub async fn delete_participant(&self, registration_id: i64) -> Result<(), CoreError> {
        let id = validate_id("registration_id", registration_id)?;
        Transaction::new(&self.store)
            .run(move |tx| {
                Box::pin(async move {
                    if tx.find_participant(id).await?.is_none() {
                        return Err(participant_not_found(id));
                    }
                    tx.delete_participant(id).await?;
                    Ok(())
                })
            })
            .await?;
        info!(registration_id = id, "vote deleted");
        Ok(())
    }

    /// Distinct voter names across all events, byte-wise ascending.
    ///
    /// Names are compared exactly as stored: `"Ana"` and `"ana"` are two
    /// entries.
    ///
    /// # Errors
    ///
    /// `Internal` on storage failure.
    pub async fn list_unique_participant_names(&self) -> Result<Vec<String>, CoreError> {
        Transaction::new(&self.store)
            .run(|tx| {
                Box::pin(async move { Ok::<_, CoreError>(tx.unique_participant_names().await?) })
            })
            .await
    }

    /// Create an event, publish it and record the proposer's vote, all in
    /// one transaction.
    ///
    /// Nothing is written unless all three rows are.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for blank names, `Conflict` if the idea exists.
    pub async fn propose_and_vote(
        &self,
        event_name: &str,
        proposer_name: &str
    ) -> Result<Proposal, CoreError> {
        let name = validate_name("event_name", event_name)?;
        let proposer = validate_name("proposer_name", proposer_name)?;
        let proposal = log_conflict(
            Transaction::new(&self.store)
                .run(move |tx| {
                    Box::pin(async move {
                        let event = tx
                            .insert_event(&name)
                            .await
                            .map_err(|e| e.or_conflict(duplicate_event(&name)))?;
                        let registered = tx
                            .insert_registered_event(event.id, &name, &proposer)
                            .await
                            .map_err(|e| publication_error(e, &name, event.id))?;
                        let participant = tx
                            .insert_participant(event.id, &proposer)
                            .await
                            .map_err(|e| vote_error(e, &proposer, event.id))?;
                        Ok::<_, CoreError>(Proposal {
                            event,
                            registered,
                            participant
                        })
                    })
                })
                .await
        )?;
        info!(
            event_id = proposal.event.id,
            name = %proposal.event.name,
            proposer = %proposal.registered.created_by,
            "idea proposed"
        );
        Ok(proposal)
    }

    /// [`propose_and_vote`](Self::propose_and_vote), then vote for
    /// `also_vote_for` under the proposer's name.
    ///
    /// Every id is validated before the cascade runs. The extra votes run
    /// after the cascade commits and never undo it: a storage failure on one
    /// of them is reported as [`VoteStatus::Failed`]. The new event itself
    /// is skipped if listed.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a blank name or a non-positive id (nothing is
    /// written), otherwise only the cascade's errors.
    pub async fn propose_and_vote_with(
        &self,
        event_name: &str,
        proposer_name: &str,
        also_vote_for: &[i64]
    ) -> Result<ProposalReport, CoreError> {
        for &id in also_vote_for {
            validate_id("event_id", id)?;
        }
        let proposal = self.propose_and_vote(event_name, proposer_name).await?;
        let others: Vec<i64> = also_vote_for
            .iter()
            .copied()
            .filter(|&id| id != proposal.event.id)
            .collect();
        let extra_votes = self
            .cast_votes(proposal.participant.participant_name.clone(), &others, true)
            .await?;
        Ok(ProposalReport {
            proposal,
            extra_votes
        })
    }

    /// Vote for several events under one name.
    ///
    /// Each vote commits on its own; duplicates and missing events are
    /// reported per entry rather than failing the batch. Repeated ids are
    /// voted once.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a blank name or a non-positive id (nothing is
    /// written), `Internal` on storage failure.
    pub async fn vote_for_many(
        &self,
        participant_name: &str,
        event_ids: &[i64]
    ) -> Result<VoteReport, CoreError> {
        let name = validate_name("participant_name", participant_name)?;
        for &id in event_ids {
            validate_id("event_id", id)?;
        }
        self.cast_votes(name, event_ids, false).await
    }

    /// Vote for each distinct id in order. With `keep_going`, an internal
    /// failure becomes a [`VoteStatus::Failed`] entry instead of an error.
    async fn cast_votes(
        &self,
        name: String,
        event_ids: &[i64],
        keep_going: bool
    ) -> Result<VoteReport, CoreError> {
        let mut seen = HashSet::new();
        let mut results = Vec::new();
        for &event_id in event_ids.iter().filter(|id| seen.insert(**id)) {
            let (status, participant) = match self.vote(event_id, name.clone()).await {
                Ok(participant) => (VoteStatus::Registered, Some(participant)),
                Err(CoreError::Conflict(_)) => (VoteStatus::AlreadyVoted, None),
                Err(CoreError::NotFound(_)) => (VoteStatus::EventMissing, None),
                Err(err) if keep_going => {
                    error!(event_id, error = %err, "extra vote failed");
                    (VoteStatus::Failed, None)
                }
                Err(err) => return Err(err)
            };
            results.push(VoteResult {
                event_id,
                status,
                participant
            });
        }

        let report = VoteReport {
            participant_name: name,
            results
        };
        info!(
            participant = %report.participant_name,
            registered = report.registered(),
            already_voted = report.already_voted().len(),
            missing = report.missing().len(),
            failed = report.failed().len(),
            "votes cast"
        );
        Ok(report)
    }

    async fn vote(&self, event_id: i64, name: String) -> Result<Participant, CoreError> {
        Transaction::new(&self.store)
            .run(move |tx| {
                Box::pin(async move {
                    if tx.find_event(event_id).await?.is_none() {
                        return Err(event_not_found(event_id));
                    }
                    tx.insert_participant(event_id, &name)
                        .await
                        .map_err(|e| vote_error(e, &name, event_id))
                })
            })
            .await
    }
}

fn publication_error(err: StoreError, name: &str, event_id: i64) -> CoreError {
    if err.is_unique_violation() {
        err.or_conflict(duplicate_publication(name))
    } else {
        err.or_missing(missing_event(event_id))
    }
}

// Event deleted between the existence check and the insert.
fn vote_error(err: StoreError, name: &str, event_id: i64) -> CoreError {
    if err.is_unique_violation() {
        err.or_conflict(duplicate_vote(name, event_id))
    } else {
        err.or_missing(missing_event(event_id))
    }
}
