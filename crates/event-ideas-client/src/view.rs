// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Plain-text rendering for the CLI.

use std::fmt::Write;

use event_ideas_core::model::{Event, ProposalReport, RegisteredEvent, VoteReport, VoteStatus};

/// One row of the idea board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdeaRow {
    /// Event id.
    pub id:       i64,
    /// Current event name.
    pub name:     String,
    /// Proposer, when the idea is published.
    pub proposer: Option<String>,
    /// Number of votes.
    pub votes:    usize
}

/// Join events with their publications, most voted first, then by id.
pub fn idea_rows(
    events: &[Event],
    registered: &[RegisteredEvent],
    votes: impl Fn(i64) -> usize
) -> Vec<IdeaRow> {
    let mut rows: Vec<IdeaRow> = events
        .iter()
        .map(|event| IdeaRow {
            id:       event.id,
            name:     event.name.clone(),
            proposer: registered
                .iter()
                .find(|r| r.event_id == event.id)
                .map(|r| r.created_by.clone()),
            votes:    votes(event.id)
        })
        .collect();
    rows.sort_by(|a, b| b.votes.cmp(&a.votes).then(a.id.cmp(&b.id)));
    rows
}

/// Render the idea board as aligned text.
pub fn render_ideas(rows: &[IdeaRow]) -> String {
    if rows.is_empty() {
        return "No ideas yet. Propose one!\n".to_owned();
    }
    let width = rows.iter().map(|r| r.name.chars().count()).max().unwrap_or(0);
    let mut out = String::new();
    for row in rows {
        let proposer = row.proposer.as_deref().unwrap_or("-");
        writeln!(
            out,
            "#{:<4} {:<width$}  {:>3} vote{}  by {proposer}",
            row.id,
            row.name,
            row.votes,
            if row.votes == 1 { "" } else { "s" }
        )
        .ok();
    }
    out
}

/// Summarise a batch vote.
pub fn render_votes(report: &VoteReport) -> String {
    let mut out = String::new();
    for result in &report.results {
        let outcome = match result.status {
            VoteStatus::Registered => "vote registered",
            VoteStatus::AlreadyVoted => "already voted",
            VoteStatus::EventMissing => "no such idea",
            VoteStatus::Failed => "not stored, try again"
        };
        writeln!(out, "#{}: {outcome}", result.event_id).ok();
    }
    out
}

/// Summarise a proposal.
pub fn render_proposal(report: &ProposalReport) -> String {
    let event = &report.proposal.event;
    let mut out = format!(
        "Idea '{}' created as #{} and voted by {}\n",
        event.name, event.id, report.proposal.participant.participant_name
    );
    out.push_str(&render_votes(&report.extra_votes));
    out
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use event_ideas_core::model::VoteResult;

    use super::*;

    fn row(id: i64, name: &str, votes: usize) -> IdeaRow {
        IdeaRow {
            id,
            name: name.into(),
            proposer: Some("Ana".into()),
            votes
        }
    }

    fn event(id: i64, name: &str) -> Event {
        let now = Utc::now();
        Event {
            id,
            name: name.into(),
            created_at: now,
            updated_at: now
        }
    }

    #[test]
    fn board_is_sorted_by_votes_then_id() {
        let events = [event(3, "Bingo"), event(1, "Boliche"), event(2, "Karaoke")];
        let registered = [RegisteredEvent {
            id:         1,
            event_id:   1,
            name:       "Boliche".into(),
            created_by: "Ana".into(),
            created_at: Utc::now()
        }];
        let rows = idea_rows(&events, &registered, |id| if id == 1 { 4 } else { 1 });

        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(rows[0].proposer.as_deref(), Some("Ana"));
        assert_eq!(rows[1].proposer, None);
    }

    #[test]
    fn render_pluralizes_and_aligns() {
        let text = render_ideas(&[row(1, "Boliche", 2), row(2, "Go", 1)]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "#1    Boliche    2 votes  by Ana");
        assert_eq!(lines[1], "#2    Go         1 vote  by Ana");
    }

    #[test]
    fn empty_board() {
        assert!(render_ideas(&[]).starts_with("No ideas yet"));
    }

    #[test]
    fn vote_summary() {
        let report = VoteReport {
            participant_name: "Ana".into(),
            results:          vec![
                VoteResult {
                    event_id:    1,
                    status:      VoteStatus::AlreadyVoted,
                    participant: None
                },
                VoteResult {
                    event_id:    9,
                    status:      VoteStatus::EventMissing,
                    participant: None
                },
                VoteResult {
                    event_id:    4,
                    status:      VoteStatus::Failed,
                    participant: None
                },
            ]
        };
        assert_eq!(
            render_votes(&report),
            "#1: already voted\n#9: no such idea\n#4: not stored, try again\n"
        );
    }
}
