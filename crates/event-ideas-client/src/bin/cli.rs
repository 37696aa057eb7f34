// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use std::{collections::HashMap, process::ExitCode, time::Duration};

use clap::{Parser, Subcommand};
use event_ideas_client::{
    ApiClient, CachedClient, ClientError,
    view::{idea_rows, render_ideas, render_proposal, render_votes}
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Base URL of the event ideas API.
    #[arg(long, env = "EVENT_IDEAS_URL", default_value = "http://127.0.0.1:8000")]
    url: String,

    #[command(subcommand)]
    command: Command
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show every idea with its vote count.
    List,

    /// Show everyone who has voted at least once.
    Voters,

    /// Propose a new idea and vote for it.
    Propose {
        /// Idea name.
        name: String,

        /// Your name.
        #[arg(long = "by")]
        proposer: String,

        /// Existing ideas to vote for as well.
        #[arg(long, num_args = 1..)]
        also: Vec<i64>
    },

    /// Vote for existing ideas.
    Vote {
        /// Your name.
        name: String,

        /// Idea ids.
        #[arg(required = true)]
        ids: Vec<i64>
    },

    /// Redraw the idea board until interrupted.
    Watch {
        /// Seconds between refreshes.
        #[arg(long, default_value_t = 10)]
        interval: u64
    }
}

async fn board(client: &CachedClient) -> Result<String, ClientError> {
    let events = client.list_events().await?;
    let registered = client.list_registered_events().await?;
    let mut votes = HashMap::with_capacity(events.len());
    for event in &events {
        match client.list_participants(event.id).await {
            Ok(participants) => {
                votes.insert(event.id, participants.len());
            }
            // Deleted between the two reads.
            Err(err) if err.is_not_found() => {}
            Err(err) => return Err(err)
        }
    }
    let rows = idea_rows(&events, &registered, |id| votes.get(&id).copied().unwrap_or(0));
    Ok(render_ideas(&rows))
}

async fn watch(client: &CachedClient, interval: Duration) -> Result<(), ClientError> {
    let mut ticker = tokio::time::interval(interval);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                // A fresh board on every tick, regardless of TTL.
                client.invalidate().await;
                print!("\x1b[2J\x1b[H{}", board(client).await?);
            }
            _ = tokio::signal::ctrl_c() => return Ok(())
        }
    }
}

async fn execute(client: &CachedClient, command: Command) -> Result<(), ClientError> {
    match command {
        Command::List => print!("{}", board(client).await?),
        Command::Voters => {
            let names = client.unique_participant_names().await?;
            if names.is_empty() {
                println!("Nobody has voted yet.");
            }
            for name in names {
                println!("{name}");
            }
        }
        Command::Propose {
            name,
            proposer,
            also
        } => {
            let report = client.propose_idea(&name, &proposer, &also).await?;
            print!("{}", render_proposal(&report));
        }
        Command::Vote {
            name,
            ids
        } => {
            let report = client.cast_votes(&name, &ids).await?;
            print!("{}", render_votes(&report));
        }
        Command::Watch {
            interval
        } => watch(client, Duration::from_secs(interval.max(1))).await?
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let client = CachedClient::new(ApiClient::new(args.url));

    match execute(&client, args.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.is_conflict() => {
            eprintln!("{err}");
            ExitCode::from(3)
        }
        Err(err) => {
            tracing::error!(error = %err, "request failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
