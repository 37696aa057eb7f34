// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use event_ideas::{config::Config, error::StartupError, run};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "event_ideas=info,event_ideas_core=info,tower_http=info";

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
        )
        .init();

    tracing::info!(
        bind_addr = %config.bind_addr,
        storage = ?config.storage,
        database = ?config.database,
        "starting event-ideas"
    );

    if let Err(err) = run(config).await {
        tracing::error!(error = %err, "fatal");
        return Err(err);
    }
    Ok(())
}
