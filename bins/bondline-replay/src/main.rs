//! Bondline replay - projects recorded contract events into SQLite
//!
//! Stands in for the host runtime: each line of the input is one decoded log
//! with its chain context, delivered to the engine in file order. Dynamic
//! sources discovered along the way are kept in an in-process registry and
//! reported at the end.
//!
//! A failed mediator `Initialized` always stops the replay; other failed events
//! are logged and skipped unless `--stop-on-error` is given.
//!
//! # Usage
//!
//! ```bash
//! # Replay into ./bondline.db
//! bondline-replay events.jsonl
//!
//! # Serve mediator initialization reads and stop at the first failure
//! bondline-replay events.jsonl --db-path ./out.db \
//!     --bond-creator 0xMEDIATOR=0xFACTORY --stop-on-error
//! ```

mod config;
mod input;

use std::sync::Arc;

use anyhow::{Context, Result};
use bondline::{BatchSummary, ContractRegistry, Engine, Projector, SqliteStore};
use bondline_bond::{BondFactoryProjector, BondMediatorProjector, BondProjector};
use bondline_common::address_hex;
use bondline_staking::{
    StakingPoolFactoryProjector, StakingPoolMediatorProjector, StakingPoolProjector,
};
use clap::Parser;
use config::Config;
use input::Record;
use tokio::io::{AsyncBufReadExt, BufReader};

const TARGET: &str = "bondline_replay";

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(true)
        .init();

    tracing::info!(target: TARGET, "Starting bondline replay");
    tracing::info!(target: TARGET, "Input: {}", config.input.display());
    tracing::info!(target: TARGET, "Database: {}", config.db_path.display());

    let reader = Arc::new(config.reader().map_err(anyhow::Error::msg)?);
    tracing::info!(target: TARGET, overrides = reader.len(), "Contract reader configured");

    let store = Arc::new(
        SqliteStore::open(&config.db_path)
            .with_context(|| format!("Failed to open {}", config.db_path.display()))?,
    );
    let registry = Arc::new(ContractRegistry::new());

    let projectors: Vec<Arc<dyn Projector>> = vec![
        Arc::new(BondProjector::new()),
        Arc::new(BondFactoryProjector::new()),
        Arc::new(BondMediatorProjector::new(reader.clone())),
        Arc::new(StakingPoolProjector::new()),
        Arc::new(StakingPoolFactoryProjector::new()),
        Arc::new(StakingPoolMediatorProjector::new(reader)),
    ];
    let engine = Engine::new(store, registry.clone()).with_projectors(projectors);

    let file = tokio::fs::File::open(&config.input)
        .await
        .with_context(|| format!("Failed to open {}", config.input.display()))?;
    let mut lines = BufReader::new(file).lines();

    let mut summary = BatchSummary::default();
    let mut failed = 0usize;
    let mut line_number = 0usize;

    while let Some(line) = lines.next_line().await? {
        line_number += 1;
        if line.trim().is_empty() {
            continue;
        }

        let mut fatal = config.stop_on_error;
        let result = match Record::parse(&line) {
            Ok(record) => {
                // A skipped factory binding would leave every later factory event unlinked
                fatal |= record.event.is_mediator_initialization();
                engine
                    .process(&record.into_envelope())
                    .await
                    .map_err(anyhow::Error::from)
            }
            Err(e) => Err(anyhow::Error::from(e).context("Malformed record")),
        };

        match result {
            Ok(outcome) => summary.record(outcome),
            Err(e) => {
                failed += 1;
                if fatal {
                    tracing::error!(
                        target: TARGET,
                        line = line_number,
                        error = %format!("{:#}", e),
                        "Event failed, stopping replay"
                    );
                    return Err(e.context(format!("Replay stopped at line {}", line_number)));
                }
                tracing::warn!(
                    target: TARGET,
                    line = line_number,
                    error = %format!("{:#}", e),
                    "Event failed, continuing"
                );
            }
        }
    }

    tracing::info!(
        target: TARGET,
        lines = line_number,
        projected = summary.projected,
        skipped = summary.skipped,
        failed,
        writes = summary.writes,
        sources = summary.sources,
        tracked = registry.len(),
        "Replay complete"
    );
    for address in registry.addresses() {
        let templates: Vec<&str> = registry
            .templates_for(&address)
            .iter()
            .map(|template| template.name())
            .collect();
        tracing::info!(
            target: TARGET,
            address = %address_hex(&address),
            ?templates,
            "Tracked contract"
        );
    }

    Ok(())
}
