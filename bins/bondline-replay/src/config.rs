//! Configuration for the replay runner

use std::path::PathBuf;

use bondline::governance::Scope;
use bondline::StaticReader;
use bondline_bond::BondScope;
use bondline_common::{parse_address, Address};
use bondline_staking::StakingScope;
use clap::Parser;

/// Bondline event replay
///
/// Projects a JSON-lines file of decoded contract events into a SQLite entity
/// store, one event per line, in file order.
#[derive(Parser, Debug)]
#[command(name = "bondline-replay")]
#[command(about = "Replay decoded bond and staking pool events into SQLite", long_about = None)]
pub struct Config {
    /// JSON-lines file of `{ "context": ..., "event": { "source": ..., "payload": ... } }`
    #[arg(env = "BONDLINE_INPUT")]
    pub input: PathBuf,

    /// SQLite database for projected entities
    #[arg(long, env = "BONDLINE_DB_PATH", default_value = "./bondline.db")]
    pub db_path: PathBuf,

    /// Answer for `bondCreator()` on a bond mediator, as `mediator=factory`
    ///
    /// Mediator `Initialized` events read their factory back from the chain.
    /// Without a node, those reads are served from these pairs; any read not
    /// listed fails the event.
    #[arg(long, value_name = "MEDIATOR=FACTORY")]
    pub bond_creator: Vec<String>,

    /// Answer for `stakingPoolCreator()` on a staking pool mediator, as `mediator=factory`
    #[arg(long, value_name = "MEDIATOR=FACTORY")]
    pub staking_pool_creator: Vec<String>,

    /// Abort on the first event that fails to project
    #[arg(long)]
    pub stop_on_error: bool,
}

impl Config {
    /// Build the contract reader from the creator overrides.
    pub fn reader(&self) -> Result<StaticReader, String> {
        let mut reader = StaticReader::new();
        for (pairs, getter) in [
            (&self.bond_creator, BondScope::CREATOR_GETTER),
            (&self.staking_pool_creator, StakingScope::CREATOR_GETTER),
        ] {
            for pair in pairs {
                let (mediator, factory) = parse_pair(pair)?;
                reader.insert(mediator, getter, factory);
            }
        }
        Ok(reader)
    }
}

fn parse_pair(pair: &str) -> Result<(Address, Address), String> {
    let (mediator, factory) = pair
        .split_once('=')
        .ok_or_else(|| format!("Invalid creator override '{}': expected MEDIATOR=FACTORY", pair))?;
    let parse = |value: &str| {
        parse_address(value.trim())
            .map_err(|e| format!("Invalid address '{}' in '{}': {}", value, pair, e))
    };
    Ok((parse(mediator)?, parse(factory)?))
}
