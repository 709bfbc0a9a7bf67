//! etc-spec — inspect the fork schedule of an Ethash-family chain spec.
//!
//! Loads a chain-spec document, resolves its engines, and prints fork
//! boundaries, the release spec at a height, or the derived landmarks as
//! JSON on stdout. Logs go to stderr.

mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use etc_consensus::{load_chain_spec_from_path, EngineRegistry, ForkSchedule};
use serde::Serialize;
use tracing::info;

use crate::config::SpecToolConfig;

/// Ethash-family chain spec inspector.
#[derive(Parser, Debug)]
#[command(name = "etc-spec", version, about = "Inspect fork transitions of an Etchash chain spec")]
struct Cli {
    /// Chain-spec JSON file (falls back to $ETC_CHAIN_SPEC)
    #[arg(long, global = true)]
    chain_spec: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Log output format ("text" or "json")
    #[arg(long, global = true, default_value = "text")]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List every block-number and timestamp fork boundary.
    Transitions,
    /// Show the release spec in force at a block.
    Release {
        /// Block height
        #[arg(long)]
        block: u64,
        /// Block timestamp (unused by block-keyed engines)
        #[arg(long)]
        timestamp: Option<u64>,
    },
    /// Show the landmarks derived for the chain spec.
    Landmarks,
}

impl Cli {
    fn config(&self) -> SpecToolConfig {
        SpecToolConfig {
            chain_spec: self.chain_spec.clone(),
            log_level: self.log_level.clone(),
            log_format: self.log_format.clone(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TransitionsReport {
    block_numbers: Vec<u64>,
    timestamps: Vec<u64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReleaseReport<'a> {
    block: u64,
    fork_activation: Option<u64>,
    next_transition: Option<u64>,
    spec: &'a etc_core::ReleaseSpec,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.config();
    init_logging(&config);

    let path = config.chain_spec_path()?;
    let schedule = load_chain_spec_from_path(&path, &EngineRegistry::default())
        .with_context(|| format!("failed to load chain spec {}", path.display()))?;
    info!(path = %path.display(), "chain spec loaded");

    let output = render(&schedule, &cli.command)?;
    println!("{output}");
    Ok(())
}

fn render(schedule: &ForkSchedule, command: &Commands) -> Result<String> {
    let json = match command {
        Commands::Transitions => serde_json::to_string_pretty(&TransitionsReport {
            block_numbers: schedule.block_transitions().collect(),
            timestamps: schedule.timestamp_transitions().collect(),
        }),
        Commands::Release { block, timestamp } => {
            let spec = schedule.release_spec_at(*block, *timestamp);
            serde_json::to_string_pretty(&ReleaseReport {
                block: *block,
                fork_activation: schedule.fork_activation(*block),
                next_transition: schedule.next_transition(*block),
                spec: &spec,
            })
        }
        Commands::Landmarks => serde_json::to_string_pretty(schedule.chain_spec()),
    };
    json.context("failed to encode output")
}

/// Initialize tracing on stderr with the configured level and format.
fn init_logging(config: &SpecToolConfig) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    if config.json_logs() {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}
