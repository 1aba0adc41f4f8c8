// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! # arcswarm CLI
//!
//! Plays ARC-AGI-3 games with a swarm of agents, one per game, all scored
//! under a single remote scorecard.
//!
//! ## Commands
//!
//! - `arcswarm run --agent <name> [--game g1,g2]` - Run a swarm and print the report
//! - `arcswarm agents` - List agents and recordings available for playback
//! - `arcswarm config show|validate` - Configuration management
//!
//! `.env.example` and then `.env` are loaded before arguments are parsed,
//! so `ARC_API_KEY` and friends can live there.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use arcswarm::commands::{self, ConfigCommand, RunArgs};

/// arcswarm - Run agent swarms against ARC-AGI-3 games
#[derive(Parser)]
#[command(name = "arcswarm")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to settings file (overrides discovery)
    #[arg(
        short,
        long,
        global = true,
        env = "ARCSWARM_CONFIG_PATH",
        value_name = "FILE"
    )]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "ARCSWARM_LOG_LEVEL", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a swarm of agents under one scorecard
    #[command(name = "run")]
    Run(RunArgs),

    /// List available agents
    #[command(name = "agents")]
    Agents,

    /// Configuration management
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::from_filename(".env.example").ok();
    dotenvy::from_filename_override(".env").ok();

    let cli = Cli::parse();

    init_logging(&cli.log_level)?;

    match cli.command {
        Some(Commands::Run(args)) => commands::run::execute(args, cli.config).await,
        Some(Commands::Agents) => commands::agents::execute(cli.config).await,
        Some(Commands::Config { command }) => {
            commands::config::handle_command(command, cli.config).await
        }
        None => {
            eprintln!("{}", "No command specified. Use --help for usage.".yellow());
            std::process::exit(1);
        }
    }
}

/// Initialize tracing subscriber for logging
fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    Ok(())
}
