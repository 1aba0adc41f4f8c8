// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! `arcswarm run`: resolve the game list, run the swarm, print the report.

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use arcswarm_core::{GameApi, GameInfo, Settings, SwarmConfig};
use arcswarm_sdk::ArcClient;
use arcswarm_swarm::{AgentRegistry, Swarm, WorkerOutcome};

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Agent to run (see `arcswarm agents`), or a recording file to replay
    #[arg(short, long, value_name = "NAME")]
    pub agent: String,

    /// Games to play, comma separated. Each entry selects every listed game
    /// it prefixes. Defaults to every game the service lists.
    #[arg(short, long = "game", value_name = "GAMES", value_delimiter = ',')]
    pub games: Vec<String>,

    /// Extra scorecard tags, comma separated
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Number of workers; games are reused round-robin
    #[arg(long)]
    pub count: Option<usize>,

    /// Do not write recordings
    #[arg(long)]
    pub no_record: bool,

    /// Abort workers still running after this many seconds
    #[arg(long, value_name = "SECS")]
    pub worker_timeout: Option<u64>,
}

pub async fn execute(args: RunArgs, config_path: Option<PathBuf>) -> Result<()> {
    let settings = Settings::load_or_default(config_path).context("Failed to load settings")?;
    let base_url = settings.root_url();
    if settings.api_key.is_empty() {
        warn!("ARC_API_KEY is not set; the service will likely reject requests");
    }

    let client = Arc::new(
        ArcClient::new(base_url.clone(), &settings.api_key)
            .context("Failed to build HTTP client")?,
    );

    let available = match client.list_games().await {
        Ok(games) => games,
        Err(e) if args.games.is_empty() => {
            return Err(e).context("Failed to fetch the game list");
        }
        Err(e) => {
            warn!("Could not fetch the game list, using games as given: {}", e);
            Vec::new()
        }
    };
    let games = select_games(&available, &args.games);
    if games.is_empty() {
        bail!("No games to play");
    }
    info!("Game list: {}", games.join(", "));

    let mut tags = settings.default_tags.clone();
    tags.extend(args.tags);

    let mut config = SwarmConfig::new(args.agent, base_url, games)
        .with_tags(tags)
        .with_record(!args.no_record);
    if let Some(count) = args.count {
        config = config.with_count(count);
    }
    if let Some(secs) = args.worker_timeout {
        config = config.with_worker_timeout(Duration::from_secs(secs));
    }

    let registry = AgentRegistry::new(client.clone(), &settings.recordings_dir);
    let mut swarm =
        Swarm::new(config, Arc::new(registry), client).context("Failed to set up swarm")?;

    println!(
        "{} {} worker(s) running {}",
        "▶".cyan(),
        swarm.config().worker_count(),
        swarm.config().agent.bold()
    );

    let result = swarm.run().await;

    for worker in swarm.workers() {
        match worker.outcome {
            WorkerOutcome::Completed => println!("  {} {}", "✓".green(), worker.name),
            WorkerOutcome::Failed(reason) => {
                println!("  {} {}: {}", "✗".red(), worker.name, reason.dimmed())
            }
            WorkerOutcome::Pending => println!("  {} {}", "·".dimmed(), worker.name),
        }
    }

    let report = result.context("Swarm run failed")?;

    println!();
    println!("{}", "--- FINAL SCORECARD REPORT ---".bold());
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("Failed to render report")?
    );
    println!();
    println!(
        "Games won: {}/{}, total actions: {}, score: {}",
        report.won(),
        report.played(),
        report.total_actions(),
        report.score()
    );
    if let Some(url) = swarm.scorecard_url() {
        println!("View your scorecard online: {}", url.underline());
    }

    Ok(())
}

/// Resolve requested game entries against the service's game list.
///
/// No entries selects every listed game. Each entry selects the listed games
/// it prefixes, or is kept as-is when nothing matches. Duplicates are
/// dropped, first occurrence wins.
pub fn select_games(available: &[GameInfo], requested: &[String]) -> Vec<String> {
    if requested.is_empty() {
        return available.iter().map(|g| g.game_id.clone()).collect();
    }

    let mut selected: Vec<String> = Vec::new();
    for entry in requested.iter().map(|e| e.trim()).filter(|e| !e.is_empty()) {
        let matches: Vec<&str> = available
            .iter()
            .map(|g| g.game_id.as_str())
            .filter(|id| id.starts_with(entry))
            .collect();
        let picked = if matches.is_empty() {
            vec![entry]
        } else {
            matches
        };
        for id in picked {
            if !selected.iter().any(|s| s == id) {
                selected.push(id.to_string());
            }
        }
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listed(ids: &[&str]) -> Vec<GameInfo> {
        ids.iter()
            .map(|id| GameInfo {
                game_id: id.to_string(),
                title: String::new(),
            })
            .collect()
    }

    fn strings(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_entries_selects_everything() {
        let available = listed(&["ls20-016295f7601e", "ft09-b8377d4b7815"]);
        assert_eq!(
            select_games(&available, &[]),
            strings(&["ls20-016295f7601e", "ft09-b8377d4b7815"])
        );
    }

    #[test]
    fn test_prefix_filter() {
        let available = listed(&["ls20-016295f7601e", "ft09-b8377d4b7815", "ls21-aaaa"]);
        assert_eq!(
            select_games(&available, &strings(&["ls20"])),
            strings(&["ls20-016295f7601e"])
        );
        assert_eq!(
            select_games(&available, &strings(&["ls", "ls20"])),
            strings(&["ls20-016295f7601e", "ls21-aaaa"])
        );
    }

    #[test]
    fn test_unlisted_entries_kept_verbatim() {
        assert_eq!(
            select_games(&[], &strings(&["g1", " g2 ", ""])),
            strings(&["g1", "g2"])
        );
        let available = listed(&["ls20-016295f7601e"]);
        assert_eq!(
            select_games(&available, &strings(&["zz99"])),
            strings(&["zz99"])
        );
    }

    #[test]
    fn test_run_args_parse() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: RunArgs,
        }

        let parsed = Wrapper::parse_from([
            "arcswarm",
            "--agent",
            "random",
            "--game",
            "ls20,ft09",
            "--tags",
            "nightly",
            "--count",
            "4",
            "--no-record",
            "--worker-timeout",
            "600",
        ])
        .args;
        assert_eq!(parsed.agent, "random");
        assert_eq!(parsed.games, strings(&["ls20", "ft09"]));
        assert_eq!(parsed.tags, strings(&["nightly"]));
        assert_eq!(parsed.count, Some(4));
        assert!(parsed.no_record);
        assert_eq!(parsed.worker_timeout, Some(600));
    }
}
