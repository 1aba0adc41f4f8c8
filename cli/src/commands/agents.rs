// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;

use arcswarm_core::Settings;
use arcswarm_sdk::ArcClient;
use arcswarm_swarm::AgentRegistry;

pub async fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let settings = Settings::load_or_default(config_path).context("Failed to load settings")?;
    let client = ArcClient::new(settings.root_url(), &settings.api_key)
        .context("Failed to build HTTP client")?;
    let registry = AgentRegistry::new(Arc::new(client), &settings.recordings_dir);

    println!("{}", "Agents:".bold());
    for name in registry.names() {
        println!("  {}", name);
    }

    let recordings = registry.recordings();
    println!();
    println!(
        "{} ({})",
        "Recordings:".bold(),
        settings.recordings_dir.display()
    );
    if recordings.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for name in recordings {
        println!("  {}", name);
    }

    Ok(())
}
