// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Configuration management commands
//!
//! Commands: show, validate

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use std::path::PathBuf;

use arcswarm_core::Settings;

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current settings
    Show {
        /// Show settings file paths checked
        #[arg(long)]
        paths: bool,
    },

    /// Validate a settings file
    Validate {
        /// Path to settings file (default: discover)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
}

pub async fn handle_command(
    command: ConfigCommand,
    config_override: Option<PathBuf>,
) -> Result<()> {
    match command {
        ConfigCommand::Show { paths } => show(config_override, paths).await,
        ConfigCommand::Validate { file } => validate(file.or(config_override)).await,
    }
}

async fn show(config_override: Option<PathBuf>, show_paths: bool) -> Result<()> {
    let settings = Settings::load_or_default(config_override.clone())
        .context("Failed to load settings")?;

    if show_paths {
        println!("{}", "Settings discovery paths:".bold());
        if let Some(path) = &config_override {
            println!("  1. --config flag: {}", path.display());
        } else {
            println!("  1. --config flag: {}", "(not set)".dimmed());
        }
        println!(
            "  2. ARCSWARM_CONFIG_PATH: {}",
            std::env::var("ARCSWARM_CONFIG_PATH")
                .unwrap_or_else(|_| "(not set)".to_string())
                .dimmed()
        );
        println!("  3. ./arcswarm.yaml");
        println!("  4. ~/.arcswarm/config.yaml");
        println!();
    }

    println!("{}", "Current settings:".bold());
    println!("  Service: {}", settings.root_url());
    println!(
        "  API key: {}",
        if settings.api_key.is_empty() {
            "(not set)".red().to_string()
        } else {
            "(set)".green().to_string()
        }
    );
    println!("  Recordings: {}", settings.recordings_dir.display());
    if !settings.default_tags.is_empty() {
        println!("  Default tags: {}", settings.default_tags.join(", "));
    }

    Ok(())
}

async fn validate(config_path: Option<PathBuf>) -> Result<()> {
    println!("Validating settings...");

    // load_or_default validates after applying environment overrides.
    Settings::load_or_default(config_path).context("Settings validation failed")?;

    println!("{}", "✓ Settings are valid".green());

    Ok(())
}
