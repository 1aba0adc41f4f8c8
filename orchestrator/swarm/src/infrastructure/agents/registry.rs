// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Agent Registry
//
// Fixed table of agent constructors keyed by name, plus playback for any
// name that points at a recording file.

use arcswarm_core::{Agent, AgentContext, GameApi};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use super::playback::PlaybackStrategy;
use super::random::RandomStrategy;
use super::runner::GameRunner;
use crate::application::AgentFactory;
use crate::domain::{SwarmError, RECORDING_SUFFIX};

/// Builds an agent from its context, the shared game transport and the
/// recordings directory.
pub type AgentConstructor = fn(AgentContext, Arc<dyn GameApi>, &Path) -> Box<dyn Agent>;

fn random_agent(context: AgentContext, game: Arc<dyn GameApi>, recordings_dir: &Path) -> Box<dyn Agent> {
    Box::new(GameRunner::new(context, RandomStrategy::new(), game, recordings_dir))
}

pub struct AgentRegistry {
    game: Arc<dyn GameApi>,
    recordings_dir: PathBuf,
    constructors: BTreeMap<String, AgentConstructor>,
}

impl AgentRegistry {
    /// Registry with the built-in agents.
    pub fn new(game: Arc<dyn GameApi>, recordings_dir: impl Into<PathBuf>) -> Self {
        let mut registry = Self {
            game,
            recordings_dir: recordings_dir.into(),
            constructors: BTreeMap::new(),
        };
        registry.register("random", random_agent);
        registry
    }

    pub fn register(&mut self, name: impl Into<String>, constructor: AgentConstructor) {
        self.constructors.insert(name.into(), constructor);
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.constructors.keys().map(String::as_str).collect()
    }

    /// Recording files in the recordings directory, usable as playback
    /// agent names. A missing directory yields an empty list.
    pub fn recordings(&self) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(&self.recordings_dir) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| Self::is_playback(name))
            .collect();
        names.sort();
        names
    }

    pub fn is_playback(agent_name: &str) -> bool {
        agent_name.ends_with(RECORDING_SUFFIX)
    }

    /// A recording given by path is used as-is, otherwise it is looked up in
    /// the recordings directory.
    fn playback_path(&self, agent_name: &str) -> PathBuf {
        let direct = PathBuf::from(agent_name);
        if direct.exists() {
            direct
        } else {
            self.recordings_dir.join(agent_name)
        }
    }
}

impl AgentFactory for AgentRegistry {
    fn supports(&self, agent_name: &str) -> bool {
        Self::is_playback(agent_name) || self.constructors.contains_key(agent_name)
    }

    fn create(&self, context: AgentContext) -> Result<Box<dyn Agent>, SwarmError> {
        if Self::is_playback(&context.agent_name) {
            let path = self.playback_path(&context.agent_name);
            if !path.is_file() {
                return Err(SwarmError::AgentCreation {
                    game_id: context.game_id.clone(),
                    reason: format!("recording {} not found", path.display()),
                });
            }
            debug!("Creating playback agent for {} from {}", context.game_id, path.display());
            // Replays are never re-recorded.
            let context = AgentContext {
                record: false,
                ..context
            };
            return Ok(Box::new(GameRunner::new(
                context,
                PlaybackStrategy::new(path),
                Arc::clone(&self.game),
                &self.recordings_dir,
            )));
        }

        let constructor = self
            .constructors
            .get(&context.agent_name)
            .ok_or_else(|| SwarmError::UnknownAgent(context.agent_name.clone()))?;
        Ok(constructor(context, Arc::clone(&self.game), &self.recordings_dir))
    }
}
