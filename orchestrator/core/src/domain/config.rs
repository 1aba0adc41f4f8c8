// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Swarm Configuration
//!
//! Immutable description of one swarm run: which agent plays, against which
//! service, which games, and how the scorecard is tagged.

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {error}")]
    Io {
        path: String,
        error: std::io::Error,
    },

    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Configuration for a single swarm run.
///
/// # Invariants
///
/// - `games` is non-empty.
/// - Worker `i` is bound to `games[i % games.len()]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SwarmConfig {
    /// Agent name, resolved through the agent registry.
    pub agent: String,
    /// Service root, e.g. `https://three.arcprize.org`.
    pub base_url: String,
    /// Ordered game identifiers.
    pub games: Vec<String>,
    /// Free-form tags attached to the scorecard.
    pub tags: Vec<String>,
    /// Number of workers; defaults to one per configured game.
    pub count: Option<usize>,
    /// Whether workers record their frames to disk.
    pub record: bool,
    /// Upper bound on a single worker's run. `None` lets workers run to
    /// natural completion.
    pub worker_timeout: Option<Duration>,
}

impl SwarmConfig {
    pub fn new(agent: impl Into<String>, base_url: impl Into<String>, games: Vec<String>) -> Self {
        Self {
            agent: agent.into(),
            base_url: base_url.into(),
            games,
            tags: Vec::new(),
            count: None,
            record: true,
            worker_timeout: None,
        }
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    pub fn with_record(mut self, record: bool) -> Self {
        self.record = record;
        self
    }

    pub fn with_worker_timeout(mut self, timeout: Duration) -> Self {
        self.worker_timeout = Some(timeout);
        self
    }

    pub fn worker_count(&self) -> usize {
        self.count.unwrap_or(self.games.len())
    }

    /// Game assigned to each worker, in launch order.
    pub fn assignments(&self) -> Vec<String> {
        if self.games.is_empty() {
            return Vec::new();
        }
        (0..self.worker_count())
            .map(|i| self.games[i % self.games.len()].clone())
            .collect()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.agent.trim().is_empty() {
            return Err(ConfigError::Invalid("agent name cannot be empty".into()));
        }
        if self.games.is_empty() {
            return Err(ConfigError::Invalid("at least one game is required".into()));
        }
        if self.games.iter().any(|g| g.trim().is_empty()) {
            return Err(ConfigError::Invalid("game identifiers cannot be empty".into()));
        }
        if self.count == Some(0) {
            return Err(ConfigError::Invalid("worker count must be at least 1".into()));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "base URL must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        Ok(())
    }

    /// Human-facing scorecard page.
    pub fn scorecard_url(&self, card_id: &str) -> String {
        format!("{}/scorecards/{}", self.base_url.trim_end_matches('/'), card_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn games(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_one_worker_per_game_by_default() {
        let config = SwarmConfig::new("random", "http://localhost", games(&["g1", "g2", "g3"]));
        assert_eq!(config.worker_count(), 3);
        assert_eq!(config.assignments(), games(&["g1", "g2", "g3"]));
    }

    #[test]
    fn test_assignments_cycle_games() {
        let single = SwarmConfig::new("random", "http://localhost", games(&["g1"])).with_count(3);
        assert_eq!(single.assignments(), games(&["g1", "g1", "g1"]));

        let pair = SwarmConfig::new("random", "http://localhost", games(&["a", "b"])).with_count(5);
        assert_eq!(pair.assignments(), games(&["a", "b", "a", "b", "a"]));
    }

    #[test]
    fn test_validation() {
        let ok = SwarmConfig::new("random", "https://three.arcprize.org", games(&["g1"]));
        assert!(ok.validate().is_ok());

        let no_games = SwarmConfig::new("random", "http://localhost", vec![]);
        assert!(matches!(no_games.validate(), Err(ConfigError::Invalid(_))));
        assert!(no_games.assignments().is_empty());

        let zero = SwarmConfig::new("random", "http://localhost", games(&["g1"])).with_count(0);
        assert!(zero.validate().is_err());

        let no_agent = SwarmConfig::new(" ", "http://localhost", games(&["g1"]));
        assert!(no_agent.validate().is_err());

        let bad_url = SwarmConfig::new("random", "localhost:8001", games(&["g1"]));
        assert!(bad_url.validate().is_err());
    }

    #[test]
    fn test_scorecard_url() {
        let config = SwarmConfig::new("random", "https://three.arcprize.org/", games(&["g1"]));
        assert_eq!(
            config.scorecard_url("abc"),
            "https://three.arcprize.org/scorecards/abc"
        );
    }
}
