// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Swarm Domain Types
//!
//! - [`SwarmPhase`]: the orchestrator's one-way lifecycle.
//! - [`SwarmError`]: failures that reach the orchestrator's caller.
//! - [`WorkerOutcome`] / [`WorkerSummary`]: per-worker result, for reporting.
//! - [`scorecard_tags`]: attribution tags sent when the scorecard is opened.

use arcswarm_core::{ConfigError, RemoteError};
use thiserror::Error;

/// Suffix identifying a recording file used as an agent name.
pub const RECORDING_SUFFIX: &str = ".recording.jsonl";

/// Orchestrator lifecycle.
///
/// ```text
/// Init → SessionOpen → WorkersRunning → SessionClosed → CleanedUp → Done
/// ```
///
/// `Failed` is terminal and reachable from any non-terminal phase. There are
/// no backward transitions; a swarm runs once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwarmPhase {
    Init,
    SessionOpen,
    WorkersRunning,
    SessionClosed,
    CleanedUp,
    Done,
    Failed,
}

impl SwarmPhase {
    fn successor(self) -> Option<SwarmPhase> {
        match self {
            SwarmPhase::Init => Some(SwarmPhase::SessionOpen),
            SwarmPhase::SessionOpen => Some(SwarmPhase::WorkersRunning),
            SwarmPhase::WorkersRunning => Some(SwarmPhase::SessionClosed),
            SwarmPhase::SessionClosed => Some(SwarmPhase::CleanedUp),
            SwarmPhase::CleanedUp => Some(SwarmPhase::Done),
            SwarmPhase::Done | SwarmPhase::Failed => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, SwarmPhase::Done | SwarmPhase::Failed)
    }

    /// Move to `to` if it is the direct successor (or `Failed` from a live phase).
    pub fn advance(&mut self, to: SwarmPhase) -> Result<(), SwarmError> {
        let allowed = match to {
            SwarmPhase::Failed => !self.is_terminal(),
            _ => self.successor() == Some(to),
        };
        if !allowed {
            return Err(SwarmError::InvalidTransition { from: *self, to });
        }
        *self = to;
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum SwarmError {
    #[error("Invalid swarm configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Unknown agent '{0}'")]
    UnknownAgent(String),

    #[error("Failed to create agent for game {game_id}: {reason}")]
    AgentCreation { game_id: String, reason: String },

    #[error("Failed to open scorecard: {0}")]
    OpenScorecard(RemoteError),

    #[error("Failed to close scorecard: {0}")]
    CloseScorecard(RemoteError),

    #[error("Swarm has already run")]
    AlreadyRun,

    #[error("Invalid swarm phase transition {from:?} -> {to:?}")]
    InvalidTransition { from: SwarmPhase, to: SwarmPhase },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerOutcome {
    Pending,
    Completed,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerSummary {
    pub index: usize,
    pub game_id: String,
    pub name: String,
    pub outcome: WorkerOutcome,
}

/// Tags attached to the scorecard: the caller's tags followed by
/// `["agent", name]`, or `["playback", guid]` when the agent is a recording
/// named `game.agent.count.guid.recording.jsonl`.
pub fn scorecard_tags(agent_name: &str, tags: &[String]) -> Vec<String> {
    let mut all = tags.to_vec();
    if agent_name.ends_with(RECORDING_SUFFIX) {
        let parts: Vec<&str> = agent_name.split('.').collect();
        let guid = if parts.len() >= 4 {
            parts[parts.len() - 3]
        } else {
            "unknown"
        };
        all.push("playback".to_string());
        all.push(guid.to_string());
    } else {
        all.push("agent".to_string());
        all.push(agent_name.to_string());
    }
    all
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_phases() {
        let mut phase = SwarmPhase::Init;
        for next in [
            SwarmPhase::SessionOpen,
            SwarmPhase::WorkersRunning,
            SwarmPhase::SessionClosed,
            SwarmPhase::CleanedUp,
            SwarmPhase::Done,
        ] {
            phase.advance(next).unwrap();
        }
        assert!(phase.is_terminal());
        assert!(phase.advance(SwarmPhase::Failed).is_err());
    }

    #[test]
    fn test_no_skips_or_backward_moves() {
        let mut phase = SwarmPhase::Init;
        assert!(matches!(
            phase.advance(SwarmPhase::WorkersRunning),
            Err(SwarmError::InvalidTransition { .. })
        ));
        phase.advance(SwarmPhase::SessionOpen).unwrap();
        assert!(phase.advance(SwarmPhase::Init).is_err());
        phase.advance(SwarmPhase::Failed).unwrap();
        assert!(phase.advance(SwarmPhase::WorkersRunning).is_err());
    }

    #[test]
    fn test_agent_tags() {
        let tags = scorecard_tags("random", &["nightly".to_string()]);
        assert_eq!(tags, vec!["nightly", "agent", "random"]);
    }

    #[test]
    fn test_playback_tags() {
        let tags = scorecard_tags("ls20.random.80.1234-abcd.recording.jsonl", &[]);
        assert_eq!(tags, vec!["playback", "1234-abcd"]);

        let short = scorecard_tags("x.recording.jsonl", &[]);
        assert_eq!(short, vec!["playback", "unknown"]);
    }
}
