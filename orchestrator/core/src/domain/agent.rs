// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Agent Capability (Game Session Worker contract)
//!
//! A worker plays one game to completion under a shared scorecard session.
//! The orchestrator only ever sees this trait:
//!
//! | Call | Contract |
//! |------|----------|
//! | [`Agent::run`] | Blocks until win, game over, action limit or a fault. Expected game endings are `Ok`. |
//! | [`Agent::cleanup`] | Idempotent and best-effort. Safe after a successful, failed or never-started `run`. |
//!
//! Concrete agents are selected by name through an `AgentFactory` in the
//! swarm crate.

use async_trait::async_trait;
use thiserror::Error;

use super::scorecard::{CardId, Scorecard};
use super::transport::RemoteError;

/// Unexpected failure while a worker was playing.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Remote call failed: {0}")]
    Remote(#[from] RemoteError),

    #[error("Recording error: {0}")]
    Recording(String),

    #[error("Worker exceeded its time limit")]
    TimedOut,

    #[error("Worker panicked: {0}")]
    Panicked(String),

    #[error("Internal agent error: {0}")]
    Internal(String),
}

/// Failure inside a worker's cleanup. Logged by the caller, never propagated.
#[derive(Debug, Error)]
pub enum CleanupError {
    #[error("Recording error: {0}")]
    Recording(String),

    #[error("Internal cleanup error: {0}")]
    Internal(String),
}

/// Everything a worker is bound to when the orchestrator creates it.
///
/// `card_id` is a read-only copy of the open session id; workers never
/// open or close the scorecard themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentContext {
    pub card_id: CardId,
    pub game_id: String,
    pub agent_name: String,
    pub root_url: String,
    pub tags: Vec<String>,
    pub record: bool,
}

#[async_trait]
pub trait Agent: Send {
    /// Display name, used for logging and recordings.
    fn name(&self) -> String;

    fn game_id(&self) -> &str;

    async fn run(&mut self) -> Result<(), AgentError>;

    async fn cleanup(&mut self, report: Option<&Scorecard>) -> Result<(), CleanupError>;
}
