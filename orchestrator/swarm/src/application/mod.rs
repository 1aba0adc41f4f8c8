// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Application Layer
//!
//! The [`Swarm`] orchestrator and the [`AgentFactory`] port it uses to
//! build one worker per game assignment.

pub mod orchestrator;

pub use orchestrator::Swarm;

use crate::domain::SwarmError;
use arcswarm_core::{Agent, AgentContext};

/// Builds workers by agent name.
pub trait AgentFactory: Send + Sync {
    /// Whether `agent_name` can be built. Checked before the scorecard is opened.
    fn supports(&self, agent_name: &str) -> bool;

    fn create(&self, context: AgentContext) -> Result<Box<dyn Agent>, SwarmError>;
}
