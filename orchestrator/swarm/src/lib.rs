// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # `arcswarm-swarm`: Swarm Orchestrator
//!
//! Plays many games concurrently under one remote scorecard and guarantees
//! the scorecard is closed exactly once and every worker is cleaned up,
//! whatever individual workers do.
//!
//! ## Crate Layout
//!
//! | Module | Layer | Contents |
//! |--------|-------|----------|
//! | [`domain`] | Domain | `SwarmPhase`, `SwarmError`, `WorkerSummary`, scorecard tags |
//! | [`application`] | Application | `Swarm` orchestrator, `AgentFactory` port |
//! | [`infrastructure`] | Infrastructure | `AgentRegistry`, `GameRunner`, strategies, `Recorder` |
//!
//! ## Key Concepts
//!
//! - **Worker**: one `Agent` bound to one game assignment, run on its own task.
//! - **Fan-out/fan-in**: all workers are launched, then all are joined before
//!   the scorecard is closed.
//! - **Best-effort cleanup**: every worker's cleanup runs even if its own run
//!   or the close failed.
//!
//! ## Limitations
//!
//! Workers are not cancelled on process shutdown. A worker that never
//! finishes blocks the swarm unless `SwarmConfig::worker_timeout` is set.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{AgentFactory, Swarm};
pub use domain::*;
pub use infrastructure::agents::AgentRegistry;
