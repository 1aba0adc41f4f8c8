// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Swarm Domain Layer
//!
//! Pure types for the orchestrator. No I/O dependencies.
//!
//! | Module | Key Types |
//! |--------|-----------|
//! | [`swarm`] | `SwarmPhase`, `SwarmError`, `WorkerSummary`, `scorecard_tags` |

pub mod swarm;

pub use swarm::*;
