// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # `arcswarm-core`: Domain Types and Ports
//!
//! Shared vocabulary for the swarm orchestrator, the HTTP SDK and the CLI.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`domain::game`] | Frames, actions and game states |
//! | [`domain::scorecard`] | `CardId`, `Scorecard` report, `ScorecardSession` lifecycle |
//! | [`domain::transport`] | `ScorecardApi` / `GameApi` ports and `RemoteError` |
//! | [`domain::agent`] | `Agent` worker contract, `AgentError`, `CleanupError` |
//! | [`domain::config`] | `SwarmConfig` |
//! | [`domain::settings`] | YAML + environment host settings |

pub mod domain;

pub use domain::*;
