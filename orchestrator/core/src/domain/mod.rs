// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Domain Layer
//!
//! Pure types and traits. No HTTP or filesystem access beyond reading the
//! settings file.

pub mod agent;
pub mod config;
pub mod game;
pub mod scorecard;
pub mod settings;
pub mod transport;

pub use agent::{Agent, AgentContext, AgentError, CleanupError};
pub use config::{ConfigError, SwarmConfig};
pub use game::{ActionData, ActionInput, FrameData, GameAction, GameState, MAX_COORDINATE};
pub use scorecard::{Card, CardId, Scorecard, ScorecardSession};
pub use settings::Settings;
pub use transport::{ActionRequest, GameApi, GameInfo, RemoteError, ScorecardApi};
