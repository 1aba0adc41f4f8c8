// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Concrete agents and the registry that builds them by name.

pub mod playback;
pub mod random;
pub mod registry;
pub mod runner;

pub use playback::PlaybackStrategy;
pub use random::RandomStrategy;
pub use registry::{AgentConstructor, AgentRegistry};
pub use runner::{GameRunner, Strategy};
