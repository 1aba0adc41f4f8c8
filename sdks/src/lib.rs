// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! arcswarm SDK
//!
//! HTTP transport for the ARC scorecard and game services. [`ArcClient`]
//! implements both `ScorecardApi` and `GameApi` from `arcswarm-core`.

pub mod client;
pub mod types;

pub use client::{ArcClient, SCORECARD_TIMEOUT};
