// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Transport Ports
//!
//! Domain interfaces for the remote scorecard and game services.
//! Implementations live in the SDK crate (`ArcClient`); tests use in-memory
//! fakes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::game::{ActionData, FrameData, GameAction};
use super::scorecard::{CardId, Scorecard};

/// Failure talking to the remote service.
#[derive(Debug, Clone, Error)]
pub enum RemoteError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("API error: {0}")]
    Api(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Scorecard lifecycle calls.
#[async_trait]
pub trait ScorecardApi: Send + Sync {
    /// Open a scorecard attributed with `tags`.
    async fn open(&self, tags: &[String]) -> Result<CardId, RemoteError>;

    /// Close the scorecard and return the aggregated report. The id must not
    /// be reused afterwards.
    async fn close(&self, card_id: &CardId) -> Result<Scorecard, RemoteError>;

    /// Release the shared transport session once the swarm is done with it.
    async fn release(&self) -> Result<(), RemoteError> {
        Ok(())
    }
}

/// A game listed by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameInfo {
    pub game_id: String,
    #[serde(default)]
    pub title: String,
}

/// One command sent to a running game.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionRequest {
    pub game_id: String,
    pub card_id: CardId,
    pub guid: Option<String>,
    pub action: GameAction,
    pub data: ActionData,
    pub reasoning: Option<serde_json::Value>,
}

/// Game service calls made by workers.
#[async_trait]
pub trait GameApi: Send + Sync {
    async fn list_games(&self) -> Result<Vec<GameInfo>, RemoteError>;

    async fn send_action(&self, request: &ActionRequest) -> Result<FrameData, RemoteError>;
}
