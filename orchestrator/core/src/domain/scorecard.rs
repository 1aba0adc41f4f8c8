// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Scorecard Domain Types
//!
//! - [`CardId`]: opaque identifier returned when a scorecard is opened.
//! - [`Scorecard`]: the aggregated report returned when it is closed.
//! - [`ScorecardSession`]: `Unopened → Open → Closed` lifecycle owned by one
//!   orchestrator run.
//!
//! The report shape belongs to the remote service. Only the fields the CLI
//! summarizes are typed; everything else is kept in [`Scorecard::extra`] so
//! the report can be printed back unchanged.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::game::GameState;

/// Opaque scorecard session identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-game results inside a [`Scorecard`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Card {
    pub game_id: String,
    pub total_plays: u32,
    pub guids: Vec<String>,
    pub scores: Vec<u32>,
    pub states: Vec<GameState>,
    pub actions: Vec<u32>,
    pub resets: Vec<u32>,
}

impl Card {
    pub fn high_score(&self) -> u32 {
        self.scores.iter().copied().max().unwrap_or(0)
    }

    pub fn won(&self) -> bool {
        self.states.contains(&GameState::Win)
    }

    pub fn total_actions(&self) -> u32 {
        self.actions.iter().sum()
    }
}

/// Aggregated report produced by closing a scorecard session.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Scorecard {
    pub card_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opaque: Option<serde_json::Value>,
    pub cards: BTreeMap<String, Card>,
    /// Fields the service returns that are not modelled above.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Scorecard {
    /// Card for a single game, if the game was played under this scorecard.
    pub fn card(&self, game_id: &str) -> Option<&Card> {
        self.cards.get(game_id)
    }

    pub fn played(&self) -> usize {
        self.cards.values().filter(|c| c.total_plays > 0).count()
    }

    pub fn won(&self) -> usize {
        self.cards.values().filter(|c| c.won()).count()
    }

    pub fn total_actions(&self) -> u32 {
        self.cards.values().map(Card::total_actions).sum()
    }

    pub fn score(&self) -> u32 {
        self.cards.values().map(Card::high_score).sum()
    }
}

/// Lifecycle of the remote scorecard owned by one orchestrator run.
///
/// # Invariants
///
/// - [`ScorecardSession::card_id`] is only available while `Open`.
/// - [`ScorecardSession::take_for_close`] moves to `Closed` and hands out the
///   identifier exactly once, even if the close request later fails.
/// - `Closed` keeps the identifier for display only.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScorecardSession {
    #[default]
    Unopened,
    Open(CardId),
    Closed(CardId),
}

impl ScorecardSession {
    /// Record a freshly opened session. Returns `false` if the session was
    /// already opened once.
    pub fn open(&mut self, card_id: CardId) -> bool {
        match self {
            ScorecardSession::Unopened => {
                *self = ScorecardSession::Open(card_id);
                true
            }
            _ => false,
        }
    }

    pub fn card_id(&self) -> Option<&CardId> {
        match self {
            ScorecardSession::Open(id) => Some(id),
            _ => None,
        }
    }

    /// Consume the identifier for the single close call.
    pub fn take_for_close(&mut self) -> Option<CardId> {
        match self {
            ScorecardSession::Open(id) => {
                let id = id.clone();
                *self = ScorecardSession::Closed(id.clone());
                Some(id)
            }
            ScorecardSession::Unopened | ScorecardSession::Closed(_) => None,
        }
    }

    /// Identifier the session was opened with, open or closed. Used for the
    /// scorecard page link, never for another close.
    pub fn opened_id(&self) -> Option<&CardId> {
        match self {
            ScorecardSession::Open(id) | ScorecardSession::Closed(id) => Some(id),
            ScorecardSession::Unopened => None,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, ScorecardSession::Closed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_session_closes_once() {
        let mut session = ScorecardSession::default();
        assert!(session.card_id().is_none());
        assert!(session.opened_id().is_none());
        assert!(session.take_for_close().is_none());
        assert_eq!(session, ScorecardSession::Unopened);

        assert!(session.open(CardId::new("abc")));
        assert_eq!(session.card_id().map(CardId::as_str), Some("abc"));
        assert!(!session.open(CardId::new("other")));

        assert_eq!(session.take_for_close(), Some(CardId::new("abc")));
        assert!(session.is_closed());
        assert!(session.card_id().is_none());
        assert_eq!(session.opened_id(), Some(&CardId::new("abc")));
        assert!(session.take_for_close().is_none());
        assert!(!session.open(CardId::new("again")));
    }

    #[test]
    fn test_scorecard_totals() {
        let report: Scorecard = serde_json::from_value(json!({
            "card_id": "abc",
            "tags": ["agent", "random"],
            "won": 1,
            "cards": {
                "g1": {"game_id": "g1", "total_plays": 2, "scores": [1, 3],
                       "states": ["GAME_OVER", "WIN"], "actions": [10, 5]},
                "g2": {"game_id": "g2", "total_plays": 1, "scores": [2],
                       "states": ["NOT_FINISHED"], "actions": [7]},
                "g3": {"game_id": "g3"}
            }
        }))
        .unwrap();

        assert_eq!(report.played(), 2);
        assert_eq!(report.won(), 1);
        assert_eq!(report.total_actions(), 22);
        assert_eq!(report.score(), 5);
        assert_eq!(report.card("g1").map(Card::high_score), Some(3));
        assert_eq!(report.extra.get("won"), Some(&json!(1)));
    }

    #[test]
    fn test_unknown_fields_survive_reserialization() {
        let raw = json!({"card_id": "abc", "api_key": "k", "score": 4});
        let report: Scorecard = serde_json::from_value(raw).unwrap();
        let back = serde_json::to_value(&report).unwrap();
        assert_eq!(back["api_key"], "k");
        assert_eq!(back["score"], 4);
    }
}
