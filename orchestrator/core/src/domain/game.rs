// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Game Wire Types
//!
//! Frames and actions exchanged with the game service. The orchestrator never
//! interprets these; they exist so that workers and recordings agree on one
//! shape.
//!
//! | Type | Role |
//! |------|------|
//! | [`GameState`] | Terminal / non-terminal state reported with every frame |
//! | [`GameAction`] | `RESET`, `ACTION1`..`ACTION7`, serialized as its numeric id |
//! | [`ActionInput`] | The action that produced a frame, echoed back by the server |
//! | [`FrameData`] | One observation returned by `POST /api/cmd/{ACTION}` |

use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest coordinate accepted by complex actions.
pub const MAX_COORDINATE: u8 = 63;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameState {
    #[default]
    NotPlayed,
    NotFinished,
    Win,
    GameOver,
}

impl GameState {
    /// States that must be answered with a `RESET` before play can continue.
    pub fn needs_reset(self) -> bool {
        matches!(self, GameState::NotPlayed | GameState::GameOver)
    }
}

/// Actions understood by the game service.
///
/// On the wire an action is its numeric id (`RESET` = 0); in URLs it is its
/// upper-case name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum GameAction {
    Reset,
    Action1,
    Action2,
    Action3,
    Action4,
    Action5,
    Action6,
    Action7,
}

impl GameAction {
    pub const ALL: [GameAction; 8] = [
        GameAction::Reset,
        GameAction::Action1,
        GameAction::Action2,
        GameAction::Action3,
        GameAction::Action4,
        GameAction::Action5,
        GameAction::Action6,
        GameAction::Action7,
    ];

    pub fn id(self) -> u8 {
        match self {
            GameAction::Reset => 0,
            GameAction::Action1 => 1,
            GameAction::Action2 => 2,
            GameAction::Action3 => 3,
            GameAction::Action4 => 4,
            GameAction::Action5 => 5,
            GameAction::Action6 => 6,
            GameAction::Action7 => 7,
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.id() == id)
    }

    /// Name used in the command URL (`/api/cmd/ACTION1`).
    pub fn name(self) -> &'static str {
        match self {
            GameAction::Reset => "RESET",
            GameAction::Action1 => "ACTION1",
            GameAction::Action2 => "ACTION2",
            GameAction::Action3 => "ACTION3",
            GameAction::Action4 => "ACTION4",
            GameAction::Action5 => "ACTION5",
            GameAction::Action6 => "ACTION6",
            GameAction::Action7 => "ACTION7",
        }
    }

    /// Complex actions carry `x`/`y` coordinates.
    pub fn is_complex(self) -> bool {
        self == GameAction::Action6
    }
}

impl TryFrom<u8> for GameAction {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_id(value).ok_or_else(|| format!("unknown game action id {}", value))
    }
}

impl From<GameAction> for u8 {
    fn from(action: GameAction) -> u8 {
        action.id()
    }
}

impl fmt::Display for GameAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Coordinates for complex actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActionData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<u8>,
}

impl ActionData {
    pub fn at(x: u8, y: u8) -> Self {
        Self {
            x: Some(x.min(MAX_COORDINATE)),
            y: Some(y.min(MAX_COORDINATE)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionInput {
    pub id: GameAction,
    #[serde(default)]
    pub data: ActionData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<serde_json::Value>,
}

impl ActionInput {
    pub fn simple(id: GameAction) -> Self {
        Self {
            id,
            data: ActionData::default(),
            reasoning: None,
        }
    }
}

impl Default for ActionInput {
    fn default() -> Self {
        Self::simple(GameAction::Reset)
    }
}

/// One frame returned by the game service.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameData {
    pub game_id: String,
    pub frame: Vec<Vec<Vec<i32>>>,
    pub state: GameState,
    pub levels_completed: u32,
    pub win_levels: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    pub action_input: ActionInput,
    pub available_actions: Vec<GameAction>,
}

impl FrameData {
    /// Placeholder frame a worker starts from before it has talked to the server.
    pub fn initial(game_id: impl Into<String>) -> Self {
        Self {
            game_id: game_id.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_serializes_as_numeric_id() {
        let input = ActionInput {
            id: GameAction::Action6,
            data: ActionData::at(12, 200),
            reasoning: None,
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["id"], 6);
        assert_eq!(json["data"]["x"], 12);
        assert_eq!(json["data"]["y"], MAX_COORDINATE);
    }

    #[test]
    fn test_unknown_action_id_is_rejected() {
        let result: Result<ActionInput, _> = serde_json::from_str(r#"{"id": 9}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_frame_tolerates_missing_fields() {
        let frame: FrameData = serde_json::from_str(
            r#"{"game_id": "ls20", "state": "NOT_FINISHED", "available_actions": [1, 2, 6]}"#,
        )
        .unwrap();
        assert_eq!(frame.game_id, "ls20");
        assert_eq!(frame.state, GameState::NotFinished);
        assert_eq!(
            frame.available_actions,
            vec![GameAction::Action1, GameAction::Action2, GameAction::Action6]
        );
        assert!(frame.frame.is_empty());
        assert_eq!(frame.action_input.id, GameAction::Reset);
    }

    #[test]
    fn test_needs_reset() {
        assert!(GameState::NotPlayed.needs_reset());
        assert!(GameState::GameOver.needs_reset());
        assert!(!GameState::NotFinished.needs_reset());
        assert!(!GameState::Win.needs_reset());
    }
}
