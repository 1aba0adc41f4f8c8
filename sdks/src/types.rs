// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Types
//!
//! Request bodies for the scorecard and command endpoints, and helpers for
//! reading their loosely-typed responses.

use arcswarm_core::{ActionRequest, CardId, RemoteError};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct OpenScorecardRequest<'a> {
    pub tags: &'a [String],
}

#[derive(Debug, Serialize)]
pub struct CloseScorecardRequest<'a> {
    pub card_id: &'a str,
}

/// Body of `POST /api/cmd/{ACTION}`.
#[derive(Debug, Serialize)]
pub struct CommandRequest<'a> {
    pub game_id: &'a str,
    pub card_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guid: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<&'a Value>,
}

impl<'a> From<&'a ActionRequest> for CommandRequest<'a> {
    fn from(request: &'a ActionRequest) -> Self {
        let (x, y) = if request.action.is_complex() {
            (request.data.x, request.data.y)
        } else {
            (None, None)
        };
        Self {
            game_id: &request.game_id,
            card_id: request.card_id.as_str(),
            guid: request.guid.as_deref(),
            x,
            y,
            reasoning: request.reasoning.as_ref(),
        }
    }
}

/// Surface an `error` field in an otherwise successful response. The key's
/// presence is the failure, whatever its value.
pub fn check_error_field(body: &Value) -> Result<(), RemoteError> {
    match body.get("error") {
        None => Ok(()),
        Some(Value::String(message)) => Err(RemoteError::Api(message.clone())),
        Some(other) => Err(RemoteError::Api(other.to_string())),
    }
}

/// Read `card_id` from an open response. Strings are taken as-is, other
/// scalars are stringified.
pub fn extract_card_id(body: &Value) -> Result<CardId, RemoteError> {
    match body.get("card_id") {
        Some(Value::String(id)) if !id.is_empty() => Ok(CardId::new(id.clone())),
        Some(value @ (Value::Number(_) | Value::Bool(_))) => Ok(CardId::new(value.to_string())),
        Some(other) => Err(RemoteError::MalformedResponse(format!(
            "unusable card_id: {}",
            other
        ))),
        None => Err(RemoteError::MalformedResponse(
            "response has no card_id field".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcswarm_core::{ActionData, GameAction};
    use serde_json::json;

    #[test]
    fn test_card_id_forms() {
        assert_eq!(
            extract_card_id(&json!({"card_id": "abc"})).unwrap(),
            CardId::new("abc")
        );
        assert_eq!(
            extract_card_id(&json!({"card_id": 42})).unwrap(),
            CardId::new("42")
        );
        assert!(matches!(
            extract_card_id(&json!({"id": "abc"})),
            Err(RemoteError::MalformedResponse(_))
        ));
        assert!(extract_card_id(&json!({"card_id": ""})).is_err());
        assert!(extract_card_id(&json!({"card_id": null})).is_err());
    }

    #[test]
    fn test_error_field() {
        assert!(check_error_field(&json!({"card_id": "x"})).is_ok());
        assert!(matches!(
            check_error_field(&json!({"card_id": "x", "error": null})),
            Err(RemoteError::Api(_))
        ));
        match check_error_field(&json!({"error": "bad key"})) {
            Err(RemoteError::Api(msg)) => assert_eq!(msg, "bad key"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_command_body_drops_coordinates_for_simple_actions() {
        let request = ActionRequest {
            game_id: "ls20".into(),
            card_id: CardId::new("abc"),
            guid: Some("g-1".into()),
            action: GameAction::Action1,
            data: ActionData::at(3, 4),
            reasoning: None,
        };
        let body = serde_json::to_value(CommandRequest::from(&request)).unwrap();
        assert_eq!(body, json!({"game_id": "ls20", "card_id": "abc", "guid": "g-1"}));

        let complex = ActionRequest {
            action: GameAction::Action6,
            ..request
        };
        let body = serde_json::to_value(CommandRequest::from(&complex)).unwrap();
        assert_eq!(body["x"], 3);
        assert_eq!(body["y"], 4);
    }
}
