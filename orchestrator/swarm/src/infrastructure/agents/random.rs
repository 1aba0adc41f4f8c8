// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Random Strategy
//
// Baseline agent: resets when the game needs it, otherwise picks uniformly
// among the actions the latest frame allows.

use arcswarm_core::{ActionData, ActionInput, FrameData, GameAction, MAX_COORDINATE};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde_json::json;

use super::runner::Strategy;

pub const RANDOM_MAX_ACTIONS: u32 = 80;

const FALLBACK_ACTIONS: [GameAction; 5] = [
    GameAction::Action1,
    GameAction::Action2,
    GameAction::Action3,
    GameAction::Action4,
    GameAction::Action5,
];

pub struct RandomStrategy {
    rng: StdRng,
    max_actions: u32,
}

impl RandomStrategy {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            max_actions: RANDOM_MAX_ACTIONS,
        }
    }

    /// Deterministic variant for tests and reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            max_actions: RANDOM_MAX_ACTIONS,
        }
    }

    pub fn with_max_actions(mut self, max_actions: u32) -> Self {
        self.max_actions = max_actions;
        self
    }
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for RandomStrategy {
    fn name(&self) -> String {
        "random".to_string()
    }

    fn max_actions(&self) -> u32 {
        self.max_actions
    }

    fn choose_action(&mut self, _frames: &[FrameData], latest: &FrameData) -> Option<ActionInput> {
        if latest.state.needs_reset() {
            return Some(ActionInput::simple(GameAction::Reset));
        }

        let allowed: Vec<GameAction> = latest
            .available_actions
            .iter()
            .copied()
            .filter(|a| *a != GameAction::Reset)
            .collect();
        let candidates: &[GameAction] = if allowed.is_empty() {
            &FALLBACK_ACTIONS
        } else {
            &allowed
        };
        let action = *candidates.choose(&mut self.rng)?;

        let data = if action.is_complex() {
            ActionData::at(
                self.rng.random_range(0..=MAX_COORDINATE),
                self.rng.random_range(0..=MAX_COORDINATE),
            )
        } else {
            ActionData::default()
        };

        Some(ActionInput {
            id: action,
            data,
            reasoning: Some(json!(format!("RNG told me to pick {}", action))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcswarm_core::GameState;

    fn frame(state: GameState, available: Vec<GameAction>) -> FrameData {
        FrameData {
            game_id: "g1".into(),
            state,
            available_actions: available,
            ..FrameData::default()
        }
    }

    #[test]
    fn test_resets_when_needed() {
        let mut strategy = RandomStrategy::seeded(7);
        for state in [GameState::NotPlayed, GameState::GameOver] {
            let action = strategy.choose_action(&[], &frame(state, vec![GameAction::Action1]));
            assert_eq!(action.map(|a| a.id), Some(GameAction::Reset));
        }
    }

    #[test]
    fn test_picks_only_available_actions() {
        let mut strategy = RandomStrategy::seeded(7);
        let latest = frame(
            GameState::NotFinished,
            vec![GameAction::Reset, GameAction::Action2, GameAction::Action6],
        );
        for _ in 0..50 {
            let input = strategy.choose_action(&[], &latest).unwrap();
            assert!(matches!(input.id, GameAction::Action2 | GameAction::Action6));
            if input.id == GameAction::Action6 {
                assert!(input.data.x.unwrap() <= MAX_COORDINATE);
                assert!(input.data.y.unwrap() <= MAX_COORDINATE);
            } else {
                assert_eq!(input.data, ActionData::default());
            }
        }
    }

    #[test]
    fn test_falls_back_to_simple_actions() {
        let mut strategy = RandomStrategy::seeded(1);
        let input = strategy
            .choose_action(&[], &frame(GameState::NotFinished, vec![]))
            .unwrap();
        assert!(FALLBACK_ACTIONS.contains(&input.id));
    }
}
