// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Game Runner
//!
//! The standard worker: drives one game through the [`GameApi`] using a
//! pluggable [`Strategy`] for move selection.
//!
//! ## Loop
//! | Condition | Result |
//! |-----------|--------|
//! | `strategy.is_done(..)` | Stop, `Ok` |
//! | `action_counter >= max_actions` | Stop, `Ok` |
//! | Strategy has no further action | Stop, `Ok` |
//! | Command or recording fails | `Err(AgentError)` |

use arcswarm_core::{
    ActionInput, ActionRequest, Agent, AgentContext, AgentError, CleanupError, FrameData, GameApi,
    GameState, Scorecard,
};
use async_trait::async_trait;
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::infrastructure::recorder::Recorder;

/// Move selection for a [`GameRunner`].
#[async_trait]
pub trait Strategy: Send {
    /// Short name used in worker names and recording file names.
    fn name(&self) -> String;

    fn max_actions(&self) -> u32;

    /// Called once before the first action.
    async fn prepare(&mut self) -> Result<(), AgentError> {
        Ok(())
    }

    fn is_done(&self, _frames: &[FrameData], latest: &FrameData) -> bool {
        latest.state == GameState::Win
    }

    /// Next action, or `None` when the strategy has nothing left to play.
    fn choose_action(&mut self, frames: &[FrameData], latest: &FrameData) -> Option<ActionInput>;
}

pub struct GameRunner<S: Strategy> {
    context: AgentContext,
    strategy: S,
    game: Arc<dyn GameApi>,
    frames: Vec<FrameData>,
    action_counter: u32,
    guid: Option<String>,
    recorder: Option<Recorder>,
    cleaned_up: bool,
}

impl<S: Strategy> GameRunner<S> {
    pub fn new(
        context: AgentContext,
        strategy: S,
        game: Arc<dyn GameApi>,
        recordings_dir: &Path,
    ) -> Self {
        let recorder = context.record.then(|| {
            let prefix = Recorder::prefix(&context.game_id, &strategy.name(), strategy.max_actions());
            Recorder::new(recordings_dir, &prefix)
        });
        let frames = vec![FrameData::initial(context.game_id.clone())];

        Self {
            context,
            strategy,
            game,
            frames,
            action_counter: 0,
            guid: None,
            recorder,
            cleaned_up: false,
        }
    }

    pub fn action_counter(&self) -> u32 {
        self.action_counter
    }

    pub fn frames(&self) -> &[FrameData] {
        &self.frames
    }

    pub fn recorder(&self) -> Option<&Recorder> {
        self.recorder.as_ref()
    }

    fn latest(&self) -> &FrameData {
        // `frames` always holds at least the initial frame.
        &self.frames[self.frames.len() - 1]
    }

    async fn take_action(&mut self, input: ActionInput) -> Result<FrameData, AgentError> {
        let request = ActionRequest {
            game_id: self.context.game_id.clone(),
            card_id: self.context.card_id.clone(),
            guid: self.guid.clone(),
            action: input.id,
            data: input.data,
            reasoning: input.reasoning.clone(),
        };
        let mut frame = self.game.send_action(&request).await?;
        frame.action_input = input;
        if let Some(guid) = &frame.guid {
            self.guid = Some(guid.clone());
        }
        Ok(frame)
    }
}

#[async_trait]
impl<S: Strategy> Agent for GameRunner<S> {
    fn name(&self) -> String {
        format!(
            "{}.{}.{}",
            self.context.game_id,
            self.strategy.name(),
            self.strategy.max_actions()
        )
    }

    fn game_id(&self) -> &str {
        &self.context.game_id
    }

    async fn run(&mut self) -> Result<(), AgentError> {
        let started = Instant::now();
        self.strategy.prepare().await?;

        while self.action_counter < self.strategy.max_actions() {
            if self.strategy.is_done(&self.frames, self.latest()) {
                break;
            }
            let latest = self.latest().clone();
            let Some(input) = self.strategy.choose_action(&self.frames, &latest) else {
                debug!("{} - strategy has no further actions", self.context.game_id);
                break;
            };

            let action = input.id;
            let frame = self.take_action(input).await?;
            if let Some(recorder) = &self.recorder {
                recorder
                    .record(&frame)
                    .await
                    .map_err(|e| AgentError::Recording(e.to_string()))?;
            }
            self.action_counter += 1;

            let fps = self.action_counter as f64 / started.elapsed().as_secs_f64().max(f64::EPSILON);
            info!(
                "{} - {}: count {}, levels completed {}, avg fps {:.2}",
                self.context.game_id, action, self.action_counter, frame.levels_completed, fps
            );
            self.frames.push(frame);
        }

        info!(
            "{} - finished after {} actions in state {:?}",
            self.context.game_id,
            self.action_counter,
            self.latest().state
        );
        Ok(())
    }

    async fn cleanup(&mut self, report: Option<&Scorecard>) -> Result<(), CleanupError> {
        if self.cleaned_up {
            return Ok(());
        }
        self.cleaned_up = true;

        let Some(recorder) = &self.recorder else {
            return Ok(());
        };

        let entry = match report.and_then(|r| r.card(&self.context.game_id)) {
            Some(card) => serde_json::to_value(card)
                .map_err(|e| CleanupError::Internal(e.to_string()))?,
            None => {
                warn!("{} - no scorecard available for recording", self.context.game_id);
                json!({ "game_id": self.context.game_id, "scorecard": null })
            }
        };
        recorder
            .record(&entry)
            .await
            .map_err(|e| CleanupError::Recording(e.to_string()))?;

        info!(
            "recording for {} is available in {}",
            self.context.game_id,
            recorder.path().display()
        );
        Ok(())
    }
}
