// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Playback Strategy
//
// Replays the actions stored in a recording, in order. Lines that carry no
// `action_input` (scorecard entries, markers) are skipped.

use arcswarm_core::{ActionInput, AgentError, FrameData};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::info;

use super::runner::Strategy;
use crate::infrastructure::recorder::Recorder;

/// Hard cap on replayed actions.
pub const PLAYBACK_MAX_ACTIONS: u32 = 10_000;

pub struct PlaybackStrategy {
    path: PathBuf,
    actions: Vec<ActionInput>,
    cursor: usize,
}

impl PlaybackStrategy {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            actions: Vec::new(),
            cursor: 0,
        }
    }

    pub fn remaining(&self) -> usize {
        self.actions.len().saturating_sub(self.cursor)
    }
}

#[async_trait]
impl Strategy for PlaybackStrategy {
    fn name(&self) -> String {
        "playback".to_string()
    }

    fn max_actions(&self) -> u32 {
        PLAYBACK_MAX_ACTIONS
    }

    async fn prepare(&mut self) -> Result<(), AgentError> {
        let events = Recorder::read_events(&self.path)
            .await
            .map_err(|e| AgentError::Recording(e.to_string()))?;

        self.actions = events
            .into_iter()
            .filter_map(|event| event.data.get("action_input").cloned())
            .filter_map(|value| serde_json::from_value(value).ok())
            .collect();
        self.cursor = 0;

        info!(
            "Loaded {} actions from {}",
            self.actions.len(),
            self.path.display()
        );
        Ok(())
    }

    fn is_done(&self, _frames: &[FrameData], _latest: &FrameData) -> bool {
        self.cursor >= self.actions.len()
    }

    fn choose_action(&mut self, _frames: &[FrameData], _latest: &FrameData) -> Option<ActionInput> {
        let action = self.actions.get(self.cursor).cloned()?;
        self.cursor += 1;
        Some(action)
    }
}
