// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// JSONL Game Recorder
//
// One file per worker run:
//   {recordings_dir}/{game_id}.{agent}.{max_actions}.{guid}.recording.jsonl
// Each line is {"timestamp": RFC3339, "data": <event>}. Recordings double as
// input for the playback agent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::domain::RECORDING_SUFFIX;

#[derive(Debug, Error)]
pub enum RecorderError {
    #[error("IO error on {path}: {error}")]
    Io {
        path: String,
        error: std::io::Error,
    },

    #[error("JSON error on line {line}: {error}")]
    Json { line: usize, error: serde_json::Error },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedEvent {
    pub timestamp: DateTime<Utc>,
    pub data: serde_json::Value,
}

#[derive(Debug, Clone)]
pub struct Recorder {
    path: PathBuf,
    guid: String,
}

impl Recorder {
    pub fn new(dir: impl AsRef<Path>, prefix: &str) -> Self {
        let guid = Uuid::new_v4().to_string();
        let path = dir
            .as_ref()
            .join(format!("{}.{}{}", prefix, guid, RECORDING_SUFFIX));
        Self { path, guid }
    }

    /// `{game_id}.{agent_name}.{max_actions}`
    pub fn prefix(game_id: &str, agent_name: &str, max_actions: u32) -> String {
        format!("{}.{}.{}", game_id, agent_name, max_actions)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn guid(&self) -> &str {
        &self.guid
    }

    /// Append one event, creating the directory and file on first use.
    pub async fn record<T: Serialize>(&self, data: &T) -> Result<(), RecorderError> {
        let event = RecordedEvent {
            timestamp: Utc::now(),
            data: serde_json::to_value(data).map_err(|error| RecorderError::Json { line: 0, error })?,
        };
        let mut line = serde_json::to_vec(&event).map_err(|error| RecorderError::Json { line: 0, error })?;
        line.push(b'\n');

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|error| self.io_error(error))?;
        }
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|error| self.io_error(error))?;
        file.write_all(&line).await.map_err(|error| self.io_error(error))?;
        file.flush().await.map_err(|error| self.io_error(error))?;
        Ok(())
    }

    fn io_error(&self, error: std::io::Error) -> RecorderError {
        RecorderError::Io {
            path: self.path.display().to_string(),
            error,
        }
    }

    /// Read every event of a recording. Blank lines are skipped.
    pub async fn read_events(path: impl AsRef<Path>) -> Result<Vec<RecordedEvent>, RecorderError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|error| RecorderError::Io {
                path: path.display().to_string(),
                error,
            })?;

        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                serde_json::from_str(line).map_err(|error| RecorderError::Json { line: i + 1, error })
            })
            .collect()
    }
}
