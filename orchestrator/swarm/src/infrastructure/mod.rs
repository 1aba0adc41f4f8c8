// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Infrastructure Layer
//!
//! Agent implementations and the JSONL recorder.

pub mod agents;
pub mod recorder;
