// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Swarm Orchestrator
//!
//! Plays every configured game concurrently under one remote scorecard.
//!
//! ## Run Sequence
//! | Step | Phase after | On failure |
//! |------|-------------|------------|
//! | Open scorecard | `SessionOpen` | Fatal, no worker is created |
//! | Create + launch one task per assignment | `WorkersRunning` | Creation failure closes the session, cleans up, fails |
//! | Join every worker | (unchanged) | Worker errors and panics are logged per worker |
//! | Close scorecard, exactly once | `SessionClosed` | Fatal, but cleanup still runs with no report |
//! | Clean up every worker, release transport | `CleanedUp` | Logged per worker, never fatal |
//!
//! Workers share the read-only card id and whatever transport the factory
//! hands them. The orchestrator never interrupts a running worker unless
//! `SwarmConfig::worker_timeout` is set.

use arcswarm_core::{
    Agent, AgentContext, AgentError, CardId, Scorecard, ScorecardApi, ScorecardSession,
    SwarmConfig,
};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use super::AgentFactory;
use crate::domain::{
    scorecard_tags, SwarmError, SwarmPhase, WorkerOutcome, WorkerSummary,
};

type SharedAgent = Arc<Mutex<Box<dyn Agent>>>;

struct Worker {
    index: usize,
    game_id: String,
    name: String,
    agent: SharedAgent,
    outcome: WorkerOutcome,
}

pub struct Swarm {
    config: SwarmConfig,
    tags: Vec<String>,
    factory: Arc<dyn AgentFactory>,
    scorecard: Arc<dyn ScorecardApi>,
    session: ScorecardSession,
    phase: SwarmPhase,
    workers: Vec<Worker>,
}

impl Swarm {
    /// Validate the configuration and agent name. Nothing remote happens
    /// until [`Swarm::run`].
    pub fn new(
        config: SwarmConfig,
        factory: Arc<dyn AgentFactory>,
        scorecard: Arc<dyn ScorecardApi>,
    ) -> Result<Self, SwarmError> {
        config.validate()?;
        if !factory.supports(&config.agent) {
            return Err(SwarmError::UnknownAgent(config.agent.clone()));
        }
        let tags = scorecard_tags(&config.agent, &config.tags);

        Ok(Self {
            config,
            tags,
            factory,
            scorecard,
            session: ScorecardSession::Unopened,
            phase: SwarmPhase::Init,
            workers: Vec::new(),
        })
    }

    pub fn phase(&self) -> SwarmPhase {
        self.phase
    }

    /// Tags sent when the scorecard is opened.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn config(&self) -> &SwarmConfig {
        &self.config
    }

    /// The open session id, if the scorecard is currently open.
    pub fn card_id(&self) -> Option<&CardId> {
        self.session.card_id()
    }

    /// Scorecard page for the session this swarm opened. Stays available
    /// after close, independent of what the close response contained.
    pub fn scorecard_url(&self) -> Option<String> {
        self.session
            .opened_id()
            .map(|id| self.config.scorecard_url(id.as_str()))
    }

    pub fn workers(&self) -> Vec<WorkerSummary> {
        self.workers
            .iter()
            .map(|w| WorkerSummary {
                index: w.index,
                game_id: w.game_id.clone(),
                name: w.name.clone(),
                outcome: w.outcome.clone(),
            })
            .collect()
    }

    /// Run the swarm once and return the aggregated report.
    pub async fn run(&mut self) -> Result<Scorecard, SwarmError> {
        if self.phase != SwarmPhase::Init {
            return Err(SwarmError::AlreadyRun);
        }

        let card_id = match self.scorecard.open(&self.tags).await {
            Ok(id) => id,
            Err(e) => {
                error!("Swarm: failed to open scorecard: {}", e);
                self.phase.advance(SwarmPhase::Failed)?;
                return Err(SwarmError::OpenScorecard(e));
            }
        };
        info!(
            "Swarm: opened scorecard {} for {} workers ({})",
            card_id,
            self.config.worker_count(),
            self.config.agent
        );
        if !self.session.open(card_id.clone()) {
            return Err(SwarmError::InvalidTransition {
                from: self.phase,
                to: SwarmPhase::SessionOpen,
            });
        }
        self.phase.advance(SwarmPhase::SessionOpen)?;

        if let Err(e) = self.create_workers(&card_id) {
            error!("Swarm: {}", e);
            let report = self.close_session().await.ok();
            self.cleanup(report.as_ref()).await;
            self.phase.advance(SwarmPhase::Failed)?;
            return Err(e);
        }

        let deadline = self.config.worker_timeout.map(|t| Instant::now() + t);
        let handles = self.launch_workers();
        self.phase.advance(SwarmPhase::WorkersRunning)?;
        self.join_workers(handles, deadline).await;

        let closed = self.close_session().await;
        self.phase.advance(SwarmPhase::SessionClosed)?;

        self.cleanup(closed.as_ref().ok()).await;
        self.phase.advance(SwarmPhase::CleanedUp)?;

        match closed {
            Ok(report) => {
                self.phase.advance(SwarmPhase::Done)?;
                Ok(report)
            }
            Err(e) => {
                self.phase.advance(SwarmPhase::Failed)?;
                Err(e)
            }
        }
    }

    fn create_workers(&mut self, card_id: &CardId) -> Result<(), SwarmError> {
        for (index, game_id) in self.config.assignments().into_iter().enumerate() {
            let context = AgentContext {
                card_id: card_id.clone(),
                game_id: game_id.clone(),
                agent_name: self.config.agent.clone(),
                root_url: self.config.base_url.clone(),
                tags: self.tags.clone(),
                record: self.config.record,
            };
            let agent = self.factory.create(context)?;
            let name = agent.name();
            debug!("Swarm: created worker {} ({}) for {}", index, name, game_id);

            self.workers.push(Worker {
                index,
                game_id,
                name,
                agent: Arc::new(Mutex::new(agent)),
                outcome: WorkerOutcome::Pending,
            });
        }
        Ok(())
    }

    fn launch_workers(&self) -> Vec<JoinHandle<Result<(), AgentError>>> {
        self.workers
            .iter()
            .map(|worker| {
                let agent = Arc::clone(&worker.agent);
                metrics::counter!("arcswarm_workers_launched_total").increment(1);
                tokio::spawn(async move {
                    let mut agent = agent.lock_owned().await;
                    agent.run().await
                })
            })
            .collect()
    }

    /// Wait for every worker to reach a terminal state.
    async fn join_workers(
        &mut self,
        handles: Vec<JoinHandle<Result<(), AgentError>>>,
        deadline: Option<Instant>,
    ) {
        for (worker, mut handle) in self.workers.iter_mut().zip(handles) {
            let joined = match deadline {
                Some(deadline) => match tokio::time::timeout_at(deadline, &mut handle).await {
                    Ok(joined) => joined,
                    Err(_) => {
                        handle.abort();
                        // A worker that finished before the abort landed keeps its result.
                        match handle.await {
                            Err(e) if e.is_cancelled() => Ok(Err(AgentError::TimedOut)),
                            joined => joined,
                        }
                    }
                },
                None => handle.await,
            };

            worker.outcome = match joined {
                Ok(Ok(())) => {
                    info!("Swarm: worker {} ({}) finished", worker.index, worker.name);
                    WorkerOutcome::Completed
                }
                Ok(Err(e)) => {
                    warn!("Swarm: worker {} ({}) failed: {}", worker.index, worker.name, e);
                    metrics::counter!("arcswarm_worker_failures_total").increment(1);
                    WorkerOutcome::Failed(e.to_string())
                }
                Err(e) => {
                    let e = AgentError::Panicked(e.to_string());
                    error!("Swarm: worker {} ({}) aborted: {}", worker.index, worker.name, e);
                    metrics::counter!("arcswarm_worker_failures_total").increment(1);
                    WorkerOutcome::Failed(e.to_string())
                }
            };
        }
    }

    /// Close the scorecard. The session id is consumed before the request so
    /// a failed close is never retried with the same id.
    async fn close_session(&mut self) -> Result<Scorecard, SwarmError> {
        let card_id = self
            .session
            .take_for_close()
            .ok_or(SwarmError::InvalidTransition {
                from: self.phase,
                to: SwarmPhase::SessionClosed,
            })?;

        debug!("Swarm: closing scorecard {}", card_id);
        let report = self
            .scorecard
            .close(&card_id)
            .await
            .map_err(SwarmError::CloseScorecard)?;

        info!("--- FINAL SCORECARD REPORT ---");
        info!(
            "{}",
            serde_json::to_string_pretty(&report).unwrap_or_else(|e| e.to_string())
        );
        info!(
            "View your scorecard online: {}",
            self.config.scorecard_url(card_id.as_str())
        );
        Ok(report)
    }

    /// Best-effort cleanup of every worker, then release the transport.
    async fn cleanup(&self, report: Option<&Scorecard>) {
        let total = self.workers.len();
        debug!(
            "Swarm cleanup: processing {} agents (report available: {})",
            total,
            report.is_some()
        );

        for worker in &self.workers {
            debug!(
                "Swarm cleanup: cleaning up agent {}/{}: {}",
                worker.index + 1,
                total,
                worker.name
            );
            let mut agent = worker.agent.lock().await;
            match AssertUnwindSafe(agent.cleanup(report)).catch_unwind().await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    error!("Error cleaning up agent {}: {}", worker.name, e);
                    metrics::counter!("arcswarm_cleanup_failures_total").increment(1);
                }
                Err(_) => {
                    error!("Agent {} panicked during cleanup", worker.name);
                    metrics::counter!("arcswarm_cleanup_failures_total").increment(1);
                }
            }
        }

        if let Err(e) = self.scorecard.release().await {
            error!("Error releasing transport session: {}", e);
        }
        debug!("Swarm cleanup: complete");
    }
}
