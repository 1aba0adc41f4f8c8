// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use arcswarm_core::{
    ActionRequest, CardId, FrameData, GameApi, GameInfo, RemoteError, Scorecard, ScorecardApi,
};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::types::{
    check_error_field, extract_card_id, CloseScorecardRequest, CommandRequest,
    OpenScorecardRequest,
};

/// Timeout for scorecard open/close. These are control calls, not transfers.
pub const SCORECARD_TIMEOUT: Duration = Duration::from_secs(5);

const JSON_UTF8: &str = "application/json; charset=utf-8";

/// Client for the ARC game and scorecard services.
///
/// Clones share one connection pool and one cookie jar, so every worker
/// created from the same client continues the same server-side session.
#[derive(Debug, Clone)]
pub struct ArcClient {
    base_url: String,
    client: Client,
    scorecard_timeout: Duration,
}

impl ArcClient {
    /// Create a new client with the API key sent on every request.
    pub fn new(base_url: impl Into<String>, api_key: &str) -> Result<Self, RemoteError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "X-API-Key",
            HeaderValue::from_str(api_key)
                .map_err(|e| RemoteError::Transport(format!("invalid API key header: {}", e)))?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .cookie_store(true)
            .default_headers(headers)
            .build()
            .map_err(|e| RemoteError::Transport(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
            scorecard_timeout: SCORECARD_TIMEOUT,
        })
    }

    /// Override the scorecard call timeout.
    pub fn with_scorecard_timeout(mut self, timeout: Duration) -> Self {
        self.scorecard_timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST an explicitly UTF-8 encoded JSON body and return the parsed,
    /// error-checked response.
    async fn post_json<T: Serialize>(
        &self,
        path: &str,
        body: &T,
        timeout: Option<Duration>,
    ) -> Result<Value, RemoteError> {
        let url = format!("{}{}", self.base_url, path);
        let payload = serde_json::to_vec(body)
            .map_err(|e| RemoteError::Transport(format!("failed to encode request: {}", e)))?;

        let mut req = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, JSON_UTF8)
            .body(payload);
        if let Some(timeout) = timeout {
            req = req.timeout(timeout);
        }

        let response = req.send().await.map_err(map_reqwest_error)?;
        read_json(response).await
    }
}

fn map_reqwest_error(e: reqwest::Error) -> RemoteError {
    if e.is_timeout() {
        RemoteError::Timeout(e.to_string())
    } else {
        RemoteError::Transport(e.to_string())
    }
}

async fn read_json(response: reqwest::Response) -> Result<Value, RemoteError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(RemoteError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let body: Value = response
        .json()
        .await
        .map_err(|e| RemoteError::MalformedResponse(format!("invalid JSON body: {}", e)))?;
    check_error_field(&body)?;
    Ok(body)
}

#[async_trait]
impl ScorecardApi for ArcClient {
    async fn open(&self, tags: &[String]) -> Result<CardId, RemoteError> {
        let body = self
            .post_json(
                "/api/scorecard/open",
                &OpenScorecardRequest { tags },
                Some(self.scorecard_timeout),
            )
            .await
            .inspect_err(|e| error!("Failed to open scorecard: {}", e))?;

        let card_id = extract_card_id(&body)?;
        info!("Opened scorecard {}", card_id);
        Ok(card_id)
    }

    async fn close(&self, card_id: &CardId) -> Result<Scorecard, RemoteError> {
        let body = self
            .post_json(
                "/api/scorecard/close",
                &CloseScorecardRequest {
                    card_id: card_id.as_str(),
                },
                Some(self.scorecard_timeout),
            )
            .await
            .inspect_err(|e| error!("Failed to close scorecard {}: {}", card_id, e))?;

        let scorecard: Scorecard = serde_json::from_value(body)
            .map_err(|e| RemoteError::MalformedResponse(format!("invalid scorecard: {}", e)))?;
        info!("Closed scorecard {}", card_id);
        Ok(scorecard)
    }

    async fn release(&self) -> Result<(), RemoteError> {
        // The pool and cookie jar go away with the last clone.
        debug!("Releasing HTTP session for {}", self.base_url);
        Ok(())
    }
}

#[async_trait]
impl GameApi for ArcClient {
    async fn list_games(&self) -> Result<Vec<GameInfo>, RemoteError> {
        let url = format!("{}/api/games", self.base_url);
        let response = self
            .client
            .get(&url)
            .timeout(self.scorecard_timeout)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let body = read_json(response).await?;
        serde_json::from_value(body)
            .map_err(|e| RemoteError::MalformedResponse(format!("invalid game list: {}", e)))
    }

    async fn send_action(&self, request: &ActionRequest) -> Result<FrameData, RemoteError> {
        let path = format!("/api/cmd/{}", request.action.name());
        let body = self
            .post_json(&path, &CommandRequest::from(request), None)
            .await?;
        serde_json::from_value(body)
            .map_err(|e| RemoteError::MalformedResponse(format!("invalid frame: {}", e)))
    }
}
