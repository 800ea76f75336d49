// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of GreenSlot.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

use std::time::Duration;

use async_trait::async_trait;
use greenslot_core::{DecisionConfig, DecisionService};
use greenslot_types::{DecisionRequest, DecisionResponse};
use reqwest::Client;
use tracing::{debug, error, info, warn};

use crate::errors::{AdapterError, AdapterResult};

const NON_JSON_ERROR: &str = "Non-JSON response from backend";

/// REST client for the start-decision backend
#[derive(Debug, Clone)]
pub struct HttpDecisionClient {
    base_url: String,
    client: Client,
    max_retries: u32,
    retry_delay: Duration,
}

impl HttpDecisionClient {
    pub fn new(base_url: impl Into<String>) -> AdapterResult<Self> {
        Self::with_timeout(base_url, Duration::from_secs(10))
    }

    fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> AdapterResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AdapterError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            client,
            max_retries: 3,
            retry_delay: Duration::from_millis(500),
        })
    }

    pub fn from_config(config: &DecisionConfig) -> AdapterResult<Self> {
        info!("Initializing decision client: {}", config.base_url);
        Ok(
            Self::with_timeout(&config.base_url, Duration::from_secs(config.timeout_secs))?
                .with_retry_config(
                    config.max_retries,
                    Duration::from_millis(config.retry_delay_ms),
                ),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST the request to `/decision`.
    ///
    /// A non-2xx status is an error. A 2xx body that is not a decision document
    /// is answered as `ok: false` so it can never read as a trigger.
    pub async fn post_decision(
        &self,
        request: &DecisionRequest,
    ) -> AdapterResult<DecisionResponse> {
        let url = format!("{}/decision", self.base_url);
        debug!(
            "POST {} when={} emergency={:?}",
            url, request.when, request.emergency
        );

        let response = self
            .retry_request(|| async { self.client.post(&url).json(request).send().await })
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!("Decision service status {}: {}", status, body);
            return Err(AdapterError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        match serde_json::from_str::<DecisionResponse>(&body) {
            Ok(decision) => {
                debug!(
                    "Decision: ok={} triggered={} inside_interval={}",
                    decision.ok, decision.triggered, decision.inside_interval
                );
                Ok(decision)
            }
            Err(e) => {
                warn!("{} ({}): {}", NON_JSON_ERROR, e, body);
                Ok(DecisionResponse {
                    ok: false,
                    error: Some(NON_JSON_ERROR.to_owned()),
                    ..DecisionResponse::default()
                })
            }
        }
    }

    /// Retry transport failures with exponential backoff
    async fn retry_request<F, Fut>(&self, mut request_fn: F) -> AdapterResult<reqwest::Response>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<reqwest::Response, reqwest::Error>>,
    {
        let mut attempts = 0;
        let mut delay = self.retry_delay;

        loop {
            attempts += 1;
            match request_fn().await {
                Ok(response) => return Ok(response),
                Err(e) if attempts >= self.max_retries => {
                    error!("Request failed after {} attempts: {}", attempts, e);
                    return Err(AdapterError::Http(e));
                }
                Err(e) => {
                    warn!(
                        "Request failed (attempt {}/{}): {}. Retrying in {:?}",
                        attempts, self.max_retries, e, delay
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
            }
        }
    }

    #[must_use]
    pub fn with_retry_config(mut self, max_retries: u32, retry_delay: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_delay = retry_delay;
        self
    }
}

#[async_trait]
impl DecisionService for HttpDecisionClient {
    async fn request_decision(
        &self,
        request: &DecisionRequest,
    ) -> anyhow::Result<DecisionResponse> {
        Ok(self.post_decision(request).await?)
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use greenslot_types::ScoreColor;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn request() -> DecisionRequest {
        let when = DateTime::parse_from_rfc3339("2025-03-10T14:30:00+02:00").unwrap();
        DecisionRequest::emergency(when)
    }

    #[tokio::test]
    async fn test_post_decision_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/decision")
            .match_body(Matcher::Json(json!({
                "when": "2025-03-10T14:30:00+02:00",
                "emergency": true
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "ok": true,
                    "triggered": true,
                    "inside_interval": true,
                    "details": {
                        "Start": "2025-03-10 14:00:00",
                        "End": "2025-03-10 16:00:00",
                        "Scor_pred": 81.2,
                        "Color": "Green"
                    }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = HttpDecisionClient::new(server.url()).unwrap();
        let decision = client.post_decision(&request()).await.unwrap();

        assert!(decision.ok);
        assert!(decision.triggered);
        let details = decision.details.unwrap();
        assert_eq!(details.color, Some(ScoreColor::Green));
        assert_eq!(details.score, Some(81.2));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_json_body_is_not_ok() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/decision")
            .with_status(200)
            .with_body("<html>Internal proxy page</html>")
            .create_async()
            .await;

        let client = HttpDecisionClient::new(server.url()).unwrap();
        let decision = client.post_decision(&request()).await.unwrap();

        assert!(!decision.ok);
        assert!(!decision.triggered);
        assert_eq!(decision.error.as_deref(), Some(NON_JSON_ERROR));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_status_is_api_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/decision")
            .with_status(503)
            .with_body("backend down")
            .expect(1)
            .create_async()
            .await;

        let client = HttpDecisionClient::new(server.url()).unwrap();
        let result = client.post_decision(&request()).await;

        assert!(matches!(result, Err(AdapterError::Api { status: 503, .. })));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_transport_failure_after_retries() {
        // Nothing listens on the discard port
        let client = HttpDecisionClient::new("http://127.0.0.1:9")
            .unwrap()
            .with_retry_config(2, Duration::from_millis(1));

        let result = client.post_decision(&request()).await;
        assert!(matches!(result, Err(AdapterError::Http(_))));

        let via_trait = client.request_decision(&request()).await;
        assert!(via_trait.is_err());
    }

    #[tokio::test]
    async fn test_base_url_trailing_slash() {
        let client = HttpDecisionClient::new("http://localhost:5000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
    }
}
