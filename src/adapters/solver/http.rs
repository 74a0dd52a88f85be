//! HTTP Weight Solver - reqwest implementation of the WeightSolver port.
//!
//! Sends one POST per Calculate action to the configured solver service.
//! No retries, no request de-duplication, no cancellation: a failure is
//! terminal for the triggering action.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::config::SolverConfig;
use crate::ports::{AhpRequest, BwmRequest, SolverError, WeightResponse, WeightSolver};

/// Weight-solver service client.
pub struct HttpWeightSolver {
    config: SolverConfig,
    client: Client,
}

impl HttpWeightSolver {
    /// Creates a client with the configured request timeout.
    pub fn new(config: SolverConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    async fn post<R: Serialize>(&self, url: &str, request: &R) -> Result<WeightResponse, SolverError> {
        debug!(url, "Posting weight calculation request");

        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| SolverError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // The service reports failures as { "message": ... }; fall back
            // to the raw body when it doesn't.
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
                .unwrap_or_else(|| {
                    if body.is_empty() {
                        "Failed to calculate weights".to_string()
                    } else {
                        body
                    }
                });
            return Err(SolverError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<WeightResponse>()
            .await
            .map_err(|e| SolverError::MalformedResponse(e.to_string()))
    }
}

#[async_trait]
impl WeightSolver for HttpWeightSolver {
    async fn solve_ahp(&self, request: AhpRequest) -> Result<WeightResponse, SolverError> {
        self.post(&self.config.ahp_url(), &request).await
    }

    async fn solve_bwm(&self, request: BwmRequest) -> Result<WeightResponse, SolverError> {
        self.post(&self.config.bwm_url(), &request).await
    }
}
