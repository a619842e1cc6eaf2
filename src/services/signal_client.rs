//! Signal analysis client
//!
//! HTTP client for the audio feature-extraction service. The service does
//! the heavy lifting (beat tracking, energy curves, onset detection) and
//! returns scored climax candidates; this client only moves bytes and maps
//! failures into `CollaboratorError` values the orchestrator can branch on.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::error::CollaboratorError;
use crate::services::SignalAnalyzer;
use crate::types::SignalAnalysis;

/// Analysis requests cover a full decode + feature pass over the track.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Request body for the analysis service.
#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    audio_url: &'a str,
    target_duration: f64,
}

/// Reqwest-backed signal analysis client.
pub struct SignalClient {
    http_client: Client,
    base_url: String,
}

impl SignalClient {
    /// Create a client for the analysis service at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http_client: Client::builder()
                .timeout(DEFAULT_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.into(),
        }
    }

}

#[async_trait]
impl SignalAnalyzer for SignalClient {
    async fn analyze(
        &self,
        audio_url: &str,
        target_duration: f64,
    ) -> Result<SignalAnalysis, CollaboratorError> {
        let url = format!("{}/analyze", self.base_url);
        debug!(%url, audio_url, "Requesting signal analysis");

        let response = self
            .http_client
            .post(&url)
            .json(&AnalyzeRequest {
                audio_url,
                target_duration,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CollaboratorError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let analysis: SignalAnalysis = response
            .json()
            .await
            .map_err(|e| CollaboratorError::Parse(e.to_string()))?;

        debug!(
            candidates = analysis.climax_candidates.len(),
            bpm = ?analysis.bpm,
            duration = analysis.duration,
            "Signal analysis received"
        );

        Ok(analysis)
    }
}
