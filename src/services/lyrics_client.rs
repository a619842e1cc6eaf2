//! Lyrics transcription client
//!
//! HTTP client for the speech-to-text transcription service. The
//! transcription model itself is out of scope; this client fetches timed
//! lyric segments and the instrumental flag for chorus detection.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::error::CollaboratorError;
use crate::services::LyricsTranscriber;
use crate::types::Transcription;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Request body for the transcription service.
#[derive(Debug, Serialize)]
struct TranscribeRequest<'a> {
    audio_url: &'a str,
}

/// Reqwest-backed transcription client.
pub struct LyricsClient {
    http_client: Client,
    base_url: String,
}

impl LyricsClient {
    /// Create a client for the transcription service at `base_url`.
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
impl LyricsTranscriber for LyricsClient {
    async fn transcribe(&self, audio_url: &str) -> Result<Transcription, CollaboratorError> {
        let url = format!("{}/transcribe", self.base_url);
        debug!(%url, audio_url, "Requesting lyrics transcription");

        let response = self
            .http_client
            .post(&url)
            .json(&TranscribeRequest { audio_url })
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

        let transcription: Transcription = response
            .json()
            .await
            .map_err(|e| CollaboratorError::Parse(e.to_string()))?;

        debug!(
            segments = transcription.segments.len(),
            is_instrumental = transcription.is_instrumental,
            language = ?transcription.language,
            "Transcription received"
        );

        Ok(transcription)
    }
}
