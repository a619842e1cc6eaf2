//! External collaborator interfaces
//!
//! The engine consumes two upstream services it does not implement: signal
//! analysis (beat tracking, energy curves, climax candidates) and lyrics
//! transcription. Both are modeled as async traits returning
//! result-or-failure values; the orchestrator branches on the result rather
//! than catching errors for control flow, and failure of either collaborator
//! never fails a selection request.

use async_trait::async_trait;

use crate::error::CollaboratorError;
use crate::types::{SignalAnalysis, Transcription};

pub mod lyrics_client;
pub mod signal_client;

pub use lyrics_client::LyricsClient;
pub use signal_client::SignalClient;

/// Signal-analysis collaborator: audio locator in, scored candidates out.
#[async_trait]
pub trait SignalAnalyzer: Send + Sync {
    /// Analyze a track and return climax candidates plus track-level
    /// features (bpm, duration, precomputed best starts).
    async fn analyze(
        &self,
        audio_url: &str,
        target_duration: f64,
    ) -> Result<SignalAnalysis, CollaboratorError>;
}

/// Lyrics-transcription collaborator: audio locator in, timed segments out.
#[async_trait]
pub trait LyricsTranscriber: Send + Sync {
    /// Transcribe a track's vocals into timed lyric segments.
    async fn transcribe(&self, audio_url: &str) -> Result<Transcription, CollaboratorError>;
}
