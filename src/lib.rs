//! hookline - Highlight-Segment Selection Engine
//!
//! Picks where in a song a short highlight clip should start by combining
//! signal-derived climax candidates with lyrics-derived chorus candidates,
//! adapting preference to the requested clip length, varying the pick across
//! repeated requests, and falling back to music-theory heuristics when no
//! analysis data exists.
//!
//! The engine (`selection`) is pure and synchronous; the only suspending
//! operations are the two external collaborators (`services`). A thin axum
//! service (`api`) exposes the engine over HTTP.

pub mod api;
pub mod config;
pub mod error;
pub mod params;
pub mod selection;
pub mod services;
pub mod types;

pub use crate::error::{ApiError, ApiResult, CollaboratorError};
pub use crate::params::SelectionParams;
pub use crate::selection::{select_highlight_segment, SelectionEngine};
pub use crate::types::{
    ClimaxCandidate, HighlightSegment, LyricsSegment, SelectionOptions, SelectionResult,
    SignalAnalysis, Transcription,
};

use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::services::{LyricsTranscriber, SignalAnalyzer};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Pure selection engine (tunables only, no shared mutable state)
    pub engine: SelectionEngine,
    /// Signal-analysis collaborator
    pub analyzer: Arc<dyn SignalAnalyzer>,
    /// Lyrics-transcription collaborator
    pub transcriber: Arc<dyn LyricsTranscriber>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(
        engine: SelectionEngine,
        analyzer: Arc<dyn SignalAnalyzer>,
        transcriber: Arc<dyn LyricsTranscriber>,
    ) -> Self {
        Self {
            engine,
            analyzer,
            transcriber,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::health_routes())
        .merge(api::select_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
