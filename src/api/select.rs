//! Highlight selection endpoint
//!
//! Thin HTTP wrapper over the selection pipeline. The enclosing product's
//! wire contract lives elsewhere; this endpoint exists so the engine can run
//! as a standalone service with the same inputs/outputs the pipeline takes.

use axum::{extract::State, routing::post, Json, Router};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::selection::pipeline::select_highlight_segment;
use crate::types::{HighlightSegment, SelectionOptions};
use crate::AppState;

/// POST /v1/highlight request body.
#[derive(Debug, Deserialize)]
pub struct HighlightRequest {
    /// Locator for the audio asset, passed through to the collaborators
    pub audio_url: String,
    /// Selection options (durations, variety, exclusions, ...)
    #[serde(flatten)]
    pub options: SelectionOptions,
}

/// POST /v1/highlight
///
/// Runs one selection. Collaborator failures degrade to the fallback chain;
/// this handler only errors on malformed requests.
pub async fn select_highlight(
    State(state): State<AppState>,
    Json(request): Json<HighlightRequest>,
) -> ApiResult<Json<HighlightSegment>> {
    let request_id = Uuid::new_v4();
    info!(
        %request_id,
        audio_url = %request.audio_url,
        target_duration = request.options.target_duration,
        prefer_variety = request.options.prefer_variety,
        "Highlight selection requested"
    );

    // Request-scoped, entropy-seeded RNG: repeated and concurrent requests
    // are statistically independent
    let mut rng = StdRng::from_entropy();

    let segment = select_highlight_segment(
        &state.engine,
        state.analyzer.as_ref(),
        state.transcriber.as_ref(),
        &request.audio_url,
        &request.options,
        &mut rng,
    )
    .await;

    info!(
        %request_id,
        start = segment.start_time,
        end = segment.end_time,
        reason = %segment.selection_reason,
        "Highlight selected"
    );

    Ok(Json(segment))
}

/// Build selection routes
pub fn select_routes() -> Router<AppState> {
    Router::new().route("/v1/highlight", post(select_highlight))
}
