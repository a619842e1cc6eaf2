//! Selection pipeline orchestration
//!
//! Sequences the engine per request: merge signal and chorus candidates,
//! rerank for the requested clip length, select with variety, and when
//! nothing is selectable walk the fallback chain (analysis best hook →
//! analysis best window → duration heuristic → track start). Selection
//! never fails; every request gets a best-effort segment with the producing
//! tier recorded in the selection reason.
//!
//! The engine itself is pure synchronous computation. Only the two
//! collaborator calls suspend, each bounded by an explicit timeout, and
//! either failing simply shrinks the candidate set.

use std::time::Duration;

use rand::Rng;
use tracing::{debug, info, warn};

use crate::params::SelectionParams;
use crate::selection::chorus::detect_chorus_candidates;
use crate::selection::fallback::heuristic_start_time;
use crate::selection::merge::merge_candidates;
use crate::selection::rerank::{rerank_candidates, RerankOutcome};
use crate::selection::variety::select_candidate;
use crate::services::{LyricsTranscriber, SignalAnalyzer};
use crate::types::{
    ClimaxCandidate, HighlightSegment, SelectionOptions, SelectionResult, SignalAnalysis,
    Transcription,
};

/// Deadline for the signal-analysis collaborator.
pub const SIGNAL_ANALYSIS_TIMEOUT: Duration = Duration::from_secs(120);

/// Deadline for the lyrics-transcription collaborator.
pub const LYRICS_TIMEOUT: Duration = Duration::from_secs(60);

/// Pure selection core: candidates in, one segment out.
///
/// Holds only tunables; every call is independent, so one engine may serve
/// any number of concurrent requests without coordination.
#[derive(Debug, Clone, Default)]
pub struct SelectionEngine {
    params: SelectionParams,
}

impl SelectionEngine {
    pub fn new(params: SelectionParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &SelectionParams {
        &self.params
    }

    /// Run merge → rerank → select → fallback chain over already-fetched
    /// inputs.
    ///
    /// `selected_index` and forced `candidate_index` both refer to the
    /// merged candidate list echoed back in `candidates`, so a caller can
    /// cache it and later force a specific pick.
    pub fn select_segment<R: Rng + ?Sized>(
        &self,
        analysis: &SignalAnalysis,
        chorus_candidates: &[ClimaxCandidate],
        options: &SelectionOptions,
        rng: &mut R,
    ) -> HighlightSegment {
        let total_duration = if options.total_duration > 0.0 {
            options.total_duration
        } else {
            analysis.duration
        };
        let bpm = options.bpm.or(analysis.bpm);

        let merged = merge_candidates(
            &analysis.climax_candidates,
            chorus_candidates,
            &self.params,
        );

        let result = match rerank_candidates(
            &merged,
            options.target_duration,
            &options.exclude_starts,
            Some(total_duration),
            &self.params,
        ) {
            RerankOutcome::Ranked(reranked) => select_candidate(
                &merged,
                &reranked,
                options.target_duration,
                options.prefer_variety,
                options.candidate_index,
                &self.params,
                rng,
            ),
            RerankOutcome::ExhaustedByExclusion => best_pre_exclusion(&merged),
        };

        let (start_time, selected_index, selection_reason) = match result.candidate {
            Some(candidate) => {
                debug!(
                    start = candidate.start_time,
                    kind = %candidate.kind,
                    reason = %result.selection_reason,
                    "Candidate selected"
                );
                (
                    candidate.start_time,
                    result.selected_index,
                    result.selection_reason,
                )
            }
            None => {
                let (start, reason) = self.fallback_start(analysis, total_duration, options.target_duration, bpm);
                info!(start, reason, "No selectable candidate; using fallback");
                (start, None, reason.to_string())
            }
        };

        let end_time = if total_duration > 0.0 {
            (start_time + options.target_duration).min(total_duration)
        } else {
            start_time + options.target_duration
        };

        HighlightSegment {
            start_time,
            end_time,
            selected_index,
            selection_reason,
            candidates: merged,
        }
    }

    /// Candidate-free fallback chain, in tier order.
    fn fallback_start(
        &self,
        analysis: &SignalAnalysis,
        total_duration: f64,
        target_duration: f64,
        bpm: Option<f64>,
    ) -> (f64, &'static str) {
        if let Some(hook) = analysis.best_hook_start {
            return (hook.max(0.0), "analysis_best_hook");
        }
        if let Some(window) = analysis.best_15s_start {
            return (window.max(0.0), "analysis_best_window");
        }
        if total_duration > 0.0 {
            return (
                heuristic_start_time(total_duration, target_duration, bpm),
                "duration_heuristic",
            );
        }
        (0.0, "start_of_track")
    }
}

/// Caller exclusions removed everything: fall back to the single
/// highest-scored candidate from the pre-exclusion list.
fn best_pre_exclusion(merged: &[ClimaxCandidate]) -> SelectionResult {
    let best = merged.iter().enumerate().max_by(|(_, a), (_, b)| {
        a.score
            .partial_cmp(&b.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    match best {
        Some((index, candidate)) => SelectionResult {
            candidate: Some(candidate.clone()),
            selected_index: Some(index),
            selection_reason: "fallback_after_exclusion".to_string(),
        },
        None => SelectionResult::empty("no_candidates"),
    }
}

/// Full per-request orchestration, collaborators included.
///
/// Both collaborator calls are bounded by explicit timeouts and cancelled on
/// expiry; failure of either degrades to a smaller (possibly empty)
/// candidate set rather than failing the request.
pub async fn select_highlight_segment<R: Rng + ?Sized>(
    engine: &SelectionEngine,
    analyzer: &dyn SignalAnalyzer,
    transcriber: &dyn LyricsTranscriber,
    audio_url: &str,
    options: &SelectionOptions,
    rng: &mut R,
) -> HighlightSegment {
    let analysis = match tokio::time::timeout(
        SIGNAL_ANALYSIS_TIMEOUT,
        analyzer.analyze(audio_url, options.target_duration),
    )
    .await
    {
        Ok(Ok(analysis)) => analysis,
        Ok(Err(err)) => {
            warn!(%err, "Signal analysis unavailable; proceeding without candidates");
            SignalAnalysis::default()
        }
        Err(_) => {
            warn!(
                timeout_secs = SIGNAL_ANALYSIS_TIMEOUT.as_secs(),
                "Signal analysis timed out; proceeding without candidates"
            );
            SignalAnalysis::default()
        }
    };

    let chorus_candidates = if options.include_lyrics {
        match tokio::time::timeout(LYRICS_TIMEOUT, transcriber.transcribe(audio_url)).await {
            Ok(Ok(transcription)) => chorus_from_transcription(&transcription, engine.params()),
            Ok(Err(err)) => {
                warn!(%err, "Lyrics transcription unavailable; skipping chorus detection");
                Vec::new()
            }
            Err(_) => {
                warn!(
                    timeout_secs = LYRICS_TIMEOUT.as_secs(),
                    "Lyrics transcription timed out; skipping chorus detection"
                );
                Vec::new()
            }
        }
    } else {
        Vec::new()
    };

    engine.select_segment(&analysis, &chorus_candidates, options, rng)
}

/// Chorus candidates from a transcription; instrumental tracks short-circuit
/// to none.
pub fn chorus_from_transcription(
    transcription: &Transcription,
    params: &SelectionParams,
) -> Vec<ClimaxCandidate> {
    if transcription.is_instrumental {
        debug!("Track is instrumental; skipping chorus detection");
        return Vec::new();
    }
    detect_chorus_candidates(&transcription.segments, params)
}
