//! Core types for the highlight selection engine
//!
//! Everything here is a plain value object: candidates are created fresh per
//! request, consumed synchronously by the selection pipeline, and discarded.
//! Merging and reranking produce new candidates rather than mutating inputs.

use serde::{Deserialize, Serialize};

// ============================================================================
// Candidates
// ============================================================================

/// A scored, timestamped hypothesis for where a song's most engaging moment
/// begins.
///
/// `kind` is an open vocabulary ("drop", "energy_peak", "onset_burst",
/// "combined", "chorus", ...). Composite kinds produced by merging are joined
/// with `+` (e.g. "drop+chorus"). Two candidates describe the same real event
/// when their start times fall within a small proximity window; exact
/// identity for index resolution is `(start_time, kind)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimaxCandidate {
    /// Suggested clip start, seconds from track start (includes lead-in)
    pub start_time: f64,
    /// The climax itself, seconds from track start
    pub drop_time: f64,
    /// Confidence score, clamped to [0.0, 1.0]
    pub score: f32,
    /// Candidate flavor tag (open vocabulary)
    #[serde(rename = "type")]
    pub kind: String,
}

impl ClimaxCandidate {
    /// Create a candidate with score clamped to [0.0, 1.0] and times clamped
    /// to be non-negative.
    pub fn new(start_time: f64, drop_time: f64, score: f32, kind: impl Into<String>) -> Self {
        Self {
            start_time: start_time.max(0.0),
            drop_time: drop_time.max(0.0),
            score: score.clamp(0.0, 1.0),
            kind: kind.into(),
        }
    }

    /// New candidate with `amount` added to the score (clamped) and `kind`
    /// replaced. Used by the merger when two sources agree on an event.
    pub fn boosted(&self, amount: f32, kind: impl Into<String>) -> Self {
        Self {
            start_time: self.start_time,
            drop_time: self.drop_time,
            score: (self.score + amount).clamp(0.0, 1.0),
            kind: kind.into(),
        }
    }

    /// True when `other_start` falls within `window` seconds of this
    /// candidate's start time.
    pub fn is_near(&self, other_start: f64, window: f64) -> bool {
        (self.start_time - other_start).abs() <= window
    }

    /// Exact identity match used to resolve a candidate back to its position
    /// in the caller's original list.
    pub fn same_identity(&self, other: &ClimaxCandidate) -> bool {
        self.start_time == other.start_time && self.kind == other.kind
    }
}

// ============================================================================
// Lyrics
// ============================================================================

/// A timed lyric line from the transcription collaborator.
///
/// Segments arrive ordered by `start` with `start <= end`. Fewer than 4
/// segments is insufficient input for chorus detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LyricsSegment {
    /// Transcribed text for this span
    pub text: String,
    /// Span start, seconds from track start
    pub start: f64,
    /// Span end, seconds from track start
    pub end: f64,
}

/// Transcription collaborator output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcription {
    /// True when the track carries no usable vocals; chorus detection is
    /// skipped entirely for instrumental tracks
    #[serde(default)]
    pub is_instrumental: bool,
    /// Detected language code, when known
    #[serde(default)]
    pub language: Option<String>,
    /// Overall transcription confidence (0.0-1.0)
    #[serde(default)]
    pub confidence: f32,
    /// Timed lyric lines ordered by start
    #[serde(default)]
    pub segments: Vec<LyricsSegment>,
}

// ============================================================================
// Signal analysis
// ============================================================================

/// Signal-analysis collaborator output.
///
/// Candidates are produced by the external feature extraction service (beat
/// tracking, energy curves, onset detection); hookline only consumes them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignalAnalysis {
    /// Estimated tempo, beats per minute
    #[serde(default)]
    pub bpm: Option<f64>,
    /// Track duration in seconds
    #[serde(default)]
    pub duration: f64,
    /// Scored climax candidates, typically pre-sorted by score
    #[serde(default)]
    pub climax_candidates: Vec<ClimaxCandidate>,
    /// Raw drop timestamps (diagnostic)
    #[serde(default)]
    pub drops: Vec<f64>,
    /// Raw build-up timestamps (diagnostic)
    #[serde(default)]
    pub builds: Vec<f64>,
    /// Analysis-provided best hook start, if the analyzer computed one
    #[serde(default)]
    pub best_hook_start: Option<f64>,
    /// Analysis-provided best generic 15s window start
    #[serde(default)]
    pub best_15s_start: Option<f64>,
}

// ============================================================================
// Selection results
// ============================================================================

/// Output of the variety-aware selector.
#[derive(Debug, Clone, Serialize)]
pub struct SelectionResult {
    /// Chosen candidate, or None when nothing was selectable
    pub candidate: Option<ClimaxCandidate>,
    /// Position of the chosen candidate in the caller's original,
    /// unreranked list (stable identity for the caller)
    pub selected_index: Option<usize>,
    /// Human-readable reason code naming how the choice was made
    pub selection_reason: String,
}

impl SelectionResult {
    /// Result for the case where no candidate was selectable at all.
    pub fn empty(reason: impl Into<String>) -> Self {
        Self {
            candidate: None,
            selected_index: None,
            selection_reason: reason.into(),
        }
    }
}

/// Final output of the selection pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct HighlightSegment {
    /// Clip start, seconds from track start
    pub start_time: f64,
    /// Clip end, `min(start + target_duration, total_duration)`
    pub end_time: f64,
    /// Original-list index of the chosen candidate, when one was chosen
    pub selected_index: Option<usize>,
    /// Which tier of the selection/fallback chain produced the start
    pub selection_reason: String,
    /// Full candidate inventory considered for this request, for caller
    /// caching and later forced-index requests
    pub candidates: Vec<ClimaxCandidate>,
}

/// Caller options for one selection request.
#[derive(Debug, Clone, Deserialize)]
pub struct SelectionOptions {
    /// Track duration in seconds
    pub total_duration: f64,
    /// Estimated tempo, when known
    #[serde(default)]
    pub bpm: Option<f64>,
    /// Desired clip length in seconds
    #[serde(default = "default_target_duration")]
    pub target_duration: f64,
    /// When true (default), vary the chosen segment across repeated requests
    #[serde(default = "default_prefer_variety")]
    pub prefer_variety: bool,
    /// Forced candidate index into the original list; out-of-bounds values
    /// are silently ignored
    #[serde(default)]
    pub candidate_index: Option<usize>,
    /// Start times from previous edits the caller does not want repeated
    #[serde(default)]
    pub exclude_starts: Vec<f64>,
    /// Request chorus detection from lyrics
    #[serde(default)]
    pub include_lyrics: bool,
}

fn default_target_duration() -> f64 {
    15.0
}

fn default_prefer_variety() -> bool {
    true
}

impl Default for SelectionOptions {
    fn default() -> Self {
        Self {
            total_duration: 0.0,
            bpm: None,
            target_duration: default_target_duration(),
            prefer_variety: default_prefer_variety(),
            candidate_index: None,
            exclude_starts: Vec::new(),
            include_lyrics: false,
        }
    }
}
