//! Tunable selection parameters
//!
//! The thresholds here are empirically chosen, not derived from a model, so
//! they are carried as configuration rather than hard-coded constants. The
//! engine takes a `SelectionParams` per call; services construct one at
//! startup (optionally from TOML) and share it.

use serde::{Deserialize, Serialize};

/// Tunable thresholds and windows for the selection engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionParams {
    /// Score boost applied when a lyric-derived candidate agrees with a
    /// signal-derived candidate.
    ///
    /// Valid range: [0.0, 1.0]
    /// Default: 0.2
    pub merge_boost: f32,

    /// Proximity window for cross-source candidate merging, seconds.
    ///
    /// Valid range: [0.0, 30.0]
    /// Default: 5.0
    pub merge_window_secs: f64,

    /// Proximity window for matching caller-excluded start times, seconds.
    ///
    /// Valid range: [0.0, 30.0]
    /// Default: 3.0
    pub exclusion_window_secs: f64,

    /// Minimum spacing between accepted chorus sections, seconds.
    ///
    /// Valid range: [0.0, 60.0]
    /// Default: 15.0
    pub chorus_dedup_window_secs: f64,

    /// Jaccard similarity threshold above which two lyric sections count as
    /// a repeat.
    ///
    /// Valid range: (0.0, 1.0]
    /// Default: 0.6
    pub chorus_similarity_threshold: f64,

    /// Lead-in added before a detected chorus so the clip doesn't start on
    /// the downbeat, seconds.
    ///
    /// Valid range: [0.0, 10.0]
    /// Default: 3.0
    pub chorus_lead_in_secs: f64,

    /// Maximum chorus candidates emitted per track.
    ///
    /// Valid range: [1, 10]
    /// Default: 3
    pub max_chorus_candidates: usize,

    /// Minimum adjusted score for a candidate to enter the variety pool.
    ///
    /// Valid range: [0.0, 1.0]
    /// Default: 0.25
    pub eligibility_floor: f32,

    /// Size of the variety pool drawn from the top of the reranked list.
    ///
    /// Valid range: [1, 10]
    /// Default: 3
    pub variety_pool_size: usize,
}

impl Default for SelectionParams {
    fn default() -> Self {
        Self {
            merge_boost: 0.2,
            merge_window_secs: 5.0,
            exclusion_window_secs: 3.0,
            chorus_dedup_window_secs: 15.0,
            chorus_similarity_threshold: 0.6,
            chorus_lead_in_secs: 3.0,
            max_chorus_candidates: 3,
            eligibility_floor: 0.25,
            variety_pool_size: 3,
        }
    }
}
