//! Duration-aware candidate reranking
//!
//! A 10-second clip wants a sharp impact; a 30-second clip has room for a
//! gentler build. Raw candidate scores are rescaled by a kind-priority table
//! keyed to the requested clip length, and starts the caller has already
//! used (and wants not to repeat) are filtered out.
//!
//! Reranking is a pure function: same inputs, same ordered output. It never
//! grows the candidate set and only drops candidates that are excluded or
//! malformed.

use tracing::debug;

use crate::params::SelectionParams;
use crate::types::ClimaxCandidate;

/// Target-duration bucket selecting a kind-priority table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationBucket {
    /// Clips up to 10 seconds: favor hard impacts
    Short,
    /// Clips up to 20 seconds: favor combined/drop moments
    Medium,
    /// Longer clips: favor gentle and vocal passages
    Long,
}

impl DurationBucket {
    /// Bucket for a requested clip length in seconds.
    pub fn for_target(target_duration: f64) -> Self {
        if target_duration <= 10.0 {
            DurationBucket::Short
        } else if target_duration <= 20.0 {
            DurationBucket::Medium
        } else {
            DurationBucket::Long
        }
    }

    /// Multiplicative weight for a candidate kind.
    ///
    /// Kinds outside the table — including composites like `"drop+chorus"`
    /// and `"chorus"` itself — get a neutral 1.0.
    pub fn weight(&self, kind: &str) -> f32 {
        let table: &[(&str, f32)] = match self {
            DurationBucket::Short => &[
                ("impact", 1.5),
                ("dynamic", 1.4),
                ("combined", 1.2),
                ("drop", 1.1),
                ("energy", 1.0),
                ("energy_peak", 1.0),
                ("onset", 0.9),
                ("spectral", 0.8),
                ("vocal", 0.7),
                ("gentle", 0.6),
            ],
            DurationBucket::Medium => &[
                ("combined", 1.4),
                ("drop", 1.3),
                ("energy", 1.2),
                ("energy_peak", 1.1),
                ("onset", 1.1),
                ("dynamic", 1.0),
                ("impact", 1.0),
                ("spectral", 0.9),
                ("vocal", 0.8),
                ("gentle", 0.7),
            ],
            DurationBucket::Long => &[
                ("gentle", 1.3),
                ("vocal", 1.3),
                ("combined", 1.2),
                ("drop", 1.1),
                ("energy", 1.0),
                ("energy_peak", 1.0),
                ("dynamic", 0.9),
                ("onset", 0.8),
                ("spectral", 0.8),
                ("impact", 0.7),
            ],
        };

        table
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, w)| *w)
            .unwrap_or(1.0)
    }
}

/// A candidate paired with its duration-adjusted score.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCandidate {
    pub candidate: ClimaxCandidate,
    pub adjusted_score: f32,
}

/// Reranker output.
#[derive(Debug, Clone, PartialEq)]
pub enum RerankOutcome {
    /// Candidates sorted by adjusted score descending (possibly empty when
    /// the input itself was empty)
    Ranked(Vec<RankedCandidate>),
    /// Caller exclusions removed every candidate; the caller should fall
    /// back to the best pre-exclusion candidate
    ExhaustedByExclusion,
}

/// Rescale candidate scores for the requested clip length and drop
/// caller-excluded starts.
///
/// Malformed candidates are handled defensively: out-of-range scores are
/// clamped, candidates starting past the end of the track are discarded.
/// The caller's input list is never mutated.
pub fn rerank_candidates(
    candidates: &[ClimaxCandidate],
    target_duration: f64,
    exclude_starts: &[f64],
    total_duration: Option<f64>,
    params: &SelectionParams,
) -> RerankOutcome {
    let bucket = DurationBucket::for_target(target_duration);

    let mut ranked: Vec<RankedCandidate> = candidates
        .iter()
        .filter(|c| match total_duration {
            Some(total) if total > 0.0 => c.start_time <= total,
            _ => true,
        })
        .map(|c| {
            // Re-clamp here: candidates deserialized from the wire bypass
            // the constructor
            let score = c.score.clamp(0.0, 1.0);
            RankedCandidate {
                adjusted_score: score * bucket.weight(&c.kind),
                candidate: ClimaxCandidate {
                    score,
                    ..c.clone()
                },
            }
        })
        .collect();

    let had_candidates = !ranked.is_empty();
    ranked.retain(|r| {
        !exclude_starts
            .iter()
            .any(|&x| r.candidate.is_near(x, params.exclusion_window_secs))
    });

    if had_candidates && ranked.is_empty() {
        debug!(
            excluded = exclude_starts.len(),
            "All candidates excluded by caller; signalling fallback"
        );
        return RerankOutcome::ExhaustedByExclusion;
    }

    ranked.sort_by(|a, b| {
        b.adjusted_score
            .partial_cmp(&a.adjusted_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    RerankOutcome::Ranked(ranked)
}
