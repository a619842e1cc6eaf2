//! Cross-source candidate merging
//!
//! Signal analysis and lyrics analysis find climaxes independently. When
//! both point at the same moment that agreement is strong evidence, so the
//! existing candidate gets a score boost and a composite kind instead of the
//! list growing a near-duplicate. Lyric candidates with no signal
//! counterpart are appended as-is.

use tracing::debug;

use crate::params::SelectionParams;
use crate::types::ClimaxCandidate;

/// Merge lyric-derived candidates into a signal-derived candidate list.
///
/// Returns a new list sorted by score descending; the inputs are never
/// mutated. The merged list never shrinks: every lyric candidate either
/// boosts an existing candidate or joins the list.
pub fn merge_candidates(
    signal: &[ClimaxCandidate],
    lyrics: &[ClimaxCandidate],
    params: &SelectionParams,
) -> Vec<ClimaxCandidate> {
    let mut merged: Vec<ClimaxCandidate> = signal.to_vec();
    let mut boosted = 0usize;
    let mut appended = 0usize;

    for lyric in lyrics {
        match merged
            .iter_mut()
            .find(|c| c.is_near(lyric.start_time, params.merge_window_secs))
        {
            Some(existing) => {
                let kind = if existing.kind == "chorus" {
                    "chorus".to_string()
                } else {
                    format!("{}+chorus", existing.kind)
                };
                *existing = existing.boosted(params.merge_boost, kind);
                boosted += 1;
            }
            None => {
                merged.push(lyric.clone());
                appended += 1;
            }
        }
    }

    merged.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    if !lyrics.is_empty() {
        debug!(
            signal = signal.len(),
            lyrics = lyrics.len(),
            boosted,
            appended,
            "Candidate merge complete"
        );
    }

    merged
}
