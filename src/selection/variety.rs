//! Variety-aware candidate selection
//!
//! Always returning the single best candidate means every auto-edit of the
//! same song produces the identical clip. Instead the selector draws from
//! the few best candidates with a deliberately flattened weight curve:
//! scores are min-max normalized, then pushed through `0.5 + 0.5·sqrt(x)` so
//! a close runner-up keeps a meaningfully non-trivial probability instead of
//! being crowded out by the leader.
//!
//! The random source is injected so tests can drive the selector with a
//! seeded generator; production uses a request-scoped, entropy-seeded RNG.

use rand::Rng;
use tracing::debug;

use crate::params::SelectionParams;
use crate::selection::rerank::RankedCandidate;
use crate::types::{ClimaxCandidate, SelectionResult};

/// Choose one candidate from the reranked set.
///
/// Modes, checked in order: forced index into the original list (invalid
/// indices are silently ignored), deterministic top pick when
/// `prefer_variety` is false, and flattened weighted-random selection
/// otherwise. `selected_index` always refers to the caller's original,
/// unreranked list.
pub fn select_candidate<R: Rng + ?Sized>(
    original: &[ClimaxCandidate],
    reranked: &[RankedCandidate],
    target_duration: f64,
    prefer_variety: bool,
    candidate_index: Option<usize>,
    params: &SelectionParams,
    rng: &mut R,
) -> SelectionResult {
    // Caller override wins over everything, including scores
    if let Some(index) = candidate_index {
        if let Some(candidate) = original.get(index) {
            return SelectionResult {
                candidate: Some(candidate.clone()),
                selected_index: Some(index),
                selection_reason: format!("forced_index_{}", index),
            };
        }
        debug!(index, "Forced candidate index out of bounds; ignoring");
    }

    if reranked.is_empty() {
        return SelectionResult::empty("no_candidates");
    }

    if !prefer_variety {
        return resolve(
            original,
            reranked,
            0,
            format!("top_reranked_for_{}s", target_duration),
        );
    }

    let eligible: Vec<(usize, &RankedCandidate)> = reranked
        .iter()
        .take(params.variety_pool_size)
        .enumerate()
        .filter(|(_, r)| r.adjusted_score >= params.eligibility_floor)
        .collect();

    match eligible.len() {
        0 => resolve(
            original,
            reranked,
            0,
            format!("top_reranked_for_{}s", target_duration),
        ),
        1 => {
            let (index, ranked) = eligible[0];
            resolve(
                original,
                reranked,
                index,
                format!(
                    "variety_selection_{}_for_{}s",
                    ranked.candidate.kind, target_duration
                ),
            )
        }
        _ => {
            let index = weighted_draw(&eligible, rng);
            resolve(
                original,
                reranked,
                index,
                format!(
                    "variety_selection_{}_for_{}s",
                    reranked[index].candidate.kind, target_duration
                ),
            )
        }
    }
}

/// Flattened weighted-random draw over the eligible pool; returns an index
/// into the reranked list.
fn weighted_draw<R: Rng + ?Sized>(eligible: &[(usize, &RankedCandidate)], rng: &mut R) -> usize {
    let min = eligible
        .iter()
        .map(|(_, r)| r.adjusted_score)
        .fold(f32::INFINITY, f32::min);
    let max = eligible
        .iter()
        .map(|(_, r)| r.adjusted_score)
        .fold(f32::NEG_INFINITY, f32::max);
    let range = if max > min { max - min } else { 1.0 };

    // Min-max normalize, then flatten: sqrt compresses the gap between best
    // and worst, the 0.5 floor keeps every pool member in play
    let weights: Vec<f64> = eligible
        .iter()
        .map(|(_, r)| {
            let normalized = ((r.adjusted_score - min) / range) as f64;
            0.5 + 0.5 * normalized.sqrt()
        })
        .collect();
    let total: f64 = weights.iter().sum();

    let roll: f64 = rng.gen::<f64>();
    let mut cumulative = 0.0;
    for ((index, _), weight) in eligible.iter().zip(&weights) {
        cumulative += weight / total;
        if roll < cumulative {
            return *index;
        }
    }

    // Floating-point edge: roll landed at the very top of the range
    eligible[eligible.len() - 1].0
}

/// Build the result for the reranked candidate at `reranked_index`,
/// resolving the index back into the caller's original list.
fn resolve(
    original: &[ClimaxCandidate],
    reranked: &[RankedCandidate],
    reranked_index: usize,
    reason: String,
) -> SelectionResult {
    let chosen = &reranked[reranked_index].candidate;
    let original_index = original
        .iter()
        .position(|c| c.same_identity(chosen))
        .unwrap_or(reranked_index);

    SelectionResult {
        candidate: Some(chosen.clone()),
        selected_index: Some(original_index),
        selection_reason: reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn cand(start: f64, score: f32, kind: &str) -> ClimaxCandidate {
        ClimaxCandidate::new(start, start + 2.0, score, kind)
    }

    fn ranked(candidates: &[ClimaxCandidate]) -> Vec<RankedCandidate> {
        let mut out: Vec<RankedCandidate> = candidates
            .iter()
            .map(|c| RankedCandidate {
                candidate: c.clone(),
                adjusted_score: c.score,
            })
            .collect();
        out.sort_by(|a, b| {
            b.adjusted_score
                .partial_cmp(&a.adjusted_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        out
    }

    #[test]
    fn test_forced_index_wins_regardless_of_score() {
        let original = vec![cand(10.0, 0.9, "drop"), cand(40.0, 0.1, "onset")];
        let reranked = ranked(&original);
        let mut rng = StdRng::seed_from_u64(7);

        let result = select_candidate(
            &original,
            &reranked,
            15.0,
            true,
            Some(1),
            &SelectionParams::default(),
            &mut rng,
        );
        assert_eq!(result.selected_index, Some(1));
        assert_eq!(result.selection_reason, "forced_index_1");
        assert_eq!(result.candidate.unwrap().start_time, 40.0);
    }

    #[test]
    fn test_out_of_bounds_forced_index_ignored() {
        let original = vec![cand(10.0, 0.9, "drop")];
        let reranked = ranked(&original);
        let mut rng = StdRng::seed_from_u64(7);

        let result = select_candidate(
            &original,
            &reranked,
            15.0,
            false,
            Some(99),
            &SelectionParams::default(),
            &mut rng,
        );
        assert_eq!(
            result.selection_reason, "top_reranked_for_15s",
            "Invalid forced index falls through to normal selection"
        );
        assert_eq!(result.selected_index, Some(0));
    }

    #[test]
    fn test_no_variety_is_deterministic_top_pick() {
        let original = vec![cand(10.0, 0.6, "drop"), cand(40.0, 0.9, "energy")];
        let reranked = ranked(&original);

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let result = select_candidate(
                &original,
                &reranked,
                15.0,
                false,
                None,
                &SelectionParams::default(),
                &mut rng,
            );
            assert_eq!(result.selected_index, Some(1), "Top pick must not vary");
            assert_eq!(result.selection_reason, "top_reranked_for_15s");
        }
    }

    #[test]
    fn test_empty_reranked_yields_no_candidate() {
        let mut rng = StdRng::seed_from_u64(7);
        let result = select_candidate(
            &[],
            &[],
            15.0,
            true,
            None,
            &SelectionParams::default(),
            &mut rng,
        );
        assert!(result.candidate.is_none());
        assert_eq!(result.selection_reason, "no_candidates");
    }

    #[test]
    fn test_single_eligible_candidate_returned_directly() {
        let original = vec![cand(10.0, 0.8, "drop"), cand(40.0, 0.1, "onset")];
        let reranked = ranked(&original);
        let mut rng = StdRng::seed_from_u64(7);

        let result = select_candidate(
            &original,
            &reranked,
            15.0,
            true,
            None,
            &SelectionParams::default(),
            &mut rng,
        );
        assert_eq!(result.selected_index, Some(0));
        assert_eq!(result.selection_reason, "variety_selection_drop_for_15s");
    }

    #[test]
    fn test_all_below_floor_falls_back_to_top() {
        let original = vec![cand(10.0, 0.2, "drop"), cand(40.0, 0.1, "onset")];
        let reranked = ranked(&original);
        let mut rng = StdRng::seed_from_u64(7);

        let result = select_candidate(
            &original,
            &reranked,
            15.0,
            true,
            None,
            &SelectionParams::default(),
            &mut rng,
        );
        assert_eq!(result.selected_index, Some(0));
        assert_eq!(result.selection_reason, "top_reranked_for_15s");
    }

    #[test]
    fn test_selected_index_refers_to_original_order() {
        // Original order differs from score order
        let original = vec![
            cand(10.0, 0.3, "onset"),
            cand(40.0, 0.95, "drop"),
            cand(70.0, 0.6, "energy"),
        ];
        let reranked = ranked(&original);
        let mut rng = StdRng::seed_from_u64(7);

        let result = select_candidate(
            &original,
            &reranked,
            15.0,
            false,
            None,
            &SelectionParams::default(),
            &mut rng,
        );
        assert_eq!(
            result.selected_index,
            Some(1),
            "Index must map back to the unreranked list"
        );
    }

    #[test]
    fn test_equal_scores_draw_uniformly() {
        let original = vec![
            cand(10.0, 0.8, "drop"),
            cand(40.0, 0.8, "drop"),
            cand(70.0, 0.8, "drop"),
        ];
        let reranked = ranked(&original);
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts = [0usize; 3];

        for _ in 0..3000 {
            let result = select_candidate(
                &original,
                &reranked,
                15.0,
                true,
                None,
                &SelectionParams::default(),
                &mut rng,
            );
            counts[result.selected_index.unwrap()] += 1;
        }

        for (i, &count) in counts.iter().enumerate() {
            assert!(
                count > 800,
                "Equal scores should draw near-uniformly, candidate {} got {}/3000",
                i,
                count
            );
        }
    }
}
