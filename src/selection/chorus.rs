//! Chorus detection from repeated lyric passages
//!
//! A chorus repeats. Without any audio-side structure analysis, repeated
//! text windows in the transcription are a usable proxy: the lyric sequence
//! is cut into fixed-size sections, sections are compared pairwise by token
//! overlap, and sections that closely resemble another part of the song are
//! emitted as `"chorus"` candidates for the same pipeline that consumes
//! signal-derived candidates.

use std::collections::HashSet;

use tracing::debug;

use crate::params::SelectionParams;
use crate::types::{ClimaxCandidate, LyricsSegment};

/// Minimum segment count for chorus detection to be meaningful.
const MIN_SEGMENTS: usize = 4;

/// Window size bounds (segments per section).
const MIN_WINDOW: usize = 3;
const MAX_WINDOW: usize = 6;

/// Base score for a detected chorus, plus the bonus for choruses that start
/// after the track's opening 30 seconds (more likely a real chorus than an
/// intro refrain).
const CHORUS_BASE_SCORE: f32 = 0.7;
const LATE_CHORUS_BONUS: f32 = 0.1;
const LATE_CHORUS_CUTOFF_SECS: f64 = 30.0;

/// A windowed slice of the lyric sequence.
#[derive(Debug)]
struct Section {
    start: f64,
    tokens: HashSet<String>,
}

/// Detect chorus-style candidates from timed lyric segments.
///
/// Returns at most `params.max_chorus_candidates` candidates sorted by score
/// descending; empty when the transcription is too short to judge
/// repetition.
pub fn detect_chorus_candidates(
    segments: &[LyricsSegment],
    params: &SelectionParams,
) -> Vec<ClimaxCandidate> {
    if segments.len() < MIN_SEGMENTS {
        debug!(
            segment_count = segments.len(),
            "Too few lyric segments for chorus detection"
        );
        return Vec::new();
    }

    let window = (segments.len() / 6).clamp(MIN_WINDOW, MAX_WINDOW);
    let sections: Vec<Section> = segments
        .chunks(window)
        .map(|chunk| Section {
            start: chunk[0].start,
            tokens: tokenize(&join_text(chunk)),
        })
        .collect();

    // A section counts as a chorus when it closely repeats some other
    // section and is not a near-duplicate (in time) of one already accepted.
    let mut accepted: Vec<&Section> = Vec::new();
    for (i, section) in sections.iter().enumerate() {
        let repeats = sections
            .iter()
            .enumerate()
            .any(|(j, other)| i != j && jaccard(&section.tokens, &other.tokens) > params.chorus_similarity_threshold);
        if !repeats {
            continue;
        }

        let near_existing = accepted
            .iter()
            .any(|prev| (section.start - prev.start).abs() <= params.chorus_dedup_window_secs);
        if near_existing {
            continue;
        }

        accepted.push(section);
    }

    let mut candidates: Vec<ClimaxCandidate> = accepted
        .iter()
        .map(|section| {
            let lead_in = params.chorus_lead_in_secs.min(section.start);
            let bonus = if section.start > LATE_CHORUS_CUTOFF_SECS {
                LATE_CHORUS_BONUS
            } else {
                0.0
            };
            ClimaxCandidate::new(
                (section.start - lead_in).max(0.0),
                section.start,
                (CHORUS_BASE_SCORE + bonus).min(1.0),
                "chorus",
            )
        })
        .collect();

    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates.truncate(params.max_chorus_candidates);

    debug!(
        sections = sections.len(),
        window,
        chorus_candidates = candidates.len(),
        "Chorus detection complete"
    );

    candidates
}

/// Space-join the texts of a window of segments.
fn join_text(chunk: &[LyricsSegment]) -> String {
    chunk
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize text for comparison and split into a token set.
///
/// Lowercases, strips everything except alphanumerics (Unicode-aware, so
/// native scripts survive), and collapses whitespace.
fn tokenize(text: &str) -> HashSet<String> {
    let normalized: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    normalized.split_whitespace().map(str::to_string).collect()
}

/// Jaccard index over two token sets; 0 when either set is empty.
fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    intersection as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(text: &str, start: f64, end: f64) -> LyricsSegment {
        LyricsSegment {
            text: text.to_string(),
            start,
            end,
        }
    }

    /// Two identical 6-line blocks, one line per 5 seconds.
    fn repeated_block_lyrics() -> Vec<LyricsSegment> {
        let lines = [
            "walking down the empty street",
            "shadows falling at my feet",
            "calling out your name again",
            "dancing in the pouring rain",
            "nothing ever feels the same",
            "burning like an open flame",
        ];
        let mut segments = Vec::new();
        for block in 0..2 {
            for (i, line) in lines.iter().enumerate() {
                let start = (block * 6 + i) as f64 * 5.0;
                segments.push(seg(line, start, start + 5.0));
            }
        }
        segments
    }

    #[test]
    fn test_too_few_segments_returns_empty() {
        let segments = vec![
            seg("one", 0.0, 1.0),
            seg("two", 1.0, 2.0),
            seg("three", 2.0, 3.0),
        ];
        let result = detect_chorus_candidates(&segments, &SelectionParams::default());
        assert!(result.is_empty(), "Fewer than 4 segments cannot repeat");
    }

    #[test]
    fn test_repeated_block_yields_chorus_at_second_block() {
        let segments = repeated_block_lyrics();
        let candidates = detect_chorus_candidates(&segments, &SelectionParams::default());

        assert!(!candidates.is_empty(), "Exact repeat must be detected");
        assert!(candidates.iter().all(|c| c.kind == "chorus"));
        assert!(
            candidates.iter().any(|c| c.drop_time == 30.0),
            "Second block start (30s) should surface as a chorus drop, got {:?}",
            candidates.iter().map(|c| c.drop_time).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_lead_in_clamped_at_track_start() {
        let segments = repeated_block_lyrics();
        let candidates = detect_chorus_candidates(&segments, &SelectionParams::default());

        let first = candidates
            .iter()
            .find(|c| c.drop_time == 0.0)
            .expect("First block repeats too");
        assert_eq!(first.start_time, 0.0, "Lead-in cannot precede the track");

        let second = candidates.iter().find(|c| c.drop_time == 30.0).unwrap();
        assert_eq!(second.start_time, 27.0, "3s lead-in before the chorus");
    }

    #[test]
    fn test_no_repetition_yields_no_candidates() {
        let segments: Vec<LyricsSegment> = (0..12)
            .map(|i| {
                seg(
                    &format!("completely unique line number {} with extra word{}", i, i),
                    i as f64 * 5.0,
                    i as f64 * 5.0 + 5.0,
                )
            })
            .collect();
        let candidates = detect_chorus_candidates(&segments, &SelectionParams::default());
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_punctuation_and_case_ignored() {
        let a = tokenize("Hey, YOU! (again)");
        let b = tokenize("hey you again");
        assert_eq!(jaccard(&a, &b), 1.0);
    }

    #[test]
    fn test_jaccard_empty_sets() {
        let empty = HashSet::new();
        let full = tokenize("some words");
        assert_eq!(jaccard(&empty, &full), 0.0);
        assert_eq!(jaccard(&empty, &empty), 0.0);
    }

    #[test]
    fn test_at_most_three_candidates() {
        // 36 one-word repeated segments, far apart in time
        let segments: Vec<LyricsSegment> = (0..36)
            .map(|i| seg("la la la hey hey", i as f64 * 20.0, i as f64 * 20.0 + 5.0))
            .collect();
        let candidates = detect_chorus_candidates(&segments, &SelectionParams::default());
        assert!(candidates.len() <= 3);
    }
}
