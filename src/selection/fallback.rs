//! Heuristic start-time generator
//!
//! Last resort before giving up and clipping from 0: with no signal
//! candidates and no lyrics, estimate where the first chorus/drop lands from
//! the track length alone, then back off by a BPM-derived buildup so the
//! clip doesn't open right on the peak.
//!
//! Pure and deterministic given `(total_duration, target_duration, bpm)`.

/// Buildup clamp bounds, seconds.
const MIN_BUILDUP_SECS: f64 = 3.0;
const MAX_BUILDUP_SECS: f64 = 8.0;

/// Buildup when no usable BPM is available, seconds.
const DEFAULT_BUILDUP_SECS: f64 = 6.0;

/// Beats of lead-in before the estimated drop.
const BUILDUP_BEATS: f64 = 8.0;

/// Estimate a highlight start time from song-structure heuristics.
///
/// Tracks not much longer than the target clip start at 0. Otherwise the
/// first chorus/drop position is bucketed by duration and the start backs
/// off by the buildup time.
pub fn heuristic_start_time(total_duration: f64, target_duration: f64, bpm: Option<f64>) -> f64 {
    // Clip spans effectively the whole track
    if total_duration <= target_duration * 1.5 {
        return 0.0;
    }

    let estimated_drop = estimate_first_drop(total_duration);
    if estimated_drop <= 0.0 {
        return 0.0;
    }

    (estimated_drop - buildup_time(bpm)).max(0.0)
}

/// Seconds of lead-in before an estimated climax: 8 beats at the track's
/// tempo, clamped to [3, 8]; fixed 6 s when BPM is unknown.
pub fn buildup_time(bpm: Option<f64>) -> f64 {
    match bpm {
        Some(bpm) if bpm > 0.0 => {
            (BUILDUP_BEATS / (bpm / 60.0)).clamp(MIN_BUILDUP_SECS, MAX_BUILDUP_SECS)
        }
        _ => DEFAULT_BUILDUP_SECS,
    }
}

/// Duration-bucketed estimate of the first chorus/drop position.
fn estimate_first_drop(total_duration: f64) -> f64 {
    if total_duration > 180.0 {
        (0.25 * total_duration).min(50.0)
    } else if total_duration > 120.0 {
        (0.28 * total_duration).min(40.0)
    } else if total_duration > 60.0 {
        (0.30 * total_duration).min(25.0)
    } else if total_duration > 30.0 {
        (0.35 * total_duration).min(15.0)
    } else {
        0.0
    }
}
