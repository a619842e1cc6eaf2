//! The highlight selection engine
//!
//! Pure, synchronous decision logic: where in a song should a short clip
//! start. Candidates flow one way through the pipeline — chorus detection
//! and merging, duration-aware reranking, variety-aware selection, and a
//! deterministic heuristic fallback when no analysis data exists.

pub mod chorus;
pub mod fallback;
pub mod merge;
pub mod pipeline;
pub mod rerank;
pub mod variety;

pub use chorus::detect_chorus_candidates;
pub use fallback::heuristic_start_time;
pub use merge::merge_candidates;
pub use pipeline::{select_highlight_segment, SelectionEngine};
pub use rerank::{rerank_candidates, DurationBucket, RankedCandidate, RerankOutcome};
pub use variety::select_candidate;
