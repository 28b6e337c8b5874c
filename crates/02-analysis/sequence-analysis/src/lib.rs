//! Sequence classification, duration estimation and the per-asset cache.
//!
//! A model is analysed once per path: header validation, sequence table
//! extraction, then name classification into six pools. Durations are
//! estimated lazily for the single sequence about to be played.

pub mod cache;
pub mod classify;
pub mod duration;
pub mod keywords;
pub mod pool;

pub use cache::{AnalysisError, CacheStats, ModelCache};
pub use classify::{Classification, SequenceClassifier};
pub use duration::DurationError;
pub use keywords::KeywordSet;
pub use pool::{ModelAnalysis, PoolKind, SequencePool, SequencePools, SilencerTag};
