//! Per-asset memo of validation and classification results.

use asset_store::{AssetPath, AssetStore};
use log::{debug, warn};
use model_format::ModelError;
use std::collections::HashMap;
use thiserror::Error;

use crate::classify::SequenceClassifier;
use crate::duration::{self, DurationError};
use crate::keywords::KeywordSet;
use crate::pool::ModelAnalysis;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Duration(#[from] DurationError),
}

/// Counters exposed for diagnostics and tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Paths with a cached analysis (positive or negative).
    pub analyses: usize,
    /// Paths with a cached validation flag.
    pub validations: usize,
    /// Full analyses performed since construction.
    pub analyses_run: u64,
}

/// Owns every analysed asset's pools.
///
/// Each path is validated, extracted and classified at most once until
/// [`ModelCache::invalidate_all`]. Failures are remembered as unsupported,
/// so repeated lookups of a bad path stay O(1).
pub struct ModelCache<S> {
    store: S,
    classifier: SequenceClassifier,
    validity: HashMap<AssetPath, bool>,
    analyses: HashMap<AssetPath, ModelAnalysis>,
    analyses_run: u64,
}

impl<S: AssetStore> ModelCache<S> {
    pub fn new(store: S, keywords: KeywordSet) -> Self {
        Self {
            store,
            classifier: SequenceClassifier::new(keywords),
            validity: HashMap::new(),
            analyses: HashMap::new(),
            analyses_run: 0,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn keywords(&self) -> &KeywordSet {
        self.classifier.keywords()
    }

    /// Swaps the inspect keywords. Existing analyses are kept; they pick up
    /// the new list only after [`ModelCache::invalidate_all`].
    pub fn replace_keywords(&mut self, keywords: KeywordSet) {
        self.classifier.set_keywords(keywords);
    }

    /// Cached header validation.
    pub fn is_valid(&mut self, path: &AssetPath) -> bool {
        if let Some(&valid) = self.validity.get(path) {
            return valid;
        }
        let valid = match model_format::validate(&self.store, path) {
            Ok(_) => true,
            Err(err) => {
                report_failure(path, &err);
                false
            }
        };
        self.validity.insert(path.clone(), valid);
        valid
    }

    /// Returns the analysis for `path`, running it on first access.
    pub fn get_or_analyze(&mut self, path: &AssetPath) -> &ModelAnalysis {
        if !self.analyses.contains_key(path) {
            let analysis = self.analyze(path);
            self.analyses.insert(path.clone(), analysis);
        }
        &self.analyses[path]
    }

    /// Cached analysis without triggering one.
    pub fn cached(&self, path: &AssetPath) -> Option<&ModelAnalysis> {
        self.analyses.get(path)
    }

    fn analyze(&mut self, path: &AssetPath) -> ModelAnalysis {
        self.analyses_run += 1;
        if !self.is_valid(path) {
            return ModelAnalysis::unsupported();
        }
        let sequences = match model_format::extract_sequences(&self.store, path) {
            Ok(sequences) => sequences,
            Err(err) => {
                report_failure(path, &err);
                return ModelAnalysis::unsupported();
            }
        };
        let analysis = ModelAnalysis::from_pools(self.classifier.classify_all(&sequences));
        debug!(
            "analysed {path}: {} sequences, inspect={}",
            sequences.len(),
            analysis.supports_inspect
        );
        analysis
    }

    /// Estimated playback length of one sequence, read fresh from the asset.
    pub fn sequence_duration(&self, path: &AssetPath, index: u32) -> Result<f64, AnalysisError> {
        let timing = model_format::read_timing(&self.store, path, index)?;
        Ok(duration::estimate(timing)?)
    }

    /// Drops every cached analysis and validation flag.
    pub fn invalidate_all(&mut self) {
        debug!(
            "model cache cleared ({} analyses, {} validations)",
            self.analyses.len(),
            self.validity.len()
        );
        self.analyses.clear();
        self.validity.clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            analyses: self.analyses.len(),
            validations: self.validity.len(),
            analyses_run: self.analyses_run,
        }
    }
}

fn report_failure(path: &AssetPath, err: &ModelError) {
    match err {
        ModelError::Io(_) => warn!("model {path} unreadable, caching as unsupported: {err}"),
        _ => debug!("model {path} unsupported: {err}"),
    }
}
