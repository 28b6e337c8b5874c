//! Name heuristics that sort sequences into inspect/idle pools.

use model_format::SequenceEntry;

use crate::keywords::KeywordSet;
use crate::pool::{PoolKind, SequencePools, SilencerTag};

/// Silencer attach/detach animations; never eligible for any pool.
pub const SILENCER_TRANSITIONS: [&str; 4] = [
    "add_silencer",
    "attach_silencer",
    "detach_silencer",
    "remove_silencer",
];

/// Substring marking an idle sequence.
pub const IDLE_KEYWORD: &str = "idle";

const SILENCED_SUFFIX: &str = "_sil";
const UNSILENCED_SUFFIX: &str = "_unsil";

/// Where a single sequence name lands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classification {
    Discard,
    Pool(PoolKind, SilencerTag),
}

/// Silencer marker by substring presence in the name.
pub fn silencer_tag(lower: &str) -> SilencerTag {
    if lower.contains(UNSILENCED_SUFFIX) {
        SilencerTag::Unsilenced
    } else if lower.contains(SILENCED_SUFFIX) {
        SilencerTag::Silenced
    } else {
        SilencerTag::Generic
    }
}

fn is_silencer_transition(lower: &str) -> bool {
    SILENCER_TRANSITIONS.iter().any(|t| lower.contains(t))
}

/// Sorts sequence names using a configured keyword set.
#[derive(Clone, Debug, Default)]
pub struct SequenceClassifier {
    keywords: KeywordSet,
}

impl SequenceClassifier {
    pub fn new(keywords: KeywordSet) -> Self {
        Self { keywords }
    }

    pub fn keywords(&self) -> &KeywordSet {
        &self.keywords
    }

    pub fn set_keywords(&mut self, keywords: KeywordSet) {
        self.keywords = keywords;
    }

    fn starts_with_keyword(&self, lower: &str) -> bool {
        lower.starts_with(IDLE_KEYWORD) || self.keywords.starts(lower)
    }

    /// Comparison form of a lowercase name.
    ///
    /// A leading `weapon_` token is dropped only when what follows starts
    /// with an inspect or idle keyword, then a `_sil`/`_unsil` suffix and
    /// trailing digits are removed.
    pub fn canonical_form<'a>(&self, lower: &'a str) -> &'a str {
        let mut name = lower;
        if let Some((_, rest)) = name.split_once('_') {
            if self.starts_with_keyword(rest) {
                name = rest;
            }
        }
        name = name
            .strip_suffix(UNSILENCED_SUFFIX)
            .or_else(|| name.strip_suffix(SILENCED_SUFFIX))
            .unwrap_or(name);
        name.trim_end_matches(|c: char| c.is_ascii_digit())
    }

    /// Classifies one raw sequence name.
    pub fn classify(&self, name: &str) -> Classification {
        let lower = name.to_ascii_lowercase();
        if is_silencer_transition(&lower) {
            return Classification::Discard;
        }
        let canonical = self.canonical_form(&lower);
        let tag = silencer_tag(&lower);
        if self.keywords.matches(canonical) {
            Classification::Pool(PoolKind::Inspect, tag)
        } else if canonical.contains(IDLE_KEYWORD) {
            Classification::Pool(PoolKind::Idle, tag)
        } else {
            Classification::Discard
        }
    }

    /// Classifies a whole sequence table into pools.
    pub fn classify_all(&self, sequences: &[SequenceEntry]) -> SequencePools {
        let mut pools = SequencePools::default();
        for seq in sequences {
            if let Classification::Pool(kind, tag) = self.classify(&seq.name) {
                pools.insert(kind, tag, seq.index);
            }
        }
        pools
    }
}
