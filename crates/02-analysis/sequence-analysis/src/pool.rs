//! Per-asset sequence pools and the cached analysis record.

use smallvec::SmallVec;

/// Which family of animation a pool holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PoolKind {
    Inspect,
    Idle,
}

/// Silencer state a sequence is authored for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SilencerTag {
    /// Name carries `_sil`.
    Silenced,
    /// Name carries `_unsil`.
    Unsilenced,
    /// No silencer marker.
    Generic,
}

impl SilencerTag {
    /// Every tag, in pool storage order.
    pub const ALL: [SilencerTag; 3] = [
        SilencerTag::Silenced,
        SilencerTag::Unsilenced,
        SilencerTag::Generic,
    ];

    /// Tag matching an attachment state.
    pub fn for_state(silenced: bool) -> Self {
        if silenced {
            SilencerTag::Silenced
        } else {
            SilencerTag::Unsilenced
        }
    }

    /// The opposite attachment state; generic maps to itself.
    pub fn opposite(self) -> Self {
        match self {
            SilencerTag::Silenced => SilencerTag::Unsilenced,
            SilencerTag::Unsilenced => SilencerTag::Silenced,
            SilencerTag::Generic => SilencerTag::Generic,
        }
    }

    fn slot(self) -> usize {
        match self {
            SilencerTag::Silenced => 0,
            SilencerTag::Unsilenced => 1,
            SilencerTag::Generic => 2,
        }
    }
}

/// Unordered set of sequence indices sharing a classification.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SequencePool(SmallVec<[u32; 4]>);

impl SequencePool {
    /// Adds an index (duplicates are ignored).
    pub fn insert(&mut self, index: u32) {
        if !self.0.contains(&index) {
            self.0.push(index);
        }
    }

    /// Indices in discovery order.
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn contains(&self, index: u32) -> bool {
        self.0.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The six pools of one asset: {inspect, idle} × {silenced, unsilenced, generic}.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SequencePools {
    inspect: [SequencePool; 3],
    idle: [SequencePool; 3],
}

impl SequencePools {
    pub fn get(&self, kind: PoolKind, tag: SilencerTag) -> &SequencePool {
        match kind {
            PoolKind::Inspect => &self.inspect[tag.slot()],
            PoolKind::Idle => &self.idle[tag.slot()],
        }
    }

    pub fn insert(&mut self, kind: PoolKind, tag: SilencerTag, index: u32) {
        let pool = match kind {
            PoolKind::Inspect => &mut self.inspect[tag.slot()],
            PoolKind::Idle => &mut self.idle[tag.slot()],
        };
        pool.insert(index);
    }

    /// True if any pool of `kind` holds an index.
    pub fn any(&self, kind: PoolKind) -> bool {
        SilencerTag::ALL
            .iter()
            .any(|&tag| !self.get(kind, tag).is_empty())
    }

    /// True if `index` belongs to any pool of `kind`.
    pub fn contains(&self, kind: PoolKind, index: u32) -> bool {
        SilencerTag::ALL
            .iter()
            .any(|&tag| self.get(kind, tag).contains(index))
    }
}

/// Cached verdict for one asset path.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModelAnalysis {
    /// Whether any inspect pool is non-empty.
    pub supports_inspect: bool,
    pub pools: SequencePools,
}

impl ModelAnalysis {
    /// Negative result for invalid or unreadable assets.
    pub fn unsupported() -> Self {
        Self::default()
    }

    /// Derives the support flag from the pools.
    pub fn from_pools(pools: SequencePools) -> Self {
        Self {
            supports_inspect: pools.any(PoolKind::Inspect),
            pools,
        }
    }
}
