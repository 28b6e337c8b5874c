//! Choosing one sequence out of an asset's pools.

use rand::seq::SliceRandom;
use rand::Rng;
use sequence_analysis::{PoolKind, SequencePools, SilencerTag};
use smallvec::{smallvec, SmallVec};

use crate::weapon::WeaponKind;

/// Pools to try, in order, for a weapon in its current attachment state.
pub fn pool_preference(weapon: WeaponKind, silenced: bool) -> SmallVec<[SilencerTag; 3]> {
    if weapon.is_silencer_aware() {
        let current = SilencerTag::for_state(silenced);
        smallvec![current, SilencerTag::Generic, current.opposite()]
    } else {
        smallvec![SilencerTag::Generic]
    }
}

/// Uniform pick from the first non-empty preferred pool.
pub fn select_sequence<R: Rng + ?Sized>(
    pools: &SequencePools,
    kind: PoolKind,
    weapon: WeaponKind,
    silenced: bool,
    rng: &mut R,
) -> Option<u32> {
    pool_preference(weapon, silenced)
        .into_iter()
        .map(|tag| pools.get(kind, tag))
        .find(|pool| !pool.is_empty())
        .and_then(|pool| pool.as_slice().choose(rng).copied())
}
