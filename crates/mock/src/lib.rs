//! In-memory host for exercising the inspect machine without a game engine.

use std::collections::HashMap;

use asset_store::AssetStore;
use inspect_session::{
    HookVerdict, HostClock, InspectConfig, InspectMachine, ObserverHooks, PlaybackSink, PlayerId,
    PlayerProbe, PlayerSnapshot, WeaponHandle,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use sequence_analysis::{KeywordSet, ModelCache};

/// One observable side effect, in emission order.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    Play(PlayerId, u32),
    Rest(PlayerId),
    IdleDeadline(WeaponHandle, f64),
    Started(PlayerId, WeaponHandle, u32),
    Ended(PlayerId),
}

/// Host whose clock and players are set by the test.
#[derive(Debug, Default)]
pub struct ScriptedHost {
    pub now: f64,
    players: HashMap<PlayerId, PlayerSnapshot>,
    effects: Vec<Effect>,
    veto: bool,
}

impl ScriptedHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, seconds: f64) {
        self.now += seconds;
    }

    pub fn set_player(&mut self, id: PlayerId, snapshot: PlayerSnapshot) {
        self.players.insert(id, snapshot);
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut PlayerSnapshot> {
        self.players.get_mut(&id)
    }

    pub fn remove_player(&mut self, id: PlayerId) {
        self.players.remove(&id);
    }

    /// Makes `pre_start` deny every start.
    pub fn set_veto(&mut self, veto: bool) {
        self.veto = veto;
    }

    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    pub fn starts(&self, player: PlayerId) -> usize {
        self.effects
            .iter()
            .filter(|e| matches!(e, Effect::Started(p, ..) if *p == player))
            .count()
    }

    pub fn ends(&self, player: PlayerId) -> usize {
        self.effects
            .iter()
            .filter(|e| matches!(e, Effect::Ended(p) if *p == player))
            .count()
    }

    /// Most recent idle-suppression deadline pushed for `weapon`.
    pub fn idle_deadline(&self, weapon: WeaponHandle) -> Option<f64> {
        self.effects.iter().rev().find_map(|e| match e {
            Effect::IdleDeadline(w, t) if *w == weapon => Some(*t),
            _ => None,
        })
    }

    /// Most recent sequence played for `player`.
    pub fn last_played(&self, player: PlayerId) -> Option<u32> {
        self.effects.iter().rev().find_map(|e| match e {
            Effect::Play(p, seq) if *p == player => Some(*seq),
            _ => None,
        })
    }
}

impl HostClock for ScriptedHost {
    fn now(&self) -> f64 {
        self.now
    }
}

impl PlaybackSink for ScriptedHost {
    fn play(&mut self, player: PlayerId, sequence: u32) {
        self.effects.push(Effect::Play(player, sequence));
    }

    fn play_rest(&mut self, player: PlayerId) {
        self.effects.push(Effect::Rest(player));
    }

    fn set_idle_suppression_deadline(&mut self, weapon: WeaponHandle, time: f64) {
        self.effects.push(Effect::IdleDeadline(weapon, time));
    }
}

impl ObserverHooks for ScriptedHost {
    fn pre_start(
        &mut self,
        _player: PlayerId,
        _weapon: WeaponHandle,
        _sequence: u32,
    ) -> HookVerdict {
        if self.veto {
            HookVerdict::Deny
        } else {
            HookVerdict::Allow
        }
    }

    fn on_start(&mut self, player: PlayerId, weapon: WeaponHandle, sequence: u32) {
        self.effects.push(Effect::Started(player, weapon, sequence));
    }

    fn on_end(&mut self, player: PlayerId) {
        self.effects.push(Effect::Ended(player));
    }
}

impl PlayerProbe for ScriptedHost {
    fn snapshot(&self, player: PlayerId) -> Option<PlayerSnapshot> {
        self.players.get(&player).cloned()
    }
}

/// Machine over `store` with default keywords and a fixed RNG seed.
pub fn seeded_machine<S: AssetStore>(store: S, config: InspectConfig) -> InspectMachine<S> {
    InspectMachine::with_rng(
        config,
        ModelCache::new(store, KeywordSet::default()),
        StdRng::seed_from_u64(0x1A5E),
    )
}
