//! Capabilities the embedding game host provides to the session machine.
//!
//! The machine never reaches into engine state directly: time comes from
//! [`HostClock`], observations from [`PlayerProbe`], and every visible effect
//! goes out through [`PlaybackSink`] and [`ObserverHooks`]. A host implements
//! all four and receives [`Host`] through the blanket impl.

use asset_store::AssetPath;
use std::fmt;

use crate::weapon::WeaponKind;

/// Stable per-connection identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player#{}", self.0)
    }
}

/// Host-side handle of one weapon entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WeaponHandle(pub u32);

/// What the host knows about the equipped weapon this tick.
#[derive(Clone, Debug, PartialEq)]
pub struct WeaponSnapshot {
    pub kind: WeaponKind,
    /// `None` when the weapon entity cannot be resolved.
    pub handle: Option<WeaponHandle>,
    pub silenced: bool,
    pub in_special_reload: bool,
    /// Seconds until the next primary attack is allowed.
    pub primary_attack_delay: f64,
    /// Seconds until the next secondary attack is allowed.
    pub secondary_attack_delay: f64,
}

impl WeaponSnapshot {
    /// A ready weapon with both attack timers elapsed.
    pub fn ready(kind: WeaponKind, handle: WeaponHandle) -> Self {
        Self {
            kind,
            handle: Some(handle),
            silenced: false,
            in_special_reload: false,
            primary_attack_delay: 0.0,
            secondary_attack_delay: 0.0,
        }
    }

    pub fn attack_pending(&self) -> bool {
        self.primary_attack_delay > 0.0 || self.secondary_attack_delay > 0.0
    }
}

/// Live view of one player.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerSnapshot {
    pub alive: bool,
    pub connected: bool,
    pub zoomed: bool,
    /// Primary or secondary attack button currently held.
    pub attack_held: bool,
    pub weapon: Option<WeaponSnapshot>,
    /// Asset path of the first-person weapon model.
    pub viewmodel: Option<AssetPath>,
}

impl PlayerSnapshot {
    /// Alive, connected, unzoomed, holding `weapon` rendered by `viewmodel`.
    pub fn armed(weapon: WeaponSnapshot, viewmodel: impl Into<AssetPath>) -> Self {
        Self {
            alive: true,
            connected: true,
            zoomed: false,
            attack_held: false,
            weapon: Some(weapon),
            viewmodel: Some(viewmodel.into()),
        }
    }

    pub fn is_present(&self) -> bool {
        self.alive && self.connected
    }
}

/// Answer of a pre-start observer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HookVerdict {
    #[default]
    Allow,
    Deny,
}

/// Monotonic time source, in seconds.
pub trait HostClock {
    fn now(&self) -> f64;
}

/// Effects on the first-person weapon model.
pub trait PlaybackSink {
    fn play(&mut self, player: PlayerId, sequence: u32);
    /// Return the viewmodel to its default pose.
    fn play_rest(&mut self, player: PlayerId);
    /// Suppress the weapon's automatic idle animation until `time`.
    fn set_idle_suppression_deadline(&mut self, weapon: WeaponHandle, time: f64);
}

/// Veto and notification points for other gameplay features.
pub trait ObserverHooks {
    fn pre_start(
        &mut self,
        _player: PlayerId,
        _weapon: WeaponHandle,
        _sequence: u32,
    ) -> HookVerdict {
        HookVerdict::Allow
    }

    fn on_start(&mut self, _player: PlayerId, _weapon: WeaponHandle, _sequence: u32) {}

    fn on_end(&mut self, _player: PlayerId) {}
}

/// Read-only engine queries.
pub trait PlayerProbe {
    /// `None` when the id no longer refers to an entity.
    fn snapshot(&self, player: PlayerId) -> Option<PlayerSnapshot>;
}

/// Everything the machine needs from its host.
pub trait Host: HostClock + PlaybackSink + ObserverHooks + PlayerProbe {}

impl<T> Host for T where T: HostClock + PlaybackSink + ObserverHooks + PlayerProbe {}
