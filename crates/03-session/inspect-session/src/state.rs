//! Per-player session state.

use asset_store::AssetPath;

use crate::host::WeaponHandle;

/// Length of the start-rate window, in seconds.
pub const RATE_WINDOW: f64 = 1.0;

/// A point in time that only ever moves forward.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Deadline(f64);

impl Deadline {
    pub fn at(self) -> f64 {
        self.0
    }

    /// Moves the deadline to `until` if that is later.
    pub fn extend(&mut self, until: f64) {
        if until > self.0 {
            self.0 = until;
        }
    }

    pub fn passed(self, now: f64) -> bool {
        now >= self.0
    }
}

/// Fixed one-second window counting successful starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RateWindow {
    start: f64,
    count: u32,
}

impl Default for RateWindow {
    fn default() -> Self {
        Self {
            start: f64::NEG_INFINITY,
            count: 0,
        }
    }
}

impl RateWindow {
    /// Whether another start fits; `max <= 0` disables the limit.
    pub fn has_capacity(&mut self, now: f64, max: i32) -> bool {
        if now - self.start >= RATE_WINDOW {
            self.start = now;
            self.count = 0;
        }
        max <= 0 || self.count < max as u32
    }

    pub fn record(&mut self) {
        self.count = self.count.saturating_add(1);
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}

/// An inspect animation currently playing.
#[derive(Clone, Debug, PartialEq)]
pub struct ActiveSession {
    pub sequence: u32,
    pub ends_at: f64,
    pub weapon: WeaponHandle,
    /// Viewmodel the session started on; a change ends the session.
    pub viewmodel: AssetPath,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Phase {
    #[default]
    Idle,
    Inspecting(ActiveSession),
}

/// Everything remembered about one player between callbacks.
///
/// Only [`crate::InspectMachine`] mutates it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlayerInspectState {
    pub(crate) phase: Phase,
    pub(crate) cooldown_until: Deadline,
    pub(crate) busy_until: Deadline,
    pub(crate) blocked_until: Deadline,
    pub(crate) rate: RateWindow,
}

impl PlayerInspectState {
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn session(&self) -> Option<&ActiveSession> {
        match &self.phase {
            Phase::Inspecting(session) => Some(session),
            Phase::Idle => None,
        }
    }

    pub fn is_inspecting(&self) -> bool {
        matches!(self.phase, Phase::Inspecting(_))
    }

    pub fn cooldown_until(&self) -> f64 {
        self.cooldown_until.at()
    }

    pub fn busy_until(&self) -> f64 {
        self.busy_until.at()
    }

    pub fn blocked_until(&self) -> f64 {
        self.blocked_until.at()
    }

    pub fn starts_in_window(&self) -> u32 {
        self.rate.count()
    }
}
