//! Per-player inspect sessions: guards, sequence choice, deadlines and the
//! host capabilities they run against.

mod config;
mod error;
pub mod host;
mod machine;
pub mod select;
pub mod state;
pub mod weapon;

pub use config::InspectConfig;
pub use error::Rejection;
pub use host::{
    HookVerdict, Host, HostClock, ObserverHooks, PlaybackSink, PlayerId, PlayerProbe,
    PlayerSnapshot, WeaponHandle, WeaponSnapshot,
};
pub use machine::{
    InspectMachine, StartedSession, WeaponAction, ATTACK_HOLD_COOLDOWN, IDLE_COURTESY_FALLBACK,
    IDLE_SUPPRESSION_PAD, MIN_IDLE_DURATION,
};
pub use state::{ActiveSession, Phase, PlayerInspectState};
pub use weapon::{WeaponClass, WeaponKind};
