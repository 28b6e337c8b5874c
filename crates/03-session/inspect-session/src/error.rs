use thiserror::Error;

/// Why an inspect start was refused, in guard order.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash)]
pub enum Rejection {
    #[error("inspect is disabled")]
    Disabled,

    #[error("player is not alive and connected")]
    PlayerUnavailable,

    #[error("player is zoomed")]
    Zoomed,

    #[error("no weapon equipped")]
    NoWeapon,

    #[error("weapon cannot be inspected")]
    WeaponExcluded,

    #[error("weapon entity not resolvable")]
    WeaponUnresolved,

    #[error("already inspecting")]
    AlreadyInspecting,

    #[error("inspect is blocked")]
    Blocked,

    #[error("attack button held")]
    AttackHeld,

    #[error("weapon in special reload")]
    SpecialReload,

    #[error("weapon attack pending")]
    AttackPending,

    #[error("cooldown active")]
    Cooldown,

    #[error("weapon busy")]
    Busy,

    #[error("too many starts this window")]
    RateLimited,

    #[error("viewmodel has no inspect sequences")]
    Unsupported,

    #[error("no playable inspect sequence")]
    NoEligibleSequence,

    #[error("vetoed by observer")]
    Vetoed,
}
