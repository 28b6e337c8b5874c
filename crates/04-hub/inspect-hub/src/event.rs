use inspect_session::{Rejection, StartedSession, WeaponAction};
use sequence_analysis::KeywordSet;

/// Per-player callbacks delivered by the host's simulation loop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostEvent {
    Joined,
    Disconnected,
    RoundRestart,
    PerTick,
    PrimaryAttack,
    SecondaryAttack,
    Deploy,
    ReloadEntered { next_attack_delay: f64 },
    ImpulseReceived(u8),
    /// Chat or console request to inspect.
    ManualCommand,
}

impl HostEvent {
    /// The weapon action this event carries, if any.
    pub fn weapon_action(self) -> Option<WeaponAction> {
        match self {
            HostEvent::PrimaryAttack => Some(WeaponAction::PrimaryAttack),
            HostEvent::SecondaryAttack => Some(WeaponAction::SecondaryAttack),
            HostEvent::Deploy => Some(WeaponAction::Deploy),
            HostEvent::ReloadEntered { next_attack_delay } => {
                Some(WeaponAction::ReloadEntered { next_attack_delay })
            }
            _ => None,
        }
    }
}

/// Server-operator commands.
#[derive(Clone, Debug, PartialEq)]
pub enum AdminCmd {
    /// Forget every cached model analysis.
    ReloadCache,
    /// Install a new keyword list; cached analyses keep their pools.
    ReloadKeywords(KeywordSet),
    SetEnabled(bool),
}

/// What handling one event did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EventOutcome {
    /// Event did not apply (unknown player, foreign impulse).
    Ignored,
    /// State was maintained; no start was attempted.
    Handled,
    Started(StartedSession),
    Rejected(Rejection),
}

impl EventOutcome {
    pub fn started(&self) -> bool {
        matches!(self, EventOutcome::Started(_))
    }
}

impl From<Result<StartedSession, Rejection>> for EventOutcome {
    fn from(result: Result<StartedSession, Rejection>) -> Self {
        match result {
            Ok(session) => EventOutcome::Started(session),
            Err(reason) => EventOutcome::Rejected(reason),
        }
    }
}
