//! The per-player inspect state machine.
//!
//! All transitions run inside host callbacks and finish before returning.
//! A player's [`PlayerInspectState`] is owned by the caller and passed in
//! by `&mut`, so one machine serves any number of players.

use asset_store::{AssetPath, AssetStore};
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;
use sequence_analysis::{KeywordSet, ModelAnalysis, ModelCache, PoolKind};

use crate::config::InspectConfig;
use crate::error::Rejection;
use crate::host::{HookVerdict, Host, PlayerId, PlayerSnapshot};
use crate::select::select_sequence;
use crate::state::{ActiveSession, Phase, PlayerInspectState};
use crate::weapon::DEFAULT_ATTACK_BUSY;

/// Idle suppression outlasts the inspect by this much.
pub const IDLE_SUPPRESSION_PAD: f64 = 0.1;
/// Idle hold used when an idle duration is missing or implausibly short.
pub const IDLE_COURTESY_FALLBACK: f64 = 3.0;
/// Idle durations below this fall back to [`IDLE_COURTESY_FALLBACK`].
pub const MIN_IDLE_DURATION: f64 = 0.1;
/// Cooldown added when an attack button interrupts a session.
pub const ATTACK_HOLD_COOLDOWN: f64 = 0.5;

/// A session that just started.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StartedSession {
    pub sequence: u32,
    /// Estimated animation length before clamping.
    pub duration: f64,
    pub ends_at: f64,
}

/// Weapon events that interrupt a session and push the guards out.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WeaponAction {
    PrimaryAttack,
    SecondaryAttack,
    Deploy,
    ReloadEntered { next_attack_delay: f64 },
}

pub struct InspectMachine<S> {
    config: InspectConfig,
    cache: ModelCache<S>,
    rng: StdRng,
}

impl<S: AssetStore> InspectMachine<S> {
    pub fn new(config: InspectConfig, cache: ModelCache<S>) -> Self {
        Self::with_rng(config, cache, StdRng::from_entropy())
    }

    /// Deterministic selection, for tests and replays.
    pub fn with_rng(config: InspectConfig, cache: ModelCache<S>, rng: StdRng) -> Self {
        Self {
            config: config.sanitized(),
            cache,
            rng,
        }
    }

    pub fn config(&self) -> &InspectConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: InspectConfig) {
        self.config = config.sanitized();
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.config.enabled = enabled;
    }

    pub fn cache(&self) -> &ModelCache<S> {
        &self.cache
    }

    /// Drops every cached analysis; assets are re-read on next use.
    pub fn reload_assets(&mut self) {
        self.cache.invalidate_all();
    }

    /// Installs a new keyword list. Cached analyses keep their pools until
    /// [`InspectMachine::reload_assets`].
    pub fn replace_keywords(&mut self, keywords: KeywordSet) {
        self.cache.replace_keywords(keywords);
    }

    /// Analysis of a viewmodel, computed on first use.
    pub fn analysis(&mut self, viewmodel: &AssetPath) -> &ModelAnalysis {
        self.cache.get_or_analyze(viewmodel)
    }

    /// Attempts to start a session; `forced` skips cooldown, busy and rate guards.
    pub fn try_start<H: Host>(
        &mut self,
        host: &mut H,
        player: PlayerId,
        state: &mut PlayerInspectState,
        forced: bool,
    ) -> bool {
        match self.try_start_detailed(host, player, state, forced) {
            Ok(_) => true,
            Err(reason) => {
                trace!("{player}: inspect rejected: {reason}");
                false
            }
        }
    }

    /// [`InspectMachine::try_start`] reporting the first failing guard.
    pub fn try_start_detailed<H: Host>(
        &mut self,
        host: &mut H,
        player: PlayerId,
        state: &mut PlayerInspectState,
        forced: bool,
    ) -> Result<StartedSession, Rejection> {
        let now = host.now();
        if !self.config.enabled {
            return Err(Rejection::Disabled);
        }
        let snap = host
            .snapshot(player)
            .filter(PlayerSnapshot::is_present)
            .ok_or(Rejection::PlayerUnavailable)?;
        if snap.zoomed {
            return Err(Rejection::Zoomed);
        }
        let weapon = snap.weapon.as_ref().ok_or(Rejection::NoWeapon)?;
        if !weapon.kind.allows_inspect() {
            return Err(Rejection::WeaponExcluded);
        }
        let handle = weapon.handle.ok_or(Rejection::WeaponUnresolved)?;
        if state.is_inspecting() {
            return Err(Rejection::AlreadyInspecting);
        }
        if !state.blocked_until.passed(now) {
            return Err(Rejection::Blocked);
        }
        if snap.attack_held {
            return Err(Rejection::AttackHeld);
        }
        if weapon.in_special_reload {
            return Err(Rejection::SpecialReload);
        }
        if weapon.attack_pending() {
            return Err(Rejection::AttackPending);
        }
        if !forced {
            if !state.cooldown_until.passed(now) {
                return Err(Rejection::Cooldown);
            }
            if !state.busy_until.passed(now) {
                return Err(Rejection::Busy);
            }
            if !state.rate.has_capacity(now, self.config.max_starts_per_window) {
                return Err(Rejection::RateLimited);
            }
        }

        let viewmodel = snap.viewmodel.clone().ok_or(Rejection::Unsupported)?;
        let analysis = self.cache.get_or_analyze(&viewmodel);
        if !analysis.supports_inspect {
            return Err(Rejection::Unsupported);
        }
        let sequence = select_sequence(
            &analysis.pools,
            PoolKind::Inspect,
            weapon.kind,
            weapon.silenced,
            &mut self.rng,
        )
        .ok_or(Rejection::NoEligibleSequence)?;
        let duration = self
            .cache
            .sequence_duration(&viewmodel, sequence)
            .map_err(|err| {
                debug!("{viewmodel}: sequence {sequence} has no usable duration: {err}");
                Rejection::NoEligibleSequence
            })?;

        if host.pre_start(player, handle, sequence) == HookVerdict::Deny {
            return Err(Rejection::Vetoed);
        }

        let ends_at = now + self.config.clamp_duration(duration);
        // Only committed starts take a rate slot; later rejections leave it free.
        if !forced {
            state.rate.record();
        }
        state.phase = Phase::Inspecting(ActiveSession {
            sequence,
            ends_at,
            weapon: handle,
            viewmodel,
        });
        host.play(player, sequence);
        host.set_idle_suppression_deadline(handle, ends_at + IDLE_SUPPRESSION_PAD);
        host.on_start(player, handle, sequence);
        debug!("{player}: inspect sequence {sequence} until {ends_at:.3}");
        Ok(StartedSession {
            sequence,
            duration,
            ends_at,
        })
    }

    /// Ends the active session, if any. With `idle_courtesy`, a living
    /// player is eased back into an idle animation. Returns whether a
    /// session was ended.
    pub fn cancel<H: Host>(
        &mut self,
        host: &mut H,
        player: PlayerId,
        state: &mut PlayerInspectState,
        idle_courtesy: bool,
    ) -> bool {
        let session = match std::mem::take(&mut state.phase) {
            Phase::Inspecting(session) => session,
            Phase::Idle => return false,
        };
        if idle_courtesy {
            if let Some(snap) = host.snapshot(player).filter(|s| s.alive) {
                self.play_idle(host, player, &snap, &session);
            }
        }
        trace!("{player}: inspect ended (courtesy={idle_courtesy})");
        host.on_end(player);
        true
    }

    fn play_idle<H: Host>(
        &mut self,
        host: &mut H,
        player: PlayerId,
        snap: &PlayerSnapshot,
        session: &ActiveSession,
    ) {
        let now = host.now();
        let weapon = snap.weapon.as_ref();
        let handle = weapon.and_then(|w| w.handle).unwrap_or(session.weapon);
        let viewmodel = snap.viewmodel.as_ref().unwrap_or(&session.viewmodel);

        let idle = weapon.and_then(|w| {
            let analysis = self.cache.get_or_analyze(viewmodel);
            select_sequence(
                &analysis.pools,
                PoolKind::Idle,
                w.kind,
                w.silenced,
                &mut self.rng,
            )
        });
        match idle {
            Some(sequence) => {
                let hold = self
                    .cache
                    .sequence_duration(viewmodel, sequence)
                    .ok()
                    .filter(|d| *d >= MIN_IDLE_DURATION)
                    .unwrap_or(IDLE_COURTESY_FALLBACK);
                host.play(player, sequence);
                host.set_idle_suppression_deadline(handle, now + hold);
            }
            None => {
                host.play_rest(player);
                host.set_idle_suppression_deadline(handle, now + IDLE_COURTESY_FALLBACK);
            }
        }
    }

    /// Per-tick maintenance of an active session.
    pub fn think<H: Host>(
        &mut self,
        host: &mut H,
        player: PlayerId,
        state: &mut PlayerInspectState,
    ) {
        let (ends_at, weapon, viewmodel) = match &state.phase {
            Phase::Inspecting(s) => (s.ends_at, s.weapon, s.viewmodel.clone()),
            Phase::Idle => return,
        };
        let snap = match host.snapshot(player).filter(|s| s.alive) {
            Some(snap) => snap,
            None => {
                self.cancel(host, player, state, false);
                return;
            }
        };
        let now = host.now();

        if snap.attack_held {
            self.cancel(host, player, state, false);
            state.cooldown_until.extend(now + ATTACK_HOLD_COOLDOWN);
        } else if snap.viewmodel.as_ref() != Some(&viewmodel) {
            self.cancel(host, player, state, false);
        } else if snap.weapon.as_ref().map_or(false, |w| w.in_special_reload) {
            self.cancel(host, player, state, false);
        } else if now < ends_at {
            host.set_idle_suppression_deadline(weapon, ends_at + IDLE_SUPPRESSION_PAD);
        } else {
            self.cancel(host, player, state, true);
        }
    }

    /// Interrupts any session and moves the busy/cooldown guards.
    pub fn on_weapon_action<H: Host>(
        &mut self,
        host: &mut H,
        player: PlayerId,
        state: &mut PlayerInspectState,
        action: WeaponAction,
    ) {
        let now = host.now();
        self.cancel(host, player, state, false);
        let (busy, cooldown) = match action {
            WeaponAction::PrimaryAttack | WeaponAction::SecondaryAttack => {
                let secondary = action == WeaponAction::SecondaryAttack;
                let busy = host
                    .snapshot(player)
                    .and_then(|s| s.weapon)
                    .map_or(DEFAULT_ATTACK_BUSY, |w| w.kind.attack_busy(secondary));
                (busy, busy)
            }
            WeaponAction::Deploy => (self.config.deploy_cooldown, self.config.deploy_cooldown),
            WeaponAction::ReloadEntered { next_attack_delay } => {
                let delay = next_attack_delay.max(0.0);
                (delay, delay + self.config.reload_cooldown)
            }
        };
        state.busy_until.extend(now + busy);
        state.cooldown_until.extend(now + cooldown);
    }

    /// Suppresses inspecting for `seconds`, ending any active session.
    pub fn block<H: Host>(
        &mut self,
        host: &mut H,
        player: PlayerId,
        state: &mut PlayerInspectState,
        seconds: f64,
    ) {
        let now = host.now();
        self.cancel(host, player, state, false);
        state.blocked_until.extend(now + seconds.max(0.0));
    }

    /// Whether the player's current viewmodel has inspect sequences.
    pub fn weapon_supports_inspect(&mut self, viewmodel: &AssetPath) -> bool {
        self.cache.get_or_analyze(viewmodel).supports_inspect
    }
}
