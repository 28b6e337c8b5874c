//! Event dispatch for the inspect feature.
//!
//! [`InspectHub`] owns the machine (config, model cache, RNG) and the player
//! registry. The host forwards each per-player callback to
//! [`InspectHub::handle`] and calls the developer API from other features.

mod event;
mod registry;

use anyhow::{anyhow, Result};
use asset_store::{AssetPath, AssetStore};
use inspect_session::{Host, InspectConfig, InspectMachine, PlayerId, PlayerInspectState};
use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;
use sequence_analysis::{KeywordSet, ModelCache};

pub use event::{AdminCmd, EventOutcome, HostEvent};
pub use registry::PlayerRegistry;

pub struct InspectHub<S> {
    machine: InspectMachine<S>,
    players: PlayerRegistry,
}

impl<S: AssetStore> InspectHub<S> {
    pub fn builder() -> InspectHubBuilder<S> {
        InspectHubBuilder::new()
    }

    pub fn machine(&self) -> &InspectMachine<S> {
        &self.machine
    }

    pub fn players(&self) -> &PlayerRegistry {
        &self.players
    }

    pub fn config(&self) -> &InspectConfig {
        self.machine.config()
    }

    pub fn handle<H: Host>(
        &mut self,
        host: &mut H,
        player: PlayerId,
        event: HostEvent,
    ) -> EventOutcome {
        match event {
            HostEvent::Joined => {
                match self.players.join(player) {
                    Some(mut stale) => {
                        self.machine.cancel(host, player, &mut stale, false);
                        debug!("{player}: rejoined, state reset");
                    }
                    None => debug!("{player}: joined"),
                }
                return EventOutcome::Handled;
            }
            HostEvent::Disconnected => {
                if let Some(mut state) = self.players.leave(player) {
                    self.machine.cancel(host, player, &mut state, false);
                    debug!("{player}: left");
                }
                return EventOutcome::Handled;
            }
            _ => {}
        }

        let Some(state) = self.players.get_mut(player) else {
            trace!("{player}: {event:?} for unregistered player");
            return EventOutcome::Ignored;
        };
        if let Some(action) = event.weapon_action() {
            self.machine.on_weapon_action(host, player, state, action);
            return EventOutcome::Handled;
        }
        match event {
            HostEvent::RoundRestart => {
                self.machine.cancel(host, player, state, false);
                *state = PlayerInspectState::default();
                EventOutcome::Handled
            }
            HostEvent::PerTick => {
                self.machine.think(host, player, state);
                EventOutcome::Handled
            }
            HostEvent::ImpulseReceived(code) if code != self.machine.config().inspect_impulse => {
                EventOutcome::Ignored
            }
            HostEvent::ImpulseReceived(_) | HostEvent::ManualCommand => {
                let outcome =
                    EventOutcome::from(self.machine.try_start_detailed(host, player, state, false));
                if let EventOutcome::Rejected(reason) = outcome {
                    trace!("{player}: inspect rejected: {reason}");
                }
                outcome
            }
            _ => EventOutcome::Ignored,
        }
    }

    pub fn admin<H: Host>(&mut self, host: &mut H, cmd: AdminCmd) {
        match cmd {
            AdminCmd::ReloadCache => {
                info!("reloading model cache");
                self.machine.reload_assets();
            }
            AdminCmd::ReloadKeywords(keywords) => {
                info!("installing {} inspect keywords", keywords.len());
                self.machine.replace_keywords(keywords);
            }
            AdminCmd::SetEnabled(enabled) => {
                info!("inspect enabled={enabled}");
                self.machine.set_enabled(enabled);
                if !enabled {
                    for player in self.players.ids() {
                        if let Some(state) = self.players.get_mut(player) {
                            self.machine.cancel(host, player, state, false);
                        }
                    }
                }
            }
        }
    }

    /// Starts an inspect skipping cooldown, busy and rate guards.
    pub fn force_inspect<H: Host>(&mut self, host: &mut H, player: PlayerId) -> bool {
        match self.players.get_mut(player) {
            Some(state) => self.machine.try_start(host, player, state, true),
            None => false,
        }
    }

    pub fn cancel_inspect<H: Host>(
        &mut self,
        host: &mut H,
        player: PlayerId,
        idle_courtesy: bool,
    ) -> bool {
        match self.players.get_mut(player) {
            Some(state) => self.machine.cancel(host, player, state, idle_courtesy),
            None => false,
        }
    }

    /// Holds off inspecting for `seconds`; returns false for unknown players.
    pub fn block_inspect<H: Host>(
        &mut self,
        host: &mut H,
        player: PlayerId,
        seconds: f64,
    ) -> bool {
        match self.players.get_mut(player) {
            Some(state) => {
                self.machine.block(host, player, state, seconds);
                true
            }
            None => false,
        }
    }

    pub fn is_inspecting(&self, player: PlayerId) -> bool {
        self.players.get(player).map_or(false, PlayerInspectState::is_inspecting)
    }

    pub fn weapon_supports_inspect(&mut self, viewmodel: &AssetPath) -> bool {
        self.machine.weapon_supports_inspect(viewmodel)
    }

    pub fn player_state(&self, player: PlayerId) -> Option<&PlayerInspectState> {
        self.players.get(player)
    }
}

pub struct InspectHubBuilder<S> {
    store: Option<S>,
    config: InspectConfig,
    keywords: KeywordSet,
    seed: Option<u64>,
}

impl<S: AssetStore> InspectHubBuilder<S> {
    pub fn new() -> Self {
        Self {
            store: None,
            config: InspectConfig::default(),
            keywords: KeywordSet::default(),
            seed: None,
        }
    }

    pub fn store(mut self, store: S) -> Self {
        self.store = Some(store);
        self
    }

    pub fn config(mut self, config: InspectConfig) -> Self {
        self.config = config;
        self
    }

    pub fn keywords(mut self, keywords: KeywordSet) -> Self {
        self.keywords = keywords;
        self
    }

    /// Fixed RNG seed for reproducible sequence choice.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self) -> Result<InspectHub<S>> {
        let store = self.store.ok_or_else(|| anyhow!("missing asset store"))?;
        if self.keywords.is_empty() {
            return Err(anyhow!("inspect keyword list is empty"));
        }
        let cache = ModelCache::new(store, self.keywords);
        let machine = match self.seed {
            Some(seed) => {
                InspectMachine::with_rng(self.config, cache, StdRng::seed_from_u64(seed))
            }
            None => InspectMachine::new(self.config, cache),
        };
        Ok(InspectHub {
            machine,
            players: PlayerRegistry::new(),
        })
    }
}

impl<S: AssetStore> Default for InspectHubBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}
