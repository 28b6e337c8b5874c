use std::collections::HashMap;

use inspect_session::{PlayerId, PlayerInspectState};

/// Session state for every connected player.
#[derive(Debug, Default)]
pub struct PlayerRegistry {
    players: HashMap<PlayerId, PlayerInspectState>,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs fresh state for `player`, handing back whatever it replaced.
    pub fn join(&mut self, player: PlayerId) -> Option<PlayerInspectState> {
        self.players.insert(player, PlayerInspectState::default())
    }

    pub fn leave(&mut self, player: PlayerId) -> Option<PlayerInspectState> {
        self.players.remove(&player)
    }

    pub fn get(&self, player: PlayerId) -> Option<&PlayerInspectState> {
        self.players.get(&player)
    }

    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut PlayerInspectState> {
        self.players.get_mut(&player)
    }

    pub fn contains(&self, player: PlayerId) -> bool {
        self.players.contains_key(&player)
    }

    /// Ids in ascending order.
    pub fn ids(&self) -> Vec<PlayerId> {
        let mut ids: Vec<_> = self.players.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn inspecting(&self) -> usize {
        self.players.values().filter(|s| s.is_inspecting()).count()
    }
}
