use asset_store::MemAssetStore;
use inspect_hub::{HostEvent, InspectHub};
use inspect_mock::ScriptedHost;
use inspect_session::{
    InspectConfig, PlayerId, PlayerSnapshot, WeaponHandle, WeaponKind, WeaponSnapshot,
};

pub const ROUND_START: f64 = 30.0;

pub fn hub(store: MemAssetStore, config: InspectConfig) -> InspectHub<MemAssetStore> {
    let _ = env_logger::builder().is_test(true).try_init();
    InspectHub::builder()
        .store(store)
        .config(config)
        .seed(0xC0FFEE)
        .build()
        .unwrap()
}

/// Host holding one armed player per `(id, weapon, viewmodel)`, all joined to `hub`.
pub fn arena(
    hub: &mut InspectHub<MemAssetStore>,
    players: &[(PlayerId, WeaponKind, &str)],
) -> ScriptedHost {
    let mut host = ScriptedHost::new();
    host.now = ROUND_START;
    for &(id, kind, viewmodel) in players {
        let weapon = WeaponSnapshot::ready(kind, WeaponHandle(id.0 + 1000));
        host.set_player(id, PlayerSnapshot::armed(weapon, viewmodel));
        hub.handle(&mut host, id, HostEvent::Joined);
    }
    host
}
