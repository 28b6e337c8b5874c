use asset_store::{AssetPath, MemAssetStore};
use inspect_hub::{EventOutcome, HostEvent};
use inspect_mock::Effect;
use inspect_session::{InspectConfig, PlayerId, Rejection, WeaponKind};
use pretty_assertions::assert_eq;
use sequence_analysis::{PoolKind, SilencerTag};
use testdata::ModelBuilder;

use crate::support::{arena, hub, ROUND_START};

const P: PlayerId = PlayerId(1);

#[test]
fn missing_magic_never_starts() {
    let bytes = testdata::bytes(testdata::AK47_BAD_MAGIC);
    assert_eq!(&bytes[..4], &[0, 0, 0, 0]);

    let mut hub = hub(testdata::mem_store(), InspectConfig::default());
    let mut host = arena(&mut hub, &[(P, WeaponKind::Ak47, testdata::AK47_BAD_MAGIC)]);
    for _ in 0..5 {
        assert_eq!(
            hub.handle(&mut host, P, HostEvent::ManualCommand),
            EventOutcome::Rejected(Rejection::Unsupported)
        );
        assert!(!hub.force_inspect(&mut host, P));
        host.advance(1.0);
    }
    assert!(!hub.weapon_supports_inspect(&AssetPath::from(testdata::AK47_BAD_MAGIC)));
    assert_eq!(hub.machine().cache().stats().analyses_run, 1);
    assert!(host.effects().is_empty());
}

#[test]
fn deagle_sequences_classify_by_name() {
    let path = "models/v_deagle.mdl";
    let mut store = MemAssetStore::new();
    store.insert(
        path,
        ModelBuilder::new()
            .sequences(["deagle_shoot", "deagle_inspect", "deagle_inspect_sil", "deagle_reload"])
            .build(),
    );
    let mut hub = hub(store, InspectConfig::default());
    let mut host = arena(&mut hub, &[(P, WeaponKind::Deagle, path)]);

    let path = AssetPath::from(path);
    assert!(hub.weapon_supports_inspect(&path));
    let analysis = hub.machine().cache().cached(&path).unwrap().clone();
    assert_eq!(analysis.pools.get(PoolKind::Inspect, SilencerTag::Generic).as_slice(), &[1]);
    assert_eq!(analysis.pools.get(PoolKind::Inspect, SilencerTag::Silenced).as_slice(), &[2]);
    assert!(!analysis.pools.contains(PoolKind::Inspect, 0));
    assert!(!analysis.pools.contains(PoolKind::Inspect, 3));
    assert!(!analysis.pools.any(PoolKind::Idle));

    // Not silencer-aware: only the generic pool is eligible.
    for _ in 0..10 {
        match hub.handle(&mut host, P, HostEvent::ManualCommand) {
            EventOutcome::Started(session) => assert_eq!(session.sequence, 1),
            other => panic!("expected start, got {other:?}"),
        }
        hub.cancel_inspect(&mut host, P, false);
        host.advance(1.0);
    }
}

#[test]
fn implausible_rate_and_frames_fall_back() {
    let path = "models/v_odd.mdl";
    let mut store = MemAssetStore::new();
    store.insert(
        path,
        ModelBuilder::new()
            .sequence("idle")
            .sequence_raw("odd_inspect", 500, 40, 999_999)
            .build(),
    );
    let cache_secs = sequence_analysis::ModelCache::new(store.clone(), Default::default())
        .sequence_duration(&AssetPath::from(path), 1)
        .unwrap();
    assert!((cache_secs - 40.0 / 30.0).abs() < 1e-9);

    let mut hub = hub(store, InspectConfig::default());
    let mut host = arena(&mut hub, &[(P, WeaponKind::Famas, path)]);
    match hub.handle(&mut host, P, HostEvent::ManualCommand) {
        EventOutcome::Started(session) => {
            assert!((session.duration - 40.0 / 30.0).abs() < 1e-9);
            assert!((session.ends_at - (ROUND_START + 40.0 / 30.0)).abs() < 1e-9);
        }
        other => panic!("expected start, got {other:?}"),
    }
}

#[test]
fn attack_mid_session_ends_it_exactly_once() {
    let mut hub = hub(testdata::mem_store(), InspectConfig::default());
    let mut host = arena(&mut hub, &[(P, WeaponKind::Ak47, testdata::AK47)]);
    assert!(hub.handle(&mut host, P, HostEvent::ManualCommand).started());

    host.advance(1.0);
    hub.handle(&mut host, P, HostEvent::PerTick);
    host.player_mut(P).unwrap().attack_held = true;
    host.advance(0.1);
    hub.handle(&mut host, P, HostEvent::PerTick);
    hub.handle(&mut host, P, HostEvent::PrimaryAttack);
    assert_eq!(host.ends(P), 1);

    host.take_effects();
    for _ in 0..20 {
        host.advance(0.1);
        assert_eq!(hub.handle(&mut host, P, HostEvent::PerTick), EventOutcome::Handled);
    }
    assert!(host.effects().is_empty());

    host.player_mut(P).unwrap().attack_held = false;
    assert!(hub.handle(&mut host, P, HostEvent::ManualCommand).started());
    assert_eq!(host.starts(P), 1);
}

#[test]
fn fourth_start_in_window_is_rate_limited() {
    let config = InspectConfig {
        max_starts_per_window: 3,
        ..InspectConfig::default()
    };
    let mut hub = hub(testdata::mem_store(), config);
    let mut host = arena(&mut hub, &[(P, WeaponKind::Ak47, testdata::AK47)]);

    let mut outcomes = Vec::new();
    for _ in 0..4 {
        outcomes.push(hub.handle(&mut host, P, HostEvent::ManualCommand));
        hub.cancel_inspect(&mut host, P, false);
        host.advance(0.1);
    }
    let rejections: Vec<_> = outcomes
        .iter()
        .filter_map(|o| match o {
            EventOutcome::Rejected(reason) => Some(*reason),
            _ => None,
        })
        .collect();
    assert_eq!(outcomes.iter().filter(|o| o.started()).count(), 3);
    assert_eq!(rejections, vec![Rejection::RateLimited]);
    assert!(outcomes[3] == EventOutcome::Rejected(Rejection::RateLimited));
}

#[test]
fn double_start_in_one_tick_yields_one_session() {
    let mut hub = hub(testdata::mem_store(), InspectConfig::default());
    let mut host = arena(&mut hub, &[(P, WeaponKind::Ak47, testdata::AK47)]);
    let first = hub.handle(&mut host, P, HostEvent::ImpulseReceived(100));
    let second = hub.handle(&mut host, P, HostEvent::ManualCommand);
    assert!(first.started());
    assert_eq!(second, EventOutcome::Rejected(Rejection::AlreadyInspecting));
    assert_eq!(
        host.effects().iter().filter(|e| matches!(e, Effect::Play(..))).count(),
        1
    );
}

#[test]
fn usp_toggle_mid_session_restarts_on_matching_pool() {
    let mut hub = hub(testdata::mem_store(), InspectConfig::default());
    let mut host = arena(&mut hub, &[(P, WeaponKind::Usp, testdata::USP)]);
    host.player_mut(P).unwrap().weapon.as_mut().unwrap().silenced = true;

    match hub.handle(&mut host, P, HostEvent::ManualCommand) {
        EventOutcome::Started(session) => assert_eq!(session.sequence, 12),
        other => panic!("expected start, got {other:?}"),
    }
    hub.handle(&mut host, P, HostEvent::SecondaryAttack);
    assert!(!hub.is_inspecting(P));
    host.player_mut(P).unwrap().weapon.as_mut().unwrap().silenced = false;

    host.advance(1.0);
    assert_eq!(
        hub.handle(&mut host, P, HostEvent::ManualCommand),
        EventOutcome::Rejected(Rejection::Cooldown)
    );
    host.advance(1.0);
    match hub.handle(&mut host, P, HostEvent::ManualCommand) {
        EventOutcome::Started(session) => assert_eq!(session.sequence, 13),
        other => panic!("expected start, got {other:?}"),
    }

    host.advance(2.5);
    hub.handle(&mut host, P, HostEvent::PerTick);
    assert!(!hub.is_inspecting(P));
    // Unsilenced idle wins over the generic one.
    assert_eq!(host.last_played(P), Some(7));
}
