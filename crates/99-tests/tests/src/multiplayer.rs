use inspect_hub::{EventOutcome, HostEvent};
use inspect_session::{InspectConfig, PlayerId, Rejection, WeaponKind};

use crate::support::{arena, hub};

const A: PlayerId = PlayerId(1);
const B: PlayerId = PlayerId(2);
const C: PlayerId = PlayerId(3);

#[test]
fn players_share_analyses_but_not_guards() {
    let mut hub = hub(testdata::mem_store(), InspectConfig::default());
    let mut host = arena(
        &mut hub,
        &[
            (A, WeaponKind::Ak47, testdata::AK47),
            (B, WeaponKind::Ak47, testdata::AK47),
            (C, WeaponKind::Knife, testdata::KNIFE),
        ],
    );

    hub.handle(&mut host, A, HostEvent::Deploy);
    assert_eq!(
        hub.handle(&mut host, A, HostEvent::ManualCommand),
        EventOutcome::Rejected(Rejection::Cooldown)
    );
    assert!(hub.handle(&mut host, B, HostEvent::ManualCommand).started());
    assert_eq!(
        hub.handle(&mut host, C, HostEvent::ManualCommand),
        EventOutcome::Rejected(Rejection::Unsupported)
    );
    assert_eq!(hub.machine().cache().stats().analyses_run, 2);
    assert_eq!(hub.players().inspecting(), 1);

    host.advance(4.0);
    for id in hub.players().ids() {
        hub.handle(&mut host, id, HostEvent::PerTick);
    }
    assert_eq!(hub.players().inspecting(), 0);
    assert_eq!(host.ends(B), 1);
    assert_eq!(host.ends(A), 0);
}

#[test]
fn disconnect_mid_session_leaves_others_running() {
    let mut hub = hub(testdata::mem_store(), InspectConfig::default());
    let mut host = arena(
        &mut hub,
        &[
            (A, WeaponKind::Usp, testdata::USP),
            (B, WeaponKind::Ak47, testdata::AK47),
        ],
    );
    assert!(hub.force_inspect(&mut host, A));
    assert!(hub.force_inspect(&mut host, B));

    hub.handle(&mut host, A, HostEvent::Disconnected);
    host.remove_player(A);
    assert_eq!(host.ends(A), 1);
    assert!(hub.is_inspecting(B));
    assert_eq!(hub.handle(&mut host, A, HostEvent::PerTick), EventOutcome::Ignored);

    hub.handle(&mut host, A, HostEvent::Joined);
    assert!(!hub.is_inspecting(A));
    assert_eq!(
        hub.handle(&mut host, A, HostEvent::ManualCommand),
        EventOutcome::Rejected(Rejection::PlayerUnavailable)
    );
}
