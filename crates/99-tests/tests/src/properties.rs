use inspect_hub::{EventOutcome, HostEvent};
use inspect_session::{InspectConfig, PlayerId, Rejection, WeaponKind};
use proptest::prelude::*;

use crate::support::{arena, hub};

const P: PlayerId = PlayerId(1);

#[derive(Clone, Debug)]
enum Step {
    Advance(f64),
    Event(HostEvent),
    HoldAttack(bool),
    Silencer(bool),
    Block(f64),
    Force,
}

fn event_strategy() -> impl Strategy<Value = HostEvent> {
    prop_oneof![
        Just(HostEvent::PerTick),
        Just(HostEvent::PrimaryAttack),
        Just(HostEvent::SecondaryAttack),
        Just(HostEvent::Deploy),
        (0.0f64..3.0).prop_map(|next_attack_delay| HostEvent::ReloadEntered { next_attack_delay }),
        Just(HostEvent::ImpulseReceived(100)),
        Just(HostEvent::ManualCommand),
    ]
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        4 => (0.0f64..1.5).prop_map(Step::Advance),
        6 => event_strategy().prop_map(Step::Event),
        1 => any::<bool>().prop_map(Step::HoldAttack),
        1 => any::<bool>().prop_map(Step::Silencer),
        1 => (0.0f64..2.0).prop_map(Step::Block),
        1 => Just(Step::Force),
    ]
}

proptest! {
    #[test]
    fn guard_deadlines_are_monotonic_and_sessions_balanced(
        steps in prop::collection::vec(step_strategy(), 1..80),
    ) {
        let mut hub = hub(testdata::mem_store(), InspectConfig::default());
        let mut host = arena(&mut hub, &[(P, WeaponKind::Usp, testdata::USP)]);
        let mut last = (0.0, 0.0, 0.0);

        for step in steps {
            match step {
                Step::Advance(dt) => host.advance(dt),
                Step::Event(event) => {
                    hub.handle(&mut host, P, event);
                    if event == HostEvent::PerTick {
                        if let Some(session) = hub.player_state(P).unwrap().session() {
                            prop_assert!(host.now < session.ends_at);
                        }
                    }
                }
                Step::HoldAttack(held) => host.player_mut(P).unwrap().attack_held = held,
                Step::Silencer(on) => {
                    host.player_mut(P).unwrap().weapon.as_mut().unwrap().silenced = on;
                }
                Step::Block(secs) => {
                    hub.block_inspect(&mut host, P, secs);
                }
                Step::Force => {
                    hub.force_inspect(&mut host, P);
                }
            }

            let state = hub.player_state(P).unwrap();
            let now = (state.busy_until(), state.cooldown_until(), state.blocked_until());
            prop_assert!(now.0 >= last.0 && now.1 >= last.1 && now.2 >= last.2);
            last = now;

            let open = host.starts(P) - host.ends(P);
            prop_assert_eq!(open, usize::from(state.is_inspecting()));
        }
    }

    #[test]
    fn rate_limit_admits_exactly_n_of_n_plus_one(n in 1i32..6) {
        let config = InspectConfig { max_starts_per_window: n, ..InspectConfig::default() };
        let mut hub = hub(testdata::mem_store(), config);
        let mut host = arena(&mut hub, &[(P, WeaponKind::Ak47, testdata::AK47)]);

        let mut started = 0;
        let mut limited = 0;
        for _ in 0..=n {
            match hub.handle(&mut host, P, HostEvent::ManualCommand) {
                EventOutcome::Started(_) => started += 1,
                EventOutcome::Rejected(Rejection::RateLimited) => limited += 1,
                other => prop_assert!(false, "unexpected outcome {:?}", other),
            }
            hub.cancel_inspect(&mut host, P, false);
            host.advance(0.9 / f64::from(n + 1));
        }
        prop_assert_eq!(started, n);
        prop_assert_eq!(limited, 1);
    }
}
