//! Property tests for session invariants, driven through the public API.

use proptest::prelude::*;

use riot_session::game::character::find_character;
use riot_session::game::state::{SessionStateView, EVENT_LOG_CAPACITY, MAX_ENERGY, MAX_HEALTH};
use riot_session::host::handle::apply_command;
use riot_session::host::SessionCommand;
use riot_session::{ActionKind, Difficulty, Session, SessionError};

fn new_session(id: &str) -> Session {
    let selection = find_character(id).unwrap().select().unwrap();
    Session::start(Some(selection), Difficulty::Normal).unwrap().0
}

fn action_kind() -> impl Strategy<Value = ActionKind> {
    prop_oneof![
        Just(ActionKind::Jump),
        Just(ActionKind::Duck),
        Just(ActionKind::Attack),
        Just(ActionKind::Collect),
    ]
}

fn command() -> impl Strategy<Value = SessionCommand> {
    prop_oneof![
        4 => action_kind().prop_map(|kind| SessionCommand::Action { kind }),
        3 => (0u8..=6).prop_map(|slot| SessionCommand::UseAbility { slot }),
        1 => Just(SessionCommand::Pause),
        1 => Just(SessionCommand::Resume),
        1 => Just(SessionCommand::TogglePause),
        1 => Just(SessionCommand::Reset),
        3 => Just(SessionCommand::Tick),
    ]
}

proptest! {
    #[test]
    fn bounds_hold_after_every_step(commands in prop::collection::vec(command(), 0..200)) {
        let mut session = new_session("police-captain");
        let mut previous = session.snapshot();

        for command in commands {
            let result = apply_command(&mut session, command);
            let view = session.snapshot();

            prop_assert!(view.health <= MAX_HEALTH);
            prop_assert!(view.energy <= MAX_ENERGY);
            prop_assert!(view.event_log.len() <= EVENT_LOG_CAPACITY);
            prop_assert_eq!(view.health, MAX_HEALTH);

            if command != SessionCommand::Reset {
                prop_assert!(view.score >= previous.score);
                prop_assert!(view.coins >= previous.coins);
                for (slot, uses) in view.ability_uses.iter() {
                    prop_assert!(uses >= previous.ability_uses.get(slot));
                }
            }

            if let Err(SessionError::InsufficientEnergy { .. }) = result {
                prop_assert_eq!(&view, &previous);
            }

            previous = view;
        }
    }

    #[test]
    fn paused_session_is_frozen(
        setup in prop::collection::vec(command(), 0..50),
        frozen_commands in prop::collection::vec(
            prop_oneof![
                action_kind().prop_map(|kind| SessionCommand::Action { kind }),
                (0u8..=6).prop_map(|slot| SessionCommand::UseAbility { slot }),
                Just(SessionCommand::Tick),
                Just(SessionCommand::Pause),
            ],
            0..50,
        ),
    ) {
        let mut session = new_session("protester-leader");
        for command in setup {
            let _ = apply_command(&mut session, command);
        }
        session.pause();
        let frozen = session.snapshot();

        for command in frozen_commands {
            let _ = apply_command(&mut session, command);
            prop_assert_eq!(&session.snapshot(), &frozen);
        }
    }

    #[test]
    fn reset_always_yields_defaults(commands in prop::collection::vec(command(), 0..100)) {
        let mut session = new_session("protester-leader");
        for command in commands {
            let _ = apply_command(&mut session, command);
        }

        session.reset();
        prop_assert_eq!(session.snapshot(), SessionStateView::default());
        prop_assert!(!session.reset().changed);
        prop_assert_eq!(session.snapshot(), SessionStateView::default());
    }

    #[test]
    fn successful_ability_counts_once(slot in 1u8..=4, attempts in 1usize..12) {
        let mut session = new_session("police-captain");
        let mut successes = 0;

        for _ in 0..attempts {
            match session.use_ability(slot) {
                Ok(transition) if transition.changed => successes += 1,
                Ok(_) => {}
                Err(SessionError::InsufficientEnergy { .. }) => {}
                Err(e) => prop_assert!(false, "unexpected error: {}", e),
            }
        }

        prop_assert_eq!(session.snapshot().ability_uses.get(slot), successes);
        prop_assert!(successes <= 5);
    }
}

#[test]
fn six_events_keep_the_newest_five() {
    let mut session = new_session("protester-leader");
    let kinds = [
        ActionKind::Jump,
        ActionKind::Duck,
        ActionKind::Attack,
        ActionKind::Collect,
        ActionKind::Jump,
        ActionKind::Attack,
    ];
    for kind in kinds {
        session.action(kind);
    }

    let log: Vec<String> = session.snapshot().event_log.iter().map(String::from).collect();
    assert_eq!(
        log,
        vec![
            "Freedom Fighter attacked successfully!",
            "Freedom Fighter jumped over obstacle!",
            "Freedom Fighter collected item!",
            "Freedom Fighter attacked successfully!",
            "Freedom Fighter ducked to avoid projectile!",
        ]
    );
}

#[test]
fn paused_ticks_and_actions_then_resume() {
    let mut session = new_session("protester-leader");
    session.pause();
    let before = session.snapshot();

    for _ in 0..3 {
        session.tick();
    }
    session.action(ActionKind::Jump);
    session.action(ActionKind::Collect);

    let after = session.snapshot();
    assert_eq!(after.elapsed_seconds, before.elapsed_seconds);
    assert_eq!(after.score, before.score);
    assert_eq!(after.energy, before.energy);

    session.resume();
    session.tick();
    assert_eq!(session.snapshot().elapsed_seconds, before.elapsed_seconds + 1);
}

#[test]
fn low_energy_ability_is_refused_without_change() {
    let mut session = new_session("police-captain");
    // 100 -> 20 after four uses, -> 0 after the fifth; regen to 15.
    for slot in 1..=4 {
        session.use_ability(slot).unwrap();
    }
    session.use_ability(1).unwrap();
    for _ in 0..15 {
        session.action(ActionKind::Duck);
    }
    assert_eq!(session.snapshot().energy, 15);

    let before = session.snapshot();
    for slot in 1..=4 {
        assert_eq!(
            session.use_ability(slot),
            Err(SessionError::InsufficientEnergy { energy: 15, required: 20 })
        );
    }
    assert_eq!(session.snapshot(), before);
}
