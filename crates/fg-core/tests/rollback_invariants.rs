//! Invariants 6 and 7 (rollback idempotence, resimulation fidelity) plus
//! scenarios S5 (rollback correction) and S6 (window breach).
#![allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]

mod common;

use common::ATTACK_BIT;
use fg_core::{state_hash, step, CoreError, InputFrame, RollbackController, ValidationMode};

#[test]
fn rollback_idempotent_when_confirmations_match_predictions() {
    let configs = common::default_configs();
    let actions = common::library_with_light_attack();
    let map = common::standard_map();

    let mut ctl = RollbackController::new(
        common::fresh_match(),
        map.clone(),
        configs,
        actions.clone(),
        ValidationMode::Strict,
    );

    let local_bits: Vec<u16> = (1..=10).map(|t| if t == 3 { ATTACK_BIT } else { 0 }).collect();

    for (i, &bits) in local_bits.iter().enumerate() {
        let frame = i as i32 + 1;
        ctl.predict(frame, 0, bits).unwrap();
        ctl.confirm_remote_input(frame, 1, 0).unwrap();
    }
    let rollback_hash = state_hash(ctl.get_state(10).unwrap());

    let mut fresh = common::fresh_match();
    for (i, &bits) in local_bits.iter().enumerate() {
        let frame = i as i32 + 1;
        let input = InputFrame {
            tick_index: frame,
            input_bits: [bits, 0],
        };
        step(&mut fresh, &input, &map, &configs, &actions, ValidationMode::Strict, None).unwrap();
    }

    assert_eq!(rollback_hash, state_hash(&fresh));
}

/// Invariant 7: after `confirm_remote_input` resolves a divergent-then-
/// corrected sequence, the resimulated hash matches a fresh run seeded with
/// the corrected input from the point of correction onward.
#[test]
fn resimulation_fidelity_matches_fresh_run_with_corrected_input() {
    let configs = common::default_configs();
    let actions = common::library_with_light_attack();
    let map = common::standard_map();

    let mut ctl = RollbackController::new(
        common::fresh_match(),
        map.clone(),
        configs,
        actions.clone(),
        ValidationMode::Strict,
    );
    for frame in 1..=10 {
        ctl.predict(frame, 0, 0).unwrap();
    }
    ctl.confirm_remote_input(5, 1, ATTACK_BIT).unwrap();
    let rollback_hash = state_hash(ctl.get_state(10).unwrap());

    let mut fresh = common::fresh_match();
    for frame in 1..=10 {
        let remote_bits = if frame >= 5 { ATTACK_BIT } else { 0 };
        let input = InputFrame {
            tick_index: frame,
            input_bits: [0, remote_bits],
        };
        step(&mut fresh, &input, &map, &configs, &actions, ValidationMode::Strict, None).unwrap();
    }

    assert_eq!(rollback_hash, state_hash(&fresh));
}

/// A request for a frame more than 120 ticks behind `current_frame`
/// surfaces `OutOfWindow` and leaves the controller's current frame
/// unchanged (see also scenario S6 in `scenarios.rs`).
#[test]
fn window_breach_surfaces_out_of_window_and_leaves_state_unchanged() {
    let configs = common::default_configs();
    let actions = common::library_with_light_attack();
    let map = common::standard_map();

    let mut ctl = RollbackController::new(common::fresh_match(), map, configs, actions, ValidationMode::Strict);
    for frame in 1..=130 {
        ctl.predict(frame, 0, 0).unwrap();
    }
    let current = ctl.current_frame();

    let err = ctl.get_state(current - 130).unwrap_err();
    assert!(matches!(err, CoreError::OutOfWindow { .. }));
    assert_eq!(ctl.current_frame(), current);
}
