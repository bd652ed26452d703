//! Concrete end-to-end scenarios S1-S6.
#![allow(clippy::cast_possible_truncation)]

mod common;

use common::ATTACK_BIT;
use fg_core::input::{BIT_LEFT, BIT_RIGHT};
use fg_core::{state_hash, step, CoreError, InputFrame, RollbackController, ValidationMode};

/// S1 - Idle hash: archetypes (0, 1), inputs all zero for 60 ticks.
#[test]
fn s1_idle_hash_is_stable_and_leaves_spawn_state_untouched() {
    let configs = common::default_configs();
    let actions = common::empty_library();
    let map = common::standard_map();
    let mut state = common::fresh_match();
    let spawn_health = state.players[0].health;

    let zero_input = InputFrame::default();
    for _ in 0..60 {
        step(&mut state, &zero_input, &map, &configs, &actions, ValidationMode::Strict, None).unwrap();
    }

    assert_eq!(state.frame_index, 60);
    assert_eq!(state.players[0].health, spawn_health);
    assert_eq!(state.players[1].health, spawn_health);
    assert_eq!(state.active_projectile_count, 0);

    let mut replay = common::fresh_match();
    for _ in 0..60 {
        step(&mut replay, &zero_input, &map, &configs, &actions, ValidationMode::Strict, None).unwrap();
    }
    assert_eq!(state_hash(&state), state_hash(&replay));
}

/// S2 - Symmetric march: P0 holds RIGHT, P1 holds LEFT for 120 ticks.
#[test]
fn s2_symmetric_march_stays_grounded_and_reproduces() {
    let configs = common::default_configs();
    let actions = common::empty_library();
    let map = common::standard_map();
    let mut state = common::fresh_match();

    let input = InputFrame {
        tick_index: 0,
        input_bits: [1 << BIT_RIGHT, 1 << BIT_LEFT],
    };

    let mut hashes = Vec::with_capacity(120);
    for tick in 0..120 {
        step(
            &mut state,
            &InputFrame { tick_index: tick, ..input },
            &map,
            &configs,
            &actions,
            ValidationMode::Strict,
            None,
        )
        .unwrap();
        assert!(state.players[0].grounded);
        assert!(state.players[1].grounded);
        hashes.push(state_hash(&state));
    }

    let half_width = configs[0].hitbox_width / 2;
    assert_eq!(state.players[0].pos_x, map.right_wall_x - half_width);
    assert_eq!(state.players[1].pos_x, map.left_wall_x + half_width);

    let mut replay = common::fresh_match();
    let mut replay_hashes = Vec::with_capacity(120);
    for tick in 0..120 {
        step(
            &mut replay,
            &InputFrame { tick_index: tick, ..input },
            &map,
            &configs,
            &actions,
            ValidationMode::Strict,
            None,
        )
        .unwrap();
        replay_hashes.push(state_hash(&replay));
    }
    assert_eq!(hashes, replay_hashes);
}

/// S3 - Light attack hit: P0 holds ATTACK on tick 10, hitbox active on
/// `actionFrameIndex` 4..8, connects once P1 is within range.
#[test]
fn s3_light_attack_hit_applies_damage_hitstun_and_clears_action() {
    let configs = common::default_configs();
    let actions = common::library_with_light_attack();
    let map = common::standard_map();
    let mut state = common::fresh_match();
    state.players[1].pos_x = state.players[0].pos_x + 600;
    let spawn_health = state.players[1].health;

    for tick in 0..30 {
        let bits = if tick == 10 { ATTACK_BIT } else { 0 };
        let input = InputFrame {
            tick_index: tick,
            input_bits: [bits, 0],
        };
        step(&mut state, &input, &map, &configs, &actions, ValidationMode::Strict, None).unwrap();
    }

    assert_eq!(state.players[1].health, spawn_health - 10);
    assert_eq!(state.players[1].hitstun_remaining, 12);
    assert_eq!(state.players[1].current_action_id, 0);
}

/// S4 - Projectile sweep: action spawns a projectile with `velX = 3500`,
/// 20 substeps per tick, traversing a thin gap without tunneling.
#[test]
fn s4_fast_projectile_sweeps_without_tunneling_then_deactivates_on_wall() {
    let configs = common::default_configs();
    let actions = common::library_with_projectile_special();
    let map = common::standard_map();
    let mut state = common::fresh_match();
    state.players[0].pos_x = map.left_wall_x + 10 * fg_core::fixed::SCALE;

    let bits = 1 << fg_core::input::BIT_SPECIAL;
    for tick in 0..6 {
        let input_bits = if tick == 0 { [bits, 0] } else { [0, 0] };
        let input = InputFrame {
            tick_index: tick,
            input_bits,
        };
        step(&mut state, &input, &map, &configs, &actions, ValidationMode::Strict, None).unwrap();
    }
    assert_eq!(state.active_projectile_count, 1);

    let zero_input = InputFrame::default();
    for tick in 6..60 {
        step(
            &mut state,
            &InputFrame { tick_index: tick, ..zero_input },
            &map,
            &configs,
            &actions,
            ValidationMode::Strict,
            None,
        )
        .unwrap();
    }

    assert_eq!(state.active_projectile_count, 0);
    for slot in &state.projectiles[state.active_projectile_count as usize..] {
        assert_eq!(*slot, fg_core::ProjectileState::EMPTY);
    }
}

/// S5 - Rollback correction: predict 10 ticks with P1 held at zero; confirm
/// tick 5 with P1 = ATTACK. After resimulation, `hash(state_10)` equals the
/// hash of a fresh run with the correct P1 input from tick 5 onward.
#[test]
fn s5_rollback_correction_matches_fresh_corrected_run() {
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
    let corrected_hash = state_hash(ctl.get_state(10).unwrap());

    let mut fresh = common::fresh_match();
    for frame in 1..=10 {
        let remote_bits = if frame >= 5 { ATTACK_BIT } else { 0 };
        let input = InputFrame {
            tick_index: frame,
            input_bits: [0, remote_bits],
        };
        step(&mut fresh, &input, &map, &configs, &actions, ValidationMode::Strict, None).unwrap();
    }

    assert_eq!(corrected_hash, state_hash(&fresh));
}

/// S6 - Window breach: requesting `getState(currentFrame - 130)` surfaces
/// `OutOfWindow`; the controller's current frame is unchanged.
#[test]
fn s6_window_breach_surfaces_out_of_window() {
    let configs = common::default_configs();
    let actions = common::library_with_light_attack();
    let map = common::standard_map();

    let mut ctl = RollbackController::new(common::fresh_match(), map, configs, actions, ValidationMode::Strict);
    for frame in 1..=130 {
        ctl.predict(frame, 0, 0).unwrap();
    }
    let current = ctl.current_frame();

    assert!(matches!(
        ctl.get_state(current - 130),
        Err(CoreError::OutOfWindow { .. })
    ));
    assert_eq!(ctl.current_frame(), current);
}
