// SPDX-License-Identifier: Apache-2.0
//! The single deterministic entry point: `step`.
//!
//! Ten phases, strictly sequential, reordering any of them is a correctness
//! bug. Nothing in this module allocates, reads the clock, or logs; the
//! rollback controller is the only place in this crate permitted to do so.

use crate::action::ActionLibrary;
use crate::character::CharacterConfig;
use crate::combat;
use crate::constants::MAX_PLAYERS;
use crate::error::CoreError;
use crate::hash;
use crate::input::{self, InputFrame};
use crate::map::MapData;
use crate::physics;
use crate::projectile;
use crate::state::GameState;

/// How often `step` computes and checks the state hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// Hash every tick; used by tests and the CLI's strict mode.
    Strict,
    /// Hash every tenth tick; the production default.
    Production,
}

impl ValidationMode {
    /// Ticks between hash computations.
    #[must_use]
    pub fn hash_period(self) -> i32 {
        match self {
            ValidationMode::Strict => 1,
            ValidationMode::Production => 10,
        }
    }
}

/// Advances `state` by exactly one tick given this tick's `inputs`.
///
/// # Errors
/// Returns [`CoreError::DesyncDetected`] if this tick lands on a validation
/// boundary and `expected_hash` disagrees with the freshly computed hash.
/// Never returns any other error variant and never panics.
pub fn step(
    state: &mut GameState,
    inputs: &InputFrame,
    map: &MapData,
    configs: &[CharacterConfig; MAX_PLAYERS],
    actions: &ActionLibrary,
    mode: ValidationMode,
    expected_hash: Option<u32>,
) -> Result<(), CoreError> {
    apply_input_and_movement(state, inputs, configs, actions);
    apply_gravity_phase(state, configs, actions);
    step_map_collision(state, configs, map);
    apply_projectile_spawns(state, actions);
    combat::resolve(state, configs, actions);
    projectile::update_all(state, map);
    advance_actions_and_hitstun(state, actions);

    state.frame_index += 1;

    validate(state, mode, expected_hash)
}

/// Phases 1-2: select/continue an action and apply movement (including root
/// motion) for every living player.
fn apply_input_and_movement(
    state: &mut GameState,
    inputs: &InputFrame,
    configs: &[CharacterConfig; MAX_PLAYERS],
    actions: &ActionLibrary,
) {
    for i in 0..MAX_PLAYERS {
        if !state.players[i].is_alive() {
            continue;
        }
        let cfg = configs[i];
        let bits = inputs.input_bits[i];
        let snapshot = state.players[i];

        let cancelable = actions
            .lookup(snapshot.current_action_id)
            .and_then(|action| action.frame_at(snapshot.action_frame_index))
            .is_none_or(|frame| frame.cancelable);

        if snapshot.hitstun_remaining == 0 && (snapshot.current_action_id == 0 || cancelable) {
            if let Some(action) = actions.select(cfg.archetype_id, bits) {
                state.players[i].current_action_id = action.id;
                state.players[i].action_frame_index = 0;
            }
        }

        let player = &mut state.players[i];
        let root_motion = actions
            .lookup(player.current_action_id)
            .and_then(|action| action.frame_at(player.action_frame_index))
            .copied();
        let input_x = input::horizontal_axis(bits);
        let jump_pressed = input::is_set(bits, input::BIT_JUMP);
        physics::apply_movement_input(player, &cfg, input_x, jump_pressed, root_motion.as_ref());
    }
}

/// Phase 3: gravity, suppressed while the running action sets `ignore_gravity`.
fn apply_gravity_phase(
    state: &mut GameState,
    configs: &[CharacterConfig; MAX_PLAYERS],
    actions: &ActionLibrary,
) {
    for i in 0..MAX_PLAYERS {
        if !state.players[i].is_alive() {
            continue;
        }
        let action_id = state.players[i].current_action_id;
        let ignore_gravity = actions.lookup(action_id).is_some_and(|a| a.ignore_gravity);
        physics::apply_gravity(&mut state.players[i], &configs[i], ignore_gravity);
    }
}

/// Phase 4: map collision, in player-index order.
fn step_map_collision(state: &mut GameState, configs: &[CharacterConfig; MAX_PLAYERS], map: &MapData) {
    for i in 0..MAX_PLAYERS {
        if !state.players[i].is_alive() {
            continue;
        }
        physics::step_and_collide(&mut state.players[i], &configs[i], map);
    }
}

/// Phase 5: fires every projectile spawn event whose frame matches this
/// tick's `action_frame_index`, transformed by facing. `player` is read as
/// a by-value copy before `state.projectiles` is mutated, so this never
/// holds a borrow of `state.players` across the spawn call and never
/// allocates.
fn apply_projectile_spawns(state: &mut GameState, actions: &ActionLibrary) {
    for i in 0..MAX_PLAYERS {
        let player = state.players[i];
        if !player.is_alive() || player.current_action_id == 0 {
            continue;
        }
        let Some(action) = actions.lookup(player.current_action_id) else {
            continue;
        };
        let facing_sign = player.facing.sign();
        for spawn_event in &action.projectile_spawns {
            if spawn_event.frame != player.action_frame_index {
                continue;
            }
            let pos = (
                player.pos_x + spawn_event.offset_x * facing_sign,
                player.pos_y + spawn_event.offset_y,
            );
            let vel = (spawn_event.vel_x * facing_sign, spawn_event.vel_y);
            let _ = projectile::spawn(state, pos, vel, spawn_event.lifetime);
        }
    }
}

/// Phase 8: advances `action_frame_index`, returning to idle at
/// `total_frames`, and decrements `hitstun_remaining` once per tick.
fn advance_actions_and_hitstun(state: &mut GameState, actions: &ActionLibrary) {
    for i in 0..MAX_PLAYERS {
        if !state.players[i].is_alive() {
            continue;
        }
        let total_frames = actions.lookup(state.players[i].current_action_id).map(|a| a.total_frames);
        let player = &mut state.players[i];

        if player.hitstun_remaining > 0 {
            player.hitstun_remaining -= 1;
        }

        if player.current_action_id != 0 {
            player.action_frame_index += 1;
            match total_frames {
                Some(total) if player.action_frame_index < total => {}
                _ => player.clear_action(),
            }
        }
    }
}

/// Phase 10: computes and checks the state hash on validation boundaries.
fn validate(
    state: &mut GameState,
    mode: ValidationMode,
    expected_hash: Option<u32>,
) -> Result<(), CoreError> {
    let period = mode.hash_period();
    if state.frame_index % period != 0 {
        return Ok(());
    }

    let computed = hash::state_hash(state);
    if let Some(expected) = expected_hash {
        if computed != expected {
            return Err(CoreError::DesyncDetected {
                frame: state.frame_index,
                expected,
                actual: computed,
            });
        }
    }
    state.last_validated_hash = computed;
    state.last_validated_frame = state.frame_index;
    Ok(())
}
