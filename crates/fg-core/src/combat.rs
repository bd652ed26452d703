// SPDX-License-Identifier: Apache-2.0
//! Hitbox vs hurtbox resolution, knockback, and hitstun application.
//!
//! Iteration order is deterministic by construction: attacker index
//! ascending, then event index ascending within that attacker's action.
//! Self-hits are excluded by attacker identity, never by geometry, so an
//! attacker can never clip its own hurtbox into a trade with itself.

use crate::action::{ActionLibrary, HitboxEvent};
use crate::character::CharacterConfig;
use crate::constants::MAX_PLAYERS;
use crate::fixed;
use crate::geom::{self, Aabb};
use crate::physics::player_box_at;
use crate::state::GameState;

fn world_hitbox(event: &HitboxEvent, attacker_x: i32, attacker_y: i32, facing_sign: i32) -> Aabb {
    let cx = attacker_x + event.offset_x * facing_sign;
    let cy = attacker_y + event.offset_y;
    Aabb::centered(cx, cy, event.width, event.height)
}

/// Normalized knockback direction from `(ax, ay)` toward `(bx, by)`, using
/// integer sqrt; when the two points coincide, knockback is purely upward
/// (`(0, +SCALE)`).
#[must_use]
pub fn knockback_direction(ax: i32, ay: i32, bx: i32, by: i32) -> (i32, i32) {
    let dx = bx - ax;
    let dy = by - ay;
    let dist_sq = i64::from(dx) * i64::from(dx) + i64::from(dy) * i64::from(dy);
    if dist_sq == 0 {
        return (0, fixed::SCALE);
    }
    let dist = fixed::sqrt(dist_sq);
    if dist == 0 {
        return (0, fixed::SCALE);
    }
    let dist = i32::try_from(dist).unwrap_or(i32::MAX);
    let dir_x = fixed::div(dx, dist).unwrap_or(0);
    let dir_y = fixed::div(dy, dist).unwrap_or(0);
    (dir_x, dir_y)
}

/// Resolves every living attacker's currently active hitboxes against
/// every other living player's hurtbox, in deterministic order.
///
/// Hits are applied as soon as they are found rather than batched, which
/// keeps this allocation-free: the attacker/defender positions that drive
/// the overlap test are untouched by `apply_hit` (it only ever writes
/// velocity, health, hitstun, and the defender's action), so applying
/// immediately is equivalent to collecting every hit first and applying
/// afterward, and preserves the required `(attacker_idx, event_idx)`
/// iteration order.
pub fn resolve(state: &mut GameState, configs: &[CharacterConfig; MAX_PLAYERS], actions: &ActionLibrary) {
    for attacker_idx in 0..MAX_PLAYERS {
        let attacker = state.players[attacker_idx];
        if !attacker.is_alive() || attacker.current_action_id == 0 {
            continue;
        }
        let Some(action) = actions.lookup(attacker.current_action_id) else {
            continue;
        };
        for event in &action.hitboxes {
            if attacker.action_frame_index < event.start_frame
                || attacker.action_frame_index >= event.end_frame
            {
                continue;
            }
            let facing_sign = attacker.facing.sign();
            let hitbox = world_hitbox(event, attacker.pos_x, attacker.pos_y, facing_sign);
            let event = *event;

            for defender_idx in 0..MAX_PLAYERS {
                if defender_idx == attacker_idx {
                    continue;
                }
                let defender = state.players[defender_idx];
                if !defender.is_alive() {
                    continue;
                }
                let hurtbox = player_box_at(defender.pos_x, defender.pos_y, &configs[defender_idx]);
                if geom::overlaps(hitbox, hurtbox) {
                    apply_hit(state, configs, attacker_idx, defender_idx, &event);
                }
            }
        }
    }
}

fn apply_hit(
    state: &mut GameState,
    configs: &[CharacterConfig; MAX_PLAYERS],
    attacker_idx: usize,
    defender_idx: usize,
    event: &HitboxEvent,
) {
    let attacker = state.players[attacker_idx];
    let attacker_cfg = configs[attacker_idx];
    let defender_cfg = configs[defender_idx];
    let defender = &mut state.players[defender_idx];
    if !defender.is_alive() {
        return;
    }

    let (dir_x, dir_y) = knockback_direction(attacker.pos_x, attacker.pos_y, defender.pos_x, defender.pos_y);
    let magnitude = event.base_knockback + i32::from(event.damage) * event.knockback_growth;
    let weight_factor =
        fixed::SCALE * defender_cfg.weight_factor_base / (defender_cfg.weight_factor_base + defender_cfg.weight);

    let kb_x = fixed::mul(fixed::mul(dir_x, magnitude), weight_factor);
    let kb_y = fixed::mul(fixed::mul(dir_y, magnitude), weight_factor);
    defender.vel_x += kb_x;
    defender.vel_y += kb_y;

    defender.health = i16::max(0, defender.health - event.damage);
    let scaled_hitstun = fixed::mul(i32::from(event.hitstun), attacker_cfg.hitstun_multiplier);
    defender.hitstun_remaining = i16::try_from(scaled_hitstun).unwrap_or(i16::MAX);
    defender.clear_action();
}
