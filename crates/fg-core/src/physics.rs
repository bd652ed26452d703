// SPDX-License-Identifier: Apache-2.0
//! Per-player movement, gravity, and AABB-resolved map collision.
//!
//! Every function here is total: there is no failure path, only branches,
//! matching the physics system's "none thrown" contract.

use crate::action::ActionFrame;
use crate::character::CharacterConfig;
use crate::fixed;
use crate::geom::{self, Aabb};
use crate::map::MapData;
use crate::state::{Facing, PlayerState};

/// Applies directional/jump input, or an action's root motion if present,
/// then friction.
///
/// When `root_motion` is `Some`, its nonzero velocity components override
/// directional input entirely (a zero component in the frame record
/// leaves that axis untouched, per the action authoring contract);
/// otherwise plain directional input is applied.
pub fn apply_movement_input(
    player: &mut PlayerState,
    cfg: &CharacterConfig,
    input_x: i32,
    jump_pressed: bool,
    root_motion: Option<&ActionFrame>,
) {
    if let Some(frame) = root_motion {
        if frame.vel_x != 0 {
            player.vel_x = frame.vel_x * player.facing.sign();
        }
        if frame.vel_y != 0 {
            player.vel_y = frame.vel_y;
        }
    } else if input_x != 0 {
        let speed = if player.grounded {
            cfg.walk_speed
        } else {
            cfg.air_speed
        };
        player.vel_x = input_x * speed;
        player.facing = Facing::from_sign(input_x);
    }

    let friction = if player.grounded {
        cfg.ground_friction
    } else {
        cfg.air_friction
    };
    player.vel_x = reduce_toward_zero(player.vel_x, friction);

    if jump_pressed && player.grounded {
        player.vel_y = cfg.jump_force;
        player.grounded = false;
    }
}

fn reduce_toward_zero(value: i32, amount: i32) -> i32 {
    if value > 0 {
        fixed::max(0, value - amount)
    } else if value < 0 {
        fixed::min(0, value + amount)
    } else {
        0
    }
}

/// Applies gravity for one tick, unless `ignore_gravity` (set by the
/// currently running action) suppresses it.
pub fn apply_gravity(player: &mut PlayerState, cfg: &CharacterConfig, ignore_gravity: bool) {
    if ignore_gravity {
        return;
    }
    if !player.grounded {
        player.vel_y = fixed::max(player.vel_y - cfg.gravity, -cfg.max_fall_speed);
    } else if player.vel_y < 0 {
        player.vel_y = 0;
    }
}

/// Builds this player's current hurtbox/body AABB at `(pos_x, pos_y)`.
///
/// `pos_y` is the player's ground-contact point; the box is centered
/// `hitbox_offset_y` above it, per the character config's authored offset.
#[must_use]
pub fn player_box_at(pos_x: i32, pos_y: i32, cfg: &CharacterConfig) -> Aabb {
    Aabb::centered(pos_x, pos_y + cfg.hitbox_offset_y, cfg.hitbox_width, cfg.hitbox_height)
}

/// Advances `player` by its current velocity and resolves collision
/// against every solid block in `map`, in array order. Ties between X and
/// Y penetration depth resolve X first.
///
/// Respawns the player if the candidate Y position falls below the kill
/// floor; health is untouched (death is decided by health, never by a
/// fall).
pub fn step_and_collide(player: &mut PlayerState, cfg: &CharacterConfig, map: &MapData) {
    let mut new_x = player.pos_x + player.vel_x;
    let mut new_y = player.pos_y + player.vel_y;
    player.grounded = false;

    for solid in &map.solids {
        let candidate = player_box_at(new_x, new_y, cfg);
        let Some((pen_x, pen_y)) = geom::penetration(candidate, *solid) else {
            continue;
        };

        if pen_x <= pen_y {
            if player.vel_x > 0 {
                new_x -= pen_x;
            } else if player.vel_x < 0 {
                new_x += pen_x;
            } else {
                new_x -= pen_x * fixed::sign(candidate.center_x() - solid.center_x());
            }
            player.vel_x = 0;
        } else if player.vel_y < 0 {
            new_y += pen_y;
            player.vel_y = 0;
            player.grounded = true;
        } else if player.vel_y > 0 {
            new_y -= pen_y;
            player.vel_y = 0;
        } else if new_y >= solid.center_y() {
            new_y += pen_y;
            player.grounded = true;
        } else {
            new_y -= pen_y;
        }
    }

    if new_y < map.kill_floor_y {
        player.pos_x = 0;
        player.pos_y = 2 * fixed::SCALE;
        player.vel_x = 0;
        player.vel_y = 0;
        player.grounded = false;
        return;
    }

    player.pos_x = new_x;
    player.pos_y = new_y;
}
