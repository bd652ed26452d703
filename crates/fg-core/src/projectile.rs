// SPDX-License-Identifier: Apache-2.0
//! Sub-stepped swept projectile movement, lifetime, and slot compaction.
//!
//! `175` is the anti-tunneling velocity threshold (the smallest sensible
//! projectile dimension crossed in one tick); `32` is the worst-case
//! substep cap so a single tick's projectile pass stays bounded regardless
//! of how fast a projectile is authored to travel.
#![allow(clippy::cast_possible_truncation)]

use crate::constants::MAX_PROJECTILES;
use crate::fixed;
use crate::geom::{self, Aabb};
use crate::map::MapData;
use crate::state::{GameState, ProjectileState};

/// Side length of a projectile's collision box.
pub const PROJECTILE_SIZE: i32 = 20 * fixed::SCALE / 1000;

const SUBSTEP_VELOCITY_THRESHOLD: i32 = 175;
const MAX_SUBSTEPS: i32 = 32;

fn substep_count(vel_x: i32, vel_y: i32) -> i32 {
    let max_component = fixed::max(fixed::abs(vel_x), fixed::abs(vel_y));
    fixed::clamp(max_component / SUBSTEP_VELOCITY_THRESHOLD, 1, MAX_SUBSTEPS)
}

/// Advances one active projectile by one tick: decrements lifetime,
/// sub-steps its motion against `map`'s solids, and deactivates it on
/// expiry or collision.
pub fn advance(projectile: &mut ProjectileState, map: &MapData) {
    if !projectile.active {
        return;
    }

    projectile.lifetime_remaining -= 1;
    if projectile.lifetime_remaining <= 0 {
        projectile.active = false;
        return;
    }

    let steps = substep_count(projectile.vel_x, projectile.vel_y);
    let step_x = projectile.vel_x / steps;
    let step_y = projectile.vel_y / steps;

    for _ in 0..steps {
        let next_x = projectile.pos_x + step_x;
        let next_y = projectile.pos_y + step_y;

        if next_y < map.kill_floor_y {
            projectile.active = false;
            return;
        }

        let box_at = Aabb::centered(next_x, next_y, PROJECTILE_SIZE, PROJECTILE_SIZE);
        let hit_solid = map.solids.iter().any(|solid| geom::overlaps(box_at, *solid));
        if hit_solid {
            projectile.active = false;
            return;
        }

        projectile.pos_x = next_x;
        projectile.pos_y = next_y;
    }
}

/// Advances every active projectile, then compacts the active prefix with
/// a stable write-index pass: surviving slots keep their relative order,
/// vacated slots are zeroed.
pub fn update_all(state: &mut GameState, map: &MapData) {
    for idx in state.active_projectile_indices() {
        advance(&mut state.projectiles[idx], map);
    }
    compact(state);
}

fn compact(state: &mut GameState) {
    let mut write = 0usize;
    let active_count = state.active_projectile_count as usize;
    for read in 0..active_count {
        if state.projectiles[read].active {
            if write != read {
                state.projectiles[write] = state.projectiles[read];
            }
            write += 1;
        }
    }
    for slot in state.projectiles.iter_mut().skip(write).take(MAX_PROJECTILES - write) {
        *slot = ProjectileState::EMPTY;
    }
    state.active_projectile_count = write as u32;
}

/// Spawns a new projectile, returning its slot index, or `None` if the
/// array is full (`SpawnRejected`, a silent, total outcome).
pub fn spawn(
    state: &mut GameState,
    pos: (i32, i32),
    vel: (i32, i32),
    lifetime: i16,
) -> Option<usize> {
    let active = state.active_projectile_count as usize;
    if active >= MAX_PROJECTILES {
        return None;
    }

    let slot_index = (0..active)
        .find(|&i| !state.projectiles[i].active)
        .unwrap_or(active);

    let uid = state.next_projectile_uid;
    state.next_projectile_uid = state.next_projectile_uid.wrapping_add(1);

    state.projectiles[slot_index] = ProjectileState {
        uid,
        active: true,
        pos_x: pos.0,
        pos_y: pos.1,
        vel_x: vel.0,
        vel_y: vel.1,
        lifetime_remaining: lifetime,
    };
    if slot_index == active {
        state.active_projectile_count += 1;
    }
    Some(slot_index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fast_projectile_does_not_tunnel_through_thin_wall() {
        let map = MapData {
            solids: vec![Aabb {
                min_x: 9 * fixed::SCALE,
                max_x: 10 * fixed::SCALE,
                min_y: -5 * fixed::SCALE,
                max_y: 5 * fixed::SCALE,
            }],
            kill_floor_y: -100 * fixed::SCALE,
            left_wall_x: -100 * fixed::SCALE,
            right_wall_x: 100 * fixed::SCALE,
        };
        let mut p = ProjectileState {
            uid: 1,
            active: true,
            pos_x: 0,
            pos_y: 0,
            vel_x: 3500,
            vel_y: 0,
            lifetime_remaining: 10,
        };
        assert_eq!(substep_count(p.vel_x, p.vel_y), 20);
        advance(&mut p, &map);
        assert!(!p.active);
    }

    #[test]
    fn lifetime_expiry_deactivates() {
        let map = MapData::standard_stage();
        let mut p = ProjectileState {
            uid: 1,
            active: true,
            pos_x: 0,
            pos_y: 5 * fixed::SCALE,
            vel_x: 0,
            vel_y: 0,
            lifetime_remaining: 1,
        };
        advance(&mut p, &map);
        assert!(!p.active);
    }

    #[test]
    fn spawn_rejected_when_array_full() {
        let mut state = GameState::new((0, 0), (0, 0), 100);
        state.active_projectile_count = MAX_PROJECTILES as u32;
        for slot in &mut state.projectiles {
            slot.active = true;
        }
        assert_eq!(spawn(&mut state, (0, 0), (0, 0), 10), None);
    }

    #[test]
    fn compaction_keeps_relative_order_and_zeroes_tail() {
        let mut state = GameState::new((0, 0), (0, 0), 100);
        for i in 0..3 {
            spawn(
                &mut state,
                (i * fixed::SCALE, 5 * fixed::SCALE),
                (0, 0),
                100,
            );
        }
        state.projectiles[1].active = false;
        let map = MapData::standard_stage();
        update_all(&mut state, &map);
        assert_eq!(state.active_projectile_count, 2);
        assert_eq!(state.projectiles[0].pos_x, 0);
        assert_eq!(state.projectiles[1].pos_x, 2 * fixed::SCALE);
        for slot in &state.projectiles[2..] {
            assert_eq!(*slot, ProjectileState::EMPTY);
        }
    }
}
