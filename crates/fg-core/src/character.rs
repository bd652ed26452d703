// SPDX-License-Identifier: Apache-2.0
//! Per-archetype tuning tables.
//!
//! Ten archetypes are baked into the binary as a read-only array, the same
//! way the teacher's own demo fixtures bake in test data rather than
//! reaching for a runtime config loader on the deterministic path. Copies
//! are always by value; nothing here is shared by hidden reference.

use crate::error::CoreError;
use crate::fixed::SCALE;

/// Tuning values for one playable archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterConfig {
    /// Stable archetype id, `0..=9`.
    pub archetype_id: i32,
    /// Hurtbox/hitbox-origin full width.
    pub hitbox_width: i32,
    /// Hurtbox/hitbox-origin full height.
    pub hitbox_height: i32,
    /// Vertical offset from `pos_y` to the hitbox center.
    pub hitbox_offset_y: i32,
    /// Mass used by the knockback weight factor.
    pub weight: i32,
    /// Grounded horizontal walk speed.
    pub walk_speed: i32,
    /// Grounded horizontal run speed (used by dash-type actions).
    pub run_speed: i32,
    /// Airborne horizontal speed.
    pub air_speed: i32,
    /// Upward velocity applied on jump.
    pub jump_force: i32,
    /// Downward acceleration applied per tick while airborne.
    pub gravity: i32,
    /// Maximum downward fall speed.
    pub max_fall_speed: i32,
    /// Per-tick horizontal velocity reduction while grounded.
    pub ground_friction: i32,
    /// Per-tick horizontal velocity reduction while airborne.
    pub air_friction: i32,
    /// Starting health.
    pub base_health: i16,
    /// Downward speed a fast-fall input should apply; reserved for action
    /// authoring, not read by anything in this crate yet.
    pub fast_fall_speed: i32,
    /// Base value in `combat::apply_hit`'s `weightFactor` computation:
    /// `SCALE * weight_factor_base / (weight_factor_base + weight)`.
    pub weight_factor_base: i32,
    /// Fixed-point multiplier (`SCALE` = neutral) applied to `event.hitstun`
    /// in `combat::apply_hit`, keyed by the attacker's config.
    pub hitstun_multiplier: i32,
}

/// Number of baked-in archetypes.
pub const ARCHETYPE_COUNT: usize = 10;

const fn archetype(id: i32, weight: i32, walk: i32, jump: i32, gravity: i32) -> CharacterConfig {
    CharacterConfig {
        archetype_id: id,
        hitbox_width: 800,
        hitbox_height: 1800,
        hitbox_offset_y: 900,
        weight,
        walk_speed: walk,
        run_speed: walk * 2,
        air_speed: walk * 3 / 4,
        jump_force: jump,
        gravity,
        max_fall_speed: 18 * SCALE,
        ground_friction: SCALE / 2,
        air_friction: SCALE / 10,
        base_health: 1000,
        fast_fall_speed: 24 * SCALE,
        weight_factor_base: 100,
        hitstun_multiplier: SCALE,
    }
}

/// The ten baked-in archetypes, indexed by `archetype_id`.
static ARCHETYPES: [CharacterConfig; ARCHETYPE_COUNT] = [
    archetype(0, 100, 4 * SCALE, 14 * SCALE, 700),
    archetype(1, 80, 5 * SCALE, 15 * SCALE, 650),
    archetype(2, 130, 3 * SCALE, 13 * SCALE, 800),
    archetype(3, 60, 6 * SCALE, 16 * SCALE, 600),
    archetype(4, 110, 4 * SCALE, 14 * SCALE, 720),
    archetype(5, 90, 5 * SCALE, 15 * SCALE, 660),
    archetype(6, 140, 3 * SCALE, 12 * SCALE, 820),
    archetype(7, 70, 6 * SCALE, 16 * SCALE, 610),
    archetype(8, 100, 4 * SCALE, 14 * SCALE, 700),
    archetype(9, 120, 4 * SCALE, 13 * SCALE, 750),
];

/// Returns the baked-in tuning table for `id`.
///
/// # Errors
/// Returns [`CoreError::UnknownArchetype`] when `id` is outside `[0, 9]`.
pub fn get_default(id: i32) -> Result<CharacterConfig, CoreError> {
    usize::try_from(id)
        .ok()
        .and_then(|idx| ARCHETYPES.get(idx))
        .copied()
        .ok_or(CoreError::UnknownArchetype(id))
}

#[cfg(test)]
#[allow(clippy::cast_possible_wrap)]
mod tests {
    use super::*;

    #[test]
    fn all_ten_archetypes_resolve() {
        for id in 0..ARCHETYPE_COUNT as i32 {
            assert!(get_default(id).is_ok());
        }
    }

    #[test]
    fn out_of_range_archetype_errors() {
        assert_eq!(get_default(-1), Err(CoreError::UnknownArchetype(-1)));
        assert_eq!(get_default(10), Err(CoreError::UnknownArchetype(10)));
    }

    #[test]
    fn archetypes_are_independent_copies() {
        let mut a = get_default(0).unwrap();
        let b = get_default(0).unwrap();
        a.weight = 9999;
        assert_ne!(a.weight, b.weight);
    }
}
