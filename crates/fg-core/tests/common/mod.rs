//! Shared fixtures for the `fg-core` integration test suite.

use fg_core::action::{ActionDef, HitboxEvent, ProjectileSpawn};
use fg_core::character::get_default;
use fg_core::constants::MAX_PLAYERS;
use fg_core::input::BIT_ATTACK;
use fg_core::{ActionLibrary, CharacterConfig, GameState, MapData};

/// Both players on archetype 0.
pub fn default_configs() -> [CharacterConfig; MAX_PLAYERS] {
    let cfg = get_default(0).unwrap();
    [cfg, cfg]
}

/// A library with no actions and no bindings; `select` always returns `None`.
pub fn empty_library() -> ActionLibrary {
    ActionLibrary::new(vec![], vec![[None, None, None], [None, None, None]])
}

/// A light attack action bound to P0's attack input: 20 frames, one hitbox
/// active on frames [4, 8), matching scenario S3's `startFrame=4`.
pub fn library_with_light_attack() -> ActionLibrary {
    let attack = ActionDef {
        id: fg_core::action::hash_action_name("p0/light_attack"),
        total_frames: 20,
        frames: vec![],
        hitboxes: vec![HitboxEvent {
            start_frame: 4,
            end_frame: 8,
            offset_x: 600,
            offset_y: 0,
            width: 500,
            height: 500,
            damage: 10,
            base_knockback: 1500,
            knockback_growth: 40,
            hitstun: 12,
            disjoint: false,
        }],
        projectile_spawns: vec![],
        ignore_gravity: false,
    };
    ActionLibrary::new(
        vec![attack.clone()],
        vec![[Some(attack.id), None, None], [None, None, None]],
    )
}

/// A special action bound to P0's special input that spawns one fast
/// projectile on frame 5, matching scenario S4's `velX = 3500`.
pub fn library_with_projectile_special() -> ActionLibrary {
    let special = ActionDef {
        id: fg_core::action::hash_action_name("p0/projectile_special"),
        total_frames: 30,
        frames: vec![],
        hitboxes: vec![],
        projectile_spawns: vec![ProjectileSpawn {
            frame: 5,
            offset_x: 400,
            offset_y: 0,
            vel_x: 3500,
            vel_y: 0,
            proj_type: 0,
            lifetime: 120,
        }],
        ignore_gravity: true,
    };
    ActionLibrary::new(
        vec![special.clone()],
        vec![[None, Some(special.id), None], [None, None, None]],
    )
}

/// The standard stage geometry used across every scenario.
pub fn standard_map() -> MapData {
    MapData::standard_stage()
}

/// A fresh two-player match spawned above the standard stage's floor.
pub fn fresh_match() -> GameState {
    GameState::new((0, 8 * fg_core::fixed::SCALE), (5 * fg_core::fixed::SCALE, 8 * fg_core::fixed::SCALE), 1000)
}

/// The attack bit set in an [`fg_core::InputFrame`]'s `input_bits`.
pub const ATTACK_BIT: u16 = 1 << BIT_ATTACK;
