// SPDX-License-Identifier: Apache-2.0
//! Timeline-driven action definitions and the library that looks them up.
//!
//! Actions are plain values keyed by a stable 32-bit FNV-1a hash of their
//! canonical name; dispatch is by scanning event arrays, never by trait
//! objects or `dyn` dispatch (Design Note: "Polymorphism over actions").
//! This keeps a tick allocation-free and trivially reproducible byte for
//! byte across hosts.

use crate::input::{self, BIT_ATTACK, BIT_DEFEND, BIT_SPECIAL};

/// FNV-1a offset basis, fixed per the wire contract.
const FNV_OFFSET: u32 = 2_166_136_261;
/// FNV-1a prime, fixed per the wire contract.
const FNV_PRIME: u32 = 16_777_619;

/// Hashes a canonical action name to its stable 32-bit wire id.
#[must_use]
pub fn hash_action_name(name: &str) -> u32 {
    let mut hash = FNV_OFFSET;
    for byte in name.as_bytes() {
        hash ^= u32::from(*byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// One frame of an action's root-motion timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionFrame {
    /// Velocity X override for this frame; `0` leaves the field untouched
    /// per the physics system's root-motion contract.
    pub vel_x: i32,
    /// Velocity Y override for this frame; `0` leaves the field untouched.
    pub vel_y: i32,
    /// Whether a new action may be started while this frame is current.
    pub cancelable: bool,
    /// Hitstun value applied if this frame is the one active when a hit
    /// lands on the *opponent* (authored per-frame so different parts of
    /// a move can carry different combo potential).
    pub hitstun: i16,
}

/// A hitbox active during `[start_frame, end_frame)` of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitboxEvent {
    /// First action frame (inclusive) this hitbox is active.
    pub start_frame: i16,
    /// Last action frame (exclusive) this hitbox is active.
    pub end_frame: i16,
    /// Horizontal offset from the attacker's position, mirrored by facing.
    pub offset_x: i32,
    /// Vertical offset from the attacker's position.
    pub offset_y: i32,
    /// Full width of the hitbox.
    pub width: i32,
    /// Full height of the hitbox.
    pub height: i32,
    /// Damage dealt on hit.
    pub damage: i16,
    /// Base knockback magnitude.
    pub base_knockback: i32,
    /// Additional knockback per point of damage.
    pub knockback_growth: i32,
    /// Hitstun applied to the defender on hit.
    pub hitstun: i16,
    /// A disjoint hitbox never trades with other attacks (no matching
    /// hurtbox of its own); reserved for future armor/clash mechanics,
    /// the resolver does not yet special-case it beyond carrying the flag.
    pub disjoint: bool,
}

/// A projectile spawned at a specific action frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectileSpawn {
    /// The action frame at which this spawn fires.
    pub frame: i16,
    /// Horizontal offset from the attacker, mirrored by facing.
    pub offset_x: i32,
    /// Vertical offset from the attacker.
    pub offset_y: i32,
    /// Initial X velocity, mirrored by facing.
    pub vel_x: i32,
    /// Initial Y velocity.
    pub vel_y: i32,
    /// Caller-defined projectile type tag (opaque to the core).
    pub proj_type: u8,
    /// Initial lifetime in ticks.
    pub lifetime: i16,
}

/// An action's full timeline: per-frame root motion, hitboxes, and
/// projectile spawns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionDef {
    /// Stable 32-bit id (`hash_action_name` of the canonical name).
    pub id: u32,
    /// Total number of frames before the action returns to idle.
    pub total_frames: i16,
    /// Per-frame root-motion/cancel/hitstun data, length `total_frames`.
    pub frames: Vec<ActionFrame>,
    /// Hitboxes fired during this action, in authoring order. The combat
    /// resolver further orders by `(attacker_index, event_index)`, where
    /// `event_index` is this slice's index.
    pub hitboxes: Vec<HitboxEvent>,
    /// Projectiles fired during this action.
    pub projectile_spawns: Vec<ProjectileSpawn>,
    /// When set, gravity never applies while this action is running.
    pub ignore_gravity: bool,
}

impl ActionDef {
    /// The frame data for `frame_index`, if in range.
    #[must_use]
    pub fn frame_at(&self, frame_index: i16) -> Option<&ActionFrame> {
        usize::try_from(frame_index)
            .ok()
            .and_then(|idx| self.frames.get(idx))
    }
}

/// A read-only catalogue of actions, keyed by id, plus the default
/// per-archetype command bindings consulted by [`ActionLibrary::select`].
#[derive(Debug, Clone)]
pub struct ActionLibrary {
    actions: Vec<ActionDef>,
    /// `bindings[archetype][slot]` where `slot` is 0=attack, 1=special,
    /// 2=defend; `None` means "no move bound to that input for this
    /// archetype".
    bindings: Vec<[Option<u32>; 3]>,
}

impl ActionLibrary {
    /// Looks up an action by its stable id.
    #[must_use]
    pub fn lookup(&self, action_id: u32) -> Option<&ActionDef> {
        self.actions.iter().find(|a| a.id == action_id)
    }

    /// Selects the default action for `archetype` given the held
    /// `input_bits`, using input priority `ATTACK > SPECIAL > DEFEND`.
    ///
    /// When `archetype` has no binding for the selected slot, falls back to
    /// archetype 0's binding for that slot and resolves to the exact same
    /// [`ActionDef`] a real archetype-0 caller would get; there is no
    /// separate id space for a borrowed move. The fallback is still never
    /// silent: it is logged via `tracing::debug!` with the requesting
    /// archetype and slot, so operators can see "archetype 3 has no attack,
    /// borrowed archetype 0's" in the log even though the two paths are
    /// wire-indistinguishable.
    #[must_use]
    pub fn select(&self, archetype: i32, input_bits: u16) -> Option<&ActionDef> {
        let slot = if input::is_set(input_bits, BIT_ATTACK) {
            0
        } else if input::is_set(input_bits, BIT_SPECIAL) {
            1
        } else if input::is_set(input_bits, BIT_DEFEND) {
            2
        } else {
            return None;
        };

        let idx = usize::try_from(archetype).ok();
        let own = idx.and_then(|i| self.bindings.get(i));

        if let Some(bindings) = own {
            if let Some(id) = bindings[slot] {
                return self.lookup(id);
            }
        }

        if idx != Some(0) {
            tracing::debug!(
                archetype,
                slot,
                "action library falling back to archetype 0 bindings"
            );
        }
        let fallback = self.bindings.first()?;
        fallback[slot].and_then(|id| self.lookup(id))
    }

    /// Builds a new library from explicit actions and bindings.
    #[must_use]
    pub fn new(actions: Vec<ActionDef>, bindings: Vec<[Option<u32>; 3]>) -> Self {
        Self { actions, bindings }
    }
}

/// Builds a default moveset: one light attack and one projectile special
/// bound to every archetype's ATTACK and SPECIAL slots, DEFEND left
/// unbound. Used by `fg-harness`, `fg-cli`, and `fg-benches` so a generated
/// input stream actually exercises hitbox combat and projectile spawning
/// rather than movement alone.
#[must_use]
pub fn default_moveset() -> ActionLibrary {
    let mut actions = Vec::with_capacity(crate::character::ARCHETYPE_COUNT * 2);
    let mut bindings = Vec::with_capacity(crate::character::ARCHETYPE_COUNT);

    for archetype in 0..crate::character::ARCHETYPE_COUNT {
        let light = ActionDef {
            id: hash_action_name(&format!("archetype{archetype}/light_attack")),
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
        let special = ActionDef {
            id: hash_action_name(&format!("archetype{archetype}/projectile_special")),
            total_frames: 30,
            frames: vec![],
            hitboxes: vec![],
            projectile_spawns: vec![ProjectileSpawn {
                frame: 5,
                offset_x: 400,
                offset_y: 0,
                vel_x: 2500,
                vel_y: 0,
                proj_type: 0,
                lifetime: 90,
            }],
            ignore_gravity: true,
        };
        bindings.push([Some(light.id), Some(special.id), None]);
        actions.push(light);
        actions.push(special);
    }

    ActionLibrary::new(actions, bindings)
}
