// SPDX-License-Identifier: Apache-2.0
//! FNV-1a content hash over every deterministic field of `GameState`.
//!
//! The field order below is the wire contract: `frame_index`, then per
//! player `{pos_x, pos_y, vel_x, vel_y, facing, grounded, health,
//! current_action_id, action_frame_index, hitstun_remaining}`, then per
//! projectile slot (including inactive ones) `{uid, active, pos_x, pos_y,
//! vel_x, vel_y, lifetime_remaining}`, then `next_projectile_uid` and
//! `active_projectile_count`. Reordering this is a wire-breaking change.
#![allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]

use crate::state::{Facing, GameState};

const FNV_OFFSET: u32 = 2_166_136_261;
const FNV_PRIME: u32 = 16_777_619;

struct Fnv1a(u32);

impl Fnv1a {
    const fn new() -> Self {
        Self(FNV_OFFSET)
    }

    fn word(&mut self, word: u32) {
        for byte in word.to_le_bytes() {
            self.0 ^= u32::from(byte);
            self.0 = self.0.wrapping_mul(FNV_PRIME);
        }
    }

    fn signed(&mut self, value: i32) {
        self.word(value as u32);
    }

    fn finish(self) -> u32 {
        self.0
    }
}

/// Computes the 32-bit FNV-1a state hash, the wire format for desync
/// comparison between hosts.
#[must_use]
pub fn state_hash(state: &GameState) -> u32 {
    let mut h = Fnv1a::new();
    h.signed(state.frame_index);

    for player in &state.players {
        h.signed(player.pos_x);
        h.signed(player.pos_y);
        h.signed(player.vel_x);
        h.signed(player.vel_y);
        h.word(match player.facing {
            Facing::Left => 0,
            Facing::Right => 1,
        });
        h.word(u32::from(player.grounded));
        h.word(u32::from(player.health as u16));
        h.word(player.current_action_id);
        h.word(u32::from(player.action_frame_index as u16));
        h.word(u32::from(player.hitstun_remaining as u16));
    }

    for projectile in &state.projectiles {
        h.word(projectile.uid);
        h.word(u32::from(projectile.active));
        h.signed(projectile.pos_x);
        h.signed(projectile.pos_y);
        h.signed(projectile.vel_x);
        h.signed(projectile.vel_y);
        h.word(u32::from(projectile.lifetime_remaining as u16));
    }

    h.word(state.next_projectile_uid);
    h.word(state.active_projectile_count);

    h.finish()
}
