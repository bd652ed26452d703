// SPDX-License-Identifier: Apache-2.0
//! The 16-bit per-player input bitmask and its 8-byte wire frame.
//!
//! Bit layout is frozen and must never be renumbered: `UP=0, DOWN=1,
//! LEFT=2, RIGHT=3, JUMP=4, ATTACK=5, SPECIAL=6, DEFEND=7`. Bits 8..16 are
//! reserved and must always round-trip as `0`.

use crate::constants::MAX_PLAYERS;
use crate::error::CoreError;

/// Bit index for the "up" input.
pub const BIT_UP: u16 = 0;
/// Bit index for the "down" input.
pub const BIT_DOWN: u16 = 1;
/// Bit index for the "left" input.
pub const BIT_LEFT: u16 = 2;
/// Bit index for the "right" input.
pub const BIT_RIGHT: u16 = 3;
/// Bit index for the "jump" input.
pub const BIT_JUMP: u16 = 4;
/// Bit index for the "attack" input.
pub const BIT_ATTACK: u16 = 5;
/// Bit index for the "special" input.
pub const BIT_SPECIAL: u16 = 6;
/// Bit index for the "defend" input.
pub const BIT_DEFEND: u16 = 7;

/// Mask of bits that are currently defined; every other bit is reserved
/// and must be transmitted as `0`.
const DEFINED_BITS_MASK: u16 = (1 << BIT_UP)
    | (1 << BIT_DOWN)
    | (1 << BIT_LEFT)
    | (1 << BIT_RIGHT)
    | (1 << BIT_JUMP)
    | (1 << BIT_ATTACK)
    | (1 << BIT_SPECIAL)
    | (1 << BIT_DEFEND);

/// Returns whether `bit` is set in `bits`.
#[must_use]
pub fn is_set(bits: u16, bit: u16) -> bool {
    (bits & (1 << bit)) != 0
}

/// Net horizontal intent: `-1` if only LEFT is held, `1` if only RIGHT,
/// `0` if neither or both are held.
#[must_use]
pub fn horizontal_axis(bits: u16) -> i32 {
    let left = is_set(bits, BIT_LEFT);
    let right = is_set(bits, BIT_RIGHT);
    match (left, right) {
        (true, false) => -1,
        (false, true) => 1,
        _ => 0,
    }
}

/// One tick's input for every player, tagged by tick index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputFrame {
    /// The tick this input applies to.
    pub tick_index: i32,
    /// Per-player 16-bit input bitmasks, indexed like `GameState::players`.
    pub input_bits: [u16; MAX_PLAYERS],
}

impl InputFrame {
    /// Wire size in bytes: 4 for `tick_index`, 2 per player.
    pub const WIRE_LEN: usize = 4 + 2 * MAX_PLAYERS;

    /// Serializes to the big-endian, packed 8-byte wire format.
    #[must_use]
    pub fn serialize(&self) -> [u8; Self::WIRE_LEN] {
        let mut out = [0u8; Self::WIRE_LEN];
        out[0..4].copy_from_slice(&self.tick_index.to_be_bytes());
        for (i, bits) in self.input_bits.iter().enumerate() {
            let off = 4 + i * 2;
            out[off..off + 2].copy_from_slice(&bits.to_be_bytes());
        }
        out
    }

    /// Deserializes from a buffer.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidInput`] if `buf` is shorter than
    /// [`Self::WIRE_LEN`] bytes.
    pub fn deserialize(buf: &[u8]) -> Result<Self, CoreError> {
        if buf.len() < Self::WIRE_LEN {
            return Err(CoreError::InvalidInput);
        }
        let tick_index = i32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]);
        let mut input_bits = [0u16; MAX_PLAYERS];
        for (i, slot) in input_bits.iter_mut().enumerate() {
            let off = 4 + i * 2;
            *slot = u16::from_be_bytes([buf[off], buf[off + 1]]);
        }
        Ok(Self {
            tick_index,
            input_bits,
        })
    }

    /// Reserved bits must always be zero on both the wire and in memory;
    /// this masks any stray bits a caller might have set.
    #[must_use]
    pub fn canonicalized(mut self) -> Self {
        for bits in &mut self.input_bits {
            *bits &= DEFINED_BITS_MASK;
        }
        self
    }
}
