// SPDX-License-Identifier: Apache-2.0
//! Crate-wide capacity constants.

/// Number of players in a match. Fixed at 2 by the wire format and the
/// hash layout; changing this is a breaking change to both.
pub const MAX_PLAYERS: usize = 2;

/// Maximum number of simultaneously active projectiles.
pub const MAX_PROJECTILES: usize = 64;

/// Rollback horizon in ticks (two seconds at 60 Hz).
pub const MAX_ROLLBACK_FRAMES: usize = 120;

/// Logical tick rate, for documentation/telemetry purposes only. Never
/// read by `step`, which has no notion of wall-clock time.
pub const TICK_RATE_HZ: u32 = 60;
