// SPDX-License-Identifier: Apache-2.0
//! Error kinds reachable from the simulation core and rollback controller.
//!
//! Every variant here corresponds to an error kind named by the engine's
//! design contract. None of them are ever raised as a panic from `step`;
//! lookup misses are locally recovered (fallback + log), while window and
//! desync errors propagate to the caller for a higher-level resync.

use thiserror::Error;

/// Errors produced by `fg-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A serialized `InputFrame` buffer was too short or malformed.
    #[error("invalid input frame buffer")]
    InvalidInput,
    /// A character archetype id fell outside `[0, 9]`.
    #[error("unknown archetype id: {0}")]
    UnknownArchetype(i32),
    /// An action id had no matching entry in the action library.
    #[error("unknown action id: {0}")]
    UnknownAction(u32),
    /// A frame lookup fell outside the rollback window.
    #[error("frame {requested} outside rollback window [{oldest}, {newest}]")]
    OutOfWindow {
        /// The frame that was requested.
        requested: i32,
        /// Oldest frame still held in the ring.
        oldest: i32,
        /// Newest frame held in the ring (`current_frame`).
        newest: i32,
    },
    /// A confirmation arrived for a frame that has already left the window.
    #[error("rollback window exceeded at frame {frame}; resync required")]
    RollbackWindowExceeded {
        /// The frame the confirmation targeted.
        frame: i32,
    },
    /// A validated frame's local hash disagreed with the expected hash.
    #[error("desync at frame {frame}: expected {expected:#010x}, got {actual:#010x}")]
    DesyncDetected {
        /// The frame at which validation ran.
        frame: i32,
        /// The hash the caller expected (e.g. from a remote host).
        expected: u32,
        /// The hash actually computed locally.
        actual: u32,
    },
    /// `fixed::div` was called with a zero divisor.
    #[error("division by zero")]
    DivideByZero,
}
