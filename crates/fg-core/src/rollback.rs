// SPDX-License-Identifier: Apache-2.0
//! Ring-buffered rollback: predicted ticks, confirmation, and resimulation.
//!
//! This is the one module in `fg-core` allowed to use `tracing` — every
//! other module is pure and silent. `step` itself is never called with
//! side effects observable outside its `Result`.
#![allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]

use crate::action::ActionLibrary;
use crate::character::CharacterConfig;
use crate::constants::{MAX_PLAYERS, MAX_ROLLBACK_FRAMES};
use crate::error::CoreError;
use crate::hash;
use crate::input::InputFrame;
use crate::map::MapData;
use crate::state::GameState;
use crate::tick::{self, ValidationMode};

/// Owns the match's immutable setup plus the two 120-tick rings and drives
/// prediction/confirmation/resimulation over them.
pub struct RollbackController {
    state_ring: [GameState; MAX_ROLLBACK_FRAMES],
    input_ring: [InputFrame; MAX_ROLLBACK_FRAMES],
    current_frame: i32,
    map: MapData,
    configs: [CharacterConfig; MAX_PLAYERS],
    actions: ActionLibrary,
    mode: ValidationMode,
}

impl RollbackController {
    /// Starts a new match at `initial_state` (its `frame_index` is treated
    /// as frame 0 of the window).
    #[must_use]
    pub fn new(
        initial_state: GameState,
        map: MapData,
        configs: [CharacterConfig; MAX_PLAYERS],
        actions: ActionLibrary,
        mode: ValidationMode,
    ) -> Self {
        let current_frame = initial_state.frame_index;
        Self {
            state_ring: [initial_state; MAX_ROLLBACK_FRAMES],
            input_ring: [InputFrame::default(); MAX_ROLLBACK_FRAMES],
            current_frame,
            map,
            configs,
            actions,
            mode,
        }
    }

    fn slot_index(frame: i32) -> usize {
        frame.rem_euclid(MAX_ROLLBACK_FRAMES as i32) as usize
    }

    /// Oldest frame still reachable in both rings.
    #[must_use]
    pub fn oldest_frame(&self) -> i32 {
        self.current_frame - (MAX_ROLLBACK_FRAMES as i32 - 1)
    }

    /// Most recently predicted or confirmed tick.
    #[must_use]
    pub fn current_frame(&self) -> i32 {
        self.current_frame
    }

    fn in_window(&self, frame: i32) -> bool {
        frame <= self.current_frame && frame >= self.oldest_frame()
    }

    /// Read-only view of the snapshot at `frame`.
    ///
    /// # Errors
    /// Returns [`CoreError::OutOfWindow`] if `frame` is outside the
    /// currently reachable 120-tick horizon.
    pub fn get_state(&self, frame: i32) -> Result<&GameState, CoreError> {
        if !self.in_window(frame) {
            return Err(CoreError::OutOfWindow {
                requested: frame,
                oldest: self.oldest_frame(),
                newest: self.current_frame,
            });
        }
        Ok(&self.state_ring[Self::slot_index(frame)])
    }

    /// The validated or just-computed state hash at `frame`.
    ///
    /// # Errors
    /// Returns [`CoreError::OutOfWindow`] under the same condition as
    /// [`Self::get_state`].
    pub fn get_hash(&self, frame: i32) -> Result<u32, CoreError> {
        self.get_state(frame).map(hash::state_hash)
    }

    /// Directly overwrites the stored input for `frame`, bypassing the
    /// hold-last policy. Used to seed the window with already-confirmed
    /// input before any prediction has happened.
    ///
    /// # Errors
    /// Returns [`CoreError::OutOfWindow`] if `frame` is outside the window.
    pub fn save_inputs(&mut self, frame: i32, inputs: InputFrame) -> Result<(), CoreError> {
        if !self.in_window(frame) {
            return Err(CoreError::OutOfWindow {
                requested: frame,
                oldest: self.oldest_frame(),
                newest: self.current_frame,
            });
        }
        self.input_ring[Self::slot_index(frame)] = inputs;
        Ok(())
    }

    /// Predicts tick `frame` (must be `current_frame() + 1`): applies
    /// `local_player`'s actual input for this tick, holds every other
    /// player's last known input from `frame - 1`, runs `step`, and
    /// advances `current_frame`.
    ///
    /// # Errors
    /// Returns [`CoreError::OutOfWindow`] if `frame` is not immediately
    /// after the current frame, or propagates a [`CoreError::DesyncDetected`]
    /// from `step`'s validation phase.
    pub fn predict(
        &mut self,
        frame: i32,
        local_player: usize,
        local_bits: u16,
    ) -> Result<(), CoreError> {
        if frame != self.current_frame + 1 {
            return Err(CoreError::OutOfWindow {
                requested: frame,
                oldest: self.oldest_frame(),
                newest: self.current_frame,
            });
        }

        let prev_slot = Self::slot_index(frame - 1);
        let mut input_bits = self.input_ring[prev_slot].input_bits;
        input_bits[local_player] = local_bits;
        let frame_input = InputFrame {
            tick_index: frame,
            input_bits,
        };

        let mut next_state = self.state_ring[prev_slot];
        tick::step(
            &mut next_state,
            &frame_input,
            &self.map,
            &self.configs,
            &self.actions,
            self.mode,
            None,
        )?;

        let slot = Self::slot_index(frame);
        self.input_ring[slot] = frame_input;
        self.state_ring[slot] = next_state;
        self.current_frame = frame;
        Ok(())
    }

    /// Confirms `remote_player`'s true input for `frame`. If it matches what
    /// was predicted, this is a no-op. Otherwise every tick in
    /// `[frame, current_frame]` is resimulated from the snapshot at
    /// `frame - 1`, with `remote_player`'s bits corrected to `remote_bits`
    /// at every one of those ticks (hold-last re-propagated forward); local
    /// bits already recorded in the ring are left untouched.
    ///
    /// # Errors
    /// Returns [`CoreError::RollbackWindowExceeded`] if `frame` falls
    /// outside the resimulable range (the oldest frame in the window has no
    /// `frame - 1` snapshot to restore from), or propagates a
    /// [`CoreError::DesyncDetected`] raised by a resimulated `step`.
    pub fn confirm_remote_input(
        &mut self,
        frame: i32,
        remote_player: usize,
        remote_bits: u16,
    ) -> Result<(), CoreError> {
        if frame > self.current_frame || frame <= self.oldest_frame() {
            tracing::warn!(
                frame,
                current_frame = self.current_frame,
                oldest_frame = self.oldest_frame(),
                "rollback window exceeded on remote input confirmation"
            );
            return Err(CoreError::RollbackWindowExceeded { frame });
        }

        let slot = Self::slot_index(frame);
        if self.input_ring[slot].input_bits[remote_player] == remote_bits {
            return Ok(());
        }

        let resim_len = self.current_frame - frame + 1;
        tracing::warn!(
            frame,
            confirmed_frame = self.current_frame,
            resim_len,
            "resimulating after late remote input correction"
        );

        let mut working = self.state_ring[Self::slot_index(frame - 1)];
        for f in frame..=self.current_frame {
            let slot = Self::slot_index(f);
            self.input_ring[slot].tick_index = f;
            self.input_ring[slot].input_bits[remote_player] = remote_bits;

            let frame_input = self.input_ring[slot];
            tick::step(
                &mut working,
                &frame_input,
                &self.map,
                &self.configs,
                &self.actions,
                self.mode,
                None,
            )?;
            self.state_ring[slot] = working;
        }
        Ok(())
    }
}
