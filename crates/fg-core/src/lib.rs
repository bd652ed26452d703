// SPDX-License-Identifier: Apache-2.0
//! Deterministic fighting-game simulation core with rollback prediction.
//!
//! `fg-core` is a pure, allocation-free-at-steady-state simulation of a
//! 2-player fighting game: fixed-point physics, an action/hitbox combat
//! system, and a 120-tick rollback window for client-side prediction. The
//! sole deterministic entry point is [`tick::step`]; everything else in this
//! crate either builds the inputs it needs or consumes its outputs.
//!
//! No sockets, no rendering, no wall-clock reads, no floating point
//! anywhere on the simulated path.

#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms, unused_must_use)]
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
#![allow(
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::unreadable_literal,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions,
    clippy::use_self,
    clippy::multiple_crate_versions
)]

pub mod action;
pub mod character;
pub mod combat;
pub mod constants;
pub mod error;
pub mod fixed;
pub mod geom;
pub mod hash;
pub mod input;
pub mod map;
pub mod physics;
pub mod projectile;
pub mod rollback;
pub mod state;
pub mod tick;

pub use action::{default_moveset, ActionDef, ActionLibrary, HitboxEvent, ProjectileSpawn};
pub use character::CharacterConfig;
pub use error::CoreError;
pub use geom::Aabb;
pub use hash::state_hash;
pub use input::InputFrame;
pub use map::MapData;
pub use rollback::RollbackController;
pub use state::{Facing, GameState, PlayerMachineState, PlayerState, ProjectileState};
pub use tick::{step, ValidationMode};
