//! # Mazeturn Core
//!
//! Turn clock and timed entities for a turn-based maze game.
//!
//! This crate tracks whose turn is active, counts turns by category, fires the
//! category side effects of a turn transition, and expires time-boxed maze
//! objects (barrier walls, area-of-effect zones) after a configured number of
//! player turns.
//!
//! ## Architecture
//!
//! - **Clock**: [`TurnClock`] is the turn-state machine
//! - **Registry**: [`TimedEntityRegistry`] holds scheduled expiries
//! - **Session**: [`TurnSession`] owns both plus the injected collaborators
//! - **Gate**: [`Grate`] toggles passability from the player's material state
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mazeturn_core::{TurnConfig, TurnSession, TurnType};
//!
//! let mut session = TurnSession::new(TurnConfig::default(), display, host, world)?;
//! session.add_turn(TurnType::Player);
//! session.check_round_limit();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod entity;
pub mod error;
pub mod expiry;
pub mod fear;
pub mod grate;
pub mod hooks;
pub mod maze;
pub mod session;
pub mod turn;

pub use config::{GrateLayers, TurnConfig};
pub use entity::{ColliderId, EntityId};
pub use error::ConfigError;
pub use expiry::{
    BarrierWall, EntityLifecycle, ExpiryCategory, ExpiryHandle, ExpiryKind, ExpiryWorld,
    ScheduledExpiry, TimedEntityRegistry,
};
pub use fear::FearFlag;
pub use grate::{CollisionLayer, GateMode, GatePhysics, Grate, MaterialState, OverlapPhase, PlayerStateSource};
pub use hooks::{SessionHost, TurnDisplay};
pub use maze::{CellCoord, MazeWalls, WallDirection, WallGrid, WallGridShapeError};
pub use session::{Defeat, TurnAdvance, TurnSession, DEFEAT_REASON};
pub use turn::{TurnClock, TurnCounters, TurnType};

#[cfg(test)]
mod tests;
