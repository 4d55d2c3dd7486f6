//! Session context driving the turn clock.
//!
//! A [`TurnSession`] is created at session start and dropped at session end.
//! It owns the [`TurnClock`], the [`TimedEntityRegistry`] and the host
//! collaborators, and runs one turn advance end to end:
//!
//! 1. **COUNT**: advance the clock (counters, current turn, AOE fear)
//! 2. **DISPLAY**: push the `Turns Left: N` label
//! 3. **REAP**: reap barriers, then AOEs, at the current player-turn count
//!
//! The reap runs after every advance, whatever the turn type. Since entries
//! are due by player-turn count, only player turns bring new entries due.
//!
//! Checking the defeat limit is a separate call, made by whoever dispatches
//! turns, after [`TurnSession::add_turn`].
//!
//! # Example
//!
//! ```
//! use mazeturn_core::{
//!     CellCoord, EntityId, EntityLifecycle, MazeWalls, SessionHost, TurnConfig, TurnDisplay,
//!     TurnSession, TurnType, WallDirection,
//! };
//!
//! struct Label;
//! impl TurnDisplay for Label {
//!     fn show_turns_left(&mut self, label: &str) { println!("{label}"); }
//! }
//!
//! struct Host;
//! impl SessionHost for Host {
//!     fn lose(&mut self, reason: &str) { println!("lost: {reason}"); }
//! }
//!
//! struct Scene;
//! impl EntityLifecycle for Scene {
//!     fn deactivate(&mut self, _id: EntityId) {}
//!     fn destroy(&mut self, _id: EntityId) {}
//! }
//! impl MazeWalls for Scene {
//!     fn set_wall_internal_state(&mut self, _: CellCoord, _: WallDirection, _: bool) {}
//! }
//!
//! let mut session = TurnSession::new(
//!     TurnConfig::with_rounds(2),
//!     Box::new(Label),
//!     Box::new(Host),
//!     Box::new(Scene),
//! )
//! .unwrap();
//!
//! session.add_turn(TurnType::Ai);
//! assert!(session.check_round_limit().is_none());
//!
//! session.add_turn(TurnType::Player);
//! assert!(session.check_round_limit().is_some());
//! ```

use std::fmt;

use crate::config::TurnConfig;
use crate::entity::EntityId;
use crate::error::ConfigError;
use crate::expiry::{BarrierWall, ExpiryCategory, ExpiryHandle, ExpiryWorld, ScheduledExpiry, TimedEntityRegistry};
use crate::fear::FearFlag;
use crate::hooks::{SessionHost, TurnDisplay};
use crate::turn::{TurnClock, TurnType};

/// Reason passed to [`SessionHost::lose`] when the turn limit is reached.
pub const DEFEAT_REASON: &str = "Summon opening missed";

/// Outcome of a failed round-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Defeat {
    /// Reason reported to the host.
    pub reason: &'static str,
    /// Total turns taken when the limit was hit.
    pub total_turns: u64,
}

/// What one [`TurnSession::add_turn`] call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnAdvance {
    /// Turn type requested.
    pub turn: TurnType,
    /// False when the request carried no live turn type. Such a request
    /// still counts toward the total.
    pub counted: bool,
    /// Remaining turns shown to the player after the advance.
    pub turns_left: i64,
    /// Barriers taken down, in scheduling order.
    pub reaped_barriers: Vec<ExpiryHandle>,
    /// AOE zones destroyed, in scheduling order.
    pub reaped_area_effects: Vec<ExpiryHandle>,
}

/// Turn clock, timed entities and host collaborators of one game session.
pub struct TurnSession {
    clock: TurnClock,
    expiries: TimedEntityRegistry,
    display: Box<dyn TurnDisplay>,
    host: Box<dyn SessionHost>,
    world: Box<dyn ExpiryWorld>,
}

impl fmt::Debug for TurnSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TurnSession")
            .field("clock", &self.clock)
            .field("expiries", &self.expiries)
            .finish_non_exhaustive()
    }
}

impl TurnSession {
    /// Starts a session: validates `config`, sets the player to move and shows
    /// the initial turns-left label.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRoundLimit`] for a zero defeat limit.
    pub fn new(
        config: TurnConfig,
        display: Box<dyn TurnDisplay>,
        host: Box<dyn SessionHost>,
        world: Box<dyn ExpiryWorld>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut session = Self {
            clock: TurnClock::new(config.rounds_until_defeat),
            expiries: TimedEntityRegistry::new(),
            display,
            host,
            world,
        };
        session.refresh_display();
        tracing::info!(
            rounds_until_defeat = config.rounds_until_defeat,
            "turn session started"
        );
        Ok(session)
    }

    /// Records a turn, updates the display and reaps due entities.
    pub fn add_turn(&mut self, turn: TurnType) -> TurnAdvance {
        let counted = self.clock.advance(turn);
        self.refresh_display();

        let player_turn = self.clock.turn_count(TurnType::Player);
        let reaped_barriers =
            self.expiries
                .reap(ExpiryCategory::Barrier, player_turn, self.world.as_mut());
        let reaped_area_effects =
            self.expiries
                .reap(ExpiryCategory::AreaOfEffect, player_turn, self.world.as_mut());

        TurnAdvance {
            turn,
            counted,
            turns_left: self.clock.turns_left(),
            reaped_barriers,
            reaped_area_effects,
        }
    }

    /// Ends the session through the host if the defeat limit is reached.
    ///
    /// Call after [`TurnSession::add_turn`].
    pub fn check_round_limit(&mut self) -> Option<Defeat> {
        if !self.clock.round_limit_reached() {
            return None;
        }

        let defeat = Defeat {
            reason: DEFEAT_REASON,
            total_turns: self.clock.total_turns(),
        };
        tracing::info!(total_turns = defeat.total_turns, reason = defeat.reason, "round limit reached");
        self.host.lose(defeat.reason);
        Some(defeat)
    }

    /// Schedules a barrier to come down `lifetime` player turns from now.
    pub fn schedule_barrier(&mut self, lifetime: u64, target: EntityId, wall: BarrierWall) -> ExpiryHandle {
        let now = self.clock.turn_count(TurnType::Player);
        self.expiries.schedule_barrier(lifetime, target, wall, now)
    }

    /// Schedules an AOE zone to be destroyed `lifetime` player turns from now.
    pub fn schedule_area_effect(&mut self, lifetime: u64, target: EntityId) -> ExpiryHandle {
        let now = self.clock.turn_count(TurnType::Player);
        self.expiries.schedule_area_effect(lifetime, target, now)
    }

    /// Drops a pending expiry without firing it.
    pub fn cancel_expiry(&mut self, handle: ExpiryHandle) -> Option<ScheduledExpiry> {
        self.expiries.cancel(handle)
    }

    /// Returns true if the active turn is an AI turn.
    #[must_use]
    pub fn is_ai_turn(&self) -> bool {
        self.clock.is_ai_turn()
    }

    /// Returns true if the active turn is a player turn.
    #[must_use]
    pub fn is_player_turn(&self) -> bool {
        self.clock.is_player_turn()
    }

    /// Count of turns of `kind`; `Unset` yields the total.
    #[must_use]
    pub fn turn_count(&self, kind: TurnType) -> u64 {
        self.clock.turn_count(kind)
    }

    /// All turns taken so far.
    #[must_use]
    pub fn total_turns(&self) -> u64 {
        self.clock.total_turns()
    }

    /// Remaining turns as shown to the player.
    #[must_use]
    pub fn turns_left(&self) -> i64 {
        self.clock.turns_left()
    }

    /// Reader handle for the AOE-fear flag, for AOE entities.
    #[must_use]
    pub fn fear_flag(&self) -> FearFlag {
        self.clock.fear_flag()
    }

    /// The turn clock.
    #[must_use]
    pub fn clock(&self) -> &TurnClock {
        &self.clock
    }

    /// The pending expiries.
    #[must_use]
    pub fn expiries(&self) -> &TimedEntityRegistry {
        &self.expiries
    }

    fn refresh_display(&mut self) {
        let label = self.clock.turns_left_label();
        self.display.show_turns_left(&label);
    }
}
