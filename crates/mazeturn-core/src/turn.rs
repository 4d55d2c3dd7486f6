//! Turn-state machine.
//!
//! [`TurnClock`] tracks the active turn type, counts turns per category and
//! applies the side effects of each transition. Every category's behaviour is
//! described by one row of a rule table, so advancing and counting read the same
//! table.
//!
//! | Turn     | Counter | Becomes current | AOE fear |
//! |----------|---------|-----------------|----------|
//! | `Player` | player  | yes             | cleared  |
//! | `Ai`     | ai      | yes             | raised   |
//! | `Event`  | event   | no              | kept     |
//! | `Unset`  | none    | no              | kept     |
//!
//! Every advance bumps the total, `Unset` included, so a stray `Unset` turn
//! still moves the round limit closer.
//!
//! # Example
//!
//! ```
//! use mazeturn_core::turn::{TurnClock, TurnType};
//!
//! let mut clock = TurnClock::new(10);
//! clock.advance(TurnType::Ai);
//! clock.advance(TurnType::Event);
//!
//! assert!(clock.is_ai_turn());
//! assert_eq!(clock.turn_count(TurnType::Ai), 1);
//! assert_eq!(clock.total_turns(), 2);
//! assert_eq!(clock.turns_left(), 4);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::fear::FearFlag;

/// Category of a turn.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TurnType {
    /// The player acted.
    Player,
    /// The AI acted.
    Ai,
    /// A scripted or narrative step. Never affects combat state.
    Event,
    /// No specific type requested. Never a live turn state.
    #[default]
    Unset,
}

impl TurnType {
    /// The three categories that can actually be taken.
    pub const LIVE: [Self; 3] = [Self::Player, Self::Ai, Self::Event];

    /// Returns false for the `Unset` sentinel.
    #[must_use]
    pub const fn is_live(self) -> bool {
        !matches!(self, Self::Unset)
    }

    const fn rule(self) -> TurnRule {
        match self {
            Self::Player => TurnRule {
                counter: Some(Counter::Player),
                takes_control: true,
                fear: FearEffect::Clear,
            },
            Self::Ai => TurnRule {
                counter: Some(Counter::Ai),
                takes_control: true,
                fear: FearEffect::Raise,
            },
            Self::Event => TurnRule {
                counter: Some(Counter::Event),
                takes_control: false,
                fear: FearEffect::Keep,
            },
            Self::Unset => TurnRule {
                counter: None,
                takes_control: false,
                fear: FearEffect::Keep,
            },
        }
    }
}

impl fmt::Display for TurnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player => write!(f, "Player"),
            Self::Ai => write!(f, "AI"),
            Self::Event => write!(f, "Event"),
            Self::Unset => write!(f, "Unset"),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Counter {
    Player,
    Ai,
    Event,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum FearEffect {
    Raise,
    Clear,
    Keep,
}

/// What taking a turn of some type does to the clock.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct TurnRule {
    counter: Option<Counter>,
    takes_control: bool,
    fear: FearEffect,
}

/// Per-category turn counts. The total is their sum plus any `Unset`
/// advances, which have no category of their own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnCounters {
    player: u64,
    ai: u64,
    event: u64,
    #[serde(default)]
    uncategorized: u64,
}

impl TurnCounters {
    /// Player turns taken.
    #[must_use]
    pub const fn player(&self) -> u64 {
        self.player
    }

    /// AI turns taken.
    #[must_use]
    pub const fn ai(&self) -> u64 {
        self.ai
    }

    /// Event turns taken.
    #[must_use]
    pub const fn event(&self) -> u64 {
        self.event
    }

    /// All turns taken.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.player + self.ai + self.event + self.uncategorized
    }

    const fn get(&self, counter: Counter) -> u64 {
        match counter {
            Counter::Player => self.player,
            Counter::Ai => self.ai,
            Counter::Event => self.event,
        }
    }

    fn bump(&mut self, counter: Option<Counter>) {
        let slot = match counter {
            Some(Counter::Player) => &mut self.player,
            Some(Counter::Ai) => &mut self.ai,
            Some(Counter::Event) => &mut self.event,
            None => &mut self.uncategorized,
        };
        *slot += 1;
    }
}

/// The turn clock of one game session.
#[derive(Debug)]
pub struct TurnClock {
    current: TurnType,
    counters: TurnCounters,
    rounds_until_defeat: u32,
    fear: FearFlag,
}

impl TurnClock {
    /// Creates a clock at session start: player to move, all counters zero,
    /// fear lowered.
    #[must_use]
    pub fn new(rounds_until_defeat: u32) -> Self {
        Self {
            current: TurnType::Player,
            counters: TurnCounters::default(),
            rounds_until_defeat,
            fear: FearFlag::new(),
        }
    }

    /// Type of the active turn.
    #[must_use]
    pub const fn current_turn(&self) -> TurnType {
        self.current
    }

    /// Returns true if the active turn is an AI turn.
    #[must_use]
    pub fn is_ai_turn(&self) -> bool {
        self.current == TurnType::Ai
    }

    /// Returns true if the active turn is a player turn.
    #[must_use]
    pub fn is_player_turn(&self) -> bool {
        self.current == TurnType::Player
    }

    /// Returns the count for `kind`; `Unset` yields the total.
    #[must_use]
    pub const fn turn_count(&self, kind: TurnType) -> u64 {
        match kind.rule().counter {
            Some(counter) => self.counters.get(counter),
            None => self.counters.total(),
        }
    }

    /// All turns taken so far.
    #[must_use]
    pub const fn total_turns(&self) -> u64 {
        self.counters.total()
    }

    /// Snapshot of the counters.
    #[must_use]
    pub const fn counters(&self) -> TurnCounters {
        self.counters
    }

    /// Configured defeat limit.
    #[must_use]
    pub const fn rounds_until_defeat(&self) -> u32 {
        self.rounds_until_defeat
    }

    /// Reader handle for the AOE-fear flag.
    #[must_use]
    pub fn fear_flag(&self) -> FearFlag {
        self.fear.clone()
    }

    /// Turns left before defeat: `rounds_until_defeat / 2 - ai_turns`.
    ///
    /// Goes negative once AI turns exceed half the limit.
    #[must_use]
    pub fn turns_left(&self) -> i64 {
        i64::from(self.rounds_until_defeat / 2) - i64::try_from(self.counters.ai).unwrap_or(i64::MAX)
    }

    /// The label shown to the player, e.g. `Turns Left: 5`.
    #[must_use]
    pub fn turns_left_label(&self) -> String {
        format!("Turns Left: {}", self.turns_left())
    }

    /// True when the total turn count has hit the limit on a player turn.
    #[must_use]
    pub fn round_limit_reached(&self) -> bool {
        self.total_turns() == u64::from(self.rounds_until_defeat) && self.is_player_turn()
    }

    /// Records one turn of `kind` and applies its side effects.
    ///
    /// Returns false for `Unset`, which only bumps the total.
    pub fn advance(&mut self, kind: TurnType) -> bool {
        let rule = kind.rule();
        self.counters.bump(rule.counter);
        if rule.counter.is_none() {
            tracing::warn!(
                turn = %kind,
                total = self.counters.total(),
                "advance with no turn type only counts toward the total"
            );
            return false;
        }

        match rule.fear {
            FearEffect::Raise => self.fear.raise(),
            FearEffect::Clear => self.fear.clear(),
            FearEffect::Keep => {}
        }
        if rule.takes_control {
            self.current = kind;
        }

        tracing::debug!(
            turn = %kind,
            total = self.counters.total(),
            player = self.counters.player,
            ai = self.counters.ai,
            event = self.counters.event,
            "turn advanced"
        );
        true
    }
}

impl Default for TurnClock {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_ROUNDS_UNTIL_DEFEAT)
    }
}
