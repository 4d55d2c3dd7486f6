//! Host-side collaborators of a session.
//!
//! The session talks to the game through these traits instead of reaching for
//! global singletons, so it can run without a live game host.

/// Text display showing the remaining turns.
pub trait TurnDisplay {
    /// Replaces the shown label, e.g. `Turns Left: 4`.
    fn show_turns_left(&mut self, label: &str);
}

/// The game-session host.
pub trait SessionHost {
    /// Ends the session as a loss.
    fn lose(&mut self, reason: &str);
}
