//! AOE-fear side channel.
//!
//! AI turns raise the flag and player turns clear it; area-of-effect entities
//! read it to decide whether AI actors avoid their zones. The turn clock is the
//! only writer. Readers hold cheap clones of the same handle.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared AOE-fear flag.
///
/// # Example
///
/// ```
/// use mazeturn_core::fear::FearFlag;
///
/// let flag = FearFlag::default();
/// let reader = flag.clone();
/// assert!(!reader.is_raised());
/// ```
#[derive(Debug, Clone, Default)]
pub struct FearFlag {
    raised: Arc<AtomicBool>,
}

impl FearFlag {
    /// Creates a lowered flag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true while AOE fear is active.
    #[must_use]
    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::Acquire)
    }

    pub(crate) fn raise(&self) {
        self.raised.store(true, Ordering::Release);
    }

    pub(crate) fn clear(&self) {
        self.raised.store(false, Ordering::Release);
    }
}
