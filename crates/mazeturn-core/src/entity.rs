//! Identifiers for game objects owned by the host engine.
//!
//! The turn core never owns scene objects. It refers to them by opaque IDs and
//! asks the host to act on them:
//! - [`EntityId`]: a scene object (barrier visual, AOE zone, gate body)
//! - [`ColliderId`]: a physics collider (player body, gate boundary)
//!
//! # Example
//!
//! ```
//! use mazeturn_core::entity::EntityId;
//!
//! let id1 = EntityId::new(1);
//! let id2 = EntityId::new(2);
//!
//! assert!(id1 < id2);
//! assert_eq!(id1.as_u64(), 1);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for a scene object managed by the host engine.
///
/// Ordering follows the numeric value, which keeps registry iteration
/// deterministic when entries are keyed by target.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    /// Creates a new `EntityId` from a raw `u64` value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw `u64` value of this identifier.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

impl From<EntityId> for u64 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

/// Identifier for a physics collider managed by the host engine.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ColliderId(u64);

impl ColliderId {
    /// Creates a new `ColliderId` from a raw `u64` value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw `u64` value of this identifier.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ColliderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "collider#{}", self.0)
    }
}
