//! Timed entity registry.
//!
//! Skills spawn barrier walls and area-of-effect zones that live for a fixed
//! number of player turns. The registry remembers when each one is due and,
//! when reaped, asks the host to take it down:
//! - barrier: clear the wall in the maze's internal table, then deactivate the
//!   visual so it can be reused
//! - area of effect: destroy the entity
//!
//! # Reaping
//!
//! Entries are keyed by a monotonically assigned [`ExpiryHandle`] in a
//! `BTreeMap` per category, so a reap pass visits them in scheduling order.
//! A pass first collects the due handles and only then removes and fires
//! them; the table is never mutated while it is being scanned.
//!
//! An entry is due once the player-turn count has reached its expiry turn.
//! A pass that runs late still fires entries whose exact turn was skipped.
//!
//! # Example
//!
//! ```
//! use mazeturn_core::entity::EntityId;
//! use mazeturn_core::expiry::{EntityLifecycle, ExpiryCategory, TimedEntityRegistry};
//! use mazeturn_core::maze::{CellCoord, MazeWalls, WallDirection};
//!
//! #[derive(Default)]
//! struct World { destroyed: Vec<EntityId> }
//!
//! impl EntityLifecycle for World {
//!     fn deactivate(&mut self, _id: EntityId) {}
//!     fn destroy(&mut self, id: EntityId) { self.destroyed.push(id); }
//! }
//!
//! impl MazeWalls for World {
//!     fn set_wall_internal_state(&mut self, _: CellCoord, _: WallDirection, _: bool) {}
//! }
//!
//! let mut registry = TimedEntityRegistry::new();
//! let mut world = World::default();
//! let handle = registry.schedule_area_effect(2, EntityId::new(7), 0);
//!
//! assert!(registry.reap(ExpiryCategory::AreaOfEffect, 1, &mut world).is_empty());
//! assert_eq!(registry.reap(ExpiryCategory::AreaOfEffect, 2, &mut world), vec![handle]);
//! assert_eq!(world.destroyed, vec![EntityId::new(7)]);
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entity::EntityId;
use crate::maze::{CellCoord, MazeWalls, WallDirection};

/// Handle to a scheduled expiry.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ExpiryHandle(u64);

impl ExpiryHandle {
    /// Returns the raw handle value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ExpiryHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExpiryHandle({})", self.0)
    }
}

impl fmt::Display for ExpiryHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which reap action an entry takes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpiryCategory {
    /// Barrier walls: cleared in the maze table and deactivated.
    Barrier,
    /// Area-of-effect zones: destroyed.
    AreaOfEffect,
}

impl ExpiryCategory {
    /// Categories in reap order.
    pub const ALL: [Self; 2] = [Self::Barrier, Self::AreaOfEffect];
}

impl fmt::Display for ExpiryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Barrier => write!(f, "Barrier"),
            Self::AreaOfEffect => write!(f, "AreaOfEffect"),
        }
    }
}

/// The maze wall a barrier occupies.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BarrierWall {
    /// Cell the barrier belongs to.
    pub cell: CellCoord,
    /// Side of the cell the barrier covers.
    pub direction: WallDirection,
}

impl BarrierWall {
    /// Creates a wall reference.
    #[must_use]
    pub const fn new(cell: CellCoord, direction: WallDirection) -> Self {
        Self { cell, direction }
    }
}

/// Category-specific data of an entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpiryKind {
    /// A barrier wall and the maze entry it sets.
    Barrier(BarrierWall),
    /// An area-of-effect zone.
    AreaOfEffect,
}

impl ExpiryKind {
    /// Returns the category this kind is reaped under.
    #[must_use]
    pub const fn category(&self) -> ExpiryCategory {
        match self {
            Self::Barrier(_) => ExpiryCategory::Barrier,
            Self::AreaOfEffect => ExpiryCategory::AreaOfEffect,
        }
    }
}

/// One pending expiry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledExpiry {
    expire_at_player_turn: u64,
    target: EntityId,
    kind: ExpiryKind,
}

impl ScheduledExpiry {
    /// Player-turn count at which the entry fires.
    #[must_use]
    pub const fn expire_at_player_turn(&self) -> u64 {
        self.expire_at_player_turn
    }

    /// Entity taken down when the entry fires.
    #[must_use]
    pub const fn target(&self) -> EntityId {
        self.target
    }

    /// Category-specific data.
    #[must_use]
    pub const fn kind(&self) -> ExpiryKind {
        self.kind
    }

    /// Returns true once `player_turn` has reached the expiry turn.
    #[must_use]
    pub const fn is_due(&self, player_turn: u64) -> bool {
        player_turn >= self.expire_at_player_turn
    }

    fn fire<W: ExpiryWorld + ?Sized>(&self, world: &mut W) {
        match self.kind {
            ExpiryKind::Barrier(wall) => {
                world.set_wall_internal_state(wall.cell, wall.direction, false);
                world.deactivate(self.target);
            }
            ExpiryKind::AreaOfEffect => world.destroy(self.target),
        }
    }
}

/// Scene operations the registry performs on expired entities.
pub trait EntityLifecycle {
    /// Hides an entity but keeps it around for reuse.
    fn deactivate(&mut self, id: EntityId);

    /// Removes an entity from the scene.
    fn destroy(&mut self, id: EntityId);
}

/// Everything a reap pass may touch.
pub trait ExpiryWorld: EntityLifecycle + MazeWalls {}

impl<T: EntityLifecycle + MazeWalls + ?Sized> ExpiryWorld for T {}

/// Pending barrier and AOE expiries.
#[derive(Debug, Clone, Default)]
pub struct TimedEntityRegistry {
    next_handle: u64,
    barriers: BTreeMap<ExpiryHandle, ScheduledExpiry>,
    area_effects: BTreeMap<ExpiryHandle, ScheduledExpiry>,
}

impl TimedEntityRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules a barrier to come down `lifetime` player turns after
    /// `player_turn`.
    pub fn schedule_barrier(
        &mut self,
        lifetime: u64,
        target: EntityId,
        wall: BarrierWall,
        player_turn: u64,
    ) -> ExpiryHandle {
        self.schedule(lifetime, target, ExpiryKind::Barrier(wall), player_turn)
    }

    /// Schedules an AOE zone to be destroyed `lifetime` player turns after
    /// `player_turn`.
    pub fn schedule_area_effect(
        &mut self,
        lifetime: u64,
        target: EntityId,
        player_turn: u64,
    ) -> ExpiryHandle {
        self.schedule(lifetime, target, ExpiryKind::AreaOfEffect, player_turn)
    }

    fn schedule(
        &mut self,
        lifetime: u64,
        target: EntityId,
        kind: ExpiryKind,
        player_turn: u64,
    ) -> ExpiryHandle {
        let handle = ExpiryHandle(self.next_handle);
        self.next_handle += 1;

        let entry = ScheduledExpiry {
            expire_at_player_turn: player_turn.saturating_add(lifetime),
            target,
            kind,
        };
        tracing::debug!(
            %handle,
            %target,
            category = %kind.category(),
            expire_at = entry.expire_at_player_turn,
            "expiry scheduled"
        );
        self.table_mut(kind.category()).insert(handle, entry);
        handle
    }

    /// Removes a pending entry without firing it.
    pub fn cancel(&mut self, handle: ExpiryHandle) -> Option<ScheduledExpiry> {
        ExpiryCategory::ALL
            .into_iter()
            .find_map(|category| self.table_mut(category).remove(&handle))
    }

    /// Returns a pending entry.
    #[must_use]
    pub fn get(&self, handle: ExpiryHandle) -> Option<&ScheduledExpiry> {
        ExpiryCategory::ALL
            .into_iter()
            .find_map(|category| self.table(category).get(&handle))
    }

    /// Iterates the pending entries of a category in scheduling order.
    pub fn pending(
        &self,
        category: ExpiryCategory,
    ) -> impl Iterator<Item = (ExpiryHandle, &ScheduledExpiry)> + '_ {
        self.table(category).iter().map(|(handle, entry)| (*handle, entry))
    }

    /// Number of pending entries in a category.
    #[must_use]
    pub fn pending_count(&self, category: ExpiryCategory) -> usize {
        self.table(category).len()
    }

    /// Number of pending entries across both categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.barriers.len() + self.area_effects.len()
    }

    /// Returns true if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.barriers.is_empty() && self.area_effects.is_empty()
    }

    /// Fires and removes every entry of `category` due at `player_turn`.
    ///
    /// Returns the fired handles in scheduling order.
    pub fn reap<W: ExpiryWorld + ?Sized>(
        &mut self,
        category: ExpiryCategory,
        player_turn: u64,
        world: &mut W,
    ) -> Vec<ExpiryHandle> {
        let table = self.table_mut(category);
        let due: Vec<ExpiryHandle> = table
            .iter()
            .filter(|(_, entry)| entry.is_due(player_turn))
            .map(|(handle, _)| *handle)
            .collect();

        for handle in &due {
            if let Some(entry) = table.remove(handle) {
                entry.fire(world);
                tracing::debug!(
                    %handle,
                    target = %entry.target,
                    %category,
                    player_turn,
                    "expiry reaped"
                );
            }
        }
        due
    }

    fn table(&self, category: ExpiryCategory) -> &BTreeMap<ExpiryHandle, ScheduledExpiry> {
        match category {
            ExpiryCategory::Barrier => &self.barriers,
            ExpiryCategory::AreaOfEffect => &self.area_effects,
        }
    }

    fn table_mut(
        &mut self,
        category: ExpiryCategory,
    ) -> &mut BTreeMap<ExpiryHandle, ScheduledExpiry> {
        match category {
            ExpiryCategory::Barrier => &mut self.barriers,
            ExpiryCategory::AreaOfEffect => &mut self.area_effects,
        }
    }
}
