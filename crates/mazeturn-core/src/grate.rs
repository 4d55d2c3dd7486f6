//! Grate: a gate whose passability follows the player's material state.
//!
//! Liquid and gas players flow through the grate; a solid player stands on it.
//! The rule is re-evaluated on every overlap callback, including `Stay`, since
//! the player can change state while inside the trigger region.

use serde::{Deserialize, Serialize};

use crate::config::GrateLayers;
use crate::entity::{ColliderId, EntityId};

/// The player's current form.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialState {
    /// Solid form: blocked by the grate.
    Solid,
    /// Liquid form: passes through.
    Liquid,
    /// Gas form: passes through.
    Gas,
}

/// Overlap callback that triggered an update.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum OverlapPhase {
    /// The player entered the trigger region.
    Enter,
    /// The player is still inside the trigger region.
    Stay,
    /// The player left the trigger region.
    Exit,
}

/// Physics layer index of a body.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollisionLayer(u8);

impl CollisionLayer {
    /// Layer hit by the player controller's raycasts.
    pub const DEFAULT: Self = Self(0);
    /// Layer skipped by the player controller's raycasts.
    pub const IGNORE_RAYCAST: Self = Self(2);

    /// Creates a layer from its index.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    /// Returns the layer index.
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }
}

/// How the grate currently treats the player.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateMode {
    /// Collisions ignored, raycasts pass through.
    Passable,
    /// Collisions enabled, acts as floor or barrier.
    Solid,
}

impl GateMode {
    /// Mode the grate takes for a player in `state`.
    #[must_use]
    pub const fn for_state(state: MaterialState) -> Self {
        match state {
            MaterialState::Solid => Self::Solid,
            MaterialState::Liquid | MaterialState::Gas => Self::Passable,
        }
    }
}

/// Holder of the player's material state.
pub trait PlayerStateSource {
    /// Current material state, if known.
    fn material_state(&self) -> Option<MaterialState>;

    /// The player's collider, if it has one.
    fn collider(&self) -> Option<ColliderId>;
}

/// The two physics operations the grate needs from the engine.
pub trait GatePhysics {
    /// Enables or disables collision response between two colliders.
    fn set_collision_ignored(&mut self, a: ColliderId, b: ColliderId, ignored: bool);

    /// Moves a body to another collision layer.
    fn set_layer(&mut self, body: EntityId, layer: CollisionLayer);
}

/// A grate in the maze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grate {
    body: EntityId,
    collider: ColliderId,
    layers: GrateLayers,
    mode: Option<GateMode>,
}

impl Grate {
    /// Creates a grate for the given body and boundary collider.
    #[must_use]
    pub fn new(body: EntityId, collider: ColliderId, layers: GrateLayers) -> Self {
        Self {
            body,
            collider,
            layers,
            mode: None,
        }
    }

    /// The body whose layer is switched.
    #[must_use]
    pub const fn body(&self) -> EntityId {
        self.body
    }

    /// The grate's boundary collider.
    #[must_use]
    pub const fn collider(&self) -> ColliderId {
        self.collider
    }

    /// Mode applied by the last effective update, if any.
    #[must_use]
    pub const fn mode(&self) -> Option<GateMode> {
        self.mode
    }

    /// Handles an overlap callback between the trigger region and the player.
    ///
    /// Returns the applied mode, or `None` when the player state holder, its
    /// material state, or its collider is missing.
    pub fn on_overlap(
        &mut self,
        phase: OverlapPhase,
        player: Option<&dyn PlayerStateSource>,
        physics: &mut dyn GatePhysics,
    ) -> Option<GateMode> {
        let player = player?;
        let state = player.material_state()?;
        let player_collider = player.collider()?;

        let mode = GateMode::for_state(state);
        let (ignored, layer) = match mode {
            GateMode::Passable => (true, self.layers.ignore_raycast),
            GateMode::Solid => (false, self.layers.detect_raycast),
        };
        physics.set_collision_ignored(player_collider, self.collider, ignored);
        physics.set_layer(self.body, layer);

        if self.mode != Some(mode) {
            tracing::trace!(body = %self.body, ?phase, ?state, ?mode, "grate mode changed");
        }
        self.mode = Some(mode);
        Some(mode)
    }
}
