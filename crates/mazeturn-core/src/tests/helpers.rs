//! Recording collaborators and session setup for tests.
//!
//! The session owns its collaborators as trait objects, so each recorder keeps
//! its log behind an `Arc<Mutex<_>>` and the test keeps a second handle.

use std::sync::{Arc, Mutex};

use glam::UVec2;

use crate::config::TurnConfig;
use crate::entity::EntityId;
use crate::expiry::{BarrierWall, EntityLifecycle};
use crate::hooks::{SessionHost, TurnDisplay};
use crate::maze::{CellCoord, MazeWalls, WallDirection, WallGrid};
use crate::session::TurnSession;
use crate::turn::TurnType;

// =============================================================================
// Recorders
// =============================================================================

/// Display that remembers every label it was given.
#[derive(Debug, Clone, Default)]
pub struct RecordingDisplay {
    labels: Arc<Mutex<Vec<String>>>,
}

impl RecordingDisplay {
    pub fn labels(&self) -> Vec<String> {
        self.labels.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.labels.lock().unwrap().last().cloned()
    }
}

impl TurnDisplay for RecordingDisplay {
    fn show_turns_left(&mut self, label: &str) {
        self.labels.lock().unwrap().push(label.to_owned());
    }
}

/// Host that remembers every loss reason.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    losses: Arc<Mutex<Vec<String>>>,
}

impl RecordingHost {
    pub fn losses(&self) -> Vec<String> {
        self.losses.lock().unwrap().clone()
    }
}

impl SessionHost for RecordingHost {
    fn lose(&mut self, reason: &str) {
        self.losses.lock().unwrap().push(reason.to_owned());
    }
}

/// What happened to scene entities and maze walls.
#[derive(Debug, Clone)]
pub struct SceneLog {
    pub walls: WallGrid,
    pub deactivated: Vec<EntityId>,
    pub destroyed: Vec<EntityId>,
}

/// Scene backed by an in-memory maze.
#[derive(Debug, Clone)]
pub struct RecordingScene {
    log: Arc<Mutex<SceneLog>>,
}

impl RecordingScene {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            log: Arc::new(Mutex::new(SceneLog {
                walls: WallGrid::new(width, height),
                deactivated: Vec::new(),
                destroyed: Vec::new(),
            })),
        }
    }

    pub fn snapshot(&self) -> SceneLog {
        self.log.lock().unwrap().clone()
    }

    /// Raises a wall directly, as the skill that spawns a barrier would.
    pub fn raise_wall(&self, wall: BarrierWall) {
        self.log
            .lock()
            .unwrap()
            .walls
            .set_wall_internal_state(wall.cell, wall.direction, true);
    }
}

impl EntityLifecycle for RecordingScene {
    fn deactivate(&mut self, id: EntityId) {
        self.log.lock().unwrap().deactivated.push(id);
    }

    fn destroy(&mut self, id: EntityId) {
        self.log.lock().unwrap().destroyed.push(id);
    }
}

impl MazeWalls for RecordingScene {
    fn set_wall_internal_state(&mut self, cell: CellCoord, direction: WallDirection, present: bool) {
        self.log
            .lock()
            .unwrap()
            .walls
            .set_wall_internal_state(cell, direction, present);
    }
}

// =============================================================================
// Session Setup
// =============================================================================

/// A session together with handles to its recorders.
pub struct Harness {
    pub session: TurnSession,
    pub display: RecordingDisplay,
    pub host: RecordingHost,
    pub scene: RecordingScene,
}

/// Sets up a session with the given defeat limit over an 8x8 maze.
pub fn setup_session(rounds_until_defeat: u32) -> Harness {
    let display = RecordingDisplay::default();
    let host = RecordingHost::default();
    let scene = RecordingScene::new(8, 8);

    let session = TurnSession::new(
        TurnConfig::with_rounds(rounds_until_defeat),
        Box::new(display.clone()),
        Box::new(host.clone()),
        Box::new(scene.clone()),
    )
    .unwrap();

    Harness {
        session,
        display,
        host,
        scene,
    }
}

/// A barrier on the east side of cell (2, 3).
pub fn test_wall() -> BarrierWall {
    BarrierWall::new(UVec2::new(2, 3), WallDirection::East)
}

/// Runs `count` player turns.
pub fn player_turns(session: &mut TurnSession, count: usize) {
    for _ in 0..count {
        session.add_turn(TurnType::Player);
    }
}
