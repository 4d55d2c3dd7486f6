//! Maze wall-state collaborator.
//!
//! Maze generation lives outside this crate. Barrier expiry only needs one
//! operation from it: flip a single wall entry of a cell in the maze's internal
//! wall table. [`MazeWalls`] is that seam. [`WallGrid`] is a plain in-memory
//! table implementing it, useful for hosts without their own maze store and for
//! tests.

use bitflags::bitflags;
use glam::UVec2;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Cell coordinates in the maze grid (`x` = column, `y` = row).
pub type CellCoord = UVec2;

/// Which side of a cell a wall sits on.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallDirection {
    /// Wall on the north side of the cell.
    North,
    /// Wall on the east side of the cell.
    East,
    /// Wall on the south side of the cell.
    South,
    /// Wall on the west side of the cell.
    West,
}

impl WallDirection {
    /// All four directions in mask order.
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Returns the mask bit for this direction.
    #[must_use]
    pub const fn mask(self) -> WallMask {
        match self {
            Self::North => WallMask::NORTH,
            Self::East => WallMask::EAST,
            Self::South => WallMask::SOUTH,
            Self::West => WallMask::WEST,
        }
    }
}

impl fmt::Display for WallDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::North => write!(f, "north"),
            Self::East => write!(f, "east"),
            Self::South => write!(f, "south"),
            Self::West => write!(f, "west"),
        }
    }
}

bitflags! {
    /// Walls present on one cell.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct WallMask: u8 {
        /// North wall.
        const NORTH = 1 << 0;
        /// East wall.
        const EAST  = 1 << 1;
        /// South wall.
        const SOUTH = 1 << 2;
        /// West wall.
        const WEST  = 1 << 3;
    }
}

/// Mutation interface of the external maze.
///
/// `present == false` marks the wall as gone in the maze's internal table so
/// pathfinding stops treating it as blocking.
pub trait MazeWalls {
    /// Sets whether the wall on `direction` side of `cell` is present.
    fn set_wall_internal_state(&mut self, cell: CellCoord, direction: WallDirection, present: bool);
}

/// In-memory wall table, one [`WallMask`] per cell in row-major order.
///
/// # Example
///
/// ```
/// use mazeturn_core::maze::{MazeWalls, WallDirection, WallGrid};
/// use glam::UVec2;
///
/// let mut grid = WallGrid::new(4, 4);
/// grid.set_wall_internal_state(UVec2::new(1, 2), WallDirection::East, true);
/// assert!(grid.has_wall(UVec2::new(1, 2), WallDirection::East));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WallGridRepr")]
pub struct WallGrid {
    width: u32,
    height: u32,
    cells: Vec<WallMask>,
}

/// Serialized form of a [`WallGrid`], checked before it becomes one.
#[derive(Deserialize)]
struct WallGridRepr {
    width: u32,
    height: u32,
    cells: Vec<WallMask>,
}

/// A deserialized wall table whose cell count does not match its size.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("wall grid is {width}x{height} but has {actual} cells")]
pub struct WallGridShapeError {
    width: u32,
    height: u32,
    actual: usize,
}

impl TryFrom<WallGridRepr> for WallGrid {
    type Error = WallGridShapeError;

    fn try_from(repr: WallGridRepr) -> Result<Self, Self::Error> {
        let expected = repr.width as usize * repr.height as usize;
        if repr.cells.len() != expected {
            return Err(WallGridShapeError {
                width: repr.width,
                height: repr.height,
                actual: repr.cells.len(),
            });
        }
        Ok(Self {
            width: repr.width,
            height: repr.height,
            cells: repr.cells,
        })
    }
}

impl WallGrid {
    /// Creates a `width` x `height` grid with no walls.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![WallMask::empty(); len],
        }
    }

    /// Grid width in cells.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in cells.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Returns the wall mask of a cell, or `None` outside the grid.
    #[must_use]
    pub fn walls(&self, cell: CellCoord) -> Option<WallMask> {
        self.index(cell).and_then(|i| self.cells.get(i)).copied()
    }

    /// Returns true if the given wall is present. Cells outside the grid have
    /// no walls.
    #[must_use]
    pub fn has_wall(&self, cell: CellCoord, direction: WallDirection) -> bool {
        self.walls(cell)
            .is_some_and(|mask| mask.contains(direction.mask()))
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        (cell.x < self.width && cell.y < self.height)
            .then(|| cell.y as usize * self.width as usize + cell.x as usize)
    }
}

impl MazeWalls for WallGrid {
    fn set_wall_internal_state(&mut self, cell: CellCoord, direction: WallDirection, present: bool) {
        let Some(mask) = self.index(cell).and_then(|i| self.cells.get_mut(i)) else {
            tracing::warn!(%cell, %direction, "wall update outside maze bounds ignored");
            return;
        };
        mask.set(direction.mask(), present);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_has_no_walls() {
        let grid = WallGrid::new(3, 2);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        for x in 0..3 {
            for y in 0..2 {
                assert_eq!(grid.walls(UVec2::new(x, y)), Some(WallMask::empty()));
            }
        }
    }

    #[test]
    fn set_and_clear_wall() {
        let mut grid = WallGrid::new(3, 3);
        let cell = UVec2::new(2, 1);

        grid.set_wall_internal_state(cell, WallDirection::North, true);
        grid.set_wall_internal_state(cell, WallDirection::West, true);
        assert_eq!(grid.walls(cell), Some(WallMask::NORTH | WallMask::WEST));

        grid.set_wall_internal_state(cell, WallDirection::North, false);
        assert!(!grid.has_wall(cell, WallDirection::North));
        assert!(grid.has_wall(cell, WallDirection::West));
    }

    #[test]
    fn updates_do_not_leak_into_neighbours() {
        let mut grid = WallGrid::new(2, 2);
        grid.set_wall_internal_state(UVec2::new(0, 0), WallDirection::East, true);
        assert!(!grid.has_wall(UVec2::new(1, 0), WallDirection::West));
        assert!(!grid.has_wall(UVec2::new(0, 1), WallDirection::East));
    }

    #[test]
    fn out_of_bounds_is_ignored() {
        let mut grid = WallGrid::new(2, 2);
        grid.set_wall_internal_state(UVec2::new(5, 0), WallDirection::South, true);
        assert_eq!(grid.walls(UVec2::new(5, 0)), None);
        assert!(!grid.has_wall(UVec2::new(5, 0), WallDirection::South));
        assert_eq!(grid, WallGrid::new(2, 2));
    }

    #[test]
    fn serialization_roundtrip() {
        let mut grid = WallGrid::new(3, 2);
        grid.set_wall_internal_state(UVec2::new(1, 1), WallDirection::South, true);

        let json = serde_json::to_string(&grid).unwrap();
        let back: WallGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);
        assert!(back.has_wall(UVec2::new(1, 1), WallDirection::South));
    }

    #[test]
    fn deserialize_rejects_mismatched_cell_count() {
        let err = serde_json::from_str::<WallGrid>(r#"{"width":4,"height":4,"cells":[]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("4x4 but has 0 cells"));

        let short = r#"{"width":2,"height":1,"cells":[""]}"#;
        assert!(serde_json::from_str::<WallGrid>(short).is_err());
    }

    #[test]
    fn direction_masks_are_distinct() {
        let combined = WallDirection::ALL
            .iter()
            .fold(WallMask::empty(), |acc, d| acc | d.mask());
        assert_eq!(combined, WallMask::all());
    }
}
