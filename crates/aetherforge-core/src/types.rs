//! Fundamental geometric and simulation types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::{GRID_COLS, GRID_ROWS, TILE_SIZE};

/// Continuous position in world units. x grows right, y grows down.
pub type Position = Vec2;

/// A cell of the placement grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub col: i32,
    pub row: i32,
}

impl GridCell {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// World position of the cell's center.
    pub fn center(&self) -> Position {
        Vec2::new(
            self.col as f32 * TILE_SIZE + TILE_SIZE / 2.0,
            self.row as f32 * TILE_SIZE + TILE_SIZE / 2.0,
        )
    }

    /// Cell containing a world position.
    pub fn containing(pos: Position) -> Self {
        Self {
            col: (pos.x / TILE_SIZE).floor() as i32,
            row: (pos.y / TILE_SIZE).floor() as i32,
        }
    }

    pub fn in_bounds(&self) -> bool {
        (0..GRID_COLS).contains(&self.col) && (0..GRID_ROWS).contains(&self.row)
    }
}

/// Euclidean distance between two positions.
pub fn distance(a: Position, b: Position) -> f32 {
    a.distance(b)
}

/// Unit bearing from `from` toward `to`. Zero when the points coincide.
pub fn bearing(from: Position, to: Position) -> Vec2 {
    (to - from).normalize_or_zero()
}

/// Result of advancing a point toward a goal by a fixed step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// The goal was within one step; the point snaps onto it.
    Arrived(Position),
    /// The point moved `step` units along the bearing.
    Moved(Position),
}

/// Advance `from` toward `to` by `step` units, snapping when within reach.
pub fn step_toward(from: Position, to: Position, step: f32) -> Step {
    if distance(from, to) <= step {
        Step::Arrived(to)
    } else {
        Step::Moved(from + bearing(from, to) * step)
    }
}

/// Simulation frame clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimTime {
    /// Total frames the engine has ticked.
    pub frame: u64,
    /// Frames spent in active play. Drives frame-based cadences.
    pub active_frames: u64,
}

impl SimTime {
    /// Advance by one frame.
    pub fn advance(&mut self, active: bool) {
        self.frame += 1;
        if active {
            self.active_frames += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_center_is_offset_by_half_tile() {
        let c = GridCell::new(2, 3).center();
        assert_eq!(c, Vec2::new(100.0, 140.0));
        assert_eq!(GridCell::containing(c), GridCell::new(2, 3));
    }

    #[test]
    fn step_snaps_within_reach() {
        let from = Vec2::new(0.0, 0.0);
        let to = Vec2::new(3.0, 4.0);
        assert_eq!(step_toward(from, to, 5.0), Step::Arrived(to));
        match step_toward(from, to, 2.5) {
            Step::Moved(p) => assert!((p - Vec2::new(1.5, 2.0)).length() < 1e-5),
            other => panic!("expected a partial move, got {other:?}"),
        }
    }

    #[test]
    fn bearing_of_coincident_points_is_zero() {
        let p = Vec2::new(7.0, 7.0);
        assert_eq!(bearing(p, p), Vec2::ZERO);
    }

    #[test]
    fn grid_bounds() {
        assert!(GridCell::new(0, 0).in_bounds());
        assert!(GridCell::new(GRID_COLS - 1, GRID_ROWS - 1).in_bounds());
        assert!(!GridCell::new(GRID_COLS, 0).in_bounds());
        assert!(!GridCell::new(0, -1).in_bounds());
    }
}
