//! Per-room movement penalty grids.
//!
//! A penalty grid is computed once when a room is instantiated, from tile
//! classification supplied by the caller, and is read-only during
//! searches. Cell values: 0 is impassable, everything else walkable with
//! the value recorded for grid construction only.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_MOVEMENT_PENALTY, OBSTACLE_PENALTY, PREFERRED_PATH_PENALTY};
use crate::dungeon::{Room, RoomTemplate};
use crate::geometry::GridPos;

/// A 2D movement cost array covering one room's template rectangle
///
/// Positions are local: (0, 0) is the template rectangle's lower-left
/// cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenaltyGrid {
    width: i32,
    height: i32,
    cells: Vec<u8>,
}

impl PenaltyGrid {
    /// A fully walkable grid at the default penalty
    pub fn open(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            cells: vec![DEFAULT_MOVEMENT_PENALTY; (width * height) as usize],
        }
    }

    /// An open grid sized to a template's rectangle
    pub fn for_template(template: &RoomTemplate) -> Self {
        let rect = template.rect();
        Self::open(rect.width(), rect.height())
    }

    /// An open grid sized to a placed room's template rectangle
    pub fn for_room(room: &Room) -> Self {
        let rect = room.template_rect();
        Self::open(rect.width(), rect.height())
    }

    pub const fn width(&self) -> i32 {
        self.width
    }

    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Check a local cell lies inside the grid
    pub const fn in_bounds(&self, p: GridPos) -> bool {
        p.x >= 0 && p.x < self.width && p.y >= 0 && p.y < self.height
    }

    /// Penalty at a local cell; None when out of bounds
    pub fn penalty(&self, p: GridPos) -> Option<u8> {
        if !self.in_bounds(p) {
            return None;
        }
        Some(self.cells[(p.y * self.width + p.x) as usize])
    }

    /// Overwrite the penalty at a local cell; out-of-bounds is ignored
    pub fn set_penalty(&mut self, p: GridPos, penalty: u8) {
        if self.in_bounds(p) {
            self.cells[(p.y * self.width + p.x) as usize] = penalty;
        }
    }

    /// Mark a local cell impassable
    pub fn set_obstacle(&mut self, p: GridPos) {
        self.set_penalty(p, OBSTACLE_PENALTY);
    }

    /// Mark a local cell as preferred path
    pub fn set_preferred(&mut self, p: GridPos) {
        self.set_penalty(p, PREFERRED_PATH_PENALTY);
    }

    /// A cell can be entered iff it is inside the grid and not penalty 0
    pub fn is_walkable(&self, p: GridPos) -> bool {
        matches!(self.penalty(p), Some(penalty) if penalty != OBSTACLE_PENALTY)
    }
}
