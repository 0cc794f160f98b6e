//! Grid and world coordinate types.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::consts::CELL_SIZE;

/// A cell position on the world grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise sum
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// World-space point at the center of this cell
    pub fn cell_center(self) -> WorldPos {
        WorldPos {
            x: (self.x as f32 + 0.5) * CELL_SIZE,
            y: (self.y as f32 + 0.5) * CELL_SIZE,
        }
    }

    /// Chebyshev distance to another cell (diagonal steps count as one)
    pub fn chebyshev_distance(self, other: GridPos) -> i32 {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        dx.max(dy)
    }
}

impl core::ops::Add for GridPos {
    type Output = GridPos;

    fn add(self, rhs: GridPos) -> GridPos {
        GridPos::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl core::ops::Sub for GridPos {
    type Output = GridPos;

    fn sub(self, rhs: GridPos) -> GridPos {
        GridPos::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl core::fmt::Display for GridPos {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A point in world space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
}

impl WorldPos {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(self, other: WorldPos) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// The grid cell containing this point
    pub fn to_grid(self) -> GridPos {
        GridPos {
            x: (self.x / CELL_SIZE).floor() as i32,
            y: (self.y / CELL_SIZE).floor() as i32,
        }
    }
}

/// Compass orientation of a doorway
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum Orientation {
    #[default]
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Orientation {
    /// The exact compass opposite
    pub const fn opposite(self) -> Orientation {
        match self {
            Orientation::North => Orientation::South,
            Orientation::East => Orientation::West,
            Orientation::South => Orientation::North,
            Orientation::West => Orientation::East,
        }
    }

    /// One-cell grid step in the direction of travel through a doorway
    /// with this orientation. North is +y.
    pub const fn step(self) -> GridPos {
        match self {
            Orientation::North => GridPos::new(0, 1),
            Orientation::East => GridPos::new(1, 0),
            Orientation::South => GridPos::new(0, -1),
            Orientation::West => GridPos::new(-1, 0),
        }
    }

    /// Whether this orientation runs along the north-south axis
    pub const fn is_vertical(self) -> bool {
        matches!(self, Orientation::North | Orientation::South)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposites() {
        assert_eq!(Orientation::North.opposite(), Orientation::South);
        assert_eq!(Orientation::East.opposite(), Orientation::West);
        assert_eq!(Orientation::South.opposite(), Orientation::North);
        assert_eq!(Orientation::West.opposite(), Orientation::East);
    }

    #[test]
    fn test_step_matches_opposite() {
        for o in [
            Orientation::North,
            Orientation::East,
            Orientation::South,
            Orientation::West,
        ] {
            let step = o.step();
            let back = o.opposite().step();
            assert_eq!(step.x + back.x, 0);
            assert_eq!(step.y + back.y, 0);
        }
    }

    #[test]
    fn test_cell_center() {
        let p = GridPos::new(3, -2).cell_center();
        assert_eq!(p, WorldPos::new(3.5, -1.5));
        assert_eq!(p.to_grid(), GridPos::new(3, -2));
    }

    #[test]
    fn test_chebyshev_distance() {
        let a = GridPos::new(0, 0);
        assert_eq!(a.chebyshev_distance(GridPos::new(3, 0)), 3);
        assert_eq!(a.chebyshev_distance(GridPos::new(4, 4)), 4);
        assert_eq!(a.chebyshev_distance(GridPos::new(-2, 1)), 2);
    }
}
