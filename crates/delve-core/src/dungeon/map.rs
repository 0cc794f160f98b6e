//! ASCII rendering of a placed layout.
//!
//! Draws each placed room's rectangle into one character grid: walls on
//! the perimeter, floor inside, and an opening on every connected
//! doorway. North is up, so rows print from the highest y down.

use super::builder::RoomMap;
use crate::geometry::GridPos;

/// Floor glyph
pub const FLOOR: char = '.';
/// Vertical wall glyph
pub const VWALL: char = '|';
/// Horizontal wall glyph
pub const HWALL: char = '-';
/// Doorway glyph
pub const DOOR: char = '+';
/// Unexcavated space glyph
pub const ROCK: char = ' ';

/// Render the placed rooms into a printable multi-line string
pub fn render_layout(rooms: &RoomMap) -> String {
    let Some(bounds) = layout_bounds(rooms) else {
        return String::new();
    };
    let (min, max) = bounds;
    let width = (max.x - min.x + 1) as usize;
    let height = (max.y - min.y + 1) as usize;

    let mut grid = vec![vec![ROCK; width]; height];
    let mut set = |p: GridPos, c: char| {
        let col = (p.x - min.x) as usize;
        // Row 0 is the top of the printout
        let row = (max.y - p.y) as usize;
        grid[row][col] = c;
    };

    for room in rooms.values().filter(|r| r.positioned) {
        let rect = room.world_rect();
        for y in rect.lower.y..=rect.upper.y {
            for x in rect.lower.x..=rect.upper.x {
                let on_vertical_edge = x == rect.lower.x || x == rect.upper.x;
                let on_horizontal_edge = y == rect.lower.y || y == rect.upper.y;
                let glyph = if on_horizontal_edge {
                    HWALL
                } else if on_vertical_edge {
                    VWALL
                } else {
                    FLOOR
                };
                set(GridPos::new(x, y), glyph);
            }
        }
    }

    // Doorway openings go on top of the walls
    for room in rooms.values().filter(|r| r.positioned) {
        for doorway in &room.doorways {
            if doorway.is_connected() {
                set(room.doorway_world_position(doorway), DOOR);
            }
        }
    }

    let mut out = String::with_capacity(height * (width + 1));
    for row in grid {
        out.extend(row);
        out.push('\n');
    }
    out
}

/// World-grid bounding box over all positioned rooms
pub fn layout_bounds(rooms: &RoomMap) -> Option<(GridPos, GridPos)> {
    let mut iter = rooms.values().filter(|r| r.positioned);
    let first = iter.next()?;
    let mut min = first.lower_bounds;
    let mut max = first.upper_bounds;
    for room in iter {
        min.x = min.x.min(room.lower_bounds.x);
        min.y = min.y.min(room.lower_bounds.y);
        max.x = max.x.max(room.upper_bounds.x);
        max.y = max.y.max(room.upper_bounds.y);
    }
    Some((min, max))
}
