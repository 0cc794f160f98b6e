//! Map text assembly for the TUI.

use delve_core::dungeon::{RoomMap, layout_bounds, render_layout};
use delve_core::geometry::GridPos;

/// Glyph marking demo path cells on the map
pub const PATH_MARK: char = '*';

/// Render the layout into printable lines, optionally overlaying a set
/// of world-grid path cells.
pub fn layout_lines(rooms: &RoomMap, overlay: Option<&[GridPos]>) -> Vec<String> {
    let text = render_layout(rooms);
    let mut lines: Vec<Vec<char>> = text.lines().map(|l| l.chars().collect()).collect();

    if let Some(cells) = overlay
        && let Some((min, max)) = layout_bounds(rooms)
    {
        for cell in cells {
            if cell.x < min.x || cell.x > max.x || cell.y < min.y || cell.y > max.y {
                continue;
            }
            let row = (max.y - cell.y) as usize;
            let col = (cell.x - min.x) as usize;
            lines[row][col] = PATH_MARK;
        }
    }

    lines.into_iter().map(|l| l.into_iter().collect()).collect()
}
