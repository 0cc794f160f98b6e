//! A* search over a room's penalty grid.
//!
//! Movement is 8-directional with flat step costs: 10 orthogonal, 14
//! diagonal. Penalty values play no part in step costs; only the
//! impassable 0 matters to the search.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::consts::{DIAGONAL_STEP_COST, ORTHOGONAL_STEP_COST};
use crate::dungeon::Room;
use crate::geometry::{GridPos, WorldPos};

use super::grid::PenaltyGrid;
use super::node::NodeGrid;

/// Open-list entry for the priority queue
///
/// Reverse-ordered for min-heap behavior: lowest f first, ties broken by
/// lower h, then by grid position so re-queries are deterministic.
#[derive(Clone, Copy, Eq, PartialEq)]
struct OpenNode {
    f_cost: i32,
    h_cost: i32,
    pos: GridPos,
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f_cost
            .cmp(&self.f_cost)
            .then_with(|| other.h_cost.cmp(&self.h_cost))
            .then_with(|| (other.pos.y, other.pos.x).cmp(&(self.pos.y, self.pos.x)))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Straight-line cost estimate under the 10/14 step model
fn heuristic(from: GridPos, to: GridPos) -> i32 {
    let dx = (from.x - to.x).abs();
    let dy = (from.y - to.y).abs();
    DIAGONAL_STEP_COST * dx.min(dy) + ORTHOGONAL_STEP_COST * (dx - dy).abs()
}

/// Find a shortest path across a room's penalty grid.
///
/// `start` and `target` are grid cells in the room's template rectangle
/// frame; they are translated to local grid indices by subtracting the
/// room's template lower bounds. An out-of-bounds or impassable start or
/// target, or an unreachable target, yields `None`, never a panic.
///
/// The returned Vec is a waypoint stack: `pop()` yields the start cell's
/// world point first, then each following step toward the target. Each
/// waypoint is the world-space center of its cell.
pub fn find_path(
    room: &Room,
    grid: &PenaltyGrid,
    start: GridPos,
    target: GridPos,
) -> Option<Vec<WorldPos>> {
    let local_start = start - room.template_lower_bounds;
    let local_target = target - room.template_lower_bounds;

    if !grid.is_walkable(local_start) || !grid.is_walkable(local_target) {
        return None;
    }

    let mut nodes = NodeGrid::new(grid.width(), grid.height());
    let mut open = BinaryHeap::new();

    {
        let node = nodes.node_mut(local_start)?;
        node.g_cost = 0;
        node.h_cost = heuristic(local_start, local_target);
        open.push(OpenNode {
            f_cost: node.f_cost(),
            h_cost: node.h_cost,
            pos: local_start,
        });
    }

    while let Some(current) = open.pop() {
        if current.pos == local_target {
            return Some(materialize(room, &nodes, local_start, local_target));
        }

        {
            let node = nodes.node_mut(current.pos)?;
            if node.closed {
                // Stale queue entry superseded by a cheaper path
                continue;
            }
            node.closed = true;
        }
        let current_g = nodes.node(current.pos)?.g_cost;

        for (dx, dy) in DIRECTIONS {
            let neighbor = current.pos.offset(dx, dy);
            if !grid.is_walkable(neighbor) {
                continue;
            }
            if nodes.node(neighbor)?.closed {
                continue;
            }

            let step = if dx != 0 && dy != 0 {
                DIAGONAL_STEP_COST
            } else {
                ORTHOGONAL_STEP_COST
            };
            let tentative_g = current_g + step;

            let node = nodes.node_mut(neighbor)?;
            if tentative_g < node.g_cost {
                node.g_cost = tentative_g;
                node.h_cost = heuristic(neighbor, local_target);
                node.parent = Some(current.pos);
                open.push(OpenNode {
                    f_cost: node.f_cost(),
                    h_cost: node.h_cost,
                    pos: neighbor,
                });
            }
        }
    }

    None
}

/// Walk parent links from the target back to the start, converting each
/// cell to a world point. The start ends up on top of the stack.
fn materialize(
    room: &Room,
    nodes: &NodeGrid,
    local_start: GridPos,
    local_target: GridPos,
) -> Vec<WorldPos> {
    let mut path = Vec::new();
    let mut current = local_target;
    loop {
        let cell = current + room.template_lower_bounds;
        path.push(cell.cell_center());
        if current == local_start {
            break;
        }
        match nodes.node(current).and_then(|n| n.parent) {
            Some(parent) => current = parent,
            // Unreachable for a target the search actually popped
            None => break,
        }
    }
    path
}
