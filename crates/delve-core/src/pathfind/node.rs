//! Search node lattice for one pathfinding call.

use crate::geometry::GridPos;

/// Per-cell search state: accumulated and heuristic costs plus the
/// back-link used for path reconstruction
#[derive(Debug, Clone, Copy)]
pub struct PathNode {
    /// Local grid cell this node wraps
    pub grid_position: GridPos,

    /// Cost of the best known path from the start
    pub g_cost: i32,

    /// Heuristic estimate to the target
    pub h_cost: i32,

    /// Predecessor on the best known path
    pub parent: Option<GridPos>,

    /// Finalized; never revisited
    pub closed: bool,
}

impl PathNode {
    fn unvisited(grid_position: GridPos) -> Self {
        Self {
            grid_position,
            g_cost: i32::MAX,
            h_cost: 0,
            parent: None,
            closed: false,
        }
    }

    /// Total cost estimate through this node
    pub fn f_cost(&self) -> i32 {
        self.g_cost.saturating_add(self.h_cost)
    }
}

/// Room-sized lattice of search nodes, allocated fresh per call
#[derive(Debug, Clone)]
pub struct NodeGrid {
    width: i32,
    height: i32,
    nodes: Vec<PathNode>,
}

impl NodeGrid {
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let mut nodes = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                nodes.push(PathNode::unvisited(GridPos::new(x, y)));
            }
        }
        Self {
            width,
            height,
            nodes,
        }
    }

    pub const fn in_bounds(&self, p: GridPos) -> bool {
        p.x >= 0 && p.x < self.width && p.y >= 0 && p.y < self.height
    }

    pub fn node(&self, p: GridPos) -> Option<&PathNode> {
        if !self.in_bounds(p) {
            return None;
        }
        Some(&self.nodes[(p.y * self.width + p.x) as usize])
    }

    pub fn node_mut(&mut self, p: GridPos) -> Option<&mut PathNode> {
        if !self.in_bounds(p) {
            return None;
        }
        Some(&mut self.nodes[(p.y * self.width + p.x) as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_nodes_unvisited() {
        let grid = NodeGrid::new(3, 2);
        let node = grid.node(GridPos::new(2, 1)).unwrap();
        assert_eq!(node.g_cost, i32::MAX);
        assert!(node.parent.is_none());
        assert!(!node.closed);
        assert_eq!(node.grid_position, GridPos::new(2, 1));
    }

    #[test]
    fn test_out_of_bounds_node() {
        let grid = NodeGrid::new(3, 2);
        assert!(grid.node(GridPos::new(3, 0)).is_none());
        assert!(grid.node(GridPos::new(0, -1)).is_none());
    }

    #[test]
    fn test_f_cost_saturates() {
        let mut grid = NodeGrid::new(1, 1);
        let node = grid.node_mut(GridPos::new(0, 0)).unwrap();
        node.h_cost = 10;
        assert_eq!(node.f_cost(), i32::MAX);
    }
}
