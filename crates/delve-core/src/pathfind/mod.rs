//! Grid pathfinding
//!
//! Penalty grids, the A* search, and the rebuild scheduler that spreads
//! searches across agents.

mod astar;
mod grid;
mod node;
mod scheduler;

pub use astar::find_path;
pub use grid::PenaltyGrid;
pub use node::{NodeGrid, PathNode};
pub use scheduler::{AgentNav, AgentSlot, PathScheduler};
