//! Core tunables for level building and pathfinding.

/// Maximum outer build attempts (each picks a candidate room graph)
pub const MAX_BUILD_ATTEMPTS: u32 = 10;

/// Maximum rebuild attempts for a single selected room graph
pub const MAX_REBUILDS_PER_GRAPH: u32 = 1000;

/// Cost of moving to an orthogonal neighbor
pub const ORTHOGONAL_STEP_COST: i32 = 10;

/// Cost of moving to a diagonal neighbor (10 * sqrt(2), rounded)
pub const DIAGONAL_STEP_COST: i32 = 14;

/// Movement penalty for an impassable cell
pub const OBSTACLE_PENALTY: u8 = 0;

/// Movement penalty for an ordinary walkable cell
pub const DEFAULT_MOVEMENT_PENALTY: u8 = 40;

/// Movement penalty for a preferred-path cell
pub const PREFERRED_PATH_PENALTY: u8 = 1;

/// World-space size of one grid cell
pub const CELL_SIZE: f32 = 1.0;

/// Default number of scheduler ticks path rebuilds are spread over
pub const DEFAULT_REBUILD_SPREAD: u32 = 60;

/// Default seconds an agent waits between path rebuilds
pub const DEFAULT_REBUILD_COOLDOWN: f32 = 2.0;

/// Default distance the target must move before a rebuild is considered
pub const DEFAULT_REBUILD_DISPLACEMENT: f32 = 3.0;
