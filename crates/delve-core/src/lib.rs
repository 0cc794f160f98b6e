//! delve-core: layout generation and pathfinding for delve
//!
//! This crate contains the level-building and navigation logic with no
//! engine or I/O dependencies beyond optional JSON content loading. It
//! is designed to be pure and testable: a seeded [`GameRng`] makes every
//! layout reproducible.
//!
//! The two halves:
//! - [`dungeon`]: room node graphs, templates, and the builder that
//!   places them into a connected, non-overlapping layout;
//! - [`pathfind`]: per-room penalty grids, A* search, and the
//!   scheduler that spreads path rebuilds across agents.

pub mod dungeon;
pub mod geometry;
pub mod pathfind;

mod consts;
mod rng;

pub use consts::*;
pub use rng::GameRng;
