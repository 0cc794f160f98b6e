//! delve-tui: Terminal front-end using ratatui
//!
//! Generates dungeon layouts from the built-in sample content and draws
//! them as ASCII maps, with interactive regeneration and a pathfinding
//! demo overlay.

pub mod app;
pub mod display;

pub use app::{App, AppAction};
