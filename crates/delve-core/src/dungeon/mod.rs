//! Dungeon layout system
//!
//! Room node graphs, templates, placed rooms, and the layout builder.

mod builder;
pub mod content;
mod graph;
mod level;
mod map;
mod rect;
mod room;
mod template;

pub use builder::{BuildError, DungeonBuilder, RoomMap};
pub use graph::{GraphError, NodeId, RoomNode, RoomNodeGraph, RoomNodeType};
pub use level::{LevelDescriptor, LevelError};
pub use map::{layout_bounds, render_layout};
pub use rect::GridRect;
pub use room::Room;
pub use template::{Doorway, DoorwayState, RoomTemplate};
