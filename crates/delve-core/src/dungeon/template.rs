//! Room templates and doorways.
//!
//! Templates are immutable reference data; many placed rooms may share
//! one. Rooms take value copies of the doorway list at creation time and
//! mutate only their own copies.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::graph::RoomNodeType;
use super::rect::GridRect;
use crate::geometry::{GridPos, Orientation};

bitflags! {
    /// Doorway placement state flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct DoorwayState: u8 {
        /// A neighboring room is attached through this doorway
        const CONNECTED = 0x01;
        /// Proven unusable against a neighbor; never retried
        const UNAVAILABLE = 0x02;
    }
}

// Manual serde impl for DoorwayState
impl Serialize for DoorwayState {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DoorwayState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u8::deserialize(deserializer)?;
        Ok(DoorwayState::from_bits_truncate(bits))
    }
}

/// A directional connection point on a room's perimeter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doorway {
    /// Cell position in the owning template's frame
    pub local_position: GridPos,

    /// Compass direction of travel through the doorway
    pub orientation: Orientation,

    /// Placement state; always empty on template copies
    #[serde(default)]
    pub state: DoorwayState,
}

impl Doorway {
    pub const fn new(local_position: GridPos, orientation: Orientation) -> Self {
        Self {
            local_position,
            orientation,
            state: DoorwayState::empty(),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.state.contains(DoorwayState::CONNECTED)
    }

    pub fn is_unavailable(&self) -> bool {
        self.state.contains(DoorwayState::UNAVAILABLE)
    }

    /// A doorway is open for a new connection while it is neither
    /// connected nor ruled out.
    pub fn is_open(&self) -> bool {
        self.state.is_empty()
    }
}

/// An immutable room blueprint: bounds, doorways, and spawn points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomTemplate {
    /// Template identifier
    pub id: String,

    /// Type tag matched against graph nodes
    pub room_type: RoomNodeType,

    /// Lower-left cell of the template rectangle
    pub lower_bounds: GridPos,

    /// Upper-right cell of the template rectangle
    pub upper_bounds: GridPos,

    /// Doorways on the perimeter, at most one per orientation
    pub doorways: Vec<Doorway>,

    /// Candidate agent spawn cells, in the template frame
    #[serde(default)]
    pub spawn_points: Vec<GridPos>,
}

impl RoomTemplate {
    pub fn new(
        id: impl Into<String>,
        room_type: RoomNodeType,
        lower_bounds: GridPos,
        upper_bounds: GridPos,
    ) -> Self {
        Self {
            id: id.into(),
            room_type,
            lower_bounds,
            upper_bounds,
            doorways: Vec::new(),
            spawn_points: Vec::new(),
        }
    }

    /// Builder-style doorway append
    pub fn with_doorway(mut self, position: GridPos, orientation: Orientation) -> Self {
        self.doorways.push(Doorway::new(position, orientation));
        self
    }

    /// Builder-style spawn point append
    pub fn with_spawn_point(mut self, position: GridPos) -> Self {
        self.spawn_points.push(position);
        self
    }

    /// Template rectangle
    pub const fn rect(&self) -> GridRect {
        GridRect::new(self.lower_bounds, self.upper_bounds)
    }

    /// Find the template's doorway with the given orientation
    pub fn doorway_facing(&self, orientation: Orientation) -> Option<&Doorway> {
        self.doorways.iter().find(|d| d.orientation == orientation)
    }

    /// Check bounds are well-formed and doorway orientations are unique
    pub fn is_well_formed(&self) -> bool {
        if !self.rect().is_valid() {
            return false;
        }
        let mut seen = [false; 4];
        for doorway in &self.doorways {
            let slot = doorway.orientation as usize;
            if seen[slot] {
                return false;
            }
            seen[slot] = true;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> RoomTemplate {
        RoomTemplate::new(
            "content_small",
            RoomNodeType::Content,
            GridPos::new(0, 0),
            GridPos::new(4, 4),
        )
        .with_doorway(GridPos::new(2, 4), Orientation::North)
        .with_doorway(GridPos::new(4, 2), Orientation::East)
        .with_spawn_point(GridPos::new(2, 2))
    }

    #[test]
    fn test_doorway_lookup() {
        let t = template();
        assert!(t.doorway_facing(Orientation::North).is_some());
        assert!(t.doorway_facing(Orientation::South).is_none());
        assert_eq!(
            t.doorway_facing(Orientation::East).unwrap().local_position,
            GridPos::new(4, 2)
        );
    }

    #[test]
    fn test_well_formed() {
        assert!(template().is_well_formed());

        let dup = template().with_doorway(GridPos::new(1, 4), Orientation::North);
        assert!(!dup.is_well_formed());

        let inverted = RoomTemplate::new(
            "bad",
            RoomNodeType::Content,
            GridPos::new(4, 0),
            GridPos::new(0, 4),
        );
        assert!(!inverted.is_well_formed());
    }

    #[test]
    fn test_doorway_state_flags() {
        let mut d = Doorway::new(GridPos::new(0, 0), Orientation::West);
        assert!(d.is_open());

        d.state |= DoorwayState::UNAVAILABLE;
        assert!(!d.is_open());
        assert!(d.is_unavailable());
        assert!(!d.is_connected());

        d.state |= DoorwayState::CONNECTED;
        assert!(d.is_connected());
    }
}
