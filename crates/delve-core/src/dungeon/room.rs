//! Placed room instances.

use serde::{Deserialize, Serialize};

use super::graph::{NodeId, RoomNode, RoomNodeType};
use super::rect::GridRect;
use super::template::{Doorway, RoomTemplate};
use crate::geometry::GridPos;
use crate::rng::GameRng;

/// A placed, mutable room derived from a template and a graph node
///
/// Created unpositioned by the dungeon builder when its node is dequeued;
/// bounds and doorway state mutate during placement attempts. A failed
/// build attempt simply drops the rooms placed so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Graph node this room realizes; one room per node per build
    pub id: NodeId,

    /// Template this room was instantiated from
    pub template_id: String,

    /// Type tag inherited from the graph node
    pub room_type: RoomNodeType,

    /// Lower-left cell in the world grid, final after placement
    pub lower_bounds: GridPos,

    /// Upper-right cell in the world grid, final after placement
    pub upper_bounds: GridPos,

    /// Template-frame lower bounds, immutable copy
    pub template_lower_bounds: GridPos,

    /// Template-frame upper bounds, immutable copy
    pub template_upper_bounds: GridPos,

    /// This room's own doorway copies; never aliases the template's
    pub doorways: Vec<Doorway>,

    /// Spawn cells in the template frame, copied from the template
    pub spawn_points: Vec<GridPos>,

    /// Parent node id; None for the entrance
    pub parent_id: Option<NodeId>,

    /// Child node ids
    pub child_ids: Vec<NodeId>,

    /// Set once world bounds are final
    pub positioned: bool,

    /// Room content has been dealt with; the entrance starts cleared
    pub cleared_of_enemies: bool,

    /// An agent has entered this room
    pub visited: bool,
}

impl Room {
    /// Instantiate an unpositioned room for `node` from `template`,
    /// seeding world bounds from the template rectangle and deep-copying
    /// the doorway list.
    pub fn from_template(node: &RoomNode, template: &RoomTemplate) -> Self {
        Self {
            id: node.id,
            template_id: template.id.clone(),
            room_type: node.node_type,
            lower_bounds: template.lower_bounds,
            upper_bounds: template.upper_bounds,
            template_lower_bounds: template.lower_bounds,
            template_upper_bounds: template.upper_bounds,
            doorways: template.doorways.clone(),
            spawn_points: template.spawn_points.clone(),
            parent_id: node.parent_ids.first().copied(),
            child_ids: node.child_ids.clone(),
            positioned: false,
            cleared_of_enemies: node.node_type == RoomNodeType::Entrance,
            visited: false,
        }
    }

    /// Final world rectangle
    pub const fn world_rect(&self) -> GridRect {
        GridRect::new(self.lower_bounds, self.upper_bounds)
    }

    /// Template rectangle this room was stamped from
    pub const fn template_rect(&self) -> GridRect {
        GridRect::new(self.template_lower_bounds, self.template_upper_bounds)
    }

    /// Translate a template-frame cell into the room's world placement
    pub fn template_to_world(&self, p: GridPos) -> GridPos {
        self.lower_bounds + (p - self.template_lower_bounds)
    }

    /// World-grid position of one of this room's doorways
    pub fn doorway_world_position(&self, doorway: &Doorway) -> GridPos {
        self.template_to_world(doorway.local_position)
    }

    /// Indices of doorways still open for a connection
    pub fn open_doorways(&self) -> Vec<usize> {
        self.doorways
            .iter()
            .enumerate()
            .filter(|(_, d)| d.is_open())
            .map(|(i, _)| i)
            .collect()
    }

    /// Pick a random spawn cell, in the template frame
    pub fn random_spawn_point(&self, rng: &mut GameRng) -> Option<GridPos> {
        rng.choose(&self.spawn_points).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::template::DoorwayState;
    use crate::geometry::Orientation;

    fn node_and_template() -> (RoomNode, RoomTemplate) {
        let mut node = RoomNode::new(NodeId(3), RoomNodeType::Content);
        node.parent_ids.push(NodeId(1));
        let template = RoomTemplate::new(
            "content_small",
            RoomNodeType::Content,
            GridPos::new(10, 10),
            GridPos::new(14, 14),
        )
        .with_doorway(GridPos::new(12, 14), Orientation::North)
        .with_spawn_point(GridPos::new(12, 12));
        (node, template)
    }

    #[test]
    fn test_from_template_seeds_bounds() {
        let (node, template) = node_and_template();
        let room = Room::from_template(&node, &template);

        assert_eq!(room.id, NodeId(3));
        assert_eq!(room.parent_id, Some(NodeId(1)));
        assert_eq!(room.lower_bounds, template.lower_bounds);
        assert_eq!(room.template_rect(), template.rect());
        assert!(!room.positioned);
        assert!(!room.cleared_of_enemies);
    }

    #[test]
    fn test_entrance_starts_cleared() {
        let node = RoomNode::new(NodeId(0), RoomNodeType::Entrance);
        let template = RoomTemplate::new(
            "entrance",
            RoomNodeType::Entrance,
            GridPos::new(0, 0),
            GridPos::new(5, 5),
        );
        let room = Room::from_template(&node, &template);
        assert!(room.cleared_of_enemies);
    }

    #[test]
    fn test_doorway_copies_are_independent() {
        let (node, template) = node_and_template();
        let mut room = Room::from_template(&node, &template);

        room.doorways[0].state |= DoorwayState::CONNECTED;
        assert!(template.doorways[0].is_open());
        assert!(!room.doorways[0].is_open());
    }

    #[test]
    fn test_doorway_world_position_follows_placement() {
        let (node, template) = node_and_template();
        let mut room = Room::from_template(&node, &template);

        // Move the room; the doorway tracks the new bounds
        room.lower_bounds = GridPos::new(0, 0);
        room.upper_bounds = GridPos::new(4, 4);
        let doorway = room.doorways[0];
        assert_eq!(
            room.doorway_world_position(&doorway),
            GridPos::new(2, 4)
        );
    }

    #[test]
    fn test_open_doorways_filter() {
        let (node, template) = node_and_template();
        let mut room = Room::from_template(&node, &template);
        assert_eq!(room.open_doorways(), vec![0]);

        room.doorways[0].state |= DoorwayState::UNAVAILABLE;
        assert!(room.open_doorways().is_empty());
    }
}
