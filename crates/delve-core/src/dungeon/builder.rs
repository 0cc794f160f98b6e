//! Dungeon layout building.
//!
//! Realizes one candidate room node graph into a set of placed,
//! non-overlapping rooms connected through doorways. Placement walks the
//! graph breadth-first from the entrance; each node tries the parent's
//! open doorways until a candidate room fits, and a node with no usable
//! doorway left aborts the whole attempt. Attempts are bounded: a fixed
//! number of rebuilds per selected graph, and a fixed number of graph
//! selections per level.

use std::collections::VecDeque;

use hashbrown::HashMap;
use thiserror::Error;

use super::graph::{NodeId, RoomNode, RoomNodeGraph, RoomNodeType};
use super::level::{LevelDescriptor, LevelError};
use super::room::Room;
use super::template::DoorwayState;
use crate::consts::{MAX_BUILD_ATTEMPTS, MAX_REBUILDS_PER_GRAPH};
use crate::geometry::{GridPos, Orientation};
use crate::rng::GameRng;

/// Placed rooms of a successful build, keyed by graph node id
pub type RoomMap = HashMap<NodeId, Room>;

/// Level generation failure
#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Level(#[from] LevelError),

    #[error("exhausted {attempts} build attempts for level '{level}'")]
    AttemptsExhausted { level: String, attempts: u32 },
}

/// The placement engine
///
/// Holds only retry configuration; all per-build state lives in the
/// build call and is not observable until it succeeds.
#[derive(Debug, Clone, Copy)]
pub struct DungeonBuilder {
    /// Outer bound: how many times a candidate graph is (re)selected
    pub max_build_attempts: u32,

    /// Inner bound: rebuilds of one selected graph before reselecting
    pub max_rebuilds_per_graph: u32,
}

impl Default for DungeonBuilder {
    fn default() -> Self {
        Self {
            max_build_attempts: MAX_BUILD_ATTEMPTS,
            max_rebuilds_per_graph: MAX_REBUILDS_PER_GRAPH,
        }
    }
}

impl DungeonBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a placed room map for the level.
    ///
    /// Structural problems (no graphs, no entrance, missing templates)
    /// fail immediately; geometric dead ends are retried within the
    /// configured attempt bounds and surface as `AttemptsExhausted`.
    pub fn generate(
        &self,
        level: &LevelDescriptor,
        rng: &mut GameRng,
    ) -> Result<RoomMap, BuildError> {
        level.validate()?;

        for attempt in 1..=self.max_build_attempts {
            let graph = &level.graphs[rng.rn2(level.graphs.len() as u32) as usize];

            for rebuild in 1..=self.max_rebuilds_per_graph {
                if let Some(rooms) = self.try_build(level, graph, rng) {
                    log::debug!(
                        "level '{}': built graph '{}' ({} rooms, attempt {}, rebuild {})",
                        level.id,
                        graph.id,
                        rooms.len(),
                        attempt,
                        rebuild
                    );
                    return Ok(rooms);
                }
            }

            log::debug!(
                "level '{}': graph '{}' exhausted {} rebuilds",
                level.id,
                graph.id,
                self.max_rebuilds_per_graph
            );
        }

        log::warn!(
            "level '{}': no layout after {} build attempts",
            level.id,
            self.max_build_attempts
        );
        Err(BuildError::AttemptsExhausted {
            level: level.id.clone(),
            attempts: self.max_build_attempts,
        })
    }

    /// One full placement attempt over the graph. Returns None on any
    /// dead end; the caller decides whether to retry.
    fn try_build(
        &self,
        level: &LevelDescriptor,
        graph: &RoomNodeGraph,
        rng: &mut GameRng,
    ) -> Option<RoomMap> {
        let mut rooms = RoomMap::new();
        let mut queue = VecDeque::new();
        queue.push_back(graph.entrance()?.id);

        while let Some(id) = queue.pop_front() {
            let node = graph.node(id)?;

            let room = if node.node_type == RoomNodeType::Entrance {
                // Entrance bounds come straight from the template
                let template = level.random_template(RoomNodeType::Entrance, rng)?;
                let mut room = Room::from_template(node, template);
                room.positioned = true;
                room
            } else {
                self.place_node(level, node, &mut rooms, rng)?
            };

            queue.extend(node.child_ids.iter().copied());
            rooms.insert(id, room);
        }

        Some(rooms)
    }

    /// Attach one node to its already-placed parent, trying the parent's
    /// open doorways until a candidate fits or none remain.
    fn place_node(
        &self,
        level: &LevelDescriptor,
        node: &RoomNode,
        rooms: &mut RoomMap,
        rng: &mut GameRng,
    ) -> Option<Room> {
        let parent_id = node.parent_ids.first().copied()?;

        loop {
            let parent = rooms.get(&parent_id)?;
            let open = parent.open_doorways();
            let &doorway_index = rng.choose(&open)?;

            let parent_doorway = parent.doorways[doorway_index];
            let orientation = parent_doorway.orientation;
            let doorway_cell = parent.doorway_world_position(&parent_doorway);

            match self.fit_candidate(level, node, orientation, doorway_cell, rooms, rng) {
                Some((mut candidate, candidate_doorway_index)) => {
                    candidate.doorways[candidate_doorway_index].state |=
                        DoorwayState::CONNECTED | DoorwayState::UNAVAILABLE;
                    candidate.positioned = true;

                    let parent = rooms.get_mut(&parent_id)?;
                    parent.doorways[doorway_index].state |=
                        DoorwayState::CONNECTED | DoorwayState::UNAVAILABLE;

                    return Some(candidate);
                }
                None => {
                    // One failed candidate condemns the doorway; it is
                    // never retried.
                    let parent = rooms.get_mut(&parent_id)?;
                    parent.doorways[doorway_index].state |= DoorwayState::UNAVAILABLE;
                }
            }
        }
    }

    /// Instantiate a candidate room behind the parent doorway and test it
    /// for overlap. Returns the positioned candidate and the index of its
    /// connecting doorway.
    fn fit_candidate(
        &self,
        level: &LevelDescriptor,
        node: &RoomNode,
        orientation: Orientation,
        doorway_cell: GridPos,
        rooms: &RoomMap,
        rng: &mut GameRng,
    ) -> Option<(Room, usize)> {
        let template_type = required_template_type(node.node_type, orientation);
        let template = level.random_template(template_type, rng)?;
        let mut candidate = Room::from_template(node, template);

        // The candidate connects through its doorway facing back at the
        // parent, placed one cell beyond the parent doorway.
        let facing = orientation.opposite();
        let candidate_doorway_index = candidate
            .doorways
            .iter()
            .position(|d| d.orientation == facing)?;

        let target_cell = doorway_cell + orientation.step();
        let doorway_local = candidate.doorways[candidate_doorway_index].local_position;
        candidate.lower_bounds = target_cell - (doorway_local - candidate.template_lower_bounds);
        candidate.upper_bounds = candidate.lower_bounds
            + (candidate.template_upper_bounds - candidate.template_lower_bounds);

        let candidate_rect = candidate.world_rect();
        let collides = rooms
            .values()
            .any(|room| room.positioned && room.world_rect().overlaps(&candidate_rect));
        if collides {
            return None;
        }

        Some((candidate, candidate_doorway_index))
    }
}

/// Template type a node needs when attached through a doorway with the
/// given orientation. Corridor nodes resolve to an axis-specific
/// corridor template; everything else matches its own type.
fn required_template_type(node_type: RoomNodeType, orientation: Orientation) -> RoomNodeType {
    if node_type == RoomNodeType::Corridor {
        if orientation.is_vertical() {
            RoomNodeType::CorridorNs
        } else {
            RoomNodeType::CorridorEw
        }
    } else {
        node_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::content::sample_level;
    use crate::dungeon::graph::GraphError;
    use crate::geometry::{GridPos, Orientation};
    use crate::dungeon::template::RoomTemplate;

    #[test]
    fn test_generate_sample_level() {
        let level = sample_level();
        let builder = DungeonBuilder::new();
        let mut rng = GameRng::new(2024);

        let rooms = builder.generate(&level, &mut rng).unwrap();
        let graph_sizes: Vec<usize> = level.graphs.iter().map(|g| g.nodes.len()).collect();
        assert!(graph_sizes.contains(&rooms.len()));
        assert!(rooms.values().all(|r| r.positioned));
    }

    #[test]
    fn test_same_seed_same_layout() {
        let level = sample_level();
        let builder = DungeonBuilder::new();

        let rooms1 = builder.generate(&level, &mut GameRng::new(7)).unwrap();
        let rooms2 = builder.generate(&level, &mut GameRng::new(7)).unwrap();

        assert_eq!(rooms1.len(), rooms2.len());
        for (id, room) in &rooms1 {
            let other = &rooms2[id];
            assert_eq!(room.lower_bounds, other.lower_bounds);
            assert_eq!(room.upper_bounds, other.upper_bounds);
            assert_eq!(room.template_id, other.template_id);
        }
    }

    #[test]
    fn test_entrance_bounds_from_template() {
        let level = sample_level();
        let builder = DungeonBuilder::new();
        let mut rng = GameRng::new(5);

        let rooms = builder.generate(&level, &mut rng).unwrap();
        let entrance = rooms
            .values()
            .find(|r| r.room_type == RoomNodeType::Entrance)
            .unwrap();
        let template = level.template(&entrance.template_id).unwrap();
        assert_eq!(entrance.lower_bounds, template.lower_bounds);
        assert_eq!(entrance.upper_bounds, template.upper_bounds);
        assert!(entrance.cleared_of_enemies);
    }

    #[test]
    fn test_no_entrance_fails_fast() {
        let mut level = sample_level();
        for node in &mut level.graphs[0].nodes {
            if node.node_type == RoomNodeType::Entrance {
                node.node_type = RoomNodeType::Content;
            }
        }
        let builder = DungeonBuilder::new();
        let err = builder.generate(&level, &mut GameRng::new(1)).unwrap_err();
        assert!(matches!(
            err,
            BuildError::Level(LevelError::Graph(GraphError::BadParentCount { .. }))
                | BuildError::Level(LevelError::Graph(GraphError::NoEntrance { .. }))
        ));
    }

    #[test]
    fn test_doorway_exhaustion_fails_build() {
        // Entrance with a single doorway but two children: the second
        // child finds no open doorway and every attempt must fail.
        let mut level = sample_level();
        level.templates = vec![
            RoomTemplate::new(
                "entrance_dead_end",
                RoomNodeType::Entrance,
                GridPos::new(0, 0),
                GridPos::new(5, 5),
            )
            .with_doorway(GridPos::new(2, 5), Orientation::North),
            level.template("corridor_ns").unwrap().clone(),
            level.template("content_small").unwrap().clone(),
        ];

        let mut graph = crate::dungeon::graph::RoomNodeGraph::new("starved");
        let entrance = graph.add_node(RoomNodeType::Entrance);
        for _ in 0..2 {
            let corridor = graph.add_node(RoomNodeType::Corridor);
            let content = graph.add_node(RoomNodeType::Content);
            graph.add_edge(entrance, corridor);
            graph.add_edge(corridor, content);
        }
        level.graphs = vec![graph];

        let builder = DungeonBuilder {
            max_build_attempts: 3,
            max_rebuilds_per_graph: 5,
        };
        let err = builder.generate(&level, &mut GameRng::new(9)).unwrap_err();
        assert!(matches!(err, BuildError::AttemptsExhausted { attempts: 3, .. }));
    }

    #[test]
    fn test_connected_doorways_are_consumed() {
        let level = sample_level();
        let builder = DungeonBuilder::new();
        let rooms = builder.generate(&level, &mut GameRng::new(31)).unwrap();

        for room in rooms.values() {
            for doorway in &room.doorways {
                if doorway.is_connected() {
                    assert!(doorway.is_unavailable());
                }
            }
        }
    }
}
