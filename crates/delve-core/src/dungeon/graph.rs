//! Room node graphs.
//!
//! A room node graph is the abstract topology of a level: one entrance,
//! corridors, and content rooms, stored as an arena of nodes indexed by
//! integer id with parent/child relationships as id lists.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};
use thiserror::Error;

/// Index of a node within its graph's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl core::fmt::Display for NodeId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Room node and template type tags
///
/// Graph nodes use `Corridor`; the NS/EW variants tag corridor templates,
/// which are selected by doorway orientation at placement time.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum RoomNodeType {
    #[default]
    None = 0,
    Entrance = 1,
    Corridor = 2,
    CorridorNs = 3,
    CorridorEw = 4,
    Content = 5,
    Boss = 6,
}

impl RoomNodeType {
    /// Check if this is any corridor variant
    pub const fn is_corridor(self) -> bool {
        matches!(
            self,
            RoomNodeType::Corridor | RoomNodeType::CorridorNs | RoomNodeType::CorridorEw
        )
    }
}

/// A single node in a room node graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomNode {
    /// Arena index of this node
    pub id: NodeId,

    /// Type tag constraining template selection
    pub node_type: RoomNodeType,

    /// Parent ids; empty for the entrance, exactly one entry otherwise
    pub parent_ids: Vec<NodeId>,

    /// Child ids
    pub child_ids: Vec<NodeId>,
}

impl RoomNode {
    /// Create a detached node
    pub fn new(id: NodeId, node_type: RoomNodeType) -> Self {
        Self {
            id,
            node_type,
            parent_ids: Vec::new(),
            child_ids: Vec::new(),
        }
    }
}

/// Structural problems in a room node graph or its template library
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("graph '{graph}': node {node} stored at arena index {index}")]
    IdMismatch {
        graph: String,
        node: NodeId,
        index: usize,
    },

    #[error("graph '{graph}' has no entrance node")]
    NoEntrance { graph: String },

    #[error("graph '{graph}' has {count} entrance nodes")]
    MultipleEntrances { graph: String, count: usize },

    #[error("graph '{graph}': node {node} has {count} parents")]
    BadParentCount {
        graph: String,
        node: NodeId,
        count: usize,
    },

    #[error("graph '{graph}': node {node} references unknown node {missing}")]
    UnknownNode {
        graph: String,
        node: NodeId,
        missing: NodeId,
    },

    #[error("graph '{graph}': parent/child links for node {node} disagree")]
    InconsistentLinks { graph: String, node: NodeId },

    #[error("graph '{graph}': node {node} is not reachable from the entrance")]
    Unreachable { graph: String, node: NodeId },

    #[error("no template in library for room type {room_type}")]
    MissingTemplate { room_type: RoomNodeType },
}

/// A level's room topology: an arena of nodes forming a tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomNodeGraph {
    /// Graph identifier, used in diagnostics
    pub id: String,

    /// Node arena; a node's id equals its index
    pub nodes: Vec<RoomNode>,
}

impl RoomNodeGraph {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            nodes: Vec::new(),
        }
    }

    /// Append a node of the given type and return its id
    pub fn add_node(&mut self, node_type: RoomNodeType) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(RoomNode::new(id, node_type));
        id
    }

    /// Link parent to child on both sides
    pub fn add_edge(&mut self, parent: NodeId, child: NodeId) {
        if let Some(node) = self.nodes.get_mut(parent.index()) {
            node.child_ids.push(child);
        }
        if let Some(node) = self.nodes.get_mut(child.index()) {
            node.parent_ids.push(parent);
        }
    }

    /// Look up a node by id
    pub fn node(&self, id: NodeId) -> Option<&RoomNode> {
        self.nodes.get(id.index())
    }

    /// The unique entrance node, if the graph has exactly one
    pub fn entrance(&self) -> Option<&RoomNode> {
        let mut found = None;
        for node in &self.nodes {
            if node.node_type == RoomNodeType::Entrance {
                if found.is_some() {
                    return None;
                }
                found = Some(node);
            }
        }
        found
    }

    /// Validate arena ids, entrance uniqueness, tree shape, link
    /// consistency, and reachability from the entrance.
    pub fn validate(&self) -> Result<(), GraphError> {
        for (index, node) in self.nodes.iter().enumerate() {
            if node.id.index() != index {
                return Err(GraphError::IdMismatch {
                    graph: self.id.clone(),
                    node: node.id,
                    index,
                });
            }
        }

        let entrance_count = self
            .nodes
            .iter()
            .filter(|n| n.node_type == RoomNodeType::Entrance)
            .count();
        if entrance_count == 0 {
            return Err(GraphError::NoEntrance {
                graph: self.id.clone(),
            });
        }
        if entrance_count > 1 {
            return Err(GraphError::MultipleEntrances {
                graph: self.id.clone(),
                count: entrance_count,
            });
        }

        for node in &self.nodes {
            let expected_parents = if node.node_type == RoomNodeType::Entrance {
                0
            } else {
                1
            };
            if node.parent_ids.len() != expected_parents {
                return Err(GraphError::BadParentCount {
                    graph: self.id.clone(),
                    node: node.id,
                    count: node.parent_ids.len(),
                });
            }

            for &other in node.parent_ids.iter().chain(node.child_ids.iter()) {
                if self.node(other).is_none() {
                    return Err(GraphError::UnknownNode {
                        graph: self.id.clone(),
                        node: node.id,
                        missing: other,
                    });
                }
            }

            for &parent in &node.parent_ids {
                let linked_back = self
                    .node(parent)
                    .is_some_and(|p| p.child_ids.contains(&node.id));
                if !linked_back {
                    return Err(GraphError::InconsistentLinks {
                        graph: self.id.clone(),
                        node: node.id,
                    });
                }
            }
            for &child in &node.child_ids {
                let linked_back = self
                    .node(child)
                    .is_some_and(|c| c.parent_ids.contains(&node.id));
                if !linked_back {
                    return Err(GraphError::InconsistentLinks {
                        graph: self.id.clone(),
                        node: node.id,
                    });
                }
            }
        }

        // Tree shape plus one parent each means reachability is enough
        // to rule out cycles disconnected from the entrance.
        let Some(entrance) = self.entrance() else {
            return Err(GraphError::NoEntrance {
                graph: self.id.clone(),
            });
        };
        let mut reached = vec![false; self.nodes.len()];
        let mut stack = vec![entrance.id];
        while let Some(id) = stack.pop() {
            if reached[id.index()] {
                continue;
            }
            reached[id.index()] = true;
            if let Some(node) = self.node(id) {
                stack.extend(node.child_ids.iter().copied());
            }
        }
        for node in &self.nodes {
            if !reached[node.id.index()] {
                return Err(GraphError::Unreachable {
                    graph: self.id.clone(),
                    node: node.id,
                });
            }
        }

        Ok(())
    }
}
