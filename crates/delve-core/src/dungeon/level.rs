//! Level descriptors.
//!
//! A level descriptor bundles the room template library with the list of
//! candidate room node graphs the builder may realize. Descriptors are
//! plain serde data and can be loaded from JSON content files.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::graph::{GraphError, RoomNodeGraph, RoomNodeType};
use super::template::RoomTemplate;
use crate::rng::GameRng;

/// Problems with a level descriptor or its content file
#[derive(Error, Debug)]
pub enum LevelError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("level '{level}' has no candidate room graphs")]
    NoGraphs { level: String },

    #[error("level '{level}' has an empty template library")]
    NoTemplates { level: String },

    #[error("template '{template}' in level '{level}' is malformed")]
    MalformedTemplate { level: String, template: String },

    #[error("duplicate template id '{template}' in level '{level}'")]
    DuplicateTemplate { level: String, template: String },

    #[error("could not read level file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse level JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Template library plus candidate room graphs for one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDescriptor {
    /// Level identifier, used in diagnostics
    pub id: String,

    /// Immutable room template library
    pub templates: Vec<RoomTemplate>,

    /// Candidate topologies; the builder picks one at random per attempt
    pub graphs: Vec<RoomNodeGraph>,
}

impl LevelDescriptor {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            templates: Vec::new(),
            graphs: Vec::new(),
        }
    }

    /// Parse a descriptor from JSON
    pub fn from_json_str(json: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the descriptor to pretty JSON
    pub fn to_json_string(&self) -> Result<String, LevelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read and parse a descriptor from a JSON content file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// All templates matching a room type
    pub fn templates_of_type(&self, room_type: RoomNodeType) -> Vec<&RoomTemplate> {
        self.templates
            .iter()
            .filter(|t| t.room_type == room_type)
            .collect()
    }

    /// A uniformly random template of the given type, if any exists
    pub fn random_template(
        &self,
        room_type: RoomNodeType,
        rng: &mut GameRng,
    ) -> Option<&RoomTemplate> {
        let candidates = self.templates_of_type(room_type);
        rng.choose(&candidates).copied()
    }

    /// Look up a template by id
    pub fn template(&self, id: &str) -> Option<&RoomTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Validate graphs, templates, and graph/template coverage.
    ///
    /// Coverage means every node type a graph uses has at least one
    /// template in the library; a corridor node needs at least one
    /// corridor template of either axis.
    pub fn validate(&self) -> Result<(), LevelError> {
        if self.graphs.is_empty() {
            return Err(LevelError::NoGraphs {
                level: self.id.clone(),
            });
        }
        if self.templates.is_empty() {
            return Err(LevelError::NoTemplates {
                level: self.id.clone(),
            });
        }

        for (i, template) in self.templates.iter().enumerate() {
            if !template.is_well_formed() {
                return Err(LevelError::MalformedTemplate {
                    level: self.id.clone(),
                    template: template.id.clone(),
                });
            }
            if self.templates[..i].iter().any(|t| t.id == template.id) {
                return Err(LevelError::DuplicateTemplate {
                    level: self.id.clone(),
                    template: template.id.clone(),
                });
            }
        }

        for graph in &self.graphs {
            graph.validate()?;

            for node in &graph.nodes {
                let covered = if node.node_type == RoomNodeType::Corridor {
                    !self.templates_of_type(RoomNodeType::CorridorNs).is_empty()
                        || !self.templates_of_type(RoomNodeType::CorridorEw).is_empty()
                } else {
                    !self.templates_of_type(node.node_type).is_empty()
                };
                if !covered {
                    return Err(GraphError::MissingTemplate {
                        room_type: node.node_type,
                    }
                    .into());
                }
            }
        }

        Ok(())
    }
}
