//! Level descriptors
//!
//! A level bundles the room templates it may use with the layout graphs the
//! builder picks from. Descriptors are authored as JSON.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::BuildSettings;
use crate::error::{GraphError, LevelError};
use crate::layout::{LayoutGraph, RoomId};
use crate::room::{CorridorAxis, RoomKind, RoomTemplate, TemplateId};

/// Templates and layout graphs for one dungeon level
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DungeonLevel {
    pub name: String,
    #[serde(default)]
    pub templates: Vec<RoomTemplate>,
    #[serde(default)]
    pub graphs: Vec<LayoutGraph>,
}

/// An authoring problem that does not stop the level from loading
#[derive(Debug, Clone, PartialEq)]
pub enum LevelIssue {
    EmptyName,
    NoTemplates,
    NoGraphs,
    /// No template for this kind; graphs needing it can never be built
    MissingTemplateKind(RoomKind),
    /// A graph node whose kind no template provides
    NodeWithoutTemplate { graph: String, node: RoomId, kind: RoomKind },
    /// A template with no doorways can only ever be the whole level
    TemplateWithoutDoorways(TemplateId),
    GraphWithoutEntrance(String),
    UnreachableNode { graph: String, node: RoomId },
    /// A graph that breaks a rule the current settings impose
    GraphRule { graph: String, error: GraphError },
}

impl fmt::Display for LevelIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelIssue::EmptyName => write!(f, "level has no name"),
            LevelIssue::NoTemplates => write!(f, "level has no room templates"),
            LevelIssue::NoGraphs => write!(f, "level has no layout graphs"),
            LevelIssue::MissingTemplateKind(kind) => write!(f, "no {} template", kind),
            LevelIssue::NodeWithoutTemplate { graph, node, kind } => {
                write!(f, "graph '{}': node {} needs a {} template", graph, node, kind)
            }
            LevelIssue::TemplateWithoutDoorways(id) => write!(f, "template {} has no doorways", id),
            LevelIssue::GraphWithoutEntrance(graph) => write!(f, "graph '{}' has no entrance", graph),
            LevelIssue::UnreachableNode { graph, node } => {
                write!(f, "graph '{}': node {} is not reachable from the entrance", graph, node)
            }
            LevelIssue::GraphRule { graph, error } => write!(f, "graph '{}': {}", graph, error),
        }
    }
}

impl DungeonLevel {
    /// Parse a level and check that every graph is well formed
    pub fn from_json_str(json: &str) -> Result<Self, LevelError> {
        let level: DungeonLevel = serde_json::from_str(json)?;
        level.check_graph_structure()?;
        Ok(level)
    }

    /// Load a level from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, LevelError> {
        let contents = std::fs::read_to_string(path)?;
        let level = Self::from_json_str(&contents)?;
        for issue in level.validate(&BuildSettings::default()) {
            log::warn!("level '{}': {}", level.name, issue);
        }
        Ok(level)
    }

    /// Graph shape rules that hold whatever the settings. The corridor
    /// limit is a setting, so it is only reported by [`DungeonLevel::validate`].
    fn check_graph_structure(&self) -> Result<(), LevelError> {
        for graph in &self.graphs {
            graph
                .validate(usize::MAX)
                .map_err(|source| LevelError::InvalidGraph {
                    graph: graph.name().to_string(),
                    source,
                })?;
        }
        Ok(())
    }

    /// Collect authoring problems
    pub fn validate(&self, settings: &BuildSettings) -> Vec<LevelIssue> {
        let mut issues = Vec::new();

        if self.name.trim().is_empty() {
            issues.push(LevelIssue::EmptyName);
        }
        if self.templates.is_empty() {
            issues.push(LevelIssue::NoTemplates);
        }
        if self.graphs.is_empty() {
            issues.push(LevelIssue::NoGraphs);
        }
        if self.templates.is_empty() || self.graphs.is_empty() {
            return issues;
        }

        let required = [
            RoomKind::Corridor(Some(CorridorAxis::EastWest)),
            RoomKind::Corridor(Some(CorridorAxis::NorthSouth)),
            RoomKind::Entrance,
        ];
        for kind in required {
            if !self.templates.iter().any(|t| t.kind == kind) {
                issues.push(LevelIssue::MissingTemplateKind(kind));
            }
        }

        for template in &self.templates {
            if template.doorways().is_empty() {
                issues.push(LevelIssue::TemplateWithoutDoorways(template.id.clone()));
            }
        }

        for graph in &self.graphs {
            let name = graph.name().to_string();
            if let Err(error) = graph.validate(settings.max_child_corridors) {
                issues.push(LevelIssue::GraphRule {
                    graph: name.clone(),
                    error,
                });
            }
            if graph.entrance().is_none() {
                issues.push(LevelIssue::GraphWithoutEntrance(name.clone()));
            } else {
                for node in graph.unreachable_nodes() {
                    issues.push(LevelIssue::UnreachableNode {
                        graph: name.clone(),
                        node: node.clone(),
                    });
                }
            }

            for node in graph.nodes() {
                // entrance and corridors are covered by the required kinds above
                if node.kind.is_entrance() || node.kind.is_corridor() || node.kind.is_unset() {
                    continue;
                }
                if !self.templates.iter().any(|t| t.kind == node.kind) {
                    issues.push(LevelIssue::NodeWithoutTemplate {
                        graph: name.clone(),
                        node: node.id.clone(),
                        kind: node.kind.clone(),
                    });
                }
            }
        }

        issues
    }
}
