//! Layout graphs
//!
//! An abstract tree of room slots: one entrance at the root, and edges that
//! always alternate between corridors and non-corridor rooms. The graph says
//! nothing about geometry; the builder turns it into placed rooms.

use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};

use super::{LayoutNode, RoomId};
use crate::error::{ConnectionRule, GraphError};
use crate::room::RoomKind;

/// Serialized form of a graph; the id index is rebuilt on load
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LayoutGraphData {
    #[serde(default)]
    name: String,
    nodes: Vec<LayoutNode>,
}

/// Room nodes and their parent/child links
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "LayoutGraphData", into = "LayoutGraphData")]
pub struct LayoutGraph {
    name: String,
    nodes: Vec<LayoutNode>,
    index: HashMap<RoomId, usize>,
}

impl TryFrom<LayoutGraphData> for LayoutGraph {
    type Error = GraphError;

    fn try_from(data: LayoutGraphData) -> Result<Self, Self::Error> {
        LayoutGraph::from_nodes(data.name, data.nodes)
    }
}

impl From<LayoutGraph> for LayoutGraphData {
    fn from(graph: LayoutGraph) -> Self {
        LayoutGraphData {
            name: graph.name,
            nodes: graph.nodes,
        }
    }
}

impl LayoutGraph {
    /// An empty graph
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Wrap already-linked nodes. Only id uniqueness is checked here; call
    /// [`LayoutGraph::validate`] for the structural rules.
    pub fn from_nodes(name: impl Into<String>, nodes: Vec<LayoutNode>) -> Result<Self, GraphError> {
        let mut index = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if index.insert(node.id.clone(), i).is_some() {
                return Err(GraphError::DuplicateNode(node.id.clone()));
            }
        }
        Ok(Self {
            name: name.into(),
            nodes,
            index,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nodes(&self) -> &[LayoutNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look a node up by id
    pub fn node(&self, id: &RoomId) -> Option<&LayoutNode> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    /// First node whose kind satisfies `pred`
    pub fn find_node(&self, pred: impl Fn(&RoomKind) -> bool) -> Option<&LayoutNode> {
        self.nodes.iter().find(|n| pred(&n.kind))
    }

    /// The root node
    pub fn entrance(&self) -> Option<&LayoutNode> {
        self.find_node(RoomKind::is_entrance)
    }

    /// Children of `node`, in authored order. Ids with no node are skipped.
    pub fn children<'a>(&'a self, node: &'a LayoutNode) -> impl Iterator<Item = &'a LayoutNode> + 'a {
        node.child_ids.iter().filter_map(|id| self.node(id))
    }

    /// Parent of `node`
    pub fn parent(&self, node: &LayoutNode) -> Option<&LayoutNode> {
        node.parent_id().and_then(|id| self.node(id))
    }

    /// Add an unlinked node
    pub fn add_node(&mut self, id: impl Into<RoomId>, kind: RoomKind) -> Result<&LayoutNode, GraphError> {
        let id = id.into();
        if self.index.contains_key(&id) {
            return Err(GraphError::DuplicateNode(id));
        }
        if kind.is_entrance() && self.entrance().is_some() {
            return Err(GraphError::MultipleEntrances);
        }
        let idx = self.nodes.len();
        self.index.insert(id.clone(), idx);
        self.nodes.push(LayoutNode::new(id, kind));
        Ok(&self.nodes[idx])
    }

    /// Link `child` under `parent`, enforcing the connection rules
    pub fn connect(
        &mut self,
        parent: &RoomId,
        child: &RoomId,
        max_child_corridors: usize,
    ) -> Result<(), GraphError> {
        let parent_idx = self.index_of(parent)?;
        let child_idx = self.index_of(child)?;

        self.check_connection(&self.nodes[parent_idx], &self.nodes[child_idx], max_child_corridors)
            .map_err(|rule| GraphError::InvalidConnection {
                parent: parent.clone(),
                child: child.clone(),
                rule,
            })?;

        self.nodes[parent_idx].child_ids.push(child.clone());
        self.nodes[child_idx].parent_ids.push(parent.clone());
        Ok(())
    }

    /// Remove the link between `parent` and `child`. Returns false if there
    /// was none.
    pub fn disconnect(&mut self, parent: &RoomId, child: &RoomId) -> bool {
        let (Some(&parent_idx), Some(&child_idx)) = (self.index.get(parent), self.index.get(child))
        else {
            return false;
        };
        let had_child = remove_id(&mut self.nodes[parent_idx].child_ids, child);
        let had_parent = remove_id(&mut self.nodes[child_idx].parent_ids, parent);
        had_child || had_parent
    }

    /// Delete a node and every link that mentions it
    pub fn remove_node(&mut self, id: &RoomId) -> Option<LayoutNode> {
        let idx = self.index.remove(id)?;
        let removed = self.nodes.remove(idx);
        for node in &mut self.nodes {
            remove_id(&mut node.child_ids, id);
            remove_id(&mut node.parent_ids, id);
        }
        self.index = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.clone(), i))
            .collect();
        Some(removed)
    }

    /// Check every existing link against the connection rules
    ///
    /// A graph without an entrance is structurally valid; it simply can never
    /// be built.
    pub fn validate(&self, max_child_corridors: usize) -> Result<(), GraphError> {
        if self.nodes.iter().filter(|n| n.kind.is_entrance()).count() > 1 {
            return Err(GraphError::MultipleEntrances);
        }

        let mut connected_bosses = 0;
        for node in &self.nodes {
            if node.parent_ids.len() > 1 {
                return Err(GraphError::MultipleParents(node.id.clone()));
            }
            if let Some(parent_id) = node.parent_id() {
                let parent = self.node(parent_id).ok_or_else(|| GraphError::UnknownNode(parent_id.clone()))?;
                if !parent.has_child(&node.id) {
                    return Err(GraphError::AsymmetricLink {
                        parent: parent_id.clone(),
                        child: node.id.clone(),
                    });
                }
                if node.kind.is_boss() {
                    connected_bosses += 1;
                }
            }

            let invalid = |child: &RoomId, rule| GraphError::InvalidConnection {
                parent: node.id.clone(),
                child: child.clone(),
                rule,
            };

            if node.kind.is_corridor() && node.child_ids.len() > 1 {
                return Err(invalid(&node.child_ids[1], ConnectionRule::CorridorAlreadyLeads));
            }
            if !node.kind.is_corridor() && node.child_ids.len() > max_child_corridors {
                return Err(invalid(
                    &node.child_ids[max_child_corridors],
                    ConnectionRule::TooManyCorridors,
                ));
            }

            for child_id in &node.child_ids {
                let child = self.node(child_id).ok_or_else(|| GraphError::UnknownNode(child_id.clone()))?;
                if child.parent_id() != Some(&node.id) {
                    return Err(GraphError::AsymmetricLink {
                        parent: node.id.clone(),
                        child: child_id.clone(),
                    });
                }
                if let Some(rule) = edge_kind_rule(&node.kind, &child.kind) {
                    return Err(invalid(child_id, rule));
                }
            }
        }

        if connected_bosses > 1 {
            let second = self
                .nodes
                .iter()
                .filter(|n| n.kind.is_boss() && n.parent_id().is_some())
                .nth(1)
                .map(|n| (n.parent_ids[0].clone(), n.id.clone()));
            if let Some((parent, child)) = second {
                return Err(GraphError::InvalidConnection {
                    parent,
                    child,
                    rule: ConnectionRule::SecondBossRoom,
                });
            }
        }
        Ok(())
    }

    /// Nodes a breadth-first walk from the entrance never reaches
    pub fn unreachable_nodes(&self) -> Vec<&RoomId> {
        let mut seen: HashSet<&RoomId> = HashSet::new();
        let mut stack: Vec<&LayoutNode> = self.entrance().into_iter().collect();
        while let Some(node) = stack.pop() {
            if seen.insert(&node.id) {
                stack.extend(self.children(node));
            }
        }
        self.nodes
            .iter()
            .map(|n| &n.id)
            .filter(|id| !seen.contains(id))
            .collect()
    }

    fn index_of(&self, id: &RoomId) -> Result<usize, GraphError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| GraphError::UnknownNode(id.clone()))
    }

    fn check_connection(
        &self,
        parent: &LayoutNode,
        child: &LayoutNode,
        max_child_corridors: usize,
    ) -> Result<(), ConnectionRule> {
        let boss_connected = self
            .nodes
            .iter()
            .any(|n| n.kind.is_boss() && !n.parent_ids.is_empty());
        if child.kind.is_boss() && boss_connected {
            return Err(ConnectionRule::SecondBossRoom);
        }
        if child.kind.is_unset() {
            return Err(ConnectionRule::UnsetChild);
        }
        if parent.id == child.id {
            return Err(ConnectionRule::SelfLink);
        }
        if !child.parent_ids.is_empty() {
            return Err(ConnectionRule::ChildHasParent);
        }
        if child.kind.is_corridor() && parent.kind.is_corridor() {
            return Err(ConnectionRule::CorridorToCorridor);
        }
        if !child.kind.is_corridor() && !parent.kind.is_corridor() {
            return Err(ConnectionRule::RoomToRoom);
        }
        if child.kind.is_corridor() && parent.child_ids.len() >= max_child_corridors {
            return Err(ConnectionRule::TooManyCorridors);
        }
        if child.kind.is_entrance() {
            return Err(ConnectionRule::EntranceAsChild);
        }
        if !child.kind.is_corridor() && !parent.child_ids.is_empty() {
            return Err(ConnectionRule::CorridorAlreadyLeads);
        }
        Ok(())
    }
}

/// Rules that depend only on the kinds at either end of an edge
fn edge_kind_rule(parent: &RoomKind, child: &RoomKind) -> Option<ConnectionRule> {
    if child.is_unset() {
        Some(ConnectionRule::UnsetChild)
    } else if child.is_entrance() {
        Some(ConnectionRule::EntranceAsChild)
    } else if parent.is_corridor() && child.is_corridor() {
        Some(ConnectionRule::CorridorToCorridor)
    } else if !parent.is_corridor() && !child.is_corridor() {
        Some(ConnectionRule::RoomToRoom)
    } else {
        None
    }
}

fn remove_id(ids: &mut Vec<RoomId>, id: &RoomId) -> bool {
    let before = ids.len();
    ids.retain(|x| x != id);
    ids.len() != before
}
