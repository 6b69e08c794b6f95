//! Layout graph nodes

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::room::RoomKind;

/// Identifier of a layout node, and of the room placed for it
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub String);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomId {
    fn from(s: &str) -> Self {
        RoomId(s.to_string())
    }
}

impl From<String> for RoomId {
    fn from(s: String) -> Self {
        RoomId(s)
    }
}

/// One room slot in a layout graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutNode {
    pub id: RoomId,
    pub kind: RoomKind,
    /// At most one element
    #[serde(default)]
    pub parent_ids: Vec<RoomId>,
    #[serde(default)]
    pub child_ids: Vec<RoomId>,
}

impl LayoutNode {
    /// A node with no links
    pub fn new(id: impl Into<RoomId>, kind: RoomKind) -> Self {
        Self {
            id: id.into(),
            kind,
            parent_ids: Vec::new(),
            child_ids: Vec::new(),
        }
    }

    /// The node's parent, if it has one
    pub fn parent_id(&self) -> Option<&RoomId> {
        self.parent_ids.first()
    }

    pub fn has_child(&self, id: &RoomId) -> bool {
        self.child_ids.contains(id)
    }
}
