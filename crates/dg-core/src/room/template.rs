//! Room templates
//!
//! Fixed-geometry room definitions authored ahead of time. A template is never
//! mutated by the builder; placing one copies its doorways into a
//! [`PlacedRoom`](super::PlacedRoom).

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Doorway, RoomKind};
use crate::geom::{GridPos, GridRect};

/// Identifier of a room template
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(pub String);

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TemplateId {
    fn from(s: &str) -> Self {
        TemplateId(s.to_string())
    }
}

impl From<String> for TemplateId {
    fn from(s: String) -> Self {
        TemplateId(s)
    }
}

/// A catalog entry: bounding box, doorways and spawn points for one room shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomTemplate {
    pub id: TemplateId,
    pub kind: RoomKind,
    /// Bounding box in template space
    pub bounds: GridRect,
    doorways: Vec<Doorway>,
    #[serde(default)]
    pub spawn_points: Vec<GridPos>,
}

impl RoomTemplate {
    /// Create a template with no doorways
    pub fn new(id: impl Into<TemplateId>, kind: RoomKind, lower: GridPos, upper: GridPos) -> Self {
        Self {
            id: id.into(),
            kind,
            bounds: GridRect::new(lower, upper),
            doorways: Vec::new(),
            spawn_points: Vec::new(),
        }
    }

    pub fn with_doorway(mut self, doorway: Doorway) -> Self {
        self.doorways.push(doorway.fresh_copy());
        self
    }

    pub fn with_spawn_point(mut self, pos: GridPos) -> Self {
        self.spawn_points.push(pos);
        self
    }

    /// Doorways in authored order
    pub fn doorways(&self) -> &[Doorway] {
        &self.doorways
    }

    /// Independent copies of the doorways, ready for a placed room
    pub fn instantiate_doorways(&self) -> Vec<Doorway> {
        self.doorways.iter().map(Doorway::fresh_copy).collect()
    }
}
