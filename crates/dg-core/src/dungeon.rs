//! Finished layouts

use serde::{Deserialize, Serialize};

use crate::geom::{GridPos, GridRect};
use crate::instantiate::RoomInstance;
use crate::layout::RoomId;
use crate::room::PlacedRoom;

/// A successful build: every room of one layout graph, in placement order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DungeonLayout {
    pub level_name: String,
    pub graph_name: String,
    /// Seed the builder's RNG was created with
    pub seed: u64,
    pub rooms: Vec<PlacedRoom>,
}

/// A doorway pair joining a room to its parent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub parent: RoomId,
    pub child: RoomId,
    /// World position of the parent's doorway
    pub parent_doorway: GridPos,
    /// World position of the child's doorway
    pub child_doorway: GridPos,
}

impl DungeonLayout {
    pub fn room(&self, id: &RoomId) -> Option<&PlacedRoom> {
        self.rooms.iter().find(|r| &r.id == id)
    }

    /// The room the player starts in
    pub fn entrance(&self) -> Option<&PlacedRoom> {
        self.rooms.iter().find(|r| r.parent_id.is_none())
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Smallest box containing every room
    pub fn bounds(&self) -> Option<GridRect> {
        self.rooms.iter().map(|r| r.bounds).reduce(|a, b| a.union(&b))
    }

    /// Every parent/child doorway pair, in placement order of the child
    pub fn connections(&self) -> Vec<Connection> {
        self.rooms
            .iter()
            .filter_map(|child| {
                let link = child.entry()?;
                let parent = self.room(child.parent_id.as_ref()?)?;
                Some(Connection {
                    parent: parent.id.clone(),
                    child: child.id.clone(),
                    parent_doorway: parent.doorway_world_position(link.parent_doorway)?,
                    child_doorway: child.doorway_world_position(link.doorway)?,
                })
            })
            .collect()
    }

    /// Instantiation plans, in placement order
    pub fn instances(&self) -> impl Iterator<Item = (&PlacedRoom, RoomInstance)> {
        self.rooms.iter().map(|r| (r, RoomInstance::for_room(r)))
    }
}
