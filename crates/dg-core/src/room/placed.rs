//! Placed rooms
//!
//! A `PlacedRoom` is the runtime instance of a template at a world position.
//! It is built speculatively for every placement candidate and only kept when
//! the candidate fits.

use serde::{Deserialize, Serialize};

use super::{Doorway, RoomKind, RoomTemplate, TemplateId};
use crate::geom::{GridPos, GridRect};
use crate::layout::{LayoutNode, RoomId};

/// Which doorways joined a room to its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorwayLink {
    /// Index into the parent's doorways
    pub parent_doorway: usize,
    /// Index into this room's doorways
    pub doorway: usize,
}

/// A room instance in world space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedRoom {
    pub id: RoomId,
    pub template_id: TemplateId,
    pub kind: RoomKind,
    pub parent_id: Option<RoomId>,
    pub child_ids: Vec<RoomId>,
    doorways: Vec<Doorway>,
    /// Spawn points, template space
    pub spawn_points: Vec<GridPos>,
    pub template_bounds: GridRect,
    /// World-space bounds; equal to `template_bounds` until positioned
    pub bounds: GridRect,
    is_positioned: bool,
    is_previously_visited: bool,
    entry: Option<DoorwayLink>,
}

impl PlacedRoom {
    /// Instantiate `template` for `node`
    ///
    /// The doorways are copied with their state cleared, so nothing done to
    /// this room can reach the template.
    pub fn from_template(template: &RoomTemplate, node: &LayoutNode) -> Self {
        let parent_id = node.parent_id().cloned();
        Self {
            id: node.id.clone(),
            template_id: template.id.clone(),
            kind: template.kind.clone(),
            is_previously_visited: parent_id.is_none(),
            parent_id,
            child_ids: node.child_ids.clone(),
            doorways: template.instantiate_doorways(),
            spawn_points: template.spawn_points.clone(),
            template_bounds: template.bounds,
            bounds: template.bounds,
            is_positioned: false,
            entry: None,
        }
    }

    pub fn doorways(&self) -> &[Doorway] {
        &self.doorways
    }

    pub(crate) fn doorways_mut(&mut self) -> &mut [Doorway] {
        &mut self.doorways
    }

    /// Move the room so its lower corner sits at `lower`
    pub(crate) fn set_world_lower(&mut self, lower: GridPos) {
        self.bounds = self.template_bounds.moved_to(lower);
    }

    pub(crate) fn mark_positioned(&mut self, entry: Option<DoorwayLink>) {
        self.is_positioned = true;
        self.entry = entry;
    }

    /// Bounds are final and the room is part of the layout
    pub fn is_positioned(&self) -> bool {
        self.is_positioned
    }

    /// True for the entrance: the player starts there
    pub fn is_previously_visited(&self) -> bool {
        self.is_previously_visited
    }

    /// The doorway pair used to attach this room, `None` for the entrance
    pub fn entry(&self) -> Option<DoorwayLink> {
        self.entry
    }

    /// Where the template's origin lands in the world
    pub fn world_position(&self) -> GridPos {
        self.bounds.lower - self.template_bounds.lower
    }

    /// World position of doorway `index`
    pub fn doorway_world_position(&self, index: usize) -> Option<GridPos> {
        self.doorways
            .get(index)
            .map(|d| self.bounds.lower + d.position - self.template_bounds.lower)
    }

    pub fn world_spawn_points(&self) -> impl Iterator<Item = GridPos> + '_ {
        let offset = self.world_position();
        self.spawn_points.iter().map(move |&p| p + offset)
    }

    /// Doorways left unpaired; these get sealed
    pub fn unconnected_doorways(&self) -> impl Iterator<Item = (usize, &Doorway)> {
        self.doorways.iter().enumerate().filter(|(_, d)| !d.is_connected())
    }

    /// Indices of doorways still offered for a new connection
    pub fn available_doorways(&self) -> Vec<usize> {
        super::available_doorways(&self.doorways)
    }
}
