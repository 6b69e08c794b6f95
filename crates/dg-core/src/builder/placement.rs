//! Placement geometry
//!
//! Where a candidate room goes when it is attached through a doorway, and
//! whether it collides with rooms already in the layout.

use crate::geom::{GridPos, GridRect};
use crate::layout::RoomId;
use crate::room::{Doorway, PlacedRoom};

/// Lower corner of a candidate room, in world space
///
/// The candidate's doorway lands one tile past the parent doorway, on the
/// side the candidate doorway faces away from.
pub fn candidate_lower(
    parent_doorway_world: GridPos,
    candidate_doorway: &Doorway,
    candidate_template_lower: GridPos,
) -> GridPos {
    let adjusted = parent_doorway_world + candidate_doorway.orientation.placement_offset();
    adjusted + (candidate_template_lower - candidate_doorway.position)
}

/// First positioned room, other than `id`, whose bounds intersect `bounds`
pub fn first_overlap<'a>(
    bounds: &GridRect,
    id: &RoomId,
    rooms: &'a [PlacedRoom],
) -> Option<&'a PlacedRoom> {
    rooms
        .iter()
        .filter(|room| room.is_positioned() && &room.id != id)
        .find(|room| room.bounds.intersects(bounds))
}
