//! Committing a finished layout
//!
//! Once a build succeeds every placed room is handed to a
//! [`RoomInstantiator`], in placement order, together with a
//! [`RoomInstance`]: where to put the room and which doorways to wall off.
//! The engine never touches tiles itself; a renderer applies the seal plan.

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::geom::GridPos;
use crate::room::{Orientation, PlacedRoom, SealRegion};

/// How a seal region is copied over a doorway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SealDirection {
    /// North and south doorways: tiles shift one step along x
    Horizontal,
    /// East and west doorways: tiles shift one step down y
    Vertical,
}

impl SealDirection {
    pub fn for_orientation(orientation: Orientation) -> Option<SealDirection> {
        match orientation {
            Orientation::North | Orientation::South => Some(SealDirection::Horizontal),
            Orientation::East | Orientation::West => Some(SealDirection::Vertical),
            Orientation::None => None,
        }
    }
}

/// Walls off one unconnected doorway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seal {
    /// Index into the room's doorways
    pub doorway: usize,
    pub direction: SealDirection,
    pub region: SealRegion,
}

impl Seal {
    /// `(source, destination)` tile pairs, room-local, in the order they must
    /// be applied. Later copies may read tiles written by earlier ones.
    pub fn tile_copies(&self) -> Vec<(GridPos, GridPos)> {
        let start = self.region.start;
        let (width, height) = (self.region.width as i32, self.region.height as i32);
        let mut copies = Vec::with_capacity((width * height).max(0) as usize);

        match self.direction {
            SealDirection::Horizontal => {
                for x in 0..width {
                    for y in 0..height {
                        let src = GridPos::new(start.x + x, start.y - y);
                        copies.push((src, GridPos::new(src.x + 1, src.y)));
                    }
                }
            }
            SealDirection::Vertical => {
                for y in 0..height {
                    for x in 0..width {
                        let src = GridPos::new(start.x + x, start.y - y);
                        copies.push((src, GridPos::new(src.x, src.y - 1)));
                    }
                }
            }
        }
        copies
    }
}

/// Everything a renderer needs to materialize one placed room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomInstance {
    /// World position of the template origin
    pub world_position: GridPos,
    pub seals: Vec<Seal>,
}

impl RoomInstance {
    /// Plan the instantiation of `room`: one seal per unconnected doorway
    /// that has a facing
    pub fn for_room(room: &PlacedRoom) -> Self {
        let seals = room
            .unconnected_doorways()
            .filter_map(|(doorway, d)| {
                SealDirection::for_orientation(d.orientation).map(|direction| Seal {
                    doorway,
                    direction,
                    region: d.seal,
                })
            })
            .collect();
        Self {
            world_position: room.world_position(),
            seals,
        }
    }
}

/// Receives the rooms of a successful build
pub trait RoomInstantiator {
    fn instantiate(&mut self, room: &PlacedRoom, plan: &RoomInstance);
}

/// Discards every room
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopInstantiator;

impl RoomInstantiator for NoopInstantiator {
    fn instantiate(&mut self, _room: &PlacedRoom, _plan: &RoomInstance) {}
}

impl<F> RoomInstantiator for F
where
    F: FnMut(&PlacedRoom, &RoomInstance),
{
    fn instantiate(&mut self, room: &PlacedRoom, plan: &RoomInstance) {
        self(room, plan)
    }
}
