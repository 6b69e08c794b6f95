//! Doorways
//!
//! A doorway is a connection point on a template's boundary. Templates hold
//! them read-only; a placed room owns its own copies and tracks whether each
//! one got paired with a neighbour.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::geom::GridPos;

/// Which wall a doorway sits in
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Orientation {
    North,
    East,
    South,
    West,
    #[default]
    None,
}

impl Orientation {
    /// The facing a mating doorway must have (north <-> south, east <-> west)
    pub fn opposite(self) -> Orientation {
        match self {
            Orientation::North => Orientation::South,
            Orientation::South => Orientation::North,
            Orientation::East => Orientation::West,
            Orientation::West => Orientation::East,
            Orientation::None => Orientation::None,
        }
    }

    /// Check if a doorway facing `other` can be paired with one facing `self`
    ///
    /// `None` never pairs with anything, including itself.
    pub fn mates_with(self, other: Orientation) -> bool {
        self != Orientation::None && other == self.opposite()
    }

    /// One-tile step applied when placing a room through a doorway with this
    /// facing, so the two doorway tiles end up adjacent rather than stacked
    pub fn placement_offset(self) -> GridPos {
        match self {
            Orientation::North => GridPos::new(0, -1),
            Orientation::East => GridPos::new(-1, 0),
            Orientation::South => GridPos::new(0, 1),
            Orientation::West => GridPos::new(1, 0),
            Orientation::None => GridPos::ZERO,
        }
    }
}

/// Tiles duplicated over an unused doorway to wall it off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SealRegion {
    /// Top-left tile of the region, room-local
    pub start: GridPos,
    pub width: u32,
    pub height: u32,
}

impl SealRegion {
    pub const fn new(start: GridPos, width: u32, height: u32) -> Self {
        Self {
            start,
            width,
            height,
        }
    }
}

/// A connection point on a room's boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doorway {
    /// Position, local to the owning template's bounding box
    pub position: GridPos,
    pub orientation: Orientation,
    #[serde(default)]
    pub seal: SealRegion,
    #[serde(default)]
    connected: bool,
    #[serde(default)]
    unavailable: bool,
}

impl Doorway {
    /// A fresh, unconnected doorway
    pub fn new(position: GridPos, orientation: Orientation) -> Self {
        Self {
            position,
            orientation,
            seal: SealRegion::default(),
            connected: false,
            unavailable: false,
        }
    }

    /// Attach the tile region used to seal this doorway
    pub fn with_seal(mut self, seal: SealRegion) -> Self {
        self.seal = seal;
        self
    }

    /// Copy of this doorway with connection state cleared
    pub fn fresh_copy(&self) -> Doorway {
        Doorway {
            connected: false,
            unavailable: false,
            ..*self
        }
    }

    /// Paired with another room's doorway
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Tried and no longer offered (always true when connected)
    pub fn is_unavailable(&self) -> bool {
        self.unavailable
    }

    /// Still open for a new connection
    pub fn is_available(&self) -> bool {
        !self.connected && !self.unavailable
    }

    pub fn mark_connected(&mut self) {
        self.connected = true;
        self.unavailable = true;
    }

    pub fn mark_unavailable(&mut self) {
        self.unavailable = true;
    }
}

/// Find the first candidate doorway, in authored order, that faces opposite
/// to `parent`
pub fn find_opposite(parent: &Doorway, candidates: &[Doorway]) -> Option<usize> {
    candidates
        .iter()
        .position(|candidate| parent.orientation.mates_with(candidate.orientation))
}

/// Indices of doorways that are neither connected nor ruled out
pub fn available_doorways(doorways: &[Doorway]) -> Vec<usize> {
    doorways
        .iter()
        .enumerate()
        .filter(|(_, d)| d.is_available())
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn door(orientation: Orientation) -> Doorway {
        Doorway::new(GridPos::ZERO, orientation)
    }

    #[test]
    fn test_opposite_is_involution() {
        for o in Orientation::iter() {
            assert_eq!(o.opposite().opposite(), o);
        }
        assert_eq!(Orientation::North.opposite(), Orientation::South);
        assert_eq!(Orientation::East.opposite(), Orientation::West);
    }

    #[test]
    fn test_none_never_mates() {
        for o in Orientation::iter() {
            assert!(!Orientation::None.mates_with(o));
            assert!(!o.mates_with(Orientation::None));
        }
    }

    #[test]
    fn test_east_only_mates_with_west() {
        for o in Orientation::iter() {
            assert_eq!(Orientation::East.mates_with(o), o == Orientation::West);
        }
    }

    #[test]
    fn test_find_opposite_takes_first_in_order() {
        let parent = door(Orientation::East);
        let candidates = [
            door(Orientation::North),
            door(Orientation::West),
            door(Orientation::South),
            door(Orientation::West),
        ];
        assert_eq!(find_opposite(&parent, &candidates), Some(1));
    }

    #[test]
    fn test_find_opposite_none_found() {
        let parent = door(Orientation::North);
        let candidates = [door(Orientation::North), door(Orientation::East)];
        assert_eq!(find_opposite(&parent, &candidates), None);

        let undirected = door(Orientation::None);
        assert_eq!(find_opposite(&undirected, &[door(Orientation::None)]), None);
    }

    #[test]
    fn test_connected_implies_unavailable() {
        let mut d = door(Orientation::South);
        assert!(d.is_available());

        d.mark_connected();
        assert!(d.is_connected());
        assert!(d.is_unavailable());
        assert!(!d.is_available());
    }

    #[test]
    fn test_unavailable_without_connection() {
        let mut d = door(Orientation::West);
        d.mark_unavailable();
        assert!(!d.is_connected());
        assert!(d.is_unavailable());
    }

    #[test]
    fn test_available_doorways() {
        let mut doors = vec![
            door(Orientation::North),
            door(Orientation::East),
            door(Orientation::South),
        ];
        doors[0].mark_connected();
        doors[2].mark_unavailable();
        assert_eq!(available_doorways(&doors), vec![1]);

        doors[1].mark_unavailable();
        assert!(available_doorways(&doors).is_empty());
    }

    #[test]
    fn test_fresh_copy_resets_state() {
        let mut d = door(Orientation::North).with_seal(SealRegion::new(GridPos::new(1, 2), 3, 1));
        d.mark_connected();
        let copy = d.fresh_copy();
        assert!(copy.is_available());
        assert_eq!(copy.seal, d.seal);
        assert_eq!(copy.position, d.position);
    }

    #[test]
    fn test_deserialize_defaults_state() {
        let d: Doorway =
            serde_json::from_str(r#"{"position":{"x":3,"y":0},"orientation":"south"}"#).unwrap();
        assert_eq!(d.orientation, Orientation::South);
        assert!(d.is_available());
        assert_eq!(d.seal, SealRegion::default());
    }
}
