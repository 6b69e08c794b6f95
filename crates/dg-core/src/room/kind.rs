//! Room types
//!
//! Every layout node and every template carries a `RoomKind`. Graph nodes use
//! `Corridor(None)`: the corridor's axis is only decided at placement time,
//! from the parent doorway it hangs off. Corridor templates always carry an
//! axis.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::Orientation;

/// Direction a corridor template runs in
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum CorridorAxis {
    /// Joins a north doorway to a south doorway
    #[strum(serialize = "north-south")]
    NorthSouth,
    /// Joins an east doorway to a west doorway
    #[strum(serialize = "east-west")]
    EastWest,
}

impl CorridorAxis {
    /// Axis a corridor must follow to leave a parent through this doorway
    pub fn for_orientation(orientation: Orientation) -> Option<CorridorAxis> {
        match orientation {
            Orientation::North | Orientation::South => Some(CorridorAxis::NorthSouth),
            Orientation::East | Orientation::West => Some(CorridorAxis::EastWest),
            Orientation::None => None,
        }
    }
}

/// The type tag of a node or template
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomKind {
    /// Not yet chosen; never placeable
    #[default]
    Unset,
    /// The single root of a layout graph
    Entrance,
    /// Connector between two rooms
    Corridor(Option<CorridorAxis>),
    /// Boss room (at most one connected per graph)
    Boss,
    /// Any other named room type ("small_room", "chest_room", ...)
    Standard(String),
}

impl RoomKind {
    /// Shorthand for a named standard room
    pub fn standard(name: impl Into<String>) -> Self {
        RoomKind::Standard(name.into())
    }

    pub fn is_corridor(&self) -> bool {
        matches!(self, RoomKind::Corridor(_))
    }

    pub fn is_entrance(&self) -> bool {
        matches!(self, RoomKind::Entrance)
    }

    pub fn is_boss(&self) -> bool {
        matches!(self, RoomKind::Boss)
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, RoomKind::Unset)
    }
}

impl fmt::Display for RoomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomKind::Unset => write!(f, "unset"),
            RoomKind::Entrance => write!(f, "entrance"),
            RoomKind::Corridor(None) => write!(f, "corridor"),
            RoomKind::Corridor(Some(axis)) => write!(f, "{} corridor", axis),
            RoomKind::Boss => write!(f, "boss room"),
            RoomKind::Standard(name) => write!(f, "{}", name),
        }
    }
}
