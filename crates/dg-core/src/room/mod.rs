//! Rooms: doorways, templates, the template catalog and placed instances

mod catalog;
mod doorway;
mod kind;
mod placed;
mod template;

pub use catalog::TemplateCatalog;
pub use doorway::{available_doorways, find_opposite, Doorway, Orientation, SealRegion};
pub use kind::{CorridorAxis, RoomKind};
pub use placed::{DoorwayLink, PlacedRoom};
pub use template::{RoomTemplate, TemplateId};
