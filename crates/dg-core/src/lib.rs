//! dg-core: graph-driven room-template dungeon layout
//!
//! Assembles a 2D level from a layout graph (which rooms exist and how they
//! hang together) and a catalog of fixed-shape room templates. Every node is
//! given a template whose doorways line up with its parent's, placed so the
//! two doorways touch, and rejected if it would overlap another room. Failed
//! builds are retried with fresh random choices.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`room`] | doorways, templates, the template catalog, placed rooms |
//! | [`layout`] | layout graphs and their connection rules |
//! | [`level`] | level descriptors (templates + graphs) |
//! | [`builder`] | the placement search |
//! | [`dungeon`] | finished layouts |
//! | [`instantiate`] | committing rooms and sealing unused doorways |
//!
//! The crate does no terminal I/O and installs no logger; it logs through
//! the `log` facade.

pub mod builder;
pub mod config;
pub mod dungeon;
pub mod error;
pub mod geom;
pub mod instantiate;
pub mod layout;
pub mod level;
pub mod rng;
pub mod room;

pub use builder::{AttemptOutcome, DungeonBuilder, PlacementOutcome};
pub use config::BuildSettings;
pub use dungeon::{Connection, DungeonLayout};
pub use error::{ConnectionRule, GenerationError, GraphError, LevelError, SettingsError};
pub use geom::{GridPos, GridRect};
pub use instantiate::{NoopInstantiator, RoomInstance, RoomInstantiator, Seal, SealDirection};
pub use layout::{LayoutGraph, LayoutNode, RoomId};
pub use level::{DungeonLevel, LevelIssue};
pub use rng::LevelRng;
pub use room::{
    CorridorAxis, Doorway, Orientation, PlacedRoom, RoomKind, RoomTemplate, SealRegion,
    TemplateCatalog, TemplateId,
};

/// The demo level bundled with the crate
pub const DEMO_LEVEL_JSON: &str = include_str!("../assets/demo_level.json");
