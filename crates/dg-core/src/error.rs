//! Error types
//!
//! Only problems the caller has to react to are errors. Everything the
//! builder retries internally (an overlap, a missing template, a doorway with
//! no mate) is reported through outcome enums in [`crate::builder`] instead.

use thiserror::Error;

use crate::layout::RoomId;

/// Why a parent/child link is not allowed in a layout graph
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionRule {
    #[error("a boss room is already connected")]
    SecondBossRoom,

    #[error("child room type is unset")]
    UnsetChild,

    #[error("a room cannot be its own child")]
    SelfLink,

    #[error("child already has a parent")]
    ChildHasParent,

    #[error("a corridor cannot lead to another corridor")]
    CorridorToCorridor,

    #[error("two rooms must be joined through a corridor")]
    RoomToRoom,

    #[error("parent already has the maximum number of corridors")]
    TooManyCorridors,

    #[error("the entrance cannot be a child")]
    EntranceAsChild,

    #[error("a corridor leads to a single room")]
    CorridorAlreadyLeads,
}

/// Structural problems in a layout graph
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("duplicate layout node id {0}")]
    DuplicateNode(RoomId),

    #[error("unknown layout node id {0}")]
    UnknownNode(RoomId),

    #[error("cannot connect {parent} -> {child}: {rule}")]
    InvalidConnection {
        parent: RoomId,
        child: RoomId,
        #[source]
        rule: ConnectionRule,
    },

    #[error("layout node {0} has more than one parent")]
    MultipleParents(RoomId),

    #[error("link {parent} -> {child} is not recorded on both nodes")]
    AsymmetricLink { parent: RoomId, child: RoomId },

    #[error("layout graph has more than one entrance")]
    MultipleEntrances,
}

/// Errors loading a level descriptor
#[derive(Error, Debug)]
pub enum LevelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("layout graph '{graph}' is invalid: {source}")]
    InvalidGraph {
        graph: String,
        #[source]
        source: GraphError,
    },
}

/// Errors loading build settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The builder gave up
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("level has no layout graphs to build from")]
    NoLayoutGraphs,

    #[error(
        "no layout could be built after {graph_attempts} graph selections \
         ({rebuild_attempts} build attempts in total)"
    )]
    AttemptsExhausted {
        graph_attempts: u32,
        rebuild_attempts: u32,
    },
}
