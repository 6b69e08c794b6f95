//! Layout graphs
//!
//! The abstract shape of a level: which rooms exist and which room hangs off
//! which corridor.

mod graph;
mod node;

pub use graph::LayoutGraph;
pub use node::{LayoutNode, RoomId};
