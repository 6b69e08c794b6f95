//! dg-cli: terminal front end for the dungeon generator
//!
//! Text renderings of a finished layout for the `dungen` binary.

pub mod ascii;
pub mod summary;

pub use ascii::render_ascii;
pub use summary::summarize;
