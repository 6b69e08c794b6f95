//! Plain-text layout summary

use std::fmt::Write;

use dg_core::DungeonLayout;

/// One header line, then one line per room in placement order
pub fn summarize(layout: &DungeonLayout) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "level '{}', graph '{}', seed {}: {} rooms",
        layout.level_name,
        layout.graph_name,
        layout.seed,
        layout.len()
    );
    for room in &layout.rooms {
        let b = room.bounds;
        let sealed = room.unconnected_doorways().count();
        let _ = writeln!(
            out,
            "  {:<12} {:<22} ({}, {})..({}, {})  template {}, {} sealed",
            room.id.0,
            room.kind.to_string(),
            b.lower.x,
            b.lower.y,
            b.upper.x,
            b.upper.y,
            room.template_id,
            sealed
        );
    }
    out
}
