//! ASCII map of a layout
//!
//! North is up. Each room is drawn as a filled box of one glyph picked from
//! its kind; doorways are `+` when connected and `#` when they get sealed.

use dg_core::{DungeonLayout, GridPos, PlacedRoom, RoomKind};

/// Glyph used to fill a room's footprint
pub fn room_glyph(kind: &RoomKind) -> char {
    match kind {
        RoomKind::Entrance => 'E',
        RoomKind::Corridor(_) => '.',
        RoomKind::Boss => 'B',
        RoomKind::Standard(name) => name
            .chars()
            .find(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('R'),
        RoomKind::Unset => '?',
    }
}

/// Render `layout` as lines of text, one character per tile
pub fn render_ascii(layout: &DungeonLayout) -> String {
    let Some(bounds) = layout.bounds() else {
        return String::new();
    };
    let width = bounds.width() as usize;
    let height = bounds.height() as usize;
    let mut grid = vec![vec![' '; width]; height];

    let mut put = |pos: GridPos, ch: char| {
        let col = (pos.x - bounds.lower.x) as usize;
        let row = (bounds.upper.y - pos.y) as usize;
        if let Some(cell) = grid.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = ch;
        }
    };

    for room in &layout.rooms {
        let glyph = room_glyph(&room.kind);
        for y in room.bounds.lower.y..=room.bounds.upper.y {
            for x in room.bounds.lower.x..=room.bounds.upper.x {
                put(GridPos::new(x, y), glyph);
            }
        }
    }
    for room in &layout.rooms {
        for (pos, ch) in doorway_marks(room) {
            put(pos, ch);
        }
    }

    let mut out = String::with_capacity((width + 1) * height);
    for row in grid {
        let line: String = row.into_iter().collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn doorway_marks(room: &PlacedRoom) -> Vec<(GridPos, char)> {
    room.doorways()
        .iter()
        .enumerate()
        .filter_map(|(i, d)| {
            let ch = if d.is_connected() { '+' } else { '#' };
            room.doorway_world_position(i).map(|pos| (pos, ch))
        })
        .collect()
}
