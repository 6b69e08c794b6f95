//! Grid coordinates and bounding boxes
//!
//! Rooms live on an integer tile grid. Boxes are inclusive on both ends, so a
//! box from (0, 0) to (3, 2) covers 4 x 3 tiles.

use std::ops::{Add, AddAssign, Sub};

use serde::{Deserialize, Serialize};

/// An integer tile coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    /// The origin
    pub const ZERO: GridPos = GridPos { x: 0, y: 0 };

    /// Create a new coordinate
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for GridPos {
    type Output = GridPos;

    fn add(self, rhs: GridPos) -> GridPos {
        GridPos::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for GridPos {
    fn add_assign(&mut self, rhs: GridPos) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for GridPos {
    type Output = GridPos;

    fn sub(self, rhs: GridPos) -> GridPos {
        GridPos::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(i32, i32)> for GridPos {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// An axis-aligned box given by its lower-left and upper-right corners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridRect {
    pub lower: GridPos,
    pub upper: GridPos,
}

impl GridRect {
    /// Create a new box from its two corners
    pub const fn new(lower: GridPos, upper: GridPos) -> Self {
        Self { lower, upper }
    }

    /// Width in tiles
    pub fn width(&self) -> i32 {
        if self.upper.x >= self.lower.x {
            self.upper.x - self.lower.x + 1
        } else {
            0
        }
    }

    /// Height in tiles
    pub fn height(&self) -> i32 {
        if self.upper.y >= self.lower.y {
            self.upper.y - self.lower.y + 1
        } else {
            0
        }
    }

    /// Corner-to-corner extent (`upper - lower`)
    pub fn extent(&self) -> GridPos {
        self.upper - self.lower
    }

    /// Same size, moved so that its lower corner sits at `lower`
    pub fn moved_to(&self, lower: GridPos) -> GridRect {
        GridRect::new(lower, lower + self.extent())
    }

    /// Check if a tile lies within this box
    pub fn contains(&self, pos: GridPos) -> bool {
        self.lower.x <= pos.x && pos.x <= self.upper.x && self.lower.y <= pos.y && pos.y <= self.upper.y
    }

    /// Check if this box overlaps another
    ///
    /// Intervals are closed: boxes that only share an edge still overlap.
    pub fn intersects(&self, other: &GridRect) -> bool {
        intervals_overlap(self.lower.x, self.upper.x, other.lower.x, other.upper.x)
            && intervals_overlap(self.lower.y, self.upper.y, other.lower.y, other.upper.y)
    }

    /// Smallest box containing both
    pub fn union(&self, other: &GridRect) -> GridRect {
        GridRect::new(
            GridPos::new(self.lower.x.min(other.lower.x), self.lower.y.min(other.lower.y)),
            GridPos::new(self.upper.x.max(other.upper.x), self.upper.y.max(other.upper.y)),
        )
    }
}

/// Closed interval overlap test
pub fn intervals_overlap(min1: i32, max1: i32, min2: i32, max2: i32) -> bool {
    min1.max(min2) <= max1.min(max2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(lx: i32, ly: i32, hx: i32, hy: i32) -> GridRect {
        GridRect::new(GridPos::new(lx, ly), GridPos::new(hx, hy))
    }

    #[test]
    fn test_rect_dimensions() {
        let r = rect(10, 20, 15, 25);
        assert_eq!(r.width(), 6);
        assert_eq!(r.height(), 6);
        assert_eq!(r.extent(), GridPos::new(5, 5));
    }

    #[test]
    fn test_rect_intersects() {
        let r1 = rect(0, 0, 10, 10);
        let r2 = rect(5, 5, 15, 15);
        let r3 = rect(20, 20, 30, 30);

        assert!(r1.intersects(&r2));
        assert!(r2.intersects(&r1));
        assert!(!r1.intersects(&r3));
    }

    #[test]
    fn test_shared_edge_counts_as_overlap() {
        let left = rect(0, 0, 4, 4);
        let touching = rect(4, 0, 8, 4);
        let gap = rect(5, 0, 8, 4);

        assert!(left.intersects(&touching));
        assert!(!left.intersects(&gap));
    }

    #[test]
    fn test_overlap_needs_both_axes() {
        let a = rect(0, 0, 4, 4);
        let same_columns = rect(0, 10, 4, 14);
        assert!(!a.intersects(&same_columns));
    }

    #[test]
    fn test_moved_to_keeps_size() {
        let r = rect(-3, -2, 3, 2);
        let moved = r.moved_to(GridPos::new(10, 10));
        assert_eq!(moved, rect(10, 10, 16, 14));
        assert_eq!(moved.width(), r.width());
        assert_eq!(moved.height(), r.height());
    }

    #[test]
    fn test_union_and_contains() {
        let u = rect(0, 0, 2, 2).union(&rect(5, -1, 6, 1));
        assert_eq!(u, rect(0, -1, 6, 2));
        assert!(u.contains(GridPos::new(6, -1)));
        assert!(!u.contains(GridPos::new(7, 0)));
    }

    #[test]
    fn test_pos_arithmetic() {
        let mut p = GridPos::new(1, 2) + GridPos::new(3, 4);
        assert_eq!(p, GridPos::new(4, 6));
        p += GridPos::new(-4, -6);
        assert_eq!(p, GridPos::ZERO);
        assert_eq!(GridPos::new(5, 5) - GridPos::new(2, 7), GridPos::from((3, -2)));
    }
}
