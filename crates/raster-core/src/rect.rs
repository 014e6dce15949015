//! Axis-aligned integer rectangles.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in canvas coordinates.
///
/// The distinguished value [`Rect::EMPTY`] (`x = -1, y = -1, w = 0, h = 0`)
/// means "no region recorded". Every other rect has non-negative origin and
/// extents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    /// Sentinel for "nothing recorded".
    pub const EMPTY: Rect = Rect {
        x: -1,
        y: -1,
        w: 0,
        h: 0,
    };

    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Whether this rect covers no area (includes the sentinel).
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// One past the rightmost covered column.
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// One past the bottommost covered row.
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// The overlap of two rects; [`Rect::EMPTY`] when they are disjoint or
    /// either is empty.
    pub fn intersect(&self, other: &Rect) -> Rect {
        if self.is_empty() || other.is_empty() {
            return Rect::EMPTY;
        }
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= x || bottom <= y {
            return Rect::EMPTY;
        }
        Rect::new(x, y, right - x, bottom - y)
    }
}

impl Default for Rect {
    fn default() -> Self {
        Rect::EMPTY
    }
}
