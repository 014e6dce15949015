//! Dirty-region tracking.
//!
//! Maintains the minimal axis-aligned bounding rectangle of every fragment
//! written since the last reset, so that only the changed area needs to be
//! re-encoded.

use crate::rect::Rect;

/// Union bounding box of all recorded fragment rectangles.
///
/// Invariant: after any sequence of [`DirtyRegion::record`] calls since the
/// last reset, `current()` is exactly the bounding box of every recorded
/// rectangle; with no records it is [`Rect::EMPTY`].
#[derive(Debug, Clone, Default)]
pub struct DirtyRegion {
    rect: Rect,
}

impl DirtyRegion {
    pub fn new() -> Self {
        Self { rect: Rect::EMPTY }
    }

    /// Extend the tracked region to cover `(x, y, w, h)`.
    ///
    /// The width and height are re-derived from the union's right/bottom
    /// edges relative to the updated anchor; extending only the extents
    /// under-covers whenever the anchor moves up or left. Zero-area input
    /// is ignored so the tracker only ever holds positive-area boxes.
    pub fn record(&mut self, x: i32, y: i32, w: i32, h: i32) {
        if w <= 0 || h <= 0 {
            return;
        }
        if self.rect.is_empty() {
            self.rect = Rect::new(x, y, w, h);
            return;
        }

        let right = self.rect.right().max(x + w);
        let bottom = self.rect.bottom().max(y + h);
        self.rect.x = self.rect.x.min(x);
        self.rect.y = self.rect.y.min(y);
        self.rect.w = right - self.rect.x;
        self.rect.h = bottom - self.rect.y;
    }

    /// Forget all recorded regions.
    pub fn reset(&mut self) {
        self.rect = Rect::EMPTY;
    }

    /// The tracked bounding box; [`Rect::EMPTY`] when nothing was recorded.
    pub fn current(&self) -> Rect {
        self.rect
    }
}
