//! Stillframe Raster Core
//!
//! In-memory canonical pixel canvas filled incrementally by rectangular
//! fragment updates (screen-capture tiles and similar):
//! - Pixel format conversion into the canonical 3-byte RGB layout
//! - Canvas buffer with sub-rectangle writes
//! - Dirty-region tracking (union bounding box of all writes)
//! - Fragment compositor that validates, converts, and blits

pub mod canvas;
pub mod compositor;
pub mod dirty;
pub mod pixel;
pub mod rect;

pub use canvas::Canvas;
pub use compositor::composite_fragment;
pub use dirty::DirtyRegion;
pub use pixel::{PixelFormat, CANONICAL_CHANNELS};
pub use rect::Rect;
