//! The canonical pixel canvas.

use stillframe_common::error::{StillframeError, StillframeResult};

use crate::pixel::CANONICAL_CHANNELS;
use crate::rect::Rect;

/// A fixed-size canvas of canonical RGB pixels.
///
/// The buffer is `width * height * 3` bytes and never changes size after
/// construction.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Canvas {
    /// Allocate a zero-initialized canvas.
    pub fn zeroed(width: u32, height: u32) -> StillframeResult<Self> {
        let len = width as usize * height as usize * CANONICAL_CHANNELS;
        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|_| {
            StillframeError::resource(format!("Failed to allocate {len}-byte canvas buffer"))
        })?;
        data.resize(len, 0);
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Take ownership of an already-canonical RGB buffer.
    pub fn from_canonical(data: Vec<u8>, width: u32, height: u32) -> StillframeResult<Self> {
        let expected = width as usize * height as usize * CANONICAL_CHANNELS;
        if data.len() != expected {
            return Err(StillframeError::argument(format!(
                "Canonical buffer for {width}x{height} must be {expected} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The whole canonical buffer, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.data
    }

    /// The rect covering the full canvas.
    pub fn full_rect(&self) -> Rect {
        Rect::new(0, 0, self.width as i32, self.height as i32)
    }

    /// Copy `w*h*3` canonical bytes into the canvas at `(x, y)`.
    ///
    /// Preconditions (enforced by the compositor): `x + w <= width` and
    /// `y + h <= height`. A zero-sized region is a no-op.
    pub fn write_region(&mut self, src: &[u8], x: u32, y: u32, w: u32, h: u32) {
        if w == 0 || h == 0 {
            return;
        }
        debug_assert!(x + w <= self.width && y + h <= self.height);
        debug_assert!(src.len() >= w as usize * h as usize * CANONICAL_CHANNELS);

        let stride = self.width as usize * CANONICAL_CHANNELS;
        let row_bytes = w as usize * CANONICAL_CHANNELS;
        let mut start = y as usize * stride + x as usize * CANONICAL_CHANNELS;

        for row in src.chunks_exact(row_bytes).take(h as usize) {
            self.data[start..start + row_bytes].copy_from_slice(row);
            start += stride;
        }
    }

    /// Extract the canonical bytes of a sub-rectangle, row-major.
    ///
    /// The rect must lie inside the canvas; fragment validation upstream
    /// guarantees any recorded dirty rect does.
    pub fn region_pixels(&self, rect: Rect) -> Vec<u8> {
        if rect == self.full_rect() {
            return self.data.clone();
        }

        let stride = self.width as usize * CANONICAL_CHANNELS;
        let row_bytes = rect.w as usize * CANONICAL_CHANNELS;
        let mut out = Vec::with_capacity(rect.h as usize * row_bytes);
        let mut start = rect.y as usize * stride + rect.x as usize * CANONICAL_CHANNELS;

        for _ in 0..rect.h {
            out.extend_from_slice(&self.data[start..start + row_bytes]);
            start += stride;
        }
        out
    }
}
