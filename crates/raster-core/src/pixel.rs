//! Pixel formats and conversion into the canonical RGB layout.
//!
//! All internal storage uses 3-byte RGB triples regardless of the layout
//! fragments arrive in. Conversion is driven by a per-format channel map
//! shared by every call site, so the four layouts cannot drift apart.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use stillframe_common::error::StillframeError;

/// Bytes per pixel in canonical storage.
pub const CANONICAL_CHANNELS: usize = 3;

/// Channel layout of a caller-supplied pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelFormat {
    Rgb,
    Bgr,
    Rgba,
    Bgra,
}

impl PixelFormat {
    /// Bytes per pixel in this layout.
    pub fn channels(self) -> usize {
        match self {
            PixelFormat::Rgb | PixelFormat::Bgr => 3,
            PixelFormat::Rgba | PixelFormat::Bgra => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PixelFormat::Rgb => "rgb",
            PixelFormat::Bgr => "bgr",
            PixelFormat::Rgba => "rgba",
            PixelFormat::Bgra => "bgra",
        }
    }

    /// Source channel indices that map onto canonical R, G, B.
    fn channel_map(self) -> [usize; 3] {
        match self {
            PixelFormat::Rgb | PixelFormat::Rgba => [0, 1, 2],
            PixelFormat::Bgr | PixelFormat::Bgra => [2, 1, 0],
        }
    }

    /// Convert a pixel buffer in this layout to canonical RGB triples.
    ///
    /// Row-major, left-to-right, top-to-bottom. The caller guarantees the
    /// buffer holds whole pixels; trailing bytes short of a full pixel are
    /// ignored.
    pub fn to_canonical(self, src: &[u8]) -> Vec<u8> {
        if self == PixelFormat::Rgb {
            return src.to_vec();
        }

        let step = self.channels();
        let map = self.channel_map();
        let mut out = Vec::with_capacity(src.len() / step * CANONICAL_CHANNELS);
        for pixel in src.chunks_exact(step) {
            out.push(pixel[map[0]]);
            out.push(pixel[map[1]]);
            out.push(pixel[map[2]]);
        }
        out
    }
}

impl FromStr for PixelFormat {
    type Err = StillframeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rgb" => Ok(PixelFormat::Rgb),
            "bgr" => Ok(PixelFormat::Bgr),
            "rgba" => Ok(PixelFormat::Rgba),
            "bgra" => Ok(PixelFormat::Bgra),
            other => Err(StillframeError::argument(format!(
                "Buffer type must be 'rgb', 'bgr', 'rgba' or 'bgra', got '{other}'."
            ))),
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
