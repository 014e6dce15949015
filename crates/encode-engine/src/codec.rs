//! Adapter between the canvas and the external JPEG codec.
//!
//! The compression itself is delegated to `image::codecs::jpeg`; this module
//! only selects the region to encode, applies optional smoothing, and maps
//! codec failures into [`StillframeError::Codec`].

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};
use stillframe_common::error::{StillframeError, StillframeResult};
use stillframe_raster::{Canvas, Rect, CANONICAL_CHANNELS};

/// Parameters for one encode.
#[derive(Debug, Clone)]
pub struct EncodeOptions {
    /// JPEG quality, 0-100. Validated by the variant setters.
    pub quality: u8,

    /// Optional smoothing factor, 0-100. `None` and `Some(0)` are no-ops.
    pub smoothing: Option<u8>,

    /// Region to encode; `None` or an empty rect means the full canvas.
    pub region: Option<Rect>,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            quality: 60,
            smoothing: None,
            region: None,
        }
    }
}

/// One successfully encoded still image.
#[derive(Debug, Clone)]
pub struct EncodedFrame {
    /// The compressed bytes.
    pub bytes: Vec<u8>,

    /// The canvas region the bytes cover.
    pub region: Rect,
}

/// Encode a canvas (or a sub-region of it) to JPEG bytes.
pub fn encode_canvas(canvas: &Canvas, opts: &EncodeOptions) -> StillframeResult<EncodedFrame> {
    let region = match opts.region {
        Some(rect) if !rect.is_empty() => rect,
        _ => canvas.full_rect(),
    };
    if region.is_empty() {
        return Err(StillframeError::argument(
            "Cannot encode a zero-sized canvas.",
        ));
    }
    let full = canvas.full_rect();
    if region.x < 0 || region.y < 0 || region.right() > full.w || region.bottom() > full.h {
        return Err(StillframeError::bounds(
            "Encode region exceeds the canvas bounds.",
        ));
    }

    let mut pixels = canvas.region_pixels(region);
    if let Some(smoothing) = opts.smoothing.filter(|&s| s > 0) {
        smooth_pixels(&mut pixels, region.w as usize, region.h as usize, smoothing);
    }

    // image's encoder rejects quality 0; the setters allow it, so clamp the
    // bottom of the range like the codec's own CLI consumers do.
    let quality = opts.quality.clamp(1, 100);

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
    encoder
        .write_image(
            &pixels,
            region.w as u32,
            region.h as u32,
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| StillframeError::codec(e.to_string()))?;

    let bytes = buffer.into_inner();
    tracing::debug!(
        width = region.w,
        height = region.h,
        quality,
        len = bytes.len(),
        "Encoded frame"
    );
    Ok(EncodedFrame { bytes, region })
}

/// Blend each pixel toward its 3x3 neighborhood mean.
///
/// `factor` is 0-100; 100 replaces every pixel with the neighborhood mean.
/// This stands in for libjpeg's input smoothing, which the codec crate does
/// not expose.
fn smooth_pixels(pixels: &mut [u8], width: usize, height: usize, factor: u8) {
    let factor = u32::from(factor.min(100));
    let source = pixels.to_vec();
    let stride = width * CANONICAL_CHANNELS;

    for y in 0..height {
        for x in 0..width {
            for c in 0..CANONICAL_CHANNELS {
                let mut sum = 0u32;
                let mut count = 0u32;
                for dy in -1i32..=1 {
                    for dx in -1i32..=1 {
                        let ny = y as i32 + dy;
                        let nx = x as i32 + dx;
                        if ny < 0 || nx < 0 || ny >= height as i32 || nx >= width as i32 {
                            continue;
                        }
                        sum += u32::from(source[ny as usize * stride + nx as usize * 3 + c]);
                        count += 1;
                    }
                }
                let mean = sum / count;
                let idx = y * stride + x * 3 + c;
                let original = u32::from(source[idx]);
                pixels[idx] = ((original * (100 - factor) + mean * factor) / 100) as u8;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_canvas_encodes_to_valid_jpeg() {
        let canvas = Canvas::zeroed(4, 4).unwrap();
        let frame = encode_canvas(&canvas, &EncodeOptions::default()).unwrap();
        assert!(!frame.bytes.is_empty());
        assert_eq!(&frame.bytes[0..2], &[0xFF, 0xD8]);
        assert_eq!(&frame.bytes[frame.bytes.len() - 2..], &[0xFF, 0xD9]);
        assert_eq!(frame.region, Rect::new(0, 0, 4, 4));
    }

    #[test]
    fn region_encode_reports_region_dimensions() {
        let canvas = Canvas::zeroed(16, 16).unwrap();
        let opts = EncodeOptions {
            region: Some(Rect::new(2, 2, 8, 4)),
            ..Default::default()
        };
        let frame = encode_canvas(&canvas, &opts).unwrap();
        assert_eq!(frame.region, Rect::new(2, 2, 8, 4));

        let decoded = image::load_from_memory(&frame.bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (8, 4));
    }

    #[test]
    fn empty_region_falls_back_to_full_canvas() {
        let canvas = Canvas::zeroed(6, 6).unwrap();
        let opts = EncodeOptions {
            region: Some(Rect::EMPTY),
            ..Default::default()
        };
        let frame = encode_canvas(&canvas, &opts).unwrap();
        assert_eq!(frame.region, canvas.full_rect());
    }

    #[test]
    fn region_outside_canvas_is_rejected() {
        let canvas = Canvas::zeroed(6, 6).unwrap();
        let opts = EncodeOptions {
            region: Some(Rect::new(4, 4, 8, 8)),
            ..Default::default()
        };
        let err = encode_canvas(&canvas, &opts).unwrap_err();
        assert!(err.to_string().contains("exceeds the canvas bounds"));
    }

    #[test]
    fn zero_sized_canvas_is_rejected() {
        let canvas = Canvas::zeroed(0, 0).unwrap();
        let err = encode_canvas(&canvas, &EncodeOptions::default()).unwrap_err();
        assert!(err.to_string().contains("zero-sized"));
    }

    #[test]
    fn quality_affects_output_size() {
        let mut data = Vec::with_capacity(32 * 32 * 3);
        for i in 0..32 * 32 {
            data.push((i % 256) as u8);
            data.push((i * 7 % 256) as u8);
            data.push((i * 13 % 256) as u8);
        }
        let canvas = Canvas::from_canonical(data, 32, 32).unwrap();

        let low = encode_canvas(
            &canvas,
            &EncodeOptions {
                quality: 10,
                ..Default::default()
            },
        )
        .unwrap();
        let high = encode_canvas(
            &canvas,
            &EncodeOptions {
                quality: 95,
                ..Default::default()
            },
        )
        .unwrap();
        assert!(high.bytes.len() > low.bytes.len());
    }

    #[test]
    fn smoothing_full_strength_averages_neighbors() {
        // Single bright pixel in a dark field gets pulled toward the mean.
        let mut data = vec![0u8; 3 * 3 * 3];
        data[4 * 3] = 90; // center pixel, red channel
        let mut pixels = data.clone();
        smooth_pixels(&mut pixels, 3, 3, 100);
        assert_eq!(pixels[4 * 3], 10); // mean of 9 neighbors
        assert!(pixels[0] > 0); // corners pick up spill from the center
    }

    #[test]
    fn smoothing_zero_is_identity() {
        let canvas = Canvas::from_canonical(vec![77u8; 4 * 4 * 3], 4, 4).unwrap();
        let plain = encode_canvas(&canvas, &EncodeOptions::default()).unwrap();
        let smoothed = encode_canvas(
            &canvas,
            &EncodeOptions {
                smoothing: Some(0),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(plain.bytes, smoothed.bytes);
    }
}
