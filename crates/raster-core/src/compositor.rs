//! Fragment compositor: validates placement, converts, and blits.

use stillframe_common::error::{StillframeError, StillframeResult};

use crate::canvas::Canvas;
use crate::pixel::PixelFormat;
use crate::rect::Rect;

/// Composite a fragment buffer into the canvas at `(x, y)`.
///
/// Validation happens before any byte of the canvas is touched; a rejected
/// push leaves the canvas unchanged. On success the fragment is converted
/// from `format` into canonical RGB and written in place, and the covered
/// rect is returned so the caller can record it as dirty.
pub fn composite_fragment(
    canvas: &mut Canvas,
    format: PixelFormat,
    fragment: &[u8],
    x: i32,
    y: i32,
    w: i32,
    h: i32,
) -> StillframeResult<Rect> {
    if x < 0 {
        return Err(StillframeError::bounds("Coordinate x smaller than 0."));
    }
    if y < 0 {
        return Err(StillframeError::bounds("Coordinate y smaller than 0."));
    }
    if w < 0 {
        return Err(StillframeError::bounds("Width smaller than 0."));
    }
    if h < 0 {
        return Err(StillframeError::bounds("Height smaller than 0."));
    }

    let canvas_w = canvas.width() as i32;
    let canvas_h = canvas.height() as i32;
    if x >= canvas_w {
        return Err(StillframeError::bounds(
            "Coordinate x exceeds the canvas width.",
        ));
    }
    if y >= canvas_h {
        return Err(StillframeError::bounds(
            "Coordinate y exceeds the canvas height.",
        ));
    }
    if x + w > canvas_w {
        return Err(StillframeError::bounds(
            "Pushed fragment exceeds the canvas width.",
        ));
    }
    if y + h > canvas_h {
        return Err(StillframeError::bounds(
            "Pushed fragment exceeds the canvas height.",
        ));
    }

    let expected = w as usize * h as usize * format.channels();
    if fragment.len() < expected {
        return Err(StillframeError::argument(format!(
            "Fragment buffer for {w}x{h} {format} must hold {expected} bytes, got {}",
            fragment.len()
        )));
    }

    let canonical = format.to_canonical(&fragment[..expected]);
    canvas.write_region(&canonical, x as u32, y as u32, w as u32, h as u32);
    Ok(Rect::new(x, y, w, h))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_fragment(format: PixelFormat, pixel: &[u8], count: usize) -> Vec<u8> {
        assert_eq!(pixel.len(), format.channels());
        pixel.iter().copied().cycle().take(count * pixel.len()).collect()
    }

    #[test]
    fn bgr_fragment_lands_as_rgb() {
        let mut canvas = Canvas::zeroed(4, 4).unwrap();
        let fragment = solid_fragment(PixelFormat::Bgr, &[10, 20, 30], 4);
        let rect = composite_fragment(&mut canvas, PixelFormat::Bgr, &fragment, 1, 1, 2, 2).unwrap();
        assert_eq!(rect, Rect::new(1, 1, 2, 2));
        assert_eq!(canvas.region_pixels(rect), vec![30, 20, 10].repeat(4));
    }

    #[test]
    fn bgra_fragment_lands_as_rgb() {
        let mut canvas = Canvas::zeroed(2, 1).unwrap();
        let fragment = solid_fragment(PixelFormat::Bgra, &[1, 2, 3, 9], 2);
        composite_fragment(&mut canvas, PixelFormat::Bgra, &fragment, 0, 0, 2, 1).unwrap();
        assert_eq!(canvas.pixels(), &[3, 2, 1, 3, 2, 1]);
    }

    #[test]
    fn negative_coordinates_rejected_before_write() {
        let mut canvas = Canvas::zeroed(4, 4).unwrap();
        let before = canvas.pixels().to_vec();
        let fragment = vec![255u8; 4 * 3];
        let err =
            composite_fragment(&mut canvas, PixelFormat::Rgb, &fragment, -1, 0, 2, 2).unwrap_err();
        assert!(err.to_string().contains("Coordinate x smaller than 0"));
        assert_eq!(canvas.pixels(), &before[..]);
    }

    #[test]
    fn negative_width_rejected() {
        let mut canvas = Canvas::zeroed(4, 4).unwrap();
        let err =
            composite_fragment(&mut canvas, PixelFormat::Rgb, &[], 0, 0, -2, 2).unwrap_err();
        assert!(err.to_string().contains("Width smaller than 0"));
    }

    #[test]
    fn origin_past_canvas_rejected() {
        let mut canvas = Canvas::zeroed(4, 4).unwrap();
        let err =
            composite_fragment(&mut canvas, PixelFormat::Rgb, &[], 4, 0, 1, 1).unwrap_err();
        assert!(err.to_string().contains("exceeds the canvas width"));
    }

    #[test]
    fn overhanging_fragment_rejected_and_canvas_untouched() {
        let mut canvas = Canvas::zeroed(4, 4).unwrap();
        let before = canvas.pixels().to_vec();
        let fragment = vec![255u8; 3 * 3 * 3];
        let err =
            composite_fragment(&mut canvas, PixelFormat::Rgb, &fragment, 2, 2, 3, 3).unwrap_err();
        assert!(err.to_string().contains("Pushed fragment exceeds"));
        assert_eq!(canvas.pixels(), &before[..]);
    }

    #[test]
    fn short_buffer_rejected() {
        let mut canvas = Canvas::zeroed(4, 4).unwrap();
        let err = composite_fragment(
            &mut canvas,
            PixelFormat::Rgba,
            &[0u8; 5],
            0,
            0,
            2,
            2,
        )
        .unwrap_err();
        assert!(err.to_string().contains("must hold 16 bytes"));
    }

    #[test]
    fn zero_sized_fragment_is_a_no_op() {
        let mut canvas = Canvas::zeroed(4, 4).unwrap();
        let before = canvas.pixels().to_vec();
        let rect =
            composite_fragment(&mut canvas, PixelFormat::Rgb, &[], 1, 1, 0, 0).unwrap();
        assert!(rect.is_empty());
        assert_eq!(canvas.pixels(), &before[..]);

        let rect =
            composite_fragment(&mut canvas, PixelFormat::Rgb, &[], 0, 0, 3, 0).unwrap();
        assert!(rect.is_empty());
        assert_eq!(canvas.pixels(), &before[..]);
    }
}
