//! Dynamic-region variant: fragments composite over a caller-supplied
//! background, and encodes cover only the accumulated dirty rectangle.

use std::sync::{Arc, Mutex};

use stillframe_common::error::{StillframeError, StillframeResult};
use stillframe_encode::{encode_canvas, EncodeOptions, EncodeScheduler, EncodedFrame, WorkerPool};
use stillframe_raster::{composite_fragment, Canvas, DirtyRegion, PixelFormat, Rect};

use crate::{lock_state, validate_percent};

struct State {
    canvas: Option<Canvas>,
    dirty: DirtyRegion,
    quality: u8,
}

struct Inner {
    format: PixelFormat,
    state: Mutex<State>,
}

/// A canvas whose dimensions come from [`DynamicCanvas::set_background`]
/// and whose encodes cover only the region touched since the last encode
/// or [`DynamicCanvas::reset`].
pub struct DynamicCanvas {
    inner: Arc<Inner>,
    scheduler: EncodeScheduler,
}

impl DynamicCanvas {
    /// Create a canvas with no background; `push` and encode fail until
    /// `set_background` is called.
    pub fn new(format: PixelFormat, pool: Arc<dyn WorkerPool>) -> Self {
        Self {
            inner: Arc::new(Inner {
                format,
                state: Mutex::new(State {
                    canvas: None,
                    dirty: DirtyRegion::new(),
                    quality: 60,
                }),
            }),
            scheduler: EncodeScheduler::new(pool),
        }
    }

    /// Replace the canvas with `width x height` background pixels in the
    /// canvas's pixel layout.
    ///
    /// The dirty rectangle is deliberately left untouched: a replaced
    /// background keeps reporting regions recorded against the previous
    /// one. Call [`reset`](Self::reset) for a fresh baseline.
    pub fn set_background(&self, buffer: &[u8], width: u32, height: u32) -> StillframeResult<()> {
        let format = self.inner.format;
        let expected = width as usize * height as usize * format.channels();
        if buffer.len() < expected {
            return Err(StillframeError::argument(format!(
                "Background buffer for {width}x{height} {format} must hold {expected} bytes, got {}",
                buffer.len()
            )));
        }

        let canonical = format.to_canonical(&buffer[..expected]);
        let canvas = Canvas::from_canonical(canonical, width, height)?;
        lock_state(&self.inner.state).canvas = Some(canvas);
        Ok(())
    }

    /// Composite a fragment at `(x, y)` and extend the dirty rectangle.
    pub fn push(&self, buffer: &[u8], x: i32, y: i32, w: i32, h: i32) -> StillframeResult<()> {
        let mut state = lock_state(&self.inner.state);
        let canvas = state.canvas.as_mut().ok_or_else(|| {
            StillframeError::precondition(
                "No background has been set, use set_background to set one.",
            )
        })?;
        let rect = composite_fragment(canvas, self.inner.format, buffer, x, y, w, h)?;
        state.dirty.record(rect.x, rect.y, rect.w, rect.h);
        Ok(())
    }

    /// The current dirty rectangle; [`Rect::EMPTY`] when nothing was pushed
    /// since the last reset or encode.
    pub fn dimensions(&self) -> Rect {
        lock_state(&self.inner.state).dirty.current()
    }

    /// Clear the dirty rectangle to the empty sentinel.
    pub fn reset(&self) {
        lock_state(&self.inner.state).dirty.reset();
    }

    /// Set JPEG quality; rejects values outside 0-100.
    pub fn set_quality(&self, quality: i32) -> StillframeResult<()> {
        let quality = validate_percent(quality, "Quality")?;
        lock_state(&self.inner.state).quality = quality;
        Ok(())
    }

    /// Encode the dirty region and reset the tracker on success.
    ///
    /// With an untouched tracker the whole canvas is encoded and the full
    /// rect reported. The dirty rect is clipped to the canvas first: a
    /// replacement background smaller than its predecessor can leave the
    /// tracked rect partly or wholly outside the new bounds.
    fn encode_locked(inner: &Inner) -> StillframeResult<EncodedFrame> {
        let mut state = lock_state(&inner.state);
        let canvas = state.canvas.as_ref().ok_or_else(|| {
            StillframeError::precondition(
                "No background has been set, use set_background to set one.",
            )
        })?;

        let dirty = state.dirty.current().intersect(&canvas.full_rect());
        let opts = EncodeOptions {
            quality: state.quality,
            smoothing: None,
            region: (!dirty.is_empty()).then_some(dirty),
        };
        let frame = encode_canvas(canvas, &opts)?;
        state.dirty.reset();
        Ok(frame)
    }

    /// Encode on the calling thread; returns the bytes and the rect they
    /// cover.
    pub fn encode_sync(&self) -> StillframeResult<EncodedFrame> {
        Self::encode_locked(&self.inner)
    }

    /// Encode on a background worker against the state at the moment the
    /// worker runs; `callback` is invoked exactly once.
    pub fn encode(&self, callback: impl FnOnce(StillframeResult<EncodedFrame>) + Send + 'static) {
        self.scheduler
            .submit(self.inner.clone(), Self::encode_locked, Box::new(callback));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use stillframe_encode::{InlineWorkerPool, TokioWorkerPool};

    fn pool() -> Arc<dyn WorkerPool> {
        Arc::new(InlineWorkerPool)
    }

    fn with_background(width: u32, height: u32) -> DynamicCanvas {
        let canvas = DynamicCanvas::new(PixelFormat::Rgb, pool());
        let background = vec![50u8; width as usize * height as usize * 3];
        canvas.set_background(&background, width, height).unwrap();
        canvas
    }

    #[test]
    fn push_without_background_fails_cleanly() {
        let canvas = DynamicCanvas::new(PixelFormat::Rgb, pool());
        let err = canvas.push(&[0u8; 12], 0, 0, 2, 2).unwrap_err();
        assert!(err.to_string().contains("No background has been set"));
        assert_eq!(canvas.dimensions(), Rect::EMPTY);
    }

    #[test]
    fn encode_without_background_fails() {
        let canvas = DynamicCanvas::new(PixelFormat::Rgb, pool());
        assert!(canvas.encode_sync().is_err());
    }

    #[test]
    fn dimensions_track_union_of_pushes() {
        let canvas = with_background(32, 32);
        canvas.push(&[1u8; 4 * 4 * 3], 2, 3, 4, 4).unwrap();
        canvas.push(&[2u8; 2 * 2 * 3], 20, 10, 2, 2).unwrap();
        assert_eq!(canvas.dimensions(), Rect::new(2, 3, 20, 9));
    }

    #[test]
    fn reset_returns_to_sentinel() {
        let canvas = with_background(16, 16);
        canvas.push(&[1u8; 12], 0, 0, 2, 2).unwrap();
        canvas.reset();
        assert_eq!(canvas.dimensions(), Rect::EMPTY);
    }

    #[test]
    fn rejected_push_does_not_touch_dirty_state() {
        let canvas = with_background(8, 8);
        assert!(canvas.push(&[1u8; 48], 6, 6, 4, 4).is_err());
        assert_eq!(canvas.dimensions(), Rect::EMPTY);
    }

    #[test]
    fn background_replacement_keeps_dirty_state() {
        let canvas = with_background(8, 8);
        canvas.push(&[1u8; 12], 1, 1, 2, 2).unwrap();
        let dirty_before = canvas.dimensions();

        let replacement = vec![200u8; 8 * 8 * 3];
        canvas.set_background(&replacement, 8, 8).unwrap();
        assert_eq!(canvas.dimensions(), dirty_before);
    }

    #[test]
    fn encode_after_shrinking_background_clips_dirty_rect() {
        let canvas = with_background(32, 32);
        canvas.push(&[255u8; 10 * 10 * 3], 4, 4, 10, 10).unwrap();

        let replacement = vec![200u8; 8 * 8 * 3];
        canvas.set_background(&replacement, 8, 8).unwrap();

        let frame = canvas.encode_sync().unwrap();
        assert_eq!(frame.region, Rect::new(4, 4, 4, 4));
    }

    #[test]
    fn encode_after_shrinking_past_dirty_rect_covers_full_canvas() {
        let canvas = with_background(100, 100);
        canvas.push(&[255u8; 10 * 10 * 3], 50, 50, 10, 10).unwrap();

        let replacement = vec![200u8; 8 * 8 * 3];
        canvas.set_background(&replacement, 8, 8).unwrap();

        let frame = canvas.encode_sync().unwrap();
        assert_eq!(frame.region, Rect::new(0, 0, 8, 8));
    }

    #[test]
    fn encode_covers_dirty_rect_and_resets_tracker() {
        let canvas = with_background(32, 32);
        canvas.push(&[255u8; 4 * 4 * 3], 8, 4, 4, 4).unwrap();

        let frame = canvas.encode_sync().unwrap();
        assert_eq!(frame.region, Rect::new(8, 4, 4, 4));
        assert_eq!(&frame.bytes[0..2], &[0xFF, 0xD8]);

        let decoded = image::load_from_memory(&frame.bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (4, 4));

        // Tracker resets after a successful encode.
        assert_eq!(canvas.dimensions(), Rect::EMPTY);
    }

    #[test]
    fn encode_with_untouched_tracker_covers_full_canvas() {
        let canvas = with_background(8, 6);
        let frame = canvas.encode_sync().unwrap();
        assert_eq!(frame.region, Rect::new(0, 0, 8, 6));
    }

    #[test]
    fn concurrent_async_encodes_each_complete_once() {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .build()
            .unwrap();
        let worker_pool: Arc<dyn WorkerPool> =
            Arc::new(TokioWorkerPool::new(runtime.handle().clone()));

        let canvas = DynamicCanvas::new(PixelFormat::Rgb, worker_pool);
        let background = vec![10u8; 64 * 64 * 3];
        canvas.set_background(&background, 64, 64).unwrap();
        canvas.push(&[200u8; 8 * 8 * 3], 4, 4, 8, 8).unwrap();

        let (tx, rx) = mpsc::channel();
        for _ in 0..2 {
            let tx = tx.clone();
            canvas.encode(move |result| {
                tx.send(result).unwrap();
            });
        }
        drop(tx);

        let results: Vec<_> = rx.into_iter().collect();
        assert_eq!(results.len(), 2);
        for result in results {
            let frame = result.unwrap();
            assert_eq!(&frame.bytes[0..2], &[0xFF, 0xD8]);
            // Each job saw either the dirty rect or the already-reset full
            // canvas, depending on which ran first.
            assert!(
                frame.region == Rect::new(4, 4, 8, 8) || frame.region == Rect::new(0, 0, 64, 64)
            );
        }
    }
}
