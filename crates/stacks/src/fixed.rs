//! Fixed-region variant: fragments composite into a preallocated canvas,
//! encodes always cover the whole canvas.

use std::sync::{Arc, Mutex};

use stillframe_common::error::StillframeResult;
use stillframe_encode::{encode_canvas, EncodeOptions, EncodeScheduler, EncodedFrame, WorkerPool};
use stillframe_raster::{composite_fragment, Canvas, PixelFormat};

use crate::{lock_state, validate_percent};

struct State {
    canvas: Canvas,
    quality: u8,
}

struct Inner {
    format: PixelFormat,
    state: Mutex<State>,
}

/// A zero-initialized canvas of fixed dimensions filled by fragment pushes.
pub struct FixedCanvas {
    inner: Arc<Inner>,
    scheduler: EncodeScheduler,
}

impl FixedCanvas {
    pub fn new(
        width: u32,
        height: u32,
        format: PixelFormat,
        pool: Arc<dyn WorkerPool>,
    ) -> StillframeResult<Self> {
        let canvas = Canvas::zeroed(width, height)?;
        Ok(Self {
            inner: Arc::new(Inner {
                format,
                state: Mutex::new(State {
                    canvas,
                    quality: 60,
                }),
            }),
            scheduler: EncodeScheduler::new(pool),
        })
    }

    /// Composite a fragment at `(x, y)`. Rejected pushes leave the canvas
    /// byte-for-byte unchanged.
    pub fn push(&self, buffer: &[u8], x: i32, y: i32, w: i32, h: i32) -> StillframeResult<()> {
        let mut state = lock_state(&self.inner.state);
        composite_fragment(&mut state.canvas, self.inner.format, buffer, x, y, w, h)?;
        Ok(())
    }

    /// Set JPEG quality; rejects values outside 0-100.
    pub fn set_quality(&self, quality: i32) -> StillframeResult<()> {
        let quality = validate_percent(quality, "Quality")?;
        lock_state(&self.inner.state).quality = quality;
        Ok(())
    }

    fn encode_locked(inner: &Inner) -> StillframeResult<EncodedFrame> {
        let state = lock_state(&inner.state);
        let opts = EncodeOptions {
            quality: state.quality,
            ..Default::default()
        };
        encode_canvas(&state.canvas, &opts)
    }

    /// Encode the full canvas on the calling thread.
    pub fn encode_sync(&self) -> StillframeResult<Vec<u8>> {
        Self::encode_locked(&self.inner).map(|frame| frame.bytes)
    }

    /// Encode the full canvas on a background worker; `callback` is invoked
    /// exactly once with the state as of when the worker ran.
    pub fn encode(&self, callback: impl FnOnce(StillframeResult<Vec<u8>>) + Send + 'static) {
        self.scheduler.submit(
            self.inner.clone(),
            Self::encode_locked,
            Box::new(move |result| callback(result.map(|frame| frame.bytes))),
        );
    }
}
