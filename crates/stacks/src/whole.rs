//! Whole-buffer variant: encode a caller-supplied image as-is.

use std::sync::{Arc, Mutex};

use stillframe_common::error::{StillframeError, StillframeResult};
use stillframe_encode::{encode_canvas, EncodeOptions, EncodeScheduler, WorkerPool};
use stillframe_raster::{Canvas, PixelFormat};

use crate::{lock_state, validate_percent};

struct Settings {
    quality: u8,
    smoothing: Option<u8>,
}

struct Inner {
    canvas: Canvas,
    settings: Mutex<Settings>,
}

/// A complete image handed over at construction and encoded on demand.
///
/// The pixel buffer is converted to canonical RGB once and treated as
/// immutable; only quality and smoothing can change between encodes.
pub struct StillImage {
    inner: Arc<Inner>,
    scheduler: EncodeScheduler,
}

impl StillImage {
    /// Wrap a `width x height` buffer in the given pixel layout.
    pub fn new(
        buffer: &[u8],
        width: u32,
        height: u32,
        format: PixelFormat,
        pool: Arc<dyn WorkerPool>,
    ) -> StillframeResult<Self> {
        let expected = width as usize * height as usize * format.channels();
        if buffer.len() < expected {
            return Err(StillframeError::argument(format!(
                "Buffer for {width}x{height} {format} must hold {expected} bytes, got {}",
                buffer.len()
            )));
        }

        let canonical = format.to_canonical(&buffer[..expected]);
        let canvas = Canvas::from_canonical(canonical, width, height)?;
        Ok(Self {
            inner: Arc::new(Inner {
                canvas,
                settings: Mutex::new(Settings {
                    quality: 60,
                    smoothing: None,
                }),
            }),
            scheduler: EncodeScheduler::new(pool),
        })
    }

    /// Set JPEG quality; rejects values outside 0-100.
    pub fn set_quality(&self, quality: i32) -> StillframeResult<()> {
        let quality = validate_percent(quality, "Quality")?;
        lock_state(&self.inner.settings).quality = quality;
        Ok(())
    }

    /// Set the smoothing factor; rejects values outside 0-100.
    pub fn set_smoothing(&self, smoothing: i32) -> StillframeResult<()> {
        let smoothing = validate_percent(smoothing, "Smoothing")?;
        lock_state(&self.inner.settings).smoothing = Some(smoothing);
        Ok(())
    }

    fn options(inner: &Inner) -> EncodeOptions {
        let settings = lock_state(&inner.settings);
        EncodeOptions {
            quality: settings.quality,
            smoothing: settings.smoothing,
            region: None,
        }
    }

    /// Encode on the calling thread.
    pub fn encode_sync(&self) -> StillframeResult<Vec<u8>> {
        let opts = Self::options(&self.inner);
        encode_canvas(&self.inner.canvas, &opts).map(|frame| frame.bytes)
    }

    /// Encode on a background worker; `callback` is invoked exactly once.
    pub fn encode(&self, callback: impl FnOnce(StillframeResult<Vec<u8>>) + Send + 'static) {
        self.scheduler.submit(
            self.inner.clone(),
            |inner| {
                let opts = Self::options(inner);
                encode_canvas(&inner.canvas, &opts)
            },
            Box::new(move |result| callback(result.map(|frame| frame.bytes))),
        );
    }
}
