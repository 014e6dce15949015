//! Asynchronous encode scheduling.
//!
//! Each submitted job clones the owning object's `Arc` for its whole
//! lifetime, mirroring the ref/unref discipline around a work-queue job:
//! the object cannot be dropped while an encode is outstanding, and the
//! reference is released when the job finishes regardless of outcome.
//!
//! The job reads the owner's state at the moment the worker runs, not at
//! submission time. Owners keep their encode-affecting state behind a
//! mutex, so a `push` racing with an in-flight encode serializes on the
//! lock instead of tearing the buffer.

use std::sync::Arc;

use stillframe_common::error::StillframeResult;

use crate::codec::EncodedFrame;
use crate::pool::WorkerPool;

/// Single-shot completion callback. Invoked exactly once with either the
/// encoded frame or the error, never both, never neither.
pub type EncodeCallback = Box<dyn FnOnce(StillframeResult<EncodedFrame>) + Send + 'static>;

/// Dispatches encode jobs onto a worker pool.
#[derive(Clone)]
pub struct EncodeScheduler {
    pool: Arc<dyn WorkerPool>,
}

impl EncodeScheduler {
    pub fn new(pool: Arc<dyn WorkerPool>) -> Self {
        Self { pool }
    }

    /// Run `encode` against `owner` on a worker and deliver the result to
    /// `callback`.
    ///
    /// The cloned `owner` Arc is the job's strong reference; it drops when
    /// the job completes. Cancellation is not supported: a submitted job
    /// always runs and always invokes its callback.
    pub fn submit<T, F>(&self, owner: Arc<T>, encode: F, callback: EncodeCallback)
    where
        T: Send + Sync + 'static,
        F: FnOnce(&T) -> StillframeResult<EncodedFrame> + Send + 'static,
    {
        self.pool.execute(Box::new(move || {
            let result = encode(&owner);
            if let Err(ref e) = result {
                tracing::warn!(error = %e, "Background encode failed");
            }
            callback(result);
        }));
    }
}
