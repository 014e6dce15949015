//! Worker pools for background encode jobs.
//!
//! The pool is an explicit, injectable dependency of every canvas variant
//! rather than a process-wide singleton, so the scheduler can be exercised
//! in tests without a real runtime.

use stillframe_common::error::{StillframeError, StillframeResult};

/// Executes encode jobs off the caller's thread.
pub trait WorkerPool: Send + Sync {
    /// Run `job` to completion. Submission never blocks on the job itself.
    fn execute(&self, job: Box<dyn FnOnce() + Send + 'static>);
}

/// Pool backed by tokio's blocking-thread pool.
#[derive(Debug, Clone)]
pub struct TokioWorkerPool {
    handle: tokio::runtime::Handle,
}

impl TokioWorkerPool {
    pub fn new(handle: tokio::runtime::Handle) -> Self {
        Self { handle }
    }

    /// Bind to the runtime of the calling context.
    pub fn current() -> StillframeResult<Self> {
        let handle = tokio::runtime::Handle::try_current().map_err(|_| {
            StillframeError::precondition(
                "No tokio runtime on this thread; construct TokioWorkerPool with an explicit handle",
            )
        })?;
        Ok(Self { handle })
    }
}

impl WorkerPool for TokioWorkerPool {
    fn execute(&self, job: Box<dyn FnOnce() + Send + 'static>) {
        // Encode work is CPU-bound; spawn_blocking keeps it off the async
        // worker threads. The job owns everything it needs, so the handle
        // can be dropped without joining.
        self.handle.spawn_blocking(job);
    }
}

/// Pool that runs each job immediately on the submitting thread.
///
/// For tests and synchronous tools; turns the async encode path into a
/// deterministic call.
#[derive(Debug, Clone, Default)]
pub struct InlineWorkerPool;

impl WorkerPool for InlineWorkerPool {
    fn execute(&self, job: Box<dyn FnOnce() + Send + 'static>) {
        job();
    }
}
