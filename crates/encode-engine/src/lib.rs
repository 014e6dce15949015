//! Stillframe Encode Engine
//!
//! Bridges the canonical canvas to the JPEG codec and schedules encode work
//! onto background workers:
//! - [`codec`]: the narrow adapter over the `image` crate's JPEG encoder
//! - [`pool`]: the injectable worker-pool abstraction
//! - [`scheduler`]: job lifetime management and exactly-once completion

pub mod codec;
pub mod pool;
pub mod scheduler;

pub use codec::{encode_canvas, EncodeOptions, EncodedFrame};
pub use pool::{InlineWorkerPool, TokioWorkerPool, WorkerPool};
pub use scheduler::{EncodeCallback, EncodeScheduler};
