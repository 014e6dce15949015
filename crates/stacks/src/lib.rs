//! Stillframe Canvas Variants
//!
//! The three public canvas objects, thin orchestration over the raster and
//! encode crates:
//! - [`StillImage`]: encodes a caller-supplied buffer directly, no
//!   compositing
//! - [`FixedCanvas`]: accepts fragments, always encodes the full canvas
//! - [`DynamicCanvas`]: accepts fragments with dirty tracking, encodes only
//!   the accumulated dirty rectangle

pub mod dynamic;
pub mod fixed;
pub mod whole;

pub use dynamic::DynamicCanvas;
pub use fixed::FixedCanvas;
pub use whole::StillImage;

use std::sync::{Mutex, MutexGuard, PoisonError};

use stillframe_common::error::{StillframeError, StillframeResult};

/// Validate a 0-100 percentage setting coming from an untyped caller.
pub(crate) fn validate_percent(value: i32, what: &str) -> StillframeResult<u8> {
    if value < 0 {
        return Err(StillframeError::argument(format!(
            "{what} must be greater or equal to 0."
        )));
    }
    if value > 100 {
        return Err(StillframeError::argument(format!(
            "{what} must be less than or equal to 100."
        )));
    }
    Ok(value as u8)
}

/// Lock a state mutex, recovering from poisoning.
///
/// The guarded state is plain bytes and small integers; continuing with the
/// inner value after a poisoned lock cannot observe a torn invariant.
pub(crate) fn lock_state<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
