//! Error types shared across Stillframe crates.

/// Top-level error type for Stillframe operations.
#[derive(Debug, thiserror::Error)]
pub enum StillframeError {
    #[error("Invalid argument: {message}")]
    Argument { message: String },

    #[error("Precondition not met: {message}")]
    Precondition { message: String },

    #[error("Bounds violation: {message}")]
    Bounds { message: String },

    #[error("Codec error: {message}")]
    Codec { message: String },

    #[error("Resource exhausted: {message}")]
    Resource { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using StillframeError.
pub type StillframeResult<T> = Result<T, StillframeError>;

impl StillframeError {
    pub fn argument(msg: impl Into<String>) -> Self {
        Self::Argument {
            message: msg.into(),
        }
    }

    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition {
            message: msg.into(),
        }
    }

    pub fn bounds(msg: impl Into<String>) -> Self {
        Self::Bounds {
            message: msg.into(),
        }
    }

    pub fn codec(msg: impl Into<String>) -> Self {
        Self::Codec {
            message: msg.into(),
        }
    }

    pub fn resource(msg: impl Into<String>) -> Self {
        Self::Resource {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}
