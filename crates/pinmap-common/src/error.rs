//! Error types for pinmap operations.

use thiserror::Error;

/// Result type alias using PinmapError.
pub type PinmapResult<T> = Result<T, PinmapError>;

/// Primary error type for pin placement and its collaborators.
#[derive(Debug, Error)]
pub enum PinmapError {
    // === Request Errors ===
    #[error("Invalid crop option '{field}': {message}")]
    InvalidCrop {
        field: &'static str,
        message: String,
    },

    #[error("No usable coordinates to crop around")]
    NoPins,

    #[error("Invalid coordinate: {0}")]
    InvalidCoord(String),

    // === Image Source/Sink Errors ===
    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to encode image: {0}")]
    Encode(String),

    // === Infrastructure Errors ===
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl PinmapError {
    /// Whether the error was caused by the caller's input rather than the environment.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PinmapError::InvalidCrop { .. } | PinmapError::NoPins | PinmapError::InvalidCoord(_)
        )
    }

    /// Process exit code used by command-line front ends.
    pub fn exit_code(&self) -> u8 {
        match self {
            PinmapError::InvalidCrop { .. }
            | PinmapError::NoPins
            | PinmapError::InvalidCoord(_)
            | PinmapError::Config(_) => 2,

            PinmapError::Decode(_) | PinmapError::Encode(_) => 3,

            PinmapError::Io(_) => 74,
        }
    }
}

impl From<std::io::Error> for PinmapError {
    fn from(err: std::io::Error) -> Self {
        PinmapError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PinmapError {
    fn from(err: serde_json::Error) -> Self {
        PinmapError::Config(format!("JSON error: {}", err))
    }
}
