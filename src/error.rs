//! Error handling for Wavetrim
//!
//! Every operation returns a local failure to its immediate caller; nothing
//! is swallowed and nothing crashes the process. A failed operation leaves
//! the session in its last-known-good state.

use thiserror::Error;

/// Result type alias for Wavetrim operations
pub type Result<T> = std::result::Result<T, TrimError>;

/// Main error type for Wavetrim operations
#[derive(Error, Debug)]
pub enum TrimError {
    /// The decoder collaborator could not turn the input bytes into audio
    #[error("Failed to decode audio: {reason}")]
    Decode {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Render range falls outside the buffer bounds
    #[error("Invalid region [{start:.3}s, {end:.3}s) for a {duration:.3}s buffer")]
    InvalidRange {
        start: f64,
        end: f64,
        duration: f64,
    },

    /// Render range rounds down to zero frames
    #[error("Region [{start:.6}s, {end:.6}s) contains no frames")]
    EmptyRange { start: f64, end: f64 },

    /// Selection falls outside the current buffer bounds
    #[error("Invalid selection [{start:.3}s, {end:.3}s) for a {duration:.3}s buffer")]
    InvalidSelection {
        start: f64,
        end: f64,
        duration: f64,
    },

    /// An edit was attempted before the first successful load
    #[error("No audio loaded: load a file before editing")]
    NotReady,

    /// The encoder cannot represent a buffer with no channels
    #[error("Cannot encode a buffer with zero channels")]
    UnsupportedChannelLayout,

    /// The PCM payload does not fit the container's 32-bit size fields
    #[error("PCM payload of {data_bytes} bytes exceeds the WAV container size limit")]
    EncodingOverflow { data_bytes: u64 },
}

impl TrimError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            TrimError::Decode { .. } => "DECODE_ERROR",
            TrimError::InvalidRange { .. } => "INVALID_RANGE",
            TrimError::EmptyRange { .. } => "EMPTY_RANGE",
            TrimError::InvalidSelection { .. } => "INVALID_SELECTION",
            TrimError::NotReady => "NOT_READY",
            TrimError::UnsupportedChannelLayout => "UNSUPPORTED_CHANNEL_LAYOUT",
            TrimError::EncodingOverflow { .. } => "ENCODING_OVERFLOW",
        }
    }

    /// Check if this error is recoverable by changed user input
    ///
    /// Decode/render/encode are deterministic, so retrying the same call
    /// with the same input reproduces the same error. Recoverable here means
    /// a different selection or a different source file can succeed.
    pub fn is_recoverable(&self) -> bool {
        match self {
            TrimError::Decode { .. } => true,
            TrimError::InvalidRange { .. } => true,
            TrimError::EmptyRange { .. } => true,
            TrimError::InvalidSelection { .. } => true,
            TrimError::NotReady => true,
            TrimError::UnsupportedChannelLayout => false,
            TrimError::EncodingOverflow { .. } => false,
        }
    }
}
