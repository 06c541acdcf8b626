//! Error handling for WaveLab
//!
//! Every error is local to the operation that raised it; nothing here
//! terminates a running session.

use thiserror::Error;

/// Result type alias for WaveLab operations
pub type Result<T> = std::result::Result<T, WavelabError>;

/// Main error type for WaveLab operations
#[derive(Error, Debug)]
pub enum WavelabError {
    // Configuration Errors
    #[error("Unknown waveform shape: '{shape}' (expected sine, sawtooth, square, or triangle)")]
    UnknownShape { shape: String },

    #[error("Invalid {field}: {reason}")]
    InvalidParameter { field: &'static str, reason: String },

    // Analysis Errors
    #[error("Signal contains no samples")]
    EmptySignal,

    #[error("Spectrum computation failed: {reason}")]
    Spectrum { reason: String },

    // Export Errors
    #[error("Unsupported bit depth: {bits}-bit (only 16, 24, 32 supported)")]
    UnsupportedBitDepth { bits: u16 },

    #[error("No writable application-data directory on this platform")]
    NoDataDir,

    #[error("WAV encoding failed: {reason}")]
    Encode { reason: String },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl WavelabError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            WavelabError::UnknownShape { .. } => "UNKNOWN_SHAPE",
            WavelabError::InvalidParameter { .. } => "INVALID_PARAMETER",
            WavelabError::EmptySignal => "EMPTY_SIGNAL",
            WavelabError::Spectrum { .. } => "SPECTRUM_ERROR",
            WavelabError::UnsupportedBitDepth { .. } => "UNSUPPORTED_BIT_DEPTH",
            WavelabError::NoDataDir => "NO_DATA_DIR",
            WavelabError::Encode { .. } => "ENCODE_ERROR",
            WavelabError::Io(_) => "IO_ERROR",
            WavelabError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Check if this error is recoverable
    ///
    /// Configuration errors are recoverable (the caller re-submits with
    /// corrected input). File-sink failures leave the in-memory session
    /// consistent, so they are recoverable too; only a missing data
    /// directory has no in-session remedy.
    pub fn is_recoverable(&self) -> bool {
        match self {
            WavelabError::UnknownShape { .. } => true,
            WavelabError::InvalidParameter { .. } => true,
            WavelabError::EmptySignal => true,
            WavelabError::UnsupportedBitDepth { .. } => true,
            WavelabError::Encode { .. } => true,
            WavelabError::Io(_) => true,
            _ => false,
        }
    }
}
