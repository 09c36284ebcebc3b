//! Error types for slider-osc
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using SliderError
pub type Result<T> = std::result::Result<T, SliderError>;

/// Unified error type for slider-osc operations
#[derive(Debug, Error)]
pub enum SliderError {
    // -------------------------------------------------------------------------
    // Input Errors
    // -------------------------------------------------------------------------
    /// A command field could not be parsed; nothing was sent.
    #[error("Validation error: {0}")]
    Validation(String),

    // -------------------------------------------------------------------------
    // Codec Errors
    // -------------------------------------------------------------------------
    /// A value cannot be represented on the wire.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Malformed packet on the decode path.
    #[error("Format error: {0}")]
    Format(String),

    // -------------------------------------------------------------------------
    // Network Errors
    // -------------------------------------------------------------------------
    #[error("Transport error sending to {endpoint}: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SliderError {
    /// True for errors raised before anything was handed to the transport.
    pub fn is_rejection(&self) -> bool {
        matches!(self, SliderError::Validation(_) | SliderError::Encoding(_))
    }
}
