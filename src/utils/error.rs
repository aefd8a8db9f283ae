//! Error types for the image converter.
//!
//! Provides a hierarchy of error types using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for the converter.
///
/// Per-entry failures are isolated by the queue; these variants describe what
/// went wrong inside a single operation.
#[derive(Error, Debug)]
pub enum ConverterError {
    /// Source bytes could not be interpreted as a raster image
    #[error("Decode error: {0}")]
    Decode(String),

    /// Rasterization succeeded but re-encoding to the target format failed
    #[error("Encode error: {0}")]
    Encode(String),

    /// Unsupported or unrecognized image format
    #[error("Format error: {0}")]
    Format(String),

    /// Download or archive construction failed after conversion succeeded
    #[error("Export error: {0}")]
    Export(String),
}

/// Convenience result type for converter operations.
pub type ConverterResult<T> = Result<T, ConverterError>;

// Helper methods for error creation
impl ConverterError {
    pub fn decode<T: Into<String>>(msg: T) -> Self {
        Self::Decode(msg.into())
    }

    pub fn encode<T: Into<String>>(msg: T) -> Self {
        Self::Encode(msg.into())
    }

    pub fn format<T: Into<String>>(msg: T) -> Self {
        Self::Format(msg.into())
    }

    pub fn export<T: Into<String>>(msg: T) -> Self {
        Self::Export(msg.into())
    }
}

// Convert zip errors at the packaging boundary
impl From<zip::result::ZipError> for ConverterError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::Export(err.to_string())
    }
}
