//! Checkpoint error types.

use thiserror::Error;

/// Errors that can occur while saving or restoring a session checkpoint.
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Checkpoint version is not supported by this build
    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Checkpoint data is internally inconsistent
    #[error("Checkpoint validation failed: {0}")]
    ValidationFailed(String),

    /// Reading or writing the checkpoint file failed
    #[error("Checkpoint I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
