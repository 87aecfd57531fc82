//! Error types for the I/O-facing edges of diagnosis.
//!
//! Extraction, rule evaluation and composition never fail; only loading
//! configuration or editor dumps and calling the remote advisor do.

use thiserror::Error;

/// Errors that can occur around the diagnostic core.
#[derive(Debug, Error)]
pub enum DoctorError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The remote advisor could not produce advice.
    #[error("remote advice failed: {0}")]
    RemoteAdvice(String),
}

/// Convenience alias for results with [`DoctorError`].
pub type Result<T> = std::result::Result<T, DoctorError>;
