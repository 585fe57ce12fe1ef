//! # Error Handling Module
//!
//! ## Purpose
//! Centralized error handling for the judgment pipeline, providing structured
//! error types and conversion utilities for all system components.
//!
//! ## Input/Output Specification
//! - **Input**: Error conditions from configuration, storage, and adapters
//! - **Output**: Structured error types with context
//! - **Error Categories**: Configuration, Validation, Markup, Storage, Internal
//!
//! ## Design
//! Malformed documents are never an error in this subsystem: segmentation,
//! scoring, ranking, summarization, and extraction all degrade to empty
//! results. Only genuine programming or configuration mistakes (an unknown
//! statistical method, a zero summary length, an unreadable database) surface
//! as `PipelineError`.

use thiserror::Error;

/// Result type used throughout the application
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Error types for the judgment pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Configuration errors (unreadable file, bad values)
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Validation errors rejected eagerly at the API boundary
    #[error("Validation failed for field '{field}': {reason}")]
    ValidationFailed { field: String, reason: String },

    /// Markup that an adapter could not map into a raw document
    #[error("Failed to parse markup from {source_name}: {details}")]
    Markup {
        source_name: String,
        details: String,
    },

    /// Document store errors
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// Serialization/deserialization errors
    #[error("Serialization failed: {message}")]
    Serialization { message: String },

    /// Internal system errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl PipelineError {
    /// Get error category for metrics and logging
    pub fn category(&self) -> &'static str {
        match self {
            PipelineError::Config { .. } => "configuration",
            PipelineError::ValidationFailed { .. } => "validation",
            PipelineError::Markup { .. } => "ingestion",
            PipelineError::Storage { .. } => "storage",
            PipelineError::Serialization { .. } => "serialization",
            PipelineError::Internal { .. } => "generic",
        }
    }
}

// Conversion from common error types
impl From<std::io::Error> for PipelineError {
    fn from(err: std::io::Error) -> Self {
        PipelineError::Internal {
            message: format!("IO error: {}", err),
        }
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(err: serde_json::Error) -> Self {
        PipelineError::Serialization {
            message: format!("JSON serialization error: {}", err),
        }
    }
}

impl From<bincode::Error> for PipelineError {
    fn from(err: bincode::Error) -> Self {
        PipelineError::Serialization {
            message: format!("Binary serialization error: {}", err),
        }
    }
}

impl From<toml::de::Error> for PipelineError {
    fn from(err: toml::de::Error) -> Self {
        PipelineError::Config {
            message: format!("TOML parse error: {}", err),
        }
    }
}

impl From<sled::Error> for PipelineError {
    fn from(err: sled::Error) -> Self {
        PipelineError::Storage {
            message: err.to_string(),
        }
    }
}
