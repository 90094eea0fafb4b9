//! Error types for the commap pipeline.
//!
//! The pipeline itself is total; these cover the edges where data enters or
//! leaves it (source documents, parameters, export sinks).

use thiserror::Error;

/// Primary error type for commap operations.
#[derive(Error, Debug)]
pub enum MapError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("source document is not a JSON array (got {got})")]
    NotAnArray { got: &'static str },

    #[error("invalid cluster parameters: {0}")]
    InvalidParams(String),

    #[error("unknown layer: {0}")]
    UnknownLayer(String),
}

/// Convenience Result type alias for MapError.
pub type Result<T> = std::result::Result<T, MapError>;
