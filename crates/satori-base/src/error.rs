//! Unified error types for Satori.

use thiserror::Error;

/// The main error type for Satori operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Input that does not follow the DIMACS CNF conventions.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Rejected solver configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Internal solver error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, Error>;
