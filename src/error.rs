//! Error types of the crate.

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CliqueError>;

/// Errors raised while building instances, encoding them or running solvers.
#[derive(Error, Debug)]
pub enum CliqueError {
    /// a configuration value is out of its valid range
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// the adjacency matrix does not describe a simple undirected graph
    #[error("invalid graph: {0}")]
    InvalidGraph(String),

    /// too many vertices for an exhaustive enumeration
    #[error("too many vertices for exhaustive enumeration: {n} (max: {max})")]
    TooManyVertices {
        /// number of vertices of the instance
        n: usize,
        /// largest supported number of vertices
        max: usize,
    },

    /// too many qubits for the state-vector / diagonal solvers
    #[error("too many qubits: {n} (max: {max})")]
    TooManyQubits {
        /// number of qubits of the operator
        n: usize,
        /// largest supported number of qubits
        max: usize,
    },

    /// two objects that should share a dimension do not
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// expected dimension
        expected: usize,
        /// actual dimension
        got: usize,
    },

    /// an instance file could not be parsed
    #[error("parse error: {0}")]
    Parse(String),

    /// underlying I/O failure
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failure
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
