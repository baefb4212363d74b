//! Error types for the synthesis engine.

use flowsat_encoding::{Atom, EncodingError};

/// Errors raised by a SAT solver backend
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    #[error("Failed to run solver '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Solver I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed solver output: {0}")]
    MalformedOutput(String),

    #[error("Solver gave up after {0} decisions")]
    LimitExceeded(u64),
}

/// Errors raised while decoding a solver assignment
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("Malformed literal in assignment: '{0}'")]
    MalformedToken(String),

    #[error("Atom {0} is not part of the encoding")]
    UnknownAtom(Atom),
}

/// Errors raised while loading or validating a run configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cannot read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Errors surfaced by a synthesis run
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),

    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Synthesis worker for length {0} panicked")]
    WorkerPanicked(usize),
}

/// Result type for solver backends
pub type SolverResult<T> = Result<T, SolverError>;

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
