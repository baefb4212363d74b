//! Error types for CNF generation

use flowsat_taxonomy::{NodeId, TaxonomyError};

/// Errors that abort the encoding of one automaton
#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    #[error("Workflow length must be at least 1, got {0}")]
    InvalidLength(usize),

    #[error("Invalid branching: {0} inputs / {1} outputs")]
    InvalidBranching(usize, usize),

    #[error("Taxonomy root not registered: {0}")]
    UnknownRoot(NodeId),

    #[error("Taxonomy error: {0}")]
    Taxonomy(#[from] TaxonomyError),
}

/// Result type for encoding operations
pub type EncodingResult<T> = Result<T, EncodingError>;

/// Errors local to one constraint or workflow I/O slot.
///
/// These never abort the encoding: the offending entry contributes no
/// clauses and the rest of the problem is generated as usual.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConstraintError {
    #[error("Unknown constraint template: {0}")]
    UnknownTemplate(String),

    #[error("Template '{template}' expects {expected} parameter(s), got {found}")]
    ArityMismatch {
        template: String,
        expected: usize,
        found: usize,
    },

    #[error("Unknown module: {0}")]
    UnknownModule(NodeId),

    #[error("Unknown data type: {0}")]
    UnknownType(NodeId),

    #[error("{0} slot(s) declared but the block holds only {1}")]
    TooManySlots(usize, usize),
}

/// A constraint or I/O slot that was reported and skipped
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RejectedEntry {
    /// What was being encoded, e.g. `input slot 0` or `use-type(png)`
    pub entry: String,
    pub error: ConstraintError,
}

impl RejectedEntry {
    pub fn new(entry: impl Into<String>, error: ConstraintError) -> Self {
        Self {
            entry: entry.into(),
            error,
        }
    }
}

impl std::fmt::Display for RejectedEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.entry, self.error)
    }
}
