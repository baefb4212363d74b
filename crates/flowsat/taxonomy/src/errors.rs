//! Error types for taxonomy construction

use crate::NodeId;

/// Errors raised while building or querying a taxonomy registry
#[derive(Debug, thiserror::Error)]
pub enum TaxonomyError {
    #[error("Taxonomy node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Conflicting definition for node: {0}")]
    ConflictingDefinition(NodeId),

    #[error("Node '{parent}' cannot own child '{child}'")]
    InvalidChild { parent: NodeId, child: NodeId },

    #[error("Taxonomy root missing: {0}")]
    MissingRoot(NodeId),

    #[error("Type '{0}' is not placed under any data dimension")]
    NoDimension(NodeId),
}

/// Result type for taxonomy operations
pub type TaxonomyResult<T> = Result<T, TaxonomyError>;
