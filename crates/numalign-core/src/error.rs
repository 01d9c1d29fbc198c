//! Error types for the affinity algebra.

use thiserror::Error;

/// Result type alias for affinity operations.
pub type AffinityResult<T> = Result<T, AffinityError>;

/// Errors raised while building or combining affinity bitmasks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AffinityError {
    /// The identifier is not one of the machine's NUMA nodes.
    #[error("invalid NUMA node {node}: not in machine topology {known:?}")]
    InvalidNode { node: usize, known: Vec<usize> },

    /// Two bitmasks were built against different machine topologies.
    #[error("NUMA universe mismatch: {left:?} vs {right:?}")]
    UniverseMismatch { left: Vec<usize>, right: Vec<usize> },
}
