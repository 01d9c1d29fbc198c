//! Policy error types.

use numalign_core::AffinityError;
use thiserror::Error;

/// Errors that abort a single admission decision.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    #[error("affinity error: {0}")]
    Affinity(#[from] AffinityError),

    #[error("unknown topology policy: {0}")]
    UnknownPolicy(String),
}

pub type PolicyResult<T> = Result<T, PolicyError>;
