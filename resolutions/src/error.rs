use thiserror::Error;

use authz::{AuthzError, DenialReason};

/// Errors surfaced by resolution operations.
///
/// `Forbidden` and `NotFound` are deliberately separate variants: whether
/// a denied lookup answers 403 or 404 is the embedding layer's policy
/// choice, and collapsing them here would take that choice away.
#[derive(Error, Debug)]
pub enum ResolutionError {
    /// An access decision denied the operation, with the reason the
    /// decision point reported.
    #[error("forbidden: {0}")]
    Forbidden(DenialReason),

    /// The resolution does not exist. Not an authorization outcome.
    #[error("resolution not found")]
    NotFound,

    /// Principal reconciliation or the user store failed.
    #[error(transparent)]
    Auth(#[from] AuthzError),

    /// The resolution store failed.
    #[error("resolution store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, ResolutionError>;
