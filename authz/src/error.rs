//! Error types for principal reconciliation.
//!
//! # Security Note
//! These errors cover the *authentication* side of the subsystem only.
//! Authorization outcomes are [`Decision`](crate::types::Decision) values,
//! never errors — a denied check is a normal, well-formed result. Keeping
//! the two apart lets the calling layer map authentication failures to a
//! generic 401 without ever conflating them with 403/404 policy.

use thiserror::Error;

/// Errors that can occur while building a [`Principal`](crate::types::Principal).
///
/// # Security Guidelines
/// - `UnknownSubject` must never echo the probed username; whether an
///   account exists is not something a caller gets to learn from the
///   error message.
/// - Callers should collapse all variants into one generic authentication
///   failure at the presentation boundary. The distinct variants exist for
///   logging and tests, not for end users.
#[derive(Debug, Error)]
pub enum AuthzError {
    /// The token's subject has no matching local identity.
    ///
    /// This is an authentication failure, not an authorization one: no
    /// principal could be established at all.
    #[error("unknown subject")]
    UnknownSubject,

    /// Direct-path credentials did not match the stored record.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The identity exists but has been disabled.
    #[error("account disabled")]
    DisabledUser,

    /// The user store failed while looking up an identity.
    ///
    /// Wraps whatever the backing store reported; the store itself is an
    /// external collaborator and its failures are not decisions.
    #[error("user store error: {0}")]
    Store(String),
}

/// A specialized Result type for reconciliation operations.
pub type Result<T> = std::result::Result<T, AuthzError>;
