//! Core types for the authorization decision subsystem.
//!
//! # Security Considerations
//!
//! - A [`Principal`] is only ever produced by reconciliation against the
//!   local user store. Never construct one from token claims alone: the
//!   token tells us what a *client* asked for, the store tells us what the
//!   *user* actually holds, and only their reconciliation is trustworthy.
//! - [`TokenClaims`] arrive from an external verifier. Signature and expiry
//!   checks are that verifier's job; this subsystem treats the claims as
//!   syntactically valid but *semantically unproven* until reconciled.
//! - A [`Decision`] is all-or-nothing. There is no partial allow, and a
//!   deny always carries the reason so callers can distinguish a missing
//!   capability from a foreign resource.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

/// The authoritative identity for one request's decisions.
///
/// Built once per request by the
/// [`PrincipalReconciler`](crate::reconcile::PrincipalReconciler), then
/// passed by reference through the call chain. Immutable after
/// construction and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    id: Uuid,
    username: String,
    authorities: BTreeSet<String>,
    is_admin: bool,
}

impl Principal {
    /// Creates a principal from already-reconciled parts.
    pub fn new(
        id: Uuid,
        username: impl Into<String>,
        authorities: BTreeSet<String>,
        is_admin: bool,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            authorities,
            is_admin,
        }
    }

    /// The local identity this principal was reconciled against.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// The effective authority set for this request.
    pub fn authorities(&self) -> &BTreeSet<String> {
        &self.authorities
    }

    /// Whether the stored (pre-expansion) grants contained `ROLE_ADMIN`.
    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.contains(authority)
    }
}

/// Claims handed over by external token verification.
///
/// Read-only input to reconciliation. The `scopes` are what the client was
/// permitted to request, not what the user holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// The username the token was issued for.
    pub subject: String,
    /// Capability strings the client requested and was granted at the
    /// token endpoint.
    pub scopes: BTreeSet<String>,
    /// Remaining claims, passed through untouched.
    #[serde(default)]
    pub attributes: BTreeMap<String, serde_json::Value>,
}

impl TokenClaims {
    pub fn new(subject: impl Into<String>, scopes: BTreeSet<String>) -> Self {
        Self {
            subject: subject.into(),
            scopes,
            attributes: BTreeMap::new(),
        }
    }
}

/// Why a check denied access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DenialReason {
    /// Pre-check: the required authority is absent and the principal is
    /// not an admin.
    InsufficientAuthority,
    /// Post-check: the resource exists but belongs to someone else.
    NotOwner,
}

impl std::fmt::Display for DenialReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DenialReason::InsufficientAuthority => write!(f, "insufficient authority"),
            DenialReason::NotOwner => write!(f, "not the resource owner"),
        }
    }
}

/// The outcome of an access check.
///
/// Invariant: `reason` is `Some` exactly when the decision is a deny, so
/// matching on [`Decision::reason`] covers both arms without a separate
/// boolean check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    allowed: bool,
    reason: Option<DenialReason>,
}

impl Decision {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    pub fn deny(reason: DenialReason) -> Self {
        Self {
            allowed: false,
            reason: Some(reason),
        }
    }

    pub fn is_allowed(&self) -> bool {
        self.allowed
    }

    /// The denial reason, present exactly when the check denied.
    pub fn reason(&self) -> Option<DenialReason> {
        self.reason
    }
}

/// A resource guarded by ownership checks.
///
/// `owner_id` is bound to the creating principal's id when the resource is
/// made and is never reassigned; comparison is plain identity equality
/// with no hierarchy or group ownership.
pub trait OwnedResource {
    fn owner_id(&self) -> Uuid;
}
