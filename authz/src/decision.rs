//! The access decision point: pre-check, post-check, post-filter.
//!
//! All three entry points are pure functions of their arguments — no
//! shared state, no storage calls, identical inputs always yield
//! identical decisions. The calling layer invokes them explicitly around
//! each operation instead of relying on interception:
//!
//! 1. [`pre_authorize`] gates entry to the operation;
//! 2. the operation runs against storage;
//! 3. [`post_authorize`] or [`post_filter`] gates the result.
//!
//! The post-checks deliberately run *after* the fetch. A principal who
//! will be denied still causes the read to happen; the denial discards
//! the result rather than preventing the fetch.

use tracing::debug;

use crate::types::{Decision, DenialReason, OwnedResource, Principal};

/// Operation-level check, made before the operation executes.
///
/// Allowed for admins regardless of the required authority, otherwise
/// only when the principal's effective authority set contains it.
pub fn pre_authorize(principal: &Principal, required_authority: &str) -> Decision {
    if principal.is_admin() || principal.has_authority(required_authority) {
        return Decision::allow();
    }
    debug!(
        username = %principal.username(),
        required_authority,
        "pre-authorization denied"
    );
    Decision::deny(DenialReason::InsufficientAuthority)
}

/// Single-resource ownership check, made on an operation's result.
///
/// `None` is allowed: absence is the caller's "not found", never an
/// authorization failure, and the two must stay distinguishable so the
/// caller can pick its own 403-versus-404 policy.
pub fn post_authorize<R: OwnedResource>(principal: &Principal, resource: Option<&R>) -> Decision {
    let Some(resource) = resource else {
        return Decision::allow();
    };
    if principal.is_admin() || resource.owner_id() == principal.id() {
        return Decision::allow();
    }
    debug!(username = %principal.username(), "post-authorization denied");
    Decision::deny(DenialReason::NotOwner)
}

/// Collection ownership filter, made on an operation's result.
///
/// Admins see the input unchanged; everyone else gets the owned
/// subsequence in its original order. Never a denial — an empty result is
/// a valid outcome, not an error.
pub fn post_filter<R: OwnedResource>(principal: &Principal, resources: Vec<R>) -> Vec<R> {
    if principal.is_admin() {
        return resources;
    }
    let before = resources.len();
    let owned: Vec<R> = resources
        .into_iter()
        .filter(|r| r.owner_id() == principal.id())
        .collect();
    debug!(
        username = %principal.username(),
        kept = owned.len(),
        dropped = before - owned.len(),
        "post-filter applied"
    );
    owned
}
