//! Authorization decision core for the resolutions application.
//!
//! This crate reconciles externally-issued token claims against the
//! locally-owned permission store and enforces per-operation and
//! per-resource access decisions. It is a library consumed by a
//! request-handling layer, not a service: no transport, no token
//! cryptography, no storage engine.
//!
//! # Architecture Overview
//!
//! A request moves through the subsystem in a fixed order:
//!
//! 1. **Token verification** (external) produces [`TokenClaims`]
//! 2. **Reconciliation** builds the authoritative [`Principal`] from the
//!    claims plus the [`UserStore`] record
//! 3. **Pre-authorization** gates entry to the operation
//! 4. The operation executes against storage (external)
//! 5. **Post-authorization** or **post-filter** gates the response
//!
//! Any step failing its decision is terminal for that request. Nothing
//! here persists between calls, so requests reconcile and decide fully in
//! parallel with no cross-request interaction.
//!
//! # Trust Model
//!
//! The external token is never the sole source of truth. Its scopes are
//! what the client negotiated; the store's grants are what the user
//! holds; only their intersection may be exercised on the token path. The
//! direct credential path skips the client entirely and gets the full
//! expanded grant set.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use authz::{pre_authorize, PrincipalReconciler, TokenClaims, RESOLUTION_READ};
//! # use authz::{Result, StoredIdentity, UserStore};
//! # use async_trait::async_trait;
//! # struct SomeStore;
//! # #[async_trait]
//! # impl UserStore for SomeStore {
//! #     async fn find_by_username(&self, _: &str) -> Result<Option<StoredIdentity>> { Ok(None) }
//! #     async fn verify_password(&self, _: &str, _: &str) -> Result<bool> { Ok(false) }
//! # }
//!
//! # async fn handle(claims: TokenClaims) -> Result<()> {
//! let reconciler = PrincipalReconciler::new(Arc::new(SomeStore));
//! let principal = reconciler.reconcile(&claims).await?;
//! if pre_authorize(&principal, RESOLUTION_READ).is_allowed() {
//!     // run the operation, then post_authorize / post_filter the result
//! }
//! # Ok(())
//! # }
//! ```

pub mod decision;
pub mod error;
pub mod expand;
pub mod reconcile;
pub mod store;
pub mod types;

pub use decision::{post_authorize, post_filter, pre_authorize};
pub use error::{AuthzError, Result};
pub use expand::{
    expand, PREMIUM_TIER, RESOLUTION_READ, RESOLUTION_SHARE, RESOLUTION_WRITE, ROLE_ADMIN,
    SUBSCRIPTION_ATTRIBUTE,
};
pub use reconcile::PrincipalReconciler;
pub use store::{StoredIdentity, UserStore};
pub use types::{Decision, DenialReason, OwnedResource, Principal, TokenClaims};
