//! Principal reconciliation.
//!
//! A verified token is not an identity. Its subject may be unknown here,
//! and its scopes describe what the *client* negotiated, not what the
//! *user* holds. Reconciliation reads the local record, expands the
//! stored grants, and — on the token path — intersects the expansion with
//! the claimed scopes. Only that reconciled set may be exercised:
//!
//! - a client requesting a scope the user does not hold must not gain it;
//! - a user capability the client never requested must not be silently
//!   exercised.
//!
//! The direct credential path has no client in between, so the full
//! expanded grant set applies.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::{AuthzError, Result};
use crate::expand::{expand, ROLE_ADMIN};
use crate::store::{StoredIdentity, UserStore};
use crate::types::{Principal, TokenClaims};

/// Builds the authoritative [`Principal`] for one request.
///
/// Stateless apart from the store handle; one store read per
/// reconciliation (two on the direct path, where credentials are checked
/// first).
#[derive(Clone)]
pub struct PrincipalReconciler {
    store: Arc<dyn UserStore>,
}

impl PrincipalReconciler {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Token path: reconcile externally-verified claims against the local
    /// record.
    ///
    /// Effective authorities are `expand(grants, attributes) ∩ scopes`.
    /// An unknown subject fails with [`AuthzError::UnknownSubject`] — an
    /// authentication failure, distinct from every authorization denial.
    pub async fn reconcile(&self, claims: &TokenClaims) -> Result<Principal> {
        let identity = match self.store.find_by_username(&claims.subject).await? {
            Some(identity) => identity,
            None => {
                // Log the subject here; the error itself stays generic.
                warn!(subject = %claims.subject, "token subject has no local identity");
                return Err(AuthzError::UnknownSubject);
            }
        };
        if !identity.enabled {
            warn!(username = %identity.username, "reconciliation refused for disabled account");
            return Err(AuthzError::DisabledUser);
        }

        let expanded = expand(&identity.grants, &identity.attributes);
        let authorities = expanded
            .intersection(&claims.scopes)
            .cloned()
            .collect();
        let principal = Self::into_principal(identity, authorities);

        info!(
            username = %principal.username(),
            authorities = principal.authorities().len(),
            "principal reconciled from token claims"
        );
        Ok(principal)
    }

    /// Direct path: username/password login with no token in between.
    ///
    /// Effective authorities are the full expansion of the stored grants;
    /// there is no client-negotiated scope set to intersect with.
    pub async fn reconcile_direct(&self, username: &str, password: &str) -> Result<Principal> {
        let identity = self
            .store
            .find_by_username(username)
            .await?
            .ok_or(AuthzError::UnknownSubject)?;

        if !self.store.verify_password(username, password).await? {
            warn!(username, "direct login with invalid credentials");
            return Err(AuthzError::InvalidCredentials);
        }
        if !identity.enabled {
            warn!(username, "direct login refused for disabled account");
            return Err(AuthzError::DisabledUser);
        }

        let authorities = expand(&identity.grants, &identity.attributes);
        let principal = Self::into_principal(identity, authorities);

        info!(username = %principal.username(), "principal reconciled from direct credentials");
        Ok(principal)
    }

    fn into_principal(
        identity: StoredIdentity,
        authorities: std::collections::BTreeSet<String>,
    ) -> Principal {
        // Admin status comes from the stored grants before expansion or
        // intersection; a token cannot mint or mask it.
        let is_admin = identity.grants.contains(ROLE_ADMIN);
        debug!(
            username = %identity.username,
            is_admin,
            "building principal"
        );
        Principal::new(identity.id, identity.username, authorities, is_admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expand::{RESOLUTION_READ, RESOLUTION_WRITE};
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::{BTreeMap, BTreeSet};
    use uuid::Uuid;

    struct FixtureStore {
        identities: Vec<StoredIdentity>,
        password: &'static str,
    }

    #[async_trait]
    impl UserStore for FixtureStore {
        async fn find_by_username(&self, username: &str) -> Result<Option<StoredIdentity>> {
            Ok(self
                .identities
                .iter()
                .find(|i| i.username == username)
                .cloned())
        }

        async fn verify_password(&self, username: &str, password: &str) -> Result<bool> {
            Ok(self.identities.iter().any(|i| i.username == username)
                && password == self.password)
        }
    }

    fn grants(list: &[&str]) -> BTreeSet<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn identity(username: &str, granted: &[&str]) -> StoredIdentity {
        StoredIdentity {
            id: Uuid::new_v4(),
            username: username.to_string(),
            enabled: true,
            grants: grants(granted),
            attributes: BTreeMap::new(),
        }
    }

    fn reconciler(identities: Vec<StoredIdentity>) -> PrincipalReconciler {
        PrincipalReconciler::new(Arc::new(FixtureStore {
            identities,
            password: "password",
        }))
    }

    #[tokio::test]
    async fn test_token_scopes_cap_stored_grants() {
        let sut = reconciler(vec![identity("josh", &[RESOLUTION_READ, RESOLUTION_WRITE])]);
        let claims = TokenClaims::new("josh", grants(&[RESOLUTION_READ]));

        let principal = sut.reconcile(&claims).await.expect("known subject");
        assert_eq!(principal.authorities(), &grants(&[RESOLUTION_READ]));
    }

    #[tokio::test]
    async fn test_stored_grants_cap_token_scopes() {
        let sut = reconciler(vec![identity("josh", &[RESOLUTION_READ])]);
        let claims = TokenClaims::new("josh", grants(&[RESOLUTION_READ, RESOLUTION_WRITE]));

        let principal = sut.reconcile(&claims).await.expect("known subject");
        assert_eq!(principal.authorities(), &grants(&[RESOLUTION_READ]));
    }

    #[tokio::test]
    async fn test_unknown_subject_is_an_authentication_failure() {
        let sut = reconciler(vec![]);
        let claims = TokenClaims::new("nobody", grants(&[RESOLUTION_READ]));

        let err = sut.reconcile(&claims).await.unwrap_err();
        assert!(matches!(err, AuthzError::UnknownSubject));
    }

    #[tokio::test]
    async fn test_disabled_account_is_rejected_on_both_paths() {
        let mut disabled = identity("carol", &[RESOLUTION_READ]);
        disabled.enabled = false;
        let sut = reconciler(vec![disabled]);

        let claims = TokenClaims::new("carol", grants(&[RESOLUTION_READ]));
        assert!(matches!(
            sut.reconcile(&claims).await.unwrap_err(),
            AuthzError::DisabledUser
        ));
        assert!(matches!(
            sut.reconcile_direct("carol", "password").await.unwrap_err(),
            AuthzError::DisabledUser
        ));
    }

    #[tokio::test]
    async fn test_direct_path_uses_full_expansion() {
        let mut premium = identity("carol", &[RESOLUTION_WRITE]);
        premium
            .attributes
            .insert("subscription".to_string(), json!("premium"));
        let sut = reconciler(vec![premium]);

        let principal = sut
            .reconcile_direct("carol", "password")
            .await
            .expect("valid credentials");
        assert!(principal.has_authority(RESOLUTION_WRITE));
        assert!(principal.has_authority("resolution:share"));
    }

    #[tokio::test]
    async fn test_direct_path_rejects_bad_password() {
        let sut = reconciler(vec![identity("carol", &[RESOLUTION_READ])]);
        let err = sut.reconcile_direct("carol", "wrong").await.unwrap_err();
        assert!(matches!(err, AuthzError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_admin_flag_survives_scope_intersection() {
        let sut = reconciler(vec![identity("admin", &[ROLE_ADMIN])]);
        // The client asked for nothing the expansion produces, so the
        // effective authority set is empty; admin status is unaffected.
        let claims = TokenClaims::new("admin", grants(&["unrelated:scope"]));

        let principal = sut.reconcile(&claims).await.expect("known subject");
        assert!(principal.is_admin());
        assert!(principal.authorities().is_empty());
    }

    #[tokio::test]
    async fn test_token_path_never_exceeds_scope_even_after_expansion() {
        // ROLE_ADMIN expands to read+write, but the token only asked for
        // read, so write must not leak through.
        let sut = reconciler(vec![identity("admin", &[ROLE_ADMIN])]);
        let claims = TokenClaims::new("admin", grants(&[RESOLUTION_READ]));

        let principal = sut.reconcile(&claims).await.expect("known subject");
        assert_eq!(principal.authorities(), &grants(&[RESOLUTION_READ]));
    }
}
