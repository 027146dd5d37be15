//! Resolution operations, gated by explicit access decisions.
//!
//! Every operation follows the same shape: pre-authorize the entry,
//! execute against the store, then post-authorize or post-filter the
//! result. The post-checks run on what the operation already produced —
//! a principal who ends up denied still caused the fetch (and for
//! `revise`/`complete`, the mutation); the denial discards the result
//! instead of preventing the work.

use std::sync::Arc;
use tracing::{debug, warn};

use authz::{
    post_authorize, post_filter, pre_authorize, Principal, RESOLUTION_READ, RESOLUTION_SHARE,
    RESOLUTION_WRITE,
};
use uuid::Uuid;

use crate::error::{ResolutionError, Result};
use crate::resolution::Resolution;
use crate::store::ResolutionStore;

/// The operation surface over resolutions.
pub struct ResolutionService {
    store: Arc<dyn ResolutionStore>,
}

impl ResolutionService {
    pub fn new(store: Arc<dyn ResolutionStore>) -> Self {
        Self { store }
    }

    /// Lists the resolutions the principal may see.
    ///
    /// Requires `resolution:read`; non-admins get the owned subsequence
    /// of the full listing, in store order.
    pub async fn list(&self, principal: &Principal) -> Result<Vec<Resolution>> {
        self.require(principal, RESOLUTION_READ)?;
        let all = self.store.find_all().await?;
        Ok(post_filter(principal, all))
    }

    /// Reads a single resolution by id.
    ///
    /// Requires `resolution:read`. A foreign resolution answers
    /// `Forbidden(NotOwner)`, a missing one `NotFound`; the two never
    /// collapse into each other.
    pub async fn read(&self, principal: &Principal, id: Uuid) -> Result<Resolution> {
        self.require(principal, RESOLUTION_READ)?;
        self.fetch_owned(principal, id).await
    }

    /// Creates a resolution owned by the acting principal.
    ///
    /// Requires `resolution:write`. Ownership is bound here, once; there
    /// is no reassignment anywhere.
    pub async fn create(&self, principal: &Principal, text: impl Into<String>) -> Result<Resolution> {
        self.require(principal, RESOLUTION_WRITE)?;
        let resolution = Resolution::new(text, principal.id());
        debug!(id = %resolution.id, owner = %principal.username(), "creating resolution");
        self.store.save(resolution).await
    }

    /// Rewrites a resolution's text.
    ///
    /// Requires `resolution:write`. The update executes before the
    /// ownership check on the read-back; a denied principal's result is
    /// discarded, not the write.
    pub async fn revise(
        &self,
        principal: &Principal,
        id: Uuid,
        text: impl Into<String>,
    ) -> Result<Resolution> {
        self.require(principal, RESOLUTION_WRITE)?;
        self.store.revise(id, text.into()).await?;
        self.fetch_owned(principal, id).await
    }

    /// Marks a resolution completed.
    ///
    /// Requires `resolution:write`; same post-check ordering as
    /// [`ResolutionService::revise`].
    pub async fn complete(&self, principal: &Principal, id: Uuid) -> Result<Resolution> {
        self.require(principal, RESOLUTION_WRITE)?;
        self.store.complete(id).await?;
        self.fetch_owned(principal, id).await
    }

    /// Hands out a copy of a resolution for sharing.
    ///
    /// Requires `resolution:share`, which only premium subscribers with
    /// write capability ever hold (it is derived, never granted raw).
    pub async fn share(&self, principal: &Principal, id: Uuid) -> Result<Resolution> {
        self.require(principal, RESOLUTION_SHARE)?;
        self.fetch_owned(principal, id).await
    }

    /// Pre-authorization gate shared by every operation.
    fn require(&self, principal: &Principal, authority: &str) -> Result<()> {
        match pre_authorize(principal, authority).reason() {
            Some(reason) => {
                warn!(
                    username = %principal.username(),
                    authority,
                    %reason,
                    "operation denied before execution"
                );
                Err(ResolutionError::Forbidden(reason))
            }
            None => Ok(()),
        }
    }

    /// Fetches by id and post-authorizes the candidate result.
    async fn fetch_owned(&self, principal: &Principal, id: Uuid) -> Result<Resolution> {
        let found = self.store.find_by_id(id).await?;
        match post_authorize(principal, found.as_ref()).reason() {
            Some(reason) => {
                warn!(username = %principal.username(), %id, %reason, "result discarded");
                Err(ResolutionError::Forbidden(reason))
            }
            None => found.ok_or(ResolutionError::NotFound),
        }
    }
}
