//! The user-store seam consumed by reconciliation.
//!
//! The permission store is an external collaborator; this module defines
//! only the contract the reconciler needs from it. Implementations live
//! with whatever owns the records (the `user` crate ships an in-memory
//! one).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

use crate::error::Result;

/// A locally-known identity as the store hands it to the reconciler.
///
/// `grants` are raw authority strings, not yet expanded. `attributes`
/// carry contextual facts (subscription tier and the like) that the
/// expansion rules may consult.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredIdentity {
    pub id: Uuid,
    pub username: String,
    pub enabled: bool,
    pub grants: BTreeSet<String>,
    pub attributes: BTreeMap<String, Value>,
}

/// Durable lookup of locally-owned identity records.
///
/// Both methods are reads; the reconciler never writes. Password
/// verification lives here so the storage format of credentials stays an
/// implementation detail of the store.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up an identity record by username.
    async fn find_by_username(&self, username: &str) -> Result<Option<StoredIdentity>>;

    /// Check a plaintext password against the stored credential.
    ///
    /// Returns `Ok(false)` both for a wrong password and for an unknown
    /// username, so timing aside, the result does not reveal which.
    async fn verify_password(&self, username: &str, password: &str) -> Result<bool>;
}
