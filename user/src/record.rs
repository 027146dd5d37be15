//! Locally-owned identity records.
//!
//! A [`UserRecord`] is the durable side of an identity: credentials,
//! enabled flag, raw authority grants, and contextual attributes such as
//! the subscription tier. Grant strings are stored verbatim and never
//! interpreted here; expansion into effective capabilities belongs to the
//! `authz` crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

use authz::StoredIdentity;

use crate::password;
use crate::Result;

/// A stored user with its authority grants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    /// Argon2 PHC string; never exposed through [`StoredIdentity`].
    pub password_hash: String,
    pub enabled: bool,
    /// Subscription tier, e.g. `"premium"`; consulted by authority
    /// expansion.
    pub subscription: Option<String>,
    /// Raw authority grants, many per identity.
    pub authorities: BTreeSet<String>,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// Creates an enabled record with a freshly hashed password and no
    /// grants.
    pub fn new(username: impl Into<String>, password: &str) -> Result<Self> {
        Ok(Self {
            id: Uuid::new_v4(),
            username: username.into(),
            password_hash: password::hash(password)?,
            enabled: true,
            subscription: None,
            authorities: BTreeSet::new(),
            created_at: Utc::now(),
        })
    }

    /// Attaches a raw authority grant. Granting the same string twice is
    /// a no-op.
    pub fn grant_authority(&mut self, authority: impl Into<String>) -> &mut Self {
        self.authorities.insert(authority.into());
        self
    }

    pub fn with_subscription(mut self, tier: impl Into<String>) -> Self {
        self.subscription = Some(tier.into());
        self
    }

    /// Contextual attributes as the reconciler consumes them.
    pub fn attributes(&self) -> BTreeMap<String, Value> {
        let mut attributes = BTreeMap::new();
        if let Some(tier) = &self.subscription {
            attributes.insert(authz::SUBSCRIPTION_ATTRIBUTE.to_string(), json!(tier));
        }
        attributes
    }

    /// The store-facing view of this record. Credentials stay behind.
    pub fn to_identity(&self) -> StoredIdentity {
        StoredIdentity {
            id: self.id,
            username: self.username.clone(),
            enabled: self.enabled,
            grants: self.authorities.clone(),
            attributes: self.attributes(),
        }
    }
}
