//! In-memory user store.
//!
//! Backs the `authz::UserStore` seam for tests and embedded use. Records
//! live in a `RwLock`ed map keyed by username; reads clone, so no lock is
//! held across an await point.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::{debug, info};

use authz::{AuthzError, StoredIdentity, UserStore};

use crate::error::{Result, UserError};
use crate::password;
use crate::record::UserRecord;

/// Map-backed [`UserStore`] implementation.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, UserRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record, rejecting duplicate usernames.
    pub fn insert(&self, record: UserRecord) -> Result<()> {
        let mut users = self.users.write().expect("user store lock poisoned");
        if users.contains_key(&record.username) {
            return Err(UserError::DuplicateUsername(record.username));
        }
        info!(username = %record.username, "user record added");
        users.insert(record.username.clone(), record);
        Ok(())
    }

    /// Fetches a full record, credentials included. Local callers only;
    /// the reconciler goes through [`UserStore`] and never sees this.
    pub fn get(&self, username: &str) -> Option<UserRecord> {
        self.users
            .read()
            .expect("user store lock poisoned")
            .get(username)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.users.read().expect("user store lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> authz::Result<Option<StoredIdentity>> {
        debug!(username, "looking up identity record");
        Ok(self.get(username).map(|record| record.to_identity()))
    }

    async fn verify_password(&self, username: &str, password: &str) -> authz::Result<bool> {
        let Some(record) = self.get(username) else {
            // Unknown username and wrong password look identical here.
            return Ok(false);
        };
        password::verify(&record.password_hash, password)
            .map_err(|e| AuthzError::Store(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(username: &str) -> UserRecord {
        UserRecord::new(username, "trustno1").expect("hashing should succeed")
    }

    #[test]
    fn test_insert_and_get() {
        let store = InMemoryUserStore::new();
        store.insert(record("josh")).expect("first insert");
        assert!(store.get("josh").is_some());
        assert!(store.get("carol").is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let store = InMemoryUserStore::new();
        store.insert(record("josh")).expect("first insert");
        let err = store.insert(record("josh")).unwrap_err();
        assert!(matches!(err, UserError::DuplicateUsername(_)));
    }

    #[tokio::test]
    async fn test_find_by_username_yields_identity_view() {
        let store = InMemoryUserStore::new();
        let mut rec = record("josh");
        rec.grant_authority("resolution:read");
        store.insert(rec).expect("insert");

        let identity = store
            .find_by_username("josh")
            .await
            .expect("store read")
            .expect("known user");
        assert!(identity.grants.contains("resolution:read"));
        assert!(identity.enabled);
    }

    #[tokio::test]
    async fn test_verify_password_paths() {
        let store = InMemoryUserStore::new();
        store.insert(record("josh")).expect("insert");

        assert!(store
            .verify_password("josh", "trustno1")
            .await
            .expect("store read"));
        assert!(!store
            .verify_password("josh", "wrong")
            .await
            .expect("store read"));
        // Unknown usernames report false, not an error.
        assert!(!store
            .verify_password("carol", "trustno1")
            .await
            .expect("store read"));
    }
}
