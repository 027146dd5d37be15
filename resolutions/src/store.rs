//! Resolution storage seam and the in-memory implementation.
//!
//! The service only ever reads `owner_id` off what comes back; which
//! engine stores the rows is not this crate's concern. The in-memory
//! store keeps insertion order so collection reads (and therefore
//! post-filtering) are deterministic.

use async_trait::async_trait;
use std::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::error::Result;
use crate::resolution::Resolution;

/// Durable storage for resolutions.
///
/// `revise` and `complete` are no-ops for unknown ids; the service's
/// read-back turns that into its not-found answer.
#[async_trait]
pub trait ResolutionStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Resolution>>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Resolution>>;
    async fn save(&self, resolution: Resolution) -> Result<Resolution>;
    async fn revise(&self, id: Uuid, text: String) -> Result<()>;
    async fn complete(&self, id: Uuid) -> Result<()>;
}

/// Vec-backed [`ResolutionStore`] preserving insertion order.
#[derive(Default)]
pub struct InMemoryResolutionStore {
    resolutions: RwLock<Vec<Resolution>>,
}

impl InMemoryResolutionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResolutionStore for InMemoryResolutionStore {
    async fn find_all(&self) -> Result<Vec<Resolution>> {
        Ok(self
            .resolutions
            .read()
            .expect("resolution store lock poisoned")
            .clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Resolution>> {
        Ok(self
            .resolutions
            .read()
            .expect("resolution store lock poisoned")
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn save(&self, resolution: Resolution) -> Result<Resolution> {
        debug!(id = %resolution.id, "saving resolution");
        self.resolutions
            .write()
            .expect("resolution store lock poisoned")
            .push(resolution.clone());
        Ok(resolution)
    }

    async fn revise(&self, id: Uuid, text: String) -> Result<()> {
        let mut resolutions = self
            .resolutions
            .write()
            .expect("resolution store lock poisoned");
        if let Some(resolution) = resolutions.iter_mut().find(|r| r.id == id) {
            resolution.text = text;
        }
        Ok(())
    }

    async fn complete(&self, id: Uuid) -> Result<()> {
        let mut resolutions = self
            .resolutions
            .write()
            .expect("resolution store lock poisoned");
        if let Some(resolution) = resolutions.iter_mut().find(|r| r.id == id) {
            resolution.completed = true;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_find_all_preserves_insertion_order() {
        let store = InMemoryResolutionStore::new();
        let owner = Uuid::new_v4();
        for text in ["first", "second", "third"] {
            store
                .save(Resolution::new(text, owner))
                .await
                .expect("save");
        }

        let all = store.find_all().await.expect("find_all");
        let texts: Vec<&str> = all.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_revise_and_complete_mutate_in_place() {
        let store = InMemoryResolutionStore::new();
        let saved = store
            .save(Resolution::new("Run a Marathon", Uuid::new_v4()))
            .await
            .expect("save");

        store
            .revise(saved.id, "Run an Errand".to_string())
            .await
            .expect("revise");
        store.complete(saved.id).await.expect("complete");

        let found = store
            .find_by_id(saved.id)
            .await
            .expect("find_by_id")
            .expect("saved resolution");
        assert_eq!(found.text, "Run an Errand");
        assert!(found.completed);
    }

    #[tokio::test]
    async fn test_mutations_on_unknown_ids_are_no_ops() {
        let store = InMemoryResolutionStore::new();
        store
            .revise(Uuid::new_v4(), "whatever".to_string())
            .await
            .expect("revise");
        store.complete(Uuid::new_v4()).await.expect("complete");
        assert!(store.find_all().await.expect("find_all").is_empty());
    }
}
