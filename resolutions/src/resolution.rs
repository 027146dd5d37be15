//! The resolution entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use authz::OwnedResource;

/// A single new-year's resolution.
///
/// `owner_id` is fixed at creation from the acting principal and never
/// reassigned; every ownership check in the workspace compares against
/// it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Resolution {
    /// Creates a pending resolution owned by `owner_id`.
    pub fn new(text: impl Into<String>, owner_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            text: text.into(),
            completed: false,
            created_at: Utc::now(),
        }
    }
}

impl OwnedResource for Resolution {
    fn owner_id(&self) -> Uuid {
        self.owner_id
    }
}
