//! Demo fixtures.
//!
//! Seeds the personas the rest of the workspace's tests lean on: a
//! read-only user, a write-only user, a read/write user, an admin, and a
//! premium subscriber who picks up `resolution:share` through expansion.

use tracing::info;

use authz::{RESOLUTION_READ, RESOLUTION_WRITE, ROLE_ADMIN};

use crate::record::UserRecord;
use crate::store::InMemoryUserStore;
use crate::Result;

/// Shared password for every seeded account.
pub const DEMO_PASSWORD: &str = "password";

/// Populates `store` with the demo accounts.
pub fn seed_demo_users(store: &InMemoryUserStore) -> Result<()> {
    let mut user = UserRecord::new("user", DEMO_PASSWORD)?;
    user.grant_authority(RESOLUTION_READ)
        .grant_authority(RESOLUTION_WRITE);
    store.insert(user)?;

    let mut hasread = UserRecord::new("hasread", DEMO_PASSWORD)?;
    hasread.grant_authority(RESOLUTION_READ);
    store.insert(hasread)?;

    let mut haswrite = UserRecord::new("haswrite", DEMO_PASSWORD)?;
    haswrite.grant_authority(RESOLUTION_WRITE);
    store.insert(haswrite)?;

    let mut admin = UserRecord::new("admin", DEMO_PASSWORD)?;
    admin.grant_authority(ROLE_ADMIN);
    store.insert(admin)?;

    let mut premium = UserRecord::new("premium", DEMO_PASSWORD)?.with_subscription("premium");
    premium
        .grant_authority(RESOLUTION_READ)
        .grant_authority(RESOLUTION_WRITE);
    store.insert(premium)?;

    info!(count = store.len(), "demo users seeded");
    Ok(())
}
