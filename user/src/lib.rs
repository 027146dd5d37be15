//! # User Crate
//!
//! Locally-owned identity records and the in-memory store backing the
//! `authz` crate's [`UserStore`](authz::UserStore) seam. This crate owns
//! everything the decision core deliberately does not: credential
//! storage, the enabled flag, raw authority grants, and the subscription
//! attribute that authority expansion consults.
//!
//! ## Key Pieces
//!
//! - **[`UserRecord`]**: a stored user with argon2 credentials and grants
//! - **[`InMemoryUserStore`]**: map-backed [`UserStore`](authz::UserStore)
//!   implementation for tests and embedded use
//! - **[`seed_demo_users`]**: the demo personas used across the workspace

pub mod error;
pub mod password;
pub mod record;
pub mod seed;
pub mod store;

// Re-export commonly used types
pub use error::{Result, UserError};
pub use record::UserRecord;
pub use seed::{seed_demo_users, DEMO_PASSWORD};
pub use store::InMemoryUserStore;
