//! # Resolutions Crate
//!
//! The protected-resource domain of the workspace: the [`Resolution`]
//! entity, its storage seam, and a service that wires every operation
//! through the `authz` decision core. The service replaces the usual
//! annotation-driven interception with explicit control flow — each
//! operation calls `pre_authorize` before touching storage and
//! `post_authorize`/`post_filter` on what storage returned.
//!
//! ## Key Pieces
//!
//! - **[`Resolution`]**: an owned resource; `owner_id` is bound at
//!   creation and never reassigned
//! - **[`ResolutionStore`]**: the storage seam, with an in-memory,
//!   order-preserving implementation
//! - **[`ResolutionService`]**: list/read/create/revise/complete/share,
//!   each gated by the decision core

pub mod error;
pub mod resolution;
pub mod service;
pub mod store;

// Re-export commonly used types
pub use error::{ResolutionError, Result};
pub use resolution::Resolution;
pub use service::ResolutionService;
pub use store::{InMemoryResolutionStore, ResolutionStore};
