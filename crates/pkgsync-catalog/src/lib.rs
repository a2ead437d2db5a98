//! Port catalog client for pkgsync
//!
//! Exchanges client credentials for a bearer token once, then upserts
//! entities under a blueprint with merge semantics.

pub mod api;
pub mod client;

// Re-export main types
pub use api::{Entity, EntityProperties};
pub use client::{CatalogClient, UpsertOutcome};

use pkgsync_core::error::SyncError;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, SyncError>;
