//! GitHub Packages registry client for pkgsync
//!
//! This crate lists an organization's packages page by page and looks up the
//! latest version of each one. Non-success responses are reported as values
//! so the caller can skip the affected unit of work; transport failures and
//! payloads that do not decode are errors.

pub mod api;
pub mod client;
pub mod latest;
pub mod pages;

// Re-export main types
pub use api::{Package, PackageVersion};
pub use client::{Fetch, RegistryClient, VersionLookup};
pub use latest::select_latest;
pub use pages::{PackagePages, PageState, PaginationPolicy};

use pkgsync_core::error::SyncError;

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, SyncError>;
