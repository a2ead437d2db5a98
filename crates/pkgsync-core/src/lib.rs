//! # pkgsync-core
//!
//! Core types and utilities shared across all pkgsync crates.
//!
//! This crate provides:
//! - `PackageType` and `Visibility`, the registry enumerations the pipeline
//!   filters on and forwards to the catalog
//! - `SyncError` enum for unified error handling
//! - The shared HTTP client builder used by the registry and catalog clients
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: Core data types (PackageType, Visibility, LatestVersionPolicy)
//! - `error`: Error types and result aliases
//! - `http`: Connection-pooled HTTP client construction

pub mod error;
pub mod http;
pub mod types;

// Re-export commonly used types
pub use error::{SyncError, SyncResult};
pub use http::{HttpSettings, build_http_client};
pub use types::{LatestVersionPolicy, PackageType, Visibility};
