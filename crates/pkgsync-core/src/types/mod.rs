//! Core data types for pkgsync.
//!
//! This module provides the registry enumerations shared by every crate:
//! - Package types used as the registry's `package_type` filter
//! - Package visibility
//! - The latest-version selection policy

pub mod latest;
pub mod package_type;
pub mod visibility;

// Re-export all public types
pub use latest::LatestVersionPolicy;
pub use package_type::{PackageType, ParsePackageTypeError};
pub use visibility::Visibility;
