//! Configuration for pkgsync
//!
//! This crate builds the `SyncConfig` every other crate is constructed from.
//! Values are layered: built-in defaults, then an optional TOML file, then
//! environment variables, followed by validation.

pub mod file;
pub mod merge;
pub mod settings;

// Re-export main types
pub use file::ConfigFile;
pub use merge::{ConfigLayering, ConfigSource};
pub use settings::{CatalogSettings, RegistrySettings, SyncConfig};

use pkgsync_core::error::SyncError;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, SyncError>;
