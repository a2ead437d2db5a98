//! Optional TOML configuration file
//!
//! ```toml
//! organization = "acme"
//! package_types = ["npm", "container"]
//! latest_version = "newest"
//!
//! [catalog]
//! blueprint = "githubPackage"
//!
//! [registry]
//! page_size = 50
//! ```
//!
//! Every key is optional; unset keys keep their defaults. Secrets are normally
//! left to the environment but may be set here too.

use camino::Utf8Path;
use pkgsync_core::error::SyncError;
use pkgsync_core::{LatestVersionPolicy, PackageType};
use serde::Deserialize;

use crate::settings::SyncConfig;
use crate::ConfigResult;

/// Contents of a pkgsync TOML file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Registry organization to sync
    pub organization: Option<String>,

    /// Package types to visit, in order
    pub package_types: Option<Vec<PackageType>>,

    /// Latest-version selection policy
    pub latest_version: Option<LatestVersionPolicy>,

    /// Per-request timeout in seconds
    pub timeout_secs: Option<u64>,

    #[serde(default)]
    pub catalog: CatalogSection,

    #[serde(default)]
    pub registry: RegistrySection,
}

/// `[catalog]` table
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogSection {
    pub base_url: Option<String>,
    pub blueprint: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

/// `[registry]` table
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistrySection {
    pub api_url: Option<String>,
    pub api_version: Option<String>,
    pub page_size: Option<u32>,
    pub token: Option<String>,
}

impl ConfigFile {
    /// Overlay the values present in this file onto `config`
    pub fn apply(self, config: &mut SyncConfig) {
        if let Some(organization) = self.organization {
            config.registry.organization = organization;
        }
        if let Some(package_types) = self.package_types {
            config.package_types = package_types;
        }
        if let Some(policy) = self.latest_version {
            config.latest_version = policy;
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout = std::time::Duration::from_secs(secs);
        }

        let catalog = self.catalog;
        if let Some(v) = catalog.base_url {
            config.catalog.base_url = v;
        }
        if let Some(v) = catalog.blueprint {
            config.catalog.blueprint = v;
        }
        if let Some(v) = catalog.client_id {
            config.catalog.client_id = v;
        }
        if let Some(v) = catalog.client_secret {
            config.catalog.client_secret = v;
        }

        let registry = self.registry;
        if let Some(v) = registry.api_url {
            config.registry.api_url = v;
        }
        if let Some(v) = registry.api_version {
            config.registry.api_version = v;
        }
        if let Some(v) = registry.page_size {
            config.registry.page_size = v;
        }
        if let Some(v) = registry.token {
            config.registry.token = v;
        }
    }
}

/// Parse TOML content into a config file
pub fn parse_config_file(content: &str) -> ConfigResult<ConfigFile> {
    toml::from_str(content).map_err(|e| SyncError::ConfigParse {
        path: "<inline>".to_string(),
        message: e.to_string(),
    })
}

/// Load and parse a config file from disk
pub async fn load_from_file(path: &Utf8Path) -> ConfigResult<ConfigFile> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| SyncError::io(format!("Failed to read {}", path), e))?;

    parse_config_file(&content).map_err(|e| match e {
        SyncError::ConfigParse { message, .. } => SyncError::ConfigParse {
            path: path.to_string(),
            message,
        },
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_file() {
        let file = parse_config_file(
            r#"
organization = "acme"
package_types = ["npm", "container"]
latest_version = "newest"
timeout_secs = 10

[catalog]
base_url = "https://catalog.example.com/v1"
blueprint = "pkg"

[registry]
page_size = 50
api_version = "2022-11-28"
"#,
        )
        .unwrap();

        assert_eq!(file.organization.as_deref(), Some("acme"));
        assert_eq!(file.package_types, Some(vec![PackageType::Npm, PackageType::Container]));
        assert_eq!(file.latest_version, Some(LatestVersionPolicy::Newest));
        assert_eq!(file.registry.page_size, Some(50));
        assert_eq!(file.catalog.blueprint.as_deref(), Some("pkg"));
    }

    #[test]
    fn test_apply_keeps_unset_defaults() {
        let file = parse_config_file("organization = \"acme\"\n[registry]\npage_size = 25\n").unwrap();
        let mut config = SyncConfig::default();
        file.apply(&mut config);

        assert_eq!(config.registry.organization, "acme");
        assert_eq!(config.registry.page_size, 25);
        assert_eq!(config.catalog.blueprint, "githubPackage");
        assert_eq!(config.package_types, PackageType::ALL.to_vec());
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_unknown_package_type_rejected() {
        let result = parse_config_file("package_types = [\"cargo\"]\n");
        assert!(matches!(result, Err(SyncError::ConfigParse { .. })));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(parse_config_file("organisation = \"acme\"\n").is_err());
    }

    #[tokio::test]
    async fn test_load_from_file_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let dir = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();

        let good = dir.join("pkgsync.toml");
        tokio::fs::write(&good, "organization = \"acme\"\n").await.unwrap();
        let file = load_from_file(&good).await.unwrap();
        assert_eq!(file.organization.as_deref(), Some("acme"));

        let bad = dir.join("broken.toml");
        tokio::fs::write(&bad, "organization = [").await.unwrap();
        match load_from_file(&bad).await.unwrap_err() {
            SyncError::ConfigParse { path, .. } => assert_eq!(path, bad.to_string()),
            other => panic!("Expected ConfigParse, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let result = load_from_file(Utf8Path::new("/nonexistent/pkgsync.toml")).await;
        assert!(matches!(result, Err(SyncError::Io { .. })));
    }
}
