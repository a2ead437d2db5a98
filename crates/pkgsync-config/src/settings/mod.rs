//! Resolved configuration values.

use std::fmt;
use std::time::Duration;

use pkgsync_core::error::SyncError;
use pkgsync_core::{LatestVersionPolicy, PackageType};
use url::Url;

use crate::ConfigResult;

/// Catalog API root
pub const DEFAULT_CATALOG_URL: &str = "https://api.getport.io/v1";
/// Registry API root
pub const DEFAULT_REGISTRY_URL: &str = "https://api.github.com";
/// Blueprint every package entity is upserted under
pub const DEFAULT_BLUEPRINT: &str = "githubPackage";
/// Value of the `X-GitHub-Api-Version` header
pub const DEFAULT_API_VERSION: &str = "2022-11-28";
/// Packages requested per page; also the registry's maximum
pub const DEFAULT_PAGE_SIZE: u32 = 100;
pub const MAX_PAGE_SIZE: u32 = 100;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Everything a sync run needs
#[derive(Debug, Clone, PartialEq)]
pub struct SyncConfig {
    pub catalog: CatalogSettings,
    pub registry: RegistrySettings,
    /// Package types visited, in order
    pub package_types: Vec<PackageType>,
    pub latest_version: LatestVersionPolicy,
    /// Per-request timeout on the shared HTTP client
    pub timeout: Duration,
}

/// Catalog connection settings
#[derive(Clone, PartialEq)]
pub struct CatalogSettings {
    pub base_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub blueprint: String,
}

/// Registry connection settings
#[derive(Clone, PartialEq)]
pub struct RegistrySettings {
    pub api_url: String,
    pub token: String,
    pub organization: String,
    pub api_version: String,
    pub page_size: u32,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogSettings::default(),
            registry: RegistrySettings::default(),
            package_types: PackageType::ALL.to_vec(),
            latest_version: LatestVersionPolicy::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CATALOG_URL.to_string(),
            client_id: String::new(),
            client_secret: String::new(),
            blueprint: DEFAULT_BLUEPRINT.to_string(),
        }
    }
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_REGISTRY_URL.to_string(),
            token: String::new(),
            organization: String::new(),
            api_version: DEFAULT_API_VERSION.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

// Credentials stay out of logs.
impl fmt::Debug for CatalogSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogSettings")
            .field("base_url", &self.base_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &redact(&self.client_secret))
            .field("blueprint", &self.blueprint)
            .finish()
    }
}

impl fmt::Debug for RegistrySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrySettings")
            .field("api_url", &self.api_url)
            .field("token", &redact(&self.token))
            .field("organization", &self.organization)
            .field("api_version", &self.api_version)
            .field("page_size", &self.page_size)
            .finish()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

impl RegistrySettings {
    /// Organization-scoped API root, e.g. `https://api.github.com/orgs/acme`.
    /// The organization is percent-encoded as a single path segment.
    pub fn org_url(&self) -> ConfigResult<String> {
        let mut url = Url::parse(&self.api_url).map_err(|e| {
            SyncError::invalid("registry.api_url", format!("'{}' is not a valid URL: {}", self.api_url, e))
        })?;
        url.path_segments_mut()
            .map_err(|_| SyncError::invalid("registry.api_url", format!("'{}' cannot be a base URL", self.api_url)))?
            .pop_if_empty()
            .push("orgs")
            .push(&self.organization);
        Ok(url.to_string())
    }
}

impl SyncConfig {
    /// Check that every required value is present and well formed
    pub fn validate(&self) -> ConfigResult<()> {
        require("PORT_CLIENT_ID", &self.catalog.client_id)?;
        require("PORT_CLIENT_SECRET", &self.catalog.client_secret)?;
        require("GITHUB_ACCESS_TOKEN", &self.registry.token)?;
        require("ORGANIZATION_NAME", &self.registry.organization)?;
        require("blueprint", &self.catalog.blueprint)?;
        require("api_version", &self.registry.api_version)?;

        validate_url("catalog.base_url", &self.catalog.base_url)?;
        validate_url("registry.api_url", &self.registry.api_url)?;

        if self.registry.page_size == 0 || self.registry.page_size > MAX_PAGE_SIZE {
            return Err(SyncError::invalid(
                "page_size",
                format!("must be between 1 and {}, got {}", MAX_PAGE_SIZE, self.registry.page_size),
            ));
        }

        if self.package_types.is_empty() {
            return Err(SyncError::invalid("package_types", "at least one package type is required"));
        }

        if self.timeout.is_zero() {
            return Err(SyncError::invalid("timeout_secs", "must be greater than zero"));
        }

        Ok(())
    }
}

fn require(field: &str, value: &str) -> ConfigResult<()> {
    if value.trim().is_empty() {
        Err(SyncError::invalid(field, "is required but was not set"))
    } else {
        Ok(())
    }
}

fn validate_url(field: &str, value: &str) -> ConfigResult<()> {
    let parsed = Url::parse(value).map_err(|e| SyncError::invalid(field, format!("'{}' is not a valid URL: {}", value, e)))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(SyncError::invalid(field, format!("unsupported scheme '{}'", scheme))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_config() -> SyncConfig {
        let mut config = SyncConfig::default();
        config.catalog.client_id = "id".to_string();
        config.catalog.client_secret = "s3cr3t".to_string();
        config.registry.token = "ghp_token".to_string();
        config.registry.organization = "acme".to_string();
        config
    }

    #[test]
    fn test_defaults() {
        let config = SyncConfig::default();
        assert_eq!(config.catalog.base_url, "https://api.getport.io/v1");
        assert_eq!(config.catalog.blueprint, "githubPackage");
        assert_eq!(config.registry.page_size, 100);
        assert_eq!(config.registry.api_version, "2022-11-28");
        assert_eq!(config.package_types.len(), 6);
        assert_eq!(config.latest_version, LatestVersionPolicy::First);
    }

    #[test]
    fn test_complete_config_is_valid() {
        assert!(complete_config().validate().is_ok());
    }

    #[test]
    fn test_missing_credentials_rejected() {
        let mut config = complete_config();
        config.catalog.client_secret = "  ".to_string();

        match config.validate().unwrap_err() {
            SyncError::ConfigValidation { field, .. } => assert_eq!(field, "PORT_CLIENT_SECRET"),
            other => panic!("Expected ConfigValidation, got {:?}", other),
        }
    }

    #[test]
    fn test_page_size_bounds() {
        let mut config = complete_config();
        config.registry.page_size = 0;
        assert!(config.validate().is_err());

        config.registry.page_size = 101;
        assert!(config.validate().is_err());

        config.registry.page_size = 1;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bad_urls_rejected() {
        let mut config = complete_config();
        config.registry.api_url = "not a url".to_string();
        assert!(config.validate().is_err());

        let mut config = complete_config();
        config.catalog.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_package_types_rejected() {
        let mut config = complete_config();
        config.package_types.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_org_url() {
        let mut settings = RegistrySettings::default();
        settings.organization = "acme".to_string();
        assert_eq!(settings.org_url().unwrap(), "https://api.github.com/orgs/acme");

        settings.api_url = "http://127.0.0.1:8080/".to_string();
        assert_eq!(settings.org_url().unwrap(), "http://127.0.0.1:8080/orgs/acme");

        settings.api_url = "https://ghe.example.com/api/v3".to_string();
        assert_eq!(settings.org_url().unwrap(), "https://ghe.example.com/api/v3/orgs/acme");
    }

    #[test]
    fn test_org_url_escapes_organization() {
        let mut settings = RegistrySettings::default();
        settings.organization = "a/b?c".to_string();
        assert_eq!(settings.org_url().unwrap(), "https://api.github.com/orgs/a%2Fb%3Fc");

        settings.api_url = "mailto:someone@example.com".to_string();
        assert!(settings.org_url().is_err());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = complete_config();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("s3cr3t"));
        assert!(!debug.contains("ghp_token"));
        assert!(debug.contains("<redacted>"));
    }
}
