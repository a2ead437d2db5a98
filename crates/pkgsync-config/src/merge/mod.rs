//! Configuration layering and environment overrides

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use pkgsync_core::error::SyncError;
use pkgsync_core::PackageType;
use tracing::debug;

use crate::{settings::SyncConfig, ConfigResult};

/// Environment variables read by pkgsync
pub const ENV_CLIENT_ID: &str = "PORT_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "PORT_CLIENT_SECRET";
pub const ENV_REGISTRY_TOKEN: &str = "GITHUB_ACCESS_TOKEN";
pub const ENV_ORGANIZATION: &str = "ORGANIZATION_NAME";
const ENV_PREFIX: &str = "PKGSYNC_";

/// Builds a `SyncConfig` from defaults, an optional file, the environment,
/// and command-line overrides, in increasing priority
#[derive(Debug, Default)]
pub struct ConfigLayering {
    /// Config file given with `--config`
    file: Option<Utf8PathBuf>,
    /// Environment overrides
    env_overrides: HashMap<String, String>,
    /// `--package-type` flags
    cli_package_types: Vec<PackageType>,
}

/// Where a layer of configuration came from
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    Defaults,
    File(Utf8PathBuf),
    Environment(Vec<String>),
    CommandLine,
}

impl ConfigLayering {
    /// Create a new configuration layering system
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: Option<Utf8PathBuf>) -> Self {
        self.file = path;
        self
    }

    pub fn with_env(mut self, env_overrides: HashMap<String, String>) -> Self {
        self.env_overrides = env_overrides;
        self
    }

    pub fn with_package_types(mut self, package_types: Vec<PackageType>) -> Self {
        self.cli_package_types = package_types;
        self
    }

    /// Merge every layer and validate the result
    pub async fn load(self) -> ConfigResult<(SyncConfig, Vec<ConfigSource>)> {
        let mut config = SyncConfig::default();
        let mut sources = vec![ConfigSource::Defaults];

        if let Some(path) = self.file {
            let file = crate::file::load_from_file(&path).await?;
            file.apply(&mut config);
            debug!("Applied config file {}", path);
            sources.push(ConfigSource::File(path));
        }

        let applied = Self::apply_env_overrides(&mut config, &self.env_overrides)?;
        if !applied.is_empty() {
            sources.push(ConfigSource::Environment(applied));
        }

        if !self.cli_package_types.is_empty() {
            config.package_types = self.cli_package_types;
            sources.push(ConfigSource::CommandLine);
        }

        // Each type is listed once per run, in first-seen order
        let mut seen = HashSet::new();
        config.package_types.retain(|t| seen.insert(*t));

        config.validate()?;
        Ok((config, sources))
    }

    /// Apply environment variable overrides, returning the names that were used
    pub fn apply_env_overrides(
        config: &mut SyncConfig,
        overrides: &HashMap<String, String>,
    ) -> ConfigResult<Vec<String>> {
        let mut applied = Vec::new();

        for (key, value) in overrides {
            match key.as_str() {
                ENV_CLIENT_ID => config.catalog.client_id = value.clone(),
                ENV_CLIENT_SECRET => config.catalog.client_secret = value.clone(),
                ENV_REGISTRY_TOKEN => config.registry.token = value.clone(),
                ENV_ORGANIZATION => config.registry.organization = value.clone(),
                "PKGSYNC_CATALOG_URL" => config.catalog.base_url = value.clone(),
                "PKGSYNC_REGISTRY_URL" => config.registry.api_url = value.clone(),
                "PKGSYNC_BLUEPRINT" => config.catalog.blueprint = value.clone(),
                "PKGSYNC_PACKAGE_TYPES" => {
                    config.package_types = PackageType::parse_list(value)
                        .map_err(|e| SyncError::invalid(key, e.to_string()))?;
                }
                "PKGSYNC_PAGE_SIZE" => {
                    config.registry.page_size = value
                        .trim()
                        .parse()
                        .map_err(|e| SyncError::invalid(key, format!("'{}' is not a number: {}", value, e)))?;
                }
                "PKGSYNC_LATEST_VERSION" => {
                    config.latest_version = value.parse().map_err(|e: String| SyncError::invalid(key, e))?;
                }
                "PKGSYNC_TIMEOUT_SECS" => {
                    let secs: u64 = value
                        .trim()
                        .parse()
                        .map_err(|e| SyncError::invalid(key, format!("'{}' is not a number: {}", value, e)))?;
                    config.timeout = Duration::from_secs(secs);
                }
                _ => {
                    // Unknown environment variable, ignore
                    continue;
                }
            }
            applied.push(key.clone());
        }

        applied.sort();
        Ok(applied)
    }

    /// Collect the environment variables pkgsync understands
    pub fn collect_env_overrides() -> HashMap<String, String> {
        std::env::vars().filter(|(key, _)| is_known_key(key)).collect()
    }

    /// Read the variables pkgsync understands from a dotenv file.
    ///
    /// A missing file yields no overrides. The process environment is left
    /// untouched; callers layer the result underneath the real environment.
    pub fn collect_dotenv_overrides(path: &Utf8Path) -> ConfigResult<HashMap<String, String>> {
        let entries = match dotenvy::from_path_iter(path) {
            Ok(entries) => entries,
            Err(e) if e.not_found() => {
                debug!("No dotenv file at {}", path);
                return Ok(HashMap::new());
            }
            Err(e) => {
                return Err(SyncError::ConfigParse {
                    path: path.to_string(),
                    message: e.to_string(),
                })
            }
        };

        let mut overrides = HashMap::new();
        for entry in entries {
            let (key, value) = entry.map_err(|e| SyncError::ConfigParse {
                path: path.to_string(),
                message: e.to_string(),
            })?;
            if is_known_key(&key) {
                overrides.insert(key, value);
            }
        }

        debug!("Read {} variables from {}", overrides.len(), path);
        Ok(overrides)
    }
}

fn is_known_key(key: &str) -> bool {
    key.starts_with(ENV_PREFIX)
        || matches!(key, ENV_CLIENT_ID | ENV_CLIENT_SECRET | ENV_REGISTRY_TOKEN | ENV_ORGANIZATION)
}
