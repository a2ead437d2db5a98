//! HTTP client for the registry's package endpoints

use pkgsync_config::RegistrySettings;
use pkgsync_core::error::SyncError;
use pkgsync_core::{LatestVersionPolicy, PackageType};
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};

use crate::api::{Package, PackageVersion};
use crate::latest::select_latest;
use crate::pages::{PackagePages, PaginationPolicy};
use crate::RegistryResult;

const GITHUB_JSON: &str = "application/vnd.github+json";
const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";

/// Response of a registry request that reached the server
#[derive(Debug, Clone, PartialEq)]
pub enum Fetch<T> {
    /// Success status with a decoded body
    Found(T),
    /// Non-success status
    Rejected(u16),
}

/// Result of looking up a package's latest version
#[derive(Debug, Clone, PartialEq)]
pub enum VersionLookup {
    Found(PackageVersion),
    /// The versions endpoint answered with a non-success status
    Rejected(u16),
    /// The package has no versions
    Empty,
}

impl VersionLookup {
    pub fn into_version(self) -> Option<PackageVersion> {
        match self {
            VersionLookup::Found(version) => Some(version),
            VersionLookup::Rejected(_) | VersionLookup::Empty => None,
        }
    }
}

/// Client for one organization's packages
#[derive(Clone)]
pub struct RegistryClient {
    /// Shared HTTP client
    client: Client,
    /// `{api_url}/orgs/{organization}`
    org_url: String,
    token: String,
    api_version: String,
    pagination: PaginationPolicy,
    latest: LatestVersionPolicy,
}

impl RegistryClient {
    /// Create a registry client on top of a shared HTTP client
    pub fn new(client: Client, settings: &RegistrySettings) -> RegistryResult<Self> {
        Ok(Self {
            client,
            org_url: settings.org_url()?,
            token: settings.token.clone(),
            api_version: settings.api_version.clone(),
            pagination: PaginationPolicy::new(settings.page_size),
            latest: LatestVersionPolicy::default(),
        })
    }

    pub fn with_pagination(mut self, pagination: PaginationPolicy) -> Self {
        self.pagination = pagination;
        self
    }

    pub fn with_latest_policy(mut self, latest: LatestVersionPolicy) -> Self {
        self.latest = latest;
        self
    }

    pub fn org_url(&self) -> &str {
        &self.org_url
    }

    /// Start a fresh listing of one package type
    pub fn packages(&self, package_type: PackageType) -> PackagePages<'_> {
        PackagePages::new(self, package_type, self.pagination)
    }

    /// Fetch one page of packages of the given type
    pub(crate) async fn fetch_package_page(
        &self,
        package_type: PackageType,
        page: u32,
        per_page: u32,
    ) -> RegistryResult<Fetch<Vec<Package>>> {
        let url = format!("{}/packages", self.org_url);
        let query = [
            ("package_type", package_type.as_str().to_string()),
            ("per_page", per_page.to_string()),
            ("page", page.to_string()),
        ];
        self.get_json(&url, &query).await
    }

    /// Look up the latest version of a package
    pub async fn latest_version(&self, package: &Package) -> RegistryResult<VersionLookup> {
        info!("Getting package metadata for package: {}", package.name);
        let url = package.versions_url();

        match self.get_json::<Vec<PackageVersion>>(&url, &[]).await? {
            Fetch::Found(versions) => {
                debug!("Package {} has {} versions", package.name, versions.len());
                match select_latest(versions, self.latest) {
                    Some(version) => {
                        info!("Retrieved package metadata for package: {}", package.name);
                        Ok(VersionLookup::Found(version))
                    }
                    None => Ok(VersionLookup::Empty),
                }
            }
            Fetch::Rejected(status) => {
                error!("Error retrieving package metadata for {}: {} error", package.name, status);
                Ok(VersionLookup::Rejected(status))
            }
        }
    }

    /// GET a registry endpoint with the registry headers and decode a JSON body
    async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, String)]) -> RegistryResult<Fetch<T>> {
        let response = self
            .client
            .get(url)
            .query(query)
            .bearer_auth(&self.token)
            .header(ACCEPT, GITHUB_JSON)
            .header(API_VERSION_HEADER, &self.api_version)
            .send()
            .await
            .map_err(|e| SyncError::network(format!("Request to {} failed", url), e))?;

        let status = response.status();
        if !status.is_success() {
            debug!("GET {} returned {}", url, status);
            return Ok(Fetch::Rejected(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| SyncError::network(format!("Failed to read response from {}", url), e))?;

        serde_json::from_slice(&body)
            .map(Fetch::Found)
            .map_err(|e| SyncError::decode(url, e))
    }
}
