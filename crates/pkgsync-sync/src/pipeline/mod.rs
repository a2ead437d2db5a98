//! The sync run: authenticate, then walk every package type in order

use pkgsync_catalog::{CatalogClient, UpsertOutcome};
use pkgsync_config::SyncConfig;
use pkgsync_core::error::SyncResult;
use pkgsync_core::{build_http_client, HttpSettings, PackageType};
use pkgsync_registry::{Package, PageState, RegistryClient, VersionLookup};
use tracing::{info, warn};

use crate::report::{ListingOutcome, PackageOutcome, SkipReason, SyncReport, TypeReport};
use crate::transform::to_entity;

/// One configured sync run
pub struct SyncPipeline {
    registry: RegistryClient,
    catalog: CatalogClient,
    blueprint: String,
    package_types: Vec<PackageType>,
}

impl SyncPipeline {
    pub fn new(
        registry: RegistryClient,
        catalog: CatalogClient,
        blueprint: String,
        package_types: Vec<PackageType>,
    ) -> Self {
        Self {
            registry,
            catalog,
            blueprint,
            package_types,
        }
    }

    /// Build both clients on one connection pool and acquire the catalog token
    pub async fn connect(config: &SyncConfig) -> SyncResult<Self> {
        let http = build_http_client(&HttpSettings {
            timeout: config.timeout,
            ..HttpSettings::default()
        })?;

        let catalog = CatalogClient::authenticate(http.clone(), &config.catalog).await?;
        let registry = RegistryClient::new(http, &config.registry)?.with_latest_policy(config.latest_version);

        Ok(Self::new(
            registry,
            catalog,
            config.catalog.blueprint.clone(),
            config.package_types.clone(),
        ))
    }

    /// Sync every package type in order.
    ///
    /// Skip-scope failures are recorded in the report; only transport
    /// failures and undecodable payloads end the run early.
    pub async fn run(&self) -> SyncResult<SyncReport> {
        info!("Starting package sync for {}", self.registry.org_url());
        let mut report = SyncReport::default();

        for &package_type in &self.package_types {
            let type_report = self.sync_package_type(package_type).await?;
            info!(
                "Finished {} packages: {} upserted, {} skipped, {} rejected",
                package_type,
                type_report.upserted(),
                type_report.skipped(),
                type_report.rejected()
            );
            report.package_types.push(type_report);
        }

        info!("Ingested all packages into the catalog");
        Ok(report)
    }

    async fn sync_package_type(&self, package_type: PackageType) -> SyncResult<TypeReport> {
        info!("Getting {} packages", package_type);
        let mut type_report = TypeReport::new(package_type);
        let mut pages = self.registry.packages(package_type);

        while let Some(packages) = pages.next_page().await? {
            for package in &packages {
                let outcome = self.sync_package(package, package_type).await?;
                type_report.record(package.id.to_string(), outcome);
            }
        }

        type_report.pages = pages.pages_fetched();
        if let PageState::Aborted { page, status } = pages.state() {
            type_report.listing = ListingOutcome::Aborted { page, status };
        }
        Ok(type_report)
    }

    async fn sync_package(&self, package: &Package, package_type: PackageType) -> SyncResult<PackageOutcome> {
        let latest = match self.registry.latest_version(package).await? {
            VersionLookup::Found(version) => version,
            VersionLookup::Rejected(status) => {
                return Ok(PackageOutcome::Skipped(SkipReason::VersionsRejected(status)));
            }
            VersionLookup::Empty => {
                warn!("Package {} has no versions, skipping", package.name);
                return Ok(PackageOutcome::Skipped(SkipReason::NoVersions));
            }
        };

        let entity = to_entity(package, &latest, package_type);
        match self.catalog.upsert_entity(&self.blueprint, &entity).await? {
            UpsertOutcome::Applied => Ok(PackageOutcome::Upserted),
            UpsertOutcome::Rejected(status) => Ok(PackageOutcome::Rejected(status)),
        }
    }
}
