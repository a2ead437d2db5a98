//! Registry package to catalog entity mapping

use pkgsync_catalog::{Entity, EntityProperties};
use pkgsync_core::PackageType;
use pkgsync_registry::{Package, PackageVersion};

/// Build the catalog entity for a package and its latest version
pub fn to_entity(package: &Package, latest: &PackageVersion, package_type: PackageType) -> Entity {
    Entity {
        identifier: package.id.to_string(),
        title: package.name.clone(),
        properties: EntityProperties {
            package_type: package_type.to_string(),
            visibility: package.visibility.to_string(),
            created_at: package.created_at.clone(),
            link: package.html_url.clone(),
            latest_version_tag: latest.name.clone(),
            latest_version_link: latest.html_url.clone(),
            latest_version_created_at: latest.created_at.clone(),
        },
    }
}
