//! Page-by-page listing of an organization's packages

use pkgsync_core::PackageType;
use tracing::{error, info};

use crate::api::Package;
use crate::client::{Fetch, RegistryClient};
use crate::RegistryResult;

/// Page size and starting page for package listings.
///
/// The registry gives no "has next" signal, so a listing ends at the first
/// page holding fewer entries than requested. A listing whose total is an
/// exact multiple of the page size therefore costs one extra request that
/// comes back empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationPolicy {
    pub page_size: u32,
    pub first_page: u32,
}

impl Default for PaginationPolicy {
    fn default() -> Self {
        Self {
            page_size: 100,
            first_page: 1,
        }
    }
}

impl PaginationPolicy {
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
    }

    /// Whether a page with `returned` entries is the last one
    pub fn is_last_page(&self, returned: usize) -> bool {
        returned < self.page_size as usize
    }
}

/// Where a listing stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    /// The next call requests this page
    Open { next_page: u32 },
    /// A short page was returned
    Finished,
    /// The registry rejected a page; later pages are never requested
    Aborted { page: u32, status: u16 },
}

/// Lazy listing of one package type.
///
/// Created by [`RegistryClient::packages`]; every listing starts over at the
/// policy's first page.
pub struct PackagePages<'a> {
    client: &'a RegistryClient,
    package_type: PackageType,
    policy: PaginationPolicy,
    state: PageState,
    pages_fetched: u32,
}

impl<'a> PackagePages<'a> {
    pub(crate) fn new(client: &'a RegistryClient, package_type: PackageType, policy: PaginationPolicy) -> Self {
        Self {
            client,
            package_type,
            policy,
            state: PageState::Open {
                next_page: policy.first_page,
            },
            pages_fetched: 0,
        }
    }

    /// Fetch the next page, or `None` once the listing has ended.
    ///
    /// A rejected page ends the listing the same way a short page does; the
    /// difference is only visible through [`PackagePages::state`].
    pub async fn next_page(&mut self) -> RegistryResult<Option<Vec<Package>>> {
        let page = match self.state {
            PageState::Open { next_page } => next_page,
            PageState::Finished | PageState::Aborted { .. } => return Ok(None),
        };

        info!("Retrieving page {} of {} packages", page, self.package_type);
        match self
            .client
            .fetch_package_page(self.package_type, page, self.policy.page_size)
            .await?
        {
            Fetch::Found(packages) => {
                self.pages_fetched += 1;
                self.state = if self.policy.is_last_page(packages.len()) {
                    PageState::Finished
                } else {
                    PageState::Open { next_page: page + 1 }
                };
                info!("Retrieved {} {} packages from page {}", packages.len(), self.package_type, page);
                Ok(Some(packages))
            }
            Fetch::Rejected(status) => {
                error!(
                    "Error retrieving {} packages on page {}: {} error, skipping remaining pages",
                    self.package_type, page, status
                );
                self.state = PageState::Aborted { page, status };
                Ok(None)
            }
        }
    }

    pub fn state(&self) -> PageState {
        self.state
    }

    /// Pages successfully retrieved so far
    pub fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }
}
