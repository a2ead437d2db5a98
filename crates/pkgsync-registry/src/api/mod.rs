//! Registry API response types
//!
//! Only the fields the sync consumes are modelled; everything else in the
//! payloads is ignored. A missing required field fails decoding.

use pkgsync_core::Visibility;
use serde::{Deserialize, Serialize};

/// One entry of `GET /orgs/{org}/packages`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Package {
    /// Registry-wide unique id
    pub id: u64,
    pub name: String,
    pub visibility: Visibility,
    /// API URL of the package; versions live under `{url}/versions`
    pub url: String,
    /// Web page of the package
    pub html_url: String,
    pub created_at: String,
}

/// One entry of `GET {package.url}/versions`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PackageVersion {
    /// Version tag, e.g. `1.4.0` or a container digest
    pub name: String,
    pub html_url: String,
    pub created_at: String,
}

impl Package {
    /// Endpoint listing this package's versions
    pub fn versions_url(&self) -> String {
        format!("{}/versions", self.url.trim_end_matches('/'))
    }
}
