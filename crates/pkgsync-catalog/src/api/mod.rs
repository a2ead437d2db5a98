//! Catalog API request and response types

use serde::{Deserialize, Serialize};

/// Entity upserted under the package blueprint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Stable per package, so repeated runs merge into one record
    pub identifier: String,
    pub title: String,
    pub properties: EntityProperties,
}

/// Blueprint properties of a package entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityProperties {
    pub package_type: String,
    pub visibility: String,
    pub created_at: String,
    pub link: String,
    pub latest_version_tag: String,
    pub latest_version_link: String,
    pub latest_version_created_at: String,
}

/// Body of `POST /auth/access_token`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Credentials<'a> {
    pub client_id: &'a str,
    pub client_secret: &'a str,
}

/// Response of `POST /auth/access_token`; other fields are ignored
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AccessToken {
    pub access_token: Option<String>,
}
