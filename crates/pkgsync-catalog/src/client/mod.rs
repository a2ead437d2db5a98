//! Authenticated catalog client

use pkgsync_config::CatalogSettings;
use pkgsync_core::error::SyncError;
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::api::{AccessToken, Credentials, Entity};
use crate::CatalogResult;

/// What happened to one upsert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Applied,
    /// The catalog answered with a non-success status
    Rejected(u16),
}

/// Catalog client holding the bearer token for the rest of the run
#[derive(Clone)]
pub struct CatalogClient {
    /// Shared HTTP client
    client: Client,
    base_url: String,
    access_token: String,
}

impl CatalogClient {
    /// Exchange client credentials for a bearer token.
    ///
    /// Any failure here is fatal: nothing can be written to the catalog
    /// without a token, and the token is never refreshed.
    pub async fn authenticate(client: Client, settings: &CatalogSettings) -> CatalogResult<Self> {
        let base_url = settings.base_url.trim_end_matches('/').to_string();
        let url = format!("{}/auth/access_token", base_url);
        info!("Requesting catalog access token");

        let response = client
            .post(&url)
            .json(&Credentials {
                client_id: &settings.client_id,
                client_secret: &settings.client_secret,
            })
            .send()
            .await
            .map_err(|e| SyncError::network(format!("Token request to {} failed", url), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Authentication {
                message: format!("token endpoint returned {}", status),
            });
        }

        let body: AccessToken = response.json().await.map_err(|e| SyncError::Authentication {
            message: format!("token response is not valid JSON: {}", e),
        })?;

        let access_token = body
            .access_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| SyncError::Authentication {
                message: "token response has no accessToken".to_string(),
            })?;

        debug!("Catalog access token acquired");
        Ok(Self {
            client,
            base_url,
            access_token,
        })
    }

    /// Create-or-merge an entity under `blueprint`. No retry.
    pub async fn upsert_entity(&self, blueprint: &str, entity: &Entity) -> CatalogResult<UpsertOutcome> {
        info!("Adding entity to catalog: {}", entity.identifier);
        let url = format!("{}/blueprints/{}/entities", self.base_url, blueprint);

        let response = self
            .client
            .post(&url)
            .query(&[("upsert", "true"), ("merge", "true")])
            .bearer_auth(&self.access_token)
            .json(entity)
            .send()
            .await
            .map_err(|e| SyncError::network(format!("Upsert to {} failed", url), e))?;

        let status = response.status();
        if status.is_success() {
            info!("Added entity to catalog: {}", entity.identifier);
            Ok(UpsertOutcome::Applied)
        } else {
            warn!(
                "Ingesting {} entity {} failed with {}, skipping",
                blueprint, entity.identifier, status
            );
            Ok(UpsertOutcome::Rejected(status.as_u16()))
        }
    }
}

#[cfg(test)]
mod tests;
