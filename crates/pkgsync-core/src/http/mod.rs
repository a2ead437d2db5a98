//! Shared HTTP client construction.
//!
//! The registry and catalog clients share one connection pool. Authorization
//! differs per service, so no auth header is installed here; each client adds
//! its own bearer token per request.

use std::time::Duration;

use reqwest::{Client, ClientBuilder};

use crate::error::{SyncError, SyncResult};

/// Transport settings for the shared HTTP client
#[derive(Debug, Clone)]
pub struct HttpSettings {
    /// Per-request timeout
    pub timeout: Duration,
    /// User agent sent on every request (the registry rejects requests without one)
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: format!("pkgsync/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Build the connection-pooled client used for every request of a run
pub fn build_http_client(settings: &HttpSettings) -> SyncResult<Client> {
    ClientBuilder::new()
        // Connection pooling configuration
        .pool_max_idle_per_host(8)
        .pool_idle_timeout(Duration::from_secs(90))
        .timeout(settings.timeout)
        .gzip(true)
        .user_agent(settings.user_agent.as_str())
        .build()
        .map_err(|e| SyncError::network("Failed to create HTTP client".to_string(), e))
}
