//! Backend Config

use std::time::Duration;

use clap::Args;

use crate::api::{ApiError, HttpStorefrontApi};

/// Storefront backend settings.
#[derive(Debug, Args)]
pub struct BackendConfig {
    /// Backend base URL
    #[arg(
        long,
        env = "STOREFRONT_BACKEND_URL",
        default_value = "http://localhost:4000"
    )]
    pub backend_url: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "STOREFRONT_REQUEST_TIMEOUT_SECS", default_value_t = 10u64)]
    pub request_timeout_secs: u64,
}

impl BackendConfig {
    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Builds the HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn client(&self) -> Result<HttpStorefrontApi, ApiError> {
        HttpStorefrontApi::new(self.backend_url.as_str(), self.timeout())
    }
}
