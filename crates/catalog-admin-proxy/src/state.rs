//! Proxy application state.

use std::sync::Arc;

use reqwest::redirect::Policy;

use catalog_admin_core::DomainResolver;

use crate::config::ProxyConfig;

/// Shared state available to all request handlers.
///
/// Immutable after construction; cloning is cheap.
#[derive(Debug, Clone)]
pub struct ProxyState {
    /// Upstream HTTP client. Never follows redirects.
    pub client: reqwest::Client,
    /// Proxy configuration.
    pub config: Arc<ProxyConfig>,
    /// Resolver for `/api/domain`.
    pub resolver: Arc<DomainResolver>,
}

impl ProxyState {
    /// Create the state, building the upstream client from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: ProxyConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder().redirect(Policy::none());
        if let Some(timeout) = config.upstream_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self::with_client(builder.build()?, config))
    }

    /// Create the state with a custom upstream client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, config: ProxyConfig) -> Self {
        let resolver = DomainResolver::from(config.domains.clone());

        Self {
            client,
            config: Arc::new(config),
            resolver: Arc::new(resolver),
        }
    }
}
