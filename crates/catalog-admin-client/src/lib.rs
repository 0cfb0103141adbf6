//! API clients for the catalog admin.
//!
//! This crate talks to the two backends of the catalog system:
//!
//! - **Auth API**: login, registration, logout, current user and token refresh,
//!   either directly or through the same-origin auth proxy ([`AuthClient`])
//! - **Data API**: GraphQL CRUD over the catalog ([`GraphqlClient`]) and REST
//!   endpoints for images and logos ([`MediaClient`])
//!
//! All clients share one [`TokenStore`]; a token saved by a login is sent as a
//! bearer token by every later call. [`AuthStore`] keeps the session state a UI
//! renders from.
//!
//! # Example
//!
//! ```no_run
//! use catalog_admin_client::{AdminClient, ClientConfig, RubricScopedFilter};
//! use catalog_admin_core::{DomainResolver, TokenStore};
//!
//! # async fn example() -> catalog_admin_client::Result<()> {
//! let resolved = DomainResolver::default().resolve("admin.novostroy.org");
//! let client = AdminClient::new(&ClientConfig::from_domain(&resolved), TokenStore::default())?;
//!
//! client.auth().login("admin@novostroy.org", "secret").await?;
//! let brands = client.graphql().brands().list(&RubricScopedFilter::rubric("1")).await?;
//! println!("{brands}");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod auth;
pub mod error;
pub mod graphql;
mod http;
pub mod media;
pub mod store;

use std::sync::Arc;

use serde::Deserialize;

use catalog_admin_core::{ResolvedDomain, TokenStore};

pub use auth::{AuthClient, AuthEndpoint, AuthResponse, LoginRequest};
pub use error::{ClientError, FieldErrors, Result};
pub use graphql::{
    ActivityFilter, GraphqlClient, ManufacturerFilter, ProductFilter, RubricCategories,
    RubricScopedFilter, ShopResource, Trashed, DEFAULT_GRAPHQL_URL,
};
pub use media::{ImageOrder, MediaClient, UploadFile};
pub use store::{AuthStore, SessionBackend, SessionSnapshot};

/// Where the clients send their requests.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    /// GraphQL endpoint of the data API.
    #[serde(default = "ClientConfig::default_graphql_url")]
    pub graphql_url: String,

    /// Base URL of the auth API.
    #[serde(default = "ClientConfig::default_auth_api_base")]
    pub auth_api_base: String,

    /// Frontend origin; when set, auth calls go through its auth proxy.
    #[serde(default)]
    pub proxy_origin: Option<String>,
}

impl ClientConfig {
    fn default_graphql_url() -> String {
        DEFAULT_GRAPHQL_URL.to_string()
    }

    fn default_auth_api_base() -> String {
        "http://localhost:8001".to_string()
    }

    /// Configuration for the backends a resolved hostname maps to.
    #[must_use]
    pub fn from_domain(resolved: &ResolvedDomain) -> Self {
        Self {
            graphql_url: format!("{}/graphql", resolved.data_api_base.trim_end_matches('/')),
            auth_api_base: resolved.auth_api_base.clone(),
            proxy_origin: None,
        }
    }

    /// Route auth calls through the proxy served at `origin`.
    #[must_use]
    pub fn with_proxy_origin(mut self, origin: impl Into<String>) -> Self {
        self.proxy_origin = Some(origin.into());
        self
    }

    /// Base URL of the data API's REST endpoints: the GraphQL URL without `/graphql`.
    #[must_use]
    pub fn data_api_base(&self) -> String {
        self.graphql_url
            .replacen("/graphql", "", 1)
            .trim_end_matches('/')
            .to_string()
    }

    /// Endpoint the auth client talks to.
    #[must_use]
    pub fn auth_endpoint(&self) -> AuthEndpoint {
        self.proxy_origin.as_ref().map_or_else(
            || AuthEndpoint::Direct(self.auth_api_base.clone()),
            |origin| AuthEndpoint::Proxied(origin.clone()),
        )
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            graphql_url: Self::default_graphql_url(),
            auth_api_base: Self::default_auth_api_base(),
            proxy_origin: None,
        }
    }
}

/// The auth, GraphQL and media clients over one token store.
#[derive(Debug, Clone)]
pub struct AdminClient {
    auth: Arc<AuthClient>,
    graphql: GraphqlClient,
    media: MediaClient,
    tokens: TokenStore,
}

impl AdminClient {
    /// Build all clients from a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig, tokens: TokenStore) -> Result<Self> {
        tracing::debug!(
            graphql_url = %config.graphql_url,
            auth = ?config.auth_endpoint(),
            "Creating admin client"
        );

        Ok(Self {
            auth: Arc::new(AuthClient::new(&config.auth_endpoint(), tokens.clone())?),
            graphql: GraphqlClient::new(config.graphql_url.clone(), tokens.clone()),
            media: MediaClient::new(config.data_api_base(), tokens.clone()),
            tokens,
        })
    }

    /// Auth API client.
    #[must_use]
    pub fn auth(&self) -> &AuthClient {
        &self.auth
    }

    /// GraphQL client.
    #[must_use]
    pub const fn graphql(&self) -> &GraphqlClient {
        &self.graphql
    }

    /// Image and logo client.
    #[must_use]
    pub const fn media(&self) -> &MediaClient {
        &self.media
    }

    /// The shared token store.
    #[must_use]
    pub const fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// A session store backed by this client's auth API.
    #[must_use]
    pub fn session(&self) -> AuthStore<AuthClient> {
        AuthStore::new(Arc::clone(&self.auth))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_admin_core::DomainResolver;

    #[test]
    fn config_from_production_domain() {
        let resolved = DomainResolver::default().resolve("admin.novostroy.org");
        let config = ClientConfig::from_domain(&resolved);

        assert_eq!(config.graphql_url, "https://crud.novostroy.org/graphql");
        assert_eq!(config.data_api_base(), "https://crud.novostroy.org");
        assert_eq!(
            config.auth_endpoint(),
            AuthEndpoint::Direct("https://auth.novostroy.org".into())
        );
    }

    #[test]
    fn proxy_origin_switches_auth_endpoint() {
        let config = ClientConfig::default().with_proxy_origin("http://localhost:3000");
        assert_eq!(
            config.auth_endpoint().base_url(),
            "http://localhost:3000/api/auth"
        );
    }

    #[test]
    fn defaults_match_local_development() {
        let config: ClientConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.data_api_base(), "http://localhost:8000");
    }

    #[test]
    fn clients_share_token_store() {
        let client = AdminClient::new(&ClientConfig::default(), TokenStore::default()).unwrap();
        client.auth().tokens().set(Some("T1"));
        assert_eq!(client.tokens().get().as_deref(), Some("T1"));
        assert!(!client.session().is_authenticated());
    }
}
