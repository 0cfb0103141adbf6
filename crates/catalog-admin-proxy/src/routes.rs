//! Router configuration.

use axum::routing::{any, get};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{auth_proxy, domain, health};
use crate::state::ProxyState;

/// Create the proxy router with all routes and middleware.
///
/// # Routes
///
/// - `GET /health` - Health check
/// - `GET /api/domain` - Backend bases for the request's hostname
/// - `* /api/auth/*path` - Relay to the auth backend
pub fn create_router(state: ProxyState) -> Router {
    let max_body_bytes = state.config.max_body_bytes;

    Router::new()
        .route("/health", get(health::health))
        .route("/api/domain", get(domain::resolve_domain))
        .route("/api/auth/*path", any(auth_proxy::proxy_auth))
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .with_state(state)
}
