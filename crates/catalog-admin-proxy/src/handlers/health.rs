//! Liveness endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::ProxyState;

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `"healthy"` while the process serves requests.
    pub status: &'static str,
    /// Crate version.
    pub version: &'static str,
    /// Auth backend base the relay forwards to.
    pub auth_backend: String,
    /// Whether inbound cookies are relayed.
    pub forward_cookies: bool,
}

/// Report liveness and relay settings. Never contacts the backend.
pub async fn health(State(state): State<ProxyState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        auth_backend: state.config.backend_base().to_string(),
        forward_cookies: state.config.forward_cookies,
    })
}
