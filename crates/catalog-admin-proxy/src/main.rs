//! Catalog admin auth proxy.
//!
//! Configuration comes from the environment:
//!
//! - `LISTEN_ADDR` (default `0.0.0.0:3000`)
//! - `AUTH_BACKEND_URL` (default `http://localhost:8001/api`)
//! - `PROXY_FORWARD_COOKIES` (default `true`)
//! - `UPSTREAM_TIMEOUT_SECONDS` (default: no timeout)
//! - `MAX_BODY_BYTES` (default 1 MB)

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use catalog_admin_proxy::{create_router, ProxyConfig, ProxyState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,catalog_admin=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting catalog admin auth proxy");

    let config = ProxyConfig::from_env()?;
    let listen_addr = config.listen_addr.clone();

    tracing::info!(
        listen_addr = %listen_addr,
        auth_backend_url = %config.auth_backend_url,
        forward_cookies = config.forward_cookies,
        upstream_timeout_seconds = ?config.upstream_timeout_seconds,
        max_body_bytes = config.max_body_bytes,
        "Proxy configuration loaded"
    );

    let state = ProxyState::new(config)?;
    let app = create_router(state);

    tracing::info!(listen_addr = %listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
