//! Same-origin auth proxy for the catalog admin frontend.
//!
//! The admin UI calls `/api/auth/<path>` on its own origin; this service
//! relays each call to the auth backend so the backend's httpOnly session
//! cookie lands on the admin origin. It also serves:
//!
//! - `GET /health` for liveness checks
//! - `GET /api/domain` with the backend bases for the request's hostname
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐
//! │   Admin UI (browser) │
//! └──────────────────────┘
//!            │ same origin
//!            ▼
//! ┌──────────────────────┐        ┌──────────────────────┐
//! │ catalog-admin-proxy  │ ─────▶ │  Auth backend (/api) │
//! └──────────────────────┘        └──────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use catalog_admin_proxy::{create_router, ProxyConfig, ProxyState};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ProxyConfig::from_env()?;
//! let listen_addr = config.listen_addr.clone();
//! let state = ProxyState::new(config)?;
//!
//! let app = create_router(state);
//! let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::ProxyConfig;
pub use error::{ApiError, ConfigError};
pub use routes::create_router;
pub use state::ProxyState;
