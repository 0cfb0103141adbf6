//! Proxy error types and responses.
//!
//! Backend error bodies are relayed untouched; the responses built here are the
//! only ones the proxy fabricates.

use axum::http::header::ALLOW;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Methods advertised in `Allow`.
pub const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";

const UNAVAILABLE_MESSAGE: &str = "Сервис авторизации недоступен";
const RETRY_LATER: &str = "Попробуйте позже";

/// Errors produced while relaying a request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend could not be reached (DNS, connect, timeout, broken body).
    #[error("auth backend unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The method is not relayed.
    #[error("method not allowed")]
    MethodNotAllowed,
}

/// Invalid proxy configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A configuration value could not be parsed.
    #[error("invalid value for {key}: {value:?}")]
    Invalid {
        /// Variable name.
        key: &'static str,
        /// Raw value.
        value: String,
    },
}

#[derive(Debug, Serialize)]
struct DegradedBody {
    success: bool,
    message: &'static str,
    errors: DegradedErrors,
}

#[derive(Debug, Serialize)]
struct DegradedErrors {
    general: [&'static str; 1],
}

impl ApiError {
    /// Get the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::UpstreamUnavailable(_) => {
                let body = DegradedBody {
                    success: false,
                    message: UNAVAILABLE_MESSAGE,
                    errors: DegradedErrors {
                        general: [RETRY_LATER],
                    },
                };
                (self.status_code(), Json(body)).into_response()
            }
            Self::MethodNotAllowed => (
                self.status_code(),
                [(ALLOW, HeaderValue::from_static(ALLOWED_METHODS))],
            )
                .into_response(),
        }
    }
}
