//! Client error types.

use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;

/// A result type using `ClientError`.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Field-level validation messages keyed by field name.
pub type FieldErrors = HashMap<String, Vec<String>>;

/// Errors returned by the API clients.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response (DNS, connect, timeout, TLS).
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status or `success: false`.
    #[error("{message}")]
    Request {
        /// Backend message, or a localized default.
        message: String,
        /// Field-level validation messages.
        errors: FieldErrors,
        /// HTTP status code of the response.
        status: u16,
    },

    /// The GraphQL endpoint answered with a 5xx status.
    #[error("Ошибка сервера ({status}). Проверьте логи бэкенда.")]
    ServerUnavailable {
        /// HTTP status code of the response.
        status: u16,
    },

    /// The GraphQL response carried a non-empty `errors` array.
    #[error("{message}")]
    Graphql {
        /// All error messages joined with `"; "`.
        message: String,
        /// The raw error entries.
        errors: Vec<Value>,
    },

    /// The GraphQL `data` object lacks the requested field.
    #[error("response is missing field `{0}`")]
    MissingField(String),

    /// The response body could not be decoded.
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// A request URL could not be built from the base URL and its parameters.
    #[error("invalid request URL: {0}")]
    InvalidUrl(String),

    /// A header value (e.g., the stored token) is not valid in HTTP.
    #[error("invalid header value: {0}")]
    InvalidHeader(String),
}

impl ClientError {
    /// HTTP status attached to the error, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } | Self::ServerUnavailable { status } => Some(*status),
            _ => None,
        }
    }

    /// Field-level validation messages, if the backend sent any.
    #[must_use]
    pub const fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Request { errors, .. } => Some(errors),
            _ => None,
        }
    }

    /// Returns `true` if no response was received at all.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_error_displays_backend_message() {
        let err = ClientError::Request {
            message: "Неверный пароль".to_string(),
            errors: FieldErrors::from([("password".to_string(), vec!["wrong".to_string()])]),
            status: 422,
        };

        assert_eq!(err.to_string(), "Неверный пароль");
        assert_eq!(err.status(), Some(422));
        assert_eq!(err.field_errors().unwrap()["password"], vec!["wrong"]);
        assert!(!err.is_transport());
    }

    #[test]
    fn server_unavailable_mentions_status() {
        let err = ClientError::ServerUnavailable { status: 503 };
        assert!(err.to_string().contains("503"));
        assert_eq!(err.status(), Some(503));
        assert!(err.field_errors().is_none());
    }

    #[test]
    fn graphql_error_has_no_status() {
        let err = ClientError::Graphql {
            message: "X".to_string(),
            errors: vec![serde_json::json!({"message": "X"})],
        };
        assert_eq!(err.to_string(), "X");
        assert_eq!(err.status(), None);
    }
}
