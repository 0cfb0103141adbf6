//! Helpers shared by the REST-style clients.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use catalog_admin_core::TokenStore;

use crate::error::{ClientError, FieldErrors, Result};

/// Standard JSON headers, plus a bearer token when one is stored.
pub(crate) fn json_headers(tokens: &TokenStore, with_content_type: bool) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    if with_content_type {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }

    if let Some(token) = tokens.get() {
        let value = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| ClientError::InvalidHeader(e.to_string()))?;
        headers.insert(AUTHORIZATION, value);
    }

    Ok(headers)
}

/// Read a `{success, message?, errors?, ...}` body.
///
/// Fails with [`ClientError::Request`] on a non-2xx status or when `success`
/// is not `true`; `default_message` is used when the body carries none.
pub(crate) async fn read_envelope(
    response: reqwest::Response,
    default_message: &str,
) -> Result<Value> {
    let status = response.status();
    let body = response.bytes().await?;

    let value: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(e) if status.is_success() => return Err(ClientError::Parse(e.to_string())),
        Err(_) => Value::Null,
    };

    let succeeded = value.get("success").and_then(Value::as_bool) == Some(true);
    if status.is_success() && succeeded {
        return Ok(value);
    }

    let message = value
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .unwrap_or(default_message)
        .to_string();

    tracing::debug!(status = %status, message = %message, "Request rejected by backend");

    Err(ClientError::Request {
        message,
        errors: value.get("errors").map(field_errors).unwrap_or_default(),
        status: status.as_u16(),
    })
}

/// Convert a backend `errors` value into a field map.
///
/// Accepts `{field: [msg, ...]}` and `{field: msg}`; anything else is empty.
pub(crate) fn field_errors(value: &Value) -> FieldErrors {
    let Some(object) = value.as_object() else {
        return FieldErrors::new();
    };

    object
        .iter()
        .map(|(field, messages)| {
            let messages = match messages {
                Value::Array(items) => items
                    .iter()
                    .map(|item| {
                        item.as_str()
                            .map_or_else(|| item.to_string(), ToString::to_string)
                    })
                    .collect(),
                Value::String(message) => vec![message.clone()],
                Value::Null => Vec::new(),
                other => vec![other.to_string()],
            };
            (field.clone(), messages)
        })
        .collect()
}

/// Serde adapter for lenient `errors` fields.
pub(crate) fn deserialize_field_errors<'de, D>(deserializer: D) -> std::result::Result<FieldErrors, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(field_errors(&value))
}
