//! Auth relay: `METHOD /api/auth/<path>` → `<backend>/<path>`.
//!
//! One inbound request opens exactly one upstream request. The backend's
//! status, content type, `Set-Cookie` headers and body come back untouched,
//! so its httpOnly session cookie survives the same-origin hop.

use axum::body::{to_bytes, Body, Bytes};
use axum::extract::{Request, State};
use axum::http::header::{
    ACCEPT, ALLOW, AUTHORIZATION, CONTENT_TYPE, COOKIE, ORIGIN, SET_COOKIE,
};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};

use crate::error::{ApiError, ALLOWED_METHODS};
use crate::state::ProxyState;

/// Route prefix the relay is mounted under.
pub const ROUTE_PREFIX: &str = "/api/auth/";

fn json() -> HeaderValue {
    HeaderValue::from_static("application/json")
}

/// Relay handler for every method under `/api/auth/`.
pub async fn proxy_auth(State(state): State<ProxyState>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let method = parts.method;

    match method {
        Method::OPTIONS => return preflight(),
        Method::GET | Method::POST | Method::PUT | Method::PATCH | Method::DELETE => {}
        _ => {
            tracing::debug!(method = %method, "Rejecting unsupported method");
            return ApiError::MethodNotAllowed.into_response();
        }
    }

    let url = upstream_url(state.config.backend_base(), &parts.uri);
    let headers = outbound_headers(&parts.headers, state.config.forward_cookies);

    let body = if method == Method::GET {
        None
    } else {
        read_body(body, state.config.max_body_bytes).await
    };

    tracing::debug!(
        method = %method,
        url = %url,
        has_body = body.is_some(),
        "Forwarding auth request"
    );

    let mut upstream = state.client.request(method, &url).headers(headers);
    if let Some(body) = body {
        upstream = upstream.body(body);
    }

    match upstream.send().await {
        Ok(response) => relay(response).await,
        Err(e) => {
            tracing::error!(url = %url, error = %e, "Auth backend unreachable");
            ApiError::UpstreamUnavailable(e.to_string()).into_response()
        }
    }
}

fn preflight() -> Response {
    (
        StatusCode::NO_CONTENT,
        [(ALLOW, HeaderValue::from_static(ALLOWED_METHODS))],
    )
        .into_response()
}

/// Backend URL for an inbound URI: the raw sub-path after the route prefix,
/// plus the query string when there is one.
fn upstream_url(backend_base: &str, uri: &Uri) -> String {
    let path = uri
        .path()
        .strip_prefix(ROUTE_PREFIX)
        .unwrap_or_else(|| uri.path().trim_start_matches('/'));

    match uri.query() {
        Some(query) if !query.is_empty() => format!("{backend_base}/{path}?{query}"),
        _ => format!("{backend_base}/{path}"),
    }
}

/// JSON content negotiation plus the caller's credentials.
fn outbound_headers(inbound: &HeaderMap, forward_cookies: bool) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, json());
    headers.insert(ACCEPT, json());

    for name in [AUTHORIZATION, ORIGIN] {
        if let Some(value) = inbound.get(&name) {
            headers.insert(name, value.clone());
        }
    }

    if forward_cookies {
        if let Some(cookie) = joined_cookie(inbound) {
            headers.insert(COOKIE, cookie);
        }
    }

    headers
}

/// All inbound `Cookie` fields as one header; HTTP/2 clients may split them.
fn joined_cookie(inbound: &HeaderMap) -> Option<HeaderValue> {
    let mut fields = inbound.get_all(COOKIE).iter();
    let first = fields.next()?;

    let rest: Vec<&HeaderValue> = fields.collect();
    if rest.is_empty() {
        return Some(first.clone());
    }

    let mut joined = first.as_bytes().to_vec();
    for field in rest {
        joined.extend_from_slice(b"; ");
        joined.extend_from_slice(field.as_bytes());
    }

    match HeaderValue::from_bytes(&joined) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!(error = %e, "Dropping unjoinable Cookie header");
            Some(first.clone())
        }
    }
}

/// Raw inbound body; empty or unreadable bodies count as none.
async fn read_body(body: Body, limit: usize) -> Option<Bytes> {
    match to_bytes(body, limit).await {
        Ok(bytes) if !bytes.is_empty() => Some(bytes),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!(error = %e, "Inbound body unreadable; forwarding without body");
            None
        }
    }
}

async fn relay(upstream: reqwest::Response) -> Response {
    let status = upstream.status();
    let content_type = upstream
        .headers()
        .get(CONTENT_TYPE)
        .cloned()
        .unwrap_or_else(json);
    let cookies: Vec<HeaderValue> = upstream
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .cloned()
        .collect();

    let body = match upstream.bytes().await {
        Ok(body) => body,
        Err(e) => {
            tracing::error!(error = %e, "Auth backend response interrupted");
            return ApiError::UpstreamUnavailable(e.to_string()).into_response();
        }
    };

    tracing::debug!(status = %status, cookies = cookies.len(), "Relaying auth response");

    let mut response = (status, body).into_response();
    let headers = response.headers_mut();
    headers.insert(CONTENT_TYPE, content_type);
    for cookie in cookies {
        headers.append(SET_COOKIE, cookie);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_url_keeps_raw_path_and_query() {
        let uri: Uri = "/api/auth/login-jwt".parse().unwrap();
        assert_eq!(
            upstream_url("http://localhost:8001/api", &uri),
            "http://localhost:8001/api/login-jwt"
        );

        let uri: Uri = "/api/auth/users/a%2Fb?page=2&q=x".parse().unwrap();
        assert_eq!(
            upstream_url("http://b/api", &uri),
            "http://b/api/users/a%2Fb?page=2&q=x"
        );
    }

    #[test]
    fn outbound_headers_copy_credentials_only() {
        let mut inbound = HeaderMap::new();
        inbound.insert(AUTHORIZATION, HeaderValue::from_static("Bearer T1"));
        inbound.insert(ORIGIN, HeaderValue::from_static("https://admin.novostroy.org"));
        inbound.insert(COOKIE, HeaderValue::from_static("session=abc"));
        inbound.insert("x-custom", HeaderValue::from_static("dropped"));
        inbound.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));

        let headers = outbound_headers(&inbound, true);
        assert_eq!(headers[AUTHORIZATION], "Bearer T1");
        assert_eq!(headers[ORIGIN], "https://admin.novostroy.org");
        assert_eq!(headers[COOKIE], "session=abc");
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert_eq!(headers[ACCEPT], "application/json");
        assert!(headers.get("x-custom").is_none());

        let headers = outbound_headers(&inbound, false);
        assert!(headers.get(COOKIE).is_none());
    }

    #[test]
    fn split_cookie_fields_are_joined() {
        let mut inbound = HeaderMap::new();
        inbound.append(COOKIE, HeaderValue::from_static("jwt=abc"));
        inbound.append(COOKIE, HeaderValue::from_static("refresh=def"));

        let headers = outbound_headers(&inbound, true);
        assert_eq!(headers.get_all(COOKIE).iter().count(), 1);
        assert_eq!(headers[COOKIE], "jwt=abc; refresh=def");
    }

    #[test]
    fn outbound_headers_without_credentials() {
        let headers = outbound_headers(&HeaderMap::new(), true);
        assert_eq!(headers.len(), 2);
    }

    #[tokio::test]
    async fn empty_body_is_none() {
        assert!(read_body(Body::empty(), 1024).await.is_none());
        assert_eq!(
            read_body(Body::from("{}"), 1024).await.as_deref(),
            Some(b"{}".as_slice())
        );
        assert!(read_body(Body::from("x".repeat(10)), 4).await.is_none());
    }
}
