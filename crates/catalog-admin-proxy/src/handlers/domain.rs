//! Domain info endpoint.

use axum::extract::State;
use axum::http::header::HOST;
use axum::http::HeaderMap;
use axum::Json;

use catalog_admin_core::{hostname_from_headers, ResolvedDomain};

use crate::state::ProxyState;

const FORWARDED_HOST: &str = "x-forwarded-host";

/// Resolve the request's own hostname.
///
/// # Example
///
/// ```text
/// GET /api/domain
/// Host: admin.novostroy.org
///
/// Response: 200 OK
/// {
///   "hostname": "admin.novostroy.org",
///   "auth_api_base": "https://auth.novostroy.org",
///   "data_api_base": "https://crud.novostroy.org",
///   "cookie_domain": ".novostroy.org"
/// }
/// ```
pub async fn resolve_domain(
    State(state): State<ProxyState>,
    headers: HeaderMap,
) -> Json<ResolvedDomain> {
    let hostname = hostname_from_headers(
        header_str(&headers, HOST.as_str()),
        header_str(&headers, FORWARDED_HOST),
    );

    Json(state.resolver.resolve(&hostname))
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProxyConfig;
    use axum::http::HeaderValue;

    fn state() -> ProxyState {
        ProxyState::new(ProxyConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn resolves_host_header() {
        let mut headers = HeaderMap::new();
        headers.insert(HOST, HeaderValue::from_static("admin.novostroy.org:443"));
        headers.insert(FORWARDED_HOST, HeaderValue::from_static("localhost"));

        let Json(resolved) = resolve_domain(State(state()), headers).await;
        assert_eq!(resolved.hostname, "admin.novostroy.org");
        assert_eq!(resolved.auth_api_base, "https://auth.novostroy.org");
        assert_eq!(resolved.cookie_domain.as_deref(), Some(".novostroy.org"));
    }

    #[tokio::test]
    async fn falls_back_to_forwarded_host() {
        let mut headers = HeaderMap::new();
        headers.insert(FORWARDED_HOST, HeaderValue::from_static("novostroy.org, proxy.internal"));

        let Json(resolved) = resolve_domain(State(state()), headers).await;
        assert_eq!(resolved.hostname, "novostroy.org");
        assert_eq!(resolved.data_api_base, "https://crud.novostroy.org");
    }

    #[tokio::test]
    async fn no_host_means_local_development() {
        let Json(resolved) = resolve_domain(State(state()), HeaderMap::new()).await;
        assert_eq!(resolved.hostname, "localhost");
        assert_eq!(resolved.auth_api_base, "http://localhost:8001");
        assert_eq!(resolved.cookie_domain, None);
    }
}
