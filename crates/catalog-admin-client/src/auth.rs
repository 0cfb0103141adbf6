//! Auth API client for login, registration, logout and token refresh.
//!
//! Calls go either straight to the auth backend or through the same-origin
//! auth proxy (`<origin>/api/auth/...`); callers see the same behavior either
//! way. A token returned by the backend is persisted in the [`TokenStore`]
//! before the call returns.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use catalog_admin_core::{ResolvedDomain, TokenStore};

use crate::error::{ClientError, FieldErrors, Result};
use crate::http::{deserialize_field_errors, json_headers, read_envelope};

const LOGIN_FAILED: &str = "Ошибка входа";
const REGISTER_FAILED: &str = "Ошибка регистрации";
const REQUEST_FAILED: &str = "Ошибка запроса";
const REFRESH_FAILED: &str = "Ошибка обновления токена";

/// Where auth requests are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEndpoint {
    /// Straight to the auth backend; holds its base URL (e.g., `https://auth.novostroy.org`).
    Direct(String),
    /// Through the auth proxy; holds the frontend origin (e.g., `https://admin.novostroy.org`).
    Proxied(String),
}

impl AuthEndpoint {
    /// Direct endpoint for a resolved domain.
    #[must_use]
    pub fn direct(resolved: &ResolvedDomain) -> Self {
        Self::Direct(resolved.auth_api_base.clone())
    }

    /// Proxied endpoint for a frontend origin.
    #[must_use]
    pub fn proxied(origin: impl Into<String>) -> Self {
        Self::Proxied(origin.into())
    }

    /// Base URL the auth paths are appended to.
    #[must_use]
    pub fn base_url(&self) -> String {
        match self {
            Self::Direct(base) => format!("{}/api", base.trim_end_matches('/')),
            Self::Proxied(origin) => format!("{}/api/auth", origin.trim_end_matches('/')),
        }
    }
}

/// Request payload for email/password login.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    /// User's email address.
    pub email: &'a str,
    /// User's password.
    pub password: &'a str,
}

/// Response envelope shared by every auth endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Whether the backend accepted the request.
    #[serde(default)]
    pub success: bool,
    /// Human-readable message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Field-level validation messages.
    #[serde(
        default,
        deserialize_with = "deserialize_field_errors",
        skip_serializing_if = "FieldErrors::is_empty"
    )]
    pub errors: FieldErrors,
    /// Session token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Current user record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Value>,
}

/// Client for the auth API.
#[derive(Debug, Clone)]
pub struct AuthClient {
    client: reqwest::Client,
    base_url: String,
    tokens: TokenStore,
}

impl AuthClient {
    /// Create a client with its own cookie jar, so the backend's httpOnly
    /// session cookie is sent back on later calls.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(endpoint: &AuthEndpoint, tokens: TokenStore) -> Result<Self> {
        let client = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self::with_client(client, endpoint, tokens))
    }

    /// Create a client with a custom reqwest client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, endpoint: &AuthEndpoint, tokens: TokenStore) -> Self {
        Self {
            client,
            base_url: endpoint.base_url(),
            tokens,
        }
    }

    /// Base URL the auth paths are appended to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The token store this client reads and writes.
    #[must_use]
    pub const fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Returns `true` if a session token is stored.
    #[must_use]
    pub fn has_stored_token(&self) -> bool {
        self.tokens.has_token()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    /// Authenticate with email and password.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Request`] if the backend rejects the credentials,
    /// or a transport error if it cannot be reached.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        tracing::debug!(email = %email, "Login request");

        let response = self
            .client
            .post(self.url("login-jwt"))
            .headers(json_headers(&self.tokens, true)?)
            .json(&LoginRequest { email, password })
            .send()
            .await?;

        let body = self.accept(response, LOGIN_FAILED).await?;
        tracing::debug!(has_user = body.user.is_some(), "Login succeeded");
        Ok(body)
    }

    /// Register a new account. `profile` is sent as the JSON body unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Request`] with field errors if validation fails,
    /// or a transport error if the backend cannot be reached.
    pub async fn register<P>(&self, profile: &P) -> Result<AuthResponse>
    where
        P: Serialize + ?Sized,
    {
        let response = self
            .client
            .post(self.url("register"))
            .headers(json_headers(&self.tokens, true)?)
            .json(profile)
            .send()
            .await?;

        self.accept(response, REGISTER_FAILED).await
    }

    /// End the session.
    ///
    /// The stored token is cleared before the remote call starts, so it is gone
    /// even if the backend refuses, is unreachable, or the future is dropped.
    /// The remote call's outcome is only logged.
    pub async fn logout(&self) {
        let headers = json_headers(&self.tokens, true);
        self.tokens.clear();

        let result = match headers {
            Ok(headers) => self
                .client
                .post(self.url("logout-jwt"))
                .headers(headers)
                .send()
                .await
                .map_err(ClientError::from),
            Err(e) => Err(e),
        };

        match result {
            Ok(response) if response.status().is_success() => {
                tracing::debug!("Session cookies cleared by backend");
            }
            Ok(response) => {
                tracing::warn!(status = %response.status(), "Logout rejected by backend");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Logout request failed");
            }
        }
    }

    /// Fetch the current user.
    ///
    /// Returns `Ok(None)` without any request when no token is stored.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Request`] if the backend rejects the token, or a
    /// transport error if it cannot be reached.
    pub async fn get_current_user(&self) -> Result<Option<AuthResponse>> {
        if !self.tokens.has_token() {
            return Ok(None);
        }

        let response = self
            .client
            .get(self.url("user"))
            .headers(json_headers(&self.tokens, true)?)
            .send()
            .await?;

        self.accept(response, REQUEST_FAILED).await.map(Some)
    }

    /// Exchange the stored token for a fresh one.
    ///
    /// Returns `Ok(None)` without any request when no token is stored.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Request`] if the backend refuses to refresh, or a
    /// transport error if it cannot be reached.
    pub async fn refresh_token(&self) -> Result<Option<AuthResponse>> {
        if !self.tokens.has_token() {
            return Ok(None);
        }

        let response = self
            .client
            .post(self.url("refresh"))
            .headers(json_headers(&self.tokens, true)?)
            .send()
            .await?;

        self.accept(response, REFRESH_FAILED).await.map(Some)
    }

    /// Validate the envelope and persist any token it carries.
    async fn accept(&self, response: reqwest::Response, default_message: &str) -> Result<AuthResponse> {
        let value = read_envelope(response, default_message).await?;
        let body: AuthResponse =
            serde_json::from_value(value).map_err(|e| ClientError::Parse(e.to_string()))?;

        if let Some(token) = body.token.as_deref() {
            self.tokens.set(Some(token));
        }

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_admin_core::{DomainResolver, MemoryStorage};
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> AuthClient {
        AuthClient::new(
            &AuthEndpoint::Direct(server.uri()),
            TokenStore::new(MemoryStorage::new()),
        )
        .unwrap()
    }

    #[test]
    fn endpoint_base_urls() {
        assert_eq!(
            AuthEndpoint::Direct("https://auth.novostroy.org/".into()).base_url(),
            "https://auth.novostroy.org/api"
        );
        assert_eq!(
            AuthEndpoint::proxied("https://admin.novostroy.org").base_url(),
            "https://admin.novostroy.org/api/auth"
        );

        let resolved = DomainResolver::default().resolve("localhost");
        assert_eq!(
            AuthEndpoint::direct(&resolved).base_url(),
            "http://localhost:8001/api"
        );
    }

    #[test]
    fn auth_response_tolerates_missing_fields() {
        let body: AuthResponse = serde_json::from_value(json!({"success": true})).unwrap();
        assert!(body.success);
        assert!(body.token.is_none());
        assert!(body.errors.is_empty());

        let body: AuthResponse =
            serde_json::from_value(json!({"success": false, "errors": null})).unwrap();
        assert!(body.errors.is_empty());
    }

    #[tokio::test]
    async fn login_persists_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/login-jwt"))
            .and(body_json(json!({"email": "a@b.com", "password": "pw"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "token": "T1",
                "user": {"id": 1}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let body = client.login("a@b.com", "pw").await.unwrap();

        assert_eq!(client.tokens().get().as_deref(), Some("T1"));
        assert_eq!(body.user.unwrap()["id"], 1);
    }

    #[tokio::test]
    async fn login_failure_carries_message_errors_and_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/login-jwt"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "success": false,
                "message": "Неверные данные",
                "errors": {"email": ["not found"]}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.login("a@b.com", "bad").await.unwrap_err();

        assert_eq!(err.to_string(), "Неверные данные");
        assert_eq!(err.status(), Some(422));
        assert_eq!(err.field_errors().unwrap()["email"], vec!["not found"]);
        assert!(!client.has_stored_token());
    }

    #[tokio::test]
    async fn success_false_with_200_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/login-jwt"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
            .mount(&server)
            .await;

        let err = client_for(&server).login("a@b.com", "pw").await.unwrap_err();
        assert_eq!(err.to_string(), LOGIN_FAILED);
        assert_eq!(err.status(), Some(200));
    }

    #[tokio::test]
    async fn non_json_error_body_uses_default_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/register"))
            .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .register(&json!({"email": "a@b.com"}))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), REGISTER_FAILED);
        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn register_persists_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/register"))
            .and(body_json(json!({"name": "Ann", "email": "a@b.com"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "success": true,
                "token": "R1",
                "user": {"id": 7}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        client
            .register(&json!({"name": "Ann", "email": "a@b.com"}))
            .await
            .unwrap();
        assert_eq!(client.tokens().get().as_deref(), Some("R1"));
    }

    #[tokio::test]
    async fn current_user_without_token_skips_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(client.get_current_user().await.unwrap().is_none());
        assert!(client.refresh_token().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn current_user_sends_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/user"))
            .and(header("authorization", "Bearer T1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "user": {"id": 1, "email": "a@b.com"}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        client.tokens().set(Some("T1"));

        let body = client.get_current_user().await.unwrap().unwrap();
        assert_eq!(body.user.unwrap()["email"], "a@b.com");
    }

    #[tokio::test]
    async fn refresh_replaces_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/refresh"))
            .and(header("authorization", "Bearer OLD"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "token": "NEW"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        client.tokens().set(Some("OLD"));

        client.refresh_token().await.unwrap();
        assert_eq!(client.tokens().get().as_deref(), Some("NEW"));
    }

    #[tokio::test]
    async fn logout_clears_token_when_backend_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/logout-jwt"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = client_for(&server);
        client.tokens().set(Some("T1"));
        client.logout().await;
        assert!(!client.has_stored_token());
    }

    #[tokio::test]
    async fn logout_clears_token_when_backend_unreachable() {
        let client = AuthClient::new(
            &AuthEndpoint::Direct("http://127.0.0.1:9".into()),
            TokenStore::new(MemoryStorage::new()),
        )
        .unwrap();
        client.tokens().set(Some("T1"));

        client.logout().await;
        assert_eq!(client.tokens().get(), None);
    }

    #[tokio::test]
    async fn logout_still_sends_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/logout-jwt"))
            .and(header("authorization", "Bearer T1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client.tokens().set(Some("T1"));
        client.logout().await;
        assert!(!client.has_stored_token());
    }

    #[tokio::test]
    async fn abandoned_logout_still_clears_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/logout-jwt"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(std::time::Duration::from_secs(5))
                    .set_body_json(json!({"success": true})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        client.tokens().set(Some("T1"));

        let outcome =
            tokio::time::timeout(std::time::Duration::from_millis(200), client.logout()).await;

        assert!(outcome.is_err());
        assert_eq!(client.tokens().get(), None);
    }
}
