//! Client-side session state.
//!
//! [`AuthStore`] holds the current user and a loading flag. Whether the
//! session is authenticated is always derived from the user, never stored.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::Serialize;
use serde_json::Value;

use crate::auth::{AuthClient, AuthResponse};
use crate::error::Result;

/// The auth calls the store depends on.
///
/// Abstracted so tests can substitute a mock for [`AuthClient`].
#[async_trait]
pub trait SessionBackend: Send + Sync {
    /// Fetch the current user; `Ok(None)` when there is no session.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the session or cannot be reached.
    async fn current_user(&self) -> Result<Option<AuthResponse>>;

    /// End the session. Must not fail.
    async fn logout(&self);
}

#[async_trait]
impl SessionBackend for AuthClient {
    async fn current_user(&self) -> Result<Option<AuthResponse>> {
        self.get_current_user().await
    }

    async fn logout(&self) {
        AuthClient::logout(self).await;
    }
}

/// A point-in-time copy of the session state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    /// Current user record.
    pub user: Option<Value>,
    /// Whether a current-user fetch is in flight.
    pub is_loading: bool,
    /// `true` iff `user` is present.
    pub is_authenticated: bool,
}

#[derive(Debug)]
struct SessionState {
    user: Option<Value>,
    is_loading: bool,
}

/// Session state shared by every view of the admin UI.
pub struct AuthStore<B> {
    backend: Arc<B>,
    state: RwLock<SessionState>,
}

impl<B: SessionBackend> AuthStore<B> {
    /// Create a store in the loading state with no user.
    #[must_use]
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            state: RwLock::new(SessionState {
                user: None,
                is_loading: true,
            }),
        }
    }

    /// The backend this store talks to.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Load the current user.
    ///
    /// Any failure is treated as "not logged in". Loading is cleared on every path.
    pub async fn initialize(&self) {
        self.state.write().is_loading = true;

        let user = match self.backend.current_user().await {
            Ok(Some(response)) if response.success => response.user,
            Ok(_) => None,
            Err(e) => {
                tracing::debug!(error = %e, "No active session");
                None
            }
        };

        let mut state = self.state.write();
        state.user = user.filter(|u| !u.is_null());
        state.is_loading = false;
    }

    /// Set the user after a login or registration finished elsewhere.
    /// A JSON `null` clears it.
    pub fn adopt_user(&self, user: Option<Value>) {
        self.state.write().user = user.filter(|u| !u.is_null());
    }

    /// End the session and clear the user, whatever the backend says.
    ///
    /// The user is cleared before the backend call, so an abandoned logout
    /// never leaves the session authenticated.
    pub async fn logout(&self) {
        self.state.write().user = None;
        self.backend.logout().await;
    }

    /// Current user record.
    #[must_use]
    pub fn user(&self) -> Option<Value> {
        self.state.read().user.clone()
    }

    /// Whether a current-user fetch is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.read().is_loading
    }

    /// `true` iff a user is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.read().user.is_some()
    }

    /// Copy of the whole state.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.read();
        SessionSnapshot {
            user: state.user.clone(),
            is_loading: state.is_loading,
            is_authenticated: state.user.is_some(),
        }
    }
}

impl<B> std::fmt::Debug for AuthStore<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthStore")
            .field("state", &*self.state.read())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mock backend for testing.
    struct MockBackend {
        user: Option<std::result::Result<AuthResponse, u16>>,
        logouts: AtomicUsize,
        hang_on_logout: bool,
    }

    impl MockBackend {
        fn new(user: Option<std::result::Result<AuthResponse, u16>>) -> Arc<Self> {
            Arc::new(Self {
                user,
                logouts: AtomicUsize::new(0),
                hang_on_logout: false,
            })
        }

        fn hanging() -> Arc<Self> {
            Arc::new(Self {
                user: None,
                logouts: AtomicUsize::new(0),
                hang_on_logout: true,
            })
        }
    }

    #[async_trait]
    impl SessionBackend for MockBackend {
        async fn current_user(&self) -> Result<Option<AuthResponse>> {
            match &self.user {
                None => Ok(None),
                Some(Ok(response)) => Ok(Some(response.clone())),
                Some(Err(status)) => Err(ClientError::Request {
                    message: "Unauthenticated".into(),
                    errors: crate::FieldErrors::new(),
                    status: *status,
                }),
            }
        }

        async fn logout(&self) {
            self.logouts.fetch_add(1, Ordering::SeqCst);
            if self.hang_on_logout {
                std::future::pending::<()>().await;
            }
        }
    }

    fn signed_in(user: Value) -> AuthResponse {
        AuthResponse {
            success: true,
            user: Some(user),
            ..AuthResponse::default()
        }
    }

    #[test]
    fn starts_loading_and_signed_out() {
        let store = AuthStore::new(MockBackend::new(None));
        let snapshot = store.snapshot();
        assert!(snapshot.is_loading);
        assert!(!snapshot.is_authenticated);
        assert_eq!(snapshot.user, None);
    }

    #[tokio::test]
    async fn initialize_adopts_user() {
        let store = AuthStore::new(MockBackend::new(Some(Ok(signed_in(json!({"id": 1}))))));
        store.initialize().await;

        assert!(!store.is_loading());
        assert!(store.is_authenticated());
        assert_eq!(store.user().unwrap()["id"], 1);
    }

    #[tokio::test]
    async fn initialize_failure_means_signed_out() {
        let store = AuthStore::new(MockBackend::new(Some(Err(401))));
        store.adopt_user(Some(json!({"id": 1})));
        store.initialize().await;

        assert!(!store.is_loading());
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn initialize_without_session_clears_loading() {
        let store = AuthStore::new(MockBackend::new(None));
        store.initialize().await;

        assert_eq!(
            store.snapshot(),
            SessionSnapshot {
                user: None,
                is_loading: false,
                is_authenticated: false,
            }
        );
    }

    #[tokio::test]
    async fn initialize_ignores_unsuccessful_envelope() {
        let response = AuthResponse {
            success: false,
            user: Some(json!({"id": 1})),
            ..AuthResponse::default()
        };
        let store = AuthStore::new(MockBackend::new(Some(Ok(response))));
        store.initialize().await;
        assert!(!store.is_authenticated());
    }

    #[test]
    fn adopt_user_null_clears() {
        let store = AuthStore::new(MockBackend::new(None));
        store.adopt_user(Some(json!({"id": 2})));
        assert!(store.is_authenticated());

        store.adopt_user(Some(Value::Null));
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn logout_always_clears_user() {
        let backend = MockBackend::new(None);
        let store = AuthStore::new(Arc::clone(&backend));
        store.adopt_user(Some(json!({"id": 3})));

        store.logout().await;

        assert!(!store.is_authenticated());
        assert_eq!(backend.logouts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn abandoned_logout_still_clears_user() {
        let backend = MockBackend::hanging();
        let store = AuthStore::new(Arc::clone(&backend));
        store.adopt_user(Some(json!({"id": 4})));

        let outcome =
            tokio::time::timeout(std::time::Duration::from_millis(50), store.logout()).await;

        assert!(outcome.is_err());
        assert_eq!(backend.logouts.load(Ordering::SeqCst), 1);
        assert!(!store.is_authenticated());
    }
}
