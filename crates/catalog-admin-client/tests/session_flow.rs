//! End-to-end session flow against stubbed auth and data backends.
//!
//! Login persists the token to disk, later calls carry it as a bearer token,
//! and logout removes it again.

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use catalog_admin_client::{ActivityFilter, AdminClient, ClientConfig};
use catalog_admin_core::{FileStorage, TokenStorage, TokenStore, TOKEN_KEY};

fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig {
        graphql_url: format!("{}/graphql", server.uri()),
        auth_api_base: server.uri(),
        proxy_origin: None,
    }
}

#[tokio::test]
async fn login_query_logout_round_trip() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let token_file = dir.path().join("storage.json");

    Mock::given(method("POST"))
        .and(path("/api/login-jwt"))
        .and(body_partial_json(json!({"email": "admin@novostroy.org"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "token": "T1",
            "user": {"id": 7, "name": "Admin"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header("authorization", "Bearer T1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"rubrics": [{"id": "1", "slug": "kitchens"}]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/user"))
        .and(header("authorization", "Bearer T1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "user": {"id": 7, "name": "Admin"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/logout-jwt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = AdminClient::new(
        &config_for(&server),
        TokenStore::new(FileStorage::new(&token_file)),
    )
    .unwrap();

    let response = client.auth().login("admin@novostroy.org", "secret").await.unwrap();
    assert_eq!(response.token.as_deref(), Some("T1"));

    // A second process sees the persisted token.
    let reopened = FileStorage::new(&token_file);
    assert_eq!(reopened.read(TOKEN_KEY).unwrap().as_deref(), Some("T1"));

    let rubrics = client
        .graphql()
        .rubrics()
        .list(&ActivityFilter::default())
        .await
        .unwrap();
    assert_eq!(rubrics[0]["slug"], "kitchens");

    let session = client.session();
    session.initialize().await;
    assert!(session.is_authenticated());
    assert_eq!(session.user().unwrap()["id"], 7);

    session.logout().await;
    assert!(!session.is_authenticated());
    assert!(!client.tokens().has_token());
    assert_eq!(reopened.read(TOKEN_KEY).unwrap(), None);
}

#[tokio::test]
async fn fresh_state_is_logged_out_without_requests() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    let client = AdminClient::new(
        &config_for(&server),
        TokenStore::new(FileStorage::new(dir.path().join("storage.json"))),
    )
    .unwrap();

    let session = client.session();
    session.initialize().await;

    let snapshot = session.snapshot();
    assert!(!snapshot.is_authenticated);
    assert!(!snapshot.is_loading);
    assert!(client.auth().refresh_token().await.unwrap().is_none());

    assert!(server.received_requests().await.unwrap().is_empty());
}
