//! Mock service tests for the HTTP adapter.
//!
//! These tests use wiremock to stand in for the authentication service and
//! drive both the adapter alone and a full controller on top of it.

use serde_json::json;
use sesh_core::error::{Error, TransportError};
use sesh_core::{
    AuthService, Credentials, MemoryTokenStore, RouteTable, ServiceUrl, SessionController, Token,
    TokenStore, VisitedViews,
};
use sesh_http::HttpAuthService;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to create a service URL from a mock server.
fn mock_service_url(server: &MockServer) -> ServiceUrl {
    ServiceUrl::new(format!("http://127.0.0.1:{}", server.address().port())).unwrap()
}

fn service(server: &MockServer) -> HttpAuthService {
    HttpAuthService::new(mock_service_url(server)).unwrap()
}

// ============================================================================
// Adapter
// ============================================================================

#[tokio::test]
async fn test_login_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/user/login"))
        .and(body_json(json!({
            "username": "admin",
            "password": "111111"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "admin-token"
        })))
        .mount(&server)
        .await;

    let response = service(&server)
        .login(&Credentials::new("admin", "111111"))
        .await
        .unwrap();

    assert_eq!(response.token.as_str(), "admin-token");
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/user/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "InvalidCredentials",
            "message": "Account and password are incorrect."
        })))
        .mount(&server)
        .await;

    let err = service(&server)
        .login(&Credentials::new("admin", "wrong"))
        .await
        .unwrap_err();

    match err {
        Error::Protocol(e) => {
            assert_eq!(e.status, 401);
            assert_eq!(e.error.as_deref(), Some("InvalidCredentials"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_identity_sends_token_in_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/info"))
        .and(query_param("token", "admin-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "username": "Super Admin",
            "picture": "https://cdn.example.com/admin.gif",
            "roles": ["admin"],
            "permissions": ["user:add", "user:edit"]
        })))
        .mount(&server)
        .await;

    let identity = service(&server)
        .fetch_identity(&Token::new("admin-token"))
        .await
        .unwrap();

    assert_eq!(identity.username, "Super Admin");
    assert_eq!(identity.roles, vec!["admin"]);
    assert_eq!(identity.permissions, vec!["user:add", "user:edit"]);
}

#[tokio::test]
async fn test_logout_sends_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/user/logout"))
        .and(header("authorization", "Bearer admin-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": "success" })))
        .expect(1)
        .mount(&server)
        .await;

    service(&server)
        .logout(&Token::new("admin-token"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_error_without_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/user/logout"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = service(&server)
        .logout(&Token::new("admin-token"))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "protocol error: HTTP 502");
}

#[tokio::test]
async fn test_unreachable_service_is_transport_error() {
    // Reserve a port, then release it so nothing is listening there.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let url = ServiceUrl::new(format!("http://127.0.0.1:{port}")).unwrap();

    let err = HttpAuthService::new(url)
        .unwrap()
        .login(&Credentials::new("admin", "111111"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Transport(TransportError::Connection { .. })
    ));
}

// ============================================================================
// Controller over HTTP
// ============================================================================

#[tokio::test]
async fn test_full_session_over_http() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/user/login"))
        .and(body_json(json!({ "username": "bob", "password": " pw" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "bob-token" })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/user/info"))
        .and(query_param("token", "bob-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "username": "bob",
            "picture": "https://cdn.example.com/bob.png",
            "roles": ["editor"],
            "permissions": ["article:edit"]
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/user/logout"))
        .and(header("authorization", "Bearer bob-token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let store = MemoryTokenStore::default();
    let views = VisitedViews::default();
    let controller = SessionController::new(
        service(&server),
        store.clone(),
        RouteTable::default(),
        views.clone(),
    );

    controller
        .login(Credentials::new(" bob ", " pw"))
        .await
        .unwrap();
    assert_eq!(store.get().as_str(), "bob-token");

    let identity = controller.fetch_identity().await.unwrap();
    assert_eq!(identity.username, "bob");
    assert!(controller.state().await.has_permission("article:edit"));

    controller.logout().await.unwrap();
    assert!(store.get().is_empty());
    assert!(controller.state().await.roles().is_empty());
}

#[tokio::test]
async fn test_identity_without_username_over_http() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "username": null,
            "roles": ["visitor"]
        })))
        .mount(&server)
        .await;

    let controller = SessionController::new(
        service(&server),
        MemoryTokenStore::with_token(Token::new("stale-token")),
        RouteTable::default(),
        VisitedViews::default(),
    );

    let err = controller.fetch_identity().await.unwrap_err();
    assert!(err.is_unauthenticated());
    assert_eq!(controller.state().await.roles(), ["visitor"]);
}
