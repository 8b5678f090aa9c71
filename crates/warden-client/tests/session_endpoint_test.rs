//! Integration tests for the identity endpoint contract.

use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use warden_client::IdentityClient;
use warden_session::{CacheConfig, SessionCache, SessionStatus};

fn client_for(server: &MockServer) -> IdentityClient {
    IdentityClient::builder()
        .base_url(server.uri())
        .build()
        .unwrap()
}

#[tokio::test]
async fn current_session_returns_record() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/session/current"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "u-1",
            "name": "Alex",
            "email": "alex@example.com",
            "role": "member",
            "permissions": ["boards:read"]
        })))
        .mount(&server)
        .await;

    let record = client_for(&server)
        .session()
        .current()
        .await
        .unwrap()
        .expect("session should exist");

    assert_eq!(record.id, "u-1");
    assert_eq!(record.role, "member");
    assert!(record.has_permission("boards:read"));
}

#[tokio::test]
async fn missing_session_is_not_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/session/current"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let session = client_for(&server).session().current().await.unwrap();
    assert!(session.is_none());
}

#[tokio::test]
async fn server_error_is_transient() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/session/current"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client_for(&server).session().current().await.unwrap_err();
    assert!(err.is_transient());
}

#[tokio::test]
async fn health_probe_reports_reachable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "ok"
        })))
        .mount(&server)
        .await;

    assert!(client_for(&server).health().is_reachable().await);
}

/// Wait for the cache's in-flight fetch to finish without triggering more.
async fn settle(cache: &SessionCache<IdentityClient>) -> SessionStatus {
    for _ in 0..200 {
        let status = cache.peek().await;
        if !status.is_loading {
            return status;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("fetch did not settle");
}

#[tokio::test]
async fn cache_syncs_role_change_over_http() {
    let server = MockServer::start().await;

    // First fetch sees a member; after the admin-side role change, the
    // endpoint reports admin.
    Mock::given(method("GET"))
        .and(path("/api/v1/session/current"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "u-1",
            "name": "Alex",
            "role": "member"
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/session/current"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "u-1",
            "name": "Alex",
            "role": "admin"
        })))
        .mount(&server)
        .await;

    let cache = SessionCache::new(CacheConfig::new(), client_for(&server));

    cache.read().await;
    let status = settle(&cache).await;
    assert_eq!(status.user.unwrap().role, "member");

    let status = cache.sync().await.unwrap();
    assert_eq!(status.user.as_ref().unwrap().role, "admin");

    let status = cache.read().await;
    assert_eq!(status.user.unwrap().role, "admin");
}
