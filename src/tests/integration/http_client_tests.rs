//! HTTP Client Integration Tests
//!
//! Exercises [`HttpCloudApi`] end to end against wiremock:
//! - request paths, methods and bodies
//! - decoding of the server's JSON shapes
//! - lenient vs strict handling of non-2xx replies
//! - the separate metrics base URL

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::core::api::{ApiError, CloudApi, HttpCloudApi};
use crate::core::models::{
    NewResource, Provider, ResourcePatch, ResourceStatus, ResourceType, Severity, UserId,
};

fn resource_json(id: i64, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "provider": "AWS",
        "type": "VM",
        "region": "ap-south-1",
        "status": "Running",
        "costPerMonth": 800.0,
        "cpu": "2 vCPU",
        "memory": "4 GB",
        "tags": ["web"]
    })
}

// =============================================================================
// Reads
// =============================================================================

#[tokio::test]
async fn test_list_resources() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/resources"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            resource_json(1, "web-01"),
            {"id": 2, "name": "odd", "provider": "OCI", "type": "Queue"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let api = HttpCloudApi::new(server.uri());
    let resources = api.list_resources().await.unwrap();
    assert_eq!(resources.len(), 2);
    assert_eq!(resources[0].cost_per_month, Some(800.0));
    assert_eq!(resources[1].provider, Provider::Other("OCI".into()));
    assert_eq!(resources[1].status, ResourceStatus::Unknown);
}

#[tokio::test]
async fn test_alerts_users_logs_decode() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/alerts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "a1", "title": "Disk full", "severity": "Critical", "time": "2026-01-01T10:00:00"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Cloud Admin", "email": "admin@example.com", "role": "Admin",
             "status": "Active", "avatar": "CA", "lastLogin": "2026-01-01T09:00:00"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/logs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 3, "timestamp": "2026-01-01T10:00:00", "user": "system",
             "action": "Create VM", "resource": "web-01", "status": "Success", "provider": "AWS"}
        ])))
        .mount(&server)
        .await;

    let api = HttpCloudApi::new(format!("{}/", server.uri()));
    let alerts = api.list_alerts().await.unwrap();
    assert_eq!(alerts[0].severity, Severity::Critical);

    let users = api.list_users().await.unwrap();
    assert_eq!(users[0].id, UserId::Number(1));
    assert_eq!(users[0].last_login, "2026-01-01T09:00:00");

    let logs = api.list_logs().await.unwrap();
    assert_eq!(logs[0].action, "Create VM");
}

// =============================================================================
// Mutations
// =============================================================================

#[tokio::test]
async fn test_create_posts_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/resources"))
        .and(body_json(json!({
            "name": "orders-db",
            "provider": "Azure",
            "type": "Database",
            "region": "ap-south-1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(resource_json(11, "orders-db")))
        .expect(1)
        .mount(&server)
        .await;

    let api = HttpCloudApi::new(server.uri());
    let body = NewResource::new("orders-db", Provider::Azure, ResourceType::Database, "ap-south-1");
    let created = api.create_resource(&body).await.unwrap();
    assert_eq!(created.id, 11);
}

#[tokio::test]
async fn test_update_sends_partial_patch() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/resources/4"))
        .and(body_json(json!({"status": "Stopped"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(resource_json(4, "gcp-vm")))
        .expect(1)
        .mount(&server)
        .await;

    let api = HttpCloudApi::new(server.uri());
    let updated = api
        .update_resource(4, &ResourcePatch::status(ResourceStatus::Stopped))
        .await
        .unwrap();
    assert_eq!(updated.id, 4);
}

#[tokio::test]
async fn test_delete_is_lenient_unless_strict() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/resources/9"))
        .respond_with(ResponseTemplate::new(404).set_body_string("missing"))
        .mount(&server)
        .await;

    let lenient = HttpCloudApi::new(server.uri());
    assert_eq!(lenient.delete_resource(9).await.unwrap().status, 404);

    let strict = HttpCloudApi::new(server.uri()).with_strict_status(true);
    let err = strict.delete_resource(9).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_error_status_with_undecodable_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/resources"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let api = HttpCloudApi::new(server.uri());
    match api.list_resources().await.unwrap_err() {
        ApiError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "Internal Server Error");
        }
        other => panic!("expected Status, got {other:?}"),
    }
}

#[tokio::test]
async fn test_lenient_mode_decodes_error_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/alerts"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!([])))
        .mount(&server)
        .await;

    let lenient = HttpCloudApi::new(server.uri());
    assert!(lenient.list_alerts().await.unwrap().is_empty());

    let strict = HttpCloudApi::new(server.uri()).with_strict_status(true);
    assert!(matches!(
        strict.list_alerts().await,
        Err(ApiError::Status { status: 503, .. })
    ));
}

// =============================================================================
// Metrics & health
// =============================================================================

#[tokio::test]
async fn test_metrics_use_their_own_base_url() {
    let resources = MockServer::start().await;
    let metrics = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/resources/1/metrics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"time": "10:00", "cpu": 12.5, "memory": 40.0, "networkIn": 3.0, "networkOut": 1.5}
        ])))
        .expect(1)
        .mount(&metrics)
        .await;

    let api = HttpCloudApi::new(resources.uri()).with_metrics_base_url(metrics.uri());
    let points = api.fetch_metrics(1).await.unwrap();
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].network_in, 3.0);
}

#[tokio::test]
async fn test_metrics_reject_non_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/resources/2/metrics"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Resource not found"})))
        .mount(&server)
        .await;

    let api = HttpCloudApi::new(server.uri());
    assert!(api.fetch_metrics(2).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_health_and_unreachable_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .mount(&server)
        .await;

    let api = HttpCloudApi::new(server.uri());
    assert!(api.health().await.unwrap().is_ok());
    assert_eq!(api.endpoint(), server.uri());

    let dead = HttpCloudApi::new("http://127.0.0.1:9");
    assert!(matches!(dead.health().await, Err(ApiError::Network(_))));
}
