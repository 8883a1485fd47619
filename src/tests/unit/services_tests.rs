//! Background tasks report back over the app channel.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::core::api::{ApiError, MockCloudApi};
use crate::core::console::{ConsoleError, ConsoleState, Mutation, Tab};
use crate::core::models::Health;
use crate::core::session::{Permission, Role};
use crate::tui::events::AppEvent;
use crate::tui::services::Services;

fn services(api: MockCloudApi) -> (Services, mpsc::UnboundedReceiver<AppEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (
        Services::with_api(Arc::new(api), "ap-south-1".to_string(), tx),
        rx,
    )
}

#[tokio::test]
async fn test_health_result_is_forwarded() {
    let mut api = MockCloudApi::new();
    api.expect_health()
        .times(1)
        .returning(|| Ok(Health { status: "ok".into() }));
    let (services, mut rx) = services(api);

    services.spawn_health();
    match rx.recv().await {
        Some(AppEvent::HealthChecked(Ok(health))) => assert!(health.is_ok()),
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn test_endpoint_comes_from_backend() {
    let mut api = MockCloudApi::new();
    api.expect_endpoint()
        .returning(|| "http://resources.internal:8000".to_string());
    let (services, _rx) = services(api);
    assert_eq!(services.endpoint(), "http://resources.internal:8000");
}

#[tokio::test]
async fn test_denied_mutation_reports_without_calling_api() {
    let mut api = MockCloudApi::new();
    api.expect_delete_resource().never();
    api.expect_list_logs().never();
    let (services, mut rx) = services(api);

    let mut console = ConsoleState::new();
    let ticket = console.login("dev@example.com", "dev123").unwrap();
    services.spawn_mutation(ticket, Role::Developer, Mutation::Delete { id: 1 });

    match rx.recv().await {
        Some(AppEvent::MutationFinished {
            ticket: reported,
            permission,
            result,
        }) => {
            assert_eq!(reported, ticket);
            assert_eq!(permission, Permission::Delete);
            assert!(matches!(result, Err(ConsoleError::PermissionDenied { .. })));
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn test_metrics_ticket_travels_with_result() {
    let mut api = MockCloudApi::new();
    api.expect_fetch_metrics()
        .withf(|id| *id == 1)
        .times(1)
        .returning(|_| Err(ApiError::status(404, "no such resource")));
    let (services, mut rx) = services(api);

    let mut console = crate::tests::common::loaded_console("viewer@example.com", "viewer123");
    console.set_tab(Tab::Monitoring);
    let ticket = console.plan_metrics().expect("web-01 is monitorable");
    services.spawn_metrics(ticket);

    match rx.recv().await {
        Some(AppEvent::MetricsLoaded { ticket: t, result }) => {
            assert_eq!(t, ticket);
            assert!(result.unwrap_err().is_not_found());
        }
        other => panic!("unexpected event: {other:?}"),
    }
}
