//! Batch load after login: four lists, all or nothing.

use crate::core::api::{ApiError, MockCloudApi};
use crate::core::console::{load_snapshot, ConsoleState, SnapshotApplied};
use crate::tests::common::fixtures::{sample_alerts, sample_resources, sample_users};

fn healthy_api() -> MockCloudApi {
    let mut api = MockCloudApi::new();
    api.expect_list_resources()
        .times(1)
        .returning(|| Ok(sample_resources()));
    api.expect_list_alerts()
        .times(1)
        .returning(|| Ok(sample_alerts()));
    api.expect_list_users()
        .times(1)
        .returning(|| Ok(sample_users()));
    api.expect_list_logs().times(1).returning(|| Ok(vec![]));
    api
}

#[tokio::test]
async fn test_snapshot_collects_all_four_lists() {
    let api = healthy_api();
    let snapshot = load_snapshot(&api).await.unwrap();
    assert_eq!(snapshot.resources.len(), 5);
    assert_eq!(snapshot.alerts.len(), 2);
    assert_eq!(snapshot.users.len(), 1);
    assert!(snapshot.logs.is_empty());
}

#[tokio::test]
async fn test_one_failing_list_fails_the_batch() {
    let mut api = MockCloudApi::new();
    api.expect_list_resources()
        .returning(|| Ok(sample_resources()));
    api.expect_list_alerts()
        .returning(|| Err(ApiError::status(502, "bad gateway")));
    api.expect_list_users().returning(|| Ok(sample_users()));
    api.expect_list_logs().returning(|| Ok(vec![]));

    let result = load_snapshot(&api).await;
    assert!(result.is_err());

    // Nothing is assigned and the banner is raised.
    let mut console = ConsoleState::new();
    let ticket = console.login("admin@example.com", "admin123").unwrap();
    assert_eq!(console.apply_snapshot(ticket, result), SnapshotApplied::Failed);
    assert!(console.resources().is_empty());
    assert!(console.error().is_some());
    assert!(!console.is_loading());
}

#[tokio::test]
async fn test_snapshot_for_old_session_is_ignored() {
    let api = healthy_api();
    let mut console = ConsoleState::new();
    let old = console.login("admin@example.com", "admin123").unwrap();
    console.logout();
    let _ = console.login("viewer@example.com", "viewer123").unwrap();

    let result = load_snapshot(&api).await;
    assert_eq!(console.apply_snapshot(old, result), SnapshotApplied::Stale);
    assert!(console.resources().is_empty());
    assert!(console.is_loading());
}
