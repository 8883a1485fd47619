//! Mutation gating and execution.
//!
//! A denied or invalid mutation must never reach the API; an allowed one
//! performs exactly one call followed by one audit log re-fetch.

use rstest::rstest;

use crate::core::api::{ApiError, MockCloudApi};
use crate::core::console::{execute, ConsoleError, LogRefresh, Mutation, ResourceChange};
use crate::core::models::{
    DeleteAck, LogStatus, NewResource, Provider, ResourcePatch, ResourceStatus, ResourceType,
};
use crate::core::session::{Permission, Role};
use crate::tests::common::fixtures::{log_entry, ResourceBuilder};

fn create(name: &str) -> Mutation {
    Mutation::Create(NewResource::new(
        name,
        Provider::Aws,
        ResourceType::Vm,
        "ap-south-1",
    ))
}

/// A mock that fails the test on any call at all.
fn untouchable() -> MockCloudApi {
    let mut api = MockCloudApi::new();
    api.expect_create_resource().never();
    api.expect_update_resource().never();
    api.expect_delete_resource().never();
    api.expect_list_logs().never();
    api
}

// =============================================================================
// Denied / invalid mutations
// =============================================================================

#[rstest]
#[case::viewer_create(Role::Viewer, create("web"), Permission::Create)]
#[case::viewer_update(
    Role::Viewer,
    Mutation::Update { id: 1, patch: ResourcePatch::rename("x") },
    Permission::Update
)]
#[case::viewer_delete(Role::Viewer, Mutation::Delete { id: 1 }, Permission::Delete)]
#[case::developer_delete(Role::Developer, Mutation::Delete { id: 1 }, Permission::Delete)]
#[tokio::test]
async fn test_denied_mutation_never_reaches_api(
    #[case] role: Role,
    #[case] mutation: Mutation,
    #[case] expected: Permission,
) {
    let api = untouchable();
    let err = execute(&api, role, mutation).await.unwrap_err();
    match err {
        ConsoleError::PermissionDenied { role: r, permission } => {
            assert_eq!(r, role);
            assert_eq!(permission, expected);
        }
        other => panic!("expected PermissionDenied, got {other:?}"),
    }
}

#[rstest]
#[case::empty("")]
#[case::spaces("   ")]
#[tokio::test]
async fn test_blank_name_is_rejected_locally(#[case] name: &str) {
    let api = untouchable();
    let err = execute(&api, Role::Admin, create(name)).await.unwrap_err();
    assert!(matches!(err, ConsoleError::EmptyName));
    assert_eq!(err.to_string(), "Resource name is required.");
}

#[tokio::test]
async fn test_blank_rename_is_rejected_locally() {
    let api = untouchable();
    let mutation = Mutation::Update {
        id: 3,
        patch: ResourcePatch::rename("  "),
    };
    let err = execute(&api, Role::Developer, mutation).await.unwrap_err();
    assert!(matches!(err, ConsoleError::EmptyName));
}

// =============================================================================
// Allowed mutations
// =============================================================================

#[tokio::test]
async fn test_create_then_refetches_logs() {
    let mut api = MockCloudApi::new();
    api.expect_create_resource()
        .withf(|body: &NewResource| body.name == "web-02" && body.region == "ap-south-1")
        .times(1)
        .returning(|body| {
            Ok(ResourceBuilder::new(7, &body.name)
                .provider(body.provider.clone())
                .cost(800.0)
                .build())
        });
    api.expect_list_logs()
        .times(1)
        .returning(|| Ok(vec![log_entry(1, "Create VM", "web-02", LogStatus::Success)]));

    let outcome = execute(&api, Role::Developer, create("  web-02  ")).await.unwrap();

    match outcome.change {
        ResourceChange::Created(resource) => {
            assert_eq!(resource.id, 7);
            assert_eq!(resource.name, "web-02");
        }
        other => panic!("expected Created, got {other:?}"),
    }
    assert!(matches!(outcome.logs, LogRefresh::Reloaded(ref logs) if logs.len() == 1));
}

#[tokio::test]
async fn test_status_toggle_sends_only_status() {
    let mut api = MockCloudApi::new();
    api.expect_update_resource()
        .withf(|id, patch: &ResourcePatch| {
            *id == 4
                && patch.status == Some(ResourceStatus::Stopped)
                && patch.name.is_none()
        })
        .times(1)
        .returning(|id, _| {
            Ok(ResourceBuilder::new(id, "gcp-vm")
                .status(ResourceStatus::Stopped)
                .build())
        });
    api.expect_list_logs().times(1).returning(|| Ok(vec![]));

    let mutation = Mutation::Update {
        id: 4,
        patch: ResourcePatch::status(ResourceStatus::Stopped),
    };
    let outcome = execute(&api, Role::Developer, mutation).await.unwrap();
    assert!(matches!(
        outcome.change,
        ResourceChange::Updated(ref r) if r.status == ResourceStatus::Stopped
    ));
}

#[tokio::test]
async fn test_admin_delete() {
    let mut api = MockCloudApi::new();
    api.expect_delete_resource()
        .withf(|id| *id == 3)
        .times(1)
        .returning(|_| Ok(DeleteAck { status: 200 }));
    api.expect_list_logs().times(1).returning(|| Ok(vec![]));

    let outcome = execute(&api, Role::Admin, Mutation::Delete { id: 3 }).await.unwrap();
    assert_eq!(outcome.change, ResourceChange::Deleted(3));
}

#[tokio::test]
async fn test_log_refresh_failure_keeps_the_change() {
    let mut api = MockCloudApi::new();
    api.expect_delete_resource()
        .times(1)
        .returning(|_| Ok(DeleteAck { status: 200 }));
    api.expect_list_logs()
        .times(1)
        .returning(|| Err(ApiError::status(500, "boom")));

    let outcome = execute(&api, Role::Admin, Mutation::Delete { id: 9 }).await.unwrap();
    assert_eq!(outcome.change, ResourceChange::Deleted(9));
    assert!(matches!(outcome.logs, LogRefresh::Failed(_)));
}

#[tokio::test]
async fn test_server_failure_skips_log_refresh() {
    let mut api = MockCloudApi::new();
    api.expect_create_resource()
        .times(1)
        .returning(|_| Err(ApiError::status(500, "internal")));
    api.expect_list_logs().never();

    let err = execute(&api, Role::Admin, create("web")).await.unwrap_err();
    assert!(matches!(err, ConsoleError::Api(ApiError::Status { status: 500, .. })));
}
