//! Test Fixtures
//!
//! Small, fixed estates with known totals: five resources costing ₹2,050 a
//! month in all, one critical and one warning alert.

use crate::core::console::{ConsoleState, Snapshot};
use crate::core::models::{
    Alert, DirectoryRole, LogEntry, LogStatus, Provider, Resource, ResourceId, ResourceStatus,
    ResourceType, Severity, User, UserId,
};

// =============================================================================
// Resource Fixtures
// =============================================================================

/// Builder for a [`Resource`] with sensible defaults.
pub struct ResourceBuilder {
    resource: Resource,
}

impl ResourceBuilder {
    pub fn new(id: ResourceId, name: &str) -> Self {
        Self {
            resource: Resource {
                id,
                name: name.to_string(),
                provider: Provider::Aws,
                resource_type: ResourceType::Vm,
                region: "ap-south-1".to_string(),
                status: ResourceStatus::Running,
                cost_per_month: None,
                cpu: None,
                memory: None,
                storage: None,
                uptime: None,
                tags: Vec::new(),
            },
        }
    }

    pub fn provider(mut self, provider: Provider) -> Self {
        self.resource.provider = provider;
        self
    }

    pub fn kind(mut self, resource_type: ResourceType) -> Self {
        self.resource.resource_type = resource_type;
        self
    }

    pub fn region(mut self, region: &str) -> Self {
        self.resource.region = region.to_string();
        self
    }

    pub fn status(mut self, status: ResourceStatus) -> Self {
        self.resource.status = status;
        self
    }

    pub fn cost(mut self, cost: f64) -> Self {
        self.resource.cost_per_month = Some(cost);
        self
    }

    pub fn build(self) -> Resource {
        self.resource
    }
}

/// Five resources, ₹2,050/month in total. `azure-lb` has no cost.
pub fn sample_resources() -> Vec<Resource> {
    vec![
        ResourceBuilder::new(1, "web-01").cost(800.0).build(),
        ResourceBuilder::new(2, "bucket")
            .kind(ResourceType::Storage)
            .cost(50.0)
            .build(),
        ResourceBuilder::new(3, "orders-db")
            .kind(ResourceType::Database)
            .status(ResourceStatus::Stopped)
            .cost(300.0)
            .build(),
        ResourceBuilder::new(4, "gcp-vm")
            .provider(Provider::Gcp)
            .region("asia-south1")
            .cost(900.0)
            .build(),
        ResourceBuilder::new(5, "azure-lb")
            .provider(Provider::Azure)
            .kind(ResourceType::LoadBalancer)
            .region("centralindia")
            .status(ResourceStatus::Unknown)
            .build(),
    ]
}

// =============================================================================
// Alert / Directory / Log Fixtures
// =============================================================================

/// One critical and one warning alert.
pub fn sample_alerts() -> Vec<Alert> {
    vec![
        Alert {
            id: "a-1".to_string(),
            title: "High CPU on web-01".to_string(),
            severity: Severity::Critical,
            time: "2026-01-01T10:00:00".to_string(),
        },
        Alert {
            id: "a-2".to_string(),
            title: "azure-lb not supported in free tier".to_string(),
            severity: Severity::Warning,
            time: "2026-01-01T10:05:00".to_string(),
        },
    ]
}

pub fn sample_users() -> Vec<User> {
    vec![User {
        id: UserId::Number(1),
        name: "Cloud Admin".to_string(),
        email: "admin@example.com".to_string(),
        role: DirectoryRole::Admin,
        status: "Active".to_string(),
        avatar: "CA".to_string(),
        last_login: "2026-01-01T09:00:00".to_string(),
    }]
}

pub fn log_entry(id: i64, action: &str, resource: &str, status: LogStatus) -> LogEntry {
    LogEntry {
        id,
        timestamp: "2026-01-01T10:00:00".to_string(),
        user: "system".to_string(),
        action: action.to_string(),
        resource: resource.to_string(),
        status,
        provider: Provider::Aws,
    }
}

/// All four sample lists.
pub fn sample_snapshot() -> Snapshot {
    Snapshot {
        resources: sample_resources(),
        alerts: sample_alerts(),
        users: sample_users(),
        logs: vec![log_entry(1, "Create VM", "web-01", LogStatus::Success)],
    }
}

// =============================================================================
// Console Fixtures
// =============================================================================

/// Console signed in with the demo credentials `email` and `password` and loaded
/// with [`sample_snapshot`].
pub fn loaded_console(email: &str, password: &str) -> ConsoleState {
    let mut console = ConsoleState::new();
    let ticket = console
        .login(email, password)
        .expect("demo credentials accepted");
    console.apply_snapshot(ticket, Ok(sample_snapshot()));
    console
}
