//! In-memory resource server used by `--demo` and by tests.
//!
//! Behaves like the REST server: AWS creates are pinned to `ap-south-1`,
//! costs come from a fixed INR price table, every mutation appends a
//! `system` audit entry, and alerts are derived from non-Running/Stopped
//! statuses on each read.

use async_trait::async_trait;
use chrono::{Duration, SecondsFormat, Utc};
use tokio::sync::Mutex;

use super::{ApiError, CloudApi, Result};
use crate::core::models::{
    Alert, DeleteAck, DirectoryRole, Health, LogEntry, LogStatus, MetricPoint, NewResource,
    Provider, Resource, ResourceId, ResourcePatch, ResourceStatus, ResourceType, Severity, User,
    UserId,
};

/// Region every AWS resource is created in.
pub const AWS_REGION: &str = "ap-south-1";

const DEFAULT_AVATAR: &str = "https://picsum.photos/80/80";
const NOT_FOUND_BODY: &str = r#"{"detail":"Resource not found"}"#;

/// Monthly INR estimate for a provider/type pair.
pub fn estimate_inr_cost(provider: &Provider, resource_type: &ResourceType) -> f64 {
    match (provider, resource_type) {
        (Provider::Aws, ResourceType::Vm) => 800.0,
        (Provider::Aws, ResourceType::Storage) => 50.0,
        (Provider::Aws, ResourceType::Database) => 300.0,
        (Provider::Aws, ResourceType::Serverless) => 50.0,
        (Provider::Aws, ResourceType::LoadBalancer) => 200.0,
        (Provider::Gcp | Provider::Azure, _) => 900.0,
        _ => 0.0,
    }
}

/// Hourly synthetic samples, oldest first: 25 points covering the last day.
pub fn synthetic_metrics() -> Vec<MetricPoint> {
    let now = Utc::now();
    (0..=24u32)
        .rev()
        .map(|i| {
            let at = now - Duration::hours(i64::from(i));
            MetricPoint {
                time: at.to_rfc3339_opts(SecondsFormat::Secs, true),
                cpu: 20.0 + f64::from(i % 10) * 3.0,
                memory: 40.0 + f64::from(i % 7) * 4.0,
                network_in: f64::from(i % 5) * 10.0,
                network_out: f64::from(i % 6) * 8.0,
            }
        })
        .collect()
}

fn now_stamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn not_found() -> ApiError {
    ApiError::status(404, NOT_FOUND_BODY)
}

#[derive(Debug, Default)]
struct DemoState {
    resources: Vec<Resource>,
    logs: Vec<LogEntry>,
    users: Vec<User>,
    next_resource_id: ResourceId,
    next_log_id: i64,
}

impl DemoState {
    fn record(&mut self, action: &str, resource: &Resource) {
        self.next_log_id += 1;
        self.logs.push(LogEntry {
            id: self.next_log_id,
            timestamp: now_stamp(),
            user: "system".to_string(),
            action: action.to_string(),
            resource: resource.name.clone(),
            status: LogStatus::Success,
            provider: resource.provider.clone(),
        });
    }

    fn insert(&mut self, body: &NewResource) -> Resource {
        self.next_resource_id += 1;

        let region = if body.provider == Provider::Aws {
            AWS_REGION.to_string()
        } else {
            body.region.clone()
        };

        let status = match (&body.provider, &body.resource_type) {
            (Provider::Aws, ResourceType::LoadBalancer) => {
                ResourceStatus::Other("NotSupportedInFreeTier".to_string())
            }
            _ => ResourceStatus::Running,
        };

        let (cpu, memory, storage) = match (&body.provider, &body.resource_type) {
            (Provider::Aws, ResourceType::Vm) => {
                (Some("1 vCPU".to_string()), Some("1 GB".to_string()), None)
            }
            (Provider::Aws, ResourceType::Storage) => (None, None, Some("5 GB".to_string())),
            _ => (None, None, None),
        };

        let resource = Resource {
            id: self.next_resource_id,
            name: body.name.clone(),
            provider: body.provider.clone(),
            resource_type: body.resource_type.clone(),
            region,
            status,
            cost_per_month: Some(estimate_inr_cost(&body.provider, &body.resource_type)),
            cpu,
            memory,
            storage,
            uptime: Some(100.0),
            tags: Vec::new(),
        };
        self.resources.push(resource.clone());
        self.record("create", &resource);
        resource
    }
}

/// [`CloudApi`] backed by process memory.
#[derive(Debug, Default)]
pub struct DemoCloud {
    state: Mutex<DemoState>,
}

impl DemoCloud {
    /// No resources, no logs, no users.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A small multi-cloud estate with one stopped VM and one unsupported
    /// load balancer so every view has something to show.
    pub fn seeded() -> Self {
        let mut state = DemoState::default();
        let seeds = [
            ("web-server-01", Provider::Aws, ResourceType::Vm),
            ("assets-bucket", Provider::Aws, ResourceType::Storage),
            ("orders-table", Provider::Aws, ResourceType::Database),
            ("analytics-vm", Provider::Gcp, ResourceType::Vm),
            ("legacy-vm", Provider::Azure, ResourceType::Vm),
            ("edge-lb", Provider::Aws, ResourceType::LoadBalancer),
        ];
        for (name, provider, resource_type) in seeds {
            let region = match provider {
                Provider::Gcp => "asia-south1",
                Provider::Azure => "centralindia",
                _ => AWS_REGION,
            };
            state.insert(&NewResource::new(name, provider, resource_type, region));
        }
        if let Some(legacy) = state.resources.iter_mut().find(|r| r.name == "legacy-vm") {
            legacy.status = ResourceStatus::Stopped;
        }
        Self {
            state: Mutex::new(state),
        }
    }
}

#[async_trait]
impl CloudApi for DemoCloud {
    async fn list_resources(&self) -> Result<Vec<Resource>> {
        Ok(self.state.lock().await.resources.clone())
    }

    async fn create_resource(&self, body: &NewResource) -> Result<Resource> {
        let mut state = self.state.lock().await;
        let created = state.insert(body);
        tracing::debug!(id = created.id, name = %created.name, "demo create");
        Ok(created)
    }

    async fn update_resource(&self, id: ResourceId, patch: &ResourcePatch) -> Result<Resource> {
        let mut state = self.state.lock().await;
        let resource = state
            .resources
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(not_found)?;

        if let Some(name) = &patch.name {
            resource.name = name.clone();
        }
        if let Some(region) = &patch.region {
            resource.region = region.clone();
        }
        if let Some(status) = &patch.status {
            resource.status = status.clone();
        }
        if let Some(tags) = &patch.tags {
            resource.tags = tags.clone();
        }

        let updated = resource.clone();
        state.record("update", &updated);
        Ok(updated)
    }

    async fn delete_resource(&self, id: ResourceId) -> Result<DeleteAck> {
        let mut state = self.state.lock().await;
        let index = state
            .resources
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(not_found)?;
        let removed = state.resources.remove(index);
        state.record("delete", &removed);
        Ok(DeleteAck { status: 200 })
    }

    async fn list_alerts(&self) -> Result<Vec<Alert>> {
        let state = self.state.lock().await;
        let time = now_stamp();
        Ok(state
            .resources
            .iter()
            .filter(|r| !matches!(r.status, ResourceStatus::Running | ResourceStatus::Stopped))
            .map(|r| Alert {
                id: format!("alert-{}-status", r.id),
                title: format!("{} is in {} state", r.name, r.status),
                severity: Severity::Warning,
                time: time.clone(),
            })
            .collect())
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let mut state = self.state.lock().await;
        if state.users.is_empty() {
            state.users.push(User {
                id: UserId::Number(1),
                name: "Cloud Admin".to_string(),
                email: "admin@example.com".to_string(),
                role: DirectoryRole::Admin,
                status: "Active".to_string(),
                avatar: DEFAULT_AVATAR.to_string(),
                last_login: now_stamp(),
            });
        }
        Ok(state.users.clone())
    }

    async fn list_logs(&self) -> Result<Vec<LogEntry>> {
        let state = self.state.lock().await;
        // Newest first; ids are monotonic so they break timestamp ties.
        let mut logs = state.logs.clone();
        logs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        Ok(logs)
    }

    async fn fetch_metrics(&self, id: ResourceId) -> Result<Vec<MetricPoint>> {
        let state = self.state.lock().await;
        if !state.resources.iter().any(|r| r.id == id) {
            return Err(not_found());
        }
        Ok(synthetic_metrics())
    }

    async fn health(&self) -> Result<Health> {
        Ok(Health {
            status: "ok".to_string(),
        })
    }

    fn endpoint(&self) -> String {
        "in-memory demo".to_string()
    }
}
