//! Cloud resource API boundary.
//!
//! [`CloudApi`] is the seam between the console and whatever serves the
//! resource data: [`HttpCloudApi`] talks to the REST server, [`DemoCloud`]
//! keeps everything in memory for offline use.

pub mod demo;
pub mod http;

use async_trait::async_trait;

use super::models::{
    Alert, DeleteAck, Health, LogEntry, MetricPoint, NewResource, Resource, ResourceId,
    ResourcePatch, User,
};

pub use demo::DemoCloud;
pub use http::HttpCloudApi;

/// Result type alias using [`ApiError`].
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors raised by a [`CloudApi`] call.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Transport failure: refused connection, DNS, broken body.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("API error ({status}): {body}")]
    Status { status: u16, body: String },

    /// The body did not match the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ApiError {
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        ApiError::Status {
            status,
            body: body.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }
}

/// Operations exposed by the resource server.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CloudApi: Send + Sync {
    /// `GET /resources`
    async fn list_resources(&self) -> Result<Vec<Resource>>;

    /// `POST /resources`, returns the stored record.
    async fn create_resource(&self, body: &NewResource) -> Result<Resource>;

    /// `PUT /resources/{id}`, returns the updated record.
    async fn update_resource(&self, id: ResourceId, patch: &ResourcePatch) -> Result<Resource>;

    /// `DELETE /resources/{id}`
    async fn delete_resource(&self, id: ResourceId) -> Result<DeleteAck>;

    /// `GET /alerts`
    async fn list_alerts(&self) -> Result<Vec<Alert>>;

    /// `GET /users`
    async fn list_users(&self) -> Result<Vec<User>>;

    /// `GET /logs`
    async fn list_logs(&self) -> Result<Vec<LogEntry>>;

    /// `GET /resources/{id}/metrics`
    async fn fetch_metrics(&self, id: ResourceId) -> Result<Vec<MetricPoint>>;

    /// `GET /health`
    async fn health(&self) -> Result<Health>;

    /// Short description of where requests go, shown in settings.
    fn endpoint(&self) -> String;
}
