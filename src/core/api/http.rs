use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use super::{ApiError, CloudApi, Result};
use crate::config::ApiConfig;
use crate::core::models::{
    Alert, DeleteAck, Health, LogEntry, MetricPoint, NewResource, Resource, ResourceId,
    ResourcePatch, User,
};

/// REST client for the resource server.
///
/// Only the metrics endpoint rejects non-2xx replies unconditionally. The
/// other endpoints decode whatever body comes back unless `strict_status` is
/// set; a non-2xx body that does not decode still surfaces as
/// [`ApiError::Status`].
#[derive(Debug, Clone)]
pub struct HttpCloudApi {
    client: Client,
    base_url: String,
    metrics_base_url: String,
    strict_status: bool,
}

impl HttpCloudApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = trim_base(base_url.into());
        Self {
            client: Client::new(),
            metrics_base_url: base_url.clone(),
            base_url,
            strict_status: false,
        }
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        let mut api = Self::new(config.base_url.clone());
        if let Some(metrics) = &config.metrics_base_url {
            api.metrics_base_url = trim_base(metrics.clone());
        }
        api.strict_status = config.strict_status;
        api
    }

    pub fn with_strict_status(mut self, strict: bool) -> Self {
        self.strict_status = strict;
        self
    }

    pub fn with_metrics_base_url(mut self, url: impl Into<String>) -> Self {
        self.metrics_base_url = trim_base(url.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(&self, what: &str, response: Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return Ok(serde_json::from_str(&body)?);
        }

        if self.strict_status {
            return Err(ApiError::status(status.as_u16(), body));
        }

        tracing::warn!(
            endpoint = what,
            status = status.as_u16(),
            "non-success status, decoding body anyway"
        );
        serde_json::from_str(&body).map_err(|_| ApiError::status(status.as_u16(), body))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        tracing::debug!(path, "GET");
        let response = self.client.get(self.url(path)).send().await?;
        self.decode(path, response).await
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

#[async_trait]
impl CloudApi for HttpCloudApi {
    async fn list_resources(&self) -> Result<Vec<Resource>> {
        self.get("/resources").await
    }

    async fn create_resource(&self, body: &NewResource) -> Result<Resource> {
        tracing::debug!(name = %body.name, provider = %body.provider, "POST /resources");
        let response = self
            .client
            .post(self.url("/resources"))
            .json(body)
            .send()
            .await?;
        self.decode("/resources", response).await
    }

    async fn update_resource(&self, id: ResourceId, patch: &ResourcePatch) -> Result<Resource> {
        let path = format!("/resources/{id}");
        tracing::debug!(%path, "PUT");
        let response = self.client.put(self.url(&path)).json(patch).send().await?;
        self.decode(&path, response).await
    }

    async fn delete_resource(&self, id: ResourceId) -> Result<DeleteAck> {
        let path = format!("/resources/{id}");
        tracing::debug!(%path, "DELETE");
        let response = self.client.delete(self.url(&path)).send().await?;
        let status = response.status();

        if !status.is_success() {
            if self.strict_status {
                let body = response.text().await.unwrap_or_default();
                return Err(ApiError::status(status.as_u16(), body));
            }
            tracing::warn!(%path, status = status.as_u16(), "delete returned non-success status");
        }

        Ok(DeleteAck {
            status: status.as_u16(),
        })
    }

    async fn list_alerts(&self) -> Result<Vec<Alert>> {
        self.get("/alerts").await
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        self.get("/users").await
    }

    async fn list_logs(&self) -> Result<Vec<LogEntry>> {
        self.get("/logs").await
    }

    async fn fetch_metrics(&self, id: ResourceId) -> Result<Vec<MetricPoint>> {
        let url = format!("{}/resources/{id}/metrics", self.metrics_base_url);
        tracing::debug!(%url, "GET metrics");
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::status(status.as_u16(), body));
        }
        Ok(response.json().await?)
    }

    async fn health(&self) -> Result<Health> {
        self.get("/health").await
    }

    fn endpoint(&self) -> String {
        self.base_url.clone()
    }
}
