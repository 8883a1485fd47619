use std::sync::Arc;

use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::core::api::{CloudApi, DemoCloud, HttpCloudApi};
use crate::core::console::{self, MetricsTicket, Mutation, SessionTicket};
use crate::core::session::Role;

use super::events::AppEvent;

/// Centralized handle to the resource backend.
///
/// Created once at startup and shared by the app loop. Every network round
/// trip runs on a spawned task and reports back through `event_tx`.
pub struct Services {
    pub api: Arc<dyn CloudApi>,
    pub event_tx: mpsc::UnboundedSender<AppEvent>,
    /// Region sent with create requests.
    pub default_region: String,
}

impl Services {
    /// Pick the HTTP client or the in-memory demo backend.
    pub fn init(
        config: &AppConfig,
        demo: bool,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        let api: Arc<dyn CloudApi> = if demo {
            log::info!("Using in-memory demo backend");
            Arc::new(DemoCloud::seeded())
        } else {
            log::info!("Using resource API at {}", config.api.base_url);
            Arc::new(HttpCloudApi::from_config(&config.api))
        };
        Self::with_api(api, config.api.default_region.clone(), event_tx)
    }

    pub fn with_api(
        api: Arc<dyn CloudApi>,
        default_region: String,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            api,
            event_tx,
            default_region,
        }
    }

    pub fn endpoint(&self) -> String {
        self.api.endpoint()
    }

    pub fn spawn_snapshot(&self, ticket: SessionTicket) {
        let api = Arc::clone(&self.api);
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = console::load_snapshot(api.as_ref()).await;
            let _ = tx.send(AppEvent::SnapshotLoaded { ticket, result });
        });
    }

    pub fn spawn_mutation(&self, ticket: SessionTicket, role: Role, mutation: Mutation) {
        let api = Arc::clone(&self.api);
        let tx = self.event_tx.clone();
        let permission = mutation.permission();
        tokio::spawn(async move {
            let result = console::execute(api.as_ref(), role, mutation).await;
            let _ = tx.send(AppEvent::MutationFinished {
                ticket,
                permission,
                result,
            });
        });
    }

    pub fn spawn_metrics(&self, ticket: MetricsTicket) {
        let api = Arc::clone(&self.api);
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = console::load_metrics(api.as_ref(), ticket.resource_id).await;
            let _ = tx.send(AppEvent::MetricsLoaded { ticket, result });
        });
    }

    pub fn spawn_health(&self) {
        let api = Arc::clone(&self.api);
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = api.health().await;
            let _ = tx.send(AppEvent::HealthChecked(result));
        });
    }
}
