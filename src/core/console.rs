//! Console state and the async operations that feed it.
//!
//! [`ConsoleState`] owns every cached list plus the session. Async work is
//! split in two halves: a `begin_*` call on the state hands out a ticket, the
//! free functions ([`load_snapshot`], [`execute`], [`load_metrics`]) do the
//! network round trips without touching state, and the matching `apply_*`
//! call folds the result back in, dropping it if the ticket went stale
//! (logout, newer batch load, tab change, newer metrics request).

use chrono::Utc;

use super::api::{self, ApiError, CloudApi};
use super::models::{
    Alert, LogEntry, MetricPoint, NewResource, Resource, ResourceId, ResourcePatch, ResourceType,
    User,
};
use super::session::{authenticate, can_perform, demo_accounts_hint, Permission, Role, Session};

/// Banner shown when the initial batch load fails.
pub const LOAD_FAILED_BANNER: &str =
    "Failed to load data from backend. Please check your API server.";

// ── Tabs ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Dashboard,
    Resources,
    Databases,
    Networks,
    Monitoring,
    Cost,
    Logs,
    Access,
    Settings,
}

impl Tab {
    pub const ALL: [Tab; 9] = [
        Tab::Dashboard,
        Tab::Resources,
        Tab::Databases,
        Tab::Networks,
        Tab::Monitoring,
        Tab::Cost,
        Tab::Logs,
        Tab::Access,
        Tab::Settings,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Resources => "All Resources",
            Tab::Databases => "Databases",
            Tab::Networks => "Networks",
            Tab::Monitoring => "Monitoring",
            Tab::Cost => "Cost & Billing",
            Tab::Logs => "Logs & Audit",
            Tab::Access => "Access Control",
            Tab::Settings => "Settings",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|&t| t == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Tab> {
        Self::ALL.get(index).copied()
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Resource table scope for the three list tabs.
    pub fn scope(self) -> Option<ResourceScope> {
        match self {
            Tab::Resources => Some(ResourceScope::All),
            Tab::Databases => Some(ResourceScope::Databases),
            Tab::Networks => Some(ResourceScope::Networks),
            _ => None,
        }
    }
}

/// Which slice of the resource list a table shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceScope {
    All,
    Databases,
    Networks,
}

impl ResourceScope {
    /// Type forced on create, if any.
    pub fn locked_type(self) -> Option<ResourceType> {
        match self {
            ResourceScope::All => None,
            ResourceScope::Databases => Some(ResourceType::Database),
            ResourceScope::Networks => Some(ResourceType::LoadBalancer),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ResourceScope::All => "All Resources",
            ResourceScope::Databases => "Databases",
            ResourceScope::Networks => "Networks",
        }
    }

    pub fn create_label(self) -> &'static str {
        match self {
            ResourceScope::All => "Create Resource",
            ResourceScope::Databases => "Create Database",
            ResourceScope::Networks => "Create Network",
        }
    }

    pub fn includes(self, resource: &Resource) -> bool {
        match self.locked_type() {
            None => true,
            Some(kind) => resource.resource_type == kind,
        }
    }
}

// ── Errors ──────────────────────────────────────────────────────────────

/// Result type alias using [`ConsoleError`].
pub type Result<T> = std::result::Result<T, ConsoleError>;

#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("{}", demo_accounts_hint())]
    InvalidCredentials,

    #[error("Already signed in; log out first")]
    AlreadyAuthenticated,

    #[error("Not signed in")]
    NotAuthenticated,

    #[error("{}", .permission.denial_notice())]
    PermissionDenied { role: Role, permission: Permission },

    #[error("Resource name is required.")]
    EmptyName,

    #[error(transparent)]
    Api(#[from] ApiError),
}

// ── Mutations ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Create(NewResource),
    Update { id: ResourceId, patch: ResourcePatch },
    Delete { id: ResourceId },
}

impl Mutation {
    pub fn permission(&self) -> Permission {
        match self {
            Mutation::Create(_) => Permission::Create,
            Mutation::Update { .. } => Permission::Update,
            Mutation::Delete { .. } => Permission::Delete,
        }
    }

    /// Create needs a non-blank name; a rename may not blank it either.
    pub fn validate(&self) -> Result<()> {
        let blank = match self {
            Mutation::Create(body) => body.name.trim().is_empty(),
            Mutation::Update { patch, .. } => {
                patch.name.as_deref().is_some_and(|n| n.trim().is_empty())
            }
            Mutation::Delete { .. } => false,
        };
        if blank {
            Err(ConsoleError::EmptyName)
        } else {
            Ok(())
        }
    }
}

/// Local patch to apply once the server confirmed a mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceChange {
    Created(Resource),
    Updated(Resource),
    Deleted(ResourceId),
}

/// Outcome of the log re-fetch that follows every successful mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum LogRefresh {
    Reloaded(Vec<LogEntry>),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MutationOutcome {
    pub change: ResourceChange,
    pub logs: LogRefresh,
}

// ── Tickets ─────────────────────────────────────────────────────────────

/// Issued for a batch load or a mutation; valid for one login session.
/// A batch load ticket is also superseded by any later load or applied
/// mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTicket {
    epoch: u64,
    snapshot: u64,
}

/// Issued for a metrics request; valid until the next metrics request,
/// tab change or logout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsTicket {
    epoch: u64,
    generation: u64,
    pub resource_id: ResourceId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotApplied {
    Loaded,
    Failed,
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationApplied {
    /// Patch applied; carries a warning when the log re-fetch failed.
    Applied { log_warning: Option<String> },
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricsApplied {
    Loaded,
    Failed,
    Stale,
}

/// The four lists fetched together after login.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub resources: Vec<Resource>,
    pub alerts: Vec<Alert>,
    pub users: Vec<User>,
    pub logs: Vec<LogEntry>,
}

// ── State ───────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct ConsoleState {
    session: Session,
    tab: Tab,
    resources: Vec<Resource>,
    alerts: Vec<Alert>,
    users: Vec<User>,
    logs: Vec<LogEntry>,
    metrics: Vec<MetricPoint>,
    monitored: Option<ResourceId>,
    loading: bool,
    error: Option<String>,
    epoch: u64,
    snapshot_generation: u64,
    /// A mutation landed while a batch load was in flight.
    reload_due: bool,
    metrics_generation: u64,
}

impl ConsoleState {
    pub fn new() -> Self {
        Self::default()
    }

    // -- session --

    /// Sign in with one of the demo accounts and start the batch load.
    pub fn login(&mut self, email: &str, password: &str) -> Result<SessionTicket> {
        if self.session.is_authenticated() {
            return Err(ConsoleError::AlreadyAuthenticated);
        }
        let role = authenticate(email, password).ok_or(ConsoleError::InvalidCredentials)?;
        self.session = Session::Authenticated {
            role,
            since: Utc::now(),
        };
        self.tab = Tab::Dashboard;
        tracing::info!(role = %role, "signed in");
        self.begin_snapshot()
    }

    /// Drop the session and every cached list. Outstanding tickets go stale.
    pub fn logout(&mut self) {
        self.epoch += 1;
        self.metrics_generation += 1;
        self.session = Session::Unauthenticated;
        self.tab = Tab::Dashboard;
        self.resources.clear();
        self.alerts.clear();
        self.users.clear();
        self.logs.clear();
        self.metrics.clear();
        self.monitored = None;
        self.loading = false;
        self.reload_due = false;
        self.error = None;
        tracing::info!("signed out");
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn role(&self) -> Option<Role> {
        self.session.role()
    }

    /// Whether the acting role may perform `permission`. False when signed out.
    pub fn can(&self, permission: Permission) -> bool {
        self.role().is_some_and(|role| can_perform(role, permission))
    }

    /// Acting role if it may perform `permission`.
    pub fn authorize(&self, permission: Permission) -> Result<Role> {
        let role = self.role().ok_or(ConsoleError::NotAuthenticated)?;
        if can_perform(role, permission) {
            Ok(role)
        } else {
            Err(ConsoleError::PermissionDenied { role, permission })
        }
    }

    // -- batch load --

    pub fn begin_snapshot(&mut self) -> Result<SessionTicket> {
        if !self.session.is_authenticated() {
            return Err(ConsoleError::NotAuthenticated);
        }
        self.snapshot_generation += 1;
        self.reload_due = false;
        self.loading = true;
        self.error = None;
        Ok(self.ticket())
    }

    fn ticket(&self) -> SessionTicket {
        SessionTicket {
            epoch: self.epoch,
            snapshot: self.snapshot_generation,
        }
    }

    /// Fresh load ticket if an applied mutation superseded the load that was
    /// in flight.
    pub fn take_reload(&mut self) -> Option<SessionTicket> {
        if !self.reload_due {
            return None;
        }
        self.begin_snapshot().ok()
    }

    /// All four lists are replaced together, or none on failure.
    pub fn apply_snapshot(
        &mut self,
        ticket: SessionTicket,
        result: api::Result<Snapshot>,
    ) -> SnapshotApplied {
        if !self.is_current(ticket) || ticket.snapshot != self.snapshot_generation {
            tracing::debug!("discarding superseded batch load");
            return SnapshotApplied::Stale;
        }
        self.loading = false;
        match result {
            Ok(snapshot) => {
                self.resources = snapshot.resources;
                self.alerts = snapshot.alerts;
                self.users = snapshot.users;
                self.logs = snapshot.logs;
                self.error = None;
                SnapshotApplied::Loaded
            }
            Err(err) => {
                tracing::error!(error = %err, "batch load failed");
                self.error = Some(LOAD_FAILED_BANNER.to_string());
                SnapshotApplied::Failed
            }
        }
    }

    // -- mutations --

    /// Gate and validate a mutation before any network call is made.
    pub fn begin_mutation(&self, mutation: &Mutation) -> Result<(Role, SessionTicket)> {
        let role = self.authorize(mutation.permission())?;
        mutation.validate()?;
        Ok((role, self.ticket()))
    }

    /// Whether `ticket` still belongs to the current login session.
    pub fn is_current(&self, ticket: SessionTicket) -> bool {
        ticket.epoch == self.epoch && self.session.is_authenticated()
    }

    pub fn apply_mutation(
        &mut self,
        ticket: SessionTicket,
        outcome: MutationOutcome,
    ) -> MutationApplied {
        if !self.is_current(ticket) {
            return MutationApplied::Stale;
        }

        // A load started before the server confirmed this change would undo it.
        self.snapshot_generation += 1;
        if self.loading {
            self.loading = false;
            self.reload_due = true;
        }

        match outcome.change {
            ResourceChange::Created(resource) => self.resources.push(resource),
            ResourceChange::Updated(resource) => {
                if let Some(slot) = self.resources.iter_mut().find(|r| r.id == resource.id) {
                    *slot = resource;
                }
            }
            ResourceChange::Deleted(id) => self.resources.retain(|r| r.id != id),
        }

        let log_warning = match outcome.logs {
            LogRefresh::Reloaded(logs) => {
                self.logs = logs;
                None
            }
            LogRefresh::Failed(reason) => Some(format!("Audit log refresh failed: {reason}")),
        };
        MutationApplied::Applied { log_warning }
    }

    // -- tabs & metrics --

    pub fn tab(&self) -> Tab {
        self.tab
    }

    /// Switch tab. Leaving Monitoring invalidates any outstanding metrics request.
    pub fn set_tab(&mut self, tab: Tab) {
        if self.tab == Tab::Monitoring && tab != Tab::Monitoring {
            self.metrics_generation += 1;
        }
        self.tab = tab;
    }

    /// VMs on a known provider, in list order.
    pub fn monitorable(&self) -> Vec<&Resource> {
        self.resources.iter().filter(|r| r.is_monitorable()).collect()
    }

    pub fn monitored_resource(&self) -> Option<&Resource> {
        let id = self.monitored?;
        self.resources.iter().find(|r| r.id == id)
    }

    /// Decide whether a metrics request is due. Keeps the current monitored
    /// VM if it still exists, otherwise falls back to the first monitorable
    /// one; with none, metrics are cleared and nothing is requested.
    pub fn plan_metrics(&mut self) -> Option<MetricsTicket> {
        if !self.session.is_authenticated() || self.tab != Tab::Monitoring {
            return None;
        }

        self.metrics_generation += 1;
        let still_monitorable = self
            .monitored_resource()
            .is_some_and(|r| r.is_monitorable());
        if !still_monitorable {
            let fallback = self.monitorable().first().map(|r| r.id);
            if fallback != self.monitored {
                self.metrics.clear();
            }
            self.monitored = fallback;
        }

        match self.monitored {
            Some(resource_id) => Some(MetricsTicket {
                epoch: self.epoch,
                generation: self.metrics_generation,
                resource_id,
            }),
            None => {
                self.metrics.clear();
                None
            }
        }
    }

    /// Move to the next (or previous) monitorable VM and plan a fetch for it.
    pub fn cycle_monitored(&mut self, forward: bool) -> Option<MetricsTicket> {
        let ids: Vec<ResourceId> = self.monitorable().iter().map(|r| r.id).collect();
        if ids.len() < 2 {
            return None;
        }
        let current = self
            .monitored
            .and_then(|id| ids.iter().position(|&i| i == id))
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % ids.len()
        } else {
            (current + ids.len() - 1) % ids.len()
        };
        self.monitored = Some(ids[next]);
        self.metrics.clear();
        self.plan_metrics()
    }

    pub fn apply_metrics(
        &mut self,
        ticket: MetricsTicket,
        result: api::Result<Vec<MetricPoint>>,
    ) -> MetricsApplied {
        let current = ticket.epoch == self.epoch
            && ticket.generation == self.metrics_generation
            && self.tab == Tab::Monitoring
            && self.monitored == Some(ticket.resource_id);
        if !current {
            tracing::debug!(resource_id = ticket.resource_id, "discarding stale metrics");
            return MetricsApplied::Stale;
        }
        match result {
            Ok(points) => {
                self.metrics = points;
                MetricsApplied::Loaded
            }
            Err(err) => {
                tracing::error!(resource_id = ticket.resource_id, error = %err, "metrics fetch failed");
                MetricsApplied::Failed
            }
        }
    }

    // -- accessors --

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn scoped(&self, scope: ResourceScope) -> Vec<&Resource> {
        self.resources.iter().filter(|r| scope.includes(r)).collect()
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn logs(&self) -> &[LogEntry] {
        &self.logs
    }

    pub fn metrics(&self) -> &[MetricPoint] {
        &self.metrics
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

// ── Async operations ────────────────────────────────────────────────────

/// Fetch resources, alerts, users and logs concurrently. Fails as a whole if
/// any one of them fails.
pub async fn load_snapshot(api: &dyn CloudApi) -> api::Result<Snapshot> {
    let (resources, alerts, users, logs) = tokio::try_join!(
        api.list_resources(),
        api.list_alerts(),
        api.list_users(),
        api.list_logs(),
    )?;
    Ok(Snapshot {
        resources,
        alerts,
        users,
        logs,
    })
}

/// Gate, perform the mutation, then re-fetch the full audit log.
///
/// A denied or invalid mutation never reaches `api`.
pub async fn execute(
    api: &dyn CloudApi,
    role: Role,
    mutation: Mutation,
) -> Result<MutationOutcome> {
    let permission = mutation.permission();
    if !can_perform(role, permission) {
        return Err(ConsoleError::PermissionDenied { role, permission });
    }
    mutation.validate()?;

    let change = match mutation {
        Mutation::Create(body) => ResourceChange::Created(api.create_resource(&body).await?),
        Mutation::Update { id, patch } => {
            ResourceChange::Updated(api.update_resource(id, &patch).await?)
        }
        Mutation::Delete { id } => {
            api.delete_resource(id).await?;
            ResourceChange::Deleted(id)
        }
    };

    let logs = match api.list_logs().await {
        Ok(logs) => LogRefresh::Reloaded(logs),
        Err(err) => {
            tracing::warn!(error = %err, "log refresh after mutation failed");
            LogRefresh::Failed(err.to_string())
        }
    };

    Ok(MutationOutcome { change, logs })
}

pub async fn load_metrics(api: &dyn CloudApi, id: ResourceId) -> api::Result<Vec<MetricPoint>> {
    api.fetch_metrics(id).await
}
