use crate::core::api;
use crate::core::console::{self, MetricsTicket, MutationOutcome, SessionTicket, Snapshot, Tab};
use crate::core::models::{Health, MetricPoint};
use crate::core::session::Permission;

/// Events flowing through the Elm-architecture event loop.
#[derive(Debug)]
pub enum AppEvent {
    /// Periodic tick for notification TTLs and the loading spinner.
    Tick,
    /// Raw terminal input (keyboard/mouse).
    Input(crossterm::event::Event),
    /// Batch load of resources, alerts, users and logs finished.
    SnapshotLoaded {
        ticket: SessionTicket,
        result: api::Result<Snapshot>,
    },
    /// A create / update / delete round trip (plus log refresh) finished.
    MutationFinished {
        ticket: SessionTicket,
        permission: Permission,
        result: console::Result<MutationOutcome>,
    },
    /// Metrics for the monitored VM arrived.
    MetricsLoaded {
        ticket: MetricsTicket,
        result: api::Result<Vec<MetricPoint>>,
    },
    /// `GET /health` finished.
    HealthChecked(api::Result<Health>),
    /// A resolved action to execute.
    Action(Action),
    /// Notification to display to the user.
    Notification(Notification),
    /// Request to quit the application.
    Quit,
}

/// High-level actions dispatched by the input mapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Navigation
    SelectTab(Tab),
    TabNext,
    TabPrev,
    ToggleSidebar,

    // Modals
    ShowHelp,
    CloseHelp,

    // Session
    Reload,
    Logout,

    // Application
    Quit,
}

/// Whether the sidebar or main content has input focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AreaFocus {
    Sidebar,
    #[default]
    Main,
}

/// Sidebar sections. Listed in `Tab::ALL` order so the sidebar index and
/// the tab index agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarGroup {
    Overview,
    Infrastructure,
    Operations,
    Account,
}

impl SidebarGroup {
    pub const ALL: [SidebarGroup; 4] = [
        SidebarGroup::Overview,
        SidebarGroup::Infrastructure,
        SidebarGroup::Operations,
        SidebarGroup::Account,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SidebarGroup::Overview => "OVERVIEW",
            SidebarGroup::Infrastructure => "INFRASTRUCTURE",
            SidebarGroup::Operations => "OPERATIONS",
            SidebarGroup::Account => "ACCOUNT",
        }
    }

    pub fn tabs(self) -> &'static [Tab] {
        match self {
            SidebarGroup::Overview => &[Tab::Dashboard],
            SidebarGroup::Infrastructure => &[
                Tab::Resources,
                Tab::Databases,
                Tab::Networks,
                Tab::Monitoring,
            ],
            SidebarGroup::Operations => &[Tab::Cost, Tab::Logs],
            SidebarGroup::Account => &[Tab::Access, Tab::Settings],
        }
    }
}

/// One-character glyph for a tab in the collapsed sidebar.
pub fn tab_icon(tab: Tab) -> &'static str {
    match tab {
        Tab::Dashboard => "◆",
        Tab::Resources => "▤",
        Tab::Databases => "⛁",
        Tab::Networks => "⇄",
        Tab::Monitoring => "∿",
        Tab::Cost => "₹",
        Tab::Logs => "≡",
        Tab::Access => "☺",
        Tab::Settings => "⚙",
    }
}

/// Notification level for the overlay system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A timed notification shown in the overlay.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub level: NotificationLevel,
    /// Ticks remaining before auto-dismiss.
    pub ttl_ticks: u32,
}
