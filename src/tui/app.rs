use std::io;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use super::events::{Action, AppEvent, AreaFocus, Notification, NotificationLevel};
use super::layout::AppLayout;
use super::services::Services;
use super::sidebar::SidebarState;
use super::theme;
use super::views::access::AccessViewState;
use super::views::login::{LoginResult, LoginState};
use super::views::logs::LogViewState;
use super::views::modal::{ConfirmResult, ConfirmState, NoticeState};
use super::views::monitoring::{self, MonitoringCommand};
use super::views::resource_form::{FormResult, ResourceFormState};
use super::views::resources::{ResourceCommand, ResourceListState};
use super::views::settings::{SettingsInput, SettingsState};
use super::views::{cost, dashboard};
use crate::core::console::{
    ConsoleError, ConsoleState, MetricsApplied, Mutation, MutationApplied, MutationOutcome,
    ResourceChange, ResourceScope, SessionTicket, SnapshotApplied, Tab,
};
use crate::core::models::ResourcePatch;
use crate::core::rollup;
use crate::core::session::{ActingIdentity, Permission};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const MAX_NOTIFICATIONS: usize = 3;
const NOTIFICATION_TTL_TICKS: u32 = 100;

/// Central application state (Elm architecture).
pub struct AppState {
    /// Whether the app is still running.
    pub running: bool,
    /// Session, cached lists, active tab.
    pub console: ConsoleState,
    /// Whether sidebar or main content has input focus.
    pub area_focus: AreaFocus,
    /// Sidebar navigation state.
    pub sidebar: SidebarState,
    pub login: LoginState,
    /// Selection in the three resource tables.
    pub resources: ResourceListState,
    pub logs: LogViewState,
    pub access: AccessViewState,
    pub settings: SettingsState,
    /// Create / rename modal (Some when open).
    pub form: Option<ResourceFormState>,
    /// Delete confirmation (Some when open).
    pub confirm: Option<ConfirmState>,
    /// Blocking notice (Some when open). Sits above every other modal.
    pub notice: Option<NoticeState>,
    /// Active notifications (max 3 visible).
    pub notifications: Vec<Notification>,
    /// Monotonic counter for notification IDs.
    notification_counter: u64,
    /// Whether the help modal is open.
    pub show_help: bool,
    tick_count: u64,
    /// Receiver for backend events.
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    /// Backend services handle.
    services: Services,
}

impl AppState {
    pub fn new(event_rx: mpsc::UnboundedReceiver<AppEvent>, services: Services) -> Self {
        Self {
            running: true,
            console: ConsoleState::new(),
            area_focus: AreaFocus::Main,
            sidebar: SidebarState::new(),
            login: LoginState::new(),
            resources: ResourceListState::new(),
            logs: LogViewState::new(),
            access: AccessViewState::new(),
            settings: SettingsState::new(),
            form: None,
            confirm: None,
            notice: None,
            notifications: Vec::new(),
            notification_counter: 0,
            show_help: false,
            tick_count: 0,
            event_rx,
            services,
        }
    }

    // ── Elm event loop ──────────────────────────────────────────────────

    /// Main event loop: render → select → update → loop.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        tick_rate: Duration,
    ) -> io::Result<()> {
        let mut tick_interval = tokio::time::interval(tick_rate);
        let mut event_stream = EventStream::new();

        while self.running {
            terminal.draw(|frame| self.render(frame))?;

            tokio::select! {
                _ = tick_interval.tick() => {
                    self.on_tick();
                }
                Some(event) = self.event_rx.recv() => {
                    self.handle_event(event);
                }
                Some(Ok(crossterm_event)) = event_stream.next() => {
                    self.handle_event(AppEvent::Input(crossterm_event));
                }
            }
        }

        Ok(())
    }

    // ── Event handling ──────────────────────────────────────────────────

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(crossterm_event) => self.handle_input(crossterm_event),
            AppEvent::Action(action) => self.handle_action(action),
            AppEvent::Tick => self.on_tick(),
            AppEvent::SnapshotLoaded { ticket, result } => {
                match self.console.apply_snapshot(ticket, result) {
                    SnapshotApplied::Loaded => {
                        log::info!(
                            "Loaded {} resources, {} alerts",
                            self.console.resources().len(),
                            self.console.alerts().len()
                        );
                        self.refresh_metrics();
                    }
                    SnapshotApplied::Failed => {
                        self.push_notification(
                            "Load failed. Press Ctrl+R to retry.".to_string(),
                            NotificationLevel::Error,
                        );
                    }
                    SnapshotApplied::Stale => log::debug!("Discarded stale snapshot"),
                }
            }
            AppEvent::MutationFinished {
                ticket,
                permission,
                result,
            } => self.on_mutation_finished(ticket, permission, result),
            AppEvent::MetricsLoaded { ticket, result } => {
                if self.console.apply_metrics(ticket, result) == MetricsApplied::Failed {
                    self.push_notification(
                        "Could not load metrics for this resource.".to_string(),
                        NotificationLevel::Warning,
                    );
                }
            }
            AppEvent::HealthChecked(result) => self.settings.on_health_checked(result),
            AppEvent::Notification(notification) => {
                self.push_notification(notification.message, notification.level);
            }
            AppEvent::Quit => {
                self.running = false;
            }
        }
    }

    fn handle_input(&mut self, event: Event) {
        // Priority 1: blocking notice
        if let Some(ref notice) = self.notice {
            if notice.handle_input(&event) {
                self.notice = None;
            }
            return;
        }

        // Priority 2: delete confirmation
        if let Some(ref confirm) = self.confirm {
            match confirm.handle_input(&event) {
                ConfirmResult::Consumed => {}
                ConfirmResult::Confirm(mutation) => {
                    self.confirm = None;
                    self.submit(mutation);
                }
                ConfirmResult::Cancel => self.confirm = None,
            }
            return;
        }

        // Priority 3: create / rename form
        if let Some(ref mut form) = self.form {
            match form.handle_input(&event) {
                FormResult::Consumed => {}
                FormResult::Submit(mutation) => {
                    self.form = None;
                    self.submit(mutation);
                }
                FormResult::Cancel => self.form = None,
            }
            return;
        }

        // Priority 4: help modal
        if self.show_help {
            if let Some(action) = self.map_help_input(&event) {
                self.handle_action(action);
            }
            return;
        }

        // Priority 5: login screen while signed out
        if !self.console.session().is_authenticated() {
            match self.login.handle_input(&event) {
                LoginResult::Consumed => {}
                LoginResult::Submit { email, password } => self.submit_login(&email, &password),
                LoginResult::Ignored => {
                    if is_quit_key(&event) {
                        self.running = false;
                    }
                }
            }
            return;
        }

        // Priority 6: sidebar input (when focused)
        if self.area_focus == AreaFocus::Sidebar && self.handle_sidebar_input(&event) {
            return;
        }

        // Priority 7: active view
        if self.dispatch_view_input(&event) {
            return;
        }

        // Priority 8: global keybindings
        if let Some(action) = self.map_input_to_action(event) {
            self.handle_action(action);
        }
    }

    /// Dispatch input to the active tab's view. Returns true if consumed.
    fn dispatch_view_input(&mut self, event: &Event) -> bool {
        match self.console.tab() {
            Tab::Dashboard | Tab::Cost => false,
            tab @ (Tab::Resources | Tab::Databases | Tab::Networks) => {
                let Some(scope) = tab.scope() else {
                    return false;
                };
                match self.resources.handle_input(event, &self.console, scope) {
                    Some(command) => {
                        self.run_resource_command(command, scope);
                        true
                    }
                    None => false,
                }
            }
            Tab::Monitoring => {
                let Some(command) = monitoring::handle_input(event) else {
                    return false;
                };
                let ticket = match command {
                    MonitoringCommand::Next => self.console.cycle_monitored(true),
                    MonitoringCommand::Prev => self.console.cycle_monitored(false),
                    MonitoringCommand::Refresh => self.console.plan_metrics(),
                };
                if let Some(ticket) = ticket {
                    self.services.spawn_metrics(ticket);
                }
                true
            }
            Tab::Logs => self.logs.handle_input(event, self.console.logs()),
            Tab::Access => self.access.handle_input(event, self.console.users()),
            Tab::Settings => match self.settings.handle_input(event) {
                SettingsInput::Consumed => true,
                SettingsInput::CheckHealth => {
                    self.check_health();
                    true
                }
                SettingsInput::Ignored => false,
            },
        }
    }

    fn run_resource_command(&mut self, command: ResourceCommand, scope: ResourceScope) {
        match command {
            ResourceCommand::Consumed => {}
            ResourceCommand::Create => {
                if self.gate(Permission::Create) {
                    self.form = Some(ResourceFormState::create(
                        scope,
                        &self.services.default_region,
                    ));
                }
            }
            ResourceCommand::Rename { id, name } => {
                if self.gate(Permission::Update) {
                    self.form = Some(ResourceFormState::rename(id, &name));
                }
            }
            ResourceCommand::SetStatus { id, status } => {
                if self.gate(Permission::Update) {
                    self.submit(Mutation::Update {
                        id,
                        patch: ResourcePatch::status(status),
                    });
                }
            }
            ResourceCommand::Delete { id, name } => {
                if self.gate(Permission::Delete) {
                    self.confirm = Some(ConfirmState::delete(&name, Mutation::Delete { id }));
                }
            }
        }
    }

    /// Handle sidebar-specific input. Returns true if consumed.
    fn handle_sidebar_input(&mut self, event: &Event) -> bool {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return false;
        };

        match (*modifiers, *code) {
            (KeyModifiers::NONE, KeyCode::Char('j')) | (KeyModifiers::NONE, KeyCode::Down) => {
                self.sidebar.select_next();
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('k')) | (KeyModifiers::NONE, KeyCode::Up) => {
                self.sidebar.select_prev();
                true
            }
            (KeyModifiers::NONE, KeyCode::Enter) | (KeyModifiers::NONE, KeyCode::Char('l')) => {
                let tab = self.sidebar.selected_tab();
                self.handle_action(Action::SelectTab(tab));
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('h')) => {
                self.sidebar.user_collapsed = true;
                self.area_focus = AreaFocus::Main;
                true
            }
            (KeyModifiers::NONE, KeyCode::Esc) => {
                self.area_focus = AreaFocus::Main;
                true
            }
            _ => false,
        }
    }

    // ── Input mapping ───────────────────────────────────────────────────

    /// Map help modal input to action.
    fn map_help_input(&self, event: &Event) -> Option<Action> {
        let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };
        match code {
            KeyCode::Esc | KeyCode::Char('?') => Some(Action::CloseHelp),
            _ => None,
        }
    }

    fn map_input_to_action(&self, event: Event) -> Option<Action> {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };

        match (modifiers, code) {
            (KeyModifiers::CONTROL, KeyCode::Char('b')) => Some(Action::ToggleSidebar),
            (KeyModifiers::CONTROL, KeyCode::Char('r')) => Some(Action::Reload),
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Action::Quit),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, _) => match code {
                KeyCode::Char('q') => Some(Action::Quit),
                KeyCode::Char('?') => Some(Action::ShowHelp),
                KeyCode::Char('L') => Some(Action::Logout),
                KeyCode::Tab => Some(Action::TabNext),
                KeyCode::BackTab => Some(Action::TabPrev),
                KeyCode::Char(c @ '1'..='9') => {
                    Tab::from_index(c as usize - '1' as usize).map(Action::SelectTab)
                }
                _ => None,
            },
            _ => None,
        }
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::SelectTab(tab) => self.set_tab(tab),
            Action::TabNext => self.set_tab(self.console.tab().next()),
            Action::TabPrev => self.set_tab(self.console.tab().prev()),
            Action::ToggleSidebar => {
                self.sidebar.toggle_collapse();
                if !self.sidebar.user_collapsed {
                    self.area_focus = AreaFocus::Sidebar;
                    self.sidebar.sync_to_tab(self.console.tab());
                }
            }
            Action::ShowHelp => self.show_help = true,
            Action::CloseHelp => self.show_help = false,
            Action::Reload => match self.console.begin_snapshot() {
                Ok(ticket) => self.services.spawn_snapshot(ticket),
                Err(err) => log::warn!("Reload skipped: {err}"),
            },
            Action::Logout => {
                self.console.logout();
                self.login.reset();
                self.resources = ResourceListState::new();
                self.logs = LogViewState::new();
                self.access = AccessViewState::new();
                self.settings = SettingsState::new();
                self.form = None;
                self.confirm = None;
                self.sidebar.sync_to_tab(Tab::Dashboard);
                self.area_focus = AreaFocus::Main;
                self.push_notification("Signed out".to_string(), NotificationLevel::Info);
            }
        }
    }

    /// Switch tab, sync the sidebar and start whatever the new tab loads.
    fn set_tab(&mut self, tab: Tab) {
        self.console.set_tab(tab);
        self.sidebar.sync_to_tab(tab);
        self.area_focus = AreaFocus::Main;
        match tab {
            Tab::Monitoring => self.refresh_metrics(),
            Tab::Settings => self.check_health(),
            _ => {}
        }
    }

    // ── Session & mutations ─────────────────────────────────────────────

    fn submit_login(&mut self, email: &str, password: &str) {
        match self.console.login(email, password) {
            Ok(ticket) => {
                self.login.reset();
                self.sidebar.sync_to_tab(Tab::Dashboard);
                self.services.spawn_snapshot(ticket);
                if let Some(role) = self.console.role() {
                    self.push_notification(
                        format!("Signed in as {}", ActingIdentity::for_role(role).name),
                        NotificationLevel::Success,
                    );
                }
            }
            Err(err) => {
                log::info!("Login rejected for {email}");
                self.login.set_error(err.to_string());
            }
        }
    }

    /// True when the acting role may perform `permission`; otherwise the
    /// denial notice is raised.
    fn gate(&mut self, permission: Permission) -> bool {
        match self.console.authorize(permission) {
            Ok(_) => true,
            Err(err) => {
                self.notice = Some(NoticeState::denied(err.to_string()));
                false
            }
        }
    }

    fn submit(&mut self, mutation: Mutation) {
        let permission = mutation.permission();
        match self.console.begin_mutation(&mutation) {
            Ok((role, ticket)) => {
                log::info!("Submitting {} as {role}", permission.label());
                self.services.spawn_mutation(ticket, role, mutation);
            }
            Err(err) => self.show_mutation_error(permission, &err),
        }
    }

    fn on_mutation_finished(
        &mut self,
        ticket: SessionTicket,
        permission: Permission,
        result: Result<MutationOutcome, ConsoleError>,
    ) {
        if !self.console.is_current(ticket) {
            log::debug!("Discarded stale {} result", permission.label());
            return;
        }
        let outcome = match result {
            Ok(outcome) => outcome,
            Err(err) => {
                self.show_mutation_error(permission, &err);
                return;
            }
        };

        let message = match &outcome.change {
            ResourceChange::Created(r) => format!("Created {}", r.name),
            ResourceChange::Updated(r) => format!("Updated {}", r.name),
            ResourceChange::Deleted(id) => format!("Deleted resource #{id}"),
        };
        if let MutationApplied::Applied { log_warning } =
            self.console.apply_mutation(ticket, outcome)
        {
            self.push_notification(message, NotificationLevel::Success);
            if let Some(warning) = log_warning {
                log::warn!("{warning}");
                self.notice = Some(NoticeState::new(
                    "Audit log",
                    warning,
                    NotificationLevel::Warning,
                ));
            }
            if let Some(ticket) = self.console.take_reload() {
                log::debug!("Reloading after a superseded batch load");
                self.services.spawn_snapshot(ticket);
            }
            self.refresh_metrics();
        }
    }

    fn show_mutation_error(&mut self, permission: Permission, err: &ConsoleError) {
        self.notice = Some(match err {
            ConsoleError::Api(api_err) => {
                log::error!("{} failed: {api_err}", permission.label());
                NoticeState::error(permission.failure_notice())
            }
            ConsoleError::PermissionDenied { .. } => NoticeState::denied(err.to_string()),
            other => NoticeState::new("Notice", other.to_string(), NotificationLevel::Warning),
        });
    }

    fn refresh_metrics(&mut self) {
        if let Some(ticket) = self.console.plan_metrics() {
            self.services.spawn_metrics(ticket);
        }
    }

    fn check_health(&mut self) {
        self.settings.begin_health_check();
        self.services.spawn_health();
    }

    // ── Notifications ───────────────────────────────────────────────────

    /// Push a notification (dedup by message, max 3).
    pub fn push_notification(&mut self, message: String, level: NotificationLevel) {
        if self.notifications.iter().any(|n| n.message == message) {
            return;
        }

        self.notification_counter += 1;
        self.notifications.push(Notification {
            id: self.notification_counter,
            message,
            level,
            ttl_ticks: NOTIFICATION_TTL_TICKS,
        });

        while self.notifications.len() > MAX_NOTIFICATIONS {
            self.notifications.remove(0);
        }
    }

    /// Tick: decrement notification TTLs, dismiss expired, advance spinner.
    fn on_tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
        for n in &mut self.notifications {
            n.ttl_ticks = n.ttl_ticks.saturating_sub(1);
        }
        self.notifications.retain(|n| n.ttl_ticks > 0);
    }

    // ── Rendering ───────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        if !self.console.session().is_authenticated() {
            frame.render_widget(
                Block::default().style(Style::default().bg(theme::BG_BASE)),
                area,
            );
            self.login.render(frame, area);
            self.render_notifications(frame, area);
            return;
        }

        let (layout, visibility) = AppLayout::compute(
            area,
            self.sidebar.user_collapsed,
            self.console.error().is_some(),
        );

        self.render_header(frame, layout.header);

        if let Some(sidebar_area) = layout.sidebar {
            self.sidebar.render(
                frame,
                sidebar_area,
                visibility,
                self.console.tab(),
                self.area_focus,
                self.console.role(),
            );
        }

        if let (Some(banner_area), Some(banner)) = (layout.banner, self.console.error()) {
            self.render_banner(frame, banner_area, banner);
        }
        self.render_content(frame, layout.main);
        self.render_status_bar(frame, layout.status);

        // Overlays
        self.render_notifications(frame, area);

        if self.show_help {
            self.render_help_modal(frame, area);
        }
        if let Some(ref form) = self.form {
            form.render(frame, area);
        }
        if let Some(ref confirm) = self.confirm {
            confirm.render(frame, area);
        }
        if let Some(ref notice) = self.notice {
            notice.render(frame, area);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let left = Line::from(vec![
            Span::styled(" ☁ Cloud Resource Manager ", theme::brand_badge()),
            Span::raw(" "),
            Span::styled(
                self.console.tab().label(),
                Style::default()
                    .fg(theme::PRIMARY_LIGHT)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        frame.render_widget(Paragraph::new(left), area);

        if let Some(role) = self.console.role() {
            let identity = ActingIdentity::for_role(role);
            let right = Line::from(vec![
                Span::styled(identity.email, theme::muted()),
                Span::raw(" "),
                Span::styled(format!(" {role} "), theme::role_badge(role)),
                Span::raw(" "),
            ]);
            frame.render_widget(Paragraph::new(right).alignment(Alignment::Right), area);
        }
    }

    fn render_banner(&self, frame: &mut Frame, area: Rect, banner: &str) {
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(
                    format!(" ✗ {banner} "),
                    Style::default().fg(theme::ERROR).add_modifier(Modifier::BOLD),
                ),
                Span::styled("Ctrl+R", theme::key_hint()),
                Span::styled(" retry", theme::muted()),
            ])),
            area,
        );
    }

    fn render_content(&self, frame: &mut Frame, area: Rect) {
        if self.console.is_loading() {
            let spinner = SPINNER[(self.tick_count as usize) % SPINNER.len()];
            let lines = vec![
                Line::raw(""),
                Line::from(Span::styled(
                    format!("{spinner} Loading your cloud resources…"),
                    Style::default().fg(theme::PRIMARY_LIGHT),
                )),
            ];
            frame.render_widget(
                Paragraph::new(lines).alignment(Alignment::Center),
                centered_rect(60, 30, area),
            );
            return;
        }

        match self.console.tab() {
            Tab::Dashboard => dashboard::render(frame, area, &self.console),
            tab @ (Tab::Resources | Tab::Databases | Tab::Networks) => {
                if let Some(scope) = tab.scope() {
                    self.resources.render(frame, area, &self.console, scope);
                }
            }
            Tab::Monitoring => monitoring::render(frame, area, &self.console),
            Tab::Cost => cost::render(frame, area, &self.console),
            Tab::Logs => self.logs.render(frame, area, self.console.logs()),
            Tab::Access => self
                .access
                .render(frame, area, self.console.users(), self.console.role()),
            Tab::Settings => self.settings.render(
                frame,
                area,
                self.console.role(),
                &self.services.endpoint(),
            ),
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let critical = rollup::critical_alert_count(self.console.alerts());
        let alerts = if critical > 0 {
            Span::styled(
                format!("⚠ {critical} critical"),
                Style::default().fg(theme::ERROR).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled("no critical alerts", Style::default().fg(theme::TEXT_MUTED))
        };

        let status = Line::from(vec![
            Span::styled(" CRM ", theme::brand_badge()),
            Span::raw(" "),
            alerts,
            Span::raw(" │ "),
            Span::styled(self.services.endpoint(), theme::dim()),
            Span::raw(" │ "),
            Span::styled("Tab", theme::key_hint()),
            Span::raw(":nav "),
            Span::styled("Ctrl+B", theme::key_hint()),
            Span::raw(":sidebar "),
            Span::styled("Ctrl+R", theme::key_hint()),
            Span::raw(":reload "),
            Span::styled("L", theme::key_hint()),
            Span::raw(":logout "),
            Span::styled("?", theme::key_hint()),
            Span::raw(":help "),
            Span::styled("q", theme::key_hint()),
            Span::raw(":quit"),
        ]);

        frame.render_widget(Paragraph::new(status), area);
    }

    fn render_notifications(&self, frame: &mut Frame, area: Rect) {
        if self.notifications.is_empty() {
            return;
        }

        let max_width = 50.min(area.width.saturating_sub(2));
        let height = self.notifications.len() as u16;
        let x = area.width.saturating_sub(max_width + 1);
        let notification_area = Rect::new(x, 1, max_width, height.min(area.height));

        let lines: Vec<Line> = self
            .notifications
            .iter()
            .map(|n| {
                let (prefix, color) = match n.level {
                    NotificationLevel::Info => ("ℹ", theme::INFO),
                    NotificationLevel::Success => ("✓", theme::SUCCESS),
                    NotificationLevel::Warning => ("⚠", theme::WARNING),
                    NotificationLevel::Error => ("✗", theme::ERROR),
                };
                Line::from(vec![
                    Span::styled(
                        format!(" {prefix} "),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(n.message.as_str()),
                ])
            })
            .collect();

        frame.render_widget(Clear, notification_area);
        frame.render_widget(
            Paragraph::new(lines).style(Style::default().bg(theme::BG_SURFACE)),
            notification_area,
        );
    }

    fn render_help_modal(&self, frame: &mut Frame, area: Rect) {
        let modal = centered_rect(60, 80, area);

        let keybindings = [
            ("Global:", ""),
            ("q / Ctrl+C", "Quit application"),
            ("?", "Toggle this help"),
            ("Tab / Shift+Tab", "Next / previous tab"),
            ("1-9", "Jump to tab by number"),
            ("Ctrl+B", "Toggle sidebar collapse/expand"),
            ("Ctrl+R", "Reload all data"),
            ("L", "Log out"),
            ("", ""),
            ("Sidebar (when focused):", ""),
            ("j/k", "Navigate up/down"),
            ("Enter / l", "Open tab"),
            ("h", "Collapse sidebar"),
            ("Esc", "Focus main content"),
            ("", ""),
            ("Resources / Databases / Networks:", ""),
            ("j/k, g/G", "Select row"),
            ("c", "Create (Admin, Developer)"),
            ("e", "Rename (Admin, Developer)"),
            ("s", "Start / stop (Admin, Developer)"),
            ("d", "Delete (Admin)"),
            ("", ""),
            ("Monitoring:", ""),
            ("n / p", "Next / previous VM"),
            ("r", "Refresh metrics"),
            ("", ""),
            ("Logs & Audit:", ""),
            ("f", "Cycle status filter"),
            ("j/k, g/G", "Scroll"),
            ("", ""),
            ("Settings:", ""),
            ("j/k", "Switch section"),
            ("r", "Check API health"),
        ];

        let mut lines = vec![
            Line::raw(""),
            Line::from(Span::styled(
                " Keybindings",
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::raw(""),
        ];

        for (key, desc) in keybindings {
            if key.is_empty() {
                lines.push(Line::raw(""));
            } else if desc.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("  {key}"),
                    Style::default()
                        .fg(theme::ACCENT)
                        .add_modifier(Modifier::BOLD),
                )));
            } else {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(format!("{key:<22}"), theme::key_hint()),
                    Span::raw(desc),
                ]));
            }
        }

        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::raw("  Press "),
            Span::styled("?", theme::key_hint()),
            Span::raw(" or "),
            Span::styled("Esc", theme::key_hint()),
            Span::raw(" to close"),
        ]));

        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT));

        frame.render_widget(Clear, modal);
        frame.render_widget(Paragraph::new(lines).block(block), modal);
    }
}

fn is_quit_key(event: &Event) -> bool {
    matches!(
        event,
        Event::Key(KeyEvent {
            code: KeyCode::Esc,
            kind: KeyEventKind::Press,
            ..
        }) | Event::Key(KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            ..
        })
    )
}

/// Calculate a centered rect using percentage of parent area.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}
