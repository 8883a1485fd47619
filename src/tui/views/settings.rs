//! Settings: acting profile, API endpoint and health, static info panes.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::core::api;
use crate::core::models::Health;
use crate::core::session::{ActingIdentity, Role};
use crate::tui::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingsPane {
    #[default]
    Profile,
    Security,
    Integrations,
    Notifications,
}

impl SettingsPane {
    pub const ALL: [SettingsPane; 4] = [
        SettingsPane::Profile,
        SettingsPane::Security,
        SettingsPane::Integrations,
        SettingsPane::Notifications,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SettingsPane::Profile => "Profile & Account",
            SettingsPane::Security => "Security & Access",
            SettingsPane::Integrations => "Cloud Integrations",
            SettingsPane::Notifications => "Notifications",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|p| *p == self).unwrap_or(0)
    }

    fn step(self, forward: bool) -> Self {
        let len = Self::ALL.len();
        let i = self.index();
        Self::ALL[if forward { (i + 1) % len } else { (i + len - 1) % len }]
    }
}

/// Last known result of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HealthStatus {
    #[default]
    Unknown,
    Checking,
    Ok,
    Degraded(String),
    Unreachable(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsInput {
    Consumed,
    CheckHealth,
    Ignored,
}

#[derive(Debug, Default)]
pub struct SettingsState {
    pane: SettingsPane,
    health: HealthStatus,
}

impl SettingsState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pane(&self) -> SettingsPane {
        self.pane
    }

    pub fn health(&self) -> &HealthStatus {
        &self.health
    }

    /// Mark a health check as in flight.
    pub fn begin_health_check(&mut self) {
        self.health = HealthStatus::Checking;
    }

    pub fn on_health_checked(&mut self, result: api::Result<Health>) {
        self.health = match result {
            Ok(health) if health.is_ok() => HealthStatus::Ok,
            Ok(health) => HealthStatus::Degraded(health.status),
            Err(err) => {
                log::warn!("Health check failed: {err}");
                HealthStatus::Unreachable(err.to_string())
            }
        };
    }

    pub fn handle_input(&mut self, event: &Event) -> SettingsInput {
        let Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return SettingsInput::Ignored;
        };
        match code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.pane = self.pane.step(true);
                SettingsInput::Consumed
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.pane = self.pane.step(false);
                SettingsInput::Consumed
            }
            KeyCode::Char('r') => SettingsInput::CheckHealth,
            _ => SettingsInput::Ignored,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, role: Option<Role>, endpoint: &str) {
        let [header, body] =
            Layout::vertical([Constraint::Length(2), Constraint::Min(6)]).areas(area);

        frame.render_widget(
            Paragraph::new(vec![
                Line::from(Span::styled(" Settings", theme::title())),
                Line::from(Span::styled(
                    " Manage your account preferences and cloud integrations.",
                    theme::muted(),
                )),
            ]),
            header,
        );

        let [menu, content] =
            Layout::horizontal([Constraint::Length(24), Constraint::Min(20)]).areas(body);

        let menu_lines: Vec<Line> = SettingsPane::ALL
            .iter()
            .map(|pane| {
                if *pane == self.pane {
                    Line::from(Span::styled(format!("▸ {}", pane.label()), theme::highlight()))
                } else {
                    Line::from(Span::styled(format!("  {}", pane.label()), theme::muted()))
                }
            })
            .collect();
        frame.render_widget(
            Paragraph::new(menu_lines).block(theme::block_default("Sections")),
            menu,
        );

        let block = theme::block_focused(self.pane.label());
        let inner = block.inner(content);
        frame.render_widget(block, content);

        let lines = match self.pane {
            SettingsPane::Profile => self.profile_lines(role, endpoint),
            SettingsPane::Security => static_lines(
                "For this demo, authentication is simplified. In a real system, this section would manage passwords, MFA, API keys, and audit logs for security changes.",
            ),
            SettingsPane::Integrations => static_lines(
                "Connect AWS, Azure, and GCP accounts here. This demo uses your local AWS credentials and mock data for other providers.",
            ),
            SettingsPane::Notifications => static_lines(
                "Configure email or Slack alerts for cost anomalies, failed deployments, or unhealthy resources.",
            ),
        };
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }

    fn profile_lines(&self, role: Option<Role>, endpoint: &str) -> Vec<Line<'static>> {
        let field = |label: &str, value: String, style: Style| {
            Line::from(vec![
                Span::styled(format!(" {label:<16}"), theme::muted()),
                Span::styled(value, style),
            ])
        };
        let text = Style::default().fg(theme::TEXT);

        let mut lines = vec![Line::raw("")];
        match role.map(ActingIdentity::for_role) {
            Some(identity) => {
                lines.push(Line::from(vec![
                    Span::styled(format!(" {} ", identity.initials()), theme::role_badge(identity.role)),
                    Span::raw(" "),
                    Span::styled(
                        identity.name,
                        Style::default().fg(theme::TEXT).add_modifier(Modifier::BOLD),
                    ),
                ]));
                lines.push(Line::raw(""));
                lines.push(field("Full Name", identity.name.to_string(), text));
                lines.push(field("Email Address", identity.email.to_string(), text));
                lines.push(field(
                    "Role",
                    identity.role.label().to_string(),
                    Style::default().fg(theme::role_color(identity.role)),
                ));
            }
            None => lines.push(field("Signed in as", "nobody".into(), theme::dim())),
        }
        lines.push(field("Job Title", "Cloud / DevOps Engineer".into(), text));
        lines.push(field("Timezone", "Asia / Kolkata".into(), text));
        lines.push(Line::raw(""));
        lines.push(field("API endpoint", endpoint.to_string(), Style::default().fg(theme::INFO)));

        let (health, color) = match &self.health {
            HealthStatus::Unknown => ("not checked".to_string(), theme::TEXT_DIM),
            HealthStatus::Checking => ("checking…".to_string(), theme::TEXT_MUTED),
            HealthStatus::Ok => ("● ok".to_string(), theme::SUCCESS),
            HealthStatus::Degraded(status) => (format!("● {status}"), theme::WARNING),
            HealthStatus::Unreachable(err) => (format!("● unreachable ({err})"), theme::ERROR),
        };
        lines.push(field("API health", health, Style::default().fg(color)));
        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::styled(" r", theme::key_hint()),
            Span::styled(":check health  ", theme::muted()),
            Span::styled("j/k", theme::key_hint()),
            Span::styled(":section", theme::muted()),
        ]));
        lines
    }
}

fn static_lines(text: &'static str) -> Vec<Line<'static>> {
    vec![
        Line::raw(""),
        Line::from(Span::styled(format!(" {text}"), theme::muted())),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::api::ApiError;

    #[test]
    fn test_pane_cycle_wraps() {
        let mut state = SettingsState::new();
        let up = Event::Key(KeyEvent::new(KeyCode::Char('k'), KeyModifiers::NONE));
        assert_eq!(state.handle_input(&up), SettingsInput::Consumed);
        assert_eq!(state.pane(), SettingsPane::Notifications);
    }

    #[test]
    fn test_recheck_request() {
        let mut state = SettingsState::new();
        let r = Event::Key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE));
        assert_eq!(state.handle_input(&r), SettingsInput::CheckHealth);
    }

    #[test]
    fn test_health_results() {
        let mut state = SettingsState::new();
        state.begin_health_check();
        assert_eq!(state.health(), &HealthStatus::Checking);

        state.on_health_checked(Ok(Health { status: "ok".into() }));
        assert_eq!(state.health(), &HealthStatus::Ok);

        state.on_health_checked(Ok(Health { status: "degraded".into() }));
        assert_eq!(state.health(), &HealthStatus::Degraded("degraded".into()));

        state.on_health_checked(Err(ApiError::status(503, "down")));
        assert!(matches!(state.health(), HealthStatus::Unreachable(_)));
    }
}
