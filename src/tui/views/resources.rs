//! Resource table shared by the All Resources, Databases and Networks tabs.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use crate::core::console::{ConsoleState, ResourceScope};
use crate::core::models::{Resource, ResourceId, ResourceStatus};
use crate::core::session::Permission;
use crate::tui::format::format_inr;
use crate::tui::theme;

/// What the app should do after a key press on the table.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceCommand {
    Consumed,
    Create,
    Rename { id: ResourceId, name: String },
    SetStatus { id: ResourceId, status: ResourceStatus },
    Delete { id: ResourceId, name: String },
}

/// Status a start/stop toggle moves to: Running stops, anything else starts.
pub fn toggled_status(current: &ResourceStatus) -> ResourceStatus {
    match current {
        ResourceStatus::Running => ResourceStatus::Stopped,
        _ => ResourceStatus::Running,
    }
}

fn subtitle(scope: ResourceScope) -> &'static str {
    match scope {
        ResourceScope::All => "Manage all your resources across providers.",
        ResourceScope::Databases => "Manage your database instances.",
        ResourceScope::Networks => "Manage your network / load balancer resources.",
    }
}

#[derive(Debug, Default)]
pub struct ResourceListState {
    selected: usize,
}

impl ResourceListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    fn selected_resource<'a>(&self, rows: &[&'a Resource]) -> Option<&'a Resource> {
        rows.get(self.selected).copied()
    }

    /// Keep the selection inside the list after it shrinks.
    pub fn clamp(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    pub fn handle_input(
        &mut self,
        event: &Event,
        console: &ConsoleState,
        scope: ResourceScope,
    ) -> Option<ResourceCommand> {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };

        let rows = console.scoped(scope);
        self.clamp(rows.len());

        match (*modifiers, *code) {
            (KeyModifiers::NONE, KeyCode::Char('j') | KeyCode::Down) => {
                if !rows.is_empty() {
                    self.selected = (self.selected + 1).min(rows.len() - 1);
                }
                Some(ResourceCommand::Consumed)
            }
            (KeyModifiers::NONE, KeyCode::Char('k') | KeyCode::Up) => {
                self.selected = self.selected.saturating_sub(1);
                Some(ResourceCommand::Consumed)
            }
            (KeyModifiers::NONE, KeyCode::Char('g') | KeyCode::Home) => {
                self.selected = 0;
                Some(ResourceCommand::Consumed)
            }
            (KeyModifiers::SHIFT, KeyCode::Char('G')) | (_, KeyCode::End) => {
                self.selected = rows.len().saturating_sub(1);
                Some(ResourceCommand::Consumed)
            }
            (KeyModifiers::NONE, KeyCode::Char('c')) => Some(ResourceCommand::Create),
            (KeyModifiers::NONE, KeyCode::Char('e')) => {
                self.selected_resource(&rows)
                    .map(|r| ResourceCommand::Rename {
                        id: r.id,
                        name: r.name.clone(),
                    })
                    .or(Some(ResourceCommand::Consumed))
            }
            (KeyModifiers::NONE, KeyCode::Char('s')) => self
                .selected_resource(&rows)
                .map(|r| ResourceCommand::SetStatus {
                    id: r.id,
                    status: toggled_status(&r.status),
                })
                .or(Some(ResourceCommand::Consumed)),
            (KeyModifiers::NONE, KeyCode::Char('d') | KeyCode::Delete) => self
                .selected_resource(&rows)
                .map(|r| ResourceCommand::Delete {
                    id: r.id,
                    name: r.name.clone(),
                })
                .or(Some(ResourceCommand::Consumed)),
            _ => None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, console: &ConsoleState, scope: ResourceScope) {
        let [header, table_area, hints] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new(vec![
                Line::from(Span::styled(format!(" {}", scope.title()), theme::title())),
                Line::from(Span::styled(format!(" {}", subtitle(scope)), theme::muted())),
            ]),
            header,
        );

        let rows = console.scoped(scope);
        let block = theme::block_focused(scope.title());

        if rows.is_empty() {
            let inner = block.inner(table_area);
            frame.render_widget(block, table_area);
            let message = if console.can(Permission::Create) {
                format!(
                    "No resources found in this view. Use {} (c) to create one.",
                    scope.create_label()
                )
            } else {
                "No resources found in this view. You don't have permission to create new resources."
                    .to_string()
            };
            frame.render_widget(
                Paragraph::new(vec![
                    Line::raw(""),
                    Line::from(Span::styled(format!("  {message}"), theme::muted())),
                ])
                .wrap(Wrap { trim: false }),
                inner,
            );
        } else {
            let table_rows: Vec<Row> = rows.iter().map(|r| resource_row(r)).collect();
            let table = Table::new(
                table_rows,
                [
                    Constraint::Min(18),
                    Constraint::Length(8),
                    Constraint::Length(14),
                    Constraint::Length(14),
                    Constraint::Length(24),
                    Constraint::Length(12),
                ],
            )
            .header(
                Row::new(["Name", "Provider", "Type", "Region", "Status", "Cost (₹/mo)"])
                    .style(theme::heading()),
            )
            .block(block)
            .row_highlight_style(theme::highlight())
            .highlight_symbol("▸ ");

            let mut state = TableState::default().with_selected(Some(self.selected.min(rows.len() - 1)));
            frame.render_stateful_widget(table, table_area, &mut state);
        }

        frame.render_widget(Paragraph::new(action_hints(console, scope)), hints);
    }
}

fn resource_row(resource: &Resource) -> Row<'static> {
    let cost = resource
        .cost_per_month
        .map(format_inr)
        .unwrap_or_else(|| "—".to_string());
    Row::new(vec![
        Cell::from(resource.name.clone()),
        Cell::from(resource.provider.label().to_string())
            .style(Style::default().fg(theme::provider_color(&resource.provider))),
        Cell::from(resource.resource_type.label().to_string()),
        Cell::from(resource.region.clone()),
        Cell::from(format!("● {}", resource.status))
            .style(Style::default().fg(theme::status_color(&resource.status))),
        Cell::from(cost),
    ])
}

/// Key hints; actions the acting role may not perform are struck through.
fn action_hints(console: &ConsoleState, scope: ResourceScope) -> Line<'static> {
    let hint = |key: &str, label: String, permission: Option<Permission>| {
        let allowed = permission.map_or(true, |p| console.can(p));
        let style = if allowed {
            theme::key_hint()
        } else {
            theme::disabled_hint()
        };
        vec![
            Span::styled(format!(" {key}"), style),
            Span::styled(
                format!(":{label} "),
                if allowed { theme::muted() } else { theme::disabled_hint() },
            ),
        ]
    };

    let mut spans = Vec::new();
    spans.extend(hint("j/k", "select".into(), None));
    spans.extend(hint(
        "c",
        scope.create_label().to_lowercase(),
        Some(Permission::Create),
    ));
    spans.extend(hint("e", "rename".into(), Some(Permission::Update)));
    spans.extend(hint("s", "start/stop".into(), Some(Permission::Update)));
    spans.extend(hint("d", "delete".into(), Some(Permission::Delete)));
    Line::from(spans)
}
