//! Access Control: read-only directory of users.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use crate::core::models::User;
use crate::core::session::Role;
use crate::tui::format::display_timestamp;
use crate::tui::theme;

#[derive(Debug, Default)]
pub struct AccessViewState {
    selected: usize,
}

impl AccessViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn handle_input(&mut self, event: &Event, users: &[User]) -> bool {
        let Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return false;
        };
        match code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.selected = (self.selected + 1).min(users.len().saturating_sub(1));
                true
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                true
            }
            _ => false,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, users: &[User], role: Option<Role>) {
        let [header, banner, table_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(3),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new(vec![
                Line::from(Span::styled(" RBAC / Access Control", theme::title())),
                Line::from(Span::styled(
                    " View who can manage cloud resources. (Auth is simplified for this demo.)",
                    theme::muted(),
                )),
            ]),
            header,
        );

        let role_label = role.map(Role::label).unwrap_or("guest");
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(
                    " Admin privileges required. ",
                    Style::default().fg(theme::INFO).add_modifier(Modifier::BOLD),
                ),
                Span::styled("You are viewing this page as ", Style::default().fg(theme::INFO)),
                Span::styled(
                    role_label,
                    Style::default().fg(theme::INFO).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    ". Changes made here would affect user access immediately.",
                    Style::default().fg(theme::INFO),
                ),
            ]))
            .wrap(Wrap { trim: false })
            .block(theme::block_default("")),
            banner,
        );

        let block = theme::block_focused("Users");
        if users.is_empty() {
            let inner = block.inner(table_area);
            frame.render_widget(block, table_area);
            frame.render_widget(
                Paragraph::new(Span::styled(
                    " No users found. Backend will auto-create a default Admin user on first load.",
                    theme::muted(),
                ))
                .wrap(Wrap { trim: false }),
                inner,
            );
            return;
        }

        let rows: Vec<Row> = users
            .iter()
            .map(|u| {
                let status = if u.status.is_empty() { "Unknown" } else { u.status.as_str() };
                let status_color = if status == "Active" {
                    theme::SUCCESS
                } else {
                    theme::TEXT_MUTED
                };
                let last_login = if u.last_login.is_empty() {
                    "—".to_string()
                } else {
                    display_timestamp(&u.last_login)
                };
                Row::new(vec![
                    Cell::from(u.name.clone()).style(theme::heading()),
                    Cell::from(u.email.clone()).style(theme::muted()),
                    Cell::from(u.role.label().to_string()),
                    Cell::from(status.to_string()).style(Style::default().fg(status_color)),
                    Cell::from(last_login).style(theme::dim()),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Min(16),
                Constraint::Min(22),
                Constraint::Length(11),
                Constraint::Length(10),
                Constraint::Length(17),
            ],
        )
        .header(Row::new(["User", "Email", "Role", "Status", "Last login"]).style(theme::heading()))
        .block(block)
        .row_highlight_style(theme::highlight())
        .highlight_symbol("▸ ");

        let mut state = TableState::default().with_selected(Some(self.selected.min(users.len() - 1)));
        frame.render_stateful_widget(table, table_area, &mut state);
    }
}
