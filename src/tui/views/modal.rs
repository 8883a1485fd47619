//! Blocking dialogs: delete confirmation and notices.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::core::console::Mutation;
use crate::tui::app::centered_rect;
use crate::tui::events::NotificationLevel;
use crate::tui::theme;

fn pressed(event: &Event) -> Option<KeyCode> {
    match event {
        Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) => Some(*code),
        _ => None,
    }
}

// ── Confirmation ────────────────────────────────────────────────────────

#[derive(Debug, PartialEq)]
pub enum ConfirmResult {
    Consumed,
    Confirm(Mutation),
    Cancel,
}

/// Yes/no prompt guarding a destructive mutation.
#[derive(Debug)]
pub struct ConfirmState {
    title: String,
    message: String,
    mutation: Mutation,
}

impl ConfirmState {
    pub fn new(title: impl Into<String>, message: impl Into<String>, mutation: Mutation) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            mutation,
        }
    }

    /// Delete prompt for the named resource.
    pub fn delete(name: &str, mutation: Mutation) -> Self {
        Self::new(format!("Delete {name}"), "Delete this resource?", mutation)
    }

    pub fn handle_input(&self, event: &Event) -> ConfirmResult {
        match pressed(event) {
            Some(KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter) => {
                ConfirmResult::Confirm(self.mutation.clone())
            }
            Some(KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc) => ConfirmResult::Cancel,
            _ => ConfirmResult::Consumed,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let modal = centered_rect(40, 25, area);
        frame.render_widget(Clear, modal);
        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ERROR));
        let lines = vec![
            Line::raw(""),
            Line::from(Span::styled(self.message.as_str(), Style::default().fg(theme::TEXT))),
            Line::raw(""),
            Line::from(vec![
                Span::styled("y", theme::key_hint()),
                Span::raw(":confirm  "),
                Span::styled("n", theme::key_hint()),
                Span::raw(":cancel"),
            ]),
        ];
        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(block),
            modal,
        );
    }
}

// ── Notice ──────────────────────────────────────────────────────────────

/// Message that blocks input until dismissed.
#[derive(Debug, Clone)]
pub struct NoticeState {
    title: String,
    message: String,
    level: NotificationLevel,
}

impl NoticeState {
    pub fn new(title: impl Into<String>, message: impl Into<String>, level: NotificationLevel) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            level,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new("Error", message, NotificationLevel::Error)
    }

    pub fn denied(message: impl Into<String>) -> Self {
        Self::new("Permission denied", message, NotificationLevel::Warning)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// True when the notice should close.
    pub fn handle_input(&self, event: &Event) -> bool {
        matches!(
            pressed(event),
            Some(KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' '))
        )
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let modal = centered_rect(50, 30, area);
        frame.render_widget(Clear, modal);
        let color = match self.level {
            NotificationLevel::Info => theme::INFO,
            NotificationLevel::Success => theme::SUCCESS,
            NotificationLevel::Warning => theme::WARNING,
            NotificationLevel::Error => theme::ERROR,
        };
        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color));

        let mut lines = vec![Line::raw("")];
        lines.extend(
            self.message
                .lines()
                .map(|l| Line::from(Span::styled(format!(" {l}"), Style::default().fg(theme::TEXT)))),
        );
        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::raw(" Press "),
            Span::styled("Enter", theme::key_hint()),
            Span::raw(" to dismiss"),
        ]));
        frame.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
            modal,
        );
    }
}
