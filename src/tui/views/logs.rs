//! Logs & Audit: the server's action trail with an outcome filter.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::super::theme;
use crate::core::models::{LogEntry, LogStatus};
use crate::tui::format::{display_timestamp, truncate};

// ── Filter ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFilter {
    #[default]
    All,
    Success,
    Failure,
}

impl LogFilter {
    fn next(self) -> Self {
        match self {
            LogFilter::All => LogFilter::Success,
            LogFilter::Success => LogFilter::Failure,
            LogFilter::Failure => LogFilter::All,
        }
    }

    fn label(self) -> &'static str {
        match self {
            LogFilter::All => "All",
            LogFilter::Success => "Success",
            LogFilter::Failure => "Failure",
        }
    }

    /// `Failure` also matches outcomes the server reports outside the known set.
    pub fn matches(self, entry: &LogEntry) -> bool {
        match self {
            LogFilter::All => true,
            LogFilter::Success => entry.status == LogStatus::Success,
            LogFilter::Failure => entry.status != LogStatus::Success,
        }
    }
}

// ── State ──────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct LogViewState {
    filter: LogFilter,
    selected: usize,
    scroll: usize,
}

impl LogViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&self) -> LogFilter {
        self.filter
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    fn visible<'a>(&self, logs: &'a [LogEntry]) -> Vec<&'a LogEntry> {
        logs.iter().filter(|e| self.filter.matches(e)).collect()
    }

    pub fn handle_input(&mut self, event: &Event, logs: &[LogEntry]) -> bool {
        let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            modifiers,
            ..
        }) = event
        else {
            return false;
        };

        let count = self.visible(logs).len();
        match (*modifiers, *code) {
            (KeyModifiers::NONE, KeyCode::Char('j') | KeyCode::Down) => {
                if count > 0 {
                    self.selected = (self.selected + 1).min(count - 1);
                }
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('k') | KeyCode::Up) => {
                self.selected = self.selected.saturating_sub(1);
                self.scroll = self.scroll.min(self.selected);
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('f')) => {
                self.filter = self.filter.next();
                self.selected = 0;
                self.scroll = 0;
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('g')) => {
                self.selected = 0;
                self.scroll = 0;
                true
            }
            (KeyModifiers::SHIFT, KeyCode::Char('G')) => {
                self.selected = count.saturating_sub(1);
                true
            }
            _ => false,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, logs: &[LogEntry]) {
        let [bar, list] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);
        let entries = self.visible(logs);
        self.render_filter_bar(frame, bar, entries.len());
        self.render_entries(frame, list, &entries, logs.is_empty());
    }

    fn render_filter_bar(&self, frame: &mut Frame, area: Rect, count: usize) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::TEXT_DIM));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let filter_color = match self.filter {
            LogFilter::All => theme::TEXT,
            LogFilter::Success => theme::SUCCESS,
            LogFilter::Failure => theme::ERROR,
        };

        let line = Line::from(vec![
            Span::styled(" Status: ", Style::default().fg(theme::TEXT_MUTED)),
            Span::styled(
                self.filter.label(),
                Style::default()
                    .fg(filter_color)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(format!("{count} entries"), theme::muted()),
            Span::raw("  "),
            Span::styled(
                "[f] cycle filter  [j/k] navigate  [g/G] top/bottom",
                theme::dim(),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), inner);
    }

    fn render_entries(&self, frame: &mut Frame, area: Rect, entries: &[&LogEntry], none_at_all: bool) {
        let block = theme::block_focused("Logs & Audit");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if entries.is_empty() {
            let msg = if none_at_all {
                "No actions recorded yet. Create or delete some resources to see logs here."
            } else {
                "No entries match the current filter"
            };
            frame.render_widget(
                Paragraph::new(vec![
                    Line::raw(""),
                    Line::from(Span::styled(format!("  {msg}"), theme::muted())),
                ]),
                inner,
            );
            return;
        }

        let visible_height = (inner.height as usize).max(1);
        // Keep the selection on screen.
        let scroll = if self.selected >= self.scroll + visible_height {
            self.selected + 1 - visible_height
        } else {
            self.scroll.min(self.selected)
        };
        let action_width = (inner.width as usize).saturating_sub(58).max(12);

        let lines: Vec<Line<'static>> = entries
            .iter()
            .enumerate()
            .skip(scroll)
            .take(visible_height)
            .map(|(i, entry)| {
                let is_selected = i == self.selected;
                let marker = if is_selected { "▸" } else { " " };
                let row_style = if is_selected {
                    Style::default().fg(theme::TEXT).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme::TEXT)
                };
                let status_color = if entry.status == LogStatus::Success {
                    theme::SUCCESS
                } else {
                    theme::ERROR
                };
                Line::from(vec![
                    Span::styled(format!("{marker} "), row_style),
                    Span::styled(
                        format!("{:<17}", display_timestamp(&entry.timestamp)),
                        theme::dim(),
                    ),
                    Span::styled(format!("{:<8}", truncate(&entry.user, 8)), theme::muted()),
                    Span::styled(
                        format!("{:<width$}", truncate(&entry.action, action_width), width = action_width),
                        row_style,
                    ),
                    Span::styled(format!(" {:<16}", truncate(&entry.resource, 16)), row_style),
                    Span::styled(
                        format!("{:<6}", entry.provider.label()),
                        Style::default().fg(theme::provider_color(&entry.provider)),
                    ),
                    Span::styled(
                        entry.status.label().to_string(),
                        Style::default().fg(status_color).add_modifier(Modifier::BOLD),
                    ),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Provider;

    fn entry(id: i64, status: LogStatus) -> LogEntry {
        LogEntry {
            id,
            timestamp: "2026-01-01T10:00:00".into(),
            user: "system".into(),
            action: "Create VM".into(),
            resource: format!("vm-{id}"),
            status,
            provider: Provider::Aws,
        }
    }

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_filter_cycles_and_matches() {
        let logs = vec![
            entry(1, LogStatus::Success),
            entry(2, LogStatus::Failure),
            entry(3, LogStatus::Other("Partial".into())),
        ];
        let mut state = LogViewState::new();
        assert_eq!(state.visible(&logs).len(), 3);
        state.handle_input(&press(KeyCode::Char('f')), &logs);
        assert_eq!(state.filter(), LogFilter::Success);
        assert_eq!(state.visible(&logs).len(), 1);
        state.handle_input(&press(KeyCode::Char('f')), &logs);
        assert_eq!(state.visible(&logs).len(), 2);
        state.handle_input(&press(KeyCode::Char('f')), &logs);
        assert_eq!(state.filter(), LogFilter::All);
    }

    #[test]
    fn test_selection_stays_in_filtered_range() {
        let logs = vec![entry(1, LogStatus::Success), entry(2, LogStatus::Failure)];
        let mut state = LogViewState::new();
        state.handle_input(&press(KeyCode::Char('f')), &logs);
        state.handle_input(&press(KeyCode::Char('j')), &logs);
        assert_eq!(state.selected(), 0);
    }

    #[test]
    fn test_unhandled_key_falls_through() {
        let mut state = LogViewState::new();
        assert!(!state.handle_input(&press(KeyCode::Char('z')), &[]));
    }
}
