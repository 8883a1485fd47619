//! Single-line text field with cursor management, used by the login form
//! and the resource modals.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::theme;

#[derive(Debug, Default, Clone)]
pub struct TextField {
    content: String,
    cursor: usize,
    masked: bool,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    /// A field that renders `•` instead of its content.
    pub fn masked() -> Self {
        Self {
            masked: true,
            ..Self::default()
        }
    }

    pub fn with_text(text: &str) -> Self {
        Self {
            content: text.to_string(),
            cursor: text.len(),
            masked: false,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.content.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let prev = self.content[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.content.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.content.len() {
            let next = self.next_boundary();
            self.content.drain(self.cursor..next);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.content[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0);
    }

    pub fn move_right(&mut self) {
        self.cursor = self.next_boundary();
    }

    fn next_boundary(&self) -> usize {
        self.content[self.cursor..]
            .char_indices()
            .nth(1)
            .map(|(i, _)| self.cursor + i)
            .unwrap_or(self.content.len())
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// Blank after trimming.
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }

    pub fn text(&self) -> &str {
        &self.content
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor
    }

    /// Apply an editing key. Returns false for keys the field does not handle.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        match (key.modifiers, key.code) {
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => self.insert_char(c),
            (_, KeyCode::Backspace) => self.backspace(),
            (_, KeyCode::Delete) => self.delete(),
            (_, KeyCode::Left) => self.move_left(),
            (_, KeyCode::Right) => self.move_right(),
            (_, KeyCode::Home) => self.cursor = 0,
            (_, KeyCode::End) => self.cursor = self.content.len(),
            (KeyModifiers::CONTROL, KeyCode::Char('u')) => self.clear(),
            _ => return false,
        }
        true
    }

    /// Render as `label: value` on one row; the focused field shows a cursor.
    pub fn render(&self, frame: &mut Frame, area: Rect, label: &str, focused: bool) {
        let shown = if self.masked {
            "•".repeat(self.content.chars().count())
        } else {
            self.content.clone()
        };

        let label_style = if focused {
            theme::heading()
        } else {
            theme::muted()
        };

        let mut spans = vec![
            Span::styled(format!("{label:<10}"), label_style),
            Span::styled(shown, Style::default().fg(theme::TEXT)),
        ];
        if focused {
            spans.push(Span::styled("▏", Style::default().fg(theme::PRIMARY)));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
