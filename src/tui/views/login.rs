//! Sign-in screen for the three demo accounts.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
    Frame,
};

use crate::core::session::DEMO_ACCOUNTS;
use crate::tui::app::centered_rect;
use crate::tui::theme;
use crate::tui::widgets::text_field::TextField;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum LoginField {
    #[default]
    Email,
    Password,
}

#[derive(Debug, PartialEq, Eq)]
pub enum LoginResult {
    Consumed,
    Submit { email: String, password: String },
    Ignored,
}

#[derive(Debug, Default)]
pub struct LoginState {
    email: TextField,
    password: TextField,
    field: LoginField,
    error: Option<String>,
}

impl LoginState {
    pub fn new() -> Self {
        Self {
            password: TextField::masked(),
            ..Self::default()
        }
    }

    /// Clear the form, e.g. after logout.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.password.clear();
        self.field = LoginField::Password;
    }

    /// Prefill one of the demo accounts (F1..F3).
    fn prefill(&mut self, index: usize) {
        if let Some(account) = DEMO_ACCOUNTS.get(index) {
            self.email = TextField::with_text(account.email);
            self.password = TextField::masked();
            for c in account.password.chars() {
                self.password.insert_char(c);
            }
            self.field = LoginField::Password;
            self.error = None;
        }
    }

    pub fn handle_input(&mut self, event: &Event) -> LoginResult {
        let Event::Key(key @ KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return LoginResult::Ignored;
        };

        match (*modifiers, *code) {
            (_, KeyCode::Tab | KeyCode::BackTab | KeyCode::Down | KeyCode::Up) => {
                self.field = match self.field {
                    LoginField::Email => LoginField::Password,
                    LoginField::Password => LoginField::Email,
                };
                LoginResult::Consumed
            }
            (_, KeyCode::Enter) => {
                if self.field == LoginField::Email && self.password.text().is_empty() {
                    self.field = LoginField::Password;
                    return LoginResult::Consumed;
                }
                LoginResult::Submit {
                    email: self.email.text().to_string(),
                    password: self.password.text().to_string(),
                }
            }
            (_, KeyCode::F(n @ 1..=3)) => {
                self.prefill(usize::from(n - 1));
                LoginResult::Consumed
            }
            (KeyModifiers::CONTROL, KeyCode::Char('c')) | (_, KeyCode::Esc) => {
                LoginResult::Ignored
            }
            _ => {
                let field = match self.field {
                    LoginField::Email => &mut self.email,
                    LoginField::Password => &mut self.password,
                };
                if field.handle_key(key) {
                    self.error = None;
                    LoginResult::Consumed
                } else {
                    LoginResult::Ignored
                }
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let card = centered_rect(60, 70, area);
        frame.render_widget(Clear, card);

        let block = theme::block_focused("Cloud Resource Manager");
        let inner = block.inner(card);
        frame.render_widget(block, card);

        let [intro, _, email, password, _, error, hints, accounts] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(inner.inner(ratatui::layout::Margin::new(2, 1)));

        frame.render_widget(
            Paragraph::new(
                "Sign in with a demo account to explore Admin, Developer, or Viewer permissions.",
            )
            .style(theme::muted())
            .wrap(Wrap { trim: true }),
            intro,
        );

        self.email
            .render(frame, email, "Email", self.field == LoginField::Email);
        self.password
            .render(frame, password, "Password", self.field == LoginField::Password);

        if let Some(ref message) = self.error {
            frame.render_widget(
                Paragraph::new(message.as_str())
                    .style(Style::default().fg(theme::ERROR))
                    .wrap(Wrap { trim: false }),
                error,
            );
        }

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("Enter", theme::key_hint()),
                Span::raw(":sign in  "),
                Span::styled("Tab", theme::key_hint()),
                Span::raw(":field  "),
                Span::styled("F1-F3", theme::key_hint()),
                Span::raw(":demo account  "),
                Span::styled("Esc", theme::key_hint()),
                Span::raw(":quit"),
            ]))
            .alignment(Alignment::Left),
            hints,
        );

        let mut lines = vec![Line::from(Span::styled("Demo accounts:", theme::heading()))];
        for (i, account) in DEMO_ACCOUNTS.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(format!(" F{} ", i + 1), theme::key_hint()),
                Span::styled(
                    format!("{:<10}", format!("{}:", account.role)),
                    Style::default().fg(theme::role_color(account.role)),
                ),
                Span::styled(
                    format!("{} / {}", account.email, account.password),
                    theme::muted(),
                ),
            ]));
        }
        frame.render_widget(Paragraph::new(lines), accounts);
    }
}
