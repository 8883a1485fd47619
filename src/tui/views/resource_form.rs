//! Create / rename modal for resources.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Layout, Margin, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

use crate::core::console::{Mutation, ResourceScope};
use crate::core::models::{NewResource, Provider, ResourceId, ResourcePatch, ResourceType};
use crate::tui::app::centered_rect;
use crate::tui::theme;
use crate::tui::widgets::text_field::TextField;

const PROVIDERS: [Provider; 3] = [Provider::Aws, Provider::Azure, Provider::Gcp];

#[derive(Debug, Clone, PartialEq)]
pub enum FormMode {
    Create { scope: ResourceScope },
    Rename { id: ResourceId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormField {
    Name,
    Provider,
    Type,
}

#[derive(Debug, PartialEq)]
pub enum FormResult {
    Consumed,
    Cancel,
    Submit(Mutation),
}

#[derive(Debug)]
pub struct ResourceFormState {
    mode: FormMode,
    name: TextField,
    provider: usize,
    resource_type: usize,
    region: String,
    field: FormField,
    error: Option<String>,
}

impl ResourceFormState {
    /// Blank create form. The type is fixed when the scope locks one.
    pub fn create(scope: ResourceScope, region: &str) -> Self {
        let resource_type = scope
            .locked_type()
            .and_then(|t| ResourceType::KNOWN.iter().position(|k| *k == t))
            .unwrap_or(0);
        Self {
            mode: FormMode::Create { scope },
            name: TextField::new(),
            provider: 0,
            resource_type,
            region: region.to_string(),
            field: FormField::Name,
            error: None,
        }
    }

    pub fn rename(id: ResourceId, current_name: &str) -> Self {
        Self {
            mode: FormMode::Rename { id },
            name: TextField::with_text(current_name),
            provider: 0,
            resource_type: 0,
            region: String::new(),
            field: FormField::Name,
            error: None,
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn provider(&self) -> &Provider {
        &PROVIDERS[self.provider]
    }

    pub fn resource_type(&self) -> &ResourceType {
        &ResourceType::KNOWN[self.resource_type]
    }

    fn type_locked(&self) -> bool {
        matches!(self.mode, FormMode::Create { scope } if scope.locked_type().is_some())
    }

    fn fields(&self) -> &'static [FormField] {
        match self.mode {
            FormMode::Rename { .. } => &[FormField::Name],
            FormMode::Create { .. } if self.type_locked() => &[FormField::Name, FormField::Provider],
            FormMode::Create { .. } => &[FormField::Name, FormField::Provider, FormField::Type],
        }
    }

    fn step_field(&mut self, forward: bool) {
        let fields = self.fields();
        let pos = fields.iter().position(|f| *f == self.field).unwrap_or(0);
        let next = if forward {
            (pos + 1) % fields.len()
        } else {
            (pos + fields.len() - 1) % fields.len()
        };
        self.field = fields[next];
    }

    fn cycle_choice(&mut self, forward: bool) {
        let (index, len) = match self.field {
            FormField::Provider => (&mut self.provider, PROVIDERS.len()),
            FormField::Type => (&mut self.resource_type, ResourceType::KNOWN.len()),
            FormField::Name => return,
        };
        *index = if forward {
            (*index + 1) % len
        } else {
            (*index + len - 1) % len
        };
    }

    fn submit(&mut self) -> FormResult {
        if self.name.is_blank() {
            self.error = Some("Resource name is required.".to_string());
            self.field = FormField::Name;
            return FormResult::Consumed;
        }
        let mutation = match self.mode {
            FormMode::Create { .. } => Mutation::Create(NewResource::new(
                self.name.text(),
                self.provider().clone(),
                self.resource_type().clone(),
                self.region.clone(),
            )),
            FormMode::Rename { id } => Mutation::Update {
                id,
                patch: ResourcePatch::rename(self.name.text()),
            },
        };
        FormResult::Submit(mutation)
    }

    pub fn handle_input(&mut self, event: &Event) -> FormResult {
        let Event::Key(key @ KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return FormResult::Consumed;
        };

        match code {
            KeyCode::Esc => FormResult::Cancel,
            KeyCode::Enter => self.submit(),
            KeyCode::Tab | KeyCode::Down => {
                self.step_field(true);
                FormResult::Consumed
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.step_field(false);
                FormResult::Consumed
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') if self.field != FormField::Name => {
                self.cycle_choice(*code != KeyCode::Left);
                FormResult::Consumed
            }
            _ => {
                if self.field == FormField::Name && self.name.handle_key(key) {
                    self.error = None;
                }
                FormResult::Consumed
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let modal = centered_rect(56, 50, area);
        frame.render_widget(Clear, modal);

        let title = match &self.mode {
            FormMode::Create { scope } => scope.create_label(),
            FormMode::Rename { .. } => "Rename Resource",
        };
        let block = theme::block_focused(title);
        let inner = block.inner(modal).inner(Margin::new(2, 1));
        frame.render_widget(block, modal);

        let [name, provider, kind, region, _, error, hints] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .areas(inner);

        self.name
            .render(frame, name, "Name", self.field == FormField::Name);

        if let FormMode::Create { .. } = self.mode {
            frame.render_widget(
                choice_line(
                    "Provider",
                    self.provider().label(),
                    self.field == FormField::Provider,
                    Style::default().fg(theme::provider_color(self.provider())),
                ),
                provider,
            );
            let type_label = if self.type_locked() {
                format!("{} (fixed)", self.resource_type())
            } else {
                self.resource_type().to_string()
            };
            frame.render_widget(
                choice_line(
                    "Type",
                    &type_label,
                    self.field == FormField::Type,
                    Style::default().fg(theme::TEXT),
                ),
                kind,
            );
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled(format!("{:<10}", "Region"), theme::muted()),
                    Span::styled(self.region.clone(), theme::dim()),
                ])),
                region,
            );
        }

        if let Some(ref message) = self.error {
            frame.render_widget(
                Paragraph::new(message.as_str()).style(Style::default().fg(theme::ERROR)),
                error,
            );
        }

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("Enter", theme::key_hint()),
                Span::raw(":save  "),
                Span::styled("Tab", theme::key_hint()),
                Span::raw(":field  "),
                Span::styled("←/→", theme::key_hint()),
                Span::raw(":choose  "),
                Span::styled("Esc", theme::key_hint()),
                Span::raw(":cancel"),
            ])),
            hints,
        );
    }
}

fn choice_line(label: &str, value: &str, focused: bool, value_style: Style) -> Paragraph<'static> {
    let label_style = if focused { theme::heading() } else { theme::muted() };
    let arrows = if focused { ("◂ ", " ▸") } else { ("  ", "  ") };
    Paragraph::new(Line::from(vec![
        Span::styled(format!("{label:<10}"), label_style),
        Span::styled(arrows.0, theme::key_hint()),
        Span::styled(value.to_string(), value_style),
        Span::styled(arrows.1, theme::key_hint()),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(form: &mut ResourceFormState, text: &str) {
        for c in text.chars() {
            form.handle_input(&press(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_blank_name_is_rejected_inline() {
        let mut form = ResourceFormState::create(ResourceScope::All, "ap-south-1");
        type_text(&mut form, "   ");
        assert_eq!(form.handle_input(&press(KeyCode::Enter)), FormResult::Consumed);
        assert_eq!(form.error.as_deref(), Some("Resource name is required."));
    }

    #[test]
    fn test_create_builds_trimmed_request() {
        let mut form = ResourceFormState::create(ResourceScope::All, "ap-south-1");
        type_text(&mut form, " web-01 ");
        form.handle_input(&press(KeyCode::Tab));
        form.handle_input(&press(KeyCode::Right));
        assert_eq!(
            form.handle_input(&press(KeyCode::Enter)),
            FormResult::Submit(Mutation::Create(NewResource::new(
                "web-01",
                Provider::Azure,
                ResourceType::Vm,
                "ap-south-1"
            )))
        );
    }

    #[test]
    fn test_database_scope_locks_type() {
        let mut form = ResourceFormState::create(ResourceScope::Databases, "ap-south-1");
        assert_eq!(form.resource_type(), &ResourceType::Database);
        form.handle_input(&press(KeyCode::Tab));
        form.handle_input(&press(KeyCode::Tab));
        // Only name and provider are reachable.
        assert_eq!(form.field, FormField::Name);
        assert_eq!(form.resource_type(), &ResourceType::Database);
    }

    #[test]
    fn test_rename_builds_patch() {
        let mut form = ResourceFormState::rename(7, "old");
        form.handle_input(&press(KeyCode::Backspace));
        form.handle_input(&press(KeyCode::Backspace));
        form.handle_input(&press(KeyCode::Backspace));
        type_text(&mut form, "new");
        assert_eq!(
            form.handle_input(&press(KeyCode::Enter)),
            FormResult::Submit(Mutation::Update {
                id: 7,
                patch: ResourcePatch::rename("new"),
            })
        );
    }

    #[test]
    fn test_escape_cancels() {
        let mut form = ResourceFormState::create(ResourceScope::Networks, "r");
        assert_eq!(form.resource_type(), &ResourceType::LoadBalancer);
        assert_eq!(form.handle_input(&press(KeyCode::Esc)), FormResult::Cancel);
    }
}
