//! Collapsible left sidebar with grouped navigation.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::events::{tab_icon, AreaFocus, SidebarGroup};
use super::layout::SidebarVisibility;
use super::theme;
use crate::core::console::Tab;
use crate::core::session::{ActingIdentity, Role};

/// Sidebar navigation state.
#[derive(Debug, Default)]
pub struct SidebarState {
    /// Whether the user has toggled collapse (Ctrl+B).
    pub user_collapsed: bool,
    /// Currently highlighted item index (into Tab::ALL).
    pub selected: usize,
}

impl SidebarState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_collapse(&mut self) {
        self.user_collapsed = !self.user_collapsed;
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % Tab::ALL.len();
    }

    pub fn select_prev(&mut self) {
        if self.selected == 0 {
            self.selected = Tab::ALL.len() - 1;
        } else {
            self.selected -= 1;
        }
    }

    pub fn selected_tab(&self) -> Tab {
        Tab::ALL[self.selected]
    }

    /// Sync selection to match the active tab (e.g., after Tab navigation).
    pub fn sync_to_tab(&mut self, tab: Tab) {
        self.selected = tab.index();
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        visibility: SidebarVisibility,
        current: Tab,
        area_focus: AreaFocus,
        role: Option<Role>,
    ) {
        match visibility {
            SidebarVisibility::Hidden => {}
            SidebarVisibility::Collapsed => self.render_collapsed(frame, area, current),
            SidebarVisibility::Expanded => {
                self.render_expanded(frame, area, current, area_focus, role)
            }
        }
    }

    fn render_collapsed(&self, frame: &mut Frame, area: Rect, current: Tab) {
        let lines: Vec<Line> = Tab::ALL
            .iter()
            .take(area.height as usize)
            .map(|&tab| {
                let style = if tab == current {
                    Style::default()
                        .fg(theme::PRIMARY)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme::TEXT_MUTED)
                };
                Line::from(Span::styled(format!(" {}", tab_icon(tab)), style))
            })
            .collect();

        frame.render_widget(
            Paragraph::new(lines).style(Style::default().bg(theme::BG_SURFACE)),
            area,
        );
    }

    fn render_expanded(
        &self,
        frame: &mut Frame,
        area: Rect,
        current: Tab,
        area_focus: AreaFocus,
        role: Option<Role>,
    ) {
        let [nav_area, footer_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(3)]).areas(area);

        let mut lines: Vec<Line> = Vec::new();
        let sidebar_focused = area_focus == AreaFocus::Sidebar;

        for group in SidebarGroup::ALL {
            if lines.len() >= nav_area.height as usize {
                break;
            }

            lines.push(Line::from(Span::styled(
                format!(" {}", group.label()),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )));

            for &tab in group.tabs() {
                if lines.len() >= nav_area.height as usize {
                    break;
                }

                let is_current = tab == current;
                let is_selected = sidebar_focused && tab.index() == self.selected;

                let (prefix, style) = match (is_selected, is_current) {
                    (true, true) => (
                        "▸ ",
                        Style::default()
                            .fg(theme::PRIMARY)
                            .add_modifier(Modifier::BOLD),
                    ),
                    (true, false) => (
                        "▸ ",
                        Style::default()
                            .fg(theme::TEXT)
                            .add_modifier(Modifier::BOLD),
                    ),
                    (false, true) => (
                        "  ",
                        Style::default()
                            .fg(theme::PRIMARY)
                            .add_modifier(Modifier::BOLD),
                    ),
                    (false, false) => ("  ", Style::default().fg(theme::TEXT_MUTED)),
                };

                let label = format!("{prefix}{} {}", tab_icon(tab), tab.label());
                let padded = format!("{:<width$}", label, width = nav_area.width as usize);
                lines.push(Line::from(Span::styled(padded, style)));
            }
        }

        frame.render_widget(
            Paragraph::new(lines).style(Style::default().bg(theme::BG_SURFACE)),
            nav_area,
        );

        let footer: Vec<Line> = match role {
            Some(role) => {
                let identity = ActingIdentity::for_role(role);
                vec![
                    Line::from(Span::styled(
                        format!(" {}", identity.name),
                        Style::default().fg(theme::TEXT),
                    )),
                    Line::from(Span::styled(
                        format!(" {}", identity.email),
                        theme::muted(),
                    )),
                    Line::from(Span::styled(format!(" {} ", role), theme::role_badge(role))),
                ]
            }
            None => Vec::new(),
        };
        frame.render_widget(
            Paragraph::new(footer).style(Style::default().bg(theme::BG_SURFACE)),
            footer_area,
        );
    }
}
