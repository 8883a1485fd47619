//! Slate & Sky color theme for the console.
//!
//! All color constants are RGB truecolor. Views import from here
//! instead of using inline `Color::*` literals.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders};

use crate::core::models::{Provider, ResourceStatus, Severity};
use crate::core::session::Role;

// ── Primary palette ─────────────────────────────────────────────────────────

/// Sky blue: primary accent, active items, focused borders.
pub const PRIMARY: Color = Color::Rgb(0x38, 0xBD, 0xF8);
/// Light sky: highlights, hints.
pub const PRIMARY_LIGHT: Color = Color::Rgb(0x7D, 0xD3, 0xFC);

// ── Accent ──────────────────────────────────────────────────────────────────

/// Indigo: calls to action, selected rows.
pub const ACCENT: Color = Color::Rgb(0x81, 0x8C, 0xF8);

// ── Backgrounds ─────────────────────────────────────────────────────────────

/// Slate 950: base background.
pub const BG_BASE: Color = Color::Rgb(0x02, 0x06, 0x17);
/// Slate 900: sidebar, elevated panels.
pub const BG_SURFACE: Color = Color::Rgb(0x0F, 0x17, 0x2A);
/// Slate 800: selected table rows.
pub const BG_SELECTED: Color = Color::Rgb(0x1E, 0x29, 0x3B);

// ── Text ────────────────────────────────────────────────────────────────────

pub const TEXT: Color = Color::Rgb(0xE2, 0xE8, 0xF0);
pub const TEXT_MUTED: Color = Color::Rgb(0x94, 0xA3, 0xB8);
pub const TEXT_DIM: Color = Color::Rgb(0x47, 0x55, 0x69);

// ── Semantic ────────────────────────────────────────────────────────────────

pub const ERROR: Color = Color::Rgb(0xF8, 0x71, 0x71);
pub const SUCCESS: Color = Color::Rgb(0x34, 0xD3, 0x99);
pub const WARNING: Color = Color::Rgb(0xFB, 0xBF, 0x24);
pub const INFO: Color = Color::Rgb(0x60, 0xA5, 0xFA);

// ── Domain ──────────────────────────────────────────────────────────────────

pub const AWS: Color = Color::Rgb(0xFF, 0x99, 0x00);
pub const AZURE: Color = Color::Rgb(0x00, 0x78, 0xD4);
pub const GCP: Color = Color::Rgb(0x34, 0xA8, 0x53);

pub fn provider_color(provider: &Provider) -> Color {
    match provider {
        Provider::Aws => AWS,
        Provider::Azure => AZURE,
        Provider::Gcp => GCP,
        Provider::Other(_) => TEXT_MUTED,
    }
}

pub fn status_color(status: &ResourceStatus) -> Color {
    match status {
        ResourceStatus::Running => SUCCESS,
        ResourceStatus::Stopped => TEXT_MUTED,
        ResourceStatus::Unknown => WARNING,
        ResourceStatus::Other(_) => ERROR,
    }
}

pub fn severity_color(severity: &Severity) -> Color {
    match severity {
        Severity::Critical => ERROR,
        Severity::Warning => WARNING,
        Severity::Info | Severity::Other(_) => INFO,
    }
}

pub fn role_color(role: Role) -> Color {
    match role {
        Role::Admin => ERROR,
        Role::Developer => PRIMARY,
        Role::Viewer => TEXT_MUTED,
    }
}

/// Fill color for a spend/budget ratio.
pub fn budget_color(ratio: f64) -> Color {
    if ratio >= 0.95 {
        ERROR
    } else if ratio >= 0.8 {
        WARNING
    } else {
        SUCCESS
    }
}

// ── Style helpers ───────────────────────────────────────────────────────────

/// Accent bold text (titles, active items).
pub fn title() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

/// Section header style.
pub fn heading() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::default().fg(PRIMARY)
}

pub fn border_default() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Highlighted/selected item.
pub fn highlight() -> Style {
    Style::default()
        .fg(TEXT)
        .bg(BG_SELECTED)
        .add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(TEXT_MUTED)
}

/// Dim text for disabled/faint items.
pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Key hint style (e.g., "[q]:quit").
pub fn key_hint() -> Style {
    Style::default().fg(PRIMARY_LIGHT)
}

/// Big number on a stat card.
pub fn stat_value() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}

/// Status bar brand badge.
pub fn brand_badge() -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(PRIMARY)
        .add_modifier(Modifier::BOLD)
}

/// Acting role badge.
pub fn role_badge(role: Role) -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(role_color(role))
        .add_modifier(Modifier::BOLD)
}

/// Key hint for an action the acting role may not perform.
pub fn disabled_hint() -> Style {
    Style::default()
        .fg(TEXT_DIM)
        .add_modifier(Modifier::CROSSED_OUT)
}

// ── Block builders ──────────────────────────────────────────────────────────

/// A bordered block with focused styling.
pub fn block_focused(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(border_focused())
}

/// A bordered block with default (unfocused) styling.
pub fn block_default(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(border_default())
}
