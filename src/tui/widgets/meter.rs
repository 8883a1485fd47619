use ratatui::{
    style::{Color, Style},
    text::Span,
};

use crate::tui::theme;

/// Horizontal block bar: `ratio` of `width` cells filled.
pub fn bar(ratio: f64, width: usize, color: Color) -> Vec<Span<'static>> {
    let ratio = if ratio.is_finite() {
        ratio.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = ((ratio * width as f64).round() as usize).min(width);
    vec![
        Span::styled("█".repeat(filled), Style::default().fg(color)),
        Span::styled(
            "░".repeat(width - filled),
            Style::default().fg(theme::TEXT_DIM),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(spans: &[Span]) -> (usize, usize) {
        (
            spans[0].content.chars().count(),
            spans[1].content.chars().count(),
        )
    }

    #[test]
    fn test_bar_fill() {
        assert_eq!(cells(&bar(0.5, 10, theme::SUCCESS)), (5, 5));
        assert_eq!(cells(&bar(1.7, 10, theme::SUCCESS)), (10, 0));
        assert_eq!(cells(&bar(-1.0, 4, theme::SUCCESS)), (0, 4));
        assert_eq!(cells(&bar(f64::NAN, 4, theme::SUCCESS)), (0, 4));
    }
}
