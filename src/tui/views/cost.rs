//! Cost & Billing: totals, spend per provider, top cost drivers.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, Wrap},
    Frame,
};

use crate::core::console::ConsoleState;
use crate::core::rollup;
use crate::tui::format::{format_inr, truncate};
use crate::tui::theme;
use crate::tui::widgets::meter;

pub fn render(frame: &mut Frame, area: Rect, console: &ConsoleState) {
    let resources = console.resources();

    let [header, cards, body] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(4),
        Constraint::Min(6),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled(" Cost & Billing", theme::title())),
            Line::from(Span::styled(
                " Estimated monthly spend across providers.",
                theme::muted(),
            )),
        ]),
        header,
    );

    let [total, providers, highest] = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .areas(cards);

    card(
        frame,
        total,
        "Total Monthly",
        format_inr(rollup::total_monthly_cost(resources)),
    );
    card(
        frame,
        providers,
        "Providers",
        rollup::group_by_provider(resources).len().to_string(),
    );
    let highest_text = match rollup::highest_cost(resources) {
        Some(r) => format!("{} · {}", r.name, format_inr(r.cost_or_zero())),
        None if resources.is_empty() => "No resources created yet.".to_string(),
        None => "—".to_string(),
    };
    card(frame, highest, "Highest Cost Resource", highest_text);

    let [by_provider, drivers] =
        Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)]).areas(body);
    render_by_provider(frame, by_provider, console);
    render_drivers(frame, drivers, console);
}

fn card(frame: &mut Frame, area: Rect, title: &str, value: String) {
    let block = theme::block_default(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(format!(" {value}"), theme::stat_value()))),
        inner,
    );
}

fn render_by_provider(frame: &mut Frame, area: Rect, console: &ConsoleState) {
    let block = theme::block_default("Spend by Provider");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let spend = rollup::cost_by_provider(console.resources());
    let max = spend.iter().map(|(_, c)| *c).fold(0.0_f64, f64::max);
    if spend.is_empty() || max <= 0.0 {
        frame.render_widget(
            Paragraph::new(Span::styled(
                " No cost data yet. Create some resources.",
                theme::muted(),
            ))
            .wrap(Wrap { trim: false }),
            inner,
        );
        return;
    }

    let bar_width = (inner.width as usize).saturating_sub(22).max(4);
    let mut lines = vec![Line::raw("")];
    for (provider, cost) in &spend {
        let color = theme::provider_color(provider);
        let mut spans = vec![Span::styled(
            format!(" {:<6}", provider.label()),
            Style::default().fg(color),
        )];
        spans.extend(meter::bar(cost / max, bar_width, color));
        spans.push(Span::styled(format!(" {:>12}", format_inr(*cost)), theme::stat_value()));
        lines.push(Line::from(spans));
        lines.push(Line::raw(""));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_drivers(frame: &mut Frame, area: Rect, console: &ConsoleState) {
    let block = theme::block_default("Top Cost Drivers");
    let drivers = rollup::top_cost_drivers(console.resources());

    if drivers.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(
            Paragraph::new(Span::styled(
                " No resources yet. Once you create real AWS resources, they'll appear here with estimated cost.",
                theme::muted(),
            ))
            .wrap(Wrap { trim: false }),
            inner,
        );
        return;
    }

    let name_width = (area.width as usize).saturating_sub(36).max(8);
    let rows: Vec<Row> = drivers
        .iter()
        .enumerate()
        .map(|(rank, r)| {
            Row::new(vec![
                Cell::from(format!("{}.", rank + 1)).style(theme::dim()),
                Cell::from(truncate(&r.name, name_width)),
                Cell::from(r.provider.label().to_string())
                    .style(Style::default().fg(theme::provider_color(&r.provider))),
                Cell::from(r.resource_type.label().to_string()),
                Cell::from(format_inr(r.cost_or_zero())).style(theme::stat_value()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(6),
            Constraint::Length(14),
            Constraint::Length(10),
        ],
    )
    .header(Row::new(["#", "Name", "Cloud", "Type", "₹/mo"]).style(theme::heading()))
    .block(block);
    frame.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::console::Snapshot;
    use crate::tests::common::fixtures;
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered(console: &ConsoleState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), console))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_empty_cost_view() {
        let text = rendered(&ConsoleState::new());
        assert!(text.contains("No resources created yet."));
        assert!(text.contains("No cost data yet."));
    }

    #[test]
    fn test_cost_view_lists_drivers() {
        let mut console = ConsoleState::new();
        let ticket = console.login("dev@example.com", "dev123").unwrap();
        console.apply_snapshot(
            ticket,
            Ok(Snapshot {
                resources: fixtures::sample_resources(),
                ..Snapshot::default()
            }),
        );
        let text = rendered(&console);
        assert!(text.contains("Top Cost Drivers"));
        assert!(text.contains("₹2,050"));
        assert!(text.contains("gcp-vm · ₹900"));
    }
}
