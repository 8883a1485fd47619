//! Dashboard: headline stats, provider mix, spend vs budget, recent alerts.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::core::console::ConsoleState;
use crate::core::rollup;
use crate::tui::format::{display_timestamp, format_inr, truncate};
use crate::tui::theme;
use crate::tui::widgets::meter;

const RECENT_ALERTS: usize = 8;

pub fn render(frame: &mut Frame, area: Rect, console: &ConsoleState) {
    let [cards, middle, alerts] = Layout::vertical([
        Constraint::Length(5),
        Constraint::Min(8),
        Constraint::Length(RECENT_ALERTS as u16 + 2),
    ])
    .areas(area);

    render_cards(frame, cards, console);

    let [distribution, budgets] =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
            .areas(middle);
    render_distribution(frame, distribution, console);
    render_budgets(frame, budgets, console);
    render_alerts(frame, alerts, console);
}

fn stat_card(frame: &mut Frame, area: Rect, title: &str, value: String, subtext: Line<'static>) {
    let block = theme::block_default(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled(format!(" {value}"), theme::stat_value())),
            subtext,
        ]),
        inner,
    );
}

fn render_cards(frame: &mut Frame, area: Rect, console: &ConsoleState) {
    let resources = console.resources();
    let alerts = console.alerts();
    let cols: [Rect; 4] = Layout::horizontal([Constraint::Ratio(1, 4); 4]).areas(area);

    stat_card(
        frame,
        cols[0],
        "Total Resources",
        resources.len().to_string(),
        Line::from(vec![
            Span::styled(
                format!(" {} Active", rollup::active_count(resources)),
                Style::default().fg(theme::SUCCESS),
            ),
            Span::styled(", ", theme::muted()),
            Span::styled(
                format!("{} Stopped", rollup::stopped_count(resources)),
                theme::muted(),
            ),
        ]),
    );

    stat_card(
        frame,
        cols[1],
        "Est. Monthly Cost",
        format_inr(rollup::total_monthly_cost(resources)),
        Line::from(Span::styled(
            " Projected to stay within budget",
            theme::muted(),
        )),
    );

    let critical = rollup::critical_alert_count(alerts);
    stat_card(
        frame,
        cols[2],
        "Active Alerts",
        alerts.len().to_string(),
        Line::from(Span::styled(
            format!(" {critical} Critical"),
            Style::default().fg(if critical > 0 {
                theme::ERROR
            } else {
                theme::TEXT_MUTED
            }),
        )),
    );

    stat_card(
        frame,
        cols[3],
        "Idle Resources",
        rollup::idle_count(resources).to_string(),
        Line::from(Span::styled(
            " Optimization opportunity detected",
            Style::default().fg(theme::WARNING),
        )),
    );
}

fn render_distribution(frame: &mut Frame, area: Rect, console: &ConsoleState) {
    let block = theme::block_default("Resource Distribution");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let resources = console.resources();
    let distribution = rollup::provider_distribution(resources);
    if distribution.is_empty() {
        let message = if resources.is_empty() {
            " No resources yet."
        } else {
            " No resources on AWS, Azure or GCP yet."
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(message, theme::muted()))),
            inner,
        );
        return;
    }

    let total = resources.len() as f64;
    let bar_width = (inner.width as usize).saturating_sub(18).max(4);
    let mut lines = vec![Line::raw("")];
    for (provider, count) in distribution {
        let color = theme::provider_color(&provider);
        let mut spans = vec![Span::styled(
            format!(" {:<6}", provider.label()),
            Style::default().fg(color),
        )];
        spans.extend(meter::bar(count as f64 / total, bar_width, color));
        spans.push(Span::styled(format!(" {count:>4}"), theme::stat_value()));
        lines.push(Line::from(spans));
        lines.push(Line::raw(""));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_budgets(frame: &mut Frame, area: Rect, console: &ConsoleState) {
    let block = theme::block_default("Cost vs Budget");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let budgets = rollup::provider_budgets(console.resources());
    if budgets.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                " No cost data yet. Create some resources to see this chart.",
                theme::muted(),
            )))
            .wrap(Wrap { trim: false }),
            inner,
        );
        return;
    }

    let bar_width = (inner.width as usize).saturating_sub(10).clamp(4, 40);
    let mut lines = vec![Line::raw("")];
    for budget in &budgets {
        let ratio = budget.ratio();
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {:<6}", budget.provider.label()),
                Style::default().fg(theme::provider_color(&budget.provider)),
            ),
            Span::styled(
                format!(
                    "{} of {} ({:.0}%)",
                    format_inr(budget.spend),
                    format_inr(budget.budget),
                    ratio * 100.0
                ),
                theme::muted(),
            ),
        ]));
        let mut bar = vec![Span::raw("        ")];
        bar.extend(meter::bar(ratio, bar_width, theme::budget_color(ratio)));
        lines.push(Line::from(bar));
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        " Budget = max(spend × 1.5, ₹1,000)",
        theme::dim(),
    )));
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_alerts(frame: &mut Frame, area: Rect, console: &ConsoleState) {
    let block = theme::block_default("Recent Alerts");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let alerts = console.alerts();
    if alerts.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                " No alerts at the moment. Your infrastructure looks healthy.",
                Style::default().fg(theme::SUCCESS),
            ))),
            inner,
        );
        return;
    }

    let title_width = (inner.width as usize).saturating_sub(32).max(10);
    let lines: Vec<Line> = alerts
        .iter()
        .take(RECENT_ALERTS)
        .map(|alert| {
            let color = theme::severity_color(&alert.severity);
            Line::from(vec![
                Span::styled(format!(" {:<9}", alert.severity.label()), Style::default().fg(color)),
                Span::styled(
                    format!("{:<width$}", truncate(&alert.title, title_width), width = title_width),
                    Style::default().fg(theme::TEXT),
                ),
                Span::styled(format!(" {}", display_timestamp(&alert.time)), theme::dim()),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}
