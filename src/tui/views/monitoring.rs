//! Monitoring: CPU, memory and network charts for one VM at a time.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    symbols,
    text::{Line, Span},
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph, Wrap},
    Frame,
};

use crate::core::console::ConsoleState;
use crate::core::models::MetricPoint;
use crate::tui::format::clock_time;
use crate::tui::theme;

const EMPTY_TEXT: &str = "No metrics available yet. Select a VM resource (AWS, GCP, or Azure) and wait for metrics collection to start.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitoringCommand {
    Next,
    Prev,
    Refresh,
}

pub fn handle_input(event: &Event) -> Option<MonitoringCommand> {
    let Event::Key(KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Press,
        ..
    }) = event
    else {
        return None;
    };
    match code {
        KeyCode::Char('n') | KeyCode::Right | KeyCode::Char('l') => Some(MonitoringCommand::Next),
        KeyCode::Char('p') | KeyCode::Left | KeyCode::Char('h') => Some(MonitoringCommand::Prev),
        KeyCode::Char('r') => Some(MonitoringCommand::Refresh),
        _ => None,
    }
}

pub fn render(frame: &mut Frame, area: Rect, console: &ConsoleState) {
    let [header, body] = Layout::vertical([Constraint::Length(3), Constraint::Min(4)]).areas(area);

    let metrics = console.metrics();
    let monitored = console
        .monitored_resource()
        .map(|r| format!("{} ({} · {})", r.name, r.provider, r.region))
        .unwrap_or_else(|| "none".to_string());
    let choices = console.monitorable().len();

    frame.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled(" Monitoring", theme::title())),
            Line::from(vec![
                Span::styled(" Resource: ", theme::muted()),
                Span::styled(monitored, theme::heading()),
                Span::styled(format!("   {} data points", metrics.len()), theme::muted()),
            ]),
            Line::from(vec![
                Span::styled(" n/p", theme::key_hint()),
                Span::styled(format!(":switch VM ({choices} available) "), theme::muted()),
                Span::styled("r", theme::key_hint()),
                Span::styled(":refresh", theme::muted()),
            ]),
        ]),
        header,
    );

    if metrics.is_empty() {
        let block = theme::block_default("Metrics");
        let inner = block.inner(body);
        frame.render_widget(block, body);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(format!(" {EMPTY_TEXT}"), theme::muted())))
                .wrap(Wrap { trim: false }),
            inner,
        );
        return;
    }

    let [top, bottom] = Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(body);
    let [cpu, memory] = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(top);

    let cpu_points = series(metrics, |m| m.cpu);
    let memory_points = series(metrics, |m| m.memory);
    let net_in = series(metrics, |m| m.network_in);
    let net_out = series(metrics, |m| m.network_out);

    percent_chart(frame, cpu, metrics, "CPU %", &cpu_points, theme::PRIMARY);
    percent_chart(frame, memory, metrics, "Memory %", &memory_points, theme::ACCENT);

    let net_max = net_in
        .iter()
        .chain(net_out.iter())
        .map(|(_, y)| *y)
        .fold(0.0_f64, f64::max)
        .max(1.0)
        * 1.1;
    let datasets = vec![
        line_dataset("in", &net_in, theme::SUCCESS),
        line_dataset("out", &net_out, theme::WARNING),
    ];
    let chart = Chart::new(datasets)
        .block(theme::block_default("Network In / Out"))
        .x_axis(time_axis(metrics))
        .y_axis(
            Axis::default()
                .style(theme::dim())
                .bounds([0.0, net_max])
                .labels(vec!["0".to_string(), format!("{:.0}", net_max)]),
        );
    frame.render_widget(chart, bottom);
}

fn series(metrics: &[MetricPoint], value: impl Fn(&MetricPoint) -> f64) -> Vec<(f64, f64)> {
    metrics
        .iter()
        .enumerate()
        .map(|(i, m)| (i as f64, value(m)))
        .collect()
}

fn line_dataset<'a>(name: &'a str, points: &'a [(f64, f64)], color: ratatui::style::Color) -> Dataset<'a> {
    Dataset::default()
        .name(name)
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(points)
}

fn time_axis(metrics: &[MetricPoint]) -> Axis<'static> {
    let first = metrics.first().map(|m| clock_time(&m.time)).unwrap_or_default();
    let last = metrics.last().map(|m| clock_time(&m.time)).unwrap_or_default();
    Axis::default()
        .style(theme::dim())
        .bounds([0.0, metrics.len().saturating_sub(1).max(1) as f64])
        .labels(vec![first, last])
}

fn percent_chart(
    frame: &mut Frame,
    area: Rect,
    metrics: &[MetricPoint],
    title: &str,
    points: &[(f64, f64)],
    color: ratatui::style::Color,
) {
    let latest = points.last().map(|(_, y)| *y).unwrap_or(0.0);
    let title = format!("{title} · {latest:.1}");
    let chart = Chart::new(vec![line_dataset("", points, color)])
        .block(theme::block_default(&title))
        .x_axis(time_axis(metrics))
        .y_axis(
            Axis::default()
                .style(theme::dim())
                .bounds([0.0, 100.0])
                .labels(vec!["0", "50", "100"]),
        );
    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::console::{Snapshot, Tab};
    use crate::core::api::demo::synthetic_metrics;
    use crate::tests::common::fixtures;
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered(console: &ConsoleState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
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
    fn test_keys_map_to_commands() {
        let press = |c| Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        assert_eq!(handle_input(&press('n')), Some(MonitoringCommand::Next));
        assert_eq!(handle_input(&press('p')), Some(MonitoringCommand::Prev));
        assert_eq!(handle_input(&press('r')), Some(MonitoringCommand::Refresh));
        assert_eq!(handle_input(&press('x')), None);
    }

    #[test]
    fn test_empty_state_text() {
        let console = ConsoleState::new();
        assert!(rendered(&console).contains("No metrics available yet."));
    }

    #[test]
    fn test_charts_render_with_metrics() {
        let mut console = ConsoleState::new();
        let ticket = console.login("viewer@example.com", "viewer123").unwrap();
        console.apply_snapshot(
            ticket,
            Ok(Snapshot {
                resources: fixtures::sample_resources(),
                ..Snapshot::default()
            }),
        );
        console.set_tab(Tab::Monitoring);
        let metrics_ticket = console.plan_metrics().unwrap();
        console.apply_metrics(metrics_ticket, Ok(synthetic_metrics()));

        let text = rendered(&console);
        assert!(text.contains("25 data points"));
        assert!(text.contains("CPU %"));
        assert!(text.contains("Network In / Out"));
    }
}
