//! Session log views: latest result, prediction table and trend chart.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Cell, Chart, Dataset, Gauge, GraphType, Paragraph, Row, Table},
    Frame,
};

use crate::application::SessionLog;
use crate::domain::LogEntry;
use crate::tui::styles::ClinicalTheme;

/// Render the results column: latest result on top, then table and chart.
pub fn render_log(f: &mut Frame, area: Rect, log: &SessionLog, pending: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),      // Latest result
            Constraint::Percentage(45), // Table
            Constraint::Min(8),         // Trend chart
        ])
        .split(area);

    render_latest(f, chunks[0], log.latest(), pending);
    render_table(f, chunks[1], log);
    render_trend(f, chunks[2], log);
}

fn render_latest(f: &mut Frame, area: Rect, latest: Option<&LogEntry>, pending: usize) {
    let title = if pending > 0 {
        Span::styled(
            format!(" Latest Result (… {pending} pending) "),
            ClinicalTheme::pending(),
        )
    } else {
        Span::styled(" Latest Result ", ClinicalTheme::subtitle())
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(ClinicalTheme::border());

    match latest {
        Some(entry) => {
            let style = ClinicalTheme::verdict(entry.has_disease);
            let gauge = Gauge::default()
                .block(block)
                .gauge_style(style)
                .ratio(entry.probability.clamp(0.0, 1.0))
                .label(format!(
                    "#{}  {}  Heart disease: {}",
                    entry.sequence_id,
                    entry.probability_display(),
                    entry.verdict()
                ));
            f.render_widget(gauge, area);
        }
        None => {
            let content = Paragraph::new(Line::from(Span::styled(
                "Submit the form to get a prediction",
                ClinicalTheme::text_muted(),
            )))
            .alignment(Alignment::Center)
            .block(block);
            f.render_widget(content, area);
        }
    }
}

fn render_table(f: &mut Frame, area: Rect, log: &SessionLog) {
    let block = Block::default()
        .title(Span::styled(" Predictions Log ", ClinicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(ClinicalTheme::border());

    if log.is_empty() {
        render_placeholder(f, area, block, "No predictions yet");
        return;
    }

    let header = Row::new(vec!["#", "Probability", "Heart Disease?", "Received"])
        .style(ClinicalTheme::table_header())
        .bottom_margin(1);

    let rows = log.table_rows().map(|entry| {
        Row::new(vec![
            Cell::from(entry.sequence_id.to_string()),
            Cell::from(entry.probability_display()),
            Cell::from(entry.verdict()).style(ClinicalTheme::verdict(entry.has_disease)),
            Cell::from(entry.received_at.format("%H:%M:%S").to_string()),
        ])
        .style(ClinicalTheme::text())
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(5),
            Constraint::Length(12),
            Constraint::Length(16),
            Constraint::Min(8),
        ],
    )
    .header(header)
    .block(block);

    f.render_widget(table, area);
}

fn render_trend(f: &mut Frame, area: Rect, log: &SessionLog) {
    let block = Block::default()
        .title(Span::styled(" Probability Trend ", ClinicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(ClinicalTheme::border());

    let points = chart_points(log);
    if points.is_empty() {
        render_placeholder(f, area, block, "The trend appears after the first prediction");
        return;
    }

    let x_max = points.len().max(2) as f64;

    // The scatter layer keeps a single prediction visible; a line needs two points.
    let datasets = vec![
        Dataset::default()
            .name("probability")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(ClinicalTheme::trend())
            .data(&points),
        Dataset::default()
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(ClinicalTheme::trend())
            .data(&points),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title(Span::styled("Prediction #", ClinicalTheme::text_secondary()))
                .style(ClinicalTheme::border())
                .bounds([1.0, x_max])
                .labels(vec!["1".to_string(), format!("{}", x_max as u64)]),
        )
        .y_axis(
            Axis::default()
                .style(ClinicalTheme::border())
                .bounds([0.0, 1.0])
                .labels(vec!["0.0", "0.5", "1.0"]),
        );

    f.render_widget(chart, area);
}

fn render_placeholder(f: &mut Frame, area: Rect, block: Block<'_>, message: &str) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(message, ClinicalTheme::text_muted())),
    ])
    .alignment(Alignment::Center)
    .block(block);

    f.render_widget(content, area);
}

/// Chart coordinates, oldest prediction leftmost.
fn chart_points(log: &SessionLog) -> Vec<(f64, f64)> {
    log.chart_series()
        .into_iter()
        .map(|(sequence_id, probability)| (sequence_id as f64, probability))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PredictionResult;
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_chart_points_oldest_first() {
        let mut log = SessionLog::new();
        log.append(PredictionResult::new(0.8421, true));
        log.append(PredictionResult::new(0.2, false));

        assert_eq!(chart_points(&log), vec![(1.0, 0.842), (2.0, 0.2)]);
    }

    #[test]
    fn test_empty_log_shows_placeholder() {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).expect("terminal");
        let log = SessionLog::new();

        terminal
            .draw(|f| render_log(f, f.area(), &log, 0))
            .expect("draw");

        assert!(buffer_text(&terminal).contains("No predictions yet"));
    }

    #[test]
    fn test_table_lists_entries() {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).expect("terminal");
        let mut log = SessionLog::new();
        log.append(PredictionResult::new(0.8421, true));

        terminal
            .draw(|f| render_log(f, f.area(), &log, 1))
            .expect("draw");

        let text = buffer_text(&terminal);
        assert!(text.contains("0.842"));
        assert!(text.contains("Heart Disease?"));
        assert!(!text.contains("No predictions yet"));
    }
}
