//! UI module: View components for the TUI.

pub mod form;
pub mod log;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::ClinicalTheme;

pub fn render_disclaimer(f: &mut Frame, area: Rect, endpoint: &str) {
    let text = vec![
        Line::from(vec![Span::styled(
            "DISCLAIMER: Predictions are indicative estimates and do not replace professional medical evaluation.",
            ClinicalTheme::text_muted(),
        )]),
        Line::from(vec![
            Span::styled("Service: ", ClinicalTheme::text_muted()),
            Span::styled(endpoint.to_string(), ClinicalTheme::text_secondary()),
            Span::styled(
                "  The log is kept in memory and discarded on exit.",
                ClinicalTheme::text_muted(),
            ),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(ClinicalTheme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}
