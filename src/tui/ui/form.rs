//! Feature entry form.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::application::FormController;
use crate::domain::{FieldName, LogEntry};
use crate::tui::styles::ClinicalTheme;

/// Outcome of the most recent form action, shown in the footer.
#[derive(Debug, Clone, Default)]
pub enum FormStatus {
    #[default]
    Ready,
    /// A prediction was recorded in the log
    Recorded(LogEntry),
    /// A submission failed or an edit was rejected
    Failed(String),
}

/// Cursor and status of the form screen.
#[derive(Debug, Default)]
pub struct FormViewState {
    pub selected: usize,
    pub status: FormStatus,
}

impl FormViewState {
    #[must_use]
    pub fn selected_field(&self) -> FieldName {
        FieldName::ALL[self.selected]
    }

    pub fn next_field(&mut self) {
        self.selected = (self.selected + 1) % FieldName::ALL.len();
    }

    pub fn prev_field(&mut self) {
        if self.selected == 0 {
            self.selected = FieldName::ALL.len() - 1;
        } else {
            self.selected -= 1;
        }
    }
}

/// Render the feature entry form.
pub fn render_form(
    f: &mut Frame,
    area: Rect,
    form: &FormController,
    view: &FormViewState,
    pending: usize,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Fields
            Constraint::Length(3), // Footer/status
        ])
        .split(area);

    render_form_header(f, chunks[0]);
    render_form_fields(f, chunks[1], form, view.selected);
    render_form_footer(f, chunks[2], view, pending);
}

fn render_form_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", ClinicalTheme::text()),
        Span::styled("New Prediction", ClinicalTheme::title()),
        Span::styled(" │ Heart Failure Features", ClinicalTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(ClinicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_form_fields(f: &mut Frame, area: Rect, form: &FormController, selected: usize) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    let mid = (FieldName::ALL.len() + 1) / 2;

    render_field_column(f, columns[0], form, &FieldName::ALL[..mid], 0, selected);
    render_field_column(f, columns[1], form, &FieldName::ALL[mid..], mid, selected);
}

fn render_field_column(
    f: &mut Frame,
    area: Rect,
    form: &FormController,
    fields: &[FieldName],
    offset: usize,
    selected: usize,
) {
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(3))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, field) in fields.iter().copied().enumerate() {
        let is_selected = offset + i == selected;
        let (border_style, title_style) = if is_selected {
            (ClinicalTheme::border_focused(), ClinicalTheme::focused())
        } else {
            (ClinicalTheme::border(), ClinicalTheme::text_secondary())
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", field.label()), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        let content = Paragraph::new(field_line(form, field, is_selected)).block(block);
        f.render_widget(content, chunks[i]);
    }
}

fn field_line(form: &FormController, field: FieldName, is_selected: bool) -> Line<'_> {
    let value = form.value(field);

    if let Some(option) = form.draft().option_label(field) {
        let arrow = |glyph: &'static str| {
            if is_selected {
                Span::styled(glyph, ClinicalTheme::cursor())
            } else {
                Span::raw(" ")
            }
        };
        return Line::from(vec![
            Span::raw(" "),
            arrow("‹ "),
            Span::styled(value, ClinicalTheme::text()),
            arrow(" ›"),
            Span::styled(format!("  {option}"), ClinicalTheme::text_muted()),
        ]);
    }

    let value_span = if value.is_empty() {
        Span::styled(field.hint(), ClinicalTheme::text_muted())
    } else {
        Span::styled(value, ClinicalTheme::text())
    };

    Line::from(vec![
        Span::raw(" "),
        value_span,
        if is_selected {
            Span::styled("▌", ClinicalTheme::cursor())
        } else {
            Span::raw("")
        },
    ])
}

fn render_form_footer(f: &mut Frame, area: Rect, view: &FormViewState, pending: usize) {
    let mut spans = match &view.status {
        FormStatus::Failed(message) => vec![
            Span::styled("! ", ClinicalTheme::danger()),
            Span::styled(message.clone(), ClinicalTheme::danger()),
            Span::raw("  "),
        ],
        FormStatus::Recorded(entry) => vec![
            Span::styled(
                format!("#{} recorded: {} ", entry.sequence_id, entry.probability_display()),
                ClinicalTheme::text_secondary(),
            ),
            Span::styled(entry.verdict(), ClinicalTheme::verdict(entry.has_disease)),
            Span::raw("  "),
        ],
        FormStatus::Ready => Vec::new(),
    };

    if pending > 0 {
        spans.push(Span::styled(
            format!("… {pending} pending  "),
            ClinicalTheme::pending(),
        ));
    }

    spans.extend([
        Span::styled("[↑↓] ", ClinicalTheme::key_hint()),
        Span::styled("Field ", ClinicalTheme::key_desc()),
        Span::styled("[←→] ", ClinicalTheme::key_hint()),
        Span::styled("Option ", ClinicalTheme::key_desc()),
        Span::styled("[Enter] ", ClinicalTheme::key_hint()),
        Span::styled("Predict ", ClinicalTheme::key_desc()),
        Span::styled("[S] ", ClinicalTheme::key_hint()),
        Span::styled("Sample ", ClinicalTheme::key_desc()),
        Span::styled("[R] ", ClinicalTheme::key_hint()),
        Span::styled("Reset ", ClinicalTheme::key_desc()),
        Span::styled("[Q] ", ClinicalTheme::key_hint()),
        Span::styled("Quit", ClinicalTheme::key_desc()),
    ]);

    let footer = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(ClinicalTheme::border()),
    );

    f.render_widget(footer, area);
}
