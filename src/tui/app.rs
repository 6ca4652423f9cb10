//! Main TUI application state machine.
//!
//! Handles:
//! - Input event handling
//! - Form editing and submission
//! - Collecting worker results into the session log

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use zeroize::Zeroize;

use crate::adapters::HttpPredictor;
use crate::application::PredictionSession;
use crate::config::Settings;
use crate::ports::Predictor;

use super::ui::{
    form::{render_form, FormStatus, FormViewState},
    log::render_log,
    render_disclaimer,
};
use super::worker::SubmissionQueue;

/// Main application state
pub struct App {
    /// Form, log and predictor
    session: PredictionSession<Arc<dyn Predictor>>,

    /// Requests currently running on worker threads
    queue: SubmissionQueue,

    /// Form cursor and status line
    form_view: FormViewState,

    /// Prediction endpoint, shown in the footer
    endpoint: String,

    /// Whether the app should quit
    should_quit: bool,
}

impl App {
    /// Create an application talking to the configured HTTP endpoint.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be initialized.
    pub fn new(settings: &Settings) -> Result<Self> {
        let predictor = HttpPredictor::new(settings)?;
        let endpoint = predictor.endpoint().to_string();
        tracing::info!(endpoint = %endpoint, "Using prediction service");

        Ok(Self::with_predictor(
            Arc::new(predictor),
            endpoint,
            settings.single_flight,
        ))
    }

    /// Create an application with an injected predictor.
    pub fn with_predictor(
        predictor: Arc<dyn Predictor>,
        endpoint: impl Into<String>,
        single_flight: bool,
    ) -> Self {
        Self {
            session: PredictionSession::new(predictor).with_single_flight(single_flight),
            queue: SubmissionQueue::new(),
            form_view: FormViewState::default(),
            endpoint: endpoint.into(),
            should_quit: false,
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            self.poll_submissions();

            terminal.draw(|f| {
                let rows = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(3)])
                    .split(f.area());

                let columns = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                    .split(rows[0]);

                let pending = self.queue.pending();
                render_form(f, columns[0], self.session.form(), &self.form_view, pending);
                render_log(f, columns[1], self.session.log(), pending);
                render_disclaimer(f, rows[1], &self.endpoint);
            })?;

            // Short poll so worker results show up promptly.
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        if self.queue.pending() > 0 {
            tracing::info!(
                pending = self.queue.pending(),
                "Exiting with requests still in flight"
            );
        }

        Ok(())
    }

    /// Move finished requests into the log, in the order they completed.
    fn poll_submissions(&mut self) {
        while let Some(event) = self.queue.try_next() {
            tracing::debug!(ticket = event.ticket, "Submission finished");
            self.form_view.status = match self.session.finish_submit(event.outcome) {
                Ok(entry) => FormStatus::Recorded(entry),
                Err(e) => FormStatus::Failed(e.to_string()),
            };
        }
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key, KeyCode::Char('q') | KeyCode::Char('c'))
        {
            self.should_quit = true;
            return;
        }

        let field = self.form_view.selected_field();

        match key {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Up | KeyCode::BackTab => self.form_view.prev_field(),
            KeyCode::Down | KeyCode::Tab => self.form_view.next_field(),
            KeyCode::Left => self.session.form_mut().cycle(field, false),
            KeyCode::Right => self.session.form_mut().cycle(field, true),
            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.session.form_mut().load_sample();
                self.form_view.status = FormStatus::Ready;
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.session.form_mut().reset();
                self.form_view = FormViewState::default();
            }
            KeyCode::Char(c) if field.is_text() && (c.is_ascii_digit() || c == '.' || c == '-') => {
                self.edit_text(|value| value.push(c));
            }
            KeyCode::Backspace if field.is_text() => {
                self.edit_text(|value| {
                    value.pop();
                });
            }
            KeyCode::Delete if field.is_text() => self.edit_text(|value| value.zeroize()),
            KeyCode::Enter => self.submit(),
            _ => {}
        }
    }

    /// Apply an edit to the selected text field through the form controller.
    fn edit_text(&mut self, edit: impl FnOnce(&mut String)) {
        let field = self.form_view.selected_field();
        self.session.form_mut().edit_text(field, edit);
    }

    fn submit(&mut self) {
        match self.session.begin_submit() {
            Ok(payload) => {
                let predictor = self.session.predictor().clone();
                let ticket = self.queue.dispatch(predictor, payload);
                tracing::info!(ticket, "Prediction submitted");
                self.form_view.status = FormStatus::Ready;
            }
            Err(e) => {
                tracing::info!("Submission rejected: {}", e);
                self.form_view.status = FormStatus::Failed(e.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FieldName, PredictionPayload, PredictionResult};
    use crate::HeartwatchError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Instant;

    struct CountingPredictor {
        calls: AtomicUsize,
        fail: bool,
    }

    impl Predictor for CountingPredictor {
        fn predict(&self, _payload: &PredictionPayload) -> crate::Result<PredictionResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(HeartwatchError::Service {
                    status: 500,
                    reason: "Internal Server Error".into(),
                })
            } else {
                Ok(PredictionResult::new(0.8421, true))
            }
        }
    }

    fn app(fail: bool) -> (App, Arc<CountingPredictor>) {
        let predictor = Arc::new(CountingPredictor {
            calls: AtomicUsize::new(0),
            fail,
        });
        let app = App::with_predictor(predictor.clone(), "http://test/predict", false);
        (app, predictor)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(KeyCode::Char(c), KeyModifiers::NONE);
        }
    }

    fn settle(app: &mut App) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while app.queue.pending() > 0 {
            assert!(Instant::now() < deadline, "submission never completed");
            std::thread::sleep(Duration::from_millis(5));
            app.poll_submissions();
        }
    }

    #[test]
    fn test_typing_and_submitting_records_entry() {
        let (mut app, predictor) = app(false);
        type_text(&mut app, "55");
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        settle(&mut app);

        assert_eq!(predictor.calls.load(Ordering::SeqCst), 1);
        assert_eq!(app.session.log().len(), 1);
        assert!(matches!(app.form_view.status, FormStatus::Recorded(ref e) if e.sequence_id == 1));
        // Draft is kept for the next submission.
        assert_eq!(app.session.form().value(FieldName::Age), "55");
    }

    #[test]
    fn test_empty_age_is_rejected_before_dispatch() {
        let (mut app, predictor) = app(false);
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);

        assert_eq!(app.queue.pending(), 0);
        assert_eq!(predictor.calls.load(Ordering::SeqCst), 0);
        assert!(matches!(app.form_view.status, FormStatus::Failed(_)));
        assert!(app.session.log().is_empty());
    }

    #[test]
    fn test_service_failure_leaves_log_empty() {
        let (mut app, _predictor) = app(true);
        app.handle_key(KeyCode::Char('s'), KeyModifiers::NONE);
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        settle(&mut app);

        assert!(app.session.log().is_empty());
        match &app.form_view.status {
            FormStatus::Failed(message) => assert!(message.contains("500")),
            other => panic!("expected failure status, got {other:?}"),
        }
        assert_eq!(app.session.form().value(FieldName::Age), "54");
    }

    #[test]
    fn test_choice_fields_cycle_and_ignore_typing() {
        let (mut app, _predictor) = app(false);
        app.handle_key(KeyCode::Down, KeyModifiers::NONE);
        assert_eq!(app.form_view.selected_field(), FieldName::Sex);

        app.handle_key(KeyCode::Right, KeyModifiers::NONE);
        assert_eq!(app.session.form().value(FieldName::Sex), "F");

        type_text(&mut app, "12");
        assert_eq!(app.session.form().value(FieldName::Sex), "F");
    }

    #[test]
    fn test_backspace_and_delete_edit_selected_field() {
        let (mut app, _predictor) = app(false);
        type_text(&mut app, "612");
        app.handle_key(KeyCode::Backspace, KeyModifiers::NONE);
        assert_eq!(app.session.form().value(FieldName::Age), "61");

        app.handle_key(KeyCode::Delete, KeyModifiers::NONE);
        assert_eq!(app.session.form().value(FieldName::Age), "");
    }

    #[test]
    fn test_quit_keys() {
        let (mut app, _predictor) = app(false);
        app.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
    }
}
