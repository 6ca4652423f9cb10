//! Prediction session: Orchestrates one submit cycle.
//!
//! This service coordinates:
//! - Payload normalization from the form
//! - The call to the prediction service
//! - Recording the result in the session log
//!
//! The cycle is split into `begin_submit` and `finish_submit` so the terminal
//! UI can run the network call on a worker thread in between.

use crate::domain::{LogEntry, PredictionPayload, PredictionResult};
use crate::ports::Predictor;
use crate::HeartwatchError;

use super::{FormController, SessionLog};

/// Form, log and predictor for a single operator session.
pub struct PredictionSession<P>
where
    P: Predictor,
{
    form: FormController,
    log: SessionLog,
    predictor: P,
    single_flight: bool,
    in_flight: usize,
}

impl<P> PredictionSession<P>
where
    P: Predictor,
{
    /// Create a session that allows overlapping submissions.
    pub fn new(predictor: P) -> Self {
        Self {
            form: FormController::new(),
            log: SessionLog::new(),
            predictor,
            single_flight: false,
            in_flight: 0,
        }
    }

    /// Reject a new submission while another is pending.
    #[must_use]
    pub fn with_single_flight(mut self, enabled: bool) -> Self {
        self.single_flight = enabled;
        self
    }

    #[must_use]
    pub fn form(&self) -> &FormController {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormController {
        &mut self.form
    }

    #[must_use]
    pub fn log(&self) -> &SessionLog {
        &self.log
    }

    #[must_use]
    pub fn predictor(&self) -> &P {
        &self.predictor
    }

    /// Number of submissions started but not yet finished.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Validate the draft and mark a submission as pending.
    ///
    /// Nothing is sent; the caller delivers the payload to the predictor and
    /// reports back through [`finish_submit`](Self::finish_submit).
    ///
    /// # Errors
    /// - `HeartwatchError::SubmissionInFlight` if single-flight is enabled and
    ///   a request is pending
    /// - `HeartwatchError::Validation` if Age is empty
    pub fn begin_submit(&mut self) -> crate::Result<PredictionPayload> {
        if self.single_flight && self.in_flight > 0 {
            return Err(HeartwatchError::SubmissionInFlight);
        }

        let payload = self.form.build_payload()?;
        self.in_flight += 1;
        Ok(payload)
    }

    /// Close a pending submission with the predictor's outcome.
    ///
    /// Successful results are appended to the log in the order this method is
    /// called. Failures leave the log and the draft untouched.
    ///
    /// # Errors
    /// Returns the predictor's error unchanged.
    pub fn finish_submit(
        &mut self,
        outcome: crate::Result<PredictionResult>,
    ) -> crate::Result<LogEntry> {
        self.in_flight = self.in_flight.saturating_sub(1);

        match outcome {
            Ok(result) => {
                let entry = self.log.append(result);
                tracing::info!(
                    sequence_id = entry.sequence_id,
                    has_disease = entry.has_disease,
                    "Prediction recorded"
                );
                Ok(entry)
            }
            Err(e) => {
                tracing::warn!("Prediction failed: {}", e);
                Err(e)
            }
        }
    }

    /// Run a full submit cycle on the calling thread.
    ///
    /// # Errors
    /// Any error from [`begin_submit`](Self::begin_submit) or the predictor.
    pub fn submit(&mut self) -> crate::Result<LogEntry> {
        let payload = self.begin_submit()?;
        let outcome = self.predictor.predict(&payload);
        self.finish_submit(outcome)
    }
}
