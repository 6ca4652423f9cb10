//! Background submission workers for non-blocking prediction requests.
//!
//! Each submit runs on its own thread so the TUI main loop keeps handling
//! keys while a request is outstanding. All workers report into one channel,
//! so the order events are received is the order responses arrived.

use std::collections::HashSet;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use crate::domain::{PredictionPayload, PredictionResult};
use crate::ports::Predictor;

/// Completion report from a submission worker.
#[derive(Debug)]
pub struct SubmissionEvent {
    /// Ticket handed out by [`SubmissionQueue::dispatch`]
    pub ticket: u64,
    /// Predictor outcome
    pub outcome: crate::Result<PredictionResult>,
}

/// Dispatches submissions to worker threads and collects their results.
pub struct SubmissionQueue {
    tx: Sender<SubmissionEvent>,
    rx: Receiver<SubmissionEvent>,
    next_ticket: u64,
    pending: HashSet<u64>,
}

impl Default for SubmissionQueue {
    fn default() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            tx,
            rx,
            next_ticket: 1,
            pending: HashSet::new(),
        }
    }
}

impl SubmissionQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Send `payload` to the predictor on a new thread.
    ///
    /// Returns the ticket that the matching [`SubmissionEvent`] will carry.
    pub fn dispatch(&mut self, predictor: Arc<dyn Predictor>, payload: PredictionPayload) -> u64 {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.pending.insert(ticket);

        let tx = self.tx.clone();
        thread::spawn(move || {
            tracing::debug!(ticket, "Submission worker started");
            let outcome = predictor.predict(&payload);
            // The receiver only disappears when the app is shutting down.
            let _ = tx.send(SubmissionEvent { ticket, outcome });
        });

        ticket
    }

    /// Next completed submission, if any (non-blocking).
    pub fn try_next(&mut self) -> Option<SubmissionEvent> {
        let event = self.rx.try_recv().ok()?;
        self.pending.remove(&event.ticket);
        Some(event)
    }

    /// Number of dispatched submissions that have not reported back.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FeatureDraft, FieldName};
    use crate::HeartwatchError;
    use std::time::{Duration, Instant};

    /// Predictor whose latency and answer depend on the submitted age.
    struct AgeKeyedPredictor;

    impl Predictor for AgeKeyedPredictor {
        fn predict(&self, payload: &PredictionPayload) -> crate::Result<PredictionResult> {
            match payload.age.as_str() {
                "slow" => {
                    thread::sleep(Duration::from_millis(300));
                    Ok(PredictionResult::new(0.9, true))
                }
                "fail" => Err(HeartwatchError::Transport("connection reset".into())),
                _ => Ok(PredictionResult::new(0.1, false)),
            }
        }
    }

    fn payload(age: &str) -> PredictionPayload {
        let mut draft = FeatureDraft::default();
        draft.set(FieldName::Age, age).expect("age");
        PredictionPayload::from_draft(&draft).expect("payload")
    }

    fn wait_for(queue: &mut SubmissionQueue) -> SubmissionEvent {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(event) = queue.try_next() {
                return event;
            }
            assert!(Instant::now() < deadline, "worker did not report back");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_events_follow_completion_order() {
        let predictor: Arc<dyn Predictor> = Arc::new(AgeKeyedPredictor);
        let mut queue = SubmissionQueue::new();

        let slow = queue.dispatch(predictor.clone(), payload("slow"));
        let fast = queue.dispatch(predictor, payload("40"));
        assert_eq!(queue.pending(), 2);

        let first = wait_for(&mut queue);
        let second = wait_for(&mut queue);

        assert_eq!(first.ticket, fast);
        assert_eq!(second.ticket, slow);
        assert!(matches!(second.outcome, Ok(r) if r.has_disease));
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn test_failures_are_reported() {
        let mut queue = SubmissionQueue::new();
        let ticket = queue.dispatch(Arc::new(AgeKeyedPredictor), payload("fail"));

        let event = wait_for(&mut queue);
        assert_eq!(event.ticket, ticket);
        assert!(matches!(event.outcome, Err(HeartwatchError::Transport(_))));
    }

    #[test]
    fn test_idle_queue_has_nothing() {
        let mut queue = SubmissionQueue::new();
        assert!(queue.try_next().is_none());
        assert_eq!(queue.pending(), 0);
    }
}
