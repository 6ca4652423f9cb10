//! Predictor port: Trait for the remote prediction service.
//!
//! This trait abstracts the transport (HTTP) from the submit cycle.

use std::sync::Arc;

use crate::domain::{PredictionPayload, PredictionResult};

/// Trait for scoring a feature payload.
///
/// Implementations make exactly one attempt per call. Retries, if any, are
/// the operator's decision.
pub trait Predictor: Send + Sync {
    /// Submit a payload and wait for the service's answer.
    ///
    /// # Errors
    /// - `HeartwatchError::Transport` if no response was received
    /// - `HeartwatchError::Service` for a non-success status
    /// - `HeartwatchError::ResponseFormat` if the body cannot be interpreted
    fn predict(&self, payload: &PredictionPayload) -> crate::Result<PredictionResult>;
}

impl<P> Predictor for Arc<P>
where
    P: Predictor + ?Sized,
{
    fn predict(&self, payload: &PredictionPayload) -> crate::Result<PredictionResult> {
        (**self).predict(payload)
    }
}
