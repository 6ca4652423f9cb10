//! Prediction results and session log entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Response body of `POST /predict`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Probability of heart disease (0.0 to 1.0)
    pub probability: f64,

    /// Binary classification returned by the service
    pub has_disease: bool,
}

impl PredictionResult {
    #[must_use]
    pub fn new(probability: f64, has_disease: bool) -> Self {
        Self {
            probability,
            has_disease,
        }
    }

    /// Check that the probability is a finite value in `[0, 1]`.
    ///
    /// # Errors
    /// Returns a description of the offending value.
    pub fn validate(&self) -> Result<(), String> {
        if self.probability.is_finite() && (0.0..=1.0).contains(&self.probability) {
            Ok(())
        } else {
            Err(format!(
                "probability {} outside [0, 1]",
                self.probability
            ))
        }
    }
}

/// One completed prediction, as recorded in the session log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    /// 1-based position in arrival order
    pub sequence_id: u64,

    /// Probability rounded to 3 decimal places
    pub probability: f64,

    pub has_disease: bool,

    /// When the response was recorded
    pub received_at: DateTime<Utc>,
}

impl LogEntry {
    #[must_use]
    pub fn new(sequence_id: u64, result: PredictionResult) -> Self {
        Self {
            sequence_id,
            probability: round_probability(result.probability),
            has_disease: result.has_disease,
            received_at: Utc::now(),
        }
    }

    /// Probability formatted with exactly three decimals.
    #[must_use]
    pub fn probability_display(&self) -> String {
        format!("{:.3}", self.probability)
    }

    #[must_use]
    pub fn verdict(&self) -> &'static str {
        if self.has_disease {
            "Yes"
        } else {
            "No"
        }
    }
}

/// Round half away from zero to 3 decimal places.
#[must_use]
pub fn round_probability(probability: f64) -> f64 {
    (probability * 1000.0).round() / 1000.0
}
