//! Service-ready request body derived from a [`FeatureDraft`].

use serde::Serialize;

use super::features::{
    ChestPainType, ExerciseAngina, FastingBloodSugar, FeatureDraft, RestingEcg, Sex, StSlope,
};

/// Error raised when a draft cannot be turned into a payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Age is required")]
    MissingAge,
}

/// Normalized body of a `POST /predict` request.
///
/// Optional measurements are `None` when the operator left them empty or
/// typed something that is not a number; they serialize as JSON `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionPayload {
    #[serde(rename = "Age")]
    pub age: String,
    #[serde(rename = "Sex")]
    pub sex: Sex,
    #[serde(rename = "ChestPainType")]
    pub chest_pain_type: ChestPainType,
    #[serde(rename = "RestingBP")]
    pub resting_bp: Option<f64>,
    #[serde(rename = "Cholesterol")]
    pub cholesterol: Option<f64>,
    #[serde(rename = "FastingBS")]
    pub fasting_bs: FastingBloodSugar,
    #[serde(rename = "RestingECG")]
    pub resting_ecg: RestingEcg,
    #[serde(rename = "MaxHR")]
    pub max_hr: Option<f64>,
    #[serde(rename = "ExerciseAngina")]
    pub exercise_angina: ExerciseAngina,
    #[serde(rename = "Oldpeak")]
    pub oldpeak: Option<f64>,
    #[serde(rename = "ST_Slope")]
    pub st_slope: StSlope,
}

impl PredictionPayload {
    /// Normalize a draft.
    ///
    /// Only an empty Age fails; every other field has a usable value.
    ///
    /// # Errors
    /// Returns `ValidationError::MissingAge` if Age is blank.
    pub fn from_draft(draft: &FeatureDraft) -> Result<Self, ValidationError> {
        let age = draft.age.trim();
        if age.is_empty() {
            return Err(ValidationError::MissingAge);
        }

        Ok(Self {
            age: age.to_string(),
            sex: draft.sex,
            chest_pain_type: draft.chest_pain_type,
            resting_bp: parse_measurement(&draft.resting_bp),
            cholesterol: parse_measurement(&draft.cholesterol),
            fasting_bs: draft.fasting_bs,
            resting_ecg: draft.resting_ecg,
            max_hr: parse_measurement(&draft.max_hr),
            exercise_angina: draft.exercise_angina,
            oldpeak: parse_measurement(&draft.oldpeak),
            st_slope: draft.st_slope,
        })
    }
}

/// Parse an optional numeric reading.
///
/// Empty text and text that is not a finite number yield `None`. Zero is a
/// reading like any other.
#[must_use]
pub fn parse_measurement(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}
