//! Domain layer: Core types of a prediction session.
//!
//! Plain data with strict parsing; no I/O happens here.

mod features;
mod payload;
mod prediction;

pub use features::{
    ChestPainType, Choice, ExerciseAngina, FastingBloodSugar, FeatureDraft, FieldError, FieldName,
    RestingEcg, Sex, StSlope,
};
pub use payload::{parse_measurement, PredictionPayload, ValidationError};
pub use prediction::{round_probability, LogEntry, PredictionResult};
