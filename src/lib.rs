//! # Heartwatch
//!
//! Terminal client for a remote heart-disease prediction service.
//!
//! This crate provides:
//! - A typed feature draft and its normalization into a request payload
//! - A blocking HTTP adapter for `POST /predict`
//! - An append-only session log with table and trend-chart projections
//! - Terminal UI for entering features and following results
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types (FeatureDraft, PredictionPayload, LogEntry)
//! - `ports`: Trait definitions for external operations
//! - `adapters`: Concrete implementations (reqwest HTTP client)
//! - `application`: Form controller, session log and submit cycle
//! - `config`: Startup settings
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{FeatureDraft, FieldName, LogEntry, PredictionPayload, PredictionResult};

/// Result type for Heartwatch operations
pub type Result<T> = std::result::Result<T, HeartwatchError>;

/// Main error type for Heartwatch
#[derive(Debug, thiserror::Error)]
pub enum HeartwatchError {
    #[error("Validation failed: {0}")]
    Validation(#[from] domain::ValidationError),

    #[error(transparent)]
    Field(#[from] domain::FieldError),

    #[error("Prediction service unreachable: {0}")]
    Transport(String),

    #[error("Prediction service returned {status} {reason}")]
    Service { status: u16, reason: String },

    #[error("Malformed prediction response: {0}")]
    ResponseFormat(String),

    #[error("A prediction request is already in flight")]
    SubmissionInFlight,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
