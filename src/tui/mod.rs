//! TUI module: Terminal User Interface using Ratatui.
//!
//! One screen with:
//! - Feature entry form
//! - Latest result, prediction log table and probability trend

mod app;
mod styles;
mod ui;
mod worker;

pub use app::App;
pub use styles::ClinicalTheme;
pub use worker::{SubmissionEvent, SubmissionQueue};
