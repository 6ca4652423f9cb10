//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the prediction submit cycle and the session log.

mod form;
mod session;
mod session_log;

pub use form::FormController;
pub use session::PredictionSession;
pub use session_log::SessionLog;
