//! Adapters layer: Concrete implementations of ports.
//!
//! - `http`: reqwest client for the remote prediction service

pub mod http;

pub use http::HttpPredictor;
