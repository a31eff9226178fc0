#![warn(missing_docs)]

//! Diffsense API - HTTP surface for the review service
//!
//! Accepts review requests (raw diff or a pull-request reference), drives
//! the diff-to-findings pipeline, and returns the ranked report. The
//! pipeline itself lives in the core crates; this crate is transport only.

pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use server::ApiServer;
pub use state::AppState;
