//! HTTP API layer for the survey service.
//!
//! This crate maps HTTP requests onto the core services:
//!
//! - **Endpoints**: polls, choices, votes, results, health
//! - **Extractors**: JSON payloads whose rejections become validation errors
//! - **State**: the services shared by every handler
//!
//! Built on Axum 0.8.

pub mod endpoints;
pub mod extractors;
pub mod response;
pub mod state;

pub use endpoints::router;
pub use state::AppState;
