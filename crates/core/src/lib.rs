//! Core business logic for the survey service.
//!
//! - [`validation`]: payload shape checks for polls and choices
//! - [`expiration`]: default expiry and the open/closed rule
//! - [`services`]: poll, choice and vote stores plus result aggregation

pub mod expiration;
pub mod services;
pub mod validation;

pub use services::*;
