//! Common utilities and shared types for the survey service.
//!
//! This crate provides foundational components used across all survey crates:
//!
//! - **Configuration**: Application settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//! - **ID Generation**: ULID-based unique identifiers via [`IdGenerator`]
//! - **Retry**: Exponential backoff for transient store failures via [`RetryPolicy`]
//!
//! # Example
//!
//! ```no_run
//! use survey_common::{Config, IdGenerator, AppResult};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     let id_gen = IdGenerator::new();
//!     let id = id_gen.generate();
//!     println!("Generated ID: {} for {}", id, config.database.url);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod id;
pub mod retry;

pub use config::Config;
pub use error::{AppError, AppResult, FieldViolation};
pub use id::IdGenerator;
pub use retry::RetryPolicy;
