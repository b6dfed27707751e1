//! API endpoints.

mod choices;
mod health;
mod polls;
mod votes;

use axum::Router;
use survey_common::AppError;

use crate::state::AppState;

pub use choices::ChoiceResponse;
pub use polls::PollResponse;
pub use votes::VoteResponse;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/poll", polls::router())
        .merge(choices::router())
        .merge(votes::router())
        .merge(health::router())
        .fallback(not_found)
}

async fn not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}
