//! Choice endpoints.

use axum::{
    Router,
    extract::{Path, State},
    routing::{get, post},
};
use serde::Serialize;
use survey_common::AppResult;
use survey_core::validation::CreateChoiceInput;
use survey_db::entities::choice;

use super::votes::VoteResponse;
use crate::{extractors::Payload, response::ApiResponse, state::AppState};

/// Choice response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceResponse {
    pub id: String,
    pub title: String,
    pub poll_id: String,
}

impl From<choice::Model> for ChoiceResponse {
    fn from(choice: choice::Model) -> Self {
        Self {
            id: choice.id,
            title: choice.title,
            poll_id: choice.poll_id,
        }
    }
}

/// Create a choice for the poll named by `pollId` in the body.
async fn create_choice(
    State(state): State<AppState>,
    Payload(payload): Payload,
) -> AppResult<ApiResponse<ChoiceResponse>> {
    let input = CreateChoiceInput::from_payload(payload)?;
    let choice = state.choice_service.create_choice(input).await?;
    Ok(ApiResponse::created(choice.into()))
}

/// Vote for a choice.
async fn vote(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<VoteResponse>> {
    let vote = state.vote_service.cast_vote(&id).await?;
    Ok(ApiResponse::created(vote.into()))
}

/// Dump every choice.
async fn list_all(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<ChoiceResponse>>> {
    let choices = state.choice_service.list_all().await?;
    Ok(ApiResponse::ok(choices.into_iter().map(Into::into).collect()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/choice", post(create_choice))
        .route("/choice/{id}/vote", post(vote))
        .route("/choices", get(list_all))
}
