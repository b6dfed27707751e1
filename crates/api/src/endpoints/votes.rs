//! Vote endpoints.

use axum::{Router, extract::State, routing::get};
use serde::Serialize;
use survey_common::AppResult;
use survey_db::entities::vote;

use crate::{response::ApiResponse, state::AppState};

/// Vote response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteResponse {
    pub id: String,
    pub choice_id: String,
    pub created_at: String,
}

impl From<vote::Model> for VoteResponse {
    fn from(vote: vote::Model) -> Self {
        Self {
            id: vote.id,
            choice_id: vote.choice_id,
            created_at: vote.created_at.to_rfc3339(),
        }
    }
}

async fn list_all(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<VoteResponse>>> {
    let votes = state.vote_service.list_all().await?;
    Ok(ApiResponse::ok(votes.into_iter().map(Into::into).collect()))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/votes", get(list_all))
}
