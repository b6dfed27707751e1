//! Poll endpoints.

use axum::{
    Router,
    extract::{Path, Query, State},
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use survey_common::{AppError, AppResult, FieldViolation};
use survey_core::{PollResult, validation::CreateChoiceInput, validation::CreatePollInput};
use survey_db::entities::poll;

use super::choices::ChoiceResponse;
use crate::{extractors::Payload, response::ApiResponse, state::AppState};

/// Poll response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PollResponse {
    pub id: String,
    pub title: String,
    pub expire_at: String,
}

impl From<poll::Model> for PollResponse {
    fn from(poll: poll::Model) -> Self {
        Self {
            id: poll.id,
            title: poll.title,
            expire_at: poll.expire_at,
        }
    }
}

/// List polls query.
#[derive(Debug, Deserialize)]
pub struct ListPollsQuery {
    pub title: Option<String>,
}

/// Create a poll.
async fn create_poll(
    State(state): State<AppState>,
    Payload(payload): Payload,
) -> AppResult<ApiResponse<PollResponse>> {
    let input = CreatePollInput::from_payload(payload)?;
    let poll = state.poll_service.create_poll(input).await?;
    Ok(ApiResponse::created(poll.into()))
}

/// List polls, optionally filtered by exact title.
async fn list_polls(
    State(state): State<AppState>,
    Query(query): Query<ListPollsQuery>,
) -> AppResult<ApiResponse<Vec<PollResponse>>> {
    let polls = match query.title {
        Some(title) => state.poll_service.find_by_title(&title).await?,
        None => state.poll_service.list_polls().await?,
    };
    Ok(ApiResponse::ok(polls.into_iter().map(Into::into).collect()))
}

/// Get a poll.
async fn show_poll(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<PollResponse>> {
    let poll = state.poll_service.get_poll(&id).await?;
    Ok(ApiResponse::ok(poll.into()))
}

/// Add a choice to the poll named in the path.
async fn create_choice(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Payload(payload): Payload,
) -> AppResult<ApiResponse<ChoiceResponse>> {
    let Value::Object(mut fields) = payload else {
        return Err(AppError::InvalidFields(vec![FieldViolation::new(
            "body",
            "must be an object",
        )]));
    };
    fields.insert("pollId".to_string(), Value::String(id));
    let payload = Value::Object(fields);

    let input = CreateChoiceInput::from_payload(payload)?;
    let choice = state.choice_service.create_choice(input).await?;
    Ok(ApiResponse::created(choice.into()))
}

/// List the choices of a poll.
async fn list_choices(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Vec<ChoiceResponse>>> {
    let choices = state.choice_service.list_for_poll(&id).await?;
    Ok(ApiResponse::ok(choices.into_iter().map(Into::into).collect()))
}

/// Get the leading choice of a poll.
async fn show_result(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<PollResult>> {
    let result = state.result_service.get_result(&id).await?;
    Ok(ApiResponse::ok(result))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_polls).post(create_poll))
        .route("/{id}", get(show_poll))
        .route("/{id}/choice", get(list_choices).post(create_choice))
        .route("/{id}/result", get(show_result))
}
