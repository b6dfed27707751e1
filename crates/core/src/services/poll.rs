//! Poll service.

use chrono::{DateTime, Utc};
use sea_orm::Set;
use survey_common::{AppError, AppResult, IdGenerator};
use survey_db::{entities::poll, repositories::PollRepository};
use tracing::info;

use crate::expiration::resolve_expire_at;
use crate::validation::CreatePollInput;

/// Poll service for business logic.
#[derive(Clone)]
pub struct PollService {
    poll_repo: PollRepository,
    id_gen: IdGenerator,
}

/// Build the row for a new poll created at `now`.
#[must_use]
pub fn new_poll(id: String, input: CreatePollInput, now: DateTime<Utc>) -> poll::ActiveModel {
    poll::ActiveModel {
        id: Set(id),
        title: Set(input.title),
        expire_at: Set(resolve_expire_at(input.expire_at, now)),
        created_at: Set(now.into()),
    }
}

impl PollService {
    /// Create a new poll service.
    #[must_use]
    pub const fn new(poll_repo: PollRepository) -> Self {
        Self {
            poll_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a poll, defaulting its expiration when none is given.
    pub async fn create_poll(&self, input: CreatePollInput) -> AppResult<poll::Model> {
        let model = new_poll(self.id_gen.generate(), input, Utc::now());
        let poll = self.poll_repo.create(model).await?;

        info!(poll_id = %poll.id, expire_at = %poll.expire_at, "Poll created");
        Ok(poll)
    }

    /// List all polls.
    pub async fn list_polls(&self) -> AppResult<Vec<poll::Model>> {
        self.poll_repo.find_all().await
    }

    /// Get a poll by ID.
    pub async fn get_poll(&self, id: &str) -> AppResult<poll::Model> {
        if !IdGenerator::is_valid(id) {
            return Err(AppError::NotFound(format!("Poll not found: {id}")));
        }
        self.poll_repo.get_by_id(id).await
    }

    /// Find polls by exact title.
    pub async fn find_by_title(&self, title: &str) -> AppResult<Vec<poll::Model>> {
        self.poll_repo.find_by_title(title).await
    }
}
