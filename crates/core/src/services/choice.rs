//! Choice service.

use chrono::Utc;
use sea_orm::Set;
use survey_common::{AppError, AppResult, IdGenerator};
use survey_db::{
    entities::choice,
    repositories::{ChoiceRepository, PollRepository},
};
use tracing::{debug, info};
use validator::Validate;

use crate::expiration::ensure_open;
use crate::validation::CreateChoiceInput;

/// Choice service for business logic.
#[derive(Clone)]
pub struct ChoiceService {
    choice_repo: ChoiceRepository,
    poll_repo: PollRepository,
    id_gen: IdGenerator,
}

impl ChoiceService {
    /// Create a new choice service.
    #[must_use]
    pub const fn new(choice_repo: ChoiceRepository, poll_repo: PollRepository) -> Self {
        Self {
            choice_repo,
            poll_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Add a choice to a poll.
    ///
    /// Checks run in order: the poll exists, the title is non-empty, no other
    /// choice of the same poll has this title, the poll is still open.
    pub async fn create_choice(&self, input: CreateChoiceInput) -> AppResult<choice::Model> {
        if !IdGenerator::is_valid(&input.poll_id) {
            return Err(AppError::NotFound(format!("Poll not found: {}", input.poll_id)));
        }
        let poll = self.poll_repo.get_by_id(&input.poll_id).await?;

        if input.title.trim().is_empty() {
            return Err(AppError::Validation(
                "Choice title must not be empty".to_string(),
            ));
        }
        input.validate()?;

        if self
            .choice_repo
            .find_by_poll_and_title(&poll.id, &input.title)
            .await?
            .is_some()
        {
            debug!(poll_id = %poll.id, title = %input.title, "Duplicate choice title");
            return Err(AppError::Conflict(format!(
                "Choice already exists for this poll: {}",
                input.title
            )));
        }

        ensure_open(&poll.id, &poll.expire_at, Utc::now())?;

        let model = choice::ActiveModel {
            id: Set(self.id_gen.generate()),
            poll_id: Set(poll.id),
            title: Set(input.title),
            created_at: Set(Utc::now().into()),
        };
        let choice = self.choice_repo.create(model).await?;

        info!(choice_id = %choice.id, poll_id = %choice.poll_id, "Choice created");
        Ok(choice)
    }

    /// List the choices of a poll in creation order.
    pub async fn list_for_poll(&self, poll_id: &str) -> AppResult<Vec<choice::Model>> {
        if !IdGenerator::is_valid(poll_id) {
            return Err(AppError::NotFound(format!("Poll not found: {poll_id}")));
        }
        let poll = self.poll_repo.get_by_id(poll_id).await?;
        self.choice_repo.find_by_poll(&poll.id).await
    }

    /// List every choice.
    pub async fn list_all(&self) -> AppResult<Vec<choice::Model>> {
        self.choice_repo.find_all().await
    }
}
