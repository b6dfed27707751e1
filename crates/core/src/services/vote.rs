//! Vote service.

use chrono::Utc;
use sea_orm::Set;
use survey_common::{AppError, AppResult, IdGenerator};
use survey_db::{
    entities::vote,
    repositories::{ChoiceRepository, PollRepository, VoteRepository},
};
use tracing::info;

use crate::expiration::ensure_open;

/// Vote service for business logic.
#[derive(Clone)]
pub struct VoteService {
    vote_repo: VoteRepository,
    choice_repo: ChoiceRepository,
    poll_repo: PollRepository,
    id_gen: IdGenerator,
}

impl VoteService {
    /// Create a new vote service.
    #[must_use]
    pub const fn new(
        vote_repo: VoteRepository,
        choice_repo: ChoiceRepository,
        poll_repo: PollRepository,
    ) -> Self {
        Self {
            vote_repo,
            choice_repo,
            poll_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Cast a vote for a choice whose poll is still open.
    pub async fn cast_vote(&self, choice_id: &str) -> AppResult<vote::Model> {
        if !IdGenerator::is_valid(choice_id) {
            return Err(AppError::NotFound(format!("Choice not found: {choice_id}")));
        }
        let choice = self.choice_repo.get_by_id(choice_id).await?;
        let poll = self.poll_repo.get_by_id(&choice.poll_id).await?;

        let now = Utc::now();
        ensure_open(&poll.id, &poll.expire_at, now)?;

        let model = vote::ActiveModel {
            id: Set(self.id_gen.generate()),
            choice_id: Set(choice.id),
            created_at: Set(now.into()),
        };
        let vote = self.vote_repo.create(model).await?;

        info!(vote_id = %vote.id, choice_id = %vote.choice_id, poll_id = %poll.id, "Vote cast");
        Ok(vote)
    }

    /// List every vote.
    pub async fn list_all(&self) -> AppResult<Vec<vote::Model>> {
        self.vote_repo.find_all().await
    }
}
