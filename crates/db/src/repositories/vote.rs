//! Vote repository.

use std::sync::Arc;

use crate::entities::{Vote, vote};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use survey_common::{AppError, AppResult, RetryPolicy};

use super::is_transient;

/// Vote repository for database operations.
#[derive(Clone)]
pub struct VoteRepository {
    db: Arc<DatabaseConnection>,
    retry: RetryPolicy,
}

impl VoteRepository {
    /// Create a new vote repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            db,
            retry: RetryPolicy::none(),
        }
    }

    /// Retry reads that fail at the connection level.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Create a new vote.
    pub async fn create(&self, model: vote::ActiveModel) -> AppResult<vote::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get every vote cast for any of `choice_ids`.
    pub async fn find_by_choices(&self, choice_ids: &[String]) -> AppResult<Vec<vote::Model>> {
        if choice_ids.is_empty() {
            return Ok(Vec::new());
        }

        self.retry
            .run(is_transient, || {
                Vote::find()
                    .filter(vote::Column::ChoiceId.is_in(choice_ids.iter().cloned()))
                    .all(self.db.as_ref())
            })
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List every vote.
    pub async fn find_all(&self) -> AppResult<Vec<vote::Model>> {
        self.retry
            .run(is_transient, || {
                Vote::find()
                    .order_by_asc(vote::Column::CreatedAt)
                    .order_by_asc(vote::Column::Id)
                    .all(self.db.as_ref())
            })
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
