//! Choice repository.

use std::sync::Arc;

use crate::entities::{Choice, choice};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    SqlErr,
};
use survey_common::{AppError, AppResult, RetryPolicy};

use super::is_transient;

/// Choice repository for database operations.
#[derive(Clone)]
pub struct ChoiceRepository {
    db: Arc<DatabaseConnection>,
    retry: RetryPolicy,
}

impl ChoiceRepository {
    /// Create a new choice repository.
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

    /// Find a choice by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<choice::Model>> {
        self.retry
            .run(is_transient, || Choice::find_by_id(id).one(self.db.as_ref()))
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a choice by ID, returning error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<choice::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Choice not found: {id}")))
    }

    /// Find the choice of a poll carrying `title`, if any.
    pub async fn find_by_poll_and_title(
        &self,
        poll_id: &str,
        title: &str,
    ) -> AppResult<Option<choice::Model>> {
        self.retry
            .run(is_transient, || {
                Choice::find()
                    .filter(choice::Column::PollId.eq(poll_id))
                    .filter(choice::Column::Title.eq(title))
                    .one(self.db.as_ref())
            })
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a poll's choices in creation order.
    pub async fn find_by_poll(&self, poll_id: &str) -> AppResult<Vec<choice::Model>> {
        self.retry
            .run(is_transient, || {
                Choice::find()
                    .filter(choice::Column::PollId.eq(poll_id))
                    .order_by_asc(choice::Column::CreatedAt)
                    .order_by_asc(choice::Column::Id)
                    .all(self.db.as_ref())
            })
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List every choice.
    pub async fn find_all(&self) -> AppResult<Vec<choice::Model>> {
        self.retry
            .run(is_transient, || {
                Choice::find()
                    .order_by_asc(choice::Column::CreatedAt)
                    .order_by_asc(choice::Column::Id)
                    .all(self.db.as_ref())
            })
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new choice.
    ///
    /// The `(poll_id, title)` unique index turns a concurrent duplicate into
    /// [`AppError::Conflict`] even when both writers passed the earlier check.
    pub async fn create(&self, model: choice::ActiveModel) -> AppResult<choice::Model> {
        model.insert(self.db.as_ref()).await.map_err(|e| {
            if let Some(SqlErr::UniqueConstraintViolation(_)) = e.sql_err() {
                AppError::Conflict("Choice title already exists for this poll".to_string())
            } else {
                AppError::Database(e.to_string())
            }
        })
    }
}
