//! Poll repository.

use std::sync::Arc;

use crate::entities::{Poll, poll};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use survey_common::{AppError, AppResult, RetryPolicy};

use super::is_transient;

/// Poll repository for database operations.
#[derive(Clone)]
pub struct PollRepository {
    db: Arc<DatabaseConnection>,
    retry: RetryPolicy,
}

impl PollRepository {
    /// Create a new poll repository.
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

    /// Find a poll by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<poll::Model>> {
        self.retry
            .run(is_transient, || Poll::find_by_id(id).one(self.db.as_ref()))
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a poll by ID, returning error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<poll::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Poll not found: {id}")))
    }

    /// List every poll in creation order.
    pub async fn find_all(&self) -> AppResult<Vec<poll::Model>> {
        self.retry
            .run(is_transient, || {
                Poll::find()
                    .order_by_asc(poll::Column::CreatedAt)
                    .order_by_asc(poll::Column::Id)
                    .all(self.db.as_ref())
            })
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find polls with exactly this title.
    pub async fn find_by_title(&self, title: &str) -> AppResult<Vec<poll::Model>> {
        self.retry
            .run(is_transient, || {
                Poll::find()
                    .filter(poll::Column::Title.eq(title))
                    .order_by_asc(poll::Column::CreatedAt)
                    .order_by_asc(poll::Column::Id)
                    .all(self.db.as_ref())
            })
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new poll.
    pub async fn create(&self, model: poll::ActiveModel) -> AppResult<poll::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
