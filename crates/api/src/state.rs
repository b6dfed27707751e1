//! Application state.

#![allow(missing_docs)]

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use survey_common::RetryPolicy;
use survey_core::{ChoiceService, PollService, ResultService, VoteService};
use survey_db::repositories::{ChoiceRepository, PollRepository, VoteRepository};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub poll_service: PollService,
    pub choice_service: ChoiceService,
    pub vote_service: VoteService,
    pub result_service: ResultService,
}

impl AppState {
    /// Wire repositories and services around one shared connection.
    #[must_use]
    pub fn from_connection(db: Arc<DatabaseConnection>, retry: RetryPolicy) -> Self {
        let poll_repo = PollRepository::new(Arc::clone(&db)).with_retry(retry.clone());
        let choice_repo = ChoiceRepository::new(Arc::clone(&db)).with_retry(retry.clone());
        let vote_repo = VoteRepository::new(Arc::clone(&db)).with_retry(retry);

        Self {
            poll_service: PollService::new(poll_repo.clone()),
            choice_service: ChoiceService::new(choice_repo.clone(), poll_repo.clone()),
            vote_service: VoteService::new(
                vote_repo.clone(),
                choice_repo.clone(),
                poll_repo.clone(),
            ),
            result_service: ResultService::new(poll_repo, choice_repo, vote_repo),
        }
    }
}
