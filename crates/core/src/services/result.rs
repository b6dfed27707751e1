//! Result aggregation: the leading choice of a poll.

use std::collections::HashMap;

use serde::Serialize;
use survey_common::{AppError, AppResult, IdGenerator};
use survey_db::{
    entities::{choice, vote},
    repositories::{ChoiceRepository, PollRepository, VoteRepository},
};

/// The leading choice of a poll. `title` is `None` when the poll has no choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Winner {
    pub title: Option<String>,
    pub votes: u64,
}

/// Tallied result of a poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PollResult {
    pub poll_id: String,
    pub title: String,
    pub expire_at: String,
    pub result: Winner,
}

/// Pick the choice with the most votes.
///
/// `choices` must be in creation order: on a tie the earlier choice keeps the
/// lead, since only a strictly higher count replaces it.
#[must_use]
pub fn tally(choices: &[choice::Model], votes: &[vote::Model]) -> Winner {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for vote in votes {
        *counts.entry(vote.choice_id.as_str()).or_default() += 1;
    }

    let mut leader: Option<(&choice::Model, u64)> = None;
    for choice in choices {
        let count = counts.get(choice.id.as_str()).copied().unwrap_or(0);
        if leader.is_none_or(|(_, best)| count > best) {
            leader = Some((choice, count));
        }
    }

    match leader {
        Some((choice, votes)) => Winner {
            title: Some(choice.title.clone()),
            votes,
        },
        None => Winner {
            title: None,
            votes: 0,
        },
    }
}

/// Result service: reads polls, choices and votes to report the leader.
#[derive(Clone)]
pub struct ResultService {
    poll_repo: PollRepository,
    choice_repo: ChoiceRepository,
    vote_repo: VoteRepository,
}

impl ResultService {
    /// Create a new result service.
    #[must_use]
    pub const fn new(
        poll_repo: PollRepository,
        choice_repo: ChoiceRepository,
        vote_repo: VoteRepository,
    ) -> Self {
        Self {
            poll_repo,
            choice_repo,
            vote_repo,
        }
    }

    /// Compute the current result of a poll.
    pub async fn get_result(&self, poll_id: &str) -> AppResult<PollResult> {
        if !IdGenerator::is_valid(poll_id) {
            return Err(AppError::NotFound(format!("Poll not found: {poll_id}")));
        }
        let poll = self.poll_repo.get_by_id(poll_id).await?;

        let choices = self.choice_repo.find_by_poll(&poll.id).await?;
        let choice_ids: Vec<String> = choices.iter().map(|c| c.id.clone()).collect();
        let votes = self.vote_repo.find_by_choices(&choice_ids).await?;

        let result = tally(&choices, &votes);
        tracing::debug!(
            poll_id = %poll.id,
            choices = choices.len(),
            votes = votes.len(),
            "Poll tallied"
        );

        Ok(PollResult {
            poll_id: poll.id,
            title: poll.title,
            expire_at: poll.expire_at,
            result,
        })
    }
}
