//! Repositories: the persistence half of the poll, choice and vote stores.

mod choice;
mod poll;
mod vote;

pub use choice::ChoiceRepository;
pub use poll::PollRepository;
pub use vote::VoteRepository;

use sea_orm::DbErr;

/// Connection-level failures are worth retrying; everything else is final.
pub(crate) const fn is_transient(err: &DbErr) -> bool {
    matches!(err, DbErr::Conn(_) | DbErr::ConnectionAcquire(_))
}
