//! Business logic services.

#![allow(missing_docs)]

pub mod choice;
pub mod poll;
pub mod result;
pub mod vote;

pub use choice::ChoiceService;
pub use poll::PollService;
pub use result::{PollResult, ResultService, Winner, tally};
pub use vote::VoteService;
