//! Database entities.

pub mod choice;
pub mod poll;
pub mod vote;

pub use choice::Entity as Choice;
pub use poll::Entity as Poll;
pub use vote::Entity as Vote;
