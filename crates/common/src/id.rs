//! ID generation utilities.

use std::sync::Mutex;

use ulid::{Generator, Ulid};

/// Process-wide generator so IDs minted in the same millisecond still sort
/// in the order they were created.
static MONOTONIC: Mutex<Generator> = Mutex::new(Generator::new());

/// ID generator for polls, choices and votes.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    _private: (),
}

impl IdGenerator {
    /// Create a new ID generator.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }

    /// Generate a new ULID-based ID.
    ///
    /// IDs from one process are strictly increasing, including within the
    /// same millisecond. If the random part overflows inside a millisecond
    /// the ID falls back to a fresh, unordered ULID.
    #[must_use]
    pub fn generate(&self) -> String {
        let ulid = MONOTONIC
            .lock()
            .ok()
            .and_then(|mut generator| generator.generate().ok())
            .unwrap_or_else(Ulid::new);
        ulid.to_string().to_lowercase()
    }

    /// Whether `id` has the shape of an ID this generator produces.
    #[must_use]
    pub fn is_valid(id: &str) -> bool {
        id.len() == 26 && Ulid::from_string(&id.to_uppercase()).is_ok()
    }
}
