//! Poll expiration policy.
//!
//! A poll is open while its `expire_at` lies strictly in the future. Stored
//! values that cannot be parsed count as closed.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use survey_common::{AppError, AppResult};

/// How long a poll stays open when no expiration is supplied.
pub const DEFAULT_LIFETIME_DAYS: i64 = 30;

/// Minute-granularity format used for defaulted expirations.
pub const EXPIRE_AT_FORMAT: &str = "%Y-%m-%d %H:%M";

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
];

/// Whether a poll accepts new choices and votes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Open,
    Closed,
}

/// Expiration for a poll created at `now` without an explicit one.
#[must_use]
pub fn default_expire_at(now: DateTime<Utc>) -> String {
    (now + Duration::days(DEFAULT_LIFETIME_DAYS))
        .format(EXPIRE_AT_FORMAT)
        .to_string()
}

/// The supplied expiration, or the default for `now`.
#[must_use]
pub fn resolve_expire_at(supplied: Option<String>, now: DateTime<Utc>) -> String {
    supplied.unwrap_or_else(|| default_expire_at(now))
}

/// Parse an expiration timestamp. Values without an offset are UTC.
#[must_use]
pub fn parse_expire_at(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// State of a poll expiring at `expire_at`, evaluated at `now`.
#[must_use]
pub fn state(expire_at: &str, now: DateTime<Utc>) -> PollState {
    match parse_expire_at(expire_at) {
        Some(expires) if expires > now => PollState::Open,
        _ => PollState::Closed,
    }
}

/// Shorthand for `state(..) == PollState::Open`.
#[must_use]
pub fn is_open(expire_at: &str, now: DateTime<Utc>) -> bool {
    state(expire_at, now) == PollState::Open
}

/// Fail with [`AppError::Forbidden`] unless the poll is open.
pub fn ensure_open(poll_id: &str, expire_at: &str, now: DateTime<Utc>) -> AppResult<()> {
    if is_open(expire_at, now) {
        Ok(())
    } else {
        tracing::debug!(poll_id, expire_at, "Rejected operation on expired poll");
        Err(AppError::Forbidden(format!("Poll expired: {poll_id}")))
    }
}
