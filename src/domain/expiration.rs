//! Expiration arithmetic for paste records.
//!
//! Both functions are pure: the current time is always passed in by the
//! caller. Missing inputs mean "never expires", not an error.

use chrono::{Duration, NaiveDateTime};

/// Absolute expiration instant: `created_at + minutes`.
///
/// Returns `None` if either input is absent, or if the sum falls outside the
/// representable timestamp range.
pub fn expiration_time(
    created_at: Option<NaiveDateTime>,
    expiration_length_in_minutes: Option<i32>,
) -> Option<NaiveDateTime> {
    let created_at = created_at?;
    let minutes = expiration_length_in_minutes?;

    created_at.checked_add_signed(Duration::minutes(i64::from(minutes)))
}

/// Returns true iff `now` is strictly after the expiration instant.
///
/// A paste is still readable at the exact instant it expires.
pub fn is_expired(
    created_at: Option<NaiveDateTime>,
    expiration_length_in_minutes: Option<i32>,
    now: NaiveDateTime,
) -> bool {
    expiration_time(created_at, expiration_length_in_minutes).is_some_and(|at| now > at)
}

/// Whole seconds remaining until expiration, `None` when the paste never expires.
///
/// Saturates at zero for pastes already past their expiration instant.
pub fn seconds_until_expiration(
    created_at: Option<NaiveDateTime>,
    expiration_length_in_minutes: Option<i32>,
    now: NaiveDateTime,
) -> Option<u64> {
    let at = expiration_time(created_at, expiration_length_in_minutes)?;
    Some(u64::try_from((at - now).num_seconds()).unwrap_or(0))
}
