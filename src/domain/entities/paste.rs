//! Paste entity representing stored content addressed by a shortlink.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::expiration;

/// A persisted paste record.
///
/// Immutable once created. `created_at` is a UTC civil timestamp without
/// offset, compared against a `now` in the same representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Paste {
    pub shortlink: String,
    pub expiration_length_in_minutes: Option<i32>,
    pub created_at: NaiveDateTime,
    pub paste_path: String,
}

impl Paste {
    /// Creates a new Paste instance.
    pub fn new(
        shortlink: String,
        expiration_length_in_minutes: Option<i32>,
        created_at: NaiveDateTime,
        paste_path: String,
    ) -> Self {
        Self {
            shortlink,
            expiration_length_in_minutes,
            created_at,
            paste_path,
        }
    }

    /// Returns true if the paste's expiration window has passed at `now`.
    pub fn is_expired_at(&self, now: NaiveDateTime) -> bool {
        expiration::is_expired(
            Some(self.created_at),
            self.expiration_length_in_minutes,
            now,
        )
    }

    /// Absolute expiration instant, or `None` for pastes that never expire.
    pub fn expiration_time(&self) -> Option<NaiveDateTime> {
        expiration::expiration_time(Some(self.created_at), self.expiration_length_in_minutes)
    }
}

/// Input data for persisting a new paste.
#[derive(Debug, Clone)]
pub struct NewPaste {
    pub shortlink: String,
    pub expiration_length_in_minutes: Option<i32>,
    pub created_at: NaiveDateTime,
    pub paste_path: String,
}

impl From<NewPaste> for Paste {
    fn from(new: NewPaste) -> Self {
        Paste::new(
            new.shortlink,
            new.expiration_length_in_minutes,
            new.created_at,
            new.paste_path,
        )
    }
}

/// A paste record together with its resolved content.
///
/// This is what reads return and what the cache stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasteWithContent {
    pub paste: Paste,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn created() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_paste_creation() {
        let paste = Paste::new(
            "abc1234".to_string(),
            Some(60),
            created(),
            "f00.txt".to_string(),
        );

        assert_eq!(paste.shortlink, "abc1234");
        assert_eq!(paste.expiration_length_in_minutes, Some(60));
        assert_eq!(paste.created_at, created());
        assert_eq!(paste.paste_path, "f00.txt");
    }

    #[test]
    fn test_paste_expiration_time() {
        let paste = Paste::new("abc1234".to_string(), Some(60), created(), String::new());
        assert_eq!(paste.expiration_time(), Some(created() + Duration::minutes(60)));
    }

    #[test]
    fn test_paste_is_expired_at() {
        let paste = Paste::new("abc1234".to_string(), Some(1), created(), String::new());

        assert!(!paste.is_expired_at(created()));
        assert!(!paste.is_expired_at(created() + Duration::minutes(1)));
        assert!(paste.is_expired_at(created() + Duration::seconds(61)));
    }

    #[test]
    fn test_paste_without_expiration_never_expires() {
        let paste = Paste::new("abc1234".to_string(), None, created(), String::new());

        assert!(paste.expiration_time().is_none());
        assert!(!paste.is_expired_at(created() + Duration::days(365 * 100)));
    }

    #[test]
    fn test_new_paste_into_paste() {
        let new_paste = NewPaste {
            shortlink: "xyz7890".to_string(),
            expiration_length_in_minutes: None,
            created_at: created(),
            paste_path: "key.txt".to_string(),
        };

        let paste: Paste = new_paste.into();
        assert_eq!(paste.shortlink, "xyz7890");
        assert_eq!(paste.paste_path, "key.txt");
    }
}
