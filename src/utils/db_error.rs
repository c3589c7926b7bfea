//! Classification of database errors raised by paste persistence.

/// Name of the primary-key constraint on `pastes.shortlink`.
pub const SHORTLINK_CONSTRAINT: &str = "pastes_pkey";

/// Returns true if `e` is a duplicate-key rejection of a shortlink.
///
/// This is the authoritative uniqueness signal: two writers that both saw a
/// candidate as free race here, and the loser gets this error.
pub fn is_unique_violation_on_shortlink(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(SHORTLINK_CONSTRAINT))
}
