//! Document collection and key conventions.
//!
//! Pure string functions with no storage dependency. These define the canonical
//! per-user layout of documents in the store.

use jiff::Timestamp;
use jiff::civil::Date;

use crate::error::CoreError;
use crate::models::question::InstrumentKind;

pub const USERS: &str = "users";

/// Reserved key in the questionnaire collection holding streak aggregates.
pub const STATS_KEY: &str = "stats";

/// Reject ids that would escape the per-user namespace.
pub fn check_user_id(user_id: &str) -> Result<(), CoreError> {
    let valid = !user_id.is_empty()
        && user_id.len() <= 128
        && user_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '@' | '|'))
        && user_id != "."
        && user_id != "..";
    if valid {
        Ok(())
    } else {
        Err(CoreError::InvalidUserId(user_id.to_string()))
    }
}

pub fn mood_entries(user_id: &str) -> String {
    format!("{USERS}/{user_id}/moods")
}

pub fn daily_questionnaire(user_id: &str) -> String {
    format!("{USERS}/{user_id}/daily_questionnaire")
}

pub fn assessments(user_id: &str) -> String {
    format!("{USERS}/{user_id}/assessments")
}

/// Calendar-day key, `YYYY-MM-DD`.
pub fn date_key(date: Date) -> String {
    date.to_string()
}

/// `{instrument}-{date}-{timestamp}`; the three results of one submission
/// share date and timestamp.
pub fn assessment_result(instrument: InstrumentKind, date: Date, completed_at: Timestamp) -> String {
    format!(
        "{}-{}-{}",
        instrument.as_str(),
        date,
        completed_at.as_millisecond()
    )
}
