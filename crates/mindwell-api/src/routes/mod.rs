pub mod assessments;
pub mod daily;
pub mod health;
pub mod instruments;
pub mod moods;
pub mod stats;

use jiff::civil::Date;
use jiff::tz::TimeZone;
use jiff::Timestamp;

/// Calendar day a request refers to: the one the client sent (its local
/// day), otherwise the current UTC day.
pub(crate) fn day_or_today(date: Option<Date>, now: Timestamp) -> Date {
    date.unwrap_or_else(|| now.to_zoned(TimeZone::UTC).date())
}
