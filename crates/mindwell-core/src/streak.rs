//! Calendar-day streak math.
//!
//! Pure functions over the stored aggregates. The storage ledger wraps these
//! in a compare-and-swap loop so concurrent check-ins for the same day cannot
//! double-increment.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// What recording a completion on a given day did to the streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum StreakChange {
    /// Already recorded for this day; nothing changed.
    Unchanged,
    /// Previous completion was the day before.
    Incremented,
    /// First completion ever, or a gap of two days or more.
    Reset,
}

impl StreakChange {
    pub fn is_new_day(&self) -> bool {
        !matches!(self, StreakChange::Unchanged)
    }
}

/// Decide the next streak value given the last completed day.
///
/// Any `last` other than `today` or the day before resets, including a
/// `last` that lies after `today`.
pub fn advance(current: u32, last: Option<Date>, today: Date) -> (u32, StreakChange) {
    let Some(last) = last else {
        return (1, StreakChange::Reset);
    };
    if last == today {
        return (current, StreakChange::Unchanged);
    }
    match today.yesterday() {
        Ok(yesterday) if yesterday == last => (current.saturating_add(1), StreakChange::Incremented),
        _ => (1, StreakChange::Reset),
    }
}

/// Per-user daily-questionnaire aggregate, stored under the reserved
/// `stats` key of the questionnaire collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuestionnaireStats {
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub last_completed_date: Option<Date>,
    #[serde(default)]
    pub total_points: u64,
    #[serde(default)]
    pub total_sessions: u64,
}

impl QuestionnaireStats {
    /// Apply a completion worth `points`. Points and session count only move
    /// on the first completion of a day.
    pub fn record(&mut self, today: Date, points: u32) -> StreakChange {
        let (streak, change) = advance(self.streak, self.last_completed_date, today);
        if change.is_new_day() {
            self.streak = streak;
            self.last_completed_date = Some(today);
            self.total_points += u64::from(points);
            self.total_sessions += 1;
        }
        change
    }
}

/// Mood fields of the user aggregate document.
///
/// The user document is shared with other writers and keeps its camelCase
/// field names (`moodStreak`, `lastMoodDate`, `totalMoodEntries`). Documents
/// owned only by this crate, such as [`QuestionnaireStats`], use snake_case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MoodStats {
    #[serde(default)]
    pub mood_streak: u32,
    #[serde(default)]
    pub last_mood_date: Option<Date>,
    #[serde(default)]
    pub total_mood_entries: u64,
}

impl MoodStats {
    pub fn record(&mut self, today: Date) -> StreakChange {
        let (streak, change) = advance(self.mood_streak, self.last_mood_date, today);
        if change.is_new_day() {
            self.mood_streak = streak;
            self.last_mood_date = Some(today);
            self.total_mood_entries += 1;
        }
        change
    }
}
