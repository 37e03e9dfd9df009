use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

pub const MIN_MOOD: u8 = 1;
pub const MAX_MOOD: u8 = 5;

/// A single mood check-in. At most one per user per calendar day; a second
/// entry for the same day replaces the first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MoodEntry {
    pub date: jiff::civil::Date,
    /// 1 (very low) to 5 (very good).
    pub mood: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub created_at: jiff::Timestamp,
}

impl MoodEntry {
    pub fn validate(&self) -> Result<(), CoreError> {
        if !(MIN_MOOD..=MAX_MOOD).contains(&self.mood) {
            return Err(CoreError::InvalidAnswer {
                question_id: "mood".to_string(),
                reason: format!("{} is outside [{MIN_MOOD}, {MAX_MOOD}]", self.mood),
            });
        }
        Ok(())
    }
}
