//! Streak and points ledger.
//!
//! The streak math lives in `mindwell_core::streak`; this module applies it
//! to the stored aggregates inside a compare-and-swap update, so two
//! check-ins racing on the same day record one completion between them.

use jiff::civil::Date;
use mindwell_core::doc_keys::{self, STATS_KEY, USERS};
use mindwell_core::streak::{MoodStats, QuestionnaireStats, StreakChange};
use serde::Serialize;

use crate::error::StorageError;
use crate::store::{self, DocumentStore};

/// Aggregate after a ledger write, and what the write did to the streak.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerUpdate<T> {
    pub stats: T,
    pub change: StreakChange,
}

/// Record a completed daily questionnaire worth `points` on `date`.
///
/// Idempotent per day: a repeat for a day already recorded returns the
/// stored streak and adds no points.
pub async fn record_daily_completion(
    store: &dyn DocumentStore,
    user_id: &str,
    date: Date,
    points: u32,
    max_retries: u32,
) -> Result<LedgerUpdate<QuestionnaireStats>, StorageError> {
    doc_keys::check_user_id(user_id)?;
    let collection = doc_keys::daily_questionnaire(user_id);
    let (stats, change) = store::update(store, &collection, STATS_KEY, max_retries, |stats: &mut QuestionnaireStats| {
        stats.record(date, points)
    })
    .await?;

    tracing::info!(user_id, %date, streak = stats.streak, ?change, "daily completion recorded");
    Ok(LedgerUpdate { stats, change })
}

/// Record a mood entry on `date` in the user aggregate document
/// (`users/{uid}`), merging the mood fields into whatever else it holds.
pub async fn record_mood(
    store: &dyn DocumentStore,
    user_id: &str,
    date: Date,
    max_retries: u32,
) -> Result<LedgerUpdate<MoodStats>, StorageError> {
    doc_keys::check_user_id(user_id)?;
    let (stats, change) = store::update(store, USERS, user_id, max_retries, |stats: &mut MoodStats| {
        stats.record(date)
    })
    .await?;

    tracing::info!(user_id, %date, mood_streak = stats.mood_streak, ?change, "mood recorded");
    Ok(LedgerUpdate { stats, change })
}

pub async fn questionnaire_stats(store: &dyn DocumentStore, user_id: &str) -> Result<QuestionnaireStats, StorageError> {
    doc_keys::check_user_id(user_id)?;
    let collection = doc_keys::daily_questionnaire(user_id);
    Ok(store::load(store, &collection, STATS_KEY).await?.unwrap_or_default())
}

pub async fn mood_stats(store: &dyn DocumentStore, user_id: &str) -> Result<MoodStats, StorageError> {
    doc_keys::check_user_id(user_id)?;
    Ok(store::load(store, USERS, user_id).await?.unwrap_or_default())
}
