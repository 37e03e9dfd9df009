//! Typed repositories for the per-user documents.

use jiff::Timestamp;
use jiff::civil::Date;
use mindwell_core::doc_keys;
use mindwell_core::models::clinical::{AssessmentScores, ClinicalResultDocument};
use mindwell_core::models::mood::MoodEntry;
use mindwell_core::models::session::SessionRecord;

use crate::error::StorageError;
use crate::store::{self, DocumentStore, Precondition};

/// Persist a finished check-in under its calendar day.
///
/// One session per user per day: saving the identical record again succeeds
/// (a retried completion), a different record for a day that already has
/// one fails with `AlreadyExists`.
pub async fn save_session(store: &dyn DocumentStore, record: &SessionRecord) -> Result<(), StorageError> {
    doc_keys::check_user_id(&record.user_id)?;
    let collection = doc_keys::daily_questionnaire(&record.user_id);
    store::save_once(store, &collection, &doc_keys::date_key(record.date), record).await?;
    tracing::info!(
        user_id = %record.user_id,
        date = %record.date,
        total_points = record.total_points,
        "daily session saved"
    );
    Ok(())
}

pub async fn load_session(
    store: &dyn DocumentStore,
    user_id: &str,
    date: Date,
) -> Result<Option<SessionRecord>, StorageError> {
    doc_keys::check_user_id(user_id)?;
    let collection = doc_keys::daily_questionnaire(user_id);
    store::load(store, &collection, &doc_keys::date_key(date)).await
}

/// Save a mood check-in. A second entry for the same day replaces the first.
pub async fn save_mood(store: &dyn DocumentStore, user_id: &str, entry: &MoodEntry) -> Result<(), StorageError> {
    doc_keys::check_user_id(user_id)?;
    entry.validate()?;
    let collection = doc_keys::mood_entries(user_id);
    store::save(
        store,
        &collection,
        &doc_keys::date_key(entry.date),
        entry,
        Precondition::Overwrite,
    )
    .await?;
    tracing::info!(user_id, date = %entry.date, mood = entry.mood, "mood entry saved");
    Ok(())
}

pub async fn load_mood(store: &dyn DocumentStore, user_id: &str, date: Date) -> Result<Option<MoodEntry>, StorageError> {
    doc_keys::check_user_id(user_id)?;
    store::load(store, &doc_keys::mood_entries(user_id), &doc_keys::date_key(date)).await
}

/// Save the three instrument results of one submission as sibling documents.
/// Returns their keys in PHQ-9, GAD-7, PSS order.
///
/// Results are append-only. A retry after a partial failure rewrites the
/// missing siblings and accepts the ones already stored.
pub async fn save_assessment(
    store: &dyn DocumentStore,
    user_id: &str,
    date: Date,
    completed_at: Timestamp,
    scores: &AssessmentScores,
) -> Result<Vec<String>, StorageError> {
    doc_keys::check_user_id(user_id)?;
    let collection = doc_keys::assessments(user_id);

    let mut keys = Vec::with_capacity(3);
    for result in scores.results() {
        let key = doc_keys::assessment_result(result.instrument, date, completed_at);
        let document = ClinicalResultDocument {
            user_id: user_id.to_string(),
            date,
            completed_at,
            result: result.clone(),
        };
        store::save_once(store, &collection, &key, &document).await?;
        keys.push(key);
    }

    tracing::info!(
        user_id,
        %date,
        needs_immediate_attention = scores.overall.needs_immediate_attention,
        "assessment saved"
    );
    Ok(keys)
}

/// All saved instrument results of a user, newest submission first.
pub async fn list_assessments(
    store: &dyn DocumentStore,
    user_id: &str,
) -> Result<Vec<ClinicalResultDocument>, StorageError> {
    doc_keys::check_user_id(user_id)?;
    let collection = doc_keys::assessments(user_id);

    let mut results = Vec::new();
    for key in store.list_keys(&collection).await? {
        if let Some(document) = store::load::<ClinicalResultDocument>(store, &collection, &key).await? {
            results.push(document);
        }
    }
    results.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
    Ok(results)
}
