use jiff::Timestamp;
use jiff::civil::{Date, date};
use mindwell_checkin::catalog::Catalog;
use mindwell_checkin::session::DailySession;
use mindwell_core::models::answer::AnswerValue;
use mindwell_core::models::clinical::ClinicalResponse;
use mindwell_core::models::mood::MoodEntry;
use mindwell_core::models::question::{InstrumentKind, QuestionKind};
use mindwell_core::models::session::SessionRecord;
use mindwell_instruments::catalog::clinical_catalog;
use mindwell_instruments::scoring;
use mindwell_storage::documents;
use mindwell_storage::error::StorageError;
use mindwell_storage::memory::MemoryStore;
use mindwell_storage::store::{BoxFuture, Document, DocumentStore, Precondition};
use serde_json::Value;

const DAY: Date = date(2025, 3, 10);

fn at(millis: i64) -> Timestamp {
    Timestamp::from_millisecond(1_741_600_000_000 + millis).unwrap()
}

fn completed_session(user_id: &str, day: Date) -> DailySession<'static> {
    let mut session = DailySession::start(Catalog::builtin(), user_id, day, None).unwrap();
    let mut second = 0;
    while let Some(question) = session.current_question() {
        let answer = match &question.kind {
            QuestionKind::Choice { options } => AnswerValue::Choice(options[0].value.clone()),
            QuestionKind::Scale { min, .. } => AnswerValue::Scale(*min + 4),
            QuestionKind::Boolean { .. } => AnswerValue::Boolean(true),
            QuestionKind::Text { .. } => AnswerValue::Text("a walk".into()),
        };
        session.answer(answer, at(second)).unwrap();
        second += 1_000;
    }
    session
}

fn record(user_id: &str, day: Date) -> SessionRecord {
    completed_session(user_id, day).finalize(at(10_000)).unwrap()
}

#[tokio::test]
async fn session_is_saved_once_per_day() {
    let store = MemoryStore::new();
    let saved = record("u1", DAY);
    documents::save_session(&store, &saved).await.unwrap();

    // A retried save of the same record succeeds.
    documents::save_session(&store, &saved).await.unwrap();

    let loaded = documents::load_session(&store, "u1", DAY).await.unwrap();
    assert_eq!(loaded, Some(saved.clone()));

    let mut other = saved.clone();
    other.completed_at = at(99_000);
    let err = documents::save_session(&store, &other).await.unwrap_err();
    assert!(matches!(err, StorageError::AlreadyExists { .. }));
    assert!(!err.is_retryable());

    assert_eq!(documents::load_session(&store, "u1", date(2025, 3, 9)).await.unwrap(), None);
}

/// Store whose writes fail until `healthy` is flipped.
struct FlakyStore {
    inner: MemoryStore,
    healthy: std::sync::atomic::AtomicBool,
}

impl DocumentStore for FlakyStore {
    fn get_document<'a>(&'a self, collection: &'a str, key: &'a str) -> BoxFuture<'a, Result<Document, StorageError>> {
        self.inner.get_document(collection, key)
    }

    fn put_document<'a>(
        &'a self,
        collection: &'a str,
        key: &'a str,
        value: Value,
        precondition: Precondition,
    ) -> BoxFuture<'a, Result<String, StorageError>> {
        Box::pin(async move {
            if !self.healthy.load(std::sync::atomic::Ordering::SeqCst) {
                return Err(StorageError::PutObject("service unavailable".into()));
            }
            self.inner.put_document(collection, key, value, precondition).await
        })
    }

    fn list_keys<'a>(&'a self, collection: &'a str) -> BoxFuture<'a, Result<Vec<String>, StorageError>> {
        self.inner.list_keys(collection)
    }
}

#[tokio::test]
async fn store_failure_leaves_session_retryable() {
    let store = FlakyStore {
        inner: MemoryStore::new(),
        healthy: std::sync::atomic::AtomicBool::new(false),
    };
    let session = completed_session("u1", DAY);
    let total = session.total_points();

    let err = documents::save_session(&store, &session.finalize(at(10_000)).unwrap())
        .await
        .unwrap_err();
    assert!(err.is_retryable());
    assert!(session.is_complete());
    assert_eq!(session.total_points(), total);

    store.healthy.store(true, std::sync::atomic::Ordering::SeqCst);
    let retry = session.finalize(at(10_000)).unwrap();
    documents::save_session(&store, &retry).await.unwrap();
    let loaded = documents::load_session(&store, "u1", DAY).await.unwrap().unwrap();
    assert_eq!(loaded.answers.len(), 3);
    assert_eq!(loaded.total_points, total);
}

#[tokio::test]
async fn mood_entries_replace_within_a_day_and_are_validated() {
    let store = MemoryStore::new();
    let mut entry = MoodEntry {
        date: DAY,
        mood: 2,
        note: Some("long week".into()),
        created_at: at(0),
    };
    documents::save_mood(&store, "u1", &entry).await.unwrap();
    entry.mood = 4;
    entry.note = None;
    documents::save_mood(&store, "u1", &entry).await.unwrap();
    assert_eq!(documents::load_mood(&store, "u1", DAY).await.unwrap(), Some(entry.clone()));

    entry.mood = 6;
    let err = documents::save_mood(&store, "u1", &entry).await.unwrap_err();
    assert!(matches!(err, StorageError::Core(_)));
}

fn uniform_responses(value: u32) -> Vec<ClinicalResponse> {
    clinical_catalog()
        .iter()
        .map(|q| ClinicalResponse::new(q.id.clone(), value))
        .collect()
}

#[tokio::test]
async fn assessment_writes_three_siblings_and_lists_newest_first() {
    let store = MemoryStore::new();
    let older = scoring::score(&uniform_responses(1));
    let newer = scoring::score(&uniform_responses(3));

    let keys = documents::save_assessment(&store, "u1", DAY, at(0), &older).await.unwrap();
    assert_eq!(
        keys,
        [
            "phq9-2025-03-10-1741600000000",
            "gad7-2025-03-10-1741600000000",
            "pss-2025-03-10-1741600000000",
        ]
    );
    documents::save_assessment(&store, "u1", DAY, at(60_000), &newer).await.unwrap();

    // Retrying the same submission does not duplicate it.
    documents::save_assessment(&store, "u1", DAY, at(60_000), &newer).await.unwrap();

    let history = documents::list_assessments(&store, "u1").await.unwrap();
    assert_eq!(history.len(), 6);
    assert!(history[..3].iter().all(|d| d.completed_at == at(60_000)));
    assert!(history[3..].iter().all(|d| d.completed_at == at(0)));

    let phq9 = history
        .iter()
        .find(|d| d.result.instrument == InstrumentKind::Phq9 && d.completed_at == at(60_000))
        .unwrap();
    assert_eq!(phq9.result.raw_score, 27);
    assert_eq!(phq9.result.has_suicidal_ideation, Some(true));
    assert_eq!(phq9.user_id, "u1");
}

#[tokio::test]
async fn other_users_documents_are_invisible() {
    let store = MemoryStore::new();
    let scores = scoring::score(&uniform_responses(0));
    documents::save_assessment(&store, "u1", DAY, at(0), &scores).await.unwrap();
    assert!(documents::list_assessments(&store, "u2").await.unwrap().is_empty());
}
