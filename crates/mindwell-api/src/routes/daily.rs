use axum::extract::{Query, State};
use axum::{Extension, Json};
use jiff::Timestamp;
use jiff::civil::Date;
use mindwell_checkin::selector::{previous_context_from, select_opening_question};
use mindwell_checkin::session::{DailySession, SessionState};
use mindwell_core::models::answer::AnswerValue;
use mindwell_core::models::question::QuestionDefinition;
use mindwell_core::models::session::{AnsweredQuestion, PreviousContext, SessionRecord};
use mindwell_core::streak::QuestionnaireStats;
use mindwell_storage::documents;
use mindwell_storage::ledger::{self, LedgerUpdate};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::routes::day_or_today;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct OpeningQuery {
    pub date: Option<Date>,
}

#[derive(Serialize)]
pub struct Opening {
    pub date: Date,
    pub question: &'static QuestionDefinition,
    /// Whether yesterday's answers chose the question.
    pub from_context: bool,
    /// Today's check-in is already saved.
    pub completed: bool,
}

/// Context carried over from the previous day's saved session, if any.
async fn previous_context(state: &AppState, user_id: &str, date: Date) -> Result<Option<PreviousContext>, ApiError> {
    let Ok(yesterday) = date.yesterday() else {
        return Ok(None);
    };
    let record = documents::load_session(state.store.as_ref(), user_id, yesterday).await?;
    Ok(record.and_then(|r| previous_context_from(state.catalog, &r)))
}

pub async fn get_opening(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<OpeningQuery>,
) -> Result<Json<Opening>, ApiError> {
    let date = day_or_today(query.date, Timestamp::now());
    let previous = previous_context(&state, &user.user_id, date).await?;
    let question = select_opening_question(state.catalog, &user.user_id, date, previous.as_ref())?;
    let from_context = match &previous {
        Some(_) => select_opening_question(state.catalog, &user.user_id, date, None)?.id != question.id,
        None => false,
    };
    let completed = documents::load_session(state.store.as_ref(), &user.user_id, date)
        .await?
        .is_some();

    Ok(Json(Opening {
        date,
        question,
        from_context,
        completed,
    }))
}

#[derive(Deserialize)]
pub struct SessionRequest {
    #[serde(default)]
    pub date: Option<Date>,
    /// Answers given so far, in round order.
    #[serde(default)]
    pub answers: Vec<AnswerValue>,
}

#[derive(Serialize)]
pub struct Completion {
    pub record: SessionRecord,
    pub ledger: LedgerUpdate<QuestionnaireStats>,
}

#[derive(Serialize)]
pub struct SessionView {
    pub date: Date,
    pub state: SessionState,
    /// The question to ask next; absent once complete.
    pub question: Option<&'static QuestionDefinition>,
    pub answers: Vec<AnsweredQuestion>,
    pub total_points: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion: Option<Completion>,
}

/// Advance a check-in statelessly: the client sends every answer given so
/// far and gets back the next question. The third answer completes the
/// session, which is saved and recorded in the streak ledger.
///
/// Completion is safe to retry: an already-saved session for the day is
/// returned as is, and the ledger ignores repeats for the same day.
pub async fn advance_session(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<SessionRequest>,
) -> Result<Json<SessionView>, ApiError> {
    let now = Timestamp::now();
    let date = day_or_today(body.date, now);
    let previous = previous_context(&state, &user.user_id, date).await?;
    let session = DailySession::replay(
        state.catalog,
        &user.user_id,
        date,
        previous.as_ref(),
        &body.answers,
        now,
    )?;

    let completion = if session.is_complete() {
        let store = state.store.as_ref();
        let record = match documents::load_session(store, &user.user_id, date).await? {
            Some(existing) => existing,
            None => {
                let record = session.finalize(now)?;
                documents::save_session(store, &record).await?;
                record
            }
        };
        let ledger = ledger::record_daily_completion(
            store,
            &user.user_id,
            date,
            record.total_points,
            state.max_conflict_retries(),
        )
        .await?;
        Some(Completion { record, ledger })
    } else {
        None
    };

    Ok(Json(SessionView {
        date,
        state: session.state(),
        question: session.current_question(),
        answers: session.answers().to_vec(),
        total_points: session.total_points(),
        completion,
    }))
}
