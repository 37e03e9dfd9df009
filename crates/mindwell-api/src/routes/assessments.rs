use std::collections::HashSet;

use axum::extract::State;
use axum::{Extension, Json};
use jiff::Timestamp;
use jiff::civil::Date;
use mindwell_core::models::clinical::{AssessmentScores, ClinicalResponse, ClinicalResultDocument};
use mindwell_core::models::question::QuestionDefinition;
use mindwell_instruments::catalog::clinical_catalog;
use mindwell_instruments::error::InstrumentError;
use mindwell_instruments::pool::build_shuffled_pool;
use mindwell_instruments::scoring;
use mindwell_storage::documents;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::routes::day_or_today;
use crate::state::AppState;

/// A fresh randomized ordering of all 26 clinical items.
pub async fn get_pool() -> Json<Vec<QuestionDefinition>> {
    Json(build_shuffled_pool())
}

#[derive(Deserialize)]
pub struct SubmitAssessment {
    #[serde(default)]
    pub date: Option<Date>,
    pub responses: Vec<ClinicalResponse>,
}

#[derive(Serialize)]
pub struct AssessmentSaved {
    pub scores: AssessmentScores,
    pub keys: Vec<String>,
}

/// Score a full submission and save the three instrument results.
///
/// The scorer itself tolerates partial input; a submission from the client
/// must cover every item exactly within range, or nothing is saved.
pub async fn create_assessment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<SubmitAssessment>,
) -> Result<Json<AssessmentSaved>, ApiError> {
    check_complete(&body.responses)?;

    let errors = scoring::validate_submission(&body.responses);
    if !errors.is_empty() {
        let messages: Vec<String> = errors.iter().map(|e| e.message.clone()).collect();
        return Err(ApiError::BadRequest(messages.join("; ")));
    }

    let scores = scoring::score(&body.responses);
    let completed_at = Timestamp::now();
    let date = day_or_today(body.date, completed_at);

    if scores.overall.needs_immediate_attention {
        tracing::warn!(user_id = %user.user_id, %date, "assessment flagged for immediate attention");
    }

    let keys = documents::save_assessment(state.store.as_ref(), &user.user_id, date, completed_at, &scores).await?;
    Ok(Json(AssessmentSaved { scores, keys }))
}

pub async fn list_assessments(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<ClinicalResultDocument>>, ApiError> {
    let history = documents::list_assessments(state.store.as_ref(), &user.user_id).await?;
    Ok(Json(history))
}

/// Every catalog item answered once, and nothing else.
fn check_complete(responses: &[ClinicalResponse]) -> Result<(), ApiError> {
    let catalog = clinical_catalog();
    let known: HashSet<&str> = catalog.iter().map(|q| q.id.as_str()).collect();

    let mut seen = HashSet::new();
    for response in responses {
        let id = response.question_id.as_str();
        if !known.contains(id) {
            return Err(InstrumentError::UnknownQuestion(id.to_string()).into());
        }
        if !seen.insert(id) {
            return Err(ApiError::BadRequest(format!("question '{id}' answered twice")));
        }
    }

    if seen.len() != known.len() {
        return Err(ApiError::BadRequest(format!(
            "incomplete submission: {} of {} items answered",
            seen.len(),
            known.len()
        )));
    }
    Ok(())
}
