use axum::extract::State;
use axum::{Extension, Json};
use mindwell_core::streak::{MoodStats, QuestionnaireStats};
use mindwell_storage::ledger;
use serde::Serialize;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Serialize)]
pub struct UserStats {
    pub questionnaire: QuestionnaireStats,
    pub mood: MoodStats,
}

pub async fn get_stats(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserStats>, ApiError> {
    let store = state.store.as_ref();
    Ok(Json(UserStats {
        questionnaire: ledger::questionnaire_stats(store, &user.user_id).await?,
        mood: ledger::mood_stats(store, &user.user_id).await?,
    }))
}
