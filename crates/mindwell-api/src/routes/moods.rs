use axum::extract::State;
use axum::{Extension, Json};
use jiff::Timestamp;
use jiff::civil::Date;
use mindwell_core::models::mood::MoodEntry;
use mindwell_core::streak::MoodStats;
use mindwell_storage::documents;
use mindwell_storage::ledger::{self, LedgerUpdate};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::routes::day_or_today;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct NewMood {
    #[serde(default)]
    pub date: Option<Date>,
    pub mood: u8,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Serialize)]
pub struct MoodSaved {
    pub entry: MoodEntry,
    pub ledger: LedgerUpdate<MoodStats>,
}

pub async fn create_mood(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<NewMood>,
) -> Result<Json<MoodSaved>, ApiError> {
    let now = Timestamp::now();
    let entry = MoodEntry {
        date: day_or_today(body.date, now),
        mood: body.mood,
        note: body.note.filter(|n| !n.trim().is_empty()),
        created_at: now,
    };
    entry.validate()?;

    let store = state.store.as_ref();
    documents::save_mood(store, &user.user_id, &entry).await?;
    let ledger = ledger::record_mood(store, &user.user_id, entry.date, state.max_conflict_retries()).await?;
    Ok(Json(MoodSaved { entry, ledger }))
}
