use axum::Json;
use axum::extract::Path;
use mindwell_core::models::question::QuestionDefinition;
use mindwell_instruments::error::InstrumentError;
use mindwell_instruments::{all_instruments, get_instrument};
use serde::Serialize;

use crate::error::ApiError;

#[derive(Serialize)]
pub struct InstrumentSummary {
    id: String,
    name: String,
    item_count: usize,
    max_score: u32,
}

#[derive(Serialize)]
pub struct InstrumentDetail {
    id: String,
    name: String,
    max_score: u32,
    items: Vec<QuestionDefinition>,
}

pub async fn list_instruments() -> Json<Vec<InstrumentSummary>> {
    let instruments = all_instruments()
        .iter()
        .map(|i| InstrumentSummary {
            id: i.id().to_string(),
            name: i.name().to_string(),
            item_count: i.items().len(),
            max_score: i.max_score(),
        })
        .collect();
    Json(instruments)
}

pub async fn get_instrument_detail(Path(id): Path<String>) -> Result<Json<InstrumentDetail>, ApiError> {
    let instrument = get_instrument(&id).ok_or(InstrumentError::UnknownInstrument(id))?;

    Ok(Json(InstrumentDetail {
        id: instrument.id().to_string(),
        name: instrument.name().to_string(),
        max_score: instrument.max_score(),
        items: instrument.items().to_vec(),
    }))
}
