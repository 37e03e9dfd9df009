use std::collections::HashMap;

use mindwell_core::models::clinical::{AssessmentScores, ClinicalResponse, OverallAssessment};
use mindwell_core::models::question::InstrumentKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::instrument_for;

/// An out-of-range response reported by [`crate::Instrument::validate_responses`].
#[derive(Debug, Clone, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{message}")]
pub struct ValidationError {
    pub question_id: String,
    pub value: u32,
    pub max: u32,
    pub message: String,
}

/// Score a full submission into the three instrument results.
///
/// Pure: identical responses always yield identical scores. Responses are
/// partitioned by the instrument their question id belongs to; unknown ids
/// are skipped. When an id appears more than once the last value wins.
pub fn score(responses: &[ClinicalResponse]) -> AssessmentScores {
    let by_id: HashMap<&str, u32> = responses
        .iter()
        .map(|r| (r.question_id.as_str(), r.value))
        .collect();

    let phq9 = instrument_for(InstrumentKind::Phq9).score(&by_id);
    let gad7 = instrument_for(InstrumentKind::Gad7).score(&by_id);
    let pss = instrument_for(InstrumentKind::Pss10).score(&by_id);

    let overall = OverallAssessment {
        needs_immediate_attention: phq9.has_suicidal_ideation.unwrap_or(false),
    };

    AssessmentScores {
        phq9,
        gad7,
        pss,
        overall,
    }
}

/// Collect out-of-range values across all instruments.
pub fn validate_submission(responses: &[ClinicalResponse]) -> Vec<ValidationError> {
    InstrumentKind::ALL
        .iter()
        .flat_map(|kind| instrument_for(*kind).validate_responses(responses))
        .collect()
}
