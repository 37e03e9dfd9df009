use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::question::InstrumentKind;

/// A single answered clinical item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ClinicalResponse {
    pub question_id: String,
    pub value: u32,
}

impl ClinicalResponse {
    pub fn new(question_id: impl Into<String>, value: u32) -> Self {
        Self {
            question_id: question_id.into(),
            value,
        }
    }
}

/// Named bucket derived from a raw score via fixed cut-points.
///
/// PHQ-9 uses minimal..severe, GAD-7 minimal..severe without
/// moderately-severe, PSS-10 uses low/moderate/high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SeverityBand {
    Minimal,
    Mild,
    Low,
    Moderate,
    ModeratelySevere,
    Severe,
    High,
}

impl SeverityBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityBand::Minimal => "minimal",
            SeverityBand::Mild => "mild",
            SeverityBand::Low => "low",
            SeverityBand::Moderate => "moderate",
            SeverityBand::ModeratelySevere => "moderately_severe",
            SeverityBand::Severe => "severe",
            SeverityBand::High => "high",
        }
    }
}

impl fmt::Display for SeverityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Interpretation {
    pub title: String,
    pub color_tag: String,
    pub action_required: bool,
    /// Only ever set for severe PHQ-9 results.
    pub urgent: bool,
}

/// Scored result for one instrument of one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ClinicalResult {
    pub instrument: InstrumentKind,
    pub raw_score: u32,
    pub max_score: u32,
    pub severity_band: SeverityBand,
    pub interpretation: Interpretation,
    /// PHQ-9 only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_suicidal_ideation: Option<bool>,
    pub responses: Vec<ClinicalResponse>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OverallAssessment {
    pub needs_immediate_attention: bool,
}

/// The three instrument results of one full-pool submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentScores {
    pub phq9: ClinicalResult,
    pub gad7: ClinicalResult,
    pub pss: ClinicalResult,
    pub overall: OverallAssessment,
}

impl AssessmentScores {
    pub fn results(&self) -> [&ClinicalResult; 3] {
        [&self.phq9, &self.gad7, &self.pss]
    }
}

/// Persisted form of a [`ClinicalResult`]. Append-only; never rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ClinicalResultDocument {
    pub user_id: String,
    pub date: jiff::civil::Date,
    pub completed_at: jiff::Timestamp,
    #[serde(flatten)]
    pub result: ClinicalResult,
}
