//! mindwell-instruments
//!
//! Clinical self-report instrument definitions. Pure data and arithmetic, no
//! storage dependency. Defines the items, cut-points and interpretations of
//! PHQ-9, GAD-7 and PSS-10, and scores a full 26-item submission.

pub mod catalog;
pub mod error;
pub mod instruments;
pub mod pool;
pub mod scoring;

use std::collections::HashMap;

use mindwell_core::models::clinical::{ClinicalResponse, ClinicalResult, Interpretation, SeverityBand};
use mindwell_core::models::question::{InstrumentKind, QuestionDefinition};

use scoring::ValidationError;

/// Trait implemented by each clinical instrument.
pub trait Instrument: Send + Sync {
    fn kind(&self) -> InstrumentKind;

    /// Human-readable name (e.g., "PHQ-9").
    fn name(&self) -> &str;

    /// Items in administration order.
    fn items(&self) -> &[QuestionDefinition];

    /// Highest value a single item accepts. The lowest is always 0.
    fn item_max(&self) -> u32;

    /// Map a raw score onto the instrument's severity band.
    fn band(&self, raw_score: u32) -> SeverityBand;

    fn interpretation(&self, band: SeverityBand) -> Interpretation;

    fn id(&self) -> &'static str {
        self.kind().as_str()
    }

    fn max_score(&self) -> u32 {
        self.items().len() as u32 * self.item_max()
    }

    /// Contribution of one item to the raw score. Reverse-scored items
    /// contribute `item_max - value`.
    fn contribution(&self, item: &QuestionDefinition, value: u32) -> u32 {
        let reverse = item.clinical.as_ref().is_some_and(|c| c.is_reverse);
        if reverse {
            self.item_max().saturating_sub(value)
        } else {
            value
        }
    }

    /// Score the responses that belong to this instrument.
    ///
    /// `responses` is keyed by question id. Ids of other instruments are
    /// ignored, missing items contribute nothing, and values above
    /// [`Instrument::item_max`] are skipped.
    fn score(&self, responses: &HashMap<&str, u32>) -> ClinicalResult {
        let mut raw_score = 0;
        let mut answered = Vec::new();
        let mut critical_positive = None;

        for item in self.items() {
            let Some(&value) = responses.get(item.id.as_str()) else {
                continue;
            };
            if value > self.item_max() {
                continue;
            }
            raw_score += self.contribution(item, value);
            if item.clinical.as_ref().is_some_and(|c| c.is_critical) {
                critical_positive = Some(value > 0);
            }
            answered.push(ClinicalResponse::new(item.id.clone(), value));
        }

        let severity_band = self.band(raw_score);
        let has_critical_item = self
            .items()
            .iter()
            .any(|i| i.clinical.as_ref().is_some_and(|c| c.is_critical));

        ClinicalResult {
            instrument: self.kind(),
            raw_score,
            max_score: self.max_score(),
            severity_band,
            interpretation: self.interpretation(severity_band),
            has_suicidal_ideation: has_critical_item.then(|| critical_positive.unwrap_or(false)),
            responses: answered,
        }
    }

    /// Report responses for this instrument whose value is out of range.
    fn validate_responses(&self, responses: &[ClinicalResponse]) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for response in responses {
            if let Some(item) = self.items().iter().find(|i| i.id == response.question_id)
                && response.value > self.item_max()
            {
                errors.push(ValidationError {
                    question_id: response.question_id.clone(),
                    value: response.value,
                    max: self.item_max(),
                    message: format!(
                        "{}: item '{}' value {} is outside [0, {}]",
                        self.name(),
                        item.id,
                        response.value,
                        self.item_max(),
                    ),
                });
            }
        }
        errors
    }
}

/// Return all registered instruments, in scoring order.
pub fn all_instruments() -> Vec<Box<dyn Instrument>> {
    vec![
        Box::new(instruments::phq9::Phq9),
        Box::new(instruments::gad7::Gad7),
        Box::new(instruments::pss10::Pss10),
    ]
}

/// Look up an instrument by its short id ("phq9", "gad7", "pss").
pub fn get_instrument(id: &str) -> Option<Box<dyn Instrument>> {
    all_instruments().into_iter().find(|i| i.id() == id)
}

pub fn instrument_for(kind: InstrumentKind) -> Box<dyn Instrument> {
    match kind {
        InstrumentKind::Phq9 => Box::new(instruments::phq9::Phq9),
        InstrumentKind::Gad7 => Box::new(instruments::gad7::Gad7),
        InstrumentKind::Pss10 => Box::new(instruments::pss10::Pss10),
    }
}

/// Shared helper for building interpretation records.
pub(crate) fn interpretation(title: &str, color_tag: &str, action_required: bool, urgent: bool) -> Interpretation {
    Interpretation {
        title: title.to_string(),
        color_tag: color_tag.to_string(),
        action_required,
        urgent,
    }
}
