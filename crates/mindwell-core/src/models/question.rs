use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::answer::AnswerValue;
use crate::error::CoreError;

/// Points awarded for a `true` boolean answer when the question declares none.
pub const DEFAULT_TRUE_POINTS: u32 = 5;
/// Points awarded for a `false` boolean answer when the question declares none.
pub const DEFAULT_FALSE_POINTS: u32 = 2;
/// Flat points for any non-empty text answer when the question declares none.
pub const DEFAULT_TEXT_POINTS: u32 = 5;

/// Question grouping. The first five are daily check-in categories, the
/// last three are the symptom areas of the clinical instruments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Category {
    Wellness,
    Academic,
    Social,
    Personal,
    Goals,
    #[serde(rename = "Depression")]
    Depression,
    #[serde(rename = "Anxiety")]
    Anxiety,
    #[serde(rename = "Stress")]
    Stress,
}

impl Category {
    /// Daily categories in selection order. The selector hashes into this list,
    /// so reordering it changes every user's daily question.
    pub const DAILY: [Category; 5] = [
        Category::Wellness,
        Category::Academic,
        Category::Social,
        Category::Personal,
        Category::Goals,
    ];

    /// Symptom areas, one per clinical instrument.
    pub const CLINICAL: [Category; 3] = [Category::Depression, Category::Anxiety, Category::Stress];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Wellness => "wellness",
            Category::Academic => "academic",
            Category::Social => "social",
            Category::Personal => "personal",
            Category::Goals => "goals",
            Category::Depression => "Depression",
            Category::Anxiety => "Anxiety",
            Category::Stress => "Stress",
        }
    }

    pub fn is_daily(&self) -> bool {
        Self::DAILY.contains(self)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three standardized self-report instruments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum InstrumentKind {
    #[serde(rename = "phq9")]
    Phq9,
    #[serde(rename = "gad7")]
    Gad7,
    #[serde(rename = "pss")]
    Pss10,
}

impl InstrumentKind {
    pub const ALL: [InstrumentKind; 3] = [InstrumentKind::Phq9, InstrumentKind::Gad7, InstrumentKind::Pss10];

    /// Short id used in document keys and response partitioning.
    pub fn as_str(&self) -> &'static str {
        match self {
            InstrumentKind::Phq9 => "phq9",
            InstrumentKind::Gad7 => "gad7",
            InstrumentKind::Pss10 => "pss",
        }
    }
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
    pub points: u32,
}

/// Type-specific payload of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum QuestionKind {
    Choice {
        options: Vec<ChoiceOption>,
    },
    Scale {
        min: u32,
        max: u32,
        min_label: String,
        max_label: String,
    },
    Boolean {
        true_label: String,
        false_label: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        true_points: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        false_points: Option<u32>,
    },
    Text {
        placeholder: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        points: Option<u32>,
    },
}

impl QuestionKind {
    pub fn name(&self) -> &'static str {
        match self {
            QuestionKind::Choice { .. } => "CHOICE",
            QuestionKind::Scale { .. } => "SCALE",
            QuestionKind::Boolean { .. } => "BOOLEAN",
            QuestionKind::Text { .. } => "TEXT",
        }
    }
}

/// Fields only present on clinical instrument items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ClinicalFields {
    pub instrument: InstrumentKind,
    /// Symptom dimension, e.g. "anhedonia" or "suicidal_ideation".
    pub domain: String,
    /// Marks the self-harm item.
    #[serde(default)]
    pub is_critical: bool,
    /// PSS items phrased positively; scored as `4 - value`.
    #[serde(default)]
    pub is_reverse: bool,
}

/// Immutable catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuestionDefinition {
    pub id: String,
    pub text: String,
    pub category: Category,
    pub kind: QuestionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clinical: Option<ClinicalFields>,
}

impl QuestionDefinition {
    pub fn choice(id: &str, text: &str, category: Category, options: &[(&str, &str, u32)]) -> Self {
        Self {
            id: id.to_string(),
            text: text.to_string(),
            category,
            kind: QuestionKind::Choice {
                options: options
                    .iter()
                    .map(|(value, label, points)| ChoiceOption {
                        value: value.to_string(),
                        label: label.to_string(),
                        points: *points,
                    })
                    .collect(),
            },
            clinical: None,
        }
    }

    pub fn scale(
        id: &str,
        text: &str,
        category: Category,
        (min, max): (u32, u32),
        (min_label, max_label): (&str, &str),
    ) -> Self {
        Self {
            id: id.to_string(),
            text: text.to_string(),
            category,
            kind: QuestionKind::Scale {
                min,
                max,
                min_label: min_label.to_string(),
                max_label: max_label.to_string(),
            },
            clinical: None,
        }
    }

    pub fn boolean(
        id: &str,
        text: &str,
        category: Category,
        (true_label, false_label): (&str, &str),
        points: Option<(u32, u32)>,
    ) -> Self {
        Self {
            id: id.to_string(),
            text: text.to_string(),
            category,
            kind: QuestionKind::Boolean {
                true_label: true_label.to_string(),
                false_label: false_label.to_string(),
                true_points: points.map(|(t, _)| t),
                false_points: points.map(|(_, f)| f),
            },
            clinical: None,
        }
    }

    pub fn text(id: &str, text: &str, category: Category, placeholder: &str, points: Option<u32>) -> Self {
        Self {
            id: id.to_string(),
            text: text.to_string(),
            category,
            kind: QuestionKind::Text {
                placeholder: placeholder.to_string(),
                points,
            },
            clinical: None,
        }
    }

    pub fn with_clinical(mut self, clinical: ClinicalFields) -> Self {
        self.clinical = Some(clinical);
        self
    }

    pub fn instrument(&self) -> Option<InstrumentKind> {
        self.clinical.as_ref().map(|c| c.instrument)
    }

    /// Points awarded for `answer`.
    ///
    /// CHOICE pays the matching option's points (0 when nothing matches),
    /// SCALE pays `max(1, ceil(v / 2))`, BOOLEAN pays the declared points for
    /// the outcome, TEXT pays a flat amount regardless of content. An answer of
    /// the wrong kind earns nothing.
    pub fn points_for(&self, answer: &AnswerValue) -> u32 {
        match (&self.kind, answer) {
            (QuestionKind::Choice { options }, AnswerValue::Choice(value)) => options
                .iter()
                .find(|o| &o.value == value)
                .map(|o| o.points)
                .unwrap_or(0),
            (QuestionKind::Scale { .. }, AnswerValue::Scale(value)) => value.div_ceil(2).max(1),
            (
                QuestionKind::Boolean {
                    true_points,
                    false_points,
                    ..
                },
                AnswerValue::Boolean(value),
            ) => {
                if *value {
                    true_points.unwrap_or(DEFAULT_TRUE_POINTS)
                } else {
                    false_points.unwrap_or(DEFAULT_FALSE_POINTS)
                }
            }
            (QuestionKind::Text { points, .. }, AnswerValue::Text(_)) => {
                points.unwrap_or(DEFAULT_TEXT_POINTS)
            }
            _ => 0,
        }
    }

    /// Reject answers that must not advance a session: wrong kind, empty
    /// choice or text, a choice value that matches no option, or a scale
    /// value outside `[min, max]`.
    pub fn validate_answer(&self, answer: &AnswerValue) -> Result<(), CoreError> {
        let reject = |reason: String| CoreError::InvalidAnswer {
            question_id: self.id.clone(),
            reason,
        };

        match (&self.kind, answer) {
            (QuestionKind::Choice { options }, AnswerValue::Choice(value)) => {
                if value.trim().is_empty() {
                    return Err(reject("empty choice".to_string()));
                }
                if !options.iter().any(|o| &o.value == value) {
                    return Err(reject(format!("'{value}' is not one of the offered options")));
                }
            }
            (QuestionKind::Scale { min, max, .. }, AnswerValue::Scale(value)) => {
                if value < min || value > max {
                    return Err(reject(format!("{value} is outside [{min}, {max}]")));
                }
            }
            (QuestionKind::Boolean { .. }, AnswerValue::Boolean(_)) => {}
            (QuestionKind::Text { .. }, AnswerValue::Text(value)) => {
                if value.trim().is_empty() {
                    return Err(reject("empty text".to_string()));
                }
            }
            (kind, answer) => {
                return Err(reject(format!(
                    "expected a {} answer, got {}",
                    kind.name(),
                    answer.kind_name()
                )));
            }
        }
        Ok(())
    }
}
