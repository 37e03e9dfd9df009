use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// An answer to a daily question, tagged with the kind of question it answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum AnswerValue {
    Choice(String),
    Scale(u32),
    Boolean(bool),
    Text(String),
}

impl AnswerValue {
    pub fn kind_name(&self) -> &'static str {
        match self {
            AnswerValue::Choice(_) => "CHOICE",
            AnswerValue::Scale(_) => "SCALE",
            AnswerValue::Boolean(_) => "BOOLEAN",
            AnswerValue::Text(_) => "TEXT",
        }
    }

    pub fn as_choice(&self) -> Option<&str> {
        match self {
            AnswerValue::Choice(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_scale(&self) -> Option<u32> {
        match self {
            AnswerValue::Scale(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::Choice(value) | AnswerValue::Text(value) => f.write_str(value),
            AnswerValue::Scale(value) => write!(f, "{value}"),
            AnswerValue::Boolean(value) => write!(f, "{value}"),
        }
    }
}
