use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::answer::AnswerValue;
use super::question::{Category, QuestionDefinition};

/// Number of questions in every daily check-in.
pub const SESSION_LENGTH: usize = 3;

/// One answered round of a daily check-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnsweredQuestion {
    pub question_id: String,
    pub question_text: String,
    pub category: Category,
    pub answer: AnswerValue,
    pub points: u32,
    pub answered_at: jiff::Timestamp,
}

impl AnsweredQuestion {
    pub fn new(question: &QuestionDefinition, answer: AnswerValue, answered_at: jiff::Timestamp) -> Self {
        Self {
            question_id: question.id.clone(),
            question_text: question.text.clone(),
            category: question.category,
            points: question.points_for(&answer),
            answer,
            answered_at,
        }
    }
}

/// A finished daily check-in, persisted once per (user, date).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionRecord {
    pub user_id: String,
    pub date: jiff::civil::Date,
    /// Exactly [`SESSION_LENGTH`] entries, in the order they were asked.
    pub answers: Vec<AnsweredQuestion>,
    pub total_points: u32,
    pub completed_at: jiff::Timestamp,
}

/// The prior day's question and answer, used to pick a context question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PreviousContext {
    pub question_id: String,
    pub answer: AnswerValue,
}

impl From<&AnsweredQuestion> for PreviousContext {
    fn from(record: &AnsweredQuestion) -> Self {
        Self {
            question_id: record.question_id.clone(),
            answer: record.answer.clone(),
        }
    }
}
