//! The three-round branching check-in.
//!
//! Round 1 asks the opening question, round 2 a follow-up chosen from the
//! first answer (or a complementary question from another category), round 3
//! a support or growth question chosen from the first two answers.

use jiff::Timestamp;
use jiff::civil::Date;
use mindwell_core::models::answer::AnswerValue;
use mindwell_core::models::question::QuestionDefinition;
use mindwell_core::models::session::{AnsweredQuestion, PreviousContext, SESSION_LENGTH, SessionRecord};
use serde::Serialize;

use crate::catalog::Catalog;
use crate::error::CheckinError;
use crate::rules;
use crate::selector::select_opening_question;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Round1,
    Round2,
    Round3,
    Complete,
}

/// In-memory state of one user's check-in for one day.
///
/// Single writer by construction. Nothing here is persisted until
/// [`DailySession::finalize`] produces a [`SessionRecord`], and finalizing
/// does not consume the session, so a failed save can be retried.
#[derive(Debug, Clone)]
pub struct DailySession<'c> {
    catalog: &'c Catalog,
    user_id: String,
    date: Date,
    asked: Vec<&'c QuestionDefinition>,
    answers: Vec<AnsweredQuestion>,
    current: Option<&'c QuestionDefinition>,
    prefill: Option<AnswerValue>,
    total_points: u32,
}

impl<'c> DailySession<'c> {
    /// Open a session on today's opening question.
    pub fn start(
        catalog: &'c Catalog,
        user_id: &str,
        date: Date,
        previous: Option<&PreviousContext>,
    ) -> Result<Self, CheckinError> {
        let opening = select_opening_question(catalog, user_id, date, previous)?;
        Ok(Self {
            catalog,
            user_id: user_id.to_string(),
            date,
            asked: Vec::with_capacity(SESSION_LENGTH),
            answers: Vec::with_capacity(SESSION_LENGTH),
            current: Some(opening),
            prefill: None,
            total_points: 0,
        })
    }

    /// Rebuild a session by answering `answers` in order. Used by stateless
    /// callers that keep the answer list client-side.
    pub fn replay(
        catalog: &'c Catalog,
        user_id: &str,
        date: Date,
        previous: Option<&PreviousContext>,
        answers: &[AnswerValue],
        answered_at: Timestamp,
    ) -> Result<Self, CheckinError> {
        let mut session = Self::start(catalog, user_id, date, previous)?;
        for answer in answers {
            session.answer(answer.clone(), answered_at)?;
        }
        Ok(session)
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn date(&self) -> Date {
        self.date
    }

    pub fn state(&self) -> SessionState {
        match (self.current, self.answers.len()) {
            (None, _) => SessionState::Complete,
            (Some(_), 0) => SessionState::Round1,
            (Some(_), 1) => SessionState::Round2,
            (Some(_), _) => SessionState::Round3,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.current.is_none()
    }

    /// The question awaiting an answer, `None` once complete.
    pub fn current_question(&self) -> Option<&'c QuestionDefinition> {
        self.current
    }

    /// Answer to pre-fill after stepping back.
    pub fn prefilled_answer(&self) -> Option<&AnswerValue> {
        self.prefill.as_ref()
    }

    pub fn answers(&self) -> &[AnsweredQuestion] {
        &self.answers
    }

    pub fn total_points(&self) -> u32 {
        self.total_points
    }

    /// Answer the current question and move to the next round.
    ///
    /// The next question is resolved before anything is recorded, so a
    /// rejected answer or a catalog defect leaves the session untouched.
    pub fn answer(&mut self, answer: AnswerValue, answered_at: Timestamp) -> Result<SessionState, CheckinError> {
        let question = self.current.ok_or(CheckinError::SessionComplete)?;
        question.validate_answer(&answer)?;

        let next = match self.answers.len() {
            0 => Some(self.follow_up(question, &answer)?),
            1 => Some(self.third(&self.answers[0].answer, &answer)?),
            _ => None,
        };

        let record = AnsweredQuestion::new(question, answer, answered_at);
        self.total_points += record.points;
        self.asked.push(question);
        self.answers.push(record);
        self.current = next;
        self.prefill = None;
        Ok(self.state())
    }

    /// Step back one round, returning the answer previously given so it can
    /// be pre-filled. No-op in round 1 and once complete.
    pub fn back(&mut self) -> Option<&AnswerValue> {
        if self.answers.is_empty() || self.is_complete() {
            return None;
        }
        let (Some(question), Some(record)) = (self.asked.pop(), self.answers.pop()) else {
            return None;
        };
        self.total_points -= record.points;
        self.current = Some(question);
        self.prefill = Some(record.answer);
        self.prefill.as_ref()
    }

    /// The persisted form of a completed session.
    pub fn finalize(&self, completed_at: Timestamp) -> Result<SessionRecord, CheckinError> {
        if !self.is_complete() {
            return Err(CheckinError::SessionIncomplete {
                answered: self.answers.len(),
            });
        }
        Ok(SessionRecord {
            user_id: self.user_id.clone(),
            date: self.date,
            answers: self.answers.clone(),
            total_points: self.total_points,
            completed_at,
        })
    }

    fn follow_up(
        &self,
        question: &QuestionDefinition,
        answer: &AnswerValue,
    ) -> Result<&'c QuestionDefinition, CheckinError> {
        if let Some(id) = rules::follow_up_rule(question, answer) {
            match self.catalog.get(id) {
                Some(next) => return Ok(next),
                None => tracing::warn!(question_id = id, "follow-up rule points at a missing question"),
            }
        }
        self.complementary(question)
    }

    /// Complementary question from the rotated category: the first entry of
    /// its complement list, or failing that its first opener.
    fn complementary(&self, question: &QuestionDefinition) -> Result<&'c QuestionDefinition, CheckinError> {
        let target = rules::complementary_category(question.category).ok_or_else(|| {
            CheckinError::CatalogMisconfiguration(format!(
                "no complementary category for '{}'",
                question.category
            ))
        })?;

        rules::complementary_question(target)
            .and_then(|id| self.catalog.get(id))
            .or_else(|| self.catalog.list_by_category(target).first().copied())
            .ok_or_else(|| {
                CheckinError::CatalogMisconfiguration(format!("no complementary question for '{target}'"))
            })
    }

    fn third(&self, first: &AnswerValue, second: &AnswerValue) -> Result<&'c QuestionDefinition, CheckinError> {
        let id = rules::third_question(first, second);
        self.catalog.get(id).ok_or_else(|| {
            CheckinError::CatalogMisconfiguration(format!("third question '{id}' is not in the catalog"))
        })
    }
}
