//! Deterministic opening-question selection.
//!
//! The same (user, day) always yields the same question, across processes,
//! while different users and days spread over categories and questions.

use jiff::civil::Date;
use mindwell_core::models::question::{Category, QuestionDefinition};
use mindwell_core::models::session::{PreviousContext, SessionRecord};

use crate::catalog::Catalog;
use crate::error::CheckinError;
use crate::rules;

/// Polynomial string hash (multiplier 31) over UTF-16 code units, folded into
/// a signed 32-bit integer, absolute value taken.
///
/// The fold and the UTF-16 iteration make the value match the hash the web
/// client computes for the same string.
pub fn stable_hash(input: &str) -> u32 {
    let mut hash: i32 = 0;
    for unit in input.encode_utf16() {
        hash = hash.wrapping_mul(31).wrapping_add(i32::from(unit));
    }
    hash.unsigned_abs()
}

/// Pick today's opening question.
///
/// A matching context rule for `previous` wins. Otherwise the category is
/// `hash % 5` and the question within it `(hash / 5) % len`, where `hash` is
/// [`stable_hash`] of `user_id` followed by the `YYYY-MM-DD` date.
pub fn select_opening_question<'c>(
    catalog: &'c Catalog,
    user_id: &str,
    date: Date,
    previous: Option<&PreviousContext>,
) -> Result<&'c QuestionDefinition, CheckinError> {
    if let Some(question) = previous.and_then(|ctx| context_question(catalog, ctx)) {
        tracing::debug!(user_id, %date, question_id = %question.id, "selected context question");
        return Ok(question);
    }

    let hash = stable_hash(&format!("{user_id}{date}"));
    let categories = Category::DAILY;
    let category = categories[hash as usize % categories.len()];
    let questions = catalog.list_by_category(category);

    if questions.is_empty() {
        tracing::error!(%category, "daily category has no questions; falling back to wellness");
        return catalog
            .list_by_category(Category::Wellness)
            .first()
            .copied()
            .ok_or_else(|| {
                CheckinError::CatalogMisconfiguration(format!(
                    "no questions in '{category}' and no wellness fallback"
                ))
            });
    }

    let index = (hash as usize / categories.len()) % questions.len();
    let question = questions[index];
    tracing::debug!(user_id, %date, %category, question_id = %question.id, "selected daily question");
    Ok(question)
}

/// Resolve the context rule for a prior-day answer. A miss is not an error;
/// the caller falls through to deterministic selection.
fn context_question<'c>(catalog: &'c Catalog, previous: &PreviousContext) -> Option<&'c QuestionDefinition> {
    let asked = catalog.get(&previous.question_id)?;
    let target = rules::context_rule(asked, &previous.answer)?;
    let question = catalog.get(target);
    if question.is_none() {
        tracing::warn!(question_id = target, "context rule points at a missing question");
    }
    question
}

/// Derive the next day's context from a finished session: the first answer
/// that has a context rule, otherwise the opening answer.
pub fn previous_context_from(catalog: &Catalog, record: &SessionRecord) -> Option<PreviousContext> {
    record
        .answers
        .iter()
        .find(|a| {
            catalog
                .get(&a.question_id)
                .and_then(|q| rules::context_rule(q, &a.answer))
                .is_some()
        })
        .or_else(|| record.answers.first())
        .map(PreviousContext::from)
}
