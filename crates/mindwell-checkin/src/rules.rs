//! Branching rule tables.
//!
//! Every branch of the check-in is a table lookup keyed by
//! `(question id, answer key)`. Answers are first normalized into an
//! [`AnswerKey`]; scale answers go through [`ScaleBucket::of`], the one
//! normalization step shared by every scale-keyed rule.

use std::collections::HashMap;
use std::sync::LazyLock;

use mindwell_core::models::answer::AnswerValue;
use mindwell_core::models::question::{Category, QuestionDefinition, QuestionKind};

/// Scale answers at or above this count as a struggling signal.
pub const STRUGGLING_SCALE_THRESHOLD: u32 = 8;

/// Choice values that count as a struggling signal.
pub const STRUGGLING_ANSWERS: [&str; 5] = ["exhausted", "overwhelmed", "down", "none", "terrible"];

/// Third question when either earlier answer signals the user is struggling.
pub const SUPPORT_QUESTION: &str = "third_support";

/// Third question otherwise.
pub const GROWTH_QUESTION: &str = "third_growth";

/// Named range of a scale answer.
///
/// `VeryLow`/`VeryHigh` are the scale endpoints, which context rules key on.
/// Follow-up rules key on `Low` (up to 4) and `High` (7 and up); endpoints
/// broaden into those when no endpoint-specific rule exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScaleBucket {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl ScaleBucket {
    pub fn of(value: u32, min: u32, max: u32) -> Self {
        if value <= min {
            ScaleBucket::VeryLow
        } else if value >= max {
            ScaleBucket::VeryHigh
        } else if value <= 4 {
            ScaleBucket::Low
        } else if value <= 6 {
            ScaleBucket::Medium
        } else {
            ScaleBucket::High
        }
    }

    pub fn broaden(self) -> Self {
        match self {
            ScaleBucket::VeryLow => ScaleBucket::Low,
            ScaleBucket::VeryHigh => ScaleBucket::High,
            other => other,
        }
    }
}

/// Normalized answer used as the second half of a rule key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnswerKey<'a> {
    Choice(&'a str),
    Boolean(bool),
    Scale(ScaleBucket),
    Text,
}

impl AnswerKey<'_> {
    fn broaden(self) -> Self {
        match self {
            AnswerKey::Scale(bucket) => AnswerKey::Scale(bucket.broaden()),
            other => other,
        }
    }
}

/// Normalize `answer` against the question it answers. Returns `None` when
/// the answer's kind does not match the question.
pub fn answer_key<'a>(question: &QuestionDefinition, answer: &'a AnswerValue) -> Option<AnswerKey<'a>> {
    match (&question.kind, answer) {
        (QuestionKind::Choice { .. }, AnswerValue::Choice(value)) => Some(AnswerKey::Choice(value)),
        (QuestionKind::Boolean { .. }, AnswerValue::Boolean(value)) => Some(AnswerKey::Boolean(*value)),
        (QuestionKind::Scale { min, max, .. }, AnswerValue::Scale(value)) => {
            Some(AnswerKey::Scale(ScaleBucket::of(*value, *min, *max)))
        }
        (QuestionKind::Text { .. }, AnswerValue::Text(_)) => Some(AnswerKey::Text),
        _ => None,
    }
}

type RuleTable = HashMap<&'static str, Vec<(AnswerKey<'static>, &'static str)>>;

fn table(rules: &[(&'static str, AnswerKey<'static>, &'static str)]) -> RuleTable {
    let mut map: RuleTable = HashMap::new();
    for &(question_id, key, next) in rules {
        map.entry(question_id).or_default().push((key, next));
    }
    map
}

/// Prior-day answer → today's opening question.
static CONTEXT_RULES: LazyLock<RuleTable> = LazyLock::new(|| {
    use AnswerKey::*;
    use ScaleBucket::*;
    table(&[
        ("personal_mood", Scale(VeryLow), "context_mood_followup"),
        ("personal_mood", Scale(VeryHigh), "context_mood_momentum"),
        ("wellness_energy", Scale(VeryLow), "context_energy_recovery"),
        ("wellness_sleep", Choice("terrible"), "context_sleep_recovery"),
        ("academic_stress", Scale(VeryHigh), "context_stress_followup"),
        ("academic_workload", Choice("overwhelmed"), "context_workload_update"),
        ("social_connection", Choice("none"), "context_connection_followup"),
        ("goals_progress", Choice("none"), "context_goal_restart"),
        ("third_support", Choice("talk_to_someone"), "context_support_followup"),
    ])
});

/// First answer → second question.
static FOLLOW_UP_RULES: LazyLock<RuleTable> = LazyLock::new(|| {
    use AnswerKey::*;
    use ScaleBucket::*;
    table(&[
        ("wellness_energy", Scale(Low), "followup_energy_low"),
        ("wellness_energy", Scale(High), "followup_energy_high"),
        ("wellness_sleep", Choice("poor"), "followup_sleep_poor"),
        ("wellness_sleep", Choice("terrible"), "followup_sleep_poor"),
        ("wellness_feeling", Choice("exhausted"), "followup_rest"),
        ("wellness_feeling", Choice("overwhelmed"), "followup_stress_source"),
        ("academic_workload", Choice("heavy"), "followup_workload"),
        ("academic_workload", Choice("overwhelmed"), "followup_workload"),
        ("academic_stress", Scale(High), "followup_stress_source"),
        ("academic_stress", Scale(Low), "followup_study_win"),
        ("academic_focus", Boolean(false), "followup_focus"),
        ("social_connection", Choice("a_little"), "followup_lonely"),
        ("social_connection", Choice("none"), "followup_lonely"),
        ("social_support", Boolean(false), "followup_support_resources"),
        ("personal_mood", Scale(Low), "followup_mood_low"),
        ("personal_mood", Scale(High), "followup_mood_high"),
        ("personal_day", Choice("down"), "followup_mood_low"),
        ("personal_day", Choice("terrible"), "followup_mood_low"),
        ("personal_day", Choice("great"), "followup_mood_high"),
        ("goals_progress", Choice("little"), "followup_goal_blocker"),
        ("goals_progress", Choice("none"), "followup_goal_blocker"),
    ])
});

/// Complementary questions per target category. Only the first entry is
/// used; later entries are alternates kept for the catalog.
static COMPLEMENTS: LazyLock<HashMap<Category, Vec<&'static str>>> = LazyLock::new(|| {
    HashMap::from([
        (Category::Academic, vec!["complement_academic_balance"]),
        (Category::Social, vec!["complement_social_plans"]),
        (Category::Wellness, vec!["complement_wellness_selfcare"]),
        (Category::Goals, vec!["complement_goals_step"]),
        (Category::Personal, vec!["complement_personal_reflection"]),
    ])
});

fn lookup(table: &RuleTable, question_id: &str, key: AnswerKey<'_>) -> Option<&'static str> {
    table
        .get(question_id)?
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, next)| *next)
}

/// Context question for a prior-day answer. Exact match only: a scale answer
/// matches only at its endpoints.
pub fn context_rule(question: &QuestionDefinition, answer: &AnswerValue) -> Option<&'static str> {
    let key = answer_key(question, answer)?;
    lookup(&CONTEXT_RULES, &question.id, key)
}

/// Follow-up question for a first answer, trying the exact key before the
/// broadened scale bucket.
pub fn follow_up_rule(question: &QuestionDefinition, answer: &AnswerValue) -> Option<&'static str> {
    let key = answer_key(question, answer)?;
    lookup(&FOLLOW_UP_RULES, &question.id, key)
        .or_else(|| lookup(&FOLLOW_UP_RULES, &question.id, key.broaden()))
}

/// Category rotation for complementary questions. Never maps a category
/// onto itself.
pub fn complementary_category(category: Category) -> Option<Category> {
    match category {
        Category::Wellness => Some(Category::Academic),
        Category::Academic => Some(Category::Social),
        Category::Social => Some(Category::Wellness),
        Category::Personal => Some(Category::Goals),
        Category::Goals => Some(Category::Personal),
        Category::Depression | Category::Anxiety | Category::Stress => None,
    }
}

/// First complementary question id for a target category.
pub fn complementary_question(category: Category) -> Option<&'static str> {
    COMPLEMENTS.get(&category)?.first().copied()
}

pub fn is_struggling(answer: &AnswerValue) -> bool {
    match answer {
        AnswerValue::Choice(value) => STRUGGLING_ANSWERS.contains(&value.as_str()),
        AnswerValue::Scale(value) => *value >= STRUGGLING_SCALE_THRESHOLD,
        AnswerValue::Boolean(_) | AnswerValue::Text(_) => false,
    }
}

/// Third question id from the first two answers.
pub fn third_question(first: &AnswerValue, second: &AnswerValue) -> &'static str {
    if is_struggling(first) || is_struggling(second) {
        SUPPORT_QUESTION
    } else {
        GROWTH_QUESTION
    }
}

/// Every question id a rule can lead to, for catalog validation.
pub fn referenced_question_ids() -> Vec<&'static str> {
    let mut ids: Vec<&'static str> = CONTEXT_RULES
        .values()
        .chain(FOLLOW_UP_RULES.values())
        .flat_map(|rules| rules.iter().map(|(_, next)| *next))
        .chain(COMPLEMENTS.values().flatten().copied())
        .chain([SUPPORT_QUESTION, GROWTH_QUESTION])
        .collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}
