use std::collections::HashSet;

use jiff::civil::date;
use mindwell_checkin::catalog::Catalog;
use mindwell_checkin::error::CheckinError;
use mindwell_checkin::selector::{previous_context_from, select_opening_question, stable_hash};
use mindwell_core::models::answer::AnswerValue;
use mindwell_core::models::question::{Category, QuestionDefinition};
use mindwell_core::models::session::{AnsweredQuestion, PreviousContext, SessionRecord};

fn context(question_id: &str, answer: AnswerValue) -> PreviousContext {
    PreviousContext {
        question_id: question_id.to_string(),
        answer,
    }
}

#[test]
fn same_user_and_day_always_get_same_question() {
    let catalog = Catalog::builtin();
    let day = date(2025, 3, 10);
    let first = select_opening_question(catalog, "student-1", day, None).unwrap();
    for _ in 0..10 {
        let again = select_opening_question(catalog, "student-1", day, None).unwrap();
        assert_eq!(again.id, first.id);
    }
}

#[test]
fn selection_is_pinned_across_processes() {
    let catalog = Catalog::builtin();
    let pick = |user: &str, day| select_opening_question(catalog, user, day, None).unwrap().id.clone();

    assert_eq!(stable_hash("student-12025-03-10"), 287_927_108);
    assert_eq!(pick("student-1", date(2025, 3, 10)), "personal_day");
    assert_eq!(pick("student-1", date(2025, 3, 11)), "social_support");
    assert_eq!(pick("student-2", date(2025, 3, 11)), "academic_focus");
    assert_eq!(pick("alice", date(2025, 3, 10)), "goals_intention");
    assert_eq!(pick("alice", date(2025, 3, 11)), "personal_mood");
}

#[test]
fn selection_spreads_over_categories_and_questions() {
    let catalog = Catalog::builtin();
    let mut categories = HashSet::new();
    let mut questions = HashSet::new();
    let mut day = date(2025, 1, 1);
    for _ in 0..90 {
        let q = select_opening_question(catalog, "spread-user", day, None).unwrap();
        categories.insert(q.category);
        questions.insert(q.id.clone());
        day = day.tomorrow().unwrap();
    }
    assert_eq!(categories.len(), Category::DAILY.len());
    assert!(questions.len() >= 8, "only {} distinct questions", questions.len());
}

#[test]
fn every_context_rule_overrides_default_selection() {
    let catalog = Catalog::builtin();
    let cases = [
        ("personal_mood", AnswerValue::Scale(1), "context_mood_followup"),
        ("personal_mood", AnswerValue::Scale(10), "context_mood_momentum"),
        ("wellness_energy", AnswerValue::Scale(1), "context_energy_recovery"),
        ("wellness_sleep", AnswerValue::Choice("terrible".into()), "context_sleep_recovery"),
        ("academic_stress", AnswerValue::Scale(10), "context_stress_followup"),
        ("academic_workload", AnswerValue::Choice("overwhelmed".into()), "context_workload_update"),
        ("social_connection", AnswerValue::Choice("none".into()), "context_connection_followup"),
        ("goals_progress", AnswerValue::Choice("none".into()), "context_goal_restart"),
        ("third_support", AnswerValue::Choice("talk_to_someone".into()), "context_support_followup"),
    ];

    for user in ["student-1", "student-2", "alice"] {
        for (question_id, answer, expected) in &cases {
            let previous = context(question_id, answer.clone());
            let q = select_opening_question(catalog, user, date(2025, 3, 10), Some(&previous)).unwrap();
            assert_eq!(q.id, *expected, "{question_id} = {answer}");
        }
    }
}

#[test]
fn context_miss_falls_through_to_default() {
    let catalog = Catalog::builtin();
    let day = date(2025, 3, 10);
    let default = select_opening_question(catalog, "student-1", day, None).unwrap();

    let misses = [
        context("personal_mood", AnswerValue::Scale(2)),
        context("personal_mood", AnswerValue::Scale(9)),
        context("wellness_sleep", AnswerValue::Choice("great".into())),
        context("unknown_question", AnswerValue::Boolean(true)),
        context("personal_mood", AnswerValue::Choice("1".into())),
    ];
    for previous in &misses {
        let q = select_opening_question(catalog, "student-1", day, Some(previous)).unwrap();
        assert_eq!(q.id, default.id);
    }
}

fn only_goals_and_wellness() -> Vec<QuestionDefinition> {
    vec![
        QuestionDefinition::text("w", "Wellness?", Category::Wellness, "", None),
        QuestionDefinition::text("g", "Goals?", Category::Goals, "", None),
    ]
}

#[test]
fn empty_category_falls_back_to_first_wellness_question() {
    let catalog = Catalog::new(only_goals_and_wellness(), Vec::new());
    let mut day = date(2025, 1, 1);
    for _ in 0..30 {
        let q = select_opening_question(&catalog, "u", day, None).unwrap();
        assert!(q.id == "w" || q.id == "g");
        day = day.tomorrow().unwrap();
    }
}

#[test]
fn missing_wellness_fallback_is_a_misconfiguration() {
    let catalog = Catalog::new(Vec::new(), Vec::new());
    let err = select_opening_question(&catalog, "u", date(2025, 1, 1), None).unwrap_err();
    assert!(matches!(err, CheckinError::CatalogMisconfiguration(_)));
}

fn answered(catalog: &Catalog, id: &str, answer: AnswerValue) -> AnsweredQuestion {
    let question = catalog.get(id).unwrap();
    AnsweredQuestion::new(question, answer, jiff::Timestamp::UNIX_EPOCH)
}

#[test]
fn context_seed_prefers_answer_with_a_rule() {
    let catalog = Catalog::builtin();
    let record = SessionRecord {
        user_id: "u".to_string(),
        date: date(2025, 3, 10),
        answers: vec![
            answered(catalog, "personal_day", AnswerValue::Choice("down".into())),
            answered(catalog, "followup_mood_low", AnswerValue::Choice("studies".into())),
            answered(catalog, "third_support", AnswerValue::Choice("talk_to_someone".into())),
        ],
        total_points: 0,
        completed_at: jiff::Timestamp::UNIX_EPOCH,
    };
    let seed = previous_context_from(catalog, &record).unwrap();
    assert_eq!(seed.question_id, "third_support");

    let next = select_opening_question(catalog, "u", date(2025, 3, 11), Some(&seed)).unwrap();
    assert_eq!(next.id, "context_support_followup");
}

#[test]
fn context_seed_defaults_to_opening_answer() {
    let catalog = Catalog::builtin();
    let record = SessionRecord {
        user_id: "u".to_string(),
        date: date(2025, 3, 10),
        answers: vec![
            answered(catalog, "personal_mood", AnswerValue::Scale(6)),
            answered(catalog, "complement_goals_step", AnswerValue::Text("read".into())),
            answered(catalog, "third_growth", AnswerValue::Text("sleep early".into())),
        ],
        total_points: 0,
        completed_at: jiff::Timestamp::UNIX_EPOCH,
    };
    let seed = previous_context_from(catalog, &record).unwrap();
    assert_eq!(seed.question_id, "personal_mood");
    assert_eq!(seed.answer, AnswerValue::Scale(6));
}
