use jiff::Timestamp;
use jiff::civil::{Date, date};
use mindwell_checkin::catalog::Catalog;
use mindwell_checkin::error::CheckinError;
use mindwell_checkin::rules::{GROWTH_QUESTION, SUPPORT_QUESTION};
use mindwell_checkin::session::{DailySession, SessionState};
use mindwell_core::models::answer::AnswerValue;
use mindwell_core::models::question::{QuestionDefinition, QuestionKind};
use mindwell_core::models::session::PreviousContext;

const DAY: Date = date(2025, 3, 10);

fn at(seconds: i64) -> Timestamp {
    Timestamp::from_second(1_741_600_000 + seconds).unwrap()
}

/// Find a user whose opening question on `DAY` is `question_id`.
fn user_opening_with(question_id: &str) -> String {
    (0..10_000)
        .map(|n| format!("user-{n}"))
        .find(|user| {
            DailySession::start(Catalog::builtin(), user, DAY, None)
                .unwrap()
                .current_question()
                .is_some_and(|q| q.id == question_id)
        })
        .unwrap()
}

fn start(question_id: &str) -> DailySession<'static> {
    DailySession::start(Catalog::builtin(), &user_opening_with(question_id), DAY, None).unwrap()
}

fn choice(value: &str) -> AnswerValue {
    AnswerValue::Choice(value.to_string())
}

fn current_id(session: &DailySession<'_>) -> String {
    session.current_question().unwrap().id.clone()
}

#[test]
fn low_mood_branches_to_follow_up_then_growth() {
    let mut session = start("personal_mood");
    assert_eq!(session.state(), SessionState::Round1);

    assert_eq!(session.answer(AnswerValue::Scale(3), at(0)).unwrap(), SessionState::Round2);
    assert_eq!(current_id(&session), "followup_mood_low");

    assert_eq!(session.answer(choice("studies"), at(1)).unwrap(), SessionState::Round3);
    assert_eq!(current_id(&session), GROWTH_QUESTION);

    assert_eq!(
        session.answer(AnswerValue::Text("start early".into()), at(2)).unwrap(),
        SessionState::Complete
    );
    assert_eq!(session.total_points(), 2 + 5 + 5);
    assert!(session.current_question().is_none());
}

#[test]
fn high_scale_answer_counts_as_struggling() {
    let mut session = start("personal_mood");
    session.answer(AnswerValue::Scale(9), at(0)).unwrap();
    assert_eq!(current_id(&session), "followup_mood_high");
    session.answer(AnswerValue::Text("saw friends".into()), at(1)).unwrap();
    assert_eq!(current_id(&session), SUPPORT_QUESTION);
}

#[test]
fn struggling_literal_in_second_answer_selects_support() {
    let mut session = start("personal_day");
    session.answer(choice("okay"), at(0)).unwrap();
    // No follow-up rule for "okay": personal rotates to goals.
    assert_eq!(current_id(&session), "complement_goals_step");
    session.answer(AnswerValue::Text("none".into()), at(1)).unwrap();
    assert_eq!(current_id(&session), GROWTH_QUESTION);

    let mut session = start("personal_day");
    session.answer(choice("down"), at(0)).unwrap();
    assert_eq!(current_id(&session), "followup_mood_low");
    session.answer(choice("family"), at(1)).unwrap();
    assert_eq!(current_id(&session), SUPPORT_QUESTION);
}

#[test]
fn complementary_question_comes_from_another_category() {
    let mut session = start("personal_gratitude");
    let first = session.current_question().unwrap().category;
    session.answer(AnswerValue::Text("my roommate".into()), at(0)).unwrap();
    let second = session.current_question().unwrap();
    assert_eq!(second.id, "complement_goals_step");
    assert_ne!(second.category, first);

    let mut session = start("wellness_energy");
    session.answer(AnswerValue::Scale(5), at(0)).unwrap();
    let second = session.current_question().unwrap();
    assert_eq!(second.id, "complement_academic_balance");
    assert_ne!(second.category, session.answers()[0].category);
}

#[test]
fn back_then_same_answer_restores_identical_state() {
    let straight = {
        let mut s = start("personal_day");
        s.answer(choice("down"), at(0)).unwrap();
        s.answer(choice("family"), at(1)).unwrap();
        s
    };

    let mut session = start("personal_day");
    session.answer(choice("down"), at(0)).unwrap();
    let after_first = session.total_points();
    session.answer(choice("family"), at(1)).unwrap();

    // Round 3 -> back to round 2.
    assert_eq!(session.back(), Some(&choice("family")));
    assert_eq!(session.state(), SessionState::Round2);
    assert_eq!(current_id(&session), "followup_mood_low");
    assert_eq!(session.total_points(), after_first);
    assert_eq!(session.prefilled_answer(), Some(&choice("family")));

    // Round 2 -> back to round 1.
    assert_eq!(session.back(), Some(&choice("down")));
    assert_eq!(session.state(), SessionState::Round1);
    assert_eq!(session.total_points(), 0);

    session.answer(choice("down"), at(0)).unwrap();
    assert!(session.prefilled_answer().is_none());
    session.answer(choice("family"), at(1)).unwrap();

    assert_eq!(session.total_points(), straight.total_points());
    assert_eq!(session.answers(), straight.answers());
    assert_eq!(current_id(&session), current_id(&straight));
}

#[test]
fn back_is_a_no_op_in_round_one_and_after_completion() {
    let mut session = start("personal_mood");
    assert_eq!(session.back(), None);
    assert_eq!(session.state(), SessionState::Round1);

    session.answer(AnswerValue::Scale(5), at(0)).unwrap();
    assert_eq!(current_id(&session), "complement_goals_step");
    session.answer(AnswerValue::Text("read a chapter".into()), at(1)).unwrap();
    session.answer(AnswerValue::Text("x".into()), at(2)).unwrap();
    let total = session.total_points();
    assert_eq!(session.back(), None);
    assert!(session.is_complete());
    assert_eq!(session.total_points(), total);
}

#[test]
fn invalid_answers_do_not_advance() {
    let mut session = start("personal_day");
    let err = session.answer(choice(""), at(0)).unwrap_err();
    assert!(matches!(err, CheckinError::InvalidAnswer(_)));
    let err = session.answer(AnswerValue::Scale(4), at(0)).unwrap_err();
    assert!(matches!(err, CheckinError::InvalidAnswer(_)));
    assert_eq!(session.state(), SessionState::Round1);
    assert!(session.answers().is_empty());

    let mut session = start("personal_mood");
    assert!(session.answer(AnswerValue::Scale(11), at(0)).is_err());
    assert!(session.answer(AnswerValue::Scale(0), at(0)).is_err());
    assert_eq!(session.total_points(), 0);
}

#[test]
fn choice_outside_the_offered_options_is_rejected() {
    let mut session = start("wellness_sleep");
    // A struggling literal the question never offers must not reach the branching rules.
    let err = session.answer(choice("overwhelmed"), at(0)).unwrap_err();
    assert!(matches!(err, CheckinError::InvalidAnswer(_)));
    assert_eq!(session.state(), SessionState::Round1);
    assert_eq!(current_id(&session), "wellness_sleep");
    assert!(session.answers().is_empty());
    assert_eq!(session.total_points(), 0);

    assert_eq!(session.answer(choice("terrible"), at(0)).unwrap(), SessionState::Round2);
    assert_eq!(current_id(&session), "followup_sleep_poor");
}

#[test]
fn finalize_requires_completion_and_is_repeatable() {
    let mut session = start("academic_focus");
    session.answer(AnswerValue::Boolean(false), at(0)).unwrap();
    assert_eq!(current_id(&session), "followup_focus");
    assert!(matches!(
        session.finalize(at(10)),
        Err(CheckinError::SessionIncomplete { answered: 1 })
    ));

    session.answer(choice("phone"), at(1)).unwrap();
    session.answer(AnswerValue::Text("library".into()), at(2)).unwrap();

    let first = session.finalize(at(10)).unwrap();
    let retry = session.finalize(at(10)).unwrap();
    assert_eq!(first, retry);
    assert_eq!(first.answers.len(), 3);
    assert_eq!(first.total_points, 3 + 5 + 5);
    assert_eq!(first.date, DAY);

    assert!(matches!(
        session.answer(choice("again"), at(3)),
        Err(CheckinError::SessionComplete)
    ));
}

#[test]
fn replay_matches_interactive_session() {
    let user = user_opening_with("goals_intention");
    let answers = [
        AnswerValue::Text("finish lab".into()),
        AnswerValue::Scale(8),
        AnswerValue::Choice("rest".into()),
    ];
    let replayed = DailySession::replay(Catalog::builtin(), &user, DAY, None, &answers, at(0)).unwrap();

    let mut manual = DailySession::start(Catalog::builtin(), &user, DAY, None).unwrap();
    for answer in &answers {
        manual.answer(answer.clone(), at(0)).unwrap();
    }
    assert!(replayed.is_complete());
    assert_eq!(replayed.answers(), manual.answers());
    // complement_personal_reflection answered 8 -> support question.
    assert_eq!(replayed.answers()[2].question_id, SUPPORT_QUESTION);
}

#[test]
fn context_question_opens_the_session() {
    let previous = PreviousContext {
        question_id: "personal_mood".to_string(),
        answer: AnswerValue::Scale(1),
    };
    let session = DailySession::start(Catalog::builtin(), "anyone", DAY, Some(&previous)).unwrap();
    assert_eq!(current_id(&session), "context_mood_followup");
}

fn some_valid_answer(question: &QuestionDefinition, variant: usize) -> AnswerValue {
    match &question.kind {
        QuestionKind::Choice { options } => AnswerValue::Choice(options[variant % options.len()].value.clone()),
        QuestionKind::Scale { min, max, .. } => AnswerValue::Scale(min + (variant as u32 % (max - min + 1))),
        QuestionKind::Boolean { .. } => AnswerValue::Boolean(variant % 2 == 0),
        QuestionKind::Text { .. } => AnswerValue::Text(format!("answer {variant}")),
    }
}

#[test]
fn every_completed_session_has_three_answers_and_summed_points() {
    for n in 0..200 {
        let user = format!("student-{n}");
        let mut session = DailySession::start(Catalog::builtin(), &user, DAY, None).unwrap();
        let mut expected = 0;
        let mut round = 0;
        while let Some(question) = session.current_question() {
            let answer = some_valid_answer(question, n + round);
            expected += question.points_for(&answer);
            session.answer(answer, at(round as i64)).unwrap();
            round += 1;
        }
        let record = session.finalize(at(60)).unwrap();
        assert_eq!(record.answers.len(), 3, "{user}");
        assert_eq!(record.total_points, expected, "{user}");
        assert_eq!(record.total_points, record.answers.iter().map(|a| a.points).sum::<u32>());
        assert_ne!(record.answers[1].question_id, record.answers[0].question_id);
        assert!([SUPPORT_QUESTION, GROWTH_QUESTION].contains(&record.answers[2].question_id.as_str()));
    }
}
