//! Daily question catalog.
//!
//! Opening questions are grouped by daily category and are the only ones the
//! selector draws from. Context, follow-up, complementary and third-round
//! questions are reachable by id only.

use std::collections::HashSet;
use std::sync::LazyLock;

use mindwell_core::models::question::{Category, QuestionDefinition, QuestionKind};

use crate::error::CheckinError;
use crate::rules;

#[derive(Debug, Clone)]
pub struct Catalog {
    openers: Vec<QuestionDefinition>,
    extras: Vec<QuestionDefinition>,
}

impl Catalog {
    pub fn new(openers: Vec<QuestionDefinition>, extras: Vec<QuestionDefinition>) -> Self {
        Self { openers, extras }
    }

    /// The built-in catalog, constructed once on first use.
    pub fn builtin() -> &'static Catalog {
        static BUILTIN: LazyLock<Catalog> = LazyLock::new(|| Catalog::new(openers(), extras()));
        &BUILTIN
    }

    /// Opening questions of `category`, in catalog order. Clinical
    /// categories are listed by `mindwell_instruments::catalog`.
    pub fn list_by_category(&self, category: Category) -> Vec<&QuestionDefinition> {
        self.openers.iter().filter(|q| q.category == category).collect()
    }

    pub fn get(&self, id: &str) -> Option<&QuestionDefinition> {
        self.openers.iter().chain(&self.extras).find(|q| q.id == id)
    }

    pub fn require(&self, id: &str) -> Result<&QuestionDefinition, CheckinError> {
        self.get(id)
            .ok_or_else(|| CheckinError::QuestionNotFound(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.openers.len() + self.extras.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check the catalog guarantees: every daily category has an opener, ids
    /// are unique, choice questions have options, scale bounds are ordered,
    /// and every question a rule can lead to exists.
    pub fn validate(&self) -> Result<(), CheckinError> {
        let misconfigured = |msg: String| Err(CheckinError::CatalogMisconfiguration(msg));

        for category in Category::DAILY {
            if self.list_by_category(category).is_empty() {
                return misconfigured(format!("category '{category}' has no opening questions"));
            }
        }

        let mut seen = HashSet::new();
        for question in self.openers.iter().chain(&self.extras) {
            if !seen.insert(question.id.as_str()) {
                return misconfigured(format!("duplicate question id '{}'", question.id));
            }
            match &question.kind {
                QuestionKind::Choice { options } if options.is_empty() => {
                    return misconfigured(format!("'{}' has no options", question.id));
                }
                QuestionKind::Scale { min, max, .. } if min >= max => {
                    return misconfigured(format!("'{}' has scale bounds {min}..{max}", question.id));
                }
                _ => {}
            }
        }

        for id in rules::referenced_question_ids() {
            if self.get(id).is_none() {
                return misconfigured(format!("rule target '{id}' is not in the catalog"));
            }
        }
        Ok(())
    }
}

const FEELING_SCALE: (&str, &str) = ("Very low", "Very high");

fn openers() -> Vec<QuestionDefinition> {
    use Category::*;
    vec![
        // wellness
        QuestionDefinition::scale(
            "wellness_energy",
            "How would you rate your energy level today?",
            Wellness,
            (1, 10),
            ("Completely drained", "Full of energy"),
        ),
        QuestionDefinition::choice(
            "wellness_sleep",
            "How did you sleep last night?",
            Wellness,
            &[
                ("great", "Great, I feel rested", 10),
                ("okay", "Okay", 7),
                ("poor", "Poorly", 4),
                ("terrible", "Terribly", 2),
            ],
        ),
        QuestionDefinition::choice(
            "wellness_feeling",
            "Which word best describes how you feel right now?",
            Wellness,
            &[
                ("energized", "Energized", 10),
                ("calm", "Calm", 8),
                ("tired", "Tired", 5),
                ("exhausted", "Exhausted", 3),
                ("overwhelmed", "Overwhelmed", 2),
            ],
        ),
        // academic
        QuestionDefinition::choice(
            "academic_workload",
            "How manageable does your workload feel this week?",
            Academic,
            &[
                ("manageable", "Totally manageable", 10),
                ("busy", "Busy but fine", 7),
                ("heavy", "Heavy", 5),
                ("overwhelmed", "I'm overwhelmed", 2),
            ],
        ),
        QuestionDefinition::scale(
            "academic_stress",
            "How stressed do you feel about your studies right now?",
            Academic,
            (1, 10),
            ("Not at all", "Extremely"),
        ),
        QuestionDefinition::boolean(
            "academic_focus",
            "Were you able to focus during your study time today?",
            Academic,
            ("Yes", "Not really"),
            Some((8, 3)),
        ),
        // social
        QuestionDefinition::choice(
            "social_connection",
            "How connected do you feel to the people around you?",
            Social,
            &[
                ("very", "Very connected", 10),
                ("somewhat", "Somewhat connected", 7),
                ("a_little", "A little", 4),
                ("none", "Not at all", 2),
            ],
        ),
        QuestionDefinition::boolean(
            "social_support",
            "Do you have someone you can talk to when things get hard?",
            Social,
            ("Yes", "No"),
            None,
        ),
        // personal
        QuestionDefinition::scale(
            "personal_mood",
            "On a scale of 1 to 10, how is your mood today?",
            Personal,
            (1, 10),
            FEELING_SCALE,
        ),
        QuestionDefinition::choice(
            "personal_day",
            "How has your day been so far?",
            Personal,
            &[
                ("great", "Great", 10),
                ("good", "Good", 8),
                ("okay", "Okay", 6),
                ("down", "A bit down", 4),
                ("terrible", "Terrible", 2),
            ],
        ),
        QuestionDefinition::text(
            "personal_gratitude",
            "What's one thing you're grateful for today?",
            Personal,
            "Big or small, anything counts",
            None,
        ),
        // goals
        QuestionDefinition::choice(
            "goals_progress",
            "How much progress did you make toward your goals yesterday?",
            Goals,
            &[
                ("lots", "A lot", 10),
                ("some", "Some", 7),
                ("little", "A little", 4),
                ("none", "None", 2),
            ],
        ),
        QuestionDefinition::text(
            "goals_intention",
            "What's one small thing you want to accomplish today?",
            Goals,
            "e.g. finish one problem set",
            None,
        ),
    ]
}

fn extras() -> Vec<QuestionDefinition> {
    use Category::*;
    vec![
        // context questions, chosen from the previous day's answers
        QuestionDefinition::choice(
            "context_mood_followup",
            "Yesterday seemed really tough. How are you feeling today compared to yesterday?",
            Personal,
            &[
                ("better", "Better", 10),
                ("same", "About the same", 5),
                ("worse", "Worse", 3),
            ],
        ),
        QuestionDefinition::text(
            "context_mood_momentum",
            "You were feeling great yesterday! What helped make it such a good day?",
            Personal,
            "Share what worked",
            None,
        ),
        QuestionDefinition::boolean(
            "context_energy_recovery",
            "Your energy was very low yesterday. Did you manage to get some rest since then?",
            Wellness,
            ("Yes", "Not yet"),
            Some((8, 3)),
        ),
        QuestionDefinition::scale(
            "context_sleep_recovery",
            "Last night's sleep sounded rough. How rested do you feel today?",
            Wellness,
            (1, 10),
            ("Not rested", "Fully rested"),
        ),
        QuestionDefinition::choice(
            "context_stress_followup",
            "You were very stressed about your studies yesterday. How is that stress today?",
            Academic,
            &[
                ("lower", "Lower", 10),
                ("same", "About the same", 5),
                ("higher", "Higher", 3),
            ],
        ),
        QuestionDefinition::choice(
            "context_workload_update",
            "Yesterday your workload felt overwhelming. Has anything eased up?",
            Academic,
            &[
                ("yes", "Yes, it's better", 10),
                ("a_bit", "A little", 6),
                ("no", "Not yet", 3),
            ],
        ),
        QuestionDefinition::boolean(
            "context_connection_followup",
            "Yesterday you felt disconnected. Have you been able to reach out to anyone since?",
            Social,
            ("Yes", "No"),
            Some((8, 3)),
        ),
        QuestionDefinition::text(
            "context_goal_restart",
            "Yesterday was a slow day for your goals. What's one tiny step you could take today?",
            Goals,
            "Keep it small",
            None,
        ),
        QuestionDefinition::boolean(
            "context_support_followup",
            "Yesterday you mentioned wanting to talk to someone. Were you able to?",
            Social,
            ("Yes", "Not yet"),
            Some((8, 4)),
        ),
        // follow-ups, chosen from the first answer
        QuestionDefinition::choice(
            "followup_energy_low",
            "What's draining your energy the most?",
            Wellness,
            &[
                ("sleep", "Not enough sleep", 5),
                ("workload", "Too much work", 5),
                ("stress", "Stress or worry", 5),
                ("health", "Not feeling well", 5),
            ],
        ),
        QuestionDefinition::text(
            "followup_energy_high",
            "Nice! What's giving you energy today?",
            Wellness,
            "Tell us what's working",
            None,
        ),
        QuestionDefinition::choice(
            "followup_sleep_poor",
            "What kept you from sleeping well?",
            Wellness,
            &[
                ("stress", "Racing thoughts or stress", 5),
                ("late_work", "Studying late", 5),
                ("screen", "Screens", 5),
                ("environment", "Noise or environment", 5),
            ],
        ),
        QuestionDefinition::boolean(
            "followup_rest",
            "Have you been able to take a real break today?",
            Wellness,
            ("Yes", "No"),
            None,
        ),
        QuestionDefinition::choice(
            "followup_stress_source",
            "Where is most of the pressure coming from?",
            Academic,
            &[
                ("exams", "Exams", 5),
                ("assignments", "Assignments", 5),
                ("grades", "Grades", 5),
                ("future", "Worries about the future", 5),
            ],
        ),
        QuestionDefinition::text(
            "followup_study_win",
            "You seem on top of things. What's helping your studies go well?",
            Academic,
            "Routines, people, places...",
            None,
        ),
        QuestionDefinition::choice(
            "followup_workload",
            "Which part of your workload feels heaviest?",
            Academic,
            &[
                ("deadlines", "Deadlines piling up", 5),
                ("difficulty", "Difficult material", 5),
                ("job", "Balancing work and classes", 5),
                ("other", "Something else", 5),
            ],
        ),
        QuestionDefinition::choice(
            "followup_focus",
            "What got in the way of focusing?",
            Academic,
            &[
                ("phone", "Phone or social media", 5),
                ("tired", "Feeling tired", 5),
                ("worry", "Worrying about something", 5),
                ("noise", "Noisy surroundings", 5),
            ],
        ),
        QuestionDefinition::boolean(
            "followup_lonely",
            "Would you like to connect with someone today?",
            Social,
            ("Yes", "Not today"),
            None,
        ),
        QuestionDefinition::boolean(
            "followup_support_resources",
            "Would you like to see the support resources available on campus?",
            Social,
            ("Yes, show me", "No thanks"),
            Some((6, 3)),
        ),
        QuestionDefinition::choice(
            "followup_mood_low",
            "What's weighing on you most right now?",
            Personal,
            &[
                ("studies", "School", 5),
                ("relationships", "Relationships", 5),
                ("family", "Family", 5),
                ("health", "Health", 5),
                ("unsure", "I'm not sure", 5),
            ],
        ),
        QuestionDefinition::text(
            "followup_mood_high",
            "What made today a good day?",
            Personal,
            "Savor the moment",
            None,
        ),
        QuestionDefinition::choice(
            "followup_goal_blocker",
            "What got in the way of your goals?",
            Goals,
            &[
                ("time", "Not enough time", 5),
                ("motivation", "Low motivation", 5),
                ("unclear", "Not sure where to start", 5),
                ("other", "Something else came up", 5),
            ],
        ),
        // complementary questions, first entry per category
        QuestionDefinition::scale(
            "complement_academic_balance",
            "How well are you balancing school with the rest of your life?",
            Academic,
            (1, 10),
            ("Not at all", "Perfectly"),
        ),
        QuestionDefinition::choice(
            "complement_social_plans",
            "Do you have plans to spend time with friends this week?",
            Social,
            &[
                ("yes", "Yes", 8),
                ("maybe", "Maybe", 5),
                ("no", "No", 3),
            ],
        ),
        QuestionDefinition::choice(
            "complement_wellness_selfcare",
            "Which self-care activity sounds best today?",
            Wellness,
            &[
                ("walk", "A walk outside", 6),
                ("music", "Music", 6),
                ("nap", "A nap", 6),
                ("exercise", "Exercise", 6),
            ],
        ),
        QuestionDefinition::text(
            "complement_goals_step",
            "What's one step toward a bigger goal you could take this week?",
            Goals,
            "One concrete step",
            None,
        ),
        QuestionDefinition::scale(
            "complement_personal_reflection",
            "How kind have you been to yourself today?",
            Personal,
            (1, 10),
            ("Very harsh", "Very kind"),
        ),
        // third round
        QuestionDefinition::choice(
            rules::SUPPORT_QUESTION,
            "It sounds like things have been hard lately. What would help you most right now?",
            Personal,
            &[
                ("talk_to_someone", "Talking to someone", 5),
                ("rest", "Some rest", 5),
                ("resources", "Campus support resources", 5),
                ("space", "Just some space", 3),
            ],
        ),
        QuestionDefinition::text(
            rules::GROWTH_QUESTION,
            "What's one thing you'd like to build on tomorrow?",
            Goals,
            "Something to look forward to",
            None,
        ),
    ]
}
