use mindwell_core::models::clinical::{Interpretation, SeverityBand};
use mindwell_core::models::question::{Category, InstrumentKind, QuestionDefinition};

use super::{ItemSpec, build_items, item};
use crate::{Instrument, interpretation};

/// PHQ-9: Patient Health Questionnaire, depression module.
/// 9 items rated 0–3, total 0–27. Item 9 asks about thoughts of self-harm.
pub struct Phq9;

impl Instrument for Phq9 {
    fn kind(&self) -> InstrumentKind {
        InstrumentKind::Phq9
    }

    fn name(&self) -> &str {
        "PHQ-9"
    }

    fn items(&self) -> &[QuestionDefinition] {
        static ITEMS: std::sync::LazyLock<Vec<QuestionDefinition>> = std::sync::LazyLock::new(|| {
            let items = [
                item("phq9_1", "Over the last 2 weeks, how often have you had little interest or pleasure in doing things?", "anhedonia"),
                item("phq9_2", "Over the last 2 weeks, how often have you been feeling down, depressed, or hopeless?", "depressed_mood"),
                item("phq9_3", "Over the last 2 weeks, how often have you had trouble falling or staying asleep, or sleeping too much?", "sleep"),
                item("phq9_4", "Over the last 2 weeks, how often have you been feeling tired or having little energy?", "fatigue"),
                item("phq9_5", "Over the last 2 weeks, how often have you had poor appetite or been overeating?", "appetite"),
                item("phq9_6", "Over the last 2 weeks, how often have you been feeling bad about yourself, or that you are a failure or have let yourself or your family down?", "self_worth"),
                item("phq9_7", "Over the last 2 weeks, how often have you had trouble concentrating on things, such as reading or watching television?", "concentration"),
                item("phq9_8", "Over the last 2 weeks, how often have you been moving or speaking so slowly that other people could have noticed, or the opposite, being fidgety or restless?", "psychomotor"),
                ItemSpec {
                    is_critical: true,
                    ..item("phq9_9", "Over the last 2 weeks, how often have you had thoughts that you would be better off dead, or of hurting yourself in some way?", "suicidal_ideation")
                },
            ];
            build_items(InstrumentKind::Phq9, Category::Depression, &items)
        });
        &ITEMS
    }

    fn item_max(&self) -> u32 {
        3
    }

    fn band(&self, raw_score: u32) -> SeverityBand {
        match raw_score {
            20.. => SeverityBand::Severe,
            15.. => SeverityBand::ModeratelySevere,
            10.. => SeverityBand::Moderate,
            5.. => SeverityBand::Mild,
            _ => SeverityBand::Minimal,
        }
    }

    fn interpretation(&self, band: SeverityBand) -> Interpretation {
        match band {
            SeverityBand::Severe => interpretation("Severe depression", "darkred", true, true),
            SeverityBand::ModeratelySevere => {
                interpretation("Moderately severe depression", "red", true, false)
            }
            SeverityBand::Moderate => interpretation("Moderate depression", "orange", true, false),
            SeverityBand::Mild => interpretation("Mild depression", "yellow", false, false),
            _ => interpretation("Minimal depression", "green", false, false),
        }
    }
}
