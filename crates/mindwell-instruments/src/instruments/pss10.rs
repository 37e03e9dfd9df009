use mindwell_core::models::clinical::{Interpretation, SeverityBand};
use mindwell_core::models::question::{Category, InstrumentKind, QuestionDefinition};

use super::{ItemSpec, build_items, item};
use crate::{Instrument, interpretation};

/// PSS-10: Perceived Stress Scale.
/// 10 items rated 0–4, total 0–40. Positively phrased items are reverse-scored.
pub struct Pss10;

fn reverse<'a>(item: ItemSpec<'a>) -> ItemSpec<'a> {
    ItemSpec {
        is_reverse: true,
        ..item
    }
}

impl Instrument for Pss10 {
    fn kind(&self) -> InstrumentKind {
        InstrumentKind::Pss10
    }

    fn name(&self) -> &str {
        "PSS-10"
    }

    fn items(&self) -> &[QuestionDefinition] {
        static ITEMS: std::sync::LazyLock<Vec<QuestionDefinition>> = std::sync::LazyLock::new(|| {
            let items = [
                item("pss_1", "In the last month, how often have you been upset because of something that happened unexpectedly?", "unexpected_events"),
                item("pss_2", "In the last month, how often have you felt that you were unable to control the important things in your life?", "lack_of_control"),
                item("pss_3", "In the last month, how often have you felt nervous and stressed?", "nervousness"),
                reverse(item("pss_4", "In the last month, how often have you felt confident about your ability to handle your personal problems?", "self_efficacy")),
                reverse(item("pss_5", "In the last month, how often have you felt that things were going your way?", "positive_outlook")),
                reverse(item("pss_6", "In the last month, how often have you felt that you could cope with all the things you had to do?", "coping")),
                reverse(item("pss_7", "In the last month, how often have you been able to control irritations in your life?", "emotional_control")),
                reverse(item("pss_8", "In the last month, how often have you felt that you were on top of things?", "mastery")),
                item("pss_9", "In the last month, how often have you been angered because of things that happened that were outside of your control?", "anger"),
                item("pss_10", "In the last month, how often have you felt difficulties were piling up so high that you could not overcome them?", "overwhelm"),
            ];
            build_items(InstrumentKind::Pss10, Category::Stress, &items)
        });
        &ITEMS
    }

    fn item_max(&self) -> u32 {
        4
    }

    fn band(&self, raw_score: u32) -> SeverityBand {
        match raw_score {
            27.. => SeverityBand::High,
            14.. => SeverityBand::Moderate,
            _ => SeverityBand::Low,
        }
    }

    fn interpretation(&self, band: SeverityBand) -> Interpretation {
        match band {
            SeverityBand::High => interpretation("High perceived stress", "red", true, false),
            SeverityBand::Moderate => interpretation("Moderate stress", "orange", true, false),
            _ => interpretation("Low stress", "green", false, false),
        }
    }
}
