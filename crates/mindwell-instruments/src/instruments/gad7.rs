use mindwell_core::models::clinical::{Interpretation, SeverityBand};
use mindwell_core::models::question::{Category, InstrumentKind, QuestionDefinition};

use super::{build_items, item};
use crate::{Instrument, interpretation};

/// GAD-7: Generalized Anxiety Disorder scale.
/// 7 items rated 0–3, total 0–21.
pub struct Gad7;

impl Instrument for Gad7 {
    fn kind(&self) -> InstrumentKind {
        InstrumentKind::Gad7
    }

    fn name(&self) -> &str {
        "GAD-7"
    }

    fn items(&self) -> &[QuestionDefinition] {
        static ITEMS: std::sync::LazyLock<Vec<QuestionDefinition>> = std::sync::LazyLock::new(|| {
            let items = [
                item("gad7_1", "Over the last 2 weeks, how often have you been feeling nervous, anxious, or on edge?", "nervousness"),
                item("gad7_2", "Over the last 2 weeks, how often have you not been able to stop or control worrying?", "uncontrollable_worry"),
                item("gad7_3", "Over the last 2 weeks, how often have you been worrying too much about different things?", "excessive_worry"),
                item("gad7_4", "Over the last 2 weeks, how often have you had trouble relaxing?", "trouble_relaxing"),
                item("gad7_5", "Over the last 2 weeks, how often have you been so restless that it is hard to sit still?", "restlessness"),
                item("gad7_6", "Over the last 2 weeks, how often have you become easily annoyed or irritable?", "irritability"),
                item("gad7_7", "Over the last 2 weeks, how often have you felt afraid, as if something awful might happen?", "dread"),
            ];
            build_items(InstrumentKind::Gad7, Category::Anxiety, &items)
        });
        &ITEMS
    }

    fn item_max(&self) -> u32 {
        3
    }

    fn band(&self, raw_score: u32) -> SeverityBand {
        match raw_score {
            15.. => SeverityBand::Severe,
            10.. => SeverityBand::Moderate,
            5.. => SeverityBand::Mild,
            _ => SeverityBand::Minimal,
        }
    }

    fn interpretation(&self, band: SeverityBand) -> Interpretation {
        match band {
            SeverityBand::Severe => interpretation("Severe anxiety", "red", true, false),
            SeverityBand::Moderate => interpretation("Moderate anxiety", "orange", true, false),
            SeverityBand::Mild => interpretation("Mild anxiety", "yellow", false, false),
            _ => interpretation("Minimal anxiety", "green", false, false),
        }
    }
}
