pub mod gad7;
pub mod phq9;
pub mod pss10;

use mindwell_core::models::question::{Category, ClinicalFields, InstrumentKind, QuestionDefinition};

/// Frequency options shared by PHQ-9 and GAD-7 (past two weeks).
const TWO_WEEK_FREQUENCY: [(&str, &str, u32); 4] = [
    ("0", "Not at all", 0),
    ("1", "Several days", 1),
    ("2", "More than half the days", 2),
    ("3", "Nearly every day", 3),
];

/// PSS-10 frequency options (past month).
const MONTH_FREQUENCY: [(&str, &str, u32); 5] = [
    ("0", "Never", 0),
    ("1", "Almost never", 1),
    ("2", "Sometimes", 2),
    ("3", "Fairly often", 3),
    ("4", "Very often", 4),
];

struct ItemSpec<'a> {
    id: &'a str,
    text: &'a str,
    domain: &'a str,
    is_critical: bool,
    is_reverse: bool,
}

const fn item<'a>(id: &'a str, text: &'a str, domain: &'a str) -> ItemSpec<'a> {
    ItemSpec {
        id,
        text,
        domain,
        is_critical: false,
        is_reverse: false,
    }
}

fn build_items(instrument: InstrumentKind, category: Category, items: &[ItemSpec<'_>]) -> Vec<QuestionDefinition> {
    let options: &[(&str, &str, u32)] = match instrument {
        InstrumentKind::Pss10 => &MONTH_FREQUENCY,
        InstrumentKind::Phq9 | InstrumentKind::Gad7 => &TWO_WEEK_FREQUENCY,
    };
    items
        .iter()
        .map(|s| {
            QuestionDefinition::choice(s.id, s.text, category, options).with_clinical(ClinicalFields {
                instrument,
                domain: s.domain.to_string(),
                is_critical: s.is_critical,
                is_reverse: s.is_reverse,
            })
        })
        .collect()
}
