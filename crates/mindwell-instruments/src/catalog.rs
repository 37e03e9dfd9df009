//! The combined 26-item clinical catalog.

use std::collections::HashSet;

use mindwell_core::models::question::{Category, InstrumentKind, QuestionDefinition, QuestionKind};

use crate::error::InstrumentError;
use crate::{all_instruments, instrument_for};

/// PHQ-9 + GAD-7 + PSS-10.
pub const CLINICAL_ITEM_COUNT: usize = 9 + 7 + 10;

/// All clinical items, instruments in scoring order, items in administration order.
pub fn clinical_catalog() -> Vec<QuestionDefinition> {
    all_instruments()
        .iter()
        .flat_map(|i| i.items().iter().cloned())
        .collect()
}

/// Clinical items of `category`, in administration order. Daily categories
/// have no clinical items.
pub fn list_by_category(category: Category) -> Vec<QuestionDefinition> {
    all_instruments()
        .iter()
        .flat_map(|i| i.items().iter().filter(|q| q.category == category).cloned())
        .collect()
}

pub fn find_item(question_id: &str) -> Option<QuestionDefinition> {
    all_instruments()
        .iter()
        .find_map(|i| i.items().iter().find(|q| q.id == question_id).cloned())
}

/// Check the catalog guarantees: 9/7/10 items with unique ids, every item
/// tagged with its own instrument, and every option set non-empty.
pub fn validate_clinical_catalog() -> Result<(), InstrumentError> {
    let expected = [
        (InstrumentKind::Phq9, 9),
        (InstrumentKind::Gad7, 7),
        (InstrumentKind::Pss10, 10),
    ];
    let mut seen: HashSet<String> = HashSet::new();

    for (kind, count) in expected {
        let instrument = instrument_for(kind);
        let items = instrument.items();
        if items.len() != count {
            return Err(InstrumentError::CatalogMisconfiguration(format!(
                "{} has {} items, expected {count}",
                instrument.name(),
                items.len()
            )));
        }
        for item in items {
            if !seen.insert(item.id.clone()) {
                return Err(InstrumentError::CatalogMisconfiguration(format!(
                    "duplicate clinical item id '{}'",
                    item.id
                )));
            }
            if item.instrument() != Some(kind) {
                return Err(InstrumentError::CatalogMisconfiguration(format!(
                    "item '{}' is not tagged as {kind}",
                    item.id
                )));
            }
            match &item.kind {
                QuestionKind::Choice { options } if !options.is_empty() => {}
                _ => {
                    return Err(InstrumentError::CatalogMisconfiguration(format!(
                        "item '{}' has no answer options",
                        item.id
                    )));
                }
            }
        }
    }

    for category in Category::CLINICAL {
        if list_by_category(category).is_empty() {
            return Err(InstrumentError::CatalogMisconfiguration(format!(
                "no clinical items in '{category}'"
            )));
        }
    }

    if seen.len() != CLINICAL_ITEM_COUNT {
        return Err(InstrumentError::CatalogMisconfiguration(format!(
            "clinical catalog has {} items, expected {CLINICAL_ITEM_COUNT}",
            seen.len()
        )));
    }
    Ok(())
}
