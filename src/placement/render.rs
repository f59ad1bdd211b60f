use super::evaluate::{OrderingOutcome, Verdict};
use super::snapshot::Utensil;

/// Three display slots, one per utensil class, left to right.
///
/// Mirrors the fixed layout of the status text area: fork slot, knife
/// slot, spoon slot. Empty slots stay blank on the display.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusLine {
    slots: [Option<String>; 3],
}

impl StatusLine {
    pub fn slot(&self, utensil: Utensil) -> Option<&str> {
        self.slots[utensil.slot()].as_deref()
    }

    pub fn slots(&self) -> &[Option<String>; 3] {
        &self.slots
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

/// Map a verdict to the fixed status texts.
///
/// Each missing class fills its own slot with "No {class} detected". The
/// ordering message, when there is one, occupies the knife slot in the
/// middle of the panel; it can only coexist with an empty knife slot since
/// ordering is never evaluated while the knife is missing.
pub fn render(verdict: &Verdict) -> StatusLine {
    let mut slots: [Option<String>; 3] = Default::default();

    for utensil in &verdict.missing {
        slots[utensil.slot()] = Some(format!("No {} detected", utensil.label()));
    }

    let ordering_text = match verdict.ordering {
        OrderingOutcome::NotEvaluated => None,
        OrderingOutcome::Correct => Some("Correct Utensil Order"),
        OrderingOutcome::KnifeNotBeforeSpoon => Some("Knife should be after the fork"),
        OrderingOutcome::ForkNotLeftmost => Some("Fork should be on the left side"),
    };
    if let Some(text) = ordering_text {
        slots[Utensil::Knife.slot()] = Some(text.to_string());
    }

    StatusLine { slots }
}
