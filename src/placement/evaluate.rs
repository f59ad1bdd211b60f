use super::snapshot::{PlacementSnapshot, Utensil};

/// Result of checking left-to-right utensil placement for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OrderingOutcome {
    /// At least one utensil was missing, so no ordering was checked.
    #[default]
    NotEvaluated,
    Correct,
    /// The fork is not strictly left of the knife.
    ForkNotLeftmost,
    /// The knife is not strictly left of the spoon.
    KnifeNotBeforeSpoon,
}

/// Missing-class flags plus the ordering outcome for one frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Verdict {
    /// Target classes with no detection, in display order.
    pub missing: Vec<Utensil>,
    pub ordering: OrderingOutcome,
}

impl Verdict {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Evaluate a snapshot against the fork < knife < spoon rule.
///
/// Ordering is checked only when all three classes are present. "Left of"
/// is strict: equal x-coordinates (overlapping boxes) violate the
/// corresponding rule. The fork/knife check runs first, so when both rules
/// are broken only the fork violation is reported.
pub fn evaluate(snapshot: &PlacementSnapshot) -> Verdict {
    let missing = snapshot.missing();

    let (Some(fork_x), Some(knife_x), Some(spoon_x)) = (
        snapshot.left_x(Utensil::Fork),
        snapshot.left_x(Utensil::Knife),
        snapshot.left_x(Utensil::Spoon),
    ) else {
        return Verdict {
            missing,
            ordering: OrderingOutcome::NotEvaluated,
        };
    };

    let ordering = if fork_x >= knife_x {
        OrderingOutcome::ForkNotLeftmost
    } else if knife_x >= spoon_x {
        OrderingOutcome::KnifeNotBeforeSpoon
    } else {
        OrderingOutcome::Correct
    };

    Verdict { missing, ordering }
}
