use crate::detect::Detection;

/// The three utensil classes the placement rule cares about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Utensil {
    Fork,
    Knife,
    Spoon,
}

impl Utensil {
    /// Display order: fork slot, knife slot, spoon slot, left to right.
    pub const ALL: [Utensil; 3] = [Utensil::Fork, Utensil::Knife, Utensil::Spoon];

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "fork" => Some(Utensil::Fork),
            "knife" => Some(Utensil::Knife),
            "spoon" => Some(Utensil::Spoon),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Utensil::Fork => "fork",
            Utensil::Knife => "knife",
            Utensil::Spoon => "spoon",
        }
    }

    pub(crate) fn slot(self) -> usize {
        match self {
            Utensil::Fork => 0,
            Utensil::Knife => 1,
            Utensil::Spoon => 2,
        }
    }
}

/// One left-x entry per utensil class that was detected this frame.
///
/// Rebuilt from scratch every frame; holding one across frames would let a
/// stale position survive a class briefly dropping out of detection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlacementSnapshot {
    slots: [Option<i32>; 3],
}

impl PlacementSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the left-x for a class. The first recording wins; later ones
    /// are dropped. Returns whether the entry was taken.
    pub fn record(&mut self, utensil: Utensil, left_x: i32) -> bool {
        let slot = &mut self.slots[utensil.slot()];
        if slot.is_some() {
            return false;
        }
        *slot = Some(left_x);
        true
    }

    pub fn left_x(&self, utensil: Utensil) -> Option<i32> {
        self.slots[utensil.slot()]
    }

    pub fn contains(&self, utensil: Utensil) -> bool {
        self.slots[utensil.slot()].is_some()
    }

    /// Classes with no detection this frame, in display order.
    pub fn missing(&self) -> Vec<Utensil> {
        Utensil::ALL
            .iter()
            .copied()
            .filter(|utensil| !self.contains(*utensil))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }
}

/// Collapse raw detections into the canonical snapshot.
///
/// Iterates in detector order. Non-target labels are skipped entirely; for
/// target labels the first box seen wins and later duplicates are silently
/// dropped. A table setting has at most one physical instance of each
/// utensil, and the detector may emit spurious duplicate boxes for it, so
/// the first box is treated as authoritative rather than merging boxes or
/// comparing confidences.
pub fn reduce<'a, I>(detections: I) -> PlacementSnapshot
where
    I: IntoIterator<Item = &'a Detection>,
{
    let mut snapshot = PlacementSnapshot::new();
    for detection in detections {
        if let Some(utensil) = Utensil::from_label(&detection.label) {
            snapshot.record(utensil, detection.bbox.left);
        }
    }
    snapshot
}
