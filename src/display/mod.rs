//! Display-facing seams.
//!
//! The interactive surface itself (window, buttons, live preview) is an
//! external collaborator; the pipeline only hands it annotated frames and
//! the three status slot texts.

mod annotate;

pub use annotate::{draw_box, ClassPalette};

use crate::placement::{StatusLine, Utensil};

/// Three-slot status text area.
///
/// Implementations discard prior content on every `update`; `clear` blanks
/// all slots (the surface shows nothing while detection is switched off).
pub trait StatusPanel {
    fn update(&mut self, line: &StatusLine);
    fn clear(&mut self);
}

/// Panel that writes slot text to the log.
///
/// Repeated identical updates are skipped so a steady verdict does not
/// flood the log at frame rate.
pub struct TerminalPanel {
    last: Option<StatusLine>,
}

impl TerminalPanel {
    pub fn new() -> Self {
        Self { last: None }
    }
}

impl Default for TerminalPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusPanel for TerminalPanel {
    fn update(&mut self, line: &StatusLine) {
        if self.last.as_ref() == Some(line) {
            return;
        }
        for (utensil, text) in Utensil::ALL.iter().zip(line.slots().iter()) {
            if let Some(text) = text {
                log::info!("[{}] {}", utensil.label(), text);
            }
        }
        self.last = Some(line.clone());
    }

    fn clear(&mut self) {
        if self.last.take().is_some() {
            log::info!("status panel cleared");
        }
    }
}
