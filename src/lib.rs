//! utensil-sentinel
//!
//! Table-setting placement checker. Each frame flows through one pass:
//! an ingest source produces an RGB frame, a detector backend reports
//! labeled boxes, and the placement pipeline reduces those to one entry
//! per utensil class, checks the fork < knife < spoon rule, and renders
//! the three status slot texts for the display layer.
//!
//! The placement core (`placement`) is pure and stateless across frames;
//! `driver::Pipeline` wires it to detector, annotation, panel, and
//! recorder, and the `sentineld` binary runs the loop.

use std::sync::OnceLock;

use anyhow::{anyhow, Result};

pub mod config;
pub mod detect;
pub mod display;
pub mod driver;
pub mod frame;
pub mod ingest;
pub mod placement;
pub mod record;

pub use config::SentinelConfig;
pub use detect::{
    BackendRegistry, BoundingBox, ClassVocabulary, Detection, DetectorBackend, StubBackend,
};
pub use display::{ClassPalette, StatusPanel, TerminalPanel};
pub use driver::{FrameSummary, Pipeline, RunMode};
pub use frame::Frame;
pub use ingest::{CameraSource, SourceConfig, SourceStats};
pub use placement::{
    evaluate, reduce, render, OrderingOutcome, PlacementSnapshot, StatusLine, Utensil, Verdict,
};
pub use record::Recorder;

/// Validate a detector class name.
///
/// Names are lowercase alphanumeric, up to 64 characters, with spaces,
/// underscores, or dashes between words ("wine glass", "dining_table").
pub fn validate_class_name(name: &str) -> Result<()> {
    static CLASS_NAME_RE: OnceLock<regex::Regex> = OnceLock::new();
    let re = CLASS_NAME_RE
        .get_or_init(|| regex::Regex::new(r"^[a-z0-9][a-z0-9 _-]{0,63}$").unwrap());
    if re.is_match(name) {
        Ok(())
    } else {
        Err(anyhow!("invalid class name '{}'", name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_names_accept_lowercase_words() {
        assert!(validate_class_name("fork").is_ok());
        assert!(validate_class_name("wine glass").is_ok());
        assert!(validate_class_name("dining_table").is_ok());
    }

    #[test]
    fn class_names_reject_uppercase_and_punctuation() {
        assert!(validate_class_name("Fork").is_err());
        assert!(validate_class_name("").is_err());
        assert!(validate_class_name("fork!").is_err());
        assert!(validate_class_name(" fork").is_err());
    }
}
