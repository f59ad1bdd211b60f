use anyhow::Result;

use crate::detect::result::Detection;
use crate::frame::Frame;

/// Detector backend trait.
///
/// Backends consume a frame and report labeled boxes with confidence
/// scores. The pipeline treats them as a black box: labels come from the
/// backend's own vocabulary, and no confidence thresholding or non-max
/// suppression happens downstream.
pub trait DetectorBackend: Send {
    /// Backend identifier.
    fn name(&self) -> &'static str;

    /// Run detection on a frame.
    ///
    /// Must stay O(detections) per call; the frame loop runs this on every
    /// frame and must not be rate-limited by it.
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Detection>>;

    /// Optional warm-up hook.
    fn warm_up(&mut self) -> Result<()> {
        Ok(())
    }
}
