//! Frame loop driver.
//!
//! One `Pipeline::run_frame` call per captured frame: run the detector,
//! annotate the frame, and in detection mode feed the reduce -> evaluate ->
//! render chain and the status panel. The placement state is a frame-local
//! value; nothing survives into the next call.

use std::collections::HashSet;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};

use crate::detect::{ClassVocabulary, Detection, DetectorBackend};
use crate::display::{draw_box, ClassPalette, StatusPanel};
use crate::frame::Frame;
use crate::placement::{evaluate, reduce, render, StatusLine, Utensil, Verdict};
use crate::record::Recorder;

/// Binary per-frame switch: raw preview or detection-active.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunMode {
    /// Show the feed with general object boxes; placement logic stays off.
    Preview,
    /// Run the placement pipeline and surface the verdict.
    Detection,
}

impl FromStr for RunMode {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self> {
        match raw {
            "preview" => Ok(RunMode::Preview),
            "detection" => Ok(RunMode::Detection),
            other => Err(anyhow!(
                "unknown run mode '{}' (expected 'preview' or 'detection')",
                other
            )),
        }
    }
}

/// Outcome of one frame pass, handed back to the caller.
#[derive(Clone, Debug)]
pub struct FrameSummary {
    pub frame_index: u64,
    pub detections: usize,
    /// Present only in detection mode.
    pub verdict: Option<Verdict>,
    pub status: Option<StatusLine>,
}

/// Per-frame orchestration around the placement core.
pub struct Pipeline<P: StatusPanel> {
    backend: Arc<Mutex<dyn DetectorBackend>>,
    vocabulary: ClassVocabulary,
    palette: ClassPalette,
    panel: P,
    recorder: Option<Recorder>,
    warned_labels: HashSet<String>,
}

impl<P: StatusPanel> Pipeline<P> {
    pub fn new(
        backend: Arc<Mutex<dyn DetectorBackend>>,
        vocabulary: ClassVocabulary,
        panel: P,
    ) -> Self {
        Self {
            backend,
            vocabulary,
            palette: ClassPalette::new(),
            panel,
            recorder: None,
            warned_labels: HashSet::new(),
        }
    }

    pub fn with_recorder(mut self, recorder: Recorder) -> Self {
        self.recorder = Some(recorder);
        self
    }

    pub fn recorder_mut(&mut self) -> Option<&mut Recorder> {
        self.recorder.as_mut()
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }

    /// Process one frame.
    ///
    /// Preview mode skips the placement pipeline entirely and clears the
    /// panel; detection mode runs reduce -> evaluate -> render and pushes
    /// the slots to the panel. Either way the frame is annotated in place
    /// and handed to the recorder when one is attached.
    pub fn run_frame(&mut self, frame: &mut Frame, mode: RunMode) -> Result<FrameSummary> {
        let detections = {
            let mut backend = self
                .backend
                .lock()
                .map_err(|_| anyhow!("detector backend lock poisoned"))?;
            backend.detect(frame)?
        };

        for detection in &detections {
            if !self.vocabulary.contains(&detection.label)
                && self.warned_labels.insert(detection.label.clone())
            {
                log::warn!(
                    "detector reported label '{}' outside the vocabulary",
                    detection.label
                );
            }
        }

        self.annotate(frame, &detections, mode);

        let (verdict, status) = match mode {
            RunMode::Preview => {
                self.panel.clear();
                (None, None)
            }
            RunMode::Detection => {
                let snapshot = reduce(&detections);
                let verdict = evaluate(&snapshot);
                let status = render(&verdict);
                self.panel.update(&status);
                (Some(verdict), Some(status))
            }
        };

        if let Some(recorder) = self.recorder.as_mut() {
            recorder.write_frame(frame)?;
        }

        Ok(FrameSummary {
            frame_index: frame.index,
            detections: detections.len(),
            verdict,
            status,
        })
    }

    /// Detection mode draws only the target classes, with their fixed
    /// colors; preview draws every detection with the per-label palette.
    fn annotate(&mut self, frame: &mut Frame, detections: &[Detection], mode: RunMode) {
        for detection in detections {
            if mode == RunMode::Detection && Utensil::from_label(&detection.label).is_none() {
                continue;
            }
            let color = self.palette.color_for(&detection.label);
            draw_box(frame, &detection.bbox, color, 2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::BoundingBox;
    use crate::placement::OrderingOutcome;

    struct ScriptedBackend {
        detections: Vec<Detection>,
    }

    impl DetectorBackend for ScriptedBackend {
        fn name(&self) -> &'static str {
            "scripted"
        }

        fn detect(&mut self, _frame: &Frame) -> Result<Vec<Detection>> {
            Ok(self.detections.clone())
        }
    }

    #[derive(Default)]
    struct CapturePanel {
        updates: Vec<StatusLine>,
        clears: usize,
    }

    impl StatusPanel for CapturePanel {
        fn update(&mut self, line: &StatusLine) {
            self.updates.push(line.clone());
        }

        fn clear(&mut self) {
            self.clears += 1;
        }
    }

    fn det(label: &str, left: i32) -> Detection {
        Detection::new(label, BoundingBox::new(left, 40, left + 30, 120), 0.9)
    }

    fn pipeline(detections: Vec<Detection>) -> Pipeline<CapturePanel> {
        let backend: Arc<Mutex<dyn DetectorBackend>> =
            Arc::new(Mutex::new(ScriptedBackend { detections }));
        Pipeline::new(backend, ClassVocabulary::tableware(), CapturePanel::default())
    }

    fn frame() -> Frame {
        Frame::new(vec![0u8; 320 * 240 * 3], 320, 240, 3)
    }

    #[test]
    fn preview_mode_skips_placement_and_clears_the_panel() -> Result<()> {
        let mut pipeline = pipeline(vec![det("fork", 300), det("knife", 10)]);

        let summary = pipeline.run_frame(&mut frame(), RunMode::Preview)?;
        assert!(summary.verdict.is_none());
        assert!(summary.status.is_none());
        assert_eq!(summary.detections, 2);
        assert_eq!(pipeline.panel().clears, 1);
        assert!(pipeline.panel().updates.is_empty());
        Ok(())
    }

    #[test]
    fn detection_mode_produces_a_verdict_and_updates_the_panel() -> Result<()> {
        let mut pipeline = pipeline(vec![det("fork", 10), det("knife", 100), det("spoon", 200)]);

        let summary = pipeline.run_frame(&mut frame(), RunMode::Detection)?;
        let verdict = summary.verdict.expect("verdict in detection mode");
        assert_eq!(verdict.ordering, OrderingOutcome::Correct);
        assert_eq!(pipeline.panel().updates.len(), 1);
        assert_eq!(
            pipeline.panel().updates[0].slot(Utensil::Knife),
            Some("Correct Utensil Order")
        );
        Ok(())
    }

    #[test]
    fn missing_classes_surface_through_the_panel() -> Result<()> {
        let mut pipeline = pipeline(vec![det("fork", 10), det("plate", 80)]);

        let summary = pipeline.run_frame(&mut frame(), RunMode::Detection)?;
        let verdict = summary.verdict.expect("verdict");
        assert_eq!(verdict.missing, vec![Utensil::Knife, Utensil::Spoon]);
        assert_eq!(verdict.ordering, OrderingOutcome::NotEvaluated);
        let line = &pipeline.panel().updates[0];
        assert_eq!(line.slot(Utensil::Knife), Some("No knife detected"));
        assert_eq!(line.slot(Utensil::Spoon), Some("No spoon detected"));
        assert_eq!(line.slot(Utensil::Fork), None);
        Ok(())
    }

    #[test]
    fn duplicate_detections_keep_the_first_box() -> Result<()> {
        let mut pipeline = pipeline(vec![
            det("fork", 10),
            det("knife", 100),
            det("knife", 5),
            det("spoon", 200),
        ]);

        let summary = pipeline.run_frame(&mut frame(), RunMode::Detection)?;
        // The second knife at x=5 is dropped; the order stays correct.
        let verdict = summary.verdict.expect("verdict");
        assert_eq!(verdict.ordering, OrderingOutcome::Correct);
        Ok(())
    }

    #[test]
    fn detection_mode_annotates_only_target_classes() -> Result<()> {
        let mut preview_pipeline = pipeline(vec![det("plate", 50)]);
        let mut preview_frame = frame();
        preview_pipeline.run_frame(&mut preview_frame, RunMode::Preview)?;
        assert!(preview_frame.pixels().iter().any(|&b| b != 0));

        let mut detection_pipeline = pipeline(vec![det("plate", 50)]);
        let mut detection_frame = frame();
        detection_pipeline.run_frame(&mut detection_frame, RunMode::Detection)?;
        assert!(detection_frame.pixels().iter().all(|&b| b == 0));
        Ok(())
    }

    #[test]
    fn run_mode_parses_from_config_strings() {
        assert_eq!("preview".parse::<RunMode>().unwrap(), RunMode::Preview);
        assert_eq!("detection".parse::<RunMode>().unwrap(), RunMode::Detection);
        assert!("tracking".parse::<RunMode>().is_err());
    }
}
