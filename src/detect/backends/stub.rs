use anyhow::Result;
use sha2::{Digest, Sha256};

use crate::detect::backend::DetectorBackend;
use crate::detect::result::{BoundingBox, Detection};
use crate::frame::Frame;

/// Stub backend for tests and demos. Plays back scripted tabletop scenes,
/// selected deterministically by hashing the frame pixels: the same frame
/// always yields the same detections.
pub struct StubBackend;

impl StubBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StubBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl DetectorBackend for StubBackend {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn detect(&mut self, frame: &Frame) -> Result<Vec<Detection>> {
        let digest: [u8; 32] = Sha256::digest(frame.pixels()).into();
        let scene = digest[0] % SCENE_COUNT;
        Ok(scripted_scene(scene, frame.width as i32, frame.height as i32))
    }
}

const SCENE_COUNT: u8 = 8;

/// Build one scripted scene. Positions scale with the frame so boxes stay
/// inside view at any resolution.
fn scripted_scene(scene: u8, w: i32, h: i32) -> Vec<Detection> {
    let top = h / 3;
    let bottom = top + h / 4;
    let box_w = w / 12;
    let place = |label: &str, left: i32, confidence: f32| {
        Detection::new(label, BoundingBox::new(left, top, left + box_w, bottom), confidence)
    };

    match scene {
        // Properly laid place setting, with a cup above the plates.
        0 => vec![
            place("fork", w / 10, 0.88),
            place("knife", w / 2, 0.91),
            place("spoon", 3 * w / 4, 0.86),
            place("cup", 7 * w / 8, 0.55),
        ],
        // Fork and knife swapped.
        1 => vec![
            place("knife", w / 10, 0.90),
            place("fork", w / 2, 0.84),
            place("spoon", 3 * w / 4, 0.87),
        ],
        // Knife drifted to the right of the spoon.
        2 => vec![
            place("fork", w / 10, 0.89),
            place("spoon", w / 2, 0.83),
            place("knife", 3 * w / 4, 0.92),
        ],
        // Spoon not on the table yet.
        3 => vec![
            place("fork", w / 10, 0.87),
            place("knife", w / 2, 0.90),
            place("plate", w / 3, 0.74),
        ],
        // Cleared table, only crockery visible.
        4 => vec![place("plate", w / 3, 0.78), place("cup", 2 * w / 3, 0.61)],
        // Detector double-reports the knife; the later box carries the
        // higher confidence but the first one still wins downstream.
        5 => vec![
            place("fork", w / 10, 0.88),
            place("knife", w / 2, 0.64),
            place("knife", w / 2 + box_w / 2, 0.97),
            place("spoon", 3 * w / 4, 0.85),
        ],
        6 => vec![],
        // Fork and knife boxes start at the same x.
        _ => vec![
            place("fork", w / 3, 0.81),
            place("knife", w / 3, 0.80),
            place("spoon", 3 * w / 4, 0.88),
        ],
    }
}
