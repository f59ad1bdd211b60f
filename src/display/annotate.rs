use std::collections::HashMap;

use rand::Rng;

use crate::detect::BoundingBox;
use crate::frame::Frame;
use crate::placement::Utensil;

/// Fixed RGB colors for the target classes.
const FORK_COLOR: [u8; 3] = [112, 149, 91];
const KNIFE_COLOR: [u8; 3] = [242, 165, 156];
const SPOON_COLOR: [u8; 3] = [100, 175, 168];

/// Per-class box colors: fixed for the three utensils, randomly assigned
/// for every other label. A random color sticks to its label for the rest
/// of the run.
pub struct ClassPalette {
    fallback: HashMap<String, [u8; 3]>,
}

impl ClassPalette {
    pub fn new() -> Self {
        Self {
            fallback: HashMap::new(),
        }
    }

    pub fn color_for(&mut self, label: &str) -> [u8; 3] {
        match Utensil::from_label(label) {
            Some(Utensil::Fork) => FORK_COLOR,
            Some(Utensil::Knife) => KNIFE_COLOR,
            Some(Utensil::Spoon) => SPOON_COLOR,
            None => *self
                .fallback
                .entry(label.to_string())
                .or_insert_with(|| {
                    let mut rng = rand::thread_rng();
                    [rng.gen(), rng.gen(), rng.gen()]
                }),
        }
    }
}

impl Default for ClassPalette {
    fn default() -> Self {
        Self::new()
    }
}

/// Draw a box outline into the frame, clipped to its bounds.
pub fn draw_box(frame: &mut Frame, bbox: &BoundingBox, color: [u8; 3], thickness: i32) {
    let thickness = thickness.max(1);

    for y in bbox.top..(bbox.top + thickness).min(bbox.bottom + 1) {
        draw_hline(frame, bbox.left, bbox.right, y, color);
    }
    for y in (bbox.bottom - thickness + 1).max(bbox.top)..=bbox.bottom {
        draw_hline(frame, bbox.left, bbox.right, y, color);
    }
    for x in bbox.left..(bbox.left + thickness).min(bbox.right + 1) {
        draw_vline(frame, x, bbox.top, bbox.bottom, color);
    }
    for x in (bbox.right - thickness + 1).max(bbox.left)..=bbox.right {
        draw_vline(frame, x, bbox.top, bbox.bottom, color);
    }
}

fn draw_hline(frame: &mut Frame, x0: i32, x1: i32, y: i32, color: [u8; 3]) {
    let width = frame.width as i32;
    let height = frame.height as i32;
    if y < 0 || y >= height {
        return;
    }
    let x0 = x0.max(0);
    let x1 = x1.min(width - 1);
    let pixels = frame.pixels_mut();
    for x in x0..=x1 {
        let at = (y as usize * width as usize + x as usize) * 3;
        pixels[at..at + 3].copy_from_slice(&color);
    }
}

fn draw_vline(frame: &mut Frame, x: i32, y0: i32, y1: i32, color: [u8; 3]) {
    let width = frame.width as i32;
    let height = frame.height as i32;
    if x < 0 || x >= width {
        return;
    }
    let y0 = y0.max(0);
    let y1 = y1.min(height - 1);
    let pixels = frame.pixels_mut();
    for y in y0..=y1 {
        let at = (y as usize * width as usize + x as usize) * 3;
        pixels[at..at + 3].copy_from_slice(&color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_frame() -> Frame {
        Frame::new(vec![0u8; 16 * 8 * 3], 16, 8, 0)
    }

    fn pixel(frame: &Frame, x: usize, y: usize) -> [u8; 3] {
        let at = (y * frame.width as usize + x) * 3;
        let p = frame.pixels();
        [p[at], p[at + 1], p[at + 2]]
    }

    #[test]
    fn box_outline_touches_corners_but_not_interior() {
        let mut frame = blank_frame();
        draw_box(&mut frame, &BoundingBox::new(2, 1, 10, 6), [255, 0, 0], 1);

        assert_eq!(pixel(&frame, 2, 1), [255, 0, 0]);
        assert_eq!(pixel(&frame, 10, 6), [255, 0, 0]);
        assert_eq!(pixel(&frame, 6, 3), [0, 0, 0]);
    }

    #[test]
    fn boxes_are_clipped_to_the_frame() {
        let mut frame = blank_frame();
        draw_box(&mut frame, &BoundingBox::new(-5, -5, 10, 4), [9, 9, 9], 2);

        // Clipped bottom and right edges still land in view.
        assert_eq!(pixel(&frame, 0, 4), [9, 9, 9]);
        assert_eq!(pixel(&frame, 10, 0), [9, 9, 9]);
        // Interior stays untouched; the off-screen edges never wrapped.
        assert_eq!(pixel(&frame, 5, 1), [0, 0, 0]);
    }

    #[test]
    fn utensils_keep_their_fixed_colors() {
        let mut palette = ClassPalette::new();
        assert_eq!(palette.color_for("fork"), FORK_COLOR);
        assert_eq!(palette.color_for("knife"), KNIFE_COLOR);
        assert_eq!(palette.color_for("spoon"), SPOON_COLOR);
    }

    #[test]
    fn fallback_colors_are_stable_per_label() {
        let mut palette = ClassPalette::new();
        let first = palette.color_for("plate");
        let second = palette.color_for("plate");
        assert_eq!(first, second);
    }
}
