//! Per-frame placement pipeline.
//!
//! Raw detector output flows through three steps each frame:
//! - `reduce`: collapse detections into one left-x entry per utensil class
//! - `evaluate`: check completeness and the fork < knife < spoon rule
//! - `render`: map the verdict to the three status slot texts
//!
//! Everything here is a pure value computation. The snapshot is rebuilt
//! from scratch every frame; nothing carries over between frames.

mod evaluate;
mod render;
mod snapshot;

pub use evaluate::{evaluate, OrderingOutcome, Verdict};
pub use render::{render, StatusLine};
pub use snapshot::{reduce, PlacementSnapshot, Utensil};
