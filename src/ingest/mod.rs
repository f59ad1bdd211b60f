//! Frame ingestion sources.
//!
//! Sources produce `Frame` instances for the loop driver:
//! - `stub://` synthetic tabletop footage (always available, used by tests
//!   and the demo)
//! - still-image directories (feature: ingest-stills)
//!
//! Real camera capture and video decoding are external concerns; the
//! stills source stands in where non-synthetic input is needed.

mod camera;
#[cfg(feature = "ingest-stills")]
mod stills;

pub use camera::{CameraSource, SourceConfig, SourceStats};
