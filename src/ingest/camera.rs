use anyhow::Result;

use crate::frame::Frame;

/// Configuration for a frame source.
#[derive(Clone, Debug)]
pub struct SourceConfig {
    /// Source location: `stub://name` for synthetic footage, or a local
    /// directory of stills (feature: ingest-stills).
    pub url: String,
    /// Target frame rate. The loop driver paces to this; sources may also
    /// decimate.
    pub target_fps: u32,
    /// Frame width for synthetic footage.
    pub width: u32,
    /// Frame height for synthetic footage.
    pub height: u32,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: "stub://tabletop".to_string(),
            target_fps: 15,
            width: 1280,
            height: 720,
        }
    }
}

/// Camera-facing frame source.
pub struct CameraSource {
    backend: SourceBackend,
}

enum SourceBackend {
    Synthetic(SyntheticTableSource),
    #[cfg(feature = "ingest-stills")]
    Stills(super::stills::StillsSource),
}

impl CameraSource {
    pub fn new(config: SourceConfig) -> Result<Self> {
        if config.url.starts_with("stub://") {
            Ok(Self {
                backend: SourceBackend::Synthetic(SyntheticTableSource::new(config)),
            })
        } else {
            #[cfg(feature = "ingest-stills")]
            {
                Ok(Self {
                    backend: SourceBackend::Stills(super::stills::StillsSource::new(config)?),
                })
            }
            #[cfg(not(feature = "ingest-stills"))]
            {
                anyhow::bail!("non-stub sources require the ingest-stills feature")
            }
        }
    }

    /// Connect to the source.
    pub fn connect(&mut self) -> Result<()> {
        match &mut self.backend {
            SourceBackend::Synthetic(source) => source.connect(),
            #[cfg(feature = "ingest-stills")]
            SourceBackend::Stills(source) => source.connect(),
        }
    }

    /// Capture the next frame.
    pub fn next_frame(&mut self) -> Result<Frame> {
        match &mut self.backend {
            SourceBackend::Synthetic(source) => source.next_frame(),
            #[cfg(feature = "ingest-stills")]
            SourceBackend::Stills(source) => source.next_frame(),
        }
    }

    /// Check if the source is healthy.
    pub fn is_healthy(&self) -> bool {
        match &self.backend {
            SourceBackend::Synthetic(source) => source.is_healthy(),
            #[cfg(feature = "ingest-stills")]
            SourceBackend::Stills(source) => source.is_healthy(),
        }
    }

    /// Get frame statistics.
    pub fn stats(&self) -> SourceStats {
        match &self.backend {
            SourceBackend::Synthetic(source) => source.stats(),
            #[cfg(feature = "ingest-stills")]
            SourceBackend::Stills(source) => source.stats(),
        }
    }
}

/// Statistics for a frame source.
#[derive(Clone, Debug)]
pub struct SourceStats {
    pub frames_captured: u64,
    pub url: String,
}

// ----------------------------------------------------------------------------
// Synthetic source (stub://) for tests and demos
// ----------------------------------------------------------------------------

struct SyntheticTableSource {
    config: SourceConfig,
    frame_count: u64,
    /// Simulated table state; changing it changes which scripted scene the
    /// stub detector picks.
    table_state: u8,
}

impl SyntheticTableSource {
    fn new(config: SourceConfig) -> Self {
        Self {
            config,
            frame_count: 0,
            table_state: 0,
        }
    }

    /// Synthetic sources are always "connected".
    fn connect(&mut self) -> Result<()> {
        log::info!("CameraSource: connected to {} (synthetic)", self.config.url);
        Ok(())
    }

    fn next_frame(&mut self) -> Result<Frame> {
        self.frame_count += 1;
        let pixels = self.generate_synthetic_pixels();
        Ok(Frame::new(
            pixels,
            self.config.width,
            self.config.height,
            self.frame_count,
        ))
    }

    /// Generate synthetic pixel data.
    ///
    /// Frames within one table state are identical so the downstream scene
    /// stays stable for a stretch, then the state advances and the scene
    /// changes, like someone rearranging the table every few seconds.
    fn generate_synthetic_pixels(&mut self) -> Vec<u8> {
        let pixel_count = (self.config.width * self.config.height * 3) as usize;

        if self.frame_count % 40 == 0 {
            self.table_state = self.table_state.wrapping_add(1);
        }

        let mut pixels = vec![0u8; pixel_count];
        for (i, pixel) in pixels.iter_mut().enumerate() {
            *pixel = ((i as u64 + self.table_state as u64) % 256) as u8;
        }
        pixels
    }

    fn is_healthy(&self) -> bool {
        true
    }

    fn stats(&self) -> SourceStats {
        SourceStats {
            frames_captured: self.frame_count,
            url: self.config.url.clone(),
        }
    }
}
