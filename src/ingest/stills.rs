use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use super::camera::{SourceConfig, SourceStats};
use crate::frame::Frame;

/// Still-image directory source. Plays back the JPEGs of a directory in
/// name order, looping at the end.
pub(super) struct StillsSource {
    config: SourceConfig,
    paths: Vec<PathBuf>,
    cursor: usize,
    frame_count: u64,
    last_error: Option<String>,
}

impl StillsSource {
    pub(super) fn new(config: SourceConfig) -> Result<Self> {
        let dir = PathBuf::from(&config.url);
        if !dir.is_dir() {
            return Err(anyhow!("stills source {} is not a directory", dir.display()));
        }

        let mut paths: Vec<PathBuf> = fs::read_dir(&dir)
            .with_context(|| format!("listing stills in {}", dir.display()))?
            .filter_map(|entry| entry.ok().map(|entry| entry.path()))
            .filter(|path| {
                matches!(
                    path.extension().and_then(|ext| ext.to_str()),
                    Some("jpg") | Some("jpeg")
                )
            })
            .collect();
        paths.sort();

        if paths.is_empty() {
            return Err(anyhow!("no .jpg stills found in {}", dir.display()));
        }
        Ok(Self {
            config,
            paths,
            cursor: 0,
            frame_count: 0,
            last_error: None,
        })
    }

    pub(super) fn connect(&mut self) -> Result<()> {
        log::info!(
            "CameraSource: {} stills queued from {}",
            self.paths.len(),
            self.config.url
        );
        Ok(())
    }

    pub(super) fn next_frame(&mut self) -> Result<Frame> {
        let path = self.paths[self.cursor].clone();
        self.cursor = (self.cursor + 1) % self.paths.len();

        let decoded = image::ImageReader::open(&path)
            .with_context(|| format!("opening still {}", path.display()))
            .and_then(|reader| {
                reader
                    .decode()
                    .with_context(|| format!("decoding still {}", path.display()))
            });
        let rgb = match decoded {
            Ok(img) => img.to_rgb8(),
            Err(e) => {
                self.last_error = Some(e.to_string());
                return Err(e);
            }
        };

        self.frame_count += 1;
        let (width, height) = (rgb.width(), rgb.height());
        Ok(Frame::new(rgb.into_raw(), width, height, self.frame_count))
    }

    pub(super) fn is_healthy(&self) -> bool {
        self.last_error.is_none()
    }

    pub(super) fn stats(&self) -> SourceStats {
        SourceStats {
            frames_captured: self.frame_count,
            url: self.config.url.clone(),
        }
    }
}
