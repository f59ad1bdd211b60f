//! Frame recording.
//!
//! Writes annotated frames as PPM stills into a per-session directory and
//! drops a JSON manifest when the session stops. Encoding the stills into
//! a video container is left to external tooling; nothing here may stall
//! the frame loop beyond one file write per frame.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::frame::Frame;

pub struct Recorder {
    root: PathBuf,
    session: Option<Session>,
}

struct Session {
    dir: PathBuf,
    started_epoch_s: u64,
    frames_written: u64,
    width: u32,
    height: u32,
}

#[derive(Serialize)]
struct SessionManifest {
    started_epoch_s: u64,
    frames_written: u64,
    width: u32,
    height: u32,
}

impl Recorder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            session: None,
        }
    }

    pub fn is_recording(&self) -> bool {
        self.session.is_some()
    }

    /// Start a session. Creates the session directory if needed; starting
    /// while already recording is a no-op.
    pub fn start(&mut self) -> Result<()> {
        if self.session.is_some() {
            return Ok(());
        }
        let started_epoch_s = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .context("reading system clock")?
            .as_secs();
        let dir = self.root.join(format!("session-{started_epoch_s}"));
        ensure_directory(&dir)?;
        log::info!("recording to {}", dir.display());
        self.session = Some(Session {
            dir,
            started_epoch_s,
            frames_written: 0,
            width: 0,
            height: 0,
        });
        Ok(())
    }

    /// Write one frame as a PPM still. No-op while stopped.
    pub fn write_frame(&mut self, frame: &Frame) -> Result<()> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        let path = session
            .dir
            .join(format!("frame-{:08}.ppm", session.frames_written));

        let mut data = Vec::with_capacity(frame.byte_len() + 32);
        data.extend_from_slice(format!("P6\n{} {}\n255\n", frame.width, frame.height).as_bytes());
        data.extend_from_slice(frame.pixels());
        fs::write(&path, data).with_context(|| format!("writing frame to {}", path.display()))?;

        session.frames_written += 1;
        session.width = frame.width;
        session.height = frame.height;
        Ok(())
    }

    /// Stop the session and write its manifest. Returns the session
    /// directory, or None when no session was running.
    pub fn stop(&mut self) -> Result<Option<PathBuf>> {
        let Some(session) = self.session.take() else {
            return Ok(None);
        };
        let manifest = SessionManifest {
            started_epoch_s: session.started_epoch_s,
            frames_written: session.frames_written,
            width: session.width,
            height: session.height,
        };
        let path = session.dir.join("session.json");
        fs::write(&path, serde_json::to_vec_pretty(&manifest)?)
            .with_context(|| format!("writing session manifest to {}", path.display()))?;
        log::info!("recording stopped after {} frames", session.frames_written);
        Ok(Some(session.dir))
    }
}

/// Create a directory if it does not exist yet.
pub fn ensure_directory(path: &Path) -> Result<()> {
    if path.exists() {
        log::debug!("directory {} already exists", path.display());
        return Ok(());
    }
    fs::create_dir_all(path).with_context(|| format!("creating directory {}", path.display()))?;
    log::info!("directory {} created", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_frame() -> Frame {
        Frame::new(vec![128u8; 4 * 4 * 3], 4, 4, 1)
    }

    #[test]
    fn records_frames_and_writes_a_manifest() -> Result<()> {
        let root = tempfile::tempdir()?;
        let mut recorder = Recorder::new(root.path());

        recorder.start()?;
        assert!(recorder.is_recording());
        recorder.write_frame(&small_frame())?;
        recorder.write_frame(&small_frame())?;

        let dir = recorder.stop()?.expect("session directory");
        assert!(!recorder.is_recording());
        assert!(dir.join("frame-00000000.ppm").exists());
        assert!(dir.join("frame-00000001.ppm").exists());

        let manifest = fs::read_to_string(dir.join("session.json"))?;
        let parsed: serde_json::Value = serde_json::from_str(&manifest)?;
        assert_eq!(parsed["frames_written"], 2);
        assert_eq!(parsed["width"], 4);
        Ok(())
    }

    #[test]
    fn writes_are_no_ops_while_stopped() -> Result<()> {
        let root = tempfile::tempdir()?;
        let mut recorder = Recorder::new(root.path());

        recorder.write_frame(&small_frame())?;
        assert!(recorder.stop()?.is_none());
        assert_eq!(fs::read_dir(root.path())?.count(), 0);
        Ok(())
    }

    #[test]
    fn ppm_header_matches_frame_dimensions() -> Result<()> {
        let root = tempfile::tempdir()?;
        let mut recorder = Recorder::new(root.path());
        recorder.start()?;
        recorder.write_frame(&small_frame())?;
        let dir = recorder.stop()?.expect("session directory");

        let data = fs::read(dir.join("frame-00000000.ppm"))?;
        assert!(data.starts_with(b"P6\n4 4\n255\n"));
        assert_eq!(data.len(), "P6\n4 4\n255\n".len() + 4 * 4 * 3);
        Ok(())
    }
}
