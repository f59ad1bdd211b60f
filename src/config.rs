use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::driver::RunMode;
use crate::ingest::SourceConfig;

const DEFAULT_SOURCE_URL: &str = "stub://tabletop";
const DEFAULT_TARGET_FPS: u32 = 15;
const DEFAULT_WIDTH: u32 = 1280;
const DEFAULT_HEIGHT: u32 = 720;
const DEFAULT_BACKEND: &str = "stub";
const DEFAULT_RECORD_DIR: &str = "recorded-frames";

#[derive(Debug, Deserialize, Default)]
struct SentinelConfigFile {
    backend: Option<String>,
    mode: Option<String>,
    classes_path: Option<PathBuf>,
    source: Option<SourceConfigFile>,
    recording: Option<RecordingConfigFile>,
}

#[derive(Debug, Deserialize, Default)]
struct SourceConfigFile {
    url: Option<String>,
    target_fps: Option<u32>,
    width: Option<u32>,
    height: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
struct RecordingConfigFile {
    dir: Option<String>,
    enabled: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct SentinelConfig {
    /// Detector backend name to select from the registry.
    pub backend: String,
    /// Initial run mode; the display layer may toggle it afterwards.
    pub mode: RunMode,
    /// Optional classes.txt-style vocabulary file.
    pub classes_path: Option<PathBuf>,
    pub source: SourceConfig,
    pub record_dir: PathBuf,
    /// Start recording as soon as the daemon comes up.
    pub record: bool,
}

impl SentinelConfig {
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("SENTINEL_CONFIG").ok();
        let file_cfg = match config_path.as_deref() {
            Some(path) => Some(read_config_file(Path::new(path))?),
            None => None,
        };
        let mut cfg = Self::from_file(file_cfg.unwrap_or_default())?;
        cfg.apply_env()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn from_file(file: SentinelConfigFile) -> Result<Self> {
        let backend = file.backend.unwrap_or_else(|| DEFAULT_BACKEND.to_string());
        let mode = match file.mode.as_deref() {
            Some(raw) => raw.parse()?,
            None => RunMode::Detection,
        };
        let source = SourceConfig {
            url: file
                .source
                .as_ref()
                .and_then(|source| source.url.clone())
                .unwrap_or_else(|| DEFAULT_SOURCE_URL.to_string()),
            target_fps: file
                .source
                .as_ref()
                .and_then(|source| source.target_fps)
                .unwrap_or(DEFAULT_TARGET_FPS),
            width: file
                .source
                .as_ref()
                .and_then(|source| source.width)
                .unwrap_or(DEFAULT_WIDTH),
            height: file
                .source
                .as_ref()
                .and_then(|source| source.height)
                .unwrap_or(DEFAULT_HEIGHT),
        };
        let record_dir = file
            .recording
            .as_ref()
            .and_then(|recording| recording.dir.clone())
            .unwrap_or_else(|| DEFAULT_RECORD_DIR.to_string());
        let record = file
            .recording
            .and_then(|recording| recording.enabled)
            .unwrap_or(false);
        Ok(Self {
            backend,
            mode,
            classes_path: file.classes_path,
            source,
            record_dir: PathBuf::from(record_dir),
            record,
        })
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(url) = std::env::var("SENTINEL_SOURCE_URL") {
            if !url.trim().is_empty() {
                self.source.url = url;
            }
        }
        if let Ok(backend) = std::env::var("SENTINEL_BACKEND") {
            if !backend.trim().is_empty() {
                self.backend = backend;
            }
        }
        if let Ok(mode) = std::env::var("SENTINEL_MODE") {
            if !mode.trim().is_empty() {
                self.mode = mode.parse()?;
            }
        }
        if let Ok(path) = std::env::var("SENTINEL_CLASSES") {
            if !path.trim().is_empty() {
                self.classes_path = Some(PathBuf::from(path));
            }
        }
        if let Ok(dir) = std::env::var("SENTINEL_RECORD_DIR") {
            if !dir.trim().is_empty() {
                self.record_dir = PathBuf::from(dir);
            }
        }
        if let Ok(record) = std::env::var("SENTINEL_RECORD") {
            self.record = matches!(record.trim(), "1" | "true" | "yes");
        }
        if let Ok(fps) = std::env::var("SENTINEL_TARGET_FPS") {
            let parsed: u32 = fps
                .parse()
                .map_err(|_| anyhow!("SENTINEL_TARGET_FPS must be an integer frame rate"))?;
            self.source.target_fps = parsed;
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.source.target_fps == 0 {
            return Err(anyhow!("target_fps must be greater than zero"));
        }
        if self.source.width == 0 || self.source.height == 0 {
            return Err(anyhow!("frame dimensions must be greater than zero"));
        }
        if self.backend.trim().is_empty() {
            return Err(anyhow!("backend name must not be empty"));
        }
        Ok(())
    }
}

fn read_config_file(path: &Path) -> Result<SentinelConfigFile> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("failed to read config file {}: {}", path.display(), e))?;
    let cfg = toml::from_str(&raw)
        .map_err(|e| anyhow!("invalid config file {}: {}", path.display(), e))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_apply_when_the_file_is_empty() {
        let cfg = SentinelConfig::from_file(SentinelConfigFile::default()).unwrap();
        assert_eq!(cfg.backend, "stub");
        assert_eq!(cfg.mode, RunMode::Detection);
        assert_eq!(cfg.source.url, "stub://tabletop");
        assert_eq!(cfg.source.target_fps, 15);
        assert!(!cfg.record);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn toml_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
backend = "stub"
mode = "preview"

[source]
url = "stub://kitchen"
target_fps = 5

[recording]
dir = "kitchen-sessions"
enabled = true
"#
        )
        .unwrap();

        let parsed = read_config_file(file.path()).unwrap();
        let cfg = SentinelConfig::from_file(parsed).unwrap();
        assert_eq!(cfg.mode, RunMode::Preview);
        assert_eq!(cfg.source.url, "stub://kitchen");
        assert_eq!(cfg.source.target_fps, 5);
        assert_eq!(cfg.source.width, 1280);
        assert_eq!(cfg.record_dir, PathBuf::from("kitchen-sessions"));
        assert!(cfg.record);
    }

    #[test]
    fn unknown_modes_are_rejected() {
        let file = SentinelConfigFile {
            mode: Some("tracking".to_string()),
            ..SentinelConfigFile::default()
        };
        assert!(SentinelConfig::from_file(file).is_err());
    }

    #[test]
    fn zero_fps_fails_validation() {
        let file = SentinelConfigFile {
            source: Some(SourceConfigFile {
                target_fps: Some(0),
                ..SourceConfigFile::default()
            }),
            ..SentinelConfigFile::default()
        };
        let cfg = SentinelConfig::from_file(file).unwrap();
        assert!(cfg.validate().is_err());
    }
}
