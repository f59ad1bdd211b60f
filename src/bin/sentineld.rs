//! sentineld - table-setting placement daemon
//!
//! This daemon:
//! 1. Ingests frames from the configured source
//! 2. Runs the configured detector backend on each frame
//! 3. Reduces detections to the per-frame placement snapshot
//! 4. Evaluates the fork < knife < spoon rule and renders the verdict
//! 5. Pushes slot texts to the status panel and frames to the recorder

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};

use utensil_sentinel::{
    BackendRegistry, CameraSource, ClassVocabulary, Pipeline, Recorder, SentinelConfig,
    StubBackend, TerminalPanel,
};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = SentinelConfig::load()?;

    let vocabulary = match &cfg.classes_path {
        Some(path) => ClassVocabulary::load(path)?,
        None => ClassVocabulary::tableware(),
    };
    log::info!("class vocabulary: {} labels", vocabulary.len());

    let mut registry = BackendRegistry::new();
    registry.register(StubBackend::new());
    registry.set_default(&cfg.backend)?;
    let backend = registry
        .default_backend()
        .ok_or_else(|| anyhow!("no detector backend registered"))?;
    backend
        .lock()
        .map_err(|_| anyhow!("detector backend lock poisoned"))?
        .warm_up()?;

    let mut source = CameraSource::new(cfg.source.clone())?;
    source.connect()?;

    let mut recorder = Recorder::new(&cfg.record_dir);
    if cfg.record {
        recorder.start()?;
    }
    let mut pipeline =
        Pipeline::new(backend, vocabulary, TerminalPanel::new()).with_recorder(recorder);

    let running = Arc::new(AtomicBool::new(true));
    let flag = running.clone();
    ctrlc::set_handler(move || {
        flag.store(false, Ordering::SeqCst);
    })?;

    let frame_interval = Duration::from_millis(1000 / cfg.source.target_fps.max(1) as u64);
    let mut last_health_log = Instant::now();

    log::info!(
        "sentineld running: source={} backend={} mode={:?}",
        cfg.source.url,
        cfg.backend,
        cfg.mode
    );

    while running.load(Ordering::SeqCst) {
        let mut frame = source.next_frame()?;
        let summary = pipeline.run_frame(&mut frame, cfg.mode)?;

        if let Some(verdict) = &summary.verdict {
            log::debug!(
                "frame #{}: {} detections, ordering {:?}, {} missing",
                summary.frame_index,
                summary.detections,
                verdict.ordering,
                verdict.missing.len()
            );
        }

        if last_health_log.elapsed() >= Duration::from_secs(5) {
            let stats = source.stats();
            log::info!(
                "source health={} frames={} url={}",
                source.is_healthy(),
                stats.frames_captured,
                stats.url
            );
            last_health_log = Instant::now();
        }

        std::thread::sleep(frame_interval);
    }

    if let Some(recorder) = pipeline.recorder_mut() {
        recorder.stop()?;
    }
    log::info!("sentineld stopped");
    Ok(())
}
