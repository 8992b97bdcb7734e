//! Replay of recorded frames
//!
//! Implements a `FrameDevice` that plays back a recording on its own
//! thread at a fixed frame interval, standing in for live sensor input.

use crate::config::DeviceConfig;
use crate::device::controller::Controller;
use crate::device::listener::{DeviceError, DeviceResult, FrameDevice};
use crate::device::types::Frame;
use async_trait::async_trait;
use parking_lot::Mutex as ParkingMutex;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Load a recording: a JSON array of frames, oldest first
pub fn load_recording(path: &Path) -> DeviceResult<Vec<Frame>> {
    let data = std::fs::read_to_string(path)?;
    let frames: Vec<Frame> = serde_json::from_str(&data).map_err(|e| {
        DeviceError::RecordingError(format!("Failed to parse {}: {}", path.display(), e))
    })?;

    if frames.is_empty() {
        return Err(DeviceError::EmptyRecording);
    }

    tracing::info!("Loaded {} frames from {}", frames.len(), path.display());
    Ok(frames)
}

/// Write frames in the format `load_recording` reads
pub fn save_recording(path: &Path, frames: &[Frame]) -> DeviceResult<()> {
    let data = serde_json::to_vec_pretty(frames)
        .map_err(|e| DeviceError::RecordingError(e.to_string()))?;
    std::fs::write(path, data)?;
    Ok(())
}

/// Push every frame into the controller without pacing
pub fn replay_into(controller: &Controller, frames: &[Frame]) {
    controller.connect();
    for frame in frames {
        controller.push_frame(frame.clone());
    }
    controller.disconnect();
}

/// Clears the streaming flag when the playback thread exits, including by panic
struct StreamingGuard(Arc<AtomicBool>);

impl Drop for StreamingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct ReplayDevice {
    id: String,
    frames: Arc<Vec<Frame>>,
    config: DeviceConfig,
    is_streaming: Arc<AtomicBool>,
    thread_handle: Arc<ParkingMutex<Option<std::thread::JoinHandle<()>>>>,
}

impl ReplayDevice {
    pub fn new(frames: Vec<Frame>, config: DeviceConfig) -> Self {
        Self {
            id: "replay".to_string(),
            frames: Arc::new(frames),
            config,
            is_streaming: Arc::new(AtomicBool::new(false)),
            thread_handle: Arc::new(ParkingMutex::new(None)),
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

#[async_trait]
impl FrameDevice for ReplayDevice {
    fn id(&self) -> &str {
        &self.id
    }

    async fn start(&mut self, controller: Controller) -> DeviceResult<()> {
        if self.is_streaming.load(Ordering::SeqCst) {
            return Err(DeviceError::AlreadyStreaming);
        }
        if self.frames.is_empty() {
            return Err(DeviceError::EmptyRecording);
        }

        // A previous run that ended on its own leaves a finished handle behind
        if let Some(handle) = self.thread_handle.lock().take() {
            if handle.join().is_err() {
                tracing::warn!("Previous replay thread panicked");
            }
        }

        let is_streaming = self.is_streaming.clone();
        is_streaming.store(true, Ordering::SeqCst);

        let frames = self.frames.clone();
        let interval = Duration::from_millis(self.config.frame_interval_ms);
        let loop_playback = self.config.loop_playback;

        let spawned = std::thread::Builder::new()
            .name("replay-device".to_string())
            .spawn(move || {
                let _streaming = StreamingGuard(is_streaming.clone());
                tracing::info!(
                    "Replay started ({} frames, interval={:?}, loop={})",
                    frames.len(),
                    interval,
                    loop_playback
                );
                controller.connect();

                'playback: loop {
                    for frame in frames.iter() {
                        if !is_streaming.load(Ordering::Relaxed) {
                            break 'playback;
                        }
                        controller.push_frame(frame.clone());
                        if !interval.is_zero() {
                            std::thread::sleep(interval);
                        }
                    }
                    if !loop_playback {
                        break;
                    }
                }

                controller.disconnect();
                tracing::info!("Replay finished");
            });

        let handle = match spawned {
            Ok(handle) => handle,
            Err(e) => {
                self.is_streaming.store(false, Ordering::SeqCst);
                return Err(e.into());
            }
        };

        *self.thread_handle.lock() = Some(handle);
        Ok(())
    }

    async fn stop(&mut self) -> DeviceResult<()> {
        self.is_streaming.store(false, Ordering::SeqCst);

        let handle = self.thread_handle.lock().take();
        if let Some(handle) = handle {
            tokio::task::spawn_blocking(move || handle.join())
                .await
                .map_err(|e| DeviceError::RecordingError(format!("Replay task failed: {}", e)))?
                .map_err(|_| DeviceError::RecordingError("Replay thread panicked".to_string()))?;
            tracing::info!("Replay stopped");
        }
        Ok(())
    }

    fn is_streaming(&self) -> bool {
        self.is_streaming.load(Ordering::SeqCst)
    }
}

impl Drop for ReplayDevice {
    fn drop(&mut self) {
        // Let a detached playback thread run out instead of looping forever
        self.is_streaming.store(false, Ordering::SeqCst);
    }
}
