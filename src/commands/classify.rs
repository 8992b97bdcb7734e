//! Per-frame motion classification of a recording

use crate::commands::replay_with;
use crate::config::Config;
use crate::device::Frame;
use crate::tracking::{HandSampler, MotionReading};
use parking_lot::Mutex as ParkingMutex;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedFrame {
    pub frame_id: i64,
    /// `None` for frames without a hand
    pub reading: Option<MotionReading>,
    pub viable: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifySummary {
    pub frames: Vec<ClassifiedFrame>,
    pub moving_frames: usize,
    pub viable_frames: usize,
}

pub fn classify_recording(config: &Config, frames: &[Frame]) -> ClassifySummary {
    let sampler = Arc::new(ParkingMutex::new(HandSampler::new(&config.sampler)));
    let mut classified = Vec::with_capacity(frames.len());

    replay_with(config, frames, sampler.clone(), |frame| {
        let sampler = sampler.lock();
        let reading = frame.first_hand().and(sampler.last_reading());
        classified.push(ClassifiedFrame {
            frame_id: frame.id,
            reading,
            viable: sampler.sample().is_some(),
        });
    });

    let moving_frames = classified
        .iter()
        .filter(|f| f.reading.is_some_and(|r| r.moving))
        .count();
    let viable_frames = classified.iter().filter(|f| f.viable).count();

    tracing::info!(
        "Classified {} frames ({} moving, {} viable)",
        classified.len(),
        moving_frames,
        viable_frames
    );

    ClassifySummary {
        frames: classified,
        moving_frames,
        viable_frames,
    }
}
