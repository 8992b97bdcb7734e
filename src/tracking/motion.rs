//! Rolling-average motion classification
//!
//! A hand counts as moving when either its average palm speed or its
//! average frame-to-frame palm translation over the last N frames exceeds
//! a threshold.
//!
//! Frames that are invalid or have no hand contribute nothing to the sums,
//! but the averages are always divided by the full window size. A sparse
//! window therefore reads as slower than the hand actually moved.

use crate::config::{AveragingMode, SamplerConfig};
use crate::device::history::FrameSource;
use crate::device::types::Vector;
use serde::Serialize;

/// Both window averages and the resulting classification
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MotionReading {
    pub avg_velocity: f32,
    pub avg_turn: f32,
    pub moving: bool,
}

#[derive(Debug, Clone)]
pub struct MotionClassifier {
    window: usize,
    moving_velocity: f32,
    moving_turn: f32,
    averaging: AveragingMode,
}

impl MotionClassifier {
    pub fn new(config: &SamplerConfig) -> Self {
        Self {
            window: config.history.max(1),
            moving_velocity: config.moving_velocity,
            moving_turn: config.moving_turn,
            averaging: config.averaging,
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Average palm velocity of the first hand over lookbacks `0..window`
    pub fn average_velocity(&self, source: &dyn FrameSource) -> f32 {
        let samples = (0..self.window).filter_map(|i| {
            source.frame(i).first_hand().map(|hand| hand.palm_velocity)
        });
        self.average(samples)
    }

    /// Average palm translation of the first hand in frame `i` relative to
    /// frame `i - 1`, over lookbacks `0..window`
    ///
    /// Lookback 0 has no frame `i - 1` and contributes zero, so at most
    /// `window - 1` terms are summed.
    pub fn average_turn(&self, source: &dyn FrameSource) -> f32 {
        let samples = (1..self.window).filter_map(|i| {
            source
                .frame(i)
                .first_hand()
                .map(|hand| hand.translation(source.frame(i - 1)))
        });
        self.average(samples)
    }

    /// Strict comparison: a reading exactly at a threshold is not moving
    pub fn classify(&self, avg_velocity: f32, avg_turn: f32) -> bool {
        avg_velocity > self.moving_velocity || avg_turn > self.moving_turn
    }

    pub fn read(&self, source: &dyn FrameSource) -> MotionReading {
        let avg_velocity = self.average_velocity(source);
        let avg_turn = self.average_turn(source);
        MotionReading {
            avg_velocity,
            avg_turn,
            moving: self.classify(avg_velocity, avg_turn),
        }
    }

    pub fn is_moving(&self, source: &dyn FrameSource) -> bool {
        self.read(source).moving
    }

    fn average(&self, samples: impl Iterator<Item = Vector>) -> f32 {
        let n = self.window as f32;
        match self.averaging {
            AveragingMode::Magnitude => samples.map(|v| v.norm()).sum::<f32>() / n,
            AveragingMode::Vector => (samples.fold(Vector::zeros(), |acc, v| acc + v) / n).norm(),
        }
    }
}

impl Default for MotionClassifier {
    fn default() -> Self {
        Self::new(&SamplerConfig::default())
    }
}
