//! Finger spread over a recording

use crate::commands::replay_with;
use crate::config::Config;
use crate::device::Frame;
use crate::tracking::SpreadMonitor;
use parking_lot::Mutex as ParkingMutex;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpreadSummary {
    /// Spread per frame, `None` where it could not be measured
    pub frames: Vec<(i64, Option<f32>)>,
    pub max_spread: Option<f32>,
    pub frames_measured: usize,
}

pub fn measure_spread(config: &Config, frames: &[Frame]) -> SpreadSummary {
    let monitor = Arc::new(ParkingMutex::new(SpreadMonitor::new()));
    let mut spreads = Vec::with_capacity(frames.len());

    replay_with(config, frames, monitor.clone(), |frame| {
        spreads.push((frame.id, monitor.lock().latest()));
    });

    let monitor = monitor.lock();
    tracing::info!(
        "Measured spread in {} of {} frames",
        monitor.frames_measured(),
        frames.len()
    );

    SpreadSummary {
        frames: spreads,
        max_spread: monitor.max(),
        frames_measured: monitor.frames_measured(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{Finger, Hand, Vector};

    fn frame_with_span(id: i64, span: Option<f32>) -> Frame {
        let hands = span
            .map(|s| Hand {
                id: 1,
                palm_position: Vector::zeros(),
                palm_velocity: Vector::zeros(),
                fingers: vec![
                    Finger {
                        id: 0,
                        tip_position: Vector::new(-s / 2.0, 0.0, 0.0),
                        length: 50.0,
                    },
                    Finger {
                        id: 1,
                        tip_position: Vector::new(s / 2.0, 0.0, 0.0),
                        length: 50.0,
                    },
                ],
            })
            .into_iter()
            .collect();
        Frame {
            id,
            timestamp_us: 0,
            valid: true,
            hands,
        }
    }

    #[test]
    fn test_measure_spread() {
        let frames = vec![
            frame_with_span(0, Some(40.0)),
            frame_with_span(1, None),
            frame_with_span(2, Some(90.0)),
        ];

        let summary = measure_spread(&Config::default(), &frames);

        assert_eq!(summary.frames, vec![(0, Some(40.0)), (1, None), (2, Some(90.0))]);
        assert_eq!(summary.max_spread, Some(90.0));
        assert_eq!(summary.frames_measured, 2);
    }
}
