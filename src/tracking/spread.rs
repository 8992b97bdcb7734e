//! Finger spread: distance between the outermost fingertips

use crate::device::history::FrameSource;
use crate::device::listener::Listener;
use crate::device::types::Hand;

/// Distance between the leftmost and rightmost fingertips
///
/// `None` when fewer than two fingers are visible.
pub fn finger_spread(hand: &Hand) -> Option<f32> {
    if hand.fingers.len() < 2 {
        return None;
    }
    let left = hand.leftmost_finger()?;
    let right = hand.rightmost_finger()?;
    Some((right.tip_position - left.tip_position).norm())
}

/// Tracks the spread of the first hand in each frame
#[derive(Debug, Clone, Default)]
pub struct SpreadMonitor {
    latest: Option<f32>,
    max: Option<f32>,
    frames_measured: usize,
}

impl SpreadMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spread in the most recent frame
    pub fn latest(&self) -> Option<f32> {
        self.latest
    }

    /// Largest spread seen so far
    pub fn max(&self) -> Option<f32> {
        self.max
    }

    /// Frames in which a spread could be measured
    pub fn frames_measured(&self) -> usize {
        self.frames_measured
    }
}

impl Listener for SpreadMonitor {
    fn on_frame(&mut self, source: &dyn FrameSource) {
        self.latest = source.current_frame().first_hand().and_then(finger_spread);

        if let Some(spread) = self.latest {
            self.frames_measured += 1;
            self.max = Some(self.max.map_or(spread, |m| m.max(spread)));
            tracing::trace!("Finger spread {:.1}", spread);
        }
    }
}
