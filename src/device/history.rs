//! Bounded frame history with look-back access.

use crate::device::types::Frame;
use std::collections::VecDeque;

/// Default number of frames kept for look-back
pub const DEFAULT_HISTORY_CAPACITY: usize = 60;

/// Look-back access to recent frames
///
/// Index 0 is the current frame, 1 the one before it, and so on.
/// Lookbacks past the stored history yield an invalid frame, so callers
/// check validity instead of bounds.
pub trait FrameSource {
    fn frame(&self, lookback: usize) -> &Frame;

    fn current_frame(&self) -> &Frame {
        self.frame(0)
    }
}

/// Ring of the most recent frames, newest at the back
#[derive(Debug, Clone)]
pub struct FrameHistory {
    capacity: usize,
    frames: VecDeque<Frame>,
    invalid: Frame,
}

impl FrameHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            frames: VecDeque::with_capacity(capacity),
            invalid: Frame::invalid(),
        }
    }

    /// Append a frame, evicting the oldest when full
    pub fn push(&mut self, frame: Frame) {
        if self.frames.len() == self.capacity {
            self.frames.pop_front();
        }
        self.frames.push_back(frame);
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

impl Default for FrameHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl FrameSource for FrameHistory {
    fn frame(&self, lookback: usize) -> &Frame {
        if lookback >= self.frames.len() {
            return &self.invalid;
        }
        &self.frames[self.frames.len() - 1 - lookback]
    }
}
