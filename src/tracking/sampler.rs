//! Stable hand sampling
//!
//! `HandSampler` watches the frame stream and latches the current hand as
//! a viable sample whenever the hand is present and not moving.

use crate::config::SamplerConfig;
use crate::device::history::FrameSource;
use crate::device::listener::Listener;
use crate::device::types::Hand;
use crate::tracking::motion::{MotionClassifier, MotionReading};

#[derive(Debug, Clone)]
pub struct HandSampler {
    classifier: MotionClassifier,
    moving: bool,
    viable: bool,
    sample: Option<Hand>,
    last_reading: Option<MotionReading>,
}

impl HandSampler {
    pub fn new(config: &SamplerConfig) -> Self {
        Self {
            classifier: MotionClassifier::new(config),
            moving: false,
            viable: false,
            sample: None,
            last_reading: None,
        }
    }

    /// Latest stable hand, or `None` if the hand has moved or left since
    pub fn sample(&self) -> Option<&Hand> {
        if self.viable {
            self.sample.as_ref()
        } else {
            None
        }
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    /// Reading from the last frame that had a hand
    pub fn last_reading(&self) -> Option<MotionReading> {
        self.last_reading
    }
}

impl Default for HandSampler {
    fn default() -> Self {
        Self::new(&SamplerConfig::default())
    }
}

impl Listener for HandSampler {
    fn on_init(&mut self) {
        tracing::info!("Hand sampler initialized (window={})", self.classifier.window());
    }

    fn on_connect(&mut self) {
        tracing::info!("Hand sampler connected");
    }

    fn on_disconnect(&mut self) {
        tracing::info!("Hand sampler disconnected");
    }

    fn on_exit(&mut self) {
        tracing::info!("Hand sampler exited");
    }

    fn on_frame(&mut self, source: &dyn FrameSource) {
        let Some(hand) = source.current_frame().first_hand() else {
            self.viable = false;
            return;
        };

        let reading = self.classifier.read(source);
        tracing::trace!(
            "avg_velocity={:.3} avg_turn={:.3} moving={}",
            reading.avg_velocity,
            reading.avg_turn,
            reading.moving
        );

        if self.moving != reading.moving {
            tracing::debug!(
                "Hand {} (frame {})",
                if reading.moving { "started moving" } else { "settled" },
                source.current_frame().id
            );
            self.moving = reading.moving;
        }
        self.last_reading = Some(reading);

        if self.moving {
            self.viable = false;
        } else {
            self.viable = true;
            self.sample = Some(hand.clone());
        }
    }
}
