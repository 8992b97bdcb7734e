//! Per-frame hand analysis
//!
//! Motion classification over a sliding window, stable hand sampling,
//! finger spread, and control/test comparison.

pub mod compare;
pub mod motion;
pub mod sampler;
pub mod spread;

pub use compare::{finger_count_difference, ComparisonReport};
pub use motion::{MotionClassifier, MotionReading};
pub use sampler::HandSampler;
pub use spread::{finger_spread, SpreadMonitor};
