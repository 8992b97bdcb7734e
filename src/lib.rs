//! Hand Sampler - stable hand pose capture from hand-tracking sensors.
//!
//! Frames flow from a device into a `Controller`, which keeps a bounded
//! history and dispatches each frame to registered listeners. The
//! `HandSampler` listener classifies the hand as moving or still from a
//! rolling window and latches the hand once it settles.

pub mod commands;
pub mod config;
pub mod device;
pub mod tracking;

pub use config::Config;
pub use device::{Controller, Frame, Hand, Listener};
pub use tracking::{HandSampler, MotionClassifier};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging, honoring `RUST_LOG` when set
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hand_sampler=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
