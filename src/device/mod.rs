//! Hand-tracking device abstraction
//!
//! Frames and hand geometry, the bounded frame history listeners look back
//! into, the controller that dispatches frames, and a replay device that
//! feeds recorded frames.

pub mod controller;
pub mod history;
pub mod listener;
pub mod replay;
pub mod types;

pub use controller::{Controller, ListenerId};
pub use history::{FrameHistory, FrameSource};
pub use listener::{DeviceError, DeviceResult, FrameDevice, Listener, SharedListener};
pub use replay::{load_recording, replay_into, save_recording, ReplayDevice};
pub use types::{Finger, Frame, Hand, Vector};
