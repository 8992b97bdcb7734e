//! Listener and device traits
//!
//! Defines the callback interface that receives frames from a controller,
//! and the interface for the devices that feed frames into it.

use crate::device::controller::Controller;
use crate::device::history::FrameSource;
use async_trait::async_trait;
use parking_lot::Mutex as ParkingMutex;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while streaming frames
#[derive(Error, Debug)]
pub enum DeviceError {
    #[error("Already streaming")]
    AlreadyStreaming,

    #[error("Recording error: {0}")]
    RecordingError(String),

    #[error("Recording contains no frames")]
    EmptyRecording,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for device operations
pub type DeviceResult<T> = Result<T, DeviceError>;

/// Receives lifecycle events and frames from a `Controller`
///
/// Callbacks run on whichever thread pushes frames into the controller,
/// one at a time. A listener must not call back into the controller that
/// is dispatching to it.
pub trait Listener: Send {
    /// Called when the listener is added to a controller
    fn on_init(&mut self) {}

    /// Called when the device connects (or on add, if already connected)
    fn on_connect(&mut self) {}

    fn on_disconnect(&mut self) {}

    /// Called when the listener is removed from a controller
    fn on_exit(&mut self) {}

    /// Called once per frame, after the frame has been appended to history
    fn on_frame(&mut self, source: &dyn FrameSource);
}

/// Listener handle shared between the caller and a controller
pub type SharedListener = Arc<ParkingMutex<dyn Listener>>;

/// Trait for frame-producing devices
///
/// A device pushes frames into a `Controller`, which dispatches them to
/// its listeners.
#[async_trait]
pub trait FrameDevice: Send + Sync {
    /// Get the device identifier (e.g., "replay")
    fn id(&self) -> &str;

    /// Start streaming frames into the controller
    async fn start(&mut self, controller: Controller) -> DeviceResult<()>;

    /// Stop streaming; no-op when not streaming
    async fn stop(&mut self) -> DeviceResult<()>;

    /// Check if the device is currently streaming
    fn is_streaming(&self) -> bool;
}
