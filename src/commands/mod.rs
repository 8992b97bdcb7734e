//! Command handlers
//!
//! One module per sample program. Each handler drives a controller with a
//! recording and returns its result as data; the binary prints it.

pub mod classify;
pub mod compare;
pub mod spread;

use crate::config::Config;
use crate::device::listener::SharedListener;
use crate::device::{replay_into, Controller, Frame};

/// Replay `frames` into a fresh controller with `listener` attached,
/// calling `after_frame` once each frame has been dispatched
pub(crate) fn replay_with<F>(
    config: &Config,
    frames: &[Frame],
    listener: SharedListener,
    mut after_frame: F,
) where
    F: FnMut(&Frame),
{
    let controller = Controller::new(config.device.history_capacity);
    let id = controller.add_listener(listener);

    controller.connect();
    for frame in frames {
        controller.push_frame(frame.clone());
        after_frame(frame);
    }
    controller.disconnect();
    controller.remove_listener(id);
}

/// Replay without a per-frame hook
pub(crate) fn replay_all(config: &Config, frames: &[Frame], listener: SharedListener) {
    let controller = Controller::new(config.device.history_capacity);
    let id = controller.add_listener(listener);
    replay_into(&controller, frames);
    controller.remove_listener(id);
}
