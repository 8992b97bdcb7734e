//! Controller: frame history plus listener dispatch

use crate::device::history::{FrameHistory, FrameSource};
use crate::device::listener::SharedListener;
use crate::device::types::Frame;
use parking_lot::Mutex as ParkingMutex;
use std::sync::Arc;

/// Identifies a listener registered on a controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct ControllerInner {
    history: FrameHistory,
    listeners: Vec<(ListenerId, SharedListener)>,
    connected: bool,
    next_id: u64,
}

/// Owns the frame history and dispatches events to listeners
///
/// Cloning yields another handle to the same controller, so a device
/// thread can push frames while the caller adds and removes listeners.
#[derive(Clone)]
pub struct Controller {
    inner: Arc<ParkingMutex<ControllerInner>>,
}

impl Controller {
    pub fn new(history_capacity: usize) -> Self {
        Self {
            inner: Arc::new(ParkingMutex::new(ControllerInner {
                history: FrameHistory::new(history_capacity),
                listeners: Vec::new(),
                connected: false,
                next_id: 0,
            })),
        }
    }

    /// Register a listener; it receives `on_init`, then `on_connect` if the
    /// device is already connected
    pub fn add_listener(&self, listener: SharedListener) -> ListenerId {
        let mut inner = self.inner.lock();
        let id = ListenerId(inner.next_id);
        inner.next_id += 1;

        {
            let mut l = listener.lock();
            l.on_init();
            if inner.connected {
                l.on_connect();
            }
        }

        inner.listeners.push((id, listener));
        tracing::debug!("Listener {:?} added ({} total)", id, inner.listeners.len());
        id
    }

    /// Unregister a listener, calling its `on_exit`
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut inner = self.inner.lock();
        let Some(pos) = inner.listeners.iter().position(|(lid, _)| *lid == id) else {
            return false;
        };

        let (_, listener) = inner.listeners.remove(pos);
        listener.lock().on_exit();
        tracing::debug!("Listener {:?} removed ({} left)", id, inner.listeners.len());
        true
    }

    pub fn connect(&self) {
        let mut inner = self.inner.lock();
        if inner.connected {
            return;
        }
        inner.connected = true;
        for (_, listener) in &inner.listeners {
            listener.lock().on_connect();
        }
        tracing::info!("Device connected");
    }

    pub fn disconnect(&self) {
        let mut inner = self.inner.lock();
        if !inner.connected {
            return;
        }
        inner.connected = false;
        for (_, listener) in &inner.listeners {
            listener.lock().on_disconnect();
        }
        tracing::info!("Device disconnected");
    }

    /// Append a frame and run every listener's `on_frame` in registration order
    pub fn push_frame(&self, frame: Frame) {
        let mut inner = self.inner.lock();
        tracing::trace!("Frame {} ({} hands)", frame.id, frame.hands.len());
        inner.history.push(frame);

        let inner = &*inner;
        for (_, listener) in &inner.listeners {
            listener.lock().on_frame(&inner.history);
        }
    }

    /// Copy of the frame `lookback` steps into the past
    pub fn frame(&self, lookback: usize) -> Frame {
        self.inner.lock().history.frame(lookback).clone()
    }

    pub fn is_connected(&self) -> bool {
        self.inner.lock().connected
    }

    pub fn listener_count(&self) -> usize {
        self.inner.lock().listeners.len()
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(crate::device::history::DEFAULT_HISTORY_CAPACITY)
    }
}
