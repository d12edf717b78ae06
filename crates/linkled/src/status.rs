//! Source of the live "is the link up" answer.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Answers whether the active link is currently connected.
pub trait ConnectivityStatus: Send + Sync {
    fn current_connected_status(&self) -> bool;
}

impl<F> ConnectivityStatus for F
where
    F: Fn() -> bool + Send + Sync,
{
    fn current_connected_status(&self) -> bool {
        self()
    }
}

/// Shared flag written by whoever watches the link and read by the listener.
///
/// Clones observe the same value.
#[derive(Debug, Clone, Default)]
pub struct SharedLinkStatus {
    connected: Arc<AtomicBool>,
}

impl SharedLinkStatus {
    pub fn new(connected: bool) -> Self {
        Self {
            connected: Arc::new(AtomicBool::new(connected)),
        }
    }

    /// Stores the new status and returns the previous one.
    pub fn set(&self, connected: bool) -> bool {
        self.connected.swap(connected, Ordering::AcqRel)
    }

    pub fn get(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }
}

impl ConnectivityStatus for SharedLinkStatus {
    fn current_connected_status(&self) -> bool {
        self.get()
    }
}
