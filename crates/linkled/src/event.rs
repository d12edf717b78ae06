//! Connectivity events.
//!
//! Events carry no payload: they only say that something about the link may
//! have changed. Profile switches and connection changes can interleave, so the
//! receiver always asks for the live status instead of trusting the event.

use core::fmt;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Kind of connectivity notification.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectivityEvent {
    /// The active profile connected or disconnected.
    ConnectedStateChanged,
    /// A different profile became the active one.
    ActiveProfileChanged,
}

impl ConnectivityEvent {
    /// Every event kind, in subscription order.
    pub const ALL: [ConnectivityEvent; 2] = [
        ConnectivityEvent::ConnectedStateChanged,
        ConnectivityEvent::ActiveProfileChanged,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::ConnectedStateChanged => "connected-state-changed",
            Self::ActiveProfileChanged => "active-profile-changed",
        }
    }
}

impl fmt::Display for ConnectivityEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
