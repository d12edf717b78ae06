//! Status file watcher.
//!
//! Whatever manages the radio writes a small TOML file:
//!
//! ```toml
//! connected = true
//! profile = 1
//! ```
//!
//! Each poll compares the file with the previous reading and turns the
//! differences into connectivity events. A missing or malformed file reads as
//! "disconnected".

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use linkled::{ConnectivityEvent, SharedLinkStatus};
use serde::Deserialize;
use tracing::{debug, warn};

/// One reading of the status file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct LinkSnapshot {
    pub connected: bool,
    #[serde(default)]
    pub profile: u8,
}

pub struct StatusWatcher {
    path: PathBuf,
    link: SharedLinkStatus,
    last: Option<LinkSnapshot>,
    unreadable: bool,
}

impl StatusWatcher {
    /// `link` receives the connected flag on every poll.
    pub fn new(path: impl Into<PathBuf>, link: SharedLinkStatus) -> Self {
        Self {
            path: path.into(),
            link,
            last: None,
            unreadable: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> anyhow::Result<LinkSnapshot> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("cannot read {}", self.path.display()))?;
        toml::from_str(&text).with_context(|| format!("malformed {}", self.path.display()))
    }

    /// Reads the file, publishes the connected flag and returns what changed.
    ///
    /// The first poll always reports `ConnectedStateChanged` so the indicator
    /// leaves its post-boot state.
    pub fn poll(&mut self) -> Vec<ConnectivityEvent> {
        let snapshot = match self.read() {
            Ok(snapshot) => {
                self.unreadable = false;
                snapshot
            }
            Err(err) => {
                if !self.unreadable {
                    warn!("{err:#}; treating link as down");
                    self.unreadable = true;
                }
                LinkSnapshot {
                    connected: false,
                    profile: self.last.map_or(0, |last| last.profile),
                }
            }
        };

        self.link.set(snapshot.connected);
        let previous = self.last.replace(snapshot);

        let mut events = Vec::new();
        match previous {
            None => events.push(ConnectivityEvent::ConnectedStateChanged),
            Some(previous) => {
                if previous.profile != snapshot.profile {
                    events.push(ConnectivityEvent::ActiveProfileChanged);
                }
                if previous.connected != snapshot.connected {
                    events.push(ConnectivityEvent::ConnectedStateChanged);
                }
            }
        }
        if !events.is_empty() {
            debug!(?snapshot, ?events, "link status changed");
        }
        events
    }
}
