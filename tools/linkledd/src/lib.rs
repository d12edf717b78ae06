//! Host-side pieces of the linkled daemon.
//!
//! The binary wires an [`linkled::IndicatorDriver`] to a status file: the
//! [`watcher`] turns file changes into connectivity events, [`daemon`] runs
//! one polling step and the [`config`] module loads the TOML configuration.

pub mod config;
pub mod daemon;
pub mod watcher;

pub use config::{Backend, DaemonConfig};
pub use daemon::{tick, Tick};
pub use watcher::{LinkSnapshot, StatusWatcher};
