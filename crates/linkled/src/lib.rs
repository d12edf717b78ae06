//! # linkled
//!
//! Drives a single status LED from the state of a wireless link.
//!
//! ## Module Overview
//! - [`driver`]    – sole owner of the output resource (`init`, `set`, `blink`).
//! - [`listener`]  – maps connectivity events onto the driver.
//! - [`bus`]       – explicit subscription and synchronous event dispatch.
//! - [`event`]     – the two connectivity event kinds.
//! - [`status`]    – live connectivity status sources.
//! - [`config`]    – static port, pin and burst configuration.
//!
//! The hardware is reached only through [`linkled_hal::OutputPlatform`], so
//! the same driver runs against real GPIO or the simulated platform.
//!
//! ```
//! use std::sync::Arc;
//!
//! use linkled::{ConnectivityEvent, ConnectivityListener, EventBus, IndicatorConfig,
//!               IndicatorDriver, SharedLinkStatus};
//! use linkled_hal::sim::SimPlatform;
//!
//! let config = IndicatorConfig::default();
//! let platform = SimPlatform::new().with_port(config.port.clone());
//! let driver = Arc::new(IndicatorDriver::new(platform, &config));
//! driver.boot(config.self_test).unwrap();
//!
//! let link = SharedLinkStatus::new(true);
//! let listener = Arc::new(ConnectivityListener::new(driver, link, config.link_lost));
//! let mut bus = EventBus::new();
//! listener.register(&mut bus);
//!
//! assert!(bus.publish(ConnectivityEvent::ConnectedStateChanged).is_ok());
//! ```

pub mod bus;
pub mod config;
pub mod driver;
pub mod error;
pub mod event;
pub mod indicator;
pub mod listener;
pub mod status;

pub use bus::{DispatchReport, EventBus, EventHandler, HandlerRef};
pub use config::{IndicatorConfig, IndicatorConfigBuilder};
pub use driver::{DriverState, IndicatorDriver};
pub use error::DriverError;
pub use event::ConnectivityEvent;
pub use indicator::{BlinkSpec, Indicator, IndicatorState};
pub use listener::ConnectivityListener;
pub use status::{ConnectivityStatus, SharedLinkStatus};

#[cfg(test)]
mod tests;
