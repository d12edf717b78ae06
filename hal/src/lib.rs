//! Output platform abstraction for the linkled status indicator
//!
//! This crate describes the few hardware operations a single binary indicator
//! needs: acquire a port, check that it is ready, configure a pin as output,
//! drive it and wait. The indicator logic is written once against
//! [`OutputPlatform`]; the backend is picked by whoever builds the driver.
//!
//! ## Backends
//! - [`sim::SimPlatform`] – in-memory stand-in that records every operation
//! - [`sysfs::SysfsPlatform`] – Linux `/sys/class/gpio` interface
//!
//! ## Example
//! ```
//! use linkled_hal::sim::SimPlatform;
//! use linkled_hal::{Level, OutputPlatform};
//!
//! let mut platform = SimPlatform::new().with_port("gpio1");
//! let handle = platform.acquire("gpio1").unwrap();
//! platform.configure_output(&handle, 10).unwrap();
//! platform.write(&handle, 10, Level::High).unwrap();
//! assert_eq!(platform.writes(), vec![(10, Level::High)]);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod error;
pub mod gpio;

#[cfg(feature = "std")]
pub mod sim;
#[cfg(feature = "std")]
pub mod sysfs;

// Re-export commonly used types
pub use error::{HalError, HalResult};
pub use gpio::{Level, OutputPlatform};
