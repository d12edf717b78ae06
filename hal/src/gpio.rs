//! Binary output abstraction

use core::fmt;

use crate::error::HalResult;

/// GPIO pin levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Low level (0V)
    Low,
    /// High level (VCC)
    High,
}

impl Level {
    pub const fn is_high(self) -> bool {
        matches!(self, Level::High)
    }
}

/// Platform capable of driving one output line of a named port.
///
/// Implementations must honour the same contract whether they talk to real
/// hardware or simulate it: `acquire` yields `None` when the port does not
/// exist, and every other call takes the handle returned by `acquire`.
pub trait OutputPlatform: Send {
    /// Handle to an acquired port
    type Handle: Clone + Send + fmt::Debug;

    /// Look up a port by its logical name
    fn acquire(&mut self, port: &str) -> Option<Self::Handle>;

    /// Whether the port behind `handle` can currently be used
    fn is_ready(&self, handle: &Self::Handle) -> bool;

    /// Configure `pin` as a push-pull output
    fn configure_output(&mut self, handle: &Self::Handle, pin: u32) -> HalResult<()>;

    /// Drive `pin` to `level`
    fn write(&mut self, handle: &Self::Handle, pin: u32, level: Level) -> HalResult<()>;

    /// Block the calling thread for `ms` milliseconds
    fn delay_ms(&mut self, ms: u32);
}
