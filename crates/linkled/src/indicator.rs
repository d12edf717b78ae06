//! Indicator states, blink bursts and the [`Indicator`] seam.

use core::fmt;
use core::time::Duration;

use linkled_hal::Level;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::DriverError;

/// Binary indicator state.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorState {
    On,
    Off,
}

impl IndicatorState {
    /// Pin level that produces this state.
    pub const fn level(self, active_low: bool) -> Level {
        match (self, active_low) {
            (IndicatorState::On, false) | (IndicatorState::Off, true) => Level::High,
            (IndicatorState::Off, false) | (IndicatorState::On, true) => Level::Low,
        }
    }
}

/// A finite burst of `count` off/on cycles, each phase lasting `interval_ms`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlinkSpec {
    pub count: u32,
    pub interval_ms: u32,
}

impl BlinkSpec {
    pub const fn new(count: u32, interval_ms: u32) -> Self {
        Self { count, interval_ms }
    }

    /// A burst with no cycles or no interval never touches the hardware.
    pub const fn is_noop(&self) -> bool {
        self.count == 0 || self.interval_ms == 0
    }

    /// Wall time the burst keeps the caller busy.
    pub fn duration(&self) -> Duration {
        if self.is_noop() {
            return Duration::ZERO;
        }
        let phases = u64::from(self.count).saturating_mul(2);
        Duration::from_millis(phases.saturating_mul(u64::from(self.interval_ms)))
    }
}

impl fmt::Display for BlinkSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}ms", self.count, self.interval_ms)
    }
}

/// Operations the connectivity listener needs from an indicator.
///
/// [`IndicatorDriver`](crate::IndicatorDriver) is the production
/// implementation.
pub trait Indicator: Send + Sync {
    /// Whether the output resource is initialized and currently usable.
    fn is_ready(&self) -> bool;

    fn set(&self, state: IndicatorState) -> Result<(), DriverError>;

    fn blink(&self, spec: BlinkSpec) -> Result<(), DriverError>;
}
