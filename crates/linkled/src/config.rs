//! Static indicator configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::indicator::BlinkSpec;

/// Port the indicator LED hangs off.
pub const DEFAULT_PORT: &str = "gpio1";
/// Pin of the indicator LED on [`DEFAULT_PORT`].
pub const DEFAULT_PIN: u32 = 10;
/// Burst played once after a successful init.
pub const SELF_TEST_BURST: BlinkSpec = BlinkSpec::new(3, 100);
/// Burst played for every connectivity event while the link is down.
pub const LINK_LOST_BURST: BlinkSpec = BlinkSpec::new(1, 500);

/// Configuration for the indicator driver and listener.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorConfig {
    pub port: String,
    pub pin: u32,
    /// LED lights when the pin is driven low.
    pub active_low: bool,
    pub self_test: BlinkSpec,
    pub link_lost: BlinkSpec,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT.to_owned(),
            pin: DEFAULT_PIN,
            active_low: false,
            self_test: SELF_TEST_BURST,
            link_lost: LINK_LOST_BURST,
        }
    }
}

impl IndicatorConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> IndicatorConfigBuilder {
        IndicatorConfigBuilder::default()
    }
}

/// Builder for ergonomic indicator configuration construction.
#[derive(Debug, Clone, Default)]
pub struct IndicatorConfigBuilder {
    config: IndicatorConfig,
}

impl IndicatorConfigBuilder {
    /// Sets the logical port name.
    pub fn port(mut self, port: impl Into<String>) -> Self {
        self.config.port = port.into();
        self
    }

    /// Sets the pin on that port.
    pub fn pin(mut self, pin: u32) -> Self {
        self.config.pin = pin;
        self
    }

    pub fn active_low(mut self, active_low: bool) -> Self {
        self.config.active_low = active_low;
        self
    }

    /// Sets the burst played after init.
    pub fn self_test(mut self, burst: BlinkSpec) -> Self {
        self.config.self_test = burst;
        self
    }

    /// Sets the burst played while the link is down.
    pub fn link_lost(mut self, burst: BlinkSpec) -> Self {
        self.config.link_lost = burst;
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> IndicatorConfig {
        self.config
    }
}
