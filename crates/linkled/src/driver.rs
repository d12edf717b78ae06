//! Indicator driver.
//!
//! The driver is the only code that touches the output resource. It acquires
//! the port once, then exposes `set` and `blink` on top of it. All calls go
//! through one mutex, so writes from concurrent callers never interleave: a
//! `blink` holds the lock for its whole burst.
//!
//! ```text
//!                  init() ok
//!  Uninitialized ─────────────▶ Ready
//!        │                        │
//!   set/blink: NotInitialized   set/blink: NotInitialized if the port
//!                               stops reporting ready
//! ```

use log::{debug, error, info, trace, warn};
use parking_lot::Mutex;

use linkled_hal::{Level, OutputPlatform};

use crate::config::IndicatorConfig;
use crate::error::DriverError;
use crate::indicator::{BlinkSpec, Indicator, IndicatorState};

/// Lifecycle of the driver. There is no way back to `Uninitialized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Uninitialized,
    Ready,
}

struct Output<P: OutputPlatform> {
    platform: P,
    handle: Option<P::Handle>,
}

impl<P: OutputPlatform> Output<P> {
    /// Handle of an initialized port that still reports ready.
    fn ready_handle(&self) -> Result<P::Handle, DriverError> {
        match &self.handle {
            Some(handle) if self.platform.is_ready(handle) => Ok(handle.clone()),
            _ => Err(DriverError::NotInitialized),
        }
    }
}

/// Owner of the indicator output resource.
pub struct IndicatorDriver<P: OutputPlatform> {
    port: String,
    pin: u32,
    active_low: bool,
    output: Mutex<Output<P>>,
}

impl<P: OutputPlatform> IndicatorDriver<P> {
    /// Creates an uninitialized driver for the port and pin in `config`.
    pub fn new(platform: P, config: &IndicatorConfig) -> Self {
        Self {
            port: config.port.clone(),
            pin: config.pin,
            active_low: config.active_low,
            output: Mutex::new(Output {
                platform,
                handle: None,
            }),
        }
    }

    pub fn port(&self) -> &str {
        &self.port
    }

    pub fn pin(&self) -> u32 {
        self.pin
    }

    pub fn state(&self) -> DriverState {
        if self.output.lock().handle.is_some() {
            DriverState::Ready
        } else {
            DriverState::Uninitialized
        }
    }

    /// Acquires and configures the output, then switches it on.
    ///
    /// Calling `init` again once it has succeeded is a no-op that returns
    /// `Ok(())` without touching the hardware. After a failure the driver stays
    /// uninitialized; it never re-acquires the port on its own, but a later
    /// explicit `init` tries again.
    pub fn init(&self) -> Result<(), DriverError> {
        let mut output = self.output.lock();
        if output.handle.is_some() {
            debug!("indicator on {}.{} already initialized", self.port, self.pin);
            return Ok(());
        }

        let Some(handle) = output.platform.acquire(&self.port) else {
            error!("cannot acquire output port {}", self.port);
            return Err(DriverError::ResourceNotFound);
        };

        if !output.platform.is_ready(&handle) {
            error!("output port {} is not ready", self.port);
            return Err(DriverError::ResourceNotReady);
        }

        output
            .platform
            .configure_output(&handle, self.pin)
            .map_err(|err| {
                error!("failed to configure {}.{}: {err}", self.port, self.pin);
                DriverError::ConfigurationFailed(err)
            })?;

        let on = self.level(IndicatorState::On);
        output.platform.write(&handle, self.pin, on).map_err(|err| {
            error!("failed to switch on {}.{}: {err}", self.port, self.pin);
            DriverError::WriteFailed(err)
        })?;

        output.handle = Some(handle);
        info!("indicator on {}.{} initialized", self.port, self.pin);
        Ok(())
    }

    /// Drives the indicator to `state`. A failed write is reported, not retried.
    pub fn set(&self, state: IndicatorState) -> Result<(), DriverError> {
        let mut output = self.output.lock();
        let handle = output.ready_handle().inspect_err(|err| {
            error!("cannot set indicator {state:?}: {err}");
        })?;

        trace!("indicator {}.{} -> {state:?}", self.port, self.pin);
        output
            .platform
            .write(&handle, self.pin, self.level(state))
            .map_err(|err| {
                error!("failed to set indicator {state:?}: {err}");
                DriverError::WriteFailed(err)
            })
    }

    /// Plays `spec.count` cycles of {off, wait, on, wait}.
    ///
    /// Only the readiness precondition is a hard failure. A failed write inside
    /// the burst is logged and the burst carries on.
    pub fn blink(&self, spec: BlinkSpec) -> Result<(), DriverError> {
        let mut output = self.output.lock();
        let handle = output.ready_handle().inspect_err(|err| {
            error!("cannot blink indicator: {err}");
        })?;

        if spec.is_noop() {
            debug!("ignoring empty blink burst {spec}");
            return Ok(());
        }

        debug!("blinking indicator {}.{} {spec}", self.port, self.pin);
        for cycle in 0..spec.count {
            for state in [IndicatorState::Off, IndicatorState::On] {
                if let Err(err) = output.platform.write(&handle, self.pin, self.level(state)) {
                    warn!("blink cycle {cycle}: failed to set indicator {state:?}: {err}");
                }
                output.platform.delay_ms(spec.interval_ms);
            }
        }
        Ok(())
    }

    /// `init` followed by the `self_test` burst.
    pub fn boot(&self, self_test: BlinkSpec) -> Result<(), DriverError> {
        if let Err(err) = self.init() {
            error!("indicator init failed: {err}");
            return Err(err);
        }
        self.blink(self_test)?;
        info!("indicator self-test complete");
        Ok(())
    }

    /// Whether the port is initialized and reports ready.
    pub fn is_ready(&self) -> bool {
        self.output.lock().ready_handle().is_ok()
    }

    fn level(&self, state: IndicatorState) -> Level {
        state.level(self.active_low)
    }
}

impl<P: OutputPlatform> Indicator for IndicatorDriver<P> {
    fn is_ready(&self) -> bool {
        IndicatorDriver::is_ready(self)
    }

    fn set(&self, state: IndicatorState) -> Result<(), DriverError> {
        IndicatorDriver::set(self, state)
    }

    fn blink(&self, spec: BlinkSpec) -> Result<(), DriverError> {
        IndicatorDriver::blink(self, spec)
    }
}
