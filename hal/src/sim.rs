//! Simulated output platform
//!
//! Stands in for real hardware on hosts and in tests. Every call is recorded as
//! a [`SimOp`] so callers can assert on the exact write/delay sequence. Clones
//! share state, so a test can inspect one clone while the driver owns
//! another.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

use log::{debug, trace};

use crate::error::{HalError, HalResult};
use crate::gpio::{Level, OutputPlatform};

/// One recorded platform interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimOp {
    Acquire(String),
    Configure { pin: u32 },
    Write { pin: u32, level: Level },
    /// A write that was attempted while failure injection was active.
    WriteFailed { pin: u32, level: Level },
    Delay(u32),
}

/// Handle to a simulated port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimHandle {
    port: usize,
}

struct SimState {
    ports: Vec<String>,
    ready: bool,
    fail_configure: bool,
    fail_writes: bool,
    fail_next_writes: usize,
    real_time: bool,
    ops: Vec<SimOp>,
}

impl Default for SimState {
    fn default() -> Self {
        Self {
            ports: Vec::new(),
            ready: true,
            fail_configure: false,
            fail_writes: false,
            fail_next_writes: 0,
            real_time: false,
            ops: Vec::new(),
        }
    }
}

/// In-memory [`OutputPlatform`].
#[derive(Clone, Default)]
pub struct SimPlatform {
    state: Arc<Mutex<SimState>>,
}

impl SimPlatform {
    /// Creates a platform with no ports.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a port that `acquire` will find.
    pub fn with_port(self, name: impl Into<String>) -> Self {
        self.state().ports.push(name.into());
        self
    }

    /// Makes `delay_ms` actually sleep instead of only recording the delay.
    pub fn with_real_time(self, enabled: bool) -> Self {
        self.state().real_time = enabled;
        self
    }

    /// Marks every port ready or not ready.
    pub fn set_ready(&self, ready: bool) {
        self.state().ready = ready;
    }

    pub fn fail_configure(&self, fail: bool) {
        self.state().fail_configure = fail;
    }

    /// Fails every write until switched off again.
    pub fn fail_writes(&self, fail: bool) {
        self.state().fail_writes = fail;
    }

    /// Fails only the next `count` writes.
    pub fn fail_next_writes(&self, count: usize) {
        self.state().fail_next_writes = count;
    }

    /// All recorded operations, oldest first.
    pub fn ops(&self) -> Vec<SimOp> {
        self.state().ops.clone()
    }

    pub fn clear_ops(&self) {
        self.state().ops.clear();
    }

    /// Successful writes as `(pin, level)` pairs.
    pub fn writes(&self) -> Vec<(u32, Level)> {
        self.state()
            .ops
            .iter()
            .filter_map(|op| match op {
                SimOp::Write { pin, level } => Some((*pin, *level)),
                _ => None,
            })
            .collect()
    }

    /// Number of writes attempted, including the failed ones.
    pub fn write_attempts(&self) -> usize {
        self.state()
            .ops
            .iter()
            .filter(|op| matches!(op, SimOp::Write { .. } | SimOp::WriteFailed { .. }))
            .count()
    }

    pub fn delays(&self) -> Vec<u32> {
        self.state()
            .ops
            .iter()
            .filter_map(|op| match op {
                SimOp::Delay(ms) => Some(*ms),
                _ => None,
            })
            .collect()
    }

    /// Last level successfully written to `pin`.
    pub fn level(&self, pin: u32) -> Option<Level> {
        self.writes()
            .into_iter()
            .rev()
            .find(|(p, _)| *p == pin)
            .map(|(_, level)| level)
    }

    fn state(&self) -> MutexGuard<'_, SimState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl OutputPlatform for SimPlatform {
    type Handle = SimHandle;

    fn acquire(&mut self, port: &str) -> Option<SimHandle> {
        let mut state = self.state();
        state.ops.push(SimOp::Acquire(port.to_owned()));
        let index = state.ports.iter().position(|p| p == port);
        debug!("sim: acquire {port} -> {index:?}");
        index.map(|port| SimHandle { port })
    }

    fn is_ready(&self, handle: &SimHandle) -> bool {
        let state = self.state();
        state.ready && handle.port < state.ports.len()
    }

    fn configure_output(&mut self, _handle: &SimHandle, pin: u32) -> HalResult<()> {
        let mut state = self.state();
        if state.fail_configure {
            return Err(HalError::ConfigurationError);
        }
        state.ops.push(SimOp::Configure { pin });
        Ok(())
    }

    fn write(&mut self, handle: &SimHandle, pin: u32, level: Level) -> HalResult<()> {
        let mut state = self.state();
        let fail = state.fail_writes || state.fail_next_writes > 0;
        if fail {
            state.fail_next_writes = state.fail_next_writes.saturating_sub(1);
            state.ops.push(SimOp::WriteFailed { pin, level });
            return Err(HalError::HardwareError);
        }
        state.ops.push(SimOp::Write { pin, level });
        let port = state.ports.get(handle.port).map_or("?", String::as_str);
        debug!("sim: {port}.{pin} <- {level:?}");
        Ok(())
    }

    fn delay_ms(&mut self, ms: u32) {
        let real_time = {
            let mut state = self.state();
            state.ops.push(SimOp::Delay(ms));
            state.real_time
        };
        trace!("sim: delay {ms}ms");
        if real_time {
            thread::sleep(Duration::from_millis(u64::from(ms)));
        }
    }
}
