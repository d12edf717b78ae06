//! Linux sysfs GPIO backend
//!
//! Ports are gpiochips under `/sys/class/gpio`, matched either by directory
//! name (`gpiochip32`) or by the contents of their `label` file (`gpio1`).
//! A pin is line `base + pin` of the chip and gets exported on first use.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use log::{debug, warn};

use crate::error::{HalError, HalResult};
use crate::gpio::{Level, OutputPlatform};

pub const DEFAULT_ROOT: &str = "/sys/class/gpio";

/// Time udev usually needs to create the line directory after an export.
const EXPORT_SETTLE: Duration = Duration::from_millis(50);

/// Handle to an acquired gpiochip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SysfsHandle {
    chip: PathBuf,
    base: u32,
    ngpio: Option<u32>,
}

impl SysfsHandle {
    pub fn base(&self) -> u32 {
        self.base
    }
}

/// [`OutputPlatform`] backed by the sysfs GPIO interface.
#[derive(Debug, Clone)]
pub struct SysfsPlatform {
    root: PathBuf,
    export_settle: Duration,
}

impl Default for SysfsPlatform {
    fn default() -> Self {
        Self::with_root(DEFAULT_ROOT)
    }
}

impl SysfsPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `root` instead of `/sys/class/gpio`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            export_settle: EXPORT_SETTLE,
        }
    }

    /// Overrides the wait after exporting a line.
    pub fn with_export_settle(mut self, settle: Duration) -> Self {
        self.export_settle = settle;
        self
    }

    fn line_dir(&self, handle: &SysfsHandle, pin: u32) -> HalResult<(u32, PathBuf)> {
        if handle.ngpio.is_some_and(|n| pin >= n) {
            return Err(HalError::InvalidParameter);
        }
        let line = handle
            .base
            .checked_add(pin)
            .ok_or(HalError::InvalidParameter)?;
        Ok((line, self.root.join(format!("gpio{line}"))))
    }

    fn find_chip(&self, port: &str) -> io::Result<Option<SysfsHandle>> {
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !name.starts_with("gpiochip") {
                continue;
            }

            let label = read_trimmed(&path.join("label")).unwrap_or_default();
            if name != port && label != port {
                continue;
            }

            let base = match read_trimmed(&path.join("base")).map(|b| b.parse::<u32>()) {
                Ok(Ok(base)) => base,
                _ => {
                    warn!("sysfs: {} has an unreadable base", path.display());
                    continue;
                }
            };
            let ngpio = read_trimmed(&path.join("ngpio"))
                .ok()
                .and_then(|n| n.parse().ok());
            return Ok(Some(SysfsHandle {
                chip: path,
                base,
                ngpio,
            }));
        }
        Ok(None)
    }
}

fn read_trimmed(path: &Path) -> io::Result<String> {
    Ok(fs::read_to_string(path)?.trim().to_owned())
}

impl OutputPlatform for SysfsPlatform {
    type Handle = SysfsHandle;

    fn acquire(&mut self, port: &str) -> Option<SysfsHandle> {
        match self.find_chip(port) {
            Ok(handle) => {
                debug!("sysfs: acquire {port} -> {handle:?}");
                handle
            }
            Err(err) => {
                warn!("sysfs: cannot scan {}: {err}", self.root.display());
                None
            }
        }
    }

    fn is_ready(&self, handle: &SysfsHandle) -> bool {
        handle.chip.is_dir()
    }

    fn configure_output(&mut self, handle: &SysfsHandle, pin: u32) -> HalResult<()> {
        let (line, dir) = self.line_dir(handle, pin)?;

        if !dir.exists() {
            fs::write(self.root.join("export"), line.to_string())?;
            thread::sleep(self.export_settle);
        }

        fs::write(dir.join("direction"), "out")?;
        debug!("sysfs: gpio{line} configured as output");
        Ok(())
    }

    fn write(&mut self, handle: &SysfsHandle, pin: u32, level: Level) -> HalResult<()> {
        let (_, dir) = self.line_dir(handle, pin)?;
        let value = if level.is_high() { "1" } else { "0" };
        fs::write(dir.join("value"), value)?;
        Ok(())
    }

    fn delay_ms(&mut self, ms: u32) {
        thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}
