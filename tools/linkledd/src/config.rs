//! Daemon configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use linkled::IndicatorConfig;
use linkled_hal::sysfs::DEFAULT_ROOT;
use serde::Deserialize;

pub const DEFAULT_STATUS_FILE: &str = "/run/linkled/status";
pub const DEFAULT_POLL_MS: u64 = 250;

/// Which [`OutputPlatform`](linkled_hal::OutputPlatform) drives the LED.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// In-memory stand-in, logs every write
    #[default]
    Sim,
    /// Linux sysfs GPIO
    Sysfs,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DaemonConfig {
    pub indicator: IndicatorConfig,
    pub backend: Backend,
    pub gpio_root: PathBuf,
    pub status_file: PathBuf,
    pub poll_ms: u64,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            indicator: IndicatorConfig::default(),
            backend: Backend::default(),
            gpio_root: PathBuf::from(DEFAULT_ROOT),
            status_file: PathBuf::from(DEFAULT_STATUS_FILE),
            poll_ms: DEFAULT_POLL_MS,
        }
    }
}

impl DaemonConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }
}
