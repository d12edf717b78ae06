use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use linkled::{ConnectivityListener, EventBus, IndicatorDriver, SharedLinkStatus};
use linkled_hal::sim::SimPlatform;
use linkled_hal::sysfs::SysfsPlatform;
use linkled_hal::OutputPlatform;
use linkledd::{tick, Backend, DaemonConfig, StatusWatcher};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Drive a link-status LED from a connectivity status file")]
struct Opts {
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(long, value_enum)]
    backend: Option<Backend>,

    #[arg(long = "gpio-root", value_name = "DIR")]
    gpio_root: Option<PathBuf>,

    #[arg(long = "status-file", value_name = "FILE")]
    status_file: Option<PathBuf>,

    #[arg(long = "poll-ms", value_name = "MS")]
    poll_ms: Option<u64>,
}

impl Opts {
    /// Config file (or defaults) with command-line overrides applied.
    fn resolve(&self) -> anyhow::Result<DaemonConfig> {
        let mut config = match &self.config {
            Some(path) => DaemonConfig::load(path)?,
            None => DaemonConfig::default(),
        };
        if let Some(backend) = self.backend {
            config.backend = backend;
        }
        if let Some(root) = &self.gpio_root {
            config.gpio_root = root.clone();
        }
        if let Some(path) = &self.status_file {
            config.status_file = path.clone();
        }
        if let Some(poll_ms) = self.poll_ms {
            config.poll_ms = poll_ms;
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let opts = Opts::parse();
    let config = opts.resolve()?;

    let running = Arc::new(AtomicBool::new(true));
    {
        let running = Arc::clone(&running);
        ctrlc::set_handler(move || running.store(false, Ordering::SeqCst))
            .context("failed to install Ctrl-C handler")?;
    }

    match config.backend {
        Backend::Sim => {
            let platform = SimPlatform::new()
                .with_port(config.indicator.port.clone())
                .with_real_time(true);
            run(platform, &config, &running)
        }
        Backend::Sysfs => run(SysfsPlatform::with_root(&config.gpio_root), &config, &running),
    }
}

fn run<P>(platform: P, config: &DaemonConfig, running: &AtomicBool) -> anyhow::Result<()>
where
    P: OutputPlatform + 'static,
{
    let indicator = &config.indicator;
    let driver = Arc::new(IndicatorDriver::new(platform, indicator));
    if let Err(err) = driver.boot(indicator.self_test) {
        warn!("indicator unavailable ({err}); events will be rejected");
    }

    let link = SharedLinkStatus::default();
    let listener = Arc::new(ConnectivityListener::new(
        Arc::clone(&driver),
        link.clone(),
        indicator.link_lost,
    ));
    let mut bus = EventBus::new();
    listener.register(&mut bus);

    let mut watcher = StatusWatcher::new(&config.status_file, link.clone());
    let poll = Duration::from_millis(config.poll_ms);
    info!(
        "watching {} every {}ms, indicator on {}.{}",
        watcher.path().display(),
        config.poll_ms,
        driver.port(),
        driver.pin()
    );

    while running.load(Ordering::SeqCst) {
        let step = tick(&mut watcher, &bus, &link, &*driver);
        thread::sleep(step.idle(poll, indicator.link_lost));
    }

    info!("shutting down");
    Ok(())
}
