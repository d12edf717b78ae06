use std::sync::Arc;
use std::thread;

use linkled_hal::sim::{SimOp, SimPlatform};
use linkled_hal::{HalError, Level};

use crate::config::IndicatorConfig;
use crate::driver::{DriverState, IndicatorDriver};
use crate::error::DriverError;
use crate::indicator::{BlinkSpec, IndicatorState};

const PIN: u32 = 10;

fn driver_with(config: &IndicatorConfig) -> (IndicatorDriver<SimPlatform>, SimPlatform) {
    let sim = SimPlatform::new().with_port("gpio1");
    let driver = IndicatorDriver::new(sim.clone(), config);
    (driver, sim)
}

fn ready_driver() -> (IndicatorDriver<SimPlatform>, SimPlatform) {
    let (driver, sim) = driver_with(&IndicatorConfig::default());
    driver.init().unwrap();
    sim.clear_ops();
    (driver, sim)
}

#[test]
fn calls_before_init_fail_without_writes() {
    let (driver, sim) = driver_with(&IndicatorConfig::default());

    assert_eq!(driver.state(), DriverState::Uninitialized);
    assert_eq!(driver.set(IndicatorState::On), Err(DriverError::NotInitialized));
    assert_eq!(
        driver.blink(BlinkSpec::new(3, 100)),
        Err(DriverError::NotInitialized)
    );
    assert_eq!(driver.blink(BlinkSpec::new(0, 0)), Err(DriverError::NotInitialized));
    assert!(!driver.is_ready());
    assert!(sim.ops().is_empty());
}

#[test]
fn init_configures_and_switches_on() {
    let (driver, sim) = driver_with(&IndicatorConfig::default());

    driver.init().unwrap();

    assert_eq!(driver.state(), DriverState::Ready);
    assert!(driver.is_ready());
    assert_eq!(
        sim.ops(),
        vec![
            SimOp::Acquire("gpio1".into()),
            SimOp::Configure { pin: PIN },
            SimOp::Write {
                pin: PIN,
                level: Level::High
            },
        ]
    );
}

#[test]
fn repeated_init_is_a_noop() {
    let (driver, sim) = ready_driver();

    driver.init().unwrap();
    driver.init().unwrap();

    assert_eq!(driver.state(), DriverState::Ready);
    assert!(sim.ops().is_empty());
}

#[test]
fn init_reports_missing_port() {
    let config = IndicatorConfig::builder().port("gpio7").build();
    let (driver, sim) = driver_with(&config);

    assert_eq!(driver.init(), Err(DriverError::ResourceNotFound));
    assert_eq!(driver.state(), DriverState::Uninitialized);
    assert_eq!(driver.set(IndicatorState::On), Err(DriverError::NotInitialized));
    assert!(sim.writes().is_empty());
}

#[test]
fn init_reports_port_not_ready() {
    let (driver, sim) = driver_with(&IndicatorConfig::default());
    sim.set_ready(false);

    assert_eq!(driver.init(), Err(DriverError::ResourceNotReady));
    assert_eq!(sim.ops(), vec![SimOp::Acquire("gpio1".into())]);
    assert_eq!(driver.state(), DriverState::Uninitialized);
}

#[test]
fn init_reports_configuration_failure_and_can_be_retried() {
    let (driver, sim) = driver_with(&IndicatorConfig::default());
    sim.fail_configure(true);

    assert_eq!(
        driver.init(),
        Err(DriverError::ConfigurationFailed(HalError::ConfigurationError))
    );
    assert_eq!(driver.state(), DriverState::Uninitialized);
    assert!(sim.writes().is_empty());

    sim.fail_configure(false);
    driver.init().unwrap();
    assert_eq!(driver.state(), DriverState::Ready);
}

#[test]
fn init_reports_smoke_test_write_failure() {
    let (driver, sim) = driver_with(&IndicatorConfig::default());
    sim.fail_next_writes(1);

    assert_eq!(
        driver.init(),
        Err(DriverError::WriteFailed(HalError::HardwareError))
    );
    assert_eq!(driver.state(), DriverState::Uninitialized);
}

#[test]
fn set_writes_requested_state() {
    let (driver, sim) = ready_driver();

    driver.set(IndicatorState::Off).unwrap();
    driver.set(IndicatorState::On).unwrap();
    driver.set(IndicatorState::On).unwrap();

    assert_eq!(
        sim.writes(),
        vec![(PIN, Level::Low), (PIN, Level::High), (PIN, Level::High)]
    );
    assert!(sim.delays().is_empty());
}

#[test]
fn set_failure_is_not_retried() {
    let (driver, sim) = ready_driver();
    sim.fail_writes(true);

    assert_eq!(
        driver.set(IndicatorState::Off),
        Err(DriverError::WriteFailed(HalError::HardwareError))
    );
    assert_eq!(sim.write_attempts(), 1);
}

#[test]
fn active_low_inverts_levels() {
    let config = IndicatorConfig::builder().active_low(true).build();
    let (driver, sim) = driver_with(&config);

    driver.init().unwrap();
    driver.set(IndicatorState::Off).unwrap();

    assert_eq!(sim.writes(), vec![(PIN, Level::Low), (PIN, Level::High)]);
}

#[test]
fn empty_bursts_do_not_touch_hardware() {
    let (driver, sim) = ready_driver();

    driver.blink(BlinkSpec::new(0, 500)).unwrap();
    driver.blink(BlinkSpec::new(4, 0)).unwrap();

    assert!(sim.ops().is_empty());
}

#[test]
fn burst_alternates_off_and_on() {
    let (driver, sim) = ready_driver();

    driver.blink(BlinkSpec::new(3, 100)).unwrap();

    let levels: Vec<Level> = sim.writes().into_iter().map(|(_, level)| level).collect();
    assert_eq!(
        levels,
        vec![
            Level::Low,
            Level::High,
            Level::Low,
            Level::High,
            Level::Low,
            Level::High
        ]
    );
    assert_eq!(sim.delays(), vec![100; 6]);
}

#[test]
fn burst_survives_write_failures() {
    let (driver, sim) = ready_driver();
    sim.fail_writes(true);

    assert_eq!(driver.blink(BlinkSpec::new(2, 50)), Ok(()));

    assert_eq!(sim.write_attempts(), 4);
    assert!(sim.writes().is_empty());
    assert_eq!(sim.delays(), vec![50; 4]);
}

#[test]
fn burst_continues_after_single_failure() {
    let (driver, sim) = ready_driver();
    sim.fail_next_writes(1);

    driver.blink(BlinkSpec::new(2, 10)).unwrap();

    assert_eq!(
        sim.ops()[0],
        SimOp::WriteFailed {
            pin: PIN,
            level: Level::Low
        }
    );
    assert_eq!(sim.writes().len(), 3);
}

#[test]
fn degraded_port_fails_fast() {
    let (driver, sim) = ready_driver();
    sim.set_ready(false);

    assert!(!driver.is_ready());
    assert_eq!(driver.set(IndicatorState::On), Err(DriverError::NotInitialized));
    assert_eq!(
        driver.blink(BlinkSpec::new(1, 10)),
        Err(DriverError::NotInitialized)
    );
    // Still initialized; only the port went away.
    assert_eq!(driver.state(), DriverState::Ready);
    assert!(sim.ops().is_empty());
}

#[test]
fn boot_runs_self_test_after_init() {
    let (driver, sim) = driver_with(&IndicatorConfig::default());

    driver.boot(BlinkSpec::new(3, 100)).unwrap();

    let levels: Vec<Level> = sim.writes().into_iter().map(|(_, level)| level).collect();
    assert_eq!(levels.len(), 7);
    assert_eq!(levels[0], Level::High);
    assert_eq!(levels.last(), Some(&Level::High));
    assert_eq!(sim.delays(), vec![100; 6]);
}

#[test]
fn boot_skips_self_test_when_init_fails() {
    let config = IndicatorConfig::builder().port("gpio9").build();
    let (driver, sim) = driver_with(&config);

    assert_eq!(
        driver.boot(BlinkSpec::new(3, 100)),
        Err(DriverError::ResourceNotFound)
    );
    assert!(sim.delays().is_empty());
}

#[test]
fn concurrent_bursts_do_not_interleave() {
    let (driver, sim) = ready_driver();
    let driver = Arc::new(driver);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let driver = Arc::clone(&driver);
            thread::spawn(move || driver.blink(BlinkSpec::new(25, 1)).unwrap())
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let writes = sim.writes();
    assert_eq!(writes.len(), 4 * 25 * 2);
    for (i, (_, level)) in writes.iter().enumerate() {
        let expected = if i % 2 == 0 { Level::Low } else { Level::High };
        assert_eq!(*level, expected, "write {i} interleaved");
    }
}

#[test]
fn driver_can_be_shared_between_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<IndicatorDriver<SimPlatform>>();
}
