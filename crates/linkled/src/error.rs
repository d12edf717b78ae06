use linkled_hal::HalError;
use thiserror::Error;

/// Errors reported by the indicator driver.
///
/// The listener hands these back to the event bus unchanged.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverError {
    #[error("output port not found")]
    ResourceNotFound,
    #[error("output port not ready")]
    ResourceNotReady,
    #[error("failed to configure indicator pin: {0}")]
    ConfigurationFailed(#[source] HalError),
    #[error("failed to write indicator pin: {0}")]
    WriteFailed(#[source] HalError),
    #[error("indicator driver not initialized")]
    NotInitialized,
}
