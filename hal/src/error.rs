//! Common error types for platform operations

use core::fmt;

/// Platform operation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalError {
    /// Invalid parameter provided (for example a pin the port does not have)
    InvalidParameter,
    /// Hardware reported a failure
    HardwareError,
    /// Pin could not be configured
    ConfigurationError,
    /// Backend-specific error code (errno for the sysfs backend)
    VendorError(i32),
}

impl fmt::Display for HalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter => write!(f, "invalid parameter"),
            Self::HardwareError => write!(f, "hardware error"),
            Self::ConfigurationError => write!(f, "configuration error"),
            Self::VendorError(code) => write!(f, "vendor error code: {}", code),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HalError {}

#[cfg(feature = "std")]
impl From<std::io::Error> for HalError {
    fn from(err: std::io::Error) -> Self {
        match err.raw_os_error() {
            Some(code) => Self::VendorError(code),
            None => Self::HardwareError,
        }
    }
}

/// Result type for platform operations
pub type HalResult<T> = Result<T, HalError>;
