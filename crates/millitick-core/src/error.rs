use thiserror::Error;

/// Errors produced at the external boundaries of the timebase.
///
/// Internal arithmetic never fails: values wrap at 2^32 ms by contract.
/// Errors exist only where foreign representations enter - duration
/// strings, [`std::time::Duration`] values, and configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TimeError {
    /// An external value exceeds the 32-bit millisecond range.
    #[error("{millis}ms exceeds the 32-bit millisecond range")]
    OutOfRange {
        /// The offending value in milliseconds.
        millis: u128,
    },

    /// A duration string could not be parsed.
    #[error("invalid duration: {0}")]
    Parse(#[from] humantime::DurationError),

    /// A periodic schedule was configured with a zero period.
    #[error("period must be non-zero")]
    ZeroPeriod,
}

/// Convenience type alias for timebase operations.
pub type TimeResult<T> = Result<T, TimeError>;
