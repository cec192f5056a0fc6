//! Error types for the shortrate workspace.
//!
//! A single `thiserror`-derived enum covers every failure the calibration
//! pipeline can surface: bad parameters fail fast before any simulation work,
//! curve construction problems propagate unchanged, and short input history
//! is reported with the counts that caused it.  Optimizer iteration-cap
//! exhaustion is deliberately *not* here; it is a status on the calibration
//! result, not an error.

use thiserror::Error;

/// The top-level error type used throughout the shortrate workspace.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// General runtime error (maps to `fail!`).
    #[error("{0}")]
    Runtime(String),

    /// Precondition violated (maps to `ensure!`).
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// Postcondition violated (maps to `ensure_post!`).
    #[error("postcondition not satisfied: {0}")]
    Postcondition(String),

    /// Invalid argument supplied by the caller.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An index-tenor tag that no curve or fixing source recognizes.
    #[error("unknown index tenor: {0:?} (expected \"1M\", \"3M\", or \"6M\")")]
    UnknownTenor(String),

    /// Curve construction or lookup failure.
    #[error("curve error: {0}")]
    Curve(String),

    /// Not enough observations for the requested computation.
    #[error("insufficient history: {required} observations required, {available} available")]
    InsufficientHistory {
        /// Observations the computation needed.
        required: usize,
        /// Observations actually present.
        available: usize,
    },
}

/// Shorthand `Result` type used throughout the shortrate workspace.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Check a precondition, returning `Err(Error::Precondition(...))` on failure.
///
/// # Example
/// ```
/// use sr_core::ensure;
/// fn positive(x: f64) -> sr_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(positive(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Check a postcondition, returning `Err(Error::Postcondition(...))` on failure.
///
/// # Example
/// ```
/// use sr_core::ensure_post;
/// fn compute(x: f64) -> sr_core::errors::Result<f64> {
///     let result = x * 2.0;
///     ensure_post!(result.is_finite(), "result must be finite, got {result}");
///     Ok(result)
/// }
/// assert!(compute(1.0).is_ok());
/// assert!(compute(f64::MAX).is_err());
/// ```
#[macro_export]
macro_rules! ensure_post {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Postcondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Bail out with `Err(Error::Runtime(...))` immediately.
///
/// # Example
/// ```
/// use sr_core::fail;
/// fn always_err() -> sr_core::errors::Result<()> {
///     fail!("something went wrong");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Runtime(format!($($msg)*)))
    };
}
