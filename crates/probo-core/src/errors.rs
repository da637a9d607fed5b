//! Error types for probo.
//!
//! Every failure of a pricing call is reported through a single
//! `thiserror`-derived enum. Input validation goes through the [`ensure!`]
//! macro, which yields [`Error::Precondition`]; [`fail!`] yields
//! [`Error::Runtime`].

use thiserror::Error;

/// The top-level error type used throughout probo.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// General runtime error.
    #[error("{0}")]
    Runtime(String),

    /// Invalid configuration: a precondition on an input was violated.
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// A payoff tag or payoff kind the selected pricer cannot handle.
    #[error("unsupported payoff type: {0}")]
    UnsupportedPayoffType(String),

    /// The numerical scheme degenerated (e.g. equal lattice factors or a
    /// non-finite intermediate result).
    #[error("numeric degeneracy: {0}")]
    NumericDegeneracy(String),

    /// The run was cancelled through a [`CancellationToken`](crate::CancellationToken).
    #[error("pricing run cancelled")]
    Cancelled,

    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Shorthand `Result` type used throughout probo.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use probo_core::{ensure, errors::Error};
/// fn positive(x: f64) -> probo_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(matches!(positive(-1.0), Err(Error::Precondition(_))));
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

/// Returns `Err(Error::Runtime(...))` immediately.
///
/// # Example
/// ```
/// use probo_core::{fail, errors::Error};
/// fn always_err() -> probo_core::errors::Result<()> {
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
