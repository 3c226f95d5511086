//! Core types for hypergeometric function evaluation.

use core::fmt;

/// What to do when an evaluation hits an error condition.
///
/// Each condition class of [`Policy`](crate::Policy) carries one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ErrorAction {
    /// Return a sentinel: NaN for domain errors, +∞ for poles, ±∞ for
    /// overflow, and the partial sum for non-convergence.
    Ignore,
    /// Return NaN.
    ReturnNan,
    /// Return `Err` with the diagnostic.
    #[default]
    Raise,
}

/// Error type for hypergeometric function evaluation.
///
/// `function` names the evaluation site, e.g. `"hypergeometric_1f1(a, b, z)"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Error {
    /// Parameters make the function undefined or indeterminate
    /// (e.g. `b` a non-positive integer while `a >= 0` in 1F1).
    Domain {
        /// Evaluation site.
        function: &'static str,
        /// Offending parameter.
        value: f64,
    },
    /// Argument lands on a singularity (`z == 1` for 1F0, non-positive
    /// integer `b` for 0F1).
    Pole {
        /// Evaluation site.
        function: &'static str,
        /// Offending parameter.
        value: f64,
    },
    /// A series or recurrence exhausted its iteration budget.
    NonConvergence {
        /// Evaluation site.
        function: &'static str,
        /// Terms or recurrence steps consumed.
        terms: usize,
    },
    /// Result magnitude exceeds the representable range.
    Overflow {
        /// Evaluation site.
        function: &'static str,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Domain { function, value } => {
                write!(f, "{function}: domain error, function is undefined at {value}")
            }
            Error::Pole { function, value } => {
                write!(f, "{function}: pole error, function is singular at {value}")
            }
            Error::NonConvergence { function, terms } => {
                write!(
                    f,
                    "{function}: no convergence after {terms} terms, iteration budget exhausted"
                )
            }
            Error::Overflow { function } => {
                write!(f, "{function}: overflow, result exceeds representable range")
            }
        }
    }
}

impl core::error::Error for Error {}
