//! Evaluation policy: error actions, iteration budget and precision.
//!
//! A [`Policy`] is a plain value handed to every `_with_policy` entry point.
//! The numerical core never decides how a condition is reported; it only
//! names the condition and the offending value and lets the policy answer.

use crate::algo::constants::R1M5;
use crate::algo::series::Summation;
use crate::machine::HyperFloat;
use crate::types::{Error, ErrorAction};

/// Caller-selected behavior for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Policy {
    /// Action on indeterminate or undefined parameters.
    pub domain_error: ErrorAction,
    /// Action on singular arguments.
    pub pole_error: ErrorAction,
    /// Action on results that do not fit the caller's type.
    pub overflow_error: ErrorAction,
    /// Action on non-convergence of a series or recurrence.
    pub evaluation_error: ErrorAction,
    /// Iteration cap for every series summation and recurrence window.
    pub max_series_iterations: usize,
    /// Requested precision in binary digits; `None` means full precision of
    /// the evaluation type.
    pub digits: Option<u32>,
    /// Evaluate `f32` arguments in `f64` and narrow the result.
    pub promote_float: bool,
    /// Multiplier on the large-|z| boundary of the asymptotic expansions.
    pub asymptotic_z_factor: f64,
    /// `a` counts as "very negative" in 1F1 below
    /// `-negative_a_factor * decimal_digits`.
    pub negative_a_factor: f64,
}

impl Default for Policy {
    fn default() -> Self {
        Policy {
            domain_error: ErrorAction::Raise,
            pole_error: ErrorAction::Raise,
            overflow_error: ErrorAction::Raise,
            evaluation_error: ErrorAction::Raise,
            max_series_iterations: 1_000_000,
            digits: None,
            promote_float: true,
            asymptotic_z_factor: 1.0,
            negative_a_factor: 2.0,
        }
    }
}

impl Policy {
    /// Set the same action for every error class.
    pub fn with_error_action(mut self, action: ErrorAction) -> Self {
        self.domain_error = action;
        self.pole_error = action;
        self.overflow_error = action;
        self.evaluation_error = action;
        self
    }

    /// Set the domain error action.
    pub fn with_domain_error(mut self, action: ErrorAction) -> Self {
        self.domain_error = action;
        self
    }

    /// Set the pole error action.
    pub fn with_pole_error(mut self, action: ErrorAction) -> Self {
        self.pole_error = action;
        self
    }

    /// Set the overflow error action.
    pub fn with_overflow_error(mut self, action: ErrorAction) -> Self {
        self.overflow_error = action;
        self
    }

    /// Set the non-convergence action.
    pub fn with_evaluation_error(mut self, action: ErrorAction) -> Self {
        self.evaluation_error = action;
        self
    }

    /// Set the iteration cap.
    pub fn with_max_series_iterations(mut self, max: usize) -> Self {
        self.max_series_iterations = max;
        self
    }

    /// Request `digits` binary digits of precision.
    pub fn with_digits(mut self, digits: u32) -> Self {
        self.digits = Some(digits);
        self
    }

    /// Turn float promotion on or off.
    pub fn with_promote_float(mut self, promote: bool) -> Self {
        self.promote_float = promote;
        self
    }

    /// Scale the asymptotic-region boundary.
    pub fn with_asymptotic_z_factor(mut self, factor: f64) -> Self {
        self.asymptotic_z_factor = factor;
        self
    }

    /// Scale the "very negative a" threshold of 1F1.
    pub fn with_negative_a_factor(mut self, factor: f64) -> Self {
        self.negative_a_factor = factor;
        self
    }

    /// Binary digits in effect for type `T`, never more than `T` carries.
    pub fn digits<T: HyperFloat>(&self) -> u32 {
        let full = T::MACH_DIGITS.unsigned_abs();
        self.digits.map_or(full, |d| d.clamp(2, full))
    }

    /// Decimal digits in effect for type `T`.
    pub fn digits10<T: HyperFloat>(&self) -> T {
        T::from_f64(R1M5 * f64::from(self.digits::<T>()))
    }

    /// Relative tolerance for type `T`: `max(2^(1 - digits), MACH_EPSILON)`.
    pub fn epsilon<T: HyperFloat>(&self) -> T {
        let two = T::from_f64(2.0);
        let eps = two.powi(1 - self.digits::<T>() as i32);
        eps.max(T::MACH_EPSILON)
    }

    pub(crate) fn raise_domain_error<T: HyperFloat>(
        &self,
        function: &'static str,
        value: T,
    ) -> Result<T, Error> {
        match self.domain_error {
            ErrorAction::Ignore | ErrorAction::ReturnNan => Ok(T::nan()),
            ErrorAction::Raise => Err(Error::Domain {
                function,
                value: value.as_f64(),
            }),
        }
    }

    pub(crate) fn raise_pole_error<T: HyperFloat>(
        &self,
        function: &'static str,
        value: T,
    ) -> Result<T, Error> {
        match self.pole_error {
            ErrorAction::Ignore => Ok(T::infinity()),
            ErrorAction::ReturnNan => Ok(T::nan()),
            ErrorAction::Raise => Err(Error::Pole {
                function,
                value: value.as_f64(),
            }),
        }
    }

    /// `sign` carries the sign of the value that overflowed.
    pub(crate) fn raise_overflow_error<T: HyperFloat>(
        &self,
        function: &'static str,
        sign: T,
    ) -> Result<T, Error> {
        match self.overflow_error {
            ErrorAction::Ignore => Ok(if sign < T::zero() {
                T::neg_infinity()
            } else {
                T::infinity()
            }),
            ErrorAction::ReturnNan => Ok(T::nan()),
            ErrorAction::Raise => Err(Error::Overflow { function }),
        }
    }

    pub(crate) fn raise_evaluation_error<T: HyperFloat>(
        &self,
        function: &'static str,
        terms: usize,
        partial: T,
    ) -> Result<T, Error> {
        match self.evaluation_error {
            ErrorAction::Ignore => Ok(partial),
            ErrorAction::ReturnNan => Ok(T::nan()),
            ErrorAction::Raise => Err(Error::NonConvergence { function, terms }),
        }
    }

    /// Route an error raised inside a kernel through the matching action.
    ///
    /// Kernels have no partial value to hand back, so an ignored
    /// non-convergence gives NaN and an ignored overflow +∞.
    pub(crate) fn recover<T: HyperFloat>(&self, error: Error) -> Result<T, Error> {
        match error {
            Error::Domain { function, value } => {
                self.raise_domain_error(function, T::from_f64(value))
            }
            Error::Pole { function, value } => self.raise_pole_error(function, T::from_f64(value)),
            Error::NonConvergence { function, terms } => {
                self.raise_evaluation_error(function, terms, T::nan())
            }
            Error::Overflow { function } => self.raise_overflow_error(function, T::one()),
        }
    }

    /// Unwrap a finished summation, reporting non-convergence per policy.
    pub(crate) fn check_series<T: HyperFloat>(
        &self,
        function: &'static str,
        summation: Summation<T>,
    ) -> Result<T, Error> {
        if summation.converged {
            Ok(summation.value)
        } else {
            self.raise_evaluation_error(function, summation.terms, summation.value)
        }
    }

    /// Report an infinite result as overflow, keeping its sign.
    pub(crate) fn check_finite<T: HyperFloat>(
        &self,
        function: &'static str,
        value: T,
    ) -> Result<T, Error> {
        if value.is_infinite() {
            self.raise_overflow_error(function, value.signum())
        } else {
            Ok(value)
        }
    }

    /// Report a value that overflowed when computed in the log domain.
    pub(crate) fn check_log_magnitude<T: HyperFloat>(
        &self,
        function: &'static str,
        log_magnitude: T,
        sign: T,
    ) -> Result<T, Error> {
        if log_magnitude > T::log_max() {
            self.raise_overflow_error(function, sign)
        } else if log_magnitude < T::log_min() + T::MACH_EPSILON.ln() {
            Ok(sign * T::zero())
        } else {
            Ok(sign * log_magnitude.exp())
        }
    }
}
