//! Series summation engine.
//!
//! Every summation takes a term generator (any iterator of terms), a
//! relative tolerance `factor` and a mandatory iteration cap. A generator
//! that runs dry ends the sum as converged; hitting the cap does not.

use crate::algo::constants::R1M5;
use crate::machine::HyperFloat;
use crate::utils::exponent;

/// Outcome of a summation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summation<T> {
    /// The accumulated sum (partial if not converged).
    pub value: T,
    /// Number of terms consumed.
    pub terms: usize,
    /// `false` when the iteration cap ran out before the tolerance was met.
    pub converged: bool,
}

/// Outcome of a cancellation-tracking summation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CancelledSummation<T> {
    /// The accumulated sum (partial if not converged).
    pub value: T,
    /// Number of terms consumed.
    pub terms: usize,
    /// `false` when the iteration cap ran out before the tolerance was met.
    pub converged: bool,
    /// Estimated decimal digits lost to cancellation: the binary exponent
    /// gap between the largest term and the sum, times log10(2).
    pub lost_digits: T,
}

impl<T: Copy> CancelledSummation<T> {
    /// Drop the cancellation estimate.
    pub fn summation(&self) -> Summation<T> {
        Summation {
            value: self.value,
            terms: self.terms,
            converged: self.converged,
        }
    }
}

/// Sum `init_value + t_0 + t_1 + ...` until `|t_k| <= |factor * sum|`.
///
/// The stop test multiplies instead of dividing, so a zero partial sum
/// simply keeps the loop running until a zero term or the cap ends it.
/// A NaN partial sum ends the loop at once, reported as not converged.
pub fn sum_series<T, I>(terms: I, factor: T, max_terms: usize, init_value: T) -> Summation<T>
where
    T: HyperFloat,
    I: IntoIterator<Item = T>,
{
    let factor = factor.abs();
    let mut result = init_value;
    let mut used = 0;
    for next in terms.into_iter().take(max_terms) {
        result = result + next;
        used += 1;
        if result.is_nan() {
            return Summation {
                value: result,
                terms: used,
                converged: false,
            };
        }
        if next.abs() <= (factor * result).abs() {
            return Summation {
                value: result,
                terms: used,
                converged: true,
            };
        }
    }
    Summation {
        value: result,
        terms: used,
        converged: used < max_terms,
    }
}

/// [`sum_series`] that also estimates the digits lost to cancellation.
pub fn sum_cancelled_series<T, I>(
    terms: I,
    factor: T,
    max_terms: usize,
    init_value: T,
) -> CancelledSummation<T>
where
    T: HyperFloat,
    I: IntoIterator<Item = T>,
{
    let mut max_term = init_value.abs();
    let tracked = terms.into_iter().inspect(|t| max_term = max_term.max(t.abs()));
    let Summation {
        value,
        terms,
        converged,
    } = sum_series(tracked, factor, max_terms, init_value);

    let lost_digits = if value == T::zero() {
        if max_term == T::zero() {
            T::zero()
        } else {
            T::infinity()
        }
    } else {
        let gap = (exponent(max_term) - exponent(value)).max(0);
        T::from_f64(f64::from(gap) * R1M5)
    };
    CancelledSummation {
        value,
        terms,
        converged,
        lost_digits,
    }
}

/// Compensated (Kahan) summation of `t_0 + t_1 + ...`.
///
/// Stops on the same relative rule as [`sum_series`]; used where rounding in
/// a long, slowly converging sum dominates the truncation error.
pub fn kahan_sum_series<T, I>(terms: I, factor: T, max_terms: usize) -> Summation<T>
where
    T: HyperFloat,
    I: IntoIterator<Item = T>,
{
    let factor = factor.abs();
    let mut iter = terms.into_iter().take(max_terms);
    let Some(first) = iter.next() else {
        return Summation {
            value: T::zero(),
            terms: 0,
            converged: max_terms > 0,
        };
    };
    let mut result = first;
    let mut carry = T::zero();
    let mut used = 1;
    for next in iter {
        used += 1;
        let y = next - carry;
        let t = result + y;
        carry = (t - result) - y;
        result = t;
        if result.is_nan() {
            break;
        }
        if next.abs() <= (factor * result).abs() {
            return Summation {
                value: result,
                terms: used,
                converged: true,
            };
        }
    }
    Summation {
        value: result,
        terms: used,
        converged: used < max_terms && !result.is_nan(),
    }
}

/// Iterator adapter that ends a divergent (asymptotic) series at the first
/// term larger in magnitude than its predecessor.
///
/// After summation, [`diverged`](UntilDivergent::diverged) tells whether the
/// series was cut short this way.
#[derive(Debug, Clone)]
pub(crate) struct UntilDivergent<I, T> {
    inner: I,
    last: Option<T>,
    diverged: bool,
}

impl<I, T> UntilDivergent<I, T> {
    pub(crate) fn new(inner: I) -> Self {
        UntilDivergent {
            inner,
            last: None,
            diverged: false,
        }
    }

    pub(crate) fn diverged(&self) -> bool {
        self.diverged
    }
}

impl<I, T> Iterator for UntilDivergent<I, T>
where
    I: Iterator<Item = T>,
    T: HyperFloat,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.diverged {
            return None;
        }
        let next = self.inner.next()?;
        if let Some(last) = self.last {
            if next.abs() > last.abs() {
                self.diverged = true;
                return None;
            }
        }
        self.last = Some(next);
        Some(next)
    }
}
