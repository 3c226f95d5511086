//! Kummer's function M(a, b, z) = 1F1(a; b; z).
//!
//! Closed forms are tried first, then the large-|z| expansion, Kummer's
//! transformation for z < -1, the recurrence in `a` or the Bessel series for
//! very negative `a`, and finally the Taylor series. A Taylor sum for
//! negative `a` that cancels away more than a few digits is redone by one of
//! the negative-`a` methods. The order of the checks matters: each later
//! method assumes the earlier cases are gone.

use crate::algo::asym::{
    hyp1f1_asymptotic_negative, hyp1f1_asymptotic_positive, in_asymptotic_region,
};
use crate::algo::bessel_relation::hyp1f1_bessel;
use crate::algo::recurrence::{apply_recurrence, Hyp1f1ACoefficients};
use crate::algo::series::sum_cancelled_series;
use crate::algo::terms::TaylorTerms;
use crate::machine::HyperFloat;
use crate::policy::Policy;
use crate::types::Error;
use crate::utils::{is_integer, is_nonpositive_integer};

pub(crate) const HYP1F1: &str = "hypergeometric_1f1(a, b, z)";

/// Decimal digits the Taylor series may cancel before a negative `a` is
/// handed to another method.
const MAX_LOST_DIGITS: f64 = 3.0;

pub(crate) fn hyp1f1_imp<T: HyperFloat>(a: T, b: T, z: T, policy: &Policy) -> Result<T, Error> {
    let zero = T::zero();
    let one = T::one();

    if a.is_nan() || b.is_nan() || z.is_nan() {
        return policy.raise_domain_error(HYP1F1, T::nan());
    }
    if z == zero || a == zero {
        return Ok(one);
    }

    if is_nonpositive_integer(b) {
        // The denominator vanishes before (or with) the numerator.
        if a >= zero || (is_nonpositive_integer(a) && a < b) {
            return policy.raise_domain_error(HYP1F1, b);
        }
        if !is_integer(a) {
            return policy.raise_pole_error(HYP1F1, b);
        }
        // otherwise a polynomial of degree -a
    }

    if a == -one {
        return Ok(one - z / b);
    }
    let b_minus_a = b - a;
    if b_minus_a == zero {
        return policy.check_log_magnitude(HYP1F1, z, one);
    }
    if b_minus_a == -one && !is_nonpositive_integer(a) {
        // (1 + z/b) e^z
        let factor = one + z / b;
        if factor == zero {
            return Ok(zero);
        }
        return policy.check_log_magnitude(HYP1F1, z + factor.abs().ln(), factor.signum());
    }
    if a == one && b == T::from_f64(2.0) {
        // (e^z - 1) / z
        if z < T::log_max() {
            return Ok(z.exp_m1() / z);
        }
        return policy.check_log_magnitude(HYP1F1, z - z.ln(), one);
    }

    if in_asymptotic_region(a, b, z, policy) {
        let value = if z > zero {
            hyp1f1_asymptotic_positive(a, b, z, policy)
        } else {
            hyp1f1_asymptotic_negative(a, b, z, policy)
        };
        return value.or_else(|e| policy.recover(e));
    }

    // Polynomials in z < 0 have terms of one sign and need no transformation.
    if z < -one && !is_nonpositive_integer(a) {
        // Kummer: M(a, b, z) = e^z M(b - a, b, -z)
        let inner = hyp1f1_imp(b_minus_a, b, -z, policy)?;
        if inner == zero || !inner.is_finite() {
            return Ok(inner);
        }
        return policy.check_log_magnitude(HYP1F1, z + inner.abs().ln(), inner.signum());
    }

    let very_negative = -T::from_f64(policy.negative_a_factor) * policy.digits10::<T>();
    if a < very_negative && (b.abs() < a.abs() || a.abs() < z.abs()) {
        if let Some(value) = negative_a(a, b, z, policy) {
            return value;
        }
    }

    let series = sum_cancelled_series(
        TaylorTerms::hyp1f1(a, b, z),
        policy.epsilon::<T>(),
        policy.max_series_iterations,
        zero,
    );
    // Alternating terms for a < 0 < z can wipe out the sum.
    if a < zero && z > zero && series.lost_digits > T::from_f64(MAX_LOST_DIGITS) {
        if let Some(value) = negative_a(a, b, z, policy) {
            return value;
        }
    }
    let value = policy.check_series(HYP1F1, series.summation())?;
    policy.check_finite(HYP1F1, value)
}

/// Methods that stay accurate for negative `a`: the recurrence in `a` for
/// integers, A&S 13.3.8 otherwise (z > 0 only).
fn negative_a<T: HyperFloat>(a: T, b: T, z: T, policy: &Policy) -> Option<Result<T, Error>> {
    if is_integer(a) && !is_nonpositive_integer(b) {
        return Some(backward_in_a(a, b, z, policy));
    }
    if !is_integer(a) && z > T::zero() {
        return Some(hyp1f1_bessel(a, b, z, policy).or_else(|e| policy.recover(e)));
    }
    None
}

/// M(a, b, z) for a negative integer `a`, stepping down from
/// M(0) = 1 and M(-1) = 1 - z/b.
fn backward_in_a<T: HyperFloat>(a: T, b: T, z: T, policy: &Policy) -> Result<T, Error> {
    let one = T::one();
    let steps = match (-a).to_usize() {
        Some(n) if n <= policy.max_series_iterations => n,
        _ => {
            return policy.raise_evaluation_error(HYP1F1, policy.max_series_iterations, T::nan());
        }
    };
    let coefs = Hyp1f1ACoefficients::new(T::zero(), b, z);
    let value = apply_recurrence(&coefs, one, one - z / b, steps);
    policy.check_finite(HYP1F1, value)
}
