//! 2F0(a1, a2;; z).
//!
//! Convergent only when a numerator parameter is a non-positive integer.
//! Otherwise the series is asymptotic and is summed up to its smallest term;
//! if that term is still above the tolerance the result is reported as
//! non-convergent, with the partial sum available under `Ignore`.

use crate::algo::gamma::ln_gamma;
use crate::algo::laguerre::laguerre;
use crate::algo::series::{sum_series, UntilDivergent};
use crate::algo::terms::TaylorTerms;
use crate::machine::HyperFloat;
use crate::policy::Policy;
use crate::types::Error;
use crate::utils::is_nonpositive_integer;

pub(crate) const HYP2F0: &str = "hypergeometric_2f0(a1, a2, z)";

pub(crate) fn hyp2f0_imp<T: HyperFloat>(a1: T, a2: T, z: T, policy: &Policy) -> Result<T, Error> {
    let zero = T::zero();

    if a1.is_nan() || a2.is_nan() || z.is_nan() {
        return policy.raise_domain_error(HYP2F0, T::nan());
    }
    if z == zero || a1 == zero || a2 == zero {
        return Ok(T::one());
    }

    // Put the parameter that terminates first in a1.
    let (a1, a2) = if is_nonpositive_integer(a2) && (!is_nonpositive_integer(a1) || a2 > a1) {
        (a2, a1)
    } else {
        (a1, a2)
    };

    if is_nonpositive_integer(a1) {
        if is_nonpositive_integer(a2) {
            return laguerre_form(a1, a2, z, policy);
        }
        let series = sum_series(
            TaylorTerms::hyp2f0(a1, a2, z),
            policy.epsilon::<T>(),
            policy.max_series_iterations,
            zero,
        );
        let value = policy.check_series(HYP2F0, series)?;
        return policy.check_finite(HYP2F0, value);
    }

    let mut terms = UntilDivergent::new(TaylorTerms::hyp2f0(a1, a2, z));
    let series = sum_series(
        &mut terms,
        policy.epsilon::<T>(),
        policy.max_series_iterations,
        zero,
    );
    if terms.diverged() || !series.converged {
        return policy.raise_evaluation_error(HYP2F0, series.terms, series.value);
    }
    Ok(series.value)
}

/// `2F0(-n, a2;; z) = n! z^n L_n^(-a2-n)(-1/z)` for non-positive integers
/// `-n >= a2`.
fn laguerre_form<T: HyperFloat>(a1: T, a2: T, z: T, policy: &Policy) -> Result<T, Error> {
    let one = T::one();
    let n = match (-a1).to_usize() {
        Some(n) if n <= policy.max_series_iterations => n,
        _ => {
            return policy.raise_evaluation_error(HYP2F0, policy.max_series_iterations, T::nan());
        }
    };
    let nt = T::from_f64(n as f64);
    let l = laguerre(n, -a2 - nt, -one / z);
    if l == T::zero() {
        return Ok(l);
    }
    let (ln_factorial, _) = ln_gamma(nt + one);
    let log = ln_factorial + nt * z.abs().ln() + l.abs().ln();
    let mut sign = l.signum();
    if z < T::zero() && n % 2 == 1 {
        sign = -sign;
    }
    policy.check_log_magnitude(HYP2F0, log, sign)
}
