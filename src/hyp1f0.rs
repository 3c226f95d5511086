//! 1F0(a;; z) = (1 - z)^(-a).

use crate::algo::series::sum_series;
use crate::algo::terms::TaylorTerms;
use crate::machine::HyperFloat;
use crate::policy::Policy;
use crate::types::Error;
use crate::utils::{is_integer, is_nonpositive_integer};

pub(crate) const HYP1F0: &str = "hypergeometric_1f0(a, z)";

pub(crate) fn hyp1f0_imp<T: HyperFloat>(a: T, z: T, policy: &Policy) -> Result<T, Error> {
    let zero = T::zero();
    let one = T::one();

    if a.is_nan() || z.is_nan() {
        return policy.raise_domain_error(HYP1F0, T::nan());
    }
    if z == zero || a == zero {
        return Ok(one);
    }
    if z == one {
        return policy.raise_pole_error(HYP1F0, z);
    }

    if is_nonpositive_integer(a) || z.abs() < T::from_f64(0.5) {
        let series = sum_series(
            TaylorTerms::hyp1f0(a, z),
            policy.epsilon::<T>(),
            policy.max_series_iterations,
            zero,
        );
        let value = policy.check_series(HYP1F0, series)?;
        return policy.check_finite(HYP1F0, value);
    }

    let base = one - z;
    if base > zero {
        return policy.check_log_magnitude(HYP1F0, -a * base.ln(), one);
    }
    // (1 - z)^(-a) is real past the branch point only for integer a.
    if !is_integer(a) {
        return policy.raise_domain_error(HYP1F0, z);
    }
    let odd = (a / T::from_f64(2.0)).fract() != zero;
    let sign = if odd { -one } else { one };
    policy.check_log_magnitude(HYP1F0, -a * (-base).ln(), sign)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ErrorAction;
    use approx::assert_relative_eq;

    fn f(a: f64, z: f64) -> f64 {
        hyp1f0_imp(a, z, &Policy::default()).unwrap()
    }

    #[test]
    fn binomial_series() {
        assert_eq!(f(2.5, 0.0), 1.0);
        assert_relative_eq!(f(2.5, 0.25), 0.75_f64.powf(-2.5), max_relative = 1e-15);
        assert_relative_eq!(f(-1.5, -0.4), 1.4_f64.powf(1.5), max_relative = 1e-15);
        assert_relative_eq!(f(0.5, 0.9), 10.0_f64.sqrt(), max_relative = 1e-14);
        assert_relative_eq!(f(1.5, -20.0), 21.0_f64.powf(-1.5), max_relative = 1e-14);
    }

    #[test]
    fn polynomial_for_nonpositive_integer_a() {
        // (1 - z)^3
        assert_relative_eq!(f(-3.0, 4.0), -27.0, max_relative = 1e-15);
        assert_relative_eq!(f(-2.0, 7.0), 36.0, max_relative = 1e-15);
    }

    #[test]
    fn past_the_branch_point() {
        assert_relative_eq!(f(3.0, 3.0), -0.125, max_relative = 1e-15);
        assert_relative_eq!(f(2.0, 3.0), 0.25, max_relative = 1e-15);
        let p = Policy::default();
        assert!(matches!(hyp1f0_imp(2.5, 3.0, &p), Err(Error::Domain { .. })));
        assert!(matches!(hyp1f0_imp(2.5, 1.0, &p), Err(Error::Pole { .. })));
    }

    #[test]
    fn overflow() {
        let p = Policy::default();
        assert!(matches!(
            hyp1f0_imp(400.0, 0.9, &p),
            Err(Error::Overflow { .. })
        ));
        let p = p.with_overflow_error(ErrorAction::Ignore);
        assert_eq!(hyp1f0_imp(401.0, 1.1, &p).unwrap(), f64::NEG_INFINITY);
    }
}
