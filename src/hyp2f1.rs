//! Gauss's function 2F1(a1, a2; b; z) for real z <= 1.
//!
//! The series is summed directly for |z| < 1. Arguments below -1/2 go
//! through Pfaff's transformation
//! `2F1(a1, a2; b; z) = (1-z)^(-a1) 2F1(a1, b-a2; b; z/(z-1))`,
//! which maps them into [1/3, 1). At z = 1 Gauss's theorem applies.

use crate::algo::gamma::ln_gamma;
use crate::algo::series::{kahan_sum_series, sum_series};
use crate::algo::terms::TaylorTerms;
use crate::hyp1f0::hyp1f0_imp;
use crate::machine::HyperFloat;
use crate::policy::Policy;
use crate::types::Error;
use crate::utils::is_nonpositive_integer;

pub(crate) const HYP2F1: &str = "hypergeometric_2f1(a1, a2, b, z)";

pub(crate) fn hyp2f1_imp<T: HyperFloat>(
    a1: T,
    a2: T,
    b: T,
    z: T,
    policy: &Policy,
) -> Result<T, Error> {
    let zero = T::zero();
    let one = T::one();

    if a1.is_nan() || a2.is_nan() || b.is_nan() || z.is_nan() {
        return policy.raise_domain_error(HYP2F1, T::nan());
    }
    if z == zero || a1 == zero || a2 == zero {
        return Ok(one);
    }

    // Put the parameter that terminates first in a1.
    let (a1, a2) = if is_nonpositive_integer(a2) && (!is_nonpositive_integer(a1) || a2 > a1) {
        (a2, a1)
    } else {
        (a1, a2)
    };
    let polynomial = is_nonpositive_integer(a1);

    if is_nonpositive_integer(b) && !(polynomial && a1 > b) {
        return policy.raise_pole_error(HYP2F1, b);
    }
    if a1 == b {
        return hyp1f0_imp(a2, z, policy);
    }
    if a2 == b {
        return hyp1f0_imp(a1, z, policy);
    }

    if polynomial || (z.abs() < one && z >= -T::from_f64(0.5)) {
        return taylor(a1, a2, b, z, policy);
    }
    if z < zero {
        return pfaff(a1, a2, b, z, policy);
    }
    if z == one {
        return gauss(a1, a2, b, policy);
    }
    policy.raise_domain_error(HYP2F1, z)
}

fn taylor<T: HyperFloat>(a1: T, a2: T, b: T, z: T, policy: &Policy) -> Result<T, Error> {
    let series = sum_series(
        TaylorTerms::hyp2f1(a1, a2, b, z),
        policy.epsilon::<T>(),
        policy.max_series_iterations,
        T::zero(),
    );
    let value = policy.check_series(HYP2F1, series)?;
    policy.check_finite(HYP2F1, value)
}

/// z < -1/2. The transformation is taken on the parameter that makes the
/// inner series terminate, else on the smaller one.
fn pfaff<T: HyperFloat>(a1: T, a2: T, b: T, z: T, policy: &Policy) -> Result<T, Error> {
    let one = T::one();
    let (outer, inner) = if is_nonpositive_integer(b - a2) {
        (a1, a2)
    } else if is_nonpositive_integer(b - a1) || a2 < a1 {
        (a2, a1)
    } else {
        (a1, a2)
    };
    let w = z / (z - one);
    let series = kahan_sum_series(
        TaylorTerms::hyp2f1(outer, b - inner, b, w),
        policy.epsilon::<T>(),
        policy.max_series_iterations,
    );
    let sum = policy.check_series(HYP2F1, series)?;
    if sum == T::zero() {
        return Ok(sum);
    }
    let log = -outer * (one - z).ln() + sum.abs().ln();
    policy.check_log_magnitude(HYP2F1, log, sum.signum())
}

/// `Γ(b) Γ(b-a1-a2) / (Γ(b-a1) Γ(b-a2))`, finite only for b - a1 - a2 > 0.
fn gauss<T: HyperFloat>(a1: T, a2: T, b: T, policy: &Policy) -> Result<T, Error> {
    let c = b - a1 - a2;
    if c <= T::zero() {
        return policy.raise_pole_error(HYP2F1, T::one());
    }
    if is_nonpositive_integer(b - a1) || is_nonpositive_integer(b - a2) {
        return Ok(T::zero());
    }
    let (lg_b, sg_b) = ln_gamma(b);
    let (lg_c, sg_c) = ln_gamma(c);
    let (lg_1, sg_1) = ln_gamma(b - a1);
    let (lg_2, sg_2) = ln_gamma(b - a2);
    let log = lg_b + lg_c - lg_1 - lg_2;
    policy.check_log_magnitude(HYP2F1, log, sg_b * sg_c * sg_1 * sg_2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::constants::PI;
    use approx::assert_relative_eq;

    fn f(a1: f64, a2: f64, b: f64, z: f64) -> f64 {
        hyp2f1_imp(a1, a2, b, z, &Policy::default()).unwrap()
    }

    #[test]
    fn logarithm() {
        // 2F1(1, 1; 2; z) = -ln(1 - z) / z
        assert_relative_eq!(f(1.0, 1.0, 2.0, 0.5), 2.0 * 2.0_f64.ln(), max_relative = 1e-15);
        assert_relative_eq!(f(1.0, 1.0, 2.0, -0.25), 1.25_f64.ln() / 0.25, max_relative = 1e-15);
        assert_relative_eq!(f(1.0, 1.0, 2.0, -3.0), 4.0_f64.ln() / 3.0, max_relative = 1e-14);
    }

    #[test]
    fn reference_values() {
        assert_relative_eq!(f(0.3, 0.7, 1.9, 0.8), 1.14072581430877867, max_relative = 1e-14);
        assert_relative_eq!(f(0.5, 1.5, 2.5, -10.0), 0.408860556546278849, max_relative = 1e-14);
        assert_relative_eq!(f(1.25, -0.75, 3.5, -100.0), 14.3311927802562107, max_relative = 1e-13);
        assert_relative_eq!(f(0.25, 2.5, 1.5, -0.6), 0.833568473455745067, max_relative = 1e-14);
    }

    #[test]
    fn polynomials() {
        // 1 - 7.5 + 15
        assert_relative_eq!(f(-2.0, 3.0, 4.0, 5.0), 8.5, max_relative = 1e-15);
        assert_relative_eq!(f(3.0, -2.0, 4.0, 5.0), 8.5, max_relative = 1e-15);
        // terminates before the pole at b = -2: 1 + (-1)(3)/(-2) z
        assert_relative_eq!(f(-1.0, 3.0, -2.0, 2.0), 4.0, max_relative = 1e-15);
    }

    #[test]
    fn reduces_to_1f0() {
        assert_relative_eq!(f(0.5, 2.5, 2.5, 0.9), 10.0_f64.sqrt(), max_relative = 1e-14);
        assert_relative_eq!(f(2.5, 0.5, 2.5, -3.0), 0.5, max_relative = 1e-15);
    }

    #[test]
    fn unit_argument() {
        assert_relative_eq!(f(0.5, 0.5, 2.0, 1.0), 4.0 / PI, max_relative = 1e-14);
        assert_relative_eq!(f(2.5, 1.5, 4.5, 1.0), 10.3083508945915091, max_relative = 1e-13);
        let p = Policy::default();
        assert!(matches!(
            hyp2f1_imp(1.0, 1.0, 2.0, 1.0, &p),
            Err(Error::Pole { .. })
        ));
    }

    #[test]
    fn domain_and_poles() {
        let p = Policy::default();
        assert!(matches!(
            hyp2f1_imp(0.5, 0.5, 2.0, 1.5, &p),
            Err(Error::Domain { .. })
        ));
        assert!(matches!(
            hyp2f1_imp(-3.0, 0.5, -2.0, 0.5, &p),
            Err(Error::Pole { .. })
        ));
        assert!(matches!(
            hyp2f1_imp(0.5, 0.5, 0.0, 0.5, &p),
            Err(Error::Pole { .. })
        ));
    }
}
