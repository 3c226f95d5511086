//! Generalized pFq(a; b; z) by its Taylor series.
//!
//! The series converges for every z when p <= q, for |z| < 1 when
//! p = q + 1, and only as a polynomial when p > q + 1.

use crate::algo::series::sum_series;
use crate::algo::terms::PfqTerms;
use crate::machine::HyperFloat;
use crate::policy::Policy;
use crate::types::Error;
use crate::utils::is_nonpositive_integer;

pub(crate) const HYPPFQ: &str = "hypergeometric_pfq(a, b, z)";

pub(crate) fn hyppfq_imp<T: HyperFloat>(
    a: &[T],
    b: &[T],
    z: T,
    policy: &Policy,
) -> Result<T, Error> {
    if z.is_nan() || a.iter().chain(b).any(|x| x.is_nan()) {
        return policy.raise_domain_error(HYPPFQ, T::nan());
    }
    if z == T::zero() || a.iter().any(|&x| x == T::zero()) {
        return Ok(T::one());
    }

    // The first zero numerator, if any, ends the series.
    let terminator = a
        .iter()
        .copied()
        .filter(|&x| is_nonpositive_integer(x))
        .fold(None, |best: Option<T>, x| Some(best.map_or(x, |m| m.max(x))));

    for &bj in b {
        let masked = terminator.is_some_and(|t| t > bj);
        if is_nonpositive_integer(bj) && !masked {
            return policy.raise_pole_error(HYPPFQ, bj);
        }
    }
    if terminator.is_none() {
        let (p, q) = (a.len(), b.len());
        if p > q + 1 || (p == q + 1 && z.abs() >= T::one()) {
            return policy.raise_domain_error(HYPPFQ, z);
        }
    }

    let series = sum_series(
        PfqTerms::new(a, b, z),
        policy.epsilon::<T>(),
        policy.max_series_iterations,
        T::zero(),
    );
    let value = policy.check_series(HYPPFQ, series)?;
    policy.check_finite(HYPPFQ, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hyp1f1::hyp1f1_imp;
    use crate::hyp2f1::hyp2f1_imp;
    use approx::assert_relative_eq;

    fn f(a: &[f64], b: &[f64], z: f64) -> f64 {
        hyppfq_imp(a, b, z, &Policy::default()).unwrap()
    }

    #[test]
    fn matches_fixed_orders() {
        let p = Policy::default();
        let m = hyp1f1_imp(0.5, 1.5, 3.0, &p).unwrap();
        assert_relative_eq!(f(&[0.5], &[1.5], 3.0), m, max_relative = 1e-14);
        let g = hyp2f1_imp(0.3, 0.7, 1.9, 0.4, &p).unwrap();
        assert_relative_eq!(f(&[0.3, 0.7], &[1.9], 0.4), g, max_relative = 1e-14);
        // 0F0 = exp
        assert_relative_eq!(f(&[], &[], 2.0), 2.0_f64.exp(), max_relative = 1e-15);
    }

    #[test]
    fn higher_order() {
        // 3F2(1, 1, 1; 2, 2; z) = Li2(z) / z
        let li2_half = 0.5822405264650125;
        assert_relative_eq!(f(&[1.0, 1.0, 1.0], &[2.0, 2.0], 0.5), li2_half / 0.5, max_relative = 1e-14);
    }

    #[test]
    fn convergence_domain() {
        let p = Policy::default();
        assert!(matches!(
            hyppfq_imp(&[1.0, 1.0, 1.0], &[2.0, 2.0], 1.5, &p),
            Err(Error::Domain { .. })
        ));
        assert!(matches!(
            hyppfq_imp(&[1.0, 1.0, 1.0], &[2.0], 0.1, &p),
            Err(Error::Domain { .. })
        ));
        // a terminating numerator makes any order a polynomial: 1 + (-1)(2)(3)/4 z
        assert_relative_eq!(f(&[-1.0, 2.0, 3.0], &[4.0], 2.0), -2.0, max_relative = 1e-15);
    }

    #[test]
    fn poles() {
        let p = Policy::default();
        assert!(matches!(
            hyppfq_imp(&[0.5], &[-2.0], 0.5, &p),
            Err(Error::Pole { .. })
        ));
        assert!(matches!(
            hyppfq_imp(&[-3.0, 0.5], &[-2.0], 0.5, &p),
            Err(Error::Pole { .. })
        ));
        // 1 + (-1)(0.5)/(-2) z
        assert_relative_eq!(f(&[-1.0, 0.5], &[-2.0], 0.5), 1.125, max_relative = 1e-15);
    }
}
