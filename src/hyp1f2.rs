//! 1F2(a; b1, b2; z).
//!
//! Summed by its Taylor series. For large negative z the alternating terms
//! cancel; once more than a third of the working digits are gone the result
//! is reported as an evaluation error, with the sum as the partial value.

use crate::algo::series::sum_cancelled_series;
use crate::algo::terms::TaylorTerms;
use crate::hyp0f1::hyp0f1_imp;
use crate::machine::HyperFloat;
use crate::policy::Policy;
use crate::types::Error;
use crate::utils::is_nonpositive_integer;

pub(crate) const HYP1F2: &str = "hypergeometric_1f2(a, b1, b2, z)";

pub(crate) fn hyp1f2_imp<T: HyperFloat>(
    a: T,
    b1: T,
    b2: T,
    z: T,
    policy: &Policy,
) -> Result<T, Error> {
    if a.is_nan() || b1.is_nan() || b2.is_nan() || z.is_nan() {
        return policy.raise_domain_error(HYP1F2, T::nan());
    }
    if z == T::zero() || a == T::zero() {
        return Ok(T::one());
    }
    for b in [b1, b2] {
        // a zero numerator must arrive before the zero denominator
        let terminates_first = is_nonpositive_integer(a) && a > b;
        if is_nonpositive_integer(b) && !terminates_first {
            return policy.raise_pole_error(HYP1F2, b);
        }
    }
    if a == b1 {
        return hyp0f1_imp(b2, z, policy);
    }
    if a == b2 {
        return hyp0f1_imp(b1, z, policy);
    }

    let series = sum_cancelled_series(
        TaylorTerms::hyp1f2(a, b1, b2, z),
        policy.epsilon::<T>(),
        policy.max_series_iterations,
        T::zero(),
    );
    let value = policy.check_series(HYP1F2, series.summation())?;
    if series.lost_digits > policy.digits10::<T>() / T::from_f64(3.0) {
        return policy.raise_evaluation_error(HYP1F2, series.terms, value);
    }
    policy.check_finite(HYP1F2, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ErrorAction;
    use approx::assert_relative_eq;

    fn f(a: f64, b1: f64, b2: f64, z: f64) -> f64 {
        hyp1f2_imp(a, b1, b2, z, &Policy::default()).unwrap()
    }

    #[test]
    fn reference_values() {
        assert_eq!(f(1.5, 2.5, 3.5, 0.0), 1.0);
        assert_relative_eq!(f(1.5, 2.5, 3.5, 1.0), 1.185695992645896, max_relative = 1e-14);
        assert_relative_eq!(f(-0.5, 1.25, 0.75, -6.0), 3.3082296980630786, max_relative = 1e-13);
    }

    #[test]
    fn cancellation_is_reported() {
        // three digits lost: still accurate
        assert_relative_eq!(f(0.75, 1.5, 2.5, -40.0), 0.06449592164056484, max_relative = 1e-12);

        let p = Policy::default();
        assert!(matches!(
            hyp1f2_imp(3.01, 6.52, 2.39, -154.0, &p),
            Err(Error::NonConvergence { .. })
        ));
        assert!(matches!(
            hyp1f2_imp(3.628, -0.693, 1.934, -184.9, &p),
            Err(Error::NonConvergence { .. })
        ));
        let p = p.with_evaluation_error(ErrorAction::Ignore);
        let partial = hyp1f2_imp(3.01, 6.52, 2.39, -154.0_f64, &p).unwrap();
        assert_relative_eq!(partial, -4.39259834942566e-5, max_relative = 1e-4);
    }

    #[test]
    fn reduces_to_0f1() {
        let z = -3.0;
        let direct = f(2.5, 2.5, 1.5, z);
        let reduced = hyp0f1_imp(1.5, z, &Policy::default()).unwrap();
        assert_eq!(direct, reduced);
        // 0F1(; 3/2; -x²/4) = sin x / x
        assert_relative_eq!(f(0.75, 1.5, 0.75, -1.0), 2.0_f64.sin() / 2.0, max_relative = 1e-15);
    }

    #[test]
    fn terminating_numerator_masks_pole() {
        // 1 + (-1) z / ((-3)(2)) = 1 + z/6
        assert_relative_eq!(f(-1.0, -3.0, 2.0, 1.2), 1.2, max_relative = 1e-15);
        let p = Policy::default();
        assert!(matches!(
            hyp1f2_imp(-3.0, -2.0, 2.0, 1.0, &p),
            Err(Error::Pole { .. })
        ));
        assert!(matches!(
            hyp1f2_imp(0.5, 1.0, -4.0, 1.0, &p),
            Err(Error::Pole { .. })
        ));
    }
}
