//! 0F1(; b; z).

use crate::algo::bessel_relation::hyp0f1_bessel;
use crate::algo::series::sum_cancelled_series;
use crate::algo::terms::TaylorTerms;
use crate::machine::HyperFloat;
use crate::policy::Policy;
use crate::types::Error;
use crate::utils::is_nonpositive_integer;

pub(crate) const HYP0F1: &str = "hypergeometric_0f1(b, z)";

/// Taylor series, falling back to the Bessel relation when the series has
/// cancelled away more than two digits or overflowed.
pub(crate) fn hyp0f1_imp<T: HyperFloat>(b: T, z: T, policy: &Policy) -> Result<T, Error> {
    if b.is_nan() || z.is_nan() {
        return policy.raise_domain_error(HYP0F1, T::nan());
    }
    if z == T::zero() {
        return Ok(T::one());
    }
    if is_nonpositive_integer(b) {
        return policy.raise_pole_error(HYP0F1, b);
    }

    let series = sum_cancelled_series(
        TaylorTerms::hyp0f1(b, z),
        policy.epsilon::<T>(),
        policy.max_series_iterations,
        T::zero(),
    );
    let cancelled = z < T::zero() && series.lost_digits > T::from_f64(2.0);
    if cancelled || !series.value.is_finite() {
        return hyp0f1_bessel(b, z, policy).or_else(|e| policy.recover(e));
    }
    let value = policy.check_series(HYP0F1, series.summation())?;
    policy.check_finite(HYP0F1, value)
}
