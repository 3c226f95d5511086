//! Hypergeometric functions through Bessel functions.
//!
//! * `0F1(; b; z) = Γ(b) z^((1-b)/2) I_{b-1}(2√z)` for z > 0 and
//!   `Γ(b) (-z)^((1-b)/2) J_{b-1}(2√-z)` for z < 0.
//! * A&S 13.3.8 for 1F1 with a < 0, z > 0 and s = √(-az):
//!   `M(a, b, z) = Γ(b) e^(hz) s^(1-b) Σ C_n (z/s)^n J_{b-1+n}(2s)`.

use alloc::vec::Vec;

use crate::algo::bessel::{bessel_i_sequence, bessel_j_sequence};
use crate::algo::constants::PI;
use crate::algo::gamma::ln_gamma;
use crate::algo::series::sum_series;
use crate::machine::HyperFloat;
use crate::policy::Policy;
use crate::types::Error;

const HYP0F1_BESSEL: &str = "hypergeometric_0f1_bessel(b, z)";
const HYP1F1_BESSEL: &str = "hypergeometric_1f1_bessel(a, b, z)";

/// Orders fetched per refill of the J buffer; doubles on every refill.
const FIRST_CHUNK: usize = 64;

/// 0F1(; b; z) for z != 0 and `b` off the poles.
pub(crate) fn hyp0f1_bessel<T: HyperFloat>(b: T, z: T, policy: &Policy) -> Result<T, Error> {
    let one = T::one();
    let two = T::from_f64(2.0);
    let half = T::from_f64(0.5);
    let x = z.abs();
    let root = x.sqrt();

    let (bessel, scale) = if z > T::zero() {
        let v = bessel_i_sequence(b - one, two * root, 1, policy)?;
        (v[0], two * root)
    } else {
        let v = bessel_j_sequence(b - one, two * root, 1, policy)?;
        (v[0], T::zero())
    };
    if bessel == T::zero() {
        return Ok(T::zero());
    }
    let (lg_b, sg_b) = ln_gamma(b);
    let log = lg_b + (one - b) * half * x.ln() + bessel.abs().ln() + scale;
    policy.check_log_magnitude(HYP0F1_BESSEL, log, sg_b * bessel.signum())
}

/// Terms `C_n (z/s)^n J_{b-1+n}(2s)` of A&S 13.3.8.
///
/// Bessel values arrive in chunks; a failure to produce them ends the
/// iteration and is kept in `error`.
struct BesselSeriesTerms<'p, T> {
    a: T,
    b: T,
    h: T,
    two_s: T,
    ratio: T,
    power: T,
    /// C_{n-2}, C_{n-1}, C_n
    c: [T; 3],
    n: usize,
    bessel: Vec<T>,
    /// Order offset of `bessel[0]` relative to b - 1.
    offset: usize,
    chunk: usize,
    policy: &'p Policy,
    error: Option<Error>,
}

impl<'p, T: HyperFloat> BesselSeriesTerms<'p, T> {
    fn new(a: T, b: T, z: T, h: T, policy: &'p Policy) -> Self {
        let s = (-a * z).sqrt();
        BesselSeriesTerms {
            a,
            b,
            h,
            two_s: T::from_f64(2.0) * s,
            ratio: z / s,
            power: T::one(),
            c: [T::zero(), T::zero(), T::one()],
            n: 0,
            bessel: Vec::new(),
            offset: 0,
            chunk: FIRST_CHUNK,
            policy,
            error: None,
        }
    }

    fn bessel_j(&mut self) -> Option<T> {
        if self.n >= self.offset + self.bessel.len() {
            self.offset = self.n;
            let order = self.b - T::one() + T::from_f64(self.n as f64);
            match bessel_j_sequence(order, self.two_s, self.chunk, self.policy) {
                Ok(values) => self.bessel = values,
                Err(e) => {
                    self.error = Some(e);
                    return None;
                }
            }
            self.chunk *= 2;
        }
        Some(self.bessel[self.n - self.offset])
    }

    /// (n+1) C_{n+1} = [(1-2h)n - bh] C_n
    ///               + [(1-2h)a - h(h-1)(b+n-1)] C_{n-1}
    ///               - h(h-1) a C_{n-2}
    fn advance_coefficient(&mut self) {
        let one = T::one();
        let two = T::from_f64(2.0);
        let n = T::from_f64(self.n as f64);
        let (a, b, h) = (self.a, self.b, self.h);
        let [c2, c1, c0] = self.c;
        let one_minus_2h = one - two * h;
        let hh = h * (h - one);
        let next = ((one_minus_2h * n - b * h) * c0
            + (one_minus_2h * a - hh * (b + n - one)) * c1
            - hh * a * c2)
            / (n + one);
        self.c = [c1, c0, next];
    }
}

impl<T: HyperFloat> Iterator for BesselSeriesTerms<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.error.is_some() {
            return None;
        }
        let j = self.bessel_j()?;
        let term = self.c[2] * self.power * j;
        self.advance_coefficient();
        self.power = self.power * self.ratio;
        self.n += 1;
        Some(term)
    }
}

/// 1F1 by A&S 13.3.8, for a < 0 and z > 0.
pub(crate) fn hyp1f1_bessel<T: HyperFloat>(a: T, b: T, z: T, policy: &Policy) -> Result<T, Error> {
    let one = T::one();
    let h = -T::from_f64(PI) / T::from_f64(10.0);
    let mut terms = BesselSeriesTerms::new(a, b, z, h, policy);
    let summation = sum_series(
        &mut terms,
        policy.epsilon::<T>(),
        policy.max_series_iterations,
        T::zero(),
    );
    if let Some(error) = terms.error {
        return Err(error);
    }
    let sum = policy.check_series(HYP1F1_BESSEL, summation)?;
    if sum == T::zero() {
        return Ok(sum);
    }

    let s = (-a * z).sqrt();
    let (lg_b, sg_b) = ln_gamma(b);
    let log = lg_b + (one - b) * s.ln() + h * z + sum.abs().ln();
    policy.check_log_magnitude(HYP1F1_BESSEL, log, sg_b * sum.signum())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::recurrence::{apply_recurrence, Hyp1f1ACoefficients};
    use crate::algo::terms::TaylorTerms;
    use approx::assert_relative_eq;

    fn taylor_1f1(a: f64, b: f64, z: f64) -> f64 {
        sum_series(TaylorTerms::hyp1f1(a, b, z), f64::EPSILON, 10_000, 0.0).value
    }

    #[test]
    fn hyp0f1_negative_argument() {
        let p = Policy::default();
        // 0F1(; 3/2; -x²/4) = sin(x)/x, 0F1(; 1/2; -x²/4) = cos(x)
        let v = hyp0f1_bessel(1.5, -100.0, &p).unwrap();
        assert_relative_eq!(v, 20.0_f64.sin() / 20.0, max_relative = 1e-13);
        let v = hyp0f1_bessel(0.5, -100.0, &p).unwrap();
        assert_relative_eq!(v, 0.408082061813391986, max_relative = 1e-13);
        let v = hyp0f1_bessel(2.0, -1e4, &p).unwrap();
        assert_relative_eq!(v, -0.000543045381823782227, max_relative = 1e-11);
        let v = hyp0f1_bessel(-2.5, -30.0, &p).unwrap();
        assert_relative_eq!(v, 78.5485717042362815, max_relative = 1e-12);
    }

    #[test]
    fn hyp0f1_positive_argument() {
        let p = Policy::default();
        let v = hyp0f1_bessel(0.5, 25.0, &p).unwrap();
        assert_relative_eq!(v, 10.0_f64.cosh(), max_relative = 1e-13);
        let v = hyp0f1_bessel(1.5, 25.0, &p).unwrap();
        assert_relative_eq!(v, 10.0_f64.sinh() / 10.0, max_relative = 1e-13);
        let v = hyp0f1_bessel(3.75, 400.0, &p).unwrap();
        assert_relative_eq!(v, 15825324832034.2082, max_relative = 1e-12);
        let v = hyp0f1_bessel(-2.5, 30.0, &p).unwrap();
        assert_relative_eq!(v, -1418477.09552532094, max_relative = 1e-12);
    }

    #[test]
    fn hyp0f1_overflow() {
        let p = Policy::default();
        assert!(matches!(
            hyp0f1_bessel(1.5, 1e6, &p),
            Err(Error::Overflow { .. })
        ));
    }

    #[test]
    fn as_13_3_8_matches_taylor() {
        let p = Policy::default();
        for (a, b, z) in [(-2.5, 1.5, 1.0), (-5.5, 2.0, 1.5)] {
            let v = hyp1f1_bessel(a, b, z, &p).unwrap();
            assert_relative_eq!(v, taylor_1f1(a, b, z), max_relative = 1e-11);
        }
    }

    #[test]
    fn as_13_3_8_reference_values() {
        let p = Policy::default();
        let v = hyp1f1_bessel(-40.5, 3.25, 10.0, &p).unwrap();
        assert_relative_eq!(v, 0.013123490597538295, max_relative = 1e-11);
        let v = hyp1f1_bessel(-100.25, 1.0, 5.0, &p).unwrap();
        assert_relative_eq!(v, 1.454820125955453, max_relative = 1e-12);
        let v = hyp1f1_bessel(-33.3, -2.5, 3.0, &p).unwrap();
        assert_relative_eq!(v, -1906.5631112888152, max_relative = 1e-12);
    }

    #[test]
    fn as_13_3_8_matches_recurrence_in_a() {
        // step M(-0.5), M(-1.5) down to M(-35.5)
        let (b, z) = (1.5, 2.0);
        let p = Policy::default();
        let first = taylor_1f1(-0.5, b, z);
        let second = taylor_1f1(-1.5, b, z);
        let coefs = Hyp1f1ACoefficients::new(-0.5, b, z);
        let stepped = apply_recurrence(&coefs, first, second, 35);
        let v = hyp1f1_bessel(-35.5, b, z, &p).unwrap();
        assert_relative_eq!(v, stepped, max_relative = 1e-8);
        assert_relative_eq!(v, -0.1535611712848139, max_relative = 1e-12);
    }
}
