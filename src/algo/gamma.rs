//! Gamma function family for real arguments.
//!
//! ln Γ for positive arguments comes from Stirling's asymptotic expansion
//! after shifting the argument upward with Γ(z+n) = z(z+1)...(z+n-1)·Γ(z);
//! negative arguments go through the reflection formula.

#![allow(clippy::excessive_precision)]

use crate::algo::constants::{LN_2PI, LN_PI, R1M5};
use crate::machine::HyperFloat;
use crate::utils::{is_nonpositive_integer, sinpi};

/// Coefficients B_{2k} / (2k(2k-1)) of the Stirling series for ln Γ.
#[rustfmt::skip]
const STIRLING: [f64; 16] = [
     8.33333333333333333e-02,   // 1/12
    -2.77777777777777778e-03,   // -1/360
     7.93650793650793651e-04,   // 1/1260
    -5.95238095238095238e-04,   // -1/1680
     8.41750841750841751e-04,
    -1.91752691752691753e-03,
     6.41025641025641026e-03,
    -2.95506535947712418e-02,
     1.79644372368830573e-01,
    -1.39243221690590112e+00,
     1.34028640441683920e+01,
    -1.56848284626002017e+02,
     2.19310333333333333e+03,
    -3.61087712537249894e+04,
     6.91472268851313067e+05,
    -1.52382215394074162e+07,
];

/// ln Γ(z) for z > 0.
pub(crate) fn ln_gamma_positive<T: HyperFloat>(z: T) -> T {
    let one = T::one();
    let half = T::from_f64(0.5);

    // Below zmin the series has not converged to working precision.
    let dig = (R1M5 * f64::from(T::MACH_DIGITS.unsigned_abs())).clamp(3.0, 20.0) - 3.0;
    let zmin = T::from_f64((1.8 + 0.3875 * dig).floor() + 1.0);

    let mut shifted = z;
    let mut product = one;
    while shifted < zmin {
        product = product * shifted;
        shifted = shifted + one;
    }

    let tol = T::MACH_EPSILON;
    let rz = one / shifted;
    let rz2 = rz * rz;
    let first = T::from_f64(STIRLING[0]) * rz;
    let mut series = first;
    let mut power = rz;
    for &c in &STIRLING[1..] {
        power = power * rz2;
        let term = T::from_f64(c) * power;
        if term.abs() < (first * tol).abs() {
            break;
        }
        series = series + term;
    }

    let ln_z = shifted.ln();
    shifted * (ln_z - one) + half * (T::from_f64(LN_2PI) - ln_z) + series - product.ln()
}

/// ln |Γ(x)| together with the sign of Γ(x).
///
/// Poles (x a non-positive integer) report `(+∞, 1)`.
pub(crate) fn ln_gamma<T: HyperFloat>(x: T) -> (T, T) {
    let one = T::one();
    if is_nonpositive_integer(x) {
        return (T::infinity(), one);
    }
    if x > T::zero() {
        return (ln_gamma_positive(x), one);
    }
    // Γ(x) Γ(1-x) = π / sin(πx)
    let s = sinpi(x);
    let value = T::from_f64(LN_PI) - s.abs().ln() - ln_gamma_positive(one - x);
    (value, s.signum())
}
