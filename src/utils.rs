//! Small real-valued helpers shared by the kernels.

use crate::algo::constants::PI;
use crate::machine::HyperFloat;

/// Compute sin(π·x) with exact values at integers and half-integers.
///
/// The argument is reduced modulo 2 before scaling by π, so `sinpi(n)` is
/// exactly 0 and `sinpi(n + 0.5)` exactly ±1 for every integer `n`, where
/// `(x * PI).sin()` would leave a residue of order 1e-16.
#[inline]
pub(crate) fn sinpi<T: HyperFloat>(x: T) -> T {
    let zero = T::zero();
    let one = T::one();
    let two = T::from_f64(2.0);
    let half = T::from_f64(0.5);
    let pi = T::from_f64(PI);

    // odd function
    let (ax, sign) = if x < zero { (-x, -one) } else { (x, one) };
    let r = ax % two;

    if r == zero || r == one {
        return zero;
    }
    // sin(π r) for r in (0, 2), folded onto [0, 1/2]
    let (folded, s) = if r < one { (r, sign) } else { (r - one, -sign) };
    let folded = if folded > half { one - folded } else { folded };
    if folded == half {
        return s;
    }
    s * (folded * pi).sin()
}

/// Compute cos(π·x) with exact values at integers and half-integers.
///
/// Companion of [`sinpi`]: `cospi(n + 0.5)` is exactly 0 and `cospi(n)`
/// exactly ±1.
#[inline]
pub(crate) fn cospi<T: HyperFloat>(x: T) -> T {
    let zero = T::zero();
    let one = T::one();
    let two = T::from_f64(2.0);
    let half = T::from_f64(0.5);
    let pi = T::from_f64(PI);

    // even function; cos(π r) for r in [0, 2) folded onto [0, 1/2]
    let r = x.abs() % two;
    let (r, sign) = if r > one { (two - r, one) } else { (r, one) };
    let (r, sign) = if r > half { (one - r, -sign) } else { (r, sign) };
    if r == half {
        return zero;
    }
    if r == zero {
        return sign;
    }
    sign * (r * pi).cos()
}

/// `true` for x in {0, -1, -2, ...}, where gamma functions have poles and
/// hypergeometric series terminate.
#[inline]
pub(crate) fn is_nonpositive_integer<T: HyperFloat>(x: T) -> bool {
    x <= T::zero() && x == x.floor()
}

#[inline]
pub(crate) fn is_integer<T: HyperFloat>(x: T) -> bool {
    x.is_finite() && x == x.floor()
}

/// Binary exponent `e` with `x = m · 2^e`, `0.5 <= |m| < 1`, like C `frexp`.
///
/// Zero and non-finite values report 0.
#[inline]
pub(crate) fn exponent<T: HyperFloat>(x: T) -> i32 {
    if x == T::zero() || !x.is_finite() {
        return 0;
    }
    x.abs().log2().floor().to_i32().map_or(0, |e| e + 1)
}
