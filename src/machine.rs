//! Machine constants and the `HyperFloat` trait.
//!
//! Constants follow the IEEE 754 binary32/binary64 layouts, named after the
//! I1MACH/D1MACH conventions.

use num_traits::Float;

use crate::algo::constants::R1M5;

/// Floating-point trait for hypergeometric function evaluation.
///
/// Implemented for `f64` and `f32`. Provides machine constants, the
/// evaluation type used when promotion is requested, and derived
/// thresholds used by the dispatchers.
pub trait HyperFloat: Float + core::fmt::Debug + Send + Sync + 'static {
    /// Machine epsilon (D1MACH(3)).
    const MACH_EPSILON: Self;
    /// Largest representable number (D1MACH(2)).
    const MACH_HUGE: Self;
    /// Number of binary digits in the mantissa (I1MACH(14)).
    const MACH_DIGITS: i32;

    /// Type the public wrappers evaluate in when float promotion is on.
    ///
    /// `f32` evaluates in `f64`; `f64` evaluates in itself.
    type Eval: HyperFloat;

    /// Infallible conversion from f64.
    ///
    /// For f64 this is the identity; for f32 it rounds via `as f32`.
    fn from_f64(x: f64) -> Self;

    /// Lossless (f32) or identity (f64) conversion to f64, for diagnostics.
    fn as_f64(self) -> f64;

    /// Widen to the evaluation type.
    fn promote(self) -> Self::Eval;

    /// Narrow a value of the evaluation type back to `Self`.
    ///
    /// Values beyond the range of `Self` become infinite; callers that care
    /// check the magnitude against [`HyperFloat::MACH_HUGE`] first.
    fn narrow(x: Self::Eval) -> Self;

    /// ln(MACH_HUGE): the largest argument `exp` accepts without overflow.
    fn log_max() -> Self;

    /// ln of the smallest positive normal number: below this, `exp`
    /// leaves the normal range.
    fn log_min() -> Self;

    /// Large-argument threshold for the asymptotic expansions: 1.2*DIG + 3,
    /// where DIG = log10(2) * digits is the decimal precision requested.
    #[inline]
    fn rl(digits: u32) -> Self {
        let dig = R1M5 * f64::from(digits);
        Self::from_f64(1.2 * dig + 3.0)
    }

    /// Fused multiply-add: `self * a + b`.
    ///
    /// With `std` enabled, uses hardware FMA via the C library `fma()`.
    /// Without `std`, falls back to plain `self * a + b` to avoid the
    /// slow software FMA in libm.
    ///
    /// Named `fma` to avoid ambiguity with [`Float::mul_add`].
    fn fma(self, a: Self, b: Self) -> Self;
}

impl HyperFloat for f64 {
    const MACH_EPSILON: f64 = 2.220446049250313e-16;
    const MACH_HUGE: f64 = 1.7976931348623157e+308;
    const MACH_DIGITS: i32 = 53;

    type Eval = f64;

    #[inline]
    fn from_f64(x: f64) -> f64 {
        x
    }
    #[inline]
    fn as_f64(self) -> f64 {
        self
    }
    #[inline]
    fn promote(self) -> f64 {
        self
    }
    #[inline]
    fn narrow(x: f64) -> f64 {
        x
    }
    #[inline]
    fn log_max() -> f64 {
        709.782712893384
    }
    #[inline]
    fn log_min() -> f64 {
        -708.3964185322641
    }

    #[cfg(feature = "std")]
    #[inline]
    fn fma(self, a: f64, b: f64) -> f64 {
        Float::mul_add(self, a, b)
    }

    #[cfg(not(feature = "std"))]
    #[inline]
    fn fma(self, a: f64, b: f64) -> f64 {
        self * a + b
    }
}

impl HyperFloat for f32 {
    const MACH_EPSILON: f32 = 1.1920929e-7;
    const MACH_HUGE: f32 = 3.4028235e+38;
    const MACH_DIGITS: i32 = 24;

    type Eval = f64;

    #[inline]
    fn from_f64(x: f64) -> f32 {
        x as f32
    }
    #[inline]
    fn as_f64(self) -> f64 {
        f64::from(self)
    }
    #[inline]
    fn promote(self) -> f64 {
        f64::from(self)
    }
    #[inline]
    fn narrow(x: f64) -> f32 {
        x as f32
    }
    #[inline]
    fn log_max() -> f32 {
        88.72284
    }
    #[inline]
    fn log_min() -> f32 {
        -87.33655
    }

    #[cfg(feature = "std")]
    #[inline]
    fn fma(self, a: f32, b: f32) -> f32 {
        Float::mul_add(self, a, b)
    }

    #[cfg(not(feature = "std"))]
    #[inline]
    fn fma(self, a: f32, b: f32) -> f32 {
        self * a + b
    }
}
