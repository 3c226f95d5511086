//! Real-argument generalized hypergeometric functions.
//!
//! This crate evaluates 0F1, 1F0, 1F1 (Kummer's function), 1F2, 2F0, 2F1
//! (Gauss's function) and the general pFq for real parameters and argument,
//! together with the series and three-term recurrence tools they are built
//! on.
//!
//! Every function comes in two forms: a plain one using [`Policy::default`],
//! and a `_with_policy` variant that controls error reporting, precision
//! and iteration limits.
//!
//! ```
//! use hypergeo::{hypergeometric_1f1, hypergeometric_2f1};
//!
//! // M(1, 1, z) = e^z
//! let e = hypergeometric_1f1(1.0, 1.0, 1.0_f64).unwrap();
//! assert!((e - core::f64::consts::E).abs() < 1e-15);
//!
//! // 2F1(1, 1; 2; z) = -ln(1 - z) / z
//! let v = hypergeometric_2f1(1.0, 1.0, 2.0, 0.5_f64).unwrap();
//! assert!((v - 2.0 * 2.0_f64.ln()).abs() < 1e-14);
//! ```
//!
//! # Errors
//!
//! Conditions are reported through [`Error`] unless the policy maps them to
//! a sentinel value. See [`ErrorAction`].

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("hypergeo requires either the `std` or the `libm` feature");

mod algo;
mod hyp0f1;
mod hyp1f0;
mod hyp1f1;
mod hyp1f2;
mod hyp2f0;
mod hyp2f1;
mod hyppfq;
pub mod machine;
pub mod policy;
pub mod types;
mod utils;

use alloc::vec::Vec;

use num_traits::Float;

pub use algo::recurrence::{
    apply_recurrence, olver, olver_windowed, Hyp1f1ABCoefficients, Hyp1f1ACoefficients,
    Hyp1f1BCoefficients, RecurrenceCoefficients, RecurrenceSolution, ThreeTerm,
};
pub use algo::series::{
    kahan_sum_series, sum_cancelled_series, sum_series, CancelledSummation, Summation,
};
pub use machine::HyperFloat;
pub use policy::Policy;
pub use types::{Error, ErrorAction};

/// Narrow a value computed in the evaluation type back to `T`, reporting
/// finite values beyond `T`'s range as overflow.
fn narrow<T: HyperFloat>(
    function: &'static str,
    value: T::Eval,
    policy: &Policy,
) -> Result<T, Error> {
    let huge: T::Eval = T::MACH_HUGE.promote();
    if value.is_finite() && value.abs() > huge {
        return policy.raise_overflow_error(function, T::from_f64(value.signum().as_f64()));
    }
    Ok(T::narrow(value))
}

// ── 0F1 ──

/// 0F1(; b; z).
pub fn hypergeometric_0f1<T: HyperFloat>(b: impl Into<T>, z: T) -> Result<T, Error> {
    hypergeometric_0f1_with_policy(b, z, &Policy::default())
}

/// 0F1(; b; z) under `policy`.
pub fn hypergeometric_0f1_with_policy<T: HyperFloat>(
    b: impl Into<T>,
    z: T,
    policy: &Policy,
) -> Result<T, Error> {
    let b = b.into();
    if policy.promote_float {
        let value = hyp0f1::hyp0f1_imp(b.promote(), z.promote(), policy)?;
        narrow(hyp0f1::HYP0F1, value, policy)
    } else {
        hyp0f1::hyp0f1_imp(b, z, policy)
    }
}

// ── 1F0 ──

/// 1F0(a;; z) = (1 - z)^(-a).
pub fn hypergeometric_1f0<T: HyperFloat>(a: impl Into<T>, z: T) -> Result<T, Error> {
    hypergeometric_1f0_with_policy(a, z, &Policy::default())
}

/// 1F0(a;; z) under `policy`.
pub fn hypergeometric_1f0_with_policy<T: HyperFloat>(
    a: impl Into<T>,
    z: T,
    policy: &Policy,
) -> Result<T, Error> {
    let a = a.into();
    if policy.promote_float {
        let value = hyp1f0::hyp1f0_imp(a.promote(), z.promote(), policy)?;
        narrow(hyp1f0::HYP1F0, value, policy)
    } else {
        hyp1f0::hyp1f0_imp(a, z, policy)
    }
}

// ── 1F1 ──

/// Kummer's function M(a, b, z) = 1F1(a; b; z).
///
/// Defined for every real `a` and `z`; `b` a non-positive integer is
/// allowed only when `a` is a non-positive integer with `a > b`, in which
/// case the result is a polynomial.
pub fn hypergeometric_1f1<T: HyperFloat>(
    a: impl Into<T>,
    b: impl Into<T>,
    z: T,
) -> Result<T, Error> {
    hypergeometric_1f1_with_policy(a, b, z, &Policy::default())
}

/// 1F1(a; b; z) under `policy`.
pub fn hypergeometric_1f1_with_policy<T: HyperFloat>(
    a: impl Into<T>,
    b: impl Into<T>,
    z: T,
    policy: &Policy,
) -> Result<T, Error> {
    let (a, b) = (a.into(), b.into());
    if policy.promote_float {
        let value = hyp1f1::hyp1f1_imp(a.promote(), b.promote(), z.promote(), policy)?;
        narrow(hyp1f1::HYP1F1, value, policy)
    } else {
        hyp1f1::hyp1f1_imp(a, b, z, policy)
    }
}

// ── 1F2 ──

/// 1F2(a; b1, b2; z).
pub fn hypergeometric_1f2<T: HyperFloat>(
    a: impl Into<T>,
    b1: impl Into<T>,
    b2: impl Into<T>,
    z: T,
) -> Result<T, Error> {
    hypergeometric_1f2_with_policy(a, b1, b2, z, &Policy::default())
}

/// 1F2(a; b1, b2; z) under `policy`.
pub fn hypergeometric_1f2_with_policy<T: HyperFloat>(
    a: impl Into<T>,
    b1: impl Into<T>,
    b2: impl Into<T>,
    z: T,
    policy: &Policy,
) -> Result<T, Error> {
    let (a, b1, b2) = (a.into(), b1.into(), b2.into());
    if policy.promote_float {
        let value =
            hyp1f2::hyp1f2_imp(a.promote(), b1.promote(), b2.promote(), z.promote(), policy)?;
        narrow(hyp1f2::HYP1F2, value, policy)
    } else {
        hyp1f2::hyp1f2_imp(a, b1, b2, z, policy)
    }
}

// ── 2F0 ──

/// 2F0(a1, a2;; z).
///
/// Unless `a1` or `a2` is a non-positive integer the series diverges and
/// is only usable for small |z|; see [`Error::NonConvergence`].
pub fn hypergeometric_2f0<T: HyperFloat>(
    a1: impl Into<T>,
    a2: impl Into<T>,
    z: T,
) -> Result<T, Error> {
    hypergeometric_2f0_with_policy(a1, a2, z, &Policy::default())
}

/// 2F0(a1, a2;; z) under `policy`.
pub fn hypergeometric_2f0_with_policy<T: HyperFloat>(
    a1: impl Into<T>,
    a2: impl Into<T>,
    z: T,
    policy: &Policy,
) -> Result<T, Error> {
    let (a1, a2) = (a1.into(), a2.into());
    if policy.promote_float {
        let value = hyp2f0::hyp2f0_imp(a1.promote(), a2.promote(), z.promote(), policy)?;
        narrow(hyp2f0::HYP2F0, value, policy)
    } else {
        hyp2f0::hyp2f0_imp(a1, a2, z, policy)
    }
}

// ── 2F1 ──

/// Gauss's function 2F1(a1, a2; b; z) for z <= 1.
pub fn hypergeometric_2f1<T: HyperFloat>(
    a1: impl Into<T>,
    a2: impl Into<T>,
    b: impl Into<T>,
    z: T,
) -> Result<T, Error> {
    hypergeometric_2f1_with_policy(a1, a2, b, z, &Policy::default())
}

/// 2F1(a1, a2; b; z) under `policy`.
pub fn hypergeometric_2f1_with_policy<T: HyperFloat>(
    a1: impl Into<T>,
    a2: impl Into<T>,
    b: impl Into<T>,
    z: T,
    policy: &Policy,
) -> Result<T, Error> {
    let (a1, a2, b) = (a1.into(), a2.into(), b.into());
    if policy.promote_float {
        let value =
            hyp2f1::hyp2f1_imp(a1.promote(), a2.promote(), b.promote(), z.promote(), policy)?;
        narrow(hyp2f1::HYP2F1, value, policy)
    } else {
        hyp2f1::hyp2f1_imp(a1, a2, b, z, policy)
    }
}

// ── pFq ──

/// Generalized pFq(a; b; z).
pub fn hypergeometric_pfq<T: HyperFloat>(a: &[T], b: &[T], z: T) -> Result<T, Error> {
    hypergeometric_pfq_with_policy(a, b, z, &Policy::default())
}

/// pFq(a; b; z) under `policy`.
pub fn hypergeometric_pfq_with_policy<T: HyperFloat>(
    a: &[T],
    b: &[T],
    z: T,
    policy: &Policy,
) -> Result<T, Error> {
    if policy.promote_float {
        let a: Vec<T::Eval> = a.iter().map(|x| x.promote()).collect();
        let b: Vec<T::Eval> = b.iter().map(|x| x.promote()).collect();
        let value = hyppfq::hyppfq_imp(&a, &b, z.promote(), policy)?;
        narrow(hyppfq::HYPPFQ, value, policy)
    } else {
        hyppfq::hyppfq_imp(a, b, z, policy)
    }
}
