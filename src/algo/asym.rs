//! Large-|z| asymptotic expansion of 1F1.
//!
//! For z > 0:
//!
//! ```text
//! M(a, b, z) ~ Γ(b) [ e^z z^(a-b) / Γ(a) · S_a + cos(πa) z^(-a) / Γ(b-a) · S_b ]
//! ```
//!
//! with `S_a = Σ (b-a)_n (1-a)_n / (n! z^n)` and
//! `S_b = Σ (a)_n (1+a-b)_n / (n! (-z)^n)`. Negative z goes through
//! Kummer's transformation, which swaps the roles of the two sums. Both
//! sums diverge; they are cut at their smallest term.

use crate::algo::gamma::ln_gamma;
use crate::algo::series::{sum_series, Summation, UntilDivergent};
use crate::machine::HyperFloat;
use crate::policy::Policy;
use crate::types::Error;
use crate::utils::{cospi, is_nonpositive_integer};

const ASYM_POSITIVE: &str = "hypergeometric_1f1_asym_positive(a, b, z)";
const ASYM_NEGATIVE: &str = "hypergeometric_1f1_asym_negative(a, b, z)";

/// Terms of `Σ (p)_n (q)_n / (n! (s x)^n)`, s = ±1.
#[derive(Debug, Clone)]
pub(crate) struct AsymptoticTerms<T> {
    p: T,
    q: T,
    x: T,
    term: T,
    n: T,
}

impl<T: HyperFloat> AsymptoticTerms<T> {
    /// `x` carries the sign of the expansion variable.
    pub(crate) fn new(p: T, q: T, x: T) -> Self {
        AsymptoticTerms {
            p,
            q,
            x,
            term: T::one(),
            n: T::zero(),
        }
    }
}

impl<T: HyperFloat> Iterator for AsymptoticTerms<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let current = self.term;
        let n = self.n;
        let n1 = n + T::one();
        self.term = current * (self.p + n) * (self.q + n) / (n1 * self.x);
        self.n = n1;
        Some(current)
    }
}

/// True when the asymptotic expansion reaches working precision at `z`.
///
/// Requires `|z|` past the precision-dependent boundary, no gamma pole among
/// `a`, `b`, `b - a`, and both sums shrinking monotonically below ε (or
/// terminating) within the iteration cap.
pub(crate) fn in_asymptotic_region<T: HyperFloat>(a: T, b: T, z: T, policy: &Policy) -> bool {
    let x = z.abs();
    let boundary = T::from_f64(policy.asymptotic_z_factor) * T::rl(policy.digits::<T>());
    if !(x >= boundary) {
        return false;
    }
    if is_nonpositive_integer(a) || is_nonpositive_integer(b) || is_nonpositive_integer(b - a) {
        return false;
    }
    let one = T::one();
    let eps = policy.epsilon::<T>();
    let max = policy.max_series_iterations;
    shrinks_below(b - a, one - a, x, eps, max) && shrinks_below(a, one + a - b, x, eps, max)
}

fn shrinks_below<T: HyperFloat>(p: T, q: T, x: T, eps: T, max: usize) -> bool {
    let one = T::one();
    let mut term = one;
    let mut n = T::zero();
    for _ in 0..max {
        let ratio = ((p + n) * (q + n) / ((n + one) * x)).abs();
        if ratio == T::zero() {
            return true;
        }
        if ratio >= one {
            return false;
        }
        term = term * ratio;
        if term < eps {
            return true;
        }
        n = n + one;
    }
    false
}

/// Sum one asymptotic series, stopping before its terms start to grow.
fn sum_asymptotic<T: HyperFloat>(terms: AsymptoticTerms<T>, policy: &Policy) -> Summation<T> {
    let mut guarded = UntilDivergent::new(terms);
    let s = sum_series(
        &mut guarded,
        policy.epsilon::<T>(),
        policy.max_series_iterations,
        T::zero(),
    );
    Summation {
        converged: s.converged && !guarded.diverged(),
        ..s
    }
}

/// `sign_a e^{log_a} s_a + sign_b e^{log_b} s_b` without forming either
/// exponential on its own.
fn combine<T: HyperFloat>(
    function: &'static str,
    (log_a, sign_a, s_a): (T, T, T),
    (log_b, sign_b, s_b): (T, T, T),
    policy: &Policy,
) -> Result<T, Error> {
    let zero = T::zero();
    let part = |log: T, sign: T, s: T| {
        if sign == zero || s == zero || log == T::neg_infinity() {
            None
        } else {
            Some((log + s.abs().ln(), sign * s.signum()))
        }
    };
    match (part(log_a, sign_a, s_a), part(log_b, sign_b, s_b)) {
        (None, None) => Ok(zero),
        (Some((l, s)), None) | (None, Some((l, s))) => policy.check_log_magnitude(function, l, s),
        (Some((la, sa)), Some((lb, sb))) => {
            let top = la.max(lb);
            let mixed = sa * (la - top).exp() + sb * (lb - top).exp();
            if mixed == zero {
                return Ok(zero);
            }
            policy.check_log_magnitude(function, top + mixed.abs().ln(), mixed.signum())
        }
    }
}

/// Asymptotic 1F1 for large positive `z`.
pub(crate) fn hyp1f1_asymptotic_positive<T: HyperFloat>(
    a: T,
    b: T,
    z: T,
    policy: &Policy,
) -> Result<T, Error> {
    let one = T::one();
    let s_a = sum_asymptotic(AsymptoticTerms::new(b - a, one - a, z), policy);
    let s_b = sum_asymptotic(AsymptoticTerms::new(a, one + a - b, -z), policy);
    let s_a = policy.check_series(ASYM_POSITIVE, s_a)?;
    let s_b = policy.check_series(ASYM_POSITIVE, s_b)?;

    let (lg_b, sg_b) = ln_gamma(b);
    let (lg_a, sg_a) = ln_gamma(a);
    let (lg_ba, sg_ba) = ln_gamma(b - a);
    let ln_z = z.ln();

    let first = (lg_b - lg_a + z + (a - b) * ln_z, sg_b * sg_a, s_a);
    let second = (lg_b - lg_ba - a * ln_z, sg_b * sg_ba * cospi(a), s_b);
    combine(ASYM_POSITIVE, first, second, policy)
}

/// Asymptotic 1F1 for large negative `z`.
pub(crate) fn hyp1f1_asymptotic_negative<T: HyperFloat>(
    a: T,
    b: T,
    z: T,
    policy: &Policy,
) -> Result<T, Error> {
    let one = T::one();
    let x = -z;
    let s_a = sum_asymptotic(AsymptoticTerms::new(a, one + a - b, x), policy);
    let s_b = sum_asymptotic(AsymptoticTerms::new(b - a, one - a, -x), policy);
    let s_a = policy.check_series(ASYM_NEGATIVE, s_a)?;
    let s_b = policy.check_series(ASYM_NEGATIVE, s_b)?;

    let (lg_b, sg_b) = ln_gamma(b);
    let (lg_a, sg_a) = ln_gamma(a);
    let (lg_ba, sg_ba) = ln_gamma(b - a);
    let ln_x = x.ln();

    let first = (lg_b - lg_ba - a * ln_x, sg_b * sg_ba, s_a);
    let second = (lg_b - lg_a - x + (a - b) * ln_x, sg_b * sg_a * cospi(b - a), s_b);
    combine(ASYM_NEGATIVE, first, second, policy)
}
