//! Three-term recurrence tools.
//!
//! Recurrences are written as `a_n w_{n+1} - b_n w_n + c_n w_{n-1} = 0`
//! for `n >= 1`. [`olver`] solves for the solution pinned by `w_0` that does
//! not grow with `n` (the minimal solution), which direct substitution cannot
//! reach because every rounding error feeds the dominant solution.
//!
//! Olver's method runs two sequences forward:
//!
//! - `p_0 = 0, p_1 = 1, a_n p_{n+1} = b_n p_n - c_n p_{n-1}`
//! - `e_0 = w_0, a_n e_n = c_n e_{n-1}`
//!
//! and recovers `w_n = (p_n w_{n+1} + e_n) / p_{n+1}` backward from a
//! truncation point `w_N = 0`. The truncation error at `n` is the tail of
//! `Σ_{k>=n} e_k / (p_k p_{k+1})`, which the forward pass watches.

use alloc::vec;
use alloc::vec::Vec;

use crate::machine::HyperFloat;
use crate::types::Error;

const OLVER: &str = "olver(coefficients, index)";

/// Coefficients `(a_n, b_n, c_n)` of `a_n w_{n+1} - b_n w_n + c_n w_{n-1} = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThreeTerm<T> {
    /// Coefficient of `w_{n+1}`.
    pub a: T,
    /// Coefficient of `-w_n`.
    pub b: T,
    /// Coefficient of `w_{n-1}`.
    pub c: T,
}

impl<T> ThreeTerm<T> {
    pub fn new(a: T, b: T, c: T) -> Self {
        ThreeTerm { a, b, c }
    }
}

/// Source of recurrence coefficients, indexed by position `n >= 1`.
///
/// Implementations are stateless; any `Fn(usize) -> ThreeTerm<T>` qualifies.
pub trait RecurrenceCoefficients<T> {
    fn coefficients(&self, n: usize) -> ThreeTerm<T>;
}

impl<T, F> RecurrenceCoefficients<T> for F
where
    F: Fn(usize) -> ThreeTerm<T>,
{
    #[inline]
    fn coefficients(&self, n: usize) -> ThreeTerm<T> {
        self(n)
    }
}

/// Result of a recurrence solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecurrenceSolution<T> {
    /// `w_index`.
    pub value: T,
    /// Forward steps taken, summed over all windows.
    pub terms: usize,
    /// Number of windows solved (1 unless the windowed solver restarted).
    pub windows: usize,
}

/// Minimal solution `w_index` of the recurrence with `w_0 = init_value`.
///
/// The forward pass stops once the neglected tail falls below `factor`
/// relative to the smallest contribution at or before `index`. Fails with
/// [`Error::NonConvergence`] after `max_terms` steps, and with
/// [`Error::Overflow`] if `p_n` or `e_n` leave the range of `T` first; see
/// [`olver_windowed`] for the latter.
pub fn olver<T, C>(
    coefs: &C,
    factor: T,
    index: usize,
    init_value: T,
    max_terms: usize,
) -> Result<RecurrenceSolution<T>, Error>
where
    T: HyperFloat,
    C: RecurrenceCoefficients<T> + ?Sized,
{
    if index == 0 {
        return Ok(RecurrenceSolution {
            value: init_value,
            terms: 0,
            windows: 1,
        });
    }
    let pass = forward_pass(coefs, 0, factor.abs(), index, init_value, max_terms, None)?;
    Ok(RecurrenceSolution {
        value: pass.solve_down_to(index),
        terms: pass.steps,
        windows: 1,
    })
}

/// [`olver`] that stays in range by solving in windows.
///
/// A window's forward pass is cut when `p_n` or `e_n` come within a factor
/// `1/ε` of overflow, or once it is `window` steps long. The cut window is
/// solved down to the furthest position `s` whose contribution still
/// dwarfs the neglected tail, and the next window starts at `s` with the
/// value just found as its `w_0`. Windows run one after another until
/// `index` is reached; `max_terms` bounds their steps in total.
pub fn olver_windowed<T, C>(
    coefs: &C,
    factor: T,
    index: usize,
    init_value: T,
    max_terms: usize,
    window: usize,
) -> Result<RecurrenceSolution<T>, Error>
where
    T: HyperFloat,
    C: RecurrenceCoefficients<T> + ?Sized,
{
    let factor = factor.abs();
    let mut base = 0;
    let mut seed = init_value;
    let mut used = 0;
    let mut windows = 0;
    loop {
        windows += 1;
        let target = index - base;
        if target == 0 {
            return Ok(RecurrenceSolution {
                value: seed,
                terms: used,
                windows,
            });
        }
        let pass = forward_pass(
            coefs,
            base,
            factor,
            target,
            seed,
            max_terms - used,
            Some(window.max(2)),
        )
        .map_err(|e| match e {
            Error::NonConvergence { function, terms } => Error::NonConvergence {
                function,
                terms: used + terms,
            },
            other => other,
        })?;
        used += pass.steps;

        match pass.restart {
            Some(s) if s < target => {
                seed = pass.solve_down_to(s);
                base += s;
            }
            _ => {
                return Ok(RecurrenceSolution {
                    value: pass.solve_down_to(target),
                    terms: used,
                    windows,
                });
            }
        }
    }
}

/// Direct substitution `w_{n+1} = (b_n w_n - c_n w_{n-1}) / a_n` from
/// `w_0 = first`, `w_1 = second`; returns `w_steps`.
///
/// Only stable in the direction in which the wanted solution dominates.
pub fn apply_recurrence<T, C>(coefs: &C, first: T, second: T, steps: usize) -> T
where
    T: HyperFloat,
    C: RecurrenceCoefficients<T> + ?Sized,
{
    if steps == 0 {
        return first;
    }
    let (mut prev, mut current) = (first, second);
    for n in 1..steps {
        let ThreeTerm { a, b, c } = coefs.coefficients(n);
        let next = b.fma(current, -c * prev) / a;
        prev = current;
        current = next;
    }
    current
}

/// State of one forward pass: `p_0..=p_end`, `e_0..end`.
struct Pass<T> {
    p: Vec<T>,
    e: Vec<T>,
    end: usize,
    restart: Option<usize>,
    steps: usize,
}

impl<T: HyperFloat> Pass<T> {
    /// Backward substitution from `w_end = 0` down to `w_stop`.
    fn solve_down_to(&self, stop: usize) -> T {
        let mut w = T::zero();
        for k in (stop + 1..=self.end).rev() {
            w = self.p[k - 1].fma(w, self.e[k - 1]) / self.p[k];
        }
        w
    }
}

fn forward_pass<T, C>(
    coefs: &C,
    base: usize,
    factor: T,
    target: usize,
    init_value: T,
    budget: usize,
    window: Option<usize>,
) -> Result<Pass<T>, Error>
where
    T: HyperFloat,
    C: RecurrenceCoefficients<T> + ?Sized,
{
    let headroom = T::log_max() + T::MACH_EPSILON.ln();
    let mut p = vec![T::zero(), T::one()];
    let mut e = vec![init_value];
    // checks[k] = |e_k / (p_k p_{k+1})|; position 0 is never used
    let mut checks = vec![T::infinity()];
    let mut min_check = T::infinity();

    let mut i = 1;
    loop {
        if i > budget {
            return Err(Error::NonConvergence {
                function: OLVER,
                terms: i - 1,
            });
        }
        let ThreeTerm { a, b, c } = coefs.coefficients(base + i);
        let p_next = b.fma(p[i], -c * p[i - 1]) / a;
        let e_next = c * e[i - 1] / a;
        if !(p_next.is_finite() && e_next.is_finite()) {
            return Err(Error::Overflow { function: OLVER });
        }
        p.push(p_next);
        e.push(e_next);

        let check = (e_next / p[i] / p_next).abs();
        checks.push(check);
        if i <= target {
            min_check = min_check.min(check);
        } else if check <= factor * min_check {
            return Ok(Pass {
                p,
                e,
                end: i + 1,
                restart: None,
                steps: i,
            });
        }

        if let Some(cap) = window {
            let near_overflow = p_next.abs().ln() > headroom || e_next.abs().ln() > headroom;
            if near_overflow || i >= cap {
                match restart_point(&checks, factor) {
                    Some(s) => {
                        return Ok(Pass {
                            p,
                            e,
                            end: i + 1,
                            restart: Some(s),
                            steps: i,
                        });
                    }
                    None if near_overflow => {
                        return Err(Error::NonConvergence {
                            function: OLVER,
                            terms: i,
                        });
                    }
                    None => {}
                }
            }
        }
        i += 1;
    }
}

/// Furthest position whose contribution dwarfs the latest one.
fn restart_point<T: HyperFloat>(checks: &[T], factor: T) -> Option<usize> {
    let (&last, earlier) = checks.split_last()?;
    (1..earlier.len())
        .rev()
        .find(|&k| last <= factor * earlier[k])
}

/// 1F1 backward in `a`: `w_n = M(a - n, b, z)`.
///
/// From `(b - a) M(a-1) + (2a - b + z) M(a) - a M(a+1) = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hyp1f1ACoefficients<T> {
    a: T,
    b: T,
    z: T,
}

impl<T: HyperFloat> Hyp1f1ACoefficients<T> {
    pub fn new(a: T, b: T, z: T) -> Self {
        Hyp1f1ACoefficients { a, b, z }
    }
}

impl<T: HyperFloat> RecurrenceCoefficients<T> for Hyp1f1ACoefficients<T> {
    fn coefficients(&self, n: usize) -> ThreeTerm<T> {
        let an = self.a - T::from_f64(n as f64);
        let two = T::from_f64(2.0);
        ThreeTerm::new(self.b - an, self.b - two * an - self.z, -an)
    }
}

/// 1F1 forward in `b`: `w_n = M(a, b + n, z)`, the minimal solution.
///
/// From `b(b-1) M(b-1) + b(1 - b - z) M(b) + z(b - a) M(b+1) = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hyp1f1BCoefficients<T> {
    a: T,
    b: T,
    z: T,
}

impl<T: HyperFloat> Hyp1f1BCoefficients<T> {
    pub fn new(a: T, b: T, z: T) -> Self {
        Hyp1f1BCoefficients { a, b, z }
    }
}

impl<T: HyperFloat> RecurrenceCoefficients<T> for Hyp1f1BCoefficients<T> {
    fn coefficients(&self, n: usize) -> ThreeTerm<T> {
        let bn = self.b + T::from_f64(n as f64);
        let one = T::one();
        ThreeTerm::new(
            self.z * (bn - self.a),
            bn * (bn + self.z - one),
            bn * (bn - one),
        )
    }
}

/// 1F1 forward in `a` and `b` together: `w_n = M(a + n, b + n, z)`.
///
/// From `z a M(a+1, b+1) + (b - 1 - z) b M(a, b) - (b - 1) b M(a-1, b-1) = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hyp1f1ABCoefficients<T> {
    a: T,
    b: T,
    z: T,
}

impl<T: HyperFloat> Hyp1f1ABCoefficients<T> {
    pub fn new(a: T, b: T, z: T) -> Self {
        Hyp1f1ABCoefficients { a, b, z }
    }
}

impl<T: HyperFloat> RecurrenceCoefficients<T> for Hyp1f1ABCoefficients<T> {
    fn coefficients(&self, n: usize) -> ThreeTerm<T> {
        let shift = T::from_f64(n as f64);
        let an = self.a + shift;
        let bn = self.b + shift;
        let one = T::one();
        ThreeTerm::new(
            self.z * an,
            bn * (one + self.z - bn),
            -bn * (bn - one),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::series::sum_series;
    use crate::algo::terms::TaylorTerms;
    use approx::assert_relative_eq;

    fn taylor_1f1(a: f64, b: f64, z: f64) -> f64 {
        sum_series(TaylorTerms::hyp1f1(a, b, z), f64::EPSILON, 10_000, 0.0).value
    }

    /// w_{n+1} = (x + 1/x) w_n - w_{n-1}: solutions x^n (dominant), x^-n (minimal).
    fn manufactured(x: f64) -> impl Fn(usize) -> ThreeTerm<f64> {
        move |_| ThreeTerm::new(1.0, x + 1.0 / x, 1.0)
    }

    #[test]
    fn olver_recovers_minimal_solution() {
        let x = 3.0;
        let coefs = manufactured(x);
        let exact = x.powi(-20);

        let forward = apply_recurrence(&coefs, 1.0, 1.0 / x, 20);
        assert!(((forward - exact) / exact).abs() > 1.0);

        let solved = olver(&coefs, f64::EPSILON, 20, 1.0, 1000).unwrap();
        assert_relative_eq!(solved.value, exact, max_relative = 1e-13);
        assert_eq!(solved.windows, 1);
        assert!(solved.terms > 20 && solved.terms < 60);
    }

    #[test]
    fn olver_index_zero_is_seed() {
        let s = olver(&manufactured(2.0), f64::EPSILON, 0, 0.75, 10).unwrap();
        assert_eq!(s.value, 0.75);
        assert_eq!(s.terms, 0);
    }

    #[test]
    fn olver_scales_with_seed() {
        let coefs = manufactured(2.5);
        let one = olver(&coefs, f64::EPSILON, 7, 1.0, 1000).unwrap().value;
        let three = olver(&coefs, f64::EPSILON, 7, 3.0, 1000).unwrap().value;
        assert_relative_eq!(three, 3.0 * one, max_relative = 1e-14);
    }

    #[test]
    fn olver_budget_exhausted() {
        let err = olver(&manufactured(3.0), f64::EPSILON, 20, 1.0, 10).unwrap_err();
        assert!(matches!(err, Error::NonConvergence { terms: 10, .. }));
    }

    #[test]
    fn olver_1f1_in_b() {
        let (a, b, z) = (1.5, 2.5, 2.0);
        let coefs = Hyp1f1BCoefficients::new(a, b, z);
        let seed = taylor_1f1(a, b, z);
        for index in [1, 5, 10, 40] {
            let s = olver(&coefs, f64::EPSILON, index, seed, 10_000).unwrap();
            let expected = taylor_1f1(a, b + index as f64, z);
            assert_relative_eq!(s.value, expected, max_relative = 1e-13);
        }
    }

    #[test]
    fn windowed_olver_survives_overflow() {
        let (a, b, z) = (1.5, 2.5, 2.0);
        let coefs = Hyp1f1BCoefficients::new(a, b, z);
        let seed = taylor_1f1(a, b, z);

        let err = olver(&coefs, f64::EPSILON, 300, seed, 10_000).unwrap_err();
        assert!(matches!(err, Error::Overflow { .. }));

        let s = olver_windowed(&coefs, f64::EPSILON, 300, seed, 10_000, 64).unwrap();
        assert!(s.windows > 1);
        let expected = taylor_1f1(a, b + 300.0, z);
        assert_relative_eq!(s.value, expected, max_relative = 1e-13);
    }

    #[test]
    fn windowed_olver_matches_plain_within_range() {
        let coefs = manufactured(3.0);
        let plain = olver(&coefs, f64::EPSILON, 20, 1.0, 1000).unwrap();
        let windowed = olver_windowed(&coefs, f64::EPSILON, 20, 1.0, 1000, 1000).unwrap();
        assert_eq!(windowed.windows, 1);
        assert_relative_eq!(plain.value, windowed.value, max_relative = 1e-15);
    }

    #[test]
    fn backward_in_a_gives_laguerre_polynomials() {
        // M(-n, b, z) from M(0) = 1 and M(-1) = 1 - z/b
        let (b, z) = (1.5, 3.0);
        let coefs = Hyp1f1ACoefficients::new(0.0, b, z);
        for n in [2_usize, 6, 11] {
            let w = apply_recurrence(&coefs, 1.0, 1.0 - z / b, n);
            let expected = taylor_1f1(-(n as f64), b, z);
            assert_relative_eq!(w, expected, max_relative = 1e-12, epsilon = 1e-13);
        }
    }

    #[test]
    fn a_and_b_coefficients_annihilate_1f1() {
        let (a, b, z) = (0.75, 1.25, 1.5);
        let coefs = Hyp1f1ABCoefficients::new(a, b, z);
        for n in 1..6 {
            let m = |k: usize| taylor_1f1(a + k as f64, b + k as f64, z);
            let ThreeTerm { a: an, b: bn, c: cn } = coefs.coefficients(n);
            let terms = [an * m(n + 1), -bn * m(n), cn * m(n - 1)];
            let scale = terms.iter().map(|t| t.abs()).fold(0.0, f64::max);
            assert!(terms.iter().sum::<f64>().abs() < 1e-13 * scale);
        }
    }
}
