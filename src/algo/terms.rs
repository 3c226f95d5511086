//! Term generators for the Taylor series of pFq.
//!
//! Each generator yields the current term, starting from the zeroth
//! coefficient 1, and then advances it by the ratio
//! `Π(a_i + n) / (Π(b_j + n) · (n + 1)) · z`. The ratio is applied one factor
//! at a time so the intermediate term never overflows before the final
//! magnitude does.

use crate::machine::HyperFloat;

/// Parameter shape of a fixed-order series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Family<T> {
    F01 { b: T },
    F10 { a: T },
    F11 { a: T, b: T },
    F12 { a: T, b1: T, b2: T },
    F20 { a1: T, a2: T },
    F21 { a1: T, a2: T, b: T },
}

/// Taylor terms of one of the fixed families 0F1 … 2F1.
#[derive(Debug, Clone)]
pub(crate) struct TaylorTerms<T> {
    family: Family<T>,
    z: T,
    term: T,
    n: T,
}

impl<T: HyperFloat> TaylorTerms<T> {
    pub(crate) fn new(family: Family<T>, z: T) -> Self {
        TaylorTerms {
            family,
            z,
            term: T::one(),
            n: T::zero(),
        }
    }

    pub(crate) fn hyp0f1(b: T, z: T) -> Self {
        Self::new(Family::F01 { b }, z)
    }

    pub(crate) fn hyp1f0(a: T, z: T) -> Self {
        Self::new(Family::F10 { a }, z)
    }

    pub(crate) fn hyp1f1(a: T, b: T, z: T) -> Self {
        Self::new(Family::F11 { a, b }, z)
    }

    pub(crate) fn hyp1f2(a: T, b1: T, b2: T, z: T) -> Self {
        Self::new(Family::F12 { a, b1, b2 }, z)
    }

    pub(crate) fn hyp2f0(a1: T, a2: T, z: T) -> Self {
        Self::new(Family::F20 { a1, a2 }, z)
    }

    pub(crate) fn hyp2f1(a1: T, a2: T, b: T, z: T) -> Self {
        Self::new(Family::F21 { a1, a2, b }, z)
    }
}

impl<T: HyperFloat> Iterator for TaylorTerms<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let current = self.term;
        let n = self.n;
        let n1 = n + T::one();
        let mut t = current;
        match self.family {
            Family::F01 { b } => {
                t = t / (b + n);
            }
            Family::F10 { a } => {
                t = t * (a + n);
            }
            Family::F11 { a, b } => {
                t = t * (a + n);
                t = t / (b + n);
            }
            Family::F12 { a, b1, b2 } => {
                t = t * (a + n);
                t = t / (b1 + n);
                t = t / (b2 + n);
            }
            Family::F20 { a1, a2 } => {
                t = t * (a1 + n);
                t = t * (a2 + n);
            }
            Family::F21 { a1, a2, b } => {
                t = t * (a1 + n);
                t = t * (a2 + n);
                t = t / (b + n);
            }
        }
        self.term = t * self.z / n1;
        self.n = n1;
        Some(current)
    }
}

/// Taylor terms of a general pFq with borrowed parameter lists.
#[derive(Debug, Clone)]
pub(crate) struct PfqTerms<'p, T> {
    a: &'p [T],
    b: &'p [T],
    z: T,
    term: T,
    n: T,
}

impl<'p, T: HyperFloat> PfqTerms<'p, T> {
    pub(crate) fn new(a: &'p [T], b: &'p [T], z: T) -> Self {
        PfqTerms {
            a,
            b,
            z,
            term: T::one(),
            n: T::zero(),
        }
    }
}

impl<T: HyperFloat> Iterator for PfqTerms<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let current = self.term;
        let n = self.n;
        let mut t = current;
        // alternate numerator and denominator factors to keep t in range
        let mut numer = self.a.iter();
        let mut denom = self.b.iter();
        loop {
            match (numer.next(), denom.next()) {
                (None, None) => break,
                (ai, bj) => {
                    if let Some(&ai) = ai {
                        t = t * (ai + n);
                    }
                    if let Some(&bj) = bj {
                        t = t / (bj + n);
                    }
                }
            }
        }
        let n1 = n + T::one();
        self.term = t * self.z / n1;
        self.n = n1;
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn first_terms<I: Iterator<Item = f64>>(it: I, k: usize) -> alloc::vec::Vec<f64> {
        it.take(k).collect()
    }

    #[test]
    fn exp_series_from_1f1() {
        // 1F1(a; a; z) = e^z: terms z^n / n!
        let t = first_terms(TaylorTerms::hyp1f1(2.5, 2.5, 2.0), 5);
        assert_eq!(t[0], 1.0);
        assert_relative_eq!(t[1], 2.0);
        assert_relative_eq!(t[2], 2.0);
        assert_relative_eq!(t[3], 4.0 / 3.0);
        assert_relative_eq!(t[4], 2.0 / 3.0);
    }

    #[test]
    fn binomial_series_from_1f0() {
        // (1 - z)^(-a): terms (a)_n z^n / n!
        let t = first_terms(TaylorTerms::hyp1f0(3.0, 0.5), 3);
        assert_relative_eq!(t[1], 1.5);
        assert_relative_eq!(t[2], 3.0 * 4.0 / 2.0 * 0.25);
    }

    #[test]
    fn terminating_parameter_gives_zero_terms() {
        let t = first_terms(TaylorTerms::hyp2f1(-2.0, 1.5, 3.0, 0.5), 5);
        assert!(t[2] != 0.0);
        assert_eq!(t[3], 0.0);
        assert_eq!(t[4], 0.0);
    }

    #[test]
    fn families_agree_with_pfq() {
        let a = [0.5, 1.25];
        let b = [1.5];
        let z = -0.3;
        let fixed = first_terms(TaylorTerms::hyp2f1(a[0], a[1], b[0], z), 12);
        let general = first_terms(PfqTerms::new(&a, &b, z), 12);
        for (x, y) in fixed.iter().zip(&general) {
            assert_relative_eq!(*x, *y, max_relative = 1e-14);
        }

        let b = [1.5, 2.5];
        let fixed = first_terms(TaylorTerms::hyp1f2(a[0], b[0], b[1], z), 12);
        let general = first_terms(PfqTerms::new(&a[..1], &b, z), 12);
        for (x, y) in fixed.iter().zip(&general) {
            assert_relative_eq!(*x, *y, max_relative = 1e-14);
        }
    }

    #[test]
    fn hyp0f1_and_2f0_ratios() {
        let t = first_terms(TaylorTerms::hyp0f1(0.5, 1.0), 3);
        // 1, 1/(0.5), 1/(0.5 * 1.5 * 2)
        assert_relative_eq!(t[1], 2.0);
        assert_relative_eq!(t[2], 1.0 / 1.5);

        let t = first_terms(TaylorTerms::hyp2f0(1.0, 1.0, 0.1), 4);
        // n! z^n
        assert_relative_eq!(t[3], 6.0 * 1e-3, max_relative = 1e-14);
    }
}
