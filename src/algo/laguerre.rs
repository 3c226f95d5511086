//! Associated Laguerre polynomials.

use crate::machine::HyperFloat;

/// L_n^(α)(x) by the upward three-term recurrence
/// `(k+1) L_{k+1} = (2k + 1 + α - x) L_k - (k + α) L_{k-1}`.
pub(crate) fn laguerre<T: HyperFloat>(n: usize, alpha: T, x: T) -> T {
    let one = T::one();
    let mut prev = one;
    if n == 0 {
        return prev;
    }
    let mut current = one + alpha - x;
    for k in 1..n {
        let k = T::from_f64(k as f64);
        let two_k = k + k;
        let next = ((two_k + one + alpha - x) * current - (k + alpha) * prev) / (k + one);
        prev = current;
        current = next;
    }
    current
}
