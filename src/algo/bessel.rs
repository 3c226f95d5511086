//! Real Bessel functions J and I for a run of orders ν0, ν0+1, ..., x > 0.
//!
//! Small arguments use the power series
//! `(x/2)^ν / Γ(ν+1) · 0F1(; ν+1; ∓x²/4)` order by order. Everything else
//! goes through Miller's algorithm: downward recurrence from a start order
//! chosen by a forward trial recurrence, normalized with a Neumann-type sum
//! over the orders μ + k, μ = frac(ν0).

use alloc::vec;
use alloc::vec::Vec;

use crate::algo::gamma::ln_gamma;
use crate::algo::series::sum_series;
use crate::algo::terms::TaylorTerms;
use crate::machine::HyperFloat;
use crate::policy::Policy;
use crate::types::Error;

const BESSEL_J: &str = "bessel_j_sequence(nu, x)";
const BESSEL_I: &str = "bessel_i_sequence(nu, x)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    J,
    /// Exponentially scaled: `e^{-x} I`.
    I,
}

impl Kind {
    fn site(self) -> &'static str {
        match self {
            Kind::J => BESSEL_J,
            Kind::I => BESSEL_I,
        }
    }
}

/// `J_{ν0+k}(x)` for `k = 0..len`.
pub(crate) fn bessel_j_sequence<T: HyperFloat>(
    nu0: T,
    x: T,
    len: usize,
    policy: &Policy,
) -> Result<Vec<T>, Error> {
    sequence(Kind::J, nu0, x, len, policy)
}

/// `e^{-x} I_{ν0+k}(x)` for `k = 0..len`.
pub(crate) fn bessel_i_sequence<T: HyperFloat>(
    nu0: T,
    x: T,
    len: usize,
    policy: &Policy,
) -> Result<Vec<T>, Error> {
    sequence(Kind::I, nu0, x, len, policy)
}

fn sequence<T: HyperFloat>(
    kind: Kind,
    nu0: T,
    x: T,
    len: usize,
    policy: &Policy,
) -> Result<Vec<T>, Error> {
    if !(x > T::zero() && x.is_finite() && nu0.is_finite()) {
        return Err(Error::Domain {
            function: kind.site(),
            value: x.as_f64(),
        });
    }
    if len == 0 {
        return Ok(Vec::new());
    }
    let one = T::one();
    let two = T::from_f64(2.0);
    if nu0 > -one && x <= two * (nu0 + one).sqrt() {
        power_series(kind, nu0, x, len, policy)
    } else {
        miller(kind, nu0, x, len, policy)
    }
}

fn power_series<T: HyperFloat>(
    kind: Kind,
    nu0: T,
    x: T,
    len: usize,
    policy: &Policy,
) -> Result<Vec<T>, Error> {
    let one = T::one();
    let half_x = x / T::from_f64(2.0);
    let quarter_x2 = half_x * half_x;
    let (z, shift) = match kind {
        Kind::J => (-quarter_x2, T::zero()),
        Kind::I => (quarter_x2, -x),
    };
    let eps = policy.epsilon::<T>();

    let mut out = Vec::with_capacity(len);
    let mut nu = nu0;
    for _ in 0..len {
        let s = sum_series(
            TaylorTerms::hyp0f1(nu + one, z),
            eps,
            policy.max_series_iterations,
            T::zero(),
        );
        if !s.converged {
            return Err(Error::NonConvergence {
                function: kind.site(),
                terms: s.terms,
            });
        }
        let (lg, sign) = ln_gamma(nu + one);
        let prefix = sign * (nu * half_x.ln() - lg + shift).exp();
        out.push(prefix * s.value);
        nu = nu + one;
    }
    Ok(out)
}

fn miller<T: HyperFloat>(
    kind: Kind,
    nu0: T,
    x: T,
    len: usize,
    policy: &Policy,
) -> Result<Vec<T>, Error> {
    let zero = T::zero();
    let one = T::one();
    let two = T::from_f64(2.0);

    let floor = nu0.floor();
    let mu = nu0 - floor;
    let n_lo = floor.to_i64().ok_or(Error::Domain {
        function: kind.site(),
        value: nu0.as_f64(),
    })?;
    let n_hi = n_lo + len as i64 - 1;

    // Integer orders below zero come from J_{-n} = (-1)^n J_n, I_{-n} = I_n;
    // the downward recurrence is unstable there.
    let reflect = mu == zero && n_lo < 0;
    let (keep_lo, keep_hi) = if reflect {
        (0, n_hi.max(-n_lo))
    } else {
        (n_lo, n_hi)
    };
    let bottom = keep_lo.min(0);

    let start = start_order(kind, mu, x, keep_hi, policy)?;
    let span = start.saturating_sub(bottom);
    if span > step_cap(policy) {
        return Err(Error::NonConvergence {
            function: kind.site(),
            terms: policy.max_series_iterations,
        });
    }

    let rescale_at = T::MACH_HUGE.sqrt();
    let mut kept = vec![zero; (keep_hi - keep_lo + 1) as usize];
    let mut sum = zero;
    let mut weights = NeumannWeights::new(kind, mu, start);

    // f_{m+2}, f_{m+1}; the recurrence starts from f_{N+1} = 0, f_N = 1
    let mut upper = zero;
    let mut current = one;
    let mut m = start;
    loop {
        if (keep_lo..=keep_hi).contains(&m) {
            kept[(m - keep_lo) as usize] = current;
        }
        if m >= 0 {
            sum = sum + weights.weight(m) * current;
        }
        if m == bottom {
            break;
        }

        let coef = two * (mu + T::from_f64(m as f64)) / x;
        let next = match kind {
            Kind::J => coef * current - upper,
            Kind::I => coef * current + upper,
        };
        upper = current;
        current = next;
        m -= 1;

        if current.abs() > rescale_at {
            let scale = current.abs();
            upper = upper / scale;
            current = current / scale;
            sum = sum / scale;
            for v in kept.iter_mut() {
                *v = *v / scale;
            }
        }
    }

    // Neumann sum: (x/2)^μ for J, e^x (x/2)^μ / Γ(1+μ) for I (the e^x
    // cancels against the scaling)
    let log_norm = match kind {
        Kind::J => mu * (x / two).ln(),
        Kind::I => mu * (x / two).ln() - ln_gamma(one + mu).0,
    };
    let norm = log_norm.exp();

    let mut out = Vec::with_capacity(len);
    for k in 0..len as i64 {
        let order = n_lo + k;
        let value = if order < 0 && reflect {
            let mirrored = kept[(-order - keep_lo) as usize];
            match kind {
                Kind::J if order % 2 != 0 => -mirrored,
                _ => mirrored,
            }
        } else {
            kept[(order - keep_lo) as usize]
        };
        out.push(value / sum * norm);
    }
    Ok(out)
}

/// Start order of the downward recurrence: the forward trial solution
/// started at the highest wanted order has grown past `1/ε`.
fn start_order<T: HyperFloat>(
    kind: Kind,
    mu: T,
    x: T,
    highest: i64,
    policy: &Policy,
) -> Result<i64, Error> {
    let exhausted = Error::NonConvergence {
        function: kind.site(),
        terms: policy.max_series_iterations,
    };
    let two = T::from_f64(2.0);
    let limit = T::one() / policy.epsilon::<T>();
    // the downward pass walks at least x orders
    let first = match x.ceil().to_i64() {
        Some(m) if m <= step_cap(policy) => m.max(highest).max(1),
        _ => return Err(exhausted),
    };

    let mut prev = T::zero();
    let mut current = T::one();
    let mut m = first;
    for _ in 0..policy.max_series_iterations {
        let coef = two * (mu + T::from_f64(m as f64)) / x;
        let next = match kind {
            Kind::J => coef * current - prev,
            Kind::I => coef * current + prev,
        };
        prev = current;
        current = next;
        m = m.checked_add(1).ok_or(exhausted)?;
        if current.abs() > limit {
            return Ok(m);
        }
    }
    Err(exhausted)
}

/// `max_series_iterations` as a bound on recurrence orders.
fn step_cap(policy: &Policy) -> i64 {
    i64::try_from(policy.max_series_iterations).unwrap_or(i64::MAX)
}

/// Weights of the normalization sum, walked downward from the start order.
///
/// J: `(μ + 2k) Γ(μ + k) / k!` on order `μ + 2k` (odd offsets weigh 0),
/// with `Γ(μ + 1)` at `k = 0`.
/// I: `2(μ + k) Γ(2μ + k) / (k! Γ(2μ + 1))` on order `μ + k`, 1 at `k = 0`.
struct NeumannWeights<T> {
    kind: Kind,
    mu: T,
    /// Γ(μ + k) / k! for J, Γ(2μ + k) / (k! Γ(2μ + 1)) for I.
    ratio: T,
    /// `k` that `ratio` belongs to.
    k: i64,
}

impl<T: HyperFloat> NeumannWeights<T> {
    fn new(kind: Kind, mu: T, start: i64) -> Self {
        let k = match kind {
            Kind::J => start / 2,
            Kind::I => start,
        }
        .max(1);
        let kt = T::from_f64(k as f64);
        let one = T::one();
        let two = T::from_f64(2.0);
        let log_ratio = match kind {
            Kind::J => ln_gamma(mu + kt).0 - ln_gamma(kt + one).0,
            Kind::I => {
                ln_gamma(two * mu + kt).0 - ln_gamma(kt + one).0 - ln_gamma(two * mu + one).0
            }
        };
        NeumannWeights {
            kind,
            mu,
            ratio: log_ratio.exp(),
            k,
        }
    }

    /// Weight of offset `m`; offsets must be visited in decreasing order.
    fn weight(&mut self, m: i64) -> T {
        let one = T::one();
        let two = T::from_f64(2.0);
        let k = match self.kind {
            Kind::J if m % 2 != 0 => return T::zero(),
            Kind::J => m / 2,
            Kind::I => m,
        };
        if k == 0 {
            return match self.kind {
                Kind::J => ln_gamma(self.mu + one).0.exp(),
                Kind::I => one,
            };
        }
        // walk ratio down to k
        while self.k > k {
            let kt = T::from_f64(self.k as f64);
            let shift = match self.kind {
                Kind::J => self.mu,
                Kind::I => two * self.mu,
            };
            self.ratio = self.ratio * kt / (shift + kt - one);
            self.k -= 1;
        }
        let kt = T::from_f64(k as f64);
        match self.kind {
            Kind::J => (self.mu + two * kt) * self.ratio,
            Kind::I => two * (self.mu + kt) * self.ratio,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use core::f64::consts::PI;

    fn j(nu: f64, x: f64, len: usize) -> Vec<f64> {
        bessel_j_sequence(nu, x, len, &Policy::default()).unwrap()
    }

    fn i_scaled(nu: f64, x: f64, len: usize) -> Vec<f64> {
        bessel_i_sequence(nu, x, len, &Policy::default()).unwrap()
    }

    fn i(nu: f64, x: f64, len: usize) -> Vec<f64> {
        i_scaled(nu, x, len).iter().map(|v| v * x.exp()).collect()
    }

    #[test]
    fn j_integer_orders_small_argument() {
        let v = j(0.0, 1.0, 2);
        assert_relative_eq!(v[0], 0.7651976865579666, max_relative = 1e-14);
        assert_relative_eq!(v[1], 0.4400505857449335, max_relative = 1e-14);
    }

    #[test]
    fn j_miller_branch() {
        let v = j(0.0, 10.0, 3);
        assert_relative_eq!(v[0], -0.24593576445134834, max_relative = 1e-13);
        assert_relative_eq!(v[2], 0.25463031368512062, max_relative = 1e-13);

        let v = j(0.25, 50.0, 2);
        assert_relative_eq!(v[0], 0.014106062680889886, max_relative = 1e-11);
        assert_relative_eq!(v[1], -0.1117432171933552, max_relative = 1e-12);
    }

    #[test]
    fn j_half_orders() {
        let x = 10.0;
        let c = (2.0 / (PI * x)).sqrt();
        let v = j(-0.5, x, 3);
        assert_relative_eq!(v[0], c * x.cos(), max_relative = 1e-13);
        assert_relative_eq!(v[1], c * x.sin(), max_relative = 1e-13);
        assert_relative_eq!(v[2], c * (x.sin() / x - x.cos()), max_relative = 1e-13);
    }

    #[test]
    fn j_negative_orders() {
        let v = j(-2.5, 3.0, 1);
        assert_relative_eq!(v[0], 0.3690407300737979, max_relative = 1e-13);

        // J_{-2} = J_2
        let v = j(-2.0, 10.0, 5);
        assert_relative_eq!(v[0], 0.25463031368512062, max_relative = 1e-13);
        assert_relative_eq!(v[0], v[4], max_relative = 1e-14);
        assert_relative_eq!(v[1], -v[3], max_relative = 1e-14);
    }

    #[test]
    fn j_high_order_small_argument() {
        let v = j(30.3, 5.0, 1);
        assert_relative_eq!(v[0], 1.2618200407942868e-21, max_relative = 1e-13);
    }

    #[test]
    fn i_values() {
        let v = i(0.0, 1.0, 2);
        assert_relative_eq!(v[0], 1.2660658777520082, max_relative = 1e-14);
        assert_relative_eq!(v[1], 0.5651591039924850, max_relative = 1e-14);

        let v = i(0.0, 10.0, 2);
        assert_relative_eq!(v[0], 2815.7166284662545, max_relative = 1e-13);
        assert_relative_eq!(v[1], 2670.9883037012547, max_relative = 1e-13);

        let v = i_scaled(0.0, 10.0, 1);
        assert_relative_eq!(v[0], 0.12783333716342861, max_relative = 1e-13);

        let v = i_scaled(0.25, 200.0, 1);
        assert_relative_eq!(v[0], 0.028222738715791606, max_relative = 1e-12);
    }

    #[test]
    fn i_half_and_negative_orders() {
        let x = 3.0;
        let c = (2.0 / (PI * x)).sqrt();
        let v = i(-0.5, x, 2);
        assert_relative_eq!(v[0], c * x.cosh(), max_relative = 1e-13);
        assert_relative_eq!(v[1], c * x.sinh(), max_relative = 1e-13);

        let v = i(-2.5, x, 1);
        assert_relative_eq!(v[0], 1.5688541070744028, max_relative = 1e-12);

        let v = i(30.3, 5.0, 1);
        assert_relative_eq!(v[0], 1.8812304339048759e-21, max_relative = 1e-13);
    }

    #[test]
    fn downward_pass_respects_iteration_cap() {
        let p = Policy::default().with_max_series_iterations(1000);
        assert!(matches!(
            bessel_j_sequence(0.5, 5000.0, 1, &p),
            Err(Error::NonConvergence { .. })
        ));
        // far beyond i64 orders
        assert!(matches!(
            bessel_j_sequence(0.5, 2e19, 1, &Policy::default()),
            Err(Error::NonConvergence { .. })
        ));
        assert!(bessel_j_sequence(0.5, 500.0, 1, &p).is_ok());
    }

    #[test]
    fn rejects_non_positive_argument() {
        let p = Policy::default();
        assert!(bessel_j_sequence(0.0, 0.0, 1, &p).is_err());
        assert!(bessel_i_sequence(0.0, -1.0, 1, &p).is_err());
        assert!(bessel_j_sequence(0.0, 1.0, 0, &p).unwrap().is_empty());
    }
}
