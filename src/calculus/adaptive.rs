use core::marker::PhantomData;

use crate::traits::FloatScalar;

/// Settings for [`adaptive_simpson`].
#[derive(Debug, Clone, Copy)]
pub struct AdaptiveSimpsonSettings<T> {
    /// Absolute error budget for the whole interval.
    pub tol: T,
    /// Maximum recursion depth; panels at this depth are accepted as-is.
    pub max_depth: usize,
}

impl Default for AdaptiveSimpsonSettings<f64> {
    fn default() -> Self {
        Self {
            tol: 1e-8,
            max_depth: 20,
        }
    }
}

impl Default for AdaptiveSimpsonSettings<f32> {
    fn default() -> Self {
        Self {
            tol: 1e-5,
            max_depth: 12,
        }
    }
}

/// Result of an adaptive quadrature.
#[derive(Debug, Clone, Copy)]
pub struct Quadrature<T> {
    /// Integral estimate.
    pub value: T,
    /// Number of integrand evaluations.
    pub evals: usize,
    /// `true` if at least one panel was accepted only because the depth cap
    /// was reached, in which case the error budget may be exceeded.
    pub depth_limited: bool,
}

/// Integrand samples for one Simpson panel `[a, b]` with midpoint `m`.
#[derive(Clone, Copy)]
struct Panel<T> {
    a: T,
    b: T,
    fa: T,
    fm: T,
    fb: T,
    whole: T,
}

impl<T: FloatScalar> Panel<T> {
    fn new(a: T, b: T, fa: T, fm: T, fb: T) -> Self {
        let whole = (b - a) / T::lit(6.0) * (fa + T::lit(4.0) * fm + fb);
        Self { a, b, fa, fm, fb, whole }
    }

    fn mid(&self) -> T {
        T::lit(0.5) * (self.a + self.b)
    }
}

struct Integrator<T, F> {
    f: F,
    max_depth: usize,
    evals: usize,
    depth_limited: bool,
    _scalar: PhantomData<T>,
}

impl<T: FloatScalar, F: FnMut(T) -> T> Integrator<T, F> {
    fn eval(&mut self, x: T) -> T {
        self.evals += 1;
        (self.f)(x)
    }

    fn recurse(&mut self, p: Panel<T>, tol: T, depth: usize) -> T {
        let m = p.mid();
        let lm = T::lit(0.5) * (p.a + m);
        let rm = T::lit(0.5) * (m + p.b);
        let flm = self.eval(lm);
        let frm = self.eval(rm);
        let left = Panel::new(p.a, m, p.fa, flm, p.fm);
        let right = Panel::new(m, p.b, p.fm, frm, p.fb);

        let diff = left.whole + right.whole - p.whole;
        let at_cap = depth >= self.max_depth;
        if diff.abs() <= T::lit(15.0) * tol || at_cap {
            if at_cap && diff.abs() > T::lit(15.0) * tol {
                self.depth_limited = true;
            }
            // Richardson extrapolation of the two Simpson estimates
            return left.whole + right.whole + diff / T::lit(15.0);
        }

        let half = T::lit(0.5) * tol;
        self.recurse(left, half, depth + 1) + self.recurse(right, half, depth + 1)
    }
}

/// Adaptive Simpson quadrature of `f` over `[a, b]`.
///
/// Each panel is split in two; the split is accepted when
/// `|S_left + S_right − S_whole| ≤ 15·tol`, otherwise both halves recurse
/// with half the tolerance. Panels at `settings.max_depth` are accepted
/// unconditionally and flagged through [`Quadrature::depth_limited`].
///
/// # Example
///
/// ```
/// use formulary::calculus::{adaptive_simpson, AdaptiveSimpsonSettings};
///
/// let q = adaptive_simpson(f64::exp, 0.0, 1.0, &AdaptiveSimpsonSettings::default());
/// assert!((q.value - (core::f64::consts::E - 1.0)).abs() < 1e-8);
/// assert!(!q.depth_limited);
/// ```
pub fn adaptive_simpson<T: FloatScalar>(
    f: impl FnMut(T) -> T,
    a: T,
    b: T,
    settings: &AdaptiveSimpsonSettings<T>,
) -> Quadrature<T> {
    let mut integ = Integrator {
        f,
        max_depth: settings.max_depth,
        evals: 0,
        depth_limited: false,
        _scalar: PhantomData,
    };
    let fa = integ.eval(a);
    let fb = integ.eval(b);
    let fm = integ.eval(T::lit(0.5) * (a + b));
    let value = integ.recurse(Panel::new(a, b, fa, fm, fb), settings.tol, 0);
    if integ.depth_limited {
        log::debug!(
            "adaptive simpson: depth cap {} reached, error budget may be exceeded",
            settings.max_depth
        );
    }
    Quadrature {
        value,
        evals: integ.evals,
        depth_limited: integ.depth_limited,
    }
}
