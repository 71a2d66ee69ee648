use alloc::vec::Vec;

use crate::calculus::trapezoid;
use crate::traits::FloatScalar;

/// Fewest panels used to project a coefficient.
const MIN_PANELS: usize = 200;
/// Panels per retained term.
const PANELS_PER_TERM: usize = 20;

fn check<T: FloatScalar>(length: T, terms: usize) {
    assert!(terms >= 1, "series needs at least one term");
    assert!(length > T::zero(), "series needs a positive length");
}

/// `k_n = nπ/L` for `n = 1..=terms`.
fn wavenumbers<T: FloatScalar>(length: T, terms: usize) -> impl Iterator<Item = T> {
    let base = T::lit(core::f64::consts::PI) / length;
    (1..=terms).map(move |n| T::from_usize(n) * base)
}

/// Sine coefficients `a_n = (2/L) ∫₀ᴸ f(x)·sin(k_n x) dx`, `n = 1..=terms`.
fn sine_coefficients<T: FloatScalar>(
    mut f: impl FnMut(T) -> T,
    length: T,
    terms: usize,
) -> Vec<T> {
    let panels = MIN_PANELS.max(PANELS_PER_TERM * terms);
    let scale = T::lit(2.0) / length;
    wavenumbers(length, terms)
        .map(|k| scale * trapezoid(|x| f(x) * (k * x).sin(), T::zero(), length, panels))
        .collect()
}

// ── Heat ────────────────────────────────────────────────────────────

/// Truncated series for `u_t = κ·u_xx`, `u(0,t) = u(L,t) = 0`, `u(x,0) = f0(x)`:
///
/// `u(x, t) = Σ a_n · exp(−κ k_n² t) · sin(k_n x)`, `k_n = nπ/L`.
#[derive(Debug, Clone)]
pub struct HeatSeries<T> {
    length: T,
    kappa: T,
    coeffs: Vec<T>,
}

impl<T: FloatScalar> HeatSeries<T> {
    /// Project `f0` onto the first `terms` sine modes.
    ///
    /// # Panics
    ///
    /// Panics if `terms == 0` or `length <= 0`.
    pub fn new(length: T, kappa: T, terms: usize, f0: impl FnMut(T) -> T) -> Self {
        check(length, terms);
        Self {
            length,
            kappa,
            coeffs: sine_coefficients(f0, length, terms),
        }
    }

    /// Sine coefficients `a_1 ..= a_N`.
    pub fn coefficients(&self) -> &[T] {
        &self.coeffs
    }

    /// Temperature at position `x` and time `t`.
    pub fn eval(&self, x: T, t: T) -> T {
        wavenumbers(self.length, self.coeffs.len())
            .zip(&self.coeffs)
            .fold(T::zero(), |u, (k, &a)| {
                u + a * (-self.kappa * k * k * t).exp() * (k * x).sin()
            })
    }

    /// Consume into an evaluator `(x, t) ↦ u`.
    pub fn into_fn(self) -> impl Fn(T, T) -> T {
        move |x, t| self.eval(x, t)
    }
}

// ── Wave ────────────────────────────────────────────────────────────

/// Truncated series for a string fixed at both ends, released from rest:
/// `u_tt = c²·u_xx`, `u(x,0) = u0(x)`, `u_t(x,0) = 0`.
///
/// `u(x, t) = Σ a_n · cos(c k_n t) · sin(k_n x)`.
#[derive(Debug, Clone)]
pub struct WaveSeries<T> {
    length: T,
    speed: T,
    coeffs: Vec<T>,
}

impl<T: FloatScalar> WaveSeries<T> {
    /// Project `u0` onto the first `terms` sine modes.
    ///
    /// # Panics
    ///
    /// Panics if `terms == 0` or `length <= 0`.
    pub fn new(length: T, speed: T, terms: usize, u0: impl FnMut(T) -> T) -> Self {
        check(length, terms);
        Self {
            length,
            speed,
            coeffs: sine_coefficients(u0, length, terms),
        }
    }

    /// Sine coefficients of the initial displacement, `a_1 ..= a_N`.
    pub fn coefficients(&self) -> &[T] {
        &self.coeffs
    }

    /// Displacement at position `x` and time `t`.
    pub fn eval(&self, x: T, t: T) -> T {
        wavenumbers(self.length, self.coeffs.len())
            .zip(&self.coeffs)
            .fold(T::zero(), |u, (k, &a)| {
                u + a * (self.speed * k * t).cos() * (k * x).sin()
            })
    }

    /// Consume into an evaluator `(x, t) ↦ u`.
    pub fn into_fn(self) -> impl Fn(T, T) -> T {
        move |x, t| self.eval(x, t)
    }
}

// ── Laplace ─────────────────────────────────────────────────────────

/// Truncated series for `u_xx + u_yy = 0` on `[0, L] × [0, H]`, zero on three
/// sides and `u(x, H) = top(x)`:
///
/// `u(x, y) = Σ a_n · sinh(k_n y)/sinh(k_n H) · sin(k_n x)`.
///
/// The sinh ratio is evaluated as
/// `e^{k(y−H)}·(1 − e^{−2ky})/(1 − e^{−2kH})`, which stays finite for high
/// modes.
#[derive(Debug, Clone)]
pub struct LaplaceSeries<T> {
    length: T,
    height: T,
    coeffs: Vec<T>,
}

impl<T: FloatScalar> LaplaceSeries<T> {
    /// Project `top` onto the first `terms` sine modes.
    ///
    /// # Panics
    ///
    /// Panics if `terms == 0`, `length <= 0` or `height <= 0`.
    pub fn new(length: T, height: T, terms: usize, top: impl FnMut(T) -> T) -> Self {
        check(length, terms);
        assert!(height > T::zero(), "series needs a positive height");
        Self {
            length,
            height,
            coeffs: sine_coefficients(top, length, terms),
        }
    }

    /// Sine coefficients of the top boundary, `a_1 ..= a_N`.
    pub fn coefficients(&self) -> &[T] {
        &self.coeffs
    }

    /// Potential at `(x, y)`.
    pub fn eval(&self, x: T, y: T) -> T {
        let m2 = T::lit(-2.0);
        wavenumbers(self.length, self.coeffs.len())
            .zip(&self.coeffs)
            .fold(T::zero(), |u, (k, &a)| {
                let ratio = (k * (y - self.height)).exp() * (m2 * k * y).exp_m1()
                    / (m2 * k * self.height).exp_m1();
                u + a * ratio * (k * x).sin()
            })
    }

    /// Consume into an evaluator `(x, y) ↦ u`.
    pub fn into_fn(self) -> impl Fn(T, T) -> T {
        move |x, y| self.eval(x, y)
    }
}
