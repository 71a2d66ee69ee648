//! ODE integration: fixed-step Euler and RK4, adaptive RK4 by step doubling,
//! and closed-form solutions of simple linear equations.
//!
//! # Fixed-step
//!
//! [`euler`] / [`euler_system`] and [`rk4`] / [`rk4_system`] march from `t0`
//! toward `tf` with a constant step `h`. The sign of `h` sets the direction;
//! the last step is shortened to land exactly on `tf`. Every sample,
//! including the initial one, is recorded in a [`Trajectory`].
//!
//! # Adaptive
//!
//! [`rk4_adaptive`] / [`rk4_adaptive_system`] compare one RK4 step of size `h`
//! with two steps of size `h/2` and adjust `h` to keep the difference below
//! an absolute tolerance. See [`StepDoublingSettings`].
//!
//! # Closed form
//!
//! [`linear_first_order`] (integrating factor) and [`second_order_constant`]
//! (characteristic roots) return evaluators `x ↦ y(x)`.
//!
//! # Example
//!
//! ```
//! use formulary::ode::rk4_system;
//!
//! // Harmonic oscillator: y'' = −y  →  [y, y']
//! let tau = core::f64::consts::TAU;
//! let sol = rk4_system(|_t, y: &[f64]| vec![y[1], -y[0]], 0.0, tau, 1e-3, &[1.0, 0.0]);
//! let yf = sol.last().unwrap().1;
//! assert!((yf[0] - 1.0).abs() < 1e-8);
//! assert!(yf[1].abs() < 1e-8);
//! ```

mod adaptive;
mod analytic;
mod euler;
mod rk4;


pub use adaptive::{rk4_adaptive, rk4_adaptive_system, StepDoublingSettings};
pub use analytic::{
    linear_first_order, second_order_constant, CharacteristicRoots, SecondOrderSolution,
};
pub use euler::{euler, euler_system};
pub use rk4::{rk4, rk4_step, rk4_system, rk4_system_step};

use alloc::vec::Vec;

use crate::traits::FloatScalar;

/// Samples `(t[k], y[k])` produced by an integrator, initial state first.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory<T, Y> {
    /// Independent variable at each sample.
    pub t: Vec<T>,
    /// State at each sample.
    pub y: Vec<Y>,
}

impl<T: Copy, Y> Trajectory<T, Y> {
    fn start(t0: T, y0: Y) -> Self {
        let mut t = Vec::new();
        let mut y = Vec::new();
        t.push(t0);
        y.push(y0);
        Self { t, y }
    }

    fn push(&mut self, t: T, y: Y) {
        self.t.push(t);
        self.y.push(y);
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.t.len()
    }

    /// `true` if there are no samples.
    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    /// Final sample `(t, &y)`.
    pub fn last(&self) -> Option<(T, &Y)> {
        Some((*self.t.last()?, self.y.last()?))
    }

    /// Iterate over `(t, &y)` pairs in integration order.
    pub fn iter(&self) -> impl Iterator<Item = (T, &Y)> + '_ {
        self.t.iter().copied().zip(self.y.iter())
    }
}

/// Result of an adaptive integration.
#[derive(Debug, Clone)]
pub struct AdaptiveSolution<T, Y> {
    /// Accepted samples, initial state first.
    pub trajectory: Trajectory<T, Y>,
    /// Number of accepted steps.
    pub accepted: usize,
    /// Number of rejected step attempts.
    pub rejected: usize,
    /// Total derivative evaluations.
    pub evals: usize,
    /// `false` if the step size collapsed below the floor before reaching `tf`.
    pub completed: bool,
}

// ── Fixed-step driver ───────────────────────────────────────────────

/// Stop once `tf` is closer than this fraction of `|h|`.
const END_FRACTION: f64 = 1e-6;

/// March from `t0` to `tf` with `step(t, y, h) -> y(t + h)`.
///
/// The final step is clamped to `tf − t`; if `tf` lies behind the direction of
/// `h` only the initial sample is produced. A remainder shorter than a
/// millionth of `|h|` (accumulated rounding) is dropped rather than stepped.
pub(crate) fn march<T: FloatScalar, Y: Clone>(
    t0: T,
    tf: T,
    h: T,
    y0: Y,
    mut step: impl FnMut(T, &Y, T) -> Y,
) -> Trajectory<T, Y> {
    assert!(h != T::zero() && h.is_finite(), "step size must be finite and non-zero");
    let dir = h.signum();
    let end_tol = h.abs() * T::lit(END_FRACTION);
    let mut traj = Trajectory::start(t0, y0.clone());
    let mut t = t0;
    let mut y = y0;

    while (tf - t) * dir > end_tol {
        let clamped = (t + h - tf) * dir > T::zero();
        let dt = if clamped { tf - t } else { h };
        y = step(t, &y, dt);
        t = if clamped { tf } else { t + dt };
        traj.push(t, y.clone());
    }
    traj
}
