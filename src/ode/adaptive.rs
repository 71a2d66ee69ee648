use alloc::vec::Vec;

use crate::matrix::vector::{norm_inf, sub};
use crate::traits::FloatScalar;

use super::rk4::{rk4_step, rk4_system_step};
use super::{AdaptiveSolution, Trajectory};

/// Derivative evaluations per attempt: three RK4 steps of four stages each.
const EVALS_PER_ATTEMPT: usize = 12;
/// Integration ends once `tf` is closer than this fraction of `|tf − t0|`.
const END_FRACTION: f64 = 1e-12;
/// Floor on the error estimate when forming `tol / err`.
const ERR_FLOOR: f64 = 1e-16;

/// Step-size control for [`rk4_adaptive`] and [`rk4_adaptive_system`].
///
/// After each attempt the step is rescaled by
/// `factor = clamp(safety · (tol_abs / err)^(1/5), min_factor, max_factor)`;
/// a rejected step uses `max(reject_floor, factor)` instead.
#[derive(Debug, Clone, Copy)]
pub struct StepDoublingSettings<T> {
    /// Absolute tolerance on `|y_{h/2} − y_h|` per step.
    pub tol_abs: T,
    /// Safety factor applied to the optimal step ratio.
    pub safety: T,
    /// Smallest allowed step rescaling.
    pub min_factor: T,
    /// Largest allowed step rescaling.
    pub max_factor: T,
    /// Smallest rescaling after a rejected step.
    pub reject_floor: T,
    /// Integration stops (incomplete) once `|h|` drops below this.
    pub min_step: T,
}

impl Default for StepDoublingSettings<f64> {
    fn default() -> Self {
        Self {
            tol_abs: 1e-6,
            safety: 0.9,
            min_factor: 0.2,
            max_factor: 5.0,
            reject_floor: 0.1,
            min_step: 1e-12,
        }
    }
}

impl Default for StepDoublingSettings<f32> {
    fn default() -> Self {
        Self {
            tol_abs: 1e-4,
            safety: 0.9,
            min_factor: 0.2,
            max_factor: 5.0,
            reject_floor: 0.1,
            min_step: 1e-6,
        }
    }
}

/// Shared step-doubling loop. `step(t, y, h)` is one RK4 step; `dist` measures
/// the difference between two states.
fn integrate<T: FloatScalar, Y: Clone>(
    t0: T,
    tf: T,
    h0: T,
    y0: Y,
    settings: &StepDoublingSettings<T>,
    mut step: impl FnMut(T, &Y, T) -> Y,
    dist: impl Fn(&Y, &Y) -> T,
) -> AdaptiveSolution<T, Y> {
    assert!(
        h0 != T::zero() && h0.is_finite(),
        "initial step must be finite and non-zero"
    );
    let dir = h0.signum();
    let half = T::lit(0.5);
    let exponent = T::lit(1.0 / 5.0);
    let end_tol = (tf - t0).abs() * T::lit(END_FRACTION);
    let err_floor = T::lit(ERR_FLOOR);

    let mut traj = Trajectory::start(t0, y0.clone());
    let mut t = t0;
    let mut y = y0;
    let mut h = h0;
    let mut accepted = 0usize;
    let mut rejected = 0usize;
    let mut attempts = 0usize;

    while (tf - t) * dir > end_tol {
        let clamped = (t + h - tf) * dir > T::zero();
        if clamped {
            h = tf - t;
        }

        let y_full = step(t, &y, h);
        let y_mid = step(t, &y, half * h);
        let y_half = step(t + half * h, &y_mid, half * h);
        attempts += 1;

        let err = dist(&y_half, &y_full);
        let factor = if err.is_finite() {
            let ideal = settings.safety * (settings.tol_abs / err.max(err_floor)).powf(exponent);
            ideal.max(settings.min_factor).min(settings.max_factor)
        } else {
            settings.min_factor
        };

        if err < settings.tol_abs {
            t = if clamped { tf } else { t + h };
            y = y_half;
            traj.push(t, y.clone());
            accepted += 1;
            h = h * factor;
        } else {
            rejected += 1;
            h = h * factor.max(settings.reject_floor);
        }
        log::trace!(
            "rk4_adaptive: t = {:?} err = {:?} next h = {:?}",
            t,
            err,
            h
        );

        if h.abs() < settings.min_step {
            break;
        }
    }

    let completed = (tf - t) * dir <= end_tol;
    if !completed {
        log::debug!(
            "rk4_adaptive: step size collapsed at t = {:?} after {} rejections",
            t,
            rejected
        );
    }
    AdaptiveSolution {
        trajectory: traj,
        accepted,
        rejected,
        evals: attempts * EVALS_PER_ATTEMPT,
        completed,
    }
}

/// Integrate the scalar ODE `y' = f(t, y)` with adaptive RK4 (step doubling).
///
/// Each attempt takes one RK4 step of size `h` and two of size `h/2` and
/// estimates the error as their difference. An attempt is accepted when the
/// error is below `settings.tol_abs`; the state then advances with the more
/// accurate half-step result. The sign of `h0` sets the direction of
/// integration and the last step is clamped to land on `tf`.
///
/// If `|h|` falls below `settings.min_step` the samples gathered so far are
/// returned with [`AdaptiveSolution::completed`] set to `false`.
///
/// # Panics
///
/// Panics if `h0` is zero or not finite.
///
/// # Example
///
/// ```
/// use formulary::ode::{rk4_adaptive, StepDoublingSettings};
///
/// let sol = rk4_adaptive(|_t, y: f64| y, 0.0, 1.0, 0.1, 1.0, &StepDoublingSettings::default());
/// assert!(sol.completed);
/// let (t, y) = sol.trajectory.last().unwrap();
/// assert!((t - 1.0).abs() < 1e-12);
/// assert!((y - core::f64::consts::E).abs() < 1e-6);
/// ```
pub fn rk4_adaptive<T: FloatScalar>(
    mut f: impl FnMut(T, T) -> T,
    t0: T,
    tf: T,
    h0: T,
    y0: T,
    settings: &StepDoublingSettings<T>,
) -> AdaptiveSolution<T, T> {
    integrate(
        t0,
        tf,
        h0,
        y0,
        settings,
        |t, &y, h| rk4_step(&mut f, t, y, h),
        |a, b| (*a - *b).abs(),
    )
}

/// Integrate the system `y' = f(t, y)` with adaptive RK4 (step doubling).
///
/// Same control as [`rk4_adaptive`], with the error measured in the max norm.
///
/// # Panics
///
/// Panics if `h0` is zero or not finite, or if `f` returns a vector whose
/// length differs from `y0`.
pub fn rk4_adaptive_system<T: FloatScalar>(
    mut f: impl FnMut(T, &[T]) -> Vec<T>,
    t0: T,
    tf: T,
    h0: T,
    y0: &[T],
    settings: &StepDoublingSettings<T>,
) -> AdaptiveSolution<T, Vec<T>> {
    integrate(
        t0,
        tf,
        h0,
        y0.to_vec(),
        settings,
        |t, y: &Vec<T>, h| rk4_system_step(&mut f, t, y, h),
        |a: &Vec<T>, b: &Vec<T>| norm_inf(&sub(a, b)),
    )
}
