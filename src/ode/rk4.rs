use alloc::vec::Vec;

use crate::matrix::vector::axpy;
use crate::traits::FloatScalar;

use super::{march, Trajectory};

/// Single step of the classic 4th-order Runge-Kutta method.
///
/// Advances `y` from `t` to `t + h` using `f(t, y) -> dy/dt`.
///
/// ```
/// use formulary::ode::rk4_step;
///
/// // dy/dt = −y (exponential decay)
/// let y1 = rk4_step(|_t, y: f64| -y, 0.0, 1.0, 0.01);
/// assert!((y1 - (-0.01_f64).exp()).abs() < 1e-10);
/// ```
pub fn rk4_step<T: FloatScalar>(mut f: impl FnMut(T, T) -> T, t: T, y: T, h: T) -> T {
    let half = T::lit(0.5);
    let two = T::lit(2.0);
    let sixth = T::lit(1.0 / 6.0);

    let k1 = f(t, y);
    let k2 = f(t + half * h, y + half * h * k1);
    let k3 = f(t + half * h, y + half * h * k2);
    let k4 = f(t + h, y + h * k3);

    y + h * sixth * (k1 + two * k2 + two * k3 + k4)
}

/// Single RK4 step for the system `y' = f(t, y)`, `y ∈ Rⁿ`.
///
/// # Panics
///
/// Panics if `f` returns a vector whose length differs from `y`.
pub fn rk4_system_step<T: FloatScalar>(
    mut f: impl FnMut(T, &[T]) -> Vec<T>,
    t: T,
    y: &[T],
    h: T,
) -> Vec<T> {
    let half = T::lit(0.5);
    let two = T::lit(2.0);
    let sixth = T::lit(1.0 / 6.0);

    let k1 = f(t, y);
    let k2 = f(t + half * h, &axpy(y, half * h, &k1));
    let k3 = f(t + half * h, &axpy(y, half * h, &k2));
    let k4 = f(t + h, &axpy(y, h, &k3));

    let mut out = y.to_vec();
    for (i, yi) in out.iter_mut().enumerate() {
        *yi = *yi + h * sixth * (k1[i] + two * k2[i] + two * k3[i] + k4[i]);
    }
    out
}

/// Integrate the scalar ODE `y' = f(t, y)` with fixed-step RK4.
///
/// # Panics
///
/// Panics if `h` is zero or not finite.
///
/// ```
/// use formulary::ode::rk4;
///
/// let sol = rk4(|_t, y: f64| y, 0.0, 1.0, 0.1, 1.0);
/// let (t, y) = sol.last().unwrap();
/// assert!((t - 1.0).abs() < 1e-12);
/// assert!((y - core::f64::consts::E).abs() < 1e-5);
/// ```
pub fn rk4<T: FloatScalar>(
    mut f: impl FnMut(T, T) -> T,
    t0: T,
    tf: T,
    h: T,
    y0: T,
) -> Trajectory<T, T> {
    march(t0, tf, h, y0, |t, &y, h| rk4_step(&mut f, t, y, h))
}

/// Integrate the system `y' = f(t, y)` with fixed-step RK4.
///
/// # Panics
///
/// Panics if `h` is zero or not finite, or if `f` returns a vector whose
/// length differs from `y0`.
pub fn rk4_system<T: FloatScalar>(
    mut f: impl FnMut(T, &[T]) -> Vec<T>,
    t0: T,
    tf: T,
    h: T,
    y0: &[T],
) -> Trajectory<T, Vec<T>> {
    march(t0, tf, h, y0.to_vec(), |t, y: &Vec<T>, h| {
        rk4_system_step(&mut f, t, y, h)
    })
}
