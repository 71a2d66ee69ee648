use alloc::vec::Vec;

use crate::matrix::vector::axpy;
use crate::traits::FloatScalar;

use super::{march, Trajectory};

/// Integrate the scalar ODE `y' = f(t, y)` with the explicit Euler method.
///
/// `y_{k+1} = y_k + h·f(t_k, y_k)`. First-order accurate: halving `h` roughly
/// halves the global error.
///
/// # Panics
///
/// Panics if `h` is zero or not finite.
///
/// ```
/// use formulary::ode::euler;
///
/// // y' = 2t, y(0) = 0: Euler underestimates t² by h·t
/// let sol = euler(|t: f64, _y| 2.0 * t, 0.0, 1.0, 0.25, 0.0);
/// assert_eq!(sol.len(), 5);
/// assert!((sol.y[4] - 0.75).abs() < 1e-12);
/// ```
pub fn euler<T: FloatScalar>(
    mut f: impl FnMut(T, T) -> T,
    t0: T,
    tf: T,
    h: T,
    y0: T,
) -> Trajectory<T, T> {
    march(t0, tf, h, y0, |t, &y, h| y + h * f(t, y))
}

/// Integrate the system `y' = f(t, y)`, `y ∈ Rⁿ`, with the explicit Euler method.
///
/// # Panics
///
/// Panics if `h` is zero or not finite, or if `f` returns a vector whose
/// length differs from `y0`.
pub fn euler_system<T: FloatScalar>(
    mut f: impl FnMut(T, &[T]) -> Vec<T>,
    t0: T,
    tf: T,
    h: T,
    y0: &[T],
) -> Trajectory<T, Vec<T>> {
    march(t0, tf, h, y0.to_vec(), |t, y: &Vec<T>, h| axpy(y, h, &f(t, y)))
}
