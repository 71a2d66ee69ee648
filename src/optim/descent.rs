use crate::matrix::vector::{norm, scale};
use crate::traits::FloatScalar;

use super::line_search::armijo;
use super::objective::Objective;
use super::{MinimizeResult, Termination};

/// Settings for [`gradient_descent`].
#[derive(Debug, Clone, Copy)]
pub struct GradientDescentSettings<T> {
    /// Convergence tolerance on the gradient norm.
    pub tol: T,
    /// Maximum number of iterations.
    pub max_iter: usize,
}

impl Default for GradientDescentSettings<f64> {
    fn default() -> Self {
        Self {
            tol: 1e-6,
            max_iter: 500,
        }
    }
}

impl Default for GradientDescentSettings<f32> {
    fn default() -> Self {
        Self {
            tol: 1e-3,
            max_iter: 500,
        }
    }
}

/// Minimize `f` by steepest descent with Armijo backtracking.
///
/// The search direction is `−∇f`, with the gradient taken by central
/// differences. Stops when `‖∇f‖ < settings.tol`; otherwise the iterate
/// after `settings.max_iter` steps is returned with
/// [`Termination::MaxIterations`].
///
/// # Example
///
/// ```
/// use formulary::optim::{gradient_descent, GradientDescentSettings, Termination};
///
/// let r = gradient_descent(
///     |x: &[f64]| (x[0] - 1.0).powi(2) + 4.0 * (x[1] + 2.0).powi(2),
///     &[0.0, 0.0],
///     &GradientDescentSettings::default(),
/// );
/// assert_eq!(r.termination, Termination::Converged);
/// assert!((r.x[0] - 1.0).abs() < 1e-5);
/// assert!((r.x[1] + 2.0).abs() < 1e-5);
/// ```
pub fn gradient_descent<T: FloatScalar>(
    f: impl FnMut(&[T]) -> T,
    x0: &[T],
    settings: &GradientDescentSettings<T>,
) -> MinimizeResult<T> {
    let mut obj = Objective::new(f);
    let mut x = x0.to_vec();

    for iter in 0..settings.max_iter {
        let g = obj.gradient(&x);
        let g_norm = norm(&g);
        log::trace!("gradient_descent: iter {} ‖∇f‖ = {:?}", iter, g_norm);
        if g_norm < settings.tol {
            return obj.finish(x, g_norm, iter, Termination::Converged);
        }

        let fx = obj.call(&x);
        let p = scale(&g, -T::one());
        let (_, x_new) = armijo(&mut |y: &[T]| obj.call(y), &x, fx, &p, -(g_norm * g_norm));
        x = x_new;
    }

    let g_norm = norm(&obj.gradient(&x));
    log::debug!(
        "gradient_descent: budget of {} iterations exhausted",
        settings.max_iter
    );
    obj.finish(x, g_norm, settings.max_iter, Termination::MaxIterations)
}
