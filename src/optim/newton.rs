use crate::linalg::solve;
use crate::matrix::vector::{dot, norm, scale};
use crate::traits::FloatScalar;

use super::line_search::armijo;
use super::objective::Objective;
use super::{MinimizeResult, Termination};

/// Settings for [`minimize_newton`].
#[derive(Debug, Clone, Copy)]
pub struct NewtonSettings<T> {
    /// Convergence tolerance on the gradient norm.
    pub tol: T,
    /// Maximum number of iterations.
    pub max_iter: usize,
}

impl Default for NewtonSettings<f64> {
    fn default() -> Self {
        Self {
            tol: 1e-8,
            max_iter: 100,
        }
    }
}

impl Default for NewtonSettings<f32> {
    fn default() -> Self {
        Self {
            tol: 1e-3,
            max_iter: 100,
        }
    }
}

/// Minimize `f` by Newton's method with Armijo backtracking.
///
/// Each step solves `H·p = −∇f` using the finite-difference Hessian. If that
/// system is singular the current iterate is returned with
/// [`Termination::SingularSystem`]. A non-descent `p` (indefinite `H`) is not
/// corrected; the line search then shrinks the step to the floor.
///
/// # Example
///
/// ```
/// use formulary::optim::{minimize_newton, NewtonSettings, Termination};
///
/// // Quadratic: one Newton step lands on the minimizer
/// let r = minimize_newton(
///     |x: &[f64]| 2.0 * x[0] * x[0] + x[0] * x[1] + x[1] * x[1] - x[0],
///     &[3.0, -1.0],
///     &NewtonSettings::default(),
/// );
/// assert_eq!(r.termination, Termination::Converged);
/// assert!((r.x[0] - 2.0 / 7.0).abs() < 1e-6);
/// assert!((r.x[1] + 1.0 / 7.0).abs() < 1e-6);
/// ```
pub fn minimize_newton<T: FloatScalar>(
    f: impl FnMut(&[T]) -> T,
    x0: &[T],
    settings: &NewtonSettings<T>,
) -> MinimizeResult<T> {
    let mut obj = Objective::new(f);
    let mut x = x0.to_vec();

    for iter in 0..settings.max_iter {
        let g = obj.gradient(&x);
        let g_norm = norm(&g);
        log::trace!("minimize_newton: iter {} ‖∇f‖ = {:?}", iter, g_norm);
        if g_norm < settings.tol {
            return obj.finish(x, g_norm, iter, Termination::Converged);
        }

        let hess = obj.hessian(&x);
        let p = match solve(&hess, &scale(&g, -T::one())) {
            Ok(p) => p,
            Err(_) => {
                log::debug!("minimize_newton: singular Hessian at iteration {}", iter);
                return obj.finish(x, g_norm, iter, Termination::SingularSystem);
            }
        };

        let fx = obj.call(&x);
        let slope = dot(&g, &p);
        let (_, x_new) = armijo(&mut |y: &[T]| obj.call(y), &x, fx, &p, slope);
        x = x_new;
    }

    let g_norm = norm(&obj.gradient(&x));
    log::debug!(
        "minimize_newton: budget of {} iterations exhausted",
        settings.max_iter
    );
    obj.finish(x, g_norm, settings.max_iter, Termination::MaxIterations)
}
