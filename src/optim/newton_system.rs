use alloc::vec::Vec;

use crate::calculus::jacobian_step;
use crate::linalg::solve;
use crate::matrix::vector::{axpy, norm_squared, scale};
use crate::matrix::Matrix;
use crate::traits::FloatScalar;

use super::line_search::{backtrack, ARMIJO_C1};
use super::OptimError;

/// Settings for [`newton_system`] and [`newton_system_with_jacobian`].
#[derive(Debug, Clone, Copy)]
pub struct NewtonSystemSettings<T> {
    /// Converged when `‖F(x)‖ < tol`.
    pub tol: T,
    /// Maximum number of Newton steps.
    pub max_iter: usize,
    /// Central-difference step for the numeric Jacobian.
    pub jacobian_step: T,
}

impl Default for NewtonSystemSettings<f64> {
    fn default() -> Self {
        Self {
            tol: 1e-8,
            max_iter: 50,
            jacobian_step: 1e-6,
        }
    }
}

impl Default for NewtonSystemSettings<f32> {
    fn default() -> Self {
        Self {
            tol: 1e-4,
            max_iter: 50,
            jacobian_step: 1e-3,
        }
    }
}

/// Solve the square nonlinear system `F(x) = 0` by damped Newton iteration
/// with a central-difference Jacobian.
///
/// See [`newton_system_with_jacobian`] for the iteration itself.
///
/// # Example
///
/// ```
/// use formulary::optim::{newton_system, NewtonSystemSettings};
///
/// // Intersection of the unit circle with the line y = x
/// let x = newton_system(
///     |v: &[f64]| vec![v[0] * v[0] + v[1] * v[1] - 1.0, v[0] - v[1]],
///     &[1.0, 0.5],
///     &NewtonSystemSettings::default(),
/// ).unwrap();
/// let r = core::f64::consts::FRAC_1_SQRT_2;
/// assert!((x[0] - r).abs() < 1e-8 && (x[1] - r).abs() < 1e-8);
/// ```
pub fn newton_system<T: FloatScalar>(
    f: impl Fn(&[T]) -> Vec<T>,
    x0: &[T],
    settings: &NewtonSystemSettings<T>,
) -> Result<Vec<T>, OptimError> {
    let h = settings.jacobian_step;
    newton_system_with_jacobian(&f, |x: &[T]| jacobian_step(&f, x, h), x0, settings)
}

/// Solve the square nonlinear system `F(x) = 0` by damped Newton iteration.
///
/// Each step solves `J(x)·Δx = −F(x)` by Gaussian elimination, then
/// backtracks on `φ(α) = ‖F(x + αΔx)‖²` from `α = 1`, halving until
/// `φ(α) ≤ (1 − 10⁻⁴·α)·φ(0)`. If `α` drops below `10⁻¹²` the tiny step is
/// taken anyway.
///
/// # Arguments
///
/// * `f` — residual `F: Rⁿ → Rⁿ`
/// * `jac` — Jacobian of `F`, an `n × n` matrix
/// * `x0` — initial guess
/// * `settings` — tolerance and iteration limit (`jacobian_step` is unused)
///
/// # Errors
///
/// Returns [`OptimError::Singular`] if a Newton system cannot be solved.
/// Returns [`OptimError::MaxIterations`] if `‖F(x)‖ < tol` is never reached.
///
/// # Panics
///
/// Panics if `F(x)` does not have the same length as `x`.
pub fn newton_system_with_jacobian<T: FloatScalar>(
    mut f: impl FnMut(&[T]) -> Vec<T>,
    mut jac: impl FnMut(&[T]) -> Matrix<T>,
    x0: &[T],
    settings: &NewtonSystemSettings<T>,
) -> Result<Vec<T>, OptimError> {
    let c1 = T::lit(ARMIJO_C1);
    let mut x = x0.to_vec();

    for iter in 0..settings.max_iter {
        let fx = f(&x);
        assert_eq!(fx.len(), x.len(), "newton_system requires a square system");
        let phi0 = norm_squared(&fx);
        let res = phi0.sqrt();
        log::trace!("newton_system: iter {} ‖F‖ = {:?}", iter, res);
        if res < settings.tol {
            return Ok(x);
        }

        let step = solve(&jac(&x), &scale(&fx, -T::one())).map_err(|e| {
            log::debug!("newton_system: singular Jacobian at iteration {}", iter);
            OptimError::from(e)
        })?;

        let alpha = backtrack(|alpha| {
            let phi = norm_squared(&f(&axpy(&x, alpha, &step)));
            phi <= (T::one() - c1 * alpha) * phi0
        });
        x = axpy(&x, alpha, &step);
    }

    log::debug!("newton_system: no convergence in {} iterations", settings.max_iter);
    Err(OptimError::MaxIterations)
}
