use alloc::vec;
use alloc::vec::Vec;

use crate::matrix::vector::{dot, norm};
use crate::matrix::Matrix;
use crate::traits::FloatScalar;

use super::LinalgError;

/// `A·x` for a square `A` whose order matches `x`.
fn apply<T: FloatScalar>(a: &Matrix<T>, x: &[T]) -> Vec<T> {
    (0..a.nrows()).map(|i| dot(&a.row(i), x)).collect()
}

/// Settings for [`dominant_eigen`].
#[derive(Debug, Clone, Copy)]
pub struct PowerSettings<T> {
    /// Maximum number of power steps.
    pub max_iter: usize,
    /// Convergence tolerance on consecutive eigenvalue estimates; also the
    /// norm below which an image vector counts as collapsed.
    pub tol: T,
}

impl Default for PowerSettings<f64> {
    fn default() -> Self {
        Self {
            max_iter: 100,
            tol: 1e-10,
        }
    }
}

impl Default for PowerSettings<f32> {
    fn default() -> Self {
        Self {
            max_iter: 100,
            tol: 1e-5,
        }
    }
}

/// Outcome of a power iteration.
#[derive(Debug, Clone)]
pub struct PowerIteration<T> {
    /// Eigenvalue estimate (Rayleigh quotient).
    pub value: T,
    /// Unit-norm eigenvector estimate.
    pub vector: Vec<T>,
    /// Number of power steps performed.
    pub iterations: usize,
    /// `true` if consecutive estimates agreed within `tol`; `false` if the
    /// iteration budget ran out and the result is the last estimate.
    pub converged: bool,
}

/// Estimate the dominant eigenpair of a square matrix by power iteration.
///
/// Starting from the all-ones vector, repeatedly forms `y = A x`, normalizes
/// it, and estimates the eigenvalue with the Rayleigh quotient
/// `xᵀ A x / xᵀ x`. Stops when two consecutive estimates differ by less than
/// `settings.tol`, so at least two steps are always taken.
///
/// Running out of iterations is not an error: the latest estimate is returned
/// with [`PowerIteration::converged`] set to `false`.
///
/// # Errors
///
/// Returns [`LinalgError::Degenerate`] if `‖A x‖ < tol` at some step, i.e. the
/// iterate fell into the (near) null space of `A`.
///
/// # Panics
///
/// Panics if `a` is not square.
///
/// # Example
///
/// ```
/// use formulary::Matrix;
/// use formulary::linalg::{dominant_eigen, PowerSettings};
///
/// let a = Matrix::from_rows(&[[2.0_f64, 1.0], [1.0, 2.0]]);
/// let eig = dominant_eigen(&a, &PowerSettings::default()).unwrap();
/// assert!((eig.value - 3.0).abs() < 1e-8);
/// assert!(eig.converged);
/// ```
pub fn dominant_eigen<T: FloatScalar>(
    a: &Matrix<T>,
    settings: &PowerSettings<T>,
) -> Result<PowerIteration<T>, LinalgError> {
    assert!(
        a.is_square(),
        "power iteration requires a square matrix, got {}x{}",
        a.nrows(),
        a.ncols()
    );
    let n = a.nrows();
    let mut x = vec![T::one(); n];
    let mut lambda_prev = T::zero();

    for iter in 0..settings.max_iter {
        let y = apply(a, &x);
        let y_norm = norm(&y);
        if y_norm < settings.tol || y_norm.is_nan() {
            log::debug!("power iteration: image norm {:?} collapsed at step {}", y_norm, iter);
            return Err(LinalgError::Degenerate);
        }

        let x_new: Vec<T> = y.iter().map(|&v| v / y_norm).collect();
        let ax = apply(a, &x_new);
        let lambda = dot(&x_new, &ax) / dot(&x_new, &x_new);
        log::trace!("power iteration {}: lambda = {:?}", iter, lambda);

        // A single estimate has nothing to agree with
        if iter > 0 && (lambda - lambda_prev).abs() < settings.tol {
            return Ok(PowerIteration {
                value: lambda,
                vector: x_new,
                iterations: iter + 1,
                converged: true,
            });
        }
        x = x_new;
        lambda_prev = lambda;
    }

    log::debug!(
        "power iteration: budget of {} steps exhausted, returning last estimate",
        settings.max_iter
    );
    Ok(PowerIteration {
        value: lambda_prev,
        vector: x,
        iterations: settings.max_iter,
        converged: false,
    })
}
