use alloc::vec::Vec;

use crate::linalg::solve;
use crate::matrix::vector::{axpy, dot, norm};
use crate::matrix::Matrix;
use crate::traits::FloatScalar;

use super::line_search::armijo;
use super::objective::Objective;
use super::{ConstrainedResult, Termination};

/// Settings for [`equality_constrained_newton`].
#[derive(Debug, Clone, Copy)]
pub struct KktSettings<T> {
    /// Stop when both `‖Δx‖` and `‖Δλ‖` fall below this.
    pub tol: T,
    /// Maximum number of Newton steps.
    pub max_iter: usize,
}

impl Default for KktSettings<f64> {
    fn default() -> Self {
        Self {
            tol: 1e-7,
            max_iter: 80,
        }
    }
}

impl Default for KktSettings<f32> {
    fn default() -> Self {
        Self {
            tol: 1e-3,
            max_iter: 80,
        }
    }
}

fn finish<T: FloatScalar, F: FnMut(&[T]) -> T>(
    mut obj: Objective<F>,
    x: Vec<T>,
    lambda: Vec<T>,
    iterations: usize,
    termination: Termination,
) -> ConstrainedResult<T> {
    let fx = obj.call(&x);
    ConstrainedResult {
        x,
        lambda,
        fx,
        iterations,
        termination,
    }
}

/// Minimize `f(x)` subject to the linear equality constraints `A·x = b`.
///
/// Newton's method on the Lagrangian `L = f + λᵀ(A·x − b)`. Each iteration
/// solves the KKT system
///
/// ```text
/// ┌ H  Aᵀ ┐ ┌ Δx ┐     ┌ ∇f + Aᵀλ ┐
/// └ A  0  ┘ └ Δλ ┘ = − └ A·x − b  ┘
/// ```
///
/// with the finite-difference Hessian `H`, then backtracks on
/// `f(x + αΔx) ≤ f(x) + 10⁻⁴·α·(∇f + Aᵀλ)·Δx` and moves both `x` and `λ` by
/// `α`. An unsolvable KKT system stops the iteration with
/// [`Termination::SingularSystem`].
///
/// # Arguments
///
/// * `f` — objective `f: Rⁿ → R`
/// * `a` — `m × n` constraint matrix
/// * `b` — constraint right-hand side, length `m`
/// * `x0` — initial primal guess, length `n`
/// * `lambda0` — initial multipliers, length `m`
/// * `settings` — tolerance and iteration limit
///
/// # Panics
///
/// Panics if the dimensions of `a`, `b`, `x0` and `lambda0` disagree.
///
/// # Example
///
/// ```
/// use formulary::Matrix;
/// use formulary::optim::{equality_constrained_newton, KktSettings, Termination};
///
/// // min (x0 − 1)² + (x1 − 2)²  s.t.  x0 + x1 = 1
/// let a = Matrix::from_rows(&[[1.0, 1.0]]);
/// let r = equality_constrained_newton(
///     |x: &[f64]| (x[0] - 1.0).powi(2) + (x[1] - 2.0).powi(2),
///     &a,
///     &[1.0],
///     &[0.0, 0.0],
///     &[0.0],
///     &KktSettings::default(),
/// );
/// assert_eq!(r.termination, Termination::Converged);
/// assert!(r.x[0].abs() < 1e-6 && (r.x[1] - 1.0).abs() < 1e-6);
/// assert!((r.lambda[0] - 2.0).abs() < 1e-6);
/// ```
pub fn equality_constrained_newton<T: FloatScalar>(
    f: impl FnMut(&[T]) -> T,
    a: &Matrix<T>,
    b: &[T],
    x0: &[T],
    lambda0: &[T],
    settings: &KktSettings<T>,
) -> ConstrainedResult<T> {
    let n = x0.len();
    let m = b.len();
    assert_eq!(a.ncols(), n, "constraint matrix must have one column per variable");
    assert_eq!(a.nrows(), m, "constraint matrix must have one row per constraint");
    assert_eq!(lambda0.len(), m, "one multiplier per constraint required");

    let mut obj = Objective::new(f);
    let mut x = x0.to_vec();
    let mut lambda = lambda0.to_vec();

    for iter in 0..settings.max_iter {
        let g = obj.gradient(&x);
        let hess = obj.hessian(&x);

        // ∇ₓL = ∇f + Aᵀλ and the primal residual A·x − b
        let mut grad_l = g;
        let mut primal = Vec::with_capacity(m);
        for i in 0..m {
            let mut ax = T::zero();
            for j in 0..n {
                grad_l[j] = grad_l[j] + a[(i, j)] * lambda[i];
                ax = ax + a[(i, j)] * x[j];
            }
            primal.push(ax - b[i]);
        }

        let k = Matrix::from_fn(n + m, n + m, |r, c| match (r < n, c < n) {
            (true, true) => hess[(r, c)],
            (true, false) => a[(c - n, r)],
            (false, true) => a[(r - n, c)],
            (false, false) => T::zero(),
        });
        let rhs: Vec<T> = grad_l.iter().chain(primal.iter()).map(|&v| -v).collect();

        let sol = match solve(&k, &rhs) {
            Ok(sol) => sol,
            Err(_) => {
                log::debug!(
                    "equality_constrained_newton: singular KKT system at iteration {}",
                    iter
                );
                return finish(obj, x, lambda, iter, Termination::SingularSystem);
            }
        };
        let (dx, dl) = sol.split_at(n);
        log::trace!(
            "equality_constrained_newton: iter {} ‖Δx‖ = {:?} ‖Δλ‖ = {:?}",
            iter,
            norm(dx),
            norm(dl)
        );
        if norm(dx) < settings.tol && norm(dl) < settings.tol {
            return finish(obj, x, lambda, iter, Termination::Converged);
        }

        let fx = obj.call(&x);
        let slope = dot(&grad_l, dx);
        let (alpha, x_new) = armijo(&mut |y: &[T]| obj.call(y), &x, fx, dx, slope);
        x = x_new;
        lambda = axpy(&lambda, alpha, dl);
    }

    log::debug!(
        "equality_constrained_newton: budget of {} iterations exhausted",
        settings.max_iter
    );
    finish(obj, x, lambda, settings.max_iter, Termination::MaxIterations)
}
