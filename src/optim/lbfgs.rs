use alloc::collections::VecDeque;
use alloc::vec;
use alloc::vec::Vec;

use crate::matrix::vector::{axpy, dot, norm, scale, sub};
use crate::traits::FloatScalar;

use super::line_search::armijo;
use super::objective::Objective;
use super::{MinimizeResult, Termination};

/// Curvature pairs with `sᵀy` at or below this are discarded.
const CURVATURE_FLOOR: f64 = 1e-18;

/// Settings for [`lbfgs`].
#[derive(Debug, Clone, Copy)]
pub struct LbfgsSettings<T> {
    /// Convergence tolerance on the gradient norm.
    pub tol: T,
    /// Maximum number of iterations.
    pub max_iter: usize,
    /// Number of `(s, y)` pairs kept in the inverse-Hessian model.
    pub history: usize,
}

impl Default for LbfgsSettings<f64> {
    fn default() -> Self {
        Self {
            tol: 1e-6,
            max_iter: 300,
            history: 5,
        }
    }
}

impl Default for LbfgsSettings<f32> {
    fn default() -> Self {
        Self {
            tol: 1e-3,
            max_iter: 300,
            history: 5,
        }
    }
}

struct Pair<T> {
    s: Vec<T>,
    y: Vec<T>,
    rho: T,
}

/// Two-loop recursion: returns `−H·g` for the limited-memory inverse Hessian `H`.
fn direction<T: FloatScalar>(history: &VecDeque<Pair<T>>, g: &[T]) -> Vec<T> {
    let mut q = g.to_vec();
    let mut a = vec![T::zero(); history.len()];
    for (i, pair) in history.iter().enumerate().rev() {
        a[i] = pair.rho * dot(&pair.s, &q);
        q = axpy(&q, -a[i], &pair.y);
    }

    // H₀ = γI scaled by the newest pair
    let gamma = history.back().map_or(T::one(), |pair| {
        let yy = dot(&pair.y, &pair.y);
        if yy > T::lit(CURVATURE_FLOOR) {
            dot(&pair.s, &pair.y) / yy
        } else {
            T::one()
        }
    });

    let mut z = scale(&q, gamma);
    for (i, pair) in history.iter().enumerate() {
        let b = pair.rho * dot(&pair.y, &z);
        z = axpy(&z, a[i] - b, &pair.s);
    }
    scale(&z, -T::one())
}

/// Minimize `f` by limited-memory BFGS.
///
/// Keeps the most recent `settings.history` curvature pairs
/// `s = x_{k+1} − x_k`, `y = ∇f_{k+1} − ∇f_k`, storing a pair only when
/// `sᵀy > 1e-18`. With no stored pairs the direction is steepest descent.
/// Steps are chosen by Armijo backtracking alone, with no curvature condition
/// on the step.
///
/// A rejected pair leaves the history unchanged, so on non-convex objectives
/// (Rosenbrock from `(-1.2, 1)`, say) the model can go stale and the iterate
/// crawl until `max_iter`. Check [`MinimizeResult::termination`].
///
/// # Example
///
/// ```
/// use formulary::optim::{lbfgs, LbfgsSettings, Termination};
///
/// // Elongated bowl, minimum at (1, -2)
/// let r = lbfgs(
///     |x: &[f64]| (x[0] - 1.0).powi(2) + 50.0 * (x[1] + 2.0).powi(2),
///     &[5.0, 5.0],
///     &LbfgsSettings::default(),
/// );
/// assert_eq!(r.termination, Termination::Converged);
/// assert!((r.x[0] - 1.0).abs() < 1e-5);
/// assert!((r.x[1] + 2.0).abs() < 1e-5);
/// ```
pub fn lbfgs<T: FloatScalar>(
    f: impl FnMut(&[T]) -> T,
    x0: &[T],
    settings: &LbfgsSettings<T>,
) -> MinimizeResult<T> {
    let mut obj = Objective::new(f);
    let mut history: VecDeque<Pair<T>> = VecDeque::with_capacity(settings.history + 1);
    let mut x = x0.to_vec();
    let mut g = obj.gradient(&x);

    for iter in 0..settings.max_iter {
        let g_norm = norm(&g);
        log::trace!("lbfgs: iter {} ‖∇f‖ = {:?}", iter, g_norm);
        if g_norm < settings.tol {
            return obj.finish(x, g_norm, iter, Termination::Converged);
        }

        let p = direction(&history, &g);
        let fx = obj.call(&x);
        let slope = dot(&g, &p);
        let (_, x_new) = armijo(&mut |y: &[T]| obj.call(y), &x, fx, &p, slope);

        let g_new = obj.gradient(&x_new);
        let s = sub(&x_new, &x);
        let y = sub(&g_new, &g);
        let sy = dot(&s, &y);
        if sy > T::lit(CURVATURE_FLOOR) {
            history.push_back(Pair {
                s,
                y,
                rho: T::one() / sy,
            });
            if history.len() > settings.history {
                history.pop_front();
            }
        }

        x = x_new;
        g = g_new;
    }

    log::debug!("lbfgs: budget of {} iterations exhausted", settings.max_iter);
    let g_norm = norm(&g);
    obj.finish(x, g_norm, settings.max_iter, Termination::MaxIterations)
}
