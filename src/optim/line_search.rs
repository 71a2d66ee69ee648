use alloc::vec::Vec;

use crate::matrix::vector::axpy;
use crate::traits::FloatScalar;

/// Armijo sufficient-decrease constant.
pub(crate) const ARMIJO_C1: f64 = 1e-4;
/// Backtracking stops once the step drops below this.
pub(crate) const MIN_STEP: f64 = 1e-12;

/// Halving backtracking from `α = 1`.
///
/// Stops at the first `α` for which `accept(α)` holds, or as soon as halving
/// takes `α` below [`MIN_STEP`]. Either way the returned `α` is meant to be
/// used, so a failed search still moves by a negligible step.
pub(crate) fn backtrack<T: FloatScalar>(mut accept: impl FnMut(T) -> bool) -> T {
    let half = T::lit(0.5);
    let floor = T::lit(MIN_STEP);
    let mut alpha = T::one();
    while !accept(alpha) {
        alpha = alpha * half;
        if alpha < floor {
            log::trace!("backtracking hit the step floor");
            break;
        }
    }
    alpha
}

/// Backtracking Armijo search on an objective along direction `p`.
///
/// Accepts `α` when `f(x + α·p) ≤ f(x) + c1·α·slope`, where `slope` is the
/// directional derivative `∇f·p`. Returns `(α, x + α·p)`.
pub(crate) fn armijo<T: FloatScalar>(
    f: &mut impl FnMut(&[T]) -> T,
    x: &[T],
    fx: T,
    p: &[T],
    slope: T,
) -> (T, Vec<T>) {
    let c1 = T::lit(ARMIJO_C1);
    let alpha = backtrack(|alpha| f(&axpy(x, alpha, p)) <= fx + c1 * alpha * slope);
    (alpha, axpy(x, alpha, p))
}
