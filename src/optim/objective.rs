use alloc::vec::Vec;

use crate::calculus::{gradient_step, hessian_step};
use crate::matrix::Matrix;
use crate::traits::FloatScalar;

use super::{MinimizeResult, Termination};

const GRADIENT_STEP: f64 = 1e-6;
const HESSIAN_STEP: f64 = 1e-4;

/// An objective `f: Rⁿ → R` that counts its evaluations, with numeric
/// derivatives charged to the same counter.
pub(crate) struct Objective<F> {
    f: F,
    pub(crate) evals: usize,
}

impl<F> Objective<F> {
    pub(crate) fn new(f: F) -> Self {
        Self { f, evals: 0 }
    }

    pub(crate) fn call<T>(&mut self, x: &[T]) -> T
    where
        F: FnMut(&[T]) -> T,
    {
        self.evals += 1;
        (self.f)(x)
    }

    /// Central-difference gradient, `h = 1e-6`.
    pub(crate) fn gradient<T: FloatScalar>(&mut self, x: &[T]) -> Vec<T>
    where
        F: FnMut(&[T]) -> T,
    {
        gradient_step(|y: &[T]| self.call(y), x, T::lit(GRADIENT_STEP))
    }

    /// Finite-difference Hessian, `h = 1e-4`.
    pub(crate) fn hessian<T: FloatScalar>(&mut self, x: &[T]) -> Matrix<T>
    where
        F: FnMut(&[T]) -> T,
    {
        hessian_step(|y: &[T]| self.call(y), x, T::lit(HESSIAN_STEP))
    }

    /// Package the final iterate.
    pub(crate) fn finish<T: FloatScalar>(
        mut self,
        x: Vec<T>,
        grad_norm: T,
        iterations: usize,
        termination: Termination,
    ) -> MinimizeResult<T>
    where
        F: FnMut(&[T]) -> T,
    {
        let fx = self.call(&x);
        MinimizeResult {
            x,
            fx,
            grad_norm,
            iterations,
            f_evals: self.evals,
            termination,
        }
    }
}
