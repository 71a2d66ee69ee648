//! Optimization: root finding, nonlinear systems, unconstrained and
//! equality-constrained minimization.
//!
//! Vectors are `&[T]` / `Vec<T>`. Objectives are plain closures; gradients and
//! Hessians are approximated with central differences from
//! [`crate::calculus`] (gradient step `1e-6`, Hessian step `1e-4`).
//!
//! # Root finding
//!
//! - [`newton_raphson`] — Newton's method with user-supplied derivative
//! - [`newton_raphson_numeric`] — Newton's method with a central-difference derivative
//! - [`numeric_inverse`] — solve `f(x) = target` by bisection on a bracket
//!
//! # Nonlinear systems
//!
//! - [`newton_system`] / [`newton_system_with_jacobian`] — damped Newton on `F(x) = 0`
//!
//! # Unconstrained minimization
//!
//! - [`gradient_descent`] — steepest descent with Armijo backtracking
//! - [`minimize_newton`] — Newton's method on the numeric Hessian
//! - [`lbfgs`] — limited-memory BFGS (two-loop recursion)
//!
//! # Equality constraints
//!
//! - [`equality_constrained_newton`] — Newton on the KKT system of `min f(x)` s.t. `A·x = b`
//!
//! Root finders and system solvers report failure through [`OptimError`].
//! Minimizers always return their final iterate, tagged with a [`Termination`].

mod descent;
mod kkt;
mod lbfgs;
pub(crate) mod line_search;
mod newton;
mod newton_system;
mod objective;
mod root;

#[cfg(test)]
mod tests;

pub use descent::{gradient_descent, GradientDescentSettings};
pub use kkt::{equality_constrained_newton, KktSettings};
pub use lbfgs::{lbfgs, LbfgsSettings};
pub use newton::{minimize_newton, NewtonSettings};
pub use newton_system::{newton_system, newton_system_with_jacobian, NewtonSystemSettings};
pub use root::{
    newton_raphson, newton_raphson_numeric, numeric_inverse, BisectSettings, RootSettings,
};

use alloc::vec::Vec;

use crate::linalg::LinalgError;

/// Errors from root finding and nonlinear system solvers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OptimError {
    /// Maximum number of iterations exceeded.
    MaxIterations,
    /// `f(low) − target` and `f(high) − target` have the same sign.
    BracketInvalid,
    /// The Newton linear system was singular or near-singular.
    Singular,
    /// Derivative magnitude fell below `1e-15`.
    ZeroDerivative,
}

impl core::fmt::Display for OptimError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            OptimError::MaxIterations => write!(f, "maximum iterations exceeded"),
            OptimError::BracketInvalid => write!(f, "bracket endpoints must have opposite signs"),
            OptimError::Singular => write!(f, "singular or near-singular matrix"),
            OptimError::ZeroDerivative => write!(f, "derivative vanished"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for OptimError {}

impl From<LinalgError> for OptimError {
    fn from(_: LinalgError) -> Self {
        OptimError::Singular
    }
}

/// Result of a scalar root-finding algorithm.
#[derive(Debug, Clone, Copy)]
pub struct RootResult<T> {
    /// Approximate root.
    pub x: T,
    /// Residual at the root: `f(x)` (or `f(x) − target` for [`numeric_inverse`]).
    pub fx: T,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Number of function evaluations (derivative calls included).
    pub evals: usize,
    /// `false` when the iteration budget ran out and `x` is a best-effort estimate.
    pub converged: bool,
}

/// Why a minimizer stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Convergence test satisfied.
    Converged,
    /// The Newton / KKT linear system could not be solved.
    SingularSystem,
    /// Iteration budget exhausted.
    MaxIterations,
}

/// Result of an unconstrained minimization algorithm.
#[derive(Debug, Clone)]
pub struct MinimizeResult<T> {
    /// Final iterate.
    pub x: Vec<T>,
    /// Objective value at `x`.
    pub fx: T,
    /// Norm of the numeric gradient at `x`.
    pub grad_norm: T,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Number of objective evaluations, including those spent on derivatives.
    pub f_evals: usize,
    /// Why the iteration stopped.
    pub termination: Termination,
}

/// Result of [`equality_constrained_newton`].
#[derive(Debug, Clone)]
pub struct ConstrainedResult<T> {
    /// Final primal iterate.
    pub x: Vec<T>,
    /// Final Lagrange multipliers, one per constraint row.
    pub lambda: Vec<T>,
    /// Objective value at `x`.
    pub fx: T,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Why the iteration stopped.
    pub termination: Termination,
}
