//! # formulary
//!
//! Pure-Rust numerical methods on heap-allocated dense matrices and slices,
//! `no_std` compatible with `alloc`. Every routine is a free function over
//! plain closures and returns plain data.
//!
//! ## Quick start
//!
//! ```
//! use formulary::Matrix;
//! use formulary::linalg::solve;
//!
//! // Solve a linear system Ax = b
//! let a = Matrix::from_rows(&[
//!     [2.0_f64, 1.0, -1.0],
//!     [-3.0, -1.0, 2.0],
//!     [-2.0, 1.0, 2.0],
//! ]);
//! let x = solve(&a, &[8.0, -11.0, -3.0]).unwrap(); // x = [2, 3, -1]
//! assert!((x[0] - 2.0).abs() < 1e-12);
//! ```
//!
//! ## Modules
//!
//! - [`matrix`] — Row-major `Matrix<T>` with runtime dimensions, checked
//!   products, and slice helpers for vectors (`dot`, `norm`, `axpy`, ...).
//!
//! - [`linalg`] — Gaussian elimination with partial pivoting, determinant,
//!   Doolittle LU, and power iteration for the dominant eigenpair.
//!
//! - [`calculus`] — Central-difference derivative, gradient, Jacobian and
//!   Hessian; 3-D field operators; trapezoid, Simpson, Boole, 2-D Simpson and
//!   adaptive Simpson quadrature; line integrals and flux through a graph.
//!
//! - [`optim`] — Newton-Raphson and bisection inversion for scalar equations,
//!   damped Newton for square nonlinear systems, gradient descent, Newton and
//!   L-BFGS minimization, and equality-constrained Newton (KKT). Requires the
//!   `optim` feature.
//!
//! - [`ode`] — Fixed-step Euler and RK4, step-doubling adaptive RK4, and
//!   closed-form linear ODE solutions. Requires the `ode` feature.
//!
//! - [`pde`] — Explicit FTCS heat equation and Fourier-series solutions of the
//!   heat, wave and Laplace equations. Requires the `ode` feature.
//!
//! - [`regression`] — Simple linear regression and least squares by normal
//!   equations.
//!
//! - [`traits`] — Element traits:
//!   - [`Scalar`] — all matrix elements (`Copy + PartialEq + Debug + Zero + One + Num`)
//!   - [`FloatScalar`] — real floats (`Scalar + Float`), used by every algorithm
//!
//! ## Errors and logging
//!
//! Violated preconditions (non-square systems, mismatched lengths, invalid
//! panel counts, unstable step ratios) panic. Numerical failures such as a
//! singular pivot or a missed iteration budget are returned as `Err`, and
//! optimizers report how they stopped through a [`optim::Termination`].
//! Diagnostics go through the [`log`](https://docs.rs/log) facade: `debug!` on
//! failed or best-effort exits and `trace!` per iteration. No logger is
//! installed by the library.
//!
//! ## Cargo features
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `std`   | yes     | Hardware FPU via system libm; `std::error::Error` impls |
//! | `libm`  | no      | Pure-Rust software float fallback for `no_std` |
//! | `ode`   | yes     | ODE and PDE integration |
//! | `optim` | yes     | Root finding, nonlinear systems, minimization |
//! | `all`   | no      | All features: `std` + `ode` + `optim` |

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod calculus;
pub mod linalg;
pub mod matrix;
#[cfg(feature = "ode")]
pub mod ode;
#[cfg(feature = "optim")]
pub mod optim;
#[cfg(feature = "ode")]
pub mod pde;
pub mod regression;
pub mod traits;

pub use matrix::{DimensionMismatch, Matrix};
pub use traits::{FloatScalar, Scalar};
