//! Numerical calculus: finite differences and quadrature.
//!
//! # Differentiation
//!
//! All derivatives use symmetric (central) differences. Default steps:
//!
//! | Routine                        | Default `h` |
//! |--------------------------------|-------------|
//! | [`derivative`]                 | `1e-6`      |
//! | [`gradient`], [`jacobian`]     | `1e-5`      |
//! | [`second_derivative`], [`hessian`] | `1e-4`  |
//! | [`grad3`], [`divergence`], [`curl`] | `1e-5` |
//!
//! Second derivatives use a larger step because their truncation error is
//! `O(h²)` while cancellation error grows like `ε/h²`.
//!
//! # Quadrature
//!
//! - [`trapezoid`] — composite trapezoidal rule
//! - [`simpson`] — composite Simpson 1/3 rule
//! - [`boole`] — composite Boole rule (panels in groups of four)
//! - [`simpson_2d`] — tensor-product Simpson rule on a rectangle
//! - [`adaptive_simpson`] — recursive Simpson with Richardson error control
//! - [`line_integral`], [`surface_flux`] — work along a curve and flux
//!   through a graph `z = g(x, y)`, built on the Simpson rules

mod adaptive;
mod diff;
mod field;
mod integral;
mod quad;


pub use adaptive::{adaptive_simpson, AdaptiveSimpsonSettings, Quadrature};
pub use diff::{
    derivative, derivative_step, gradient, gradient_step, hessian, hessian_step, jacobian,
    jacobian_step, second_derivative, second_derivative_step,
};
pub use field::{curl, divergence, grad3};
pub use integral::{line_integral, surface_flux};
pub use quad::{boole, simpson, simpson_2d, trapezoid};
