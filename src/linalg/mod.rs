//! Direct linear solvers and eigenvalue estimation on dense [`Matrix`] values.
//!
//! - [`solve`] / [`solve_tol`] — Gaussian elimination with partial pivoting
//! - [`det`] — determinant by pivoted elimination
//! - [`LuDecomposition`] — Doolittle `A = LU` without pivoting
//! - [`dominant_eigen`] — power iteration with Rayleigh-quotient estimates
//!
//! Every routine works on a private copy of its inputs.

pub(crate) mod gauss;
pub(crate) mod lu;
pub(crate) mod power;


pub use gauss::{det, solve, solve_tol};
pub use lu::LuDecomposition;
pub use power::{dominant_eigen, PowerIteration, PowerSettings};

use alloc::vec::Vec;

use crate::matrix::Matrix;
use crate::traits::FloatScalar;

/// Errors from linear algebra operations.
///
/// ```
/// use formulary::Matrix;
/// use formulary::linalg::{solve, LinalgError};
///
/// let singular = Matrix::from_rows(&[[1.0_f64, 2.0], [2.0, 4.0]]);
/// assert_eq!(solve(&singular, &[1.0, 2.0]).unwrap_err(), LinalgError::Singular);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LinalgError {
    /// Matrix is singular or nearly singular (pivot below tolerance).
    Singular,
    /// Power iteration reached a (near) null-space direction.
    Degenerate,
}

impl core::fmt::Display for LinalgError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LinalgError::Singular => write!(f, "matrix is singular"),
            LinalgError::Degenerate => write!(f, "iterate collapsed onto the null space"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LinalgError {}

// ── Convenience methods ─────────────────────────────────────────────

impl<T: FloatScalar> Matrix<T> {
    /// Solve `self * x = b`. See [`solve`].
    ///
    /// ```
    /// use formulary::Matrix;
    /// let a = Matrix::from_rows(&[
    ///     [2.0_f64, 1.0, -1.0],
    ///     [-3.0, -1.0, 2.0],
    ///     [-2.0, 1.0, 2.0],
    /// ]);
    /// let x = a.solve(&[8.0, -11.0, -3.0]).unwrap();
    /// assert!((x[0] - 2.0).abs() < 1e-12);
    /// assert!((x[1] - 3.0).abs() < 1e-12);
    /// assert!((x[2] + 1.0).abs() < 1e-12);
    /// ```
    pub fn solve(&self, b: &[T]) -> Result<Vec<T>, LinalgError> {
        solve(self, b)
    }

    /// Determinant. See [`det`].
    pub fn det(&self) -> T {
        det(self)
    }

    /// Doolittle LU factorization. See [`LuDecomposition`].
    pub fn lu(&self) -> Result<LuDecomposition<T>, LinalgError> {
        LuDecomposition::new(self)
    }
}
