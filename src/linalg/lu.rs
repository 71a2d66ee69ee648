use alloc::vec;
use alloc::vec::Vec;

use crate::matrix::Matrix;
use crate::traits::FloatScalar;

use super::LinalgError;

/// Pivots smaller than this abort the factorization.
const PIVOT_TOL: f64 = 1e-12;

/// Doolittle LU decomposition `A = L U` without row pivoting.
///
/// `L` is unit lower triangular and `U` is upper triangular. Without
/// pivoting the factorization breaks down on a zero leading minor even when
/// `A` is invertible (e.g. `[[0, 1], [1, 0]]`); fall back to
/// [`solve`](super::solve) for such systems.
///
/// # Example
///
/// ```
/// use formulary::Matrix;
/// use formulary::linalg::LuDecomposition;
///
/// let a = Matrix::from_rows(&[[4.0_f64, 3.0], [6.0, 3.0]]);
/// let lu = LuDecomposition::new(&a).unwrap();
/// assert!((lu.l()[(1, 0)] - 1.5).abs() < 1e-12);
/// assert!((lu.u()[(1, 1)] + 1.5).abs() < 1e-12);
///
/// let x = lu.solve(&[10.0, 12.0]);
/// assert!((x[0] - 1.0).abs() < 1e-12);
/// assert!((x[1] - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct LuDecomposition<T> {
    l: Matrix<T>,
    u: Matrix<T>,
}

impl<T: FloatScalar> LuDecomposition<T> {
    /// Factor a square matrix.
    ///
    /// Row `i` of `U` is formed first, then column `i` of `L` below the
    /// diagonal, each from the already-computed rows and columns.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::Singular`] if any pivot `|U[i][i]|` is below `1e-12`.
    ///
    /// # Panics
    ///
    /// Panics if `a` is not square.
    pub fn new(a: &Matrix<T>) -> Result<Self, LinalgError> {
        assert!(
            a.is_square(),
            "LU decomposition requires a square matrix, got {}x{}",
            a.nrows(),
            a.ncols()
        );
        let n = a.nrows();
        let tol = T::lit(PIVOT_TOL);
        let mut l = Matrix::eye(n);
        let mut u = Matrix::zeros(n, n);

        for i in 0..n {
            for k in i..n {
                let mut s = T::zero();
                for j in 0..i {
                    s = s + l[(i, j)] * u[(j, k)];
                }
                u[(i, k)] = a[(i, k)] - s;
            }

            let pivot = u[(i, i)];
            if pivot.abs() < tol || pivot.is_nan() {
                log::debug!("doolittle LU: pivot {:?} at row {} below tolerance", pivot, i);
                return Err(LinalgError::Singular);
            }

            for k in (i + 1)..n {
                let mut s = T::zero();
                for j in 0..i {
                    s = s + l[(k, j)] * u[(j, i)];
                }
                l[(k, i)] = (a[(k, i)] - s) / pivot;
            }
        }

        Ok(Self { l, u })
    }

    /// Unit lower-triangular factor.
    pub fn l(&self) -> &Matrix<T> {
        &self.l
    }

    /// Upper-triangular factor.
    pub fn u(&self) -> &Matrix<T> {
        &self.u
    }

    /// Consume the decomposition, returning `(L, U)`.
    pub fn into_factors(self) -> (Matrix<T>, Matrix<T>) {
        (self.l, self.u)
    }

    /// Solve `A x = b` by forward substitution on `L` and back substitution on `U`.
    ///
    /// # Panics
    ///
    /// Panics if `b.len()` does not match the matrix dimension.
    pub fn solve(&self, b: &[T]) -> Vec<T> {
        let n = self.l.nrows();
        assert_eq!(
            b.len(),
            n,
            "right-hand side length {} does not match {}x{} matrix",
            b.len(),
            n,
            n
        );

        let mut y = vec![T::zero(); n];
        for i in 0..n {
            let mut sum = b[i];
            for j in 0..i {
                sum = sum - self.l[(i, j)] * y[j];
            }
            y[i] = sum;
        }

        let mut x = vec![T::zero(); n];
        for i in (0..n).rev() {
            let mut sum = y[i];
            for j in (i + 1)..n {
                sum = sum - self.u[(i, j)] * x[j];
            }
            x[i] = sum / self.u[(i, i)];
        }
        x
    }

    /// Determinant: product of the diagonal of `U`.
    pub fn det(&self) -> T {
        (0..self.u.nrows()).fold(T::one(), |d, i| d * self.u[(i, i)])
    }
}
