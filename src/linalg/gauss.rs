use alloc::vec;
use alloc::vec::Vec;

use crate::matrix::Matrix;
use crate::traits::FloatScalar;

use super::LinalgError;

/// Default pivot tolerance below which a system is declared singular.
const PIVOT_TOL: f64 = 1e-12;

/// Multipliers smaller than this are not worth an elimination pass.
const SKIP_TOL: f64 = 1e-18;

/// Pick the row in `col..n` with the largest magnitude in column `col`.
#[inline]
fn find_pivot<T: FloatScalar>(m: &Matrix<T>, col: usize) -> (usize, T) {
    let mut max_row = col;
    let mut max_val = m[(col, col)].abs();
    for row in (col + 1)..m.nrows() {
        let val = m[(row, col)].abs();
        if val > max_val {
            max_val = val;
            max_row = row;
        }
    }
    (max_row, max_val)
}

/// Solve `A x = b` by Gaussian elimination with partial pivoting.
///
/// Uses the default pivot tolerance `1e-12`. See [`solve_tol`].
///
/// # Errors
///
/// Returns [`LinalgError::Singular`] if no usable pivot exists in some column.
///
/// # Panics
///
/// Panics if `a` is not square or `b.len() != a.nrows()`.
///
/// # Example
///
/// ```
/// use formulary::Matrix;
/// use formulary::linalg::solve;
///
/// let a = Matrix::from_rows(&[[0.0_f64, 1.0], [1.0, 0.0]]);
/// let x = solve(&a, &[2.0, 3.0]).unwrap();
/// assert_eq!(x, vec![3.0, 2.0]);
/// ```
pub fn solve<T: FloatScalar>(a: &Matrix<T>, b: &[T]) -> Result<Vec<T>, LinalgError> {
    solve_tol(a, b, T::lit(PIVOT_TOL))
}

/// Solve `A x = b` by Gaussian elimination with partial pivoting.
///
/// At each column the remaining row with the largest absolute entry becomes
/// the pivot row. The pivot row is normalized to a unit diagonal, the rows
/// below are eliminated, and `x` is recovered by back substitution.
/// `a` and `b` are copied; the caller's values are left untouched.
///
/// # Errors
///
/// Returns [`LinalgError::Singular`] if the largest candidate pivot of some
/// column is below `tol`.
///
/// # Panics
///
/// Panics if `a` is not square or `b.len() != a.nrows()`.
pub fn solve_tol<T: FloatScalar>(a: &Matrix<T>, b: &[T], tol: T) -> Result<Vec<T>, LinalgError> {
    assert!(
        a.is_square(),
        "solve requires a square matrix, got {}x{}",
        a.nrows(),
        a.ncols()
    );
    assert_eq!(
        b.len(),
        a.nrows(),
        "right-hand side length {} does not match {}x{} matrix",
        b.len(),
        a.nrows(),
        a.ncols()
    );

    let n = a.nrows();
    let mut m = a.clone();
    let mut rhs = b.to_vec();
    let skip = T::lit(SKIP_TOL);

    for p in 0..n {
        let (piv, max_val) = find_pivot(&m, p);
        if max_val < tol || max_val.is_nan() {
            log::debug!("gaussian elimination: pivot {:?} below tolerance in column {}", max_val, p);
            return Err(LinalgError::Singular);
        }

        if piv != p {
            m.swap_rows(p, piv);
            rhs.swap(p, piv);
        }

        let diag = m[(p, p)];
        for c in p..n {
            m[(p, c)] = m[(p, c)] / diag;
        }
        rhs[p] = rhs[p] / diag;

        for r in (p + 1)..n {
            let factor = m[(r, p)];
            if factor.abs() < skip {
                continue;
            }
            for c in p..n {
                m[(r, c)] = m[(r, c)] - factor * m[(p, c)];
            }
            rhs[r] = rhs[r] - factor * rhs[p];
        }
    }

    // Back substitution on the unit upper triangle
    let mut x = vec![T::zero(); n];
    for i in (0..n).rev() {
        let mut sum = rhs[i];
        for j in (i + 1)..n {
            sum = sum - m[(i, j)] * x[j];
        }
        x[i] = sum;
    }
    Ok(x)
}

/// Determinant by Gaussian elimination with partial pivoting.
///
/// Returns zero when a column has no pivot above `1e-12`.
///
/// # Panics
///
/// Panics if `a` is not square.
///
/// ```
/// use formulary::Matrix;
/// use formulary::linalg::det;
///
/// let a = Matrix::from_rows(&[[2.0_f64, 0.0, 1.0], [1.0, 3.0, 2.0], [1.0, 1.0, 2.0]]);
/// assert!((det(&a) - 6.0).abs() < 1e-12);
/// ```
pub fn det<T: FloatScalar>(a: &Matrix<T>) -> T {
    assert!(
        a.is_square(),
        "determinant requires a square matrix, got {}x{}",
        a.nrows(),
        a.ncols()
    );
    let n = a.nrows();
    let mut m = a.clone();
    let tol = T::lit(PIVOT_TOL);
    let mut d = T::one();

    for p in 0..n {
        let (piv, max_val) = find_pivot(&m, p);
        if max_val < tol || max_val.is_nan() {
            return T::zero();
        }
        if piv != p {
            m.swap_rows(p, piv);
            d = -d;
        }
        let diag = m[(p, p)];
        d = d * diag;
        for r in (p + 1)..n {
            let factor = m[(r, p)] / diag;
            if factor == T::zero() {
                continue;
            }
            for c in p..n {
                m[(r, c)] = m[(r, c)] - factor * m[(p, c)];
            }
        }
    }
    d
}
