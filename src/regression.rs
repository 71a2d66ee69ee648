//! Ordinary least squares.
//!
//! [`simple_linear`] fits `y ≈ β₀ + β₁·x` in closed form; [`least_squares`]
//! solves the normal equations `XᵀX·β = Xᵀy` for a small design matrix.
//!
//! ```
//! use formulary::regression::simple_linear;
//!
//! let fit = simple_linear(&[0.0_f64, 1.0, 2.0, 3.0], &[1.0, 3.0, 5.0, 7.0]);
//! assert!((fit.intercept - 1.0).abs() < 1e-12);
//! assert!((fit.slope - 2.0).abs() < 1e-12);
//! assert!((fit.r_squared - 1.0).abs() < 1e-12);
//! ```

use alloc::vec::Vec;

use crate::linalg::{solve, LinalgError};
use crate::matrix::vector::dot;
use crate::matrix::Matrix;
use crate::traits::FloatScalar;

/// Straight-line fit `y ≈ intercept + slope·x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit<T> {
    pub intercept: T,
    pub slope: T,
    /// Coefficient of determination `1 − SSE/SST`.
    pub r_squared: T,
}

impl<T: FloatScalar> LinearFit<T> {
    /// Fitted value at `x`.
    pub fn predict(&self, x: T) -> T {
        self.intercept + self.slope * x
    }
}

/// Least-squares line through `(x[i], y[i])`.
///
/// The slope is `Sxy / Sxx` about the means. If every `x` is equal the slope is
/// not finite; if every `y` is equal `r_squared` is NaN (`SST = 0`).
///
/// # Panics
///
/// Panics if `x` and `y` differ in length or hold fewer than two samples.
pub fn simple_linear<T: FloatScalar>(x: &[T], y: &[T]) -> LinearFit<T> {
    assert_eq!(x.len(), y.len(), "x and y must have the same length");
    assert!(x.len() >= 2, "a line fit needs at least two samples");

    let n = T::from_usize(x.len());
    let xbar = x.iter().fold(T::zero(), |s, &v| s + v) / n;
    let ybar = y.iter().fold(T::zero(), |s, &v| s + v) / n;

    let (sxx, sxy) = x
        .iter()
        .zip(y)
        .fold((T::zero(), T::zero()), |(sxx, sxy), (&xi, &yi)| {
            let dx = xi - xbar;
            (sxx + dx * dx, sxy + dx * (yi - ybar))
        });
    let slope = sxy / sxx;
    let intercept = ybar - slope * xbar;

    let (sse, sst) = x
        .iter()
        .zip(y)
        .fold((T::zero(), T::zero()), |(sse, sst), (&xi, &yi)| {
            let r = yi - (intercept + slope * xi);
            let d = yi - ybar;
            (sse + r * r, sst + d * d)
        });

    LinearFit {
        intercept,
        slope,
        r_squared: T::one() - sse / sst,
    }
}

/// Coefficients `β` minimizing `‖X·β − y‖₂` via the normal equations.
///
/// Include a column of ones in `x` to fit an intercept.
///
/// # Errors
///
/// Returns [`LinalgError::Singular`] if `XᵀX` is singular, e.g. when columns
/// of `x` are linearly dependent or there are fewer rows than columns.
///
/// # Panics
///
/// Panics if `x.nrows() != y.len()`.
///
/// # Example
///
/// ```
/// use formulary::Matrix;
/// use formulary::regression::least_squares;
///
/// // y = 1 + 2·x₁ − x₂
/// let x = Matrix::from_rows(&[
///     [1.0_f64, 0.0, 0.0],
///     [1.0, 1.0, 0.0],
///     [1.0, 0.0, 1.0],
///     [1.0, 2.0, 3.0],
/// ]);
/// let beta = least_squares(&x, &[1.0, 3.0, 0.0, 2.0]).unwrap();
/// assert!((beta[0] - 1.0).abs() < 1e-10);
/// assert!((beta[1] - 2.0).abs() < 1e-10);
/// assert!((beta[2] + 1.0).abs() < 1e-10);
/// ```
pub fn least_squares<T: FloatScalar>(x: &Matrix<T>, y: &[T]) -> Result<Vec<T>, LinalgError> {
    assert_eq!(x.nrows(), y.len(), "one observation per design row required");
    let cols: Vec<Vec<T>> = (0..x.ncols()).map(|j| x.col(j)).collect();
    let xtx = Matrix::from_fn(cols.len(), cols.len(), |i, j| dot(&cols[i], &cols[j]));
    let xty: Vec<T> = cols.iter().map(|c| dot(c, y)).collect();
    solve(&xtx, &xty).map_err(|e| {
        log::debug!("least_squares: normal equations are singular");
        e
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
        assert!(
            (a - b).abs() < tol,
            "{}: {} vs {} (diff {})",
            msg,
            a,
            b,
            (a - b).abs()
        );
    }

    #[test]
    fn line_through_noisy_points() {
        // Residuals ±0.1 are orthogonal to the centred x
        let x = [-2.0, -1.0, 0.0, 1.0, 2.0];
        let y = [-2.9, -1.1, 1.1, 2.9, 5.1];
        let fit = simple_linear(&x, &y);
        assert_near(fit.slope, 2.0, 1e-12, "slope");
        assert_near(fit.intercept, 1.02, 1e-12, "intercept");
        assert!(fit.r_squared > 0.99 && fit.r_squared < 1.0);
        assert_near(fit.predict(3.0), 7.02, 1e-12, "prediction");
    }

    #[test]
    fn uncorrelated_data_has_zero_r_squared() {
        let fit = simple_linear(&[0.0, 1.0, 2.0], &[1.0, 2.0, 1.0]);
        assert_near(fit.slope, 0.0, 1e-15, "slope");
        assert_near(fit.r_squared, 0.0, 1e-15, "r²");
    }

    #[test]
    fn simple_linear_f32() {
        let fit = simple_linear(&[1.0f32, 2.0, 3.0], &[2.0, 4.0, 6.0]);
        assert!((fit.slope - 2.0).abs() < 1e-5);
        assert!(fit.intercept.abs() < 1e-5);
    }

    #[test]
    #[should_panic(expected = "same length")]
    fn mismatched_lengths_panic() {
        let _ = simple_linear(&[1.0, 2.0], &[1.0]);
    }

    #[test]
    #[should_panic(expected = "at least two samples")]
    fn single_sample_panics() {
        let _ = simple_linear(&[1.0], &[1.0]);
    }

    #[test]
    fn least_squares_matches_simple_linear() {
        let xs = [0.5, 1.5, 2.0, 3.5, 4.0];
        let ys = [1.2, 2.9, 4.1, 6.8, 8.3];
        let design = Matrix::from_fn(xs.len(), 2, |i, j| if j == 0 { 1.0 } else { xs[i] });
        let beta = least_squares(&design, &ys).unwrap();
        let fit = simple_linear(&xs, &ys);
        assert_near(beta[0], fit.intercept, 1e-10, "intercept");
        assert_near(beta[1], fit.slope, 1e-10, "slope");
    }

    #[test]
    fn least_squares_square_system_interpolates() {
        let x = Matrix::from_rows(&[[2.0, 1.0], [1.0, 3.0]]);
        let beta = least_squares(&x, &[3.0, 5.0]).unwrap();
        assert_eq!(beta.len(), 2);
        assert_near(beta[0], 0.8, 1e-12, "β₀");
        assert_near(beta[1], 1.4, 1e-12, "β₁");
    }

    #[test]
    fn least_squares_dependent_columns_are_singular() {
        let x = Matrix::from_rows(&[[1.0, 2.0], [2.0, 4.0], [3.0, 6.0]]);
        assert_eq!(
            least_squares(&x, &[1.0, 2.0, 3.0]),
            Err(LinalgError::Singular)
        );
    }

    #[test]
    #[should_panic(expected = "one observation per design row")]
    fn least_squares_row_mismatch_panics() {
        let x = Matrix::from_rows(&[[1.0, 0.0], [0.0, 1.0]]);
        let _ = least_squares(&x, &vec![1.0, 2.0, 3.0]);
    }
}
