use alloc::vec;
use alloc::vec::Vec;

use crate::matrix::Matrix;
use crate::traits::FloatScalar;

const FIRST_STEP: f64 = 1e-6;
const GRADIENT_STEP: f64 = 1e-5;
const SECOND_STEP: f64 = 1e-4;

/// Central-difference derivative with step `1e-6`.
///
/// ```
/// use formulary::calculus::derivative;
/// let d = derivative(|x: f64| x * x, 3.0);
/// assert!((d - 6.0).abs() < 1e-6);
/// ```
pub fn derivative<T: FloatScalar>(f: impl FnMut(T) -> T, x: T) -> T {
    derivative_step(f, x, T::lit(FIRST_STEP))
}

/// Central-difference derivative `(f(x+h) − f(x−h)) / 2h`.
pub fn derivative_step<T: FloatScalar>(mut f: impl FnMut(T) -> T, x: T, h: T) -> T {
    (f(x + h) - f(x - h)) / (h + h)
}

/// Three-point second derivative with step `1e-4`.
pub fn second_derivative<T: FloatScalar>(f: impl FnMut(T) -> T, x: T) -> T {
    second_derivative_step(f, x, T::lit(SECOND_STEP))
}

/// Three-point second derivative `(f(x+h) − 2f(x) + f(x−h)) / h²`.
pub fn second_derivative_step<T: FloatScalar>(mut f: impl FnMut(T) -> T, x: T, h: T) -> T {
    let two = T::lit(2.0);
    (f(x + h) - two * f(x) + f(x - h)) / (h * h)
}

/// Central-difference gradient of `f: Rⁿ → R` with step `1e-5`.
///
/// ```
/// use formulary::calculus::gradient;
/// // f(x) = x0² + 2·x1², ∇f = [2·x0, 4·x1]
/// let g = gradient(|x: &[f64]| x[0] * x[0] + 2.0 * x[1] * x[1], &[3.0, 4.0]);
/// assert!((g[0] - 6.0).abs() < 1e-6);
/// assert!((g[1] - 16.0).abs() < 1e-6);
/// ```
pub fn gradient<T: FloatScalar>(f: impl FnMut(&[T]) -> T, x: &[T]) -> Vec<T> {
    gradient_step(f, x, T::lit(GRADIENT_STEP))
}

/// Central-difference gradient, perturbing one coordinate at a time.
///
/// Costs `2n` evaluations of `f`.
pub fn gradient_step<T: FloatScalar>(mut f: impl FnMut(&[T]) -> T, x: &[T], h: T) -> Vec<T> {
    let two_h = h + h;
    let mut xp = x.to_vec();
    let mut g = vec![T::zero(); x.len()];
    for i in 0..x.len() {
        xp[i] = x[i] + h;
        let fp = f(&xp);
        xp[i] = x[i] - h;
        let fm = f(&xp);
        xp[i] = x[i];
        g[i] = (fp - fm) / two_h;
    }
    g
}

/// Central-difference Jacobian of `f: Rⁿ → Rᵐ` with step `1e-5`.
///
/// ```
/// use formulary::calculus::jacobian;
/// // f(x) = [x0², x0·x1], J = [[2·x0, 0], [x1, x0]]
/// let j = jacobian(|x: &[f64]| vec![x[0] * x[0], x[0] * x[1]], &[3.0, 4.0]);
/// assert!((j[(0, 0)] - 6.0).abs() < 1e-6);
/// assert!(j[(0, 1)].abs() < 1e-6);
/// assert!((j[(1, 0)] - 4.0).abs() < 1e-6);
/// assert!((j[(1, 1)] - 3.0).abs() < 1e-6);
/// ```
pub fn jacobian<T: FloatScalar>(f: impl FnMut(&[T]) -> Vec<T>, x: &[T]) -> Matrix<T> {
    jacobian_step(f, x, T::lit(GRADIENT_STEP))
}

/// Central-difference Jacobian: column `j` holds `∂f/∂x_j` for every output.
///
/// The output dimension is taken from `f(x)`; costs `2n + 1` evaluations.
///
/// # Panics
///
/// Panics if `f` returns vectors of differing lengths.
pub fn jacobian_step<T: FloatScalar>(
    mut f: impl FnMut(&[T]) -> Vec<T>,
    x: &[T],
    h: T,
) -> Matrix<T> {
    let n = x.len();
    let m = f(x).len();
    let two_h = h + h;
    let mut xp = x.to_vec();
    let mut jac = Matrix::zeros(m, n);
    for j in 0..n {
        xp[j] = x[j] + h;
        let fp = f(&xp);
        xp[j] = x[j] - h;
        let fm = f(&xp);
        xp[j] = x[j];
        assert!(
            fp.len() == m && fm.len() == m,
            "function output length changed between evaluations"
        );
        for r in 0..m {
            jac[(r, j)] = (fp[r] - fm[r]) / two_h;
        }
    }
    jac
}

/// Finite-difference Hessian of `f: Rⁿ → R` with step `1e-4`.
///
/// ```
/// use formulary::calculus::hessian;
/// // f(x) = x0²·x1, H = [[2·x1, 2·x0], [2·x0, 0]]
/// let h = hessian(|x: &[f64]| x[0] * x[0] * x[1], &[1.0, 2.0]);
/// assert!((h[(0, 0)] - 4.0).abs() < 1e-5);
/// assert!((h[(0, 1)] - 2.0).abs() < 1e-5);
/// assert_eq!(h[(0, 1)], h[(1, 0)]);
/// ```
pub fn hessian<T: FloatScalar>(f: impl FnMut(&[T]) -> T, x: &[T]) -> Matrix<T> {
    hessian_step(f, x, T::lit(SECOND_STEP))
}

/// Finite-difference Hessian.
///
/// Diagonal entries use the three-point formula; off-diagonal entries use the
/// four-point mixed formula
/// `(f(++) − f(+−) − f(−+) + f(−−)) / 4h²`. Only the upper triangle is
/// evaluated and mirrored, so the result is exactly symmetric.
pub fn hessian_step<T: FloatScalar>(mut f: impl FnMut(&[T]) -> T, x: &[T], h: T) -> Matrix<T> {
    let n = x.len();
    let two = T::lit(2.0);
    let four_h2 = T::lit(4.0) * h * h;
    let f0 = f(x);
    let mut xp = x.to_vec();
    let mut hess = Matrix::zeros(n, n);

    for i in 0..n {
        xp[i] = x[i] + h;
        let fp = f(&xp);
        xp[i] = x[i] - h;
        let fm = f(&xp);
        xp[i] = x[i];
        hess[(i, i)] = (fp - two * f0 + fm) / (h * h);

        for j in (i + 1)..n {
            let mut corner = |si: T, sj: T| {
                xp[i] = x[i] + si * h;
                xp[j] = x[j] + sj * h;
                let v = f(&xp);
                xp[i] = x[i];
                xp[j] = x[j];
                v
            };
            let one = T::one();
            let fpp = corner(one, one);
            let fpm = corner(one, -one);
            let fmp = corner(-one, one);
            let fmm = corner(-one, -one);
            let v = (fpp - fpm - fmp + fmm) / four_h2;
            hess[(i, j)] = v;
            hess[(j, i)] = v;
        }
    }
    hess
}
