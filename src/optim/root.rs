use core::cell::RefCell;

use crate::calculus::derivative_step;
use crate::traits::FloatScalar;

use super::{OptimError, RootResult};

/// Derivative magnitude below which Newton's method gives up.
const ZERO_DERIVATIVE: f64 = 1e-15;
const NUMERIC_STEP: f64 = 1e-6;

/// Settings for Newton root finding.
#[derive(Debug, Clone, Copy)]
pub struct RootSettings<T> {
    /// Convergence tolerance on the step `|x_{n+1} − x_n|`.
    pub tol: T,
    /// Maximum number of iterations.
    pub max_iter: usize,
}

impl Default for RootSettings<f64> {
    fn default() -> Self {
        Self {
            tol: 1e-10,
            max_iter: 80,
        }
    }
}

impl Default for RootSettings<f32> {
    fn default() -> Self {
        Self {
            tol: 1e-5,
            max_iter: 80,
        }
    }
}

/// Settings for [`numeric_inverse`].
#[derive(Debug, Clone, Copy)]
pub struct BisectSettings<T> {
    /// Convergence tolerance on the residual `|f(x) − target|`.
    pub tol: T,
    /// Maximum number of bisections.
    pub max_iter: usize,
}

impl Default for BisectSettings<f64> {
    fn default() -> Self {
        Self {
            tol: 1e-9,
            max_iter: 100,
        }
    }
}

impl Default for BisectSettings<f32> {
    fn default() -> Self {
        Self {
            tol: 1e-5,
            max_iter: 100,
        }
    }
}

/// Newton's method for scalar root finding.
///
/// Iterates `x_{n+1} = x_n − f(x_n) / f'(x_n)` until two consecutive iterates
/// differ by less than `settings.tol`.
///
/// # Arguments
///
/// * `f` — function whose root is sought
/// * `df` — derivative of `f`
/// * `x0` — initial guess
/// * `settings` — tolerance and iteration limit
///
/// # Errors
///
/// Returns [`OptimError::ZeroDerivative`] if `|f'(x)| < 1e-15` at some iterate.
/// Returns [`OptimError::MaxIterations`] if convergence is not achieved.
///
/// # Example
///
/// ```
/// use formulary::optim::{newton_raphson, RootSettings};
///
/// // Find √2 as root of x² − 2
/// let r = newton_raphson(
///     |x| x * x - 2.0,
///     |x| 2.0 * x,
///     1.0,
///     &RootSettings::default(),
/// ).unwrap();
/// assert!((r.x - core::f64::consts::SQRT_2).abs() < 1e-10);
/// assert!(r.converged);
/// ```
pub fn newton_raphson<T: FloatScalar>(
    mut f: impl FnMut(T) -> T,
    mut df: impl FnMut(T) -> T,
    x0: T,
    settings: &RootSettings<T>,
) -> Result<RootResult<T>, OptimError> {
    let mut x = x0;
    let mut evals = 0usize;

    for iter in 0..settings.max_iter {
        let fx = f(x);
        let dfx = df(x);
        evals += 2;

        if dfx.abs() < T::lit(ZERO_DERIVATIVE) {
            log::debug!("newton_raphson: derivative vanished at iteration {}", iter);
            return Err(OptimError::ZeroDerivative);
        }

        let x_new = x - fx / dfx;
        log::trace!("newton_raphson: iter {} step {:?}", iter, (x_new - x).abs());

        if (x_new - x).abs() < settings.tol {
            let fx = f(x_new);
            evals += 1;
            return Ok(RootResult {
                x: x_new,
                fx,
                iterations: iter + 1,
                evals,
                converged: true,
            });
        }
        x = x_new;
    }

    log::debug!("newton_raphson: no convergence in {} iterations", settings.max_iter);
    Err(OptimError::MaxIterations)
}

/// Newton's method with the derivative replaced by a central difference
/// (`h = 1e-6`).
///
/// Same convergence test and errors as [`newton_raphson`]. Each iteration
/// costs three evaluations of `f`.
///
/// ```
/// use formulary::optim::{newton_raphson_numeric, RootSettings};
///
/// let r = newton_raphson_numeric(|x: f64| x.cos() - x, 1.0, &RootSettings::default()).unwrap();
/// assert!((r.x - 0.739_085_133_215_160_6).abs() < 1e-9);
/// ```
pub fn newton_raphson_numeric<T: FloatScalar>(
    f: impl FnMut(T) -> T,
    x0: T,
    settings: &RootSettings<T>,
) -> Result<RootResult<T>, OptimError> {
    // `f` feeds both the value and the difference quotient; calls never overlap.
    let h = T::lit(NUMERIC_STEP);
    let f = RefCell::new(f);
    let value = |x: T| (&mut *f.borrow_mut())(x);
    let slope = |x: T| derivative_step(|y| (&mut *f.borrow_mut())(y), x, h);
    let mut r = newton_raphson(value, slope, x0, settings)?;
    // one derivative per iteration, two evaluations each
    r.evals += r.iterations;
    Ok(r)
}

/// Solve `f(x) = target` on `[low, high]` by bisection.
///
/// Meant for monotone `f`: the numeric inverse `f⁻¹(target)`.
///
/// An endpoint whose residual is exactly zero is returned immediately.
/// Bisection stops when `|f(mid) − target| < settings.tol`. When the iteration
/// budget runs out the midpoint of the final bracket is returned with
/// [`RootResult::converged`] set to `false`.
///
/// # Panics
///
/// Panics unless `low < high`.
///
/// # Errors
///
/// Returns [`OptimError::BracketInvalid`] if `f(x) − target` has the same
/// sign at both endpoints.
///
/// # Example
///
/// ```
/// use formulary::optim::{numeric_inverse, BisectSettings};
///
/// // Cube root of 10
/// let r = numeric_inverse(|x: f64| x * x * x, 0.0, 5.0, 10.0, &BisectSettings::default()).unwrap();
/// assert!((r.x - 10f64.cbrt()).abs() < 1e-9);
/// ```
pub fn numeric_inverse<T: FloatScalar>(
    mut f: impl FnMut(T) -> T,
    low: T,
    high: T,
    target: T,
    settings: &BisectSettings<T>,
) -> Result<RootResult<T>, OptimError> {
    assert!(low < high, "numeric_inverse requires low < high");
    let mut lo = low;
    let mut hi = high;
    let mut f_lo = f(lo) - target;
    let f_hi = f(hi) - target;
    let mut evals = 2usize;

    let exact = |x, fx| RootResult {
        x,
        fx,
        iterations: 0,
        evals: 2,
        converged: true,
    };
    if f_lo == T::zero() {
        return Ok(exact(lo, f_lo));
    }
    if f_hi == T::zero() {
        return Ok(exact(hi, f_hi));
    }
    if f_lo * f_hi > T::zero() {
        log::debug!("numeric_inverse: target not bracketed");
        return Err(OptimError::BracketInvalid);
    }

    let half = T::lit(0.5);
    for iter in 0..settings.max_iter {
        let mid = half * (lo + hi);
        let f_mid = f(mid) - target;
        evals += 1;
        if f_mid.abs() < settings.tol {
            return Ok(RootResult {
                x: mid,
                fx: f_mid,
                iterations: iter + 1,
                evals,
                converged: true,
            });
        }
        if f_lo * f_mid <= T::zero() {
            hi = mid;
        } else {
            lo = mid;
            f_lo = f_mid;
        }
    }

    let x = half * (lo + hi);
    let fx = f(x) - target;
    evals += 1;
    log::debug!(
        "numeric_inverse: budget of {} bisections exhausted, returning midpoint",
        settings.max_iter
    );
    Ok(RootResult {
        x,
        fx,
        iterations: settings.max_iter,
        evals,
        converged: false,
    })
}
