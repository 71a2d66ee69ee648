//! Closed-form solutions of linear ODEs.

use crate::calculus::simpson;
use crate::traits::FloatScalar;

/// Panels used for the integrating-factor quadratures.
const FACTOR_PANELS: usize = 200;

/// Solution of `y' + p(x)·y = q(x)`, `y(x0) = y0`, by integrating factor.
///
/// With `μ(x) = exp(∫_{x0}^{x} p)`, the solution is
/// `y(x) = (y0 + ∫_{x0}^{x} μ(t)·q(t) dt) / μ(x)`. Both integrals use composite
/// Simpson with 200 panels, so each evaluation costs about 40 000 calls to `p`.
///
/// ```
/// use formulary::ode::linear_first_order;
///
/// // y' + y = 1, y(0) = 0  →  y = 1 − e^{−x}
/// let y = linear_first_order(|_| 1.0, |_| 1.0, 0.0, 0.0);
/// assert!((y(2.0) - (1.0 - (-2.0f64).exp())).abs() < 1e-8);
/// ```
pub fn linear_first_order<T: FloatScalar>(
    p: impl Fn(T) -> T,
    q: impl Fn(T) -> T,
    x0: T,
    y0: T,
) -> impl Fn(T) -> T {
    move |x| {
        let mu = |t: T| simpson(&p, x0, t, FACTOR_PANELS).exp();
        let forced = simpson(|t| mu(t) * q(t), x0, x, FACTOR_PANELS);
        (y0 + forced) / mu(x)
    }
}

/// Roots of the characteristic polynomial `r² + a·r + b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CharacteristicRoots<T> {
    /// Two distinct real roots, `r1 < r2`.
    Distinct { r1: T, r2: T },
    /// One double root.
    Repeated { r: T },
    /// Complex pair `re ± i·im`.
    Complex { re: T, im: T },
}

/// Solution of `y'' + a·y' + b·y = 0` with `y(0) = y0`, `y'(0) = dy0`.
///
/// | Roots      | `y(x)`                                   |
/// |------------|------------------------------------------|
/// | distinct   | `c1·e^{r1 x} + c2·e^{r2 x}`              |
/// | repeated   | `(c1 + c2·x)·e^{r x}`                    |
/// | complex    | `e^{re x}·(c1·cos(im x) + c2·sin(im x))` |
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SecondOrderSolution<T> {
    roots: CharacteristicRoots<T>,
    c1: T,
    c2: T,
}

impl<T: FloatScalar> SecondOrderSolution<T> {
    /// Fit the constants to the initial conditions.
    ///
    /// The repeated-root case is taken only when `a² − 4b` is exactly zero.
    pub fn new(a: T, b: T, y0: T, dy0: T) -> Self {
        let half = T::lit(0.5);
        let disc = a * a - T::lit(4.0) * b;
        if disc > T::zero() {
            let sq = disc.sqrt();
            let r1 = half * (-a - sq);
            let r2 = half * (-a + sq);
            let c2 = (dy0 - r1 * y0) / (r2 - r1);
            Self {
                roots: CharacteristicRoots::Distinct { r1, r2 },
                c1: y0 - c2,
                c2,
            }
        } else if disc == T::zero() {
            let r = -half * a;
            Self {
                roots: CharacteristicRoots::Repeated { r },
                c1: y0,
                c2: dy0 - r * y0,
            }
        } else {
            let re = -half * a;
            let im = half * (-disc).sqrt();
            Self {
                roots: CharacteristicRoots::Complex { re, im },
                c1: y0,
                c2: (dy0 - re * y0) / im,
            }
        }
    }

    /// Characteristic roots.
    pub fn roots(&self) -> CharacteristicRoots<T> {
        self.roots
    }

    /// Evaluate `y(x)`.
    pub fn eval(&self, x: T) -> T {
        match self.roots {
            CharacteristicRoots::Distinct { r1, r2 } => {
                self.c1 * (r1 * x).exp() + self.c2 * (r2 * x).exp()
            }
            CharacteristicRoots::Repeated { r } => (self.c1 + self.c2 * x) * (r * x).exp(),
            CharacteristicRoots::Complex { re, im } => {
                (re * x).exp() * (self.c1 * (im * x).cos() + self.c2 * (im * x).sin())
            }
        }
    }

    /// Consume into an evaluator closure.
    pub fn into_fn(self) -> impl Fn(T) -> T {
        move |x| self.eval(x)
    }
}

/// Solution of `y'' + a·y' + b·y = 0`, `y(0) = y0`, `y'(0) = dy0`, as a closure.
///
/// See [`SecondOrderSolution`] for the three root cases.
///
/// ```
/// use formulary::ode::second_order_constant;
///
/// // y'' + y = 0, y(0) = 0, y'(0) = 1  →  sin x
/// let y = second_order_constant(0.0, 1.0, 0.0, 1.0);
/// assert!((y(1.2) - 1.2f64.sin()).abs() < 1e-14);
/// ```
pub fn second_order_constant<T: FloatScalar>(a: T, b: T, y0: T, dy0: T) -> impl Fn(T) -> T {
    SecondOrderSolution::new(a, b, y0, dy0).into_fn()
}
