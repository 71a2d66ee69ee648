use crate::traits::FloatScalar;

/// Composite trapezoidal rule on `n` uniform panels.
///
/// Endpoints get weight ½ and interior nodes weight 1. `b < a` yields the
/// negated integral.
///
/// # Panics
///
/// Panics if `n == 0`.
///
/// ```
/// use formulary::calculus::trapezoid;
/// let i = trapezoid(f64::sin, 0.0, core::f64::consts::PI, 100_000);
/// assert!((i - 2.0).abs() < 1e-3);
/// ```
pub fn trapezoid<T: FloatScalar>(mut f: impl FnMut(T) -> T, a: T, b: T, n: usize) -> T {
    assert!(n > 0, "trapezoidal rule requires at least one panel");
    let h = (b - a) / T::from_usize(n);
    let mut s = T::lit(0.5) * (f(a) + f(b));
    for i in 1..n {
        s = s + f(a + T::from_usize(i) * h);
    }
    s * h
}

/// Composite Simpson 1/3 rule on `n` uniform panels.
///
/// Exact for cubics.
///
/// # Panics
///
/// Panics if `n` is zero or odd.
///
/// ```
/// use formulary::calculus::simpson;
/// let i = simpson(|x: f64| x * x * x, 0.0, 2.0, 2);
/// assert!((i - 4.0).abs() < 1e-12);
/// ```
pub fn simpson<T: FloatScalar>(mut f: impl FnMut(T) -> T, a: T, b: T, n: usize) -> T {
    assert!(
        n > 0 && n % 2 == 0,
        "Simpson's rule requires a positive even panel count, got {}",
        n
    );
    let h = (b - a) / T::from_usize(n);
    let two = T::lit(2.0);
    let four = T::lit(4.0);
    let mut s = f(a) + f(b);
    for i in 1..n {
        let w = if i % 2 == 1 { four } else { two };
        s = s + w * f(a + T::from_usize(i) * h);
    }
    s * h / T::lit(3.0)
}

/// Composite Boole rule on `m` uniform panels, grouped four at a time.
///
/// Each group of five nodes uses weights `2h/45 · (7, 32, 12, 32, 7)`.
/// Exact for polynomials up to degree five.
///
/// # Panics
///
/// Panics unless `m` is a positive multiple of four.
///
/// ```
/// use formulary::calculus::boole;
/// let i = boole(|x: f64| x.powi(5), 0.0, 1.0, 4);
/// assert!((i - 1.0 / 6.0).abs() < 1e-12);
/// ```
pub fn boole<T: FloatScalar>(mut f: impl FnMut(T) -> T, a: T, b: T, m: usize) -> T {
    assert!(
        m > 0 && m % 4 == 0,
        "Boole's rule requires a positive multiple of four panels, got {}",
        m
    );
    let h = (b - a) / T::from_usize(m);
    let w_end = T::lit(7.0);
    let w_odd = T::lit(32.0);
    let w_mid = T::lit(12.0);
    let mut s = T::zero();
    for g in (0..m).step_by(4) {
        let x0 = a + T::from_usize(g) * h;
        let node = |k: usize| x0 + T::from_usize(k) * h;
        s = s + w_end * f(node(0))
            + w_odd * f(node(1))
            + w_mid * f(node(2))
            + w_odd * f(node(3))
            + w_end * f(node(4));
    }
    s * T::lit(2.0) * h / T::lit(45.0)
}

/// Tensor-product Simpson rule over the rectangle `[ax, bx] × [ay, by]`.
///
/// `m` and `n` are the panel counts along x and y.
///
/// # Panics
///
/// Panics if `m` or `n` is zero or odd.
///
/// ```
/// use formulary::calculus::simpson_2d;
/// // ∫₀¹∫₀² x·y² dy dx = 1/2 · 8/3
/// let i = simpson_2d(|x: f64, y: f64| x * y * y, [0.0, 1.0], [0.0, 2.0], 2, 2);
/// assert!((i - 4.0 / 3.0).abs() < 1e-12);
/// ```
pub fn simpson_2d<T: FloatScalar>(
    mut f: impl FnMut(T, T) -> T,
    x_range: [T; 2],
    y_range: [T; 2],
    m: usize,
    n: usize,
) -> T {
    assert!(
        m > 0 && n > 0 && m % 2 == 0 && n % 2 == 0,
        "2D Simpson's rule requires positive even panel counts, got {}x{}",
        m,
        n
    );
    let [ax, bx] = x_range;
    let [ay, by] = y_range;
    let hx = (bx - ax) / T::from_usize(m);
    let hy = (by - ay) / T::from_usize(n);
    let weight = |i: usize, last: usize| {
        if i == 0 || i == last {
            T::one()
        } else if i % 2 == 1 {
            T::lit(4.0)
        } else {
            T::lit(2.0)
        }
    };

    let mut s = T::zero();
    for i in 0..=m {
        let x = ax + T::from_usize(i) * hx;
        let wx = weight(i, m);
        for j in 0..=n {
            let y = ay + T::from_usize(j) * hy;
            s = s + wx * weight(j, n) * f(x, y);
        }
    }
    s * hx * hy / T::lit(9.0)
}
