//! Line and flux integrals of vector fields.

use crate::traits::FloatScalar;

use super::quad::{simpson, simpson_2d};

/// Step for the central-difference tangent `r′(t)` and surface slopes.
const TANGENT_STEP: f64 = 1e-6;

/// Line integral `∫_C F·dr` along the parametric curve `r(t)`, `t ∈ [a, b]`.
///
/// The integrand `F(r(t))·r′(t)` is integrated by composite Simpson on `n`
/// panels, with `r′` taken by central differences. Works in any dimension.
///
/// # Panics
///
/// Panics if `n` is zero or odd.
///
/// # Example
///
/// ```
/// use formulary::calculus::line_integral;
///
/// // Circulation of (−y, x) around the unit circle is 2π
/// let w = line_integral(
///     |[x, y]: [f64; 2]| [-y, x],
///     |t: f64| [t.cos(), t.sin()],
///     [0.0, core::f64::consts::TAU],
///     100,
/// );
/// assert!((w - core::f64::consts::TAU).abs() < 1e-8);
/// ```
pub fn line_integral<T: FloatScalar, const N: usize>(
    mut field: impl FnMut([T; N]) -> [T; N],
    mut curve: impl FnMut(T) -> [T; N],
    t_range: [T; 2],
    n: usize,
) -> T {
    let h = T::lit(TANGENT_STEP);
    let [a, b] = t_range;
    simpson(
        |t| {
            let v = field(curve(t));
            let ahead = curve(t + h);
            let behind = curve(t - h);
            (0..N).fold(T::zero(), |acc, i| {
                acc + v[i] * (ahead[i] - behind[i]) / (h + h)
            })
        },
        a,
        b,
        n,
    )
}

/// Upward flux `∬_S F·n dS` of `F = (P, Q, R)` through the graph
/// `z = g(x, y)` over `[ax, bx] × [ay, by]`.
///
/// Uses `n dS = (−g_x, −g_y, 1) dx dy` with central-difference slopes, and
/// the tensor-product Simpson rule on `m × n` panels.
///
/// # Panics
///
/// Panics if `m` or `n` is zero or odd.
///
/// # Example
///
/// ```
/// use formulary::calculus::surface_flux;
///
/// // (0, 0, 1) through any graph: the projected area
/// let q = surface_flux(
///     |_p: [f64; 3]| [0.0, 0.0, 1.0],
///     |x: f64, y: f64| x * x + y.sin(),
///     [0.0, 1.0],
///     [0.0, 2.0],
///     4,
///     4,
/// );
/// assert!((q - 2.0).abs() < 1e-12);
/// ```
pub fn surface_flux<T: FloatScalar>(
    mut field: impl FnMut([T; 3]) -> [T; 3],
    mut surface: impl FnMut(T, T) -> T,
    x_range: [T; 2],
    y_range: [T; 2],
    m: usize,
    n: usize,
) -> T {
    let h = T::lit(TANGENT_STEP);
    simpson_2d(
        |x, y| {
            let gx = (surface(x + h, y) - surface(x - h, y)) / (h + h);
            let gy = (surface(x, y + h) - surface(x, y - h)) / (h + h);
            let [p, q, r] = field([x, y, surface(x, y)]);
            r - p * gx - q * gy
        },
        x_range,
        y_range,
        m,
        n,
    )
}
