//! Differential operators on scalar and vector fields in R³.

use crate::traits::FloatScalar;

const FIELD_STEP: f64 = 1e-5;

/// Shift `p` by `h` along `axis`.
#[inline]
fn shifted<T: FloatScalar>(p: [T; 3], axis: usize, h: T) -> [T; 3] {
    let mut q = p;
    q[axis] = q[axis] + h;
    q
}

/// Central difference of component `comp` of `field` along `axis`.
#[inline]
fn partial<T: FloatScalar>(
    field: &mut impl FnMut([T; 3]) -> [T; 3],
    p: [T; 3],
    comp: usize,
    axis: usize,
    h: T,
) -> T {
    (field(shifted(p, axis, h))[comp] - field(shifted(p, axis, -h))[comp]) / (h + h)
}

/// Gradient `∇f` of a scalar field at `p`.
///
/// ```
/// use formulary::calculus::grad3;
/// let g = grad3(|[x, y, z]: [f64; 3]| x * y + z * z, [1.0, 2.0, 3.0]);
/// assert!((g[0] - 2.0).abs() < 1e-8);
/// assert!((g[1] - 1.0).abs() < 1e-8);
/// assert!((g[2] - 6.0).abs() < 1e-8);
/// ```
pub fn grad3<T: FloatScalar>(mut f: impl FnMut([T; 3]) -> T, p: [T; 3]) -> [T; 3] {
    let h = T::lit(FIELD_STEP);
    let mut g = [T::zero(); 3];
    for (axis, gi) in g.iter_mut().enumerate() {
        *gi = (f(shifted(p, axis, h)) - f(shifted(p, axis, -h))) / (h + h);
    }
    g
}

/// Divergence `∇·F` of a vector field at `p`.
pub fn divergence<T: FloatScalar>(mut field: impl FnMut([T; 3]) -> [T; 3], p: [T; 3]) -> T {
    let h = T::lit(FIELD_STEP);
    (0..3).fold(T::zero(), |acc, axis| acc + partial(&mut field, p, axis, axis, h))
}

/// Curl `∇×F` of a vector field at `p`.
///
/// ```
/// use formulary::calculus::curl;
/// // Rigid rotation about z: F = (−y, x, 0), ∇×F = (0, 0, 2)
/// let c = curl(|[x, y, _z]: [f64; 3]| [-y, x, 0.0], [0.3, -0.2, 1.0]);
/// assert!(c[0].abs() < 1e-8);
/// assert!(c[1].abs() < 1e-8);
/// assert!((c[2] - 2.0).abs() < 1e-8);
/// ```
pub fn curl<T: FloatScalar>(mut field: impl FnMut([T; 3]) -> [T; 3], p: [T; 3]) -> [T; 3] {
    let h = T::lit(FIELD_STEP);
    let mut d = |comp, axis| partial(&mut field, p, comp, axis, h);
    let dfz_dy = d(2, 1);
    let dfy_dz = d(1, 2);
    let dfx_dz = d(0, 2);
    let dfz_dx = d(2, 0);
    let dfy_dx = d(1, 0);
    let dfx_dy = d(0, 1);
    [dfz_dy - dfy_dz, dfx_dz - dfz_dx, dfy_dx - dfx_dy]
}
