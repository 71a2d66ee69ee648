use alloc::vec::Vec;

use crate::traits::FloatScalar;

/// Grid and final temperatures from [`heat_explicit`].
#[derive(Debug, Clone, PartialEq)]
pub struct HeatProfile<T> {
    /// Node positions `x_i = i·Δx`, `i = 0..nx`.
    pub x: Vec<T>,
    /// Temperature at each node after the last step.
    pub u: Vec<T>,
}

/// Explicit FTCS scheme for `u_t = κ·u_xx` on `[0, length]`.
///
/// The rod is split into `nx` nodes, `Δx = length / (nx − 1)`, and every step
/// applies `u_i ← u_i + r·(u_{i+1} − 2u_i + u_{i−1})` with `r = κ·Δt/Δx²`.
/// Both ends are held at zero from the first step on; with `steps == 0` the
/// sampled initial condition is returned untouched.
///
/// # Panics
///
/// Panics if `nx < 3` or if `r > 0.5`, where the scheme is unstable.
///
/// # Example
///
/// ```
/// use formulary::pde::heat_explicit;
///
/// let pi = core::f64::consts::PI;
/// let p = heat_explicit(1.0, 1.0, 51, 1e-4, 1000, |x: f64| (pi * x).sin());
/// let exact = (-pi * pi * 0.1).exp();
/// assert!((p.u[25] - exact).abs() < 1e-3);
/// ```
pub fn heat_explicit<T: FloatScalar>(
    length: T,
    kappa: T,
    nx: usize,
    dt: T,
    steps: usize,
    initial: impl FnMut(T) -> T,
) -> HeatProfile<T> {
    assert!(nx >= 3, "heat_explicit requires at least 3 nodes, got {}", nx);
    let dx = length / T::from_usize(nx - 1);
    let r = kappa * dt / (dx * dx);
    assert!(
        r <= T::lit(0.5),
        "unstable FTCS step: r = {:?} exceeds 0.5",
        r
    );
    log::trace!("heat_explicit: dx = {:?} r = {:?}", dx, r);

    let x: Vec<T> = (0..nx).map(|i| T::from_usize(i) * dx).collect();
    let mut u: Vec<T> = x.iter().copied().map(initial).collect();
    let mut next = u.clone();
    let two = T::lit(2.0);

    for _ in 0..steps {
        for i in 1..nx - 1 {
            next[i] = u[i] + r * (u[i + 1] - two * u[i] + u[i - 1]);
        }
        next[0] = T::zero();
        next[nx - 1] = T::zero();
        core::mem::swap(&mut u, &mut next);
    }

    HeatProfile { x, u }
}
