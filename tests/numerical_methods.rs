use formulary::calculus::{adaptive_simpson, derivative, hessian, trapezoid, AdaptiveSimpsonSettings};
use formulary::linalg::{dominant_eigen, solve, LuDecomposition, PowerSettings};
use formulary::regression::least_squares;
use formulary::Matrix;

const TOL: f64 = 1e-9;

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

fn hilbert_like(n: usize) -> Matrix<f64> {
    Matrix::from_fn(n, n, |i, j| 1.0 / (i + j + 1) as f64 + if i == j { 1.0 } else { 0.0 })
}

// ── Linear algebra ──────────────────────────────────────────────────

#[test]
fn solve_reproduces_rhs() {
    let a = hilbert_like(6);
    let b: Vec<f64> = (0..6).map(|i| (i as f64).sin()).collect();
    let x = solve(&a, &b).unwrap();
    let ax = a.mul_vec(&x).unwrap();
    for i in 0..6 {
        assert_near(ax[i], b[i], TOL, "A·x = b");
    }
}

#[test]
fn lu_and_elimination_agree() {
    let a = hilbert_like(5);
    let b = [1.0, -2.0, 0.5, 3.0, -1.0];
    let lu = LuDecomposition::new(&a).unwrap();
    let x_lu = lu.solve(&b);
    let x_ge = solve(&a, &b).unwrap();
    for i in 0..5 {
        assert_near(x_lu[i], x_ge[i], TOL, "LU vs Gauss");
    }
    assert_near(lu.det(), formulary::linalg::det(&a), TOL, "determinant");

    let (l, u) = lu.into_factors();
    let prod = l.matmul(&u).unwrap();
    for i in 0..5 {
        for j in 0..5 {
            assert_near(prod[(i, j)], a[(i, j)], TOL, "L·U = A");
        }
    }
}

#[test]
fn power_iteration_dominant_pair() {
    // Eigenvalues 5 and 2
    let a = Matrix::from_rows(&[[4.0, 1.0], [2.0, 3.0]]);
    let eig = dominant_eigen(&a, &PowerSettings::default()).unwrap();
    assert_near(eig.value, 5.0, 1e-6, "λ₁");
    let s = eig.vector[0].signum();
    let inv = 1.0 / 2f64.sqrt();
    assert_near(s * eig.vector[0], inv, 1e-4, "v₀");
    assert_near(s * eig.vector[1], inv, 1e-4, "v₁");
}

// ── Calculus ────────────────────────────────────────────────────────

#[test]
fn derivative_and_trapezoid_reference_values() {
    assert_near(derivative(|x: f64| x * x, 3.0), 6.0, 1e-3, "d/dx x²");
    let i = trapezoid(f64::sin, 0.0, core::f64::consts::PI, 100_000);
    assert_near(i, 2.0, 1e-3, "∫ sin");
}

#[test]
fn adaptive_simpson_gaussian() {
    let s = AdaptiveSimpsonSettings {
        tol: 1e-10,
        ..AdaptiveSimpsonSettings::default()
    };
    let q = adaptive_simpson(|x: f64| (-x * x).exp(), -6.0, 6.0, &s);
    assert_near(q.value, core::f64::consts::PI.sqrt(), 1e-8, "Gaussian integral");
}

#[test]
fn hessian_is_symmetric() {
    let h = hessian(|x: &[f64]| x[0] * x[0] * x[1] + x[1].sin() * x[2], &[0.4, 1.1, -0.7]);
    for i in 0..3 {
        for j in 0..3 {
            assert_eq!(h[(i, j)], h[(j, i)]);
        }
    }
}

// ── Regression ──────────────────────────────────────────────────────

#[test]
fn least_squares_recovers_exact_plane() {
    let pts = [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (2.0, 1.0), (1.0, 3.0), (3.0, 2.0)];
    let x = Matrix::from_fn(pts.len(), 3, |i, j| match j {
        0 => 1.0,
        1 => pts[i].0,
        _ => pts[i].1,
    });
    let y: Vec<f64> = pts.iter().map(|&(a, b)| 0.5 - 1.5 * a + 2.0 * b).collect();
    let beta = least_squares(&x, &y).unwrap();
    assert_near(beta[0], 0.5, TOL, "β₀");
    assert_near(beta[1], -1.5, TOL, "β₁");
    assert_near(beta[2], 2.0, TOL, "β₂");
}

// ── Root finding and optimization ───────────────────────────────────

#[cfg(feature = "optim")]
mod optim {
    use super::*;
    use formulary::optim::{
        equality_constrained_newton, lbfgs, newton_raphson, newton_system, KktSettings,
        LbfgsSettings, NewtonSystemSettings, RootSettings, Termination,
    };

    #[test]
    fn newton_raphson_sqrt2() {
        let r = newton_raphson(|x: f64| x * x - 2.0, |x| 2.0 * x, 1.0, &RootSettings::default())
            .unwrap();
        assert!(r.converged);
        assert_near(r.x, 2f64.sqrt(), 1e-8, "√2");
    }

    #[test]
    fn lbfgs_sphere_from_any_start() {
        let s = LbfgsSettings::default();
        for x0 in [[3.0, -4.0, 1.0], [-100.0, 0.5, 7.0], [0.0, 0.0, 1e-3]] {
            let r = lbfgs(|x: &[f64]| x.iter().map(|v| v * v).sum(), &x0, &s);
            assert_eq!(r.termination, Termination::Converged);
            for &xi in &r.x {
                assert!(xi.abs() < 1e-4, "coordinate {} from {:?}", xi, x0);
            }
        }
    }

    #[test]
    fn newton_system_intersection() {
        // x² + y² = 4, x·y = 1
        let f = |v: &[f64]| vec![v[0] * v[0] + v[1] * v[1] - 4.0, v[0] * v[1] - 1.0];
        let x = newton_system(f, &[2.0, 0.5], &NewtonSystemSettings::default()).unwrap();
        let r = f(&x);
        assert_near(r[0], 0.0, 1e-6, "circle");
        assert_near(r[1], 0.0, 1e-6, "hyperbola");
    }

    #[test]
    fn kkt_projection_satisfies_constraint() {
        // Closest point to (3, 1, 2) on the plane x + y + z = 3
        let a = Matrix::from_rows(&[[1.0, 1.0, 1.0]]);
        let f = |x: &[f64]| (x[0] - 3.0).powi(2) + (x[1] - 1.0).powi(2) + (x[2] - 2.0).powi(2);
        let r = equality_constrained_newton(f, &a, &[3.0], &[1.0, 1.0, 1.0], &[0.0], &KktSettings::default());
        assert_eq!(r.termination, Termination::Converged);
        assert_near(r.x[0] + r.x[1] + r.x[2], 3.0, 1e-6, "constraint");
        assert_near(r.x[0], 2.0, 1e-4, "x");
        assert_near(r.x[1], 0.0, 1e-4, "y");
        assert_near(r.x[2], 1.0, 1e-4, "z");
    }
}

// ── ODE / PDE ───────────────────────────────────────────────────────

#[cfg(feature = "ode")]
mod ode {
    use super::*;
    use formulary::ode::{rk4_adaptive, second_order_constant, StepDoublingSettings};
    use formulary::pde::{heat_explicit, HeatSeries};

    #[test]
    fn adaptive_rk4_reaches_e() {
        let s = StepDoublingSettings::default();
        let sol = rk4_adaptive(|_t, y: f64| y, 0.0, 1.0, 0.1, 1.0, &s);
        assert!(sol.completed);
        assert_near(*sol.trajectory.last().unwrap().1, core::f64::consts::E, s.tol_abs, "y(1)");
    }

    #[test]
    fn damped_oscillator_closed_form_decays() {
        let y = second_order_constant(0.5, 4.0, 1.0, 0.0);
        assert_eq!(y(0.0), 1.0);
        assert!(y(20.0_f64).abs() < 1e-2);
    }

    #[test]
    fn ftcs_and_series_agree() {
        let pi = core::f64::consts::PI;
        let f0 = |x: f64| (pi * x).sin() + 0.3 * (3.0 * pi * x).sin();
        let p = heat_explicit(1.0, 1.0, 101, 2e-5, 2500, f0);
        let series = HeatSeries::new(1.0, 1.0, 10, f0);
        for i in (10..100).step_by(20) {
            assert_near(p.u[i], series.eval(p.x[i], 0.05), 2e-4, "FTCS vs series");
        }
    }
}
