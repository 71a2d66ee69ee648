use super::*;
use crate::Matrix;
use crate::matrix::vector::norm;
use alloc::vec;

const TOL: f64 = 1e-8;
const LOOSE_TOL: f64 = 1e-4;

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

// ═══════════════════════════════════════════════════════════════════
// Newton-Raphson
// ═══════════════════════════════════════════════════════════════════

#[test]
fn newton_sqrt2() {
    let r = newton_raphson(|x| x * x - 2.0, |x| 2.0 * x, 1.0, &RootSettings::default()).unwrap();
    assert_near(r.x, core::f64::consts::SQRT_2, TOL, "newton √2");
    assert!(r.converged);
    assert!(r.iterations <= 8, "quadratic convergence, got {}", r.iterations);
}

#[test]
fn newton_cubic() {
    // f(x) = x³ − x − 2, root near 1.5214
    let r = newton_raphson(
        |x: f64| x * x * x - x - 2.0,
        |x: f64| 3.0 * x * x - 1.0,
        2.0,
        &RootSettings::default(),
    )
    .unwrap();
    assert!(r.fx.abs() < 1e-9, "residual {}", r.fx);
}

#[test]
fn newton_constant_function() {
    let r = newton_raphson(|_| 5.0, |_| 0.0, 1.0, &RootSettings::default());
    assert_eq!(r.unwrap_err(), OptimError::ZeroDerivative);
}

#[test]
fn newton_numeric_constant_function() {
    let r = newton_raphson_numeric(|_: f64| 5.0, 1.0, &RootSettings::default());
    assert_eq!(r.unwrap_err(), OptimError::ZeroDerivative);
}

#[test]
fn newton_budget_exhausted() {
    // x² + 1 has no real root; the iterates wander without settling
    let settings = RootSettings {
        max_iter: 10,
        ..RootSettings::default()
    };
    let r = newton_raphson(|x: f64| x * x + 1.0, |x: f64| 2.0 * x, 0.5, &settings);
    assert_eq!(r.unwrap_err(), OptimError::MaxIterations);
}

#[test]
fn newton_numeric_matches_analytic() {
    let f = |x: f64| x.exp() - 3.0;
    let a = newton_raphson(f, f64::exp, 0.0, &RootSettings::default()).unwrap();
    let n = newton_raphson_numeric(f, 0.0, &RootSettings::default()).unwrap();
    assert_near(a.x, 3f64.ln(), TOL, "analytic");
    assert_near(n.x, 3f64.ln(), TOL, "numeric");
    // value + two-point difference per iteration, plus the final residual
    assert_eq!(n.evals, 3 * n.iterations + 1);
}

#[test]
fn newton_f32() {
    let r = newton_raphson(|x: f32| x * x - 2.0, |x: f32| 2.0 * x, 1.0f32, &RootSettings::default())
        .unwrap();
    assert!((r.x - core::f32::consts::SQRT_2).abs() < 1e-5);
}

// ═══════════════════════════════════════════════════════════════════
// Bisection inverse
// ═══════════════════════════════════════════════════════════════════

#[test]
fn inverse_of_exp() {
    let r = numeric_inverse(f64::exp, 0.0, 5.0, 10.0, &BisectSettings::default()).unwrap();
    assert_near(r.x, 10f64.ln(), 1e-9, "ln 10");
    assert!(r.converged);
    assert!(r.fx.abs() < 1e-9);
}

#[test]
fn inverse_decreasing_function() {
    let r = numeric_inverse(|x: f64| -x, -3.0, 3.0, 1.25, &BisectSettings::default()).unwrap();
    assert_near(r.x, -1.25, 1e-9, "−x");
}

#[test]
fn inverse_exact_endpoint() {
    let r = numeric_inverse(|x: f64| x * x, 2.0, 4.0, 4.0, &BisectSettings::default()).unwrap();
    assert_eq!(r.x, 2.0);
    assert_eq!(r.iterations, 0);
    let r = numeric_inverse(|x: f64| x * x, 0.0, 3.0, 9.0, &BisectSettings::default()).unwrap();
    assert_eq!(r.x, 3.0);
}

#[test]
fn inverse_target_out_of_range() {
    let r = numeric_inverse(|x: f64| x * x, 0.0, 2.0, 10.0, &BisectSettings::default());
    assert_eq!(r.unwrap_err(), OptimError::BracketInvalid);
}

#[test]
fn inverse_budget_exhausted_is_best_effort() {
    let settings = BisectSettings {
        tol: 1e-15,
        max_iter: 5,
    };
    let r = numeric_inverse(|x: f64| x, 0.0, 1.0, 0.3, &settings).unwrap();
    assert!(!r.converged);
    assert_eq!(r.iterations, 5);
    // bracket width after 5 halvings is 1/32
    assert!((r.x - 0.3).abs() <= 1.0 / 64.0);
}

#[test]
#[should_panic(expected = "low < high")]
fn inverse_reversed_bracket() {
    let _ = numeric_inverse(|x: f64| x, 1.0, 0.0, 0.5, &BisectSettings::default());
}

// ═══════════════════════════════════════════════════════════════════
// Nonlinear systems
// ═══════════════════════════════════════════════════════════════════

#[test]
fn newton_system_circle_line() {
    let x = newton_system(
        |v: &[f64]| vec![v[0] * v[0] + v[1] * v[1] - 4.0, v[0] - 2.0 * v[1]],
        &[1.0, 1.0],
        &NewtonSystemSettings::default(),
    )
    .unwrap();
    // x = 2y, 5y² = 4
    let y = (4.0f64 / 5.0).sqrt();
    assert_near(x[0], 2.0 * y, TOL, "x");
    assert_near(x[1], y, TOL, "y");
}

#[test]
fn newton_system_analytic_jacobian() {
    // F = (x0 + x1 − 3, x0·x1 − 2), roots (1, 2) and (2, 1)
    let x = newton_system_with_jacobian(
        |v: &[f64]| vec![v[0] + v[1] - 3.0, v[0] * v[1] - 2.0],
        |v: &[f64]| Matrix::from_rows(&[[1.0, 1.0], [v[1], v[0]]]),
        &[0.5, 2.5],
        &NewtonSystemSettings::default(),
    )
    .unwrap();
    assert_near(x[0], 1.0, TOL, "x0");
    assert_near(x[1], 2.0, TOL, "x1");
}

#[test]
fn newton_system_already_solved() {
    let mut calls = 0;
    let x = newton_system_with_jacobian(
        |v: &[f64]| vec![v[0] - 1.0],
        |_: &[f64]| {
            calls += 1;
            Matrix::eye(1)
        },
        &[1.0],
        &NewtonSystemSettings::default(),
    )
    .unwrap();
    assert_eq!(x, vec![1.0]);
    assert_eq!(calls, 0);
}

#[test]
fn newton_system_singular_jacobian() {
    // (x0 + x1, 2x0 + 2x1 − 1) has a rank-one Jacobian and no root
    let r = newton_system_with_jacobian(
        |v: &[f64]| vec![v[0] + v[1], 2.0 * v[0] + 2.0 * v[1] - 1.0],
        |_: &[f64]| Matrix::from_rows(&[[1.0, 1.0], [2.0, 2.0]]),
        &[0.0, 0.0],
        &NewtonSystemSettings::default(),
    );
    assert_eq!(r.unwrap_err(), OptimError::Singular);
}

#[test]
fn newton_system_budget_exhausted() {
    let settings = NewtonSystemSettings {
        max_iter: 2,
        ..NewtonSystemSettings::default()
    };
    let r = newton_system(|v: &[f64]| vec![v[0].exp() - 1e6], &[0.0], &settings);
    assert_eq!(r.unwrap_err(), OptimError::MaxIterations);
}

#[test]
fn linalg_error_converts() {
    let e: OptimError = crate::linalg::LinalgError::Singular.into();
    assert_eq!(e, OptimError::Singular);
}

// ═══════════════════════════════════════════════════════════════════
// Unconstrained minimization
// ═══════════════════════════════════════════════════════════════════

fn bowl(x: &[f64]) -> f64 {
    (x[0] - 3.0).powi(2) + 2.0 * (x[1] + 1.0).powi(2) + 0.5 * x[0] * x[1]
}

// ∇ = (2(x0−3) + x1/2, 4(x1+1) + x0/2) = 0
fn bowl_minimizer() -> [f64; 2] {
    let x0 = 104.0 / 31.0;
    let x1 = -1.0 - x0 / 8.0;
    [x0, x1]
}

#[test]
fn gradient_descent_bowl() {
    let r = gradient_descent(bowl, &[0.0, 0.0], &GradientDescentSettings::default());
    let m = bowl_minimizer();
    assert_eq!(r.termination, Termination::Converged);
    assert_near(r.x[0], m[0], LOOSE_TOL, "x0");
    assert_near(r.x[1], m[1], LOOSE_TOL, "x1");
    assert!(r.grad_norm < 1e-6);
    assert!(r.f_evals > r.iterations);
}

#[test]
fn gradient_descent_budget() {
    let settings = GradientDescentSettings {
        max_iter: 3,
        ..GradientDescentSettings::default()
    };
    let r = gradient_descent(bowl, &[0.0, 0.0], &settings);
    assert_eq!(r.termination, Termination::MaxIterations);
    assert_eq!(r.iterations, 3);
    assert!(r.fx < bowl(&[0.0, 0.0]));
}

#[test]
fn newton_minimizes_quadratic() {
    let r = minimize_newton(bowl, &[10.0, 10.0], &NewtonSettings::default());
    let m = bowl_minimizer();
    assert_eq!(r.termination, Termination::Converged);
    assert!(r.iterations <= 3, "iterations {}", r.iterations);
    assert_near(r.x[0], m[0], 1e-6, "x0");
    assert_near(r.x[1], m[1], 1e-6, "x1");
}

#[test]
fn newton_singular_hessian() {
    // Linear objective: the difference Hessian at the origin is exactly zero
    let r = minimize_newton(|x: &[f64]| x[0] + x[1], &[0.0, 0.0], &NewtonSettings::default());
    assert_eq!(r.termination, Termination::SingularSystem);
    assert_eq!(r.x, vec![0.0, 0.0]);
    assert_eq!(r.iterations, 0);
}

#[test]
fn lbfgs_sphere() {
    let r = lbfgs(
        |x: &[f64]| x.iter().map(|v| v * v).sum(),
        &[1.0, -2.0, 3.0, 0.5],
        &LbfgsSettings::default(),
    );
    assert_eq!(r.termination, Termination::Converged);
    for &xi in &r.x {
        assert!(xi.abs() < 1e-6, "{:?}", r.x);
    }
    assert!(r.fx < 1e-12);
}

#[test]
fn lbfgs_ill_conditioned_quadratic() {
    // Curvatures spread over three decades, minimum at (1, 1, 1, 1)
    let d = [1.0, 10.0, 100.0, 1000.0];
    let r = lbfgs(
        |x: &[f64]| {
            x.iter()
                .zip(d)
                .map(|(&xi, di)| 0.5 * di * (xi - 1.0) * (xi - 1.0))
                .sum()
        },
        &[0.0, 0.0, 0.0, 0.0],
        &LbfgsSettings::default(),
    );
    assert_eq!(r.termination, Termination::Converged);
    assert!(r.iterations < 100, "took {} iterations", r.iterations);
    for &xi in &r.x {
        assert_near(xi, 1.0, 1e-6, "coordinate");
    }
}

#[test]
fn lbfgs_sphere_from_scattered_starts() {
    let s = LbfgsSettings::default();
    for x0 in [[3.0, -4.0, 1.0], [-100.0, 0.5, 7.0], [0.0, 0.0, 1e-3]] {
        let r = lbfgs(|x: &[f64]| x.iter().map(|v| v * v).sum(), &x0, &s);
        assert_eq!(r.termination, Termination::Converged);
        assert!(norm(&r.x) < s.tol, "{:?} from {:?}", r.x, x0);
    }
}

#[test]
fn lbfgs_without_memory_is_steepest_descent() {
    let settings = LbfgsSettings {
        history: 0,
        ..LbfgsSettings::default()
    };
    let r = lbfgs(bowl, &[0.0, 0.0], &settings);
    let m = bowl_minimizer();
    assert_eq!(r.termination, Termination::Converged);
    assert_near(r.x[0], m[0], LOOSE_TOL, "x0");
}

#[test]
fn minimizers_agree() {
    let x0 = [0.5, 0.5];
    let gd = gradient_descent(bowl, &x0, &GradientDescentSettings::default());
    let nt = minimize_newton(bowl, &x0, &NewtonSettings::default());
    let lb = lbfgs(bowl, &x0, &LbfgsSettings::default());
    assert_near(gd.fx, nt.fx, 1e-9, "gd vs newton");
    assert_near(lb.fx, nt.fx, 1e-9, "lbfgs vs newton");
}

// ═══════════════════════════════════════════════════════════════════
// Equality-constrained Newton
// ═══════════════════════════════════════════════════════════════════

#[test]
fn kkt_projection_onto_line() {
    let a = Matrix::from_rows(&[[1.0, 1.0]]);
    let r = equality_constrained_newton(
        |x: &[f64]| (x[0] - 1.0).powi(2) + (x[1] - 2.0).powi(2),
        &a,
        &[1.0],
        &[0.0, 0.0],
        &[0.0],
        &KktSettings::default(),
    );
    assert_eq!(r.termination, Termination::Converged);
    assert_near(r.x[0], 0.0, 1e-6, "x0");
    assert_near(r.x[1], 1.0, 1e-6, "x1");
    assert_near(r.lambda[0], 2.0, 1e-6, "λ");
    assert_near(r.fx, 2.0, 1e-6, "f");
}

#[test]
fn kkt_two_constraints() {
    // min ‖x‖² s.t. x0 + x1 + x2 = 3, x0 − x2 = 0  →  x = (1, 1, 1)
    let a = Matrix::from_rows(&[[1.0, 1.0, 1.0], [1.0, 0.0, -1.0]]);
    let r = equality_constrained_newton(
        |x: &[f64]| x.iter().map(|v| v * v).sum(),
        &a,
        &[3.0, 0.0],
        &[1.5, 0.0, 1.5],
        &[0.0, 0.0],
        &KktSettings::default(),
    );
    assert_eq!(r.termination, Termination::Converged);
    for &xi in &r.x {
        assert_near(xi, 1.0, 1e-6, "x");
    }
    // constraint satisfied
    let ax = a.mul_vec(&r.x).unwrap();
    assert_near(ax[0], 3.0, 1e-9, "row 0");
    assert_near(ax[1], 0.0, 1e-9, "row 1");
}

#[test]
fn kkt_redundant_constraints_are_singular() {
    let a = Matrix::from_rows(&[[1.0, 1.0], [2.0, 2.0]]);
    let r = equality_constrained_newton(
        |x: &[f64]| x[0] * x[0] + x[1] * x[1],
        &a,
        &[1.0, 2.0],
        &[0.0, 0.0],
        &[0.0, 0.0],
        &KktSettings::default(),
    );
    assert_eq!(r.termination, Termination::SingularSystem);
    assert_eq!(r.x, vec![0.0, 0.0]);
}

#[test]
#[should_panic(expected = "one multiplier per constraint")]
fn kkt_multiplier_length_mismatch() {
    let a = Matrix::from_rows(&[[1.0, 1.0]]);
    let _ = equality_constrained_newton(
        |x: &[f64]| x[0] * x[0],
        &a,
        &[1.0],
        &[0.0, 0.0],
        &[0.0, 0.0],
        &KktSettings::default(),
    );
}
