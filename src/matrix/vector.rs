//! Slice helpers for vectors stored as `Vec<T>` / `&[T]`.
//!
//! Every helper requires operands of equal length and panics otherwise.

use alloc::vec::Vec;

use crate::traits::{FloatScalar, Scalar};

#[inline]
fn check_len(a: usize, b: usize, op: &str) {
    assert_eq!(a, b, "length mismatch in {}: {} vs {}", op, a, b);
}

/// Dot product `a · b`.
///
/// ```
/// use formulary::matrix::vector::dot;
/// assert_eq!(dot(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]), 32.0);
/// ```
pub fn dot<T: Scalar>(a: &[T], b: &[T]) -> T {
    check_len(a.len(), b.len(), "dot");
    a.iter().zip(b.iter()).fold(T::zero(), |acc, (&x, &y)| acc + x * y)
}

/// Squared L2 norm.
pub fn norm_squared<T: Scalar>(a: &[T]) -> T {
    dot(a, a)
}

/// L2 (Euclidean) norm.
///
/// ```
/// use formulary::matrix::vector::norm;
/// assert!((norm(&[3.0_f64, 4.0]) - 5.0).abs() < 1e-12);
/// ```
pub fn norm<T: FloatScalar>(a: &[T]) -> T {
    norm_squared(a).sqrt()
}

/// Max (infinity) norm.
pub fn norm_inf<T: FloatScalar>(a: &[T]) -> T {
    a.iter().fold(T::zero(), |m, &x| m.max(x.abs()))
}

/// `x + alpha * y`.
pub fn axpy<T: Scalar>(x: &[T], alpha: T, y: &[T]) -> Vec<T> {
    check_len(x.len(), y.len(), "axpy");
    x.iter().zip(y.iter()).map(|(&a, &b)| a + alpha * b).collect()
}

/// `a - b`.
pub fn sub<T: Scalar>(a: &[T], b: &[T]) -> Vec<T> {
    check_len(a.len(), b.len(), "sub");
    a.iter().zip(b.iter()).map(|(&x, &y)| x - y).collect()
}

/// `alpha * a`.
pub fn scale<T: Scalar>(a: &[T], alpha: T) -> Vec<T> {
    a.iter().map(|&x| alpha * x).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn norms() {
        let v = [3.0_f64, -4.0];
        assert_eq!(norm_squared(&v), 25.0);
        assert!((norm(&v) - 5.0).abs() < 1e-12);
        assert_eq!(norm_inf(&v), 4.0);
    }

    #[test]
    fn axpy_sub_scale() {
        let x = [1.0, 2.0];
        let y = [10.0, 20.0];
        assert_eq!(axpy(&x, 0.5, &y), vec![6.0, 12.0]);
        assert_eq!(sub(&y, &x), vec![9.0, 18.0]);
        assert_eq!(scale(&x, -2.0), vec![-2.0, -4.0]);
    }

    #[test]
    #[should_panic(expected = "length mismatch in dot")]
    fn dot_length_mismatch() {
        let _ = dot(&[1.0, 2.0], &[1.0]);
    }
}
