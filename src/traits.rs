use core::fmt::Debug;
use num_traits::{Float, Num, One, Zero};

/// Trait for types that can be used as matrix elements.
///
/// Blanket-implemented for all types satisfying the bounds.
/// Covers `f32`, `f64`, and all integer types.
pub trait Scalar: Copy + PartialEq + Debug + Zero + One + Num {}

impl<T: Copy + PartialEq + Debug + Zero + One + Num> Scalar for T {}

/// Trait for floating-point elements used by every numerical routine.
///
/// Required by operations that need `sqrt`, `sin`, `abs`, etc.
/// Implemented for `f32` and `f64`.
pub trait FloatScalar: Scalar + Float {
    /// Convert an algorithm constant written as `f64`.
    fn lit(x: f64) -> Self;

    /// Convert a count (panel number, series index, ...).
    fn from_usize(n: usize) -> Self;
}

macro_rules! impl_float_scalar {
    ($($t:ty),*) => {
        $(
            impl FloatScalar for $t {
                #[inline] fn lit(x: f64) -> $t { x as $t }
                #[inline] fn from_usize(n: usize) -> $t { n as $t }
            }
        )*
    };
}

impl_float_scalar!(f32, f64);
