//! Floating-point abstraction trait for generic numeric operations.

use core::cmp::PartialOrd;
use core::fmt::{Debug, Display};
use core::ops::{Add, Div, Mul, Neg, Sub};
use core::str::FromStr;

/// Trait abstracting the floating-point operations the cloth solver needs.
///
/// Implemented for `f32` and `f64`. `Display` and `FromStr` are required so
/// meshes can be exported to and re-read from text.
pub trait Float:
    Copy
    + Clone
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Default
    + Debug
    + Display
    + FromStr
{
    /// The additive identity (0.0).
    fn zero() -> Self;
    /// The multiplicative identity (1.0).
    fn one() -> Self;
    /// Square root.
    fn sqrt(self) -> Self;
    /// Absolute value.
    fn abs(self) -> Self;
    /// Minimum of two values.
    fn min(self, other: Self) -> Self;
    /// Maximum of two values.
    fn max(self, other: Self) -> Self;
    /// Convert from f32 (for constants and configuration).
    fn from_f32(v: f32) -> Self;
    /// True unless NaN or infinite.
    fn is_finite(self) -> bool;
    /// Bit pattern used as an exact-equality key. Both zeroes map to the same key.
    fn key_bits(self) -> u64;

    /// Check if approximately zero within epsilon.
    fn is_near_zero(self, epsilon: Self) -> bool {
        self.abs() < epsilon
    }
}

impl Float for f32 {
    fn zero() -> Self { 0.0 }
    fn one() -> Self { 1.0 }
    fn sqrt(self) -> Self { libm::sqrtf(self) }
    fn abs(self) -> Self { libm::fabsf(self) }
    fn min(self, other: Self) -> Self { if self < other { self } else { other } }
    fn max(self, other: Self) -> Self { if self > other { self } else { other } }
    fn from_f32(v: f32) -> Self { v }
    fn is_finite(self) -> bool { f32::is_finite(self) }
    fn key_bits(self) -> u64 {
        if self == 0.0 { 0 } else { self.to_bits() as u64 }
    }
}

impl Float for f64 {
    fn zero() -> Self { 0.0 }
    fn one() -> Self { 1.0 }
    fn sqrt(self) -> Self { libm::sqrt(self) }
    fn abs(self) -> Self { libm::fabs(self) }
    fn min(self, other: Self) -> Self { if self < other { self } else { other } }
    fn max(self, other: Self) -> Self { if self > other { self } else { other } }
    fn from_f32(v: f32) -> Self { v as f64 }
    fn is_finite(self) -> bool { f64::is_finite(self) }
    fn key_bits(self) -> u64 {
        if self == 0.0 { 0 } else { self.to_bits() }
    }
}
