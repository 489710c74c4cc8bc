//! Vector types for cloth physics.

use crate::float::Float;
use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Length below which a vector is treated as having no direction.
pub(crate) fn direction_epsilon<F: Float>() -> F {
    F::from_f32(1e-10)
}

// --------------------------------------------------------------------------
// Vec3<F>: 3D vector
// --------------------------------------------------------------------------

/// 3D vector used for positions, velocities and forces.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec3<F: Float> {
    pub x: F,
    pub y: F,
    pub z: F,
}

impl<F: Float> Vec3<F> {
    /// Create a new 3D vector.
    pub fn new(x: F, y: F, z: F) -> Self { Vec3 { x, y, z } }

    /// Zero vector.
    pub fn zero() -> Self { Vec3 { x: F::zero(), y: F::zero(), z: F::zero() } }

    /// Build from `f32` components (constants and defaults).
    pub fn from_f32(x: f32, y: f32, z: f32) -> Self {
        Vec3 { x: F::from_f32(x), y: F::from_f32(y), z: F::from_f32(z) }
    }

    pub fn dot(self, other: Self) -> F {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// 3D cross product.
    pub fn cross(self, other: Self) -> Self {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn scale(self, s: F) -> Self {
        Vec3 { x: self.x * s, y: self.y * s, z: self.z * s }
    }

    pub fn length_sq(self) -> F {
        self.dot(self)
    }

    pub fn length(self) -> F {
        self.length_sq().sqrt()
    }

    /// Normalize to unit length. Returns the zero vector if the length is near zero.
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len.is_near_zero(direction_epsilon()) {
            Self::zero()
        } else {
            self.scale(F::one() / len)
        }
    }

    /// Distance between two points.
    pub fn distance(self, other: Self) -> F {
        (self - other).length()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Exact-equality key for position deduplication.
    pub(crate) fn key(self) -> [u64; 3] {
        [self.x.key_bits(), self.y.key_bits(), self.z.key_bits()]
    }
}

impl<F: Float> Add for Vec3<F> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Vec3 { x: self.x + rhs.x, y: self.y + rhs.y, z: self.z + rhs.z }
    }
}

impl<F: Float> Sub for Vec3<F> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Vec3 { x: self.x - rhs.x, y: self.y - rhs.y, z: self.z - rhs.z }
    }
}

impl<F: Float> Neg for Vec3<F> {
    type Output = Self;
    fn neg(self) -> Self { Vec3 { x: -self.x, y: -self.y, z: -self.z } }
}

impl<F: Float> AddAssign for Vec3<F> {
    fn add_assign(&mut self, rhs: Self) { *self = *self + rhs; }
}

impl<F: Float> SubAssign for Vec3<F> {
    fn sub_assign(&mut self, rhs: Self) { *self = *self - rhs; }
}

// --------------------------------------------------------------------------
// Vec2<F>: texture coordinates
// --------------------------------------------------------------------------

/// 2D vector, used for per-vertex texture coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec2<F: Float> {
    pub x: F,
    pub y: F,
}

impl<F: Float> Vec2<F> {
    pub fn new(x: F, y: F) -> Self { Vec2 { x, y } }

    pub fn zero() -> Self { Vec2 { x: F::zero(), y: F::zero() } }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec3_length() {
        let v = Vec3::new(2.0f32, 3.0, 6.0);
        assert!((v.length() - 7.0).abs() < 1e-6);
    }

    #[test]
    fn vec3_cross() {
        let i = Vec3::new(1.0f32, 0.0, 0.0);
        let j = Vec3::new(0.0f32, 1.0, 0.0);
        let k = i.cross(j);
        assert!((k.x - 0.0).abs() < 1e-6);
        assert!((k.y - 0.0).abs() < 1e-6);
        assert!((k.z - 1.0).abs() < 1e-6);
    }

    #[test]
    fn normalize_zero_vector() {
        let n = Vec3::<f32>::zero().normalize();
        assert_eq!(n, Vec3::zero());
    }

    #[test]
    fn add_assign_accumulates() {
        let mut f = Vec3::new(1.0f64, 2.0, 3.0);
        f += Vec3::new(0.5, 0.5, 0.5);
        f -= Vec3::new(1.0, 1.0, 1.0);
        assert_eq!(f, Vec3::new(0.5, 1.5, 2.5));
    }

    #[test]
    fn negative_zero_shares_key() {
        let a = Vec3::new(0.0f32, 1.0, -0.0);
        let b = Vec3::new(-0.0f32, 1.0, 0.0);
        assert_eq!(a.key(), b.key());
    }
}
