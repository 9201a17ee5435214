//! 3D vector for points, directions and rotation axes

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// A vector in 3D space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    /// Zero vector
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    /// Unit vector along +X
    pub const X: Self = Self {
        x: 1.0,
        y: 0.0,
        z: 0.0,
    };
    /// Unit vector along +Y
    pub const Y: Self = Self {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };
    /// Unit vector along +Z
    pub const Z: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };

    /// Create a new 3D vector
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Calculate the inner product with another vector
    pub fn dot(&self, other: &Vector3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Calculate the right-handed cross product with another vector
    pub fn cross(&self, other: &Vector3) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Euclidean length
    pub fn norm(&self) -> f32 {
        self.norm_squared().sqrt()
    }

    /// Squared length (avoids sqrt)
    pub fn norm_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Euclidean distance to another vector
    pub fn distance(&self, other: &Vector3) -> f32 {
        (*self - *other).norm()
    }

    /// Scale to unit length. The zero vector stays zero.
    pub fn normalize(&self) -> Self {
        let norm = self.norm();
        if norm > 0.0 {
            *self / norm
        } else {
            Self::ZERO
        }
    }

    pub fn as_array(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f32; 3]> for Vector3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<Vector3> for [f32; 3] {
    fn from(v: Vector3) -> Self {
        v.as_array()
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, rhs: Self) -> Self::Output {
        Vector3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, rhs: Self) -> Self::Output {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vector3 {
    type Output = Vector3;

    fn mul(self, rhs: f32) -> Self::Output {
        Vector3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<f32> for Vector3 {
    type Output = Vector3;

    fn div(self, rhs: f32) -> Self::Output {
        Vector3::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Neg for Vector3 {
    type Output = Vector3;

    fn neg(self) -> Self::Output {
        Vector3::new(-self.x, -self.y, -self.z)
    }
}

impl AddAssign for Vector3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Vector3 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign<f32> for Vector3 {
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}

impl DivAssign<f32> for Vector3 {
    fn div_assign(&mut self, rhs: f32) {
        *self = *self / rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_norm() {
        let v = Vector3::new(3.0, 4.0, 0.0);
        assert!((v.norm() - 5.0).abs() < 0.0001);
        assert_eq!(v.norm_squared(), 25.0);
    }

    #[test]
    fn test_norm_matches_distance_to_origin() {
        for v in [
            Vector3::new(1.0, 2.0, 3.0),
            Vector3::new(-0.5, 7.25, -3.0),
            Vector3::ZERO,
        ] {
            assert_eq!(v.norm(), v.distance(&Vector3::new(0.0, 0.0, 0.0)));
        }
    }

    #[test]
    fn test_normalize() {
        let n = Vector3::new(0.0, 0.0, -4.0).normalize();
        assert!((n.norm() - 1.0).abs() < 0.0001);
        assert_eq!(n.z, -1.0);
        assert_eq!(Vector3::ZERO.normalize(), Vector3::ZERO);
    }

    #[test]
    fn test_dot_product() {
        assert_eq!(Vector3::X.dot(&Vector3::Y), 0.0);
        assert_eq!(Vector3::new(1.0, 2.0, 3.0).dot(&Vector3::new(4.0, -5.0, 6.0)), 12.0);
    }

    #[test]
    fn test_cross_product() {
        // Right-handed: X x Y = Z
        assert_eq!(Vector3::X.cross(&Vector3::Y), Vector3::Z);
        assert_eq!(Vector3::Y.cross(&Vector3::Z), Vector3::X);
        assert_eq!(Vector3::Z.cross(&Vector3::X), Vector3::Y);
    }

    #[test]
    fn test_cross_is_perpendicular() {
        let pairs = [
            (Vector3::new(1.0, 2.0, 3.0), Vector3::new(-2.0, 0.5, 4.0)),
            (Vector3::new(0.3, -0.7, 0.1), Vector3::new(5.0, 1.0, -1.0)),
        ];
        for (a, b) in pairs {
            let c = a.cross(&b);
            assert!(c.dot(&a).abs() < 0.0001);
            assert!(c.dot(&b).abs() < 0.0001);
        }
    }

    #[test]
    fn test_cross_magnitude() {
        // |a x b| = |a||b| sin(theta), theta = 90 degrees here
        let a = Vector3::new(2.0, 0.0, 0.0);
        let b = Vector3::new(0.0, 0.0, 3.0);
        assert!((a.cross(&b).norm() - 6.0).abs() < 0.0001);
    }

    #[test]
    fn test_compound_assign() {
        let mut v = Vector3::new(1.0, 2.0, 3.0);
        v -= Vector3::new(1.0, 1.0, 1.0);
        v *= 3.0;
        v /= 1.5;
        v += Vector3::Z;
        assert_eq!(v, Vector3::new(0.0, 2.0, 5.0));
    }

    #[test]
    fn test_array_conversion() {
        let v = Vector3::from([1.0, -2.0, 0.5]);
        assert_eq!(v, Vector3::new(1.0, -2.0, 0.5));
        let arr: [f32; 3] = v.into();
        assert_eq!(arr, [1.0, -2.0, 0.5]);
    }
}
