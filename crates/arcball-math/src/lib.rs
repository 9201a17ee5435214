//! arcball-math: small linear algebra value types
//!
//! Everything here is a plain `Copy` value with `f32` components:
//! - [`Vector2`] / [`Vector3`] with the usual arithmetic operators
//! - [`Matrix3`] for rotations, built with [`rotation_matrix3`]
//! - [`Matrix4`] homogeneous transforms
//!
//! Matrices are stored row-major and addressed as `m[(row, col)]`.
//! Vectors are treated as columns, so `m * v` transforms `v`.

mod matrix3;
mod matrix4;
mod vector2;
mod vector3;

pub use matrix3::{rotation_matrix3, Matrix3};
pub use matrix4::Matrix4;
pub use vector2::Vector2;
pub use vector3::Vector3;

/// A point in screen space
pub type Point2 = Vector2;

/// A point in 3D space
pub type Point3 = Vector3;
