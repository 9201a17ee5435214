//! 3x3 matrix, mostly used as a rotation

use super::Vector3;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut, Mul};

/// A row-major 3x3 matrix
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix3 {
    pub rows: [[f32; 3]; 3],
}

impl Matrix3 {
    /// All entries zero
    pub fn zero() -> Self {
        Self { rows: [[0.0; 3]; 3] }
    }

    /// Ones on the diagonal
    pub fn identity() -> Self {
        Self {
            rows: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    pub fn from_rows(rows: [[f32; 3]; 3]) -> Self {
        Self { rows }
    }

    /// Rotation by `angle` radians about `axis`. See [`rotation_matrix3`].
    pub fn rotation(axis: Vector3, angle: f32) -> Self {
        rotation_matrix3(axis, angle)
    }

    pub fn row(&self, r: usize) -> Vector3 {
        Vector3::from(self.rows[r])
    }

    pub fn col(&self, c: usize) -> Vector3 {
        Vector3::new(self.rows[0][c], self.rows[1][c], self.rows[2][c])
    }

    pub fn transpose(&self) -> Self {
        let mut out = Self::zero();
        for r in 0..3 {
            for c in 0..3 {
                out.rows[c][r] = self.rows[r][c];
            }
        }
        out
    }

    /// Entrywise comparison within `epsilon`
    pub fn approx_eq(&self, other: &Matrix3, epsilon: f32) -> bool {
        self.rows
            .iter()
            .flatten()
            .zip(other.rows.iter().flatten())
            .all(|(a, b)| (a - b).abs() <= epsilon)
    }

    pub fn is_finite(&self) -> bool {
        self.rows.iter().flatten().all(|v| v.is_finite())
    }
}

impl Default for Matrix3 {
    fn default() -> Self {
        Self::identity()
    }
}

/// Build the matrix rotating by `angle` radians about `axis` (Rodrigues):
///
/// `R = I cos(a) + sin(a) [axis]x + (1 - cos(a)) axis (x) axis`
///
/// `axis` must already be unit length. A longer or shorter axis is not
/// rejected, it just produces a matrix that scales as well as rotates.
pub fn rotation_matrix3(axis: Vector3, angle: f32) -> Matrix3 {
    let (s, c) = angle.sin_cos();
    let t = 1.0 - c;
    let Vector3 { x, y, z } = axis;

    Matrix3::from_rows([
        [c + t * x * x, t * x * y - s * z, t * x * z + s * y],
        [t * y * x + s * z, c + t * y * y, t * y * z - s * x],
        [t * z * x - s * y, t * z * y + s * x, c + t * z * z],
    ])
}

impl Index<(usize, usize)> for Matrix3 {
    type Output = f32;

    fn index(&self, (r, c): (usize, usize)) -> &Self::Output {
        &self.rows[r][c]
    }
}

impl IndexMut<(usize, usize)> for Matrix3 {
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut Self::Output {
        &mut self.rows[r][c]
    }
}

impl Mul<Vector3> for Matrix3 {
    type Output = Vector3;

    fn mul(self, rhs: Vector3) -> Self::Output {
        Vector3::new(
            self.row(0).dot(&rhs),
            self.row(1).dot(&rhs),
            self.row(2).dot(&rhs),
        )
    }
}

impl Mul for Matrix3 {
    type Output = Matrix3;

    fn mul(self, rhs: Self) -> Self::Output {
        let mut out = Matrix3::zero();
        for r in 0..3 {
            for c in 0..3 {
                out.rows[r][c] = self.row(r).dot(&rhs.col(c));
            }
        }
        out
    }
}
