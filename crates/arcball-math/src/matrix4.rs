//! 4x4 homogeneous transform

use super::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut, Mul};

/// A row-major 4x4 matrix
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix4 {
    pub rows: [[f32; 4]; 4],
}

impl Matrix4 {
    /// All entries zero
    pub fn zero() -> Self {
        Self { rows: [[0.0; 4]; 4] }
    }

    /// Ones on the diagonal
    pub fn identity() -> Self {
        let mut m = Self::zero();
        for i in 0..4 {
            m.rows[i][i] = 1.0;
        }
        m
    }

    pub fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        Self { rows }
    }

    /// Rotation `rot` followed by translation `t`, last row `(0, 0, 0, 1)`
    pub fn transform(rot: &Matrix3, t: Vector3) -> Self {
        let mut m = Self::identity();
        for r in 0..3 {
            m.rows[r][..3].copy_from_slice(&rot.rows[r]);
        }
        m.rows[0][3] = t.x;
        m.rows[1][3] = t.y;
        m.rows[2][3] = t.z;
        m
    }

    /// Pure translation
    pub fn translation(t: Vector3) -> Self {
        Self::transform(&Matrix3::identity(), t)
    }

    /// Entries narrowed from `f64`
    pub fn from_f64(rows: &[[f64; 4]; 4]) -> Self {
        let mut m = Self::zero();
        for (dst, src) in m.rows.iter_mut().zip(rows.iter()) {
            for (d, s) in dst.iter_mut().zip(src.iter()) {
                *d = *s as f32;
            }
        }
        m
    }

    /// Right-handed perspective projection with OpenGL depth range [-1, 1]
    /// (the `gluPerspective` matrix). `fov_y` is in radians.
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        let f = 1.0 / (fov_y / 2.0).tan();
        let nf = 1.0 / (near - far);
        Self::from_rows([
            [f / aspect, 0.0, 0.0, 0.0],
            [0.0, f, 0.0, 0.0],
            [0.0, 0.0, (far + near) * nf, 2.0 * far * near * nf],
            [0.0, 0.0, -1.0, 0.0],
        ])
    }

    /// Upper-left 3x3 block
    pub fn rotation_part(&self) -> Matrix3 {
        let mut m = Matrix3::zero();
        for r in 0..3 {
            m.rows[r].copy_from_slice(&self.rows[r][..3]);
        }
        m
    }

    /// Translation column
    pub fn translation_part(&self) -> Vector3 {
        Vector3::new(self.rows[0][3], self.rows[1][3], self.rows[2][3])
    }

    /// Entries widened to `f64`
    pub fn to_f64(&self) -> [[f64; 4]; 4] {
        let mut out = [[0.0f64; 4]; 4];
        for (dst, src) in out.iter_mut().zip(self.rows.iter()) {
            for (d, s) in dst.iter_mut().zip(src.iter()) {
                *d = f64::from(*s);
            }
        }
        out
    }

    pub fn approx_eq(&self, other: &Matrix4, epsilon: f32) -> bool {
        self.rows
            .iter()
            .flatten()
            .zip(other.rows.iter().flatten())
            .all(|(a, b)| (a - b).abs() <= epsilon)
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Index<(usize, usize)> for Matrix4 {
    type Output = f32;

    fn index(&self, (r, c): (usize, usize)) -> &Self::Output {
        &self.rows[r][c]
    }
}

impl IndexMut<(usize, usize)> for Matrix4 {
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut Self::Output {
        &mut self.rows[r][c]
    }
}

impl Mul for Matrix4 {
    type Output = Matrix4;

    fn mul(self, rhs: Self) -> Self::Output {
        let mut out = Matrix4::zero();
        for r in 0..4 {
            for c in 0..4 {
                out.rows[r][c] = (0..4).map(|k| self.rows[r][k] * rhs.rows[k][c]).sum();
            }
        }
        out
    }
}

/// Composes with a rotation: `self * [rot 0; 0 1]`.
impl Mul<Matrix3> for Matrix4 {
    type Output = Matrix4;

    fn mul(self, rhs: Matrix3) -> Self::Output {
        self * Matrix4::transform(&rhs, Vector3::ZERO)
    }
}
