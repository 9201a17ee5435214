//! Camera transforms and window-to-eye-space unprojection

use crate::error::{Result, UnprojectError};
use arcball_math::{Matrix4, Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// Window rectangle in pixels, in `glViewport` order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build from `[x, y, width, height]`, the layout of `GL_VIEWPORT`
    pub fn from_array([x, y, width, height]: [i32; 4]) -> Self {
        Self::new(x, y, width, height)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Width / height
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Center of the rectangle in window coordinates
    pub fn center(&self) -> Vector2 {
        Vector2::new(
            self.x as f32 + self.width as f32 / 2.0,
            self.y as f32 + self.height as f32 / 2.0,
        )
    }
}

/// Everything needed to map a window coordinate back into eye space.
///
/// The arcball reads this on every call instead of caching it, so a camera
/// that moves between drags is always picked up. Matrices are held in `f64`
/// so values imported with [`CameraState::from_gl`] keep their precision
/// through unprojection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    projection: [[f64; 4]; 4],
    view: [[f64; 4]; 4],
    pub viewport: Viewport,
}

impl CameraState {
    pub fn new(projection: Matrix4, view: Matrix4, viewport: Viewport) -> Self {
        Self {
            projection: projection.to_f64(),
            view: view.to_f64(),
            viewport,
        }
    }

    /// Build from the raw values a GL context reports: column-major
    /// `GL_PROJECTION_MATRIX` / `GL_MODELVIEW_MATRIX` and `GL_VIEWPORT`.
    pub fn from_gl(projection: &[f64; 16], view: &[f64; 16], viewport: [i32; 4]) -> Self {
        Self {
            projection: from_cols(projection),
            view: from_cols(view),
            viewport: Viewport::from_array(viewport),
        }
    }

    /// Eye at the origin looking down -Z, with a perspective projection
    /// whose aspect ratio follows the viewport.
    pub fn perspective(fov_y: f32, viewport: Viewport, near: f32, far: f32) -> Self {
        Self::new(
            Matrix4::perspective(fov_y, viewport.aspect(), near, far),
            Matrix4::identity(),
            viewport,
        )
    }

    pub fn projection(&self) -> Matrix4 {
        Matrix4::from_f64(&self.projection)
    }

    pub fn set_projection(&mut self, projection: Matrix4) {
        self.projection = projection.to_f64();
    }

    pub fn view(&self) -> Matrix4 {
        Matrix4::from_f64(&self.view)
    }

    pub fn set_view(&mut self, view: Matrix4) {
        self.view = view.to_f64();
    }

    /// Map a window coordinate at `depth` (0 = near plane, 1 = far plane)
    /// back through the viewport, projection and view transforms.
    ///
    /// Same math as `gluUnProject`, carried out in `f64`.
    pub fn unproject(&self, window: Vector2, depth: f32) -> Result<Vector3> {
        let vp = self.viewport;
        if vp.is_empty() {
            return Err(UnprojectError::EmptyViewport {
                width: vp.width,
                height: vp.height,
            });
        }

        let clip_to_eye = invert(multiply(&self.projection, &self.view))
            .ok_or(UnprojectError::SingularTransform)?;

        let ndc = [
            (f64::from(window.x) - f64::from(vp.x)) / f64::from(vp.width) * 2.0 - 1.0,
            (f64::from(window.y) - f64::from(vp.y)) / f64::from(vp.height) * 2.0 - 1.0,
            f64::from(depth) * 2.0 - 1.0,
            1.0,
        ];

        let mut out = [0.0f64; 4];
        for (o, row) in out.iter_mut().zip(clip_to_eye.iter()) {
            *o = row.iter().zip(ndc.iter()).map(|(a, b)| a * b).sum();
        }

        if out[3] == 0.0 {
            return Err(UnprojectError::PointAtInfinity);
        }

        Ok(Vector3::new(
            (out[0] / out[3]) as f32,
            (out[1] / out[3]) as f32,
            (out[2] / out[3]) as f32,
        ))
    }
}

fn from_cols(cols: &[f64; 16]) -> [[f64; 4]; 4] {
    let mut out = [[0.0f64; 4]; 4];
    for (c, col) in cols.chunks_exact(4).enumerate() {
        for (r, v) in col.iter().enumerate() {
            out[r][c] = *v;
        }
    }
    out
}

fn multiply(a: &[[f64; 4]; 4], b: &[[f64; 4]; 4]) -> [[f64; 4]; 4] {
    let mut out = [[0.0f64; 4]; 4];
    for r in 0..4 {
        for c in 0..4 {
            out[r][c] = (0..4).map(|k| a[r][k] * b[k][c]).sum();
        }
    }
    out
}

/// Gauss-Jordan elimination with partial pivoting. `None` when singular.
fn invert(m: [[f64; 4]; 4]) -> Option<[[f64; 4]; 4]> {
    let mut a = m;
    let mut inv = [[0.0f64; 4]; 4];
    for (i, row) in inv.iter_mut().enumerate() {
        row[i] = 1.0;
    }

    for col in 0..4 {
        let pivot = (col..4).max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))?;
        if a[pivot][col] == 0.0 {
            return None;
        }
        a.swap(col, pivot);
        inv.swap(col, pivot);

        let p = a[col][col];
        for k in 0..4 {
            a[col][k] /= p;
            inv[col][k] /= p;
        }

        for row in 0..4 {
            if row == col {
                continue;
            }
            let f = a[row][col];
            if f == 0.0 {
                continue;
            }
            for k in 0..4 {
                let (ak, ik) = (a[col][k], inv[col][k]);
                a[row][k] -= f * ak;
                inv[row][k] -= f * ik;
            }
        }
    }

    Some(inv)
}
