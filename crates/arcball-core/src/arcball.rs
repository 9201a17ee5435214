//! The arcball sphere and the drag-to-rotation computation

use crate::camera::CameraState;
use arcball_math::{rotation_matrix3, Matrix3, Vector2, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

/// How the rotation axis `p1 x p2` is handed to the rotation builder.
///
/// The cross product of two unit vectors has length `sin(angle)`, not 1.
/// [`AxisMode::Raw`] passes it through unchanged, which makes the returned
/// matrix shrink vectors as well as rotate them. [`AxisMode::Normalized`]
/// rescales it first and yields a proper rotation.
///
/// Both modes clamp `p1 . p2` to `[-1, 1]` before taking the angle, so
/// `Raw` matches the legacy axis handling but not its NaN output when
/// rounding pushes the dot product of nearly equal directions past 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisMode {
    #[default]
    Normalized,
    Raw,
}

impl AxisMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AxisMode::Normalized => "normalized",
            AxisMode::Raw => "raw",
        }
    }
}

impl fmt::Display for AxisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AxisMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "normalized" => Ok(AxisMode::Normalized),
            "raw" => Ok(AxisMode::Raw),
            other => Err(format!("Unknown axis mode: {}", other)),
        }
    }
}

/// Virtual sphere used to turn drags into rotations.
///
/// `center` and `radius` are expressed in whatever space the camera's view
/// matrix maps into (eye space when the view is the identity). The radius
/// is expected to be positive but is not checked: a zero or negative radius
/// simply makes most rays miss, and a missed ray yields the identity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arcball {
    center: Vector3,
    radius: f32,
}

impl Arcball {
    pub fn new(center: Vector3, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn set_center(&mut self, center: Vector3) {
        self.center = center;
    }

    pub fn center(&self) -> Vector3 {
        self.center
    }

    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius;
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Rotation for a drag from `start` to `end` (window coordinates),
    /// with a normalized axis.
    pub fn rotation(&self, start: Vector2, end: Vector2, camera: &CameraState) -> Matrix3 {
        self.rotation_with_axis_mode(start, end, camera, AxisMode::Normalized)
    }

    /// Rotation for a drag from `start` to `end` (window coordinates).
    ///
    /// Both points are unprojected at the near plane. If either one cannot
    /// be unprojected, or its ray misses the sphere, the whole drag is
    /// dropped and the identity is returned.
    pub fn rotation_with_axis_mode(
        &self,
        start: Vector2,
        end: Vector2,
        camera: &CameraState,
        mode: AxisMode,
    ) -> Matrix3 {
        self.try_rotation(start, end, camera, mode)
            .unwrap_or_else(Matrix3::identity)
    }

    /// Like [`Arcball::rotation_with_axis_mode`], but `None` instead of the
    /// identity when the drag cannot produce a rotation.
    pub fn try_rotation(
        &self,
        start: Vector2,
        end: Vector2,
        camera: &CameraState,
        mode: AxisMode,
    ) -> Option<Matrix3> {
        let (v1, v2) = match (camera.unproject(start, 0.0), camera.unproject(end, 0.0)) {
            (Ok(v1), Ok(v2)) => (v1, v2),
            (Err(err), _) | (_, Err(err)) => {
                debug!(%err, "Cannot unproject drag, ignoring it");
                return None;
            }
        };

        self.try_rotation_from_rays(v1, v2, mode)
    }

    /// Rotation between two eye-space rays leaving the origin.
    ///
    /// `v1` and `v2` are usually unprojected window points; only their
    /// direction and the sphere matter.
    pub fn rotation_from_rays(&self, v1: Vector3, v2: Vector3, mode: AxisMode) -> Matrix3 {
        self.try_rotation_from_rays(v1, v2, mode)
            .unwrap_or_else(Matrix3::identity)
    }

    /// `None` when either ray misses the sphere.
    pub fn try_rotation_from_rays(
        &self,
        v1: Vector3,
        v2: Vector3,
        mode: AxisMode,
    ) -> Option<Matrix3> {
        let (Some(p1), Some(p2)) = (self.surface_direction(v1), self.surface_direction(v2)) else {
            debug!(
                center = ?self.center,
                radius = self.radius,
                "Drag ray missed the arcball sphere"
            );
            return None;
        };

        let axis = match mode {
            AxisMode::Normalized => p1.cross(&p2).normalize(),
            AxisMode::Raw => p1.cross(&p2),
        };
        // Rounding can push the dot product of two unit vectors past 1.
        let angle = p1.dot(&p2).clamp(-1.0, 1.0).acos();
        trace!(?axis, angle, %mode, "Arcball rotation");

        Some(rotation_matrix3(axis, angle))
    }

    /// Unit vector from the sphere center towards `ray * t` for the ray
    /// under `window`, `t` coming from [`Arcball::intersect`]. `None` when
    /// the ray misses.
    pub fn surface_point(&self, window: Vector2, camera: &CameraState) -> Option<Vector3> {
        match camera.unproject(window, 0.0) {
            Ok(ray) => self.surface_direction(ray),
            Err(err) => {
                debug!(%err, "Cannot unproject window point");
                None
            }
        }
    }

    /// Solve `a t^2 + b t + c = 0` with
    /// `a = ray.ray`, `b = 2 ray.center`, `c = center.center - radius^2`
    /// and return the larger root. `None` when the discriminant is negative;
    /// a zero discriminant (tangent ray) counts as a hit.
    ///
    /// `b` carries `+2 ray.center`, so for a sphere away from the eye the
    /// roots are the negated ray parameters of the geometric hits.
    pub fn intersect(&self, ray: Vector3) -> Option<f32> {
        let a = ray.dot(&ray);
        let b = 2.0 * ray.dot(&self.center);
        let c = self.center.dot(&self.center) - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            trace!(discriminant, "Ray misses sphere");
            return None;
        }

        let sqrt_d = discriminant.sqrt();
        let r1 = (-b - sqrt_d) / (2.0 * a);
        let r2 = (-b + sqrt_d) / (2.0 * a);
        let t = if r1 > r2 { r1 } else { r2 };
        trace!(discriminant, t, "Ray hits sphere");
        Some(t)
    }

    fn surface_direction(&self, ray: Vector3) -> Option<Vector3> {
        let t = self.intersect(ray)?;
        let mut p = ray * t;
        p -= self.center;
        Some(p / p.norm())
    }
}

impl Default for Arcball {
    fn default() -> Self {
        Self::new(Vector3::ZERO, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vector3, b: Vector3, eps: f32) {
        assert!(a.distance(&b) < eps, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_accessors() {
        let mut ball = Arcball::new(Vector3::new(1.0, 2.0, 3.0), 4.0);
        assert_eq!(ball.center(), Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(ball.radius(), 4.0);

        ball.set_center(Vector3::ZERO);
        ball.set_radius(0.5);
        assert_eq!(ball.center(), Vector3::ZERO);
        assert_eq!(ball.radius(), 0.5);
    }

    #[test]
    fn test_intersect_picks_larger_root() {
        // Sphere around the eye: roots are +-radius for a unit ray
        let ball = Arcball::new(Vector3::ZERO, 2.0);
        assert_eq!(ball.intersect(Vector3::new(0.0, 0.0, -1.0)), Some(2.0));

        // a = 1, b = 10, c = 24 -> roots -4 and -6
        let ball = Arcball::new(Vector3::new(0.0, 0.0, -5.0), 1.0);
        assert_eq!(ball.intersect(Vector3::new(0.0, 0.0, -1.0)), Some(-4.0));
    }

    #[test]
    fn test_intersect_tangent_counts_as_hit() {
        // |center| = 5, b = 8, c = 16 -> discriminant exactly 0
        let ball = Arcball::new(Vector3::new(3.0, 0.0, -4.0), 3.0);
        assert_eq!(ball.intersect(Vector3::new(0.0, 0.0, -1.0)), Some(-4.0));
    }

    #[test]
    fn test_intersect_miss() {
        let ball = Arcball::new(Vector3::new(0.0, 0.0, -5.0), 1.0);
        assert_eq!(ball.intersect(Vector3::X), None);
    }

    #[test]
    fn test_non_positive_radius_misses_outside_sphere() {
        let ball = Arcball::new(Vector3::new(0.0, 0.0, -5.0), 0.0);
        assert_eq!(ball.intersect(Vector3::new(0.3, 0.0, -1.0)), None);
    }

    #[test]
    fn test_small_angle_rotation() {
        let ball = Arcball::new(Vector3::ZERO, 1.0);
        let angle = 0.05f32;
        let v1 = Vector3::new(0.0, 0.0, -1.0);
        let v2 = Vector3::new(angle.sin(), 0.0, -angle.cos());

        let r = ball.rotation_from_rays(v1, v2, AxisMode::Normalized);
        assert_close(r * v1, v2, 1e-5);

        // The axis is -Y, so X stays in the XZ plane and turns by `angle`
        let turned = r * Vector3::X;
        let measured = turned.dot(&Vector3::X).clamp(-1.0, 1.0).acos();
        assert!((measured - angle).abs() < 1e-4);
    }

    #[test]
    fn test_same_ray_is_identity() {
        let ball = Arcball::new(Vector3::new(0.2, -0.1, -4.0), 1.5);
        let v = Vector3::new(0.05, 0.02, -1.0);
        for mode in [AxisMode::Normalized, AxisMode::Raw] {
            let r = ball.rotation_from_rays(v, v, mode);
            assert!(r.approx_eq(&Matrix3::identity(), 1e-5), "{:?}", r);
        }
    }

    #[test]
    fn test_any_miss_returns_identity() {
        let ball = Arcball::new(Vector3::new(0.0, 0.0, -5.0), 1.0);
        let hit = Vector3::new(0.0, 0.0, -1.0);
        let miss = Vector3::new(1.0, 1.0, -1.0);
        assert_eq!(ball.rotation_from_rays(miss, miss, AxisMode::Normalized), Matrix3::identity());
        assert_eq!(ball.rotation_from_rays(hit, miss, AxisMode::Normalized), Matrix3::identity());
        assert_eq!(ball.rotation_from_rays(miss, hit, AxisMode::Raw), Matrix3::identity());
    }

    #[test]
    fn test_try_rotation_reports_miss() {
        let ball = Arcball::new(Vector3::new(0.0, 0.0, -5.0), 1.0);
        let hit = Vector3::new(0.0, 0.0, -1.0);
        let miss = Vector3::new(1.0, 1.0, -1.0);
        assert_eq!(ball.try_rotation_from_rays(hit, miss, AxisMode::Normalized), None);
        assert_eq!(ball.try_rotation_from_rays(miss, hit, AxisMode::Raw), None);

        let same = ball.try_rotation_from_rays(hit, hit, AxisMode::Normalized).unwrap();
        assert!(same.approx_eq(&Matrix3::identity(), 1e-6));
    }

    #[test]
    fn test_raw_mode_stays_finite_near_view_axis() {
        // Nearly equal surface directions can round to a dot product above 1
        let ball = Arcball::new(Vector3::ZERO, 1.0);
        for i in -20..=20 {
            for j in -20..=20 {
                let v = Vector3::new(i as f32 * 1e-3, j as f32 * 1e-3, -1.0);
                let r = ball.rotation_from_rays(v, v, AxisMode::Raw);
                assert!(r.is_finite(), "{:?} gave {:?}", v, r);
                assert!(r.approx_eq(&Matrix3::identity(), 1e-5));
            }
        }
    }

    #[test]
    fn test_tangent_ray_produces_rotation() {
        let ball = Arcball::new(Vector3::new(3.0, 0.0, -4.0), 3.0);
        let tangent = Vector3::new(0.0, 0.0, -1.0);
        let through_center = Vector3::new(0.6, 0.0, -0.8);

        let r = ball.rotation_from_rays(tangent, through_center, AxisMode::Normalized);
        assert!(r.is_finite());
        assert!(!r.approx_eq(&Matrix3::identity(), 1e-3));

        let p1 = Vector3::new(-3.0, 0.0, 8.0).normalize();
        let p2 = Vector3::new(-0.6, 0.0, 0.8);
        assert_close(r * p1, p2, 1e-4);
    }

    #[test]
    fn test_raw_axis_is_not_a_pure_rotation() {
        let ball = Arcball::new(Vector3::ZERO, 1.0);
        let v1 = Vector3::new(0.0, 0.0, -1.0);
        let v2 = Vector3::new(0.6, 0.0, -0.8);

        let normalized = ball.rotation_from_rays(v1, v2, AxisMode::Normalized);
        let raw = ball.rotation_from_rays(v1, v2, AxisMode::Raw);
        assert!(((normalized * Vector3::X).norm() - 1.0).abs() < 1e-5);
        assert!(((raw * Vector3::X).norm() - 1.0).abs() > 1e-2);
    }

    #[test]
    fn test_axis_mode_parse() {
        assert_eq!("raw".parse::<AxisMode>(), Ok(AxisMode::Raw));
        assert_eq!("Normalized".parse::<AxisMode>(), Ok(AxisMode::Normalized));
        assert!("sideways".parse::<AxisMode>().is_err());
        assert_eq!(AxisMode::Raw.to_string(), "raw");
    }
}
