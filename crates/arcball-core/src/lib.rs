//! arcball-core: mouse-driven rotation through a virtual sphere
//!
//! A drag from `start` to `end` in window coordinates is turned into the
//! rotation carrying the sphere point under `start` onto the sphere point
//! under `end`:
//!
//! 1. both window points are unprojected at the near plane through the
//!    [`CameraState`] supplied by the caller
//! 2. each eye-space ray is intersected with the [`Arcball`] sphere
//! 3. the two hits, taken relative to the sphere center, give an axis and
//!    an angle for [`arcball_math::rotation_matrix3`]
//!
//! A ray that misses the sphere means the whole drag is ignored and the
//! identity is returned. Nothing here reports an error for that case, it is
//! an ordinary outcome near the sphere's silhouette.
//!
//! # Usage
//!
//! ```ignore
//! use arcball_core::{Arcball, CameraState, DragSession, Viewport};
//! use arcball_math::{Vector2, Vector3};
//!
//! let camera = CameraState::perspective(45f32.to_radians(), Viewport::new(0, 0, 800, 600), 0.1, 100.0);
//! let arcball = Arcball::new(Vector3::new(0.0, 0.0, -5.0), 1.0);
//! let rotation = arcball.rotation(Vector2::new(400.0, 300.0), Vector2::new(420.0, 310.0), &camera);
//! ```

pub mod arcball;
pub mod camera;
pub mod drag;
pub mod error;

pub use arcball::{Arcball, AxisMode};
pub use camera::{CameraState, Viewport};
pub use drag::DragSession;
pub use error::{Result, UnprojectError};
