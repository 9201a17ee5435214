//! arcball: rotate things in 3D by dragging on a virtual sphere
//!
//! - [`math`]: vector and matrix value types
//! - [`controller`]: the arcball controller, camera unprojection and drag sessions
//! - [`config`]: TOML configuration for the sphere and camera
//! - [`cli`]: the `arcball-drag` command line front end

pub use arcball_core as controller;
pub use arcball_math as math;

pub mod cli;
pub mod config;

pub use arcball_core::{Arcball, AxisMode, CameraState, DragSession, UnprojectError, Viewport};
pub use arcball_math::{rotation_matrix3, Matrix3, Matrix4, Point2, Point3, Vector2, Vector3};
pub use config::{ArcballConfig, ConfigError};
