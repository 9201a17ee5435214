//! Drag lifecycle on top of [`Arcball`]
//!
//! A drag is started with [`DragSession::begin`], fed pointer positions with
//! [`DragSession::update`] and finished with [`DragSession::end`] (keep the
//! result) or [`DragSession::cancel`] (snap back). Every update measures the
//! rotation from the point where the drag started, so the result does not
//! drift with the number of pointer events.

use crate::arcball::{Arcball, AxisMode};
use crate::camera::CameraState;
use arcball_math::{Matrix3, Vector2};
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    anchor: Option<Vector2>,
    base: Matrix3,
    orientation: Matrix3,
    axis_mode: AxisMode,
}

impl DragSession {
    pub fn new() -> Self {
        Self::with_orientation(Matrix3::identity())
    }

    /// Start from an existing orientation instead of the identity
    pub fn with_orientation(orientation: Matrix3) -> Self {
        Self {
            anchor: None,
            base: orientation,
            orientation,
            axis_mode: AxisMode::default(),
        }
    }

    #[must_use = "with_axis_mode returns a modified DragSession"]
    pub fn with_axis_mode(mut self, axis_mode: AxisMode) -> Self {
        self.axis_mode = axis_mode;
        self
    }

    /// Start a drag at `start`. A drag already in progress is committed first.
    pub fn begin(&mut self, start: Vector2) {
        if self.anchor.is_some() {
            self.end();
        }
        debug!(x = start.x, y = start.y, "Arcball drag started");
        self.anchor = Some(start);
        self.base = self.orientation;
    }

    /// Move the pointer to `current` and return the rotation from the drag
    /// anchor to it. Without an active drag, or when the drag cannot be
    /// mapped onto the sphere, this is the identity and the orientation is
    /// left where the last successful update put it.
    pub fn update(&mut self, current: Vector2, arcball: &Arcball, camera: &CameraState) -> Matrix3 {
        let Some(anchor) = self.anchor else {
            return Matrix3::identity();
        };

        match arcball.try_rotation(anchor, current, camera, self.axis_mode) {
            Some(rotation) => {
                self.orientation = rotation * self.base;
                rotation
            }
            None => {
                debug!(
                    x = current.x,
                    y = current.y,
                    "Pointer off the arcball, holding orientation"
                );
                Matrix3::identity()
            }
        }
    }

    /// Finish the drag and keep the accumulated orientation.
    pub fn end(&mut self) -> Matrix3 {
        if self.anchor.take().is_some() {
            debug!("Arcball drag ended");
        }
        self.base = self.orientation;
        self.orientation
    }

    /// Abort the drag and restore the orientation it started from.
    pub fn cancel(&mut self) {
        if self.anchor.take().is_some() {
            debug!("Arcball drag cancelled");
        }
        self.orientation = self.base;
    }

    pub fn is_active(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn orientation(&self) -> Matrix3 {
        self.orientation
    }

    pub fn axis_mode(&self) -> AxisMode {
        self.axis_mode
    }
}

impl Default for DragSession {
    fn default() -> Self {
        Self::new()
    }
}
