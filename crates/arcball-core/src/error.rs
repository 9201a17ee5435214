//! Error types for camera unprojection.

/// Reasons a window coordinate cannot be mapped back into eye space.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UnprojectError {
    #[error("Viewport has no area: {width}x{height}")]
    EmptyViewport { width: i32, height: i32 },

    #[error("Projection * view matrix is singular")]
    SingularTransform,

    #[error("Unprojected point lies at infinity (w = 0)")]
    PointAtInfinity,
}

pub type Result<T> = std::result::Result<T, UnprojectError>;
