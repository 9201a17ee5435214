//! Configuration for the arcball sphere and the camera it is viewed through.
//!
//! Loaded from TOML. Every section is optional and falls back to its
//! default, so an empty file is a valid configuration:
//!
//! ```toml
//! [sphere]
//! center = [0.0, 0.0, -5.0]
//! radius = 1.0
//!
//! [rotation]
//! axis_mode = "normalized"   # or "raw"
//!
//! [camera]
//! fov_y_degrees = 45.0
//! near = 0.1
//! far = 100.0
//! viewport = [0, 0, 800, 600]
//! ```

use arcball_core::{Arcball, AxisMode, CameraState, Viewport};
use arcball_math::Vector3;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable consulted when no explicit config path is given.
pub const CONFIG_ENV_VAR: &str = "ARCBALL_CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcballConfig {
    pub sphere: SphereConfig,
    pub rotation: RotationConfig,
    pub camera: CameraConfig,
}

/// Interaction sphere, in the space the camera's view matrix maps into
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereConfig {
    pub center: [f32; 3],
    pub radius: f32,
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            center: [0.0, 0.0, -5.0],
            radius: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationConfig {
    pub axis_mode: AxisMode,
}

/// Perspective camera with the eye at the origin looking down -Z
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// `[x, y, width, height]` in pixels
    pub viewport: [i32; 4],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 45.0,
            near: 0.1,
            far: 100.0,
            viewport: [0, 0, 800, 600],
        }
    }
}

impl ArcballConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate the config file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Loaded arcball config");
        Self::from_toml_str(&content)
    }

    /// Prefer the explicit path, then `ARCBALL_CONFIG`, then the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let chosen = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from));

        match chosen {
            Some(path) => Self::load(path),
            None => {
                debug!("No arcball config given, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        let sphere = &self.sphere;
        if !sphere.center.iter().all(|v| v.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "sphere.center must be finite, got {:?}",
                sphere.center
            )));
        }
        if !(sphere.radius.is_finite() && sphere.radius > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "sphere.radius must be positive, got {}",
                sphere.radius
            )));
        }

        let camera = &self.camera;
        if !(camera.fov_y_degrees > 0.0 && camera.fov_y_degrees < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "camera.fov_y_degrees must be in (0, 180), got {}",
                camera.fov_y_degrees
            )));
        }
        if !(camera.near.is_finite() && camera.near > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "camera.near must be positive, got {}",
                camera.near
            )));
        }
        if !(camera.far.is_finite() && camera.far > camera.near) {
            return Err(ConfigError::Invalid(format!(
                "camera.far ({}) must be greater than camera.near ({})",
                camera.far, camera.near
            )));
        }
        if Viewport::from_array(camera.viewport).is_empty() {
            return Err(ConfigError::Invalid(format!(
                "camera.viewport needs a positive width and height, got {:?}",
                camera.viewport
            )));
        }

        Ok(())
    }

    pub fn arcball(&self) -> Arcball {
        Arcball::new(Vector3::from(self.sphere.center), self.sphere.radius)
    }

    pub fn camera_state(&self) -> CameraState {
        let camera = &self.camera;
        CameraState::perspective(
            camera.fov_y_degrees.to_radians(),
            Viewport::from_array(camera.viewport),
            camera.near,
            camera.far,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_file_is_default() {
        let config = ArcballConfig::from_toml_str("").unwrap();
        assert_eq!(config, ArcballConfig::default());
        assert_eq!(config.rotation.axis_mode, AxisMode::Normalized);
    }

    #[test]
    fn test_partial_sections() {
        let config = ArcballConfig::from_toml_str(
            r#"
            [sphere]
            radius = 2.5

            [rotation]
            axis_mode = "raw"
            "#,
        )
        .unwrap();
        assert_eq!(config.sphere.radius, 2.5);
        assert_eq!(config.sphere.center, [0.0, 0.0, -5.0]);
        assert_eq!(config.rotation.axis_mode, AxisMode::Raw);
        assert_eq!(config.camera, CameraConfig::default());
    }

    #[test]
    fn test_builds_runtime_values() {
        let config = ArcballConfig::from_toml_str(
            r#"
            [sphere]
            center = [1.0, 2.0, -3.0]
            radius = 0.5

            [camera]
            viewport = [10, 20, 300, 150]
            "#,
        )
        .unwrap();

        let ball = config.arcball();
        assert_eq!(ball.center(), Vector3::new(1.0, 2.0, -3.0));
        assert_eq!(ball.radius(), 0.5);

        let camera = config.camera_state();
        assert_eq!(camera.viewport, Viewport::new(10, 20, 300, 150));
        // aspect ratio 2 halves the horizontal focal term
        let projection = camera.projection();
        let ratio = projection[(1, 1)] / projection[(0, 0)];
        assert!((ratio - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_rejects_bad_values() {
        let cases = [
            "[sphere]\nradius = 0.0",
            "[sphere]\nradius = -1.0",
            "[camera]\nnear = 0.0",
            "[camera]\nnear = 5.0\nfar = 1.0",
            "[camera]\nfov_y_degrees = 180.0",
            "[camera]\nviewport = [0, 0, 0, 600]",
        ];
        for case in cases {
            let err = ArcballConfig::from_toml_str(case).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{}: {}", case, err);
        }
    }

    #[test]
    fn test_parse_error() {
        let err = ArcballConfig::from_toml_str("[rotation]\naxis_mode = \"sideways\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[sphere]\nradius = 3.0").unwrap();

        let config = ArcballConfig::load(file.path()).unwrap();
        assert_eq!(config.sphere.radius, 3.0);
    }

    #[test]
    fn test_missing_file() {
        let err = ArcballConfig::load("/definitely/not/here/arcball.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    #[serial]
    fn test_env_var_fallback() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[sphere]\nradius = 4.0").unwrap();

        std::env::set_var(CONFIG_ENV_VAR, file.path());
        let from_env = ArcballConfig::load_or_default(None);
        std::env::remove_var(CONFIG_ENV_VAR);

        assert_eq!(from_env.unwrap().sphere.radius, 4.0);
    }

    #[test]
    #[serial]
    fn test_explicit_path_wins_over_env() {
        let mut explicit = NamedTempFile::new().unwrap();
        writeln!(explicit, "[sphere]\nradius = 6.0").unwrap();

        std::env::set_var(CONFIG_ENV_VAR, "/definitely/not/here/arcball.toml");
        let config = ArcballConfig::load_or_default(Some(explicit.path()));
        std::env::remove_var(CONFIG_ENV_VAR);

        assert_eq!(config.unwrap().sphere.radius, 6.0);
    }

    #[test]
    #[serial]
    fn test_defaults_without_path_or_env() {
        std::env::remove_var(CONFIG_ENV_VAR);
        let config = ArcballConfig::load_or_default(None).unwrap();
        assert_eq!(config, ArcballConfig::default());
    }
}
