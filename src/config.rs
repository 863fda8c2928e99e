use std::path::{Path, PathBuf};

use anyhow::{ensure, Context};
use serde::{Deserialize, Serialize};

use crate::camera::CameraSettings;
use crate::cli::Cli;

pub const DEFAULT_SHADER_PATH: &str = "main.glsl";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            title: "Hello World".to_string(),
        }
    }
}

/// Everything the viewer reads at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window: WindowSettings,
    pub camera: CameraSettings,
    pub shader_path: PathBuf,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window: WindowSettings::default(),
            camera: CameraSettings::default(),
            shader_path: PathBuf::from(DEFAULT_SHADER_PATH),
        }
    }
}

impl ViewerConfig {
    /// Parse a JSON config. Missing fields keep their defaults.
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(text).context("invalid viewer config")?;
        config.validate().context("invalid viewer config")?;
        Ok(config)
    }

    /// Pitch limits must be ordered and stay off the poles, where forward meets world up
    fn validate(&self) -> anyhow::Result<()> {
        let camera = &self.camera;
        for (name, limit) in [("min_pitch", camera.min_pitch), ("max_pitch", camera.max_pitch)] {
            ensure!(
                limit > -90.0 && limit < 90.0,
                "camera.{} must lie strictly between -90 and 90 degrees, got {}",
                name,
                limit
            );
        }
        ensure!(
            camera.min_pitch <= camera.max_pitch,
            "camera.min_pitch ({}) exceeds camera.max_pitch ({})",
            camera.min_pitch,
            camera.max_pitch
        );
        Ok(())
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Config file named by the command line, if any, with flags applied on top
    pub fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Some(shader) = &cli.shader {
            config.shader_path = shader.clone();
        }
        if let Some(width) = cli.width {
            config.window.width = width;
        }
        if let Some(height) = cli.height {
            config.window.height = height;
        }
        if let Some(title) = &cli.title {
            config.window.title = title.clone();
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use glam::Vec3;

    #[test]
    fn defaults_match_reference_behavior() {
        let config = ViewerConfig::default();

        assert_eq!(config.window.width, 640);
        assert_eq!(config.window.height, 480);
        assert_eq!(config.shader_path, PathBuf::from("main.glsl"));
        assert_eq!(config.camera.sensitivity, 0.4);
        assert_eq!(config.camera.speed, 10.0);
        assert_eq!(config.camera.min_pitch, -89.0);
        assert_eq!(config.camera.max_pitch, 10.1);
        assert_eq!(config.camera.initial_position, Vec3::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = ViewerConfig::from_json(r#"{ "camera": { "speed": 2.5 }, "window": { "title": "sdf" } }"#)
            .unwrap();

        assert_eq!(config.camera.speed, 2.5);
        assert_eq!(config.camera.sensitivity, 0.4);
        assert_eq!(config.window.title, "sdf");
        assert_eq!(config.window.width, 640);
    }

    #[test]
    fn initial_position_parses_as_array() {
        let config = ViewerConfig::from_json(r#"{ "camera": { "initial_position": [1.0, 2.0, 3.0] } }"#).unwrap();
        assert_eq!(config.camera.initial_position, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(ViewerConfig::from_json("{ camera: ").is_err());
    }

    #[test]
    fn inverted_pitch_limits_are_rejected() {
        let err = ViewerConfig::from_json(r#"{ "camera": { "min_pitch": 20.0, "max_pitch": 10.0 } }"#)
            .unwrap_err();
        assert!(format!("{:#}", err).contains("exceeds"), "{:#}", err);
    }

    #[test]
    fn pitch_limits_at_the_poles_are_rejected() {
        assert!(ViewerConfig::from_json(r#"{ "camera": { "min_pitch": -90.0 } }"#).is_err());
        assert!(ViewerConfig::from_json(r#"{ "camera": { "max_pitch": 95.0 } }"#).is_err());
        assert!(ViewerConfig::from_json(r#"{ "camera": { "min_pitch": -89.9, "max_pitch": 89.9 } }"#).is_ok());
    }

    #[test]
    fn equal_pitch_limits_lock_pitch() {
        let config = ViewerConfig::from_json(r#"{ "camera": { "min_pitch": 0.0, "max_pitch": 0.0 } }"#).unwrap();
        let mut camera = crate::Camera::new(config.camera);

        camera.update(glam::Vec2::new(0.0, 500.0), 0.016, crate::MovementState::default());

        assert_eq!(camera.orientation.pitch, 0.0);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        assert!(ViewerConfig::load(Path::new("no/such/viewer.json")).is_err());
    }

    #[test]
    fn cli_flags_override_defaults() {
        let cli = Cli::parse_from(["shader-viewer", "scene.glsl", "--width", "800", "--height", "600"]);
        let config = ViewerConfig::from_cli(&cli).unwrap();

        assert_eq!(config.shader_path, PathBuf::from("scene.glsl"));
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 600);
        assert_eq!(config.window.title, "Hello World");
    }
}
