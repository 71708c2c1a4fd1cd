use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Errors from loading a scene configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid scene config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Startup configuration for a scene. Every field has a default, so an empty
/// JSON object (or no file at all) reproduces the reference scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub camera: CameraConfig,
    pub rain: RainConfig,
    pub lighting: LightingConfig,
    /// Directory the texture files are resolved against.
    pub texture_dir: PathBuf,
    /// Ordered texture file names bound to units 0..N.
    pub textures: Vec<String>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            rain: RainConfig::default(),
            lighting: LightingConfig::default(),
            texture_dir: PathBuf::from("assets"),
            textures: [
                "sky.jpg",
                "dirt.jpg",
                "sun.jpg",
                "chicken.jpg",
                "egg.jpg",
                "chicken_jockey.jpg",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

impl SceneConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&data)
    }

    /// Load from `path` if given, otherwise fall back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub eye: Vec3,
    pub at: Vec3,
    pub fov_degrees: f32,
    /// World units moved per movement command.
    pub step_size: f32,
    /// Degrees of rotation per pixel of pointer drag.
    pub drag_sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: Vec3::new(4.0, 2.0, 9.0),
            at: Vec3::new(0.0, 0.0, -100.0),
            fov_degrees: 50.0,
            step_size: 0.1,
            drag_sensitivity: 0.15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RainConfig {
    pub count: usize,
    pub seed: u64,
}

impl Default for RainConfig {
    fn default() -> Self {
        Self { count: 200, seed: 42 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    pub light_position: Vec3,
    pub light_color: Vec3,
    pub spotlight_position: Vec3,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            light_position: Vec3::new(5.0, 4.0, 4.0),
            light_color: Vec3::ONE,
            spotlight_position: Vec3::new(6.0, 10.0, 0.0),
        }
    }
}
