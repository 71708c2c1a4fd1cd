//! Shared value types for the voxscene workspace.
//!
//! # Invariants
//! - Types here carry no behaviour beyond validation and conversion.
//! - Grid constants are the single source of truth for world dimensions.

pub mod config;
pub mod types;

pub use config::{CameraConfig, ConfigError, LightingConfig, RainConfig, SceneConfig};
pub use types::{
    CellCoord, GRID_SIZE, GRID_Z_OFFSET, MAX_COLUMN_HEIGHT, Material, Rgba, TEXTURE_UNITS,
};
