//! Scene Kernel: authoritative camera, voxel world, particle and lighting state.
//!
//! # Invariants
//! - All state mutations flow through explicit operations.
//! - Camera matrices are recomputed synchronously after every camera mutation.
//! - Grid heights stay within `[0, MAX_COLUMN_HEIGHT]`; grid indices are clamped.
//! - Rendering reads this state and never mutates it, except for the per-frame
//!   lighting animation and rain advance performed by the composer.

pub mod camera;
pub mod context;
pub mod lighting;
pub mod rain;
pub mod world;

pub use camera::{Camera, CameraError, FAR_PLANE, NEAR_PLANE};
pub use context::SceneContext;
pub use lighting::{Lighting, PointLight, SpotLight};
pub use rain::{Rain, Raindrop};
pub use world::{BASE_TILE, BlockEdit, BlockPos, VoxelWorld};
