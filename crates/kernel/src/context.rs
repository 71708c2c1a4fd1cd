use voxscene_common::{CellCoord, SceneConfig};

use crate::camera::{Camera, CameraError};
use crate::lighting::Lighting;
use crate::rain::Rain;
use crate::world::{BlockEdit, VoxelWorld};

/// The single owner of all mutable scene state.
///
/// Input handlers mutate it between ticks; the composer reads it once per
/// tick. Nothing here is global, so a tick is a function of this value alone.
#[derive(Debug, Clone, Default)]
pub struct SceneContext {
    pub camera: Camera,
    pub world: VoxelWorld,
    pub lighting: Lighting,
    pub rain: Rain,
}

impl SceneContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &SceneConfig) -> Result<Self, CameraError> {
        Ok(Self {
            camera: Camera::from_config(&config.camera)?,
            world: VoxelWorld::default(),
            lighting: Lighting::from_config(&config.lighting),
            rain: Rain::from_config(&config.rain),
        })
    }

    /// Grid cell the camera currently faces.
    pub fn facing_cell(&self) -> CellCoord {
        VoxelWorld::facing_cell(self.camera.eye(), self.camera.forward())
    }

    pub fn add_block_at_facing(&mut self) -> Option<BlockEdit> {
        let cell = self.facing_cell();
        self.world.add_block(cell)
    }

    pub fn remove_block_at_facing(&mut self) -> Option<BlockEdit> {
        let cell = self.facing_cell();
        self.world.remove_block(cell)
    }
}
