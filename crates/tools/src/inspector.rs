use std::fmt;

use glam::Vec3;
use voxscene_common::CellCoord;
use voxscene_kernel::SceneContext;

/// Read-only queries against a [`SceneContext`] for the control panel and CLI.
pub struct SceneInspector;

impl SceneInspector {
    pub fn summary(ctx: &SceneContext) -> SceneSummary {
        let facing = ctx.facing_cell();
        SceneSummary {
            eye: ctx.camera.eye(),
            forward: ctx.camera.forward(),
            facing,
            facing_height: ctx.world.height_at(facing),
            block_count: ctx.world.block_count(),
            world_revision: ctx.world.revision(),
            world_hash: ctx.world.state_hash(),
            drop_count: ctx.rain.len(),
            point_light: ctx.lighting.point.enabled,
            spotlight: ctx.lighting.spot.enabled,
            normal_debug: ctx.lighting.normal_debug,
            animated: ctx.lighting.animated,
        }
    }

    /// Heights of one grid row (fixed `z`), formatted as digits. Heights of
    /// ten are shown as `A`.
    pub fn height_row(ctx: &SceneContext, z: i32) -> String {
        (0..voxscene_common::GRID_SIZE as i32)
            .map(|x| {
                let h = ctx.world.height_at(CellCoord::new(x, z));
                char::from_digit(u32::from(h), 11)
                    .map(|c| c.to_ascii_uppercase())
                    .unwrap_or('?')
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneSummary {
    pub eye: Vec3,
    pub forward: Vec3,
    pub facing: CellCoord,
    pub facing_height: u8,
    pub block_count: usize,
    pub world_revision: u64,
    /// Hash of every column height; equal hashes mean equal worlds.
    pub world_hash: u64,
    pub drop_count: usize,
    pub point_light: bool,
    pub spotlight: bool,
    pub normal_debug: bool,
    pub animated: bool,
}

fn on_off(b: bool) -> &'static str {
    if b { "on" } else { "off" }
}

impl fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Camera: eye=({:.2}, {:.2}, {:.2}) forward=({:.2}, {:.2}, {:.2})",
            self.eye.x, self.eye.y, self.eye.z, self.forward.x, self.forward.y, self.forward.z
        )?;
        writeln!(
            f,
            "Facing: cell=({}, {}) height={}",
            self.facing.x, self.facing.z, self.facing_height
        )?;
        writeln!(
            f,
            "World: blocks={} revision={} hash={:016x} drops={}",
            self.block_count, self.world_revision, self.world_hash, self.drop_count
        )?;
        write!(
            f,
            "Lights: point={} spot={} normals={} animate={}",
            on_off(self.point_light),
            on_off(self.spotlight),
            on_off(self.normal_debug),
            on_off(self.animated)
        )
    }
}
