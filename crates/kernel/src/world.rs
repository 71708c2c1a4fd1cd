use glam::Vec3;
use voxscene_common::{CellCoord, GRID_SIZE, GRID_Z_OFFSET, MAX_COLUMN_HEIGHT};

/// Repeating 8x8 height pattern the grid is built from, indexed `[x % 8][z % 8]`.
pub const BASE_TILE: [[u8; 8]; 8] = [
    [3, 0, 1, 1, 1, 1, 1, 4],
    [1, 0, 0, 3, 0, 2, 0, 0],
    [1, 0, 1, 1, 0, 0, 0, 0],
    [0, 0, 3, 0, 0, 0, 1, 0],
    [1, 0, 2, 0, 0, 1, 0, 0],
    [1, 0, 0, 0, 0, 0, 0, 0],
    [1, 0, 0, 3, 0, 0, 0, 0],
    [4, 0, 1, 0, 0, 0, 0, 4],
];

/// Record of an edit that changed a column height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockEdit {
    pub cell: CellCoord,
    pub old_height: u8,
    pub new_height: u8,
}

/// A single unit block: column `cell`, layer `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockPos {
    pub cell: CellCoord,
    pub y: u8,
}

impl BlockPos {
    /// World-space translation of this block: `(x, y, z - 25)`.
    pub fn world_position(&self) -> Vec3 {
        Vec3::new(
            self.cell.x as f32,
            f32::from(self.y),
            self.cell.z as f32 - GRID_Z_OFFSET,
        )
    }
}

/// Height-map voxel world: a fixed 32x32 grid of stacked unit blocks.
///
/// A solid block exists at every integer `y` in `[0, height)` above a cell.
/// Coordinates outside the grid are clamped onto its edge, never rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoxelWorld {
    heights: [[u8; GRID_SIZE]; GRID_SIZE],
    /// Incremented on every effective edit.
    revision: u64,
}

impl Default for VoxelWorld {
    fn default() -> Self {
        Self::from_tile(&BASE_TILE)
    }
}

impl VoxelWorld {
    /// Tile the grid with a repeating pattern. Heights above the maximum are clamped.
    pub fn from_tile<const N: usize>(tile: &[[u8; N]; N]) -> Self {
        let mut heights = [[0u8; GRID_SIZE]; GRID_SIZE];
        for (x, column) in heights.iter_mut().enumerate() {
            for (z, h) in column.iter_mut().enumerate() {
                *h = tile[x % N][z % N].min(MAX_COLUMN_HEIGHT);
            }
        }
        Self {
            heights,
            revision: 0,
        }
    }

    /// Every column at the same height.
    pub fn flat(height: u8) -> Self {
        Self::from_tile(&[[height]])
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn height_at(&self, cell: CellCoord) -> u8 {
        let c = cell.clamped();
        self.heights[c.x as usize][c.z as usize]
    }

    /// Set a column height (clamped to the maximum). Returns the edit if the
    /// height changed.
    pub fn set_height(&mut self, cell: CellCoord, height: u8) -> Option<BlockEdit> {
        let c = cell.clamped();
        let slot = &mut self.heights[c.x as usize][c.z as usize];
        let old_height = *slot;
        let new_height = height.min(MAX_COLUMN_HEIGHT);
        if old_height == new_height {
            return None;
        }
        *slot = new_height;
        self.revision += 1;
        let edit = BlockEdit {
            cell: c,
            old_height,
            new_height,
        };
        tracing::debug!(?edit, "column height changed");
        Some(edit)
    }

    /// Stack one block on the column. No-op at the maximum height.
    pub fn add_block(&mut self, cell: CellCoord) -> Option<BlockEdit> {
        let h = self.height_at(cell);
        if h >= MAX_COLUMN_HEIGHT {
            return None;
        }
        self.set_height(cell, h + 1)
    }

    /// Take the top block off the column. No-op on an empty column.
    pub fn remove_block(&mut self, cell: CellCoord) -> Option<BlockEdit> {
        let h = self.height_at(cell);
        if h == 0 {
            return None;
        }
        self.set_height(cell, h - 1)
    }

    /// The neighbour cell a viewer at `eye` looking along
    /// `forward` is facing, clamped into the grid.
    ///
    /// The horizontal forward components are each rounded (half toward +inf)
    /// to `{-1, 0, 1}`; near 45 degrees both round away from zero and the
    /// diagonal neighbour is chosen.
    pub fn facing_cell(eye: Vec3, forward: Vec3) -> CellCoord {
        let f = forward.normalize_or_zero();
        let dx = round_half_up(f.x);
        let dz = round_half_up(f.z);
        let x = (eye.x + dx).floor() as i32;
        let z = (eye.z + dz + GRID_Z_OFFSET).floor() as i32;
        CellCoord::new(x, z).clamped()
    }

    /// Total number of unit blocks.
    pub fn block_count(&self) -> usize {
        self.heights
            .iter()
            .flat_map(|column| column.iter())
            .map(|&h| usize::from(h))
            .sum()
    }

    /// All blocks in emission order: x ascending, then z, then y.
    pub fn blocks(&self) -> impl Iterator<Item = BlockPos> + '_ {
        self.heights.iter().enumerate().flat_map(|(x, column)| {
            column.iter().enumerate().flat_map(move |(z, &h)| {
                (0..h).map(move |y| BlockPos {
                    cell: CellCoord::new(x as i32, z as i32),
                    y,
                })
            })
        })
    }

    /// Deterministic FNV-1a hash over all column heights.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325;
        for &b in self.heights.iter().flat_map(|column| column.iter()) {
            h ^= u64::from(b);
            h = h.wrapping_mul(0x0100_0000_01b3);
        }
        h
    }
}

fn round_half_up(v: f32) -> f32 {
    (v + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_tiles_the_base_pattern() {
        let w = VoxelWorld::default();
        assert_eq!(w.height_at(CellCoord::new(0, 0)), 3);
        assert_eq!(w.height_at(CellCoord::new(0, 7)), 4);
        assert_eq!(w.height_at(CellCoord::new(8, 0)), 3);
        assert_eq!(w.height_at(CellCoord::new(9, 3)), 3);
        assert_eq!(w.height_at(CellCoord::new(31, 31)), 4);
    }

    #[test]
    fn add_then_remove_restores_height() {
        let mut w = VoxelWorld::default();
        let cell = CellCoord::new(5, 6);
        let h0 = w.height_at(cell);
        assert!(w.add_block(cell).is_some());
        assert!(w.remove_block(cell).is_some());
        assert_eq!(w.height_at(cell), h0);
    }

    #[test]
    fn add_at_max_height_is_noop() {
        let mut w = VoxelWorld::flat(MAX_COLUMN_HEIGHT);
        let cell = CellCoord::new(3, 3);
        assert_eq!(w.add_block(cell), None);
        assert_eq!(w.height_at(cell), 10);
        assert_eq!(w.revision(), 0);
    }

    #[test]
    fn remove_at_zero_is_noop() {
        let mut w = VoxelWorld::flat(0);
        let cell = CellCoord::new(3, 3);
        assert_eq!(w.remove_block(cell), None);
        assert_eq!(w.height_at(cell), 0);
    }

    #[test]
    fn stack_and_drain_origin_column() {
        let mut w = VoxelWorld::default();
        let origin = CellCoord::new(0, 0);
        assert_eq!(w.height_at(origin), 3);
        for _ in 0..3 {
            w.add_block(origin);
        }
        assert_eq!(w.height_at(origin), 6);
        for _ in 0..6 {
            w.remove_block(origin);
        }
        assert_eq!(w.height_at(origin), 0);
        w.remove_block(origin);
        assert_eq!(w.height_at(origin), 0);
    }

    #[test]
    fn edits_outside_grid_are_clamped() {
        let mut w = VoxelWorld::flat(1);
        let edit = w.add_block(CellCoord::new(-10, 99)).unwrap();
        assert_eq!(edit.cell, CellCoord::new(0, 31));
        assert_eq!(w.height_at(CellCoord::new(0, 31)), 2);
        assert_eq!(w.height_at(CellCoord::new(-1, 500)), 2);
    }

    #[test]
    fn set_height_clamps_to_maximum() {
        let mut w = VoxelWorld::flat(0);
        let edit = w.set_height(CellCoord::new(1, 1), 200).unwrap();
        assert_eq!(edit.new_height, MAX_COLUMN_HEIGHT);
        assert_eq!(w.set_height(CellCoord::new(1, 1), 10), None);
    }

    #[test]
    fn facing_cell_looking_down_negative_z() {
        let cell = VoxelWorld::facing_cell(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        // dz = -1, z = floor(5 - 1 + 25)
        assert_eq!(cell, CellCoord::new(0, 29));
    }

    #[test]
    fn facing_cell_from_reference_pose() {
        let eye = Vec3::new(4.0, 2.0, 9.0);
        let forward = (Vec3::new(0.0, 0.0, -100.0) - eye).normalize();
        assert_eq!(VoxelWorld::facing_cell(eye, forward), CellCoord::new(4, 31));
    }

    #[test]
    fn facing_cell_rounds_to_dominant_axis() {
        let eye = Vec3::new(10.2, 0.0, -10.7);
        let cell = VoxelWorld::facing_cell(eye, Vec3::new(0.9, 0.0, 0.1));
        assert_eq!(cell, CellCoord::new(11, 14));
    }

    #[test]
    fn facing_cell_always_inside_grid() {
        let eyes = [
            Vec3::new(1e9, 0.0, -1e9),
            Vec3::new(-500.0, 3.0, 500.0),
            Vec3::new(f32::INFINITY, 0.0, f32::NEG_INFINITY),
            Vec3::new(f32::NAN, 0.0, 2.0),
        ];
        let forwards = [Vec3::X, Vec3::NEG_Z, Vec3::new(-1.0, 0.3, 1.0), Vec3::ZERO];
        for eye in eyes {
            for forward in forwards {
                let c = VoxelWorld::facing_cell(eye, forward);
                assert!(c.in_bounds(), "{c:?} out of bounds for eye {eye} forward {forward}");
            }
        }
    }

    #[test]
    fn blocks_iterate_in_grid_order() {
        let mut w = VoxelWorld::flat(0);
        w.set_height(CellCoord::new(2, 0), 2);
        w.set_height(CellCoord::new(0, 5), 1);
        let blocks: Vec<BlockPos> = w.blocks().collect();
        assert_eq!(
            blocks,
            vec![
                BlockPos { cell: CellCoord::new(0, 5), y: 0 },
                BlockPos { cell: CellCoord::new(2, 0), y: 0 },
                BlockPos { cell: CellCoord::new(2, 0), y: 1 },
            ]
        );
        assert_eq!(w.block_count(), 3);
        assert_eq!(blocks[0].world_position(), Vec3::new(0.0, 0.0, -20.0));
    }

    #[test]
    fn default_block_count_matches_tile_sum() {
        let tile_sum: usize = BASE_TILE.iter().flatten().map(|&h| usize::from(h)).sum();
        assert_eq!(VoxelWorld::default().block_count(), tile_sum * 16);
    }

    #[test]
    fn state_hash_tracks_edits() {
        let mut a = VoxelWorld::default();
        let b = VoxelWorld::default();
        assert_eq!(a.state_hash(), b.state_hash());
        a.add_block(CellCoord::new(4, 4));
        assert_ne!(a.state_hash(), b.state_hash());
        a.remove_block(CellCoord::new(4, 4));
        assert_eq!(a.state_hash(), b.state_hash());
        assert_eq!(a.revision(), 2);
    }
}
