use serde::{Deserialize, Serialize};

/// Number of cells along each horizontal axis of the voxel grid.
pub const GRID_SIZE: usize = 32;

/// Tallest column the grid can hold.
pub const MAX_COLUMN_HEIGHT: u8 = 10;

/// Grid row `z` is placed at world `z - GRID_Z_OFFSET`.
pub const GRID_Z_OFFSET: f32 = 25.0;

/// Number of texture units a render backend must provide.
pub const TEXTURE_UNITS: usize = 6;

/// Straight (non-premultiplied) RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Shading mode selector carried by every drawable.
///
/// The integer encoding is part of the backend contract:
/// `-3` normal-as-color, `-2` flat color, `-1` UV-as-color, `0..=5` texture unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Material {
    NormalDebug,
    Flat,
    UvDebug,
    Texture(u8),
}

impl Material {
    pub const SKY: Self = Self::Texture(0);
    pub const DIRT: Self = Self::Texture(1);
    pub const SUN: Self = Self::Texture(2);
    pub const CHICKEN: Self = Self::Texture(3);
    pub const EGG: Self = Self::Texture(4);
    pub const JOCKEY: Self = Self::Texture(5);

    /// Integer index understood by the shading stage.
    pub fn index(self) -> i32 {
        match self {
            Self::NormalDebug => -3,
            Self::Flat => -2,
            Self::UvDebug => -1,
            Self::Texture(unit) => i32::from(unit),
        }
    }

    /// Decode a backend index. Returns `None` for indices the backend must
    /// render with its warning color.
    pub fn from_index(index: i32) -> Option<Self> {
        match index {
            -3 => Some(Self::NormalDebug),
            -2 => Some(Self::Flat),
            -1 => Some(Self::UvDebug),
            0..=5 => Some(Self::Texture(index as u8)),
            _ => None,
        }
    }
}

/// A cell of the voxel grid (Y is implicit: columns are stacked).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    pub x: i32,
    pub z: i32,
}

impl CellCoord {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Clamp both axes into `[0, GRID_SIZE)`.
    pub fn clamped(self) -> Self {
        let max = GRID_SIZE as i32 - 1;
        Self {
            x: self.x.clamp(0, max),
            z: self.z.clamp(0, max),
        }
    }

    pub fn in_bounds(self) -> bool {
        self == self.clamped()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn material_index_roundtrip_for_known_modes() {
        for index in -3..=5 {
            let material = Material::from_index(index).unwrap();
            assert_eq!(material.index(), index);
        }
    }

    #[test]
    fn unknown_material_index_is_rejected() {
        assert_eq!(Material::from_index(6), None);
        assert_eq!(Material::from_index(-4), None);
    }

    #[test]
    fn named_texture_units() {
        assert_eq!(Material::SKY.index(), 0);
        assert_eq!(Material::DIRT.index(), 1);
        assert_eq!(Material::JOCKEY.index(), 5);
    }

    #[test]
    fn cell_clamps_into_grid() {
        assert_eq!(CellCoord::new(-4, 40).clamped(), CellCoord::new(0, 31));
        assert_eq!(CellCoord::new(7, 9).clamped(), CellCoord::new(7, 9));
        assert!(!CellCoord::new(32, 0).in_bounds());
        assert!(CellCoord::new(31, 31).in_bounds());
    }

    #[test]
    fn rgba_default_is_white() {
        assert_eq!(Rgba::default().to_array(), [1.0, 1.0, 1.0, 1.0]);
    }
}
