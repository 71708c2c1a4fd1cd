//! Texture assets: decoding, placeholders and a background loader.
//!
//! Textures are bound to fixed units in list order. Loading never blocks the
//! frame loop; until a unit's image arrives the backend samples a placeholder.

mod loader;

pub use loader::{TextureEvent, TextureLoader, TextureState};

use std::path::{Path, PathBuf};

use image::imageops::FilterType;

/// Edge length every texture is resized to, so all units fit one array texture.
pub const TEXTURE_SIZE: u32 = 256;

/// Placeholder texel shown until a unit finishes loading.
pub const PLACEHOLDER_TEXEL: [u8; 4] = [128, 128, 128, 255];

/// Errors from texture loading.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("texture unit {unit} out of range (max {max})")]
    UnitOutOfRange { unit: usize, max: usize },
}

/// Decoded RGBA8 pixels for one texture unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureImage {
    pub unit: usize,
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA8 rows.
    pub pixels: Vec<u8>,
}

impl TextureImage {
    /// A solid square of [`PLACEHOLDER_TEXEL`].
    pub fn placeholder(unit: usize, size: u32) -> Self {
        let texels = (size as usize) * (size as usize);
        Self {
            unit,
            width: size,
            height: size,
            pixels: PLACEHOLDER_TEXEL.repeat(texels),
        }
    }
}

/// Decode an image file and resize it to `size` x `size` RGBA8.
pub fn decode_texture(unit: usize, path: &Path, size: u32) -> Result<TextureImage, AssetError> {
    let bytes = std::fs::read(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let decoded = image::load_from_memory(&bytes).map_err(|source| AssetError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let mut rgba = decoded.to_rgba8();
    if rgba.width() != size || rgba.height() != size {
        rgba = image::imageops::resize(&rgba, size, size, FilterType::Triangle);
    }
    Ok(TextureImage {
        unit,
        width: size,
        height: size,
        pixels: rgba.into_raw(),
    })
}

/// Resolve the texture list against a directory, in unit order.
pub fn texture_paths(dir: &Path, names: &[String]) -> Vec<PathBuf> {
    names.iter().map(|name| dir.join(name)).collect()
}
