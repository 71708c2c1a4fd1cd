use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::thread;

use crate::{AssetError, TextureImage, decode_texture};

/// Load status of one texture unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureState {
    Pending,
    Ready,
    Failed,
}

/// Message from the loader thread.
#[derive(Debug)]
pub enum TextureEvent {
    Loaded(TextureImage),
    Failed { unit: usize, error: AssetError },
}

/// Decodes the texture list on a background thread.
///
/// The frame loop calls [`TextureLoader::poll`] once per tick and uploads
/// whatever has arrived.
pub struct TextureLoader {
    rx: Receiver<TextureEvent>,
    states: Vec<TextureState>,
}

impl TextureLoader {
    /// Start loading `paths`, one unit per path in order. At most `max_units`
    /// paths are accepted.
    pub fn spawn(paths: Vec<PathBuf>, size: u32, max_units: usize) -> Result<Self, AssetError> {
        if paths.len() > max_units {
            return Err(AssetError::UnitOutOfRange {
                unit: paths.len() - 1,
                max: max_units.saturating_sub(1),
            });
        }
        let (tx, rx) = mpsc::channel();
        let states = vec![TextureState::Pending; paths.len()];
        thread::Builder::new()
            .name("texture-loader".into())
            .spawn(move || {
                for (unit, path) in paths.into_iter().enumerate() {
                    let event = match decode_texture(unit, &path, size) {
                        Ok(image) => TextureEvent::Loaded(image),
                        Err(error) => TextureEvent::Failed { unit, error },
                    };
                    if tx.send(event).is_err() {
                        break;
                    }
                }
            })
            .map_err(|source| AssetError::Io {
                path: PathBuf::from("<texture-loader thread>"),
                source,
            })?;
        Ok(Self { rx, states })
    }

    /// Drain finished textures without blocking.
    pub fn poll(&mut self) -> Vec<TextureImage> {
        let mut ready = Vec::new();
        for event in self.rx.try_iter() {
            match event {
                TextureEvent::Loaded(image) => {
                    tracing::info!(unit = image.unit, "texture loaded");
                    if let Some(state) = self.states.get_mut(image.unit) {
                        *state = TextureState::Ready;
                    }
                    ready.push(image);
                }
                TextureEvent::Failed { unit, error } => {
                    tracing::warn!(unit, %error, "texture failed to load, keeping placeholder");
                    if let Some(state) = self.states.get_mut(unit) {
                        *state = TextureState::Failed;
                    }
                }
            }
        }
        ready
    }

    pub fn states(&self) -> &[TextureState] {
        &self.states
    }

    pub fn is_finished(&self) -> bool {
        self.states.iter().all(|s| *s != TextureState::Pending)
    }
}
