//! Rendering adapter: turns scene state into an ordered list of drawables plus
//! a uniform bundle, and hands both to a backend.
//!
//! # Invariants
//! - Composition reads the scene; the only writes are the per-tick lighting
//!   animation and rain advance.
//! - Emission order is fixed: light markers, fixed props, blocks, raindrops.
//! - Backends receive borrowed frames; the drawable buffer is reused across ticks.

mod composer;
mod drawable;
mod renderer;
pub mod scene;
mod uniforms;

pub use composer::{FramePacket, SceneComposer};
pub use drawable::{Drawable, MeshKind, Primitive};
pub use renderer::{DebugTextRenderer, Renderer};
pub use uniforms::UniformBundle;
