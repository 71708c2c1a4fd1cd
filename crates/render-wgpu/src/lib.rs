//! wgpu render backend for composed scene frames.
//!
//! Draws the drawables of a [`voxscene_render::FramePacket`] as instanced
//! cube and sphere meshes, in submission order, sampling a six-layer texture
//! array for textured materials.
//!
//! # Invariants
//! - The backend never mutates scene state.
//! - Consecutive drawables of the same mesh share one draw call; order across
//!   calls matches the packet.

mod gpu;
mod mesh;
mod shaders;

pub use gpu::{FrameTarget, GpuUniforms, InstanceData, WgpuRenderer, mesh_runs};
pub use mesh::{MAX_SPHERE_DIVISIONS, Vertex, cube_mesh, sphere_mesh};

/// Failures that prevent the backend from starting.
#[derive(Debug, thiserror::Error)]
pub enum RenderInitError {
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible GPU adapter found")]
    NoAdapter,
    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
}
