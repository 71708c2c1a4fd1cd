use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use voxscene_assets::{TEXTURE_SIZE, TextureImage};
use voxscene_common::TEXTURE_UNITS;
use voxscene_render::{Drawable, FramePacket, MeshKind, Renderer, UniformBundle};
use wgpu::util::DeviceExt;

use crate::mesh::{Vertex, cube_mesh, sphere_mesh};
use crate::shaders;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
const INITIAL_INSTANCE_CAPACITY: usize = 4096;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct GpuUniforms {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub light_position: [f32; 4],
    pub light_color: [f32; 4],
    pub spot_position: [f32; 4],
    pub spot_direction: [f32; 4],
    pub camera_position: [f32; 4],
    /// `[light_on, spot_on, cos_cutoff, exponent]`
    pub flags: [f32; 4],
}

fn flag(on: bool) -> f32 {
    if on { 1.0 } else { 0.0 }
}

impl GpuUniforms {
    pub fn from_bundle(u: &UniformBundle) -> Self {
        Self {
            view: u.view.to_cols_array_2d(),
            projection: u.projection.to_cols_array_2d(),
            light_position: u.light_position.extend(1.0).to_array(),
            light_color: u.light_color.extend(1.0).to_array(),
            spot_position: u.spot_position.extend(1.0).to_array(),
            spot_direction: u.spot_direction.extend(0.0).to_array(),
            camera_position: u.camera_position.extend(1.0).to_array(),
            flags: [
                flag(u.light_on),
                flag(u.spot_on),
                u.spot_cos_cutoff,
                u.spot_exponent,
            ],
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct InstanceData {
    pub model_0: [f32; 4],
    pub model_1: [f32; 4],
    pub model_2: [f32; 4],
    pub model_3: [f32; 4],
    pub color: [f32; 4],
    pub material: i32,
}

impl InstanceData {
    pub fn from_drawable(d: &Drawable) -> Self {
        let cols = d.transform.to_cols_array_2d();
        Self {
            model_0: cols[0],
            model_1: cols[1],
            model_2: cols[2],
            model_3: cols[3],
            color: d.color.to_array(),
            material: d.material.index(),
        }
    }
}

/// Split drawables into maximal runs of the same mesh, preserving order.
pub fn mesh_runs(drawables: &[Drawable]) -> Vec<(MeshKind, Range<u32>)> {
    let mut runs: Vec<(MeshKind, Range<u32>)> = Vec::new();
    for (i, d) in drawables.iter().enumerate() {
        let i = i as u32;
        match runs.last_mut() {
            Some((mesh, range)) if *mesh == d.mesh => range.end = i + 1,
            _ => runs.push((d.mesh, i..i + 1)),
        }
    }
    runs
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    fn upload(device: &wgpu::Device, label: &str, (vertices, indices): (Vec<Vertex>, Vec<u16>)) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}_vertex_buffer")),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}_index_buffer")),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
        }
    }
}

/// wgpu scene renderer.
pub struct WgpuRenderer {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    cube: GpuMesh,
    sphere: GpuMesh,
    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,
    instances: Vec<InstanceData>,
    texture_array: wgpu::Texture,
    depth_texture: wgpu::TextureView,
}

impl WgpuRenderer {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("uniform_buffer"),
            contents: bytemuck::bytes_of(&GpuUniforms::from_bundle(&UniformBundle::default())),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let texture_array = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("scene_textures"),
            size: wgpu::Extent3d {
                width: TEXTURE_SIZE,
                height: TEXTURE_SIZE,
                depth_or_array_layers: TEXTURE_UNITS as u32,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let texture_view = texture_array.create_view(&wgpu::TextureViewDescriptor {
            label: Some("scene_textures_view"),
            dimension: Some(wgpu::TextureViewDimension::D2Array),
            ..Default::default()
        });
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("scene_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2Array,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bind_group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&texture_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::SCENE_SHADER.into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("scene_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<Vertex>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &wgpu::vertex_attr_array![
                            0 => Float32x3,
                            1 => Float32x3,
                            2 => Float32x2,
                        ],
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<InstanceData>() as u64,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &wgpu::vertex_attr_array![
                            3 => Float32x4,
                            4 => Float32x4,
                            5 => Float32x4,
                            6 => Float32x4,
                            7 => Float32x4,
                            8 => Sint32,
                        ],
                    },
                ],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            // Light markers are mirrored cubes, so both windings must draw.
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let cube = GpuMesh::upload(device, "cube", cube_mesh());
        let sphere = GpuMesh::upload(device, "sphere", sphere_mesh(16, 24));

        let instance_buffer = Self::create_instance_buffer(device, INITIAL_INSTANCE_CAPACITY);
        let depth_texture = Self::create_depth_texture(device, width, height);

        let renderer = Self {
            pipeline,
            uniform_buffer,
            bind_group,
            cube,
            sphere,
            instance_buffer,
            instance_capacity: INITIAL_INSTANCE_CAPACITY,
            instances: Vec::with_capacity(INITIAL_INSTANCE_CAPACITY),
            texture_array,
            depth_texture,
        };
        for unit in 0..TEXTURE_UNITS {
            renderer.upload_texture(queue, &TextureImage::placeholder(unit, TEXTURE_SIZE));
        }
        renderer
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    /// Replace one layer of the texture array. Returns `false` (and leaves the
    /// layer untouched) if the unit or size does not fit.
    pub fn upload_texture(&self, queue: &wgpu::Queue, image: &TextureImage) -> bool {
        let expected_len = (TEXTURE_SIZE as usize) * (TEXTURE_SIZE as usize) * 4;
        if image.unit >= TEXTURE_UNITS
            || image.width != TEXTURE_SIZE
            || image.height != TEXTURE_SIZE
            || image.pixels.len() != expected_len
        {
            tracing::warn!(
                unit = image.unit,
                width = image.width,
                height = image.height,
                "rejecting texture that does not fit the texture array"
            );
            return false;
        }
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture_array,
                mip_level: 0,
                origin: wgpu::Origin3d {
                    x: 0,
                    y: 0,
                    z: image.unit as u32,
                },
                aspect: wgpu::TextureAspect::All,
            },
            &image.pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * image.width),
                rows_per_image: Some(image.height),
            },
            wgpu::Extent3d {
                width: image.width,
                height: image.height,
                depth_or_array_layers: 1,
            },
        );
        true
    }

    /// Draw one composed frame into `view`.
    pub fn draw(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        frame: &FramePacket<'_>,
    ) {
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&GpuUniforms::from_bundle(&frame.uniforms)),
        );

        self.instances.clear();
        self.instances
            .extend(frame.drawables.iter().map(InstanceData::from_drawable));
        if self.instances.len() > self.instance_capacity {
            self.instance_capacity = self.instances.len().next_power_of_two();
            self.instance_buffer = Self::create_instance_buffer(device, self.instance_capacity);
            tracing::debug!(capacity = self.instance_capacity, "grew instance buffer");
        }
        if !self.instances.is_empty() {
            queue.write_buffer(
                &self.instance_buffer,
                0,
                bytemuck::cast_slice(&self.instances),
            );
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("scene_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.bind_group, &[]);
            pass.set_vertex_buffer(1, self.instance_buffer.slice(..));

            for (mesh, range) in mesh_runs(frame.drawables) {
                let gpu_mesh = match mesh {
                    MeshKind::Cube => &self.cube,
                    MeshKind::Sphere => &self.sphere,
                };
                pass.set_vertex_buffer(0, gpu_mesh.vertex_buffer.slice(..));
                pass.set_index_buffer(gpu_mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                pass.draw_indexed(0..gpu_mesh.index_count, 0, range);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instance_buffer"),
            size: (capacity * std::mem::size_of::<InstanceData>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn create_depth_texture(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}

/// A [`WgpuRenderer`] bound to one acquired surface texture.
pub struct FrameTarget<'a> {
    pub renderer: &'a mut WgpuRenderer,
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub view: &'a wgpu::TextureView,
}

impl Renderer for FrameTarget<'_> {
    type Output = ();

    fn render(&mut self, frame: &FramePacket<'_>) {
        self.renderer.draw(self.device, self.queue, self.view, frame);
    }
}
