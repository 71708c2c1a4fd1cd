use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use egui::Context as EguiContext;
use glam::Vec3;
use tracing_subscriber::EnvFilter;
use voxscene_assets::{TEXTURE_SIZE, TextureLoader, texture_paths};
use voxscene_common::{SceneConfig, TEXTURE_UNITS};
use voxscene_input::{InputEvent, InputHandler, Slider, Toggle};
use voxscene_kernel::SceneContext;
use voxscene_render::SceneComposer;
use voxscene_render_wgpu::{FrameTarget, RenderInitError, WgpuRenderer};
use voxscene_tools::{FrameTimer, LatestReport, SceneInspector};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "voxscene-desktop", about = "Voxel scene viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Scene configuration (JSON)
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Scene state plus everything the frame loop needs between ticks.
struct AppState {
    scene: SceneContext,
    composer: SceneComposer,
    input: InputHandler,
    report: LatestReport,
    timer: FrameTimer,
    texture_paths: Vec<PathBuf>,
    textures: Option<TextureLoader>,
    started: Instant,
    cursor: (f32, f32),
    show_panel: bool,
}

impl AppState {
    fn new(config: &SceneConfig) -> Result<Self> {
        let scene = SceneContext::from_config(config).context("invalid camera configuration")?;
        Ok(Self {
            scene,
            composer: SceneComposer::new(),
            input: InputHandler::new(config.camera.drag_sensitivity),
            report: LatestReport::default(),
            timer: FrameTimer::default(),
            texture_paths: texture_paths(&config.texture_dir, &config.textures),
            textures: None,
            started: Instant::now(),
            cursor: (0.0, 0.0),
            show_panel: true,
        })
    }

    fn apply(&mut self, event: InputEvent) {
        self.input.handle(&mut self.scene, event);
    }

    fn start_texture_loading(&mut self) {
        match TextureLoader::spawn(self.texture_paths.clone(), TEXTURE_SIZE, TEXTURE_UNITS) {
            Ok(loader) => self.textures = Some(loader),
            Err(e) => tracing::warn!("texture loading disabled: {e}"),
        }
    }

    fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if !pressed {
            return;
        }
        if key == KeyCode::F1 {
            self.show_panel = !self.show_panel;
            return;
        }
        if let Some(c) = key_char(key) {
            self.apply(InputEvent::Key(c));
        }
    }

    fn draw_ui(&mut self, ctx: &EguiContext) {
        if !self.show_panel {
            return;
        }

        let summary = SceneInspector::summary(&self.scene);
        let lighting = &self.scene.lighting;
        let mut events = Vec::new();

        egui::SidePanel::left("scene_panel")
            .default_width(280.0)
            .show(ctx, |ui| {
                ui.heading("Voxel Scene");
                ui.separator();
                ui.monospace(self.report.text());
                ui.label(format!(
                    "avg {:.2} ms  max {:.2} ms",
                    self.timer.average().as_secs_f64() * 1000.0,
                    self.timer.max().as_secs_f64() * 1000.0
                ));
                ui.separator();
                ui.label(summary.to_string());
                ui.separator();

                ui.heading("Lighting");
                let mut toggles = [
                    (Toggle::NormalDebug, "Show normals", lighting.normal_debug),
                    (Toggle::LightAnimation, "Animate light", lighting.animated),
                    (Toggle::PointLight, "Point light", lighting.point.enabled),
                    (Toggle::Spotlight, "Spotlight", lighting.spot.enabled),
                ];
                for (toggle, label, value) in &mut toggles {
                    if ui.checkbox(value, *label).changed() {
                        events.push(InputEvent::Toggle(*toggle, *value));
                    }
                }

                ui.separator();
                slider_group(
                    ui,
                    "Light position",
                    ["x", "y", "z"],
                    lighting.point.position,
                    -20.0..=20.0,
                    |axis| Slider::LightPosition { axis },
                    &mut events,
                );
                slider_group(
                    ui,
                    "Light color",
                    ["r", "g", "b"],
                    lighting.point.color,
                    0.0..=1.0,
                    |axis| Slider::LightColor { axis },
                    &mut events,
                );
                slider_group(
                    ui,
                    "Spotlight position",
                    ["x", "y", "z"],
                    lighting.spot.position,
                    -20.0..=20.0,
                    |axis| Slider::SpotlightPosition { axis },
                    &mut events,
                );

                ui.separator();
                ui.small("WASD: move | Q/E: turn | F/G: add/remove block | LMB drag: look | F1: panel");
            });

        for event in events {
            self.apply(event);
        }
    }
}

fn slider_group(
    ui: &mut egui::Ui,
    label: &str,
    names: [&str; 3],
    value: Vec3,
    range: RangeInclusive<f32>,
    slider: impl Fn(usize) -> Slider,
    events: &mut Vec<InputEvent>,
) {
    ui.label(label);
    for (axis, name) in names.into_iter().enumerate() {
        let mut v = value[axis];
        if ui
            .add(egui::Slider::new(&mut v, range.clone()).text(name))
            .changed()
        {
            events.push(InputEvent::Slider(slider(axis), v));
        }
    }
}

fn key_char(key: KeyCode) -> Option<char> {
    let c = match key {
        KeyCode::KeyW => 'w',
        KeyCode::KeyS => 's',
        KeyCode::KeyA => 'a',
        KeyCode::KeyD => 'd',
        KeyCode::KeyQ => 'q',
        KeyCode::KeyE => 'e',
        KeyCode::KeyF => 'f',
        KeyCode::KeyG => 'g',
        _ => return None,
    };
    Some(c)
}

/// Device, surface and the two renderers drawing into it.
struct Gpu {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuRenderer,
    egui_renderer: egui_wgpu::Renderer,
}

impl Gpu {
    fn new(window: Arc<Window>) -> Result<Self, RenderInitError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or(RenderInitError::NoAdapter)?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("voxscene_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))?;

        let size = window.inner_size();
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or(caps.formats.first())
            .copied()
            .ok_or(RenderInitError::NoSurfaceFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = WgpuRenderer::new(&device, &queue, format, config.width, config.height);
        let egui_renderer = egui_wgpu::Renderer::new(&device, format, None, 1, false);

        tracing::info!(
            backend = adapter.get_info().backend.to_str(),
            ?format,
            "GPU initialized"
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            renderer,
            egui_renderer,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.config.width = width.max(1);
        self.config.height = height.max(1);
        self.surface.configure(&self.device, &self.config);
        self.renderer
            .resize(&self.device, self.config.width, self.config.height);
    }

    fn aspect(&self) -> f32 {
        self.config.width as f32 / self.config.height.max(1) as f32
    }

    fn draw_egui(
        &mut self,
        view: &wgpu::TextureView,
        paint_jobs: &[egui::ClippedPrimitive],
        textures_delta: &egui::TexturesDelta,
        pixels_per_point: f32,
    ) {
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point,
        };
        for (id, image_delta) in &textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            self.egui_renderer
                .render(&mut pass, paint_jobs, &screen_descriptor);
        }
        self.queue.submit(std::iter::once(encoder.finish()));
        for id in &textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}

struct GpuApp {
    state: AppState,
    window: Option<Arc<Window>>,
    gpu: Option<Gpu>,
    egui_ctx: EguiContext,
    egui_winit: Option<egui_winit::State>,
    init_error: Option<anyhow::Error>,
}

impl GpuApp {
    fn new(state: AppState) -> Self {
        Self {
            state,
            window: None,
            gpu: None,
            egui_ctx: EguiContext::default(),
            egui_winit: None,
            init_error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        tracing::error!("startup failed: {error:#}");
        self.init_error = Some(error);
        event_loop.exit();
    }

    fn redraw(&mut self) {
        let (Some(window), Some(gpu), Some(egui_winit)) =
            (&self.window, &mut self.gpu, &mut self.egui_winit)
        else {
            return;
        };

        if let Some(loader) = &mut self.state.textures {
            for image in loader.poll() {
                gpu.renderer.upload_texture(&gpu.queue, &image);
            }
            if loader.is_finished() {
                self.state.textures = None;
            }
        }

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let state = &mut self.state;
        let seconds = state.started.elapsed().as_secs_f64();
        {
            let mut target = FrameTarget {
                renderer: &mut gpu.renderer,
                device: &gpu.device,
                queue: &gpu.queue,
                view: &view,
            };
            let mut sinks = (&mut state.report, &mut state.timer);
            state
                .composer
                .tick(&mut state.scene, seconds, &mut target, &mut sinks);
        }

        let raw_input = egui_winit.take_egui_input(window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| state.draw_ui(ctx));
        egui_winit.handle_platform_output(window, full_output.platform_output);
        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        gpu.draw_egui(
            &view,
            &paint_jobs,
            &full_output.textures_delta,
            full_output.pixels_per_point,
        );

        output.present();
        window.request_redraw();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Voxel Scene")
            .with_inner_size(PhysicalSize::new(1280u32, 720));
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                self.fail(event_loop, anyhow::Error::new(e).context("failed to create window"));
                return;
            }
        };

        let gpu = match Gpu::new(window.clone()) {
            Ok(gpu) => gpu,
            Err(e) => {
                self.fail(event_loop, e.into());
                return;
            }
        };
        self.state.scene.camera.set_aspect(gpu.aspect());

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.egui_winit = Some(egui_winit);
        self.state.start_texture_loading();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let (Some(egui_winit), Some(window)) = (&mut self.egui_winit, &self.window) {
            if egui_winit.on_window_event(window, &event).consumed {
                // A drag released over the panel still ends the drag.
                if matches!(
                    event,
                    WindowEvent::MouseInput {
                        state: ElementState::Released,
                        ..
                    }
                ) {
                    self.state.apply(InputEvent::PointerUp);
                }
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size.width, new_size.height);
                    self.state.scene.camera.set_aspect(gpu.aspect());
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                self.state
                    .handle_key(key, key_state == ElementState::Pressed);
            }
            WindowEvent::CursorMoved { position, .. } => {
                let (x, y) = (position.x as f32, position.y as f32);
                self.state.cursor = (x, y);
                self.state.apply(InputEvent::PointerMove { x, y });
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state: btn_state,
                ..
            } => {
                let event = if btn_state == ElementState::Pressed {
                    let (x, y) = self.state.cursor;
                    InputEvent::PointerDown { x, y }
                } else {
                    InputEvent::PointerUp
                };
                self.state.apply(event);
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("voxscene-desktop starting");

    let config = SceneConfig::load_or_default(cli.config.as_deref())?;
    let state = AppState::new(&config)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(state);
    event_loop.run_app(&mut app)?;

    if let Some(error) = app.init_error.take() {
        return Err(error.context("render backend failed to start"));
    }
    Ok(())
}
