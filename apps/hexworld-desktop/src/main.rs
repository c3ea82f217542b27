use anyhow::{Context, Result};
use clap::Parser;
use egui::Context as EguiContext;
use hexworld_input::{CursorAction, Key, MouseButton};
use hexworld_kernel::{DemoConfig, HeightSource, Session};
use hexworld_render::RenderView;
use hexworld_render_wgpu::WgpuRenderer;
use hexworld_scene::Scene;
use hexworld_tools::{ObjectSliders, SceneInspector, SceneSummary};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window, WindowId};

#[derive(Parser)]
#[command(name = "hexworld-desktop", about = "Fly over a procedurally raised hex world")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML config file; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Cells per side of the square grid
    #[arg(long)]
    extent: Option<u32>,

    /// Terrain seed
    #[arg(long)]
    seed: Option<u64>,

    /// Put every cell at the base height
    #[arg(long)]
    flat: bool,
}

impl Cli {
    fn demo_config(&self) -> Result<DemoConfig> {
        let mut config = match &self.config {
            Some(path) => DemoConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => DemoConfig::default(),
        };
        if let Some(extent) = self.extent {
            config.grid.extent = extent;
        }
        if let Some(seed) = self.seed {
            config.terrain.seed = seed;
        }
        if self.flat {
            config.height_source = HeightSource::Flat;
        }
        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::KeyW => Some(Key::W),
        KeyCode::KeyA => Some(Key::A),
        KeyCode::KeyS => Some(Key::S),
        KeyCode::KeyD => Some(Key::D),
        KeyCode::Escape => Some(Key::Escape),
        _ => None,
    }
}

fn map_button(button: winit::event::MouseButton) -> MouseButton {
    use winit::event::MouseButton as W;
    match button {
        W::Left => MouseButton::Primary,
        W::Right => MouseButton::Secondary,
        W::Middle => MouseButton::Middle,
        W::Back => MouseButton::Other(3),
        W::Forward => MouseButton::Other(4),
        W::Other(n) => MouseButton::Other(n),
    }
}

fn element_state(event: &WindowEvent) -> Option<ElementState> {
    match event {
        WindowEvent::KeyboardInput { event, .. } => Some(event.state),
        WindowEvent::MouseInput { state, .. } => Some(*state),
        _ => None,
    }
}

/// Whether egui may swallow an event. While looking the pointer belongs to
/// the camera; releases always reach the session so nothing stays held.
fn ui_may_consume(looking: bool, state: Option<ElementState>) -> bool {
    !looking && state != Some(ElementState::Released)
}

fn apply_cursor(window: &Window, action: CursorAction) {
    match action {
        CursorAction::None => {}
        CursorAction::Lock => {
            let grabbed = window
                .set_cursor_grab(CursorGrabMode::Confined)
                .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked));
            if let Err(e) = grabbed {
                tracing::warn!("cursor grab failed: {e}");
            }
            window.set_cursor_visible(false);
        }
        CursorAction::Unlock => {
            if let Err(e) = window.set_cursor_grab(CursorGrabMode::None) {
                tracing::warn!("cursor release failed: {e}");
            }
            window.set_cursor_visible(true);
        }
    }
}

fn draw_ui(
    ctx: &EguiContext,
    summary: &SceneSummary,
    sliders: &ObjectSliders,
    scene: &mut Scene,
) {
    egui::Window::new("Objects")
        .default_width(300.0)
        .show(ctx, |ui| {
            ui.label(format!(
                "Frame {}  Objects {}  Cell {}",
                summary.frame, summary.objects, summary.camera_cell
            ));
            ui.label(format!(
                "Eye ({:.1}, {:.1}, {:.1})",
                summary.eye[0], summary.eye[1], summary.eye[2]
            ));
            ui.separator();
            sliders.for_each_live(scene, |binding, position| {
                ui.label(&binding.label);
                let range = binding.min..=binding.max;
                ui.add(egui::Slider::new(&mut position.x, range.clone()).text("x"));
                ui.add(egui::Slider::new(&mut position.y, range.clone()).text("y"));
                ui.add(egui::Slider::new(&mut position.z, range).text("z"));
            });
            ui.separator();
            ui.small("RMB: Look | WASD: Move | Esc: Release");
        });
}

/// Window, surface and the two renderers, created on first resume.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl Gpu {
    fn new(event_loop: &ActiveEventLoop, egui_ctx: &EguiContext) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title("Hex World")
            .with_inner_size(PhysicalSize::new(1280u32, 720));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("creating window")?,
        );

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("creating surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("no suitable graphics adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("hexworld_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("creating device")?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("surface reports no formats")?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = WgpuRenderer::new(&device, surface_format, config.width, config.height);

        let egui_winit = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            egui_winit,
            egui_renderer,
        })
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.config.width = size.width.max(1);
        self.config.height = size.height.max(1);
        self.surface.configure(&self.device, &self.config);
        self.renderer
            .resize(&self.device, self.config.width, self.config.height);
    }

    fn render_view(&self) -> RenderView {
        RenderView::with_viewport(self.config.width, self.config.height)
    }
}

struct App {
    session: Session,
    sliders: ObjectSliders,
    egui_ctx: EguiContext,
    gpu: Option<Gpu>,
    last_frame: Instant,
}

impl App {
    fn new(config: &DemoConfig) -> Result<Self> {
        let session = Session::new(config).context("building the hex world")?;
        Ok(Self {
            session,
            sliders: ObjectSliders::new(config.inspector.clone()),
            egui_ctx: EguiContext::default(),
            gpu: None,
            last_frame: Instant::now(),
        })
    }

    fn cursor(&self, action: CursorAction) {
        if let Some(gpu) = &self.gpu {
            apply_cursor(&gpu.window, action);
        }
    }

    fn redraw(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32().min(0.1);
        self.last_frame = now;

        let Some(gpu) = &mut self.gpu else {
            return;
        };

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

        // Widgets edit the scene first, then the session moves the camera.
        let summary = SceneInspector::summary(&self.session);
        let raw_input = gpu.egui_winit.take_egui_input(&gpu.window);
        let egui_ctx = &self.egui_ctx;
        let sliders = &self.sliders;
        let mut full_output = None;
        self.session.frame(dt, |scene| {
            full_output = Some(egui_ctx.run(raw_input, |ctx| {
                draw_ui(ctx, &summary, sliders, scene);
            }));
        });

        let render_view = gpu.render_view();
        gpu.renderer.render(
            &gpu.device,
            &gpu.queue,
            &view,
            self.session.scene(),
            &render_view,
        );

        if let Some(full_output) = full_output {
            gpu.egui_winit
                .handle_platform_output(&gpu.window, full_output.platform_output);

            let paint_jobs = self
                .egui_ctx
                .tessellate(full_output.shapes, full_output.pixels_per_point);
            let screen_descriptor = egui_wgpu::ScreenDescriptor {
                size_in_pixels: [gpu.config.width, gpu.config.height],
                pixels_per_point: full_output.pixels_per_point,
            };

            for (id, image_delta) in &full_output.textures_delta.set {
                gpu.egui_renderer
                    .update_texture(&gpu.device, &gpu.queue, *id, image_delta);
            }
            let mut encoder = gpu
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("egui_encoder"),
                });
            gpu.egui_renderer.update_buffers(
                &gpu.device,
                &gpu.queue,
                &mut encoder,
                &paint_jobs,
                &screen_descriptor,
            );
            {
                let mut pass = encoder
                    .begin_render_pass(&wgpu::RenderPassDescriptor {
                        label: Some("egui_pass"),
                        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                            view: &view,
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
                gpu.egui_renderer
                    .render(&mut pass, &paint_jobs, &screen_descriptor);
            }
            gpu.queue.submit(std::iter::once(encoder.finish()));
            for id in &full_output.textures_delta.free {
                gpu.egui_renderer.free_texture(id);
            }
        }

        output.present();
        gpu.window.request_redraw();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }
        match Gpu::new(event_loop, &self.egui_ctx) {
            Ok(gpu) => self.gpu = Some(gpu),
            Err(e) => {
                tracing::error!("graphics setup failed: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(gpu) = &mut self.gpu {
            let consumed = gpu.egui_winit.on_window_event(&gpu.window, &event).consumed;
            if consumed && ui_may_consume(self.session.is_looking(), element_state(&event)) {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size);
                }
            }
            WindowEvent::Focused(false) => {
                let action = self.session.focus_lost();
                self.cursor(action);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        ..
                    },
                ..
            } => {
                if let Some(key) = map_key(code) {
                    let action = self.session.key(key, state == ElementState::Pressed);
                    self.cursor(action);
                }
            }
            WindowEvent::MouseInput { button, state, .. } => {
                let button = map_button(button);
                let action = match state {
                    ElementState::Pressed => self.session.mouse_button_down(button),
                    ElementState::Released => self.session.mouse_button_up(button),
                };
                self.cursor(action);
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.session.mouse_motion(delta.0 as f32, delta.1 as f32);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    tracing::info!("hexworld-desktop starting");

    let config = cli.demo_config()?;
    let mut app = App::new(&config)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop.run_app(&mut app)?;

    Ok(())
}
