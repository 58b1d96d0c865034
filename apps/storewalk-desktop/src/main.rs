use anyhow::Result;
use clap::Parser;
use egui::Context as EguiContext;
use std::sync::Arc;
use std::sync::mpsc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window, WindowId};

use storewalk_assets::{AssetStore, LoadSet, LoadToken, ModelInfo};
use storewalk_audio::AudioChannel;
use storewalk_common::BoundaryVolume;
use storewalk_input::InputState;
use storewalk_player::{PlayerController, PointerLock, WalkCamera};
use storewalk_render_wgpu::WgpuRenderer;
use storewalk_scene::{SceneConfig, SceneGraph};

#[derive(Parser)]
#[command(name = "storewalk-desktop", about = "First-person store walkthrough")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Scene config JSON; defaults to the built-in retail store
    #[arg(long)]
    scene: Option<String>,

    /// Disable background audio
    #[arg(long)]
    mute: bool,
}

/// Result of one background model load.
struct LoadResult {
    placement: usize,
    outcome: Result<ModelInfo, String>,
}

/// Application state advanced once per frame.
struct AppState {
    config: SceneConfig,
    scene: SceneGraph,
    camera: WalkCamera,
    controller: PlayerController,
    boundary: Option<BoundaryVolume>,
    input: InputState,
    lock: PointerLock,
    loads: LoadSet,
    load_tokens: Vec<LoadToken>,
    load_rx: mpsc::Receiver<LoadResult>,
    audio: AudioChannel,
    ready: bool,
    wants_capture: bool,
    wants_release: bool,
}

impl AppState {
    fn new(config: SceneConfig, mute: bool) -> Result<Self> {
        let scene = SceneGraph::assemble(&config);
        let boundary = config.boundary.volume()?;

        let controller = PlayerController::new(config.player.speed, config.player.eye_height);
        let mut camera = WalkCamera {
            fov: config.camera.fov_degrees.to_radians(),
            near: config.camera.near,
            far: config.camera.far,
            ..WalkCamera::default()
        };
        controller.place(&mut camera, config.camera.spawn);
        camera.look_at(config.camera.look_at);

        let mut loads = LoadSet::new();
        let load_tokens: Vec<LoadToken> = config
            .placements
            .iter()
            .map(|p| loads.track(&p.name))
            .collect();
        let load_rx = spawn_model_loader(&config);

        let audio = AudioChannel::new(
            config.audio.track.clone(),
            if mute { 0.0 } else { config.audio.volume },
            config.audio.looped,
        );

        Ok(Self {
            config,
            scene,
            camera,
            controller,
            boundary,
            input: InputState::new(),
            lock: PointerLock::new(),
            loads,
            load_tokens,
            load_rx,
            audio,
            ready: false,
            wants_capture: false,
            wants_release: false,
        })
    }

    /// One tick: drain finished loads, then advance and clamp the player.
    fn update(&mut self) {
        while let Ok(result) = self.load_rx.try_recv() {
            let token = self.load_tokens[result.placement];
            match result.outcome {
                Ok(info) => {
                    self.scene
                        .add_loaded_model(&self.config.placements[result.placement], &info);
                    self.loads.complete(token);
                }
                Err(e) => self.loads.fail(token, &e),
            }
        }
        if self.loads.take_ready() {
            self.ready = true;
        }

        if self.lock.is_locked() {
            self.controller
                .advance(&mut self.camera, &self.input, &self.config.bindings);
            if let Some(boundary) = &self.boundary {
                self.camera.position = boundary.clamp(self.camera.position);
            }
        }
    }

    fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        // winit's KeyCode debug names match the logical codes the bindings
        // use ("KeyW", "KeyA", ...).
        self.input.set_key(&format!("{key:?}"), pressed);

        if key == KeyCode::Escape && !pressed && self.lock.is_locked() {
            self.wants_release = true;
        }
    }

    fn draw_ui(&mut self, ctx: &EguiContext) {
        if self.lock.is_locked() {
            return;
        }

        egui::Window::new("start_overlay")
            .title_bar(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading(self.config.name.as_str());
                    ui.add_space(12.0);
                    if self.ready {
                        // The button press is the user gesture that gates
                        // both pointer capture and audio playback.
                        if ui.button("  Play  ").clicked() {
                            self.wants_capture = true;
                        }
                    } else {
                        ui.label(format!(
                            "Loading... ({} of {} models)",
                            self.loads.total() - self.loads.pending(),
                            self.loads.total()
                        ));
                        ui.spinner();
                    }
                    ui.add_space(6.0);
                    ui.small("WASD: Move | Mouse: Look | Esc: Release");
                });
            });
    }
}

/// Import each placed model's glTF metadata off the main thread and report
/// per-placement outcomes. The tick loop never waits on this.
fn spawn_model_loader(config: &SceneConfig) -> mpsc::Receiver<LoadResult> {
    let (tx, rx) = mpsc::channel();
    let placements: Vec<(String, String)> = config
        .placements
        .iter()
        .map(|p| (p.name.clone(), p.model.clone()))
        .collect();

    if let Err(e) = std::thread::Builder::new()
        .name("storewalk-loader".to_string())
        .spawn(move || {
            let mut store = AssetStore::new();
            for (i, (name, model)) in placements.iter().enumerate() {
                let outcome = match store.import_gltf(name, model) {
                    Ok(id) => store
                        .get(id)
                        .cloned()
                        .ok_or_else(|| "registry lookup failed".to_string()),
                    Err(e) => Err(e.to_string()),
                };
                if tx.send(LoadResult { placement: i, outcome }).is_err() {
                    return;
                }
            }
        })
    {
        tracing::warn!("could not spawn loader thread: {e}");
    }
    rx
}

struct GpuApp {
    state: AppState,
    window: Option<Arc<Window>>,
    surface: Option<wgpu::Surface<'static>>,
    device: Option<wgpu::Device>,
    queue: Option<wgpu::Queue>,
    config: Option<wgpu::SurfaceConfiguration>,
    renderer: Option<WgpuRenderer>,
    egui_ctx: EguiContext,
    egui_winit: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
}

impl GpuApp {
    fn new(state: AppState) -> Self {
        Self {
            state,
            window: None,
            surface: None,
            device: None,
            queue: None,
            config: None,
            renderer: None,
            egui_ctx: EguiContext::default(),
            egui_winit: None,
            egui_renderer: None,
        }
    }

    /// Ask the host for pointer capture. The gesture already happened (the
    /// Play click); the host may still refuse, in which case the rig stays
    /// Unlocked and the overlay stays up.
    fn try_capture(&mut self) {
        let Some(window) = &self.window else {
            return;
        };
        let grabbed = window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
        match grabbed {
            Ok(()) => {
                self.state.lock.request(true);
                window.set_cursor_visible(false);
                self.state.audio.play();
            }
            Err(e) => {
                tracing::warn!("pointer capture refused by host: {e}");
            }
        }
    }

    fn release_capture(&mut self) {
        if let Some(window) = &self.window {
            let _ = window.set_cursor_grab(CursorGrabMode::None);
            window.set_cursor_visible(true);
        }
        self.state.lock.release();
        self.state.input.clear();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("storewalk")
            .with_inner_size(PhysicalSize::new(1280u32, 720));
        let window = Arc::new(event_loop.create_window(attrs).expect("create window"));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .expect("create surface");

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("find adapter");

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("storewalk_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .expect("create device");

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        self.state.camera.aspect = size.width as f32 / size.height.max(1) as f32;

        let renderer = WgpuRenderer::new(&device, surface_format, size.width, size.height);

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        self.window = Some(window);
        self.surface = Some(surface);
        self.device = Some(device);
        self.queue = Some(queue);
        self.config = Some(config);
        self.renderer = Some(renderer);
        self.egui_winit = Some(egui_winit);
        self.egui_renderer = Some(egui_renderer);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // The overlay owns the mouse only while the pointer is uncaptured.
        if !self.state.lock.is_locked() {
            if let Some(egui_winit) = &mut self.egui_winit {
                let response = egui_winit.on_window_event(self.window.as_ref().unwrap(), &event);
                if response.consumed {
                    return;
                }
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let (Some(surface), Some(device), Some(config)) =
                    (&self.surface, &self.device, &mut self.config)
                {
                    config.width = new_size.width.max(1);
                    config.height = new_size.height.max(1);
                    surface.configure(device, config);
                    self.state.camera.aspect =
                        config.width as f32 / config.height.max(1) as f32;
                    if let Some(renderer) = &mut self.renderer {
                        renderer.resize(device, config.width, config.height);
                    }
                }
            }
            WindowEvent::Focused(false) => {
                self.state.input.clear();
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
            WindowEvent::RedrawRequested => {
                self.state.update();
                if self.state.wants_capture {
                    self.state.wants_capture = false;
                    self.try_capture();
                }
                if self.state.wants_release {
                    self.state.wants_release = false;
                    self.release_capture();
                }

                let (Some(surface), Some(device), Some(queue)) =
                    (&self.surface, &self.device, &self.queue)
                else {
                    return;
                };

                let output = match surface.get_current_texture() {
                    Ok(t) => t,
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        if let Some(config) = &self.config {
                            surface.configure(device, config);
                        }
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

                if let Some(renderer) = &self.renderer {
                    renderer.render(device, queue, &view, &self.state.camera, &self.state.scene);
                }

                let raw_input = self
                    .egui_winit
                    .as_mut()
                    .unwrap()
                    .take_egui_input(self.window.as_ref().unwrap());
                let full_output = self.egui_ctx.run(raw_input, |ctx| {
                    self.state.draw_ui(ctx);
                });

                self.egui_winit.as_mut().unwrap().handle_platform_output(
                    self.window.as_ref().unwrap(),
                    full_output.platform_output,
                );

                let paint_jobs = self
                    .egui_ctx
                    .tessellate(full_output.shapes, full_output.pixels_per_point);

                let screen_descriptor = egui_wgpu::ScreenDescriptor {
                    size_in_pixels: [
                        self.config.as_ref().unwrap().width,
                        self.config.as_ref().unwrap().height,
                    ],
                    pixels_per_point: full_output.pixels_per_point,
                };

                {
                    let egui_renderer = self.egui_renderer.as_mut().unwrap();
                    for (id, image_delta) in &full_output.textures_delta.set {
                        egui_renderer.update_texture(device, queue, *id, image_delta);
                    }
                    let mut encoder =
                        device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
                            label: Some("egui_encoder"),
                        });
                    egui_renderer.update_buffers(
                        device,
                        queue,
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
                        egui_renderer.render(&mut pass, &paint_jobs, &screen_descriptor);
                    }
                    queue.submit(std::iter::once(encoder.finish()));
                    for id in &full_output.textures_delta.free {
                        egui_renderer.free_texture(id);
                    }
                }

                output.present();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
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
            if self.state.lock.is_locked() {
                self.state.camera.rotate(delta.0 as f32, delta.1 as f32);
            }
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

    let config = match &cli.scene {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::retail_store(),
    };
    config.validate()?;
    tracing::info!(scene = %config.name, "storewalk-desktop starting");

    let state = AppState::new(config, cli.mute)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(state);
    event_loop.run_app(&mut app)?;

    Ok(())
}
