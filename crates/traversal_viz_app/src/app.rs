// SPDX-License-Identifier: MIT OR Apache-2.0
//! Main application setup and event loop.

use crate::config::{AppConfig, ConfigError};
use crate::controls::{ControlAction, Controls};
use crate::panel_types::PanelType;
use crate::panels::console::TracingEvent;
use crate::panels::{CodeListingPanel, ConsolePanel, GraphViewPanel};
use crate::surface::GraphSurface;
use crate::theme::AppTheme;
use egui_dock::{DockArea, DockState, NodeIndex, Style, TabViewer};
use egui_wgpu::wgpu;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use traversal_viz_graph::{compute, Graph, NodeId};
use traversal_viz_sequencer::{AnimationSequencer, SequencerEvent};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

/// Application errors
#[derive(Debug, Error)]
pub enum AppError {
    /// Window creation failed
    #[error("Failed to create window: {0}")]
    WindowCreation(String),

    /// Renderer initialization failed
    #[error("Failed to initialize renderer: {0}")]
    RendererInit(String),

    /// Event loop error
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for application operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Tab viewer implementation for `egui_dock`
struct VisualizerTabViewer<'a> {
    controls: &'a Controls,
    code: &'a mut CodeListingPanel,
    graph_panel: &'a mut GraphViewPanel,
    surface: &'a mut GraphSurface,
    sequencer: &'a AnimationSequencer,
    console: &'a mut ConsolePanel,
}

impl TabViewer for VisualizerTabViewer<'_> {
    type Tab = PanelType;

    fn title(&mut self, tab: &mut Self::Tab) -> egui::WidgetText {
        format!("{} {}", tab.icon(), tab.name()).into()
    }

    fn ui(&mut self, ui: &mut egui::Ui, tab: &mut Self::Tab) {
        match tab {
            PanelType::Code => self.code.ui(ui, self.controls),
            PanelType::Graph => self.graph_panel.ui(ui, self.surface, self.sequencer),
            PanelType::Console => self.console.ui(ui),
        }
    }

    fn closeable(&mut self, _tab: &mut Self::Tab) -> bool {
        false
    }
}

/// Graphics state for wgpu rendering
struct GraphicsState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    egui_renderer: egui_wgpu::Renderer,
}

impl GraphicsState {
    fn new(window: Arc<Window>) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .map_err(|e| AppError::RendererInit(format!("surface: {e}")))?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::LowPower,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| AppError::RendererInit("no suitable GPU adapter".to_string()))?;

        tracing::info!("Using GPU: {}", adapter.get_info().name);

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("Traversal Visualizer Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                ..Default::default()
            },
            None,
        ))
        .map_err(|e| AppError::RendererInit(format!("device: {e}")))?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(wgpu::TextureFormat::is_srgb)
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| AppError::RendererInit("surface reports no formats".to_string()))?;
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

        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            egui_renderer,
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    fn render(
        &mut self,
        egui_ctx: &egui::Context,
        full_output: egui::FullOutput,
        window: &Window,
    ) -> std::result::Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Visualizer Encoder"),
        });

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: window.scale_factor() as f32,
        };

        let paint_jobs = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);

        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer.update_texture(&self.device, &self.queue, *id, image_delta);
        }

        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        {
            // egui-wgpu wants a 'static pass; the pass is dropped before `finish`
            let mut render_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Visualizer Render Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(wgpu::Color {
                                r: 0.1,
                                g: 0.1,
                                b: 0.1,
                                a: 1.0,
                            }),
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                })
                .forget_lifetime();

            self.egui_renderer.render(&mut render_pass, &paint_jobs, &screen_descriptor);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        Ok(())
    }
}

/// Running state of the application
struct VisualizerRunning {
    window: Arc<Window>,
    graphics: GraphicsState,
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    inner: VisualizerInner,
}

/// Application state and panels
struct VisualizerInner {
    graph: Arc<Graph>,
    start: NodeId,
    dock_state: DockState<PanelType>,
    controls: Controls,
    code: CodeListingPanel,
    graph_panel: GraphViewPanel,
    console: ConsolePanel,
    surface: GraphSurface,
    sequencer: AnimationSequencer,
    theme: AppTheme,
    /// Controls stay disabled until the last run finishes or is cancelled
    running: bool,
    last_frame: Instant,
}

impl VisualizerInner {
    fn new(config: &AppConfig, graph: Arc<Graph>, tracing_rx: Option<mpsc::Receiver<TracingEvent>>) -> Self {
        let theme = AppTheme::default();
        let start = config.traversal.start();

        let mut surface = GraphSurface::new(graph.clone(), &start, &config.animation, theme.nodes);
        surface.view.palette = theme.canvas_palette();

        Self {
            graph,
            start,
            dock_state: Self::create_default_layout(),
            controls: Controls::new(
                config.traversal.default_mode,
                config.traversal.default_language,
                config.animation.speed,
            ),
            code: CodeListingPanel::new(),
            graph_panel: GraphViewPanel::new(),
            console: ConsolePanel::with_tracing_receiver(tracing_rx),
            surface,
            sequencer: AnimationSequencer::new(config.animation.sequencer_config()),
            theme,
            running: false,
            last_frame: Instant::now(),
        }
    }

    fn create_default_layout() -> DockState<PanelType> {
        let mut dock_state = DockState::new(vec![PanelType::Code]);
        let surface = dock_state.main_surface_mut();

        // Graph on the right, console under it
        let [_code, graph] = surface.split_right(NodeIndex::root(), 0.4, vec![PanelType::Graph]);
        let [_graph, _console] = surface.split_below(graph, 0.75, vec![PanelType::Console]);

        dock_state
    }

    fn update(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        let dt = now - self.last_frame;
        self.last_frame = now;

        self.sequencer.set_speed(self.controls.speed);
        self.sequencer.update(dt, &mut self.surface);
        self.handle_sequencer_events();

        let mut action = None;
        egui::TopBottomPanel::top("controls_bar").show(ctx, |ui| {
            ui.add_space(2.0);
            action = self.controls.ui(ui, self.running);
            ui.add_space(2.0);
        });

        action = action.or_else(|| Self::shortcut_action(ctx, self.running));
        match action {
            Some(ControlAction::Run) => self.run_traversal(),
            Some(ControlAction::Stop) => self.sequencer.cancel(),
            None => {}
        }

        let mut tab_viewer = VisualizerTabViewer {
            controls: &self.controls,
            code: &mut self.code,
            graph_panel: &mut self.graph_panel,
            surface: &mut self.surface,
            sequencer: &self.sequencer,
            console: &mut self.console,
        };

        DockArea::new(&mut self.dock_state)
            .style(Style::from_egui(ctx.style().as_ref()))
            .show(ctx, &mut tab_viewer);

        // Cancel requested from the keyboard or the stop button settles next frame
        if self.sequencer.is_busy() {
            ctx.request_repaint();
        }
    }

    /// F5 runs when idle, Escape stops; both yield to a focused text field
    fn shortcut_action(ctx: &egui::Context, busy: bool) -> Option<ControlAction> {
        if ctx.wants_keyboard_input() {
            return None;
        }
        ctx.input(|input| {
            if input.key_pressed(egui::Key::F5) && !busy {
                Some(ControlAction::Run)
            } else if input.key_pressed(egui::Key::Escape) {
                Some(ControlAction::Stop)
            } else {
                None
            }
        })
    }

    fn run_traversal(&mut self) {
        let order = compute(&self.graph, &self.start, self.controls.mode);
        tracing::info!(
            mode = self.controls.mode.short_name(),
            start = %self.start,
            steps = order.len(),
            "Run requested"
        );
        self.sequencer.play(order, &mut self.surface);
        self.running = true;
        self.handle_sequencer_events();
    }

    fn handle_sequencer_events(&mut self) {
        for event in self.sequencer.take_events() {
            match event {
                SequencerEvent::Completed { run } | SequencerEvent::Cancelled { run, .. } => {
                    tracing::debug!(run = %run, "Run finished");
                }
                SequencerEvent::Started { .. }
                | SequencerEvent::StepActivated { .. }
                | SequencerEvent::StepVisited { .. } => {}
            }
        }

        if self.running && !self.sequencer.is_busy() {
            self.running = false;
            tracing::debug!("Controls re-enabled");
        }
    }
}

/// Main application
pub struct VisualizerApp {
    config: AppConfig,
    graph: Arc<Graph>,
    running: Option<VisualizerRunning>,
    /// Tracing receiver passed to the console panel on first resume.
    tracing_rx: Option<mpsc::Receiver<TracingEvent>>,
    /// Failure during window or renderer setup, reported after the loop exits
    startup_error: Option<AppError>,
}

impl VisualizerApp {
    /// Create an application for `graph`
    pub fn new(config: AppConfig, graph: Arc<Graph>, tracing_rx: Option<mpsc::Receiver<TracingEvent>>) -> Self {
        Self {
            config,
            graph,
            running: None,
            tracing_rx,
            startup_error: None,
        }
    }

    /// Run the event loop until the window closes
    pub fn run(mut self) -> Result<()> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Wait);
        event_loop.run_app(&mut self)?;

        match self.startup_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<VisualizerRunning> {
        let window_config = &self.config.window;
        let window_attrs = Window::default_attributes()
            .with_title(window_config.title.as_str())
            .with_inner_size(winit::dpi::LogicalSize::new(window_config.width, window_config.height))
            .with_min_inner_size(winit::dpi::LogicalSize::new(800, 500));

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .map_err(|e| AppError::WindowCreation(e.to_string()))?,
        );

        tracing::info!("Initializing graphics...");
        let graphics = GraphicsState::new(window.clone())?;

        let egui_ctx = egui::Context::default();
        let inner = VisualizerInner::new(&self.config, self.graph.clone(), self.tracing_rx.take());
        inner.theme.apply(&egui_ctx);

        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            &window,
            Some(window.scale_factor() as f32),
            None,
            Some(2 * 1024),
        );

        tracing::info!("Window size: {:?}", window.inner_size());

        Ok(VisualizerRunning {
            window,
            graphics,
            egui_ctx,
            egui_state,
            inner,
        })
    }
}

impl ApplicationHandler for VisualizerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }

        match self.start(event_loop) {
            Ok(running) => {
                running.window.request_redraw();
                self.running = Some(running);
            }
            Err(err) => {
                tracing::error!("Startup failed: {err}");
                self.startup_error = Some(err);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let Some(running) = &mut self.running else {
            return;
        };

        let response = running.egui_state.on_window_event(&running.window, &event);
        if response.repaint {
            running.window.request_redraw();
        }
        if response.consumed {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Close requested, exiting...");
                running.inner.sequencer.cancel();
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                tracing::debug!("Window resized to {:?}", new_size);
                running.graphics.resize(new_size);
                running.window.request_redraw();
            }
            WindowEvent::RedrawRequested => {
                let raw_input = running.egui_state.take_egui_input(&running.window);
                let full_output = running.egui_ctx.run(raw_input, |ctx| {
                    running.inner.update(ctx);
                });

                running
                    .egui_state
                    .handle_platform_output(&running.window, full_output.platform_output.clone());

                match running.graphics.render(&running.egui_ctx, full_output, &running.window) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = running.window.inner_size();
                        running.graphics.resize(size);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        tracing::error!("Out of GPU memory!");
                        event_loop.exit();
                    }
                    Err(wgpu::SurfaceError::Timeout) => {
                        tracing::warn!("Surface timeout");
                    }
                }

                if running.egui_ctx.has_requested_repaint() {
                    running.window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
