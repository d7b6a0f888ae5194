use crate::layout::{Button, Layout};
use crate::render::{create_render_bind_group, create_render_bind_group_layout, RenderParams};
use crate::simulation::{Simulation, StatusLevel};
use std::fmt;
use std::sync::Arc;
use wgpu::util::DeviceExt;
use winit::window::Window;

// GUI Imports
use egui::Context as EguiContext;
use egui_wgpu::Renderer as EguiWgpuRenderer;
use egui_winit::State as EguiWinitState;

const BUTTON_COLOR: egui::Color32 = egui::Color32::GREEN;
const BUTTON_FONT_SIZE: f32 = 24.0;

#[derive(Debug)]
pub enum GpuInitError {
    CreateSurface(wgpu::CreateSurfaceError),
    NoAdapter,
    IncompatibleSurface,
    RequestDevice(wgpu::RequestDeviceError),
}

impl fmt::Display for GpuInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateSurface(e) => write!(f, "failed to create surface: {e}"),
            Self::NoAdapter => write!(f, "failed to find an appropriate adapter"),
            Self::IncompatibleSurface => write!(f, "surface reports no supported formats"),
            Self::RequestDevice(e) => write!(f, "failed to create device: {e}"),
        }
    }
}

impl std::error::Error for GpuInitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CreateSurface(e) => Some(e),
            Self::RequestDevice(e) => Some(e),
            _ => None,
        }
    }
}

/// The renderer collaborator: draws whatever grid it is handed, plus the
/// button bar and a status overlay. It never mutates the simulation.
pub struct State {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub size: winit::dpi::PhysicalSize<u32>,
    pub window: Arc<Window>,

    pub layout: Layout,
    pub cell_buffer: wgpu::Buffer,
    pub render_param_buffer: wgpu::Buffer,
    pub render_pipeline: wgpu::RenderPipeline,
    pub render_bind_group: wgpu::BindGroup,

    // GUI state
    pub egui_ctx: EguiContext,
    pub egui_winit_state: EguiWinitState,
    pub egui_renderer: EguiWgpuRenderer,
}

impl State {
    pub async fn new(window: Arc<Window>, layout: Layout, sim: &Simulation) -> Result<Self, GpuInitError> {
        let size = window.inner_size();

        log::info!("Initializing wgpu...");

        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window.clone())
            .map_err(GpuInitError::CreateSurface)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                force_fallback_adapter: false,
                compatible_surface: Some(&surface),
            })
            .await
            .ok_or(GpuInitError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await
            .map_err(GpuInitError::RequestDevice)?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or(GpuInitError::IncompatibleSurface)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: surface_caps.present_modes.first().copied().unwrap_or(wgpu::PresentMode::Fifo),
            alpha_mode: surface_caps.alpha_modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        // Grid snapshot, rewritten every frame
        let cell_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Grid Cells"),
            contents: bytemuck::cast_slice(&sim.grid.to_gpu_cells()),
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
        });

        let render_params = RenderParams::new(
            layout.grid_width,
            layout.grid_height,
            layout.cell_size,
            window.scale_factor(),
        );
        let render_param_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Render Parameters"),
            contents: bytemuck::bytes_of(&render_params),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let render_shader_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Render Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../render.wgsl").into()),
        });

        let render_bind_group_layout = create_render_bind_group_layout(&device);
        let render_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Render Pipeline Layout"),
            bind_group_layouts: &[&render_bind_group_layout],
            push_constant_ranges: &[],
        });
        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Render Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &render_shader_module,
                entry_point: "vs_main",
                buffers: &[],
            },
            fragment: Some(wgpu::FragmentState {
                module: &render_shader_module,
                entry_point: "fs_main",
                targets: &[Some(config.format.into())],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });
        let render_bind_group = create_render_bind_group(
            &device,
            &render_bind_group_layout,
            &render_param_buffer,
            &cell_buffer,
        );

        log::info!("Initializing egui...");
        let egui_ctx = EguiContext::default();
        let egui_winit_state =
            EguiWinitState::new(egui_ctx.clone(), egui_ctx.viewport_id(), window.as_ref(), None, None);
        let egui_renderer = EguiWgpuRenderer::new(&device, config.format, None, 1);

        log::info!("wgpu initialized successfully.");

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            window,
            layout,
            cell_buffer,
            render_param_buffer,
            render_pipeline,
            render_bind_group,
            egui_ctx,
            egui_winit_state,
            egui_renderer,
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);

            // The scale factor may have changed along with the size
            let params = RenderParams::new(
                self.layout.grid_width,
                self.layout.grid_height,
                self.layout.cell_size,
                self.window.scale_factor(),
            );
            self.queue.write_buffer(&self.render_param_buffer, 0, bytemuck::bytes_of(&params));

            log::info!("Reconfigured surface to: {}x{}", new_size.width, new_size.height);
        } else {
            log::warn!("Ignoring resize to zero dimensions: {}x{}", new_size.width, new_size.height);
        }
    }

    /// Draw one frame from the current simulation state.
    pub fn render(&mut self, sim: &Simulation) -> Result<(), wgpu::SurfaceError> {
        self.queue
            .write_buffer(&self.cell_buffer, 0, bytemuck::cast_slice(&sim.grid.to_gpu_cells()));

        let output_frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost) => {
                log::warn!("Surface lost, recreating...");
                self.resize(self.size);
                return Err(wgpu::SurfaceError::Lost);
            }
            Err(e) => {
                log::error!("Failed to acquire next swap chain texture: {:?}", e);
                return Err(e);
            }
        };
        let output_view = output_frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("Frame Encoder") });

        // --- Grid Pass ---
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Grid Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &output_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::WHITE),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_bind_group(0, &self.render_bind_group, &[]);
            render_pass.draw(0..3, 0..1); // Draw full-screen triangle
        }

        // --- Egui Frame ---
        let raw_input = self.egui_winit_state.take_egui_input(&self.window);
        self.egui_ctx.begin_frame(raw_input);
        paint_controls(&self.egui_ctx, &self.layout, sim);
        let full_output = self.egui_ctx.end_frame();

        let pixels_per_point = self.window.scale_factor() as f32;
        let paint_jobs = self.egui_ctx.tessellate(full_output.shapes, pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer.update_texture(&self.device, &self.queue, *id, image_delta);
        }
        let egui_cmd_bufs = self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        self.egui_winit_state
            .handle_platform_output(&self.window, full_output.platform_output);

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &output_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load, // Keep the grid underneath
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.egui_renderer.render(&mut render_pass, &paint_jobs, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        self.queue
            .submit(egui_cmd_bufs.into_iter().chain(std::iter::once(encoder.finish())));
        output_frame.present();

        Ok(())
    }
}

fn button_label(button: Button, sim: &Simulation) -> &'static str {
    match button {
        Button::Pause if sim.clock.is_paused() => "Resume",
        Button::Pause => "Pause",
        Button::Save => "Save",
        Button::Load => "Load",
    }
}

/// Buttons are painted, not egui widgets: hit-testing belongs to the controller.
fn paint_controls(ctx: &EguiContext, layout: &Layout, sim: &Simulation) {
    let painter = ctx.layer_painter(egui::LayerId::new(egui::Order::Background, egui::Id::new("button_bar")));
    for button in Button::ALL {
        let r = layout.button_rect(button);
        let rect = egui::Rect::from_min_size(
            egui::pos2(r.x as f32, r.y as f32),
            egui::vec2(r.w as f32, r.h as f32),
        );
        painter.rect_filled(rect, 0.0, BUTTON_COLOR);
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            button_label(button, sim),
            egui::FontId::proportional(BUTTON_FONT_SIZE),
            egui::Color32::BLACK,
        );
    }

    // Status overlay in the top-left corner of the grid
    let panel_frame = egui::Frame::none()
        .fill(egui::Color32::from_rgba_unmultiplied(25, 25, 25, 180))
        .inner_margin(6.0);
    egui::Area::new(egui::Id::new("status_area"))
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(5.0, 5.0))
        .interactable(false)
        .show(ctx, |ui| {
            panel_frame.show(ui, |ui| {
                ui.colored_label(
                    egui::Color32::WHITE,
                    format!(
                        "Generation {}  |  Live cells {}{}",
                        sim.generation,
                        sim.grid.live_count(),
                        if sim.clock.is_paused() { "  |  Paused" } else { "" }
                    ),
                );
                if let Some(status) = &sim.status {
                    let color = match status.level {
                        StatusLevel::Info => egui::Color32::LIGHT_GREEN,
                        StatusLevel::Error => egui::Color32::LIGHT_RED,
                    };
                    ui.colored_label(color, &status.text);
                }
            });
        });
}
