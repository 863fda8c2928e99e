use std::collections::HashMap;
use std::sync::Arc;

use wgpu::util::DeviceExt;
use winit::window::Window;

use super::gpu_context::GpuContext;
use super::render_backend::{ProgramHandle, RenderBackend, ShaderHandle, UniformLocation};
use crate::error::InitError;
use crate::shader::{ShaderError, ShaderStage};
use crate::types::Globals;

const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

/// Pipeline plus its own copy of the `Globals` block
struct LinkedProgram {
    pipeline: wgpu::RenderPipeline,
    globals: Globals,
    dirty: bool,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Surface texture being recorded into until `present`
struct FrameInFlight {
    surface_texture: wgpu::SurfaceTexture,
    view: wgpu::TextureView,
    encoder: wgpu::CommandEncoder,
}

/// `RenderBackend` drawing into a window surface with wgpu.
///
/// Stages are GLSL compiled through naga. Uniform blocks are std140 buffers, one per
/// program, updated from a CPU copy right before each draw.
pub struct WgpuBackend {
    gpu: GpuContext,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    bind_group_layout: wgpu::BindGroupLayout,
    shaders: HashMap<ShaderHandle, wgpu::ShaderModule>,
    programs: HashMap<ProgramHandle, LinkedProgram>,
    next_handle: u32,
    active: ProgramHandle,
    vertex_buffer: Option<wgpu::Buffer>,
    viewport: [u32; 4],
    minimized: bool,
    clear_requested: bool,
    frame: Option<FrameInFlight>,
}

impl WgpuBackend {
    /// Create a surface for `window` and a device that can draw to it
    pub async fn new(window: Arc<Window>) -> Result<Self, InitError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;
        let gpu = GpuContext::new_with_surface(&instance, &surface).await?;

        let caps = surface.get_capabilities(gpu.adapter());
        // Shader output goes to the screen unconverted, so prefer a linear format
        let format = caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .or_else(|| caps.formats.first())
            .copied()
            .ok_or(InitError::UnsupportedSurface)?;
        log::debug!("Surface format: {:?}", format);

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(gpu.device(), &surface_config);

        let bind_group_layout = Self::create_bind_group_layout(gpu.device());

        Ok(Self {
            gpu,
            surface,
            surface_config,
            bind_group_layout,
            shaders: HashMap::new(),
            programs: HashMap::new(),
            next_handle: 1,
            active: ProgramHandle::INVALID,
            vertex_buffer: None,
            viewport: [0, 0, size.width, size.height],
            minimized: size.width == 0 || size.height == 0,
            clear_requested: false,
            frame: None,
        })
    }

    fn create_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Globals Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<Globals>() as u64),
                },
                count: None,
            }],
        })
    }

    fn allocate_handle(&mut self) -> u32 {
        let handle = self.next_handle;
        self.next_handle += 1;
        handle
    }

    fn naga_stage(stage: ShaderStage) -> wgpu::naga::ShaderStage {
        match stage {
            ShaderStage::Vertex => wgpu::naga::ShaderStage::Vertex,
            ShaderStage::Fragment => wgpu::naga::ShaderStage::Fragment,
        }
    }

    fn link(
        &self,
        vertex: &wgpu::ShaderModule,
        fragment: &wgpu::ShaderModule,
    ) -> Result<LinkedProgram, ShaderError> {
        let device = self.gpu.device();
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Shader Viewer Pipeline Layout"),
            bind_group_layouts: &[&self.bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Shader Viewer Pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: vertex,
                entry_point: Some("main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &VERTEX_ATTRIBUTES,
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: fragment,
                entry_point: Some("main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: self.surface_config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        if let Some(error) = pollster::block_on(device.pop_error_scope()) {
            return Err(ShaderError::Link {
                log: error.to_string(),
            });
        }

        let globals = Globals::default();
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Globals Buffer"),
            contents: bytemuck::bytes_of(&globals),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Globals Bind Group"),
            layout: &self.bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        Ok(LinkedProgram {
            pipeline,
            globals,
            dirty: false,
            uniform_buffer,
            bind_group,
        })
    }

    fn write_uniform(&mut self, program: ProgramHandle, location: UniformLocation, values: &[f32]) {
        let Some(linked) = self.programs.get_mut(&program) else {
            return;
        };
        if linked.globals.write(location, values) {
            linked.dirty = true;
        } else {
            log::debug!(
                "Uniform at offset {} does not take {} component(s)",
                location.0,
                values.len()
            );
        }
    }

    fn flush_uniforms(&mut self) {
        if let Some(linked) = self.programs.get_mut(&self.active) {
            if linked.dirty {
                self.gpu
                    .queue()
                    .write_buffer(&linked.uniform_buffer, 0, bytemuck::bytes_of(&linked.globals));
                linked.dirty = false;
            }
        }
    }

    fn acquire_frame(&mut self) -> Option<FrameInFlight> {
        if self.minimized {
            return None;
        }

        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("Surface lost or outdated, reconfiguring");
                self.surface.configure(self.gpu.device(), &self.surface_config);
                return None;
            }
            Err(e) => {
                log::warn!("Skipping frame: {}", e);
                return None;
            }
        };

        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let encoder = self
            .gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Shader Viewer Encoder"),
            });

        Some(FrameInFlight {
            surface_texture,
            view,
            encoder,
        })
    }

    /// Viewport limited to the surface, which wgpu requires
    fn clamped_viewport(&self) -> [f32; 4] {
        let [x, y, width, height] = self.viewport;
        let (surface_width, surface_height) = (self.surface_config.width, self.surface_config.height);

        let x = x.min(surface_width - 1);
        let y = y.min(surface_height - 1);
        let width = width.clamp(1, surface_width - x);
        let height = height.clamp(1, surface_height - y);

        [x as f32, y as f32, width as f32, height as f32]
    }

    /// Record one render pass, clearing first if `clear` was called since the last pass
    fn encode_pass(&mut self, vertex_count: Option<u32>) {
        let mut frame = match self.frame.take() {
            Some(frame) => frame,
            None => match self.acquire_frame() {
                Some(frame) => frame,
                None => return,
            },
        };

        self.flush_uniforms();

        let load = if self.clear_requested {
            wgpu::LoadOp::Clear(wgpu::Color::BLACK)
        } else {
            wgpu::LoadOp::Load
        };
        let [x, y, width, height] = self.clamped_viewport();

        {
            let mut render_pass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Shader Viewer Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            render_pass.set_viewport(x, y, width, height, 0.0, 1.0);

            if let (Some(count), Some(program), Some(vertices)) = (
                vertex_count,
                self.programs.get(&self.active),
                self.vertex_buffer.as_ref(),
            ) {
                render_pass.set_pipeline(&program.pipeline);
                render_pass.set_bind_group(0, &program.bind_group, &[]);
                render_pass.set_vertex_buffer(0, vertices.slice(..));
                render_pass.draw(0..count, 0..1);
            }
        }

        self.clear_requested = false;
        self.frame = Some(frame);
    }
}

impl RenderBackend for WgpuBackend {
    fn compile_shader(&mut self, source: &str, stage: ShaderStage) -> Result<ShaderHandle, ShaderError> {
        let device = self.gpu.device();
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(stage.label()),
            source: wgpu::ShaderSource::Glsl {
                shader: source.into(),
                stage: Self::naga_stage(stage),
                defines: Default::default(),
            },
        });

        if let Some(error) = pollster::block_on(device.pop_error_scope()) {
            return Err(ShaderError::Compile {
                stage,
                log: error.to_string(),
            });
        }

        let handle = ShaderHandle(self.allocate_handle());
        self.shaders.insert(handle, module);
        Ok(handle)
    }

    fn create_program(
        &mut self,
        vertex: ShaderHandle,
        fragment: ShaderHandle,
    ) -> Result<ProgramHandle, ShaderError> {
        let (Some(vertex_module), Some(fragment_module)) = (self.shaders.get(&vertex), self.shaders.get(&fragment)) else {
            return Err(ShaderError::Link {
                log: "shader stage was not compiled".to_string(),
            });
        };

        let linked = self.link(vertex_module, fragment_module)?;
        let handle = ProgramHandle(self.allocate_handle());
        self.programs.insert(handle, linked);
        Ok(handle)
    }

    fn release_shader(&mut self, shader: ShaderHandle) {
        self.shaders.remove(&shader);
    }

    fn use_program(&mut self, program: ProgramHandle) {
        self.active = program;
    }

    fn uniform_location(&self, program: ProgramHandle, name: &str) -> Option<UniformLocation> {
        if !self.programs.contains_key(&program) {
            return None;
        }
        Globals::locate(name)
    }

    fn set_uniform_1f(&mut self, program: ProgramHandle, location: UniformLocation, value: f32) {
        self.write_uniform(program, location, &[value]);
    }

    fn set_uniform_2f(&mut self, program: ProgramHandle, location: UniformLocation, x: f32, y: f32) {
        self.write_uniform(program, location, &[x, y]);
    }

    fn set_uniform_matrix4(&mut self, program: ProgramHandle, location: UniformLocation, value: &[f32; 16]) {
        self.write_uniform(program, location, value);
    }

    fn upload_geometry(&mut self, vertices: &[[f32; 3]]) {
        self.vertex_buffer = Some(self.gpu.device().create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Fullscreen Quad"),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            },
        ));
    }

    fn set_viewport(&mut self, x: u32, y: u32, width: u32, height: u32) {
        self.viewport = [x, y, width, height];
        self.minimized = width == 0 || height == 0;
        if self.minimized {
            return;
        }

        if width != self.surface_config.width || height != self.surface_config.height {
            self.surface_config.width = width;
            self.surface_config.height = height;
            self.surface.configure(self.gpu.device(), &self.surface_config);
        }
    }

    fn clear(&mut self) {
        self.clear_requested = true;
    }

    fn draw_triangles(&mut self, vertex_count: u32) {
        self.encode_pass(Some(vertex_count));
    }

    fn present(&mut self) {
        if self.clear_requested {
            self.encode_pass(None);
        }
        self.clear_requested = false;

        if let Some(frame) = self.frame.take() {
            self.gpu.queue().submit(Some(frame.encoder.finish()));
            frame.surface_texture.present();
        }
    }
}
