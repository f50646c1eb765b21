use crate::canvas::{Canvas, PixelCanvas};
use crate::config::Config;
use crate::coords::DeviceExtent;
use crate::engine::TransformEngine;
use crate::state::{CanvasTexture, GeometryBuffers, GpuContext, InputState, TextInput};
use crate::vertex::{Vertex, FULLSCREEN_QUAD, FULLSCREEN_QUAD_INDICES};
use anyhow::Context;
use std::sync::Arc;
use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;
use winit::window::Window;

pub struct State {
    pub window: Arc<Window>,
    pub size: PhysicalSize<u32>,

    pub gpu: GpuContext,
    pub canvas_texture: CanvasTexture,
    pub geometry: GeometryBuffers,
    pub input: InputState,
    pub typing: TextInput,

    pub engine: TransformEngine,
    pub canvas: PixelCanvas,
    pub config: Config,
}

impl State {
    pub async fn new(window: Arc<Window>, config: Config) -> anyhow::Result<State> {
        let mut size = window.inner_size();
        if size.width == 0 || size.height == 0 {
            size = PhysicalSize::new(config.canvas.width, config.canvas.height);
        }
        // The raster tracks the window so pointer positions are device pixels.
        let extent = DeviceExtent::new(size.width, size.height)
            .or_else(|_| config.canvas.extent())
            .context("no usable canvas extent")?;

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("failed to create surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no suitable graphics adapter")?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                label: None,
                memory_hints: Default::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to open graphics device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config_surface = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &config_surface);

        let texture_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("canvas_bind_group_layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            multisampled: false,
                            view_dimension: wgpu::TextureViewDimension::D2,
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        // Nearest filtering keeps a lone pixel crisp.
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("canvas_sampler"),
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Canvas Shader"),
            source: wgpu::ShaderSource::Wgsl(
                include_str!("../data/shaders/canvas_shader.wgsl").into(),
            ),
        });

        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Render Pipeline Layout"),
                bind_group_layouts: &[&texture_bind_group_layout],
                push_constant_ranges: &[],
            });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Render Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config_surface.format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        let geometry = GeometryBuffers {
            vertex: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Quad Vertex Buffer"),
                contents: bytemuck::cast_slice(&FULLSCREEN_QUAD),
                usage: wgpu::BufferUsages::VERTEX,
            }),
            index: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Quad Index Buffer"),
                contents: bytemuck::cast_slice(&FULLSCREEN_QUAD_INDICES),
                usage: wgpu::BufferUsages::INDEX,
            }),
            count: FULLSCREEN_QUAD_INDICES.len() as u32,
        };

        let gpu = GpuContext {
            surface,
            device,
            queue,
            config: config_surface,
            render_pipeline,
            texture_bind_group_layout,
            sampler,
        };

        let canvas_texture = create_canvas_texture(&gpu, extent);
        let canvas = PixelCanvas::new(extent, config.canvas.background, config.canvas.foreground);
        let engine = TransformEngine::new(config.world);

        log::info!("Canvas {} with world bounds {}", extent, engine.bounds());

        let mut state = Self {
            window,
            size,
            gpu,
            canvas_texture,
            geometry,
            input: InputState {
                cursor: None,
                live: None,
                status: None,
            },
            typing: TextInput {
                active: false,
                buffer: String::new(),
            },
            engine,
            canvas,
            config,
        };
        state.refresh_title();
        Ok(state)
    }

    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    /// The window title doubles as the live coordinates panel.
    pub fn refresh_title(&self) {
        let title = self
            .input
            .title(&self.config.window.title, &self.typing, self.engine.bounds());
        self.window.set_title(&title);
    }

    /// Reallocates the raster and its texture after the window size changed.
    pub fn resize_canvas(&mut self, extent: DeviceExtent) {
        if extent == self.canvas.extent() {
            return;
        }
        self.canvas.resize(extent);
        self.canvas_texture = create_canvas_texture(&self.gpu, extent);
        self.engine.redraw(&mut self.canvas);
    }
}

pub fn create_canvas_texture(gpu: &GpuContext, extent: DeviceExtent) -> CanvasTexture {
    let texture = gpu.device.create_texture(&wgpu::TextureDescriptor {
        label: Some("canvas texture"),
        size: wgpu::Extent3d {
            width: extent.width(),
            height: extent.height(),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    let bind_group = gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("canvas_bind_group"),
        layout: &gpu.texture_bind_group_layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&gpu.sampler),
            },
        ],
    });
    CanvasTexture {
        texture,
        bind_group,
        size: (extent.width(), extent.height()),
    }
}
