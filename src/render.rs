use crate::constants::{AMBIENT, LIGHT_DIR};
use head_core::{
    head_color_rgba, Camera, ColorVertex, DrawList, TriMesh, GHOST_COLOR, GHOST_SCALE,
};
use glam::{Mat4, Vec3};
use web_sys as web;
use wgpu::util::DeviceExt;

mod helpers;

use helpers::{
    create_depth_texture, make_scene_pipeline, uniform_bind_group_layout, uniform_binding,
    DynamicVertexBuffer, PipelineDesc,
};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct MeshVertex {
    position: [f32; 3],
    normal: [f32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct MeshUniforms {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    color: [f32; 4],
    light: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct OverlayUniforms {
    view_proj: [[f32; 4]; 4],
}

struct MeshBuffers {
    vertices: wgpu::Buffer,
    triangles: wgpu::Buffer,
    triangle_count: u32,
    edges: wgpu::Buffer,
    edge_count: u32,
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    _depth_tex: wgpu::Texture,
    depth_view: wgpu::TextureView,

    solid_pipeline: wgpu::RenderPipeline,
    ghost_pipeline: wgpu::RenderPipeline,
    solid_uniforms: wgpu::Buffer,
    solid_bind_group: wgpu::BindGroup,
    ghost_uniforms: wgpu::Buffer,
    ghost_bind_group: wgpu::BindGroup,
    mesh: Option<MeshBuffers>,

    line_pipeline: wgpu::RenderPipeline,
    tri_pipeline: wgpu::RenderPipeline,
    overlay_uniforms: wgpu::Buffer,
    overlay_bind_group: wgpu::BindGroup,
    line_vertices: DynamicVertexBuffer,
    tri_vertices: DynamicVertexBuffer,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl GpuState {
    pub async fn new(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let (depth_tex, depth_view) = create_depth_texture(&device, width, height);

        // Head mesh: translucent lit shell over a wireframe ghost
        let head_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("head_shader"),
            source: wgpu::ShaderSource::Wgsl(head_core::HEAD_WGSL.into()),
        });
        let mesh_bgl = uniform_bind_group_layout(&device, "mesh_bgl");
        let mesh_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("mesh_pl"),
            bind_group_layouts: &[&mesh_bgl],
            push_constant_ranges: &[],
        });
        let mesh_vertex_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3],
        };
        let solid_pipeline = make_scene_pipeline(
            &device,
            PipelineDesc {
                label: "solid_pipeline",
                layout: &mesh_pl,
                shader: &head_shader,
                frag_entry: "fs_lit",
                vertex_layout: mesh_vertex_layout.clone(),
                topology: wgpu::PrimitiveTopology::TriangleList,
                color_format: format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                depth_write: false,
            },
        );
        let ghost_pipeline = make_scene_pipeline(
            &device,
            PipelineDesc {
                label: "ghost_pipeline",
                layout: &mesh_pl,
                shader: &head_shader,
                frag_entry: "fs_flat",
                vertex_layout: mesh_vertex_layout,
                topology: wgpu::PrimitiveTopology::LineList,
                color_format: format,
                blend: None,
                depth_write: true,
            },
        );
        let blank = MeshUniforms {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            model: Mat4::IDENTITY.to_cols_array_2d(),
            color: [0.0; 4],
            light: [0.0; 4],
        };
        let (solid_uniforms, solid_bind_group) =
            uniform_binding(&device, &mesh_bgl, "solid_uniforms", &blank);
        let (ghost_uniforms, ghost_bind_group) =
            uniform_binding(&device, &mesh_bgl, "ghost_uniforms", &blank);

        // Marker spokes and anchor spheres
        let overlay_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("overlay_shader"),
            source: wgpu::ShaderSource::Wgsl(head_core::OVERLAY_WGSL.into()),
        });
        let overlay_bgl = uniform_bind_group_layout(&device, "overlay_bgl");
        let overlay_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("overlay_pl"),
            bind_group_layouts: &[&overlay_bgl],
            push_constant_ranges: &[],
        });
        let color_vertex_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ColorVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3],
        };
        let line_pipeline = make_scene_pipeline(
            &device,
            PipelineDesc {
                label: "line_pipeline",
                layout: &overlay_pl,
                shader: &overlay_shader,
                frag_entry: "fs_main",
                vertex_layout: color_vertex_layout.clone(),
                topology: wgpu::PrimitiveTopology::LineList,
                color_format: format,
                blend: None,
                depth_write: true,
            },
        );
        let tri_pipeline = make_scene_pipeline(
            &device,
            PipelineDesc {
                label: "tri_pipeline",
                layout: &overlay_pl,
                shader: &overlay_shader,
                frag_entry: "fs_main",
                vertex_layout: color_vertex_layout,
                topology: wgpu::PrimitiveTopology::TriangleList,
                color_format: format,
                blend: None,
                depth_write: true,
            },
        );
        let (overlay_uniforms, overlay_bind_group) = uniform_binding(
            &device,
            &overlay_bgl,
            "overlay_uniforms",
            &OverlayUniforms {
                view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            },
        );
        let line_vertices = DynamicVertexBuffer::new(&device, "line_vertices", 4096);
        let tri_vertices = DynamicVertexBuffer::new(&device, "tri_vertices", 64 * 1024);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            _depth_tex: depth_tex,
            depth_view,
            solid_pipeline,
            ghost_pipeline,
            solid_uniforms,
            solid_bind_group,
            ghost_uniforms,
            ghost_bind_group,
            mesh: None,
            line_pipeline,
            tri_pipeline,
            overlay_uniforms,
            overlay_bind_group,
            line_vertices,
            tri_vertices,
            width,
            height,
            clear_color: wgpu::Color::BLACK,
        })
    }

    #[inline]
    pub fn has_mesh(&self) -> bool {
        self.mesh.is_some()
    }

    /// Upload the head mesh. Edges for the wireframe ghost are derived here.
    pub fn set_mesh(&mut self, mesh: &TriMesh) {
        let vertices: Vec<MeshVertex> = mesh
            .positions
            .iter()
            .zip(mesh.normals.iter())
            .map(|(p, n)| MeshVertex {
                position: p.to_array(),
                normal: n.to_array(),
            })
            .collect();
        let edges = mesh.edge_indices();
        let vertices = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("head_vertices"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let triangles = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("head_triangles"),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
        let edge_buf = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("head_edges"),
                contents: bytemuck::cast_slice(&edges),
                usage: wgpu::BufferUsages::INDEX,
            });
        self.mesh = Some(MeshBuffers {
            vertices,
            triangles,
            triangle_count: mesh.indices.len() as u32,
            edges: edge_buf,
            edge_count: edges.len() as u32,
        });
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            let (tex, view) = create_depth_texture(&self.device, width, height);
            self._depth_tex = tex;
            self.depth_view = view;
        }
    }

    /// Reconfigure after the surface was lost or went out of date.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn render(&mut self, camera: &Camera, draw: &DrawList) -> Result<(), wgpu::SurfaceError> {
        let view_proj = camera.view_projection().to_cols_array_2d();
        let light = Vec3::from(LIGHT_DIR).normalize();
        self.queue.write_buffer(
            &self.solid_uniforms,
            0,
            bytemuck::bytes_of(&MeshUniforms {
                view_proj,
                model: Mat4::IDENTITY.to_cols_array_2d(),
                color: head_color_rgba(),
                light: [light.x, light.y, light.z, AMBIENT],
            }),
        );
        self.queue.write_buffer(
            &self.ghost_uniforms,
            0,
            bytemuck::bytes_of(&MeshUniforms {
                view_proj,
                model: Mat4::from_scale(Vec3::splat(GHOST_SCALE)).to_cols_array_2d(),
                color: [GHOST_COLOR[0], GHOST_COLOR[1], GHOST_COLOR[2], 1.0],
                light: [0.0; 4],
            }),
        );
        self.queue.write_buffer(
            &self.overlay_uniforms,
            0,
            bytemuck::bytes_of(&OverlayUniforms { view_proj }),
        );
        self.line_vertices
            .write(&self.device, &self.queue, bytemuck::cast_slice(&draw.lines));
        self.tri_vertices
            .write(&self.device, &self.queue, bytemuck::cast_slice(&draw.triangles));

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // Opaque first: ghost wireframe, then markers; translucent shell last.
            if let Some(m) = &self.mesh {
                rpass.set_pipeline(&self.ghost_pipeline);
                rpass.set_bind_group(0, &self.ghost_bind_group, &[]);
                rpass.set_vertex_buffer(0, m.vertices.slice(..));
                rpass.set_index_buffer(m.edges.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..m.edge_count, 0, 0..1);
            }

            rpass.set_bind_group(0, &self.overlay_bind_group, &[]);
            if let Some(slice) = self.line_vertices.slice() {
                rpass.set_pipeline(&self.line_pipeline);
                rpass.set_vertex_buffer(0, slice);
                rpass.draw(0..draw.lines.len() as u32, 0..1);
            }
            if let Some(slice) = self.tri_vertices.slice() {
                rpass.set_pipeline(&self.tri_pipeline);
                rpass.set_vertex_buffer(0, slice);
                rpass.draw(0..draw.triangles.len() as u32, 0..1);
            }

            if let Some(m) = &self.mesh {
                rpass.set_pipeline(&self.solid_pipeline);
                rpass.set_bind_group(0, &self.solid_bind_group, &[]);
                rpass.set_vertex_buffer(0, m.vertices.slice(..));
                rpass.set_index_buffer(m.triangles.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..m.triangle_count, 0, 0..1);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
