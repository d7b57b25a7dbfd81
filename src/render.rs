use farmbot_core::SceneContext;
use glam::{Mat3, Mat4, Vec4};
use web_sys as web;

mod helpers;
pub(crate) mod mesh;
mod targets;

use crate::constants::INITIAL_INSTANCE_CAPACITY;
use helpers::MeshBuffers;
use mesh::{MeshKind, MESH_KINDS};
use targets::DepthTarget;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
    eye: [f32; 4],
    light: [f32; 4],
    ambient: [f32; 4],
    fog_color: [f32; 4],
    fog: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct InstanceData {
    model: [[f32; 4]; 4],
    normal: [[f32; 4]; 3],
    color: [f32; 4],
}

impl InstanceData {
    fn new(model: Mat4, color: Vec4) -> Self {
        let n = Mat3::from_mat4(model).inverse().transpose();
        Self {
            model: model.to_cols_array_2d(),
            normal: [
                n.x_axis.extend(0.0).to_array(),
                n.y_axis.extend(0.0).to_array(),
                n.z_axis.extend(0.0).to_array(),
            ],
            color: color.to_array(),
        }
    }
}

/// A contiguous run of instances drawn with one mesh.
struct Batch {
    kind: MeshKind,
    range: std::ops::Range<u32>,
    translucent: bool,
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    opaque_pipeline: wgpu::RenderPipeline,
    translucent_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    meshes: Vec<MeshBuffers>,
    instance_vb: wgpu::Buffer,
    instance_capacity: usize,
    depth: DepthTarget,
    width: u32,
    height: u32,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
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

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(SCENE_WGSL.into()),
        });
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<Uniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });

        const INSTANCE_ATTRS: [wgpu::VertexAttribute; 8] = wgpu::vertex_attr_array![
            2 => Float32x4, 3 => Float32x4, 4 => Float32x4, 5 => Float32x4,
            6 => Float32x4, 7 => Float32x4, 8 => Float32x4,
            9 => Float32x4,
        ];
        let vertex_buffers = [
            // slot 0: unit mesh
            helpers::vertex_layout(),
            // slot 1: per-instance transform and color
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<InstanceData>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &INSTANCE_ATTRS,
            },
        ];
        let opaque_pipeline = helpers::make_scene_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            &vertex_buffers,
            format,
            true,
            "opaque_pipeline",
        );
        let translucent_pipeline = helpers::make_scene_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            &vertex_buffers,
            format,
            false,
            "translucent_pipeline",
        );

        let meshes = MESH_KINDS
            .iter()
            .map(|k| helpers::upload_mesh(&device, &format!("{:?}_mesh", k), &k.build()))
            .collect();
        let instance_capacity = INITIAL_INSTANCE_CAPACITY;
        let instance_vb = create_instance_buffer(&device, instance_capacity);
        let depth = DepthTarget::new(&device, width, height);

        log::info!("[gpu] ready {}x{} {:?}", width, height, format);
        Ok(Self {
            surface,
            device,
            queue,
            config,
            opaque_pipeline,
            translucent_pipeline,
            uniform_buffer,
            bind_group,
            meshes,
            instance_vb,
            instance_capacity,
            depth,
            width,
            height,
        })
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
            self.depth.recreate(&self.device, width, height);
        }
    }

    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Draw every visible shaped node of `ctx`: opaque first, then
    /// translucent back to front without depth writes.
    pub fn render(&mut self, ctx: &SceneContext) -> Result<(), wgpu::SurfaceError> {
        let (instances, batches) = build_instances(ctx);
        if instances.len() > self.instance_capacity {
            self.instance_capacity = instances.len().next_power_of_two();
            self.instance_vb = create_instance_buffer(&self.device, self.instance_capacity);
            log::debug!("[gpu] instance capacity {}", self.instance_capacity);
        }
        self.queue
            .write_buffer(&self.instance_vb, 0, bytemuck::cast_slice(&instances));
        self.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&uniforms(ctx)),
        );

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
                        load: wgpu::LoadOp::Clear(clear_color(ctx.background)),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.bind_group, &[]);
            rpass.set_vertex_buffer(1, self.instance_vb.slice(..));
            let mut bound: Option<bool> = None;
            for batch in &batches {
                if bound != Some(batch.translucent) {
                    rpass.set_pipeline(if batch.translucent {
                        &self.translucent_pipeline
                    } else {
                        &self.opaque_pipeline
                    });
                    bound = Some(batch.translucent);
                }
                let mesh = &self.meshes[batch.kind as usize];
                rpass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                rpass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                rpass.draw_indexed(0..mesh.index_count, 0, batch.range.clone());
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

/// Whether the browser hands out a WebGPU adapter at all. Checked once
/// before any scene mounts.
pub async fn adapter_available() -> bool {
    let instance = wgpu::Instance::default();
    instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: None,
            force_fallback_adapter: false,
        })
        .await
        .is_some()
}

fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("instance_vb"),
        size: (std::mem::size_of::<InstanceData>() * capacity.max(1)) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn build_instances(ctx: &SceneContext) -> (Vec<InstanceData>, Vec<Batch>) {
    let drawables = ctx.scene.drawables();
    let mut instances = Vec::with_capacity(drawables.len());
    let mut batches = Vec::new();

    for kind in MESH_KINDS {
        let start = instances.len() as u32;
        instances.extend(
            drawables
                .iter()
                .filter(|d| d.color.w >= 1.0 && MeshKind::of(&d.shape) == kind)
                .map(|d| InstanceData::new(mesh::instance_model(d.world, &d.shape), d.color)),
        );
        let end = instances.len() as u32;
        if end > start {
            batches.push(Batch {
                kind,
                range: start..end,
                translucent: false,
            });
        }
    }

    let eye = ctx.camera.eye;
    let mut translucent: Vec<_> = drawables.iter().filter(|d| d.color.w < 1.0).collect();
    translucent.sort_by(|a, b| {
        let da = a.world.w_axis.truncate().distance_squared(eye);
        let db = b.world.w_axis.truncate().distance_squared(eye);
        db.total_cmp(&da)
    });
    let first = instances.len() as u32;
    instances.extend(
        translucent
            .iter()
            .map(|d| InstanceData::new(mesh::instance_model(d.world, &d.shape), d.color)),
    );
    batches.extend(
        mesh::kind_runs(translucent.iter().map(|d| MeshKind::of(&d.shape)), first)
            .into_iter()
            .map(|(kind, range)| Batch {
                kind,
                range,
                translucent: true,
            }),
    );
    (instances, batches)
}

fn uniforms(ctx: &SceneContext) -> Uniforms {
    let (fog_color, fog) = match ctx.fog {
        Some(f) => (f.color, [f.near, f.far, 1.0, 0.0]),
        None => (Vec4::ZERO, [0.0; 4]),
    };
    Uniforms {
        view_proj: ctx.camera.view_projection().to_cols_array_2d(),
        eye: ctx.camera.eye.extend(1.0).to_array(),
        light: ctx.light.position.extend(ctx.light.intensity).to_array(),
        ambient: ctx.light.ambient.to_array(),
        fog_color: fog_color.to_array(),
        fog,
    }
}

fn srgb_to_linear(c: f32) -> f64 {
    (c.clamp(0.0, 1.0) as f64).powf(2.2)
}

fn clear_color(c: Vec4) -> wgpu::Color {
    wgpu::Color {
        r: srgb_to_linear(c.x),
        g: srgb_to_linear(c.y),
        b: srgb_to_linear(c.z),
        a: c.w as f64,
    }
}
