use std::mem::size_of;

use bytemuck::{bytes_of, cast_slice, Pod, Zeroable};
use glam::{const_vec2, Mat4, Vec2, Vec3, Vec4};
use wgpu::util::DeviceExt;

use crate::{component::Blending, entity::Scene, particles::ParticleBuffer};

const QUAD_VERTICES: [Vec2; 4] = [
    const_vec2!([-0.5, -0.5]),
    const_vec2!([-0.5, 0.5]),
    const_vec2!([0.5, -0.5]),
    const_vec2!([0.5, 0.5]),
];
const QUAD_INDICES: [u16; 6] = [0, 2, 1, 1, 2, 3];

#[derive(Debug, Copy, Clone, Default, Pod, Zeroable)]
#[repr(C)]
struct Uniforms {
    mv_mat: Mat4,
    p_mat: Mat4,
    fog_color: Vec4,
    fog_near: f32,
    fog_far: f32,
    point_size: f32,
    opacity: f32,
}

impl Uniforms {
    fn new(scene: &Scene) -> Self {
        let Scene {
            camera,
            particles,
            fog,
            ..
        } = scene;

        // Billboards are sized in view space. Scaling by tan(fov / 2) gives the
        // same on-screen size as a distance attenuated point sprite.
        let point_size = if particles.material.size_attenuation {
            particles.material.size * (camera.fov.to_radians() * 0.5).tan()
        } else {
            particles.material.size
        };

        Self {
            mv_mat: camera.view_matrix() * particles.transform.matrix(),
            p_mat: camera.projection_matrix(),
            fog_color: Vec3::from(fog.color).extend(1.0),
            fog_near: fog.near,
            fog_far: fog.far,
            point_size,
            opacity: particles.material.opacity,
        }
    }
}

pub struct ParticleRenderer {
    uniform_buffer: wgpu::Buffer,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    position_buffer: wgpu::Buffer,
    color_buffer: wgpu::Buffer,
    instance_count: u32,
    bind_group: wgpu::BindGroup,
    render_pipeline: wgpu::RenderPipeline,
}

impl ParticleRenderer {
    pub fn update(&self, queue: &wgpu::Queue, scene: &Scene) {
        queue.write_buffer(&self.uniform_buffer, 0, bytes_of(&Uniforms::new(scene)));
    }

    pub fn upload_positions(&self, queue: &wgpu::Queue, positions: &[f32]) {
        queue.write_buffer(&self.position_buffer, 0, cast_slice(positions));
    }

    pub fn draw<'rpass>(&'rpass self, rpass: &mut impl wgpu::util::RenderEncoder<'rpass>) {
        rpass.set_pipeline(&self.render_pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.set_vertex_buffer(1, self.position_buffer.slice(..));
        rpass.set_vertex_buffer(2, self.color_buffer.slice(..));
        rpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..(QUAD_INDICES.len() as _), 0, 0..self.instance_count);
    }

    pub fn destroy(&self) {
        self.uniform_buffer.destroy();
        self.vertex_buffer.destroy();
        self.index_buffer.destroy();
        self.position_buffer.destroy();
        self.color_buffer.destroy();
    }
}

pub struct ParticleRendererBuilder<'a> {
    scene: &'a Scene,
    particles: &'a ParticleBuffer,
    color_format: Option<wgpu::TextureFormat>,
    sample_count: u32,
}

impl<'a> ParticleRendererBuilder<'a> {
    pub fn new(scene: &'a Scene, particles: &'a ParticleBuffer) -> Self {
        Self {
            scene,
            particles,
            color_format: None,
            sample_count: 1,
        }
    }

    pub fn color_target_format(mut self, format: wgpu::TextureFormat) -> Self {
        self.color_format = Some(format);
        self
    }

    pub fn sample_count(mut self, sample_count: u32) -> Self {
        self.sample_count = sample_count;
        self
    }

    pub fn build(self, device: &wgpu::Device) -> ParticleRenderer {
        let scene = self.scene;
        let particles = self.particles;
        let color_format = self.color_format.expect("No color format provided");

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Particle Vertex Buffer"),
            contents: bytes_of(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Particle Index Buffer"),
            contents: bytes_of(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });
        let position_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Particle Position Buffer"),
            contents: cast_slice(particles.positions()),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        let color_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Particle Color Buffer"),
            contents: cast_slice(particles.colors()),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Particle Uniform Buffer"),
            contents: bytes_of(&Uniforms::new(scene)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: None,
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(size_of::<Uniforms>() as _),
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: None,
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let shader_module = device.create_shader_module(&wgpu::include_wgsl!("particle.wgsl"));

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: None,
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let stride = (ParticleBuffer::STRIDE * size_of::<f32>()) as wgpu::BufferAddress;
        let blend = match scene.particles.material.blending {
            Blending::Additive => wgpu::BlendState {
                color: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::SrcAlpha,
                    dst_factor: wgpu::BlendFactor::One,
                    operation: wgpu::BlendOperation::Add,
                },
                alpha: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::One,
                    dst_factor: wgpu::BlendFactor::One,
                    operation: wgpu::BlendOperation::Add,
                },
            },
            Blending::Normal => wgpu::BlendState::ALPHA_BLENDING,
        };

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Particle Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader_module,
                entry_point: "vs_main",
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: size_of::<Vec2>() as _,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &[wgpu::VertexAttribute {
                            format: wgpu::VertexFormat::Float32x2,
                            offset: 0,
                            shader_location: 0,
                        }],
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: stride,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &[wgpu::VertexAttribute {
                            format: wgpu::VertexFormat::Float32x3,
                            offset: 0,
                            shader_location: 1,
                        }],
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: stride,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &[wgpu::VertexAttribute {
                            format: wgpu::VertexFormat::Float32x3,
                            offset: 0,
                            shader_location: 2,
                        }],
                    },
                ],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader_module,
                entry_point: "fs_main",
                targets: &[wgpu::ColorTargetState {
                    format: color_format,
                    blend: Some(blend),
                    write_mask: wgpu::ColorWrites::ALL,
                }],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: self.sample_count,
                ..Default::default()
            },
            multiview: None,
        });

        ParticleRenderer {
            uniform_buffer,
            vertex_buffer,
            index_buffer,
            position_buffer,
            color_buffer,
            instance_count: particles.len() as u32,
            bind_group,
            render_pipeline,
        }
    }
}
