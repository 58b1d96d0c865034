use crate::mesh::{cone_mesh, cube_mesh, Vertex};
use crate::shaders;
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use storewalk_player::WalkCamera;
use storewalk_scene::{Light, MeshKind, PropInstance, SceneGraph};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
    ambient: [f32; 4],
    light0_dir: [f32; 4],
    light0_color: [f32; 4],
    light1_dir: [f32; 4],
    light1_color: [f32; 4],
    sky_top: [f32; 4],
    sky_bottom: [f32; 4],
    sky_center: [f32; 4],
    sky_params: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct InstanceData {
    model_0: [f32; 4],
    model_1: [f32; 4],
    model_2: [f32; 4],
    model_3: [f32; 4],
    color: [f32; 4],
}

fn instance_data(instance: &PropInstance) -> InstanceData {
    let t = &instance.transform;
    let model = Mat4::from_scale_rotation_translation(t.scale, t.rotation, t.position);
    let cols = model.to_cols_array_2d();
    InstanceData {
        model_0: cols[0],
        model_1: cols[1],
        model_2: cols[2],
        model_3: cols[3],
        color: instance.color,
    }
}

/// wgpu-based walkthrough renderer.
pub struct WgpuRenderer {
    prop_pipeline: wgpu::RenderPipeline,
    sky_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    cube_vertex_buffer: wgpu::Buffer,
    cube_index_buffer: wgpu::Buffer,
    cube_index_count: u32,
    cone_vertex_buffer: wgpu::Buffer,
    cone_index_buffer: wgpu::Buffer,
    cone_index_count: u32,
    box_instance_buffer: wgpu::Buffer,
    cone_instance_buffer: wgpu::Buffer,
    max_instances: u32,
    depth_texture: wgpu::TextureView,
    surface_format: wgpu::TextureFormat,
}

impl WgpuRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("uniform_buffer"),
            contents: bytemuck::bytes_of(&Uniforms::zeroed()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniform_bind_group_layout"),
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

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("uniform_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let vertex_layouts = [
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<Vertex>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &wgpu::vertex_attr_array![
                    0 => Float32x3,
                    1 => Float32x3,
                ],
            },
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<InstanceData>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &wgpu::vertex_attr_array![
                    2 => Float32x4,
                    3 => Float32x4,
                    4 => Float32x4,
                    5 => Float32x4,
                    6 => Float32x4,
                ],
            },
        ];

        let prop_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("prop_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::PROP_SHADER.into()),
        });

        let prop_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("prop_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &prop_shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &vertex_layouts,
            },
            fragment: Some(wgpu::FragmentState {
                module: &prop_shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let sky_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sky_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::SKY_SHADER.into()),
        });

        // The dome is the cube mesh scaled up with its inside faces kept.
        let sky_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("sky_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &sky_shader,
                entry_point: Some("vs_sky"),
                compilation_options: Default::default(),
                buffers: &vertex_layouts[..1],
            },
            fragment: Some(wgpu::FragmentState {
                module: &sky_shader,
                entry_point: Some("fs_sky"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Front),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let (cube_verts, cube_indices) = cube_mesh();
        let cube_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_vertex_buffer"),
            contents: bytemuck::cast_slice(&cube_verts),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let cube_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_index_buffer"),
            contents: bytemuck::cast_slice(&cube_indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let cube_index_count = cube_indices.len() as u32;

        let (cone_verts, cone_indices) = cone_mesh(16);
        let cone_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cone_vertex_buffer"),
            contents: bytemuck::cast_slice(&cone_verts),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let cone_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cone_index_buffer"),
            contents: bytemuck::cast_slice(&cone_indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let cone_index_count = cone_indices.len() as u32;

        let max_instances = 1024u32;
        let instance_size = (max_instances as u64) * std::mem::size_of::<InstanceData>() as u64;
        let box_instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("box_instance_buffer"),
            size: instance_size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let cone_instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("cone_instance_buffer"),
            size: instance_size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let depth_texture = Self::create_depth_texture(device, width, height);

        Self {
            prop_pipeline,
            sky_pipeline,
            uniform_buffer,
            uniform_bind_group,
            cube_vertex_buffer,
            cube_index_buffer,
            cube_index_count,
            cone_vertex_buffer,
            cone_index_buffer,
            cone_index_count,
            box_instance_buffer,
            cone_instance_buffer,
            max_instances,
            depth_texture,
            surface_format,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    /// Render one frame: sky dome, opaque props, translucent props.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        camera: &WalkCamera,
        scene: &SceneGraph,
    ) {
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&self.build_uniforms(camera, scene)),
        );

        // Boxes are drawn opaque-first so the glass door blends over what
        // stands behind it.
        let mut boxes: Vec<InstanceData> = Vec::new();
        let mut cones: Vec<InstanceData> = Vec::new();
        let mut translucent: Vec<InstanceData> = Vec::new();
        for instance in scene.instances() {
            let data = instance_data(instance);
            match instance.mesh {
                MeshKind::Cone => cones.push(data),
                MeshKind::Box if instance.color[3] < 1.0 => translucent.push(data),
                MeshKind::Box => boxes.push(data),
            }
        }
        boxes.extend(translucent);
        boxes.truncate(self.max_instances as usize);
        cones.truncate(self.max_instances as usize);

        if !boxes.is_empty() {
            queue.write_buffer(&self.box_instance_buffer, 0, bytemuck::cast_slice(&boxes));
        }
        if !cones.is_empty() {
            queue.write_buffer(&self.cone_instance_buffer, 0, bytemuck::cast_slice(&cones));
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.53,
                            g: 0.81,
                            b: 0.92,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            // Sky dome first, depth writes off.
            pass.set_pipeline(&self.sky_pipeline);
            pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            pass.set_vertex_buffer(0, self.cube_vertex_buffer.slice(..));
            pass.set_index_buffer(self.cube_index_buffer.slice(..), wgpu::IndexFormat::Uint16);
            pass.draw_indexed(0..self.cube_index_count, 0, 0..1);

            pass.set_pipeline(&self.prop_pipeline);
            pass.set_bind_group(0, &self.uniform_bind_group, &[]);

            if !cones.is_empty() {
                pass.set_vertex_buffer(0, self.cone_vertex_buffer.slice(..));
                pass.set_vertex_buffer(1, self.cone_instance_buffer.slice(..));
                pass.set_index_buffer(
                    self.cone_index_buffer.slice(..),
                    wgpu::IndexFormat::Uint16,
                );
                pass.draw_indexed(0..self.cone_index_count, 0, 0..cones.len() as u32);
            }

            if !boxes.is_empty() {
                pass.set_vertex_buffer(0, self.cube_vertex_buffer.slice(..));
                pass.set_vertex_buffer(1, self.box_instance_buffer.slice(..));
                pass.set_index_buffer(
                    self.cube_index_buffer.slice(..),
                    wgpu::IndexFormat::Uint16,
                );
                pass.draw_indexed(0..self.cube_index_count, 0, 0..boxes.len() as u32);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn build_uniforms(&self, camera: &WalkCamera, scene: &SceneGraph) -> Uniforms {
        let mut uniforms = Uniforms::zeroed();
        uniforms.view_proj = camera.view_projection().to_cols_array_2d();

        let mut directional_slot = 0;
        for light in &scene.lights {
            match light {
                Light::Ambient { color, intensity } => {
                    for (dst, c) in uniforms.ambient.iter_mut().zip(color) {
                        *dst += c * intensity;
                    }
                }
                Light::Directional {
                    direction,
                    color,
                    intensity,
                } => {
                    let dir = [direction.x, direction.y, direction.z, 0.0];
                    let col = [
                        color[0] * intensity,
                        color[1] * intensity,
                        color[2] * intensity,
                        0.0,
                    ];
                    match directional_slot {
                        0 => {
                            uniforms.light0_dir = dir;
                            uniforms.light0_color = col;
                        }
                        1 => {
                            uniforms.light1_dir = dir;
                            uniforms.light1_color = col;
                        }
                        _ => {
                            tracing::warn!("more than two directional lights; extras ignored");
                        }
                    }
                    directional_slot += 1;
                }
            }
        }

        let sky = &scene.sky;
        uniforms.sky_top = [sky.top_color[0], sky.top_color[1], sky.top_color[2], 1.0];
        uniforms.sky_bottom = [
            sky.bottom_color[0],
            sky.bottom_color[1],
            sky.bottom_color[2],
            1.0,
        ];
        // Dome follows the camera on the ground plane so walking never
        // reaches its edge.
        uniforms.sky_center = [camera.position.x, 0.0, camera.position.z, 0.0];
        uniforms.sky_params = [sky.offset, sky.exponent, sky.dome_radius, 0.0];
        uniforms
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}
