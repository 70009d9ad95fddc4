//! Omnidirectional shadow mapping for a point light.
//!
//! The light renders the scene six times into a depth cube map, once per
//! face, storing the light-to-fragment distance normalized by the far plane
//! instead of raw depth. The lit pass then samples the cube with the
//! fragment-to-light direction and compares distances.

use cgmath::{Deg, Matrix4, Point3};
use wgpu::util::DeviceExt;

use crate::camera::OPENGL_TO_WGPU_MATRIX;
use crate::data_structures::{
    instance::InstanceRaw,
    model::{ModelVertex, Vertex},
};

pub const SHADOW_MAP_SIZE: u32 = 1024;

/// Forward and up vectors per cube face, in the layer order cube views
/// expect: +X, -X, +Y, -Y, +Z, -Z.
pub const SHADOW_FACES: [([f32; 3], [f32; 3]); 6] = [
    ([1.0, 0.0, 0.0], [0.0, -1.0, 0.0]),
    ([-1.0, 0.0, 0.0], [0.0, -1.0, 0.0]),
    ([0.0, 1.0, 0.0], [0.0, 0.0, 1.0]),
    ([0.0, -1.0, 0.0], [0.0, 0.0, -1.0]),
    ([0.0, 0.0, 1.0], [0.0, -1.0, 0.0]),
    ([0.0, 0.0, -1.0], [0.0, -1.0, 0.0]),
];

/// View matrix of one cube face: the light position looking down the face's
/// forward vector.
pub fn face_view(light_pos: Point3<f32>, face: usize) -> Matrix4<f32> {
    let (forward, up) = SHADOW_FACES[face];
    Matrix4::look_to_rh(light_pos, forward.into(), up.into())
}

pub fn face_views(light_pos: Point3<f32>) -> [Matrix4<f32>; 6] {
    core::array::from_fn(|face| face_view(light_pos, face))
}

/// Shared projection of all six faces: 90 degree fov, square aspect, so the
/// frusta tile the full sphere around the light.
///
/// Clip y is negated: the cube sampling convention addresses face images
/// top row first, while an unflipped render lands in the framebuffer the
/// other way up. The depth pipeline flips its winding to match.
pub fn face_proj(far: f32) -> Matrix4<f32> {
    let flip_y = Matrix4::from_nonuniform_scale(1.0, -1.0, 1.0);
    flip_y * OPENGL_TO_WGPU_MATRIX * cgmath::perspective(Deg(90.0), 1.0, 0.1, far)
}

/// Per-face uniform of the depth pass, matching the WGSL `Face` struct.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FaceUniform {
    pub view_proj: [[f32; 4]; 4],
    pub light_pos: [f32; 3],
    pub far: f32,
}

impl FaceUniform {
    pub fn new(light_pos: Point3<f32>, far: f32, face: usize) -> Self {
        Self {
            view_proj: (face_proj(far) * face_view(light_pos, face)).into(),
            light_pos: light_pos.into(),
            far,
        }
    }
}

/// The depth cube map plus everything needed to render into and sample it.
///
/// Each face gets its own uniform buffer and bind group so all six depth
/// passes can be encoded into one command submission; a shared buffer
/// rewritten between passes would only keep its last contents.
pub struct ShadowCubeMap {
    pub texture: wgpu::Texture,
    /// One render target view per cube face (2D array layer).
    pub face_targets: [wgpu::TextureView; 6],
    /// Cube view sampled by the lit pass.
    pub cube_view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub face_buffers: [wgpu::Buffer; 6],
    pub face_bind_groups: [wgpu::BindGroup; 6],
    pub face_bind_group_layout: wgpu::BindGroupLayout,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl ShadowCubeMap {
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    pub fn new(device: &wgpu::Device, size: u32) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Shadow Cube Map"),
            size: wgpu::Extent3d {
                width: size,
                height: size,
                depth_or_array_layers: 6,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });

        let face_targets = core::array::from_fn(|face| {
            texture.create_view(&wgpu::TextureViewDescriptor {
                label: Some("Shadow Face Target"),
                dimension: Some(wgpu::TextureViewDimension::D2),
                base_array_layer: face as u32,
                array_layer_count: Some(1),
                ..Default::default()
            })
        });
        let cube_view = texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some("Shadow Cube View"),
            dimension: Some(wgpu::TextureViewDimension::Cube),
            ..Default::default()
        });

        // Depth textures may only be sampled without filtering (or with a
        // comparison sampler, which the distance comparison doesn't need).
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Shadow Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        let face_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
                label: Some("Shadow Face Layout"),
            });
        let face_buffers: [wgpu::Buffer; 6] = core::array::from_fn(|face| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("Shadow Face Buffer {face}")),
                contents: bytemuck::cast_slice(&[FaceUniform::new(
                    Point3::new(0.0, 0.0, 0.0),
                    100.0,
                    face,
                )]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            })
        });
        let face_bind_groups = core::array::from_fn(|face| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                layout: &face_bind_group_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: face_buffers[face].as_entire_binding(),
                }],
                label: Some("Shadow Face Bind Group"),
            })
        });

        let bind_group_layout = mk_bind_group_layout(device);
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&cube_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
            label: Some("Shadow Bind Group"),
        });

        Self {
            texture,
            face_targets,
            cube_view,
            sampler,
            face_buffers,
            face_bind_groups,
            face_bind_group_layout,
            bind_group,
            bind_group_layout,
        }
    }

    /// Rewrites all six face uniforms for the current light position.
    pub fn update(&self, queue: &wgpu::Queue, light_pos: Point3<f32>, far: f32) {
        for (face, buffer) in self.face_buffers.iter().enumerate() {
            let uniform = FaceUniform::new(light_pos, far, face);
            queue.write_buffer(buffer, 0, bytemuck::cast_slice(&[uniform]));
        }
    }
}

/// Layout of the cube map binding in the lit pass.
pub fn mk_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::Cube,
                    sample_type: wgpu::TextureSampleType::Depth,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::NonFiltering),
                count: None,
            },
        ],
        label: Some("Shadow Sample Layout"),
    })
}

/// Depth-only pipeline rendering one cube face. The fragment stage exports
/// the normalized light distance via `frag_depth`.
pub fn mk_shadow_depth_pipeline(
    device: &wgpu::Device,
    face_bind_group_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Shadow Depth Pipeline Layout"),
        bind_group_layouts: &[Some(face_bind_group_layout)],
        immediate_size: 0,
    });
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Shadow Depth Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shadow_depth.wgsl").into()),
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        cache: None,
        label: Some("Shadow Depth Pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[ModelVertex::desc(), InstanceRaw::desc()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            // face_proj negates clip y, which flips the apparent winding.
            front_face: wgpu::FrontFace::Cw,
            cull_mode: Some(wgpu::Face::Back),
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: ShadowCubeMap::FORMAT,
            depth_write_enabled: Some(true),
            depth_compare: Some(wgpu::CompareFunction::Less),
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview_mask: None,
    })
}

/// Lit pipeline that attenuates by the shadow cube map. Bind groups are
/// camera, light, shadow.
pub fn mk_shadow_shaded_pipeline(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    camera_bind_group_layout: &wgpu::BindGroupLayout,
    light_bind_group_layout: &wgpu::BindGroupLayout,
    shadow_bind_group_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Shadow Shaded Pipeline Layout"),
        bind_group_layouts: &[
            Some(camera_bind_group_layout),
            Some(light_bind_group_layout),
            Some(shadow_bind_group_layout),
        ],
        immediate_size: 0,
    });
    let shader = wgpu::ShaderModuleDescriptor {
        label: Some("Shadow Shaded Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shadow_shaded.wgsl").into()),
    };
    crate::pipelines::mk_render_pipeline(
        device,
        &layout,
        config.format,
        Some(wgpu::BlendState {
            alpha: wgpu::BlendComponent::REPLACE,
            color: wgpu::BlendComponent::REPLACE,
        }),
        wgpu::ColorWrites::ALL,
        Some(crate::pipelines::depth_stencil_default()),
        wgpu::FrontFace::Ccw,
        &[ModelVertex::desc(), InstanceRaw::desc()],
        shader,
    )
}
