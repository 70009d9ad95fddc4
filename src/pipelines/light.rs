//! Light uniform and the small marker pipeline that visualizes the light.

use wgpu::util::DeviceExt;

use crate::data_structures::model::{ModelVertex, Vertex};

/// Shading model selected in the fragment shader by the light uniform.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightingMode {
    Lambert = 1,
    Phong = 2,
    BlinnPhong = 3,
    Spotlight = 4,
}

/// One point (or spot) light, laid out to match the WGSL `Light` struct.
///
/// vec3 fields in WGSL are 16-byte aligned, so every [f32; 3] here is
/// followed by a scalar that doubles as the alignment filler.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    pub position: [f32; 3],
    pub mode: u32,
    pub color: [f32; 3],
    pub intensity: f32,
    pub direction: [f32; 3],
    pub cutoff_cos: f32,
    pub outer_cutoff_cos: f32,
    /// Far plane of the shadow projection, used to normalize the distances
    /// stored in the depth cube map.
    pub far: f32,
    pub _padding: [f32; 2],
}

impl LightUniform {
    pub fn new(position: [f32; 3], color: [f32; 3], mode: LightingMode) -> Self {
        Self {
            position,
            mode: mode as u32,
            color,
            intensity: 1.0,
            direction: [0.0, -1.0, 0.0],
            cutoff_cos: -1.0,
            outer_cutoff_cos: -1.0,
            far: 100.0,
            _padding: [0.0; 2],
        }
    }

    /// Turns the light into a spotlight aimed along `direction` with the
    /// given inner and outer cone half-angles.
    pub fn spotlight(
        mut self,
        direction: [f32; 3],
        cutoff: cgmath::Deg<f32>,
        outer_cutoff: cgmath::Deg<f32>,
    ) -> Self {
        self.mode = LightingMode::Spotlight as u32;
        self.direction = direction;
        self.cutoff_cos = cgmath::Angle::cos(cgmath::Rad::from(cutoff));
        self.outer_cutoff_cos = cgmath::Angle::cos(cgmath::Rad::from(outer_cutoff));
        self
    }
}

/// The light's GPU-side bundle, owned by the context and written back every
/// frame so demos can animate the uniform freely in `on_update`.
pub struct LightResources {
    pub uniform: LightUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl LightResources {
    pub fn new(device: &wgpu::Device, uniform: LightUniform) -> Self {
        let buffer = mk_buffer(device, uniform);
        let bind_group_layout = mk_bind_group_layout(device);
        let bind_group = mk_bind_group(device, &bind_group_layout, &buffer);
        Self {
            uniform,
            buffer,
            bind_group,
            bind_group_layout,
        }
    }
}

pub fn mk_buffer(device: &wgpu::Device, light_uniform: LightUniform) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Light Buffer"),
        contents: bytemuck::cast_slice(&[light_uniform]),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    })
}

pub fn mk_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
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
        label: None,
    })
}

pub fn mk_bind_group(
    device: &wgpu::Device,
    bind_group_layout: &wgpu::BindGroupLayout,
    light_buffer: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout: bind_group_layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: light_buffer.as_entire_binding(),
        }],
        label: None,
    })
}

/// A small emissive cube drawn at the light position so the light source is
/// visible while tuning the shading demos.
pub fn mk_light_pipeline(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    camera_bind_group_layout: &wgpu::BindGroupLayout,
    light_bind_group_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Light Pipeline Layout"),
        bind_group_layouts: &[Some(camera_bind_group_layout), Some(light_bind_group_layout)],
        immediate_size: 0,
    });
    let shader = wgpu::ShaderModuleDescriptor {
        label: Some("Light Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("light.wgsl").into()),
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
        &[ModelVertex::desc()],
        shader,
    )
}
