//! Lit pipeline for untextured geometry.
//!
//! One pipeline covers Lambert, Phong, Blinn-Phong and the spotlight; the
//! shader branches on the light's `mode` so the shading demos differ only in
//! the uniform they upload.

use crate::data_structures::{
    instance::InstanceRaw,
    model::{ModelVertex, Vertex},
};

pub fn mk_shaded_pipeline(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    camera_bind_group_layout: &wgpu::BindGroupLayout,
    light_bind_group_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Shaded Pipeline Layout"),
        bind_group_layouts: &[Some(camera_bind_group_layout), Some(light_bind_group_layout)],
        immediate_size: 0,
    });
    let shader = wgpu::ShaderModuleDescriptor {
        label: Some("Shaded Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shaded.wgsl").into()),
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
