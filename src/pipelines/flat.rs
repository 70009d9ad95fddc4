//! Unlit pipeline: vertex albedo straight to the framebuffer.
//!
//! Used by the first demos before any lighting exists, and reused by the
//! mirror demo for the stencil mask and the tinted mirror surface.

use crate::data_structures::{
    instance::InstanceRaw,
    model::{ModelVertex, Vertex},
};

pub fn mk_flat_pipeline(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    camera_bind_group_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Flat Pipeline Layout"),
        bind_group_layouts: &[Some(camera_bind_group_layout)],
        immediate_size: 0,
    });
    let shader = wgpu::ShaderModuleDescriptor {
        label: Some("Flat Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("flat.wgsl").into()),
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
