//! Stencil-masked planar mirror.
//!
//! Rendering a mirror takes four draws against the shared depth-stencil
//! target, in this order within one frame:
//!
//! 1. `mask`: the mirror quad writes stencil ref 1 (color and depth off).
//! 2. `reflected`: the scene, pre-multiplied by the plane's reflection
//!    matrix, drawn only where stencil == 1. The reflection flips triangle
//!    winding, so this pipeline treats clockwise faces as front.
//! 3. `surface`: the mirror quad again, alpha-blended tint over the
//!    reflection. Its depth compare is Always, replacing the reflected
//!    geometry's depths (which lie behind the plane) with the quad's own.
//! 4. The ordinary scene pipelines draw the real scene. Objects in front of
//!    the mirror now occlude the reflection; the wall behind it does not.
//!
//! Callers set the stencil reference to 1 on the pass before these draws.

use crate::data_structures::{
    instance::InstanceRaw,
    model::{ModelVertex, Vertex},
    texture::Texture,
};

pub struct MirrorPipelines {
    pub mask: wgpu::RenderPipeline,
    pub reflected: wgpu::RenderPipeline,
    pub surface: wgpu::RenderPipeline,
}

impl MirrorPipelines {
    pub fn new(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
        light_bind_group_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        Self {
            mask: mk_mask_pipeline(device, config, camera_bind_group_layout),
            reflected: mk_reflected_pipeline(
                device,
                config,
                camera_bind_group_layout,
                light_bind_group_layout,
            ),
            surface: mk_surface_pipeline(device, config, camera_bind_group_layout),
        }
    }
}

fn stencil_write() -> wgpu::StencilState {
    let face = wgpu::StencilFaceState {
        compare: wgpu::CompareFunction::Always,
        fail_op: wgpu::StencilOperation::Keep,
        depth_fail_op: wgpu::StencilOperation::Keep,
        pass_op: wgpu::StencilOperation::Replace,
    };
    wgpu::StencilState {
        front: face,
        back: face,
        read_mask: 0xff,
        write_mask: 0xff,
    }
}

fn stencil_test() -> wgpu::StencilState {
    let face = wgpu::StencilFaceState {
        compare: wgpu::CompareFunction::Equal,
        fail_op: wgpu::StencilOperation::Keep,
        depth_fail_op: wgpu::StencilOperation::Keep,
        pass_op: wgpu::StencilOperation::Keep,
    };
    wgpu::StencilState {
        front: face,
        back: face,
        read_mask: 0xff,
        write_mask: 0x00,
    }
}

/// Stencil-only draw of the mirror quad. No color, no depth.
fn mk_mask_pipeline(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    camera_bind_group_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Mirror Mask Pipeline Layout"),
        bind_group_layouts: &[Some(camera_bind_group_layout)],
        immediate_size: 0,
    });
    let shader = wgpu::ShaderModuleDescriptor {
        label: Some("Mirror Mask Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("flat.wgsl").into()),
    };
    crate::pipelines::mk_render_pipeline(
        device,
        &layout,
        config.format,
        None,
        wgpu::ColorWrites::empty(),
        Some(wgpu::DepthStencilState {
            format: Texture::DEPTH_FORMAT,
            depth_write_enabled: Some(false),
            depth_compare: Some(wgpu::CompareFunction::Always),
            stencil: stencil_write(),
            bias: wgpu::DepthBiasState::default(),
        }),
        wgpu::FrontFace::Ccw,
        &[ModelVertex::desc(), InstanceRaw::desc()],
        shader,
    )
}

/// Lit scene draw restricted to the stencil mask, with clockwise front
/// faces because the reflection matrix has determinant -1.
fn mk_reflected_pipeline(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    camera_bind_group_layout: &wgpu::BindGroupLayout,
    light_bind_group_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Mirror Reflected Pipeline Layout"),
        bind_group_layouts: &[Some(camera_bind_group_layout), Some(light_bind_group_layout)],
        immediate_size: 0,
    });
    let shader = wgpu::ShaderModuleDescriptor {
        label: Some("Mirror Reflected Shader"),
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
        Some(wgpu::DepthStencilState {
            format: Texture::DEPTH_FORMAT,
            depth_write_enabled: Some(true),
            depth_compare: Some(wgpu::CompareFunction::Less),
            stencil: stencil_test(),
            bias: wgpu::DepthBiasState::default(),
        }),
        wgpu::FrontFace::Cw,
        &[ModelVertex::desc(), InstanceRaw::desc()],
        shader,
    )
}

/// Alpha-blended tint over the finished reflection. Depth compare is Always
/// so the quad's own depth replaces the reflected geometry's.
fn mk_surface_pipeline(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    camera_bind_group_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Mirror Surface Pipeline Layout"),
        bind_group_layouts: &[Some(camera_bind_group_layout)],
        immediate_size: 0,
    });
    let shader = wgpu::ShaderModuleDescriptor {
        label: Some("Mirror Surface Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("flat.wgsl").into()),
    };
    crate::pipelines::mk_render_pipeline(
        device,
        &layout,
        config.format,
        Some(wgpu::BlendState::ALPHA_BLENDING),
        wgpu::ColorWrites::ALL,
        Some(wgpu::DepthStencilState {
            format: Texture::DEPTH_FORMAT,
            depth_write_enabled: Some(true),
            depth_compare: Some(wgpu::CompareFunction::Always),
            stencil: stencil_test(),
            bias: wgpu::DepthBiasState::default(),
        }),
        wgpu::FrontFace::Ccw,
        &[ModelVertex::desc(), InstanceRaw::desc()],
        shader,
    )
}
