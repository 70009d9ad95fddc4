//! Tangent-space normal mapping on a spinning cube. Both the checkerboard
//! diffuse map and the rippled normal map are generated in code, so the
//! demo needs no image assets; the cube's tangents are derived from its uv
//! layout the same way glTF scenes without tangents get theirs.

use cgmath::SquareMatrix;
use instant::Duration;
use lumen_ngin::{
    app::{self, Demo, DemoConstructor},
    context::{Context, InitContext},
    data_structures::{
        instance::{self, Instance},
        model::{self, DrawLight, DrawModel, Material, Model},
        scene::FlatScene,
        texture::Texture,
    },
    pipelines::{
        light::{self, LightUniform, LightingMode},
        normal_map,
    },
    render,
};

/// Alternating bright/dark tiles.
fn checkerboard(size: u32, tiles: u32) -> image::RgbaImage {
    let tile = (size / tiles).max(1);
    image::RgbaImage::from_fn(size, size, |x, y| {
        if ((x / tile) + (y / tile)) % 2 == 0 {
            image::Rgba([220, 220, 220, 255])
        } else {
            image::Rgba([90, 90, 110, 255])
        }
    })
}

/// Normal map of a sine-wave height field: n = normalize(-dh/dx, -dh/dy, 1),
/// remapped into [0, 255].
fn ripple_normal_map(size: u32, waves: f32, amplitude: f32) -> image::RgbaImage {
    let k = waves * std::f32::consts::TAU / size as f32;
    image::RgbaImage::from_fn(size, size, |x, y| {
        let (x, y) = (x as f32, y as f32);
        let dh_dx = amplitude * k * (x * k).cos() * (y * k).sin();
        let dh_dy = amplitude * k * (x * k).sin() * (y * k).cos();
        let len = (dh_dx * dh_dx + dh_dy * dh_dy + 1.0).sqrt();
        let n = [-dh_dx / len, -dh_dy / len, 1.0 / len];
        image::Rgba([
            ((n[0] * 0.5 + 0.5) * 255.0) as u8,
            ((n[1] * 0.5 + 0.5) * 255.0) as u8,
            ((n[2] * 0.5 + 0.5) * 255.0) as u8,
            255,
        ])
    })
}

struct NormalMapping {
    pipeline: wgpu::RenderPipeline,
    light_pipeline: wgpu::RenderPipeline,
    model: Model,
    marker: model::Mesh,
    instance: Instance,
    instance_buffer: wgpu::Buffer,
    angle: f32,
}

impl NormalMapping {
    fn new(init: &InitContext) -> anyhow::Result<Self> {
        // Route the cube through a flat scene to derive its tangent frame
        // from the uv deltas.
        let (vertices, indices) = model::unit_cube();
        let mut scene = FlatScene::new();
        let positions: Vec<[f32; 3]> = vertices.iter().map(|v| v.position).collect();
        let normals: Vec<[f32; 3]> = vertices.iter().map(|v| v.normal).collect();
        let uvs: Vec<[f32; 2]> = vertices.iter().map(|v| v.tex_coords).collect();
        scene.append_raw(
            &positions,
            Some(&normals),
            Some(&uvs),
            None,
            [1.0, 1.0, 1.0, 1.0],
            &indices,
            cgmath::Matrix4::identity(),
        );
        scene.compute_tangents();
        let mesh = scene.into_mesh(&init.device, "bumpy cube");

        let diffuse = Texture::from_image(
            &init.device,
            &init.queue,
            &image::DynamicImage::ImageRgba8(checkerboard(256, 8)),
            Some("checkerboard"),
            false,
        )?;
        let normal = Texture::from_image(
            &init.device,
            &init.queue,
            &image::DynamicImage::ImageRgba8(ripple_normal_map(256, 8.0, 12.0)),
            Some("ripples"),
            true,
        )?;
        let layout = normal_map::diffuse_normal_layout(&init.device);
        let material = Material::new(&init.device, "bumpy", diffuse, normal, &layout);
        let model = Model {
            meshes: vec![mesh],
            materials: vec![material],
        };

        let (vertices, indices) = model::unit_cube();
        let marker = model::mk_mesh(&init.device, "light marker", &vertices, &indices);
        let instance = Instance::new();
        let instance_buffer = instance::mk_instance_buffer(&init.device, &[instance.clone()]);

        let pipeline = normal_map::mk_normal_map_pipeline(
            &init.device,
            &init.config,
            &init.camera_bind_group_layout,
            &init.light_bind_group_layout,
        );
        let light_pipeline = light::mk_light_pipeline(
            &init.device,
            &init.config,
            &init.camera_bind_group_layout,
            &init.light_bind_group_layout,
        );

        Ok(Self {
            pipeline,
            light_pipeline,
            model,
            marker,
            instance,
            instance_buffer,
            angle: 0.0,
        })
    }
}

impl Demo for NormalMapping {
    fn on_init(&mut self, ctx: &mut Context) {
        ctx.camera.camera.position = (0.0, 1.0, -3.0).into();
        ctx.camera.camera.pitch = cgmath::Deg(-15.0).into();
        ctx.light.uniform =
            LightUniform::new([2.0, 2.0, -2.0], [1.0, 1.0, 1.0], LightingMode::BlinnPhong);
    }

    fn on_update(&mut self, ctx: &mut Context, dt: Duration) {
        self.angle += dt.as_secs_f32() * 0.4;
        self.instance.rotation = cgmath::Quaternion::from(cgmath::Euler::new(
            cgmath::Rad(0.0),
            cgmath::Rad(self.angle),
            cgmath::Rad(0.0),
        ));
        ctx.queue.write_buffer(
            &self.instance_buffer,
            0,
            bytemuck::cast_slice(&[self.instance.to_raw()]),
        );
    }

    fn render(&self, ctx: &Context, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
        let mut pass =
            render::clear_pass(encoder, view, &ctx.depth_texture.view, ctx.clear_colour);

        pass.set_pipeline(&self.light_pipeline);
        pass.draw_light_mesh(&self.marker, &ctx.camera.bind_group, &ctx.light.bind_group);

        pass.set_pipeline(&self.pipeline);
        pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        pass.draw_model_textured(
            &self.model,
            0..1,
            &ctx.camera.bind_group,
            &ctx.light.bind_group,
        );
    }
}

fn main() -> anyhow::Result<()> {
    let constructor: DemoConstructor = Box::new(|init: InitContext| {
        Box::pin(async move {
            let demo = NormalMapping::new(&init)?;
            Ok(Box::new(demo) as Box<dyn Demo>)
        })
    });
    app::run(constructor)
}
