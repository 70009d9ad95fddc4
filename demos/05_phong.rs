//! Cornell box with Phong shading: Lambert diffuse plus a specular term
//! from the reflected light direction.

use instant::Duration;
use lumen_ngin::{
    app::{self, Demo, DemoConstructor},
    context::{Context, InitContext},
    data_structures::{
        instance::{self, Instance},
        model::{self, DrawLight, DrawModel},
    },
    pipelines::{
        light::{self, LightUniform, LightingMode},
        shaded,
    },
    render, resources,
};

struct Phong {
    pipeline: wgpu::RenderPipeline,
    light_pipeline: wgpu::RenderPipeline,
    mesh: model::Mesh,
    marker: model::Mesh,
    instance_buffer: wgpu::Buffer,
    orbit: f32,
}

impl Phong {
    async fn new(init: &InitContext) -> anyhow::Result<Self> {
        let scene = resources::load_scene("cornell_box.gltf").await?;
        let mesh = scene.into_mesh(&init.device, "cornell box");
        let (vertices, indices) = model::unit_cube();
        let marker = model::mk_mesh(&init.device, "light marker", &vertices, &indices);
        let instance_buffer = instance::mk_instance_buffer(&init.device, &[Instance::new()]);

        let pipeline = shaded::mk_shaded_pipeline(
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
            mesh,
            marker,
            instance_buffer,
            orbit: 0.0,
        })
    }
}

impl Demo for Phong {
    fn on_init(&mut self, ctx: &mut Context) {
        ctx.light.uniform =
            LightUniform::new([0.0, 3.5, 0.0], [1.0, 1.0, 1.0], LightingMode::Phong);
    }

    fn on_update(&mut self, ctx: &mut Context, dt: Duration) {
        self.orbit += dt.as_secs_f32() * 0.5;
        ctx.light.uniform.position = [1.5 * self.orbit.cos(), 3.5, 1.5 * self.orbit.sin()];
    }

    fn render(&self, ctx: &Context, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
        let mut pass =
            render::clear_pass(encoder, view, &ctx.depth_texture.view, ctx.clear_colour);

        pass.set_pipeline(&self.light_pipeline);
        pass.draw_light_mesh(&self.marker, &ctx.camera.bind_group, &ctx.light.bind_group);

        pass.set_pipeline(&self.pipeline);
        pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        pass.draw_mesh_instanced(
            &self.mesh,
            0..1,
            &ctx.camera.bind_group,
            &ctx.light.bind_group,
        );
    }
}

fn main() -> anyhow::Result<()> {
    let constructor: DemoConstructor = Box::new(|init: InitContext| {
        Box::pin(async move {
            let demo = Phong::new(&init).await?;
            Ok(Box::new(demo) as Box<dyn Demo>)
        })
    });
    app::run(constructor)
}
