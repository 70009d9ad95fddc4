//! A spinning cube with red/green/blue faces, still unlit.

use instant::Duration;
use lumen_ngin::{
    app::{self, Demo, DemoConstructor},
    context::{Context, InitContext},
    data_structures::{
        instance::{self, Instance},
        model::{self, DrawModel},
    },
    pipelines::flat,
    render,
};

struct Cube {
    pipeline: wgpu::RenderPipeline,
    mesh: model::Mesh,
    instance: Instance,
    instance_buffer: wgpu::Buffer,
    angle: f32,
}

impl Cube {
    fn new(init: &InitContext) -> Self {
        let (vertices, indices) = model::unit_cube();
        let mesh = model::mk_mesh(&init.device, "cube", &vertices, &indices);
        let instance = Instance::new();
        let instance_buffer = instance::mk_instance_buffer(&init.device, &[instance.clone()]);
        let pipeline = flat::mk_flat_pipeline(
            &init.device,
            &init.config,
            &init.camera_bind_group_layout,
        );

        Self {
            pipeline,
            mesh,
            instance,
            instance_buffer,
            angle: 0.0,
        }
    }
}

impl Demo for Cube {
    fn on_init(&mut self, ctx: &mut Context) {
        ctx.camera.camera.position = (0.0, 1.5, -3.0).into();
        ctx.camera.camera.pitch = cgmath::Deg(-20.0).into();
    }

    fn on_update(&mut self, ctx: &mut Context, dt: Duration) {
        self.angle += dt.as_secs_f32();
        self.instance.rotation =
            cgmath::Quaternion::from(cgmath::Euler::new(
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
        Box::pin(async move { Ok(Box::new(Cube::new(&init)) as Box<dyn Demo>) })
    });
    app::run(constructor)
}
