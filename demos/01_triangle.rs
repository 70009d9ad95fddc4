//! The first triangle: three colored vertices through the flat pipeline.

use lumen_ngin::{
    app::{self, Demo, DemoConstructor},
    context::{Context, InitContext},
    data_structures::{
        instance::{self, Instance},
        model::{self, DrawModel, ModelVertex},
    },
    pipelines::flat,
    render,
};

struct Triangle {
    pipeline: wgpu::RenderPipeline,
    mesh: model::Mesh,
    instance_buffer: wgpu::Buffer,
}

impl Triangle {
    fn new(init: &InitContext) -> Self {
        let vertices = [
            ModelVertex {
                position: [-0.5, -0.5, 0.0],
                tex_coords: [0.0, 1.0],
                normal: [0.0, 0.0, -1.0],
                albedo: [1.0, 0.0, 0.0, 1.0],
                tangent: [0.0; 3],
                bitangent: [0.0; 3],
            },
            ModelVertex {
                position: [0.5, -0.5, 0.0],
                tex_coords: [1.0, 1.0],
                normal: [0.0, 0.0, -1.0],
                albedo: [0.0, 1.0, 0.0, 1.0],
                tangent: [0.0; 3],
                bitangent: [0.0; 3],
            },
            ModelVertex {
                position: [0.0, 0.5, 0.0],
                tex_coords: [0.5, 0.0],
                normal: [0.0, 0.0, -1.0],
                albedo: [0.0, 0.0, 1.0, 1.0],
                tangent: [0.0; 3],
                bitangent: [0.0; 3],
            },
        ];
        // Wound to face the camera, which looks down +z here.
        let indices = [0u32, 2, 1];

        let mesh = model::mk_mesh(&init.device, "triangle", &vertices, &indices);
        let instance_buffer = instance::mk_instance_buffer(&init.device, &[Instance::new()]);
        let pipeline = flat::mk_flat_pipeline(
            &init.device,
            &init.config,
            &init.camera_bind_group_layout,
        );

        Self {
            pipeline,
            mesh,
            instance_buffer,
        }
    }
}

impl Demo for Triangle {
    fn on_init(&mut self, ctx: &mut Context) {
        ctx.camera.camera.position = (0.0, 0.0, -3.0).into();
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
        Box::pin(async move { Ok(Box::new(Triangle::new(&init)) as Box<dyn Demo>) })
    });
    app::run(constructor)
}
