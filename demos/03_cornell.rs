//! The Cornell box, loaded from glTF and drawn unlit: the node tree is
//! flattened into one vertex/index buffer pair before upload.

use lumen_ngin::{
    app::{self, Demo, DemoConstructor},
    context::{Context, InitContext},
    data_structures::{
        instance::{self, Instance},
        model::{self, DrawModel},
    },
    pipelines::flat,
    render, resources,
};

struct Cornell {
    pipeline: wgpu::RenderPipeline,
    mesh: model::Mesh,
    instance_buffer: wgpu::Buffer,
}

impl Cornell {
    async fn new(init: &InitContext) -> anyhow::Result<Self> {
        let scene = resources::load_scene("cornell_box.gltf").await?;
        let mesh = scene.into_mesh(&init.device, "cornell box");
        let instance_buffer = instance::mk_instance_buffer(&init.device, &[Instance::new()]);
        let pipeline = flat::mk_flat_pipeline(
            &init.device,
            &init.config,
            &init.camera_bind_group_layout,
        );

        Ok(Self {
            pipeline,
            mesh,
            instance_buffer,
        })
    }
}

impl Demo for Cornell {
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
        Box::pin(async move {
            let demo = Cornell::new(&init).await?;
            Ok(Box::new(demo) as Box<dyn Demo>)
        })
    });
    app::run(constructor)
}
