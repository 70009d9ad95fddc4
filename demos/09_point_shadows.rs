//! Point-light shadows from a depth cube map. Each frame renders the scene
//! six times into the cube faces (storing normalized light distance), then
//! shades the scene sampling the cube with the fragment-to-light direction.

use instant::Duration;
use lumen_ngin::{
    app::{self, Demo, DemoConstructor},
    context::{Context, InitContext},
    data_structures::{
        instance::{self, Instance},
        model::{self, DrawLight},
    },
    pipelines::{
        light::{self, LightUniform, LightingMode},
        shadow::{self, ShadowCubeMap, SHADOW_MAP_SIZE},
    },
    render, resources,
};

const SHADOW_FAR: f32 = 25.0;

struct PointShadows {
    shadow: ShadowCubeMap,
    depth_pipeline: wgpu::RenderPipeline,
    scene_pipeline: wgpu::RenderPipeline,
    light_pipeline: wgpu::RenderPipeline,
    mesh: model::Mesh,
    marker: model::Mesh,
    instance_buffer: wgpu::Buffer,
    orbit: f32,
}

impl PointShadows {
    async fn new(init: &InitContext) -> anyhow::Result<Self> {
        let scene = resources::load_scene("cornell_box.gltf").await?;
        let mesh = scene.into_mesh(&init.device, "cornell box");
        let (vertices, indices) = model::unit_cube();
        let marker = model::mk_mesh(&init.device, "light marker", &vertices, &indices);
        let instance_buffer = instance::mk_instance_buffer(&init.device, &[Instance::new()]);

        let shadow = ShadowCubeMap::new(&init.device, SHADOW_MAP_SIZE);
        let depth_pipeline =
            shadow::mk_shadow_depth_pipeline(&init.device, &shadow.face_bind_group_layout);
        let scene_pipeline = shadow::mk_shadow_shaded_pipeline(
            &init.device,
            &init.config,
            &init.camera_bind_group_layout,
            &init.light_bind_group_layout,
            &shadow.bind_group_layout,
        );
        let light_pipeline = light::mk_light_pipeline(
            &init.device,
            &init.config,
            &init.camera_bind_group_layout,
            &init.light_bind_group_layout,
        );

        Ok(Self {
            shadow,
            depth_pipeline,
            scene_pipeline,
            light_pipeline,
            mesh,
            marker,
            instance_buffer,
            orbit: 0.0,
        })
    }
}

impl Demo for PointShadows {
    fn on_init(&mut self, ctx: &mut Context) {
        let mut uniform =
            LightUniform::new([0.0, 3.0, 0.0], [1.0, 1.0, 1.0], LightingMode::BlinnPhong);
        uniform.far = SHADOW_FAR;
        ctx.light.uniform = uniform;
        self.shadow
            .update(&ctx.queue, uniform.position.into(), SHADOW_FAR);
    }

    fn on_update(&mut self, ctx: &mut Context, dt: Duration) {
        self.orbit += dt.as_secs_f32() * 0.5;
        ctx.light.uniform.position = [1.2 * self.orbit.cos(), 3.0, 1.2 * self.orbit.sin()];
        self.shadow
            .update(&ctx.queue, ctx.light.uniform.position.into(), SHADOW_FAR);
    }

    fn render(&self, ctx: &Context, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
        // Depth passes: one per cube face.
        for face in 0..6 {
            let mut pass = render::shadow_face_pass(encoder, &self.shadow.face_targets[face]);
            pass.set_pipeline(&self.depth_pipeline);
            pass.set_bind_group(0, &self.shadow.face_bind_groups[face], &[]);
            pass.set_vertex_buffer(0, self.mesh.vertex_buffer.slice(..));
            pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
            pass.set_index_buffer(self.mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            pass.draw_indexed(0..self.mesh.num_elements, 0, 0..1);
        }

        // Lit pass sampling the cube.
        let mut pass =
            render::clear_pass(encoder, view, &ctx.depth_texture.view, ctx.clear_colour);

        pass.set_pipeline(&self.light_pipeline);
        pass.draw_light_mesh(&self.marker, &ctx.camera.bind_group, &ctx.light.bind_group);

        pass.set_pipeline(&self.scene_pipeline);
        pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        pass.set_bind_group(0, &ctx.camera.bind_group, &[]);
        pass.set_bind_group(1, &ctx.light.bind_group, &[]);
        pass.set_bind_group(2, &self.shadow.bind_group, &[]);
        pass.set_vertex_buffer(0, self.mesh.vertex_buffer.slice(..));
        pass.set_index_buffer(self.mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.mesh.num_elements, 0, 0..1);
    }
}

fn main() -> anyhow::Result<()> {
    let constructor: DemoConstructor = Box::new(|init: InitContext| {
        Box::pin(async move {
            let demo = PointShadows::new(&init).await?;
            Ok(Box::new(demo) as Box<dyn Demo>)
        })
    });
    app::run(constructor)
}
