//! A planar mirror on the back wall of the Cornell box, done with the
//! stencil buffer: mask the mirror quad, draw the scene reflected across
//! the mirror plane inside the mask, tint the quad, then draw the real
//! scene on top.

use instant::Duration;
use lumen_ngin::{
    app::{self, Demo, DemoConstructor},
    camera::{self, CameraUniform},
    context::{Context, InitContext},
    data_structures::{
        instance::{self, Instance},
        model::{self, DrawLight, DrawModel, ModelVertex},
    },
    pipelines::{
        light::{self, LightUniform, LightingMode},
        mirror::MirrorPipelines,
        shaded,
    },
    reflect::Plane,
    render, resources,
};

/// Slight offset off the back wall so the quad never z-fights with it.
const MIRROR_Z: f32 = 1.99;

/// The mirror quad, wound to face the open front of the box.
fn mirror_quad(device: &wgpu::Device) -> model::Mesh {
    let corners = [
        [-1.2, 1.0, MIRROR_Z],
        [1.2, 1.0, MIRROR_Z],
        [1.2, 3.0, MIRROR_Z],
        [-1.2, 3.0, MIRROR_Z],
    ];
    let vertices: Vec<ModelVertex> = corners
        .iter()
        .map(|&position| ModelVertex {
            position,
            tex_coords: [0.0, 0.0],
            normal: [0.0, 0.0, -1.0],
            albedo: [0.55, 0.65, 0.75, 0.22],
            tangent: [0.0; 3],
            bitangent: [0.0; 3],
        })
        .collect();
    let indices = [0u32, 2, 1, 0, 3, 2];
    model::mk_mesh(device, "mirror quad", &vertices, &indices)
}

struct Mirror {
    mirror_pipelines: MirrorPipelines,
    scene_pipeline: wgpu::RenderPipeline,
    light_pipeline: wgpu::RenderPipeline,
    mesh: model::Mesh,
    quad: model::Mesh,
    marker: model::Mesh,
    instance_buffer: wgpu::Buffer,
    plane: Plane,
    reflected_buffer: wgpu::Buffer,
    reflected_bind_group: wgpu::BindGroup,
    orbit: f32,
}

impl Mirror {
    async fn new(init: &InitContext) -> anyhow::Result<Self> {
        let scene = resources::load_scene("cornell_box.gltf").await?;
        let mesh = scene.into_mesh(&init.device, "cornell box");
        let quad = mirror_quad(&init.device);
        let (vertices, indices) = model::unit_cube();
        let marker = model::mk_mesh(&init.device, "light marker", &vertices, &indices);
        let instance_buffer = instance::mk_instance_buffer(&init.device, &[Instance::new()]);

        let plane = Plane::from_point_normal(
            cgmath::Point3::new(0.0, 2.0, MIRROR_Z),
            cgmath::Vector3::new(0.0, 0.0, -1.0),
        );
        let (reflected_buffer, reflected_bind_group) = camera::mk_camera_binding(
            &init.device,
            &init.camera_bind_group_layout,
            &CameraUniform::new(),
        );

        let mirror_pipelines = MirrorPipelines::new(
            &init.device,
            &init.config,
            &init.camera_bind_group_layout,
            &init.light_bind_group_layout,
        );
        let scene_pipeline = shaded::mk_shaded_pipeline(
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
            mirror_pipelines,
            scene_pipeline,
            light_pipeline,
            mesh,
            quad,
            marker,
            instance_buffer,
            plane,
            reflected_buffer,
            reflected_bind_group,
            orbit: 0.0,
        })
    }
}

impl Demo for Mirror {
    fn on_init(&mut self, ctx: &mut Context) {
        ctx.light.uniform =
            LightUniform::new([0.0, 3.5, 0.0], [1.0, 1.0, 1.0], LightingMode::BlinnPhong);
    }

    fn on_update(&mut self, ctx: &mut Context, dt: Duration) {
        self.orbit += dt.as_secs_f32() * 0.5;
        ctx.light.uniform.position = [1.5 * self.orbit.cos(), 3.5, 1.5 * self.orbit.sin()];

        // The reflected viewpoint: scene geometry premultiplied by the
        // plane's reflection, eye mirrored across the plane.
        let view_proj = ctx.projection.calc_matrix()
            * ctx.camera.camera.calc_matrix()
            * self.plane.reflection_matrix();
        let eye = self.plane.reflect_point(ctx.camera.camera.position);
        let mut uniform = CameraUniform::new();
        uniform.set_view_proj(view_proj, eye);
        ctx.queue
            .write_buffer(&self.reflected_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }

    fn render(&self, ctx: &Context, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
        let mut pass =
            render::clear_pass(encoder, view, &ctx.depth_texture.view, ctx.clear_colour);
        pass.set_stencil_reference(1);
        pass.set_vertex_buffer(1, self.instance_buffer.slice(..));

        // 1. Stencil mask of the mirror quad.
        pass.set_pipeline(&self.mirror_pipelines.mask);
        pass.draw_mesh_instanced(
            &self.quad,
            0..1,
            &ctx.camera.bind_group,
            &ctx.light.bind_group,
        );

        // 2. The reflected scene, only inside the mask.
        pass.set_pipeline(&self.mirror_pipelines.reflected);
        pass.draw_mesh_instanced(
            &self.mesh,
            0..1,
            &self.reflected_bind_group,
            &ctx.light.bind_group,
        );

        // 3. The tinted mirror surface, stamping the quad's depth.
        pass.set_pipeline(&self.mirror_pipelines.surface);
        pass.draw_mesh_instanced(
            &self.quad,
            0..1,
            &ctx.camera.bind_group,
            &ctx.light.bind_group,
        );

        // 4. The real scene.
        pass.set_pipeline(&self.light_pipeline);
        pass.draw_light_mesh(&self.marker, &ctx.camera.bind_group, &ctx.light.bind_group);
        pass.set_pipeline(&self.scene_pipeline);
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
            let demo = Mirror::new(&init).await?;
            Ok(Box::new(demo) as Box<dyn Demo>)
        })
    });
    app::run(constructor)
}
