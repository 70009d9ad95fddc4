//! Demo trait and the application event loop.
//!
//! A demo owns its meshes and pipelines and encodes its passes each frame;
//! the loop here owns the window, the GPU context, and the per-frame
//! bookkeeping every demo shares (camera controller, camera and light
//! uniform uploads, resize handling).

use std::{iter, pin::Pin, sync::Arc};

use instant::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    window::Window,
};

use crate::{
    context::{Context, InitContext, MouseButtonState},
    data_structures::texture::Texture,
};

/// One runnable demo program.
///
/// # Lifecycle
///
/// 1. The constructor (see [`DemoConstructor`]) loads resources and builds
///    pipelines from the [`InitContext`].
/// 2. `on_init()` runs once with the full context; reposition the camera or
///    set the light here.
/// 3. `on_window_events()` / `on_device_events()` run per input event.
/// 4. `on_update()` runs every frame before rendering.
/// 5. `render()` encodes this frame's passes into the given encoder.
pub trait Demo {
    fn on_init(&mut self, _ctx: &mut Context) {}

    fn on_window_events(&mut self, _ctx: &Context, _event: &WindowEvent) {}

    fn on_device_events(&mut self, _ctx: &Context, _event: &DeviceEvent) {}

    fn on_update(&mut self, _ctx: &mut Context, _dt: Duration) {}

    fn render(&self, ctx: &Context, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView);
}

/// Factory for a demo: async so constructors can load assets before the
/// event loop starts.
pub type DemoConstructor =
    Box<dyn FnOnce(InitContext) -> Pin<Box<dyn Future<Output = anyhow::Result<Box<dyn Demo>>>>>>;

struct AppState {
    ctx: Context,
    is_surface_configured: bool,
}

impl AppState {
    fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.ctx.config.width = width;
            self.ctx.config.height = height;
            self.is_surface_configured = true;
            self.ctx.projection.resize(width, height);
            self.ctx
                .surface
                .configure(&self.ctx.device, &self.ctx.config);
            self.ctx.depth_texture = Texture::create_depth_texture(
                &self.ctx.device,
                [self.ctx.config.width, self.ctx.config.height],
                "depth_texture",
            );
        }
    }

    fn render(&mut self, demo: &dyn Demo) -> Result<(), wgpu::CurrentSurfaceTexture> {
        self.ctx.window.request_redraw();

        if !self.is_surface_configured {
            return Ok(());
        }

        let output = match self.ctx.surface.get_current_texture() {
            wgpu::CurrentSurfaceTexture::Success(output)
            | wgpu::CurrentSurfaceTexture::Suboptimal(output) => output,
            err => return Err(err),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder =
            self.ctx
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Render Encoder"),
                });

        demo.render(&self.ctx, &mut encoder, &view);

        self.ctx.queue.submit(iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

pub struct App {
    async_runtime: tokio::runtime::Runtime,
    state: Option<AppState>,
    demo: Option<Box<dyn Demo>>,
    constructor: Option<DemoConstructor>,
    last_time: Instant,
}

impl App {
    fn new(constructor: DemoConstructor) -> anyhow::Result<Self> {
        Ok(Self {
            async_runtime: tokio::runtime::Runtime::new()?,
            state: None,
            demo: None,
            constructor: Some(constructor),
            last_time: Instant::now(),
        })
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes();
        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("could not create a window: {e}");
                event_loop.exit();
                return;
            }
        };

        let Some(constructor) = self.constructor.take() else {
            return;
        };

        let init = self.async_runtime.block_on(async move {
            let ctx = Context::new(window).await?;
            // The clone only bumps the internal refcounts of Device/Queue.
            let demo = constructor((&ctx).into()).await?;
            anyhow::Ok((ctx, demo))
        });
        match init {
            Ok((mut ctx, mut demo)) => {
                demo.on_init(&mut ctx);
                self.demo = Some(demo);
                self.state = Some(AppState {
                    ctx,
                    is_surface_configured: false,
                });
            }
            Err(e) => {
                log::error!("demo initialization failed: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        let (Some(state), Some(demo)) = (&mut self.state, &mut self.demo) else {
            return;
        };
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            if let MouseButtonState::Right = state.ctx.mouse.pressed {
                state.ctx.camera.controller.handle_mouse(dx, dy);
            }
        }
        demo.on_device_events(&state.ctx, &event);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let (Some(state), Some(demo)) = (&mut self.state, &mut self.demo) else {
            return;
        };

        state.ctx.camera.controller.handle_window_events(&event);
        if let WindowEvent::CursorMoved { position, .. } = event {
            state.ctx.mouse.coords = position;
        }

        demo.on_window_events(&state.ctx, &event);

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::MouseInput {
                state: button_state,
                button,
                ..
            } => match (button, button_state.is_pressed()) {
                (MouseButton::Left, true) => state.ctx.mouse.pressed = MouseButtonState::Left,
                (MouseButton::Right, true) => state.ctx.mouse.pressed = MouseButtonState::Right,
                (_, false) => state.ctx.mouse.pressed = MouseButtonState::None,
                _ => (),
            },
            WindowEvent::RedrawRequested => {
                let dt = self.last_time.elapsed();
                self.last_time = Instant::now();

                match state.render(demo.as_ref()) {
                    Ok(_) => {
                        // Advance camera and demo state for the next frame.
                        state
                            .ctx
                            .camera
                            .controller
                            .update(&mut state.ctx.camera.camera, dt);
                        demo.on_update(&mut state.ctx, dt);

                        state
                            .ctx
                            .camera
                            .uniform
                            .update_view_proj(&state.ctx.camera.camera, &state.ctx.projection);
                        state.ctx.queue.write_buffer(
                            &state.ctx.camera.buffer,
                            0,
                            bytemuck::cast_slice(&[state.ctx.camera.uniform]),
                        );
                        state.ctx.queue.write_buffer(
                            &state.ctx.light.buffer,
                            0,
                            bytemuck::cast_slice(&[state.ctx.light.uniform]),
                        );
                    }
                    // Reconfigure the surface if it's lost or outdated
                    Err(
                        wgpu::CurrentSurfaceTexture::Lost | wgpu::CurrentSurfaceTexture::Outdated,
                    ) => {
                        let size = state.ctx.window.inner_size();
                        state.resize(size.width, size.height);
                    }
                    Err(e) => {
                        log::error!("Unable to render {:?}", e);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Builds the event loop and runs `constructor`'s demo until the window
/// closes.
pub fn run(constructor: DemoConstructor) -> anyhow::Result<()> {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    };

    let event_loop = EventLoop::new()?;
    let mut app = App::new(constructor)?;
    event_loop.run_app(&mut app)?;

    Ok(())
}
